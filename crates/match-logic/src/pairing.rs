//! Round-robin pairing generation
//!
//! Every unordered pair of the population meets exactly once, in
//! population order: (0,1), (0,2), ..., (0,n-1), (1,2), ...

/// Number of matches in a full round-robin: C(n, 2)
pub fn calculate_match_count(participant_count: usize) -> usize {
    if participant_count < 2 {
        return 0;
    }
    participant_count * (participant_count - 1) / 2
}

/// Generate all match pairings for a tournament
///
/// # Returns
/// Vector of (index_a, index_b) pairs, where index_a < index_b
pub fn generate_all_pairings(participant_count: usize) -> Vec<(usize, usize)> {
    let mut pairings = Vec::with_capacity(calculate_match_count(participant_count));
    for a in 0..participant_count {
        for b in (a + 1)..participant_count {
            pairings.push((a, b));
        }
    }
    pairings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_match_count() {
        assert_eq!(calculate_match_count(0), 0);
        assert_eq!(calculate_match_count(1), 0);
        assert_eq!(calculate_match_count(2), 1);
        assert_eq!(calculate_match_count(5), 10);
        assert_eq!(calculate_match_count(50), 1225);
    }

    #[test]
    fn test_population_order() {
        assert_eq!(
            generate_all_pairings(4),
            vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]
        );
    }

    #[test]
    fn test_tiny_populations() {
        assert!(generate_all_pairings(0).is_empty());
        assert!(generate_all_pairings(1).is_empty());
    }

    #[test]
    fn test_full_round_robin_all_pairs() {
        for n in [2usize, 3, 7, 20, 50] {
            let pairings = generate_all_pairings(n);
            assert_eq!(pairings.len(), calculate_match_count(n));

            let mut unique = HashSet::new();
            let mut counts = vec![0usize; n];
            for &(a, b) in &pairings {
                assert!(a < b, "not ordered: {} >= {}", a, b);
                assert!(b < n, "out of range: b={} >= n={}", b, n);
                assert!(unique.insert((a, b)), "duplicate pair ({}, {})", a, b);
                counts[a] += 1;
                counts[b] += 1;
            }

            for (i, count) in counts.iter().enumerate() {
                assert_eq!(*count, n - 1, "n={}: player {} has {} matches", n, i, count);
            }
        }
    }
}
