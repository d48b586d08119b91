//! Command line and configuration file handling

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use match_logic::TournamentConfig;
use serde::{Deserialize, Serialize};

/// Run an Iterated Prisoner's Dilemma round-robin and chart the scores
#[derive(Parser, Debug)]
#[command(name = "prisoners-arena", version, about)]
pub struct Cli {
    /// JSON configuration file; flags below override its values
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Players per strategy class, in roster order (e.g. 1,1,1,1,1)
    #[arg(long, value_delimiter = ',')]
    pub distribution: Option<Vec<u32>>,
    /// Rounds per match
    #[arg(long)]
    pub rounds: Option<u32>,
    /// Cooperation probability of the Random strategy
    #[arg(long)]
    pub ratio: Option<f64>,
    /// 64 hex characters; drawn from the OS when absent
    #[arg(long)]
    pub seed: Option<String>,
    /// Number of all-vs-all passes, each followed by a report
    #[arg(long)]
    pub iterations: Option<u32>,
    /// Reset every strategy before each pass after the first
    #[arg(long)]
    pub reset_between_runs: bool,
    /// Directory for charts and reports
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
    /// Also write every match of each pass to matches_<n>.json
    #[arg(long)]
    pub matches: bool,
    /// off, error, warn, info, debug or trace
    #[arg(long)]
    pub log_level: Option<String>,
    /// Print the strategy roster and exit
    #[arg(long)]
    pub list: bool,
}

/// Report formats written after each pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Svg,
    Json,
    Both,
}

/// Resolved runner configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub tournament: TournamentConfig,
    /// Hex seed for the Random players
    pub seed: Option<String>,
    pub iterations: u32,
    pub out_dir: PathBuf,
    pub format: OutputFormat,
    pub write_matches: bool,
    pub log_level: String,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            tournament: TournamentConfig::standard(),
            seed: None,
            iterations: 1,
            out_dir: PathBuf::from("."),
            format: OutputFormat::Svg,
            write_matches: false,
            log_level: "info".to_string(),
        }
    }
}

impl ArenaConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))
    }

    /// Config file (if any) with command line overrides applied
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply(cli);
        config.validate()?;
        Ok(config)
    }

    fn apply(&mut self, cli: &Cli) {
        if let Some(distribution) = &cli.distribution {
            self.tournament.distribution = distribution.clone();
        }
        if let Some(rounds) = cli.rounds {
            self.tournament.rounds = rounds;
        }
        if let Some(ratio) = cli.ratio {
            self.tournament.params.cooperate_ratio = ratio;
        }
        if cli.reset_between_runs {
            self.tournament.reset_between_runs = true;
        }
        if let Some(seed) = &cli.seed {
            self.seed = Some(seed.clone());
        }
        if let Some(iterations) = cli.iterations {
            self.iterations = iterations;
        }
        if let Some(out_dir) = &cli.out_dir {
            self.out_dir = out_dir.clone();
        }
        if let Some(format) = cli.format {
            self.format = format;
        }
        if cli.matches {
            self.write_matches = true;
        }
        if let Some(level) = &cli.log_level {
            self.log_level = level.clone();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            bail!("iterations must be at least 1");
        }
        self.level()?;
        if let Some(seed) = &self.seed {
            parse_seed(seed)?;
        }
        self.tournament.validate()?;
        Ok(())
    }

    pub fn level(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|e| anyhow::anyhow!("invalid log level {:?}: {}", self.log_level, e))
    }

    /// Configured seed, or a fresh one from the OS-seeded generator
    pub fn seed_bytes(&self) -> Result<[u8; 32]> {
        match &self.seed {
            Some(hex) => parse_seed(hex),
            None => Ok(rand::random()),
        }
    }
}

/// Parse 64 hex characters into a 32-byte seed
pub fn parse_seed(hex: &str) -> Result<[u8; 32]> {
    let hex = hex.trim();
    if hex.len() != 64 || !hex.is_ascii() {
        bail!("seed must be 64 hex characters, got {:?}", hex);
    }
    let mut seed = [0u8; 32];
    for (i, byte) in seed.iter_mut().enumerate() {
        let pair = &hex[i * 2..i * 2 + 2];
        *byte = u8::from_str_radix(pair, 16)
            .with_context(|| format!("invalid hex {:?} in seed", pair))?;
    }
    Ok(seed)
}

pub fn format_seed(seed: &[u8; 32]) -> String {
    seed.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use match_logic::StrategyKind;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["prisoners-arena"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults_match_reference_run() {
        let config = ArenaConfig::resolve(&cli(&[])).unwrap();

        assert_eq!(config.tournament.roster, StrategyKind::ALL.to_vec());
        assert_eq!(config.tournament.distribution, vec![1, 1, 1, 1, 1]);
        assert_eq!(config.tournament.rounds, 100);
        assert_eq!(config.iterations, 1);
        assert_eq!(config.format, OutputFormat::Svg);
        assert_eq!(config.level().unwrap(), LevelFilter::Info);
    }

    #[test]
    fn test_flags_override() {
        let config = ArenaConfig::resolve(&cli(&[
            "--distribution", "2,0,1,1,3",
            "--rounds", "20",
            "--ratio", "0.5",
            "--iterations", "3",
            "--reset-between-runs",
            "--format", "both",
            "--matches",
            "--log-level", "debug",
        ]))
        .unwrap();

        assert_eq!(config.tournament.distribution, vec![2, 0, 1, 1, 3]);
        assert_eq!(config.tournament.rounds, 20);
        assert_eq!(config.tournament.params.cooperate_ratio, 0.5);
        assert!(config.tournament.reset_between_runs);
        assert_eq!(config.iterations, 3);
        assert_eq!(config.format, OutputFormat::Both);
        assert!(config.write_matches);
        assert_eq!(config.level().unwrap(), LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(ArenaConfig::resolve(&cli(&["--distribution", "1,1"])).is_err());
        assert!(ArenaConfig::resolve(&cli(&["--ratio", "1.5"])).is_err());
        assert!(ArenaConfig::resolve(&cli(&["--iterations", "0"])).is_err());
        assert!(ArenaConfig::resolve(&cli(&["--log-level", "loud"])).is_err());
        assert!(ArenaConfig::resolve(&cli(&["--seed", "abc"])).is_err());
    }

    #[test]
    fn test_config_file_with_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arena.json");
        std::fs::write(
            &path,
            r#"{
                "tournament": { "distribution": [3, 1, 1, 1, 1], "params": { "cooperate_ratio": 0.9 } },
                "iterations": 2,
                "format": "json"
            }"#,
        )
        .unwrap();

        let path_arg = path.to_string_lossy().to_string();
        let config = ArenaConfig::resolve(&cli(&["--config", &path_arg, "--iterations", "4"])).unwrap();

        assert_eq!(config.tournament.distribution, vec![3, 1, 1, 1, 1]);
        assert_eq!(config.tournament.params.cooperate_ratio, 0.9);
        assert_eq!(config.tournament.rounds, 100);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.iterations, 4);
    }

    #[test]
    fn test_missing_config_file() {
        let err = ArenaConfig::resolve(&cli(&["--config", "/nonexistent/arena.json"])).unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }

    #[test]
    fn test_seed_hex() {
        let hex = "00ff".repeat(16);
        let seed = parse_seed(&hex).unwrap();
        assert_eq!(seed[0], 0x00);
        assert_eq!(seed[1], 0xff);
        assert_eq!(format_seed(&seed), hex);

        assert!(parse_seed(&"zz".repeat(32)).is_err());
        assert!(parse_seed("00").is_err());
    }

    #[test]
    fn test_configured_seed_is_used() {
        let hex = "2a".repeat(32);
        let config = ArenaConfig::resolve(&cli(&["--seed", &hex])).unwrap();
        assert_eq!(config.seed_bytes().unwrap(), [0x2a; 32]);
    }
}
