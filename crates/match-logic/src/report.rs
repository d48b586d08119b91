//! Ranked score reports and the sink they are handed to

use serde::{Deserialize, Serialize};

/// Bar color assigned to a strategy class
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Green,
    Black,
    Purple,
}

impl Color {
    /// Colors by roster position
    pub const PALETTE: [Color; 5] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Black,
        Color::Purple,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Black => "black",
            Color::Purple => "purple",
        }
    }
}

impl core::fmt::Display for Color {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One bar of the chart
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u64,
    pub color: Color,
}

/// Final standings of one tournament iteration, highest score first
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub iteration: u32,
    pub entries: Vec<ScoreEntry>,
}

impl ScoreReport {
    /// Build a report from entries in population order.
    ///
    /// Sorting is stable, so ties keep population order.
    pub fn new(iteration: u32, mut entries: Vec<ScoreEntry>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        Self { iteration, entries }
    }

    /// Output identifier, `scores_<iteration>`
    pub fn identifier(&self) -> String {
        format!("scores_{}", self.iteration)
    }

    pub fn leader(&self) -> Option<&ScoreEntry> {
        self.entries.first()
    }
}

/// Consumer of score reports (chart renderer, exporter, ...).
///
/// `Tournament::plot_scores` calls `emit` exactly once per invocation.
pub trait ReportSink {
    type Error;

    fn emit(&mut self, report: &ScoreReport) -> Result<(), Self::Error>;
}
