//! Wire model for ranking results and the pure projections over them.
//!
//! Scores arrive as string-encoded percentages; the scoring API owns their
//! precision and meaning, and this module only parses them for ordering and
//! badge classification.

use serde::{Deserialize, Serialize};

/// One scored candidate as returned by the ranking endpoint.
/// `filename` is unique per batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub filename: String,
    pub score: String,
}

impl ScoreEntry {
    /// Numeric interpretation of `score`. Unparseable scores order last.
    pub fn parsed_score(&self) -> f64 {
        self.score.trim().parse::<f64>().unwrap_or(f64::NEG_INFINITY)
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::classify(self.parsed_score())
    }
}

/// Badge classification for a score percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    /// score ≥ 50
    High,
    /// 30 ≤ score < 50
    Mid,
    /// score < 30 (including unparseable)
    Low,
}

impl ScoreBand {
    pub fn classify(score: f64) -> Self {
        if score >= 50.0 {
            ScoreBand::High
        } else if score >= 30.0 {
            ScoreBand::Mid
        } else {
            ScoreBand::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::High => "high",
            ScoreBand::Mid => "mid",
            ScoreBand::Low => "low",
        }
    }
}

/// Display ordering of a result set: descending by parsed score, ties keep
/// their original relative order. Pure — the stored set is never mutated.
pub fn ranked(results: &[ScoreEntry]) -> Vec<ScoreEntry> {
    let mut sorted = results.to_vec();
    // slice::sort_by is stable, which is what gives ties their order
    sorted.sort_by(|a, b| b.parsed_score().total_cmp(&a.parsed_score()));
    sorted
}
