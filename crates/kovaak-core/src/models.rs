use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::calculations::MetricsCalculator;

/// Scenario whose exported score is inflated by a fixed amount.
pub const SCORE_OFFSET_TRIGGER: &str = "Ground Plaza NO UFO";

/// Correction applied to [`SCORE_OFFSET_TRIGGER`] scores.
pub const SCORE_OFFSET: f64 = -99000.0;

/// First game version that writes kill timestamps as `HH:MM:SS.ffffff`.
const DOT_TIMESTAMP_VERSION: &[u32] = &[2, 0, 1, 0];

/// Game version reported in a session summary, e.g. `2.0.1.0`.
///
/// Ordered like a tuple: part by part, with a shorter prefix sorting first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GameVersion(pub Vec<u32>);

impl GameVersion {
    /// Whether kill timestamps use a dot before the fractional seconds.
    /// Older builds use a colon there.
    pub fn uses_dot_timestamps(&self) -> bool {
        self.0.as_slice() >= DOT_TIMESTAMP_VERSION
    }
}

impl FromStr for GameVersion {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .split('.')
            .map(|part| part.trim().parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map(GameVersion)
    }
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(u32::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// Totals from the summary section of a stat file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub kills: u32,
    pub deaths: u32,
    /// Seconds spent in the scenario.
    pub fight_time: f64,
    /// Average time-to-kill as reported by the game.
    pub avg_ttk: f64,
    pub damage_done: f64,
    pub damage_taken: f64,
    /// Final score, already corrected by [`SessionSummary::score_offset`].
    pub score: f64,
    pub game_version: GameVersion,
}

impl SessionSummary {
    /// Score correction for `scenario`: [`SCORE_OFFSET`] when the name
    /// contains [`SCORE_OFFSET_TRIGGER`], otherwise zero.
    pub fn score_offset(scenario: &str) -> f64 {
        if scenario.contains(SCORE_OFFSET_TRIGGER) {
            SCORE_OFFSET
        } else {
            0.0
        }
    }
}

/// One row of the kill table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KillRecord {
    /// The `Kill #` column.
    pub index: u32,
    /// Time of day the kill happened.
    pub timestamp: NaiveTime,
    pub bot: String,
    pub weapon: String,
    /// Seconds spent on this target.
    pub ttk: f64,
    pub shots: u32,
    pub hits: u32,
    pub accuracy: f64,
    pub damage_done: f64,
    pub damage_possible: f64,
    pub efficiency: f64,
    /// True whenever the exported column is non-empty, including the text
    /// `False`.
    pub cheated: bool,
}

/// One row of the weapon table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponRecord {
    pub weapon: String,
    pub shots: u32,
    pub hits: u32,
    pub damage_done: f64,
    pub damage_possible: f64,
}

/// A single parsed stat file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Scenario name taken from the file name.
    pub scenario: String,
    /// When the session was played, taken from the file name.
    pub date: NaiveDateTime,
    pub summary: SessionSummary,
    pub kills: Vec<KillRecord>,
    pub weapons: Vec<WeaponRecord>,
}

impl SessionRecord {
    /// Calendar day the session was played on.
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    /// Hits over shots across all kills. Zero when nothing was fired.
    pub fn accuracy(&self) -> f64 {
        MetricsCalculator::accuracy(&self.kills)
    }

    /// Mean seconds between consecutive kills. Zero with fewer than two kills.
    pub fn average_ttk(&self) -> f64 {
        MetricsCalculator::average_ttk(&self.kills)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── GameVersion ───────────────────────────────────────────────────────────

    #[test]
    fn test_game_version_parse() {
        let v: GameVersion = "2.0.1.0".parse().unwrap();
        assert_eq!(v, GameVersion(vec![2, 0, 1, 0]));
        assert_eq!(v.to_string(), "2.0.1.0");
    }

    #[test]
    fn test_game_version_parse_rejects_text() {
        assert!("2.0.beta".parse::<GameVersion>().is_err());
        assert!("".parse::<GameVersion>().is_err());
    }

    #[test]
    fn test_game_version_ordering() {
        let old: GameVersion = "2.0.0.9".parse().unwrap();
        let new: GameVersion = "2.0.1.0".parse().unwrap();
        let newer: GameVersion = "3.0.0.0".parse().unwrap();
        assert!(old < new);
        assert!(new < newer);
        // A shorter prefix sorts first, like a tuple.
        assert!(GameVersion(vec![2, 0, 1]) < new);
    }

    #[test]
    fn test_dot_timestamps_threshold() {
        assert!(!"1.0.0.0".parse::<GameVersion>().unwrap().uses_dot_timestamps());
        assert!(!"2.0.0.99".parse::<GameVersion>().unwrap().uses_dot_timestamps());
        assert!("2.0.1.0".parse::<GameVersion>().unwrap().uses_dot_timestamps());
        assert!("2.1.0.0".parse::<GameVersion>().unwrap().uses_dot_timestamps());
    }

    // ── score_offset ──────────────────────────────────────────────────────────

    #[test]
    fn test_score_offset_trigger() {
        assert_eq!(SessionSummary::score_offset("Ground Plaza NO UFO"), -99000.0);
        assert_eq!(
            SessionSummary::score_offset("Ground Plaza NO UFO Easy"),
            -99000.0
        );
    }

    #[test]
    fn test_score_offset_other_scenarios() {
        assert_eq!(SessionSummary::score_offset("Ground Plaza Voltaic Easy"), 0.0);
        assert_eq!(SessionSummary::score_offset("ground plaza no ufo"), 0.0);
        assert_eq!(SessionSummary::score_offset(""), 0.0);
    }
}
