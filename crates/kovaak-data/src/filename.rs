//! Recognition of KovaaK stat file names.
//!
//! Stat files are named `<scenario> - Challenge - <YYYY.MM.DD-HH.MM.SS> Stats.csv`.
//! Anything else in the stats directory is ignored.

use std::sync::OnceLock;

use chrono::NaiveDateTime;
use kovaak_core::time_utils::parse_file_date;
use regex::Regex;
use tracing::debug;

/// Scenario name and play time recovered from a stat file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatFileName {
    pub scenario: String,
    pub date: NaiveDateTime,
}

fn stat_file_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // The name group is greedy so scenario names containing " - " survive.
    RE.get_or_init(|| {
        Regex::new(r"^(?P<name>.+) - Challenge - (?P<date>.+) Stats\.csv$").expect("regex is valid")
    })
}

/// Match `file_name` against the stat file pattern.
///
/// Returns `None` for unrelated files and for names whose date part is not a
/// valid timestamp; neither is an error.
pub fn match_stat_file_name(file_name: &str) -> Option<StatFileName> {
    let caps = stat_file_re().captures(file_name)?;
    let date_str = &caps["date"];
    let Some(date) = parse_file_date(date_str) else {
        debug!("Ignoring {}: unrecognised date \"{}\"", file_name, date_str);
        return None;
    };
    Some(StatFileName {
        scenario: caps["name"].to_string(),
        date,
    })
}
