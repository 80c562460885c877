use chrono::{NaiveDateTime, NaiveTime};

use crate::models::GameVersion;

/// Format of the session timestamp embedded in stat file names.
pub const FILE_DATE_FORMAT: &str = "%Y.%m.%d-%H.%M.%S";

/// Calendar-day key used for grouping and chart labels.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

const KILL_TIME_FORMAT: &str = "%H:%M:%S%.f";

/// Parse the `YYYY.MM.DD-HH.MM.SS` part of a stat file name.
///
/// Returns `None` when the string is not a valid timestamp.
pub fn parse_file_date(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, FILE_DATE_FORMAT).ok()
}

/// Parse a kill-table timestamp written by the given game version.
///
/// Builds before 2.0.1.0 separate the fractional seconds with a colon
/// (`HH:MM:SS:ffffff`), later builds use a dot (`HH:MM:SS.ffffff`).
/// A value in the other build's format is rejected.
pub fn parse_kill_timestamp(raw: &str, version: &GameVersion) -> Option<NaiveTime> {
    let raw = raw.trim();
    if version.uses_dot_timestamps() {
        // `%.f` alone would also accept a value with no fraction at all.
        let (_, fraction) = raw.rsplit_once('.')?;
        if fraction.is_empty() || raw.matches(':').count() != 2 {
            return None;
        }
        return NaiveTime::parse_from_str(raw, KILL_TIME_FORMAT).ok();
    }

    // Exactly three colons: the last one is the fraction separator.
    if raw.contains('.') || raw.matches(':').count() != 3 {
        return None;
    }
    let (clock, fraction) = raw.rsplit_once(':')?;
    NaiveTime::parse_from_str(&format!("{clock}.{fraction}"), KILL_TIME_FORMAT).ok()
}
