//! Stat file parsing.
//!
//! A stat file holds four CSV sections separated by a blank line: the kill
//! table, the weapon table, the `key:,value` summary and the `key:,value`
//! settings. Each section is turned into typed records field by field; the
//! first field that fails aborts the whole file.

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use kovaak_core::error::{Result, StatsError};
use kovaak_core::models::{GameVersion, KillRecord, SessionRecord, SessionSummary, WeaponRecord};
use kovaak_core::time_utils::parse_kill_timestamp;

const SECTION_SEPARATOR: &str = "\n\n";
const SECTION_COUNT: usize = 4;

const KILL_COLUMNS: &[&str] = &[
    "Kill #",
    "Timestamp",
    "Bot",
    "Weapon",
    "TTK",
    "Shots",
    "Hits",
    "Accuracy",
    "Damage Done",
    "Damage Possible",
    "Efficiency",
    "Cheated",
];

const WEAPON_COLUMNS: &[&str] = &["Weapon", "Shots", "Hits", "Damage Done", "Damage Possible"];

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse the full text of one stat file.
///
/// `scenario` and `date` come from the file name. The scenario decides the
/// score correction in [`SessionSummary::score_offset`].
pub fn parse_session(contents: &str, scenario: &str, date: NaiveDateTime) -> Result<SessionRecord> {
    let normalized = contents.replace("\r\n", "\n");
    let mut sections: Vec<&str> = normalized.split(SECTION_SEPARATOR).collect();
    // Extra blank lines at the end of the file are not a fifth section.
    while sections.len() > SECTION_COUNT && sections.last().is_some_and(|s| s.trim().is_empty()) {
        sections.pop();
    }
    let [kill_csv, weapon_csv, summary_csv, settings_csv] = sections.as_slice() else {
        return Err(StatsError::MalformedFile {
            sections: sections.len(),
        });
    };

    let summary = parse_summary(summary_csv, scenario)?;
    // Settings are read for well-formedness only; nothing uses them yet.
    let _settings = parse_key_values(settings_csv);
    let kills = parse_kills(kill_csv, &summary.game_version)?;
    let weapons = parse_weapons(weapon_csv)?;

    Ok(SessionRecord {
        scenario: scenario.to_string(),
        date,
        summary,
        kills,
        weapons,
    })
}

// ── Summary ───────────────────────────────────────────────────────────────────

/// Collect `Key:,value` rows. Rows with fewer than two fields are ignored and
/// a repeated key keeps its last value.
fn parse_key_values(section: &str) -> HashMap<String, String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(section.as_bytes());

    reader
        .records()
        .filter_map(|record| record.ok())
        .filter(|record| record.len() >= 2)
        .map(|record| {
            let key = record[0].trim().trim_matches(':').trim().to_string();
            (key, record[1].trim().to_string())
        })
        .collect()
}

fn parse_summary(section: &str, scenario: &str) -> Result<SessionSummary> {
    let fields = parse_key_values(section);
    let summary = SummaryFields(&fields);

    let raw_score: f64 = summary.number("Score")?;

    Ok(SessionSummary {
        kills: summary.number("Kills")?,
        deaths: summary.number("Deaths")?,
        fight_time: summary.number("Fight Time")?,
        avg_ttk: summary.number("Avg TTK")?,
        damage_done: summary.number("Damage Done")?,
        damage_taken: summary.number("Damage Taken")?,
        score: raw_score + SessionSummary::score_offset(scenario),
        game_version: summary.number("Game Version")?,
    })
}

struct SummaryFields<'a>(&'a HashMap<String, String>);

impl SummaryFields<'_> {
    fn number<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self.0.get(key).ok_or_else(|| StatsError::MalformedSummary {
            key: key.to_string(),
            reason: "missing".to_string(),
        })?;
        raw.parse::<T>().map_err(|e| StatsError::MalformedSummary {
            key: key.to_string(),
            reason: format!("cannot parse \"{raw}\": {e}"),
        })
    }
}

// ── Header-driven tables ──────────────────────────────────────────────────────

/// A CSV section whose first row names the columns.
struct Table {
    section: &'static str,
    columns: HashMap<String, usize>,
    width: usize,
    records: Vec<csv::StringRecord>,
}

impl Table {
    fn read(section: &'static str, text: &str, required: &[&str]) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let malformed = |row: usize, reason: String| StatsError::MalformedRow {
            section,
            row,
            reason,
        };

        let headers = reader
            .headers()
            .map_err(|e| malformed(0, e.to_string()))?
            .clone();
        let columns: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.to_string(), i))
            .collect();
        if let Some(missing) = required.iter().find(|name| !columns.contains_key(**name)) {
            return Err(malformed(0, format!("missing column \"{missing}\"")));
        }

        let records = reader
            .records()
            .enumerate()
            .map(|(i, record)| record.map_err(|e| malformed(i + 1, e.to_string())))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            section,
            columns,
            width: headers.len(),
            records,
        })
    }

    /// Rows numbered from 1, rejecting any whose width differs from the header.
    fn rows(&self) -> impl Iterator<Item = Result<Row<'_>>> {
        self.records.iter().enumerate().map(move |(i, record)| {
            let row = Row {
                table: self,
                number: i + 1,
                record,
            };
            if record.len() != self.width {
                return Err(row.error(format!(
                    "expected {} fields, found {}",
                    self.width,
                    record.len()
                )));
            }
            Ok(row)
        })
    }
}

struct Row<'a> {
    table: &'a Table,
    number: usize,
    record: &'a csv::StringRecord,
}

impl Row<'_> {
    fn error(&self, reason: String) -> StatsError {
        StatsError::MalformedRow {
            section: self.table.section,
            row: self.number,
            reason,
        }
    }

    /// Raw text of `column`. Only called for columns checked in [`Table::read`].
    fn text(&self, column: &str) -> &str {
        self.table
            .columns
            .get(column)
            .and_then(|&i| self.record.get(i))
            .unwrap_or_default()
    }

    fn number<T>(&self, column: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self.text(column).trim();
        raw.parse::<T>()
            .map_err(|e| self.error(format!("{column}: cannot parse \"{raw}\": {e}")))
    }
}

// ── Kills ─────────────────────────────────────────────────────────────────────

fn parse_kills(section: &str, version: &GameVersion) -> Result<Vec<KillRecord>> {
    let table = Table::read("kill", section, KILL_COLUMNS)?;
    table
        .rows()
        .map(|row| -> Result<KillRecord> {
            let row = row?;
            let raw_time = row.text("Timestamp");
            let timestamp = parse_kill_timestamp(raw_time, version).ok_or_else(|| {
                row.error(format!(
                    "Timestamp: \"{raw_time}\" does not match the format used by version {version}"
                ))
            })?;

            // TTK is exported with a unit suffix, e.g. "0.512s".
            let raw_ttk = row.text("TTK").trim();
            let ttk = raw_ttk
                .trim_end_matches(|c: char| c.is_ascii_alphabetic())
                .parse::<f64>()
                .map_err(|e| row.error(format!("TTK: cannot parse \"{raw_ttk}\": {e}")))?;

            Ok(KillRecord {
                index: row.number("Kill #")?,
                timestamp,
                bot: row.text("Bot").to_string(),
                weapon: row.text("Weapon").to_string(),
                ttk,
                shots: row.number("Shots")?,
                hits: row.number("Hits")?,
                accuracy: row.number("Accuracy")?,
                damage_done: row.number("Damage Done")?,
                damage_possible: row.number("Damage Possible")?,
                efficiency: row.number("Efficiency")?,
                cheated: !row.text("Cheated").is_empty(),
            })
        })
        .collect()
}

// ── Weapons ───────────────────────────────────────────────────────────────────

fn parse_weapons(section: &str) -> Result<Vec<WeaponRecord>> {
    let table = Table::read("weapon", section, WEAPON_COLUMNS)?;
    table
        .rows()
        .map(|row| -> Result<WeaponRecord> {
            let row = row?;
            Ok(WeaponRecord {
                weapon: row.text("Weapon").to_string(),
                shots: row.number("Shots")?,
                hits: row.number("Hits")?,
                damage_done: row.number("Damage Done")?,
                damage_possible: row.number("Damage Possible")?,
            })
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
