//! Stat file discovery and loading.
//!
//! Walks the stats directory recursively, keeps the files whose names match
//! the stat file pattern, and reads them into [`SessionRecord`]s.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use kovaak_core::error::{Result, StatsError};
use kovaak_core::models::SessionRecord;
use tracing::{debug, warn};

use crate::filename::match_stat_file_name;
use crate::parser::parse_session;

// ── Public API ────────────────────────────────────────────────────────────────

/// A stat file found on disk, with the details carried by its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatFile {
    pub path: PathBuf,
    pub scenario: String,
    pub date: NaiveDateTime,
}

/// Find all stat files recursively under `stats_dir`, sorted by path.
///
/// Files whose names do not match the stat pattern are skipped silently.
pub fn find_stat_files(stats_dir: &Path) -> Vec<StatFile> {
    if !stats_dir.exists() {
        warn!("Stats path does not exist: {}", stats_dir.display());
        return Vec::new();
    }

    let mut files: Vec<StatFile> = walkdir::WalkDir::new(stats_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let matched = entry.file_name().to_str().and_then(match_stat_file_name)?;
            Some(StatFile {
                path: entry.into_path(),
                scenario: matched.scenario,
                date: matched.date,
            })
        })
        .collect();

    files.sort_by(|a, b| a.path.cmp(&b.path));
    debug!(
        "Found {} stat files under {}",
        files.len(),
        stats_dir.display()
    );
    files
}

/// Read and parse one stat file.
///
/// The file is read whole and closed before parsing. Parse failures carry the
/// file path.
pub fn load_session(file: &StatFile) -> Result<SessionRecord> {
    let contents = std::fs::read_to_string(&file.path).map_err(|source| StatsError::FileRead {
        path: file.path.clone(),
        source,
    })?;
    parse_session(&contents, &file.scenario, file.date).map_err(|e| e.in_file(&file.path))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
