//! Scenario index over a stats directory.
//!
//! Scans once, groups the discovered files by scenario, and loads a
//! scenario's sessions on demand in the order the reports need them.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use kovaak_core::error::{Result, StatsError};
use kovaak_core::models::SessionRecord;
use tracing::{debug, info, warn};

use crate::reader::{find_stat_files, load_session, StatFile};

// ── Public types ──────────────────────────────────────────────────────────────

/// What to do with a file that fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Log a warning and leave the file out.
    Lenient,
    /// Abort the load with the file's error.
    Strict,
}

/// Stat files under one stats directory, grouped by scenario name.
#[derive(Debug, Clone)]
pub struct ScenarioIndex {
    root: PathBuf,
    by_scenario: BTreeMap<String, Vec<StatFile>>,
}

// ── ScenarioIndex ─────────────────────────────────────────────────────────────

impl ScenarioIndex {
    /// Discover every stat file under `stats_dir`.
    ///
    /// Fails with [`StatsError::StatsDirNotFound`] when the directory does
    /// not exist.
    pub fn scan(stats_dir: &Path) -> Result<Self> {
        if !stats_dir.is_dir() {
            return Err(StatsError::StatsDirNotFound(stats_dir.to_path_buf()));
        }

        let started = Instant::now();
        let mut by_scenario: BTreeMap<String, Vec<StatFile>> = BTreeMap::new();
        for file in find_stat_files(stats_dir) {
            by_scenario
                .entry(file.scenario.clone())
                .or_default()
                .push(file);
        }

        info!(
            "Indexed {} scenarios from {} in {:.3}s",
            by_scenario.len(),
            stats_dir.display(),
            started.elapsed().as_secs_f64()
        );
        Ok(Self {
            root: stats_dir.to_path_buf(),
            by_scenario,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scenario names, sorted.
    pub fn scenarios(&self) -> impl Iterator<Item = &str> {
        self.by_scenario.keys().map(String::as_str)
    }

    /// Files recorded for `scenario`; empty when it has never been played.
    pub fn files(&self, scenario: &str) -> &[StatFile] {
        self.by_scenario
            .get(scenario)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn file_count(&self) -> usize {
        self.by_scenario.values().map(Vec::len).sum()
    }

    /// Parse every session of `scenario`, sorted by date ascending.
    ///
    /// Sessions sharing a date keep file path order.
    pub fn load(&self, scenario: &str, mode: LoadMode) -> Result<Vec<SessionRecord>> {
        let files = self.files(scenario);
        let mut sessions = Vec::with_capacity(files.len());

        for file in files {
            match load_session(file) {
                Ok(session) => sessions.push(session),
                Err(e) if mode == LoadMode::Lenient => {
                    warn!("Skipping {}: {}", file.path.display(), e);
                }
                Err(e) => return Err(e),
            }
        }

        sessions.sort_by(|a, b| a.date.cmp(&b.date));
        debug!(
            "Loaded {}/{} sessions for {}",
            sessions.len(),
            files.len(),
            scenario
        );
        Ok(sessions)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
