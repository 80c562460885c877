use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the KovaaK stats tooling.
#[derive(Error, Debug)]
pub enum StatsError {
    /// A required directory was given neither as a flag nor via the
    /// environment.
    #[error("{0}")]
    Usage(String),

    /// The file did not split into the four expected sections.
    #[error("Malformed stat file: expected 4 sections, found {sections}")]
    MalformedFile { sections: usize },

    /// A required summary key is absent or its value does not parse.
    #[error("Malformed summary field \"{key}\": {reason}")]
    MalformedSummary { key: String, reason: String },

    /// A data row does not line up with its header, or one of its fields
    /// could not be converted.
    #[error("Malformed {section} row {row}: {reason}")]
    MalformedRow {
        section: &'static str,
        row: usize,
        reason: String,
    },

    /// The configured stats directory does not exist.
    #[error("Stats directory not found: {0}")]
    StatsDirNotFound(PathBuf),

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stat file was read but could not be parsed.
    #[error("Failed to parse stat file {path}: {source}")]
    Session {
        path: PathBuf,
        #[source]
        source: Box<StatsError>,
    },

    /// The chart backend failed to draw or encode an image.
    #[error("Chart error: {0}")]
    Chart(String),

    /// A report could not be serialized.
    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl StatsError {
    /// Attach the offending file path to a parse failure.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        StatsError::Session {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

/// Convenience alias used throughout the kovaak crates.
pub type Result<T> = std::result::Result<T, StatsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_usage() {
        let err = StatsError::Usage("Please use the --statsdir option".to_string());
        assert_eq!(err.to_string(), "Please use the --statsdir option");
    }

    #[test]
    fn test_error_display_malformed_file() {
        let err = StatsError::MalformedFile { sections: 3 };
        assert_eq!(
            err.to_string(),
            "Malformed stat file: expected 4 sections, found 3"
        );
    }

    #[test]
    fn test_error_display_malformed_summary() {
        let err = StatsError::MalformedSummary {
            key: "Score".to_string(),
            reason: "missing".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed summary field \"Score\": missing");
    }

    #[test]
    fn test_error_display_malformed_row() {
        let err = StatsError::MalformedRow {
            section: "kill",
            row: 2,
            reason: "expected 12 fields, found 11".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed kill row 2: expected 12 fields, found 11"
        );
    }

    #[test]
    fn test_error_display_stats_dir_not_found() {
        let err = StatsError::StatsDirNotFound(PathBuf::from("/missing/stats"));
        assert_eq!(err.to_string(), "Stats directory not found: /missing/stats");
    }

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = StatsError::FileRead {
            path: PathBuf::from("/stats/a.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/stats/a.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_in_file_wraps_source() {
        let err = StatsError::MalformedFile { sections: 2 }.in_file("/stats/b.csv");
        let msg = err.to_string();
        assert!(msg.contains("/stats/b.csv"));
        assert!(msg.contains("found 2"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: StatsError = json_err.into();
        assert!(err.to_string().contains("Failed to serialize JSON"));
    }
}
