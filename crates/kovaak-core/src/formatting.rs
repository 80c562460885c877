/// Width of one column in the recent-scores table.
pub const SCORE_COLUMN_WIDTH: usize = 10;

/// Format a score with one decimal place, the precision the progression
/// spreadsheets expect.
///
/// # Examples
///
/// ```
/// use kovaak_core::formatting::format_score;
///
/// assert_eq!(format_score(1234.56), "1234.6");
/// assert_eq!(format_score(0.0), "0.0");
/// assert_eq!(format_score(-12.0), "-12.0");
/// ```
pub fn format_score(value: f64) -> String {
    format!("{:.1}", value)
}

/// Format a row of scores as fixed-width, left-aligned columns.
///
/// Each score takes [`SCORE_COLUMN_WIDTH`] characters, so trailing
/// whitespace is part of the output.
///
/// # Examples
///
/// ```
/// use kovaak_core::formatting::format_score_row;
///
/// assert_eq!(format_score_row(&[1.0, 22.24]), "1.0       22.2      ");
/// assert_eq!(format_score_row(&[]), "");
/// ```
pub fn format_score_row(scores: &[f64]) -> String {
    scores
        .iter()
        .map(|score| format!("{:<width$.1}", score, width = SCORE_COLUMN_WIDTH))
        .collect()
}
