//! Reporting-period derivation from input filenames.
//!
//! Each half-day report is named after the time window it covers:
//! `summary_<start>T<HH>:<MM>:<SS>-<end>T<HH>:<MM>:<SS>.csv`. The window
//! start collapses to a `<date>_AM` or `<date>_PM` column label.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

/// Filename shape of a half-day report. Captures the start date and the
/// start hour; everything else is validated but unused.
pub const FILE_PATTERN: &str =
    r"^summary_(\d{4}-\d{2}-\d{2})T(\d{2}):\d{2}:\d{2}-\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.csv$";

static PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(FILE_PATTERN).expect("FILE_PATTERN is a valid regex"));

/// Derives the period label for a report filename.
///
/// Returns `None` for filenames that do not match [`FILE_PATTERN`] or whose
/// date token is not a real calendar date. A start hour of `"00"` marks the
/// first half of the day.
pub fn period_label(file_name: &str) -> Option<String> {
    let caps = PATTERN.captures(file_name)?;
    let date = caps.get(1)?.as_str();
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;

    let hour = caps.get(2)?.as_str();
    let half_day = if hour == "00" { "AM" } else { "PM" };

    Some(format!("{date}_{half_day}"))
}
