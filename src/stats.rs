use serde::Serialize;

/// One summary line: a reporting key, its averaged availability, and how
/// many periods it submitted data for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub key: String,
    pub average_value: f64,
    pub submitted: usize,
}

/// Rounds to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Average availability for one key.
///
/// The divisor is floored at the number of recorded data points so a key
/// submitting more often than the matched file count can never average above
/// its true fraction. Duplicate submissions within one period still collapse
/// before this point and undercount `submitted`; that is a known inaccuracy
/// carried over deliberately.
pub fn average_value(sum: f64, total_periods: usize, submitted: usize) -> f64 {
    let divisor = total_periods.max(submitted);
    if divisor == 0 {
        return 0.0;
    }
    round2(sum / divisor as f64)
}
