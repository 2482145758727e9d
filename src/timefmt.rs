//! Time display helpers.

/// Format a number of seconds as `M:SS`.
///
/// Minutes are not padded and keep growing past 59 (there is no hour field).
/// Fractional seconds are floored. Anything that is not a finite number, and
/// negative values, render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }

    let whole = seconds.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}
