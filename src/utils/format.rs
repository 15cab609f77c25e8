//! Human-readable formatting for server-reported timings.

/// Format a duration given in seconds, picking µs, ms or s.
///
/// Values below one microsecond are shown in µs, values below one second in
/// ms, everything else in seconds, always with two decimals. The ms range
/// starts at 1e-6 s, not at 1e-3 s.
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "n/a".to_string();
    }

    let magnitude = seconds.abs();
    if magnitude < 1e-6 {
        format!("{:.2}µs", seconds * 1000.0 * 1000.0)
    } else if magnitude < 1.0 {
        format!("{:.2}ms", seconds * 1000.0)
    } else {
        format!("{:.2}s", seconds)
    }
}
