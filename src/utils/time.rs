use chrono::Duration;

/// Renders an elapsed span as `"8h 30m"`. Negative spans (a corrupt row
/// where clock-out precedes clock-in) clamp to zero.
pub fn format_duration(d: Duration) -> String {
    let total_minutes = d.num_minutes().max(0);
    format!("{}h {:02}m", total_minutes / 60, total_minutes % 60)
}

/// Elapsed hours rounded to two decimals, clamped at zero like
/// `format_duration`.
pub fn round_hours(d: Duration) -> f64 {
    round_2dp(d.num_seconds().max(0) as f64 / 3600.0)
}

pub fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_format() {
        assert_eq!(format_duration(Duration::minutes(510)), "8h 30m");
        assert_eq!(format_duration(Duration::minutes(5)), "0h 05m");
        assert_eq!(format_duration(Duration::zero()), "0h 00m");
        assert_eq!(format_duration(Duration::hours(26)), "26h 00m");
        assert_eq!(format_duration(Duration::seconds(59)), "0h 00m");
    }

    #[test]
    fn test_negative_spans_clamp() {
        assert_eq!(format_duration(Duration::minutes(-90)), "0h 00m");
        assert_eq!(round_hours(Duration::minutes(-90)), 0.0);
    }

    #[test]
    fn test_round_hours() {
        assert_eq!(round_hours(Duration::minutes(510)), 8.5);
        assert_eq!(round_hours(Duration::minutes(467)), 7.78);
        assert_eq!(round_hours(Duration::seconds(30)), 0.01);
    }
}
