/// Format seconds as `MM:SS.cc`
///
/// Fields are truncated independently, so there is no carry: 59.999s renders
/// as `00:59.99`. Minutes are not capped at 59. Negative or NaN input is
/// treated as zero.
pub fn format_time(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let minutes = (seconds / 60.0).floor() as u64;
    let secs = seconds.floor() as u64 % 60;
    let centis = ((seconds % 1.0) * 100.0).floor() as u64;
    format!("{:02}:{:02}.{:02}", minutes, secs, centis)
}

/// Format seconds as `M:SS` for speaking-time and audio-length summaries
pub fn format_duration(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let minutes = (seconds / 60.0).floor() as u64;
    let secs = seconds.floor() as u64 % 60;
    format!("{}:{:02}", minutes, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "00:00.00");
        assert_eq!(format_time(65.5), "01:05.50");
        assert_eq!(format_time(3661.004), "61:01.00");
    }

    #[test]
    fn test_format_time_no_carry() {
        assert_eq!(format_time(59.999), "00:59.99");
        assert_eq!(format_time(119.995), "01:59.99");
    }

    #[test]
    fn test_format_time_large_minutes() {
        assert_eq!(format_time(6000.25), "100:00.25");
    }

    #[test]
    fn test_format_time_negative_clamped() {
        assert_eq!(format_time(-3.0), "00:00.00");
        assert_eq!(format_time(f64::NAN), "00:00.00");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "0:00");
        assert_eq!(format_duration(65.9), "1:05");
        assert_eq!(format_duration(3725.0), "62:05");
    }
}
