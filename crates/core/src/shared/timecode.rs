use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimecodeError {
    #[error("malformed timecode: {0:?}")]
    Malformed(String),
    #[error("timecode component out of range in {0:?}")]
    OutOfRange(String),
}

/// Format seconds as an `HH:MM:SS,mmm` timecode.
///
/// Negative and non-finite inputs format as zero. Milliseconds are rounded,
/// carrying into the seconds field when needed.
pub fn format_timecode(seconds: f64) -> String {
    let seconds = if seconds.is_finite() {
        seconds.max(0.0)
    } else {
        0.0
    };
    let total_ms = (seconds * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}

/// Parse an `H:MM:SS,mmm` (or `H:MM:SS.mmm`) timecode into seconds.
pub fn parse_timecode(text: &str) -> Result<f64, TimecodeError> {
    let trimmed = text.trim();
    let parts: Vec<&str> = trimmed.split(':').collect();
    if parts.len() != 3 {
        return Err(TimecodeError::Malformed(trimmed.to_string()));
    }

    let malformed = || TimecodeError::Malformed(trimmed.to_string());
    let h: u64 = parts[0].trim().parse().map_err(|_| malformed())?;
    let m: u64 = parts[1].trim().parse().map_err(|_| malformed())?;
    let s: f64 = parts[2].trim().replace(',', ".").parse().map_err(|_| malformed())?;

    if m >= 60 || !(0.0..60.0).contains(&s) {
        return Err(TimecodeError::OutOfRange(trimmed.to_string()));
    }

    Ok(h as f64 * 3600.0 + m as f64 * 60.0 + s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::zero(0.0, "00:00:00,000")]
    #[case::fractional(1.234, "00:00:01,234")]
    #[case::minutes(61.5, "00:01:01,500")]
    #[case::hours(3723.004, "01:02:03,004")]
    #[case::rounds_up_into_seconds(1.9996, "00:00:02,000")]
    #[case::negative_clamps(-3.0, "00:00:00,000")]
    #[case::nan_clamps(f64::NAN, "00:00:00,000")]
    fn test_format_timecode(#[case] seconds: f64, #[case] expected: &str) {
        assert_eq!(format_timecode(seconds), expected);
    }

    #[rstest]
    #[case::comma("00:00:01,234", 1.234)]
    #[case::dot("00:00:01.5", 1.5)]
    #[case::hours("01:02:03,004", 3723.004)]
    #[case::padded(" 00:00:02,000 ", 2.0)]
    fn test_parse_timecode(#[case] text: &str, #[case] expected: f64) {
        assert_relative_eq!(parse_timecode(text).unwrap(), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        assert!(matches!(
            parse_timecode("01:02"),
            Err(TimecodeError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_timecode("aa:bb:cc"),
            Err(TimecodeError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_rejects_out_of_range_minutes() {
        assert!(matches!(
            parse_timecode("00:75:00,000"),
            Err(TimecodeError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_format_then_parse_preserves_millisecond_precision() {
        let formatted = format_timecode(12.345);
        assert_relative_eq!(parse_timecode(&formatted).unwrap(), 12.345, epsilon = 1e-9);
    }
}
