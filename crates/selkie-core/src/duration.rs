//! String duration parsing for reminder and timer schedules
//!
//! Schedules arrive over the wire as strings like `"100ms"`, `"1s"`,
//! `"5m"`, `"1h"`. An empty period means one-shot and is handled by the
//! caller; this parser rejects empty input.

use crate::error::{Error, Result};
use std::time::Duration;

/// Parse a duration string of the form `<number><suffix>`
///
/// Supported suffixes: `ms`, `s`, `m`, `h`, `d`.
///
/// # Errors
/// Returns `Error::InvalidDuration` for empty input, unknown suffixes,
/// or a non-numeric count.
pub fn parse_duration(value: &str) -> Result<Duration> {
    let invalid = |reason: &str| Error::InvalidDuration {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    if value.is_empty() {
        return Err(invalid("empty duration"));
    }

    // "ms" first so the trailing 's' does not match seconds.
    if let Some(number_part) = value.strip_suffix("ms") {
        let count: u64 = number_part
            .parse()
            .map_err(|_| invalid("invalid duration number"))?;
        return Ok(Duration::from_millis(count));
    }

    let suffix = value.chars().last().unwrap_or_default();
    let number_part = &value[..value.len() - suffix.len_utf8()];
    let count: u64 = number_part
        .parse()
        .map_err(|_| invalid("invalid duration number"))?;

    match suffix {
        's' => Ok(Duration::from_secs(count)),
        'm' => Ok(Duration::from_secs(count * 60)),
        'h' => Ok(Duration::from_secs(count * 3600)),
        'd' => Ok(Duration::from_secs(count * 86400)),
        _ => Err(invalid("invalid duration suffix")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("100ms").unwrap(), Duration::from_millis(100));
        assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("5m").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_duration("1d").unwrap(), Duration::from_secs(86400));
    }

    #[test]
    fn test_parse_duration_rejects_empty() {
        assert!(matches!(
            parse_duration(""),
            Err(Error::InvalidDuration { .. })
        ));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(parse_duration("abc").is_err());
        assert!(parse_duration("5x").is_err());
        assert!(parse_duration("s").is_err());
        assert!(parse_duration("-1s").is_err());
    }
}
