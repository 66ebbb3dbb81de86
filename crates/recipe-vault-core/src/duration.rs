//! Parsing of lifespan strings such as `15m` or `1h30m`.
//!
//! The grammar is a sequence of decimal numbers, each with an optional
//! fraction and a mandatory unit: `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`.
//! The bare string `0` is also accepted.

use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Why a duration string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationParseError {
    /// The input was empty.
    #[error("invalid duration \"\"")]
    Empty,

    /// Negative durations cannot express a lifespan.
    #[error("invalid duration {0:?}: negative values are not allowed")]
    Negative(String),

    /// A number without digits, or other malformed text.
    #[error("invalid duration {0:?}")]
    Invalid(String),

    /// A number without a unit suffix.
    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    /// An unrecognized unit suffix.
    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit {
        /// The offending suffix.
        unit: String,
        /// The whole input.
        input: String,
    },

    /// The value does not fit in a [`Duration`].
    #[error("invalid duration {0:?}: value out of range")]
    Overflow(String),
}

/// Parse a duration string.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use recipe_vault_core::duration::parse_duration;
///
/// assert_eq!(parse_duration("15m").unwrap(), Duration::from_secs(900));
/// assert_eq!(parse_duration("1h30m").unwrap(), Duration::from_secs(5400));
/// assert_eq!(parse_duration("1.5h").unwrap(), Duration::from_secs(5400));
/// assert!(parse_duration("15").is_err());
/// ```
pub fn parse_duration(input: &str) -> Result<Duration, DurationParseError> {
    let original = input;
    let mut rest = input.strip_prefix('+').unwrap_or(input);

    if rest.starts_with('-') {
        return Err(DurationParseError::Negative(original.to_owned()));
    }
    if rest.is_empty() {
        return if original.is_empty() {
            Err(DurationParseError::Empty)
        } else {
            Err(DurationParseError::Invalid(original.to_owned()))
        };
    }
    if rest == "0" {
        return Ok(Duration::ZERO);
    }

    let overflow = || DurationParseError::Overflow(original.to_owned());
    let mut total: u128 = 0;

    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int_digits, after_int) = rest.split_at(int_len);

        let (frac_digits, after_number) = match after_int.strip_prefix('.') {
            Some(after_dot) => {
                let frac_len = after_dot.bytes().take_while(u8::is_ascii_digit).count();
                after_dot.split_at(frac_len)
            }
            None => ("", after_int),
        };
        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(DurationParseError::Invalid(original.to_owned()));
        }

        let unit_len = after_number
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() || *c == '.')
            .map_or(after_number.len(), |(i, _)| i);
        let (unit, remainder) = after_number.split_at(unit_len);
        if unit.is_empty() {
            return Err(DurationParseError::MissingUnit(original.to_owned()));
        }
        let scale = unit_nanos(unit).ok_or_else(|| DurationParseError::UnknownUnit {
            unit: unit.to_owned(),
            input: original.to_owned(),
        })?;

        let whole: u128 = if int_digits.is_empty() {
            0
        } else {
            int_digits.parse().map_err(|_| overflow())?
        };
        let mut nanos = whole.checked_mul(scale).ok_or_else(overflow)?;

        // Digits beyond nanosecond precision cannot change the result.
        let frac_digits = &frac_digits[..frac_digits.len().min(18)];
        if !frac_digits.is_empty() {
            let frac: u128 = frac_digits.parse().map_err(|_| overflow())?;
            let divisor = 10u128.pow(u32::try_from(frac_digits.len()).map_err(|_| overflow())?);
            nanos = nanos
                .checked_add(frac * scale / divisor)
                .ok_or_else(overflow)?;
        }

        total = total.checked_add(nanos).ok_or_else(overflow)?;
        rest = remainder;
    }

    let secs = u64::try_from(total / NANOS_PER_SEC).map_err(|_| overflow())?;
    let subsec = u32::try_from(total % NANOS_PER_SEC).map_err(|_| overflow())?;
    Ok(Duration::new(secs, subsec))
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(60 * NANOS_PER_SEC),
        "h" => Some(3_600 * NANOS_PER_SEC),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_parse_single_units() {
        assert_eq!(parse_duration("300s").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_duration("15m").unwrap(), Duration::from_secs(900));
        assert_eq!(parse_duration("2h").unwrap(), Duration::from_secs(7_200));
        assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_duration("10us").unwrap(), Duration::from_micros(10));
        assert_eq!(parse_duration("10µs").unwrap(), Duration::from_micros(10));
        assert_eq!(parse_duration("7ns").unwrap(), Duration::from_nanos(7));
    }

    #[test]
    fn test_should_parse_compound_and_fractional_values() {
        assert_eq!(parse_duration("1h30m").unwrap(), Duration::from_secs(5_400));
        assert_eq!(parse_duration("1.5h").unwrap(), Duration::from_secs(5_400));
        assert_eq!(parse_duration(".5s").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_duration("1m0.25s").unwrap(), Duration::from_millis(60_250));
        assert_eq!(parse_duration("+5m").unwrap(), Duration::from_secs(300));
    }

    #[test]
    fn test_should_accept_bare_zero() {
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
        assert_eq!(parse_duration("0s").unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_should_reject_malformed_values() {
        assert_eq!(parse_duration(""), Err(DurationParseError::Empty));
        assert!(matches!(parse_duration("15"), Err(DurationParseError::MissingUnit(_))));
        assert!(matches!(parse_duration("abc"), Err(DurationParseError::Invalid(_))));
        assert!(matches!(parse_duration("."), Err(DurationParseError::Invalid(_))));
        assert!(matches!(parse_duration("-5m"), Err(DurationParseError::Negative(_))));
        assert!(matches!(parse_duration("5x"), Err(DurationParseError::UnknownUnit { .. })));
        assert!(matches!(parse_duration("5 m"), Err(DurationParseError::UnknownUnit { .. })));
    }

    #[test]
    fn test_should_report_overflow() {
        let huge = format!("{}h", "9".repeat(40));
        assert!(matches!(parse_duration(&huge), Err(DurationParseError::Overflow(_))));
    }
}
