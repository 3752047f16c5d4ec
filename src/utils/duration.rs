use crate::utils::error::{BigPandaError, Result};
use chrono::Duration;
use regex::Regex;
use std::sync::OnceLock;

static DURATION_RE: OnceLock<Regex> = OnceLock::new();

fn duration_re() -> &'static Regex {
    DURATION_RE.get_or_init(|| {
        Regex::new(
            r"(?ix)^\s*
              (?:(?P<weeks>\d+)\s*w(?:eeks?)?)?\s*
              (?:(?P<days>\d+)\s*d(?:ays?)?)?\s*
              (?:(?P<hours>\d+)\s*h(?:(?:ou)?rs?)?)?\s*
              (?:(?P<minutes>\d+)\s*m(?:in(?:ute)?s?)?)?\s*
              (?:(?P<seconds>\d+)\s*(?:s(?:ec(?:ond)?s?)?)?)?\s*$",
        )
        .expect("duration regex is valid")
    })
}

/// Parses a free-form duration string like "5m", "1h" or "1d2h30m" into a
/// [`Duration`]. A bare number is taken as seconds. The '#d#h#m' format is
/// recommended.
pub fn parse_duration(value: &str) -> Result<Duration> {
    let err = || BigPandaError::DurationParse {
        value: value.to_string(),
    };

    let caps = duration_re().captures(value).ok_or_else(err)?;

    let mut total: i64 = 0;
    let mut matched = false;
    for (name, scale) in [
        ("weeks", 604_800),
        ("days", 86_400),
        ("hours", 3_600),
        ("minutes", 60),
        ("seconds", 1),
    ] {
        if let Some(m) = caps.name(name) {
            let n: i64 = m.as_str().parse().map_err(|_| err())?;
            total = total
                .checked_add(n.checked_mul(scale).ok_or_else(err)?)
                .ok_or_else(err)?;
            matched = true;
        }
    }

    if !matched {
        return Err(err());
    }
    Ok(Duration::seconds(total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_units() {
        assert_eq!(parse_duration("5m").unwrap(), Duration::seconds(300));
        assert_eq!(parse_duration("1h").unwrap(), Duration::seconds(3600));
        assert_eq!(parse_duration("2d").unwrap(), Duration::seconds(172_800));
        assert_eq!(parse_duration("1w").unwrap(), Duration::seconds(604_800));
        assert_eq!(parse_duration("90s").unwrap(), Duration::seconds(90));
    }

    #[test]
    fn parses_bare_seconds() {
        assert_eq!(parse_duration("45").unwrap(), Duration::seconds(45));
    }

    #[test]
    fn parses_combined_format() {
        assert_eq!(
            parse_duration("1d2h30m").unwrap(),
            Duration::seconds(86_400 + 7_200 + 1_800)
        );
        assert_eq!(
            parse_duration("1h 30m").unwrap(),
            Duration::seconds(3_600 + 1_800)
        );
    }

    #[test]
    fn parses_long_unit_names() {
        assert_eq!(parse_duration("2 hours").unwrap(), Duration::seconds(7_200));
        assert_eq!(parse_duration("10 minutes").unwrap(), Duration::seconds(600));
    }

    #[test]
    fn rejects_invalid_input() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("abc").is_err());
        assert!(parse_duration("h").is_err());
        assert!(parse_duration("5x").is_err());
    }
}
