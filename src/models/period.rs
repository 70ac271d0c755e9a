//! Positive time periods with millisecond resolution.

use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

use super::declaration::{describe_value, PeriodValue};

/// A strictly positive duration stored in whole milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TimePeriod {
    millis: u32,
}

fn period_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^\s*(\d+(?:\.\d+)?)\s*(ms|s|min|h|d)\s*$").ok())
        .as_ref()
}

impl TimePeriod {
    /// Creates a period from milliseconds.
    ///
    /// # Errors
    ///
    /// Returns an error if `millis` is zero.
    pub fn from_millis(millis: u32) -> Result<Self> {
        if millis == 0 {
            anyhow::bail!("Time period must be positive");
        }
        Ok(Self { millis })
    }

    /// Parses a period string such as `"30s"`, `"1.5s"`, `"500ms"` or `"2min"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dialmenu::models::TimePeriod;
    ///
    /// assert_eq!(TimePeriod::parse("30s").unwrap().as_millis(), 30_000);
    /// assert_eq!(TimePeriod::parse("2min").unwrap().as_millis(), 120_000);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the string has no recognized unit, is not a whole
    /// number of milliseconds, is zero, or overflows 32 bits.
    pub fn parse(text: &str) -> Result<Self> {
        let captures = period_pattern()
            .and_then(|pattern| pattern.captures(text))
            .with_context(|| {
                format!(
                    "Invalid time period '{text}'. Expected a number followed by ms, s, min, h or d"
                )
            })?;

        let amount: f64 = captures[1]
            .parse()
            .with_context(|| format!("Invalid number in time period '{text}'"))?;
        let factor = match &captures[2] {
            "ms" => 1.0,
            "s" => 1_000.0,
            "min" => 60_000.0,
            "h" => 3_600_000.0,
            _ => 86_400_000.0,
        };

        let millis = amount * factor;
        if millis.fract() != 0.0 {
            anyhow::bail!("Time period '{text}' is not a whole number of milliseconds");
        }
        if millis > f64::from(u32::MAX) {
            anyhow::bail!("Time period '{text}' is too long");
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let millis = millis as u32;
        Self::from_millis(millis).with_context(|| format!("Time period '{text}' must be positive"))
    }

    /// Converts a declared value into a period.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`TimePeriod::parse`],
    /// or if a bare integer is not in `1..=u32::MAX`.
    pub fn from_value(value: &PeriodValue) -> Result<Self> {
        match value {
            PeriodValue::Millis(millis) => {
                let millis = u32::try_from(*millis)
                    .ok()
                    .filter(|m| *m > 0)
                    .with_context(|| format!("Time period {millis}ms must be positive"))?;
                Self::from_millis(millis)
            }
            PeriodValue::Text(text) => Self::parse(text),
            PeriodValue::Other(value) => anyhow::bail!(
                "Invalid time period '{}'. Expected milliseconds or a number with a unit",
                describe_value(value)
            ),
        }
    }

    /// Duration in milliseconds.
    #[must_use]
    pub const fn as_millis(&self) -> u32 {
        self.millis
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.millis % 1_000 == 0 {
            write!(f, "{}s", self.millis / 1_000)
        } else {
            write!(f, "{}ms", self.millis)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units() {
        assert_eq!(TimePeriod::parse("250ms").unwrap().as_millis(), 250);
        assert_eq!(TimePeriod::parse("30s").unwrap().as_millis(), 30_000);
        assert_eq!(TimePeriod::parse("1.5s").unwrap().as_millis(), 1_500);
        assert_eq!(TimePeriod::parse("5min").unwrap().as_millis(), 300_000);
        assert_eq!(TimePeriod::parse("1h").unwrap().as_millis(), 3_600_000);
        assert_eq!(TimePeriod::parse("1d").unwrap().as_millis(), 86_400_000);
        assert_eq!(TimePeriod::parse(" 10 s ").unwrap().as_millis(), 10_000);
    }

    #[test]
    fn test_parse_rejects_bad_periods() {
        assert!(TimePeriod::parse("0s").is_err());
        assert!(TimePeriod::parse("30").is_err());
        assert!(TimePeriod::parse("-5s").is_err());
        assert!(TimePeriod::parse("0.5ms").is_err());
        assert!(TimePeriod::parse("100d").is_err());
        assert!(TimePeriod::parse("soon").is_err());
    }

    #[test]
    fn test_from_value() {
        let period = TimePeriod::from_value(&PeriodValue::Millis(1_200)).unwrap();
        assert_eq!(period.as_millis(), 1_200);
        assert!(TimePeriod::from_value(&PeriodValue::Millis(0)).is_err());
        assert!(TimePeriod::from_value(&PeriodValue::Millis(-1)).is_err());

        let period = TimePeriod::from_value(&PeriodValue::Text("30s".into())).unwrap();
        assert_eq!(period.as_millis(), 30_000);

        let error = TimePeriod::from_value(&PeriodValue::Other(serde_yml::Value::Bool(true)))
            .unwrap_err();
        assert!(error.to_string().contains("'true'"));
    }

    #[test]
    fn test_display() {
        assert_eq!(TimePeriod::from_millis(30_000).unwrap().to_string(), "30s");
        assert_eq!(TimePeriod::from_millis(1_500).unwrap().to_string(), "1500ms");
    }
}
