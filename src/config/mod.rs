//! Configuration management.
//!
//! Settings are resolved per value with the same priority everywhere:
//! 1. Explicit command-line flag
//! 2. Environment variable (`TJ_DATE_FORMAT`, `TJ_DATE_PATTERN`, `TJ_STRICT`)
//! 3. Built-in default
//!
//! Nothing is read from disk; the codec itself takes no configuration other
//! than its date policy.

use std::str::FromStr;

use crate::codec::{Codec, DatePolicy, FALLBACK_PATTERN, FixedFormat, Iso8601};
use crate::error::{Error, Result};

pub const DATE_FORMAT_VAR: &str = "TJ_DATE_FORMAT";
pub const DATE_PATTERN_VAR: &str = "TJ_DATE_PATTERN";
pub const STRICT_VAR: &str = "TJ_STRICT";

/// Which date policy to encode and decode timestamps with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateFormat {
    /// RFC 3339 with a `Z` suffix.
    #[default]
    Iso8601,
    /// strftime pattern, see [`Settings::date_pattern`].
    Fixed,
}

impl FromStr for DateFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "iso8601" | "iso-8601" | "iso" | "rfc3339" => Ok(Self::Iso8601),
            "fixed" | "pattern" => Ok(Self::Fixed),
            other => Err(Error::Config(format!(
                "unknown date format '{other}' (expected iso8601 or fixed)"
            ))),
        }
    }
}

/// Resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub date_format: DateFormat,
    /// Pattern used when `date_format` is [`DateFormat::Fixed`].
    pub date_pattern: String,
    /// Treat validation findings as errors.
    pub strict: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            date_format: DateFormat::default(),
            date_pattern: FALLBACK_PATTERN.to_string(),
            strict: false,
        }
    }
}

impl Settings {
    /// Resolve settings from flags, then environment, then defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` for an unknown date format or an unusable
    /// pattern.
    pub fn resolve(
        date_format: Option<&str>,
        date_pattern: Option<&str>,
        strict: bool,
    ) -> Result<Self> {
        let date_format = match from_flag_or_env(date_format, DATE_FORMAT_VAR) {
            Some(value) => value.parse()?,
            None => DateFormat::default(),
        };
        let date_pattern = from_flag_or_env(date_pattern, DATE_PATTERN_VAR)
            .unwrap_or_else(|| FALLBACK_PATTERN.to_string());
        let strict = strict || std::env::var(STRICT_VAR).is_ok_and(|v| is_truthy(&v));

        let settings = Self {
            date_format,
            date_pattern,
            strict,
        };
        settings.check()?;
        tracing::debug!(?settings, "resolved settings");
        Ok(settings)
    }

    fn check(&self) -> Result<()> {
        self.date_policy().map(drop)
    }

    /// Build the date policy these settings select.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` when a fixed pattern is unusable.
    pub fn date_policy(&self) -> Result<Box<dyn DatePolicy>> {
        let policy: Box<dyn DatePolicy> = match self.date_format {
            DateFormat::Iso8601 => Box::new(Iso8601),
            DateFormat::Fixed => {
                Box::new(FixedFormat::new(self.date_pattern.as_str()).map_err(Error::Config)?)
            }
        };
        Ok(policy)
    }

    /// Build a codec bound to the selected date policy.
    ///
    /// # Errors
    ///
    /// As [`Settings::date_policy`].
    pub fn codec(&self) -> Result<Codec> {
        self.date_policy().map(Codec::with_policy)
    }
}

/// Explicit value if given and non-blank, otherwise a non-blank env var.
fn from_flag_or_env(explicit: Option<&str>, var: &str) -> Option<String> {
    if let Some(value) = explicit {
        if !value.trim().is_empty() {
            return Some(value.to_string());
        }
    }

    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

/// Truthy unless empty, `0` or `false`.
#[must_use]
pub fn is_truthy(value: &str) -> bool {
    !value.is_empty() && value != "0" && value.to_lowercase() != "false"
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_date_format_parsing() {
        assert_eq!("iso8601".parse::<DateFormat>().unwrap(), DateFormat::Iso8601);
        assert_eq!("ISO-8601".parse::<DateFormat>().unwrap(), DateFormat::Iso8601);
        assert_eq!(" fixed ".parse::<DateFormat>().unwrap(), DateFormat::Fixed);
        assert!(matches!("unix".parse::<DateFormat>(), Err(Error::Config(_))));
    }

    #[test]
    fn test_explicit_flags_win() {
        let settings = Settings::resolve(Some("fixed"), Some("%Y-%m-%d %H:%M:%S %z"), true).unwrap();
        assert_eq!(settings.date_format, DateFormat::Fixed);
        assert_eq!(settings.date_pattern, "%Y-%m-%d %H:%M:%S %z");
        assert!(settings.strict);
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.date_format, DateFormat::Iso8601);
        assert_eq!(settings.date_pattern, FALLBACK_PATTERN);
        assert!(!settings.strict);
    }

    #[test]
    fn test_date_policy_selection() {
        let when = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();

        let iso = Settings::default();
        assert_eq!(iso.date_policy().unwrap().format(&when), "2024-05-01T09:30:00Z");

        let fixed = Settings {
            date_format: DateFormat::Fixed,
            ..Settings::default()
        };
        assert_eq!(fixed.date_policy().unwrap().format(&when), "2024-05-01T09:30:00+00:00");
        assert_eq!(fixed.codec().unwrap().dates().format(&when), "2024-05-01T09:30:00+00:00");
    }

    #[test]
    fn test_unusable_patterns_rejected() {
        for pattern in ["%Y-%m-%d", "%Y-%Q %:z", "%Y-%m-%d %:z", "%H:%M:%S%:z"] {
            let result = Settings::resolve(Some("fixed"), Some(pattern), false);
            assert!(matches!(result, Err(Error::Config(_))), "{pattern}");
        }
    }

    #[test]
    fn test_pattern_ignored_for_iso8601() {
        let settings = Settings::resolve(Some("iso8601"), Some("%Y"), false).unwrap();
        assert_eq!(settings.date_format, DateFormat::Iso8601);
        assert!(settings.codec().is_ok());
    }

    #[test]
    fn test_hand_built_settings_fail_without_panicking() {
        let settings = Settings {
            date_format: DateFormat::Fixed,
            date_pattern: "%Q".to_string(),
            strict: false,
        };
        assert!(matches!(settings.codec(), Err(Error::Config(_))));
    }

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy("1"));
        assert!(is_truthy("yes"));
        assert!(!is_truthy(""));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("FALSE"));
    }
}
