//! Date policies for the `creation-date` and `completion-date` fields.
//!
//! A policy is a matched pair of functions turning a UTC timestamp into its
//! wire string and back. Both directions work at whole-second precision, so
//! `parse(format(t)) == t` for any `t` without a sub-second part.

use chrono::format::{Fixed, Item, StrftimeItems};
use chrono::{DateTime, SubsecRound, Utc};

/// Fallback pattern used when no native ISO-8601 formatter is wanted:
/// `yyyy-MM-ddTHH:mm:ss±HH:MM`.
pub const FALLBACK_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Converts timestamps to and from their wire representation.
pub trait DatePolicy: Send + Sync + std::fmt::Debug {
    /// Render a timestamp for the wire.
    fn format(&self, value: &DateTime<Utc>) -> String;

    /// Parse a wire string, normalizing to UTC.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when the text is not a valid timestamp.
    fn parse(&self, text: &str) -> Result<DateTime<Utc>, String>;
}

/// RFC 3339 / ISO-8601 with a `Z` suffix, e.g. `2024-05-01T09:30:00Z`.
///
/// Parsing accepts any offset and converts to UTC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Iso8601;

impl DatePolicy for Iso8601 {
    fn format(&self, value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    }

    fn parse(&self, text: &str) -> Result<DateTime<Utc>, String> {
        DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.with_timezone(&Utc).trunc_subsecs(0))
            .map_err(|e| format!("invalid ISO-8601 timestamp '{text}': {e}"))
    }
}

/// strftime-style pattern.
///
/// Only patterns that survive a format/parse round trip are accepted, which
/// means the full date, the time down to the second and a UTC offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedFormat {
    pattern: String,
}

/// Instants every accepted pattern must reproduce exactly
/// (2024-05-01T09:30:45Z, 1999-12-31T21:59:58Z).
const ROUND_TRIP_SAMPLES: [i64; 2] = [1_714_555_845, 946_677_598];

impl FixedFormat {
    /// Use a custom pattern.
    ///
    /// # Errors
    ///
    /// Returns a reason when the pattern has an unknown specifier, carries no
    /// UTC offset or does not reproduce a timestamp it formatted.
    pub fn new(pattern: impl Into<String>) -> Result<Self, String> {
        let policy = Self {
            pattern: pattern.into(),
        };
        check_items(&policy.pattern)?;

        for sample in ROUND_TRIP_SAMPLES
            .into_iter()
            .filter_map(|secs| DateTime::from_timestamp(secs, 0))
        {
            let text = policy.format(&sample);
            if policy.parse(&text).ok() != Some(sample) {
                return Err(format!(
                    "date pattern '{}' does not round-trip: {} is written as '{text}'",
                    policy.pattern,
                    Iso8601.format(&sample)
                ));
            }
        }
        Ok(policy)
    }

    /// The pattern in use.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

fn check_items(pattern: &str) -> Result<(), String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(format!("invalid date pattern '{pattern}'"));
    }
    if !items.iter().any(is_offset) {
        return Err(format!("date pattern '{pattern}' has no UTC offset (add %:z)"));
    }
    Ok(())
}

fn is_offset(item: &Item<'_>) -> bool {
    matches!(
        item,
        Item::Fixed(
            Fixed::TimezoneOffset
                | Fixed::TimezoneOffsetColon
                | Fixed::TimezoneOffsetDoubleColon
                | Fixed::TimezoneOffsetTripleColon
                | Fixed::TimezoneOffsetColonZ
                | Fixed::TimezoneOffsetZ
                | Fixed::RFC2822
                | Fixed::RFC3339
        )
    )
}

impl Default for FixedFormat {
    fn default() -> Self {
        Self {
            pattern: FALLBACK_PATTERN.to_string(),
        }
    }
}

impl DatePolicy for FixedFormat {
    fn format(&self, value: &DateTime<Utc>) -> String {
        value.format(&self.pattern).to_string()
    }

    fn parse(&self, text: &str) -> Result<DateTime<Utc>, String> {
        DateTime::parse_from_str(text, &self.pattern)
            .map(|dt| dt.with_timezone(&Utc).trunc_subsecs(0))
            .map_err(|e| format!("timestamp '{text}' does not match '{}': {e}", self.pattern))
    }
}
