use chrono::{DateTime, SecondsFormat, Utc};

/// Keeps "field omitted" apart from "field sent as null" on patch payloads.
///
/// Use together with `#[serde(default)]`: an absent key falls back to `None`,
/// while a present key (including `null`) lands in `Some(..)`.
pub mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Deserialize::deserialize(deserializer).map(Some)
    }
}

pub mod date_format {
    use chrono::{NaiveDate, ParseResult};

    pub const FORMAT: &'static str = "%Y-%m-%d";

    pub fn parse(value: &str) -> ParseResult<NaiveDate> {
        NaiveDate::parse_from_str(value, FORMAT)
    }
}

/// ISO-8601 UTC with a `Z` suffix.
pub fn iso_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Next `updated_at` for a mutation: the issuer's clock, but never at or
/// before the previous value.
pub fn advance(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + chrono::Duration::nanoseconds(1)
    }
}
