//! Serde adapters for the wire formats of timestamps and durations.
//!
//! Use these through `#[serde(with = "...")]` on fields of resource types.

/// Timestamps as `yyyy-MM-ddTHH:mm:ss.ffffffZ`.
///
/// Serialization always emits six fractional digits in UTC.
/// Deserialization accepts any RFC 3339 timestamp, with or without fractional seconds.
pub mod time {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// Render a timestamp in the wire format
    pub fn format(dt: &DateTime<Utc>) -> String {
        dt.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    /// Parse a wire timestamp
    pub fn parse(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(s.trim()).map(|dt| dt.with_timezone(&Utc))
    }

    /// Serialize a timestamp
    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(dt))
    }

    /// Deserialize a timestamp
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(de::Error::custom)
    }

    /// The same format for optional fields
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{de, Deserialize, Deserializer, Serializer};

        /// Serialize an optional timestamp
        pub fn serialize<S: Serializer>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error> {
            match dt {
                Some(dt) => super::serialize(dt, serializer),
                None => serializer.serialize_none(),
            }
        }

        /// Deserialize an optional timestamp
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(s) => super::parse(&s).map(Some).map_err(de::Error::custom),
                None => Ok(None),
            }
        }
    }
}

/// Durations in ISO-8601 form, e.g. `PT1H30M` or `P2DT0.5S`.
///
/// Calendar units (years and months) are rejected since they have no fixed length.
pub mod duration {
    use std::{fmt::Write, time::Duration};

    use serde::{de, Deserialize, Deserializer, Serializer};
    use thiserror::Error;

    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;
    const WEEK: u64 = 7 * DAY;

    /// Failure to parse an ISO-8601 duration
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    #[error("invalid ISO-8601 duration {input:?}: {reason}")]
    pub struct ParseError {
        input: String,
        reason: &'static str,
    }

    /// Render a duration
    pub fn format(d: &Duration) -> String {
        let secs = d.as_secs();
        let nanos = d.subsec_nanos();
        let (days, rem) = (secs / DAY, secs % DAY);
        let (hours, rem) = (rem / HOUR, rem % HOUR);
        let (minutes, seconds) = (rem / MINUTE, rem % MINUTE);

        let mut out = String::from("P");
        if days > 0 {
            let _ = write!(out, "{days}D");
        }
        if hours == 0 && minutes == 0 && seconds == 0 && nanos == 0 {
            if days == 0 {
                out.push_str("T0S");
            }
            return out;
        }
        out.push('T');
        if hours > 0 {
            let _ = write!(out, "{hours}H");
        }
        if minutes > 0 {
            let _ = write!(out, "{minutes}M");
        }
        if seconds > 0 || nanos > 0 {
            let _ = write!(out, "{seconds}");
            if nanos > 0 {
                let frac = format!("{nanos:09}");
                let _ = write!(out, ".{}", frac.trim_end_matches('0'));
            }
            out.push('S');
        }
        out
    }

    /// Parse a duration
    pub fn parse(input: &str) -> Result<Duration, ParseError> {
        let fail = |reason| ParseError {
            input: input.to_string(),
            reason,
        };
        let rest = input
            .trim()
            .strip_prefix('P')
            .ok_or_else(|| fail("missing P designator"))?;
        if rest.is_empty() {
            return Err(fail("no components"));
        }

        let mut total = Duration::ZERO;
        let mut in_time = false;
        let mut number = String::new();
        let mut components = 0;
        for c in rest.chars() {
            match c {
                '0'..='9' | '.' | ',' => number.push(if c == ',' { '.' } else { c }),
                'T' if !in_time && number.is_empty() => in_time = true,
                unit => {
                    if number.is_empty() {
                        return Err(fail("unit without a value"));
                    }
                    let scale = match (in_time, unit) {
                        (false, 'W') => WEEK,
                        (false, 'D') => DAY,
                        (true, 'H') => HOUR,
                        (true, 'M') => MINUTE,
                        (true, 'S') => 1,
                        (false, 'Y' | 'M') => return Err(fail("calendar units are not supported")),
                        _ => return Err(fail("unexpected designator")),
                    };
                    total = total
                        .checked_add(component(&number, scale).map_err(fail)?)
                        .ok_or_else(|| fail("duration overflows"))?;
                    number.clear();
                    components += 1;
                }
            }
        }
        if !number.is_empty() {
            return Err(fail("trailing value without a unit"));
        }
        if components == 0 {
            return Err(fail("no components"));
        }
        Ok(total)
    }

    fn component(number: &str, scale: u64) -> Result<Duration, &'static str> {
        const MALFORMED: &str = "malformed number";
        const OVERFLOW: &str = "duration overflows";
        let (whole, frac) = match number.split_once('.') {
            None => (number, None),
            Some((whole, frac)) => (whole, Some(frac)),
        };
        let whole: u64 = match (whole.is_empty(), frac) {
            (true, Some(_)) => 0,
            _ => whole.parse().map_err(|e: std::num::ParseIntError| match e.kind() {
                std::num::IntErrorKind::PosOverflow => OVERFLOW,
                _ => MALFORMED,
            })?,
        };
        let base = Duration::from_secs(whole.checked_mul(scale).ok_or(OVERFLOW)?);
        let Some(frac) = frac else {
            return Ok(base);
        };
        if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MALFORMED);
        }
        let frac = format!("0.{frac}").parse::<f64>().map_err(|_| MALFORMED)?;
        base.checked_add(Duration::from_secs_f64(frac * scale as f64))
            .ok_or(OVERFLOW)
    }

    /// Serialize a duration
    pub fn serialize<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(d))
    }

    /// Deserialize a duration
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(de::Error::custom)
    }

    /// The same format for optional fields
    pub mod option {
        use std::time::Duration;

        use serde::{de, Deserialize, Deserializer, Serializer};

        /// Serialize an optional duration
        pub fn serialize<S: Serializer>(d: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
            match d {
                Some(d) => super::serialize(d, serializer),
                None => serializer.serialize_none(),
            }
        }

        /// Deserialize an optional duration
        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(s) => super::parse(&s).map(Some).map_err(de::Error::custom),
                None => Ok(None),
            }
        }
    }
}
