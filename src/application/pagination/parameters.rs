//! Offset and limit parameter validation
//!
//! Every offset/limit value that reaches a handler goes through
//! [`parse_offset`] or [`parse_limit`], so the same rules apply whichever
//! handler declares the parameter. Validation is a pure function: callers keep
//! the returned [`Offset`]/[`Limit`] instead of re-parsing the raw string.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::support::errors::{FailureKind, ParameterError, ParameterKind};

/// Smallest accepted limit. A literal `0` is rejected so that the numeric
/// range and the canonical pattern agree.
pub const MIN_LIMIT: u32 = 1;
pub const MAX_LIMIT: u32 = 100;
pub const DEFAULT_LIMIT: u32 = 20;
pub const DEFAULT_OFFSET: u64 = 0;
/// Largest offset a request can carry; offsets parse as signed 64-bit integers.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

static LIMIT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9][0-9]?$|^100$").expect("limit pattern compiles"));

static OFFSET_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0$|^[1-9][0-9]*$").expect("offset pattern compiles"));

/// Number of items to skip, validated to be `>= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Offset(u64);

impl Offset {
    pub const DEFAULT: Offset = Offset(DEFAULT_OFFSET);

    pub fn try_new(value: u64) -> Result<Self, ParameterError> {
        if value <= MAX_OFFSET {
            Ok(Offset(value))
        } else {
            Err(ParameterError::new(
                ParameterKind::Offset,
                FailureKind::Value,
                &value.to_string(),
            ))
        }
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl Default for Offset {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<Offset> for u64 {
    fn from(offset: Offset) -> Self {
        offset.0
    }
}

impl FromStr for Offset {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_offset(s)
    }
}

impl TryFrom<String> for Offset {
    type Error = ParameterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_offset(&value)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Page size, validated to be within `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Limit(u32);

impl Limit {
    pub const DEFAULT: Limit = Limit(DEFAULT_LIMIT);

    /// Checks an already numeric limit against the same `1..=100` range.
    pub fn try_new(value: u32) -> Result<Self, ParameterError> {
        if (MIN_LIMIT..=MAX_LIMIT).contains(&value) {
            Ok(Limit(value))
        } else {
            Err(ParameterError::new(
                ParameterKind::Limit,
                FailureKind::Value,
                &value.to_string(),
            ))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<Limit> for u32 {
    fn from(limit: Limit) -> Self {
        limit.0
    }
}

impl FromStr for Limit {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_limit(s)
    }
}

impl TryFrom<String> for Limit {
    type Error = ParameterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_limit(&value)
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Parses a raw `limit` value.
///
/// The value must parse as a 32-bit integer (`type` failure otherwise), lie
/// within `1..=100` (`value` failure) and be spelled canonically, without a
/// sign or leading zeros (`format` failure).
pub fn parse_limit(raw: &str) -> Result<Limit, ParameterError> {
    let value: i32 = raw
        .parse()
        .map_err(|_| ParameterError::new(ParameterKind::Limit, FailureKind::Type, raw))?;

    if value < MIN_LIMIT as i32 || value > MAX_LIMIT as i32 {
        return Err(ParameterError::new(
            ParameterKind::Limit,
            FailureKind::Value,
            raw,
        ));
    }

    if !LIMIT_PATTERN.is_match(raw) {
        return Err(ParameterError::new(
            ParameterKind::Limit,
            FailureKind::Format,
            raw,
        ));
    }

    Ok(Limit(value as u32))
}

/// Parses a raw `offset` value.
///
/// Same failure classes as [`parse_limit`]; the value range is any
/// non-negative 64-bit signed integer.
pub fn parse_offset(raw: &str) -> Result<Offset, ParameterError> {
    let value: i64 = raw
        .parse()
        .map_err(|_| ParameterError::new(ParameterKind::Offset, FailureKind::Type, raw))?;

    if value < 0 {
        return Err(ParameterError::new(
            ParameterKind::Offset,
            FailureKind::Value,
            raw,
        ));
    }

    if !OFFSET_PATTERN.is_match(raw) {
        return Err(ParameterError::new(
            ParameterKind::Offset,
            FailureKind::Format,
            raw,
        ));
    }

    Ok(Offset(value as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_limit_from_1_to_100() {
        for n in 1..=100u32 {
            assert_eq!(parse_limit(&n.to_string()).unwrap().get(), n);
        }
    }

    #[test]
    fn rejects_out_of_range_limits() {
        for raw in ["0", "101", "-1", "1000"] {
            let err = parse_limit(raw).unwrap_err();
            assert_eq!(err.failure(), FailureKind::Value, "limit {raw}");
            assert_eq!(err.kind(), ParameterKind::Limit);
        }
    }

    #[test]
    fn rejects_non_integer_limits() {
        for raw in ["abc", "", "1.5", "ten", "99999999999"] {
            let err = parse_limit(raw).unwrap_err();
            assert_eq!(err.failure(), FailureKind::Type, "limit {raw:?}");
        }
    }

    #[test]
    fn rejects_non_canonical_limits() {
        for raw in ["05", "+5", "007"] {
            let err = parse_limit(raw).unwrap_err();
            assert_eq!(err.failure(), FailureKind::Format, "limit {raw}");
        }
    }

    #[test]
    fn accepts_non_negative_offsets() {
        assert_eq!(parse_offset("0").unwrap().get(), 0);
        assert_eq!(parse_offset("1").unwrap().get(), 1);
        assert_eq!(parse_offset("250").unwrap().get(), 250);
        assert_eq!(
            parse_offset("9223372036854775807").unwrap().get(),
            i64::MAX as u64
        );
    }

    #[test]
    fn offset_try_new_caps_at_signed_range() {
        assert_eq!(Offset::try_new(MAX_OFFSET).unwrap().get(), MAX_OFFSET);
        let err = Offset::try_new(MAX_OFFSET + 1).unwrap_err();
        assert_eq!(err.failure(), FailureKind::Value);
        assert_eq!(err.kind(), ParameterKind::Offset);
    }

    #[test]
    fn rejects_negative_offsets() {
        let err = parse_offset("-1").unwrap_err();
        assert_eq!(err.failure(), FailureKind::Value);
        assert_eq!(
            err.message(),
            "Invalid value for 'offset': -1 - positive value or zero required."
        );
    }

    #[test]
    fn rejects_non_numeric_offsets() {
        for raw in ["abc", "", "1e3", "9223372036854775808"] {
            let err = parse_offset(raw).unwrap_err();
            assert_eq!(err.failure(), FailureKind::Type, "offset {raw:?}");
        }
        assert_eq!(parse_offset("00").unwrap_err().failure(), FailureKind::Format);
    }

    #[test]
    fn parsing_is_repeatable() {
        let first = parse_limit("42").unwrap();
        let second = "42".parse::<Limit>().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn try_new_checks_range() {
        assert_eq!(Limit::try_new(100).unwrap().get(), 100);
        assert_eq!(
            Limit::try_new(0).unwrap_err().failure(),
            FailureKind::Value
        );
    }

    #[test]
    fn deserializes_from_strings() {
        let offset: Offset = serde_json::from_str("\"30\"").unwrap();
        assert_eq!(offset.get(), 30);
        assert!(serde_json::from_str::<Limit>("\"0\"").is_err());
    }
}
