//! Query-parameter validation for the scramble endpoints.

use crate::error::ApiError;
use std::ops::RangeInclusive;
use tracing::{debug, instrument};

/// Raw query parameters, kept as text so malformed values produce a
/// structured error instead of an extractor rejection.
///
/// Every occurrence of a key is kept; a repeated `length` or `count` is
/// rejected when resolved. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrambleQuery {
    /// Values given for `length`.
    pub length: Vec<String>,
    /// Values given for `count`.
    pub count: Vec<String>,
}

impl ScrambleQuery {
    /// Collects decoded query pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "length" => query.length.push(value),
                "count" => query.count.push(value),
                _ => debug!(key = %key, "Ignoring unknown query parameter"),
            }
        }
        query
    }

    /// Resolves `length` against `range`, defaulting when absent.
    pub fn length(
        &self,
        default: usize,
        range: RangeInclusive<usize>,
    ) -> Result<usize, ApiError> {
        resolve_single("length", &self.length, default, range)
    }

    /// Resolves `count` against `range`, defaulting when absent.
    pub fn count(&self, default: usize, range: RangeInclusive<usize>) -> Result<usize, ApiError> {
        resolve_single("count", &self.count, default, range)
    }
}

fn resolve_single(
    parameter: &'static str,
    values: &[String],
    default: usize,
    range: RangeInclusive<usize>,
) -> Result<usize, ApiError> {
    match values {
        [] => parse_bounded(parameter, None, default, range),
        [value] => parse_bounded(parameter, Some(value.as_str()), default, range),
        _ => {
            debug!(parameter, occurrences = values.len(), "Repeated query parameter");
            Err(ApiError::InvalidParameter {
                parameter,
                min: *range.start(),
                max: *range.end(),
            })
        }
    }
}

/// Parses a bounded integer parameter.
///
/// A missing or empty value takes `default`. Anything that is not an
/// integer inside `range` is rejected.
#[instrument(skip(range), fields(min = range.start(), max = range.end()))]
pub fn parse_bounded(
    parameter: &'static str,
    raw: Option<&str>,
    default: usize,
    range: RangeInclusive<usize>,
) -> Result<usize, ApiError> {
    let invalid = || ApiError::InvalidParameter {
        parameter,
        min: *range.start(),
        max: *range.end(),
    };

    let value = match raw.map(str::trim) {
        None | Some("") => default,
        Some(text) => text.parse::<usize>().map_err(|_| invalid())?,
    };

    if !range.contains(&value) {
        return Err(invalid());
    }

    debug!(value, "Parameter accepted");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_value_takes_default() {
        assert_eq!(parse_bounded("length", None, 20, 1..=100).unwrap(), 20);
        assert_eq!(parse_bounded("length", Some(""), 20, 1..=100).unwrap(), 20);
    }

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(parse_bounded("length", Some("1"), 20, 1..=100).unwrap(), 1);
        assert_eq!(parse_bounded("length", Some("100"), 20, 1..=100).unwrap(), 100);
    }

    #[test]
    fn out_of_range_and_malformed_values_rejected() {
        for raw in ["0", "101", "-3", "2.5", "twenty", "1e2"] {
            let err = parse_bounded("length", Some(raw), 20, 1..=100).unwrap_err();
            assert!(matches!(
                err,
                ApiError::InvalidParameter {
                    parameter: "length",
                    min: 1,
                    max: 100
                }
            ));
        }
    }

    fn pairs(raw: &[(&str, &str)]) -> ScrambleQuery {
        ScrambleQuery::from_pairs(raw.iter().map(|(k, v)| (k.to_string(), v.to_string())))
    }

    #[test]
    fn single_values_resolve() {
        let query = pairs(&[("length", "25"), ("count", "3"), ("utm", "x")]);
        assert_eq!(query.length(20, 1..=100).unwrap(), 25);
        assert_eq!(query.count(1, 1..=50).unwrap(), 3);
    }

    #[test]
    fn absent_values_take_default() {
        let query = pairs(&[]);
        assert_eq!(query.length(20, 1..=100).unwrap(), 20);
        assert_eq!(query.count(1, 1..=50).unwrap(), 1);
    }

    #[test]
    fn repeated_parameter_rejected() {
        let query = pairs(&[("length", "5"), ("length", "6")]);
        let err = query.length(20, 1..=100).unwrap_err();
        assert!(matches!(
            err,
            ApiError::InvalidParameter {
                parameter: "length",
                min: 1,
                max: 100
            }
        ));
    }
}
