//! Strict numeric parsing for string-typed settings
//!
//! Parsing and range checking are separate steps so that "not a number" and
//! "out of range" surface as different errors.

use crate::error::{ConfigLocation, RecipeError, RecipeResult};

/// Parses `text` as a finite floating point number
///
/// The whole input must be consumed. Leading whitespace is skipped, anything
/// after the number (including trailing whitespace) is a parse failure, as are
/// `inf` and `NaN`.
pub fn parse_number(
    field: &'static str,
    text: &str,
    location: &ConfigLocation,
) -> RecipeResult<f64> {
    let malformed = || RecipeError::MalformedNumber {
        field,
        value: text.to_string(),
        location: location.clone(),
    };

    let value: f64 = text.trim_start().parse().map_err(|_| malformed())?;
    if !value.is_finite() {
        return Err(malformed());
    }

    Ok(value)
}

/// Checks that `value` lies within `min..=max`
pub fn in_range<T: PartialOrd>(value: T, min: T, max: T) -> bool {
    value >= min && value <= max
}
