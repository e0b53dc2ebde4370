//! Integer coercion for loosely typed level values.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

/// First run of ASCII digits, as in "5th level" or "Lvl 5".
static DIGIT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+").expect("digit pattern is valid"));

/// Why a raw value could not be read as an integer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LevelFormatError {
    /// Floating value with a fractional part.
    #[error("non-integer level value: {0}")]
    Fractional(f64),

    /// String without any digits.
    #[error("could not parse level from string: {0:?}")]
    NoDigits(String),

    /// Digits present but outside the integer range.
    #[error("level value out of integer range: {0}")]
    Overflow(String),

    /// Null, boolean, array or object.
    #[error("unrecognized level format: {value} (type: {kind})")]
    Unrecognized { value: String, kind: &'static str },
}

/// How fractional floats are treated during coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fractions {
    /// Drop the fractional part, as candidate sources do.
    Truncate,
    /// Refuse anything that is not whole-valued.
    Reject,
}

/// Coerce a JSON value to an integer.
pub(crate) fn coerce(value: &Value, fractions: Fractions) -> Result<i64, LevelFormatError> {
    match value {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            if number.is_u64() {
                return Err(LevelFormatError::Overflow(number.to_string()));
            }
            let float = number.as_f64().unwrap_or(f64::NAN);
            if float.fract() != 0.0 && fractions == Fractions::Reject {
                return Err(LevelFormatError::Fractional(float));
            }
            let truncated = float.trunc();
            if !truncated.is_finite() || truncated < i64::MIN as f64 || truncated > i64::MAX as f64
            {
                return Err(LevelFormatError::Overflow(number.to_string()));
            }
            Ok(truncated as i64)
        }
        Value::String(text) => {
            let digits = DIGIT_RUN
                .find(text)
                .ok_or_else(|| LevelFormatError::NoDigits(text.clone()))?;
            digits
                .as_str()
                .parse::<i64>()
                .map_err(|_| LevelFormatError::Overflow(digits.as_str().to_string()))
        }
        other => Err(LevelFormatError::Unrecognized {
            value: other.to_string(),
            kind: kind_of(other),
        }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Normalize a level value, reporting why it was rejected.
///
/// Accepts integers, whole-valued floats and strings containing digits (the
/// first digit run wins). No range clamping happens here.
pub fn try_normalize(value: &Value) -> Result<i64, LevelFormatError> {
    coerce(value, Fractions::Reject)
}

/// Normalize a level value to an integer, or `None` if it cannot be read.
///
/// Rejections are logged at warning level. Callers that need the canonical
/// `[1, 20]` range must clamp separately.
pub fn normalize(value: &Value) -> Option<i64> {
    match try_normalize(value) {
        Ok(level) => Some(level),
        Err(err) => {
            tracing::warn!(error = %err, "level value rejected");
            None
        }
    }
}
