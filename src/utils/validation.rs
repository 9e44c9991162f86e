use crate::utils::error::{Result, UtilError};
use serde_json::Value;

/// Largest integer magnitude every JSON producer can represent exactly (2^53 - 1).
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Returns the text of a string value, or `error` for anything else.
pub fn validate_text<'a>(value: &'a Value, error: impl FnOnce() -> UtilError) -> Result<&'a str> {
    value.as_str().ok_or_else(error)
}

/// Accepts only JSON numbers with no fractional part.
///
/// Integers beyond `i64` saturate; every caller rejects them with a range
/// check afterwards.
pub fn validate_integer(
    value: &Value,
    type_error: impl FnOnce() -> UtilError,
    fraction_error: impl FnOnce() -> UtilError,
) -> Result<i64> {
    let Value::Number(number) = value else {
        return Err(type_error());
    };

    if let Some(n) = number.as_i64() {
        return Ok(n);
    }
    if number.as_u64().is_some() {
        return Ok(i64::MAX);
    }

    match number.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 => Ok(f as i64),
        Some(_) => Err(fraction_error()),
        None => Err(type_error()),
    }
}

/// Accepts any JSON number, dropping a fractional part toward zero.
///
/// Out-of-range values saturate at the `i64` bounds.
pub fn validate_number_truncated(value: &Value, type_error: impl FnOnce() -> UtilError) -> Result<i64> {
    let Value::Number(number) = value else {
        return Err(type_error());
    };

    if let Some(n) = number.as_i64() {
        return Ok(n);
    }
    if number.as_u64().is_some() {
        return Ok(i64::MAX);
    }

    match number.as_f64() {
        Some(f) if f.is_finite() => Ok(f.trunc() as i64),
        _ => Err(type_error()),
    }
}

pub fn validate_safe_magnitude(value: i64, message: &str) -> Result<()> {
    if value.unsigned_abs() > MAX_SAFE_INTEGER as u64 {
        return Err(UtilError::overflow(message));
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(UtilError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(UtilError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Replaces path separators, wildcards and control characters with `_` so the
/// result stays a single path component.
pub fn sanitize_filename(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// A file stem must name a file directly inside the output directory.
pub fn validate_file_stem(field_name: &str, stem: &str) -> Result<()> {
    validate_non_empty_string(field_name, stem)?;

    if stem.contains(['/', '\\', '\0']) || stem.contains("..") {
        return Err(UtilError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: stem.to_string(),
            reason: "File name cannot contain path separators, '..' or null bytes".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(UtilError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(UtilError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Unsupported value. Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(UtilError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn type_error() -> UtilError {
        UtilError::not_a_number("Input must be a number")
    }

    fn fraction_error() -> UtilError {
        UtilError::non_integer("must be an integer")
    }

    #[test]
    fn test_validate_integer() {
        assert_eq!(validate_integer(&json!(42), type_error, fraction_error).unwrap(), 42);
        assert_eq!(validate_integer(&json!(-7), type_error, fraction_error).unwrap(), -7);
        assert_eq!(validate_integer(&json!(5.0), type_error, fraction_error).unwrap(), 5);
        assert_eq!(
            validate_integer(&json!(u64::MAX), type_error, fraction_error).unwrap(),
            i64::MAX
        );
    }

    #[test]
    fn test_validate_integer_rejects_fractions_and_non_numbers() {
        let err = validate_integer(&json!(3.5), type_error, fraction_error).unwrap_err();
        assert_eq!(err.kind(), "NonInteger");

        for value in [json!("5"), json!(null), json!(true), json!({}), json!([])] {
            let err = validate_integer(&value, type_error, fraction_error).unwrap_err();
            assert_eq!(err.kind(), "NotANumber", "value: {}", value);
        }
    }

    #[test]
    fn test_validate_number_truncated() {
        assert_eq!(validate_number_truncated(&json!(3), type_error).unwrap(), 3);
        assert_eq!(validate_number_truncated(&json!(1.5), type_error).unwrap(), 1);
        assert_eq!(validate_number_truncated(&json!(-1.9), type_error).unwrap(), -1);
        assert_eq!(validate_number_truncated(&json!(1e300), type_error).unwrap(), i64::MAX);

        for value in [json!("1"), json!(null), json!(false)] {
            let err = validate_number_truncated(&value, type_error).unwrap_err();
            assert_eq!(err.kind(), "NotANumber", "value: {}", value);
        }
    }

    #[test]
    fn test_validate_safe_magnitude() {
        assert!(validate_safe_magnitude(MAX_SAFE_INTEGER, "too large").is_ok());
        assert!(validate_safe_magnitude(-MAX_SAFE_INTEGER, "too large").is_ok());
        assert!(validate_safe_magnitude(MAX_SAFE_INTEGER + 1, "too large").is_err());
        assert!(validate_safe_magnitude(i64::MIN, "too large").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output.path", "./output").is_ok());
        assert!(validate_path("output.path", "").is_err());
        assert!(validate_path("output.path", "out\0put").is_err());
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("../escaped"), ".._escaped");
        assert_eq!(sanitize_filename("..\\..\\win"), ".._.._win");
        assert_eq!(sanitize_filename("report:2023*?"), "report_2023__");
        assert_eq!(sanitize_filename("nul\0byte"), "nul_byte");
        assert_eq!(sanitize_filename("daily-report_1"), "daily-report_1");
    }

    #[test]
    fn test_validate_file_stem() {
        assert!(validate_file_stem("output.filename", "report").is_ok());
        assert!(validate_file_stem("output.filename", "report.v2").is_ok());
        for stem in ["", "../escaped", "nested/report", "..\\win", "a\0b", ".."] {
            assert!(
                validate_file_stem("output.filename", stem).is_err(),
                "stem: {:?}",
                stem
            );
        }
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("output.formats", "csv", &["json", "csv", "tsv"]).is_ok());
        assert!(validate_one_of("output.formats", "xml", &["json", "csv", "tsv"]).is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("calls", 3, 1).is_ok());
        assert!(validate_positive_number("calls", 0, 1).is_err());
    }
}
