//! Validation utilities for CLI arguments

/// Validate positive integer value
pub fn validate_positive_int(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("Value must be greater than 0".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("'{}' is not a valid positive integer", value)),
    }
}

/// Validate a positive integer read from a TOML value
pub fn validate_positive_toml_int(value: &toml::Value) -> Result<usize, String> {
    match value.as_integer() {
        Some(n) if n > 0 => usize::try_from(n).map_err(|_| format!("{} is too large", n)),
        Some(n) => Err(format!("{} must be greater than 0", n)),
        None => Err(format!("expected a positive integer, found {}", value.type_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive_int() {
        assert_eq!(validate_positive_int("16"), Ok(16));
        assert!(validate_positive_int("0").is_err());
        assert!(validate_positive_int("-3").is_err());
        assert!(validate_positive_int("many").is_err());
    }

    #[test]
    fn test_validate_positive_toml_int() {
        assert_eq!(validate_positive_toml_int(&toml::Value::Integer(8)), Ok(8));
        assert!(validate_positive_toml_int(&toml::Value::Integer(0)).is_err());

        let err = validate_positive_toml_int(&toml::Value::String("8".into())).unwrap_err();
        assert!(err.contains("string"), "Unexpected message: {}", err);
    }
}
