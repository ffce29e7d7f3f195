use crate::utils::error::{MoneyboxError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MoneyboxError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Only a shape check: one '@' with something on both sides.
pub fn validate_email(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;

    let valid = match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };
    if !valid {
        return Err(MoneyboxError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Not a valid email address".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(MoneyboxError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(MoneyboxError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Allowed values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("email", "jbloggs@gmail.com").is_ok());
        assert!(validate_email("email", "").is_err());
        assert!(validate_email("email", "jbloggs").is_err());
        assert!(validate_email("email", "@gmail.com").is_err());
        assert!(validate_email("email", "a@b@c").is_err());
    }

    #[test]
    fn test_validate_range_with_decimals() {
        let max = Decimal::from(4000);
        assert!(validate_range("paid_in", Decimal::ZERO, Decimal::ZERO, max).is_ok());
        assert!(validate_range("paid_in", max, Decimal::ZERO, max).is_ok());
        assert!(validate_range("paid_in", Decimal::from(4001), Decimal::ZERO, max).is_err());
        assert!(validate_range("paid_in", Decimal::NEGATIVE_ONE, Decimal::ZERO, max).is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("level", "info", &["info", "debug"]).is_ok());
        assert!(validate_one_of("level", "loud", &["info", "debug"]).is_err());
    }
}
