//! # Validation Module
//!
//! Input validation utilities for Duka.
//!
//! ## Validation Strategy
//! All checks here are local preconditions: they run before any gateway
//! round trip, so bad input never costs a network/database call. The
//! database schema is a second line of defense (NOT NULL, UNIQUE, CHECK
//! constraints), but callers should never rely on reaching it.
//!
//! ## Usage
//! ```rust
//! use duka_core::validation::{validate_product_name, validate_quantity};
//!
//! assert!(validate_product_name("Soap").is_ok());
//! assert!(validate_quantity(3).is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{NewExpense, NewProduct, ProductPatch};
use crate::{MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_SALE_QUANTITY, MIN_PASSWORD_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    non_empty_capped(name, "name", MAX_NAME_LEN)
}

/// Validates a category label.
pub fn validate_category(category: &str) -> ValidationResult<()> {
    non_empty_capped(category, "category", MAX_NAME_LEN)
}

/// Validates an expense description.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 500 characters
pub fn validate_description(description: &str) -> ValidationResult<()> {
    non_empty_capped(description, "description", MAX_DESCRIPTION_LEN)
}

/// Validates an email address.
///
/// ## Rules
/// Deliberately loose: non-empty, one `@` with text on both sides and a
/// dot in the domain. Deliverability is the mail system's problem.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    };

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain.tld".to_string(),
        });
    }

    Ok(())
}

/// Validates a password at sign-up.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }

    Ok(())
}

fn non_empty_capped(value: &str, field: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_SALE_QUANTITY (9,999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_SALE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_SALE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0); zero is allowed (giveaways happen)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a stock level.
///
/// ## Rules
/// - Must be non-negative (>= 0)
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "stock".to_string(),
        });
    }

    Ok(())
}

/// Validates an expense amount in cents.
///
/// ## Rules
/// - Must be strictly positive (> 0); a zero expense is a data entry error
pub fn validate_expense_amount(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates every field of a product creation spec.
pub fn validate_new_product(spec: &NewProduct) -> ValidationResult<()> {
    validate_product_name(&spec.name)?;
    validate_category(&spec.category)?;
    validate_stock(spec.initial_stock)?;
    validate_price_cents(spec.purchase_price_cents)?;
    validate_price_cents(spec.sale_price_cents)?;
    Ok(())
}

/// Validates the provided fields of a product patch.
pub fn validate_product_patch(patch: &ProductPatch) -> ValidationResult<()> {
    if let Some(name) = &patch.name {
        validate_product_name(name)?;
    }
    if let Some(category) = &patch.category {
        validate_category(category)?;
    }
    if let Some(stock) = patch.current_stock {
        validate_stock(stock)?;
    }
    if let Some(cents) = patch.purchase_price_cents {
        validate_price_cents(cents)?;
    }
    if let Some(cents) = patch.sale_price_cents {
        validate_price_cents(cents)?;
    }
    Ok(())
}

/// Validates an expense creation spec.
pub fn validate_new_expense(spec: &NewExpense) -> ValidationResult<()> {
    validate_expense_amount(spec.amount_cents)?;
    validate_description(&spec.description)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Soap").is_ok());
        assert!(validate_product_name("  Savon de Marseille  ").is_ok());

        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(9_999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(10_000).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(250).is_ok());
        assert!(validate_price_cents(-1).is_err());
    }

    #[test]
    fn test_validate_expense_amount() {
        assert!(validate_expense_amount(500).is_ok());
        assert!(validate_expense_amount(0).is_err());
        assert!(validate_expense_amount(-500).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("amina@duka.shop").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@duka.shop").is_err());
        assert!(validate_email("amina@nodot").is_err());
        assert!(validate_email("amina@dot.").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("longenough").is_ok());
        assert!(validate_password("short").is_err());
    }

    #[test]
    fn test_validate_new_product() {
        let mut spec = NewProduct {
            name: "Soap".to_string(),
            category: "Hygiene".to_string(),
            subcategory: None,
            initial_stock: 10,
            purchase_price_cents: 100,
            sale_price_cents: 250,
        };
        assert!(validate_new_product(&spec).is_ok());

        spec.initial_stock = -1;
        assert!(validate_new_product(&spec).is_err());
    }

    #[test]
    fn test_validate_product_patch() {
        assert!(validate_product_patch(&ProductPatch::default()).is_ok());

        let bad = ProductPatch {
            sale_price_cents: Some(-10),
            ..Default::default()
        };
        assert!(validate_product_patch(&bad).is_err());
    }

    #[test]
    fn test_validate_new_expense() {
        let spec = NewExpense {
            amount_cents: 500,
            description: "Transport".to_string(),
            category: None,
            date: None,
        };
        assert!(validate_new_expense(&spec).is_ok());

        let bad = NewExpense {
            amount_cents: 500,
            description: "  ".to_string(),
            category: None,
            date: None,
        };
        assert!(validate_new_expense(&bad).is_err());
    }
}
