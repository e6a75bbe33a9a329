//! # Validation Module
//!
//! Input validation for the storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Content Provider record (storefront-content)                 │
//! │  ├── JSON shape (serde)                                                │
//! │  └── THIS MODULE: Product invariants (price ≥ 0, slug format, ...)     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Cart Ledger                                                  │
//! │  └── THIS MODULE: quantity normalization (never an error)              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Filter/Sort Engine                                           │
//! │  └── Unknown selections normalize to defaults (filter.rs)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::warn;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest slug accepted from the Content Provider.
pub const MAX_SLUG_LEN: usize = 96;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required identifier-like field (id, name, category).
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a product slug.
///
/// ## Rules
/// - Must not be empty
/// - At most 96 characters
/// - URL-safe: the RFC 3986 unreserved set (`A-Z a-z 0-9 - _ . ~`), so the
///   slug can sit in a path segment without escaping
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_slug;
///
/// assert!(validate_slug("asgaard-sofa").is_ok());
/// assert!(validate_slug("Asgaard_Sofa.v2").is_ok());
/// assert!(validate_slug("Asgaard Sofa").is_err());
/// assert!(validate_slug("").is_err());
/// ```
pub fn validate_slug(slug: &str) -> ValidationResult<()> {
    if slug.is_empty() {
        return Err(ValidationError::Required {
            field: "slug".to_string(),
        });
    }

    if slug.len() > MAX_SLUG_LEN {
        return Err(ValidationError::TooLong {
            field: "slug".to_string(),
            max: MAX_SLUG_LEN,
        });
    }

    let url_safe = slug
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~'));

    if !url_safe {
        return Err(ValidationError::InvalidFormat {
            field: "slug".to_string(),
            reason: "must only contain letters, digits, '-', '_', '.' or '~'".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price as received from the Content Provider (major units).
pub fn validate_price(amount: f64) -> ValidationResult<()> {
    if !amount.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if amount < 0.0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Converts a discount percentage to basis points.
///
/// Values outside 0-100 are clamped (with a warn log) so a mistyped discount
/// never hides the product. Only non-numbers are rejected.
pub fn validate_discount_percentage(pct: f64) -> ValidationResult<u32> {
    if !pct.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "discountPercentage".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    let clamped = pct.clamp(0.0, 100.0);
    if clamped != pct {
        warn!(discount = pct, clamped, "Clamping out-of-range discount percentage");
    }

    Ok((clamped * 100.0).round() as u32)
}

/// Validates a stock level: a whole number that is zero or more.
///
/// Takes the JSON number as-is, so `4` and `4.0` are the same level.
pub fn validate_stock_level(level: f64) -> ValidationResult<u32> {
    if !level.is_finite() || level.fract() != 0.0 {
        return Err(ValidationError::InvalidFormat {
            field: "stockLevel".to_string(),
            reason: "must be a whole number".to_string(),
        });
    }

    if level < 0.0 || level > f64::from(u32::MAX) {
        return Err(ValidationError::OutOfRange {
            field: "stockLevel".to_string(),
            min: 0,
            max: i64::from(u32::MAX),
        });
    }

    Ok(level as u32)
}

/// Normalizes a requested cart quantity.
///
/// Callers are expected to send `quantity >= 1`. Anything lower is clamped
/// to 1 rather than rejected, so a misbehaving caller can never create a
/// non-positive entry.
///
/// ## Example
/// ```rust
/// use storefront_core::validation::normalize_quantity;
///
/// assert_eq!(normalize_quantity(3), 3);
/// assert_eq!(normalize_quantity(0), 1);
/// assert_eq!(normalize_quantity(-7), 1);
/// ```
pub fn normalize_quantity(quantity: i64) -> i64 {
    if quantity < 1 {
        warn!(quantity, "Clamping non-positive cart quantity to 1");
        return 1;
    }
    quantity
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert!(validate_required("id", "p-1").is_ok());
        assert_eq!(
            validate_required("id", "   "),
            Err(ValidationError::Required {
                field: "id".to_string()
            })
        );
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("asgaard-sofa").is_ok());
        assert!(validate_slug("chair-2").is_ok());
        assert!(validate_slug("asgaard_sofa").is_ok());
        assert!(validate_slug("Asgaard-Sofa").is_ok());
        assert!(validate_slug("sofa.v2").is_ok());
        assert!(validate_slug("~outlet").is_ok());

        assert!(validate_slug("").is_err());
        assert!(validate_slug("has space").is_err());
        assert!(validate_slug("sofa/2").is_err());
        assert!(validate_slug("sofa?x=1").is_err());
        assert!(validate_slug("sofá").is_err());
        assert!(validate_slug(&"a".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(1500.5).is_ok());
        assert!(validate_price(-1.0).is_err());
        assert!(validate_price(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_discount_percentage() {
        assert_eq!(validate_discount_percentage(0.0), Ok(0));
        assert_eq!(validate_discount_percentage(12.5), Ok(1250));
        assert_eq!(validate_discount_percentage(100.0), Ok(10_000));
        assert_eq!(validate_discount_percentage(120.0), Ok(10_000));
        assert_eq!(validate_discount_percentage(-5.0), Ok(0));
        assert!(validate_discount_percentage(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_stock_level() {
        assert_eq!(validate_stock_level(0.0), Ok(0));
        assert_eq!(validate_stock_level(42.0), Ok(42));
        assert!(validate_stock_level(-1.0).is_err());
        assert!(validate_stock_level(2.5).is_err());
        assert!(validate_stock_level(f64::INFINITY).is_err());
    }

    #[test]
    fn test_normalize_quantity() {
        assert_eq!(normalize_quantity(1), 1);
        assert_eq!(normalize_quantity(500), 500);
        assert_eq!(normalize_quantity(0), 1);
        assert_eq!(normalize_quantity(i64::MIN), 1);
    }
}
