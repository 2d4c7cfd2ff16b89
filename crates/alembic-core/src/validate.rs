//! Name and quantity checks shared by construction, `add` and `make`.

use crate::error::{LabError, NameRole};

/// Reject empty and whitespace-only names.
pub fn validate_name(name: &str, role: NameRole) -> Result<(), LabError> {
    if name.trim().is_empty() {
        return Err(LabError::InvalidName {
            role,
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Reject negative, NaN and infinite quantities. Zero is allowed.
pub fn validate_quantity(quantity: f64) -> Result<(), LabError> {
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(LabError::InvalidQuantity(quantity));
    }
    Ok(())
}
