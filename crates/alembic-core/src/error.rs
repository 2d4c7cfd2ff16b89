use std::fmt;

/// Which part of the input a rejected name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRole {
    Substance,
    Product,
    Ingredient,
}

impl fmt::Display for NameRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NameRole::Substance => "substance",
            NameRole::Product => "product",
            NameRole::Ingredient => "ingredient",
        })
    }
}

/// Errors raised by laboratory construction and by `quantity`/`add`/`make`.
///
/// Every error is detected before any state changes. Running out of stock is
/// never an error: `make` reports it by producing less than requested.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LabError {
    #[error("Invalid {role}: {name:?}")]
    InvalidName { role: NameRole, name: String },
    #[error("Duplicate substance: {0}")]
    DuplicateSubstance(String),
    #[error("Duplicate reaction: {0}")]
    DuplicateReaction(String),
    #[error("No substances provided")]
    NoSubstancesProvided,
    #[error("Unknown substance: {0}")]
    UnknownSubstance(String),
    #[error("Unknown ingredient: {0}")]
    UnknownIngredient(String),
    #[error("Unknown product: {0}")]
    UnknownProduct(String),
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_name_message_quotes_the_name() {
        let err = LabError::InvalidName {
            role: NameRole::Product,
            name: "   ".to_string(),
        };
        assert_eq!(err.to_string(), r#"Invalid product: "   ""#);

        let err = LabError::InvalidName {
            role: NameRole::Substance,
            name: String::new(),
        };
        assert_eq!(err.to_string(), r#"Invalid substance: """#);
    }

    #[test]
    fn lookup_messages() {
        assert_eq!(
            LabError::UnknownSubstance("salt".into()).to_string(),
            "Unknown substance: salt"
        );
        assert_eq!(
            LabError::UnknownIngredient("unknown".into()).to_string(),
            "Unknown ingredient: unknown"
        );
        assert_eq!(
            LabError::DuplicateSubstance("water".into()).to_string(),
            "Duplicate substance: water"
        );
        assert_eq!(
            LabError::NoSubstancesProvided.to_string(),
            "No substances provided"
        );
    }

    #[test]
    fn invalid_quantity_message() {
        assert_eq!(
            LabError::InvalidQuantity(-1.0).to_string(),
            "Invalid quantity: -1"
        );
        assert_eq!(
            LabError::InvalidQuantity(f64::NAN).to_string(),
            "Invalid quantity: NaN"
        );
    }
}
