//! # Ingredient Candidate Data Model
//!
//! This module defines the `(name, quantity)` pairs produced by the
//! extractor. Quantities stay raw strings ("500 g", "to taste", "2-3
//! medium"); numeric interpretation happens later and only where needed,
//! in the quantity engine and the reconciler.
//!
//! ## Usage
//!
//! ```rust
//! use kitchenmate::ingredient_model::IngredientCandidate;
//!
//! let rice = IngredientCandidate::new("Basmati Rice ").with_quantity("500 g");
//! assert_eq!(rice.name, "basmati rice");
//! assert!(!rice.is_qualitative());
//!
//! let salt = IngredientCandidate::new("salt");
//! assert_eq!(salt.quantity, "as needed");
//! assert!(salt.is_qualitative());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantity used when the text gives none
pub const AS_NEEDED: &str = "as needed";

/// Non-numeric amounts. These are never scaled or converted.
pub const QUALITATIVE_QUANTITIES: &[&str] = &[
    "as needed",
    "to taste",
    "as required",
    "a pinch",
    "pinch",
    "to garnish",
    "for garnish",
    "if needed",
    "a handful",
    "handful",
    "some",
    "half",
    "quarter",
];

/// An unconfirmed ingredient pulled out of free text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IngredientCandidate {
    /// Lower-cased noun phrase, e.g. "basmati rice"
    pub name: String,
    /// Raw quantity text, e.g. "500 g" or "to taste"
    pub quantity: String,
}

impl IngredientCandidate {
    /// Create a candidate with the default "as needed" quantity
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_lowercase(),
            quantity: AS_NEEDED.to_string(),
        }
    }

    /// Replace the quantity; blank input keeps "as needed"
    pub fn with_quantity(mut self, quantity: &str) -> Self {
        let quantity = quantity.trim();
        if !quantity.is_empty() {
            self.quantity = quantity.to_string();
        }
        self
    }

    /// True for "as needed", "to taste" and other amounts without a number
    pub fn is_qualitative(&self) -> bool {
        is_qualitative_quantity(&self.quantity)
    }
}

impl fmt::Display for IngredientCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.quantity)
    }
}

/// Check whether a quantity string is qualitative.
///
/// Anything listed in [`QUALITATIVE_QUANTITIES`] counts, as does any
/// string without a single ASCII digit.
pub fn is_qualitative_quantity(quantity: &str) -> bool {
    let quantity = quantity.trim().to_lowercase();
    QUALITATIVE_QUANTITIES.contains(&quantity.as_str())
        || !quantity.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_name() {
        let candidate = IngredientCandidate::new("  Green Chilli ");
        assert_eq!(candidate.name, "green chilli");
        assert_eq!(candidate.quantity, AS_NEEDED);
    }

    #[test]
    fn test_blank_quantity_keeps_default() {
        let candidate = IngredientCandidate::new("salt").with_quantity("  ");
        assert_eq!(candidate.quantity, AS_NEEDED);
    }

    #[test]
    fn test_qualitative_detection() {
        let cases = vec![
            ("as needed", true),
            ("to taste", true),
            ("a pinch", true),
            ("two", true),
            ("500 g", false),
            ("1", false),
            ("2-3 medium", false),
        ];
        for (quantity, expected) in cases {
            assert_eq!(
                is_qualitative_quantity(quantity),
                expected,
                "Unexpected result for '{}'",
                quantity
            );
        }
    }

    #[test]
    fn test_display() {
        let candidate = IngredientCandidate::new("rice").with_quantity("500 g");
        assert_eq!(candidate.to_string(), "rice (500 g)");
    }
}
