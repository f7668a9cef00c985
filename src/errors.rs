//! # Kitchen Error Types Module
//!
//! Errors for cooking-flow misuse. The pure extraction and quantity
//! functions never produce these; they degrade to empty results or
//! unchanged strings instead. Store failures stay `anyhow` errors at the
//! front end.

/// Custom error types for session operations
#[derive(Debug, Clone, PartialEq)]
pub enum KitchenError {
    /// A command was issued in a state that does not accept it
    InvalidTransition { command: String, state: String },
    /// No recipe text has been loaded yet
    NoRecipe,
    /// Extraction found no steps in the recipe
    NoSteps,
    /// Cooking cannot start while these ingredients are missing
    MissingIngredients(Vec<String>),
}

impl std::fmt::Display for KitchenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KitchenError::InvalidTransition { command, state } => {
                write!(f, "Invalid transition: '{command}' is not allowed while {state}")
            }
            KitchenError::NoRecipe => write!(f, "No recipe loaded"),
            KitchenError::NoSteps => write!(f, "Could not extract steps from recipe"),
            KitchenError::MissingIngredients(items) => {
                write!(f, "Missing ingredients: {}", items.join(", "))
            }
        }
    }
}

impl std::error::Error for KitchenError {}
