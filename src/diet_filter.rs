//! # Diet Filter Module
//!
//! Advisory diet annotations for a candidate list. Nothing is removed here;
//! restricted items are reported next to a substitute suggestion so the
//! caller can show them alongside the reconciled ingredients.

use crate::ingredient_model::IngredientCandidate;
use crate::lexicon::{get_substitute, is_diet_compatible, DietMode};
use serde::Serialize;

/// A restricted ingredient and what to use instead
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DietAnnotation {
    pub name: String,
    pub diet: DietMode,
    pub substitute: String,
}

/// Annotate every candidate that conflicts with any active diet
///
/// Candidates are visited in order; for each, diets are checked in the
/// order given, so one candidate can carry several annotations.
///
/// # Examples
///
/// ```rust
/// use kitchenmate::diet_filter::annotate;
/// use kitchenmate::ingredient_model::IngredientCandidate;
/// use kitchenmate::lexicon::DietMode;
///
/// let candidates = vec![
///     IngredientCandidate::new("garlic"),
///     IngredientCandidate::new("rice"),
/// ];
/// let notes = annotate(&candidates, &[DietMode::Jain]);
///
/// assert_eq!(notes.len(), 1);
/// assert_eq!(notes[0].name, "garlic");
/// assert_eq!(candidates.len(), 2);
/// ```
pub fn annotate(candidates: &[IngredientCandidate], diets: &[DietMode]) -> Vec<DietAnnotation> {
    candidates
        .iter()
        .flat_map(|candidate| {
            diets
                .iter()
                .filter(move |diet| !is_diet_compatible(&candidate.name, **diet))
                .map(move |diet| DietAnnotation {
                    name: candidate.name.clone(),
                    diet: *diet,
                    substitute: get_substitute(&candidate.name, *diet),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiple_diets() {
        let candidates = vec![
            IngredientCandidate::new("chicken"),
            IngredientCandidate::new("butter"),
            IngredientCandidate::new("onion"),
            IngredientCandidate::new("paneer"),
        ];
        let notes = annotate(
            &candidates,
            &[DietMode::Jain, DietMode::PureVeg, DietMode::Health],
        );

        let pairs: Vec<(&str, DietMode)> =
            notes.iter().map(|n| (n.name.as_str(), n.diet)).collect();
        assert_eq!(
            pairs,
            vec![
                ("chicken", DietMode::PureVeg),
                ("butter", DietMode::Health),
                ("onion", DietMode::Jain),
            ]
        );
    }

    #[test]
    fn test_no_diets_no_notes() {
        let candidates = vec![IngredientCandidate::new("garlic")];
        assert!(annotate(&candidates, &[]).is_empty());
    }

    #[test]
    fn test_substitute_attached() {
        let notes = annotate(&[IngredientCandidate::new("potato")], &[DietMode::Jain]);
        assert!(notes[0].substitute.contains("banana"));
    }
}
