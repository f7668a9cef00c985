//! # Nutrition Module
//!
//! Reads the per-serving nutrition estimate returned by the text-generation
//! collaborator in the "Calories: X kcal" layout requested by
//! [`nutrition_prompt`](crate::prompts::nutrition_prompt).

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref NUTRIENT_LINE: Regex = Regex::new(
        r"(?im)^\W*(?P<label>calories|energy|protein|carbs|carbohydrates|fat|fibre|fiber)\W*:?\s*~?\s*(?P<value>\d+(?:\.\d+)?)"
    )
    .expect("Nutrient line pattern should be valid");
}

/// Per-serving estimate; a field is `None` when the reply omitted it
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionEstimate {
    /// kcal
    pub calories: Option<f64>,
    /// grams
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub fiber: Option<f64>,
}

impl NutritionEstimate {
    /// True when no value could be read
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Parse a nutrition reply. The first value for each nutrient wins;
/// unparseable replies give an empty estimate.
///
/// # Examples
///
/// ```rust
/// use kitchenmate::nutrition::parse_nutrition;
///
/// let estimate = parse_nutrition("Calories: 320 kcal\nProtein: 12.5 g\nFat: 9 g");
/// assert_eq!(estimate.calories, Some(320.0));
/// assert_eq!(estimate.protein, Some(12.5));
/// assert_eq!(estimate.fiber, None);
/// ```
pub fn parse_nutrition(reply: &str) -> NutritionEstimate {
    let mut estimate = NutritionEstimate::default();

    for caps in NUTRIENT_LINE.captures_iter(reply) {
        let Ok(value) = caps["value"].parse::<f64>() else {
            continue;
        };
        let slot = match caps["label"].to_lowercase().as_str() {
            "calories" | "energy" => &mut estimate.calories,
            "protein" => &mut estimate.protein,
            "carbs" | "carbohydrates" => &mut estimate.carbs,
            "fat" => &mut estimate.fat,
            _ => &mut estimate.fiber,
        };
        slot.get_or_insert(value);
    }

    debug!("Parsed nutrition estimate: {:?}", estimate);
    estimate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_reply() {
        let reply = "Here you go!\nCalories: 450 kcal\nProtein: 18 g\nCarbs: 60 g\nFat: 14.2 g\nFiber: 6 g";
        assert_eq!(
            parse_nutrition(reply),
            NutritionEstimate {
                calories: Some(450.0),
                protein: Some(18.0),
                carbs: Some(60.0),
                fat: Some(14.2),
                fiber: Some(6.0),
            }
        );
    }

    #[test]
    fn test_markdown_and_synonyms() {
        let reply = "- **Energy:** ~300 kcal\n- **Carbohydrates**: 40g\n- **Fibre**: 3 g";
        let estimate = parse_nutrition(reply);
        assert_eq!(estimate.calories, Some(300.0));
        assert_eq!(estimate.carbs, Some(40.0));
        assert_eq!(estimate.fiber, Some(3.0));
        assert_eq!(estimate.protein, None);
    }

    #[test]
    fn test_first_value_wins() {
        let estimate = parse_nutrition("Fat: 5 g\nFat: 9 g");
        assert_eq!(estimate.fat, Some(5.0));
    }

    #[test]
    fn test_garbage() {
        assert!(parse_nutrition("Sorry, I can't help with that.").is_empty());
        assert!(parse_nutrition("").is_empty());
    }
}
