//! # Extraction Tests
//!
//! Ingredient and step extraction through the public API, covering the
//! behaviour callers rely on: normalization, rejection precedence, the
//! Jain filter, step truncation and empty-input safety.

use kitchenmate::ingredient_extractor::{extract_ingredients, ExtractionConfig, IngredientExtractor};
use kitchenmate::lexicon::{get_substitute, is_diet_compatible, DietMode};
use kitchenmate::step_extractor::{extract_steps, MAX_STEPS};

#[cfg(test)]
mod tests {
    use super::*;

    const PANEER_RECIPE: &str = "Matar Paneer\n\
        Ingredients:\n\
        - 200g paneer\n\
        - 1 cup green peas\n\
        - 2 tomatoes\n\
        - salt to taste\n\
        - a pinch of hing\n\
        Steps:\n\
        1. Puree the tomatoes\n\
        2. Cook the puree with hing for 5 minutes\n\
        3. Add peas and paneer, simmer 10 minutes";

    fn names(text: &str, diet: Option<DietMode>) -> Vec<String> {
        extract_ingredients(text, diet)
            .into_iter()
            .map(|candidate| candidate.name)
            .collect()
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let plain = "Ingredients: 2 cups rice, salt to taste";
        let noisy = "   INGREDIENTS: 2 Cups Rice, Salt To Taste \n\t";

        assert_eq!(
            extract_ingredients(plain, None),
            extract_ingredients(noisy, None)
        );
    }

    #[test]
    fn test_rejection_beats_lexicon() {
        let found = extract_ingredients("Ingredients: 2 chopped onion, 500g rice", None);

        assert!(found
            .iter()
            .any(|c| c.name == "rice" && c.quantity == "500 g"));
        assert!(found.iter().all(|c| c.name != "chopped onion"));
    }

    #[test]
    fn test_jain_filter_is_advisory_elsewhere() {
        let found = names("Ingredients: 1 potato, 200g rice", Some(DietMode::Jain));
        assert!(!found.contains(&"potato".to_string()));
        assert!(found.contains(&"rice".to_string()));

        assert!(!is_diet_compatible("potato", DietMode::Jain));
        let substitute = get_substitute("potato", DietMode::Jain);
        assert!(substitute.contains("banana") || substitute.contains("arrowroot"));
    }

    #[test]
    fn test_full_recipe() {
        let found = extract_ingredients(PANEER_RECIPE, None);
        let pairs: Vec<(&str, &str)> = found
            .iter()
            .map(|c| (c.name.as_str(), c.quantity.as_str()))
            .collect();

        assert_eq!(
            pairs,
            vec![
                ("paneer", "200 g"),
                ("green peas", "1 cup"),
                ("tomatoes", "2"),
                ("hing", "a pinch"),
                ("salt", "to taste"),
            ]
        );

        let steps = extract_steps(PANEER_RECIPE);
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0], "Puree the tomatoes");
    }

    #[test]
    fn test_step_truncation() {
        let mut text = String::from("Instructions:\n");
        for i in 1..=20 {
            text.push_str(&format!("{i}. Do thing number {i}\n"));
        }

        let steps = extract_steps(&text);
        assert_eq!(steps.len(), MAX_STEPS);
        assert_eq!(steps[14], "Do thing number 15");
    }

    #[test]
    fn test_empty_input_safety() {
        for text in ["", "   \n\t  ", "!!! 123 ???"] {
            assert!(extract_ingredients(text, None).is_empty(), "Ingredients from {:?}", text);
            assert!(extract_steps(text).is_empty(), "Steps from {:?}", text);
        }
    }

    #[test]
    fn test_known_ingredient_requirement() {
        let text = "Ingredients: 2 cups rice, 1 zorblax";
        assert_eq!(names(text, None), vec!["rice", "zorblax"]);

        let strict = IngredientExtractor::with_config(ExtractionConfig {
            require_known_ingredient: true,
            ..Default::default()
        });
        let found: Vec<String> = strict.extract(text).into_iter().map(|c| c.name).collect();
        assert_eq!(found, vec!["rice"]);
    }

    #[test]
    fn test_steps_heading_after_title() {
        let text = "How to make Poha\nIngredients: 2 cups poha, 1 onion\nMethod:\n- Rinse poha\n- Fry onion";
        assert_eq!(extract_steps(text), vec!["Rinse poha", "Fry onion"]);
    }
}
