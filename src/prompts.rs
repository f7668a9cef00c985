//! Prompt templates for the text-generation collaborator.
//!
//! Builders here are pure: they read the session's configuration and
//! pantry and return the prompt text. Sending it, and handling failures,
//! is the caller's job.

use crate::config::{LanguageMode, SessionConfig};
use crate::inventory::{Inventory, EXPIRING_SOON_DAYS};

/// Transcript characters passed to the recipe extractor prompt
pub const TRANSCRIPT_LIMIT: usize = 3000;

/// Description plus scraped page characters passed to the extractor prompt
pub const DESCRIPTION_LIMIT: usize = 4000;

const ASSISTANT_PERSONA: &str = "\
You are KitchenMate, a relaxed and friendly Indian home-cooking assistant.
Keep it casual and use simple words.
When you give a recipe:
- list the ingredients with quantities
- give short, clear steps
- finish on a friendly note";

const JAIN_RULES: &str = "The user follows a JAIN diet. NEVER suggest: onion, garlic, ginger, \
potato, carrot, radish, beetroot, or any root vegetables. Use hing (asafoetida) for flavor instead.";

/// Layout the ingredient and step extractors understand
const RECIPE_LAYOUT: &str = "\
**Recipe: [Dish Name]**

**Ingredients:**
- ingredient with quantity
- ingredient with quantity

**Steps:**
1. First step
2. Second step";

fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

/// System prompt for chat replies
///
/// # Arguments
///
/// * `config` - Language and diet flags
/// * `allergies` - Free-text allergies, if the user gave any
/// * `inventory` - Low-stock and expiring items are called out
pub fn system_prompt(config: &SessionConfig, allergies: Option<&str>, inventory: &Inventory) -> String {
    let mut prompt = ASSISTANT_PERSONA.to_string();

    prompt.push('\n');
    prompt.push_str(match config.language {
        LanguageMode::English => "Reply ONLY in plain English, with no Hindi words.",
        LanguageMode::Hinglish => "Reply in casual Hindi.",
    });

    if let Some(allergies) = allergies.map(str::trim).filter(|a| !a.is_empty()) {
        prompt.push_str(&format!(
            "\nThe user is allergic to: {allergies}. Keep these out of every recipe."
        ));
    }

    let low = inventory.low_stock_items();
    if !low.is_empty() {
        prompt.push_str(&format!(
            "\nThe user is LOW on: {}. Prefer recipes that need little of these, or suggest substitutes.",
            low.join(", ")
        ));
    }

    if config.jain_mode {
        prompt.push('\n');
        prompt.push_str(JAIN_RULES);
    }

    let expiring: Vec<String> = inventory
        .iter()
        .filter_map(|item| {
            inventory
                .expiry_days(&item.name)
                .filter(|days| (1..=EXPIRING_SOON_DAYS).contains(days))
                .map(|days| format!("{} ({} days left)", item.name, days))
        })
        .collect();
    if !expiring.is_empty() {
        prompt.push_str(&format!(
            "\nThese items expire very soon: {}. Use them first and make them prominent in suggestions.",
            expiring.join(", ")
        ));
    }

    prompt
}

/// Per-serving nutrition estimate request; the reply is read by
/// [`parse_nutrition`](crate::nutrition::parse_nutrition)
pub fn nutrition_prompt(servings: u32) -> String {
    format!(
        "You are a nutrition calculator. Estimate the nutrition of the given recipe \
**strictly PER {servings} SERVING(S)**.
Answer in exactly this format:
Calories: X kcal
Protein: X g
Carbs: X g
Fat: X g
Fiber: X g

Use realistic values for Indian home-cooked food. Never give the total for the whole recipe."
    )
}

/// Ask for a recipe from a cooking video's transcript
pub fn transcript_recipe_prompt(transcript: &str, video_title: &str) -> String {
    format!(
        "You extract recipes. Below is the transcript of a cooking video titled \"{video_title}\".

Write the recipe in this layout:

{RECIPE_LAYOUT}

Transcript:
{}

Be short and practical. If quantities are not said clearly, estimate them from the steps.",
        truncate_chars(transcript, TRANSCRIPT_LIMIT)
    )
}

/// Ask for a recipe from a video description, optionally with the text of
/// a linked recipe page
pub fn description_recipe_prompt(description: &str, scraped_page: Option<&str>, video_title: &str) -> String {
    let mut source = format!("Video Title: {video_title}\n\nDescription:\n{description}\n\n");
    if let Some(page) = scraped_page.filter(|page| !page.trim().is_empty()) {
        source.push_str("Recipe Page Content:\n");
        source.push_str(page);
    }

    format!(
        "You extract recipes. Pull out the complete recipe with its exact measurements.

{}

Write the recipe in this layout:

{RECIPE_LAYOUT}

IMPORTANT: copy the EXACT quantities given. Do not estimate.",
        truncate_chars(&source, DESCRIPTION_LIMIT)
    )
}

/// Ask the vision collaborator for the ingredients in a photo
pub const IMAGE_INGREDIENTS_PROMPT: &str =
    "List every food ingredient you can see in this image. One item per line, simple English names.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_language() {
        let mut config = SessionConfig::default();
        let inventory = Inventory::new();
        assert!(system_prompt(&config, None, &inventory).contains("plain English"));

        config.language = LanguageMode::Hinglish;
        assert!(system_prompt(&config, None, &inventory).contains("casual Hindi"));
    }

    #[test]
    fn test_system_prompt_pantry_and_diet() {
        let mut config = SessionConfig::default();
        config.jain_mode = true;
        let mut inventory = Inventory::new();
        inventory.set_quantity("rice", 1000);
        inventory.set_quantity("ghee", 50);
        inventory.set_expiry_days("rice", 2);
        inventory.set_expiry_days("ghee", 0);

        let prompt = system_prompt(&config, Some("peanuts"), &inventory);
        assert!(prompt.contains("allergic to: peanuts"));
        assert!(prompt.contains("LOW on: ghee."));
        assert!(prompt.contains("hing (asafoetida)"));
        assert!(prompt.contains("rice (2 days left)"));
        // already expired items are not pushed as "use first"
        assert!(!prompt.contains("ghee (0 days left)"));
    }

    #[test]
    fn test_blank_allergies_ignored() {
        let prompt = system_prompt(&SessionConfig::default(), Some("  "), &Inventory::new());
        assert!(!prompt.contains("allergic"));
    }

    #[test]
    fn test_transcript_is_truncated() {
        let transcript = "स".repeat(TRANSCRIPT_LIMIT + 50);
        let prompt = transcript_recipe_prompt(&transcript, "Dal");
        assert_eq!(prompt.matches('स').count(), TRANSCRIPT_LIMIT);
        assert!(prompt.contains("\"Dal\""));
    }

    #[test]
    fn test_description_includes_page() {
        let prompt = description_recipe_prompt("Tasty poha", Some("2 cups poha"), "Poha");
        assert!(prompt.contains("Recipe Page Content:\n2 cups poha"));
        let prompt = description_recipe_prompt("Tasty poha", None, "Poha");
        assert!(!prompt.contains("Recipe Page Content"));
    }

    #[test]
    fn test_nutrition_prompt_servings() {
        assert!(nutrition_prompt(3).contains("PER 3 SERVING(S)"));
    }
}
