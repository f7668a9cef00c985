//! # Recipe Book Module
//!
//! The user's saved recipes: hand-written custom recipes, a log of recipes
//! they cooked with a star rating, and favourites.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MAX_RATING: u8 = 5;

/// A recipe typed in by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomRecipe {
    pub ingredients: String,
    pub steps: String,
}

impl CustomRecipe {
    /// Recipe text in the sectioned layout the extractors understand
    pub fn to_recipe_text(&self, name: &str) -> String {
        format!(
            "{}\nIngredients:\n{}\nSteps:\n{}",
            name, self.ingredients, self.steps
        )
    }
}

/// One cooked recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriedRecipe {
    pub recipe: String,
    /// 1 to 5 stars
    pub rating: u8,
    pub date: NaiveDate,
}

impl TriedRecipe {
    /// Rating as filled and empty stars, e.g. "★★★☆☆"
    pub fn stars(&self) -> String {
        let filled = usize::from(self.rating.min(MAX_RATING));
        let empty = usize::from(MAX_RATING) - filled;
        format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeBook {
    #[serde(default)]
    custom: BTreeMap<String, CustomRecipe>,
    #[serde(default)]
    tried: Vec<TriedRecipe>,
    #[serde(default)]
    favourites: BTreeMap<String, String>,
}

impl RecipeBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save or replace a custom recipe. Blank fields are refused.
    pub fn save_custom(&mut self, name: &str, ingredients: &str, steps: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || ingredients.trim().is_empty() || steps.trim().is_empty() {
            return false;
        }
        self.custom.insert(
            name.to_string(),
            CustomRecipe {
                ingredients: ingredients.trim().to_string(),
                steps: steps.trim().to_string(),
            },
        );
        true
    }

    pub fn custom(&self, name: &str) -> Option<&CustomRecipe> {
        self.custom.get(name.trim())
    }

    pub fn custom_recipes(&self) -> impl Iterator<Item = (&String, &CustomRecipe)> {
        self.custom.iter()
    }

    /// Log a cooked recipe; the rating is clamped to 1..=5
    pub fn record_tried(&mut self, recipe: &str, rating: u8, date: NaiveDate) {
        self.tried.push(TriedRecipe {
            recipe: recipe.to_string(),
            rating: rating.clamp(1, MAX_RATING),
            date,
        });
    }

    /// Most recent first
    pub fn tried(&self) -> impl Iterator<Item = &TriedRecipe> {
        self.tried.iter().rev()
    }

    /// Store a favourite under the next free "Recipe N" name and return it
    pub fn add_favourite(&mut self, recipe: &str) -> String {
        let mut number = self.favourites.len() + 1;
        let mut name = format!("Recipe {number}");
        while self.favourites.contains_key(&name) {
            number += 1;
            name = format!("Recipe {number}");
        }
        self.favourites.insert(name.clone(), recipe.to_string());
        name
    }

    pub fn favourite(&self, name: &str) -> Option<&str> {
        self.favourites.get(name).map(String::as_str)
    }

    pub fn favourites(&self) -> impl Iterator<Item = (&String, &String)> {
        self.favourites.iter()
    }
}
