//! # KitchenMate
//!
//! Core of a recipe assistant: pulls ingredients and steps out of free-form
//! recipe text, checks them against the user's pantry, and walks the user
//! through cooking one step at a time with voice-style commands.
//!
//! The extraction and reconciliation functions are pure. Per-user state
//! lives in an owned [`session::KitchenSession`].

pub mod config;
pub mod cooking_session;
pub mod diet_filter;
pub mod errors;
pub mod grocery;
pub mod ingredient_extractor;
pub mod ingredient_model;
pub mod inventory;
pub mod lexicon;
pub mod localization;
pub mod measurement_patterns;
pub mod nutrition;
pub mod prompts;
pub mod quantity;
pub mod recipe_book;
pub mod recipe_sources;
pub mod reconciler;
pub mod rejection;
pub mod session;
pub mod step_extractor;
pub mod store;
pub mod voice_command;
