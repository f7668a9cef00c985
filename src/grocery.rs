//! # Grocery Module
//!
//! Shopping list with set semantics plus the weekly routine template.

use crate::inventory::{Inventory, DEFAULT_RESTOCK_QUANTITY};
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Items bought every week unless the user edits the routine
pub const DEFAULT_ROUTINE: &[&str] = &[
    "rice",
    "flour",
    "oil",
    "milk",
    "eggs",
    "vegetables",
    "spices",
    "fruits",
    "dal",
    "sugar",
];

/// Lower-cased, duplicate-free shopping list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroceryList {
    items: BTreeSet<String>,
}

impl GroceryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one item. Returns false if it was already listed or blank.
    pub fn add(&mut self, item: &str) -> bool {
        let item = item.trim().to_lowercase();
        if item.is_empty() {
            return false;
        }
        self.items.insert(item)
    }

    /// Add several items, returning how many were new
    pub fn add_all<I, S>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        items
            .into_iter()
            .filter(|item| self.add(item.as_ref()))
            .count()
    }

    pub fn remove(&mut self, item: &str) -> bool {
        self.items.remove(&item.trim().to_lowercase())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.contains(&item.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in alphabetical order
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.items.iter()
    }

    /// Mark an item as bought: drop it from the list and stock it at the
    /// default quantity with a fresh expiry estimate. Returns the estimate,
    /// or `None` if the item was not on the list.
    pub fn mark_acquired<R: Rng + ?Sized>(
        &mut self,
        item: &str,
        inventory: &mut Inventory,
        rng: &mut R,
    ) -> Option<i32> {
        if !self.remove(item) {
            return None;
        }
        let days = inventory.add_with_estimated_expiry(item, DEFAULT_RESTOCK_QUANTITY, rng);
        debug!("Acquired '{}' into inventory, expires in {} days", item.trim(), days);
        Some(days)
    }
}

/// Editable weekly routine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineTemplate {
    items: Vec<String>,
}

impl Default for RoutineTemplate {
    fn default() -> Self {
        Self {
            items: DEFAULT_ROUTINE.iter().map(|item| item.to_string()).collect(),
        }
    }
}

impl RoutineTemplate {
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Append an item unless already present
    pub fn add(&mut self, item: &str) -> bool {
        let item = item.trim().to_lowercase();
        if item.is_empty() || self.items.contains(&item) {
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn remove(&mut self, item: &str) -> bool {
        let item = item.trim().to_lowercase();
        let before = self.items.len();
        self.items.retain(|existing| *existing != item);
        self.items.len() != before
    }

    /// Copy every routine item to the grocery list; returns how many were new
    pub fn apply_to(&self, list: &mut GroceryList) -> usize {
        list.add_all(&self.items)
    }
}
