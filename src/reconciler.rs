//! # Inventory Reconciler Module
//!
//! Matches extracted candidates against the pantry and works out what is
//! available, what is missing, how each quantity should be displayed and
//! roughly what the recipe costs.
//!
//! Matching is bidirectional substring containment and the first inventory
//! item (in insertion order) that matches wins. With overlapping keys such
//! as "chilli" and "chilli powder" the result depends on which was added
//! first.

use crate::ingredient_model::IngredientCandidate;
use crate::inventory::{Inventory, InventoryItem, StockLevel};
use crate::quantity::{convert_quantity, leading_number, scale_quantity, UnitSystem};
use log::{debug, trace};
use serde::Serialize;

/// Display and costing options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOptions {
    pub servings: u32,
    pub unit_system: UnitSystem,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            servings: 1,
            unit_system: UnitSystem::Metric,
        }
    }
}

/// One candidate after reconciliation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciledIngredient {
    pub candidate: IngredientCandidate,
    /// Inventory key the candidate matched, if any
    pub matched_key: Option<String>,
    /// Stock level of the matched item
    pub stock: Option<StockLevel>,
    /// Quantity scaled by servings and converted to the unit system
    pub display_quantity: String,
    /// Zero when unmatched, unpriced or without a numeric quantity
    pub estimated_cost: f64,
}

impl ReconciledIngredient {
    pub fn is_available(&self) -> bool {
        self.matched_key.is_some()
    }
}

/// Full reconciliation result
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Reconciliation {
    pub lines: Vec<ReconciledIngredient>,
    /// Names of candidates with no inventory match, in candidate order
    pub missing: Vec<String>,
    pub total_cost: f64,
}

impl Reconciliation {
    /// True when nothing is missing
    pub fn all_available(&self) -> bool {
        self.missing.is_empty()
    }
}

/// First inventory item whose key contains the name or is contained in it
///
/// # Examples
///
/// ```rust
/// use kitchenmate::inventory::Inventory;
/// use kitchenmate::reconciler::find_inventory_match;
///
/// let mut inventory = Inventory::new();
/// inventory.set_quantity("chilli", 100);
/// inventory.set_quantity("chilli powder", 300);
///
/// // insertion order decides between overlapping keys
/// let hit = find_inventory_match("red chilli powder", &inventory).unwrap();
/// assert_eq!(hit.name, "chilli");
/// ```
pub fn find_inventory_match<'a>(name: &str, inventory: &'a Inventory) -> Option<&'a InventoryItem> {
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return None;
    }
    inventory
        .iter()
        .find(|item| item.name.contains(name.as_str()) || name.contains(item.name.as_str()))
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Reconcile candidates against the inventory
///
/// # Arguments
///
/// * `candidates` - Output of the ingredient extractor
/// * `inventory` - Current pantry
/// * `options` - Serving count and display unit system
///
/// # Returns
///
/// One line per candidate in the same order, the missing names, and the
/// summed cost estimate.
pub fn reconcile(
    candidates: &[IngredientCandidate],
    inventory: &Inventory,
    options: &ReconcileOptions,
) -> Reconciliation {
    let servings = options.servings.max(1);
    let mut result = Reconciliation::default();

    for candidate in candidates {
        let scaled = scale_quantity(&candidate.quantity, servings);
        let display_quantity = convert_quantity(&scaled, options.unit_system);

        let matched = find_inventory_match(&candidate.name, inventory);
        let estimated_cost = matched
            .and_then(|item| inventory.price_per_100(&item.name))
            .and_then(|price| {
                leading_number(&candidate.quantity)
                    .map(|number| round_one_decimal(price * number / 100.0 * f64::from(servings)))
            })
            .unwrap_or(0.0);

        match matched {
            Some(item) => trace!("'{}' matched inventory '{}'", candidate.name, item.name),
            None => result.missing.push(candidate.name.clone()),
        }

        result.total_cost += estimated_cost;
        result.lines.push(ReconciledIngredient {
            candidate: candidate.clone(),
            matched_key: matched.map(|item| item.name.clone()),
            stock: matched.map(|item| StockLevel::classify(item.quantity)),
            display_quantity,
            estimated_cost,
        });
    }

    result.total_cost = round_one_decimal(result.total_cost);
    debug!(
        "Reconciled {} candidates: {} missing, cost {:.1}",
        result.lines.len(),
        result.missing.len(),
        result.total_cost
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, quantity: &str) -> IngredientCandidate {
        IngredientCandidate::new(name).with_quantity(quantity)
    }

    #[test]
    fn test_missing_list() {
        let mut inventory = Inventory::new();
        inventory.set_quantity("rice", 1000);
        inventory.set_quantity("salt", 500);

        let candidates = vec![
            candidate("rice", "500 g"),
            candidate("onion", "2"),
            candidate("salt", "to taste"),
        ];
        let result = reconcile(&candidates, &inventory, &ReconcileOptions::default());

        assert_eq!(result.missing, vec!["onion"]);
        assert!(!result.all_available());
        assert_eq!(result.lines[0].stock, Some(StockLevel::High));
        assert_eq!(result.lines[1].stock, None);
    }

    #[test]
    fn test_substring_match_both_ways() {
        let mut inventory = Inventory::new();
        inventory.set_quantity("basmati rice", 300);
        inventory.set_quantity("oil", 100);

        assert_eq!(
            find_inventory_match("rice", &inventory).map(|i| i.name.as_str()),
            Some("basmati rice")
        );
        assert_eq!(
            find_inventory_match("mustard oil", &inventory).map(|i| i.name.as_str()),
            Some("oil")
        );
        assert!(find_inventory_match("ghee", &inventory).is_none());
    }

    #[test]
    fn test_display_quantity_scaled_then_converted() {
        let mut inventory = Inventory::new();
        inventory.set_quantity("paneer", 200);
        let options = ReconcileOptions {
            servings: 2,
            unit_system: UnitSystem::Imperial,
        };

        let result = reconcile(&[candidate("paneer", "250 g")], &inventory, &options);
        assert_eq!(result.lines[0].display_quantity, "17.64 oz");
        assert_eq!(result.lines[0].stock, Some(StockLevel::Medium));
    }

    #[test]
    fn test_cost_uses_unscaled_quantity_times_servings() {
        let mut inventory = Inventory::new();
        inventory.set_quantity("rice", 2000);
        inventory.set_price_per_100("rice", 9.0);
        inventory.set_quantity("salt", 500);
        inventory.set_price_per_100("salt", 2.0);
        let options = ReconcileOptions {
            servings: 2,
            ..Default::default()
        };

        let candidates = vec![candidate("rice", "250 g"), candidate("salt", "to taste")];
        let result = reconcile(&candidates, &inventory, &options);

        assert_eq!(result.lines[0].estimated_cost, 45.0);
        // no number, no cost
        assert_eq!(result.lines[1].estimated_cost, 0.0);
        assert_eq!(result.total_cost, 45.0);
    }

    #[test]
    fn test_unpriced_items_cost_nothing() {
        let inventory = Inventory::starter();
        let result = reconcile(
            &[candidate("milk", "200 ml")],
            &inventory,
            &ReconcileOptions::default(),
        );
        assert_eq!(result.total_cost, 0.0);
        assert!(result.all_available());
    }
}
