//! # Inventory Module
//!
//! The pantry: item quantities plus two companion maps for price per 100
//! units and days until expiry.
//!
//! Quantities are plain integers whose unit (grams, millilitres or pieces)
//! is implied by the item. Nothing here consumes stock; quantities only
//! change through explicit set/remove calls, grocery acquisition and
//! receipt imports.
//!
//! Items keep their insertion order. Reconciliation walks items in that
//! order and takes the first substring match, so the order is observable.

use crate::measurement_patterns::LEADING_NUMBER_REGEX;
use chrono::NaiveDate;
use log::{debug, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Expiry days never decay below this floor
pub const EXPIRY_FLOOR_DAYS: i32 = -30;

/// Items at or under this many days left are "expiring soon"
pub const EXPIRING_SOON_DAYS: i32 = 3;

/// Quantity below which an item counts as low stock
pub const LOW_STOCK_THRESHOLD: i64 = 200;

/// Quantity from which an item counts as well stocked
pub const HIGH_STOCK_THRESHOLD: i64 = 500;

/// Quantity used for acquired groceries and unreadable receipt lines
pub const DEFAULT_RESTOCK_QUANTITY: i64 = 500;

/// Seed pantry for a new session
pub const STARTER_ITEMS: &[(&str, i64)] = &[
    ("salt", 500),
    ("chilli powder", 200),
    ("turmeric", 150),
    ("rice", 2000),
    ("oil", 1000),
    ("onion", 10),
    ("tomato", 8),
    ("paneer", 500),
    ("potato", 2000),
    ("milk", 1000),
    ("garlic", 200),
    ("ginger", 150),
];

/// Stock classification of a quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockLevel {
    High,
    Medium,
    Low,
}

impl StockLevel {
    /// Classify a quantity: `>= 500` high, `>= 200` medium, otherwise low
    pub fn classify(quantity: i64) -> Self {
        if quantity >= HIGH_STOCK_THRESHOLD {
            StockLevel::High
        } else if quantity >= LOW_STOCK_THRESHOLD {
            StockLevel::Medium
        } else {
            StockLevel::Low
        }
    }
}

impl fmt::Display for StockLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockLevel::High => write!(f, "High"),
            StockLevel::Medium => write!(f, "Medium"),
            StockLevel::Low => write!(f, "Low"),
        }
    }
}

/// One pantry entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub name: String,
    pub quantity: i64,
}

/// Items past or close to their expiry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpiryAlerts {
    /// `(name, days)` with days <= 0
    pub expired: Vec<(String, i32)>,
    /// `(name, days)` with days in 1..=3
    pub expiring_soon: Vec<(String, i32)>,
}

impl ExpiryAlerts {
    pub fn is_empty(&self) -> bool {
        self.expired.is_empty() && self.expiring_soon.is_empty()
    }
}

/// Outcome of a receipt import
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReceiptImport {
    /// Names written to the inventory, in receipt order
    pub added: Vec<String>,
    /// Lines that could not be read
    pub skipped: usize,
}

/// Pantry state with price and expiry companions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<InventoryItem>,
    #[serde(default)]
    prices: BTreeMap<String, f64>,
    #[serde(default)]
    expiry: BTreeMap<String, i32>,
    #[serde(default)]
    last_decay: Option<NaiveDate>,
}

fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl Inventory {
    /// Empty inventory
    pub fn new() -> Self {
        Self::default()
    }

    /// Inventory seeded with [`STARTER_ITEMS`]
    pub fn starter() -> Self {
        let mut inventory = Self::new();
        for (name, quantity) in STARTER_ITEMS {
            inventory.set_quantity(name, *quantity);
        }
        inventory
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &InventoryItem> {
        self.items.iter()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.quantity(name).is_some()
    }

    pub fn quantity(&self, name: &str) -> Option<i64> {
        let key = normalize_key(name);
        self.items
            .iter()
            .find(|item| item.name == key)
            .map(|item| item.quantity)
    }

    /// Insert or overwrite an item. An existing key keeps its position.
    pub fn set_quantity(&mut self, name: &str, quantity: i64) {
        let key = normalize_key(name);
        if key.is_empty() {
            warn!("Ignoring inventory item with an empty name");
            return;
        }

        match self.items.iter_mut().find(|item| item.name == key) {
            Some(item) => item.quantity = quantity,
            None => self.items.push(InventoryItem { name: key, quantity }),
        }
    }

    /// Delete an item from all three maps. Returns false if it was absent.
    pub fn remove(&mut self, name: &str) -> bool {
        let key = normalize_key(name);
        self.prices.remove(&key);
        self.expiry.remove(&key);

        let before = self.items.len();
        self.items.retain(|item| item.name != key);
        let removed = self.items.len() != before;
        if removed {
            debug!("Removed '{}' from inventory", key);
        }
        removed
    }

    pub fn price_per_100(&self, name: &str) -> Option<f64> {
        self.prices.get(&normalize_key(name)).copied()
    }

    /// Record the price per 100 units. Non-positive prices clear the entry.
    pub fn set_price_per_100(&mut self, name: &str, price: f64) {
        let key = normalize_key(name);
        if price > 0.0 && price.is_finite() {
            self.prices.insert(key, price);
        } else {
            self.prices.remove(&key);
        }
    }

    pub fn expiry_days(&self, name: &str) -> Option<i32> {
        self.expiry.get(&normalize_key(name)).copied()
    }

    pub fn set_expiry_days(&mut self, name: &str, days: i32) {
        let key = normalize_key(name);
        if !key.is_empty() {
            self.expiry.insert(key, days);
        }
    }

    pub fn last_decay(&self) -> Option<NaiveDate> {
        self.last_decay
    }

    /// Subtract the days elapsed since the last decay from every expiry
    /// entry, flooring at [`EXPIRY_FLOOR_DAYS`].
    ///
    /// The first call only records `today`. Calling twice on the same day
    /// is a no-op. Returns the number of elapsed days applied.
    pub fn apply_daily_decay(&mut self, today: NaiveDate) -> i64 {
        let Some(last) = self.last_decay else {
            self.last_decay = Some(today);
            return 0;
        };

        let elapsed = (today - last).num_days();
        if elapsed <= 0 {
            return 0;
        }

        let step = i32::try_from(elapsed).unwrap_or(i32::MAX);
        for days in self.expiry.values_mut() {
            *days = days.saturating_sub(step).max(EXPIRY_FLOOR_DAYS);
        }

        info!(
            "Applied {} days of expiry decay to {} items",
            elapsed,
            self.expiry.len()
        );
        self.last_decay = Some(today);
        elapsed
    }

    /// Items with less than [`LOW_STOCK_THRESHOLD`] left, in insertion order
    pub fn low_stock_items(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| item.quantity < LOW_STOCK_THRESHOLD)
            .map(|item| item.name.clone())
            .collect()
    }

    /// Expired and soon-to-expire items, sorted by name
    pub fn expiry_alerts(&self) -> ExpiryAlerts {
        let mut alerts = ExpiryAlerts::default();
        for (name, days) in &self.expiry {
            if *days <= 0 {
                alerts.expired.push((name.clone(), *days));
            } else if *days <= EXPIRING_SOON_DAYS {
                alerts.expiring_soon.push((name.clone(), *days));
            }
        }
        alerts
    }

    /// Add an item with an estimated expiry. Returns the estimate.
    pub fn add_with_estimated_expiry<R: Rng + ?Sized>(
        &mut self,
        name: &str,
        quantity: i64,
        rng: &mut R,
    ) -> i32 {
        let days = estimate_expiry_days(name, rng);
        self.set_quantity(name, quantity);
        self.set_expiry_days(name, days);
        days
    }

    /// Import every `name | quantity | unit | price` line of a receipt.
    ///
    /// Existing items are overwritten. See [`parse_receipt_line`] for the
    /// line format.
    pub fn import_receipt(&mut self, receipt: &str) -> ReceiptImport {
        let mut report = ReceiptImport::default();

        for line in receipt_lines(receipt) {
            let Some(entry) = parse_receipt_line(line) else {
                report.skipped += 1;
                continue;
            };

            self.set_quantity(&entry.name, entry.quantity);
            if let Some(price) = entry.price_per_100 {
                self.set_price_per_100(&entry.name, price);
            }
            report.added.push(entry.name);
        }

        info!(
            "Receipt import: {} added, {} skipped",
            report.added.len(),
            report.skipped
        );
        report
    }

    /// Import only receipt items not already present. Quantities are taken
    /// as written; unit and price columns are ignored.
    pub fn import_missing_from_receipt(&mut self, receipt: &str) -> ReceiptImport {
        let mut report = ReceiptImport::default();

        for line in receipt_lines(receipt) {
            let parts: Vec<&str> = line.split('|').map(str::trim).collect();
            let name = normalize_key(parts[0]);
            if parts.len() < 2 || name.is_empty() {
                report.skipped += 1;
                continue;
            }
            if self.contains(&name) {
                continue;
            }

            let quantity = parse_receipt_number(parts[1])
                .map(|n| n as i64)
                .unwrap_or(DEFAULT_RESTOCK_QUANTITY);
            self.set_quantity(&name, quantity);
            report.added.push(name);
        }

        report
    }
}

/// Parsed receipt line
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptEntry {
    pub name: String,
    /// Quantity in g, ml or pieces
    pub quantity: i64,
    pub price_per_100: Option<f64>,
}

fn receipt_lines(receipt: &str) -> impl Iterator<Item = &str> {
    receipt
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.contains('|'))
}

fn parse_receipt_number(text: &str) -> Option<f64> {
    LEADING_NUMBER_REGEX
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Parse one `name | quantity | unit | price` receipt line
///
/// - `kg` and litre quantities are multiplied by 1000
/// - a quantity without a number defaults to 500
/// - a positive price becomes a price per 100 units; a leading "₹" is
///   ignored
///
/// Returns `None` for lines with fewer than three columns or an empty
/// name.
///
/// # Examples
///
/// ```rust
/// use kitchenmate::inventory::parse_receipt_line;
///
/// let entry = parse_receipt_line("Basmati Rice | 5 | kg | ₹450").unwrap();
/// assert_eq!(entry.name, "basmati rice");
/// assert_eq!(entry.quantity, 5000);
/// assert_eq!(entry.price_per_100, Some(9.0));
/// ```
pub fn parse_receipt_line(line: &str) -> Option<ReceiptEntry> {
    let parts: Vec<&str> = line.split('|').map(str::trim).collect();
    if parts.len() < 3 {
        return None;
    }

    let name = normalize_key(parts[0]);
    if name.is_empty() {
        return None;
    }

    let unit = parts[2].to_lowercase();
    let mut quantity = parse_receipt_number(parts[1]).unwrap_or(DEFAULT_RESTOCK_QUANTITY as f64);
    if matches!(unit.as_str(), "kg" | "l" | "litre" | "liter" | "litres" | "liters") {
        quantity *= 1000.0;
    }

    let price = parts
        .get(3)
        .and_then(|raw| raw.trim_start_matches('₹').trim().parse::<f64>().ok())
        .filter(|price| *price > 0.0 && quantity > 0.0);

    Some(ReceiptEntry {
        name,
        quantity: quantity as i64,
        price_per_100: price.map(|price| price / (quantity / 100.0)),
    })
}

/// Estimate shelf life in days from the item name
///
/// Ranges: fresh produce 3-7, root vegetables 10-20, milk and curd 2-5,
/// paneer 3-6, dry staples 180-365, anything else 7-30.
pub fn estimate_expiry_days<R: Rng + ?Sized>(name: &str, rng: &mut R) -> i32 {
    const FRESH: &[&str] = &["tomato", "onion", "cucumber", "spinach", "coriander", "curry leaves"];
    const ROOT: &[&str] = &["potato", "carrot", "beetroot", "pumpkin"];
    const STAPLES: &[&str] = &["rice", "dal", "flour", "oil", "spices"];

    let name = name.to_lowercase();
    let has_any = |terms: &[&str]| terms.iter().any(|term| name.contains(term));

    if has_any(FRESH) {
        rng.gen_range(3..=7)
    } else if has_any(ROOT) {
        rng.gen_range(10..=20)
    } else if name.contains("milk") || name.contains("curd") {
        rng.gen_range(2..=5)
    } else if name.contains("paneer") {
        rng.gen_range(3..=6)
    } else if has_any(STAPLES) {
        rng.gen_range(180..=365)
    } else {
        rng.gen_range(7..=30)
    }
}
