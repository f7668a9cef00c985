//! # Quantity Engine Module
//!
//! Two best-effort transforms over raw quantity strings:
//!
//! - [`scale_quantity`] multiplies the leading number by a serving count
//! - [`convert_quantity`] rewrites the number and unit for a unit system
//!
//! Both fail soft. Anything they cannot parse (qualitative amounts, ranges,
//! unknown units) is returned unchanged, never reported as an error.

use crate::ingredient_model::QUALITATIVE_QUANTITIES;
use crate::measurement_patterns::LEADING_NUMBER_REGEX;
use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target system for displayed quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Metric => write!(f, "metric"),
            UnitSystem::Imperial => write!(f, "imperial"),
        }
    }
}

impl FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            other => Err(format!("unknown unit system: {other}")),
        }
    }
}

/// `(display unit, multiplier)` for one target system
type Conversion = (&'static str, f64);

/// Unit table: `(unit, metric, imperial)`
const CONVERSIONS: &[(&str, Conversion, Conversion)] = &[
    ("g", ("g", 1.0), ("oz", 0.035274)),
    ("gram", ("g", 1.0), ("oz", 0.035274)),
    ("kg", ("kg", 1.0), ("lbs", 2.20462)),
    ("ml", ("ml", 1.0), ("fl oz", 0.033814)),
    ("l", ("l", 1.0), ("cups", 4.22675)),
    ("liter", ("l", 1.0), ("cups", 4.22675)),
    ("litre", ("l", 1.0), ("cups", 4.22675)),
    ("oz", ("g", 28.3495), ("oz", 1.0)),
    ("lb", ("kg", 0.453592), ("lbs", 1.0)),
    ("fl oz", ("ml", 29.5735), ("fl oz", 1.0)),
    ("pc", ("pc", 1.0), ("pc", 1.0)),
    ("pcs", ("pcs", 1.0), ("pcs", 1.0)),
    ("piece", ("piece", 1.0), ("piece", 1.0)),
    ("pieces", ("pieces", 1.0), ("pieces", 1.0)),
    ("cup", ("cup", 1.0), ("cup", 1.0)),
    ("cups", ("cups", 1.0), ("cups", 1.0)),
    ("tsp", ("tsp", 1.0), ("tsp", 1.0)),
    ("tbsp", ("tbsp", 1.0), ("tbsp", 1.0)),
];

fn lookup_conversion(unit: &str, system: UnitSystem) -> Option<Conversion> {
    let find = |key: &str| {
        CONVERSIONS
            .iter()
            .find(|(name, _, _)| *name == key)
            .map(|(_, metric, imperial)| match system {
                UnitSystem::Metric => *metric,
                UnitSystem::Imperial => *imperial,
            })
    };

    find(unit).or_else(|| unit.strip_suffix('s').and_then(find))
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Split "500 g" into `(500.0, "g")`. The number must be the whole first
/// whitespace-separated token.
fn split_number(qty: &str) -> Option<(f64, &str)> {
    let qty = qty.trim();
    let (first, rest) = match qty.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim()),
        None => (qty, ""),
    };

    let number = first.parse::<f64>().ok().filter(|n| n.is_finite())?;
    Some((number, rest))
}

fn is_qualitative(qty: &str) -> bool {
    QUALITATIVE_QUANTITIES.contains(&qty.trim().to_lowercase().as_str())
}

/// Multiply the leading number by `servings`
///
/// # Arguments
///
/// * `qty` - Raw quantity such as "500 g" or "to taste"
/// * `servings` - Serving count; 0 and 1 return the input unchanged
///
/// # Returns
///
/// The scaled quantity rounded to one decimal with the trailing unit text
/// kept verbatim, or the input when no leading number can be parsed.
///
/// # Examples
///
/// ```rust
/// use kitchenmate::quantity::scale_quantity;
///
/// assert_eq!(scale_quantity("500 g", 2), "1000 g");
/// assert_eq!(scale_quantity("1.25 cups", 3), "3.8 cups");
/// assert_eq!(scale_quantity("to taste", 4), "to taste");
/// assert_eq!(scale_quantity("500 g", 1), "500 g");
/// ```
pub fn scale_quantity(qty: &str, servings: u32) -> String {
    if servings <= 1 || is_qualitative(qty) {
        return qty.to_string();
    }

    let Some((number, rest)) = split_number(qty) else {
        trace!("Not scaling '{}': no leading number", qty);
        return qty.to_string();
    };

    let scaled = round_to(number * f64::from(servings), 1);
    if rest.is_empty() {
        format!("{scaled}")
    } else {
        format!("{scaled} {rest}")
    }
}

/// Convert a quantity to the target unit system
///
/// The unit is looked up as written, then with one trailing "s" removed.
/// Identity conversions keep the number as-is; everything else is rounded
/// to two decimals.
///
/// # Examples
///
/// ```rust
/// use kitchenmate::quantity::{convert_quantity, UnitSystem};
///
/// assert_eq!(convert_quantity("500 g", UnitSystem::Imperial), "17.64 oz");
/// assert_eq!(convert_quantity("2 kg", UnitSystem::Imperial), "4.41 lbs");
/// assert_eq!(convert_quantity("2 cups", UnitSystem::Imperial), "2 cups");
/// assert_eq!(convert_quantity("3 handfuls", UnitSystem::Imperial), "3 handfuls");
/// ```
pub fn convert_quantity(qty: &str, system: UnitSystem) -> String {
    if is_qualitative(qty) {
        return qty.to_string();
    }

    let Some((number, unit)) = split_number(qty) else {
        return qty.to_string();
    };

    let unit = unit.to_lowercase();
    let Some((display_unit, factor)) = lookup_conversion(&unit, system) else {
        trace!("Not converting '{}': unknown unit '{}'", qty, unit);
        return qty.to_string();
    };

    let converted = if factor == 1.0 {
        number
    } else {
        round_to(number * factor, 2)
    };

    format!("{converted} {display_unit}")
}

/// First number appearing anywhere in a quantity string
///
/// ```rust
/// use kitchenmate::quantity::leading_number;
///
/// assert_eq!(leading_number("500 g"), Some(500.0));
/// assert_eq!(leading_number("about .5 kg"), Some(0.5));
/// assert_eq!(leading_number("to taste"), None);
/// ```
pub fn leading_number(qty: &str) -> Option<f64> {
    LEADING_NUMBER_REGEX
        .find(qty)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_rounding() {
        let cases = vec![
            ("2 tbsp", 3, "6 tbsp"),
            ("0.33 cup", 3, "1 cup"),
            ("1.5", 2, "3"),
            ("250 ml milk", 2, "500 ml milk"),
        ];
        for (qty, servings, expected) in cases {
            assert_eq!(
                scale_quantity(qty, servings),
                expected,
                "Scaling '{}' by {}",
                qty,
                servings
            );
        }
    }

    #[test]
    fn test_scale_fails_soft() {
        assert_eq!(scale_quantity("2-3 medium", 2), "2-3 medium");
        assert_eq!(scale_quantity("500g", 2), "500g");
        assert_eq!(scale_quantity("", 2), "");
        assert_eq!(scale_quantity("inf g", 2), "inf g");
        assert_eq!(scale_quantity("as needed", 2), "as needed");
    }

    #[test]
    fn test_scale_zero_servings_is_unchanged() {
        assert_eq!(scale_quantity("500 g", 0), "500 g");
    }

    #[test]
    fn test_metric_to_imperial() {
        let cases = vec![
            ("500 g", "17.64 oz"),
            ("1 kg", "2.2 lbs"),
            ("250 ml", "8.45 fl oz"),
            ("1 l", "4.23 cups"),
            ("2 litres", "8.45 cups"),
            ("3 grams", "0.11 oz"),
        ];
        for (qty, expected) in cases {
            assert_eq!(convert_quantity(qty, UnitSystem::Imperial), expected);
        }
    }

    #[test]
    fn test_imperial_to_metric() {
        assert_eq!(convert_quantity("17.64 oz", UnitSystem::Metric), "500.09 g");
        assert_eq!(convert_quantity("2 lbs", UnitSystem::Metric), "0.91 kg");
        assert_eq!(convert_quantity("8 fl oz", UnitSystem::Metric), "236.59 ml");
    }

    #[test]
    fn test_identity_units() {
        assert_eq!(convert_quantity("500 g", UnitSystem::Metric), "500 g");
        assert_eq!(convert_quantity("4 pcs", UnitSystem::Imperial), "4 pcs");
        assert_eq!(convert_quantity("1 tsp", UnitSystem::Imperial), "1 tsp");
        assert_eq!(convert_quantity("2 Cups", UnitSystem::Metric), "2 cups");
    }

    #[test]
    fn test_convert_fails_soft() {
        assert_eq!(convert_quantity("to taste", UnitSystem::Imperial), "to taste");
        assert_eq!(convert_quantity("1", UnitSystem::Imperial), "1");
        assert_eq!(convert_quantity("2 medium", UnitSystem::Imperial), "2 medium");
        assert_eq!(convert_quantity("abc g", UnitSystem::Imperial), "abc g");
    }

    #[test]
    fn test_unit_system_parsing() {
        assert_eq!("Imperial".parse::<UnitSystem>(), Ok(UnitSystem::Imperial));
        assert_eq!("metric".parse::<UnitSystem>(), Ok(UnitSystem::Metric));
        assert!("cubits".parse::<UnitSystem>().is_err());
    }
}
