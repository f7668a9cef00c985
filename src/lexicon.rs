//! # Lexicon Module
//!
//! Canonical ingredient vocabulary and diet rule tables.
//!
//! The vocabulary is kept as data: a table of categorized term lists that is
//! flattened once into a lookup set. Diet restrictions are a second table,
//! one rule per [`DietMode`], holding the restricted substrings, the markers
//! that exempt an otherwise restricted candidate, and the substitute
//! suggestions returned to the user.
//!
//! All matching is plain substring containment. It is deliberately loose so
//! that compound names ("chopped onion", "basmati rice") still hit their
//! base entry, at the cost of occasional nested false positives ("pea"
//! inside "peanut").

use lazy_static::lazy_static;
use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Broad grouping of lexicon entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IngredientCategory {
    Vegetables,
    Spices,
    GrainsPulses,
    Dairy,
    Proteins,
    OilsFats,
    Sweeteners,
    Condiments,
    BreadsPasta,
    Beverages,
    Misc,
}

/// Categorized vocabulary. Order matters only for [`category_of`].
pub const LEXICON: &[(IngredientCategory, &[&str])] = &[
    (
        IngredientCategory::Vegetables,
        &[
            "onion", "tomato", "potato", "garlic", "ginger", "carrot", "beetroot",
            "capsicum", "bell pepper", "cabbage", "cauliflower", "broccoli",
            "spinach", "palak", "methi", "fenugreek", "coriander", "cilantro",
            "curry leaves", "mint", "pudina", "beans", "peas", "corn",
            "cucumber", "radish", "turnip", "pumpkin", "bottle gourd", "lauki",
            "bitter gourd", "karela", "ridge gourd", "turai", "eggplant", "brinjal",
            "okra", "bhindi", "mushroom", "zucchini", "lettuce", "celery",
            "spring onion", "leek", "sweet potato", "yam", "colocasia", "arbi",
        ],
    ),
    (
        IngredientCategory::Spices,
        &[
            "turmeric", "haldi", "cumin", "jeera", "dhaniya",
            "chilli", "chili", "red chilli", "green chilli", "kashmiri chilli",
            "black pepper", "white pepper", "cardamom", "elaichi", "cinnamon",
            "dalchini", "clove", "laung", "bay leaf", "tej patta", "star anise",
            "fennel", "saunf", "mustard", "sarson", "rai",
            "asafoetida", "hing", "nutmeg", "jaiphal", "mace", "javitri",
            "carom seeds", "ajwain", "nigella", "kalonji", "sesame", "til",
            "poppy seeds", "khus khus", "garam masala", "chaat masala",
            "pav bhaji masala", "chole masala", "biryani masala", "tandoori masala",
            "curry powder", "sambhar powder", "rasam powder", "chilli powder",
            "coriander powder", "cumin powder", "turmeric powder", "ginger powder",
            "garlic powder", "dried mango", "amchur", "dried pomegranate", "anardana",
            "saffron", "kesar", "vanilla", "oregano", "basil", "thyme", "rosemary",
            "paprika", "cayenne",
        ],
    ),
    (
        IngredientCategory::GrainsPulses,
        &[
            "rice", "basmati rice", "sona masoori", "brown rice", "jasmine rice",
            "wheat", "flour", "atta", "maida", "all purpose flour", "whole wheat",
            "semolina", "sooji", "rava", "besan", "gram flour", "chickpea flour",
            "corn flour", "cornstarch", "rice flour", "ragi", "finger millet",
            "jowar", "sorghum", "bajra", "pearl millet", "oats", "quinoa",
            "dal", "lentil", "moong dal", "mung dal", "toor dal", "arhar dal",
            "chana dal", "masoor dal", "urad dal", "chickpea", "kabuli chana",
            "black chickpea", "kala chana", "rajma", "kidney beans", "black beans",
            "white beans", "pinto beans", "soybean", "peanut", "groundnut",
            "almond", "badam", "cashew", "kaju", "walnut", "akhrot", "pistachio",
            "pista", "raisin", "kishmish", "dates", "khajoor", "coconut", "nariyal",
        ],
    ),
    (
        IngredientCategory::Dairy,
        &[
            "milk", "doodh", "cream", "heavy cream", "fresh cream", "whipping cream",
            "butter", "makhan", "ghee", "clarified butter", "paneer", "cottage cheese",
            "cheese", "cheddar", "mozzarella", "parmesan", "cream cheese",
            "curd", "yogurt", "dahi", "buttermilk", "chaas", "khoya", "mawa",
            "condensed milk", "evaporated milk", "milk powder", "malai",
        ],
    ),
    (
        IngredientCategory::Proteins,
        &[
            "chicken", "mutton", "lamb", "goat", "beef", "pork", "fish", "machli",
            "prawn", "shrimp", "crab", "salmon", "tuna", "pomfret", "rohu",
            "egg", "anda", "tofu", "soya chunks", "soy", "tempeh",
        ],
    ),
    (
        IngredientCategory::OilsFats,
        &[
            "oil", "tel", "mustard oil", "coconut oil", "olive oil", "sunflower oil",
            "vegetable oil", "sesame oil", "groundnut oil", "peanut oil",
            "margarine", "lard",
        ],
    ),
    (
        IngredientCategory::Sweeteners,
        &[
            "sugar", "chini", "jaggery", "gur", "brown sugar", "honey", "shahad",
            "maple syrup", "corn syrup", "stevia", "artificial sweetener",
            "palm sugar", "coconut sugar", "date syrup",
        ],
    ),
    (
        IngredientCategory::Condiments,
        &[
            "tomato sauce", "ketchup", "soy sauce", "vinegar", "sirka",
            "tamarind", "imli", "lemon", "nimbu", "lime", "orange", "pomegranate",
            "tomato paste", "tomato puree", "chilli sauce", "hot sauce",
            "worcestershire sauce", "fish sauce", "oyster sauce", "hoisin sauce",
            "mayonnaise", "mustard sauce", "pickle", "achar", "chutney",
        ],
    ),
    (
        IngredientCategory::BreadsPasta,
        &[
            "bread", "pav", "bun", "roti", "chapati", "naan", "paratha",
            "puri", "bhatura", "kulcha", "pasta", "macaroni", "spaghetti",
            "noodles", "vermicelli", "seviyan", "couscous",
        ],
    ),
    (
        IngredientCategory::Beverages,
        &[
            "water", "pani", "tea", "chai", "coffee", "juice", "coconut water",
            "stock", "broth", "vegetable stock", "chicken stock", "bone broth",
        ],
    ),
    (
        IngredientCategory::Misc,
        &[
            "salt", "namak", "baking soda", "baking powder", "yeast", "gelatin",
            "agar agar", "cornmeal", "breadcrumbs", "panko",
            "chocolate", "cocoa", "coffee powder", "tea leaves",
        ],
    ),
];

lazy_static! {
    /// Flattened lexicon for membership checks
    static ref KNOWN_INGREDIENTS: HashSet<&'static str> = LEXICON
        .iter()
        .flat_map(|(_, terms)| terms.iter().copied())
        .collect();
}

/// Check whether a candidate is a known ingredient.
///
/// True when any lexicon entry is a substring of the candidate or the
/// candidate is a substring of an entry.
///
/// # Examples
///
/// ```rust
/// use kitchenmate::lexicon::is_known_ingredient;
///
/// assert!(is_known_ingredient("chopped onion"));
/// assert!(is_known_ingredient("Basmati Rice"));
/// assert!(!is_known_ingredient("spatula"));
/// ```
pub fn is_known_ingredient(candidate: &str) -> bool {
    let candidate = candidate.trim().to_lowercase();
    if candidate.is_empty() {
        return false;
    }
    KNOWN_INGREDIENTS
        .iter()
        .any(|term| candidate.contains(term) || term.contains(candidate.as_str()))
}

/// First category whose vocabulary overlaps the candidate
pub fn category_of(candidate: &str) -> Option<IngredientCategory> {
    let candidate = candidate.trim().to_lowercase();
    if candidate.is_empty() {
        return None;
    }
    LEXICON
        .iter()
        .find(|(_, terms)| {
            terms
                .iter()
                .any(|term| candidate.contains(term) || term.contains(candidate.as_str()))
        })
        .map(|(category, _)| *category)
}

/// Supported dietary restrictions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DietMode {
    /// No root vegetables, alliums or anything grown underground
    Jain,
    /// No meat, fish or egg
    PureVeg,
    /// Low oil and sugar
    Health,
}

impl DietMode {
    pub const ALL: [DietMode; 3] = [DietMode::Jain, DietMode::PureVeg, DietMode::Health];

    fn rule(self) -> &'static DietRule {
        match self {
            DietMode::Jain => &JAIN_RULE,
            DietMode::PureVeg => &PURE_VEG_RULE,
            DietMode::Health => &HEALTH_RULE,
        }
    }
}

impl fmt::Display for DietMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DietMode::Jain => write!(f, "Jain"),
            DietMode::PureVeg => write!(f, "Pure Veg"),
            DietMode::Health => write!(f, "Health"),
        }
    }
}

impl FromStr for DietMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "jain" => Ok(DietMode::Jain),
            "pure veg" | "pureveg" | "veg" | "vegetarian" => Ok(DietMode::PureVeg),
            "health" | "healthy" => Ok(DietMode::Health),
            other => Err(format!("unknown diet mode: {other}")),
        }
    }
}

/// Restriction table for one diet
struct DietRule {
    /// Substrings that make a candidate incompatible
    restricted: &'static [&'static str],
    /// Substrings that exempt a candidate even when a restricted term matches
    exempt_markers: &'static [&'static str],
    /// Ordered `(key, substitute)` pairs; first key contained in the candidate wins
    substitutes: &'static [(&'static str, &'static str)],
    fallback: &'static str,
}

const JAIN_RULE: DietRule = DietRule {
    restricted: &[
        "potato", "aloo", "sweet potato", "shakarkandi",
        "onion", "pyaz", "spring onion", "scallion", "leek",
        "garlic", "lahsun", "lehsun",
        "ginger", "adrak",
        "radish", "mooli", "daikon",
        "carrot", "gajar",
        "beetroot", "beet", "chukandar",
        "turnip", "shalgam",
        "yam", "suran", "jimikand",
        "colocasia", "arbi", "taro root",
        "turmeric", "haldi",
        "ginger garlic paste",
        "peanut", "groundnut", "moongfali",
    ],
    exempt_markers: &["powder"],
    substitutes: &[
        ("ginger garlic paste", "green chilli paste with asafoetida (hing)"),
        ("potato", "raw banana (kachha kela), arrowroot (ararot), or sweet corn"),
        ("onion", "asafoetida (hing) for flavor, or finely chopped cabbage"),
        ("garlic", "asafoetida (hing) for flavor"),
        ("ginger", "dry ginger powder (sonth) or green chilli for heat"),
        ("radish", "cucumber or white pumpkin (petha)"),
        ("carrot", "bottle gourd (lauki), red pumpkin, or tomatoes"),
        ("beetroot", "red pumpkin or tomatoes for color"),
        ("turnip", "white pumpkin (petha) or bottle gourd"),
        ("peanut", "cashew, almond, or melon seeds"),
        ("turmeric", "turmeric powder (powder form is allowed)"),
    ],
    fallback: "Please check Jain diet guidelines for substitute",
};

const PURE_VEG_RULE: DietRule = DietRule {
    restricted: &[
        "chicken", "mutton", "lamb", "goat", "beef", "pork", "fish", "machli",
        "prawn", "shrimp", "crab", "salmon", "tuna", "pomfret", "rohu",
        "egg", "anda", "gelatin", "lard", "bone broth", "oyster sauce",
    ],
    exempt_markers: &["eggplant", "eggless"],
    substitutes: &[
        ("chicken", "paneer or soya chunks"),
        ("mutton", "raw jackfruit (kathal) or soya chunks"),
        ("lamb", "raw jackfruit (kathal) or soya chunks"),
        ("fish", "raw banana or firm tofu"),
        ("prawn", "mushrooms or baby corn"),
        ("shrimp", "mushrooms or baby corn"),
        ("egg", "curd, mashed banana or flaxseed gel for baking; paneer bhurji for scrambles"),
        ("gelatin", "agar agar"),
        ("lard", "ghee or vegetable oil"),
    ],
    fallback: "Try paneer, tofu or soya chunks as a vegetarian swap",
};

const HEALTH_RULE: DietRule = DietRule {
    restricted: &[
        "sugar", "maida", "all purpose flour", "butter", "ghee", "cream", "malai",
        "mayonnaise", "margarine", "condensed milk",
    ],
    exempt_markers: &["sugar free", "buttermilk"],
    substitutes: &[
        ("condensed milk", "reduced low-fat milk with dates paste"),
        ("sugar", "jaggery in moderation, dates paste or stevia"),
        ("maida", "whole wheat flour (atta) or oats flour"),
        ("all purpose flour", "whole wheat flour (atta) or oats flour"),
        ("butter", "a teaspoon of olive oil"),
        ("ghee", "a teaspoon of olive oil"),
        ("cream", "hung curd or cashew paste"),
        ("malai", "hung curd or cashew paste"),
        ("mayonnaise", "hung curd dip"),
    ],
    fallback: "Use less of it, or swap for a lighter home ingredient",
};

/// Check whether a candidate fits a diet.
///
/// Returns false if any restricted substring is found, unless the candidate
/// also carries one of the diet's exempt markers (e.g. powdered forms under
/// the Jain rule).
///
/// # Examples
///
/// ```rust
/// use kitchenmate::lexicon::{is_diet_compatible, DietMode};
///
/// assert!(!is_diet_compatible("potato", DietMode::Jain));
/// assert!(is_diet_compatible("turmeric powder", DietMode::Jain));
/// assert!(is_diet_compatible("rice", DietMode::Jain));
/// ```
pub fn is_diet_compatible(candidate: &str, diet: DietMode) -> bool {
    let candidate = candidate.trim().to_lowercase();
    let rule = diet.rule();

    let Some(restricted) = rule
        .restricted
        .iter()
        .find(|term| candidate.contains(*term))
    else {
        return true;
    };

    if rule
        .exempt_markers
        .iter()
        .any(|marker| candidate.contains(marker))
    {
        trace!(
            "'{}' matches restricted '{}' but carries an exempt marker for {}",
            candidate,
            restricted,
            diet
        );
        return true;
    }

    false
}

/// Canned substitute suggestion for a restricted candidate
///
/// Falls back to a generic message when no table entry matches.
pub fn get_substitute(candidate: &str, diet: DietMode) -> String {
    let candidate = candidate.trim().to_lowercase();
    let rule = diet.rule();

    rule.substitutes
        .iter()
        .find(|(key, _)| candidate.contains(key))
        .map(|(_, substitute)| *substitute)
        .unwrap_or(rule.fallback)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_ingredient_bidirectional() {
        assert!(is_known_ingredient("onion"));
        assert!(is_known_ingredient("chopped onion"));
        // candidate inside a longer entry
        assert!(is_known_ingredient("basmati"));
        assert!(!is_known_ingredient(""));
        assert!(!is_known_ingredient("spatula"));
    }

    #[test]
    fn test_known_ingredient_nested_false_positive_is_preserved() {
        // "pea" is inside "peanut" and "peas"
        assert!(is_known_ingredient("pea"));
    }

    #[test]
    fn test_category_lookup() {
        assert_eq!(category_of("paneer"), Some(IngredientCategory::Dairy));
        assert_eq!(category_of("sugar"), Some(IngredientCategory::Sweeteners));
        assert_eq!(category_of("tomato"), Some(IngredientCategory::Vegetables));
        assert_eq!(category_of("stapler"), None);
    }

    #[test]
    fn test_jain_compatibility() {
        assert!(!is_diet_compatible("potato", DietMode::Jain));
        assert!(!is_diet_compatible("Red Onion", DietMode::Jain));
        assert!(!is_diet_compatible("ginger garlic paste", DietMode::Jain));
        assert!(is_diet_compatible("turmeric powder", DietMode::Jain));
        assert!(is_diet_compatible("ginger powder", DietMode::Jain));
        assert!(is_diet_compatible("paneer", DietMode::Jain));
    }

    #[test]
    fn test_pure_veg_compatibility() {
        assert!(!is_diet_compatible("chicken breast", DietMode::PureVeg));
        assert!(!is_diet_compatible("eggs", DietMode::PureVeg));
        assert!(is_diet_compatible("eggplant", DietMode::PureVeg));
        assert!(is_diet_compatible("paneer", DietMode::PureVeg));
    }

    #[test]
    fn test_health_compatibility() {
        assert!(!is_diet_compatible("sugar", DietMode::Health));
        assert!(!is_diet_compatible("fresh cream", DietMode::Health));
        assert!(is_diet_compatible("buttermilk", DietMode::Health));
        assert!(is_diet_compatible("oats", DietMode::Health));
    }

    #[test]
    fn test_substitutes() {
        let potato = get_substitute("potato", DietMode::Jain);
        assert!(potato.contains("banana") || potato.contains("arrowroot"));

        // The specific paste entry wins over its parts
        assert_eq!(
            get_substitute("ginger garlic paste", DietMode::Jain),
            "green chilli paste with asafoetida (hing)"
        );

        assert_eq!(
            get_substitute("dragon fruit", DietMode::Jain),
            "Please check Jain diet guidelines for substitute"
        );
        assert!(get_substitute("chicken", DietMode::PureVeg).contains("paneer"));
    }

    #[test]
    fn test_diet_mode_parsing() {
        assert_eq!("jain".parse::<DietMode>(), Ok(DietMode::Jain));
        assert_eq!("Pure_Veg".parse::<DietMode>(), Ok(DietMode::PureVeg));
        assert_eq!("health".parse::<DietMode>(), Ok(DietMode::Health));
        assert!("keto".parse::<DietMode>().is_err());
    }
}
