//! # Ingredient Extractor Module
//!
//! Turns free recipe text (chat replies, video transcripts, scraped pages)
//! into a deduplicated list of [`IngredientCandidate`]s.
//!
//! ## Pipeline
//!
//! 1. Lower-case and trim the text
//! 2. Isolate the ingredients section between an "ingredients:" heading and
//!    the following "steps/method" heading. Without a heading the whole text
//!    is used.
//! 3. Split the section into segments and run three candidate patterns over
//!    them, in order: numeric quantity, leading quantifier, trailing marker
//! 4. Clean every name and drop it when it is too short, too long or matches
//!    any rejection rule
//! 5. Drop names incompatible with the configured diet
//! 6. Keep the first occurrence of each name
//!
//! Rejection takes precedence over lexicon membership. The lexicon is only
//! consulted when [`ExtractionConfig::require_known_ingredient`] is set.

use crate::ingredient_model::{IngredientCandidate, AS_NEEDED};
use crate::lexicon::{is_diet_compatible, is_known_ingredient, DietMode};
use crate::measurement_patterns::{
    INGREDIENTS_MARKER, NUMERIC_QUANTITY_REGEX, QUALITATIVE_PREFIX_REGEX,
    QUALITATIVE_SUFFIX_REGEX, SECTION_END_MARKER, SEGMENT_SPLITTER,
};
use crate::rejection::rejection_reason;
use log::{debug, info, trace};
use std::collections::HashSet;

/// Shortest accepted ingredient name, in characters
pub const MIN_NAME_LENGTH: usize = 3;

/// Filler words stripped from the start of a name (first match only)
const FILLER_PREFIXES: &[&str] = &["of ", "a ", "an ", "some "];

/// Configuration options for ingredient extraction
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Drop candidates that fail this diet's compatibility check
    pub diet_filter: Option<DietMode>,
    /// Additionally drop names that are not in the lexicon
    pub require_known_ingredient: bool,
    /// Names longer than this (in characters) are rejected
    pub max_name_length: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            diet_filter: None,
            require_known_ingredient: false,
            max_name_length: 60,
        }
    }
}

/// Rule-based ingredient extractor
#[derive(Debug, Clone, Default)]
pub struct IngredientExtractor {
    config: ExtractionConfig,
}

/// Which candidate pattern produced a raw pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CandidatePattern {
    NumericQuantity,
    QualitativePrefix,
    QualitativeSuffix,
}

const PATTERN_ORDER: [CandidatePattern; 3] = [
    CandidatePattern::NumericQuantity,
    CandidatePattern::QualitativePrefix,
    CandidatePattern::QualitativeSuffix,
];

impl IngredientExtractor {
    /// Create an extractor with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom configuration
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kitchenmate::ingredient_extractor::{ExtractionConfig, IngredientExtractor};
    /// use kitchenmate::lexicon::DietMode;
    ///
    /// let extractor = IngredientExtractor::with_config(ExtractionConfig {
    ///     diet_filter: Some(DietMode::Jain),
    ///     ..Default::default()
    /// });
    /// let found = extractor.extract("Ingredients: 1 potato, 200g rice");
    /// assert_eq!(found.len(), 1);
    /// assert_eq!(found[0].name, "rice");
    /// ```
    pub fn with_config(config: ExtractionConfig) -> Self {
        debug!(
            "Creating IngredientExtractor: diet_filter={:?}, require_known={}, max_length={}",
            config.diet_filter, config.require_known_ingredient, config.max_name_length
        );
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract ingredient candidates from free text
    ///
    /// # Arguments
    ///
    /// * `text` - Raw recipe text of any length and casing
    ///
    /// # Returns
    ///
    /// Candidates in discovery order, unique by name. An empty vector means
    /// "no ingredients detected" and is not an error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kitchenmate::ingredient_extractor::IngredientExtractor;
    ///
    /// let extractor = IngredientExtractor::new();
    /// let found = extractor.extract("Ingredients: 2 chopped onion, 500g rice\nSteps: 1. Cook");
    ///
    /// assert_eq!(found.len(), 1);
    /// assert_eq!(found[0].name, "rice");
    /// assert_eq!(found[0].quantity, "500 g");
    /// ```
    pub fn extract(&self, text: &str) -> Vec<IngredientCandidate> {
        let normalized = text.trim().to_lowercase();
        if normalized.is_empty() {
            debug!("Empty text, nothing to extract");
            return Vec::new();
        }

        let section = isolate_ingredient_section(&normalized);
        let segments = split_segments(section);
        debug!("Ingredient section split into {} segments", segments.len());

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for pattern in PATTERN_ORDER {
            for segment in &segments {
                let Some((quantity, raw_name)) = match_segment(pattern, segment) else {
                    continue;
                };

                let Some(name) = self.accept_name(&raw_name) else {
                    continue;
                };

                if seen.insert(name.clone()) {
                    trace!("{:?} matched '{}' -> {} ({})", pattern, segment, name, quantity);
                    candidates.push(IngredientCandidate::new(&name).with_quantity(&quantity));
                }
            }
        }

        info!("Extracted {} ingredient candidates", candidates.len());
        candidates
    }

    /// Clean a raw name and run the acceptance checks.
    ///
    /// Returns the cleaned name, or `None` when the name must be dropped.
    fn accept_name(&self, raw_name: &str) -> Option<String> {
        let name = clean_name(raw_name);

        if name.chars().count() < MIN_NAME_LENGTH {
            trace!("Dropping '{}': too short", name);
            return None;
        }

        if let Some(reason) = rejection_reason(&name) {
            trace!("Dropping '{}': {}", name, reason);
            return None;
        }

        if name.chars().count() > self.config.max_name_length {
            debug!(
                "Dropping '{}': longer than {} characters",
                name, self.config.max_name_length
            );
            return None;
        }

        if self.config.require_known_ingredient && !is_known_ingredient(&name) {
            trace!("Dropping '{}': not in lexicon", name);
            return None;
        }

        if let Some(diet) = self.config.diet_filter {
            if !is_diet_compatible(&name, diet) {
                debug!("Dropping '{}': not compatible with {} diet", name, diet);
                return None;
            }
        }

        Some(name)
    }
}

/// Extract candidates with an optional diet filter and default settings
///
/// # Examples
///
/// ```rust
/// use kitchenmate::ingredient_extractor::extract_ingredients;
///
/// let found = extract_ingredients("Ingredients: salt to taste, 1 cup milk", None);
/// assert!(found.iter().any(|c| c.name == "salt" && c.quantity == "to taste"));
/// assert!(found.iter().any(|c| c.name == "milk" && c.quantity == "1 cup"));
/// ```
pub fn extract_ingredients(text: &str, diet_mode: Option<DietMode>) -> Vec<IngredientCandidate> {
    IngredientExtractor::with_config(ExtractionConfig {
        diet_filter: diet_mode,
        ..Default::default()
    })
    .extract(text)
}

/// Return the span between the ingredients heading and the next
/// steps/method heading.
///
/// Without an ingredients heading the whole text is returned. Expects
/// already lower-cased input.
pub fn isolate_ingredient_section(text: &str) -> &str {
    let Some(start) = INGREDIENTS_MARKER.find(text) else {
        trace!("No ingredients heading, using the whole text");
        return text;
    };

    let rest = &text[start.end()..];
    match SECTION_END_MARKER.find(rest) {
        Some(end) => &rest[..end.start()],
        None => rest,
    }
}

/// Split a section into trimmed, bullet-free, non-empty segments
fn split_segments(section: &str) -> Vec<&str> {
    SEGMENT_SPLITTER
        .split(section)
        .map(|segment| {
            segment
                .trim()
                .trim_start_matches(['-', '•', '*'])
                .trim()
        })
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Run one candidate pattern over a segment, yielding `(quantity, name)`
fn match_segment(pattern: CandidatePattern, segment: &str) -> Option<(String, String)> {
    match pattern {
        CandidatePattern::NumericQuantity => {
            let caps = NUMERIC_QUANTITY_REGEX.captures(segment)?;
            let number = caps.name("qty").map_or("", |m| m.as_str());
            let unit = caps.name("unit").map_or("", |m| m.as_str());
            let quantity = format!("{} {}", number, unit).trim().to_string();
            Some((quantity, caps["name"].to_string()))
        }
        CandidatePattern::QualitativePrefix => {
            let caps = QUALITATIVE_PREFIX_REGEX.captures(segment)?;
            let quantity = caps
                .name("qty")
                .map(|m| m.as_str().trim_end_matches(" of").to_string())
                .unwrap_or_else(|| AS_NEEDED.to_string());
            Some((quantity, caps["name"].to_string()))
        }
        CandidatePattern::QualitativeSuffix => {
            let caps = QUALITATIVE_SUFFIX_REGEX.captures(segment)?;
            Some((caps["qty"].to_string(), caps["name"].to_string()))
        }
    }
}

/// Strip one filler prefix and collapse whitespace
fn clean_name(raw_name: &str) -> String {
    let mut name = raw_name.trim();

    for prefix in FILLER_PREFIXES {
        if let Some(stripped) = name.strip_prefix(prefix) {
            name = stripped.trim_start();
            break; // Only remove one prefix
        }
    }

    name.trim_end_matches('-')
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}
