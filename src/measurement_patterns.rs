//! # Measurement Patterns Module
//!
//! This module contains the regex patterns used to find recipe sections,
//! split them into segments and pull `(quantity, name)` pairs out of each
//! segment.
//!
//! Candidate patterns are anchored and run per segment, so the segment
//! splitter does the job a trailing lookahead would otherwise do.

use lazy_static::lazy_static;
use regex::Regex;

/// Units accepted directly after a numeric quantity. Longer spellings come
/// first so alternation picks "grams" over "g".
pub const UNIT_PATTERN: &str = r"kg|grams|gram|g|ml|liters|liter|litres|litre|l|pcs|pc|pieces|piece|tsp|teaspoons|teaspoon|tbsp|tablespoons|tablespoon|cups|cup|packets|packet|pack|medium|large|small";

/// Word quantifiers accepted before a name
pub const QUALITATIVE_PREFIX_PATTERN: &str = r"a pinch of|a handful of|pinch of|handful of|half|quarter|a|one|two|three|four|five|six|seven|eight|nine|ten|handful|pinch|some";

/// Qualitative markers accepted after a name
pub const QUALITATIVE_SUFFIX_PATTERN: &str =
    r"to taste|as needed|as required|a pinch|to garnish|for garnish|if needed";

lazy_static! {
    /// Heading that opens the ingredients section
    pub static ref INGREDIENTS_MARKER: Regex =
        Regex::new(r"(?i)(?:\bingredients?|\brequired items|\bwhat you need|सामग्री):?")
            .expect("Ingredients marker pattern should be valid");

    /// Heading that closes the ingredients section
    pub static ref SECTION_END_MARKER: Regex =
        Regex::new(r"(?:\bsteps?|\binstructions?|\bmethod|विधि|\bhow to make):?")
            .expect("Section end marker pattern should be valid");

    /// Heading that opens the steps section
    pub static ref STEPS_MARKER: Regex =
        Regex::new(r"(?i)(?:steps?|instructions?|method|विधि|how to make|procedure):?")
            .expect("Steps marker pattern should be valid");

    /// Separators between ingredient entries
    pub static ref SEGMENT_SPLITTER: Regex =
        Regex::new(r"[,;\n()\[\]]|\.\s|\.$")
            .expect("Segment splitter pattern should be valid");

    /// `<number>[ unit] <name>`, e.g. "500g rice", "2-3 medium tomatoes"
    pub static ref NUMERIC_QUANTITY_REGEX: Regex = Regex::new(&format!(
        r"^(?P<qty>\d+(?:\.\d+)?(?:\s*-\s*\d+(?:\.\d+)?)?)\s*(?:(?P<unit>{UNIT_PATTERN})\s+|\s)(?P<name>[a-z][\w\s\-]*)$"
    ))
    .expect("Numeric quantity pattern should be valid");

    /// `[quantifier] <name>`, e.g. "a pinch of hing", "salt"
    pub static ref QUALITATIVE_PREFIX_REGEX: Regex = Regex::new(&format!(
        r"^(?:(?P<qty>{QUALITATIVE_PREFIX_PATTERN})\s+)?(?P<name>[a-z][\w\s\-]*)$"
    ))
    .expect("Qualitative prefix pattern should be valid");

    /// `<name> <marker>`, e.g. "salt to taste"
    pub static ref QUALITATIVE_SUFFIX_REGEX: Regex = Regex::new(&format!(
        r"^(?P<name>[a-z][\w\s\-]*?)\s*(?P<qty>{QUALITATIVE_SUFFIX_PATTERN})$"
    ))
    .expect("Qualitative suffix pattern should be valid");

    /// Numbered step line: "1. Boil water" or "1) Boil water"
    pub static ref NUMBERED_STEP_REGEX: Regex =
        Regex::new(r"^\d+[.)]\s+(.+)$").expect("Numbered step pattern should be valid");

    /// Bulleted step line
    pub static ref BULLETED_STEP_REGEX: Regex =
        Regex::new(r"^[-•*]\s+(.+)$").expect("Bulleted step pattern should be valid");

    /// Lettered step line: "a) Boil water"
    pub static ref LETTERED_STEP_REGEX: Regex =
        Regex::new(r"(?i)^[a-z]\)\s+(.+)$").expect("Lettered step pattern should be valid");

    /// Blank-line paragraph separator
    pub static ref PARAGRAPH_SPLITTER: Regex =
        Regex::new(r"\n\s*\n").expect("Paragraph splitter pattern should be valid");

    /// First number in a quantity string
    pub static ref LEADING_NUMBER_REGEX: Regex =
        Regex::new(r"\d*\.?\d+").expect("Leading number pattern should be valid");
}
