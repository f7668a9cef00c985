//! # Step Extractor Module
//!
//! Pulls an ordered list of cooking instructions out of recipe text.
//!
//! The steps section starts at a "steps", "instructions", "method" or "how
//! to make" heading. Inside it, numbered lines win over bulleted lines,
//! which win over lettered lines; the first style with at least one match
//! is used. Without any list style the section is split into blank-line
//! separated paragraphs.

use crate::measurement_patterns::{
    BULLETED_STEP_REGEX, INGREDIENTS_MARKER, LETTERED_STEP_REGEX, NUMBERED_STEP_REGEX,
    PARAGRAPH_SPLITTER, STEPS_MARKER,
};
use log::{debug, trace};
use regex::Regex;

/// Longest step sequence returned; extra steps are dropped
pub const MAX_STEPS: usize = 15;

/// Extract cooking steps in order
///
/// # Arguments
///
/// * `text` - Raw recipe text
///
/// # Returns
///
/// Up to [`MAX_STEPS`] trimmed steps. An empty vector means no steps
/// heading was found or the section was empty.
///
/// # Examples
///
/// ```rust
/// use kitchenmate::step_extractor::extract_steps;
///
/// let steps = extract_steps("Steps:\n1. Boil water\n2. Add rice\n3. Simmer 15 minutes");
/// assert_eq!(steps, vec!["Boil water", "Add rice", "Simmer 15 minutes"]);
///
/// assert!(extract_steps("just a chat message").is_empty());
/// ```
pub fn extract_steps(text: &str) -> Vec<String> {
    let Some(section) = steps_section(text) else {
        debug!("No steps heading found");
        return Vec::new();
    };

    let list_styles: [(&str, &Regex); 3] = [
        ("numbered", &*NUMBERED_STEP_REGEX),
        ("bulleted", &*BULLETED_STEP_REGEX),
        ("lettered", &*LETTERED_STEP_REGEX),
    ];

    let mut steps = list_styles
        .iter()
        .find_map(|(style, pattern)| {
            let found = match_list_lines(section, pattern);
            if found.is_empty() {
                None
            } else {
                trace!("Using {} steps ({} found)", style, found.len());
                Some(found)
            }
        })
        .unwrap_or_else(|| {
            trace!("No list style matched, splitting paragraphs");
            PARAGRAPH_SPLITTER
                .split(section)
                .map(str::trim)
                .filter(|paragraph| !paragraph.is_empty())
                .map(str::to_string)
                .collect()
        });

    if steps.len() > MAX_STEPS {
        debug!("Truncating {} steps to {}", steps.len(), MAX_STEPS);
        steps.truncate(MAX_STEPS);
    }

    steps
}

/// Text after the steps heading.
///
/// A heading after the ingredients heading is preferred so that a title
/// like "How to make dal" does not swallow the ingredient list.
fn steps_section(text: &str) -> Option<&str> {
    let search_from = INGREDIENTS_MARKER.find(text).map_or(0, |m| m.end());

    let heading = STEPS_MARKER
        .find_at(text, search_from)
        .or_else(|| STEPS_MARKER.find(text))?;

    Some(text[heading.end()..].trim())
}

fn match_list_lines(section: &str, pattern: &Regex) -> Vec<String> {
    section
        .lines()
        .filter_map(|line| pattern.captures(line.trim()))
        .map(|caps| caps[1].trim().to_string())
        .filter(|step| !step.is_empty())
        .collect()
}
