//! # Recipe Sources Module
//!
//! Text helpers for the places recipe text comes from: video links, video
//! descriptions, scraped web pages, meal-plan replies and photo scans.
//! Fetching is left to collaborators; everything here works on strings.

use lazy_static::lazy_static;
use regex::Regex;

/// Scraped page text is cut to this many characters
pub const SCRAPED_TEXT_LIMIT: usize = 5000;

/// Hosts whose links never lead to a recipe page
pub const NON_RECIPE_HOSTS: &[&str] = &[
    "instagram.com",
    "facebook.com",
    "twitter.com",
    "youtube.com",
    "youtu.be",
];

lazy_static! {
    static ref YOUTUBE_ID_PATTERNS: [Regex; 3] = [
        Regex::new(r"(?:https?://)?(?:www\.|m\.)?youtube\.com/watch\?v=([A-Za-z0-9_-]{11})")
            .expect("YouTube watch pattern should be valid"),
        Regex::new(r"(?:https?://)?(?:www\.)?youtube\.com/shorts/([A-Za-z0-9_-]{11})")
            .expect("YouTube shorts pattern should be valid"),
        Regex::new(r"(?:https?://)?youtu\.be/([A-Za-z0-9_-]{11})")
            .expect("YouTube short link pattern should be valid"),
    ];
    static ref URL_REGEX: Regex =
        Regex::new(r#"https?://[^\s<>"']+"#).expect("URL pattern should be valid");
    static ref HTML_TAG_REGEX: Regex = Regex::new(r"<[^>]+>").expect("Tag pattern should be valid");
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").expect("Whitespace pattern should be valid");
    static ref MISSING_SECTION_REGEX: Regex =
        Regex::new(r"(?is)missing ingredients:(.*)").expect("Missing section pattern should be valid");
}

/// Video id of the first YouTube link in `text`
///
/// ```rust
/// use kitchenmate::recipe_sources::youtube_video_id;
///
/// assert_eq!(
///     youtube_video_id("try https://youtu.be/dQw4w9WgXcQ tonight"),
///     Some("dQw4w9WgXcQ".to_string())
/// );
/// assert_eq!(youtube_video_id("no link here"), None);
/// ```
pub fn youtube_video_id(text: &str) -> Option<String> {
    YOUTUBE_ID_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(text))
        .map(|caps| caps[1].to_string())
}

/// Links in a video description that may point at a recipe page
pub fn recipe_links(description: &str) -> Vec<String> {
    URL_REGEX
        .find_iter(description)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ')', ']', '!']))
        .filter(|url| {
            let lowered = url.to_lowercase();
            !NON_RECIPE_HOSTS.iter().any(|host| lowered.contains(host))
        })
        .map(str::to_string)
        .collect()
}

/// Plain text of an HTML page: tags become spaces, whitespace runs
/// collapse, and the result is cut to [`SCRAPED_TEXT_LIMIT`] characters
pub fn html_to_text(html: &str) -> String {
    let without_tags = HTML_TAG_REGEX.replace_all(html, " ");
    let collapsed = WHITESPACE_REGEX.replace_all(&without_tags, " ");
    collapsed.trim().chars().take(SCRAPED_TEXT_LIMIT).collect()
}

/// Items listed after "Missing ingredients:" in a meal-plan reply,
/// one per line, lower-cased
pub fn missing_items_from_plan(plan: &str) -> Vec<String> {
    MISSING_SECTION_REGEX
        .captures(plan)
        .map(|caps| parse_item_lines(&caps[1]))
        .unwrap_or_default()
}

/// One item per non-blank line, bullets removed, lower-cased.
/// Used for photo-scan replies and plan sections.
pub fn parse_item_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim().trim_start_matches(['-', '*', '•']).trim())
        .filter(|line| !line.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_forms() {
        let cases = vec![
            "https://www.youtube.com/watch?v=abcdefghijk",
            "youtube.com/shorts/abcdefghijk",
            "http://youtu.be/abcdefghijk?t=10",
            "https://m.youtube.com/watch?v=abcdefghijk&feature=share",
        ];
        for text in cases {
            assert_eq!(
                youtube_video_id(text),
                Some("abcdefghijk".to_string()),
                "Video id in '{}'",
                text
            );
        }
        assert_eq!(youtube_video_id("https://youtube.com/watch?v=short"), None);
    }

    #[test]
    fn test_recipe_links_skip_social() {
        let description = "Full recipe: https://example.com/dal-makhani. Follow https://instagram.com/chef \
                           and https://youtu.be/abcdefghijk (more at https://blog.example.org/paneer)";
        assert_eq!(
            recipe_links(description),
            vec!["https://example.com/dal-makhani", "https://blog.example.org/paneer"]
        );
    }

    #[test]
    fn test_html_to_text() {
        let html = "<html><body><h1>Poha</h1>\n<ul><li>2 cups poha</li><li>1 onion</li></ul></body></html>";
        assert_eq!(html_to_text(html), "Poha 2 cups poha 1 onion");

        let long = format!("<p>{}</p>", "a".repeat(SCRAPED_TEXT_LIMIT * 2));
        assert_eq!(html_to_text(&long).chars().count(), SCRAPED_TEXT_LIMIT);
    }

    #[test]
    fn test_missing_items_from_plan() {
        let plan = "Day 1:\n- Breakfast: Poha\n\nMissing Ingredients:\n- Paneer\n- Oats\n\n";
        assert_eq!(missing_items_from_plan(plan), vec!["paneer", "oats"]);
        assert!(missing_items_from_plan("Day 1: Poha").is_empty());
    }

    #[test]
    fn test_item_lines() {
        assert_eq!(
            parse_item_lines("Tomato\n\n  Green Chilli \n• Coriander"),
            vec!["tomato", "green chilli", "coriander"]
        );
    }
}
