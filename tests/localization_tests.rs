//! # Localization Tests
//!
//! Message lookup and formatting across both reply languages, including the
//! English fallback and the placeholder for unknown keys.

use kitchenmate::config::LanguageMode;
use kitchenmate::localization::LocalizationManager;

#[cfg(test)]
mod tests {
    use super::*;

    const LANGUAGES: [LanguageMode; 2] = [LanguageMode::English, LanguageMode::Hinglish];

    fn setup_localization() -> LocalizationManager {
        LocalizationManager::new().expect("Failed to create localization manager")
    }

    #[test]
    fn test_every_reply_key_exists_in_both_languages() {
        let manager = setup_localization();
        let keys = [
            "welcome", "help", "no-recipe", "check-missing", "check-all-available",
            "step", "already-first", "cooking-complete", "cooking-exit",
            "invalid-command", "unknown-command", "grocery-added", "goodbye",
        ];

        for language in LANGUAGES {
            for key in keys {
                assert!(manager.has_message(language, key), "{key} missing for {language}");
            }
        }
    }

    #[test]
    fn test_arguments_are_substituted() {
        let manager = setup_localization();

        for language in LANGUAGES {
            let message = manager.get_message_with_args(
                language,
                "check-missing",
                &[("items", "ghee, saffron")],
            );
            assert!(message.contains("ghee, saffron"), "{message}");
            assert!(!message.contains('{'), "{message}");
        }
    }

    #[test]
    fn test_no_isolation_marks() {
        let manager = setup_localization();
        let message = manager.get_message_with_args(
            LanguageMode::English,
            "grocery-added",
            &[("item", "ghee")],
        );

        assert_eq!(message, "Added ghee to the grocery list.");
        assert!(!message.contains('\u{2068}'));
    }

    #[test]
    fn test_unknown_key_placeholder() {
        let manager = setup_localization();

        for language in LANGUAGES {
            assert!(!manager.has_message(language, "no-such-key"));
            assert_eq!(
                manager.t(language, "no-such-key"),
                "Missing translation: no-such-key"
            );
        }
    }

    #[test]
    fn test_languages_differ() {
        let manager = setup_localization();
        assert_ne!(
            manager.t(LanguageMode::English, "cooking-complete"),
            manager.t(LanguageMode::Hinglish, "cooking-complete")
        );
    }

    #[test]
    fn test_help_lists_cooking_commands() {
        let manager = setup_localization();
        let help = manager.t(LanguageMode::English, "help");

        for command in ["next", "previous", "repeat", "start timer", "add missing"] {
            assert!(help.contains(command), "help is missing '{command}'");
        }
    }
}
