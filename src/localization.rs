//! # Localization Module
//!
//! Fluent message catalogue for the assistant's replies. English and
//! Hinglish resources are compiled into the binary; a key missing from the
//! Hinglish catalogue falls back to English.

use crate::config::LanguageMode;
use anyhow::{anyhow, Context, Result};
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use log::warn;
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

const EN_MESSAGES: &str = include_str!("../locales/en/main.ftl");
const HI_MESSAGES: &str = include_str!("../locales/hi/main.ftl");

/// Localization manager owned by a session
pub struct LocalizationManager {
    bundles: HashMap<&'static str, FluentBundle<FluentResource>>,
}

impl std::fmt::Debug for LocalizationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut locales: Vec<&&str> = self.bundles.keys().collect();
        locales.sort();
        f.debug_struct("LocalizationManager")
            .field("locales", &locales)
            .finish()
    }
}

impl LocalizationManager {
    /// Create a manager with the built-in English and Hinglish catalogues
    pub fn new() -> Result<Self> {
        let mut bundles = HashMap::new();
        for (locale, source) in [("en", EN_MESSAGES), ("hi", HI_MESSAGES)] {
            bundles.insert(locale, Self::create_bundle(locale, source)?);
        }
        Ok(Self { bundles })
    }

    /// Create a fluent bundle for a specific locale
    fn create_bundle(locale: &str, source: &str) -> Result<FluentBundle<FluentResource>> {
        let langid: LanguageIdentifier = locale
            .parse()
            .with_context(|| format!("Invalid locale '{locale}'"))?;
        let mut bundle = FluentBundle::new(vec![langid]);
        // plain text output, no Unicode isolation marks around arguments
        bundle.set_use_isolating(false);

        let resource = FluentResource::try_new(source.to_string())
            .map_err(|(_, errors)| anyhow!("Failed to parse {locale} messages: {errors:?}"))?;
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow!("Duplicate {locale} messages: {errors:?}"))?;

        Ok(bundle)
    }

    /// Whether `key` exists in the catalogue for `language`
    pub fn has_message(&self, language: LanguageMode, key: &str) -> bool {
        self.bundles
            .get(language.locale())
            .is_some_and(|bundle| bundle.has_message(key))
    }

    fn format(
        &self,
        locale: &str,
        key: &str,
        args: Option<&FluentArgs>,
    ) -> Option<String> {
        let bundle = self.bundles.get(locale)?;
        let pattern = bundle.get_message(key)?.value()?;

        let mut value = String::new();
        let mut errors = vec![];
        if bundle
            .write_pattern(&mut value, pattern, args, &mut errors)
            .is_err()
        {
            return None;
        }
        if !errors.is_empty() {
            warn!("Formatting '{}' in {}: {:?}", key, locale, errors);
        }
        Some(value)
    }

    /// Get a localized message
    ///
    /// Falls back to English, then to a visible placeholder, so a reply is
    /// always produced.
    pub fn get_message(&self, language: LanguageMode, key: &str, args: Option<&FluentArgs>) -> String {
        self.format(language.locale(), key, args)
            .or_else(|| {
                if language != LanguageMode::English {
                    warn!("Missing {} translation for '{}'", language, key);
                }
                self.format(LanguageMode::English.locale(), key, args)
            })
            .unwrap_or_else(|| format!("Missing translation: {key}"))
    }

    /// Get a localized message with simple string arguments
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kitchenmate::config::LanguageMode;
    /// use kitchenmate::localization::LocalizationManager;
    ///
    /// let messages = LocalizationManager::new().unwrap();
    /// let reply = messages.get_message_with_args(
    ///     LanguageMode::English,
    ///     "grocery-added",
    ///     &[("item", "ghee")],
    /// );
    /// assert!(reply.contains("ghee"));
    /// ```
    pub fn get_message_with_args(
        &self,
        language: LanguageMode,
        key: &str,
        args: &[(&str, &str)],
    ) -> String {
        let fluent_args = FluentArgs::from_iter(
            args.iter()
                .map(|(name, value)| (*name, FluentValue::from(*value))),
        );
        self.get_message(language, key, Some(&fluent_args))
    }

    /// Shorthand for messages without arguments
    pub fn t(&self, language: LanguageMode, key: &str) -> String {
        self.get_message(language, key, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogues_load() {
        let manager = LocalizationManager::new().unwrap();
        assert!(manager.has_message(LanguageMode::English, "welcome"));
        assert!(manager.has_message(LanguageMode::Hinglish, "welcome"));
    }

    #[test]
    fn test_arguments_are_not_isolated() {
        let manager = LocalizationManager::new().unwrap();
        let reply = manager.get_message_with_args(
            LanguageMode::English,
            "step",
            &[("number", "2"), ("total", "5"), ("text", "Add rice")],
        );
        assert_eq!(reply, "Step 2 of 5: Add rice");
    }

    #[test]
    fn test_missing_key_placeholder() {
        let manager = LocalizationManager::new().unwrap();
        assert_eq!(
            manager.t(LanguageMode::Hinglish, "no-such-key"),
            "Missing translation: no-such-key"
        );
    }

    #[test]
    fn test_languages_differ() {
        let manager = LocalizationManager::new().unwrap();
        assert_ne!(
            manager.t(LanguageMode::English, "already-first"),
            manager.t(LanguageMode::Hinglish, "already-first")
        );
    }
}
