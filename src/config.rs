//! # Session Configuration Module
//!
//! Diet flags, reply language, unit system and serving count for one user
//! session. The value is passed explicitly into every call that needs it.

use crate::ingredient_extractor::ExtractionConfig;
use crate::lexicon::DietMode;
use crate::quantity::UnitSystem;
use log::warn;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

pub const MIN_SERVINGS: u32 = 1;
pub const MAX_SERVINGS: u32 = 10;

/// Reply language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LanguageMode {
    #[default]
    English,
    /// Casual Hindi written in Latin script
    Hinglish,
}

impl LanguageMode {
    /// Fluent locale holding this language's messages
    pub fn locale(self) -> &'static str {
        match self {
            LanguageMode::English => "en",
            LanguageMode::Hinglish => "hi",
        }
    }
}

impl fmt::Display for LanguageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageMode::English => write!(f, "English"),
            LanguageMode::Hinglish => write!(f, "Hinglish"),
        }
    }
}

impl FromStr for LanguageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "english" | "en" => Ok(LanguageMode::English),
            "hinglish" | "hindi" | "hi" => Ok(LanguageMode::Hinglish),
            other => Err(format!("Unknown language mode: {other}")),
        }
    }
}

/// Per-session settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub jain_mode: bool,
    pub pure_veg_mode: bool,
    pub health_mode: bool,
    pub language: LanguageMode,
    pub unit_system: UnitSystem,
    servings: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            jain_mode: false,
            pure_veg_mode: false,
            health_mode: false,
            language: LanguageMode::English,
            unit_system: UnitSystem::Metric,
            servings: MIN_SERVINGS,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read `key`, falling back to `default` when unset or unparseable
fn env_or<T>(key: &str, default: T, parse: impl Fn(&str) -> Option<T>) -> T {
    match env::var(key) {
        Ok(raw) => parse(&raw).unwrap_or_else(|| {
            warn!("Ignoring unparseable {}={:?}", key, raw);
            default
        }),
        Err(_) => default,
    }
}

impl SessionConfig {
    /// Load from `KITCHEN_*` environment variables
    ///
    /// Missing variables keep their defaults; unparseable ones are logged
    /// and ignored.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let mut config = Self {
            jain_mode: env_or("KITCHEN_JAIN_MODE", defaults.jain_mode, parse_flag),
            pure_veg_mode: env_or("KITCHEN_PURE_VEG_MODE", defaults.pure_veg_mode, parse_flag),
            health_mode: env_or("KITCHEN_HEALTH_MODE", defaults.health_mode, parse_flag),
            language: env_or("KITCHEN_LANGUAGE", defaults.language, |raw| raw.parse().ok()),
            unit_system: env_or("KITCHEN_UNIT_SYSTEM", defaults.unit_system, |raw| {
                raw.parse().ok()
            }),
            servings: defaults.servings,
        };
        config.set_servings(env_or("KITCHEN_SERVINGS", defaults.servings, |raw| {
            raw.trim().parse().ok()
        }));
        config
    }

    pub fn servings(&self) -> u32 {
        self.servings
    }

    /// Set the serving count, clamped to `1..=10`. Returns the stored value.
    pub fn set_servings(&mut self, servings: u32) -> u32 {
        self.servings = servings.clamp(MIN_SERVINGS, MAX_SERVINGS);
        self.servings
    }

    /// Active diet modes in annotation order
    pub fn active_diets(&self) -> Vec<DietMode> {
        DietMode::ALL
            .iter()
            .copied()
            .filter(|diet| self.is_active(*diet))
            .collect()
    }

    pub fn is_active(&self, diet: DietMode) -> bool {
        match diet {
            DietMode::Jain => self.jain_mode,
            DietMode::PureVeg => self.pure_veg_mode,
            DietMode::Health => self.health_mode,
        }
    }

    pub fn set_diet(&mut self, diet: DietMode, enabled: bool) {
        match diet {
            DietMode::Jain => self.jain_mode = enabled,
            DietMode::PureVeg => self.pure_veg_mode = enabled,
            DietMode::Health => self.health_mode = enabled,
        }
    }

    /// Apply a profile diet preference ("Jain", "Pure Veg", "Vegan", ...).
    ///
    /// Jain implies pure veg. Unknown preferences change nothing and
    /// return false.
    pub fn apply_diet_preference(&mut self, preference: &str) -> bool {
        match preference.trim().to_lowercase().as_str() {
            "jain" => {
                self.jain_mode = true;
                self.pure_veg_mode = true;
            }
            "pure veg" | "pureveg" | "vegetarian" | "veg" | "vegan" => {
                self.pure_veg_mode = true;
            }
            "healthy" | "health" => {
                self.health_mode = true;
            }
            _ => return false,
        }
        true
    }

    /// Extraction settings: only Jain mode filters while extracting
    pub fn extraction_config(&self) -> ExtractionConfig {
        ExtractionConfig {
            diet_filter: self.jain_mode.then_some(DietMode::Jain),
            ..ExtractionConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_servings_clamped() {
        let mut config = SessionConfig::default();
        assert_eq!(config.set_servings(0), 1);
        assert_eq!(config.set_servings(4), 4);
        assert_eq!(config.set_servings(25), 10);
    }

    #[test]
    fn test_active_diets_in_order() {
        let mut config = SessionConfig::default();
        assert!(config.active_diets().is_empty());
        config.set_diet(DietMode::Health, true);
        config.set_diet(DietMode::Jain, true);
        assert_eq!(config.active_diets(), vec![DietMode::Jain, DietMode::Health]);
    }

    #[test]
    fn test_diet_preferences() {
        let mut config = SessionConfig::default();
        assert!(config.apply_diet_preference("Jain"));
        assert!(config.jain_mode && config.pure_veg_mode);

        let mut config = SessionConfig::default();
        assert!(config.apply_diet_preference("Vegan"));
        assert!(config.pure_veg_mode && !config.jain_mode);

        assert!(!config.apply_diet_preference("keto"));
    }

    #[test]
    fn test_extraction_filter_follows_jain() {
        let mut config = SessionConfig::default();
        config.pure_veg_mode = true;
        assert_eq!(config.extraction_config().diet_filter, None);
        config.jain_mode = true;
        assert_eq!(config.extraction_config().diet_filter, Some(DietMode::Jain));
    }

    #[test]
    fn test_language_parse() {
        assert_eq!("Hinglish".parse::<LanguageMode>(), Ok(LanguageMode::Hinglish));
        assert_eq!(" en ".parse::<LanguageMode>(), Ok(LanguageMode::English));
        assert!("klingon".parse::<LanguageMode>().is_err());
    }

    #[test]
    fn test_flags() {
        assert_eq!(parse_flag("ON"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
