//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`
//!
//! Converters never read the singleton directly during a search; they copy the
//! values they need into a `ConverterConfig` when constructed.

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        // A custom TOML was validated by `init_custom`, and the embedded
        // default is validated by build.rs; fall back to the default if
        // either somehow fails so lookups never panic.
        parse_settings_toml(toml_str)
            .or_else(|_| parse_settings_toml(DEFAULT_SETTINGS_TOML))
            .unwrap_or_else(|_| Settings::builtin())
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub converter: ConverterSettings,
    pub candidates: CandidateSettings,
    pub dictionary: DictionarySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConverterSettings {
    pub clause_cost: i32,
    pub freq_learn: i32,
    pub freq_user: i32,
    pub max_input_length: usize,
    pub max_clause_length: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateSettings {
    pub max_surface_length: usize,
    pub initials_limit: usize,
    pub initials_scan_limit: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DictionarySettings {
    pub max_user_words: usize,
    pub max_learn_words: usize,
}

impl Settings {
    /// Hard-coded copy of the embedded defaults.
    fn builtin() -> Self {
        Self {
            converter: ConverterSettings {
                clause_cost: -1000,
                freq_learn: 600,
                freq_user: 500,
                max_input_length: 50,
                max_clause_length: 20,
            },
            candidates: CandidateSettings {
                max_surface_length: 50,
                initials_limit: 50,
                initials_scan_limit: 2000,
            },
            dictionary: DictionarySettings {
                max_user_words: 100,
                max_learn_words: 2000,
            },
        }
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive_usize {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    if s.converter.clause_cost >= 0 {
        return Err(SettingsError::InvalidValue {
            field: "converter.clause_cost".to_string(),
            reason: "must be negative".to_string(),
        });
    }
    if s.converter.freq_learn < 0 || s.converter.freq_user < 0 {
        return Err(SettingsError::InvalidValue {
            field: "converter.freq_learn/freq_user".to_string(),
            reason: "must be non-negative".to_string(),
        });
    }
    check_positive_usize!(converter.max_input_length);
    check_positive_usize!(converter.max_clause_length);

    check_positive_usize!(candidates.max_surface_length);
    check_positive_usize!(candidates.initials_limit);
    check_positive_usize!(candidates.initials_scan_limit);

    check_positive_usize!(dictionary.max_user_words);
    check_positive_usize!(dictionary.max_learn_words);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.converter.clause_cost, -1000);
        assert_eq!(s.converter.freq_learn, 600);
        assert_eq!(s.converter.freq_user, 500);
        assert_eq!(s.converter.max_input_length, 50);
        assert_eq!(s.converter.max_clause_length, 20);
        assert_eq!(s.dictionary.max_user_words, 100);
    }

    #[test]
    fn builtin_matches_embedded_default() {
        let parsed = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        let builtin = Settings::builtin();
        assert_eq!(parsed.converter.clause_cost, builtin.converter.clause_cost);
        assert_eq!(
            parsed.candidates.max_surface_length,
            builtin.candidates.max_surface_length
        );
        assert_eq!(
            parsed.dictionary.max_learn_words,
            builtin.dictionary.max_learn_words
        );
    }

    #[test]
    fn reject_non_negative_clause_cost() {
        let toml = DEFAULT_SETTINGS_TOML.replace("clause_cost = -1000", "clause_cost = 10");
        match parse_settings_toml(&toml) {
            Err(SettingsError::InvalidValue { field, .. }) => {
                assert_eq!(field, "converter.clause_cost");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn reject_zero_clause_length() {
        let toml =
            DEFAULT_SETTINGS_TOML.replace("max_clause_length = 20", "max_clause_length = 0");
        assert!(matches!(
            parse_settings_toml(&toml),
            Err(SettingsError::InvalidValue { .. })
        ));
    }

    #[test]
    fn reject_malformed_toml() {
        assert!(matches!(
            parse_settings_toml("[converter"),
            Err(SettingsError::Parse(_))
        ));
    }
}
