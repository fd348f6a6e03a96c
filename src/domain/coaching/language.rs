//! Supported response languages and their model directives.
//!
//! The assistant can answer in four languages. Each carries a fixed
//! directive sentence that is appended to system instructions so the model
//! responds in the user's language regardless of the prompt language.

use serde::{Deserialize, Serialize};

/// Text rendering direction for a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

/// A supported response language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    De,
    Ar,
    Fr,
}

impl Language {
    /// All supported languages.
    pub const ALL: [Language; 4] = [Language::En, Language::De, Language::Ar, Language::Fr];

    /// ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
            Language::Ar => "ar",
            Language::Fr => "fr",
        }
    }

    /// Native display name, as offered on the onboarding form.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::De => "Deutsch",
            Language::Ar => "العربية (Arabic)",
            Language::Fr => "Français",
        }
    }

    /// Fixed instruction sentence telling the model which language to answer in.
    pub fn directive(&self) -> &'static str {
        match self {
            Language::En => "Respond in English.",
            Language::De => "Antworte auf Deutsch.",
            Language::Ar => "Respond in Arabic (العربية). Use proper Arabic script.",
            Language::Fr => "Répondez en français.",
        }
    }

    /// Rendering direction for UI layers.
    pub fn text_direction(&self) -> TextDirection {
        match self {
            Language::Ar => TextDirection::Rtl,
            _ => TextDirection::Ltr,
        }
    }

    /// Resolves a language code. Total: unknown or empty codes map to English.
    pub fn from_code(code: &str) -> Language {
        match code.trim().to_ascii_lowercase().as_str() {
            "de" => Language::De,
            "ar" => Language::Ar,
            "fr" => Language::Fr,
            _ => Language::En,
        }
    }

    /// Resolves a display name as collected by the onboarding form.
    /// Total: unrecognized names map to English.
    pub fn from_name(name: &str) -> Language {
        Language::ALL
            .iter()
            .copied()
            .find(|lang| lang.display_name() == name.trim())
            .unwrap_or(Language::En)
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::En
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_maps_onboarding_options() {
        assert_eq!(Language::from_name("English"), Language::En);
        assert_eq!(Language::from_name("Deutsch"), Language::De);
        assert_eq!(Language::from_name("العربية (Arabic)"), Language::Ar);
        assert_eq!(Language::from_name("Français"), Language::Fr);
    }

    #[test]
    fn from_name_defaults_to_english() {
        assert_eq!(Language::from_name("Klingon"), Language::En);
        assert_eq!(Language::from_name(""), Language::En);
    }

    #[test]
    fn from_code_is_total() {
        assert_eq!(Language::from_code("de"), Language::De);
        assert_eq!(Language::from_code("DE"), Language::De);
        assert_eq!(Language::from_code("xx"), Language::En);
        assert_eq!(Language::from_code(""), Language::En);
    }

    #[test]
    fn arabic_is_right_to_left() {
        assert_eq!(Language::Ar.text_direction(), TextDirection::Rtl);
        assert_eq!(Language::De.text_direction(), TextDirection::Ltr);
    }

    #[test]
    fn directives_are_nonempty_and_distinct() {
        for lang in Language::ALL {
            assert!(!lang.directive().is_empty());
        }
        assert_ne!(Language::En.directive(), Language::De.directive());
    }

    #[test]
    fn serializes_as_lowercase_code() {
        assert_eq!(serde_json::to_string(&Language::De).unwrap(), "\"de\"");
        let back: Language = serde_json::from_str("\"ar\"").unwrap();
        assert_eq!(back, Language::Ar);
    }
}
