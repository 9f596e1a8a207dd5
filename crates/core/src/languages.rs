//! Supported content languages.
//!
//! The language list is process-wide configuration: parsed once at startup
//! (see `SUPPORTED_LANGUAGES` in the API config) and shared read-only. Order
//! matters: it is the order in which missing translations are reported and
//! the first entry is the default language of the public site.

use serde::Serialize;

use crate::error::CoreError;

/// Language list used when `SUPPORTED_LANGUAGES` is not set.
pub const DEFAULT_LANGUAGES: &[&str] = &["en", "ka", "ru"];

/// Minimum length of a language code (ISO 639-1).
const MIN_CODE_LEN: usize = 2;

/// Maximum length of a language code (ISO 639-2/3).
const MAX_CODE_LEN: usize = 3;

/// An ordered, duplicate-free, non-empty list of language codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SupportedLanguages {
    codes: Vec<String>,
}

impl SupportedLanguages {
    /// Build from an iterator of codes. Duplicates are dropped, keeping the
    /// first occurrence.
    pub fn new<I, S>(codes: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        for code in codes {
            let code = code.as_ref().trim();
            validate_code(code)?;
            if !unique.iter().any(|c| c == code) {
                unique.push(code.to_string());
            }
        }

        if unique.is_empty() {
            return Err(CoreError::Validation(
                "At least one supported language is required".to_string(),
            ));
        }

        Ok(Self { codes: unique })
    }

    /// Parse a comma-separated list such as `"en, ka,ru"`. Empty segments
    /// are ignored.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        Self::new(raw.split(',').map(str::trim).filter(|s| !s.is_empty()))
    }

    /// All codes in configured order.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    /// The first configured language.
    pub fn default_language(&self) -> &str {
        &self.codes[0]
    }

    /// Reject codes that are not in the supported set.
    pub fn validate(&self, code: &str) -> Result<(), CoreError> {
        if self.contains(code) {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "Unsupported language '{code}'. Must be one of: {}",
                self.codes.join(", ")
            )))
        }
    }
}

impl Default for SupportedLanguages {
    fn default() -> Self {
        Self {
            codes: DEFAULT_LANGUAGES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// A language code is 2-3 lowercase ASCII letters.
fn validate_code(code: &str) -> Result<(), CoreError> {
    let valid_len = (MIN_CODE_LEN..=MAX_CODE_LEN).contains(&code.len());
    if valid_len && code.bytes().all(|b| b.is_ascii_lowercase()) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid language code '{code}': expected {MIN_CODE_LEN}-{MAX_CODE_LEN} lowercase letters"
        )))
    }
}
