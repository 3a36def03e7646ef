//! Translation service payloads and the supported-language allow-list.

use serde::{Deserialize, Serialize};

/// Language codes accepted by the translation service.
///
/// Requests for any other code are rejected before the service is called.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "ar", "bg", "ca", "cs", "da", "de", "el", "en", "es", "et", "fa", "fi", "fr", "ga", "gl",
    "he", "hi", "hu", "id", "it", "ja", "ko", "lt", "lv", "ms", "nb", "nl", "pb", "pl", "pt",
    "ro", "ru", "sk", "sl", "sq", "sv", "th", "tl", "tr", "uk", "zh", "zt",
];

/// Language used for message translation when the user has no stored preference.
pub const DEFAULT_TARGET_LANGUAGE: &str = "en";

/// Whether `code` is on the allow-list. Comparison is case-insensitive.
pub fn is_supported_language(code: &str) -> bool {
    let code = code.trim().to_lowercase();
    SUPPORTED_LANGUAGES.contains(&code.as_str())
}

/// Comma-separated allow-list for user-facing error replies.
pub fn supported_languages_list() -> String {
    SUPPORTED_LANGUAGES.join(", ")
}

#[derive(Debug, Clone, Serialize)]
pub struct DetectRequestDto<'a> {
    pub q: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetectionDto {
    pub language: String,
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranslateRequestDto<'a> {
    pub q: &'a str,
    pub source: &'a str,
    pub target: &'a str,
    pub format: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranslateResponseDto {
    #[serde(rename = "translatedText")]
    pub translated_text: String,
}

/// Result of a successful translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub source: String,
    pub target: String,
    pub text: String,
}
