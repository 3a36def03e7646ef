//! Translation commands backed by a LibreTranslate-compatible service.
//!
//! Target languages are validated against the allow-list before any request is made.
//! Detected source languages outside the allow-list are rejected as well, since the
//! service cannot translate from them.

use std::{sync::Arc, time::Duration};

use crate::server::{
    data::user_language::UserLanguageRepository,
    error::AppError,
    model::translation::{
        is_supported_language, supported_languages_list, DetectRequestDto, DetectionDto,
        TranslateRequestDto, TranslateResponseDto, Translation, DEFAULT_TARGET_LANGUAGE,
    },
};

/// Outcome of translating a message through the context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageTranslation {
    Translated(Translation),
    /// The message is already in the user's language.
    AlreadyInTarget(String),
}

pub struct TranslationService {
    http: reqwest::Client,
    base_url: String,
    users: Arc<UserLanguageRepository>,
}

impl TranslationService {
    /// Creates a new TranslationService.
    ///
    /// # Arguments
    /// - `http` - Shared HTTP client
    /// - `base_url` - Translation service root, e.g. `https://libretranslate.com`
    /// - `users` - Stored language preferences
    pub fn new(
        http: reqwest::Client,
        base_url: String,
        users: Arc<UserLanguageRepository>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            users,
        }
    }

    /// Validates and stores a user's preferred language.
    ///
    /// # Returns
    /// - `Ok(String)` - Normalized language code that was stored
    /// - `Err(AppError::BadRequest)` - Code not on the allow-list
    /// - `Err(AppError)` - Preference could not be persisted
    pub async fn set_language(&self, user_id: u64, language: &str) -> Result<String, AppError> {
        let language = normalize_language(language)?;
        self.users.set(user_id, &language).await?;

        tracing::info!("Stored language {} for user {}", language, user_id);

        Ok(language)
    }

    /// Translates free text for the `/translate` command.
    ///
    /// # Arguments
    /// - `user_id` - Requesting user, for the stored preference
    /// - `text` - Text to translate
    /// - `target` - Explicit target; falls back to the stored preference, then English
    ///
    /// # Returns
    /// - `Ok(Translation)` - Translated text with source and target codes
    /// - `Err(AppError::BadRequest)` - Target or detected source not supported
    /// - `Err(AppError)` - Service call failed
    pub async fn translate_text(
        &self,
        user_id: u64,
        text: &str,
        target: Option<&str>,
    ) -> Result<Translation, AppError> {
        let target = match target {
            Some(target) => target.to_string(),
            None => self.preferred_language(user_id).await,
        };
        let target = normalize_language(&target)?;

        let source = self.detect(text).await?;
        if !is_supported_language(&source) {
            return Err(AppError::BadRequest(format!(
                "Detected language `{}` is not supported",
                source
            )));
        }

        let text = self.translate(text, &source, &target).await?;

        Ok(Translation {
            source,
            target,
            text,
        })
    }

    /// Translates an existing message into the user's preferred language.
    ///
    /// # Returns
    /// - `Ok(MessageTranslation::AlreadyInTarget)` - Detected language equals the target
    /// - `Ok(MessageTranslation::Translated)` - Translation performed
    /// - `Err(AppError)` - Unsupported language or service failure
    pub async fn translate_message(
        &self,
        user_id: u64,
        text: &str,
    ) -> Result<MessageTranslation, AppError> {
        let target = normalize_language(&self.preferred_language(user_id).await)?;

        let source = self.detect(text).await?;
        if source == target {
            return Ok(MessageTranslation::AlreadyInTarget(target));
        }
        if !is_supported_language(&source) {
            return Err(AppError::BadRequest(format!(
                "Detected language `{}` is not supported",
                source
            )));
        }

        let translated = self.translate(text, &source, &target).await?;

        Ok(MessageTranslation::Translated(Translation {
            source,
            target,
            text: translated,
        }))
    }

    async fn preferred_language(&self, user_id: u64) -> String {
        self.users
            .get(user_id)
            .await
            .unwrap_or_else(|| DEFAULT_TARGET_LANGUAGE.to_string())
    }

    /// Detects the language of `text`.
    ///
    /// # Returns
    /// - `Ok(String)` - Most likely language code, lower-cased
    /// - `Err(AppError)` - Request failed or no language was returned
    pub async fn detect(&self, text: &str) -> Result<String, AppError> {
        let detections: Vec<DetectionDto> = self
            .post(&format!("{}/detect", self.base_url), &DetectRequestDto { q: text })
            .await?;

        detections
            .into_iter()
            .next()
            .map(|detection| detection.language.to_lowercase())
            .ok_or_else(|| AppError::InternalError("Language detection returned nothing".into()))
    }

    /// Translates `text` between two supported languages.
    pub async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, AppError> {
        let response: TranslateResponseDto = self
            .post(
                &format!("{}/translate", self.base_url),
                &TranslateRequestDto {
                    q: text,
                    source,
                    target,
                    format: "text",
                },
            )
            .await?;

        Ok(response.translated_text)
    }

    async fn post<B, T>(&self, url: &str, body: &B) -> Result<T, AppError>
    where
        B: serde::Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .http
            .post(url)
            .json(body)
            .timeout(Duration::from_secs(20))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

/// Lower-cases and validates a language code.
fn normalize_language(language: &str) -> Result<String, AppError> {
    let language = language.trim().to_lowercase();

    if !is_supported_language(&language) {
        return Err(AppError::BadRequest(format!(
            "Unsupported language `{}`. Supported: {}",
            language,
            supported_languages_list()
        )));
    }

    Ok(language)
}
