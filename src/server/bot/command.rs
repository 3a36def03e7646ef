//! Slash command definitions and reply texts.
//!
//! Replies are built by plain functions so their wording can be tested without a gateway.

use serenity::all::{CommandOptionType, CommandType, CreateCommand, CreateCommandOption};

use crate::server::{
    error::AppError,
    model::translation::{supported_languages_list, Translation},
};

pub const SET_LANGUAGE: &str = "setlanguage";
pub const TRANSLATE: &str = "translate";
pub const TRANSLATE_MESSAGE: &str = "translate_message";

/// Prefix of the text command equivalent of `/setlanguage`.
pub const SET_LANG_PREFIX: &str = "!setlang ";

/// Every application command the bot registers.
pub fn commands() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new(SET_LANGUAGE)
            .description("Set your preferred translation language")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "language",
                    "Language code, e.g. en, de, fr",
                )
                .required(true),
            ),
        CreateCommand::new(TRANSLATE)
            .description("Translate text into another language")
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "text", "Text to translate")
                    .required(true),
            )
            .add_option(CreateCommandOption::new(
                CommandOptionType::String,
                "language",
                "Target language code; defaults to your preferred language",
            )),
        CreateCommand::new(TRANSLATE_MESSAGE).kind(CommandType::Message),
    ]
}

pub fn language_set_reply(language: &str) -> String {
    format!(
        "✅ Your preferred translation language is now set to **{}**.",
        language
    )
}

pub fn translated_reply(translation: &Translation) -> String {
    format!(
        "✅ Translated from `{}` to `{}`:\n> {}",
        translation.source, translation.target, translation.text
    )
}

pub fn already_in_reply(language: &str) -> String {
    format!("✅ This message is already in `{}`.", language)
}

/// Reply for a failed language command.
///
/// Validation failures are shown to the user; anything else is logged and answered with
/// a generic retry hint.
///
/// # Arguments
/// - `error` - Error returned by the translation service
/// - `what` - Object of the failed action for the generic reply, e.g. `text`
pub fn error_reply(error: &AppError, what: &str) -> String {
    match error {
        AppError::BadRequest(message) => format!("❗ {}", message),
        _ => {
            tracing::error!("Translation error: {}", error);
            format!("⚠️ Error translating {}. Please try again later.", what)
        }
    }
}

/// Reply listing the allowed codes when `!setlang` has no argument.
pub fn usage_reply() -> String {
    format!(
        "❗ Usage: `!setlang <code>`. Allowed: {}",
        supported_languages_list()
    )
}
