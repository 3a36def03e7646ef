//! Slash command and context-menu handlers.
//!
//! Every command defers its reply first, since the translation service may take longer
//! than Discord's three-second acknowledgement window, then edits the deferred reply.

use serenity::all::{
    CommandInteraction, Context, EditInteractionResponse, Interaction, ResolvedTarget,
    ResolvedValue,
};

use crate::server::{
    bot::command::{
        already_in_reply, error_reply, language_set_reply, translated_reply, SET_LANGUAGE,
        TRANSLATE, TRANSLATE_MESSAGE,
    },
    error::AppError,
    service::translation::{MessageTranslation, TranslationService},
};

/// Handle an interaction, ignoring anything other than application commands
pub async fn handle_interaction(
    translation: &TranslationService,
    ctx: Context,
    interaction: Interaction,
) {
    let Interaction::Command(command) = interaction else {
        return;
    };

    let name = command.data.name.clone();
    if let Err(e) = handle_command(translation, &ctx, &command).await {
        tracing::error!("Failed to answer /{}: {}", name, e);
    }
}

async fn handle_command(
    translation: &TranslationService,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let reply = match command.data.name.as_str() {
        SET_LANGUAGE | TRANSLATE | TRANSLATE_MESSAGE => {
            command.defer(&ctx.http).await?;
            command_reply(translation, command).await
        }
        other => {
            tracing::debug!("Ignoring unknown command {}", other);
            return Ok(());
        }
    };

    command
        .edit_response(&ctx.http, EditInteractionResponse::new().content(reply))
        .await?;

    Ok(())
}

async fn command_reply(translation: &TranslationService, command: &CommandInteraction) -> String {
    let user_id = command.user.id.get();

    match command.data.name.as_str() {
        SET_LANGUAGE => {
            let language = string_option(command, "language").unwrap_or_default();
            match translation.set_language(user_id, &language).await {
                Ok(language) => language_set_reply(&language),
                Err(e) => error_reply(&e, "text"),
            }
        }
        TRANSLATE => {
            let text = string_option(command, "text").unwrap_or_default();
            let target = string_option(command, "language");

            tracing::info!("Translating text for user {}", user_id);
            match translation
                .translate_text(user_id, &text, target.as_deref())
                .await
            {
                Ok(translated) => translated_reply(&translated),
                Err(e) => error_reply(&e, "text"),
            }
        }
        _ => {
            let Some(ResolvedTarget::Message(message)) = command.data.target() else {
                return "⚠️ No message to translate.".to_string();
            };

            match translation.translate_message(user_id, &message.content).await {
                Ok(MessageTranslation::Translated(translated)) => translated_reply(&translated),
                Ok(MessageTranslation::AlreadyInTarget(language)) => already_in_reply(&language),
                Err(e) => error_reply(&e, "message"),
            }
        }
    }
}

fn string_option(command: &CommandInteraction, name: &str) -> Option<String> {
    command
        .data
        .options()
        .into_iter()
        .find(|option| option.name == name)
        .and_then(|option| match option.value {
            ResolvedValue::String(value) => Some(value.to_string()),
            _ => None,
        })
}
