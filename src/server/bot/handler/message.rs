use serenity::all::{ChannelId, Context, Message};

use crate::server::{
    bot::{
        command::{error_reply, language_set_reply, usage_reply, SET_LANG_PREFIX},
        handler::Handler,
    },
    error::AppError,
    service::moderation::{
        extreme_alert, keyword_alert, ModerationAction, EXTREME_NOTICE, KEYWORD_NOTICE,
    },
};

/// Handle message creation in a channel
pub async fn handle_message(handler: &Handler, ctx: Context, message: Message) {
    if message.author.bot {
        return;
    }

    let action = handler
        .moderation
        .evaluate(message.channel_id.get(), &message.content);

    match action {
        ModerationAction::DeleteAndAlert => {
            if let Err(e) = handle_extreme(handler, &ctx, &message).await {
                tracing::error!("Failed to handle extreme content: {}", e);
            }
            return;
        }
        ModerationAction::NoticeAndAlert => {
            if let Err(e) = handle_keyword(handler, &ctx, &message).await {
                tracing::error!("Failed to handle keyword trigger: {}", e);
            }
        }
        ModerationAction::None => {}
    }

    if let Some(argument) = message.content.strip_prefix(SET_LANG_PREFIX) {
        let reply = match argument.split_whitespace().next() {
            Some(language) => match handler
                .translation
                .set_language(message.author.id.get(), language)
                .await
            {
                Ok(language) => language_set_reply(&language),
                Err(e) => error_reply(&e, "text"),
            },
            None => usage_reply(),
        };

        if let Err(e) = message.reply(&ctx.http, reply).await {
            tracing::error!("Failed to reply to !setlang: {}", e);
        }
    }
}

async fn handle_extreme(
    handler: &Handler,
    ctx: &Context,
    message: &Message,
) -> Result<(), AppError> {
    message.delete(&ctx.http).await?;

    if let Some(mod_channel) = handler.moderation.mod_channel_id() {
        let alert = extreme_alert(message.author.id.get(), message.channel_id.get());
        ChannelId::new(mod_channel).say(&ctx.http, alert).await?;
    }

    message.channel_id.say(&ctx.http, EXTREME_NOTICE).await?;

    Ok(())
}

async fn handle_keyword(
    handler: &Handler,
    ctx: &Context,
    message: &Message,
) -> Result<(), AppError> {
    message.channel_id.say(&ctx.http, KEYWORD_NOTICE).await?;

    if let Some(mod_channel) = handler.moderation.mod_channel_id() {
        let alert = keyword_alert(
            message.author.id.get(),
            message.channel_id.get(),
            &message.content,
        );
        ChannelId::new(mod_channel).say(&ctx.http, alert).await?;
    }

    Ok(())
}
