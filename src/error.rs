use anyhow::{Error, Result, anyhow};
use poise::{
    BoxFuture, CreateReply, FrameworkError,
    serenity_prelude::{
        CacheHttp as _, Context as SerenityContext, CreateComponent, CreateContainer,
        CreateInteractionResponse, CreateInteractionResponseFollowup,
        CreateInteractionResponseMessage, CreateTextDisplay, FullEvent, Interaction,
        MessageFlags,
        colours::css::{DANGER, WARNING},
    },
};
use thiserror::Error;
use tracing::{error, warn};

/// Failures with a meaning of their own in the panel workflow. Everything else travels as a
/// plain [`anyhow::Error`].
#[derive(Error, Debug)]
pub enum PanelError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid job catalog: {0}")]
    InvalidCatalog(String),
    #[error("panel channel {0} could not be resolved")]
    ChannelNotFound(u64),
    #[error("no job named {0:?} exists in the catalog")]
    JobNotFound(String),
    #[error("administrator permission required")]
    PermissionDenied,
}

#[derive(Error, Debug)]
#[error(transparent)]
pub struct UserError(#[from] pub anyhow::Error);

pub fn deduplicate_error_chain(error: &mut Error) {
    let mut error_chain: Vec<String> = error.chain().map(|err| err.to_string()).collect();

    error_chain.dedup();

    let mut error_chain = error_chain.into_iter().rev();
    let Some(root) = error_chain.next() else {
        return;
    };
    let mut new_error = anyhow!(root);

    for message in error_chain {
        new_error = new_error.context(message);
    }

    *error = new_error;
}

fn internal_error_container(error: &Error) -> CreateComponent<'static> {
    CreateComponent::Container(
        CreateContainer::new(vec![CreateComponent::TextDisplay(CreateTextDisplay::new(
            format!("## ❌ خطأ داخلي\n```\n{error:?}\n```"),
        ))])
        .accent_color(DANGER),
    )
}

fn user_error_container(error: &Error) -> CreateComponent<'static> {
    CreateComponent::Container(
        CreateContainer::new(vec![CreateComponent::TextDisplay(CreateTextDisplay::new(
            format!("## ⚠️ تعذر تنفيذ الطلب\n```\n{error:?}\n```"),
        ))])
        .accent_color(WARNING),
    )
}

fn warning_reply(text: impl Into<String>) -> CreateReply<'static> {
    let container = CreateComponent::Container(
        CreateContainer::new(vec![CreateComponent::TextDisplay(CreateTextDisplay::new(
            text.into(),
        ))])
        .accent_color(WARNING),
    );

    CreateReply::default()
        .flags(MessageFlags::IS_COMPONENTS_V2)
        .components(vec![container])
        .ephemeral(true)
}

pub async fn event_handler_error(mut error: Error, ctx: &SerenityContext, event: &FullEvent) {
    deduplicate_error_chain(&mut error);

    let container = if error.is::<UserError>() {
        error!("User error while handling event: {error:#}");
        user_error_container(&error)
    } else {
        error!("Failed to handle event {event:?}: {error:#}");
        internal_error_container(&error)
    };

    let FullEvent::InteractionCreate {
        interaction: Interaction::Component(interaction),
        ..
    } = event
    else {
        return;
    };

    let response_message = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::default()
            .flags(MessageFlags::IS_COMPONENTS_V2)
            .components(vec![container.clone()])
            .ephemeral(true),
    );

    if interaction
        .create_response(ctx.http(), response_message)
        .await
        .is_err()
    {
        let followup_message = CreateInteractionResponseFollowup::new()
            .flags(MessageFlags::IS_COMPONENTS_V2)
            .components(vec![container])
            .ephemeral(true);

        let _ = interaction
            .create_followup(ctx.http(), followup_message)
            .await;
    }
}

async fn try_handle_error<U>(error: FrameworkError<'_, U, Error>) -> Result<()>
where
    U: Send + Sync + 'static,
{
    match error {
        FrameworkError::Command { mut error, ctx, .. } => {
            let invocation_string = ctx.invocation_string();
            deduplicate_error_chain(&mut error);

            let container = if error.is::<UserError>() {
                error!("A user error occurred while executing {invocation_string:?}: {error:#}");
                user_error_container(&error)
            } else {
                error!("An error occurred while executing {invocation_string:?}: {error:#}");
                internal_error_container(&error)
            };

            ctx.send(
                CreateReply::default()
                    .flags(MessageFlags::IS_COMPONENTS_V2)
                    .components(vec![container])
                    .ephemeral(true),
            )
            .await?;
        }
        FrameworkError::CommandPanic { ctx, payload, .. } => {
            error!(
                "[PANIC] Invocation `{}` caused a panic with payload: {}",
                ctx.invocation_string(),
                payload.as_deref().unwrap_or("unknown"),
            );

            ctx.send(warning_reply(
                "## ❌ حدث خطأ غير متوقع\nتعذر تنفيذ الأمر، البوت ما زال يعمل.",
            ))
            .await?;
        }
        FrameworkError::MissingBotPermissions {
            missing_permissions,
            ctx,
            ..
        } => {
            warn!(
                "Bot is lacking permissions for {:?}: {missing_permissions}",
                ctx.invocation_string()
            );

            ctx.send(warning_reply(format!(
                "## صلاحيات البوت غير كافية\nالصلاحيات الناقصة: **{missing_permissions}**"
            )))
            .await?;
        }
        FrameworkError::MissingUserPermissions { ctx, .. } => {
            warn!(
                "User is lacking permissions for {:?}",
                ctx.invocation_string(),
            );

            ctx.send(warning_reply("❌ للأدمن فقط")).await?;
        }
        FrameworkError::GuildOnly { ctx, .. } => {
            warn!(
                "User attempted to invoke {:?} outside of a guild",
                ctx.invocation_string(),
            );

            ctx.send(warning_reply("هذا الأمر يعمل داخل السيرفر فقط"))
                .await?;
        }
        FrameworkError::CommandStructureMismatch {
            description, ctx, ..
        } => {
            error!(
                "Mismatch between registered command and poise command for `/{}`: {description}",
                ctx.command.qualified_name,
            );
        }
        FrameworkError::UnknownInteraction { interaction, .. } => {
            warn!(
                "Received interaction for an unknown command: {:?}",
                interaction.data.name,
            );
        }
        other => {
            warn!("Unhandled framework error: {other}");
        }
    }

    Ok(())
}

pub fn error_handler<U>(error: FrameworkError<'_, U, Error>) -> BoxFuture<'_, ()>
where
    U: Send + Sync + 'static,
{
    Box::pin(async move {
        if let Err(mut err) = try_handle_error(error).await {
            deduplicate_error_chain(&mut err);
            error!("Failed to handle error: {err:#}");
        }
    })
}
