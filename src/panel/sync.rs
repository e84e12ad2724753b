use anyhow::{Context as _, Result};
use poise::serenity_prelude::{MessageId, UserId, async_trait};
use tracing::{error, info, warn};

use crate::config::{BANNER_FILENAME, PANEL_LOOKBACK, PanelConfig};
use crate::error::PanelError;
use crate::jobs::menu::JobMenu;
use crate::panel::{BannerSource, PanelState, PanelView, render_main_panel};

/// The parts of a recent channel message needed to recognise an existing panel.
#[derive(Debug, Clone)]
pub struct ChannelMessage {
    pub id: MessageId,
    pub author: UserId,
    pub has_embeds: bool,
}

#[derive(Debug, Clone)]
pub struct BannerFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Full content of the panel message, sent or edited in a single call.
#[derive(Debug, Clone)]
pub struct PanelMessage {
    pub view: PanelView,
    pub menu: JobMenu,
    pub banner: Option<BannerFile>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Sent(MessageId),
    Edited(MessageId),
}

/// Channel operations the synchronizer depends on.
#[async_trait]
pub trait PanelChannel: Sync {
    /// Make sure the channel exists and is reachable, returning a name for logging.
    async fn resolve(&self) -> Result<String>;
    /// Most recent messages, newest first.
    async fn recent_messages(&self, limit: u8) -> Result<Vec<ChannelMessage>>;
    async fn send_panel(&self, panel: &PanelMessage) -> Result<MessageId>;
    async fn edit_panel(&self, message: MessageId, panel: &PanelMessage) -> Result<()>;
}

async fn load_banner(source: &BannerSource) -> Option<BannerFile> {
    let BannerSource::LocalFile(path) = source else {
        return None;
    };

    match tokio::fs::read(path).await {
        Ok(bytes) => Some(BannerFile {
            filename: BANNER_FILENAME.to_string(),
            bytes,
        }),
        Err(err) => {
            warn!("Failed to read banner image {}: {err}", path.display());
            None
        }
    }
}

/// Find the newest message of the bot that carries an embed.
pub fn find_panel(messages: &[ChannelMessage], bot_id: UserId) -> Option<MessageId> {
    messages
        .iter()
        .find(|m| m.author == bot_id && m.has_embeds)
        .map(|m| m.id)
}

pub async fn sync_panel(
    channel: &impl PanelChannel,
    bot_id: UserId,
    config: &PanelConfig,
    state: &mut PanelState,
) -> Result<SyncOutcome> {
    let channel_name = channel.resolve().await.map_err(|err| {
        warn!("Panel channel resolution failed: {err:#}");
        PanelError::ChannelNotFound(state.channel_id.map_or(0, |id| id.get()))
    })?;

    let mut banner_source = BannerSource::resolve(config.banner_image.as_deref());
    let banner = load_banner(&banner_source).await;
    if banner.is_none() && matches!(banner_source, BannerSource::LocalFile(_)) {
        banner_source = BannerSource::None;
    }

    let panel = PanelMessage {
        view: render_main_panel(&config.texts, &config.colors, &banner_source),
        menu: JobMenu::new(&config.catalog, &config.texts.select_placeholder),
        banner,
    };

    let history = channel
        .recent_messages(PANEL_LOOKBACK)
        .await
        .context("Failed to fetch recent panel channel messages")?;

    let outcome = match find_panel(&history, bot_id) {
        Some(message_id) => {
            channel
                .edit_panel(message_id, &panel)
                .await
                .context("Failed to edit panel message")?;
            info!("Updated the panel in {channel_name}");
            SyncOutcome::Edited(message_id)
        }
        None => {
            let message_id = channel
                .send_panel(&panel)
                .await
                .context("Failed to send panel message")?;
            info!("Sent a new panel to {channel_name}");
            SyncOutcome::Sent(message_id)
        }
    };

    let (SyncOutcome::Sent(message_id) | SyncOutcome::Edited(message_id)) = outcome;
    if let Some(previous) = state.last_message
        && previous != message_id
    {
        info!("Panel moved from message {previous} to {message_id}");
    }
    state.last_message = Some(message_id);

    Ok(outcome)
}

/// Run [`sync_panel`], logging instead of propagating failures.
pub async fn sync_panel_logged(
    channel: &impl PanelChannel,
    bot_id: UserId,
    config: &PanelConfig,
    state: &mut PanelState,
) -> Option<SyncOutcome> {
    match sync_panel(channel, bot_id, config, state).await {
        Ok(outcome) => Some(outcome),
        Err(err) => {
            error!("Panel synchronisation failed: {err:#}");
            None
        }
    }
}
