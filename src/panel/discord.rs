use std::sync::Arc;

use anyhow::Result;
use poise::serenity_prelude::{
    CreateAttachment, CreateMessage, EditAttachments, EditMessage, GenericChannelId, GetMessages,
    Http, Mentionable as _, MessageId, async_trait,
};

use crate::panel::sync::{BannerFile, ChannelMessage, PanelChannel, PanelMessage};

/// [`PanelChannel`] backed by the Discord HTTP API.
pub struct DiscordChannel {
    http: Arc<Http>,
    channel_id: GenericChannelId,
}

impl DiscordChannel {
    pub fn new(http: Arc<Http>, channel_id: GenericChannelId) -> Self {
        Self { http, channel_id }
    }
}

fn attachment(banner: &BannerFile) -> CreateAttachment<'static> {
    CreateAttachment::bytes(banner.bytes.clone(), banner.filename.clone())
}

#[async_trait]
impl PanelChannel for DiscordChannel {
    async fn resolve(&self) -> Result<String> {
        self.http.get_channel(self.channel_id).await?;
        Ok(self.channel_id.mention().to_string())
    }

    async fn recent_messages(&self, limit: u8) -> Result<Vec<ChannelMessage>> {
        let messages = self
            .channel_id
            .messages(&self.http, GetMessages::new().limit(limit))
            .await?;

        Ok(messages
            .into_iter()
            .map(|m| ChannelMessage {
                id: m.id,
                author: m.author.id,
                has_embeds: !m.embeds.is_empty(),
            })
            .collect())
    }

    async fn send_panel(&self, panel: &PanelMessage) -> Result<MessageId> {
        let mut message = CreateMessage::new()
            .embed(panel.view.to_embed())
            .components(vec![panel.menu.to_component()]);
        if let Some(banner) = &panel.banner {
            message = message.add_file(attachment(banner));
        }

        let sent = self.channel_id.send_message(&self.http, message).await?;
        Ok(sent.id)
    }

    async fn edit_panel(&self, message: MessageId, panel: &PanelMessage) -> Result<()> {
        let mut edit = EditMessage::new()
            .embed(panel.view.to_embed())
            .components(vec![panel.menu.to_component()]);
        if let Some(banner) = &panel.banner {
            edit = edit.attachments(EditAttachments::new().add(attachment(banner)));
        }

        self.channel_id
            .edit_message(&self.http, message, edit)
            .await?;
        Ok(())
    }
}
