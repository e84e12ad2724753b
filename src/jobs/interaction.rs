use anyhow::{Context as _, Result, bail};
use poise::serenity_prelude::{
    CacheHttp as _, ComponentInteraction, ComponentInteractionDataKind,
    Context as SerenityContext, CreateInteractionResponse, CreateInteractionResponseMessage,
};
use tracing::{info, warn};

use crate::config::Colors;
use crate::jobs::{
    format::{self, DetailView},
    types::JobCatalog,
};
use crate::shared::BotData;

pub const NOT_FOUND_NOTICE: &str = "❌ ما لقيت هذي الوظيفة";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionResponse {
    Detail(DetailView),
    NotFound(String),
}

impl SelectionResponse {
    fn into_response(self) -> CreateInteractionResponseMessage<'static> {
        let message = match self {
            Self::Detail(detail) => CreateInteractionResponseMessage::new().embed(detail.to_embed()),
            Self::NotFound(notice) => CreateInteractionResponseMessage::new().content(notice),
        };

        message.ephemeral(true)
    }
}

pub fn select_job(catalog: &JobCatalog, colors: &Colors, value: &str) -> SelectionResponse {
    match catalog.get(value) {
        Ok(entry) => SelectionResponse::Detail(format::render_job_detail(entry, colors.embed_bg)),
        Err(err) => {
            warn!("Job selection failed: {err}");
            SelectionResponse::NotFound(NOT_FOUND_NOTICE.to_string())
        }
    }
}

pub async fn handle_interaction(
    ctx: &SerenityContext,
    interaction: &ComponentInteraction,
) -> Result<()> {
    let ComponentInteractionDataKind::StringSelect { values } = &interaction.data.kind else {
        bail!("Invalid interaction: Expected String SelectMenu")
    };
    let selected = values
        .first()
        .context("Invalid interaction: Expected selected option")?;

    info!("{} selected job {selected:?}", interaction.user.name);

    let data = ctx.data::<BotData>();
    let response = select_job(&data.config.catalog, &data.config.colors, selected.as_str());

    interaction
        .create_response(
            ctx.http(),
            CreateInteractionResponse::Message(response.into_response()),
        )
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::types::tests::sample_catalog;
    use crate::panel::tests::COLORS;

    #[test]
    fn known_job_renders_detail() {
        let catalog = sample_catalog();

        match select_job(&catalog, &COLORS, "المنجم") {
            SelectionResponse::Detail(detail) => {
                assert_eq!(detail.title, "🏢 المنجم");
                assert_eq!(detail.color, COLORS.embed_bg);
            }
            other => panic!("expected detail, got {other:?}"),
        }
    }

    #[test]
    fn unknown_job_gets_notice() {
        let catalog = sample_catalog();

        assert_eq!(
            select_job(&catalog, &COLORS, "الشرطة"),
            SelectionResponse::NotFound(NOT_FOUND_NOTICE.to_string())
        );
    }
}
