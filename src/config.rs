use std::{fs, path::Path};

use anyhow::{Context as _, Result};
use poise::serenity_prelude::GenericChannelId;
use serde::Deserialize;

use crate::error::PanelError;
use crate::jobs::types::{JobCatalog, JobEntry};

// default location of the panel configuration, overridable through `PANEL_CONFIG`
pub const CONFIG_PATH: &str = "./data/panel.json";

// how many of the most recent channel messages are searched for an existing panel
pub const PANEL_LOOKBACK: u8 = 10;
// custom id of the job select menu, used to route component interactions
pub const JOBS_MENU_ID: &str = "jobs_dropdown";
// filename a local banner is uploaded under
pub const BANNER_FILENAME: &str = "banner.png";

// value shipped in the example `.env`, treated the same as a missing token
pub const TOKEN_PLACEHOLDER: &str = "ضع_توكن_البوت_هنا";
// activity shown as "Watching ..."
pub const ACTIVITY_TEXT: &str = "الوظائف والخبرات";

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Colors {
    pub primary: u32,
    pub embed_bg: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Texts {
    pub main_title: String,
    pub subtitle: String,
    pub bot_name: String,
    pub select_placeholder: String,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    channel_id: Option<u64>,
    #[serde(default)]
    banner_image: Option<String>,
    colors: Colors,
    texts: Texts,
    jobs: Vec<JobEntry>,
}

/// Everything loaded from the panel configuration file. Immutable after startup.
#[derive(Debug)]
pub struct PanelConfig {
    pub channel_id: Option<GenericChannelId>,
    pub banner_image: Option<String>,
    pub colors: Colors,
    pub texts: Texts,
    pub catalog: JobCatalog,
}

impl PanelConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read panel configuration {}", path.display()))?;

        Self::from_json(&raw)
            .with_context(|| format!("Invalid panel configuration {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(raw)?;

        let banner_image = raw
            .banner_image
            .map(|banner| banner.trim().to_string())
            .filter(|banner| !banner.is_empty());

        Ok(Self {
            channel_id: raw.channel_id.map(GenericChannelId::new),
            banner_image,
            colors: raw.colors,
            texts: raw.texts,
            catalog: JobCatalog::new(raw.jobs)?,
        })
    }
}

/// Validate the bot token, rejecting a missing value or the unedited placeholder.
pub fn check_token(token: Option<String>) -> Result<String, PanelError> {
    match token.as_deref().map(str::trim) {
        None | Some("") => Err(PanelError::Configuration(
            "DISCORD_TOKEN is not set".to_string(),
        )),
        Some(TOKEN_PLACEHOLDER) => Err(PanelError::Configuration(
            "DISCORD_TOKEN is still set to the placeholder value".to_string(),
        )),
        Some(token) => Ok(token.to_string()),
    }
}
