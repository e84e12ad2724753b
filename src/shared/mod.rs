use anyhow::Error;
use tokio::sync::Mutex;

use crate::config::PanelConfig;
use crate::panel::PanelState;

pub struct BotData {
    pub config: PanelConfig,
    // NOTE: held for a whole synchronisation, so startup sync and manual refreshes never overlap
    pub panel: Mutex<PanelState>,
}

pub type Context<'a> = poise::Context<'a, BotData, Error>;
