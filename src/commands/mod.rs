use anyhow::Error;
use poise::{Command, serenity_prelude::Permissions};

use crate::shared::BotData;

pub mod refresh;

/// All commands of the bot, hidden from everyone but administrators by default.
pub fn all() -> Vec<Command<BotData, Error>> {
    let mut commands = vec![refresh::refresh_panel()];
    for cmd in &mut commands {
        cmd.default_member_permissions = Permissions::ADMINISTRATOR;
    }
    commands
}
