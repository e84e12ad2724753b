use poise::serenity_prelude::{
    CreateActionRow, CreateComponent, CreateSelectMenu, CreateSelectMenuKind,
    CreateSelectMenuOption, ReactionType, small_fixed_array::FixedString,
};

use crate::config::JOBS_MENU_ID;
use crate::jobs::types::JobCatalog;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOption {
    pub name: String,
    pub icon: String,
}

/// Single-choice job select menu. The custom id is fixed, so the menu keeps working across
/// restarts and never expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobMenu {
    pub placeholder: String,
    pub options: Vec<JobOption>,
}

impl JobMenu {
    pub fn new(catalog: &JobCatalog, placeholder: &str) -> Self {
        Self {
            placeholder: placeholder.to_string(),
            options: catalog
                .iter()
                .map(|entry| JobOption {
                    name: entry.name.clone(),
                    icon: entry.icon.clone(),
                })
                .collect(),
        }
    }

    pub fn to_component(&self) -> CreateComponent<'static> {
        // no description on purpose, the detail embed carries all information
        let options: Vec<_> = self
            .options
            .iter()
            .map(|option| {
                CreateSelectMenuOption::new(option.name.clone(), option.name.clone()).emoji(
                    ReactionType::Unicode(FixedString::from_str_trunc(&option.icon)),
                )
            })
            .collect();

        CreateComponent::ActionRow(CreateActionRow::SelectMenu(
            CreateSelectMenu::new(
                JOBS_MENU_ID,
                CreateSelectMenuKind::String {
                    options: options.into(),
                },
            )
            .placeholder(self.placeholder.clone())
            .min_values(1)
            .max_values(1),
        ))
    }
}
