use poise::serenity_prelude::CreateEmbed;

use crate::jobs::types::{JobEntry, LocationType};

// Discord rejects empty field names, a zero-width space renders as nothing
pub const BLANK_LABEL: &str = "\u{200b}";

pub const PORT_LINE: &str = "💠 الميناء";
pub const OUTSIDE_PORT_LINE: &str = "🏭 خارج الميناء";

/// Ephemeral job description. Every field is unlabelled and stacked vertically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    pub color: u32,
    pub lines: Vec<String>,
}

impl DetailView {
    pub fn to_embed(&self) -> CreateEmbed<'static> {
        self.lines.iter().fold(
            CreateEmbed::new()
                .title(self.title.clone())
                .colour(self.color),
            |embed, line| embed.field(BLANK_LABEL, line.clone(), false),
        )
    }
}

pub fn location_line(location_type: LocationType) -> &'static str {
    match location_type {
        LocationType::Port => PORT_LINE,
        LocationType::OutsidePort => OUTSIDE_PORT_LINE,
    }
}

pub fn render_job_detail(entry: &JobEntry, color: u32) -> DetailView {
    let rewards = entry.rewards();

    DetailView {
        title: format!("{} {}", entry.emoji, entry.name),
        color,
        lines: vec![
            format!("{} المستوى المطلوب", entry.icon),
            format!("📊 الخبرة المطلوبة: {} 📊", entry.experience),
            "**منطقة البيع**".to_string(),
            location_line(entry.location_type).to_string(),
            format!(
                "**المكافأة الممنوحة من الوظيفة**\n\nالخبرة : {}\nالفلوس : {}",
                rewards.exp, rewards.money
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::types::tests::{job, sample_catalog};

    #[test]
    fn shipping_company_detail() {
        let catalog = sample_catalog();
        let detail = render_job_detail(catalog.get("شركة الشحن").unwrap(), 0x2f3136);

        assert_eq!(detail.title, "🏢 شركة الشحن");
        assert_eq!(detail.color, 0x2f3136);
        assert_eq!(
            detail.lines,
            [
                "🚚 المستوى المطلوب",
                "📊 الخبرة المطلوبة: متوسط 📊",
                "**منطقة البيع**",
                PORT_LINE,
                "**المكافأة الممنوحة من الوظيفة**\n\nالخبرة : 300\nالفلوس : 700",
            ]
        );
    }

    #[test]
    fn location_line_follows_location_type() {
        for location_type in [LocationType::Port, LocationType::OutsidePort] {
            let detail = render_job_detail(&job("x", location_type, None), 0);
            let expected = if location_type == LocationType::Port {
                PORT_LINE
            } else {
                OUTSIDE_PORT_LINE
            };

            assert_eq!(detail.lines[3], expected);
            assert_eq!(
                detail
                    .lines
                    .iter()
                    .filter(|l| *l == PORT_LINE || *l == OUTSIDE_PORT_LINE)
                    .count(),
                1
            );
        }
    }

    #[test]
    fn detail_embed_fields_are_unlabelled() {
        let catalog = sample_catalog();
        let detail = render_job_detail(catalog.get("شركة الشحن").unwrap(), 0x2f3136);
        let embed = serde_json::to_value(detail.to_embed()).unwrap();

        assert_eq!(embed["title"], "🏢 شركة الشحن");
        assert_eq!(embed["color"], 0x2f3136);

        let fields = embed["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 5);
        for (field, line) in fields.iter().zip(&detail.lines) {
            assert_eq!(field["name"], BLANK_LABEL);
            assert_eq!(field["value"], line.as_str());
            assert_eq!(field["inline"], false);
        }
    }

    #[test]
    fn unset_rewards_use_defaults() {
        let detail = render_job_detail(&job("المزرعة", LocationType::OutsidePort, None), 0);
        let rewards = detail.lines.last().unwrap();

        assert!(rewards.ends_with("الخبرة : 250\nالفلوس : 500"));
    }
}
