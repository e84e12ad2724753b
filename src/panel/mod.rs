use std::path::{Path, PathBuf};

use poise::serenity_prelude::{CreateEmbed, CreateEmbedFooter, GenericChannelId, MessageId};
use tracing::warn;

use crate::config::{BANNER_FILENAME, Colors, Texts};

pub mod discord;
pub mod sync;

/// Runtime bookkeeping of the panel. `last_message` is only a hint, the channel history is always
/// searched again before editing.
#[derive(Debug)]
pub struct PanelState {
    pub channel_id: Option<GenericChannelId>,
    pub last_message: Option<MessageId>,
}

impl PanelState {
    pub fn new(channel_id: Option<GenericChannelId>) -> Self {
        Self {
            channel_id,
            last_message: None,
        }
    }
}

/// Where the banner image comes from after inspecting the configured reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BannerSource {
    None,
    Url(String),
    LocalFile(PathBuf),
}

impl BannerSource {
    /// Classify the configured banner. A local path that does not exist degrades to no image.
    pub fn resolve(banner_image: Option<&str>) -> Self {
        let Some(banner) = banner_image.map(str::trim).filter(|b| !b.is_empty()) else {
            return Self::None;
        };

        if banner.starts_with("http://") || banner.starts_with("https://") {
            return Self::Url(banner.to_string());
        }

        let path = Path::new(banner);
        if path.is_file() {
            Self::LocalFile(path.to_path_buf())
        } else {
            warn!("Banner image {banner:?} not found, sending the panel without an image");
            Self::None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelImage {
    None,
    Url(String),
    /// Refers to a file uploaded together with the message
    Attachment(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub title: String,
    pub description: String,
    pub footer: String,
    pub color: u32,
    pub image: PanelImage,
}

impl PanelView {
    pub fn to_embed(&self) -> CreateEmbed<'static> {
        let embed = CreateEmbed::new()
            .title(self.title.clone())
            .description(self.description.clone())
            .colour(self.color)
            .footer(CreateEmbedFooter::new(self.footer.clone()));

        match &self.image {
            PanelImage::None => embed,
            PanelImage::Url(url) => embed.image(url.clone()),
            PanelImage::Attachment(filename) => embed.attachment(filename.clone()),
        }
    }
}

pub fn render_main_panel(texts: &Texts, colors: &Colors, banner: &BannerSource) -> PanelView {
    let image = match banner {
        BannerSource::None => PanelImage::None,
        BannerSource::Url(url) => PanelImage::Url(url.clone()),
        BannerSource::LocalFile(_) => PanelImage::Attachment(BANNER_FILENAME.to_string()),
    };

    PanelView {
        title: format!("⚡ {}", texts.main_title),
        description: format!("**{}**", texts.subtitle),
        footer: texts.bot_name.clone(),
        color: colors.primary,
        image,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn texts() -> Texts {
        Texts {
            main_title: "الوظائف".to_string(),
            subtitle: "اختر وظيفتك من القائمة".to_string(),
            bot_name: "بوليتو".to_string(),
            select_placeholder: "اختر الوظيفة".to_string(),
        }
    }

    pub const COLORS: Colors = Colors {
        primary: 0xffd700,
        embed_bg: 0x2f3136,
    };

    #[test]
    fn banner_classification() {
        assert_eq!(BannerSource::resolve(None), BannerSource::None);
        assert_eq!(BannerSource::resolve(Some("  ")), BannerSource::None);
        assert_eq!(
            BannerSource::resolve(Some("https://cdn.example.com/b.png")),
            BannerSource::Url("https://cdn.example.com/b.png".to_string())
        );
        assert_eq!(
            BannerSource::resolve(Some("http://cdn.example.com/b.png")),
            BannerSource::Url("http://cdn.example.com/b.png".to_string())
        );
        assert_eq!(
            BannerSource::resolve(Some("./definitely/missing/banner.png")),
            BannerSource::None
        );

        let directory = std::env::temp_dir();
        assert_eq!(BannerSource::resolve(directory.to_str()), BannerSource::None);

        let file = directory.join(format!("banner-source-{}.png", std::process::id()));
        std::fs::write(&file, b"\x89PNG").unwrap();
        let resolved = BannerSource::resolve(file.to_str());
        std::fs::remove_file(&file).unwrap();

        assert_eq!(resolved, BannerSource::LocalFile(file));
    }

    #[test]
    fn main_panel_layout() {
        let view = render_main_panel(&texts(), &COLORS, &BannerSource::None);

        assert_eq!(view.title, "⚡ الوظائف");
        assert_eq!(view.description, "**اختر وظيفتك من القائمة**");
        assert_eq!(view.footer, "بوليتو");
        assert_eq!(view.color, COLORS.primary);
        assert_eq!(view.image, PanelImage::None);
    }

    #[test]
    fn main_panel_image_reference() {
        let remote = BannerSource::Url("https://cdn.example.com/b.png".to_string());
        assert_eq!(
            render_main_panel(&texts(), &COLORS, &remote).image,
            PanelImage::Url("https://cdn.example.com/b.png".to_string())
        );

        let local = BannerSource::LocalFile(PathBuf::from("banner.png"));
        assert_eq!(
            render_main_panel(&texts(), &COLORS, &local).image,
            PanelImage::Attachment(BANNER_FILENAME.to_string())
        );
    }

    #[test]
    fn main_panel_embed_payload() {
        let local = BannerSource::LocalFile(PathBuf::from("banner.png"));
        let embed = serde_json::to_value(render_main_panel(&texts(), &COLORS, &local).to_embed())
            .unwrap();

        assert_eq!(embed["title"], "⚡ الوظائف");
        assert_eq!(embed["description"], "**اختر وظيفتك من القائمة**");
        assert_eq!(embed["color"], COLORS.primary);
        assert_eq!(embed["footer"]["text"], "بوليتو");
        assert_eq!(embed["image"]["url"], "attachment://banner.png");

        let remote = BannerSource::Url("https://cdn.example.com/b.png".to_string());
        let embed = serde_json::to_value(render_main_panel(&texts(), &COLORS, &remote).to_embed())
            .unwrap();
        assert_eq!(embed["image"]["url"], "https://cdn.example.com/b.png");

        let embed =
            serde_json::to_value(render_main_panel(&texts(), &COLORS, &BannerSource::None).to_embed())
                .unwrap();
        assert!(embed.get("image").is_none());
    }
}
