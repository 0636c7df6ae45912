//! Per-item templates and the pieces they share.
//!
//! Every template is a plain function of one item and the display flags; it is
//! called once per item and the fragments are concatenated by the renderer.

use maud::{Markup, PreEscaped, html};
use tracing::warn;

use crate::content::{ContentItem, ImageRef};
use crate::settings::{WidgetSettings, options};

/// Tags allowed for the title and subtitle elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlTag {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Div,
    Span,
    P,
}

impl HtmlTag {
    pub const ALL: [HtmlTag; 9] = [
        Self::H1,
        Self::H2,
        Self::H3,
        Self::H4,
        Self::H5,
        Self::H6,
        Self::Div,
        Self::Span,
        Self::P,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
            Self::Div => "div",
            Self::Span => "span",
            Self::P => "p",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::H1 => "H1",
            Self::H2 => "H2",
            Self::H3 => "H3",
            Self::H4 => "H4",
            Self::H5 => "H5",
            Self::H6 => "H6",
            Self::Div => "div",
            Self::Span => "span",
            Self::P => "p",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|t| t.as_str().eq_ignore_ascii_case(s))
    }
}

/// A registered thumbnail size. `None` dimensions mean the original file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub name: &'static str,
    pub label: &'static str,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub crop: bool,
}

pub static IMAGE_SIZES: &[ImageSize] = &[
    ImageSize {
        name: "owl_elementor_rdatos",
        label: "Rdatos - 600 x 450",
        width: Some(600),
        height: Some(450),
        crop: false,
    },
    ImageSize {
        name: "owl_elementor_thumbnail",
        label: "Thumbnail - 350 x 450",
        width: Some(350),
        height: Some(450),
        crop: true,
    },
    ImageSize {
        name: "thumbnail",
        label: "Thumbnail - 150 x 150",
        width: Some(150),
        height: Some(150),
        crop: true,
    },
    ImageSize {
        name: "medium",
        label: "Medium - 300 x 300",
        width: Some(300),
        height: Some(300),
        crop: false,
    },
    ImageSize {
        name: "large",
        label: "Large - 1024 x 1024",
        width: Some(1024),
        height: Some(1024),
        crop: false,
    },
    FULL_SIZE,
];

/// Original upload, no resizing.
const FULL_SIZE: ImageSize = ImageSize {
    name: "full",
    label: "Full",
    width: None,
    height: None,
    crop: false,
};

pub fn image_size(name: &str) -> Option<&'static ImageSize> {
    IMAGE_SIZES.iter().find(|s| s.name == name)
}

/// Per-render display choices shared by every item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFlags {
    pub title_hide: bool,
    pub title_tag: HtmlTag,
    pub subtitle_hide: bool,
    pub subtitle_tag: HtmlTag,
    pub image_hide: bool,
    pub image_size: &'static ImageSize,
    /// `elementor-animation-<name>`, when a hover animation is set.
    pub hover_class: Option<String>,
}

impl Default for DisplayFlags {
    fn default() -> Self {
        Self::from_settings(&WidgetSettings::default())
    }
}

impl DisplayFlags {
    pub fn from_settings(settings: &WidgetSettings) -> Self {
        let hover = settings.text(&settings.hover_animation, &options::HOVER_ANIMATION);
        let hover = hover.trim();
        Self {
            title_hide: settings.switch(&settings.title_hide, &options::TITLE_HIDE),
            title_tag: tag_or_default(settings.text(&settings.title_tag, &options::TITLE_TAG), HtmlTag::H3),
            subtitle_hide: settings.switch(&settings.subtitle_hide, &options::SUBTITLE_HIDE),
            subtitle_tag: tag_or_default(
                settings.text(&settings.subtitle_tag, &options::SUBTITLE_TAG),
                HtmlTag::H5,
            ),
            image_hide: settings.switch(&settings.image_hide, &options::IMAGE_HIDE),
            image_size: size_or_default(settings.text(&settings.thumbnail_size, &options::THUMBNAIL_SIZE)),
            hover_class: (!hover.is_empty() && hover != "none").then(|| format!("elementor-animation-{hover}")),
        }
    }
}

fn tag_or_default(raw: String, fallback: HtmlTag) -> HtmlTag {
    HtmlTag::parse(&raw).unwrap_or_else(|| {
        warn!(target: "owce::render", tag = %raw, fallback = fallback.as_str(), "Unsupported html tag");
        fallback
    })
}

fn size_or_default(raw: String) -> &'static ImageSize {
    if let Some(size) = image_size(&raw) {
        return size;
    }
    warn!(target: "owce::render", size = %raw, "Unknown image size; using full");
    &FULL_SIZE
}

fn item_class(item: &ContentItem, flags: &DisplayFlags) -> String {
    match &flags.hover_class {
        Some(hover) => format!("item carousel-item-{} {hover}", item.id),
        None => format!("item carousel-item-{}", item.id),
    }
}

/// Text wrapped in a configurable tag. The tag comes from a closed set, the
/// text is escaped.
fn tagged(tag: HtmlTag, class: &str, setting: &str, text: &str) -> Markup {
    let name = tag.as_str();
    html! {
        (PreEscaped(format!(r#"<{name} class="{class}" data-setting="{setting}">"#)))
        (text)
        (PreEscaped(format!("</{name}>")))
    }
}

pub fn title(item: &ContentItem, flags: &DisplayFlags) -> Markup {
    if flags.title_hide {
        return html! {};
    }
    tagged(flags.title_tag, "owl-title", "item_title", &item.title)
}

pub fn subtitle(item: &ContentItem, flags: &DisplayFlags) -> Markup {
    if flags.subtitle_hide {
        return html! {};
    }
    tagged(flags.subtitle_tag, "owl-subtitle", "item_subtitle", &item.subtitle)
}

pub fn thumbnail(item: &ContentItem, flags: &DisplayFlags) -> Markup {
    if flags.image_hide {
        return html! {};
    }
    let size = flags.image_size;
    html! {
        div class="owl-thumb" {
            @match &item.image {
                ImageRef::ById { id, src } => {
                    img class=(format!("attachment-{0} size-{0} wp-image-{id}", size.name))
                        src=[src.as_deref()]
                        data-attachment-id=(id)
                        width=[size.width]
                        height=[size.height]
                        alt=(item.title);
                }
                ImageRef::ByUrl(url) => {
                    img src=(url) alt=(item.title);
                }
            }
        }
    }
}

fn category(item: &ContentItem) -> Markup {
    html! {
        @if let Some(cat) = &item.category {
            a class=(format!("owl-category category-{}", cat.id)) href=(cat.link) {
                span { (cat.name) }
            }
        }
    }
}

pub fn basic_one(item: &ContentItem, flags: &DisplayFlags) -> Markup {
    html! {
        div class=(item_class(item, flags)) {
            a href=(item.link) style="z-index: 2;" { (thumbnail(item, flags)) }
            a href=(item.link) style="z-index: 2;" { (title(item, flags)) }
        }
    }
}

pub fn image_one(item: &ContentItem, flags: &DisplayFlags) -> Markup {
    html! {
        div class=(item_class(item, flags)) {
            a href=(item.link) { (thumbnail(item, flags)) }
        }
    }
}

pub fn rdatos_one(item: &ContentItem, flags: &DisplayFlags) -> Markup {
    html! {
        div class=(item_class(item, flags)) {
            (thumbnail(item, flags))
            a href=(item.link) style="z-index: 2;" { (title(item, flags)) }
            (subtitle(item, flags))
        }
    }
}

pub fn rdatos_two(item: &ContentItem, flags: &DisplayFlags) -> Markup {
    html! {
        div class=(item_class(item, flags)) {
            (thumbnail(item, flags))
            div class="owl-rdatos-footer" {
                a href=(item.link) style="z-index: 2;" { (title(item, flags)) }
                (subtitle(item, flags))
            }
        }
    }
}

pub fn rdatos_three(item: &ContentItem, flags: &DisplayFlags) -> Markup {
    html! {
        div class=(item_class(item, flags)) {
            (thumbnail(item, flags))
            div class="owl-rdatos-footer" {
                (category(item))
                a href=(item.link) style="z-index: 2;" { (title(item, flags)) }
                (subtitle(item, flags))
                a class="owl-link" href=(item.link) {}
            }
        }
    }
}
