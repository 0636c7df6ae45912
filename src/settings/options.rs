//! Declarative table of every option the widget exposes.
//!
//! One row per option; control descriptors, defaults and fallback rules are all
//! derived from here.

use serde_json::Value;

use super::bag::Breakpoint;
use super::value::{SettingValue, Size};
use crate::carousel::animations::AnimationPhase;

/// Shape of the control that stores an option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OptionKind {
    /// On/off switch storing `"yes"` or `""`.
    Switch,
    Number {
        min: Option<f64>,
        max: Option<f64>,
        step: f64,
    },
    Select {
        choices: &'static [(&'static str, &'static str)],
    },
    /// Choice among the registered thumbnail sizes.
    ImageSize,
    /// Choice among the allowed heading/text tags.
    Tag,
    /// Slider in px.
    Size { max: f64 },
    Text,
    Animation(AnimationPhase),
}

/// Declared default for one breakpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OptionDefault {
    None,
    Switch(bool),
    Number(f64),
    Text(&'static str),
    Size(f64),
}

impl OptionDefault {
    pub fn to_value(self) -> SettingValue {
        match self {
            Self::None => SettingValue::Empty,
            Self::Switch(on) => SettingValue::Text(if on { "yes" } else { "" }.to_string()),
            Self::Number(n) => SettingValue::Number(n),
            Self::Text(s) => SettingValue::Text(s.to_string()),
            Self::Size(n) => SettingValue::Size(Size::px(n)),
        }
    }

    pub fn to_json(self) -> Value {
        self.to_value().to_json()
    }
}

/// What a tablet/mobile lookup does when that device has no stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Inherit from the parent breakpoint (mobile -> tablet -> desktop).
    Cascade,
    /// Use the option's own default for the requested breakpoint.
    BreakpointDefault,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Defaults {
    pub desktop: OptionDefault,
    pub tablet: OptionDefault,
    pub mobile: OptionDefault,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionSpec {
    /// Control id without the field prefix.
    pub name: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub kind: OptionKind,
    pub responsive: bool,
    pub defaults: Defaults,
    pub fallback: Fallback,
}

impl OptionSpec {
    const fn new(name: &'static str, label: &'static str, kind: OptionKind, default: OptionDefault) -> Self {
        Self {
            name,
            label,
            description: "",
            kind,
            responsive: false,
            defaults: Defaults {
                desktop: default,
                tablet: default,
                mobile: default,
            },
            fallback: Fallback::Cascade,
        }
    }

    const fn responsive(mut self, tablet: OptionDefault, mobile: OptionDefault) -> Self {
        self.responsive = true;
        self.defaults.tablet = tablet;
        self.defaults.mobile = mobile;
        self
    }

    const fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    const fn fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    pub const fn default_at(&self, breakpoint: Breakpoint) -> OptionDefault {
        match breakpoint {
            Breakpoint::Desktop => self.defaults.desktop,
            Breakpoint::Tablet => self.defaults.tablet,
            Breakpoint::Mobile => self.defaults.mobile,
        }
    }

    /// Breakpoints that have their own stored key.
    pub fn breakpoints(&self) -> &'static [Breakpoint] {
        if self.responsive {
            &[Breakpoint::Desktop, Breakpoint::Tablet, Breakpoint::Mobile]
        } else {
            &[Breakpoint::Desktop]
        }
    }

    pub fn is_switch(&self) -> bool {
        matches!(self.kind, OptionKind::Switch)
    }
}

const fn switch(name: &'static str, label: &'static str, on: bool) -> OptionSpec {
    OptionSpec::new(name, label, OptionKind::Switch, OptionDefault::Switch(on))
}

const fn number(name: &'static str, label: &'static str, min: Option<f64>, max: Option<f64>, step: f64, default: f64) -> OptionSpec {
    OptionSpec::new(
        name,
        label,
        OptionKind::Number { min, max, step },
        OptionDefault::Number(default),
    )
}

const fn select(
    name: &'static str,
    label: &'static str,
    choices: &'static [(&'static str, &'static str)],
    default: &'static str,
) -> OptionSpec {
    OptionSpec::new(name, label, OptionKind::Select { choices }, OptionDefault::Text(default))
}

pub const LAYOUT: OptionSpec = select(
    "layout",
    "Layout",
    &[("basic", "Basic"), ("image", "Image Only"), ("rdatos", "Rdatos")],
    "rdatos",
);
pub const LAYOUT_RDATOS: OptionSpec = select(
    "layout_rdatos",
    "Style",
    &[("one", "One"), ("two", "Two"), ("three", "Three")],
    "one",
);
pub const ORDER_BY: OptionSpec = select(
    "layout_order_by",
    "Order by",
    &[
        ("none", "None"),
        ("date", "Date"),
        ("name", "Name"),
        ("author", "Author"),
        ("title", "Title"),
        ("modified", "Modified"),
        ("ID", "ID"),
        ("comment_count", "Comment count"),
    ],
    "date",
);
pub const ORDER: OptionSpec = select("layout_order", "Order", &[("ASC", "ASC"), ("DESC", "DESC")], "ASC");
pub const CATEGORY: OptionSpec = OptionSpec::new(
    "layout_categories",
    "Categories",
    OptionKind::Text,
    OptionDefault::Text("0"),
)
.describe("Category id to load posts from; 0 loads every category");
pub const THUMBNAIL_SIZE: OptionSpec = OptionSpec::new(
    "thumbnail_size",
    "Image Size",
    OptionKind::ImageSize,
    OptionDefault::Text("owl_elementor_thumbnail"),
);
pub const ITEMS_COUNT: OptionSpec = number("items_count", "Number of Items", Some(1.0), Some(6.0), 1.0, 3.0)
    .responsive(OptionDefault::Number(2.0), OptionDefault::Number(1.0))
    .describe("The number of items visible on the screen at a time");
pub const ITEMS_LOAD: OptionSpec = number("items_load", "Number of Post to Load", Some(4.0), Some(30.0), 1.0, 4.0)
    .responsive(OptionDefault::Number(10.0), OptionDefault::Number(10.0))
    .describe("The number of post to load");
pub const ANIMATE_IN: OptionSpec = OptionSpec::new(
    "animate_in",
    "Entry Animation",
    OptionKind::Animation(AnimationPhase::Entry),
    OptionDefault::None,
)
.describe("Animate works only with 1 item.");
pub const ANIMATE_OUT: OptionSpec = OptionSpec::new(
    "animate_out",
    "Exit Animation",
    OptionKind::Animation(AnimationPhase::Exit),
    OptionDefault::None,
)
.describe("Animate works only with 1 item.");
pub const AUTOPLAY: OptionSpec = switch("autoplay", "Autoplay", false);
pub const AUTOPLAY_TIMEOUT: OptionSpec = number("autoplay_timeout", "Autoplay timeout", Some(1.0), None, 50.0, 5000.0);
pub const AUTOPLAY_HOVER_PAUSE: OptionSpec = switch("autoplay_hover_pause", "Autoplay pause on hover", false);
pub const SMART_SPEED: OptionSpec = number("smart_speed", "Slide speed", Some(1.0), None, 50.0, 500.0)
    .describe("Duration of change of per slide");
pub const REWIND: OptionSpec = switch("rewind", "Rewind", false)
    .describe("Go backwards when the boundary is reached.");
pub const LOOP: OptionSpec = switch("enable_loop", "Loop", true)
    .responsive(OptionDefault::Switch(false), OptionDefault::Switch(false))
    .describe("Infinity loop. Duplicate last and first items to get loop illusion.");
pub const SHOW_NAV: OptionSpec = switch("show_nav", "Show next/prev", true)
    .responsive(OptionDefault::Switch(false), OptionDefault::Switch(false));
pub const SHOW_DOTS: OptionSpec = switch("show_dots", "Show dots", false)
    .responsive(OptionDefault::Switch(true), OptionDefault::Switch(true));
pub const ITEM_CENTER: OptionSpec = switch("item_center", "Show Items in Center", false)
    .responsive(OptionDefault::Switch(true), OptionDefault::Switch(true));
pub const MOUSE_DRAG: OptionSpec = switch("mouse_drag", "Mouse drag", true);
pub const TOUCH_DRAG: OptionSpec = switch("touch_drag", "Touch drag", true);
pub const LAZY_LOAD: OptionSpec = switch("lazyLoad", "LazyLoad", false);
pub const AUTO_HEIGHT: OptionSpec = switch("auto_height", "Auto height", false).describe(
    "Works only with 1 item on screen. Calculate all visible items and change height according to heighest item.",
);
pub const GAP: OptionSpec = OptionSpec::new(
    "items_single_gap",
    "Gap",
    OptionKind::Size { max: 100.0 },
    OptionDefault::Size(10.0),
)
.responsive(OptionDefault::Size(10.0), OptionDefault::Size(0.0))
.fallback(Fallback::BreakpointDefault);
pub const HOVER_ANIMATION: OptionSpec = OptionSpec::new(
    "items_single_hover_animation",
    "Hover Animation",
    OptionKind::Text,
    OptionDefault::Text("float"),
);
pub const TITLE_HIDE: OptionSpec = switch("title_hide", "Hide", false);
pub const TITLE_TAG: OptionSpec = OptionSpec::new("title_tag", "HTML Tag", OptionKind::Tag, OptionDefault::Text("h3"));
pub const SUBTITLE_HIDE: OptionSpec = switch("subtitle_hide", "Hide", false);
pub const SUBTITLE_TAG: OptionSpec = OptionSpec::new("subtitle_tag", "HTML Tag", OptionKind::Tag, OptionDefault::Text("h5"));
pub const IMAGE_HIDE: OptionSpec = switch("image_hide", "Hide", false);

/// Every option, in the order the controls are presented.
pub static OPTIONS: &[OptionSpec] = &[
    LAYOUT,
    LAYOUT_RDATOS,
    ORDER_BY,
    ORDER,
    CATEGORY,
    THUMBNAIL_SIZE,
    ITEMS_COUNT,
    ITEMS_LOAD,
    ANIMATE_IN,
    ANIMATE_OUT,
    AUTOPLAY,
    AUTOPLAY_TIMEOUT,
    AUTOPLAY_HOVER_PAUSE,
    SMART_SPEED,
    REWIND,
    LOOP,
    SHOW_NAV,
    SHOW_DOTS,
    ITEM_CENTER,
    MOUSE_DRAG,
    TOUCH_DRAG,
    LAZY_LOAD,
    AUTO_HEIGHT,
    GAP,
    HOVER_ANIMATION,
    TITLE_HIDE,
    TITLE_TAG,
    SUBTITLE_HIDE,
    SUBTITLE_TAG,
    IMAGE_HIDE,
];

/// Look up an option by its unprefixed name.
pub fn spec(name: &str) -> Option<&'static OptionSpec> {
    OPTIONS.iter().find(|s| s.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn names_are_unique() {
        let names: BTreeSet<_> = OPTIONS.iter().map(|s| s.name).collect();
        assert_eq!(names.len(), OPTIONS.len());
    }

    #[test]
    fn only_gap_uses_breakpoint_defaults() {
        let fixed: Vec<_> = OPTIONS
            .iter()
            .filter(|s| s.fallback == Fallback::BreakpointDefault)
            .map(|s| s.name)
            .collect();
        assert_eq!(fixed, vec!["items_single_gap"]);
    }

    #[test]
    fn responsive_defaults_are_per_breakpoint() {
        let items = spec("items_count").unwrap();
        assert_eq!(items.default_at(Breakpoint::Desktop), OptionDefault::Number(3.0));
        assert_eq!(items.default_at(Breakpoint::Tablet), OptionDefault::Number(2.0));
        assert_eq!(items.default_at(Breakpoint::Mobile), OptionDefault::Number(1.0));
        assert_eq!(items.breakpoints().len(), 3);
        assert_eq!(spec("autoplay").unwrap().breakpoints(), &[Breakpoint::Desktop]);
    }

    #[test]
    fn switch_defaults_use_host_markers() {
        assert_eq!(OptionDefault::Switch(true).to_json(), serde_json::json!("yes"));
        assert_eq!(OptionDefault::Switch(false).to_json(), serde_json::json!(""));
    }
}
