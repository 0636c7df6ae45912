use anyhow::{Context, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, trace};

use super::animations::{self, AnimationPhase};
use crate::settings::{Breakpoint, SettingsBag, WidgetSettings, options};

/// Transition easing passed to the runtime for every slide change.
pub const SLIDE_TRANSITION: &str = "ease";

/// Markup of the previous/next buttons.
pub const NAV_TEXT: [&str; 2] = [
    "<i class='eicon-chevron-left' aria-hidden='true'></i>",
    "<i class='eicon-chevron-right' aria-hidden='true'></i>",
];

/// Options object consumed by the carousel runtime.
///
/// Serializes to the runtime's own key names (`lazyLoad`, `autoplayTimeout`,
/// `responsive`, ...).
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselConfig {
    #[serde(skip)]
    pub layout: String,
    pub margin: u32,
    pub center: bool,
    pub lazy_load: bool,
    pub auto_height: bool,
    pub autoplay: bool,
    pub autoplay_timeout: u32,
    pub autoplay_hover_pause: bool,
    pub mouse_drag: bool,
    pub touch_drag: bool,
    pub rewind: bool,
    /// Desktop loop; per-device loop is carried by the breakpoint table.
    #[serde(skip)]
    pub loop_: bool,
    pub smart_speed: u32,
    pub slide_transition: &'static str,
    pub animate_in: Option<String>,
    pub animate_out: Option<String>,
    pub nav_text: [&'static str; 2],
    pub responsive_class: bool,
    pub responsive: BreakpointTable,
}

/// Per-device overrides, serialized as `{ "0": {...}, "768": {...}, "1024": {...} }`.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakpointTable(Vec<BreakpointEntry>);

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct BreakpointEntry {
    #[serde(skip)]
    pub breakpoint: Breakpoint,
    pub items: u32,
    pub margin: u32,
    pub nav: bool,
    pub dots: bool,
    #[serde(rename = "loop")]
    pub loop_: bool,
}

impl BreakpointEntry {
    pub fn min_width(&self) -> u32 {
        self.breakpoint.min_width()
    }
}

impl BreakpointTable {
    /// Entries ascending by minimum width.
    pub fn entries(&self) -> &[BreakpointEntry] {
        &self.0
    }

    pub fn get(&self, breakpoint: Breakpoint) -> Option<&BreakpointEntry> {
        self.0.iter().find(|e| e.breakpoint == breakpoint)
    }
}

impl Serialize for BreakpointTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in &self.0 {
            map.serialize_entry(&entry.min_width().to_string(), entry)?;
        }
        map.end()
    }
}

impl CarouselConfig {
    /// Compact JSON handed to the runtime.
    pub fn to_runtime_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize carousel options")
    }
}

/// Build the runtime options from a raw settings bag.
pub fn build(bag: &SettingsBag) -> CarouselConfig {
    build_from_settings(&WidgetSettings::from_bag(bag))
}

/// Build the runtime options from typed settings.
///
/// Rules between options:
/// - `rewind` and loop exclude each other; when both are on, rewind wins and
///   loop is turned off on every breakpoint.
/// - `autoplay_hover_pause` only applies while `autoplay` is on.
/// - `auto_height` only applies when a single item is visible on desktop.
/// - dots read an unset switch as on; nav and loop read it as off.
pub fn build_from_settings(settings: &WidgetSettings) -> CarouselConfig {
    let autoplay = settings.switch(&settings.autoplay, &options::AUTOPLAY);
    let rewind = settings.switch(&settings.rewind, &options::REWIND);
    let desktop_items = settings.items_count(Breakpoint::Desktop);

    let entries = Breakpoint::ALL
        .iter()
        .map(|&bp| {
            let wants_loop = settings.enable_loop.resolve(bp, &options::LOOP).is_on(false);
            if wants_loop && rewind {
                debug!(
                    target: "owce::carousel",
                    breakpoint = bp.as_str(),
                    "Both rewind and loop enabled; rewind takes precedence"
                );
            }
            BreakpointEntry {
                breakpoint: bp,
                items: settings.items_count(bp),
                margin: settings.margin(bp),
                nav: settings.show_nav.resolve(bp, &options::SHOW_NAV).is_on(false),
                dots: settings.show_dots.resolve(bp, &options::SHOW_DOTS).is_on(true),
                loop_: wants_loop && !rewind,
            }
        })
        .collect::<Vec<_>>();
    let table = BreakpointTable(entries);

    let animate_in = animations::normalize(AnimationPhase::Entry, settings.animate_in.as_deref());
    let animate_out = animations::normalize(AnimationPhase::Exit, settings.animate_out.as_deref());
    if (animate_in.is_some() || animate_out.is_some()) && desktop_items > 1 {
        debug!(
            target: "owce::carousel",
            items = desktop_items,
            "Entry/exit animations only run with a single visible item"
        );
    }

    let desktop_loop = table
        .get(Breakpoint::Desktop)
        .is_some_and(|entry| entry.loop_);

    let config = CarouselConfig {
        layout: settings.layout(),
        margin: settings.margin(Breakpoint::Desktop),
        center: settings
            .item_center
            .resolve(Breakpoint::Desktop, &options::ITEM_CENTER)
            .is_on(false),
        lazy_load: settings.switch(&settings.lazy_load, &options::LAZY_LOAD),
        auto_height: desktop_items == 1 && settings.switch(&settings.auto_height, &options::AUTO_HEIGHT),
        autoplay,
        autoplay_timeout: settings.number(&settings.autoplay_timeout, &options::AUTOPLAY_TIMEOUT),
        autoplay_hover_pause: autoplay
            && settings.switch(&settings.autoplay_hover_pause, &options::AUTOPLAY_HOVER_PAUSE),
        mouse_drag: settings.switch(&settings.mouse_drag, &options::MOUSE_DRAG),
        touch_drag: settings.switch(&settings.touch_drag, &options::TOUCH_DRAG),
        rewind,
        loop_: desktop_loop,
        smart_speed: settings.number(&settings.smart_speed, &options::SMART_SPEED),
        slide_transition: SLIDE_TRANSITION,
        animate_in,
        animate_out,
        nav_text: NAV_TEXT,
        responsive_class: true,
        responsive: table,
    };
    trace!(target: "owce::carousel", ?config, "Carousel options built");
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn build_json(v: serde_json::Value) -> CarouselConfig {
        build(&SettingsBag::from_value(v).unwrap())
    }

    #[test]
    fn defaults_from_empty_bag() {
        let cfg = build_json(json!({}));
        assert_eq!(cfg.layout, "rdatos");
        assert_eq!(cfg.margin, 10);
        assert_eq!(cfg.autoplay_timeout, 5000);
        assert_eq!(cfg.smart_speed, 500);
        assert!(cfg.mouse_drag && cfg.touch_drag);
        assert!(!cfg.autoplay && !cfg.rewind && !cfg.lazy_load && !cfg.auto_height);
        assert_eq!(cfg.animate_in, None);

        let desktop = cfg.responsive.get(Breakpoint::Desktop).unwrap();
        assert_eq!((desktop.items, desktop.nav, desktop.dots, desktop.loop_), (3, true, false, true));
        let tablet = cfg.responsive.get(Breakpoint::Tablet).unwrap();
        assert_eq!((tablet.items, tablet.margin), (2, 10));
        let mobile = cfg.responsive.get(Breakpoint::Mobile).unwrap();
        assert_eq!((mobile.items, mobile.margin), (1, 0));
    }

    #[test]
    fn rewind_wins_over_loop() {
        let cfg = build_json(json!({
            "rewind": "yes",
            "enable_loop": "yes",
            "enable_loop_tablet": "yes",
            "enable_loop_mobile": "yes"
        }));
        assert!(cfg.rewind);
        assert!(!cfg.loop_);
        assert!(cfg.responsive.entries().iter().all(|e| !e.loop_));
    }

    #[test]
    fn loop_survives_without_rewind() {
        let cfg = build_json(json!({"rewind": "", "enable_loop": "yes"}));
        assert!(!cfg.rewind);
        assert!(cfg.loop_);
        assert!(cfg.responsive.get(Breakpoint::Mobile).unwrap().loop_);
    }

    #[test]
    fn dots_resolution_is_three_way() {
        let cfg = build_json(json!({
            "show_dots": "",
            "show_dots_tablet": null,
            "show_dots_mobile": "yes"
        }));
        assert!(!cfg.responsive.get(Breakpoint::Desktop).unwrap().dots);
        assert!(cfg.responsive.get(Breakpoint::Tablet).unwrap().dots);
        assert!(cfg.responsive.get(Breakpoint::Mobile).unwrap().dots);

        let cfg = build_json(json!({"show_dots": "yes", "show_dots_mobile": ""}));
        assert!(!cfg.responsive.get(Breakpoint::Mobile).unwrap().dots);
        assert!(cfg.responsive.get(Breakpoint::Tablet).unwrap().dots);
    }

    #[test]
    fn nav_unset_reads_as_off() {
        let cfg = build_json(json!({"show_nav": "yes", "show_nav_tablet": null}));
        assert!(!cfg.responsive.get(Breakpoint::Tablet).unwrap().nav);
        assert!(!cfg.responsive.get(Breakpoint::Mobile).unwrap().nav);
    }

    #[test]
    fn dependent_switches_follow_their_parent() {
        let cfg = build_json(json!({"autoplay": "", "autoplay_hover_pause": "yes"}));
        assert!(!cfg.autoplay_hover_pause);
        let cfg = build_json(json!({"autoplay": "yes", "autoplay_hover_pause": "yes"}));
        assert!(cfg.autoplay_hover_pause);

        let cfg = build_json(json!({"items_count": 2, "auto_height": "yes"}));
        assert!(!cfg.auto_height);
        let cfg = build_json(json!({"items_count": 1, "auto_height": "yes"}));
        assert!(cfg.auto_height);
    }

    #[test]
    fn zero_timeout_uses_default_delay() {
        let cfg = build_json(json!({"autoplay": "yes", "autoplay_timeout": 0}));
        assert!(cfg.autoplay);
        assert_eq!(cfg.autoplay_timeout, 5000);
    }

    #[test]
    fn serializes_with_runtime_key_names() {
        let cfg = build_json(json!({
            "items_count": 3,
            "items_count_tablet": 2,
            "items_count_mobile": 1,
            "autoplay": "yes",
            "autoplay_timeout": 3000,
            "animate_in": "fadeIn",
            "lazyLoad": "yes"
        }));
        let v = serde_json::to_value(&cfg).unwrap();
        assert_eq!(v["autoplay"], json!(true));
        assert_eq!(v["autoplayTimeout"], json!(3000));
        assert_eq!(v["animateIn"], json!("fadeIn"));
        assert_eq!(v["animateOut"], json!(null));
        assert_eq!(v["lazyLoad"], json!(true));
        assert_eq!(v["smartSpeed"], json!(500));
        assert_eq!(v["slideTransition"], json!("ease"));
        assert!(v.get("layout").is_none());
        assert!(v.get("loop_").is_none());
        assert_eq!(
            v["responsive"],
            json!({
                "0": {"items": 1, "margin": 0, "nav": false, "dots": true, "loop": false},
                "768": {"items": 2, "margin": 10, "nav": false, "dots": true, "loop": false},
                "1024": {"items": 3, "margin": 10, "nav": true, "dots": false, "loop": true}
            })
        );
        assert!(cfg.to_runtime_json().unwrap().starts_with('{'));
    }
}
