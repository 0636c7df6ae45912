use tracing::warn;

use super::bag::{Breakpoint, SettingsBag};
use super::options::{self, OptionKind};
use super::resolver::{Responsive, declared_default, read_stored, resolve_scalar};
use super::value::{Size, Toggle};

/// Typed snapshot of a widget's stored settings.
///
/// Built once per render from the host's flat bag. Every field keeps exactly
/// what was stored (`None` = nothing stored); defaults and breakpoint fallback
/// are applied when a field is resolved.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WidgetSettings {
    pub layout: Option<String>,
    /// Style of the selected layout, read from `layout_<layout>`.
    pub layout_style: Option<String>,
    pub order_by: Option<String>,
    pub order: Option<String>,
    pub category: Option<String>,
    pub thumbnail_size: Option<String>,
    pub items_count: Responsive<u32>,
    pub items_load: Responsive<u32>,
    pub animate_in: Option<String>,
    pub animate_out: Option<String>,
    pub autoplay: Option<Toggle>,
    pub autoplay_timeout: Option<u32>,
    pub autoplay_hover_pause: Option<Toggle>,
    pub smart_speed: Option<u32>,
    pub rewind: Option<Toggle>,
    pub enable_loop: Responsive<Toggle>,
    pub show_nav: Responsive<Toggle>,
    pub show_dots: Responsive<Toggle>,
    pub item_center: Responsive<Toggle>,
    pub mouse_drag: Option<Toggle>,
    pub touch_drag: Option<Toggle>,
    pub lazy_load: Option<Toggle>,
    pub auto_height: Option<Toggle>,
    pub gap: Responsive<Size>,
    pub hover_animation: Option<String>,
    pub title_hide: Option<Toggle>,
    pub title_tag: Option<String>,
    pub subtitle_hide: Option<Toggle>,
    pub subtitle_tag: Option<String>,
    pub image_hide: Option<Toggle>,
}

impl WidgetSettings {
    pub fn from_bag(bag: &SettingsBag) -> Self {
        let scalar_text = |spec: &options::OptionSpec| read_stored::<String>(bag, spec.name, spec.kind);
        let scalar_toggle = |spec: &options::OptionSpec| read_stored::<Toggle>(bag, spec.name, spec.kind);
        let scalar_count = |spec: &options::OptionSpec| read_stored::<u32>(bag, spec.name, spec.kind);

        let layout = scalar_text(&options::LAYOUT);
        let effective_layout = resolve_scalar(&layout, &options::LAYOUT);
        let layout_style = read_stored::<String>(bag, &format!("layout_{effective_layout}"), OptionKind::Text);

        Self {
            layout,
            layout_style,
            order_by: scalar_text(&options::ORDER_BY),
            order: scalar_text(&options::ORDER),
            category: scalar_text(&options::CATEGORY),
            thumbnail_size: scalar_text(&options::THUMBNAIL_SIZE),
            items_count: Responsive::read(bag, &options::ITEMS_COUNT),
            items_load: Responsive::read(bag, &options::ITEMS_LOAD),
            animate_in: scalar_text(&options::ANIMATE_IN),
            animate_out: scalar_text(&options::ANIMATE_OUT),
            autoplay: scalar_toggle(&options::AUTOPLAY),
            autoplay_timeout: scalar_count(&options::AUTOPLAY_TIMEOUT),
            autoplay_hover_pause: scalar_toggle(&options::AUTOPLAY_HOVER_PAUSE),
            smart_speed: scalar_count(&options::SMART_SPEED),
            rewind: scalar_toggle(&options::REWIND),
            enable_loop: Responsive::read(bag, &options::LOOP),
            show_nav: Responsive::read(bag, &options::SHOW_NAV),
            show_dots: Responsive::read(bag, &options::SHOW_DOTS),
            item_center: Responsive::read(bag, &options::ITEM_CENTER),
            mouse_drag: scalar_toggle(&options::MOUSE_DRAG),
            touch_drag: scalar_toggle(&options::TOUCH_DRAG),
            lazy_load: scalar_toggle(&options::LAZY_LOAD),
            auto_height: scalar_toggle(&options::AUTO_HEIGHT),
            gap: Responsive::read(bag, &options::GAP),
            hover_animation: scalar_text(&options::HOVER_ANIMATION),
            title_hide: scalar_toggle(&options::TITLE_HIDE),
            title_tag: scalar_text(&options::TITLE_TAG),
            subtitle_hide: scalar_toggle(&options::SUBTITLE_HIDE),
            subtitle_tag: scalar_text(&options::SUBTITLE_TAG),
            image_hide: scalar_toggle(&options::IMAGE_HIDE),
        }
    }

    /// Effective layout id.
    pub fn layout(&self) -> String {
        resolve_scalar(&self.layout, &options::LAYOUT)
    }

    pub fn items_count(&self, breakpoint: Breakpoint) -> u32 {
        self.items_count.resolve(breakpoint, &options::ITEMS_COUNT)
    }

    /// Gap between items in px; a negative size counts as 0.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn margin(&self, breakpoint: Breakpoint) -> u32 {
        let size = self.gap.resolve(breakpoint, &options::GAP).size.unwrap_or(0.0);
        if size.is_finite() && size > 0.0 {
            size.round() as u32
        } else {
            0
        }
    }

    /// Switch value at desktop, with `Unset` read as off.
    pub fn switch(&self, stored: &Option<Toggle>, spec: &options::OptionSpec) -> bool {
        resolve_scalar(stored, spec).is_on(false)
    }

    /// Non-responsive number; a value below the declared minimum reads as the
    /// declared default.
    pub fn number(&self, stored: &Option<u32>, spec: &options::OptionSpec) -> u32 {
        let value = resolve_scalar(stored, spec);
        match spec.kind {
            OptionKind::Number { min: Some(min), .. } if f64::from(value) < min => {
                let fallback = declared_default(spec, Breakpoint::Desktop);
                warn!(target: "owce::settings", option = spec.name, value, fallback, "Value below minimum; using default");
                fallback
            }
            _ => value,
        }
    }

    /// Number of posts requested from the content source.
    pub fn items_load(&self) -> u32 {
        self.items_load.resolve(Breakpoint::Desktop, &options::ITEMS_LOAD)
    }

    pub fn text(&self, stored: &Option<String>, spec: &options::OptionSpec) -> String {
        resolve_scalar(stored, spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_layout_style_of_selected_layout() {
        let bag = SettingsBag::from_value(json!({
            "layout": "rdatos",
            "layout_rdatos": "three",
            "layout_basic": "one"
        }))
        .unwrap();
        let s = WidgetSettings::from_bag(&bag);
        assert_eq!(s.layout(), "rdatos");
        assert_eq!(s.layout_style.as_deref(), Some("three"));
    }

    #[test]
    fn default_layout_style_key_follows_default_layout() {
        let bag = SettingsBag::from_value(json!({"layout_rdatos": "two"})).unwrap();
        let s = WidgetSettings::from_bag(&bag);
        assert_eq!(s.layout, None);
        assert_eq!(s.layout(), "rdatos");
        assert_eq!(s.layout_style.as_deref(), Some("two"));
    }

    #[test]
    fn margin_follows_gap_defaults() {
        let bag = SettingsBag::from_value(json!({
            "carousel_items_single_gap": {"unit": "px", "size": 24},
            "carousel_items_single_gap_mobile": {"unit": "px", "size": ""}
        }))
        .unwrap();
        let s = WidgetSettings::from_bag(&bag);
        assert_eq!(s.margin(Breakpoint::Desktop), 24);
        assert_eq!(s.margin(Breakpoint::Tablet), 10);
        assert_eq!(s.margin(Breakpoint::Mobile), 24);

        let s = WidgetSettings::from_bag(&SettingsBag::new());
        assert_eq!(s.margin(Breakpoint::Mobile), 0);
    }

    #[test]
    fn empty_bag_resolves_to_declared_defaults() {
        let s = WidgetSettings::from_bag(&SettingsBag::new());
        assert_eq!(s.items_count(Breakpoint::Desktop), 3);
        assert_eq!(s.items_load(), 4);
        assert!(s.switch(&s.mouse_drag, &options::MOUSE_DRAG));
        assert!(!s.switch(&s.autoplay, &options::AUTOPLAY));
        assert_eq!(s.text(&s.title_tag, &options::TITLE_TAG), "h3");
    }

    #[test]
    fn number_below_minimum_reads_default() {
        let bag = SettingsBag::from_value(json!({"autoplay_timeout": 0, "smart_speed": 250})).unwrap();
        let s = WidgetSettings::from_bag(&bag);
        assert_eq!(s.autoplay_timeout, Some(0));
        assert_eq!(s.number(&s.autoplay_timeout, &options::AUTOPLAY_TIMEOUT), 5000);
        assert_eq!(s.number(&s.smart_speed, &options::SMART_SPEED), 250);
    }
}
