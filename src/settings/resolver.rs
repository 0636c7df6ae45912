//! Option resolution with breakpoint fallback.
//!
//! A value is looked up at the requested breakpoint first. When that device has
//! nothing stored, most options inherit from the parent breakpoint
//! (mobile -> tablet -> desktop). Options declared with
//! [`Fallback::BreakpointDefault`] (the item gap) skip the inheritance: a
//! missing key uses the option's own per-device default, while a stored but
//! cleared value reads the desktop value. When nothing is stored anywhere along
//! the chain the declared default of the requested breakpoint is returned.
//!
//! Presence rules:
//! - a key that is missing from the bag is absent;
//! - for switches every stored value counts, including `""` (off) and `null` (unset);
//! - for other kinds `null`, `""` and a cleared slider are absent, while `0` and
//!   `false` are regular values.

use tracing::warn;

use super::bag::{Breakpoint, SettingsBag};
use super::options::{self, Fallback, OptionKind, OptionSpec};
use super::value::{FromSetting, SettingValue};

/// Per-device storage of one option. Non-responsive options only use `desktop`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Responsive<T> {
    pub desktop: Option<T>,
    pub tablet: Option<T>,
    pub mobile: Option<T>,
}

impl<T> Default for Responsive<T> {
    fn default() -> Self {
        Self {
            desktop: None,
            tablet: None,
            mobile: None,
        }
    }
}

impl<T> Responsive<T> {
    pub fn at(&self, breakpoint: Breakpoint) -> Option<&T> {
        match breakpoint {
            Breakpoint::Desktop => self.desktop.as_ref(),
            Breakpoint::Tablet => self.tablet.as_ref(),
            Breakpoint::Mobile => self.mobile.as_ref(),
        }
    }

    pub fn set(&mut self, breakpoint: Breakpoint, value: Option<T>) {
        match breakpoint {
            Breakpoint::Desktop => self.desktop = value,
            Breakpoint::Tablet => self.tablet = value,
            Breakpoint::Mobile => self.mobile = value,
        }
    }
}

impl<T: FromSetting + Clone + Default> Responsive<T> {
    /// Read the stored values of `spec` from the bag.
    ///
    /// Suffixed keys of a non-responsive option are ignored.
    pub fn read(bag: &SettingsBag, spec: &OptionSpec) -> Self {
        let mut out = Self::default();
        for &bp in spec.breakpoints() {
            let key = bp.key(spec.name);
            let mut value = read_stored(bag, &key, spec.kind);
            if value.is_none() && clears_to_desktop(bag, &key, bp, spec.fallback) {
                value = Some(
                    out.desktop
                        .clone()
                        .unwrap_or_else(|| declared_default(spec, Breakpoint::Desktop)),
                );
            }
            out.set(bp, value);
        }
        out
    }

    /// Effective value at `breakpoint`.
    pub fn resolve(&self, breakpoint: Breakpoint, spec: &OptionSpec) -> T {
        cascade(
            |bp| self.at(bp).cloned(),
            breakpoint,
            spec.fallback,
            |bp| declared_default(spec, bp),
        )
    }
}

/// Read one stored key, applying the presence rules for `kind`.
///
/// Malformed values are logged and treated as absent.
pub fn read_stored<T: FromSetting>(bag: &SettingsBag, key: &str, kind: OptionKind) -> Option<T> {
    let raw = bag.get(key)?;
    let Some(value) = SettingValue::from_json(raw) else {
        warn!(target: "owce::settings", %key, value = %raw, "Unsupported setting shape; ignoring");
        return None;
    };
    if !matches!(kind, OptionKind::Switch) && value.is_blank() {
        return None;
    }
    let parsed = T::from_setting(&value);
    if parsed.is_none() {
        warn!(target: "owce::settings", %key, value = %raw, "Setting has the wrong type; ignoring");
    }
    parsed
}

/// A tablet/mobile override of a [`Fallback::BreakpointDefault`] option that
/// is stored but cleared (`""` or a slider without size). `null` counts as
/// missing.
fn clears_to_desktop(bag: &SettingsBag, key: &str, breakpoint: Breakpoint, fallback: Fallback) -> bool {
    if breakpoint == Breakpoint::Desktop || fallback != Fallback::BreakpointDefault {
        return false;
    }
    match bag.get(key).and_then(SettingValue::from_json) {
        Some(SettingValue::Text(s)) => s.is_empty(),
        Some(SettingValue::Size(size)) => size.size.is_none(),
        _ => false,
    }
}

/// Resolve a non-responsive option stored as `Option<T>`.
pub fn resolve_scalar<T: FromSetting + Clone + Default>(stored: &Option<T>, spec: &OptionSpec) -> T {
    stored
        .clone()
        .unwrap_or_else(|| declared_default(spec, Breakpoint::Desktop))
}

/// Declared default of `spec` at `breakpoint`, or `T::default()` when the
/// declaration does not fit `T`.
pub fn declared_default<T: FromSetting + Default>(spec: &OptionSpec, breakpoint: Breakpoint) -> T {
    T::from_setting(&spec.default_at(breakpoint).to_value()).unwrap_or_default()
}

/// Walk the fallback chain starting at `breakpoint`.
pub fn cascade<T>(
    lookup: impl Fn(Breakpoint) -> Option<T>,
    breakpoint: Breakpoint,
    fallback: Fallback,
    default: impl FnOnce(Breakpoint) -> T,
) -> T {
    let mut current = Some(breakpoint);
    while let Some(bp) = current {
        if let Some(value) = lookup(bp) {
            return value;
        }
        if fallback == Fallback::BreakpointDefault {
            break;
        }
        current = bp.parent();
    }
    default(breakpoint)
}

/// Resolve `name` at `breakpoint` from a raw bag.
///
/// Known options use their declared kind, fallback and defaults. Unknown names
/// cascade like a responsive text option and resolve to [`SettingValue::Empty`]
/// when nothing is stored.
pub fn resolve(bag: &SettingsBag, name: &str, breakpoint: Breakpoint) -> SettingValue {
    match options::spec(name) {
        Some(spec) => Responsive::<SettingValue>::read(bag, spec).resolve(breakpoint, spec),
        None => resolve_or(bag, name, breakpoint, SettingValue::Empty),
    }
}

/// Like [`resolve`], but with a caller-supplied default used when `name` has no
/// stored value along the fallback chain.
pub fn resolve_or(bag: &SettingsBag, name: &str, breakpoint: Breakpoint, default: SettingValue) -> SettingValue {
    static EVERY_BREAKPOINT: &[Breakpoint] = &Breakpoint::ALL;
    let (kind, fallback, breakpoints) = match options::spec(name) {
        Some(spec) => (spec.kind, spec.fallback, spec.breakpoints()),
        None => (OptionKind::Text, Fallback::Cascade, EVERY_BREAKPOINT),
    };
    cascade(
        |bp| {
            if !breakpoints.contains(&bp) {
                return None;
            }
            let key = bp.key(name);
            read_stored::<SettingValue>(bag, &key, kind).or_else(|| {
                clears_to_desktop(bag, &key, bp, fallback)
                    .then(|| read_stored::<SettingValue>(bag, &Breakpoint::Desktop.key(name), kind))
                    .flatten()
            })
        },
        breakpoint,
        fallback,
        |_| default,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::value::{Size, Toggle};
    use serde_json::json;

    fn bag(v: serde_json::Value) -> SettingsBag {
        SettingsBag::from_value(v).unwrap()
    }

    #[test]
    fn explicit_value_wins() {
        let b = bag(json!({"items_count": 3, "items_count_tablet": 2, "items_count_mobile": 1}));
        assert_eq!(resolve(&b, "items_count", Breakpoint::Tablet), SettingValue::Number(2.0));
        assert_eq!(resolve(&b, "items_count", Breakpoint::Mobile), SettingValue::Number(1.0));
    }

    #[test]
    fn missing_breakpoint_inherits_from_parent() {
        let b = bag(json!({"items_count": 4}));
        for bp in [Breakpoint::Tablet, Breakpoint::Mobile] {
            assert_eq!(resolve(&b, "items_count", bp), SettingValue::Number(4.0));
        }

        let b = bag(json!({"items_count": 4, "items_count_tablet": 2}));
        assert_eq!(resolve(&b, "items_count", Breakpoint::Mobile), SettingValue::Number(2.0));

        let b = bag(json!({"show_nav": "yes"}));
        assert_eq!(
            resolve(&b, "show_nav", Breakpoint::Mobile),
            SettingValue::Text("yes".into())
        );
    }

    #[test]
    fn gap_uses_breakpoint_default_instead_of_inheriting() {
        let b = bag(json!({"items_single_gap": {"unit": "px", "size": 30}}));
        assert_eq!(
            resolve(&b, "items_single_gap", Breakpoint::Tablet),
            SettingValue::Size(Size::px(10.0))
        );
        assert_eq!(
            resolve(&b, "items_single_gap", Breakpoint::Mobile),
            SettingValue::Size(Size::px(0.0))
        );
        assert_eq!(
            resolve(&b, "items_single_gap", Breakpoint::Desktop),
            SettingValue::Size(Size::px(30.0))
        );
    }

    #[test]
    fn cleared_gap_override_reads_desktop_value() {
        let b = bag(json!({
            "items_single_gap": {"unit": "px", "size": 30},
            "items_single_gap_tablet": {"unit": "px", "size": ""},
            "items_single_gap_mobile": {"unit": "px", "size": ""}
        }));
        for bp in [Breakpoint::Tablet, Breakpoint::Mobile] {
            assert_eq!(
                resolve(&b, "items_single_gap", bp),
                SettingValue::Size(Size::px(30.0))
            );
        }
        assert_eq!(
            resolve_or(&b, "items_single_gap", Breakpoint::Mobile, SettingValue::Empty),
            SettingValue::Size(Size::px(30.0))
        );

        let b = bag(json!({"items_single_gap_tablet": "", "items_single_gap_mobile": null}));
        assert_eq!(
            resolve(&b, "items_single_gap", Breakpoint::Tablet),
            SettingValue::Size(Size::px(10.0))
        );
        assert_eq!(
            resolve(&b, "items_single_gap", Breakpoint::Mobile),
            SettingValue::Size(Size::px(0.0))
        );
    }

    #[test]
    fn zero_is_a_present_value() {
        let b = bag(json!({"items_count": 3, "items_count_mobile": 0}));
        assert_eq!(resolve(&b, "items_count", Breakpoint::Mobile), SettingValue::Number(0.0));

        let typed = Responsive::<u32>::read(&b, &options::ITEMS_COUNT);
        assert_eq!(typed.resolve(Breakpoint::Mobile, &options::ITEMS_COUNT), 0);
    }

    #[test]
    fn false_and_no_are_present_values() {
        let b = bag(json!({"enable_loop": "yes", "enable_loop_tablet": false, "enable_loop_mobile": "no"}));
        let typed = Responsive::<Toggle>::read(&b, &options::LOOP);
        assert_eq!(typed.resolve(Breakpoint::Tablet, &options::LOOP), Toggle::Off);
        assert_eq!(typed.resolve(Breakpoint::Mobile, &options::LOOP), Toggle::Off);
    }

    #[test]
    fn empty_string_is_absent_for_non_switches() {
        let b = bag(json!({"items_count": 5, "items_count_tablet": ""}));
        assert_eq!(resolve(&b, "items_count", Breakpoint::Tablet), SettingValue::Number(5.0));
    }

    #[test]
    fn empty_string_is_off_for_switches() {
        let b = bag(json!({"show_nav": "yes", "show_nav_mobile": ""}));
        let typed = Responsive::<Toggle>::read(&b, &options::SHOW_NAV);
        assert_eq!(typed.resolve(Breakpoint::Mobile, &options::SHOW_NAV), Toggle::Off);
        assert_eq!(typed.resolve(Breakpoint::Tablet, &options::SHOW_NAV), Toggle::On);
    }

    #[test]
    fn absent_everywhere_uses_breakpoint_default() {
        let b = SettingsBag::new();
        let typed = Responsive::<u32>::read(&b, &options::ITEMS_COUNT);
        assert_eq!(typed.resolve(Breakpoint::Desktop, &options::ITEMS_COUNT), 3);
        assert_eq!(typed.resolve(Breakpoint::Tablet, &options::ITEMS_COUNT), 2);
        assert_eq!(typed.resolve(Breakpoint::Mobile, &options::ITEMS_COUNT), 1);
    }

    #[test]
    fn unknown_option_resolves_to_caller_default() {
        let b = bag(json!({"something_else": 1}));
        assert_eq!(resolve(&b, "not_declared", Breakpoint::Mobile), SettingValue::Empty);
        assert_eq!(
            resolve_or(&b, "not_declared", Breakpoint::Tablet, SettingValue::Number(7.0)),
            SettingValue::Number(7.0)
        );
        assert_eq!(
            resolve_or(&b, "something_else", Breakpoint::Mobile, SettingValue::Empty),
            SettingValue::Number(1.0)
        );
    }

    #[test]
    fn suffixed_keys_of_non_responsive_options_are_ignored() {
        let b = bag(json!({"autoplay": "yes", "autoplay_mobile": ""}));
        assert_eq!(
            resolve(&b, "autoplay", Breakpoint::Mobile),
            SettingValue::Text("yes".into())
        );
    }

    #[test]
    fn malformed_value_falls_back() {
        let b = bag(json!({"items_count": 2, "items_count_mobile": "lots"}));
        let typed = Responsive::<u32>::read(&b, &options::ITEMS_COUNT);
        assert_eq!(typed.mobile, None);
        assert_eq!(typed.resolve(Breakpoint::Mobile, &options::ITEMS_COUNT), 2);
    }
}
