use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Typed view over one stored setting.
///
/// The host persists every control as loose JSON. This enum is the closed set of
/// shapes the widget understands; anything else (arrays, unknown objects) is
/// rejected by [`SettingValue::from_json`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SettingValue {
    /// JSON `null`. For switches this is the host's "unset" sentinel.
    #[default]
    Empty,
    Flag(bool),
    Number(f64),
    Size(Size),
    Dimensions(Dimensions),
    Text(String),
}

/// Slider value, e.g. `{ "unit": "px", "size": 10 }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Size {
    #[serde(default = "default_unit")]
    pub unit: String,
    /// Absent when the slider was cleared (the host stores `""`).
    #[serde(default, deserialize_with = "loose_number")]
    pub size: Option<f64>,
}

impl Default for Size {
    fn default() -> Self {
        Self {
            unit: default_unit(),
            size: None,
        }
    }
}

impl Size {
    pub fn px(size: f64) -> Self {
        Self {
            unit: default_unit(),
            size: Some(size),
        }
    }
}

/// Box dimensions, e.g. a border width `{ "top": "1", ..., "isLinked": true }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(deserialize_with = "loose_text")]
    pub top: String,
    #[serde(deserialize_with = "loose_text")]
    pub right: String,
    #[serde(deserialize_with = "loose_text")]
    pub bottom: String,
    #[serde(deserialize_with = "loose_text")]
    pub left: String,
    #[serde(default)]
    pub is_linked: bool,
}

fn default_unit() -> String {
    "px".to_string()
}

fn loose_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

fn loose_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

impl SettingValue {
    /// Classify a raw JSON value. Returns `None` for shapes no control produces.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Self::Empty),
            Value::Bool(b) => Some(Self::Flag(*b)),
            Value::Number(n) => n.as_f64().map(Self::Number),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Object(map) if map.contains_key("size") => {
                serde_json::from_value(value.clone()).ok().map(Self::Size)
            }
            Value::Object(map) if map.contains_key("top") => {
                serde_json::from_value(value.clone()).ok().map(Self::Dimensions)
            }
            _ => None,
        }
    }

    /// Back to the JSON shape the host stores.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Empty => Value::Null,
            Self::Flag(b) => Value::Bool(*b),
            Self::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Self::Size(s) => serde_json::to_value(s).unwrap_or(Value::Null),
            Self::Dimensions(d) => serde_json::to_value(d).unwrap_or(Value::Null),
            Self::Text(s) => Value::String(s.clone()),
        }
    }

    /// True for values that do not count as "set" for non-switch options.
    ///
    /// `0` and `false` are never blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.is_empty(),
            Self::Size(s) => s.size.is_none(),
            Self::Flag(_) | Self::Number(_) | Self::Dimensions(_) => false,
        }
    }
}

/// Three-valued switch state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Toggle {
    On,
    #[default]
    Off,
    /// Stored as `null`: the host never wrote a value for this device.
    Unset,
}

impl Toggle {
    /// Collapse to a boolean; `unset` decides what the sentinel means for this option.
    #[inline]
    pub const fn is_on(self, unset: bool) -> bool {
        match self {
            Self::On => true,
            Self::Off => false,
            Self::Unset => unset,
        }
    }
}

/// Conversion from a classified setting into the type a field needs.
///
/// `None` means the stored value has the wrong shape for the field.
pub trait FromSetting: Sized {
    fn from_setting(value: &SettingValue) -> Option<Self>;
}

impl FromSetting for SettingValue {
    fn from_setting(value: &SettingValue) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromSetting for Toggle {
    fn from_setting(value: &SettingValue) -> Option<Self> {
        match value {
            SettingValue::Empty => Some(Self::Unset),
            SettingValue::Flag(true) => Some(Self::On),
            SettingValue::Flag(false) => Some(Self::Off),
            SettingValue::Number(n) => Some(if *n == 0.0 { Self::Off } else { Self::On }),
            SettingValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "yes" | "true" | "on" | "1" => Some(Self::On),
                "" | "no" | "false" | "off" | "0" => Some(Self::Off),
                _ => None,
            },
            SettingValue::Size(_) | SettingValue::Dimensions(_) => None,
        }
    }
}

impl FromSetting for u32 {
    fn from_setting(value: &SettingValue) -> Option<Self> {
        match value {
            SettingValue::Number(n) => to_count(*n),
            SettingValue::Text(s) => s.trim().parse::<f64>().ok().and_then(to_count),
            SettingValue::Size(s) => s.size.and_then(to_count),
            _ => None,
        }
    }
}

impl FromSetting for String {
    fn from_setting(value: &SettingValue) -> Option<Self> {
        match value {
            SettingValue::Text(s) => Some(s.clone()),
            SettingValue::Number(n) if n.fract() == 0.0 => Some(format!("{n:.0}")),
            SettingValue::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl FromSetting for Size {
    fn from_setting(value: &SettingValue) -> Option<Self> {
        match value {
            SettingValue::Size(s) => Some(s.clone()),
            SettingValue::Number(n) => Some(Self::px(*n)),
            SettingValue::Text(s) => s.trim().parse::<f64>().ok().map(Self::px),
            _ => None,
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_count(n: f64) -> Option<u32> {
    if !n.is_finite() || n < 0.0 {
        return None;
    }
    Some(n.round().min(f64::from(u32::MAX)) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_json_shapes() {
        assert_eq!(SettingValue::from_json(&json!(null)), Some(SettingValue::Empty));
        assert_eq!(SettingValue::from_json(&json!(3)), Some(SettingValue::Number(3.0)));
        assert_eq!(
            SettingValue::from_json(&json!({"unit": "px", "size": 12})),
            Some(SettingValue::Size(Size::px(12.0)))
        );
        assert_eq!(
            SettingValue::from_json(&json!({"unit": "px", "size": "", "sizes": []})),
            Some(SettingValue::Size(Size::default()))
        );
        let dims = SettingValue::from_json(&json!({
            "top": "1", "right": 1, "bottom": "1", "left": "1", "isLinked": true
        }));
        match dims {
            Some(SettingValue::Dimensions(d)) => {
                assert_eq!(d.right, "1");
                assert!(d.is_linked);
            }
            other => panic!("expected dimensions, got {other:?}"),
        }
        assert_eq!(SettingValue::from_json(&json!([1, 2])), None);
    }

    #[test]
    fn zero_and_false_are_not_blank() {
        assert!(!SettingValue::Number(0.0).is_blank());
        assert!(!SettingValue::Flag(false).is_blank());
        assert!(!SettingValue::Text("no".into()).is_blank());
        assert!(SettingValue::Text(String::new()).is_blank());
        assert!(SettingValue::Empty.is_blank());
    }

    #[test]
    fn toggle_parsing_is_three_way() {
        assert_eq!(Toggle::from_setting(&SettingValue::Text("yes".into())), Some(Toggle::On));
        assert_eq!(Toggle::from_setting(&SettingValue::Text(String::new())), Some(Toggle::Off));
        assert_eq!(Toggle::from_setting(&SettingValue::Empty), Some(Toggle::Unset));
        assert_eq!(Toggle::from_setting(&SettingValue::Text("maybe".into())), None);
        assert!(Toggle::Unset.is_on(true));
        assert!(!Toggle::Unset.is_on(false));
    }

    #[test]
    fn counts_accept_numeric_strings() {
        assert_eq!(u32::from_setting(&SettingValue::Text("4".into())), Some(4));
        assert_eq!(u32::from_setting(&SettingValue::Number(0.0)), Some(0));
        assert_eq!(u32::from_setting(&SettingValue::Number(-1.0)), None);
        assert_eq!(u32::from_setting(&SettingValue::Text("abc".into())), None);
    }
}
