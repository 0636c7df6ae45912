//! Widget settings: the host's flat settings bag, the declarative option table,
//! breakpoint-aware resolution and the typed settings record.
//!
//! Example:
//! ```
//! use owce::settings::{Breakpoint, SettingValue, SettingsBag, resolve};
//! use serde_json::json;
//!
//! let bag = SettingsBag::from_value(json!({"items_count": 3, "items_count_mobile": 0})).unwrap();
//! assert_eq!(resolve(&bag, "items_count", Breakpoint::Mobile), SettingValue::Number(0.0));
//! assert_eq!(resolve(&bag, "items_count", Breakpoint::Tablet), SettingValue::Number(3.0));
//! ```

pub mod bag;
pub mod controls;
pub mod options;
pub mod record;
pub mod resolver;
pub mod value;

pub use bag::{Breakpoint, FIELD_PREFIX, SettingsBag};
pub use controls::{ControlDescriptor, ControlHost, JsonControlHost, describe, register_controls};
pub use options::{Fallback, OPTIONS, OptionDefault, OptionKind, OptionSpec};
pub use record::WidgetSettings;
pub use resolver::{Responsive, resolve, resolve_or};
pub use value::{Dimensions, FromSetting, SettingValue, Size, Toggle};
