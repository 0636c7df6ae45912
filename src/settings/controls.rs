//! Control registration driven by the option table.
//!
//! `register_controls` walks [`OPTIONS`](super::options::OPTIONS) and hands one
//! descriptor per stored key to a [`ControlHost`]. A host can be a page-builder
//! bridge or, as with [`JsonControlHost`], a plain JSON document.

use anyhow::{Result, bail};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use super::bag::{Breakpoint, FIELD_PREFIX};
use super::options::{OptionKind, OptionSpec};
use crate::render::{HtmlTag, IMAGE_SIZES};

/// One selectable entry of a select-like control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

/// Everything a host needs to register one stored key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlDescriptor {
    /// Full key, including the field prefix and breakpoint suffix.
    pub key: String,
    pub option: &'static str,
    pub breakpoint: Breakpoint,
    pub label: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub description: &'static str,
    #[serde(rename = "type")]
    pub control_type: &'static str,
    pub default: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    /// `yes` for switches: the value stored when the switch is on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_value: Option<&'static str>,
}

/// Receiver of control registrations.
pub trait ControlHost {
    fn add_control(&mut self, control: ControlDescriptor) -> Result<()>;
}

/// Register every row of `table` with `host`. Returns the number of keys registered.
pub fn register_controls<H: ControlHost + ?Sized>(table: &[OptionSpec], host: &mut H) -> Result<usize> {
    let mut count = 0;
    for spec in table {
        for &bp in spec.breakpoints() {
            let control = describe(spec, bp);
            trace!(target: "owce::settings", key = %control.key, "Registering control");
            host.add_control(control)?;
            count += 1;
        }
    }
    debug!(target: "owce::settings", options = table.len(), controls = count, "Controls registered");
    Ok(count)
}

/// Descriptor for `spec` at `breakpoint`.
pub fn describe(spec: &OptionSpec, breakpoint: Breakpoint) -> ControlDescriptor {
    let mut control = ControlDescriptor {
        key: format!("{FIELD_PREFIX}{}", breakpoint.key(spec.name)),
        option: spec.name,
        breakpoint,
        label: spec.label,
        description: spec.description,
        control_type: "text",
        default: spec.default_at(breakpoint).to_json(),
        min: None,
        max: None,
        step: None,
        choices: Vec::new(),
        return_value: None,
    };

    match spec.kind {
        OptionKind::Switch => {
            control.control_type = "switcher";
            control.return_value = Some("yes");
        }
        OptionKind::Number { min, max, step } => {
            control.control_type = "number";
            control.min = min;
            control.max = max;
            control.step = Some(step);
        }
        OptionKind::Select { choices } => {
            control.control_type = "select";
            control.choices = choices
                .iter()
                .map(|&(value, label)| Choice { value, label })
                .collect();
        }
        OptionKind::ImageSize => {
            control.control_type = "select";
            control.choices = IMAGE_SIZES
                .iter()
                .map(|size| Choice {
                    value: size.name,
                    label: size.label,
                })
                .collect();
        }
        OptionKind::Tag => {
            control.control_type = "select";
            control.choices = HtmlTag::ALL
                .iter()
                .map(|tag| Choice {
                    value: tag.as_str(),
                    label: tag.label(),
                })
                .collect();
        }
        OptionKind::Size { max } => {
            control.control_type = "slider";
            control.min = Some(0.0);
            control.max = Some(max);
        }
        OptionKind::Text => {}
        OptionKind::Animation(phase) => {
            control.control_type = phase.control_type();
            control.choices = phase
                .choices()
                .map(|(value, label)| Choice { value, label })
                .collect();
        }
    }
    control
}

/// Collects registrations into a JSON object keyed by control key.
#[derive(Debug, Default)]
pub struct JsonControlHost {
    controls: Vec<ControlDescriptor>,
}

impl JsonControlHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn controls(&self) -> &[ControlDescriptor] {
        &self.controls
    }

    pub fn to_json(&self) -> Result<Value> {
        let mut map = serde_json::Map::with_capacity(self.controls.len());
        for control in &self.controls {
            map.insert(control.key.clone(), serde_json::to_value(control)?);
        }
        Ok(Value::Object(map))
    }
}

impl ControlHost for JsonControlHost {
    fn add_control(&mut self, control: ControlDescriptor) -> Result<()> {
        if self.controls.iter().any(|c| c.key == control.key) {
            bail!("Control '{}' registered twice", control.key);
        }
        self.controls.push(control);
        Ok(())
    }
}
