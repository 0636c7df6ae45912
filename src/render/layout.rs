use maud::Markup;
use thiserror::Error;
use tracing::{debug, warn};

use super::templates::{self, DisplayFlags};
use crate::content::ContentItem;

/// Renders one item.
pub type TemplateFn = fn(&ContentItem, &DisplayFlags) -> Markup;

/// Layout/style selection failures. Fatal to the render that hit them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("unknown layout '{0}'")]
    UnknownLayout(String),
    #[error("layout '{0}' has no registered styles")]
    NoStyles(String),
}

#[derive(Debug, Clone, Copy)]
pub struct StyleDef {
    pub id: &'static str,
    pub label: &'static str,
    pub template: TemplateFn,
}

#[derive(Debug, Clone)]
pub struct LayoutDef {
    pub id: String,
    pub label: String,
    /// First entry is the default style.
    pub styles: Vec<StyleDef>,
}

impl LayoutDef {
    pub fn new(id: impl Into<String>, label: impl Into<String>, styles: Vec<StyleDef>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            styles,
        }
    }
}

/// Resolved (layout, style) pair.
#[derive(Debug, Clone, Copy)]
pub struct TemplateRef<'a> {
    pub layout: &'a str,
    pub style: &'static str,
    template: TemplateFn,
}

impl TemplateRef<'_> {
    /// `<layout>/<style>`.
    pub fn path(&self) -> String {
        format!("{}/{}", self.layout, self.style)
    }

    pub fn render(&self, item: &ContentItem, flags: &DisplayFlags) -> Markup {
        (self.template)(item, flags)
    }
}

/// Registered layouts, in registration order.
#[derive(Debug, Clone, Default)]
pub struct LayoutRegistry {
    layouts: Vec<LayoutDef>,
}

impl LayoutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The layouts shipped with the widget.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(LayoutDef::new(
            "basic",
            "Basic",
            vec![StyleDef {
                id: "one",
                label: "One",
                template: templates::basic_one,
            }],
        ));
        registry.register(LayoutDef::new(
            "image",
            "Image Only",
            vec![StyleDef {
                id: "one",
                label: "One",
                template: templates::image_one,
            }],
        ));
        registry.register(LayoutDef::new(
            "rdatos",
            "Rdatos",
            vec![
                StyleDef {
                    id: "one",
                    label: "One",
                    template: templates::rdatos_one,
                },
                StyleDef {
                    id: "two",
                    label: "Two",
                    template: templates::rdatos_two,
                },
                StyleDef {
                    id: "three",
                    label: "Three",
                    template: templates::rdatos_three,
                },
            ],
        ));
        registry
    }

    /// Add a layout, replacing any layout with the same id.
    pub fn register(&mut self, layout: LayoutDef) {
        match self.layouts.iter_mut().find(|l| l.id == layout.id) {
            Some(existing) => {
                debug!(target: "owce::render", layout = %layout.id, "Replacing registered layout");
                *existing = layout;
            }
            None => self.layouts.push(layout),
        }
    }

    pub fn contains(&self, layout: &str) -> bool {
        self.layouts.iter().any(|l| l.id == layout)
    }

    pub fn layouts(&self) -> &[LayoutDef] {
        &self.layouts
    }

    pub fn styles(&self, layout: &str) -> Option<&[StyleDef]> {
        self.layouts
            .iter()
            .find(|l| l.id == layout)
            .map(|l| l.styles.as_slice())
    }

    /// Pick the template for `layout`/`style`.
    ///
    /// An absent or unknown style selects the layout's first style; an unknown
    /// layout is an error.
    pub fn select(&self, layout: &str, style: Option<&str>) -> Result<TemplateRef<'_>, LookupError> {
        let def = self
            .layouts
            .iter()
            .find(|l| l.id == layout)
            .ok_or_else(|| LookupError::UnknownLayout(layout.to_string()))?;
        let first = def
            .styles
            .first()
            .ok_or_else(|| LookupError::NoStyles(layout.to_string()))?;

        let chosen = match style.map(str::trim).filter(|s| !s.is_empty()) {
            None => first,
            Some(wanted) => def.styles.iter().find(|s| s.id == wanted).unwrap_or_else(|| {
                warn!(
                    target: "owce::render",
                    layout,
                    style = wanted,
                    fallback = first.id,
                    "Unknown style; using the layout's first style"
                );
                first
            }),
        };

        Ok(TemplateRef {
            layout: &def.id,
            style: chosen.id,
            template: chosen.template,
        })
    }
}
