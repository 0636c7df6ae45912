/*!
Layout selection and markup rendering.

This module wires together:
- `layout`: the registry of (layout, style) templates and `select`
- `templates`: per-item templates, shared partials, display flags, tags and image sizes
- `runtime`: `Renderer`, which runs one widget render end to end

Example:
```
use owce::config::SiteConfig;
use owce::content::InlineSource;
use owce::render::Renderer;
use owce::settings::SettingsBag;
use serde_json::json;

let renderer = Renderer::new(SiteConfig::default());
let bag = SettingsBag::from_value(json!({"layout": "image"})).unwrap();
let out = renderer.render("demo", &bag, &InlineSource::empty()).unwrap();
assert_eq!(out.template, "image/one");
assert_eq!(out.items, 1);
```
*/

pub mod layout;
pub mod runtime;
pub mod templates;

pub use layout::{LayoutDef, LayoutRegistry, LookupError, StyleDef, TemplateFn, TemplateRef};
pub use runtime::{RenderedWidget, Renderer};
pub use templates::{DisplayFlags, HtmlTag, IMAGE_SIZES, ImageSize};
