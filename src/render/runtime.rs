use anyhow::{Context, Result};
use maud::html;
use tracing::{debug, info};

use super::layout::{LayoutRegistry, TemplateRef};
use super::templates::DisplayFlags;
use crate::carousel::{self, CarouselConfig};
use crate::config::{SiteConfig, WidgetConfig};
use crate::content::{self, ContentQuery, ContentSource};
use crate::settings::{Breakpoint, SettingsBag, WidgetSettings};

/// Output of one widget render.
#[derive(Debug, Clone)]
pub struct RenderedWidget {
    pub widget_id: String,
    /// `<layout>/<style>` of the template that was applied.
    pub template: String,
    pub options: CarouselConfig,
    /// Number of items rendered (at least one).
    pub items: usize,
    pub html: String,
}

/// Renderer is responsible for:
/// - selecting the layout/style template before anything is produced
/// - building the carousel runtime options
/// - querying the content source and adapting its records
/// - wrapping the rendered items in the carousel container markup
///
/// It holds no per-render state; one instance can serve any number of widgets.
#[derive(Debug, Clone)]
pub struct Renderer {
    registry: LayoutRegistry,
    site: SiteConfig,
}

impl Renderer {
    /// Renderer with the built-in layouts.
    pub fn new(site: SiteConfig) -> Self {
        Self::with_registry(site, LayoutRegistry::builtin())
    }

    pub fn with_registry(site: SiteConfig, registry: LayoutRegistry) -> Self {
        Self { registry, site }
    }

    pub fn registry(&self) -> &LayoutRegistry {
        &self.registry
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// Resolve the template for a widget's settings.
    fn select<'a>(&'a self, widget_id: &str, settings: &WidgetSettings) -> Result<TemplateRef<'a>> {
        let layout = settings.layout();
        let template = self
            .registry
            .select(&layout, settings.layout_style.as_deref())
            .with_context(|| format!("Widget '{widget_id}' cannot be rendered"))?;
        debug!(
            target: "owce::render",
            widget = %widget_id,
            template = %template.path(),
            "Template selected"
        );
        Ok(template)
    }

    /// Carousel runtime options only. The layout is still checked.
    pub fn options(&self, widget_id: &str, bag: &SettingsBag) -> Result<CarouselConfig> {
        let settings = WidgetSettings::from_bag(bag);
        self.select(widget_id, &settings)?;
        Ok(carousel::build_from_settings(&settings))
    }

    /// Render a configured widget with the content source it describes.
    pub fn render_widget(&self, widget_id: &str, widget: &WidgetConfig) -> Result<RenderedWidget> {
        let source = content::build_source_from_config(&widget.content);
        self.render(widget_id, &widget.settings, source.as_ref())
    }

    /// Render one widget.
    ///
    /// Either the whole widget is produced or an error is returned; no partial
    /// markup escapes.
    pub fn render(&self, widget_id: &str, bag: &SettingsBag, source: &dyn ContentSource) -> Result<RenderedWidget> {
        let settings = WidgetSettings::from_bag(bag);
        let template = self.select(widget_id, &settings)?;

        let options = carousel::build_from_settings(&settings);
        let options_json = options.to_runtime_json()?;
        let flags = DisplayFlags::from_settings(&settings);

        let query = ContentQuery::from_settings(&settings)
            .with_context(|| format!("Widget '{widget_id}' has an invalid content query"))?;
        let records = source
            .fetch(&query)
            .with_context(|| format!("Content source '{}' failed for widget '{widget_id}'", source.name()))?;
        let items = content::adapt(&records, &self.site);

        let markup = html! {
            div class=(container_class(&options)) {
                div id=(format!("owce-carousel-{widget_id}"))
                    class=(carousel_class(&template))
                    data-options=(options_json) {
                    @for item in &items {
                        (template.render(item, &flags))
                    }
                }
            }
        };

        info!(
            target: "owce::render",
            widget = %widget_id,
            template = %template.path(),
            source = source.name(),
            items = items.len(),
            "Widget rendered"
        );

        Ok(RenderedWidget {
            widget_id: widget_id.to_string(),
            template: template.path(),
            options,
            items: items.len(),
            html: markup.into_string(),
        })
    }
}

fn container_class(options: &CarouselConfig) -> String {
    let mut class = String::from("js-owce-carousel-container owce-carousel-container");
    for bp in [Breakpoint::Desktop, Breakpoint::Tablet, Breakpoint::Mobile] {
        if options.responsive.get(bp).is_some_and(|e| !e.nav) {
            class.push_str(" owce-carousel-no-nav");
            if bp != Breakpoint::Desktop {
                class.push('-');
                class.push_str(bp.as_str());
            }
        }
    }
    class
}

fn carousel_class(template: &TemplateRef<'_>) -> String {
    format!(
        "owl-carousel owl-theme js-owce-carousel owce-carousel owce-carousel-{0} owce-carousel-{0}-{1}",
        template.layout, template.style
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentRecord, InlineSource};
    use crate::render::LookupError;
    use serde_json::json;

    fn site() -> SiteConfig {
        SiteConfig {
            url: "https://example.test".into(),
            placeholder_image: "https://example.test/ph.png".into(),
        }
    }

    fn records(n: u64) -> Vec<ContentRecord> {
        (1..=n)
            .map(|id| {
                serde_json::from_value(json!({
                    "id": id,
                    "title": format!("Post {id}"),
                    "date": format!("2024-05-{:02} 09:00:00", id),
                    "permalink": format!("https://example.test/post-{id}"),
                    "categories": [{"id": 2, "name": "News", "link": "https://example.test/news"}]
                }))
                .unwrap()
            })
            .collect()
    }

    fn bag(v: serde_json::Value) -> SettingsBag {
        SettingsBag::from_value(v).unwrap()
    }

    #[test]
    fn renders_selected_template_for_every_item_in_order() {
        let renderer = Renderer::new(site());
        let settings = bag(json!({
            "layout": "rdatos",
            "layout_rdatos": "two",
            "items_count": 3,
            "items_count_tablet": 2,
            "items_count_mobile": 1,
            "show_nav": "yes",
            "show_nav_mobile": "",
            "items_load": 5,
            "layout_order_by": "none"
        }));
        let out = renderer.render("abc", &settings, &InlineSource::new(records(5))).unwrap();

        assert_eq!(out.template, "rdatos/two");
        assert_eq!(out.items, 5);

        let table = &out.options.responsive;
        let summary: Vec<(u32, u32, bool)> = table
            .entries()
            .iter()
            .map(|e| (e.min_width(), e.items, e.nav))
            .collect();
        assert_eq!(summary, vec![(0, 1, false), (768, 2, true), (1024, 3, true)]);

        assert_eq!(out.html.matches("owl-rdatos-footer").count(), 5);
        let positions: Vec<usize> = (1..=5)
            .map(|id| out.html.find(&format!("carousel-item-post-{id} ")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        assert!(out.html.starts_with(
            r#"<div class="js-owce-carousel-container owce-carousel-container owce-carousel-no-nav-mobile">"#
        ));
        assert!(out.html.contains(r#"id="owce-carousel-abc""#));
        assert!(out.html.contains("owce-carousel-rdatos owce-carousel-rdatos-two"));
        assert!(out.html.contains("data-options=\"{&quot;margin&quot;:10"));
    }

    #[test]
    fn empty_source_renders_placeholder() {
        let renderer = Renderer::new(site());
        let out = renderer
            .render("w1", &bag(json!({"layout": "basic"})), &InlineSource::empty())
            .unwrap();
        assert_eq!(out.template, "basic/one");
        assert_eq!(out.items, 1);
        assert!(out.html.contains("carousel-item-placeholder"));
        assert!(out.html.contains("Item 1"));
        assert!(out.html.contains(r#"src="https://example.test/ph.png""#));
    }

    #[test]
    fn unknown_layout_aborts_before_fetching() {
        struct Exploding;
        impl ContentSource for Exploding {
            fn name(&self) -> &'static str {
                "exploding"
            }
            fn fetch(&self, _: &ContentQuery) -> Result<Vec<ContentRecord>> {
                panic!("content must not be fetched for an unknown layout");
            }
        }

        let renderer = Renderer::new(site());
        let err = renderer
            .render("w2", &bag(json!({"layout": "grid"})), &Exploding)
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<LookupError>(),
            Some(&LookupError::UnknownLayout("grid".into()))
        );
    }

    #[test]
    fn source_errors_propagate() {
        struct Failing;
        impl ContentSource for Failing {
            fn name(&self) -> &'static str {
                "failing"
            }
            fn fetch(&self, _: &ContentQuery) -> Result<Vec<ContentRecord>> {
                anyhow::bail!("backend down")
            }
        }
        let err = Renderer::new(site())
            .render("w3", &bag(json!({})), &Failing)
            .unwrap_err();
        assert!(format!("{err:#}").contains("backend down"));
    }

    #[test]
    fn options_check_layout() {
        let renderer = Renderer::new(site());
        assert!(renderer.options("w", &bag(json!({"layout": "nope"}))).is_err());
        let opts = renderer.options("w", &bag(json!({"autoplay": "yes"}))).unwrap();
        assert!(opts.autoplay);
    }
}
