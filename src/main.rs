use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Parser;
use tracing::{debug, error, info, warn};

use owce::config as cfg;
use owce::render::Renderer;
use owce::settings::{JsonControlHost, OPTIONS, register_controls};

/// owce CLI
#[derive(Debug, Parser)]
#[command(
    name = owce::PKG_NAME,
    version = owce::PKG_VERSION,
    about = "Resolve carousel widget settings and render the widgets' markup"
)]
struct Args {
    /// Path to the JSON configuration file
    #[arg(short = 'c', long = "config", default_value = "config/widgets.json")]
    config: PathBuf,

    /// Render only this widget id (default: every configured widget, in id order)
    #[arg(short = 'w', long = "widget")]
    widget: Option<String>,

    /// Print the carousel runtime options instead of markup
    #[arg(long = "options-only")]
    options_only: bool,

    /// Set log level (e.g., trace, debug, info, warn, error). Overrides RUST_LOG.
    #[arg(long = "log-level")]
    log_level: Option<String>,

    /// Print the JSON Schema for the configuration and exit
    #[arg(long = "print-schema")]
    print_schema: bool,

    /// Print the control descriptors of every widget option and exit
    #[arg(long = "print-controls")]
    print_controls: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Honor --log-level over RUST_LOG.
    match &args.log_level {
        Some(level) => owce::init_tracing_with_level(owce::parse_level(level).unwrap_or(tracing::Level::INFO)),
        None => owce::init_tracing(),
    }
    info!(
        version = owce::PKG_VERSION,
        config = %args.config.display(),
        options_only = args.options_only,
        "Starting owce"
    );

    if args.print_schema {
        let schema = cfg::generate_schema();
        let json = serde_json::to_string_pretty(&schema)?;
        println!("{json}");
        return Ok(());
    }

    if args.print_controls {
        let mut host = JsonControlHost::new();
        let count = register_controls(OPTIONS, &mut host)?;
        debug!(target: "owce", count, "Controls registered");
        println!("{}", serde_json::to_string_pretty(&host.to_json()?)?);
        return Ok(());
    }

    // Load configuration
    let config = cfg::load_from_path_async(&args.config).await?;
    debug!(target: "owce", widgets = config.widgets.len(), "Configuration loaded successfully");

    let cfg::Config { site, mut widgets } = config;
    let selected: Vec<(String, cfg::WidgetConfig)> = match &args.widget {
        Some(id) => {
            let widget = widgets
                .remove(id)
                .with_context(|| format!("Widget '{id}' is not configured"))?;
            vec![(id.clone(), widget)]
        }
        None => widgets.into_iter().collect(),
    };
    if selected.is_empty() {
        warn!("No widgets configured; nothing to render");
        return Ok(());
    }

    let renderer = Arc::new(Renderer::new(site));
    let options_only = args.options_only;

    // Each widget renders independently on a blocking task; output keeps id order.
    let handles: Vec<_> = selected
        .into_iter()
        .map(|(id, widget)| {
            let renderer = Arc::clone(&renderer);
            let task_id = id.clone();
            let handle = tokio::task::spawn_blocking(move || -> anyhow::Result<String> {
                if options_only {
                    let options = renderer.options(&task_id, &widget.settings)?;
                    Ok(serde_json::to_string_pretty(&options)?)
                } else {
                    Ok(renderer.render_widget(&task_id, &widget)?.html)
                }
            });
            (id, handle)
        })
        .collect();

    let mut failed = 0usize;
    for (id, handle) in handles {
        match handle.await {
            Ok(Ok(output)) => println!("{output}"),
            Ok(Err(err)) => {
                failed += 1;
                error!(widget = %id, error = %format!("{err:#}"), "Failed to render widget");
            }
            Err(err) => {
                failed += 1;
                error!(widget = %id, error = %err, "Render task panicked");
            }
        }
    }

    if failed > 0 {
        bail!("{failed} widget(s) failed to render");
    }
    info!("owce finished");
    Ok(())
}
