//! vendor-cards CLI
//!
//! Terminal front end for the vendor card gallery. Provides:
//! - Rendering a gallery from a store file as JSON or HTML
//! - Rendering from a `[location_vendors ...]` directive
//! - Store initialization and location listing
//! - Replaying clicks against the detail-view toggle

use anyhow::{Context, Result};
use clap::Parser;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use vendor_cards_core::config::{Config, Directories};
use vendor_cards_core::gallery::filter_from_atts;
use vendor_cards_core::{DetailToggle, Gallery, InMemoryStore, JsonFileStore, RowLayout};

mod cli;

use cli::{Cli, Commands, OutputFormat, parse_click};

/// Set up logging to stderr, optionally mirrored to a timestamped file.
fn setup_logging(debug_flag: bool, log_file: bool) {
    let level = if debug_flag { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("vendor_cards={level}")));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true);

    let file_layer = log_file.then(|| {
        let temp_dir = std::env::temp_dir();
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let log_filename = format!("vendor-cards-{timestamp}.log");

        let file_appender = tracing_appender::rolling::never(&temp_dir, &log_filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        std::mem::forget(guard);

        fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true)
    });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .with(filter)
        .init();
}

/// Resolved config plus the store file it points at
struct AppContext {
    config: Config,
    dirs: Directories,
    store_path: PathBuf,
}

fn load_context(cli: &Cli) -> Result<AppContext> {
    let dirs = Directories::new();
    let config_path = cli.config.clone().unwrap_or_else(|| dirs.config_file.clone());
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    config.validate()?;

    let store_path = cli
        .store
        .clone()
        .unwrap_or_else(|| config.store_path(&dirs.store_file));
    debug!("Using store {}", store_path.display());

    Ok(AppContext {
        config,
        dirs,
        store_path,
    })
}

fn print_gallery(gallery: &Gallery, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&gallery.items)?),
        OutputFormat::Html => println!("{}", gallery.to_html()),
    }
    Ok(())
}

fn run_render(
    ctx: &AppContext,
    count: Option<String>,
    location: Option<String>,
    row_size: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let mut atts = HashMap::new();
    if let Some(count) = count {
        atts.insert("count".to_string(), count);
    }
    if let Some(location) = location {
        atts.insert("location".to_string(), location);
    }
    let filter = filter_from_atts(&atts, &ctx.config.base_filter())?;

    let layout = match row_size {
        Some(size) => RowLayout::try_from_size(size)?,
        None => ctx.config.layout()?,
    };

    let store = JsonFileStore::new(&ctx.store_path);
    let gallery = Gallery::build(&store, &filter, layout)?;
    info!("Rendered {} vendor cards", gallery.len());
    print_gallery(&gallery, format)
}

fn run_shortcode(ctx: &AppContext, text: &str, format: OutputFormat) -> Result<()> {
    let store = JsonFileStore::new(&ctx.store_path);
    let gallery = Gallery::from_shortcode(&store, text, &ctx.config)?;
    print_gallery(&gallery, format)
}

fn run_locations(ctx: &AppContext) -> Result<()> {
    let store = InMemoryStore::load(&ctx.store_path, ctx.config.schema())
        .with_context(|| format!("Failed to read {}", ctx.store_path.display()))?;
    for location in store.locations() {
        println!("{location}");
    }
    Ok(())
}

fn run_init(ctx: &AppContext, config_path: Option<PathBuf>, force: bool) -> Result<()> {
    ctx.dirs
        .ensure_exists()
        .context("Failed to create application directories")?;

    let config_path = config_path.unwrap_or_else(|| ctx.dirs.config_file.clone());
    if force || !config_path.exists() {
        ctx.config.save(&config_path)?;
        println!("Wrote {}", config_path.display());
    } else {
        println!("Kept existing {}", config_path.display());
    }

    if force || !ctx.store_path.exists() {
        InMemoryStore::new(ctx.config.schema()).save(&ctx.store_path)?;
        println!("Wrote {}", ctx.store_path.display());
    } else {
        println!("Kept existing {}", ctx.store_path.display());
    }
    Ok(())
}

fn run_toggle(ctx: &AppContext, clicks: &[String], location: Option<String>) -> Result<()> {
    let mut atts = HashMap::new();
    if let Some(location) = location {
        atts.insert("location".to_string(), location);
    }
    let filter = filter_from_atts(&atts, &ctx.config.base_filter())?;

    let store = JsonFileStore::new(&ctx.store_path);
    let gallery = Gallery::build(&store, &filter, ctx.config.layout()?)?;
    let mut toggle = DetailToggle::new(gallery.card_ids().cloned());

    for raw in clicks {
        let click = parse_click(raw)?;
        let transition = toggle.handle_click(&click);
        debug!("{raw}: {transition:?}");
        println!(
            "{}",
            serde_json::json!({
                "click": raw,
                "state": toggle.state(),
                "scrollLocked": toggle.is_scroll_locked(),
            })
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.debug, cli.log_file);

    let ctx = load_context(&cli)?;

    match cli.command {
        Commands::Render {
            count,
            location,
            row_size,
            format,
        } => run_render(&ctx, count, location, row_size, format),
        Commands::Shortcode { text, format } => run_shortcode(&ctx, &text, format),
        Commands::Locations => run_locations(&ctx),
        Commands::Init { force } => run_init(&ctx, cli.config.clone(), force),
        Commands::Toggle { clicks, location } => run_toggle(&ctx, &clicks, location),
    }
}
