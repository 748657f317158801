//! CLI argument parsing for vendor-cards.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use vendor_cards_core::{ClickTarget, VendorId};

#[derive(Parser, Debug)]
#[command(name = "vendor-cards")]
#[command(about = "Render the location vendor card gallery", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to ~/.config/vendor-cards/config.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Vendor store file, overriding the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Also write logs to a timestamped file in the temp directory
    #[arg(long, global = true)]
    pub log_file: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the gallery
    Render {
        /// Maximum number of cards (-1 for all)
        #[arg(long, allow_negative_numbers = true)]
        count: Option<String>,

        /// Only vendors tagged with this exact location
        #[arg(long)]
        location: Option<String>,

        /// Cards per row
        #[arg(long)]
        row_size: Option<usize>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Render the gallery described by a `[location_vendors ...]` directive
    Shortcode {
        /// Text containing the directive
        text: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
        format: OutputFormat,
    },

    /// List location terms in the store
    Locations,

    /// Write a default config and an empty store with the predefined locations
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Replay clicks against the rendered gallery and print each state
    Toggle {
        /// Clicks: `select:<id>`, `close`, `backdrop`, `content`
        #[arg(required = true)]
        clicks: Vec<String>,

        /// Location filter for the rendered gallery
        #[arg(long)]
        location: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Html,
}

/// Parse one click argument.
pub fn parse_click(arg: &str) -> Result<ClickTarget> {
    if let Some(id) = arg.strip_prefix("select:") {
        if id.is_empty() {
            bail!("select needs a card id, e.g. select:12");
        }
        return Ok(ClickTarget::Card(VendorId::from(id)));
    }

    match arg {
        "close" => Ok(ClickTarget::CloseControl),
        "backdrop" => Ok(ClickTarget::Backdrop),
        "content" => Ok(ClickTarget::PanelContent),
        other => bail!("unknown click {other:?} (expected select:<id>, close, backdrop or content)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_render_args() {
        let cli = Cli::try_parse_from([
            "vendor-cards",
            "render",
            "--count",
            "-1",
            "--location",
            "Downtown",
            "--format",
            "html",
        ])
        .unwrap();

        let Commands::Render {
            count,
            location,
            format,
            row_size,
        } = cli.command
        else {
            panic!("expected render");
        };
        assert_eq!(count.as_deref(), Some("-1"));
        assert_eq!(location.as_deref(), Some("Downtown"));
        assert_eq!(format, OutputFormat::Html);
        assert!(row_size.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "vendor-cards",
            "locations",
            "--store",
            "/tmp/v.json",
            "--debug",
        ])
        .unwrap();

        assert!(cli.debug);
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/v.json")));
    }

    #[test]
    fn test_toggle_requires_clicks() {
        assert!(Cli::try_parse_from(["vendor-cards", "toggle"]).is_err());
    }

    #[test]
    fn test_parse_click() {
        assert_eq!(
            parse_click("select:2").unwrap(),
            ClickTarget::Card(VendorId::from("2"))
        );
        assert_eq!(parse_click("close").unwrap(), ClickTarget::CloseControl);
        assert_eq!(parse_click("backdrop").unwrap(), ClickTarget::Backdrop);
        assert_eq!(parse_click("content").unwrap(), ClickTarget::PanelContent);
        assert!(parse_click("select:").is_err());
        assert!(parse_click("open").is_err());
    }
}
