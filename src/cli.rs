//! Command line plumbing shared by the binaries.

use std::path::PathBuf;

use clap::Args;
use tracing_subscriber::EnvFilter;

use crate::icon_gen::GenerateOptions;
use crate::style::{parse_css_color, LogoStyle};

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Directory the PNG icons are written to.
    #[clap(short, long, value_name = "DIR", default_value = "public/icons")]
    pub out_dir: PathBuf,

    /// Path of the multi-resolution favicon.
    #[clap(long, value_name = "FILE", default_value = "public/favicon.ico")]
    pub favicon: PathBuf,

    /// Font file to try before the built-in candidates. May be repeated.
    #[clap(long = "font", value_name = "PATH")]
    pub fonts: Vec<PathBuf>,

    /// Replace the gold accent (CSS color format)
    #[clap(long, value_name = "COLOR")]
    pub accent: Option<String>,
}

impl GenerateArgs {
    pub fn into_options(self, style: LogoStyle) -> GenerateOptions {
        let mut style = style.with_fonts(&self.fonts);
        if let Some(accent) = &self.accent {
            match parse_css_color(accent) {
                Some(color) => style = style.with_accent(color),
                None => tracing::warn!("ignoring unparseable accent color {accent:?}"),
            }
        }

        GenerateOptions {
            style,
            out_dir: self.out_dir,
            favicon: self.favicon,
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG` (warnings and up by default).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
