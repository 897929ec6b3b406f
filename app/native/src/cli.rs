//! Command-line arguments for the Halo binary.

use std::path::PathBuf;

use clap::Parser;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Halo - an always-on-top assistant overlay.
#[derive(Parser, Debug)]
#[command(name = "halo")]
#[command(author, version = APP_VERSION, about, long_about = None)]
pub struct Cli {
    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file search paths.
    /// Supports JSONC format (JSON with comments).
    #[arg(long, short, env = "HALO_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `halo_lib=trace`. Takes precedence over
    /// `HALO_LOG` and `RUST_LOG`.
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,
}

impl Cli {
    /// Applies the arguments that must be in place before the app starts.
    pub fn apply(&self) {
        if let Some(path) = &self.config
            && !crate::config::set_custom_config_path(path.clone())
        {
            tracing::warn!(path = %path.display(), "configuration path was already set");
        }
    }
}
