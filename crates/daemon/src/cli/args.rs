pub use clap::Parser;

use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "sealnote")]
#[command(about = "Share password-protected notes encoded with a one-time Cipher Map")]
pub struct Args {
    /// Note service URL (defaults to the port in config, then http://localhost:5010)
    #[arg(long, global = true)]
    pub remote: Option<Url>,

    /// Path to the sealnote config directory (defaults to ~/.sealnote)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: crate::Command,
}
