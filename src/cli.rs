use clap::Parser;
use std::path::PathBuf;

/// Terminal dashboard demonstrating progress, notification and modal overlays
#[derive(Debug, Parser)]
#[command(name = "overlay-tui", version)]
pub struct Cli {
    /// File fetched when pressing `d`
    #[arg(long, default_value = "https://www.rust-lang.org/")]
    pub url: String,
    /// Where the fetched file is written
    #[arg(long, default_value = "overlay-tui-download.html")]
    pub output: PathBuf,
    /// Write the effective config to ~/.overlay-tui/config.json and exit
    #[arg(long)]
    pub save_config: bool,
}
