// Command line flags. Anything given here wins over the config file.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "light-grid", version, about = "Animated grid background with input readouts")]
pub struct Cli {
    /// Config file (default: ./light-grid.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory containing theme.toml and the grid images
    #[arg(long)]
    pub theme_dir: Option<PathBuf>,

    /// Text file shown in the centre panel
    #[arg(long)]
    pub text: Option<PathBuf>,

    /// Frame rate cap
    #[arg(long)]
    pub fps: Option<usize>,

    /// Debug logging (per-second FPS, layout passes)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.theme_dir {
            config.theme_dir = dir.clone();
        }
        if let Some(text) = &self.text {
            config.text_file = text.clone();
        }
        if let Some(fps) = self.fps {
            config.target_fps = fps;
        }
    }

    /// Default tracing filter when RUST_LOG is not set.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "light_grid=debug" } else { "light_grid=info" }
    }
}
