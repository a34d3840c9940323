// Settings loaded from light-grid.toml. Every field has a default, so an empty
// or missing file gives the stock 800x600 window at 60 Hz.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::compositor::DEFAULT_CYCLE_MS;
use crate::error::Error;
use crate::overlay;

/// Looked up in the working directory when no --config is given.
pub const DEFAULT_CONFIG_FILE: &str = "light-grid.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: usize,
    pub height: usize,
    pub title: String,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { width: 800, height: 600, title: "Light Grid".to_string(), resizable: true }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Light band height in pixels.
    pub height: usize,
    /// Time for one sweep, in milliseconds.
    pub cycle_ms: u64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self { height: overlay::DEFAULT_HEIGHT, cycle_ms: DEFAULT_CYCLE_MS }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub target_fps: usize,
    pub overlay: OverlayConfig,
    /// Directory holding theme.toml and the grid images.
    pub theme_dir: PathBuf,
    /// Text shown in the centre panel.
    pub text_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            target_fps: 60,
            overlay: OverlayConfig::default(),
            theme_dir: PathBuf::from("assets/theme"),
            text_file: PathBuf::from("assets/text.txt"),
        }
    }
}

impl Config {
    /// Load `path`, or the default file if it exists, or built-in defaults.
    /// An explicitly requested file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let p = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !p.exists() {
                    debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                p
            }
        };

        let raw = std::fs::read_to_string(&path)
            .map_err(|e| Error::Config { path: path.clone(), reason: e.to_string() })?;
        let config = Self::parse(&raw, &path)?;
        info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn parse(raw: &str, path: &Path) -> Result<Self, Error> {
        toml::from_str(raw).map_err(|e| Error::Config { path: path.to_path_buf(), reason: e.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = Config::parse("", Path::new("x.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.window.width, 800);
        assert_eq!(cfg.window.height, 600);
        assert_eq!(cfg.target_fps, 60);
        assert_eq!(cfg.overlay.height, 128);
        assert_eq!(cfg.overlay.cycle_ms, 2000);
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let raw = r#"
            target_fps = 30
            theme_dir = "themes/dark"

            [window]
            title = "Demo"
        "#;
        let cfg = Config::parse(raw, Path::new("x.toml")).unwrap();
        assert_eq!(cfg.target_fps, 30);
        assert_eq!(cfg.theme_dir, PathBuf::from("themes/dark"));
        assert_eq!(cfg.window.title, "Demo");
        assert_eq!(cfg.window.width, 800);
        assert_eq!(cfg.overlay, OverlayConfig::default());
    }

    #[test]
    fn bad_types_are_reported_with_path() {
        let err = Config::parse("target_fps = \"fast\"", Path::new("bad.toml")).unwrap_err();
        match err {
            Error::Config { path, .. } => assert_eq!(path, PathBuf::from("bad.toml")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn load_reads_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[overlay]\nheight = 64\ncycle_ms = 500").unwrap();

        let cfg = Config::load(Some(file.path())).unwrap();
        assert_eq!(cfg.overlay, OverlayConfig { height: 64, cycle_ms: 500 });
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(Config::load(Some(&missing)), Err(Error::Config { .. })));
    }
}
