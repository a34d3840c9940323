// One error type for the whole app.
// Every variant states *where* things went wrong.
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Creating the window failed
    #[error("Window init error: {0}")]
    WindowInit(String),
    /// Pushing the frame buffer to the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String),
    /// Reading or parsing the config file failed
    #[error("Config error ({path}): {reason}")]
    Config { path: PathBuf, reason: String },
    /// theme.toml missing or malformed
    #[error("Theme manifest error ({path}): {reason}")]
    ThemeManifest { path: PathBuf, reason: String },
    /// A theme image could not be decoded
    #[error("Theme image '{name}' error: {reason}")]
    ThemeImage { name: String, reason: String },
    /// The informational text file could not be read
    #[error("Text load error ({path}): {source}")]
    TextLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Light band needs at least two samples
    #[error("Overlay height must be > 1, got {0}")]
    OverlayHeight(usize),
    /// Raw bytes did not match the target image size
    #[error("Image upload error: expected {expected} bytes, got {actual}")]
    ImageUpload { expected: usize, actual: usize },
}
