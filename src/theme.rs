// Theme images. A theme is a directory with a theme.toml manifest:
//
//   [images]
//   "grid.base" = "grid_base.png"
//   "grid.mask" = "grid_mask.png"
//
// Loading happens on a background thread; the screen paints without the grid
// until the images arrive (or forever, if they never do).

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::Error;
use crate::types::Image;

pub const GRID_BASE: &str = "grid.base";
pub const GRID_MASK: &str = "grid.mask";
pub const MANIFEST_FILE: &str = "theme.toml";

#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    images: BTreeMap<String, PathBuf>,
}

#[derive(Debug, Default)]
pub struct Theme {
    images: HashMap<String, Image>,
}

impl Theme {
    pub fn image(&self, name: &str) -> Option<&Image> {
        self.images.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, image: Image) {
        self.images.insert(name.into(), image);
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Read `dir/theme.toml` and decode every image it lists.
    /// Images that fail to decode are logged and left out.
    pub fn load(dir: &Path) -> Result<Self, Error> {
        let manifest_path = dir.join(MANIFEST_FILE);
        let raw = std::fs::read_to_string(&manifest_path).map_err(|e| Error::ThemeManifest {
            path: manifest_path.clone(),
            reason: e.to_string(),
        })?;
        let manifest: Manifest = toml::from_str(&raw).map_err(|e| Error::ThemeManifest {
            path: manifest_path.clone(),
            reason: e.to_string(),
        })?;

        let mut theme = Theme::default();
        for (name, rel) in manifest.images {
            match decode_image(&name, &dir.join(rel)) {
                Ok(img) => theme.insert(name, img),
                Err(e) => warn!("{e}"),
            }
        }
        Ok(theme)
    }
}

/// Decode an image file into 0xAARRGGBB pixels.
pub fn decode_image(name: &str, path: &Path) -> Result<Image, Error> {
    let rgba = image::open(path)
        .map_err(|e| Error::ThemeImage { name: name.to_string(), reason: format!("{}: {e}", path.display()) })?
        .to_rgba8();

    let (w, h) = rgba.dimensions();
    let pixels = rgba
        .pixels()
        .map(|p| {
            let [r, g, b, a] = p.0;
            (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
        })
        .collect();
    Ok(Image { width: w as usize, height: h as usize, pixels })
}

/// Load the theme on a worker thread. The receiver yields at most one theme;
/// if the manifest can't be read the channel just closes.
pub fn spawn_loader(dir: PathBuf) -> Receiver<Theme> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || match Theme::load(&dir) {
        Ok(theme) => {
            info!(dir = %dir.display(), images = theme.len(), "theme loaded");
            let _ = tx.send(theme);
        }
        Err(e) => warn!("{e}; continuing without theme"),
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn write_png(path: &Path, rgba: [u8; 4]) {
        RgbaImage::from_pixel(2, 3, Rgba(rgba)).save(path).unwrap();
    }

    #[test]
    fn loads_images_named_in_manifest() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("base.png"), [10, 20, 30, 255]);
        write_png(&dir.path().join("mask.png"), [0, 0, 0, 0]);
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            "[images]\n\"grid.base\" = \"base.png\"\n\"grid.mask\" = \"mask.png\"\n",
        )
        .unwrap();

        let theme = Theme::load(dir.path()).unwrap();
        let base = theme.image(GRID_BASE).unwrap();
        assert_eq!((base.width, base.height), (2, 3));
        assert!(base.pixels.iter().all(|&p| p == 0xFF_0A_14_1E));
        assert_eq!(theme.image(GRID_MASK).unwrap().pixels[0], 0);
    }

    #[test]
    fn broken_image_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("base.png"), [1, 2, 3, 255]);
        std::fs::write(dir.path().join("mask.png"), b"not a png").unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            "[images]\n\"grid.base\" = \"base.png\"\n\"grid.mask\" = \"mask.png\"\n",
        )
        .unwrap();

        let theme = Theme::load(dir.path()).unwrap();
        assert!(theme.image(GRID_BASE).is_some());
        assert!(theme.image(GRID_MASK).is_none());
    }

    #[test]
    fn missing_manifest_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(Theme::load(dir.path()), Err(Error::ThemeManifest { .. })));
    }

    #[test]
    fn loader_closes_channel_without_theme() {
        let dir = tempfile::tempdir().unwrap();
        let rx = spawn_loader(dir.path().to_path_buf());
        assert!(rx.recv().is_err());
    }

    #[test]
    fn loader_delivers_theme() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "").unwrap();
        let rx = spawn_loader(dir.path().to_path_buf());
        let theme = rx.recv().unwrap();
        assert!(theme.is_empty());
    }
}
