//! Texture and font loading
//!
//! Every load is fail-soft: a missing or broken file is logged and the slot
//! stays empty. The renderer skips sprites whose texture is missing, so the
//! game keeps running with whatever did load.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use glam::UVec2;
use image::RgbaImage;

/// Every texture the graphics skin uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Background,
    Bullet,
    Barrel,
    Base,
    Wall,
    Arrow,
    Gumba,
}

impl SpriteId {
    pub const ALL: [SpriteId; 7] = [
        SpriteId::Background,
        SpriteId::Bullet,
        SpriteId::Barrel,
        SpriteId::Base,
        SpriteId::Wall,
        SpriteId::Arrow,
        SpriteId::Gumba,
    ];

    /// Path relative to the asset directory
    pub fn file(self) -> &'static str {
        match self {
            SpriteId::Background => "images/background.jpg",
            SpriteId::Bullet => "images/bullet.png",
            SpriteId::Barrel => "images/barrel.png",
            SpriteId::Base => "images/base.png",
            SpriteId::Wall => "images/wall.jpg",
            SpriteId::Arrow => "images/arrow.png",
            SpriteId::Gumba => "images/gumba.png",
        }
    }
}

/// HUD font, relative to the asset directory
pub const FONT_FILE: &str = "fonts/ariblk.ttf";

/// Load an image as RGBA8, or log why not
pub fn load_image(path: &Path) -> Option<RgbaImage> {
    match image::open(path) {
        Ok(img) => {
            let rgba = img.to_rgba8();
            log::debug!("Loaded {:?} ({}x{})", path, rgba.width(), rgba.height());
            Some(rgba)
        }
        Err(e) => {
            log::warn!("Failed to load image {:?}: {}", path, e);
            None
        }
    }
}

/// Load a raw file (fonts), or log why not
pub fn load_bytes(path: &Path) -> Option<Vec<u8>> {
    match std::fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            log::warn!("Failed to load {:?}: {}", path, e);
            None
        }
    }
}

/// Whatever loaded from the asset directory
#[derive(Debug, Default)]
pub struct Assets {
    pub dir: PathBuf,
    images: HashMap<SpriteId, RgbaImage>,
    pub font: Option<Vec<u8>>,
}

impl Assets {
    pub fn load(dir: &Path) -> Self {
        let images: HashMap<_, _> = SpriteId::ALL
            .iter()
            .filter_map(|&id| load_image(&dir.join(id.file())).map(|img| (id, img)))
            .collect();
        let font = load_bytes(&dir.join(FONT_FILE));

        log::info!(
            "Assets from {:?}: {}/{} textures, font {}",
            dir,
            images.len(),
            SpriteId::ALL.len(),
            if font.is_some() { "loaded" } else { "missing" }
        );

        let assets = Self {
            dir: dir.to_path_buf(),
            images,
            font,
        };
        let missing = assets.missing();
        if !missing.is_empty() {
            log::warn!("Sprites without a texture will not be drawn: {:?}", missing);
        }
        assets
    }

    pub fn image(&self, id: SpriteId) -> Option<&RgbaImage> {
        self.images.get(&id)
    }

    /// Texture size in pixels, `None` if it failed to load
    pub fn size(&self, id: SpriteId) -> Option<UVec2> {
        self.image(id).map(|img| UVec2::new(img.width(), img.height()))
    }

    pub fn missing(&self) -> Vec<SpriteId> {
        SpriteId::ALL
            .into_iter()
            .filter(|id| !self.images.contains_key(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("cannon-range-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(dir.join("images")).unwrap();
        dir
    }

    #[test]
    fn test_missing_dir_loads_nothing() {
        let assets = Assets::load(Path::new("/nonexistent/cannon-range-assets"));
        assert_eq!(assets.missing().len(), SpriteId::ALL.len());
        assert!(assets.font.is_none());
        assert_eq!(assets.size(SpriteId::Bullet), None);
    }

    #[test]
    fn test_partial_assets() {
        let dir = scratch_dir("partial");
        RgbaImage::new(40, 40).save(dir.join(SpriteId::Bullet.file())).unwrap();
        std::fs::write(dir.join(SpriteId::Arrow.file()), b"not a png").unwrap();

        let assets = Assets::load(&dir);
        assert_eq!(assets.size(SpriteId::Bullet), Some(UVec2::new(40, 40)));
        assert!(assets.image(SpriteId::Arrow).is_none());
        assert_eq!(assets.missing().len(), SpriteId::ALL.len() - 1);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_bytes() {
        let dir = scratch_dir("bytes");
        let path = dir.join("blob.bin");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();
        assert_eq!(load_bytes(&path), Some(vec![1, 2, 3]));
        assert_eq!(load_bytes(&dir.join("absent.bin")), None);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
