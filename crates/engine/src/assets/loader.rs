use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use fontdue::{Font, FontSettings};
use image::ImageReader;
use thiserror::Error;
use tracing::debug;

use crate::asset_keys::{validate_asset_key, AssetKeyError};

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("invalid asset key '{key}': {source}")]
    InvalidKey {
        key: String,
        #[source]
        source: AssetKeyError,
    },
    #[error("failed to open image {path}: {source}")]
    OpenImage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image {path}: {source}")]
    DecodeImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("image {path} has zero width or height")]
    EmptyImage { path: PathBuf },
    #[error("failed to read font {path}: {source}")]
    ReadFont {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse font {path}: {reason}")]
    ParseFont { path: PathBuf, reason: &'static str },
}

/// A single RGB value treated as fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorKey {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorKey {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn matches(self, pixel: &[u8]) -> bool {
        pixel[0] == self.r && pixel[1] == self.g && pixel[2] == self.b
    }
}

/// Decoded RGBA8 image. Owned by whoever loaded it; dropping releases it.
#[derive(Clone, PartialEq, Eq)]
pub struct Texture {
    key: String,
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Texture {
    /// Returns `None` when `rgba` is not exactly `width * height * 4` bytes.
    pub fn from_rgba(key: impl Into<String>, width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        if rgba.len() != expected {
            return None;
        }
        Some(Self {
            key: key.into(),
            width,
            height,
            rgba,
        })
    }

    /// Decodes any image file on disk, outside the asset key rules. The file
    /// name becomes the texture key.
    pub fn load_path(path: &Path) -> Result<Self, AssetError> {
        let key = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        load_texture_rgba(&key, path)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.rgba[offset..offset + 4]);
        Some(out)
    }

    fn apply_color_key(&mut self, color_key: ColorKey) {
        for pixel in self.rgba.chunks_exact_mut(4) {
            if color_key.matches(pixel) {
                pixel[3] = 0;
            }
        }
    }
}

impl fmt::Debug for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Texture")
            .field("key", &self.key)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// A font rasterized at one fixed pixel size.
pub struct FontFace {
    key: String,
    font: Font,
    px: f32,
}

impl FontFace {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn px(&self) -> f32 {
        self.px
    }

    pub(crate) fn font(&self) -> &Font {
        &self.font
    }
}

impl fmt::Debug for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontFace")
            .field("key", &self.key)
            .field("px", &self.px)
            .finish_non_exhaustive()
    }
}

/// Explicitly owned loading context handed to scene constructors.
#[derive(Debug, Clone)]
pub struct AssetLoader {
    assets_dir: PathBuf,
}

impl AssetLoader {
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
        }
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    pub fn resolve(&self, key: &str) -> Result<PathBuf, AssetError> {
        validate_asset_key(key).map_err(|source| AssetError::InvalidKey {
            key: key.to_string(),
            source,
        })?;
        Ok(self.assets_dir.join(key))
    }

    pub fn load_texture(
        &self,
        key: &str,
        color_key: Option<ColorKey>,
    ) -> Result<Texture, AssetError> {
        let path = self.resolve(key)?;
        let mut texture = load_texture_rgba(key, &path)?;
        if let Some(color_key) = color_key {
            texture.apply_color_key(color_key);
        }
        debug!(
            asset = key,
            width = texture.width,
            height = texture.height,
            color_keyed = color_key.is_some(),
            "texture_loaded"
        );
        Ok(texture)
    }

    pub fn load_font(&self, key: &str, px: f32) -> Result<FontFace, AssetError> {
        let path = self.resolve(key)?;
        let bytes = fs::read(&path).map_err(|source| AssetError::ReadFont {
            path: path.clone(),
            source,
        })?;
        let settings = FontSettings {
            scale: px,
            ..FontSettings::default()
        };
        let font = Font::from_bytes(bytes, settings)
            .map_err(|reason| AssetError::ParseFont { path, reason })?;
        debug!(asset = key, px, "font_loaded");
        Ok(FontFace {
            key: key.to_string(),
            font,
            px,
        })
    }
}

fn load_texture_rgba(key: &str, path: &Path) -> Result<Texture, AssetError> {
    let reader = ImageReader::open(path).map_err(|source| AssetError::OpenImage {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = reader.decode().map_err(|source| AssetError::DecodeImage {
        path: path.to_path_buf(),
        source,
    })?;
    let image = decoded.to_rgba8();
    if image.width() == 0 || image.height() == 0 {
        return Err(AssetError::EmptyImage {
            path: path.to_path_buf(),
        });
    }
    Ok(Texture {
        key: key.to_string(),
        width: image.width(),
        height: image.height(),
        rgba: image.into_raw(),
    })
}
