//! Texture loading
//!
//! Textures are decoded once on the CPU and shared by reference count. The
//! renderer uploads each one to the GPU lazily, keyed by [`TextureId`].

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use glam::Vec2;
use image::{DynamicImage, GenericImageView};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load image: {0}")]
    ImageLoadError(#[from] image::ImageError),
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Pixel buffer holds {actual} bytes, {expected} expected")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Unique identifier for a loaded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(u64);

impl TextureId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

struct TextureData {
    id: TextureId,
    width: u32,
    height: u32,
    /// RGBA8, row-major, top-to-bottom
    pixels: Vec<u8>,
}

/// An immutable, shareable RGBA image.
#[derive(Clone)]
pub struct Texture(Arc<TextureData>);

impl Texture {
    /// Load a texture from an image file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Load a texture from encoded image bytes (useful for embedded assets).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TextureError> {
        let img = image::load_from_memory(bytes)?;
        Ok(Self::from_image(img))
    }

    /// Create a texture from a decoded image.
    pub fn from_image(img: DynamicImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.to_rgba8().into_raw())
    }

    /// Create a texture from raw RGBA8 pixels.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, TextureError> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(TextureError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self::new(width, height, pixels))
    }

    /// A 0x0 texture. Drawing it produces nothing.
    pub fn empty() -> Self {
        Self::new(0, 0, Vec::new())
    }

    fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self(Arc::new(TextureData {
            id: TextureId::next(),
            width,
            height,
            pixels,
        }))
    }

    pub fn id(&self) -> TextureId {
        self.0.id
    }

    pub fn width(&self) -> u32 {
        self.0.width
    }

    pub fn height(&self) -> u32 {
        self.0.height
    }

    /// Get dimensions as a vector.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.0.width as f32, self.0.height as f32)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.0.pixels
    }

    pub fn is_empty(&self) -> bool {
        self.0.width == 0 || self.0.height == 0
    }

    /// True when both handles share the same image.
    pub fn ptr_eq(&self, other: &Texture) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("id", &self.0.id)
            .field("width", &self.0.width)
            .field("height", &self.0.height)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba_checks_length() {
        assert!(Texture::from_rgba(2, 2, vec![0; 16]).is_ok());
        let err = Texture::from_rgba(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(err, TextureError::SizeMismatch { expected: 16, actual: 15 }));
    }

    #[test]
    fn test_empty_texture() {
        let tex = Texture::empty();
        assert!(tex.is_empty());
        assert_eq!(tex.size(), Vec2::ZERO);
    }

    #[test]
    fn test_clones_share_identity() {
        let a = Texture::from_rgba(1, 1, vec![255; 4]).unwrap();
        let b = a.clone();
        let c = Texture::from_rgba(1, 1, vec![255; 4]).unwrap();
        assert!(a.ptr_eq(&b));
        assert_eq!(a.id(), b.id());
        assert!(!a.ptr_eq(&c));
        assert_ne!(a.id(), c.id());
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(Texture::from_bytes(b"not an image").is_err());
    }
}
