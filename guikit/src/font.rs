//! Font handles

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("Failed to read font file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Font data for '{0}' is empty")]
    Empty(String),
}

/// Unique identifier for a loaded font
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(u64);

struct FontData {
    id: FontId,
    name: String,
    bytes: Vec<u8>,
}

/// Raw font file bytes, shared by every widget that draws text with it.
///
/// Parsing happens in the renderer, which registers the bytes with its font
/// system the first time a text command uses this font.
#[derive(Clone)]
pub struct Font(Arc<FontData>);

impl Font {
    /// Load a font file (TTF/OTF).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FontError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        log::info!("Loaded font '{}' ({} bytes)", name, bytes.len());
        Self::from_bytes(name, bytes)
    }

    /// Wrap font bytes already in memory.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, FontError> {
        let name = name.into();
        if bytes.is_empty() {
            return Err(FontError::Empty(name));
        }
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Ok(Self(Arc::new(FontData {
            id: FontId(NEXT.fetch_add(1, Ordering::Relaxed)),
            name,
            bytes,
        })))
    }

    pub fn id(&self) -> FontId {
        self.0.id
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0.bytes
    }

    pub fn ptr_eq(&self, other: &Font) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("id", &self.0.id)
            .field("name", &self.0.name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_font_rejected() {
        assert!(matches!(Font::from_bytes("blank", Vec::new()), Err(FontError::Empty(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Font::from_path("/definitely/not/here.ttf"),
            Err(FontError::IoError(_))
        ));
    }
}
