//! Bitmap skin folders
//!
//! A bitmap widget is skinned from one folder holding one image per visual
//! state, named `<State>.<ext>`:
//!
//! | widget   | files |
//! |----------|-------|
//! | button   | `Default`, `Clicked`, `MouseOver` |
//! | checkbox | `Checked`, `CheckedMouseOver`, `Unchecked`, `UncheckedMouseOver` |
//! | slider   | `BarDefault`, `BarMouseOver`, `CursorDefault`, `CursorMouseOver` |

use std::path::{Path, PathBuf};

use crate::texture::Texture;

pub const BUTTON_DEFAULT: &str = "Default";
pub const BUTTON_CLICKED: &str = "Clicked";
pub const BUTTON_MOUSE_OVER: &str = "MouseOver";

pub const CHECKBOX_CHECKED: &str = "Checked";
pub const CHECKBOX_CHECKED_MOUSE_OVER: &str = "CheckedMouseOver";
pub const CHECKBOX_UNCHECKED: &str = "Unchecked";
pub const CHECKBOX_UNCHECKED_MOUSE_OVER: &str = "UncheckedMouseOver";

pub const SLIDER_BAR_DEFAULT: &str = "BarDefault";
pub const SLIDER_BAR_MOUSE_OVER: &str = "BarMouseOver";
pub const SLIDER_CURSOR_DEFAULT: &str = "CursorDefault";
pub const SLIDER_CURSOR_MOUSE_OVER: &str = "CursorMouseOver";

/// Which widget family a skin folder is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkinKind {
    Button,
    CheckBox,
    Slider,
}

impl SkinKind {
    /// Image names (without extension) this kind of widget loads.
    pub fn file_names(&self) -> &'static [&'static str] {
        match self {
            SkinKind::Button => &[BUTTON_DEFAULT, BUTTON_CLICKED, BUTTON_MOUSE_OVER],
            SkinKind::CheckBox => &[
                CHECKBOX_CHECKED,
                CHECKBOX_CHECKED_MOUSE_OVER,
                CHECKBOX_UNCHECKED,
                CHECKBOX_UNCHECKED_MOUSE_OVER,
            ],
            SkinKind::Slider => &[
                SLIDER_BAR_DEFAULT,
                SLIDER_BAR_MOUSE_OVER,
                SLIDER_CURSOR_DEFAULT,
                SLIDER_CURSOR_MOUSE_OVER,
            ],
        }
    }
}

/// A folder of state images sharing one extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkinFolder {
    path: PathBuf,
    extension: String,
}

impl SkinFolder {
    pub fn new(path: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        Self {
            path: path.into(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Full path of the image for state `name`.
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.path.join(format!("{}.{}", name, self.extension))
    }

    /// Load the image for state `name`.
    ///
    /// A missing or undecodable file is logged and yields an empty texture, so
    /// the widget keeps working and simply draws nothing for that state.
    pub fn load(&self, name: &str) -> Texture {
        let path = self.file_path(name);
        match Texture::from_path(&path) {
            Ok(texture) => {
                log::debug!(
                    "Loaded skin image {} ({}x{})",
                    path.display(),
                    texture.width(),
                    texture.height()
                );
                texture
            }
            Err(e) => {
                log::error!("Failed to load texture from {}: {}", path.display(), e);
                Texture::empty()
            }
        }
    }

    /// Paths of the files `kind` needs that are not present on disk.
    pub fn missing_files(&self, kind: SkinKind) -> Vec<PathBuf> {
        kind.file_names()
            .iter()
            .map(|name| self.file_path(name))
            .filter(|path| !path.is_file())
            .collect()
    }
}
