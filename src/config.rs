//! Configuration loading from ui.toml

use serde::Deserialize;
use std::path::Path;

/// Root configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub gui: GuiConfig,
    #[serde(default)]
    pub sounds: SoundsConfig,
    #[serde(default)]
    pub widgets: Vec<WidgetConfig>,
    #[serde(default)]
    pub groups: Vec<GroupConfig>,
}

/// Window configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,
    /// Inner size [width, height]
    #[serde(default = "default_window_size")]
    pub size: [u32; 2],
    /// Clear color [r, g, b, a]
    #[serde(default = "default_background")]
    pub background: [u8; 4],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            size: default_window_size(),
            background: default_background(),
        }
    }
}

fn default_title() -> String {
    "guikit demo".to_string()
}

fn default_window_size() -> [u32; 2] {
    [1280, 720]
}

fn default_background() -> [u8; 4] {
    [32, 34, 40, 255]
}

/// Defaults shared by every widget
#[derive(Debug, Clone, Deserialize)]
pub struct GuiConfig {
    /// Path to a TTF/OTF file used by every button label
    pub font: Option<String>,
    #[serde(default = "default_text_size")]
    pub text_size: u32,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            font: None,
            text_size: default_text_size(),
        }
    }
}

fn default_text_size() -> u32 {
    30
}

/// Sound files shared by every widget; all optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SoundsConfig {
    pub click: Option<String>,
    pub release: Option<String>,
    pub hover_start: Option<String>,
    pub hover_end: Option<String>,
    pub checked: Option<String>,
    pub unchecked: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Button,
    BitmapButton,
    #[serde(rename = "checkbox")]
    CheckBox,
    #[serde(rename = "bitmap_checkbox")]
    BitmapCheckBox,
    Slider,
    BitmapSlider,
}

/// One widget. Fields that don't apply to `kind` are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct WidgetConfig {
    pub kind: WidgetKind,
    /// Top-left corner, relative to the enclosing group
    #[serde(default)]
    pub position: [f32; 2],
    #[serde(default = "default_widget_size")]
    pub size: [f32; 2],
    /// Fill color, or tint for bitmap widgets [r, g, b, a]
    pub color: Option<[u8; 4]>,
    /// Button label
    pub text: Option<String>,
    pub text_size: Option<u32>,
    /// Bitmap skin folder
    pub skin: Option<String>,
    #[serde(default = "default_skin_extension")]
    pub skin_extension: String,
    #[serde(default)]
    pub vertical: bool,
    /// Slider cursor color
    pub slider_color: Option<[u8; 4]>,
    pub cursor_size: Option<[f32; 2]>,
    /// Slider cursor insets [min, max] in pixels
    pub offsets: Option<[f32; 2]>,
    #[serde(default)]
    pub value: f32,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub reset_on_click: bool,
    /// Name of the handler in `actions`
    pub action: Option<String>,
}

fn default_widget_size() -> [f32; 2] {
    [200.0, 60.0]
}

fn default_skin_extension() -> String {
    "png".to_string()
}

/// A group of widgets moved together
#[derive(Debug, Clone, Deserialize)]
pub struct GroupConfig {
    /// Offset from the parent group (or window)
    #[serde(default)]
    pub offset: [f32; 2],
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub widgets: Vec<WidgetConfig>,
    #[serde(default)]
    pub groups: Vec<GroupConfig>,
}

fn default_visible() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from default path (ui.toml in current directory)
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load("ui.toml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.window.size, [1280, 720]);
        assert_eq!(config.gui.text_size, 30);
        assert!(config.widgets.is_empty());
    }

    #[test]
    fn test_widgets_and_nested_groups() {
        let config: Config = toml::from_str(
            r#"
            [[widgets]]
            kind = "button"
            position = [10.0, 20.0]
            text = "Hello"
            action = "say_hello"

            [[groups]]
            offset = [400.0, 100.0]

            [[groups.widgets]]
            kind = "bitmap_checkbox"
            skin = "assets/checkbox"

            [[groups.groups]]
            offset = [0.0, 80.0]
            visible = false

            [[groups.groups.widgets]]
            kind = "slider"
            vertical = true
            value = 0.5
            "#,
        )
        .unwrap();

        assert_eq!(config.widgets[0].kind, WidgetKind::Button);
        assert_eq!(config.widgets[0].size, [200.0, 60.0]);
        let group = &config.groups[0];
        assert_eq!(group.widgets[0].kind, WidgetKind::BitmapCheckBox);
        assert_eq!(group.widgets[0].skin_extension, "png");
        let nested = &group.groups[0];
        assert!(!nested.visible);
        assert!(nested.widgets[0].vertical);
    }

    #[test]
    fn test_unknown_kind_is_parse_error() {
        let result: Result<Config, _> = toml::from_str("[[widgets]]\nkind = \"dial\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        match Config::load("/no/such/ui.toml") {
            Err(ConfigError::Io(_)) => {}
            other => panic!("expected io error, got {:?}", other),
        }
    }
}
