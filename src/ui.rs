//! UI layer - builds the widget tree from configuration

use guikit::{
    BitmapButton, BitmapCheckBox, BitmapSlider, Button, CheckBox, CheckSoundSet, Color, Font, Group,
    Gui, SkinFolder, Slider, SoundBuffer, SoundSet, SurfaceId, Vec2, Widget,
};

use crate::actions;
use crate::config::{Config, GroupConfig, SoundsConfig, WidgetConfig, WidgetKind};

/// Sounds shared by every widget built from one configuration
#[derive(Debug, Clone, Default)]
pub struct Sounds {
    pub buttons: SoundSet,
    pub checkboxes: CheckSoundSet,
}

impl Sounds {
    pub fn load(config: &SoundsConfig) -> Self {
        let click = load_sound(config.click.as_deref());
        let release = load_sound(config.release.as_deref());
        let hover_start = load_sound(config.hover_start.as_deref());
        let hover_end = load_sound(config.hover_end.as_deref());
        let checked = load_sound(config.checked.as_deref());
        let unchecked = load_sound(config.unchecked.as_deref());

        Self {
            buttons: SoundSet {
                click,
                release,
                hover_start: hover_start.clone(),
                hover_end: hover_end.clone(),
            },
            checkboxes: CheckSoundSet {
                checked,
                unchecked,
                hover_start,
                hover_end,
            },
        }
    }
}

fn load_sound(path: Option<&str>) -> Option<SoundBuffer> {
    let path = path?;
    match SoundBuffer::from_path(path) {
        Ok(buffer) => Some(buffer),
        Err(e) => {
            log::warn!("Failed to load sound {}: {}", path, e);
            None
        }
    }
}

/// Build the whole GUI for `surface`.
pub fn build_gui(config: &Config, surface: SurfaceId) -> Gui {
    let mut gui = Gui::new(surface);
    gui.set_default_text_size(config.gui.text_size);

    if let Some(path) = &config.gui.font {
        match Font::from_path(path) {
            Ok(font) => gui.set_default_font(font),
            Err(e) => log::warn!("Failed to load font {}: {}", path, e),
        }
    }

    let sounds = Sounds::load(&config.sounds);

    for widget in &config.widgets {
        gui.add_boxed(build_widget(widget, &sounds, config.gui.text_size));
    }
    for group in &config.groups {
        gui.add_group(build_group(group, &sounds, config.gui.text_size));
    }

    log::info!(
        "Built GUI: {} widgets, {} groups",
        gui.widget_count(),
        gui.group_count()
    );
    gui
}

pub fn build_group(config: &GroupConfig, sounds: &Sounds, text_size: u32) -> Group {
    let mut group = Group::new(Vec2::from(config.offset));
    group.set_visible(config.visible);
    for widget in &config.widgets {
        group.add_boxed(build_widget(widget, sounds, text_size));
    }
    for child in &config.groups {
        group.add_child_group(build_group(child, sounds, text_size));
    }
    group
}

pub fn build_widget(config: &WidgetConfig, sounds: &Sounds, text_size: u32) -> Box<dyn Widget> {
    let position = Vec2::from(config.position);
    let size = Vec2::from(config.size);
    let skin = config
        .skin
        .as_ref()
        .map(|path| SkinFolder::new(path, config.skin_extension.as_str()));

    match config.kind {
        WidgetKind::Button => {
            let mut button = Button::new(position, size)
                .with_text(config.text.clone().unwrap_or_default())
                .with_text_size(config.text_size.unwrap_or(text_size))
                .with_reset_on_click(config.reset_on_click);
            if let Some(color) = config.color {
                button.set_color(Color::from(color));
            }
            button.set_sound(sounds.buttons.clone());
            match button_action(config) {
                Some(ButtonAction::Hello) => button.set_delegate(actions::say_hello),
                Some(ButtonAction::Say(text)) => button.set_delegate_with(actions::say_string, text),
                None => {}
            }
            Box::new(button)
        }
        WidgetKind::BitmapButton => {
            let mut button = BitmapButton::new(position, size).with_reset_on_click(config.reset_on_click);
            if let Some(color) = config.color {
                button.set_color(Color::from(color));
            }
            if let Some(skin) = &skin {
                button.set_bitmap_folder(skin);
            }
            button.set_sound(sounds.buttons.clone());
            match button_action(config) {
                Some(ButtonAction::Hello) => button.set_delegate(actions::say_hello),
                Some(ButtonAction::Say(text)) => button.set_delegate_with(actions::say_string, text),
                None => {}
            }
            Box::new(button)
        }
        WidgetKind::CheckBox => {
            let mut checkbox = CheckBox::new(position, size).with_checked(config.checked);
            if let Some(color) = config.color {
                checkbox.set_color(Color::from(color));
            }
            checkbox.set_sound(sounds.checkboxes.clone());
            if bind_state_action(config) {
                checkbox.set_delegate(actions::say_state);
            }
            Box::new(checkbox)
        }
        WidgetKind::BitmapCheckBox => {
            let mut checkbox = BitmapCheckBox::new(position, size).with_checked(config.checked);
            if let Some(color) = config.color {
                checkbox.set_color(Color::from(color));
            }
            if let Some(skin) = &skin {
                checkbox.set_bitmap_folder(skin);
            }
            checkbox.set_sound(sounds.checkboxes.clone());
            if bind_state_action(config) {
                checkbox.set_delegate(actions::say_state);
            }
            Box::new(checkbox)
        }
        WidgetKind::Slider => {
            let mut slider = Slider::new(position, size);
            slider.set_vertical(config.vertical);
            if let Some(cursor) = config.cursor_size {
                slider.set_cursor_size(Vec2::from(cursor));
            }
            if let Some([min, max]) = config.offsets {
                slider.set_offsets(min, max);
            }
            if let Some(color) = config.color {
                slider.set_bar_color(Color::from(color));
            }
            if let Some(color) = config.slider_color {
                slider.set_slider_color(Color::from(color));
            }
            slider.set_value(config.value);
            slider.set_sound(sounds.buttons.clone());
            if bind_value_action(config) {
                slider.set_delegate(actions::say_value);
            }
            Box::new(slider)
        }
        WidgetKind::BitmapSlider => {
            let mut slider = BitmapSlider::new(position, size);
            slider.set_vertical(config.vertical);
            if let Some(cursor) = config.cursor_size {
                slider.set_cursor_size(Vec2::from(cursor));
            }
            if let Some([min, max]) = config.offsets {
                slider.set_offsets(min, max);
            }
            if let Some(color) = config.color {
                slider.set_color(Color::from(color));
            }
            if let Some(skin) = &skin {
                slider.set_bitmap_folder(skin);
            }
            slider.set_value(config.value);
            slider.set_sound(sounds.buttons.clone());
            if bind_value_action(config) {
                slider.set_delegate(actions::say_value);
            }
            Box::new(slider)
        }
    }
}

enum ButtonAction {
    Hello,
    Say(String),
}

fn button_action(config: &WidgetConfig) -> Option<ButtonAction> {
    match config.action.as_deref() {
        None => None,
        Some("say_hello") => Some(ButtonAction::Hello),
        Some("say_string") => Some(ButtonAction::Say("Hey there!".to_string())),
        Some(other) => {
            log::warn!("Unknown button action '{}'", other);
            None
        }
    }
}

fn bind_state_action(config: &WidgetConfig) -> bool {
    match config.action.as_deref() {
        None => false,
        Some("say_state") => true,
        Some(other) => {
            log::warn!("Unknown checkbox action '{}'", other);
            false
        }
    }
}

fn bind_value_action(config: &WidgetConfig) -> bool {
    match config.action.as_deref() {
        None => false,
        Some("say_value") => true,
        Some(other) => {
            log::warn!("Unknown slider action '{}'", other);
            false
        }
    }
}
