//! Bitmap-skinned slider

use std::any::Any;

use glam::Vec2;

use super::interaction::{Interaction, InteractionState};
use super::slider::{SliderCore, SliderTrack};
use super::{GuiError, Widget};
use crate::audio::{AudioHandle, SoundSet, Voice};
use crate::color::Color;
use crate::event::InputEvent;
use crate::geometry::Rect;
use crate::skin::{
    SkinFolder, SLIDER_BAR_DEFAULT, SLIDER_BAR_MOUSE_OVER, SLIDER_CURSOR_DEFAULT,
    SLIDER_CURSOR_MOUSE_OVER,
};
use crate::surface::{Surface, SurfaceId};
use crate::texture::Texture;

/// Slider drawn from bar and cursor images.
///
/// Skins are authored for a horizontal slider; a vertical one draws them a
/// quarter turn clockwise.
pub struct BitmapSlider {
    track: SliderTrack,
    tint: Color,
    bar_texture: Texture,
    bar_hover_texture: Texture,
    cursor_texture: Texture,
    cursor_hover_texture: Texture,
    surface: Option<SurfaceId>,
    core: SliderCore,
}

impl BitmapSlider {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            track: SliderTrack::new(position, size),
            tint: Color::WHITE,
            bar_texture: Texture::empty(),
            bar_hover_texture: Texture::empty(),
            cursor_texture: Texture::empty(),
            cursor_hover_texture: Texture::empty(),
            surface: None,
            core: SliderCore::default(),
        }
    }

    pub fn set_textures(&mut self, bar: Texture, bar_hover: Texture, cursor: Texture, cursor_hover: Texture) {
        self.bar_texture = bar;
        self.bar_hover_texture = bar_hover;
        self.cursor_texture = cursor;
        self.cursor_hover_texture = cursor_hover;
    }

    pub fn set_bitmap_folder(&mut self, folder: &SkinFolder) {
        self.bar_texture = folder.load(SLIDER_BAR_DEFAULT);
        self.bar_hover_texture = folder.load(SLIDER_BAR_MOUSE_OVER);
        self.cursor_texture = folder.load(SLIDER_CURSOR_DEFAULT);
        self.cursor_hover_texture = folder.load(SLIDER_CURSOR_MOUSE_OVER);
    }

    pub fn value(&self) -> f32 {
        self.track.value
    }

    pub fn set_value(&mut self, value: f32) {
        self.track.set_value(value);
    }

    pub fn is_vertical(&self) -> bool {
        self.track.vertical
    }

    pub fn set_vertical(&mut self, vertical: bool) {
        if self.track.set_vertical(vertical) {
            log::debug!("BitmapSlider orientation set to vertical={}", vertical);
        }
    }

    pub fn cursor_size(&self) -> Vec2 {
        self.track.cursor_size
    }

    pub fn set_cursor_size(&mut self, size: Vec2) {
        self.track.cursor_size = size;
    }

    pub fn set_offsets(&mut self, min: f32, max: f32) {
        self.track.min_offset = min;
        self.track.max_offset = max;
    }

    pub fn set_sound(&mut self, sounds: SoundSet) {
        self.core.sounds.merge(sounds);
    }

    pub fn voice(&self) -> &Voice {
        &self.core.voice
    }

    pub fn set_delegate(&mut self, delegate: impl FnMut(f32) + 'static) {
        self.core.delegate = Some(Box::new(delegate));
    }

    pub fn interaction(&self) -> &Interaction {
        &self.core.interaction
    }

    pub fn state(&self) -> InteractionState {
        self.core.interaction.state()
    }

    pub fn bar_bounds(&self) -> Rect {
        self.track.bar_bounds()
    }

    pub fn cursor_bounds(&self) -> Rect {
        self.track.cursor_bounds()
    }

    /// `(bar, cursor)` images for the current state.
    pub fn current_textures(&self) -> (&Texture, &Texture) {
        if self.core.is_active() {
            (&self.bar_hover_texture, &self.cursor_hover_texture)
        } else {
            (&self.bar_texture, &self.cursor_texture)
        }
    }

    fn quarter_turns(&self) -> u8 {
        u8::from(self.track.vertical)
    }
}

impl Widget for BitmapSlider {
    fn position(&self) -> Vec2 {
        self.track.position
    }

    fn size(&self) -> Vec2 {
        self.track.size
    }

    fn color(&self) -> Color {
        self.tint
    }

    fn set_position(&mut self, position: Vec2) {
        self.track.position = position;
    }

    fn set_size(&mut self, size: Vec2) {
        self.track.set_size(size);
    }

    fn set_color(&mut self, color: Color) {
        self.tint = color;
    }

    fn handle_event(&mut self, event: &InputEvent, surface: &dyn Surface) -> Result<bool, GuiError> {
        super::ensure_surface(self.surface, surface.id())?;
        Ok(self.core.handle(&mut self.track, event, surface.pointer_position()))
    }

    fn draw(&mut self, surface: &mut dyn Surface) -> Result<(), GuiError> {
        super::ensure_surface(self.surface, surface.id())?;
        let turns = self.quarter_turns();
        let (bar, cursor) = self.current_textures();
        surface.draw_sprite(bar, self.bar_bounds(), self.tint, turns);
        surface.draw_sprite(cursor, self.cursor_bounds(), self.tint, turns);
        Ok(())
    }

    fn surface(&self) -> Option<SurfaceId> {
        self.surface
    }

    fn bind_surface(&mut self, surface: SurfaceId) {
        self.surface = Some(surface);
    }

    fn bind_audio(&mut self, audio: &AudioHandle) {
        self.core.voice.bind_output(audio);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
