//! Bitmap-skinned checkbox

use std::any::Any;

use glam::Vec2;

use super::checkbox::CheckCore;
use super::interaction::{Interaction, InteractionState};
use super::{GuiError, Widget, WidgetBase};
use crate::audio::{AudioHandle, CheckSoundSet, Voice};
use crate::color::Color;
use crate::event::InputEvent;
use crate::geometry::Rect;
use crate::skin::{
    SkinFolder, CHECKBOX_CHECKED, CHECKBOX_CHECKED_MOUSE_OVER, CHECKBOX_UNCHECKED,
    CHECKBOX_UNCHECKED_MOUSE_OVER,
};
use crate::surface::{Surface, SurfaceId};
use crate::texture::Texture;

/// A checkbox drawn from four images, one per (checked, hovered) pair.
pub struct BitmapCheckBox {
    base: WidgetBase,
    checked_texture: Texture,
    checked_hover_texture: Texture,
    unchecked_texture: Texture,
    unchecked_hover_texture: Texture,
    core: CheckCore,
}

impl BitmapCheckBox {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            base: WidgetBase::new(position, size, Color::WHITE),
            checked_texture: Texture::empty(),
            checked_hover_texture: Texture::empty(),
            unchecked_texture: Texture::empty(),
            unchecked_hover_texture: Texture::empty(),
            core: CheckCore::default(),
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.base.color = color;
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.core.checked = checked;
        self
    }

    /// Images in `(checked, checked_hover, unchecked, unchecked_hover)` order.
    pub fn set_textures(
        &mut self,
        checked: Texture,
        checked_hover: Texture,
        unchecked: Texture,
        unchecked_hover: Texture,
    ) {
        self.checked_texture = checked;
        self.checked_hover_texture = checked_hover;
        self.unchecked_texture = unchecked;
        self.unchecked_hover_texture = unchecked_hover;
    }

    pub fn set_bitmap_folder(&mut self, folder: &SkinFolder) {
        self.checked_texture = folder.load(CHECKBOX_CHECKED);
        self.checked_hover_texture = folder.load(CHECKBOX_CHECKED_MOUSE_OVER);
        self.unchecked_texture = folder.load(CHECKBOX_UNCHECKED);
        self.unchecked_hover_texture = folder.load(CHECKBOX_UNCHECKED_MOUSE_OVER);
    }

    pub fn is_checked(&self) -> bool {
        self.core.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.core.checked = checked;
    }

    pub fn set_sound(&mut self, sounds: CheckSoundSet) {
        self.core.sounds.merge(sounds);
    }

    pub fn voice(&self) -> &Voice {
        &self.core.voice
    }

    pub fn set_delegate(&mut self, delegate: impl FnMut(bool) + 'static) {
        self.core.delegate = Some(Box::new(delegate));
    }

    pub fn interaction(&self) -> &Interaction {
        &self.core.interaction
    }

    pub fn state(&self) -> InteractionState {
        self.core.interaction.state()
    }

    pub fn current_texture(&self) -> &Texture {
        match (self.core.checked, self.core.interaction.is_hovered()) {
            (true, true) => &self.checked_hover_texture,
            (true, false) => &self.checked_texture,
            (false, true) => &self.unchecked_hover_texture,
            (false, false) => &self.unchecked_texture,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.base.position, self.base.size)
    }
}

impl Widget for BitmapCheckBox {
    fn position(&self) -> Vec2 {
        self.base.position
    }

    fn size(&self) -> Vec2 {
        self.base.size
    }

    fn color(&self) -> Color {
        self.base.color
    }

    fn set_position(&mut self, position: Vec2) {
        self.base.position = position;
    }

    fn set_size(&mut self, size: Vec2) {
        self.base.size = size;
    }

    fn set_color(&mut self, color: Color) {
        self.base.color = color;
    }

    fn handle_event(&mut self, event: &InputEvent, surface: &dyn Surface) -> Result<bool, GuiError> {
        self.base.ensure_surface(surface.id())?;
        let inside = self.bounds().contains(surface.pointer_position());
        Ok(self.core.handle(event, inside))
    }

    fn draw(&mut self, surface: &mut dyn Surface) -> Result<(), GuiError> {
        self.base.ensure_surface(surface.id())?;
        surface.draw_sprite(self.current_texture(), self.bounds(), self.base.color, 0);
        Ok(())
    }

    fn surface(&self) -> Option<SurfaceId> {
        self.base.surface
    }

    fn bind_surface(&mut self, surface: SurfaceId) {
        self.base.surface = Some(surface);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Canvas;
    use crate::widget::test_support::{click_at, move_to};

    fn pixel() -> Texture {
        Texture::from_rgba(1, 1, vec![255; 4]).unwrap()
    }

    #[test]
    fn test_texture_by_checked_and_hover() {
        let mut canvas = Canvas::new(100.0, 100.0);
        let (on, on_hover, off, off_hover) = (pixel(), pixel(), pixel(), pixel());
        let mut checkbox = BitmapCheckBox::new(Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0));
        checkbox.set_textures(on.clone(), on_hover.clone(), off.clone(), off_hover.clone());
        checkbox.bind_surface(canvas.id());

        assert!(checkbox.current_texture().ptr_eq(&off));
        move_to(&mut checkbox, &mut canvas, 15.0, 15.0).unwrap();
        assert!(checkbox.current_texture().ptr_eq(&off_hover));
        click_at(&mut checkbox, &mut canvas, 15.0, 15.0);
        assert!(checkbox.current_texture().ptr_eq(&on_hover));
        move_to(&mut checkbox, &mut canvas, 80.0, 80.0).unwrap();
        assert!(checkbox.current_texture().ptr_eq(&on));
    }

    #[test]
    fn test_unbound_checkbox_errors() {
        let canvas = Canvas::new(10.0, 10.0);
        let mut checkbox = BitmapCheckBox::new(Vec2::ZERO, Vec2::new(5.0, 5.0));
        let event = crate::widget::test_support::press();
        assert_eq!(checkbox.handle_event(&event, &canvas), Err(GuiError::NoSurface));
    }
}
