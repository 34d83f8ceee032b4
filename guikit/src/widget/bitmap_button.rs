//! Bitmap-skinned button

use std::any::Any;

use glam::Vec2;

use super::button::ButtonCore;
use super::interaction::{Interaction, InteractionState};
use super::{GuiError, Widget, WidgetBase};
use crate::audio::{AudioHandle, SoundSet, Voice};
use crate::color::Color;
use crate::event::InputEvent;
use crate::geometry::Rect;
use crate::skin::{SkinFolder, BUTTON_CLICKED, BUTTON_DEFAULT, BUTTON_MOUSE_OVER};
use crate::surface::{Surface, SurfaceId};
use crate::texture::Texture;

/// A push button drawn from three state images stretched over its bounds.
///
/// Same behavior as [`Button`](super::Button) without the label or the press
/// shrink: the `Clicked` image shows while pressed, `MouseOver` while hovered.
pub struct BitmapButton {
    base: WidgetBase,
    default_texture: Texture,
    clicked_texture: Texture,
    hover_texture: Texture,
    core: ButtonCore,
}

impl BitmapButton {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            base: WidgetBase::new(position, size, Color::WHITE),
            default_texture: Texture::empty(),
            clicked_texture: Texture::empty(),
            hover_texture: Texture::empty(),
            core: ButtonCore::default(),
        }
    }

    /// Tint multiplied into every state image.
    pub fn with_color(mut self, color: Color) -> Self {
        self.base.color = color;
        self
    }

    pub fn with_textures(mut self, default: Texture, clicked: Texture, hover: Texture) -> Self {
        self.set_textures(default, clicked, hover);
        self
    }

    pub fn with_reset_on_click(mut self, reset: bool) -> Self {
        self.core.interaction.set_reset_on_click(reset);
        self
    }

    pub fn set_textures(&mut self, default: Texture, clicked: Texture, hover: Texture) {
        self.default_texture = default;
        self.clicked_texture = clicked;
        self.hover_texture = hover;
    }

    /// Load `Default`, `Clicked` and `MouseOver` from `folder`.
    ///
    /// Images that fail to load are logged and left blank.
    pub fn set_bitmap_folder(&mut self, folder: &SkinFolder) {
        self.default_texture = folder.load(BUTTON_DEFAULT);
        self.clicked_texture = folder.load(BUTTON_CLICKED);
        self.hover_texture = folder.load(BUTTON_MOUSE_OVER);
    }

    pub fn set_sound(&mut self, sounds: SoundSet) {
        self.core.sounds.merge(sounds);
    }

    pub fn voice(&self) -> &Voice {
        &self.core.voice
    }

    pub fn set_delegate(&mut self, delegate: impl FnMut() + 'static) {
        self.core.set_delegate(delegate);
    }

    pub fn set_delegate_with<A: Clone + 'static>(&mut self, delegate: impl FnMut(A) + 'static, args: A) {
        self.core.set_delegate_with(delegate, args);
    }

    pub fn interaction(&self) -> &Interaction {
        &self.core.interaction
    }

    pub fn set_reset_on_click(&mut self, reset: bool) {
        self.core.interaction.set_reset_on_click(reset);
    }

    pub fn state(&self) -> InteractionState {
        self.core.interaction.state()
    }

    /// Image for the current state.
    pub fn current_texture(&self) -> &Texture {
        match self.core.interaction.state() {
            InteractionState::Pressed => &self.clicked_texture,
            InteractionState::Hovered => &self.hover_texture,
            InteractionState::Idle => &self.default_texture,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.base.position, self.base.size)
    }
}

impl Widget for BitmapButton {
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
    use crate::surface::{Canvas, DrawCommand};
    use crate::widget::test_support::{click_at, move_to, press};

    fn pixel() -> Texture {
        Texture::from_rgba(1, 1, vec![255; 4]).unwrap()
    }

    fn skinned(canvas: &Canvas) -> (BitmapButton, [Texture; 3]) {
        let textures = [pixel(), pixel(), pixel()];
        let mut button = BitmapButton::new(Vec2::new(0.0, 0.0), Vec2::new(64.0, 32.0)).with_textures(
            textures[0].clone(),
            textures[1].clone(),
            textures[2].clone(),
        );
        button.bind_surface(canvas.id());
        (button, textures)
    }

    #[test]
    fn test_texture_follows_state() {
        let mut canvas = Canvas::new(100.0, 100.0);
        let (mut button, [default, clicked, hover]) = skinned(&canvas);
        assert!(button.current_texture().ptr_eq(&default));

        move_to(&mut button, &mut canvas, 5.0, 5.0).unwrap();
        assert!(button.current_texture().ptr_eq(&hover));

        button.handle_event(&press(), &canvas).unwrap();
        assert!(button.current_texture().ptr_eq(&clicked));

        move_to(&mut button, &mut canvas, 90.0, 90.0).unwrap();
        assert!(button.current_texture().ptr_eq(&default));
    }

    #[test]
    fn test_release_shows_hover_or_default() {
        let mut canvas = Canvas::new(100.0, 100.0);
        let (mut button, [default, _, hover]) = skinned(&canvas);
        click_at(&mut button, &mut canvas, 5.0, 5.0);
        assert!(button.current_texture().ptr_eq(&hover));

        button.set_reset_on_click(true);
        click_at(&mut button, &mut canvas, 5.0, 5.0);
        assert!(button.current_texture().ptr_eq(&default));
    }

    #[test]
    fn test_draws_stretched_sprite() {
        let mut canvas = Canvas::new(100.0, 100.0);
        let (mut button, _) = skinned(&canvas);
        button.draw(&mut canvas).unwrap();
        match &canvas.commands()[0] {
            DrawCommand::Sprite { rect, quarter_turns, .. } => {
                assert_eq!(rect.size, Vec2::new(64.0, 32.0));
                assert_eq!(*quarter_turns, 0);
            }
            other => panic!("expected sprite, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_skin_draws_nothing() {
        let mut canvas = Canvas::new(100.0, 100.0);
        let mut button = BitmapButton::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        button.set_bitmap_folder(&SkinFolder::new("/no/such/skin", "png"));
        button.bind_surface(canvas.id());
        button.draw(&mut canvas).unwrap();
        assert!(canvas.commands().is_empty());
    }
}
