//! Button widget for guikit

use std::any::Any;

use glam::Vec2;

use super::interaction::{dispatch, Interaction, InteractionHooks, InteractionState};
use super::{GuiError, Widget, WidgetBase};
use crate::audio::{AudioHandle, SoundSet, Voice};
use crate::color::Color;
use crate::event::InputEvent;
use crate::font::Font;
use crate::geometry::Rect;
use crate::surface::{Surface, SurfaceId};

/// Fill multiplier while the pointer is over a button.
pub(crate) const HOVER_SHADE: f32 = 0.75;
/// Scale of a pressed button, around its top-left corner.
const PRESS_SCALE: f32 = 0.975;
/// Shift of a pressed button, in pixels.
const PRESS_SHIFT: f32 = 3.0;

/// Sounds, delegate and flags shared by [`Button`] and `BitmapButton`.
#[derive(Default)]
pub(crate) struct ButtonCore {
    pub interaction: Interaction,
    pub sounds: SoundSet,
    pub voice: Voice,
    pub delegate: Option<Box<dyn FnMut()>>,
}

impl ButtonCore {
    pub fn handle(&mut self, event: &InputEvent, inside: bool) -> bool {
        dispatch(self, event, inside)
    }

    pub fn set_delegate(&mut self, delegate: impl FnMut() + 'static) {
        self.delegate = Some(Box::new(delegate));
    }

    /// Bind `args` now; the callable gets them on every release.
    pub fn set_delegate_with<A: Clone + 'static>(
        &mut self,
        mut delegate: impl FnMut(A) + 'static,
        args: A,
    ) {
        self.delegate = Some(Box::new(move || delegate(args.clone())));
    }
}

impl InteractionHooks for ButtonCore {
    fn interaction_mut(&mut self) -> &mut Interaction {
        &mut self.interaction
    }

    fn on_start_hover(&mut self) {
        self.voice.play_opt(self.sounds.hover_start.as_ref());
    }

    fn on_end_hover(&mut self) {
        self.voice.play_opt(self.sounds.hover_end.as_ref());
    }

    fn on_click(&mut self) {
        self.voice.play_opt(self.sounds.click.as_ref());
    }

    fn on_release(&mut self, away: bool) {
        self.voice.play_opt(self.sounds.release.as_ref());
        if away {
            return;
        }
        if let Some(delegate) = self.delegate.as_mut() {
            delegate();
        }
    }
}

/// A flat rectangular push button with a centred text label.
///
/// Hovering darkens the fill; pressing shrinks the button slightly, nudges it
/// down-right and drops the text size by one. The delegate fires when the
/// press is released over the button.
pub struct Button {
    base: WidgetBase,
    text: String,
    text_size: u32,
    text_color: Color,
    font: Option<Font>,
    core: ButtonCore,
}

impl Button {
    pub const DEFAULT_TEXT_SIZE: u32 = 31;

    /// Create a white button with no label.
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            base: WidgetBase::new(position, size, Color::WHITE),
            text: String::new(),
            text_size: Self::DEFAULT_TEXT_SIZE,
            text_color: Color::BLACK,
            font: None,
            core: ButtonCore::default(),
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.base.color = color;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_text_size(mut self, size: u32) -> Self {
        self.text_size = size;
        self
    }

    pub fn with_reset_on_click(mut self, reset: bool) -> Self {
        self.core.interaction.set_reset_on_click(reset);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Label size when not pressed.
    pub fn text_size(&self) -> u32 {
        self.text_size
    }

    pub fn set_text_size(&mut self, size: u32) {
        self.text_size = size;
    }

    pub fn text_color(&self) -> Color {
        self.text_color
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    pub fn font(&self) -> Option<&Font> {
        self.font.as_ref()
    }

    pub fn set_font(&mut self, font: Font) {
        self.font = Some(font);
    }

    /// Replace the sounds `sounds` sets; unset entries keep their current sound.
    pub fn set_sound(&mut self, sounds: SoundSet) {
        self.core.sounds.merge(sounds);
    }

    pub fn sounds(&self) -> &SoundSet {
        &self.core.sounds
    }

    pub fn voice(&self) -> &Voice {
        &self.core.voice
    }

    pub fn set_delegate(&mut self, delegate: impl FnMut() + 'static) {
        self.core.set_delegate(delegate);
    }

    /// Store `args` with the callable; each release calls `delegate(args.clone())`.
    pub fn set_delegate_with<A: Clone + 'static>(&mut self, delegate: impl FnMut(A) + 'static, args: A) {
        self.core.set_delegate_with(delegate, args);
    }

    pub fn clear_delegate(&mut self) {
        self.core.delegate = None;
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

    /// Rectangle as currently drawn and hit-tested.
    pub fn bounds(&self) -> Rect {
        let rect = Rect::new(self.base.position, self.base.size);
        if self.core.interaction.is_pressed() {
            rect.scaled(PRESS_SCALE, Vec2::splat(PRESS_SHIFT))
        } else {
            rect
        }
    }

    /// Fill as currently drawn.
    pub fn current_fill(&self) -> Color {
        if self.core.interaction.is_hovered() {
            self.base.color.darken(HOVER_SHADE)
        } else {
            self.base.color
        }
    }

    /// Label size as currently drawn.
    pub fn current_text_size(&self) -> u32 {
        if self.core.interaction.is_pressed() {
            self.text_size.saturating_sub(1)
        } else {
            self.text_size
        }
    }
}

impl Widget for Button {
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
        let bounds = self.bounds();
        surface.fill_rect(bounds, self.current_fill());
        surface.draw_text(
            &self.text,
            self.font.as_ref(),
            self.current_text_size(),
            self.text_color,
            // The label stays put while the rectangle shrinks.
            Rect::new(self.base.position, self.base.size).center(),
        );
        Ok(())
    }

    fn surface(&self) -> Option<SurfaceId> {
        self.base.surface
    }

    fn bind_surface(&mut self, surface: SurfaceId) {
        self.base.surface = Some(surface);
    }

    fn bind_font(&mut self, font: &Font) {
        self.set_font(font.clone());
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
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::audio::SoundBuffer;
    use crate::surface::{Canvas, DrawCommand};
    use crate::widget::test_support::{click_at, move_to, press, release};

    fn bound_button(canvas: &Canvas) -> Button {
        let mut button = Button::new(Vec2::new(10.0, 10.0), Vec2::new(100.0, 40.0))
            .with_color(Color::rgb(200, 200, 200))
            .with_text("OK");
        button.bind_surface(canvas.id());
        button
    }

    #[test]
    fn test_unbound_button_errors() {
        let mut canvas = Canvas::new(200.0, 200.0);
        let mut button = Button::new(Vec2::ZERO, Vec2::ONE);
        assert_eq!(button.handle_event(&press(), &canvas), Err(GuiError::NoSurface));
        assert_eq!(button.draw(&mut canvas), Err(GuiError::NoSurface));
    }

    #[test]
    fn test_foreign_surface_errors() {
        let mut other = Canvas::new(200.0, 200.0);
        let canvas = Canvas::new(200.0, 200.0);
        let mut button = bound_button(&canvas);
        assert!(matches!(button.draw(&mut other), Err(GuiError::ForeignSurface { .. })));
    }

    #[test]
    fn test_hover_darkens() {
        let mut canvas = Canvas::new(200.0, 200.0);
        let mut button = bound_button(&canvas);
        assert!(move_to(&mut button, &mut canvas, 20.0, 20.0).unwrap());
        assert_eq!(button.state(), InteractionState::Hovered);
        assert_eq!(button.current_fill(), Color::rgb(150, 150, 150));
        assert!(!move_to(&mut button, &mut canvas, 150.0, 20.0).unwrap());
        assert_eq!(button.current_fill(), Color::rgb(200, 200, 200));
    }

    #[test]
    fn test_press_shrinks_and_restores() {
        let mut canvas = Canvas::new(200.0, 200.0);
        let mut button = bound_button(&canvas);
        move_to(&mut button, &mut canvas, 20.0, 20.0).unwrap();
        button.handle_event(&press(), &canvas).unwrap();

        let pressed = button.bounds();
        assert_eq!(pressed.position, Vec2::new(13.0, 13.0));
        assert_eq!(pressed.size, Vec2::new(97.5, 39.0));
        assert_eq!(button.current_text_size(), 30);

        button.handle_event(&release(), &canvas).unwrap();
        assert_eq!(button.bounds(), Rect::new(Vec2::new(10.0, 10.0), Vec2::new(100.0, 40.0)));
        assert_eq!(button.current_text_size(), 31);
    }

    #[test]
    fn test_delegate_fires_on_release_inside() {
        let mut canvas = Canvas::new(200.0, 200.0);
        let mut button = bound_button(&canvas);
        let clicks = Rc::new(RefCell::new(0));
        let counter = clicks.clone();
        button.set_delegate(move || *counter.borrow_mut() += 1);

        click_at(&mut button, &mut canvas, 20.0, 20.0);
        assert_eq!(*clicks.borrow(), 1);
    }

    #[test]
    fn test_delegate_skipped_on_away_release() {
        let mut canvas = Canvas::new(200.0, 200.0);
        let mut button = bound_button(&canvas);
        let clicks = Rc::new(RefCell::new(0));
        let counter = clicks.clone();
        button.set_delegate(move || *counter.borrow_mut() += 1);

        move_to(&mut button, &mut canvas, 20.0, 20.0).unwrap();
        button.handle_event(&press(), &canvas).unwrap();
        move_to(&mut button, &mut canvas, 180.0, 180.0).unwrap();
        button.handle_event(&release(), &canvas).unwrap();
        assert_eq!(*clicks.borrow(), 0);
        assert_eq!(button.state(), InteractionState::Idle);
    }

    #[test]
    fn test_delegate_with_bound_args() {
        let mut canvas = Canvas::new(200.0, 200.0);
        let mut button = bound_button(&canvas);
        let said = Rc::new(RefCell::new(Vec::new()));
        let sink = said.clone();
        button.set_delegate_with(move |s: String| sink.borrow_mut().push(s), "Hey there!".to_string());

        click_at(&mut button, &mut canvas, 20.0, 20.0);
        click_at(&mut button, &mut canvas, 20.0, 20.0);
        assert_eq!(*said.borrow(), vec!["Hey there!".to_string(), "Hey there!".to_string()]);
    }

    #[test]
    fn test_sounds_follow_transitions() {
        let mut canvas = Canvas::new(200.0, 200.0);
        let mut button = bound_button(&canvas);
        let click = SoundBuffer::from_samples(1, 100, vec![0.0; 10]);
        let hover = SoundBuffer::from_samples(1, 100, vec![0.0; 10]);
        button.set_sound(SoundSet::new().with_click(click.clone()).with_hover_start(hover.clone()));

        move_to(&mut button, &mut canvas, 20.0, 20.0).unwrap();
        assert!(button.voice().loaded().unwrap().ptr_eq(&hover));
        button.handle_event(&press(), &canvas).unwrap();
        assert!(button.voice().loaded().unwrap().ptr_eq(&click));
        // No release sound configured: the voice keeps the click buffer
        button.handle_event(&release(), &canvas).unwrap();
        assert_eq!(button.voice().play_count(), 2);
    }

    #[test]
    fn test_reset_on_click_drops_hover() {
        let mut canvas = Canvas::new(200.0, 200.0);
        let mut button = bound_button(&canvas).with_reset_on_click(true);
        click_at(&mut button, &mut canvas, 20.0, 20.0);
        assert_eq!(button.state(), InteractionState::Idle);
        assert_eq!(button.current_fill(), button.color());
    }

    #[test]
    fn test_draw_emits_rect_then_label() {
        let mut canvas = Canvas::new(200.0, 200.0);
        let mut button = bound_button(&canvas);
        button.draw(&mut canvas).unwrap();
        let frame = canvas.take_commands();
        assert_eq!(frame.len(), 2);
        assert!(matches!(frame[0], DrawCommand::Rect { .. }));
        match &frame[1] {
            DrawCommand::Text { text, size, center, color, .. } => {
                assert_eq!(text, "OK");
                assert_eq!(*size, 31);
                assert_eq!(*center, Vec2::new(60.0, 30.0));
                assert_eq!(*color, Color::BLACK);
            }
            other => panic!("expected text, got {:?}", other),
        }
    }
}
