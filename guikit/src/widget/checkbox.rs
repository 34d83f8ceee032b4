//! CheckBox widget for guikit

use std::any::Any;

use glam::Vec2;

use super::button::HOVER_SHADE;
use super::interaction::{dispatch, Interaction, InteractionHooks, InteractionState};
use super::{GuiError, Widget, WidgetBase};
use crate::audio::{AudioHandle, CheckSoundSet, Voice};
use crate::color::Color;
use crate::event::InputEvent;
use crate::geometry::Rect;
use crate::surface::{Surface, SurfaceId};

/// Checked flag, sounds and delegate shared by [`CheckBox`] and `BitmapCheckBox`.
#[derive(Default)]
pub(crate) struct CheckCore {
    pub interaction: Interaction,
    pub checked: bool,
    pub sounds: CheckSoundSet,
    pub voice: Voice,
    pub delegate: Option<Box<dyn FnMut(bool)>>,
}

impl CheckCore {
    pub fn handle(&mut self, event: &InputEvent, inside: bool) -> bool {
        dispatch(self, event, inside)
    }
}

impl InteractionHooks for CheckCore {
    fn interaction_mut(&mut self) -> &mut Interaction {
        &mut self.interaction
    }

    fn on_start_hover(&mut self) {
        self.voice.play_opt(self.sounds.hover_start.as_ref());
    }

    fn on_end_hover(&mut self) {
        self.voice.play_opt(self.sounds.hover_end.as_ref());
    }

    fn on_click(&mut self) {}

    fn on_release(&mut self, away: bool) {
        if away {
            return;
        }
        self.checked = !self.checked;
        log::debug!("CheckBox toggled to {}", self.checked);
        let sound = if self.checked {
            self.sounds.checked.as_ref()
        } else {
            self.sounds.unchecked.as_ref()
        };
        self.voice.play_opt(sound);
        if let Some(delegate) = self.delegate.as_mut() {
            delegate(self.checked);
        }
    }
}

/// A square toggle: a back rectangle with a black check mark drawn inside it
/// while checked.
pub struct CheckBox {
    base: WidgetBase,
    check_color: Color,
    core: CheckCore,
}

impl CheckBox {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            base: WidgetBase::new(position, size, Color::WHITE),
            check_color: Color::BLACK,
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

    pub fn is_checked(&self) -> bool {
        self.core.checked
    }

    /// Set the state without sound or delegate.
    pub fn set_checked(&mut self, checked: bool) {
        self.core.checked = checked;
    }

    pub fn set_check_color(&mut self, color: Color) {
        self.check_color = color;
    }

    pub fn set_sound(&mut self, sounds: CheckSoundSet) {
        self.core.sounds.merge(sounds);
    }

    pub fn voice(&self) -> &Voice {
        &self.core.voice
    }

    /// Called with the new state after every toggle.
    pub fn set_delegate(&mut self, delegate: impl FnMut(bool) + 'static) {
        self.core.delegate = Some(Box::new(delegate));
    }

    pub fn interaction(&self) -> &Interaction {
        &self.core.interaction
    }

    pub fn state(&self) -> InteractionState {
        self.core.interaction.state()
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.base.position, self.base.size)
    }

    /// The check mark: inset by a seventh of the size on every side.
    pub fn check_bounds(&self) -> Rect {
        Rect::new(
            self.base.position + self.base.size / 7.0,
            self.base.size * 5.0 / 7.0,
        )
    }

    pub fn current_fill(&self) -> Color {
        if self.core.interaction.is_hovered() {
            self.base.color.darken(HOVER_SHADE)
        } else {
            self.base.color
        }
    }
}

impl Widget for CheckBox {
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
        surface.fill_rect(self.bounds(), self.current_fill());
        if self.core.checked {
            surface.fill_rect(self.check_bounds(), self.check_color);
        }
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
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::audio::SoundBuffer;
    use crate::surface::Canvas;
    use crate::widget::test_support::{click_at, move_to, press, release};

    fn bound_checkbox(canvas: &Canvas) -> CheckBox {
        let mut checkbox = CheckBox::new(Vec2::new(0.0, 0.0), Vec2::new(70.0, 70.0));
        checkbox.bind_surface(canvas.id());
        checkbox
    }

    #[test]
    fn test_toggles_once_per_click() {
        let mut canvas = Canvas::new(100.0, 100.0);
        let mut checkbox = bound_checkbox(&canvas);
        click_at(&mut checkbox, &mut canvas, 35.0, 35.0);
        assert!(checkbox.is_checked());
        click_at(&mut checkbox, &mut canvas, 35.0, 35.0);
        assert!(!checkbox.is_checked());
    }

    #[test]
    fn test_away_release_does_not_toggle() {
        let mut canvas = Canvas::new(100.0, 100.0);
        let mut checkbox = bound_checkbox(&canvas);
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        checkbox.set_delegate(move |checked| sink.borrow_mut().push(checked));

        move_to(&mut checkbox, &mut canvas, 35.0, 35.0).unwrap();
        checkbox.handle_event(&press(), &canvas).unwrap();
        move_to(&mut checkbox, &mut canvas, 95.0, 95.0).unwrap();
        checkbox.handle_event(&release(), &canvas).unwrap();

        assert!(!checkbox.is_checked());
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_delegate_receives_new_state() {
        let mut canvas = Canvas::new(100.0, 100.0);
        let mut checkbox = bound_checkbox(&canvas);
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        checkbox.set_delegate(move |checked| sink.borrow_mut().push(checked));

        click_at(&mut checkbox, &mut canvas, 35.0, 35.0);
        click_at(&mut checkbox, &mut canvas, 35.0, 35.0);
        assert_eq!(*calls.borrow(), vec![true, false]);
    }

    #[test]
    fn test_check_sounds_and_hover_end() {
        let mut canvas = Canvas::new(100.0, 100.0);
        let mut checkbox = bound_checkbox(&canvas);
        let on = SoundBuffer::from_samples(1, 100, vec![0.0; 4]);
        let off = SoundBuffer::from_samples(1, 100, vec![0.0; 4]);
        let leave = SoundBuffer::from_samples(1, 100, vec![0.0; 4]);
        checkbox.set_sound(
            CheckSoundSet::new()
                .with_checked(on.clone())
                .with_unchecked(off.clone())
                .with_hover_end(leave.clone()),
        );

        click_at(&mut checkbox, &mut canvas, 35.0, 35.0);
        assert!(checkbox.voice().loaded().unwrap().ptr_eq(&on));
        click_at(&mut checkbox, &mut canvas, 35.0, 35.0);
        assert!(checkbox.voice().loaded().unwrap().ptr_eq(&off));
        move_to(&mut checkbox, &mut canvas, 95.0, 95.0).unwrap();
        assert!(checkbox.voice().loaded().unwrap().ptr_eq(&leave));
    }

    #[test]
    fn test_draw_check_mark_only_when_checked() {
        let mut canvas = Canvas::new(100.0, 100.0);
        let mut checkbox = bound_checkbox(&canvas);
        checkbox.draw(&mut canvas).unwrap();
        assert_eq!(canvas.take_commands().len(), 1);

        checkbox.set_checked(true);
        checkbox.draw(&mut canvas).unwrap();
        assert_eq!(canvas.take_commands().len(), 2);
        assert_eq!(
            checkbox.check_bounds(),
            Rect::new(Vec2::new(10.0, 10.0), Vec2::new(50.0, 50.0))
        );
    }
}
