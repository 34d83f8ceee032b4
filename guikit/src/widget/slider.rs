//! Slider widget for guikit
//!
//! A bar with a cursor riding along it. The value is 0 at the left (or
//! bottom) end and 1 at the right (or top) end.

use std::any::Any;

use glam::Vec2;

use super::interaction::{Interaction, InteractionState};
use super::{GuiError, Widget};
use crate::audio::{AudioHandle, SoundSet, Voice};
use crate::color::Color;
use crate::event::InputEvent;
use crate::geometry::Rect;
use crate::surface::{Surface, SurfaceId};

pub(crate) const SLIDER_HOVER_SHADE: f32 = 0.925;

/// Bar and cursor geometry plus the current value.
#[derive(Debug, Clone)]
pub(crate) struct SliderTrack {
    pub position: Vec2,
    pub size: Vec2,
    pub cursor_size: Vec2,
    pub vertical: bool,
    pub min_offset: f32,
    pub max_offset: f32,
    pub value: f32,
}

impl SliderTrack {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            cursor_size: default_cursor_size(size, false),
            vertical: false,
            min_offset: 0.0,
            max_offset: 0.0,
            value: 0.0,
        }
    }

    /// Resize the bar; the cursor goes back to its default size for the orientation.
    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
        self.cursor_size = default_cursor_size(size, self.vertical);
    }

    pub fn bar_bounds(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    pub fn cursor_center(&self) -> Vec2 {
        let bar = self.bar_bounds();
        let center = bar.center();
        if self.vertical {
            let travel = self.size.y - self.min_offset - self.max_offset;
            let y = self.position.y + self.min_offset + (1.0 - self.value) * travel;
            Vec2::new(center.x, y)
        } else {
            let travel = self.size.x - self.min_offset - self.max_offset;
            let x = self.position.x + self.min_offset + self.value * travel;
            Vec2::new(x, center.y)
        }
    }

    pub fn cursor_bounds(&self) -> Rect {
        Rect::from_center(self.cursor_center(), self.cursor_size)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.bar_bounds().contains(point) || self.cursor_bounds().contains(point)
    }

    /// Value the pointer projects to on the bar, clamped to `[0, 1]`.
    pub fn value_at(&self, point: Vec2) -> f32 {
        let raw = if self.vertical {
            1.0 - (point.y - self.position.y) / self.size.y
        } else {
            (point.x - self.position.x) / self.size.x
        };
        if raw.is_nan() {
            return 0.0;
        }
        raw.clamp(0.0, 1.0)
    }

    pub fn set_value(&mut self, value: f32) {
        self.value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    }

    /// Swap bar and cursor extents when the orientation changes.
    ///
    /// Returns false when already in the requested orientation.
    pub fn set_vertical(&mut self, vertical: bool) -> bool {
        if self.vertical == vertical {
            return false;
        }
        self.vertical = vertical;
        self.size = Vec2::new(self.size.y, self.size.x);
        self.cursor_size = Vec2::new(self.cursor_size.y, self.cursor_size.x);
        true
    }
}

fn default_cursor_size(bar: Vec2, vertical: bool) -> Vec2 {
    if vertical {
        Vec2::new(bar.x * 1.2, bar.y / 10.0)
    } else {
        Vec2::new(bar.x / 10.0, bar.y * 1.2)
    }
}

/// Drag handling, sounds and delegate shared by [`Slider`] and `BitmapSlider`.
#[derive(Default)]
pub(crate) struct SliderCore {
    pub interaction: Interaction,
    pub sounds: SoundSet,
    pub voice: Voice,
    pub delegate: Option<Box<dyn FnMut(f32)>>,
}

impl SliderCore {
    pub fn handle(&mut self, track: &mut SliderTrack, event: &InputEvent, pointer: Vec2) -> bool {
        let hit = track.contains(pointer);

        match event {
            InputEvent::ButtonPressed { .. } if hit => {
                if !self.interaction.hovered {
                    self.interaction.hovered = true;
                    self.voice.play_opt(self.sounds.hover_start.as_ref());
                }
                self.interaction.pressed = true;
                self.voice.play_opt(self.sounds.click.as_ref());
                if !track.cursor_bounds().contains(pointer) {
                    self.seek(track, pointer);
                }
            }
            InputEvent::PointerMoved { .. } => {
                if hit && !self.interaction.hovered {
                    self.interaction.hovered = true;
                    self.voice.play_opt(self.sounds.hover_start.as_ref());
                } else if !hit && self.interaction.hovered {
                    self.interaction.hovered = false;
                    self.voice.play_opt(self.sounds.hover_end.as_ref());
                }
                if self.interaction.pressed {
                    self.seek(track, pointer);
                }
            }
            InputEvent::ButtonReleased { .. } if self.interaction.pressed => {
                self.interaction.pressed = false;
                self.voice.play_opt(self.sounds.release.as_ref());
                if !hit {
                    self.interaction.hovered = false;
                }
            }
            _ => {}
        }

        hit || self.interaction.pressed
    }

    fn seek(&mut self, track: &mut SliderTrack, pointer: Vec2) {
        track.value = track.value_at(pointer);
        if let Some(delegate) = self.delegate.as_mut() {
            delegate(track.value);
        }
    }

    pub fn is_active(&self) -> bool {
        self.interaction.hovered || self.interaction.pressed
    }
}

/// A plain bar and cursor slider.
pub struct Slider {
    track: SliderTrack,
    bar_color: Color,
    slider_color: Color,
    surface: Option<SurfaceId>,
    core: SliderCore,
}

impl Slider {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            track: SliderTrack::new(position, size),
            bar_color: Color::WHITE,
            slider_color: Color::SILVER,
            surface: None,
            core: SliderCore::default(),
        }
    }

    pub fn with_value(mut self, value: f32) -> Self {
        self.track.set_value(value);
        self
    }

    pub fn with_vertical(mut self, vertical: bool) -> Self {
        self.track.set_vertical(vertical);
        self
    }

    pub fn value(&self) -> f32 {
        self.track.value
    }

    /// Clamp to `[0, 1]` and move the cursor. The delegate is not called.
    pub fn set_value(&mut self, value: f32) {
        self.track.set_value(value);
    }

    pub fn is_vertical(&self) -> bool {
        self.track.vertical
    }

    pub fn set_vertical(&mut self, vertical: bool) {
        self.track.set_vertical(vertical);
    }

    pub fn bar_color(&self) -> Color {
        self.bar_color
    }

    pub fn set_bar_color(&mut self, color: Color) {
        self.bar_color = color;
    }

    pub fn slider_color(&self) -> Color {
        self.slider_color
    }

    pub fn set_slider_color(&mut self, color: Color) {
        self.slider_color = color;
    }

    pub fn cursor_size(&self) -> Vec2 {
        self.track.cursor_size
    }

    pub fn set_cursor_size(&mut self, size: Vec2) {
        self.track.cursor_size = size;
    }

    /// Pixel insets keeping the cursor center away from the bar's ends.
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

    fn shade(&self, color: Color) -> Color {
        if self.core.is_active() {
            color.darken(SLIDER_HOVER_SHADE)
        } else {
            color
        }
    }
}

impl Widget for Slider {
    fn position(&self) -> Vec2 {
        self.track.position
    }

    fn size(&self) -> Vec2 {
        self.track.size
    }

    fn color(&self) -> Color {
        self.bar_color
    }

    fn set_position(&mut self, position: Vec2) {
        self.track.position = position;
    }

    fn set_size(&mut self, size: Vec2) {
        self.track.set_size(size);
    }

    /// Paint bar and cursor alike; `set_slider_color` recolors the cursor afterwards.
    fn set_color(&mut self, color: Color) {
        self.bar_color = color;
        self.slider_color = color;
    }

    fn handle_event(&mut self, event: &InputEvent, surface: &dyn Surface) -> Result<bool, GuiError> {
        super::ensure_surface(self.surface, surface.id())?;
        Ok(self.core.handle(&mut self.track, event, surface.pointer_position()))
    }

    fn draw(&mut self, surface: &mut dyn Surface) -> Result<(), GuiError> {
        super::ensure_surface(self.surface, surface.id())?;
        surface.fill_rect(self.bar_bounds(), self.shade(self.bar_color));
        surface.fill_rect(self.cursor_bounds(), self.shade(self.slider_color));
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

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::surface::{Canvas, DrawCommand};
    use crate::widget::test_support::{move_to, press, release};

    /// Horizontal bar spanning x in [100, 300].
    fn bar(canvas: &Canvas) -> Slider {
        let mut slider = Slider::new(Vec2::new(100.0, 50.0), Vec2::new(200.0, 20.0));
        slider.bind_surface(canvas.id());
        slider
    }

    fn press_at(slider: &mut Slider, canvas: &mut Canvas, x: f32, y: f32) -> bool {
        move_to(slider, canvas, x, y).unwrap();
        slider.handle_event(&press(), &*canvas).unwrap()
    }

    #[test]
    fn test_value_projection() {
        let canvas = Canvas::new(400.0, 400.0);
        let slider = bar(&canvas);
        assert_eq!(slider.track.value_at(Vec2::new(200.0, 60.0)), 0.5);
        assert_eq!(slider.track.value_at(Vec2::new(50.0, 60.0)), 0.0);
        assert_eq!(slider.track.value_at(Vec2::new(400.0, 60.0)), 1.0);
    }

    #[test]
    fn test_press_on_bar_jumps() {
        let mut canvas = Canvas::new(400.0, 400.0);
        let mut slider = bar(&canvas);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        slider.set_delegate(move |value| sink.borrow_mut().push(value));

        assert!(press_at(&mut slider, &mut canvas, 200.0, 60.0));
        assert_eq!(slider.value(), 0.5);
        assert_eq!(*seen.borrow(), vec![0.5]);
        assert_eq!(slider.cursor_bounds().center(), Vec2::new(200.0, 60.0));
    }

    #[test]
    fn test_press_on_cursor_keeps_value() {
        let mut canvas = Canvas::new(400.0, 400.0);
        let mut slider = bar(&canvas);
        slider.set_value(0.25);
        // Cursor is 20 wide, centered on x = 150
        assert!(press_at(&mut slider, &mut canvas, 155.0, 60.0));
        assert_eq!(slider.value(), 0.25);
        assert!(slider.interaction().is_pressed());
    }

    #[test]
    fn test_drag_clamps_at_both_ends() {
        let mut canvas = Canvas::new(500.0, 400.0);
        let mut slider = bar(&canvas);
        press_at(&mut slider, &mut canvas, 200.0, 60.0);

        assert!(move_to(&mut slider, &mut canvas, 50.0, 300.0).unwrap());
        assert_eq!(slider.value(), 0.0);
        assert!(!slider.interaction().is_hovered());

        move_to(&mut slider, &mut canvas, 400.0, 0.0).unwrap();
        assert_eq!(slider.value(), 1.0);

        // Away release stops the drag
        assert!(!slider.handle_event(&release(), &canvas).unwrap());
        move_to(&mut slider, &mut canvas, 150.0, 300.0).unwrap();
        assert_eq!(slider.value(), 1.0);
        assert_eq!(slider.state(), InteractionState::Idle);
    }

    #[test]
    fn test_vertical_swaps_and_inverts() {
        let mut canvas = Canvas::new(400.0, 400.0);
        let mut slider = Slider::new(Vec2::ZERO, Vec2::new(200.0, 20.0));
        slider.bind_surface(canvas.id());
        slider.set_vertical(true);
        assert_eq!(slider.size(), Vec2::new(20.0, 200.0));
        assert_eq!(slider.cursor_size(), Vec2::new(24.0, 20.0));

        // Repeating the call changes nothing
        slider.set_vertical(true);
        assert_eq!(slider.size(), Vec2::new(20.0, 200.0));

        press_at(&mut slider, &mut canvas, 10.0, 50.0);
        assert_eq!(slider.value(), 0.75);
        assert_eq!(slider.cursor_bounds().center(), Vec2::new(10.0, 50.0));
    }

    #[test]
    fn test_offsets_shorten_travel() {
        let canvas = Canvas::new(400.0, 400.0);
        let mut slider = bar(&canvas);
        slider.set_offsets(10.0, 30.0);
        slider.set_value(0.0);
        assert_eq!(slider.cursor_bounds().center().x, 110.0);
        slider.set_value(1.0);
        assert_eq!(slider.cursor_bounds().center().x, 270.0);
    }

    #[test]
    fn test_set_value_clamps() {
        let canvas = Canvas::new(400.0, 400.0);
        let mut slider = bar(&canvas);
        slider.set_value(3.0);
        assert_eq!(slider.value(), 1.0);
        slider.set_value(-1.0);
        assert_eq!(slider.value(), 0.0);
    }

    #[test]
    fn test_draw_bar_then_cursor_shaded_on_hover() {
        let mut canvas = Canvas::new(400.0, 400.0);
        let mut slider = bar(&canvas);
        move_to(&mut slider, &mut canvas, 250.0, 60.0).unwrap();
        slider.draw(&mut canvas).unwrap();
        let commands = canvas.take_commands();
        assert_eq!(commands.len(), 2);
        match &commands[1] {
            DrawCommand::Rect { color, .. } => {
                assert_eq!(*color, Color::SILVER.darken(SLIDER_HOVER_SHADE))
            }
            other => panic!("expected rect, got {:?}", other),
        }
    }

    #[test]
    fn test_resize_resets_cursor_for_orientation() {
        let canvas = Canvas::new(400.0, 400.0);
        let mut slider = bar(&canvas);
        slider.set_cursor_size(Vec2::new(5.0, 5.0));
        slider.set_size(Vec2::new(300.0, 20.0));
        assert_eq!(slider.cursor_size(), Vec2::new(30.0, 24.0));

        slider.set_vertical(true);
        slider.set_size(Vec2::new(20.0, 300.0));
        assert_eq!(slider.cursor_size(), Vec2::new(24.0, 30.0));
    }

    #[test]
    fn test_set_color_paints_bar_and_cursor() {
        let canvas = Canvas::new(400.0, 400.0);
        let mut slider = bar(&canvas);
        slider.set_color(Color::BLACK);
        assert_eq!(slider.bar_color(), Color::BLACK);
        assert_eq!(slider.slider_color(), Color::BLACK);

        slider.set_slider_color(Color::WHITE);
        assert_eq!(slider.color(), Color::BLACK);
        assert_eq!(slider.slider_color(), Color::WHITE);
    }
}
