//! Widget system for guikit
//!
//! Every widget implements [`Widget`]. Buttons and checkboxes share the
//! hover / press / release machine in [`interaction`]; sliders add dragging
//! on top of the same [`Interaction`] flags.

mod bitmap_button;
mod bitmap_checkbox;
mod bitmap_slider;
mod button;
mod checkbox;
pub mod interaction;
mod slider;

pub use bitmap_button::BitmapButton;
pub use bitmap_checkbox::BitmapCheckBox;
pub use bitmap_slider::BitmapSlider;
pub use button::Button;
pub use checkbox::CheckBox;
pub use interaction::{Interaction, InteractionState};
pub use slider::Slider;

use std::any::Any;
use std::sync::atomic::{AtomicU32, Ordering};

use glam::Vec2;
use thiserror::Error;

use crate::audio::AudioHandle;
use crate::color::Color;
use crate::event::InputEvent;
use crate::font::Font;
use crate::group::Group;
use crate::surface::{Surface, SurfaceId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuiError {
    #[error("Widget is not bound to a surface")]
    NoSurface,
    #[error("Widget is bound to surface {bound:?} but was given {given:?}")]
    ForeignSurface { bound: SurfaceId, given: SurfaceId },
}

/// Unique identifier for a widget inside a GUI tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(pub u32);

impl WidgetId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub(crate) fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Common behavior for all widgets
pub trait Widget: Any {
    /// Top-left corner in surface coordinates.
    fn position(&self) -> Vec2;

    fn size(&self) -> Vec2;

    /// Base fill color. Hover and press shading is derived from it.
    fn color(&self) -> Color;

    fn set_position(&mut self, position: Vec2);

    fn set_size(&mut self, size: Vec2);

    fn set_color(&mut self, color: Color);

    /// Move to an absolute position.
    fn move_to(&mut self, position: Vec2) {
        self.set_position(position);
    }

    /// Offset of this widget from `group`'s global position.
    fn relative_position(&self, group: &Group) -> Vec2 {
        self.position() - group.global_position()
    }

    /// Feed one input event.
    ///
    /// Returns true while the widget captures the pointer (hovered or pressed).
    fn handle_event(&mut self, event: &InputEvent, surface: &dyn Surface) -> Result<bool, GuiError>;

    /// Draw the current visual state onto `surface`.
    fn draw(&mut self, surface: &mut dyn Surface) -> Result<(), GuiError>;

    /// Surface this widget was bound to, if any.
    fn surface(&self) -> Option<SurfaceId>;

    fn bind_surface(&mut self, surface: SurfaceId);

    /// Receive the GUI's default font. Only widgets that draw text keep it.
    fn bind_font(&mut self, _font: &Font) {}

    /// Route this widget's sounds to an audio output.
    fn bind_audio(&mut self, _audio: &AudioHandle) {}

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Fail unless the widget is bound to `given`.
pub(crate) fn ensure_surface(bound: Option<SurfaceId>, given: SurfaceId) -> Result<(), GuiError> {
    match bound {
        None => Err(GuiError::NoSurface),
        Some(bound) if bound != given => Err(GuiError::ForeignSurface { bound, given }),
        Some(_) => Ok(()),
    }
}

/// Geometry and binding shared by the rectangular widgets.
#[derive(Debug, Clone)]
pub(crate) struct WidgetBase {
    pub position: Vec2,
    pub size: Vec2,
    pub color: Color,
    pub surface: Option<SurfaceId>,
}

impl WidgetBase {
    pub fn new(position: Vec2, size: Vec2, color: Color) -> Self {
        Self {
            position,
            size,
            color,
            surface: None,
        }
    }

    pub fn ensure_surface(&self, given: SurfaceId) -> Result<(), GuiError> {
        ensure_surface(self.surface, given)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use glam::Vec2;

    use crate::event::{InputEvent, MouseButton};
    use crate::surface::Canvas;
    use crate::widget::{GuiError, Widget};

    pub fn press() -> InputEvent {
        InputEvent::ButtonPressed {
            button: MouseButton::Left,
        }
    }

    pub fn release() -> InputEvent {
        InputEvent::ButtonReleased {
            button: MouseButton::Left,
        }
    }

    /// Put the pointer at `(x, y)` and deliver the matching move event.
    pub fn move_to(
        widget: &mut dyn Widget,
        canvas: &mut Canvas,
        x: f32,
        y: f32,
    ) -> Result<bool, GuiError> {
        canvas.set_pointer(Vec2::new(x, y));
        let event = InputEvent::PointerMoved {
            position: canvas.pointer(),
        };
        widget.handle_event(&event, &*canvas)
    }

    /// Hover, press and release at `(x, y)`.
    pub fn click_at(widget: &mut dyn Widget, canvas: &mut Canvas, x: f32, y: f32) {
        move_to(widget, canvas, x, y).unwrap();
        widget.handle_event(&press(), &*canvas).unwrap();
        widget.handle_event(&release(), &*canvas).unwrap();
    }
}
