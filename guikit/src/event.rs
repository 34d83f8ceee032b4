//! Input events fed to the GUI by the host loop

use glam::Vec2;

/// Mouse buttons the host may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// One raw input event.
///
/// Widgets query the pointer position from the surface, so the position carried
/// by `PointerMoved` is informational.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMoved { position: Vec2 },
    ButtonPressed { button: MouseButton },
    ButtonReleased { button: MouseButton },
    Closed,
    Other,
}

impl InputEvent {
    pub fn is_press(&self) -> bool {
        matches!(self, InputEvent::ButtonPressed { .. })
    }

    pub fn is_release(&self) -> bool {
        matches!(self, InputEvent::ButtonReleased { .. })
    }

    pub fn is_pointer_move(&self) -> bool {
        matches!(self, InputEvent::PointerMoved { .. })
    }
}
