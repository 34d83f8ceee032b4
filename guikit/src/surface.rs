//! Render surfaces
//!
//! Widgets never hold a surface. They remember the [`SurfaceId`] they were
//! bound to and are handed the surface on every `handle_event` / `draw` call.

use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec2;

use crate::color::Color;
use crate::font::Font;
use crate::geometry::Rect;
use crate::texture::Texture;

/// Identifier of a render surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(u64);

impl SurfaceId {
    /// Allocate a fresh, process-unique id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Pointer glyph shown by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorIcon {
    #[default]
    Arrow,
    Hand,
}

/// A single draw primitive.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// Solid rectangle
    Rect { rect: Rect, color: Color },
    /// Texture stretched over `rect`, multiplied by `tint`, rotated clockwise
    /// by `quarter_turns` * 90 degrees inside the rectangle
    Sprite {
        texture: Texture,
        rect: Rect,
        tint: Color,
        quarter_turns: u8,
    },
    /// One line of text centred on `center`
    Text {
        text: String,
        font: Option<Font>,
        size: u32,
        color: Color,
        center: Vec2,
    },
}

/// What widgets need from the thing they draw on.
pub trait Surface {
    fn id(&self) -> SurfaceId;

    /// Pointer position in surface coordinates.
    fn pointer_position(&self) -> Vec2;

    fn is_open(&self) -> bool {
        true
    }

    fn set_cursor(&mut self, cursor: CursorIcon);

    fn submit(&mut self, command: DrawCommand);

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.submit(DrawCommand::Rect { rect, color });
    }

    fn draw_sprite(&mut self, texture: &Texture, rect: Rect, tint: Color, quarter_turns: u8) {
        if texture.is_empty() {
            return;
        }
        self.submit(DrawCommand::Sprite {
            texture: texture.clone(),
            rect,
            tint,
            quarter_turns: quarter_turns % 4,
        });
    }

    fn draw_text(&mut self, text: &str, font: Option<&Font>, size: u32, color: Color, center: Vec2) {
        if text.is_empty() {
            return;
        }
        self.submit(DrawCommand::Text {
            text: text.to_string(),
            font: font.cloned(),
            size,
            color,
            center,
        });
    }
}

/// In-memory surface that records draw commands for a renderer to consume.
///
/// The host keeps the pointer position current and reads back the cursor
/// glyph the GUI asked for.
#[derive(Debug)]
pub struct Canvas {
    id: SurfaceId,
    size: Vec2,
    pointer: Vec2,
    open: bool,
    cursor: CursorIcon,
    commands: Vec<DrawCommand>,
}

impl Canvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            id: SurfaceId::next(),
            size: Vec2::new(width, height),
            pointer: Vec2::new(-1.0, -1.0),
            open: true,
            cursor: CursorIcon::Arrow,
            commands: Vec::new(),
        }
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn set_pointer(&mut self, position: Vec2) {
        self.pointer = position;
    }

    /// Move the pointer somewhere no widget can be.
    pub fn clear_pointer(&mut self) {
        self.pointer = Vec2::new(f32::MIN, f32::MIN);
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Hand the recorded frame over, leaving the canvas empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for Canvas {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn pointer_position(&self) -> Vec2 {
        self.pointer
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn set_cursor(&mut self, cursor: CursorIcon) {
        self.cursor = cursor;
    }

    fn submit(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_ids_unique() {
        assert_ne!(Canvas::new(1.0, 1.0).id(), Canvas::new(1.0, 1.0).id());
    }

    #[test]
    fn test_skips_empty_primitives() {
        let mut canvas = Canvas::new(100.0, 100.0);
        canvas.draw_text("", None, 12, Color::BLACK, Vec2::ZERO);
        canvas.draw_sprite(&Texture::empty(), Rect::default(), Color::WHITE, 0);
        assert!(canvas.commands().is_empty());
    }

    #[test]
    fn test_take_commands_drains() {
        let mut canvas = Canvas::new(100.0, 100.0);
        canvas.fill_rect(Rect::new(Vec2::ZERO, Vec2::ONE), Color::WHITE);
        let texture = Texture::from_rgba(1, 1, vec![255; 4]).unwrap();
        canvas.draw_sprite(&texture, Rect::default(), Color::WHITE, 5);
        let frame = canvas.take_commands();
        assert_eq!(frame.len(), 2);
        assert!(matches!(frame[1], DrawCommand::Sprite { quarter_turns: 1, .. }));
        assert!(canvas.commands().is_empty());
    }
}
