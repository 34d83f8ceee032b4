//! Axis-aligned rectangles in surface coordinates (top-left origin, y down)

use glam::Vec2;

/// An axis-aligned rectangle given by its top-left corner and extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub position: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    /// Build a rectangle of `size` centred on `center`.
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            position: center - size / 2.0,
            size,
        }
    }

    pub fn min(&self) -> Vec2 {
        self.position
    }

    pub fn max(&self) -> Vec2 {
        self.position + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size / 2.0
    }

    /// Check if a point is inside the rectangle.
    ///
    /// The left and top edges are inclusive, the right and bottom edges exclusive,
    /// so two rectangles sharing an edge never both claim a point.
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.position.x && point.x < max.x && point.y >= self.position.y && point.y < max.y
    }

    /// Shrink or grow around the top-left corner, then shift.
    pub fn scaled(&self, scale: f32, shift: Vec2) -> Self {
        Self {
            position: self.position + shift,
            size: self.size * scale,
        }
    }

    /// Bounds as `[x, y, w, h]`, the layout the renderer works in.
    pub fn to_array(&self) -> [f32; 4] {
        [self.position.x, self.position.y, self.size.x, self.size.y]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_edges() {
        let rect = Rect::new(Vec2::new(10.0, 10.0), Vec2::new(20.0, 10.0));
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(rect.contains(Vec2::new(29.9, 19.9)));
        assert!(!rect.contains(Vec2::new(30.0, 15.0)));
        assert!(!rect.contains(Vec2::new(15.0, 20.0)));
        assert!(!rect.contains(Vec2::new(9.0, 15.0)));
    }

    #[test]
    fn test_from_center() {
        let rect = Rect::from_center(Vec2::new(50.0, 50.0), Vec2::new(10.0, 20.0));
        assert_eq!(rect.position, Vec2::new(45.0, 40.0));
        assert_eq!(rect.center(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_scaled_keeps_corner() {
        let rect = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 40.0));
        let pressed = rect.scaled(0.5, Vec2::new(3.0, 3.0));
        assert_eq!(pressed.position, Vec2::new(3.0, 3.0));
        assert_eq!(pressed.size, Vec2::new(50.0, 20.0));
    }
}
