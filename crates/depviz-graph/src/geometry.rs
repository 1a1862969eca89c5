use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A rectangle defined by min and max corners
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Create a new rectangle from position and size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: Vec2::new(pos.x + size.x, pos.y + size.y),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }

    /// Check if the rectangle contains a point (edges inclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Check if `other` lies entirely inside this rectangle
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    /// Clamp the top-left corner of a `size`-sized box so the box stays inside.
    /// Boxes larger than the rectangle are pinned to `min`.
    pub fn clamp_box(&self, pos: Vec2, size: Vec2) -> Vec2 {
        let max_x = (self.max.x - size.x).max(self.min.x);
        let max_y = (self.max.y - size.y).max(self.min.y);
        Vec2::new(pos.x.clamp(self.min.x, max_x), pos.y.clamp(self.min.y, max_y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_and_size() {
        let rect = Rect::from_pos_size(Vec2::new(10.0, 20.0), Vec2::new(100.0, 50.0));

        assert_eq!(rect.size(), Vec2::new(100.0, 50.0));
        assert!(rect.contains(Vec2::new(10.0, 20.0)));
        assert!(rect.contains(Vec2::new(110.0, 70.0)));
        assert!(!rect.contains(Vec2::new(110.1, 70.0)));
        assert!(rect.contains_rect(&Rect::from_pos_size(
            Vec2::new(20.0, 30.0),
            Vec2::new(10.0, 10.0)
        )));
    }

    #[test]
    fn test_clamp_box_keeps_box_inside() {
        let rect = Rect::from_pos_size(Vec2::new(0.0, 0.0), Vec2::new(400.0, 300.0));
        let size = Vec2::new(150.0, 80.0);

        assert_eq!(rect.clamp_box(Vec2::new(-20.0, 500.0), size), Vec2::new(0.0, 220.0));
        assert_eq!(rect.clamp_box(Vec2::new(100.0, 100.0), size), Vec2::new(100.0, 100.0));
        assert_eq!(rect.clamp_box(Vec2::new(390.0, 10.0), size), Vec2::new(250.0, 10.0));
    }
}
