use crate::geometry::Vec2;
use crate::layout::LayoutConfig;

/// Pushes a dragged node out of its siblings' boxes.
///
/// Siblings are visited in order and each check starts from the coordinates the
/// previous check produced, so a push away from one sibling may land on another.
/// Only the overlap along the shorter axis is resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResolver {
    pub node_width: f32,
    pub node_height: f32,
    pub margin: f32,
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

impl CollisionResolver {
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            node_width: config.node_width,
            node_height: config.node_height,
            margin: config.drag_margin,
        }
    }

    pub fn overlaps(&self, a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < self.node_width + self.margin
            && (a.y - b.y).abs() < self.node_height + self.margin
    }

    pub fn resolve(&self, proposed: Vec2, siblings: &[Vec2]) -> Vec2 {
        let min_x = self.node_width + self.margin;
        let min_y = self.node_height + self.margin;

        let mut pos = proposed;
        for sibling in siblings {
            let dx = (pos.x - sibling.x).abs();
            let dy = (pos.y - sibling.y).abs();
            if dx >= min_x || dy >= min_y {
                continue;
            }

            if dx < dy {
                pos.y = if pos.y < sibling.y {
                    sibling.y - min_y
                } else {
                    sibling.y + min_y
                };
            } else {
                pos.x = if pos.x < sibling.x {
                    sibling.x - min_x
                } else {
                    sibling.x + min_x
                };
            }
        }
        pos
    }
}
