use crate::geometry::Vec2;
use crate::layout::PositionMap;
use depviz_core::{DependencyLink, ProjectId};
use serde::{Deserialize, Serialize};

/// Which side of a node box an edge leaves or enters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorSide {
    Left,
    Right,
    Top,
    Bottom,
}

impl AnchorSide {
    pub fn opposite(&self) -> Self {
        match self {
            AnchorSide::Left => AnchorSide::Right,
            AnchorSide::Right => AnchorSide::Left,
            AnchorSide::Top => AnchorSide::Bottom,
            AnchorSide::Bottom => AnchorSide::Top,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnchorSide::Left => "left",
            AnchorSide::Right => "right",
            AnchorSide::Top => "top",
            AnchorSide::Bottom => "bottom",
        }
    }
}

/// Anchor sides chosen for one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeHandles {
    pub source: AnchorSide,
    pub target: AnchorSide,
}

impl Default for EdgeHandles {
    fn default() -> Self {
        Self {
            source: AnchorSide::Bottom,
            target: AnchorSide::Top,
        }
    }
}

impl EdgeHandles {
    /// Renderer handle id on the source node, e.g. `source-right`
    pub fn source_handle(&self) -> String {
        format!("source-{}", self.source.as_str())
    }

    /// Renderer handle id on the target node, e.g. `target-left`
    pub fn target_handle(&self) -> String {
        format!("target-{}", self.target.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutedEdge {
    /// Stable edge id, `e{index}` over the filtered link list
    pub id: String,
    pub source: ProjectId,
    pub target: ProjectId,
    pub handles: EdgeHandles,
}

/// Chooses connection sides from the relative position of the two endpoints.
///
/// Purely cosmetic: the dominant axis of the offset decides between a
/// horizontal and a vertical connection.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeRouter;

impl EdgeRouter {
    pub fn new() -> Self {
        Self
    }

    pub fn route(&self, source: Option<Vec2>, target: Option<Vec2>) -> EdgeHandles {
        let (Some(source), Some(target)) = (source, target) else {
            return EdgeHandles::default();
        };

        let dx = target.x - source.x;
        let dy = target.y - source.y;

        let source_side = if dx.abs() > dy.abs() {
            if dx > 0.0 {
                AnchorSide::Right
            } else {
                AnchorSide::Left
            }
        } else if dy > 0.0 {
            AnchorSide::Bottom
        } else {
            AnchorSide::Top
        };

        EdgeHandles {
            source: source_side,
            target: source_side.opposite(),
        }
    }

    pub fn route_link(&self, link: &DependencyLink, positions: &PositionMap) -> EdgeHandles {
        self.route(
            positions.get(&link.source).copied(),
            positions.get(&link.target).copied(),
        )
    }

    pub fn route_all(&self, links: &[DependencyLink], positions: &PositionMap) -> Vec<RoutedEdge> {
        links
            .iter()
            .enumerate()
            .map(|(index, link)| RoutedEdge {
                id: format!("e{index}"),
                source: link.source.clone(),
                target: link.target.clone(),
                handles: self.route_link(link, positions),
            })
            .collect()
    }
}
