use crate::geometry::Vec2;
use depviz_core::{GraphPayload, ProjectId};
use serde::{Deserialize, Serialize};

/// Input events a [`GraphView`](crate::view::GraphView) reacts to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GraphEvent {
    // Data
    Load { payload: GraphPayload },

    // Selection
    SelectNode { id: ProjectId },
    SelectRepository { name: String },
    ClearSelection,

    // Interaction
    /// Pointer moved while dragging a project; `position` is the proposed
    /// absolute top-left corner.
    DragNode { id: ProjectId, position: Vec2 },
}
