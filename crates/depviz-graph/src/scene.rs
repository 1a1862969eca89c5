use crate::geometry::Vec2;
use crate::highlight::{Highlight, Selection};
use depviz_core::{Packaging, ProjectId};
use serde::Serialize;

/// Render snapshot of a [`GraphView`](crate::view::GraphView).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub canvas_size: Vec2,
    pub selection: Selection,
    /// Packing order
    pub repositories: Vec<SceneRepository>,
    /// Payload order, aggregators excluded
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<SceneEdge>,
}

impl Scene {
    pub fn node(&self, id: &ProjectId) -> Option<&SceneNode> {
        self.nodes.iter().find(|node| &node.id == id)
    }

    pub fn repository(&self, name: &str) -> Option<&SceneRepository> {
        self.repositories.iter().find(|repo| repo.name == name)
    }

    pub fn visible_nodes(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter().filter(|node| !node.highlight.hidden)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneRepository {
    pub name: String,
    pub position: Vec2,
    pub size: Vec2,
    pub level_count: u32,
    pub project_count: usize,
    #[serde(flatten)]
    pub highlight: Highlight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneNode {
    pub id: ProjectId,
    pub label: String,
    pub version: String,
    pub packaging: Packaging,
    pub repository: String,
    pub level: u32,
    /// Absolute top-left corner
    pub position: Vec2,
    #[serde(flatten)]
    pub highlight: Highlight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneEdge {
    pub id: String,
    pub source: ProjectId,
    pub target: ProjectId,
    pub source_handle: String,
    pub target_handle: String,
    #[serde(flatten)]
    pub highlight: Highlight,
}
