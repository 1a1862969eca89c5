use crate::collision::CollisionResolver;
use crate::edge_router::{EdgeRouter, RoutedEdge};
use crate::events::GraphEvent;
use crate::geometry::Vec2;
use crate::graph::GraphModel;
use crate::highlight::{HighlightEngine, HighlightState, Selection};
use crate::layout::{GraphLayout, LayoutConfig, Layouter, PositionMap, RepositoryPacker};
use crate::scene::{Scene, SceneEdge, SceneNode, SceneRepository};
use depviz_core::{GraphPayload, ProjectId};
use serde::Serialize;

/// Entry in the repository selection panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySummary {
    pub name: String,
    pub project_count: usize,
    pub incident_edges: usize,
}

/// Owns the loaded graph, its layout and the current selection.
///
/// Layout runs once per load. Drags only touch the position map and the
/// handles of edges incident to the dragged project; highlights are derived
/// from scratch on every query.
#[derive(Debug, Clone)]
pub struct GraphView {
    config: LayoutConfig,
    model: GraphModel,
    layout: GraphLayout,
    edges: Vec<RoutedEdge>,
    selection: Selection,
    highlights: HighlightEngine,
    router: EdgeRouter,
    collision: CollisionResolver,
}

impl Default for GraphView {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl GraphView {
    pub fn new(config: LayoutConfig) -> Self {
        let collision = CollisionResolver::from_config(&config);
        Self {
            config,
            model: GraphModel::default(),
            layout: GraphLayout::default(),
            edges: Vec::new(),
            selection: Selection::None,
            highlights: HighlightEngine::default(),
            router: EdgeRouter::new(),
            collision,
        }
    }

    pub fn from_payload(config: LayoutConfig, payload: &GraphPayload) -> Self {
        let mut view = Self::new(config);
        view.load(payload);
        view
    }

    /// Replaces the graph and recomputes everything. Selection and dragged
    /// positions are discarded.
    pub fn load(&mut self, payload: &GraphPayload) {
        self.load_model(GraphModel::from_payload(payload));
    }

    pub fn load_model(&mut self, model: GraphModel) {
        self.model = model;
        self.selection.clear();
        self.highlights = HighlightEngine::new(&self.model);
        self.relayout();

        tracing::debug!(
            "Loaded graph with {} projects in {} repositories",
            self.model.node_count(),
            self.layout.repositories.len()
        );
    }

    /// Runs the layout again, dropping manual drags.
    pub fn relayout(&mut self) {
        self.layout = RepositoryPacker::new(self.config.clone()).execute(&self.model);
        self.edges = self
            .router
            .route_all(self.model.links(), &self.layout.positions);
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn model(&self) -> &GraphModel {
        &self.model
    }

    pub fn layout(&self) -> &GraphLayout {
        &self.layout
    }

    pub fn positions(&self) -> &PositionMap {
        &self.layout.positions
    }

    pub fn position(&self, id: &ProjectId) -> Option<Vec2> {
        self.layout.position(id)
    }

    pub fn level(&self, id: &ProjectId) -> Option<u32> {
        self.layout.levels.get(id).copied()
    }

    pub fn edges(&self) -> &[RoutedEdge] {
        &self.edges
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Toggles selection of a project. Unknown ids (including aggregators)
    /// leave the selection untouched and return false.
    pub fn select_node(&mut self, id: impl Into<ProjectId>) -> bool {
        let id = id.into();
        if !self.model.contains(&id) {
            tracing::warn!("Ignoring selection of unknown project {}", id);
            return false;
        }
        self.selection.select_node(id);
        tracing::debug!("Selection is now {:?}", self.selection);
        true
    }

    /// Toggles selection of a repository. Unknown names return false.
    pub fn select_repository(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.model.repository(&name).is_none() {
            tracing::warn!("Ignoring selection of unknown repository {}", name);
            return false;
        }
        self.selection.select_repository(name);
        tracing::debug!("Selection is now {:?}", self.selection);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn highlights(&mut self) -> HighlightState {
        self.highlights.compute(&self.model, &self.selection)
    }

    /// Moves a project towards `proposed`, pushing it off its repository
    /// siblings and keeping it inside its repository box. Returns the final
    /// position, or `None` for an unknown project.
    pub fn drag_node(&mut self, id: &ProjectId, proposed: Vec2) -> Option<Vec2> {
        let Some(bucket) = self.model.repository_of(id) else {
            tracing::warn!("Ignoring drag of unknown project {}", id);
            return None;
        };

        let siblings: Vec<Vec2> = bucket
            .nodes
            .iter()
            .filter(|sibling| *sibling != id)
            .filter_map(|sibling| self.layout.positions.get(sibling).copied())
            .collect();
        let previous = self.layout.positions.get(id).copied()?;
        let resolved = self.collision.resolve(proposed, &siblings);

        let repository = self
            .layout
            .repositories
            .iter_mut()
            .find(|repo| repo.name == bucket.name)?;
        let clamped = repository
            .bounds
            .clamp_box(resolved, self.config.node_size());
        // A clamp that pushes the project back onto a sibling rejects the move.
        let position = if clamped != resolved
            && siblings
                .iter()
                .any(|sibling| self.collision.overlaps(clamped, *sibling))
        {
            previous
        } else {
            clamped
        };

        if let Some(offset) = repository
            .node_offsets
            .iter_mut()
            .find(|(node_id, _)| node_id == id)
        {
            offset.1 = position - repository.bounds.min;
        }

        self.layout.positions.insert(id.clone(), position);

        for (link, edge) in self.model.links().iter().zip(self.edges.iter_mut()) {
            if link.touches(id) {
                edge.handles = self.router.route_link(link, &self.layout.positions);
            }
        }

        Some(position)
    }

    /// Repositories for the selection panel, largest first. Equal sizes keep
    /// first-appearance order.
    pub fn repositories(&self) -> Vec<RepositorySummary> {
        let mut summaries: Vec<RepositorySummary> = self
            .model
            .repositories()
            .iter()
            .map(|bucket| RepositorySummary {
                name: bucket.name.clone(),
                project_count: bucket.nodes.len(),
                incident_edges: self
                    .layout
                    .repository(&bucket.name)
                    .map(|repo| repo.incident_edges)
                    .unwrap_or(0),
            })
            .collect();
        summaries.sort_by(|a, b| b.project_count.cmp(&a.project_count));
        summaries
    }

    pub fn handle(&mut self, event: GraphEvent) {
        match event {
            GraphEvent::Load { payload } => self.load(&payload),
            GraphEvent::SelectNode { id } => {
                self.select_node(id);
            }
            GraphEvent::SelectRepository { name } => {
                self.select_repository(name);
            }
            GraphEvent::ClearSelection => self.clear_selection(),
            GraphEvent::DragNode { id, position } => {
                self.drag_node(&id, position);
            }
        }
    }

    pub fn scene(&mut self) -> Scene {
        let highlights = self.highlights();

        let repositories = self
            .layout
            .repositories
            .iter()
            .map(|repo| SceneRepository {
                name: repo.name.clone(),
                position: repo.bounds.min,
                size: repo.bounds.size(),
                level_count: repo.level_count,
                project_count: repo.node_offsets.len(),
                highlight: highlights.repository(&repo.name),
            })
            .collect();

        let nodes = self
            .model
            .nodes()
            .iter()
            .map(|node| SceneNode {
                id: node.id.clone(),
                label: node.name.clone(),
                version: node.version.clone(),
                packaging: node.packaging,
                repository: node.repository_name().to_string(),
                level: self.level(&node.id).unwrap_or(0),
                position: self.position(&node.id).unwrap_or_default(),
                highlight: highlights.node(&node.id),
            })
            .collect();

        let edges = self
            .edges
            .iter()
            .enumerate()
            .map(|(index, edge)| SceneEdge {
                id: edge.id.clone(),
                source: edge.source.clone(),
                target: edge.target.clone(),
                source_handle: edge.handles.source_handle(),
                target_handle: edge.handles.target_handle(),
                highlight: highlights.edge(index),
            })
            .collect();

        Scene {
            canvas_size: self.layout.canvas_size,
            selection: self.selection.clone(),
            repositories,
            nodes,
            edges,
        }
    }
}
