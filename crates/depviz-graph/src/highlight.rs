use crate::graph::GraphModel;
use crate::reachability::{DependencyIndex, ReachableSet};
use depviz_core::ProjectId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// What the user currently has selected. At most one of a project or a
/// repository is selected at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum Selection {
    #[default]
    None,
    Node(ProjectId),
    Repository(String),
}

impl Selection {
    /// Selects `id`, or clears the selection when `id` is already selected.
    /// Any repository selection is replaced.
    pub fn select_node(&mut self, id: ProjectId) {
        *self = match self {
            Selection::Node(current) if *current == id => Selection::None,
            _ => Selection::Node(id),
        };
    }

    /// Selects `name`, or clears the selection when it is already selected.
    /// Any node selection is replaced.
    pub fn select_repository(&mut self, name: impl Into<String>) {
        let name = name.into();
        *self = match self {
            Selection::Repository(current) if *current == name => Selection::None,
            _ => Selection::Repository(name),
        };
    }

    pub fn clear(&mut self) {
        *self = Selection::None;
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }

    pub fn selected_node(&self) -> Option<&ProjectId> {
        match self {
            Selection::Node(id) => Some(id),
            _ => None,
        }
    }

    pub fn selected_repository(&self) -> Option<&str> {
        match self {
            Selection::Repository(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

/// Render flags for one node, edge or repository box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub hidden: bool,
    pub dimmed: bool,
    pub emphasized: bool,
    pub selected: bool,
}

impl Highlight {
    fn hidden() -> Self {
        Self {
            hidden: true,
            ..Default::default()
        }
    }

    fn dimmed() -> Self {
        Self {
            dimmed: true,
            ..Default::default()
        }
    }

    fn emphasized() -> Self {
        Self {
            emphasized: true,
            ..Default::default()
        }
    }
}

/// Flags for every element under one selection. Elements not listed render
/// with default flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighlightState {
    nodes: HashMap<ProjectId, Highlight>,
    /// Indexed like `GraphModel::links()`
    edges: Vec<Highlight>,
    repositories: HashMap<String, Highlight>,
}

impl HighlightState {
    pub fn node(&self, id: &ProjectId) -> Highlight {
        self.nodes.get(id).copied().unwrap_or_default()
    }

    pub fn edge(&self, index: usize) -> Highlight {
        self.edges.get(index).copied().unwrap_or_default()
    }

    pub fn repository(&self, name: &str) -> Highlight {
        self.repositories.get(name).copied().unwrap_or_default()
    }

    pub fn hidden_node_count(&self) -> usize {
        self.nodes.values().filter(|h| h.hidden).count()
    }
}

/// Derives render flags from the selection, memoizing the reachable set of
/// the last selected project.
#[derive(Debug, Clone, Default)]
pub struct HighlightEngine {
    index: DependencyIndex,
    cached: Option<ReachableSet>,
}

impl HighlightEngine {
    pub fn new(model: &GraphModel) -> Self {
        Self {
            index: DependencyIndex::new(model.links()),
            cached: None,
        }
    }

    pub fn reachable(&mut self, root: &ProjectId) -> &ReachableSet {
        let fresh = match self.cached.take() {
            Some(reach) if &reach.root == root => reach,
            _ => self.index.transitive_dependencies(root),
        };
        self.cached.insert(fresh)
    }

    pub fn compute(&mut self, model: &GraphModel, selection: &Selection) -> HighlightState {
        match selection {
            Selection::None => HighlightState::default(),
            Selection::Node(id) => {
                let reach = self.reachable(id);
                node_selection(model, id, reach)
            }
            Selection::Repository(name) => repository_selection(model, name),
        }
    }
}

fn node_selection(model: &GraphModel, selected: &ProjectId, reach: &ReachableSet) -> HighlightState {
    let mut state = HighlightState::default();

    for node in model.nodes() {
        let highlight = if node.id == *selected {
            Highlight {
                selected: true,
                ..Default::default()
            }
        } else if reach.contains(&node.id) {
            Highlight::default()
        } else {
            Highlight::hidden()
        };
        state.nodes.insert(node.id.clone(), highlight);
    }

    for bucket in model.repositories() {
        if !bucket.nodes.iter().any(|id| reach.contains(id)) {
            state.repositories.insert(bucket.name.clone(), Highlight::dimmed());
        }
    }

    state.edges = model
        .links()
        .iter()
        .map(|link| {
            if !reach.contains(&link.source) || !reach.contains(&link.target) {
                Highlight::hidden()
            } else if link.touches(selected) {
                Highlight::emphasized()
            } else {
                Highlight::default()
            }
        })
        .collect();

    state
}

fn repository_selection(model: &GraphModel, name: &str) -> HighlightState {
    let mut state = HighlightState::default();
    let members: HashSet<&ProjectId> = model
        .repository(name)
        .map(|bucket| bucket.nodes.iter().collect())
        .unwrap_or_default();

    for node in model.nodes() {
        let highlight = if members.contains(&node.id) {
            Highlight::emphasized()
        } else {
            Highlight::dimmed()
        };
        state.nodes.insert(node.id.clone(), highlight);
    }

    state.repositories.insert(
        name.to_string(),
        Highlight {
            selected: true,
            ..Default::default()
        },
    );

    state.edges = model
        .links()
        .iter()
        .map(|link| {
            if members.contains(&link.source) || members.contains(&link.target) {
                Highlight::emphasized()
            } else {
                Highlight::dimmed()
            }
        })
        .collect();

    state
}
