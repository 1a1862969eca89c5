use depviz_core::{DependencyLink, GraphPayload, ProjectId, ProjectNode, RawLink};
use std::collections::{HashMap, HashSet};

/// A repository tag plus its non-aggregator projects, in payload order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryBucket {
    pub name: String,
    pub nodes: Vec<ProjectId>,
}

/// Normalized view of a graph payload.
///
/// Aggregator projects and every link touching them are removed here, so the
/// rest of the engine never sees them. Node records are never mutated after
/// construction; positions live in a separate map owned by the view.
#[derive(Debug, Default, Clone)]
pub struct GraphModel {
    nodes: Vec<ProjectNode>,
    node_map: HashMap<ProjectId, usize>,
    aggregator_ids: HashSet<ProjectId>,
    links: Vec<DependencyLink>,
    payload_links: Vec<DependencyLink>,
    repositories: Vec<RepositoryBucket>,
    repository_index: HashMap<ProjectId, usize>,
}

impl GraphModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_payload(payload: &GraphPayload) -> Self {
        Self::build(&payload.nodes, &payload.links)
    }

    pub fn build(raw_nodes: &[ProjectNode], raw_links: &[RawLink]) -> Self {
        let mut model = Self::new();
        let mut known_ids: HashSet<ProjectId> = HashSet::with_capacity(raw_nodes.len());

        for node in raw_nodes {
            if !known_ids.insert(node.id.clone()) {
                tracing::warn!("Ignoring duplicate project id {}", node.id);
                continue;
            }
            if node.is_aggregator() {
                model.aggregator_ids.insert(node.id.clone());
            } else {
                model.add_node(node.clone());
            }
        }

        model.payload_links = raw_links.iter().map(RawLink::normalize).collect();

        for link in Self::normalize_links(raw_links, &known_ids) {
            if model.aggregator_ids.contains(&link.source)
                || model.aggregator_ids.contains(&link.target)
            {
                continue;
            }
            model.links.push(link);
        }

        tracing::debug!(
            "Graph model: {} projects, {} aggregators, {} links, {} repositories",
            model.nodes.len(),
            model.aggregator_ids.len(),
            model.links.len(),
            model.repositories.len()
        );

        model
    }

    /// Normalize raw links to string ids, dropping links whose endpoints are
    /// not in `known_ids`.
    pub fn normalize_links(
        raw_links: &[RawLink],
        known_ids: &HashSet<ProjectId>,
    ) -> Vec<DependencyLink> {
        let mut links = Vec::with_capacity(raw_links.len());
        for raw in raw_links {
            let link = raw.normalize();
            if !known_ids.contains(&link.source) {
                tracing::warn!(
                    "Dropping link {} -> {} because source project is unknown",
                    link.source,
                    link.target
                );
                continue;
            }
            if !known_ids.contains(&link.target) {
                tracing::warn!(
                    "Dropping link {} -> {} because target project is unknown",
                    link.source,
                    link.target
                );
                continue;
            }
            links.push(link);
        }
        links
    }

    fn add_node(&mut self, node: ProjectNode) {
        let repository = node.repository_name();
        let bucket_idx = match self
            .repositories
            .iter()
            .position(|bucket| bucket.name == repository)
        {
            Some(idx) => idx,
            None => {
                self.repositories.push(RepositoryBucket {
                    name: repository.to_string(),
                    nodes: Vec::new(),
                });
                self.repositories.len() - 1
            }
        };

        self.repositories[bucket_idx].nodes.push(node.id.clone());
        self.repository_index.insert(node.id.clone(), bucket_idx);
        self.node_map.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
    }

    /// Non-aggregator projects in payload order.
    pub fn nodes(&self) -> &[ProjectNode] {
        &self.nodes
    }

    /// Links between non-aggregator projects, normalized and in payload order.
    pub fn links(&self) -> &[DependencyLink] {
        &self.links
    }

    /// Every payload link, normalized but unfiltered. Endpoints may be
    /// aggregators or unknown ids.
    pub fn payload_links(&self) -> &[DependencyLink] {
        &self.payload_links
    }

    pub fn aggregator_ids(&self) -> &HashSet<ProjectId> {
        &self.aggregator_ids
    }

    pub fn repositories(&self) -> &[RepositoryBucket] {
        &self.repositories
    }

    pub fn node(&self, id: &ProjectId) -> Option<&ProjectNode> {
        self.node_map.get(id).map(|&idx| &self.nodes[idx])
    }

    pub fn contains(&self, id: &ProjectId) -> bool {
        self.node_map.contains_key(id)
    }

    pub fn repository(&self, name: &str) -> Option<&RepositoryBucket> {
        self.repositories.iter().find(|bucket| bucket.name == name)
    }

    pub fn repository_of(&self, id: &ProjectId) -> Option<&RepositoryBucket> {
        self.repository_index
            .get(id)
            .map(|&idx| &self.repositories[idx])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
