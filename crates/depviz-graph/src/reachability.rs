use depviz_core::{DependencyLink, ProjectId};
use std::collections::{HashMap, HashSet, VecDeque};

/// Everything a root project depends on, directly or transitively. The root
/// itself is always a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReachableSet {
    pub root: ProjectId,
    pub nodes: HashSet<ProjectId>,
}

impl ReachableSet {
    pub fn contains(&self, id: &ProjectId) -> bool {
        self.nodes.contains(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Outgoing adjacency (dependent -> dependency) built once per graph.
#[derive(Debug, Clone, Default)]
pub struct DependencyIndex {
    outgoing: HashMap<ProjectId, Vec<ProjectId>>,
}

impl DependencyIndex {
    pub fn new(links: &[DependencyLink]) -> Self {
        let mut outgoing: HashMap<ProjectId, Vec<ProjectId>> = HashMap::new();
        for link in links {
            outgoing
                .entry(link.source.clone())
                .or_default()
                .push(link.target.clone());
        }
        Self { outgoing }
    }

    pub fn dependencies_of(&self, id: &ProjectId) -> &[ProjectId] {
        self.outgoing.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Breadth-first walk along source -> target. Cycles terminate through the
    /// visited set.
    pub fn transitive_dependencies(&self, root: &ProjectId) -> ReachableSet {
        let mut visited: HashSet<ProjectId> = HashSet::new();
        let mut queue: VecDeque<&ProjectId> = VecDeque::new();

        visited.insert(root.clone());
        queue.push_back(root);

        while let Some(current) = queue.pop_front() {
            for next in self.dependencies_of(current) {
                if visited.insert(next.clone()) {
                    queue.push_back(next);
                }
            }
        }

        ReachableSet {
            root: root.clone(),
            nodes: visited,
        }
    }
}

/// One-shot variant for callers that do not keep a [`DependencyIndex`].
pub fn transitive_dependencies(root: &ProjectId, links: &[DependencyLink]) -> HashSet<ProjectId> {
    DependencyIndex::new(links).transitive_dependencies(root).nodes
}
