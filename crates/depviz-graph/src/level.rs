use crate::graph::GraphModel;
use depviz_core::{DependencyLink, ProjectId, ProjectNode};
use std::collections::{HashMap, VecDeque};

/// Node id -> dependency depth, top to bottom.
pub type LevelMap = HashMap<ProjectId, u32>;

/// Topological leveling over the non-aggregator projects.
///
/// Kahn's algorithm: roots start at level 0 and a successor takes the level of
/// the node whose processing drops its in-degree to zero, plus one. Projects
/// that are never dequeued (cycle members and everything below a cycle) stay
/// at level 0 so cyclic graphs are flattened instead of rejected.
pub struct LevelAssigner;

impl LevelAssigner {
    pub fn assign(model: &GraphModel) -> LevelMap {
        Self::assign_nodes(model.nodes(), model.links())
    }

    pub fn assign_nodes(nodes: &[ProjectNode], links: &[DependencyLink]) -> LevelMap {
        let index: HashMap<&ProjectId, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (&node.id, i))
            .collect();

        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        let mut in_degree = vec![0usize; nodes.len()];

        for link in links {
            if let (Some(&source), Some(&target)) =
                (index.get(&link.source), index.get(&link.target))
            {
                adjacency[source].push(target);
                in_degree[target] += 1;
            }
        }

        let mut levels: Vec<Option<u32>> = vec![None; nodes.len()];
        let mut queue: VecDeque<usize> = VecDeque::new();
        for (i, degree) in in_degree.iter().enumerate() {
            if *degree == 0 {
                levels[i] = Some(0);
                queue.push_back(i);
            }
        }

        while let Some(current) = queue.pop_front() {
            let level = levels[current].unwrap_or(0);
            for &next in &adjacency[current] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    levels[next] = Some(level + 1);
                    queue.push_back(next);
                }
            }
        }

        let unresolved = levels.iter().filter(|level| level.is_none()).count();
        if unresolved > 0 {
            tracing::debug!(
                "{} projects sit on or below a dependency cycle; placing them at level 0",
                unresolved
            );
        }

        nodes
            .iter()
            .zip(levels)
            .map(|(node, level)| (node.id.clone(), level.unwrap_or(0)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depviz_core::RawLink;
    use proptest::prelude::*;

    fn model(ids: &[&str], edges: &[(&str, &str)]) -> GraphModel {
        let nodes: Vec<ProjectNode> = ids
            .iter()
            .map(|id| ProjectNode::new(*id, *id).with_repository("repo"))
            .collect();
        let links: Vec<RawLink> = edges.iter().map(|(s, t)| RawLink::new(*s, *t)).collect();
        GraphModel::build(&nodes, &links)
    }

    fn level(levels: &LevelMap, id: &str) -> u32 {
        levels[&ProjectId::from(id)]
    }

    #[test]
    fn test_linear_chain_levels() {
        let levels = LevelAssigner::assign(&model(&["A", "B", "C"], &[("A", "B"), ("B", "C")]));

        assert_eq!(level(&levels, "A"), 0);
        assert_eq!(level(&levels, "B"), 1);
        assert_eq!(level(&levels, "C"), 2);
    }

    #[test]
    fn test_two_cycle_flattens_to_level_zero() {
        let levels = LevelAssigner::assign(&model(&["A", "B"], &[("A", "B"), ("B", "A")]));

        assert_eq!(levels.len(), 2);
        assert_eq!(level(&levels, "A"), 0);
        assert_eq!(level(&levels, "B"), 0);
    }

    #[test]
    fn test_nodes_below_cycle_default_to_zero() {
        let levels = LevelAssigner::assign(&model(
            &["root", "A", "B", "C"],
            &[("root", "A"), ("A", "B"), ("B", "A"), ("B", "C")],
        ));

        assert_eq!(level(&levels, "root"), 0);
        assert_eq!(level(&levels, "A"), 0);
        assert_eq!(level(&levels, "B"), 0);
        assert_eq!(level(&levels, "C"), 0);
    }

    #[test]
    fn test_self_loop_does_not_hang() {
        let levels = LevelAssigner::assign(&model(&["A", "B"], &[("A", "A"), ("A", "B")]));

        assert_eq!(level(&levels, "A"), 0);
        assert_eq!(level(&levels, "B"), 0);
    }

    #[test]
    fn test_diamond_takes_level_from_last_predecessor() {
        let levels = LevelAssigner::assign(&model(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("A", "C"), ("C", "D"), ("B", "C")],
        ));

        assert_eq!(level(&levels, "A"), 0);
        assert_eq!(level(&levels, "B"), 1);
        assert_eq!(level(&levels, "C"), 2);
        assert_eq!(level(&levels, "D"), 3);
    }

    #[test]
    fn test_parallel_links_count_towards_in_degree() {
        let levels = LevelAssigner::assign(&model(&["A", "B"], &[("A", "B"), ("A", "B")]));

        assert_eq!(level(&levels, "B"), 1);
    }

    fn dag_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
        (1usize..24).prop_flat_map(|n| {
            let edges = proptest::collection::vec((0..n, 0..n), 0..(n * 3));
            (Just(n), edges)
        })
    }

    fn build_indexed(n: usize, edges: &[(usize, usize)]) -> (Vec<ProjectNode>, Vec<DependencyLink>) {
        let nodes = (0..n)
            .map(|i| ProjectNode::new(format!("n{i}"), format!("n{i}")))
            .collect();
        let links = edges
            .iter()
            .map(|(s, t)| DependencyLink::new(format!("n{s}"), format!("n{t}")))
            .collect();
        (nodes, links)
    }

    proptest! {
        #[test]
        fn prop_every_node_gets_exactly_one_level((n, edges) in dag_strategy()) {
            let (nodes, links) = build_indexed(n, &edges);
            let levels = LevelAssigner::assign_nodes(&nodes, &links);

            prop_assert_eq!(levels.len(), n);
            for node in &nodes {
                prop_assert!(levels.contains_key(&node.id));
            }
        }

        #[test]
        fn prop_acyclic_levels_increase_along_links((n, edges) in dag_strategy()) {
            // Orient every edge from lower to higher index so the graph is acyclic.
            let acyclic: Vec<(usize, usize)> = edges
                .into_iter()
                .filter(|(s, t)| s != t)
                .map(|(s, t)| (s.min(t), s.max(t)))
                .collect();
            let (nodes, links) = build_indexed(n, &acyclic);
            let levels = LevelAssigner::assign_nodes(&nodes, &links);

            for link in &links {
                prop_assert!(levels[&link.target] > levels[&link.source]);
            }
        }
    }
}
