pub mod collision;
pub mod edge_router;
pub mod events;
pub mod geometry;
pub mod graph;
pub mod highlight;
pub mod layout;
pub mod level;
pub mod reachability;
pub mod scene;
pub mod view;

pub use collision::CollisionResolver;
pub use edge_router::{AnchorSide, EdgeHandles, EdgeRouter, RoutedEdge};
pub use events::GraphEvent;
pub use geometry::{Rect, Vec2};
pub use graph::{GraphModel, RepositoryBucket};
pub use highlight::{Highlight, HighlightEngine, HighlightState, Selection};
pub use layout::{
    GraphLayout, LayoutConfig, Layouter, PositionMap, RepositoryLayout, RepositoryPacker,
};
pub use level::{LevelAssigner, LevelMap};
pub use reachability::{DependencyIndex, ReachableSet, transitive_dependencies};
pub use scene::{Scene, SceneEdge, SceneNode, SceneRepository};
pub use view::{GraphView, RepositorySummary};
