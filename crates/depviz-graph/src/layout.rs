use crate::geometry::{Rect, Vec2};
use crate::graph::{GraphModel, RepositoryBucket};
use crate::level::{LevelAssigner, LevelMap};
use depviz_core::ProjectId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Node id -> absolute top-left corner on the canvas.
pub type PositionMap = HashMap<ProjectId, Vec2>;

/// Fixed metrics used by the layout and by drag collision checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub node_width: f32,
    pub node_height: f32,
    /// Gap between nodes on the same level
    pub horizontal_spacing: f32,
    /// Gap between consecutive levels
    pub vertical_spacing: f32,
    /// Padding between the repository border and its content
    pub padding: f32,
    /// Band reserved under the top padding for the repository title
    pub title_height: f32,
    /// Gap between packed repositories, both within and between rows
    pub repository_gap: f32,
    /// Rows wrap once the next repository would cross this width
    pub max_canvas_width: f32,
    /// Average rendered width of one title character
    pub glyph_width: f32,
    pub title_factor: f32,
    /// Minimum gap kept between siblings while dragging
    pub drag_margin: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 150.0,
            node_height: 80.0,
            horizontal_spacing: 40.0,
            vertical_spacing: 60.0,
            padding: 30.0,
            title_height: 30.0,
            repository_gap: 50.0,
            max_canvas_width: 1800.0,
            glyph_width: 18.0 * 0.7,
            title_factor: 1.1,
            drag_margin: 5.0,
        }
    }
}

impl LayoutConfig {
    pub fn node_size(&self) -> Vec2 {
        Vec2::new(self.node_width, self.node_height)
    }

    /// Approximate title width; no text shaping involved.
    pub fn estimated_title_width(&self, name: &str) -> f32 {
        name.chars().count() as f32 * self.glyph_width * self.title_factor
    }

    fn row_width(&self, count: usize) -> f32 {
        if count == 0 {
            return 0.0;
        }
        count as f32 * self.node_width + (count - 1) as f32 * self.horizontal_spacing
    }
}

/// A packed repository box and the placement of its projects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryLayout {
    pub name: String,
    /// Absolute bounding box on the canvas
    pub bounds: Rect,
    /// Number of level rows, including empty ones below the top row
    pub level_count: u32,
    /// Inbound plus outbound links touching the repository's projects
    pub incident_edges: usize,
    /// Positions relative to the box's top-left corner, in bucket order
    pub node_offsets: Vec<(ProjectId, Vec2)>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphLayout {
    pub levels: LevelMap,
    pub positions: PositionMap,
    /// Repositories in packing order
    pub repositories: Vec<RepositoryLayout>,
    /// Extent of all packed repositories
    pub canvas_size: Vec2,
}

impl GraphLayout {
    pub fn position(&self, id: &ProjectId) -> Option<Vec2> {
        self.positions.get(id).copied()
    }

    pub fn repository(&self, name: &str) -> Option<&RepositoryLayout> {
        self.repositories.iter().find(|repo| repo.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}

pub trait Layouter {
    fn execute(&self, model: &GraphModel) -> GraphLayout;
}

struct MeasuredRepository {
    size: Vec2,
    level_count: u32,
    node_offsets: Vec<(ProjectId, Vec2)>,
}

/// Leveled per-repository layout followed by first-fit shelf packing.
///
/// Repositories with more incident links are placed first. Packing only bounds
/// the row width; it does not try to minimize the total area.
#[derive(Debug, Clone, Default)]
pub struct RepositoryPacker {
    pub config: LayoutConfig,
}

impl RepositoryPacker {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    fn measure_repository(&self, bucket: &RepositoryBucket, levels: &LevelMap) -> MeasuredRepository {
        let config = &self.config;

        let mut rows: BTreeMap<u32, Vec<&ProjectId>> = BTreeMap::new();
        for id in &bucket.nodes {
            let level = levels.get(id).copied().unwrap_or(0);
            rows.entry(level).or_default().push(id);
        }

        let max_level = rows.keys().next_back().copied().unwrap_or(0);
        let content_width = rows
            .values()
            .map(|row| config.row_width(row.len()))
            .fold(0.0f32, f32::max);

        let mut node_offsets = Vec::with_capacity(bucket.nodes.len());
        for (&level, row) in &rows {
            let start_x = config.padding + (content_width - config.row_width(row.len())) / 2.0;
            let y = config.padding
                + config.title_height
                + level as f32 * (config.node_height + config.vertical_spacing);
            for (i, &id) in row.iter().enumerate() {
                let x = start_x + i as f32 * (config.node_width + config.horizontal_spacing);
                node_offsets.push((id.clone(), Vec2::new(x, y)));
            }
        }

        let level_count = max_level + 1;
        let width = content_width.max(config.estimated_title_width(&bucket.name))
            + 2.0 * config.padding;
        let height = 2.0 * config.padding
            + config.title_height
            + level_count as f32 * config.node_height
            + max_level as f32 * config.vertical_spacing;

        MeasuredRepository {
            size: Vec2::new(width, height),
            level_count,
            node_offsets,
        }
    }

    /// Incident link count per repository, indexed like `model.repositories()`.
    /// Every payload link counts toward the repository of each endpoint that
    /// is a laid-out project, including links whose other end is an aggregator
    /// or unknown. A link inside one repository counts once for each endpoint.
    fn incident_edge_counts(model: &GraphModel) -> Vec<usize> {
        let index: HashMap<&str, usize> = model
            .repositories()
            .iter()
            .enumerate()
            .map(|(i, bucket)| (bucket.name.as_str(), i))
            .collect();
        let repo_of = |id: &ProjectId| {
            model
                .repository_of(id)
                .and_then(|bucket| index.get(bucket.name.as_str()).copied())
        };

        let mut counts = vec![0usize; model.repositories().len()];
        for link in model.payload_links() {
            if let Some(repo) = repo_of(&link.source) {
                counts[repo] += 1;
            }
            if link.source != link.target
                && let Some(repo) = repo_of(&link.target)
            {
                counts[repo] += 1;
            }
        }
        counts
    }

    /// Shelf packing: returns the top-left offset for each size, in input order.
    fn pack(&self, sizes: &[Vec2], order: &[usize]) -> Vec<Vec2> {
        let config = &self.config;
        let mut offsets = vec![Vec2::default(); sizes.len()];

        let mut current_x = 0.0f32;
        let mut current_y = 0.0f32;
        let mut row_height = 0.0f32;

        for &idx in order {
            let size = sizes[idx];
            if current_x > 0.0 && current_x + size.x > config.max_canvas_width {
                current_x = 0.0;
                current_y += row_height + config.repository_gap;
                row_height = 0.0;
            }
            row_height = row_height.max(size.y);
            offsets[idx] = Vec2::new(current_x, current_y);
            current_x += size.x + config.repository_gap;
        }

        offsets
    }
}

impl Layouter for RepositoryPacker {
    fn execute(&self, model: &GraphModel) -> GraphLayout {
        let levels = LevelAssigner::assign(model);
        if model.is_empty() {
            return GraphLayout {
                levels,
                ..Default::default()
            };
        }

        let measured: Vec<MeasuredRepository> = model
            .repositories()
            .iter()
            .map(|bucket| self.measure_repository(bucket, &levels))
            .collect();
        let counts = Self::incident_edge_counts(model);

        let mut order: Vec<usize> = (0..measured.len()).collect();
        // Stable sort keeps payload order between equally connected repositories.
        order.sort_by(|a, b| counts[*b].cmp(&counts[*a]));

        let sizes: Vec<Vec2> = measured.iter().map(|m| m.size).collect();
        let offsets = self.pack(&sizes, &order);

        let mut positions = PositionMap::with_capacity(model.node_count());
        let mut repositories = Vec::with_capacity(measured.len());
        let mut canvas_size = Vec2::default();

        let mut measured: Vec<Option<MeasuredRepository>> = measured.into_iter().map(Some).collect();
        for idx in order {
            let Some(repo) = measured[idx].take() else {
                continue;
            };
            let offset = offsets[idx];
            for (id, relative) in &repo.node_offsets {
                positions.insert(id.clone(), offset + *relative);
            }

            let bounds = Rect::from_pos_size(offset, repo.size);
            canvas_size.x = canvas_size.x.max(bounds.max.x);
            canvas_size.y = canvas_size.y.max(bounds.max.y);

            repositories.push(RepositoryLayout {
                name: model.repositories()[idx].name.clone(),
                bounds,
                level_count: repo.level_count,
                incident_edges: counts[idx],
                node_offsets: repo.node_offsets,
            });
        }

        tracing::debug!(
            "Packed {} repositories into {}x{} canvas",
            repositories.len(),
            canvas_size.x,
            canvas_size.y
        );

        GraphLayout {
            levels,
            positions,
            repositories,
            canvas_size,
        }
    }
}
