use serde::{Deserialize, Serialize};
use std::fmt;

pub mod error;
pub mod issues;

pub use error::PayloadError;
pub use issues::{IssuesReport, IssuesSummary};

/// Repository bucket used for nodes that arrive without a `nodeGroup` tag.
pub const DEFAULT_REPOSITORY: &str = "default";

/// Globally unique project identity (group + artifact + version composite).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ProjectId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Build output kind of a project.
///
/// Wire values follow the build tool vocabulary: `jar`, `pom`, `war`. Any other
/// value is read as a library, since it still produces an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Packaging {
    #[default]
    Library,
    /// Groups other modules and produces no build output.
    Aggregator,
    WebArchive,
}

impl Packaging {
    pub fn as_str(&self) -> &'static str {
        match self {
            Packaging::Library => "jar",
            Packaging::Aggregator => "pom",
            Packaging::WebArchive => "war",
        }
    }

    pub fn is_aggregator(&self) -> bool {
        matches!(self, Packaging::Aggregator)
    }
}

impl From<String> for Packaging {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pom" => Packaging::Aggregator,
            "war" => Packaging::WebArchive,
            _ => Packaging::Library,
        }
    }
}

impl From<Packaging> for String {
    fn from(value: Packaging) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildTool {
    Maven,
    Gradle,
}

/// A single build unit as delivered by the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectNode {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub group: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub build_tool: Option<BuildTool>,
    #[serde(default)]
    pub packaging: Packaging,
    #[serde(default, rename = "nodeGroup", skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
}

impl ProjectNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ProjectId::new(id),
            name: name.into(),
            version: String::new(),
            group: String::new(),
            build_tool: None,
            packaging: Packaging::Library,
            repository: None,
        }
    }

    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = Some(repository.into());
        self
    }

    pub fn with_packaging(mut self, packaging: Packaging) -> Self {
        self.packaging = packaging;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Repository bucket this node belongs to. Missing or blank tags fall into
    /// [`DEFAULT_REPOSITORY`].
    pub fn repository_name(&self) -> &str {
        match self.repository.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => DEFAULT_REPOSITORY,
        }
    }

    pub fn is_aggregator(&self) -> bool {
        self.packaging.is_aggregator()
    }
}

/// One end of a raw link. Loaders may emit the bare id (string or integer) or
/// the whole node object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkEndpoint {
    Id(String),
    Index(i64),
    Embedded { id: ProjectId },
}

impl LinkEndpoint {
    pub fn to_project_id(&self) -> ProjectId {
        match self {
            LinkEndpoint::Id(id) => ProjectId(id.clone()),
            LinkEndpoint::Index(index) => ProjectId(index.to_string()),
            LinkEndpoint::Embedded { id } => id.clone(),
        }
    }
}

impl From<&str> for LinkEndpoint {
    fn from(value: &str) -> Self {
        LinkEndpoint::Id(value.to_string())
    }
}

impl From<String> for LinkEndpoint {
    fn from(value: String) -> Self {
        LinkEndpoint::Id(value)
    }
}

/// A dependency link exactly as it appears in the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLink {
    pub source: LinkEndpoint,
    pub target: LinkEndpoint,
    #[serde(default = "default_link_value")]
    pub value: u32,
}

fn default_link_value() -> u32 {
    1
}

impl RawLink {
    pub fn new(source: impl Into<LinkEndpoint>, target: impl Into<LinkEndpoint>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            value: default_link_value(),
        }
    }

    pub fn normalize(&self) -> DependencyLink {
        DependencyLink {
            source: self.source.to_project_id(),
            target: self.target.to_project_id(),
        }
    }
}

/// Normalized link: `source` depends on `target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyLink {
    pub source: ProjectId,
    pub target: ProjectId,
}

impl DependencyLink {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: ProjectId::new(source),
            target: ProjectId::new(target),
        }
    }

    pub fn touches(&self, id: &ProjectId) -> bool {
        &self.source == id || &self.target == id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub total_projects: usize,
    pub total_dependencies: usize,
}

/// Graph payload produced by the data-loading layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphPayload {
    #[serde(default)]
    pub nodes: Vec<ProjectNode>,
    #[serde(default)]
    pub links: Vec<RawLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<GraphStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issues: Option<IssuesReport>,
}

impl GraphPayload {
    pub fn new(nodes: Vec<ProjectNode>, links: Vec<RawLink>) -> Self {
        Self {
            nodes,
            links,
            ..Default::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader(reader: impl std::io::Read) -> Result<Self, PayloadError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, PayloadError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| PayloadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(std::io::BufReader::new(file))
    }
}
