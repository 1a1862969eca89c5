use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Project issues found by the analyzer. Carried alongside the graph payload
/// for the issues panel; the layout engine does not read it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IssuesReport {
    /// Each cycle lists GAVs in traversal order and repeats the first one at the end.
    pub circular_references: Vec<Vec<String>>,
    pub unreferenced_projects: Vec<String>,
    /// artifactId -> project ids sharing it
    pub duplicate_artifact_ids: BTreeMap<String, Vec<String>>,
    /// GAV -> project ids sharing it
    #[serde(rename = "duplicateGAVs")]
    pub duplicate_gavs: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuesSummary {
    pub circular_references: usize,
    pub unreferenced_projects: usize,
    pub duplicate_artifact_ids: usize,
    pub duplicate_gavs: usize,
}

impl IssuesSummary {
    pub fn total(&self) -> usize {
        self.circular_references
            + self.unreferenced_projects
            + self.duplicate_artifact_ids
            + self.duplicate_gavs
    }
}

impl IssuesReport {
    pub fn summary(&self) -> IssuesSummary {
        IssuesSummary {
            circular_references: self.circular_references.len(),
            unreferenced_projects: self.unreferenced_projects.len(),
            duplicate_artifact_ids: self.duplicate_artifact_ids.len(),
            duplicate_gavs: self.duplicate_gavs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.summary().total() == 0
    }
}
