//! On-disk dataset bundle.
//!
//! Dataset JSON follows a versioned schema (`stitchgrid.dataset.v1`)
//! bundling the view groups, the missing-view set, per-view registrations,
//! and pairwise links. The bundle splits into the summary engine's inputs
//! via [`StitchingDataset::into_parts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::links::{LinkIndex, PairwiseLink};
use crate::registration::{MissingViews, ViewRegistrations};
use crate::transform::RowPackedAffine;
use crate::view::ViewId;

const DATASET_SCHEMA_V1: &str = "stitchgrid.dataset.v1";

/// One view's registration entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RegistrationEntry {
    pub view: ViewId,
    pub transform: RowPackedAffine,
}

/// A complete stitching dataset snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StitchingDataset {
    schema: String,
    pub name: String,
    /// View groups, one per display row.
    pub groups: Vec<Vec<ViewId>>,
    /// Views declared absent from the dataset.
    #[serde(default)]
    pub missing: Vec<ViewId>,
    /// Current registration of each acquired view.
    pub registrations: Vec<RegistrationEntry>,
    /// Pairwise links computed by the stitching run, if any.
    #[serde(default)]
    pub links: Vec<PairwiseLink>,
}

/// The dataset split into the summary engine's inputs.
#[derive(Debug, Clone)]
pub struct DatasetParts {
    pub groups: Vec<Vec<ViewId>>,
    pub missing: MissingViews,
    pub registrations: ViewRegistrations,
    pub links: LinkIndex,
}

impl StitchingDataset {
    pub fn new(
        name: impl Into<String>,
        groups: Vec<Vec<ViewId>>,
        missing: Vec<ViewId>,
        registrations: Vec<RegistrationEntry>,
        links: Vec<PairwiseLink>,
    ) -> Self {
        Self {
            schema: DATASET_SCHEMA_V1.to_string(),
            name: name.into(),
            groups,
            missing,
            registrations,
            links,
        }
    }

    /// Load and validate a dataset from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        let dataset: Self = serde_json::from_str(&data)?;
        dataset.validate()?;
        tracing::info!(
            "loaded dataset '{}': {} groups, {} registrations, {} links",
            dataset.name,
            dataset.groups.len(),
            dataset.registrations.len(),
            dataset.links.len()
        );
        Ok(dataset)
    }

    fn validate(&self) -> Result<(), String> {
        if self.schema != DATASET_SCHEMA_V1 {
            return Err(format!(
                "unsupported dataset schema '{}' (expected '{}')",
                self.schema, DATASET_SCHEMA_V1
            ));
        }

        if self.name.trim().is_empty() {
            return Err("dataset name must not be empty".to_string());
        }

        for (i, group) in self.groups.iter().enumerate() {
            if group.is_empty() {
                return Err(format!("group {i} holds no views"));
            }
        }

        for entry in &self.registrations {
            if !entry.transform.0.iter().all(|c| c.is_finite()) {
                return Err(format!("non-finite registration for {}", entry.view));
            }
        }

        for link in &self.links {
            if link.pair.0 == link.pair.1 {
                return Err(format!("link joins {} with itself", link.pair.0));
            }
            if !link.correlation.is_finite() {
                return Err("link correlation must be finite".to_string());
            }
            if !link.error.is_finite() || link.error < 0.0 {
                return Err(format!(
                    "link error must be finite and >= 0, got {}",
                    link.error
                ));
            }
        }

        Ok(())
    }

    /// Split into the summary engine's inputs.
    pub fn into_parts(self) -> DatasetParts {
        let Self {
            groups,
            missing,
            registrations,
            links,
            ..
        } = self;
        DatasetParts {
            groups,
            missing: missing.into_iter().collect(),
            registrations: registrations
                .into_iter()
                .map(|e| (e.view, e.transform))
                .collect(),
            links: links.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::TransformSource;

    fn minimal(schema: &str) -> String {
        format!(
            r#"{{
                "schema": "{schema}",
                "name": "two tiles",
                "groups": [[{{"timepoint": 0, "setup": 0}}], [{{"timepoint": 0, "setup": 1}}]],
                "registrations": [
                    {{"view": {{"timepoint": 0, "setup": 0}},
                      "transform": [1.0,0.0,0.0,0.0, 0.0,1.0,0.0,0.0, 0.0,0.0,1.0,0.0]}},
                    {{"view": {{"timepoint": 0, "setup": 1}},
                      "transform": [1.0,0.0,0.0,80.0, 0.0,1.0,0.0,0.0, 0.0,0.0,1.0,0.0]}}
                ]
            }}"#
        )
    }

    #[test]
    fn parses_and_validates_v1_datasets() {
        let dataset: StitchingDataset =
            serde_json::from_str(&minimal("stitchgrid.dataset.v1")).expect("valid json");
        dataset.validate().expect("valid dataset");
        assert_eq!(dataset.groups.len(), 2);
        assert!(dataset.missing.is_empty());
        assert!(dataset.links.is_empty());
    }

    #[test]
    fn rejects_other_schemas() {
        let dataset: StitchingDataset =
            serde_json::from_str(&minimal("stitchgrid.dataset.v0")).expect("valid json");
        let err = dataset.validate().expect_err("schema mismatch");
        assert!(err.contains("unsupported dataset schema"));
    }

    #[test]
    fn rejects_unknown_fields() {
        let raw = minimal("stitchgrid.dataset.v1").replace(
            "\"name\": \"two tiles\",",
            "\"name\": \"two tiles\", \"extra\": 1,",
        );
        let parsed: Result<StitchingDataset, _> = serde_json::from_str(&raw);
        assert!(parsed.is_err());
    }

    #[test]
    fn rejects_empty_groups() {
        let mut dataset: StitchingDataset =
            serde_json::from_str(&minimal("stitchgrid.dataset.v1")).expect("valid json");
        dataset.groups.push(Vec::new());
        let err = dataset.validate().expect_err("empty group");
        assert!(err.contains("holds no views"));
    }

    #[test]
    fn rejects_degenerate_links() {
        let mut dataset: StitchingDataset =
            serde_json::from_str(&minimal("stitchgrid.dataset.v1")).expect("valid json");
        let v = ViewId::new(0, 0);
        dataset.links.push(PairwiseLink {
            pair: (v, v),
            correlation: 0.9,
            error: 0.1,
        });
        let err = dataset.validate().expect_err("self link");
        assert!(err.contains("with itself"));

        dataset.links[0] = PairwiseLink {
            pair: (v, ViewId::new(0, 1)),
            correlation: 0.9,
            error: -0.1,
        };
        let err = dataset.validate().expect_err("negative error");
        assert!(err.contains(">= 0"));
    }

    #[test]
    fn into_parts_wires_all_inputs() {
        let mut dataset: StitchingDataset =
            serde_json::from_str(&minimal("stitchgrid.dataset.v1")).expect("valid json");
        dataset.missing.push(ViewId::new(0, 2));
        dataset.links.push(PairwiseLink {
            pair: (ViewId::new(0, 0), ViewId::new(0, 1)),
            correlation: 0.8,
            error: 0.2,
        });

        let parts = dataset.into_parts();
        assert_eq!(parts.groups.len(), 2);
        assert!(parts.missing.contains(ViewId::new(0, 2)));
        assert_eq!(parts.links.len(), 1);
        assert_eq!(
            parts
                .registrations
                .transform(ViewId::new(0, 1))
                .expect("registered")
                .translation(),
            [80.0, 0.0, 0.0]
        );
    }
}
