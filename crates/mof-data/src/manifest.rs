use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use mof_core::errors::{ErrorInfo, MofError};
use mof_core::provenance::{RunProvenance, SchemaVersion};
use serde::{Deserialize, Serialize};

use crate::config::DatasetConfig;
use crate::dataset::Gap;

/// Size and digest of one written artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactDigest {
    /// File name relative to the output directory.
    pub file: String,
    /// Lower-case hex SHA-256 of the file contents.
    pub sha256: String,
    /// File size in bytes.
    pub bytes: u64,
}

/// Record of a completed generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    /// Layout version of the sample records.
    pub schema_version: SchemaVersion,
    /// Seed, config hash, universe version and tool versions.
    pub provenance: RunProvenance,
    /// Effective configuration after CLI overrides.
    pub config: DatasetConfig,
    /// Samples requested.
    pub requested_samples: usize,
    /// Samples written.
    pub generated_samples: usize,
    /// Samples skipped, in index order.
    pub gaps: Vec<Gap>,
    /// Artifacts keyed by role (`dataset`, `features`, `summary`).
    pub artifacts: BTreeMap<String, ArtifactDigest>,
}

impl RunManifest {
    /// Writes the manifest to a JSON file.
    pub fn write(&self, path: &Path) -> Result<(), MofError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                MofError::Serde(
                    ErrorInfo::new("manifest-mkdir", err.to_string())
                        .with_context("path", parent.display().to_string()),
                )
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|err| {
            MofError::Serde(
                ErrorInfo::new("manifest-serialize", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        fs::write(path, json).map_err(|err| {
            MofError::Serde(
                ErrorInfo::new("manifest-write", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }

    /// Loads a manifest from disk.
    pub fn load(path: &Path) -> Result<Self, MofError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            MofError::Serde(
                ErrorInfo::new("manifest-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        serde_json::from_str(&contents).map_err(|err| {
            MofError::Serde(
                ErrorInfo::new("manifest-parse", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }
}
