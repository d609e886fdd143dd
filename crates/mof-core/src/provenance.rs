//! Schema and provenance descriptors written next to generated datasets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Semantic version of the serialized sample layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Bumped when existing fields change meaning or disappear.
    pub major: u32,
    /// Bumped when fields are added.
    pub minor: u32,
    /// Bumped for fixes that keep the layout intact.
    pub patch: u32,
}

impl SchemaVersion {
    /// Creates a new schema version descriptor.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Version of the sample layout produced by this release.
    pub const fn current() -> Self {
        Self::new(1, 1, 0)
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::current()
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Provenance record tying a generated dataset to its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RunProvenance {
    /// Master seed from which every per-sample substream was derived.
    pub seed: u64,
    /// Hash of the effective dataset configuration.
    pub config_hash: String,
    /// Version tag of the ordered category universe used for sampling and encoding.
    pub universe_version: String,
    /// ISO-8601 timestamp recording when the artifacts were written.
    pub created_at: String,
    /// Version map for the crates involved in the run.
    pub tool_versions: BTreeMap<String, String>,
}
