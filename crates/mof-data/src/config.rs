use std::fs;
use std::path::Path;

use mof_core::errors::{ErrorInfo, MofError};
use mof_curves::GeneratorSpecs;
use mof_props::{PropertyTables, TableExtensions};
use serde::{Deserialize, Serialize};

use crate::serde::from_yaml_slice;

/// What the builder does when a single sample fails to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop at the first failing sample in index order.
    #[default]
    Abort,
    /// Drop failing samples and record them as gaps.
    Skip,
}

/// YAML-configurable parameters governing a dataset run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Number of samples to draw.
    #[serde(default = "default_samples")]
    pub samples: usize,
    /// Master seed; sample `i` uses substream `i`.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Worker threads. Output does not depend on this value.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
    /// Log a progress line every this many samples (0 disables).
    #[serde(default = "default_progress_every")]
    pub progress_every: usize,
    /// Failure handling.
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    /// Indent the dataset JSON.
    #[serde(default)]
    pub pretty_json: bool,
    /// Per-generator settings.
    #[serde(default)]
    pub generators: GeneratorSpecs,
    /// Rows added to or overriding the built-in property tables.
    #[serde(default)]
    pub tables: TableExtensions,
}

fn default_samples() -> usize {
    5000
}

fn default_seed() -> u64 {
    42
}

fn default_parallelism() -> usize {
    1
}

fn default_progress_every() -> usize {
    500
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            seed: default_seed(),
            parallelism: default_parallelism(),
            progress_every: default_progress_every(),
            failure_policy: FailurePolicy::default(),
            pretty_json: false,
            generators: GeneratorSpecs::default(),
            tables: TableExtensions::default(),
        }
    }
}

impl DatasetConfig {
    /// Loads a configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, MofError> {
        let bytes = fs::read(path).map_err(|err| {
            MofError::Serde(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        from_yaml_slice(&bytes).map_err(|err| err.with_context("path", path.display().to_string()))
    }

    /// Parses a configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, MofError> {
        from_yaml_slice(text.as_bytes())
    }

    /// Checks counts and generator settings without drawing anything.
    pub fn validate(&self) -> Result<(), MofError> {
        if self.samples == 0 {
            return Err(MofError::InvalidParameter(
                ErrorInfo::new("zero-samples", "a dataset needs at least one sample")
                    .with_hint("set `samples` or pass --samples"),
            ));
        }
        if self.parallelism == 0 {
            return Err(MofError::invalid_parameter(
                "invalid-parallelism",
                "parallelism must be at least one thread",
            ));
        }
        self.generators.validate()
    }

    /// Built-in tables merged with the configured extensions.
    pub fn resolve_tables(&self) -> Result<PropertyTables, MofError> {
        PropertyTables::with_extensions(&self.tables)
    }
}
