//! End-to-end generation run: build, summarise, export, record.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use mof_core::errors::{ErrorInfo, MofError};
use mof_core::provenance::{RunProvenance, SchemaVersion};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::DatasetConfig;
use crate::dataset::build_dataset;
use crate::export::{export_csv, export_json};
use crate::hash::{sha256_hex, stable_hash_string};
use crate::manifest::{ArtifactDigest, RunManifest};
use crate::serde::to_canonical_json_pretty;
use crate::summary::DistributionSummary;

/// Sample array.
pub const DATASET_FILE: &str = "synthetic_dataset.json";
/// Descriptor and feature table.
pub const FEATURES_FILE: &str = "feature_summary.csv";
/// Per-field distribution.
pub const SUMMARY_FILE: &str = "summary.json";
/// Run record.
pub const MANIFEST_FILE: &str = "manifest.json";

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Directory holding the artifacts.
    pub out_dir: PathBuf,
    /// Manifest as written.
    pub manifest: RunManifest,
    /// Distribution summary as written.
    pub summary: DistributionSummary,
}

/// Generates a dataset for `config` and writes every artifact into `out_dir`.
pub fn run_generation(config: &DatasetConfig, out_dir: &Path) -> Result<GenerationReport, MofError> {
    config.validate()?;
    let tables = config.resolve_tables()?;
    fs::create_dir_all(out_dir).map_err(|err| {
        MofError::Serde(
            ErrorInfo::new("out-dir", err.to_string())
                .with_context("path", out_dir.display().to_string()),
        )
    })?;

    let dataset = build_dataset(config, &tables)?;
    let summary = DistributionSummary::from_dataset(&dataset);
    for line in summary.render().lines() {
        info!("{line}");
    }

    let mut artifacts = BTreeMap::new();
    let dataset_bytes = export_json(&dataset, &out_dir.join(DATASET_FILE), config.pretty_json)?;
    artifacts.insert("dataset".to_string(), digest(DATASET_FILE, &dataset_bytes));
    let csv_bytes = export_csv(&dataset, &tables, &out_dir.join(FEATURES_FILE))?;
    artifacts.insert("features".to_string(), digest(FEATURES_FILE, &csv_bytes));
    let summary_path = out_dir.join(SUMMARY_FILE);
    let summary_bytes = to_canonical_json_pretty(&summary)?;
    fs::write(&summary_path, &summary_bytes).map_err(|err| {
        MofError::Serde(
            ErrorInfo::new("summary-write", err.to_string())
                .with_context("path", summary_path.display().to_string()),
        )
    })?;
    artifacts.insert("summary".to_string(), digest(SUMMARY_FILE, &summary_bytes));

    let manifest = RunManifest {
        schema_version: SchemaVersion::current(),
        provenance: provenance(config, tables.universe_version())?,
        config: config.clone(),
        requested_samples: dataset.requested,
        generated_samples: dataset.len(),
        gaps: dataset.gaps.clone(),
        artifacts,
    };
    manifest.write(&out_dir.join(MANIFEST_FILE))?;
    info!(
        out = %out_dir.display(),
        generated = manifest.generated_samples,
        gaps = manifest.gaps.len(),
        "dataset written"
    );

    Ok(GenerationReport {
        out_dir: out_dir.to_path_buf(),
        manifest,
        summary,
    })
}

fn digest(file: &str, bytes: &[u8]) -> ArtifactDigest {
    ArtifactDigest {
        file: file.to_string(),
        sha256: sha256_hex(bytes),
        bytes: bytes.len() as u64,
    }
}

fn provenance(config: &DatasetConfig, universe_version: String) -> Result<RunProvenance, MofError> {
    let mut tool_versions = BTreeMap::new();
    tool_versions.insert(
        "mof-data".to_string(),
        env!("CARGO_PKG_VERSION").to_string(),
    );
    Ok(RunProvenance {
        seed: config.seed,
        config_hash: stable_hash_string(config)?,
        universe_version,
        created_at: Utc::now().to_rfc3339(),
        tool_versions,
    })
}
