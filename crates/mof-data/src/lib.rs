#![deny(missing_docs)]
#![doc = "Seeded dataset builder and artifact export for synthetic MOF electrochemistry."]

/// YAML run configuration.
pub mod config;
/// Parallel, order-preserving dataset construction.
pub mod dataset;
/// JSON and CSV artifact writers.
pub mod export;
/// Canonical hashing helpers.
pub mod hash;
/// Run manifest.
pub mod manifest;
/// End-to-end generation run.
pub mod pipeline;
/// Single-sample orchestration.
pub mod sample;
/// Canonical JSON serde helpers.
pub mod serde;
/// Per-field distribution summary.
pub mod summary;

pub use config::{DatasetConfig, FailurePolicy};
pub use dataset::{build_dataset, Dataset, DatasetEntry, Gap};
pub use export::{csv_header, export_csv, export_json};
pub use manifest::{ArtifactDigest, RunManifest};
pub use pipeline::{
    run_generation, GenerationReport, DATASET_FILE, FEATURES_FILE, MANIFEST_FILE, SUMMARY_FILE,
};
pub use sample::{draw_parameters, generate_sample, generate_sample_for, Sample, SampleOutputs};
pub use summary::{DistributionSummary, ValueShare};
