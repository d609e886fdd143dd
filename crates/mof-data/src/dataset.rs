use std::sync::atomic::{AtomicUsize, Ordering};

use mof_core::errors::{ErrorInfo, MofError};
use mof_core::rng::RngHandle;
use mof_props::PropertyTables;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::{DatasetConfig, FailurePolicy};
use crate::sample::{generate_sample, Sample};

/// A sample dropped under [`FailurePolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gap {
    /// Index of the failed sample (and of its RNG substream).
    pub sample_index: usize,
    /// Error code of the failure.
    pub code: String,
    /// Diagnostic message.
    pub message: String,
}

impl Gap {
    fn from_error(sample_index: usize, err: &MofError) -> Self {
        Self {
            sample_index,
            code: err.code().to_string(),
            message: err.info().message.clone(),
        }
    }
}

/// A generated sample tagged with its index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetEntry {
    /// Sample index; gaps leave holes in the sequence.
    pub sample_id: usize,
    /// Descriptor and curves.
    #[serde(flatten)]
    pub sample: Sample,
}

/// Result of a dataset build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Master seed of the run.
    pub seed: u64,
    /// Number of samples requested.
    pub requested: usize,
    /// Generated samples in index order.
    pub entries: Vec<DatasetEntry>,
    /// Skipped samples in index order.
    pub gaps: Vec<Gap>,
}

impl Dataset {
    /// Number of generated samples.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no sample was generated.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the generated samples.
    pub fn samples(&self) -> impl Iterator<Item = &Sample> + '_ {
        self.entries.iter().map(|entry| &entry.sample)
    }
}

/// Generates `config.samples` samples on a pool of `config.parallelism` threads.
///
/// Each sample draws from its own substream of `config.seed`, and results are
/// assembled in index order, so the dataset is the same for any thread count.
pub fn build_dataset(config: &DatasetConfig, tables: &PropertyTables) -> Result<Dataset, MofError> {
    config.validate()?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.parallelism)
        .build()
        .map_err(|err| {
            MofError::InvalidParameter(
                ErrorInfo::new("thread-pool", err.to_string())
                    .with_context("parallelism", config.parallelism.to_string()),
            )
        })?;
    info!(
        samples = config.samples,
        seed = config.seed,
        threads = config.parallelism,
        "generating dataset"
    );

    let finished = AtomicUsize::new(0);
    // Lowest failing index seen so far; under Abort nothing above it is generated.
    let first_failure = AtomicUsize::new(usize::MAX);
    let abort = config.failure_policy == FailurePolicy::Abort;
    let outcomes: Vec<Option<Result<Sample, MofError>>> = pool.install(|| {
        (0..config.samples)
            .into_par_iter()
            .map(|index| {
                if abort && index > first_failure.load(Ordering::Relaxed) {
                    return None;
                }
                let mut rng = RngHandle::substream(config.seed, index as u64);
                let outcome = generate_sample(tables, &config.generators, &mut rng);
                let done = finished.fetch_add(1, Ordering::Relaxed) + 1;
                if config.progress_every > 0 && done % config.progress_every == 0 {
                    info!(done, total = config.samples, "generated samples");
                }
                if outcome.is_err() {
                    first_failure.fetch_min(index, Ordering::Relaxed);
                }
                Some(outcome)
            })
            .collect()
    });

    let mut entries = Vec::with_capacity(outcomes.len());
    let mut gaps = Vec::new();
    for (index, outcome) in outcomes.into_iter().enumerate() {
        // Only indices past an Abort failure are skipped, and the loop returns there first.
        let Some(outcome) = outcome else {
            continue;
        };
        match outcome {
            Ok(sample) => entries.push(DatasetEntry {
                sample_id: index,
                sample,
            }),
            Err(err) => match config.failure_policy {
                FailurePolicy::Abort => {
                    error!(sample_index = index, code = err.code(), "sample failed, aborting");
                    return Err(err
                        .with_context("sample_index", index.to_string())
                        .with_context("completed_samples", entries.len().to_string()));
                }
                FailurePolicy::Skip => {
                    warn!(sample_index = index, code = err.code(), "skipping failed sample");
                    gaps.push(Gap::from_error(index, &err));
                }
            },
        }
    }
    debug!(generated = entries.len(), gaps = gaps.len(), "dataset assembled");

    Ok(Dataset {
        seed: config.seed,
        requested: config.samples,
        entries,
        gaps,
    })
}
