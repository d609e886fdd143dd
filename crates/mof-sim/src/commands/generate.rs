use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use mof_data::{run_generation, FailurePolicy};
use serde_json::json;

use super::{load_config, print_json};

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Directory receiving the dataset, feature table, summary and manifest.
    #[arg(long)]
    pub out: PathBuf,
    /// YAML dataset configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Number of samples (overrides the config).
    #[arg(long)]
    pub samples: Option<usize>,
    /// Master seed (overrides the config).
    #[arg(long)]
    pub seed: Option<u64>,
    /// Worker threads (overrides the config).
    #[arg(long)]
    pub threads: Option<usize>,
    /// Record failing samples as gaps instead of aborting.
    #[arg(long)]
    pub skip_failures: bool,
    /// Indent the dataset JSON.
    #[arg(long)]
    pub pretty: bool,
}

pub fn run(args: &GenerateArgs) -> Result<(), Box<dyn Error>> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(samples) = args.samples {
        config.samples = samples;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(threads) = args.threads {
        config.parallelism = threads;
    }
    if args.skip_failures {
        config.failure_policy = FailurePolicy::Skip;
    }
    if args.pretty {
        config.pretty_json = true;
    }

    let report =
        run_generation(&config, &args.out).map_err(|err| Box::new(err) as Box<dyn Error>)?;
    let manifest = &report.manifest;
    let summary = json!({
        "out": report.out_dir.display().to_string(),
        "seed": manifest.provenance.seed,
        "requested": manifest.requested_samples,
        "generated": manifest.generated_samples,
        "gaps": manifest.gaps.len(),
        "universe_version": manifest.provenance.universe_version,
        "artifacts": manifest.artifacts,
    });
    print_json(&summary, false)
}
