use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use mof_core::RngHandle;
use mof_data::{draw_parameters, generate_sample_for};

use super::{load_config, print_json, MaterialArgs};

#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Seed for the single sample stream.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
    /// YAML dataset configuration supplying generator settings and table extensions.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Indent the output.
    #[arg(long)]
    pub pretty: bool,
    #[command(flatten)]
    pub material: MaterialArgs,
}

/// Fields left out on the command line are drawn from the seed.
pub fn run(args: &SampleArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(args.config.as_deref())?;
    let tables = config
        .resolve_tables()
        .map_err(|err| Box::new(err) as Box<dyn Error>)?;
    let mut rng = RngHandle::from_seed(args.seed);
    let drawn = draw_parameters(&tables, &mut rng).map_err(|err| Box::new(err) as Box<dyn Error>)?;
    let params = args
        .material
        .overlay(drawn)
        .map_err(|err| Box::new(err) as Box<dyn Error>)?;
    let sample = generate_sample_for(params, &tables, &config.generators, &mut rng)
        .map_err(|err| Box::new(err) as Box<dyn Error>)?;
    print_json(&sample, args.pretty)
}
