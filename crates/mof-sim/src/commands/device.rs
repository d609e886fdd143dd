use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use mof_core::RngHandle;
use mof_curves::{simulate_device, DeviceSpec};
use mof_data::draw_parameters;
use serde_json::json;

use super::{load_config, print_json, MaterialArgs};

#[derive(Args, Debug)]
pub struct DeviceArgs {
    /// Seed for the device stream.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
    /// YAML dataset configuration supplying table extensions.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Comma-separated current densities (A/g).
    #[arg(long, value_delimiter = ',')]
    pub currents: Vec<f64>,
    /// Lower edge of the voltage window (V).
    #[arg(long)]
    pub voltage_min: Option<f64>,
    /// Upper edge of the voltage window (V).
    #[arg(long)]
    pub voltage_max: Option<f64>,
    /// Longest discharge time reported (s).
    #[arg(long)]
    pub time_cap: Option<f64>,
    /// Indent the output.
    #[arg(long)]
    pub pretty: bool,
    #[command(flatten)]
    pub material: MaterialArgs,
}

impl DeviceArgs {
    fn spec(&self) -> DeviceSpec {
        let mut spec = DeviceSpec::default();
        if !self.currents.is_empty() {
            spec.current_densities = self.currents.clone();
        }
        if let Some(v) = self.voltage_min {
            spec.voltage_min = v;
        }
        if let Some(v) = self.voltage_max {
            spec.voltage_max = v;
        }
        if let Some(cap) = self.time_cap {
            spec.time_cap = cap;
        }
        spec
    }
}

pub fn run(args: &DeviceArgs) -> Result<(), Box<dyn Error>> {
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
    let spec = args.spec();
    let profile = simulate_device(&params, &tables, &spec, &mut rng)
        .map_err(|err| Box::new(err) as Box<dyn Error>)?;
    print_json(
        &json!({ "inputs": params, "spec": spec, "profile": profile }),
        args.pretty,
    )
}
