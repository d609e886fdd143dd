use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use mof_props::{encode, feature_names};
use serde_json::json;

use super::{load_config, print_json, MaterialArgs};

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// YAML dataset configuration supplying table extensions.
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[command(flatten)]
    pub material: MaterialArgs,
}

pub fn run(args: &EncodeArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(args.config.as_deref())?;
    let tables = config
        .resolve_tables()
        .map_err(|err| Box::new(err) as Box<dyn Error>)?;
    let params = args.material.require()?;
    params
        .validate(&tables)
        .map_err(|err| Box::new(err) as Box<dyn Error>)?;
    let payload = json!({
        "inputs": params,
        "names": feature_names(&tables),
        "values": encode(&params, &tables),
        "universe_version": tables.universe_version(),
    });
    print_json(&payload, false)
}
