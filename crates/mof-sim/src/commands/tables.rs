use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use mof_props::{feature_names, PropertyTables};
use serde_json::json;

use super::{load_config, print_json};

#[derive(Args, Debug)]
pub struct TablesArgs {
    /// YAML dataset configuration supplying table extensions.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Indent the output.
    #[arg(long)]
    pub pretty: bool,
}

pub fn run(args: &TablesArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(args.config.as_deref())?;
    let tables = config
        .resolve_tables()
        .map_err(|err| Box::new(err) as Box<dyn Error>)?;
    print_json(&describe(&tables), args.pretty)
}

// Canonical JSON sorts map keys, so the universe order is listed separately.
fn describe(tables: &PropertyTables) -> serde_json::Value {
    json!({
        "universe_version": tables.universe_version(),
        "universe": {
            "metals": tables.metals().collect::<Vec<_>>(),
            "ligands": tables.ligands().collect::<Vec<_>>(),
            "electrodes": tables.electrodes().collect::<Vec<_>>(),
        },
        "tables": tables,
        "feature_names": feature_names(tables),
    })
}
