pub mod device;
pub mod encode;
pub mod generate;
pub mod sample;
pub mod tables;
pub mod version;

use std::error::Error;
use std::path::Path;

use clap::Args;
use mof_core::MofError;
use mof_data::serde::{to_canonical_json_bytes, to_canonical_json_pretty};
use mof_data::DatasetConfig;
use mof_props::{Assembly, MaterialParameters};
use serde::Serialize;

/// Material descriptor flags shared by `sample`, `encode` and `device`.
#[derive(Args, Debug, Clone, Default)]
pub struct MaterialArgs {
    /// Metal node; labels outside the table use neutral coefficients.
    #[arg(long)]
    pub metal: Option<String>,
    /// Oxidation state (1, 2 or 3).
    #[arg(long)]
    pub valency: Option<u8>,
    /// Organic linker.
    #[arg(long)]
    pub ligand: Option<String>,
    /// Electrode substrate.
    #[arg(long)]
    pub electrode: Option<String>,
    /// Cell assembly (`two`, `three` or the full label).
    #[arg(long)]
    pub assembly: Option<String>,
    /// Mark the material as a framework.
    #[arg(long, conflicts_with = "no_mof")]
    pub mof: bool,
    /// Mark the material as a plain complex.
    #[arg(long)]
    pub no_mof: bool,
}

impl MaterialArgs {
    fn is_mof(&self) -> Option<bool> {
        match (self.mof, self.no_mof) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    /// Replaces the fields of `params` that were given on the command line.
    pub fn overlay(&self, mut params: MaterialParameters) -> Result<MaterialParameters, MofError> {
        if let Some(metal) = &self.metal {
            params.metal = metal.clone();
        }
        if let Some(valency) = self.valency {
            params.valency = valency;
        }
        if let Some(ligand) = &self.ligand {
            params.ligand = ligand.clone();
        }
        if let Some(electrode) = &self.electrode {
            params.electrode = electrode.clone();
        }
        if let Some(assembly) = &self.assembly {
            params.assembly = assembly.parse::<Assembly>()?;
        }
        if let Some(is_mof) = self.is_mof() {
            params.is_mof = is_mof;
        }
        Ok(params)
    }

    /// Builds parameters from flags alone; `--mof` defaults to off.
    pub fn require(&self) -> Result<MaterialParameters, Box<dyn Error>> {
        let missing: Vec<&str> = [
            ("--metal", self.metal.is_none()),
            ("--valency", self.valency.is_none()),
            ("--ligand", self.ligand.is_none()),
            ("--electrode", self.electrode.is_none()),
            ("--assembly", self.assembly.is_none()),
        ]
        .into_iter()
        .filter_map(|(flag, absent)| absent.then_some(flag))
        .collect();
        if !missing.is_empty() {
            return Err(format!("missing required flags: {}", missing.join(", ")).into());
        }
        let base = MaterialParameters {
            metal: String::new(),
            valency: 0,
            ligand: String::new(),
            assembly: Assembly::TwoElectrode,
            electrode: String::new(),
            is_mof: false,
        };
        self.overlay(base)
            .map_err(|err| Box::new(err) as Box<dyn Error>)
    }
}

pub fn load_config(path: Option<&Path>) -> Result<DatasetConfig, Box<dyn Error>> {
    match path {
        Some(path) => DatasetConfig::load(path).map_err(|err| Box::new(err) as Box<dyn Error>),
        None => Ok(DatasetConfig::default()),
    }
}

pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), Box<dyn Error>> {
    let bytes = if pretty {
        to_canonical_json_pretty(value)
    } else {
        to_canonical_json_bytes(value)
    }
    .map_err(|err| Box::new(err) as Box<dyn Error>)?;
    println!("{}", String::from_utf8(bytes)?);
    Ok(())
}
