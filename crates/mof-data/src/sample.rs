//! Single-sample orchestration: draw a material, run every generator on it.

use mof_core::errors::MofError;
use mof_core::rng::RngHandle;
use mof_curves::{
    generate_eis, generate_gcd, generate_ies, generate_rate_capability, EisNyquist, GcdCurves,
    GeneratorSpecs, IesSpectrum, RateCapability,
};
use mof_props::{MaterialParameters, PropertyTables, ASSEMBLIES, VALENCIES};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Generator outputs for one material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleOutputs {
    /// Discharge traces keyed by current.
    pub gcd: GcdCurves,
    /// Capacity fade against current density.
    pub rate_capability: RateCapability,
    /// Energy-loss spectrum.
    pub ies: IesSpectrum,
    /// Impedance sweep.
    pub eis: EisNyquist,
}

/// Material descriptor and the curves generated for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Drawn or supplied descriptor.
    pub inputs: MaterialParameters,
    /// Generated curves.
    pub outputs: SampleOutputs,
}

/// Draws every descriptor field independently and uniformly.
///
/// Field order: metal, valency, ligand, assembly, electrode, MOF flag.
pub fn draw_parameters(
    tables: &PropertyTables,
    rng: &mut RngHandle,
) -> Result<MaterialParameters, MofError> {
    let metal = draw_label(tables.metals(), rng, "metal")?;
    let valency = VALENCIES[rng.gen_range(0..VALENCIES.len())];
    let ligand = draw_label(tables.ligands(), rng, "ligand")?;
    let assembly = ASSEMBLIES[rng.gen_range(0..ASSEMBLIES.len())];
    let electrode = draw_label(tables.electrodes(), rng, "electrode")?;
    let is_mof = rng.gen_bool(0.5);
    Ok(MaterialParameters {
        metal,
        valency,
        ligand,
        assembly,
        electrode,
        is_mof,
    })
}

fn draw_label<'a>(
    mut labels: impl ExactSizeIterator<Item = &'a str>,
    rng: &mut RngHandle,
    category: &str,
) -> Result<String, MofError> {
    let len = labels.len();
    if len == 0 {
        return Err(MofError::invalid_parameter(
            "empty-universe",
            format!("no {category} entries to draw from"),
        ));
    }
    labels
        .nth(rng.gen_range(0..len))
        .map(str::to_string)
        .ok_or_else(|| MofError::invalid_parameter("empty-universe", category.to_string()))
}

/// Draws a material and generates its curves from one stream.
pub fn generate_sample(
    tables: &PropertyTables,
    specs: &GeneratorSpecs,
    rng: &mut RngHandle,
) -> Result<Sample, MofError> {
    let params = draw_parameters(tables, rng)?;
    generate_sample_for(params, tables, specs, rng)
}

/// Runs charge-discharge, rate, scattering and impedance generators, in that order.
pub fn generate_sample_for(
    params: MaterialParameters,
    tables: &PropertyTables,
    specs: &GeneratorSpecs,
    rng: &mut RngHandle,
) -> Result<Sample, MofError> {
    let gcd = generate_gcd(&params, tables, &specs.gcd, rng)?;
    let rate_capability = generate_rate_capability(&params, tables, &specs.rate, rng)?;
    let ies = generate_ies(&params, tables, &specs.ies, rng)?;
    let eis = generate_eis(&params, tables, &specs.eis, rng)?;
    Ok(Sample {
        inputs: params,
        outputs: SampleOutputs {
            gcd,
            rate_capability,
            ies,
            eis,
        },
    })
}
