use std::fs;
use std::path::Path;

use mof_core::errors::{ErrorInfo, MofError};
use mof_props::{encode, feature_names, PropertyTables};
use tracing::debug;

use crate::dataset::Dataset;
use crate::serde::{to_canonical_json_bytes, to_canonical_json_pretty};

/// Leading CSV columns ahead of the encoded features.
pub const RAW_COLUMNS: [&str; 7] = [
    "sample_id",
    "metal",
    "valency",
    "ligand",
    "assembly",
    "electrode",
    "is_mof",
];

fn export_error(code: &str, path: &Path, err: impl ToString) -> MofError {
    MofError::Serde(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
    )
}

/// Canonical JSON array of the generated samples.
pub fn dataset_json_bytes(dataset: &Dataset, pretty: bool) -> Result<Vec<u8>, MofError> {
    if pretty {
        to_canonical_json_pretty(&dataset.entries)
    } else {
        to_canonical_json_bytes(&dataset.entries)
    }
}

/// Writes the dataset JSON and returns the bytes written.
pub fn export_json(dataset: &Dataset, out_path: &Path, pretty: bool) -> Result<Vec<u8>, MofError> {
    let bytes = dataset_json_bytes(dataset, pretty)?;
    fs::write(out_path, &bytes).map_err(|err| export_error("dataset-json-write", out_path, err))?;
    debug!(path = %out_path.display(), bytes = bytes.len(), "wrote dataset json");
    Ok(bytes)
}

/// Header row: raw descriptor columns, then one column per encoded feature.
pub fn csv_header(tables: &PropertyTables) -> Vec<String> {
    RAW_COLUMNS
        .iter()
        .map(|column| column.to_string())
        .chain(feature_names(tables))
        .collect()
}

/// Feature summary CSV rendered in memory.
pub fn feature_csv_bytes(dataset: &Dataset, tables: &PropertyTables) -> Result<Vec<u8>, MofError> {
    let csv_error = |err: csv::Error| MofError::Serde(ErrorInfo::new("feature-csv", err.to_string()));
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(csv_header(tables)).map_err(csv_error)?;
    for entry in &dataset.entries {
        let params = &entry.sample.inputs;
        let mut record = vec![
            entry.sample_id.to_string(),
            params.metal.clone(),
            params.valency.to_string(),
            params.ligand.clone(),
            params.assembly.label().to_string(),
            params.electrode.clone(),
            params.is_mof.to_string(),
        ];
        record.extend(encode(params, tables).iter().map(f64::to_string));
        wtr.write_record(&record).map_err(csv_error)?;
    }
    wtr.into_inner()
        .map_err(|err| MofError::Serde(ErrorInfo::new("feature-csv", err.to_string())))
}

/// Writes the feature summary CSV and returns the bytes written.
pub fn export_csv(
    dataset: &Dataset,
    tables: &PropertyTables,
    out_path: &Path,
) -> Result<Vec<u8>, MofError> {
    let bytes = feature_csv_bytes(dataset, tables)?;
    fs::write(out_path, &bytes).map_err(|err| export_error("feature-csv-write", out_path, err))?;
    debug!(path = %out_path.display(), rows = dataset.len(), "wrote feature csv");
    Ok(bytes)
}
