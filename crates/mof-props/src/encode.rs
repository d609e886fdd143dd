//! Fixed-layout numeric encoding of [`MaterialParameters`].
//!
//! Layout: one-hot metals, `valency / 3`, one-hot ligands, three-electrode
//! flag, one-hot electrodes, MOF flag. Block order follows the table order of
//! the supplied [`PropertyTables`].

use crate::params::{Assembly, MaterialParameters};
use crate::tables::PropertyTables;

/// Number of features produced for `tables`.
pub fn feature_len(tables: &PropertyTables) -> usize {
    tables.metals().len() + tables.ligands().len() + tables.electrodes().len() + 3
}

/// Column labels matching [`encode`] position by position.
pub fn feature_names(tables: &PropertyTables) -> Vec<String> {
    let mut names = Vec::with_capacity(feature_len(tables));
    names.extend(tables.metals().map(|metal| format!("metal={metal}")));
    names.push("valency_norm".to_string());
    names.extend(tables.ligands().map(|ligand| format!("ligand={ligand}")));
    names.push(format!("assembly={}", Assembly::ThreeElectrode.label()));
    names.extend(
        tables
            .electrodes()
            .map(|electrode| format!("electrode={electrode}")),
    );
    names.push("is_mof".to_string());
    names
}

/// Encodes `params` against the universe of `tables`.
///
/// A metal missing from the table leaves its block all zero.
pub fn encode(params: &MaterialParameters, tables: &PropertyTables) -> Vec<f64> {
    let mut features = Vec::with_capacity(feature_len(tables));
    features.extend(tables.metals().map(|metal| flag(metal == params.metal)));
    features.push(f64::from(params.valency) / 3.0);
    features.extend(tables.ligands().map(|ligand| flag(ligand == params.ligand)));
    features.push(flag(params.assembly == Assembly::ThreeElectrode));
    features.extend(
        tables
            .electrodes()
            .map(|electrode| flag(electrode == params.electrode)),
    );
    features.push(flag(params.is_mof));
    features
}

fn flag(on: bool) -> f64 {
    if on {
        1.0
    } else {
        0.0
    }
}
