use std::collections::BTreeMap;
use std::fmt::Write as _;

use mof_props::MaterialParameters;
use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;

/// Fields summarised, in report order.
pub const SUMMARY_FIELDS: [&str; 6] = ["metal", "valency", "ligand", "assembly", "electrode", "is_mof"];

/// Count and share of one field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueShare {
    /// Field value as text.
    pub value: String,
    /// Number of samples carrying it.
    pub count: usize,
    /// Percentage of generated samples.
    pub percent: f64,
}

/// Per-field value distribution across generated samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    /// Number of generated samples.
    pub total: usize,
    /// Values sorted lexicographically within each field.
    pub fields: BTreeMap<String, Vec<ValueShare>>,
}

impl DistributionSummary {
    /// Tallies the inputs of every generated sample.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self::from_inputs(dataset.samples().map(|sample| &sample.inputs))
    }

    /// Tallies an arbitrary sequence of descriptors.
    pub fn from_inputs<'a>(inputs: impl Iterator<Item = &'a MaterialParameters>) -> Self {
        let mut counts: BTreeMap<&str, BTreeMap<String, usize>> =
            SUMMARY_FIELDS.iter().map(|field| (*field, BTreeMap::new())).collect();
        let mut total = 0usize;
        for params in inputs {
            total += 1;
            for (field, value) in field_values(params) {
                *counts.entry(field).or_default().entry(value).or_insert(0) += 1;
            }
        }
        let fields = counts
            .into_iter()
            .map(|(field, values)| {
                let shares = values
                    .into_iter()
                    .map(|(value, count)| ValueShare {
                        value,
                        count,
                        percent: percent(count, total),
                    })
                    .collect();
                (field.to_string(), shares)
            })
            .collect();
        Self { total, fields }
    }

    /// Plain-text report, one block per field.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "dataset distribution ({} samples)", self.total);
        for field in SUMMARY_FIELDS {
            let Some(shares) = self.fields.get(field) else {
                continue;
            };
            let _ = writeln!(out, "{field}:");
            for share in shares {
                let _ = writeln!(
                    out,
                    "  {}: {} ({:.1}%)",
                    share.value, share.count, share.percent
                );
            }
        }
        out
    }
}

fn field_values(params: &MaterialParameters) -> [(&'static str, String); 6] {
    [
        ("metal", params.metal.clone()),
        ("valency", params.valency.to_string()),
        ("ligand", params.ligand.clone()),
        ("assembly", params.assembly.label().to_string()),
        ("electrode", params.electrode.clone()),
        ("is_mof", params.is_mof.to_string()),
    ]
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mof_props::Assembly;

    fn params(metal: &str, is_mof: bool) -> MaterialParameters {
        MaterialParameters {
            metal: metal.into(),
            valency: 2,
            ligand: "BDC".into(),
            assembly: Assembly::TwoElectrode,
            electrode: "Nickel Foam".into(),
            is_mof,
        }
    }

    #[test]
    fn shares_sum_to_total() {
        let inputs = vec![params("Zn", true), params("Cu", false), params("Zn", true), params("Ni", true)];
        let summary = DistributionSummary::from_inputs(inputs.iter());
        assert_eq!(summary.total, 4);
        let metals = &summary.fields["metal"];
        let values: Vec<&str> = metals.iter().map(|share| share.value.as_str()).collect();
        assert_eq!(values, vec!["Cu", "Ni", "Zn"]);
        assert_eq!(metals[2].count, 2);
        assert_eq!(metals[2].percent, 50.0);
        assert_eq!(summary.fields["is_mof"][1].value, "true");
        assert_eq!(summary.fields["is_mof"][1].count, 3);
        assert!(summary.render().contains("  Zn: 2 (50.0%)"));
    }

    #[test]
    fn empty_input_has_no_shares() {
        let summary = DistributionSummary::from_inputs(std::iter::empty());
        assert_eq!(summary.total, 0);
        assert!(summary.fields.values().all(Vec::is_empty));
    }
}
