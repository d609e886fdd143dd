use std::path::PathBuf;

use mof_core::{MofError, RngHandle};
use mof_data::{build_dataset, draw_parameters, DatasetConfig, FailurePolicy};
use mof_props::PropertyTables;

fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join(relative)
}

// The fixture adds a metal whose redox factor overflows the discharge time.
fn overflowing_config() -> DatasetConfig {
    DatasetConfig::load(&fixture_path("configs/extended_tables.yaml")).expect("fixture config")
}

fn failing_indices(config: &DatasetConfig, tables: &PropertyTables) -> Vec<usize> {
    (0..config.samples)
        .filter(|index| {
            let mut rng = RngHandle::substream(config.seed, *index as u64);
            draw_parameters(tables, &mut rng).expect("draw").metal == "Xq"
        })
        .collect()
}

#[test]
fn fixture_extends_the_universe() {
    let config = overflowing_config();
    let tables = config.resolve_tables().expect("tables");
    assert_eq!(tables.metals().len(), 16);
    assert_eq!(tables.metal_at(15), Some("Xq"));
    assert_eq!(tables.ligands().last(), Some("MOF-74"));
    assert_ne!(tables.universe_version(), mof_props::CATEGORY_UNIVERSE_VERSION);
}

#[test]
fn skip_records_every_failed_index() {
    let config = overflowing_config();
    assert_eq!(config.failure_policy, FailurePolicy::Skip);
    let tables = config.resolve_tables().expect("tables");
    let expected = failing_indices(&config, &tables);
    assert!(!expected.is_empty());

    let dataset = build_dataset(&config, &tables).expect("skip build");
    let gap_indices: Vec<usize> = dataset.gaps.iter().map(|gap| gap.sample_index).collect();
    assert_eq!(gap_indices, expected);
    assert_eq!(dataset.len() + dataset.gaps.len(), config.samples);
    assert!(dataset.gaps.iter().all(|gap| gap.code == "gcd-time-span"));
    assert!(dataset
        .entries
        .iter()
        .all(|entry| !expected.contains(&entry.sample_id)));
}

#[test]
fn abort_reports_progress_before_first_failure() {
    let config = DatasetConfig {
        failure_policy: FailurePolicy::Abort,
        ..overflowing_config()
    };
    let tables = config.resolve_tables().expect("tables");
    let first = failing_indices(&config, &tables)[0];

    let err = build_dataset(&config, &tables).unwrap_err();
    assert!(matches!(err, MofError::InvalidParameter(_)));
    assert_eq!(err.code(), "gcd-time-span");
    let context = &err.info().context;
    assert_eq!(context.get("sample_index"), Some(&first.to_string()));
    assert_eq!(context.get("completed_samples"), Some(&first.to_string()));
}

#[test]
fn non_positive_extension_is_rejected() {
    let yaml = "tables:\n  electrodes:\n    Copper Foil:\n      capacity_boost: 0.0\n      resistance: 1.0\n";
    let config = DatasetConfig::from_yaml_str(yaml).expect("parse");
    let err = config.resolve_tables().unwrap_err();
    assert_eq!(err.code(), "non-positive-coefficient");
}

#[test]
fn bad_noise_sigma_is_rejected_before_generation() {
    let yaml = "samples: 5\nfailure_policy: skip\ngenerators:\n  ies:\n    noise_sigma: -0.01\n";
    let config = DatasetConfig::from_yaml_str(yaml).expect("parse");
    let err = config.validate().unwrap_err();
    assert!(matches!(err, MofError::InvalidParameter(_)));
    assert_eq!(err.code(), "ies-noise-sigma");

    let tables = config.resolve_tables().expect("tables");
    let err = build_dataset(&config, &tables).unwrap_err();
    assert_eq!(err.code(), "ies-noise-sigma");
}

#[test]
fn abort_picks_lowest_failure_on_a_wide_pool() {
    let base = DatasetConfig {
        failure_policy: FailurePolicy::Abort,
        ..overflowing_config()
    };
    let tables = base.resolve_tables().expect("tables");
    let first = failing_indices(&base, &tables)[0];
    for parallelism in [1, 4, 8] {
        let config = DatasetConfig {
            parallelism,
            ..base.clone()
        };
        let err = build_dataset(&config, &tables).unwrap_err();
        let context = &err.info().context;
        assert_eq!(context.get("sample_index"), Some(&first.to_string()));
        assert_eq!(context.get("completed_samples"), Some(&first.to_string()));
    }
}
