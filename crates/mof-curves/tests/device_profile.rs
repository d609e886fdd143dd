use mof_core::{MofError, RngHandle};
use mof_curves::{simulate_device, DeviceSpec};
use mof_props::{Assembly, MaterialParameters, PropertyTables};

fn silver_device() -> MaterialParameters {
    MaterialParameters {
        metal: "Ag".into(),
        valency: 2,
        ligand: "TPA".into(),
        assembly: Assembly::TwoElectrode,
        electrode: "Nickel Foam".into(),
        is_mof: true,
    }
}

#[test]
fn default_profile_has_nine_traces_inside_window() {
    let tables = PropertyTables::builtin();
    let spec = DeviceSpec::default();
    let mut rng = RngHandle::from_seed(42);
    let profile = simulate_device(&silver_device(), &tables, &spec, &mut rng).unwrap();

    assert_eq!(profile.gcd.len(), 9);
    assert_eq!(profile.specific_capacities.len(), 9);
    assert_eq!(profile.specific_capacitances.len(), 9);
    for trace in &profile.gcd {
        assert_eq!(trace.time.len(), 200);
        assert_eq!(trace.time[0], 0.0);
        assert!(trace
            .voltage
            .iter()
            .all(|v| (spec.voltage_min..=spec.voltage_max).contains(v)));
    }
    for (q, c) in profile
        .specific_capacities
        .iter()
        .zip(&profile.specific_capacitances)
    {
        assert!((c - q / 0.6).abs() < 1e-9);
    }
}

#[test]
fn specific_capacity_follows_capped_discharge_time() {
    let tables = PropertyTables::builtin();
    let spec = DeviceSpec {
        current_densities: vec![0.25, 2.0],
        time_cap: 20.0,
        ..DeviceSpec::default()
    };
    let mut rng = RngHandle::from_seed(1);
    let profile = simulate_device(&silver_device(), &tables, &spec, &mut rng).unwrap();

    // 200 * 1.25 * 1.3 * 1.5 / (0.25 * 60) = 32.5 h, capped at 20
    assert_eq!(profile.gcd[0].time[199], 20.0);
    assert!((profile.specific_capacities[0] - 0.25 * 20.0 * 3.6).abs() < 1e-9);
    let uncapped = 200.0 * 1.25 * 1.3 * 1.5 / (2.0 * 60.0);
    assert!((profile.gcd[1].time[199] - uncapped).abs() < 1e-9);
}

#[test]
fn cycling_lowers_resistances() {
    let tables = PropertyTables::builtin();
    let mut rng = RngHandle::from_seed(8);
    let profile =
        simulate_device(&silver_device(), &tables, &DeviceSpec::default(), &mut rng).unwrap();

    assert!((1.5..2.0).contains(&profile.r_solution_before));
    assert!((profile.r_solution_after - profile.r_solution_before * 0.95).abs() < 1e-12);
    assert!((profile.r_ct_before - (5.0 + 3.0 / 1.2)).abs() < 1e-12);
    assert!((profile.r_ct_after - (2.0 + 1.0 / 1.2)).abs() < 1e-12);
    assert_eq!(profile.eis_before.frequency.len(), 50);
    assert_eq!(profile.eis_after.z_real.len(), 50);
    assert!(profile.eis_after.z_real[49] < profile.eis_before.z_real[49]);
    assert!(profile.eis_before.z_imag.iter().all(|v| *v > 0.0));
}

#[test]
fn inverted_window_is_rejected() {
    let tables = PropertyTables::builtin();
    let spec = DeviceSpec {
        voltage_min: 0.6,
        voltage_max: 0.6,
        ..DeviceSpec::default()
    };
    let mut rng = RngHandle::from_seed(1);
    let err = simulate_device(&silver_device(), &tables, &spec, &mut rng).unwrap_err();
    assert!(matches!(err, MofError::InvalidParameter(_)));
    assert_eq!(err.code(), "device-voltage-window");
}

#[test]
fn non_positive_cap_and_current_are_rejected() {
    let cap = DeviceSpec {
        time_cap: 0.0,
        ..DeviceSpec::default()
    };
    assert_eq!(cap.validate().unwrap_err().code(), "device-time-cap");

    let current = DeviceSpec {
        current_densities: vec![0.5, -1.0],
        ..DeviceSpec::default()
    };
    assert_eq!(current.validate().unwrap_err().code(), "device-current-density");
}
