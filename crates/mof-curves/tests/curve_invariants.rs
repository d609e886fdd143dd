use mof_core::{MofError, RngHandle};
use mof_curves::{
    generate_eis, generate_ies, generate_rate_capability, DeviceSpec, EisSpec, GcdSpec, IesSpec,
    RateSpec,
};
use mof_props::{Assembly, MaterialParameters, PropertyTables, ELECTRODES, LIGANDS, METALS};
use proptest::prelude::*;

fn params_strategy() -> impl Strategy<Value = MaterialParameters> {
    (
        prop_oneof![
            (0usize..METALS.len()).prop_map(|i| METALS[i].to_string()),
            "[A-Z][a-z]{1,2}",
        ],
        1u8..=3,
        0usize..LIGANDS.len(),
        any::<bool>(),
        0usize..ELECTRODES.len(),
        any::<bool>(),
    )
        .prop_map(|(metal, valency, ligand, three, electrode, is_mof)| MaterialParameters {
            metal,
            valency,
            ligand: LIGANDS[ligand].to_string(),
            assembly: if three {
                Assembly::ThreeElectrode
            } else {
                Assembly::TwoElectrode
            },
            electrode: ELECTRODES[electrode].to_string(),
            is_mof,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn rate_capacity_stays_within_ceiling(params in params_strategy(), seed in any::<u64>()) {
        let tables = PropertyTables::builtin();
        let mut rng = RngHandle::from_seed(seed);
        let rate = generate_rate_capability(&params, &tables, &RateSpec::default(), &mut rng).unwrap();
        prop_assert_eq!(rate.current_density.len(), 10);
        prop_assert_eq!(rate.specific_capacity.len(), 10);
        prop_assert!(rate.current_density.windows(2).all(|pair| pair[1] > pair[0]));
        for value in &rate.specific_capacity {
            prop_assert!(*value >= 0.0 && *value <= rate.max_capacity);
        }
    }

    #[test]
    fn ies_intensity_is_never_negative(params in params_strategy(), seed in any::<u64>()) {
        let tables = PropertyTables::builtin();
        let mut rng = RngHandle::from_seed(seed);
        let ies = generate_ies(&params, &tables, &IesSpec::default(), &mut rng).unwrap();
        prop_assert_eq!(ies.energy.len(), ies.intensity.len());
        prop_assert!(ies.intensity.iter().all(|value| *value >= 0.0));
        prop_assert_eq!(ies.energy[0], 0.0);
        prop_assert_eq!(ies.energy[ies.energy.len() - 1], 50.0);
    }

    #[test]
    fn eis_arrays_share_length(params in params_strategy(), seed in any::<u64>()) {
        let tables = PropertyTables::builtin();
        let mut rng = RngHandle::from_seed(seed);
        let eis = generate_eis(&params, &tables, &EisSpec::default(), &mut rng).unwrap();
        prop_assert_eq!(eis.frequency.len(), 100);
        prop_assert_eq!(eis.z_real.len(), eis.frequency.len());
        prop_assert_eq!(eis.z_imag.len(), eis.frequency.len());
        prop_assert!(eis.frequency.windows(2).all(|pair| pair[1] > pair[0]));
    }
}

fn nickel_cobalt() -> MaterialParameters {
    MaterialParameters {
        metal: "Co".into(),
        valency: 3,
        ligand: "BTC".into(),
        assembly: Assembly::ThreeElectrode,
        electrode: "Carbon Cloth".into(),
        is_mof: true,
    }
}

#[test]
fn rate_curve_without_noise_starts_at_ceiling_and_fades() {
    let tables = PropertyTables::builtin();
    let spec = RateSpec {
        noise_fraction: 0.0,
        ..RateSpec::default()
    };
    let mut rng = RngHandle::from_seed(5);
    let rate = generate_rate_capability(&nickel_cobalt(), &tables, &spec, &mut rng).unwrap();
    let expected_max = 300.0 * 1.15 * 1.15 * 1.2 * 1.5;
    assert!((rate.max_capacity - expected_max).abs() < 1e-9);
    assert!((rate.specific_capacity[0] - expected_max).abs() < 1e-9);
    assert!(rate
        .specific_capacity
        .windows(2)
        .all(|pair| pair[1] < pair[0]));
    let tail = expected_max * (0.5f64 / 5.0).powf(0.3);
    assert!((rate.specific_capacity[9] - tail).abs() < 1e-9);
}

#[test]
fn ies_peaks_sit_on_metal_energies() {
    let tables = PropertyTables::builtin();
    let mut rng = RngHandle::from_seed(9);
    let ies = generate_ies(&nickel_cobalt(), &tables, &IesSpec::default(), &mut rng).unwrap();
    assert_eq!(ies.peaks.len(), 2);
    assert_eq!(ies.peaks[0].label, "bulk_plasmon");
    assert_eq!(ies.peaks[0].center, 21.0);
    assert!((0.8..1.0).contains(&ies.peaks[0].intensity));
    assert_eq!(ies.peaks[1].center, 5.5);
    assert!((1.5..1.8).contains(&ies.peaks[1].width));
}

#[test]
fn unknown_metal_spectrum_uses_default_peaks() {
    let tables = PropertyTables::builtin();
    let mut params = nickel_cobalt();
    params.metal = "Xx".into();
    let mut rng = RngHandle::from_seed(9);
    let ies = generate_ies(&params, &tables, &IesSpec::default(), &mut rng).unwrap();
    assert_eq!(ies.peaks[0].center, 20.0);
    assert_eq!(ies.peaks[1].center, 6.0);
}

#[test]
fn eis_circuit_draws_fall_in_documented_bands() {
    let tables = PropertyTables::builtin();
    let mut rng = RngHandle::from_seed(21);
    let eis = generate_eis(&nickel_cobalt(), &tables, &EisSpec::default(), &mut rng).unwrap();
    let circuit = eis.circuit;
    assert!((5.0..7.0).contains(&circuit.r_solution));
    assert!((0.9 * 20.0..0.9 * 30.0).contains(&circuit.r_ct));
    assert!((0.001..0.0015).contains(&circuit.cpe_t));
    assert!((0.85..0.95).contains(&circuit.cpe_p));
    assert!((10.0..15.0).contains(&circuit.warburg));
}

#[test]
fn same_seed_same_curves() {
    let tables = PropertyTables::builtin();
    let run = |seed| {
        let mut rng = RngHandle::from_seed(seed);
        generate_eis(&nickel_cobalt(), &tables, &EisSpec::default(), &mut rng).unwrap()
    };
    assert_eq!(run(77), run(77));
    assert_ne!(run(77).z_real, run(78).z_real);
}

#[test]
fn degenerate_grids_are_invalid_parameters() {
    let tables = PropertyTables::builtin();
    let mut rng = RngHandle::from_seed(1);

    let ies = IesSpec {
        points: 1,
        ..IesSpec::default()
    };
    let err = generate_ies(&nickel_cobalt(), &tables, &ies, &mut rng).unwrap_err();
    assert!(matches!(err, MofError::InvalidParameter(_)));
    assert_eq!(err.code(), "ies-grid");

    let rate = RateSpec {
        start: 0.0,
        ..RateSpec::default()
    };
    let err = generate_rate_capability(&nickel_cobalt(), &tables, &rate, &mut rng).unwrap_err();
    assert_eq!(err.code(), "rate-current-density");

    let eis = EisSpec {
        min_exponent: 5.0,
        max_exponent: -2.0,
        ..EisSpec::default()
    };
    let err = generate_eis(&nickel_cobalt(), &tables, &eis, &mut rng).unwrap_err();
    assert_eq!(err.code(), "eis-grid");
}

#[test]
fn negative_or_nan_noise_sigma_fails_validation() {
    for sigma in [-0.01, f64::NAN, f64::INFINITY] {
        let gcd = GcdSpec {
            noise_sigma: sigma,
            ..GcdSpec::default()
        };
        assert_eq!(gcd.validate().unwrap_err().code(), "gcd-noise-sigma");

        let ies = IesSpec {
            noise_sigma: sigma,
            ..IesSpec::default()
        };
        assert_eq!(ies.validate().unwrap_err().code(), "ies-noise-sigma");

        let eis = EisSpec {
            noise_sigma: sigma,
            ..EisSpec::default()
        };
        assert_eq!(eis.validate().unwrap_err().code(), "eis-noise-sigma");

        let device = DeviceSpec {
            noise_sigma: sigma,
            ..DeviceSpec::default()
        };
        assert_eq!(device.validate().unwrap_err().code(), "device-noise-sigma");
    }
    let silent = IesSpec {
        noise_sigma: 0.0,
        ..IesSpec::default()
    };
    assert!(silent.validate().is_ok());
}

#[test]
fn rejected_noise_sigma_leaves_stream_untouched() {
    let tables = PropertyTables::builtin();
    let ies = IesSpec {
        noise_sigma: -0.01,
        ..IesSpec::default()
    };
    let mut rng = RngHandle::from_seed(9);
    let err = generate_ies(&nickel_cobalt(), &tables, &ies, &mut rng).unwrap_err();
    assert!(matches!(err, MofError::InvalidParameter(_)));
    assert_eq!(err.code(), "ies-noise-sigma");
    assert_eq!(rng.uniform(), RngHandle::from_seed(9).uniform());
}
