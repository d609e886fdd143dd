use mof_props::{
    encode, feature_len, feature_names, Assembly, MaterialParameters, PropertyTables, ELECTRODES,
    LIGANDS, METALS,
};
use proptest::prelude::*;

fn params_strategy() -> impl Strategy<Value = MaterialParameters> {
    (
        0usize..METALS.len(),
        1u8..=3,
        0usize..LIGANDS.len(),
        any::<bool>(),
        0usize..ELECTRODES.len(),
        any::<bool>(),
    )
        .prop_map(|(metal, valency, ligand, three, electrode, is_mof)| MaterialParameters {
            metal: METALS[metal].to_string(),
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
    #[test]
    fn encoding_has_constant_length_and_one_hot_blocks(params in params_strategy()) {
        let tables = PropertyTables::builtin();
        let features = encode(&params, &tables);
        prop_assert_eq!(features.len(), METALS.len() + LIGANDS.len() + ELECTRODES.len() + 3);
        prop_assert_eq!(features.len(), feature_len(&tables));

        let metals = &features[..METALS.len()];
        let ligand_start = METALS.len() + 1;
        let ligands = &features[ligand_start..ligand_start + LIGANDS.len()];
        let electrode_start = ligand_start + LIGANDS.len() + 1;
        let electrodes = &features[electrode_start..electrode_start + ELECTRODES.len()];

        prop_assert_eq!(metals.iter().sum::<f64>(), 1.0);
        prop_assert_eq!(ligands.iter().sum::<f64>(), 1.0);
        prop_assert_eq!(electrodes.iter().sum::<f64>(), 1.0);
        prop_assert_eq!(features[METALS.len()], f64::from(params.valency) / 3.0);
    }
}

#[test]
fn names_line_up_with_values() {
    let tables = PropertyTables::builtin();
    let params = MaterialParameters {
        metal: "Co".into(),
        valency: 3,
        ligand: "NDC".into(),
        assembly: Assembly::ThreeElectrode,
        electrode: "Carbon Cloth".into(),
        is_mof: false,
    };
    let names = feature_names(&tables);
    let values = encode(&params, &tables);
    assert_eq!(names.len(), values.len());

    let hot: Vec<&str> = names
        .iter()
        .zip(values.iter())
        .filter(|(_, value)| **value == 1.0)
        .map(|(name, _)| name.as_str())
        .collect();
    assert_eq!(
        hot,
        vec![
            "metal=Co",
            "valency_norm",
            "ligand=NDC",
            "assembly=Three-Electrode",
            "electrode=Carbon Cloth"
        ]
    );
    assert_eq!(names.last().map(String::as_str), Some("is_mof"));
}

#[test]
fn unknown_metal_encodes_empty_metal_block() {
    let tables = PropertyTables::builtin();
    let params = MaterialParameters {
        metal: "Xx".into(),
        valency: 1,
        ligand: "BTC".into(),
        assembly: Assembly::TwoElectrode,
        electrode: "Glassy Carbon".into(),
        is_mof: false,
    };
    let features = encode(&params, &tables);
    assert!(features[..METALS.len()].iter().all(|value| *value == 0.0));
    assert_eq!(features.len(), feature_len(&tables));
}
