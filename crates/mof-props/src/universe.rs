//! Built-in ordered category universe.
//!
//! The order of these lists is part of the serialized contract: it fixes the
//! one-hot layout of [`crate::encode`] and the index space of uniform draws.
//! Any reordering or insertion must bump [`CATEGORY_UNIVERSE_VERSION`].

use crate::params::Assembly;

/// Version tag of the built-in universe below.
pub const CATEGORY_UNIVERSE_VERSION: &str = "mof-universe/1";

/// Metals with tabulated coefficients, in encoding order.
pub const METALS: [&str; 15] = [
    "Cu", "Ni", "Co", "Zn", "Fe", "Mn", "Ag", "Au", "Pd", "Pt", "Cr", "V", "Ti", "Mo", "W",
];

/// Admissible metal oxidation states.
pub const VALENCIES: [u8; 3] = [1, 2, 3];

/// Organic linkers, in encoding order.
pub const LIGANDS: [&str; 6] = ["BDC", "BTC", "DOBDC", "BPDC", "NDC", "TPA"];

/// Cell assemblies, in draw order.
pub const ASSEMBLIES: [Assembly; 2] = [Assembly::TwoElectrode, Assembly::ThreeElectrode];

/// Electrode substrates, in encoding order.
pub const ELECTRODES: [&str; 4] = [
    "Nickel Foam",
    "Glassy Carbon",
    "Carbon Cloth",
    "Stainless Steel",
];
