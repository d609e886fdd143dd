//! Categorical material descriptors and the coefficient tables behind them.

pub mod encode;
pub mod params;
pub mod tables;
pub mod universe;

pub use encode::{encode, feature_len, feature_names};
pub use params::{Assembly, MaterialParameters};
pub use tables::{
    ElectrodeCoefficients, LigandCoefficients, MetalCoefficients, PropertyCategory,
    PropertyCoefficients, PropertyTables, TableExtensions,
};
pub use universe::{
    ASSEMBLIES, CATEGORY_UNIVERSE_VERSION, ELECTRODES, LIGANDS, METALS, VALENCIES,
};
