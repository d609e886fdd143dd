#![deny(missing_docs)]
#![doc = "Shared error, seeding and provenance types for the MOF synthetic electrochemistry crates."]

pub mod errors;
pub mod provenance;
pub mod rng;

pub use errors::{ErrorInfo, MofError};
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, RngHandle};
