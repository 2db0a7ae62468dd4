//! Pieces shared by the LogiTrack binaries and the HTTP crate.

pub mod types;
pub mod utils;
