//! Customer shipments with their tracking log.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::ParcelService;
