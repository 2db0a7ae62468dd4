//! Fleet records: admin-only CRUD plus the populated parcel view.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::TruckService;
