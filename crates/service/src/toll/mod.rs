//! Toll receipts and the truck ledger they feed.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::TollService;
