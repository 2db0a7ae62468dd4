//! Registration, login and bearer-token resolution.
//!
//! Split into domain types, a repository seam and the service that hashes
//! passwords and issues tokens.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::{AuthConfig, AuthService};
