//! Resource services for trucks, parcels and tolls, plus account auth.
//! - Every operation takes the calling `Principal` and is gated by `policy`.
//! - Persistence sits behind per-resource repository traits (`storage`).

pub mod errors;
pub mod input;
pub mod policy;
pub mod auth;
pub mod truck;
pub mod parcel;
pub mod toll;
pub mod fleet;
pub mod storage;
#[cfg(test)]
pub mod test_support;

use auth::{AuthConfig, AuthService};
use parcel::ParcelService;
use storage::Repositories;
use toll::TollService;
use truck::TruckService;

/// All services over one set of repositories.
#[derive(Clone)]
pub struct Services {
    pub auth: AuthService,
    pub trucks: TruckService,
    pub parcels: ParcelService,
    pub tolls: TollService,
}

impl Services {
    pub fn new(repos: Repositories, auth: AuthConfig) -> Self {
        Self {
            auth: AuthService::new(repos.users, auth),
            trucks: TruckService::new(repos.trucks.clone(), repos.parcels.clone()),
            parcels: ParcelService::new(repos.parcels),
            tolls: TollService::new(repos.tolls, repos.trucks),
        }
    }
}
