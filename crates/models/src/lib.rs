//! Persistent records of LogiTrack: users, trucks, parcels and tolls.
//!
//! Each module holds the SeaORM entity plus the field rules that apply no
//! matter which store the record ends up in.

pub mod errors;
pub mod db;
pub mod user;
pub mod truck;
pub mod parcel;
pub mod toll;

#[cfg(test)]
mod tests;
