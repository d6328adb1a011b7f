//! Domain types shared by the store and HTTP layers.

pub mod error;
pub mod profile;
pub mod storage;
pub mod types;
