pub mod profiles;
pub mod root;
pub mod tags;
pub mod uploads;
