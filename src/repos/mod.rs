pub mod error;
pub mod vehicle_repo;
