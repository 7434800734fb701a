pub mod health;
pub mod vehicles;
