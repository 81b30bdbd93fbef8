pub mod config;
pub mod people;
