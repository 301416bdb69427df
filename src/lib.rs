pub mod background;
pub mod commands;
pub mod config;
pub mod data_provider;
pub mod error;
pub mod fixtures;
pub mod focus;
pub mod grid;
pub mod keys;
pub mod leagues;
pub mod plays;
pub mod tables;
pub mod types;
