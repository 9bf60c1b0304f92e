pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod health;
pub mod models;
pub mod scholar;
pub mod types;
