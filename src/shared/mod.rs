// Shared infrastructure used by every domain
pub mod clients;
pub mod config;
pub mod database;
pub mod errors;
pub mod middleware;
pub mod services;
pub mod utils;
