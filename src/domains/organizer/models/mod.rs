// Organizer domain models
pub mod application;

pub use application::*;
