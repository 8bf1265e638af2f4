pub mod organizer_service;
pub mod state;

pub use organizer_service::*;
pub use state::*;
