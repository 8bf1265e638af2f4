pub mod event_service;
pub mod state;

pub use event_service::*;
pub use state::*;
