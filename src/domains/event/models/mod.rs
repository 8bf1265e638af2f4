// Event domain models
pub mod event;
pub mod ticket_tier;

pub use event::*;
pub use ticket_tier::*;
