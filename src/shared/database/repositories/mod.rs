// Repositories: persistence access per domain
pub mod auth;
pub mod event;
pub mod order;
pub mod organizer;
pub mod wallet;

pub use auth::*;
pub use event::*;
pub use order::*;
pub use organizer::*;
pub use wallet::*;
