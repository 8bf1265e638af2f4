// Shared errors
pub mod auth_error;
pub mod event_error;
pub mod order_error;
pub mod organizer_error;
pub mod wallet_error;

pub use auth_error::*;
pub use event_error::*;
pub use order_error::*;
pub use organizer_error::*;
pub use wallet_error::*;
