// Wallet domain models
pub mod transaction;
pub mod wallet;

pub use transaction::*;
pub use wallet::*;
