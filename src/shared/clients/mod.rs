// External service clients
pub mod payment_gateway;

pub use payment_gateway::*;
