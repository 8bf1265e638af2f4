// Domain modules (models + services + handlers + routes per domain)
pub mod auth;
pub mod event;
pub mod order;
pub mod organizer;
pub mod wallet;
