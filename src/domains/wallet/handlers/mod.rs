pub mod wallet_handler;
