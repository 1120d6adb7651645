pub mod account;
pub mod browse;
pub mod config;
pub mod mock;
pub mod notifications;
pub mod prompts;
pub mod watchlist;
