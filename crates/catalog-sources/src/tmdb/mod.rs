pub mod client;
pub mod api;

pub use client::{redact_api_key, TmdbClient};
