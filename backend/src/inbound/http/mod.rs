//! HTTP inbound adapter: form actions, post pages, stylesheet and probes.

pub mod auth;
pub mod error;
pub mod feedback;
pub mod health;
pub mod session;
pub mod session_config;
pub mod state;
pub mod styles;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
