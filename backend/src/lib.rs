//! Feedback board backend.
//!
//! Storage adapter for an external auth library, feedback board actions and
//! theme stylesheet utilities, exposed over HTTP.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod style;

pub use doc::ApiDoc;
pub use middleware::Trace;
