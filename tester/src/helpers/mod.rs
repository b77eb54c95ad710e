//! Resource helpers
//!
//! One async function per suite operation. Each builds the typed request,
//! makes a single call through [`ApiClient`](crate::runtime::ApiClient),
//! checks the response shape and hands the typed result back. API errors
//! propagate unchanged.

pub mod accounts;
pub mod alerts;
pub mod auth;
pub mod catalog;
pub mod control;
pub mod data;
pub mod devices;
pub mod rules;
pub mod users;

pub use data::DeviceObservationSink;
pub use rules::RuleStatusLookup;
