//! Typed, method-per-endpoint surface over the authenticated client.
//!
//! Every helper here is a thin wrapper: build an [`ApiRequest`](crate::client::ApiRequest),
//! hand it to the dispatch pipeline, and decode the JSON the server returned. Domain logic
//! stays on the server.

pub mod appointments;
pub mod auth;
pub mod medicines;
pub mod records;

pub use appointments::*;
pub use auth::*;
pub use medicines::*;
pub use records::*;
