//! Network layer - Post API calls
//!
//! The Network actor receives API commands and sends back responses.

pub mod actor;
pub mod client;
pub mod error;

pub use actor::NetworkActor;
pub use client::PostApiClient;
pub use error::ApiError;
