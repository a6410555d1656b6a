//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Every endpoint answers with the same
//! [`response::ApiResponse`] envelope.

pub mod auth;
pub mod health;
pub mod response;
pub mod shorten;
pub mod stats;
