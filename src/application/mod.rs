//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::token_service::TokenService`] - Signed token issuance and verification
//! - [`services::account_service::AccountService`] - Registration, login, logout
//! - [`services::url_service::UrlService`] - Short URL creation, resolution, stats

pub mod services;
