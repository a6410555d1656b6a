//! Domain layer containing business entities and logic.
//!
//! This module implements the core domain logic following Clean Architecture principles.
//! It defines entities, repository interfaces, and the view-tracking event model
//! independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`token`] - Signed token claims shared by issuance and verification
//! - [`view_event`] - View tracking event model
//! - [`view_worker`] - Asynchronous view processing worker
//!
//! # View Processing Flow
//!
//! 1. HTTP handler resolves a short code and redirects
//! 2. [`view_event::ViewEvent`] is sent to an async channel (non-blocking)
//! 3. [`view_worker::run_view_worker`] increments the durable counter and the
//!    real-time cache counter; failures are logged and dropped

pub mod entities;
pub mod repositories;
pub mod token;
pub mod view_event;
pub mod view_worker;
