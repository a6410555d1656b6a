//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - Account storage and refresh token tracking
//! - [`PgSessionRepository`] - Session lifecycle
//! - [`PgUrlRepository`] - Short URL storage with quota-guarded inserts

pub mod pg_session_repository;
pub mod pg_url_repository;
pub mod pg_user_repository;

pub use pg_session_repository::PgSessionRepository;
pub use pg_url_repository::PgUrlRepository;
pub use pg_user_repository::PgUserRepository;
