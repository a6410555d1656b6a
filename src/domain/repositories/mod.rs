//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; concrete implementations
//! live in `crate::infrastructure::persistence`. Mock implementations are
//! auto-generated via `mockall` for testing.
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - Account storage, lookup, and refresh token tracking
//! - [`SessionRepository`] - Session lifecycle (create / touch / delete)
//! - [`UrlRepository`] - Short URL storage with quota-guarded inserts

pub mod session_repository;
pub mod url_repository;
pub mod user_repository;

pub use session_repository::SessionRepository;
pub use url_repository::UrlRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use session_repository::MockSessionRepository;
#[cfg(test)]
pub use url_repository::MockUrlRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
