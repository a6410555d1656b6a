//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic. Creation inputs
//! use separate `New*` structs; read-side projections (e.g. [`UserInfo`])
//! strip sensitive fields before they cross the API boundary.

pub mod session;
pub mod short_url;
pub mod user;

pub use session::{NewSession, Session, session_payload};
pub use short_url::{NewShortUrl, ShortUrl};
pub use user::{NewUser, User, UserInfo};
