//! Business logic services for the application layer.

pub mod account_service;
pub mod token_service;
pub mod url_service;

pub use account_service::{AccountService, AuthSuccess};
pub use token_service::{TokenService, TokenSettings};
pub use url_service::{CreatedUrl, UrlService, UrlStats};
