//! Signed token claims shared by issuance and verification.

use serde::{Deserialize, Serialize};

/// Discriminator marking a token as an access or refresh token.
///
/// Verification rejects a token whose kind does not match the expected use,
/// so a refresh token can never stand in for an access token or vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claims embedded in every signed token.
///
/// Derived from the user and session at issuance and reconstructed by
/// verification; never persisted as its own record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPayload {
    /// Subject -- the owning user's database id.
    pub sub: i64,
    /// The session this token is bound to.
    pub sid: String,
    /// Copy of the user's `token_version` at issuance time.
    pub ver: i32,
    /// Access or refresh discriminator.
    pub kind: TokenKind,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// An access/refresh token pair returned to the client.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}
