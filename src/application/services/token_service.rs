//! Signed token issuance and verification bound to live server-side state.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::domain::repositories::{SessionRepository, UserRepository};
use crate::domain::token::{TokenKind, TokenPair, TokenPayload};
use crate::domain::entities::User;
use crate::error::AppError;

/// Signing secrets and lifetimes for the two token kinds.
#[derive(Clone)]
pub struct TokenSettings {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl_secs: i64,
    pub refresh_ttl_secs: i64,
}

/// Service minting and verifying HS256 token pairs.
///
/// Access and refresh tokens are signed with distinct secrets and carry
/// independent lifetimes. Verification never trusts the signature alone:
/// the referenced user and session must still exist and the embedded
/// `token_version` must match the user's current one, so bumping the
/// version or deleting the session revokes outstanding tokens at once.
pub struct TokenService {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
}

impl TokenService {
    pub fn new(
        settings: TokenSettings,
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(settings.access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(settings.access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(settings.refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(settings.refresh_secret.as_bytes()),
            access_ttl_secs: settings.access_ttl_secs,
            refresh_ttl_secs: settings.refresh_ttl_secs,
            users,
            sessions,
        }
    }

    /// Mints an access/refresh pair bound to `session_id`.
    ///
    /// Side effect: the SHA-256 digest of the refresh token is stored on the
    /// user row together with a fresh `last_login` stamp. The store, not
    /// just the signature, decides which refresh token is the current one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if signing or the store update fails.
    pub async fn issue(&self, user: &User, session_id: &str) -> Result<TokenPair, AppError> {
        let now = chrono::Utc::now().timestamp();

        let access_token = self.sign(
            TokenPayload {
                sub: user.id,
                sid: session_id.to_string(),
                ver: user.token_version,
                kind: TokenKind::Access,
                iat: now,
                exp: now + self.access_ttl_secs,
            },
            &self.access_encoding,
        )?;

        let refresh_token = self.sign(
            TokenPayload {
                sub: user.id,
                sid: session_id.to_string(),
                ver: user.token_version,
                kind: TokenKind::Refresh,
                iat: now,
                exp: now + self.refresh_ttl_secs,
            },
            &self.refresh_encoding,
        )?;

        self.users
            .store_refresh_token(user.id, &hash_token(&refresh_token))
            .await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Verifies a token of the expected kind against signature, expiry, and
    /// live state.
    ///
    /// Every failure collapses to `None`: callers cannot distinguish an
    /// expired token from a tampered or revoked one. On success the bound
    /// session's `last_activity` is refreshed (best effort).
    pub async fn verify(&self, token: &str, expected: TokenKind) -> Option<TokenPayload> {
        let decoding = match expected {
            TokenKind::Access => &self.access_decoding,
            TokenKind::Refresh => &self.refresh_decoding,
        };

        let payload = decode::<TokenPayload>(token, decoding, &Validation::default())
            .ok()?
            .claims;

        if payload.kind != expected {
            return None;
        }

        let user = self.users.find_by_id(payload.sub).await.ok().flatten()?;
        let _session = self.sessions.find_by_id(&payload.sid).await.ok().flatten()?;

        if user.token_version != payload.ver {
            return None;
        }

        // Every successful verification extends session liveness.
        if let Err(e) = self.sessions.touch(&payload.sid).await {
            tracing::warn!("Failed to touch session {}: {}", payload.sid, e);
        }

        Some(payload)
    }

    fn sign(&self, payload: TokenPayload, key: &EncodingKey) -> Result<String, AppError> {
        encode(&Header::default(), &payload, key).map_err(|e| {
            AppError::internal("Failed to sign token", serde_json::json!({ "source": e.to_string() }))
        })
    }
}

/// SHA-256 hex digest used for refresh tokens at rest, so a database leak
/// does not expose usable tokens.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
