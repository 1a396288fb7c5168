//! Identity provider client.
//!
//! Authentication is delegated to an external identity provider. The admin
//! surface needs three things from it: token verification (uid + superadmin
//! claim), server-side user creation, and server-side user deletion. The
//! server-side calls never touch the calling staff member's own session, so
//! a superadmin can provision accounts without being logged out.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use cakestack_core::AdminUid;

use crate::config::IdentityConfig;

/// Errors from the identity provider.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The presented token is missing, expired, or malformed.
    #[error("invalid token")]
    InvalidToken,
    /// The provider rejected a user-management call.
    #[error("identity provider rejected the request: {0}")]
    Provider(String),
    /// Transport-level failure talking to the provider.
    #[error("identity provider unreachable: {0}")]
    Http(#[from] reqwest::Error),
}

/// Verified token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    pub uid: AdminUid,
    #[serde(default)]
    pub email: Option<String>,
    /// Superadmin standing is a token claim, not a store document.
    #[serde(default)]
    pub super_admin: bool,
}

/// The identity provider, reduced to the operations the console uses.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify a bearer token and return its claims.
    async fn verify(&self, token: &str) -> Result<TokenClaims, IdentityError>;

    /// Create a provider account; returns its uid.
    async fn create_user(&self, email: &str, password: &str) -> Result<AdminUid, IdentityError>;

    /// Delete a provider account.
    async fn delete_user(&self, uid: &AdminUid) -> Result<(), IdentityError>;
}

/// [`TokenVerifier`] backed by the provider's REST API.
pub struct HttpTokenVerifier {
    client: reqwest::Client,
    config: IdentityConfig,
}

impl HttpTokenVerifier {
    #[must_use]
    pub fn new(config: IdentityConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.api_url.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct VerifyRequest<'a> {
    token: &'a str,
}

#[derive(Serialize)]
struct CreateUserRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct CreateUserResponse {
    uid: AdminUid,
}

#[async_trait]
impl TokenVerifier for HttpTokenVerifier {
    async fn verify(&self, token: &str) -> Result<TokenClaims, IdentityError> {
        let response = self
            .client
            .post(self.url("v1/tokens:verify"))
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&VerifyRequest { token })
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(IdentityError::InvalidToken);
        }
        if !response.status().is_success() {
            return Err(IdentityError::Provider(response.status().to_string()));
        }
        Ok(response.json().await?)
    }

    async fn create_user(&self, email: &str, password: &str) -> Result<AdminUid, IdentityError> {
        let response = self
            .client
            .post(self.url("v1/users"))
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&CreateUserRequest { email, password })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(IdentityError::Provider(response.status().to_string()));
        }
        let body: CreateUserResponse = response.json().await?;
        Ok(body.uid)
    }

    async fn delete_user(&self, uid: &AdminUid) -> Result<(), IdentityError> {
        let response = self
            .client
            .delete(self.url(&format!("v1/users/{uid}")))
            .bearer_auth(self.config.api_key.expose_secret())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(IdentityError::Provider(response.status().to_string()));
        }
        Ok(())
    }
}

/// [`TokenVerifier`] with a fixed token table, for tests and local
/// development.
#[derive(Debug, Default)]
pub struct StaticTokenVerifier {
    tokens: std::sync::RwLock<std::collections::HashMap<String, TokenClaims>>,
    next_uid: std::sync::atomic::AtomicU64,
}

impl StaticTokenVerifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token and the claims it verifies to.
    pub fn insert(&self, token: impl Into<String>, claims: TokenClaims) {
        if let Ok(mut tokens) = self.tokens.write() {
            tokens.insert(token.into(), claims);
        }
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Result<TokenClaims, IdentityError> {
        self.tokens
            .read()
            .ok()
            .and_then(|tokens| tokens.get(token).cloned())
            .ok_or(IdentityError::InvalidToken)
    }

    async fn create_user(&self, _email: &str, _password: &str) -> Result<AdminUid, IdentityError> {
        let n = self
            .next_uid
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        Ok(AdminUid::new(format!("static-uid-{n}")))
    }

    async fn delete_user(&self, _uid: &AdminUid) -> Result<(), IdentityError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_verifier_resolves_registered_tokens() {
        let verifier = StaticTokenVerifier::new();
        verifier.insert(
            "token-1",
            TokenClaims {
                uid: AdminUid::new("uid-1"),
                email: Some("staff@example.com".to_string()),
                super_admin: false,
            },
        );

        let claims = verifier.verify("token-1").await.expect("known token");
        assert_eq!(claims.uid.as_str(), "uid-1");
        assert!(!claims.super_admin);

        let err = verifier.verify("token-2").await.expect_err("unknown token");
        assert!(matches!(err, IdentityError::InvalidToken));
    }
}
