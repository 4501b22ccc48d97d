//! Service-account authentication for the Google Sheets API.
//!
//! Signs a JWT with the service account's private key and exchanges it at
//! the token endpoint for a short-lived access token.

use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use super::TokenCache;

/// OAuth scopes requested for sheet access.
pub const SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/drive",
];

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Errors from loading credentials or fetching tokens.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Failed to read credentials file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse credentials file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid private key or JWT: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Token request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Token endpoint returned {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// The fields of a service-account JSON key that matter here.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_owned()
}

impl ServiceAccountKey {
    /// Loads a key from a service-account JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, AuthError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

/// Hands out access tokens for a service account, refreshing as needed.
pub struct SheetsAuth {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    http: Client,
    cache: TokenCache,
}

impl SheetsAuth {
    /// Creates an authenticator for the given key.
    ///
    /// # Errors
    ///
    /// Returns an error if the private key is not a valid RSA PEM.
    pub fn new(key: ServiceAccountKey, http: Client) -> Result<Self, AuthError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
        info!("Using service account {}", key.client_email);

        Ok(Self {
            key,
            encoding_key,
            http,
            cache: TokenCache::new(),
        })
    }

    /// Returns a valid access token, fetching a new one when the cached
    /// token is missing or about to expire.
    ///
    /// # Errors
    ///
    /// Returns an error if signing or the token exchange fails.
    pub async fn access_token(&self) -> Result<String, AuthError> {
        if let Some(token) = self.cache.get().await {
            return Ok(token);
        }

        debug!("Requesting new access token from {}", self.key.token_uri);
        let assertion = self.sign_assertion()?;

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = response.json().await?;
        self.cache
            .store(token.access_token.clone(), Duration::from_secs(token.expires_in))
            .await;
        debug!("Access token valid for {}s", token.expires_in);

        Ok(token.access_token)
    }

    /// Forgets the cached token (e.g. after a 401).
    pub async fn invalidate(&self) {
        self.cache.invalidate().await;
    }

    fn sign_assertion(&self) -> Result<String, AuthError> {
        let iat = Utc::now().timestamp();
        let claims = Claims {
            iss: &self.key.client_email,
            scope: SCOPES.join(" "),
            aud: &self.key.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };
        Ok(encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)?)
    }
}

impl std::fmt::Debug for SheetsAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsAuth")
            .field("client_email", &self.key.client_email)
            .finish_non_exhaustive()
    }
}
