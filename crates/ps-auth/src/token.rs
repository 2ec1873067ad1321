use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::key::ServiceAccountKey;

pub const ANDROID_PUBLISHER_SCOPE: &str = "https://www.googleapis.com/auth/androidpublisher";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Claims of the self-signed assertion sent to the token endpoint.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: i64,
    #[serde(default)]
    token_type: String,
}

#[derive(Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// A bearer token for the publisher API.
#[derive(Clone)]
pub struct AccessToken {
    value: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    #[must_use]
    pub fn new(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            token_type: "Bearer".into(),
            expires_at,
        }
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.value)
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .field("value", &"<redacted>")
            .finish()
    }
}

/// Mints access tokens for one service account.
pub struct TokenProvider {
    key: ServiceAccountKey,
    http: reqwest::Client,
    token_url: String,
}

impl TokenProvider {
    /// `token_url` overrides the key's `token_uri` (useful for test servers).
    #[must_use]
    pub fn new(key: ServiceAccountKey, http: reqwest::Client, token_url: Option<&str>) -> Self {
        let token_url = token_url.map_or_else(|| key.token_uri.clone(), str::to_string);
        Self {
            key,
            http,
            token_url,
        }
    }

    #[must_use]
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Build the assertion claims for a token issued at `now`.
    #[must_use]
    pub fn claims_at(&self, now: DateTime<Utc>) -> AssertionClaims {
        let iat = now.timestamp();
        AssertionClaims {
            iss: self.key.client_email.clone(),
            scope: ANDROID_PUBLISHER_SCOPE.to_string(),
            aud: self.token_url.clone(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        }
    }

    /// Sign the RS256 assertion with the service account's private key.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Signing`] if the private key is not a valid RSA PEM.
    pub fn sign_assertion(&self, now: DateTime<Utc>) -> Result<String, AuthError> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid.clone_from(&self.key.private_key_id);
        let encoding_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())?;
        Ok(jsonwebtoken::encode(
            &header,
            &self.claims_at(now),
            &encoding_key,
        )?)
    }

    /// Exchange a freshly signed assertion for an access token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if signing fails, the request cannot be sent, or
    /// the token endpoint rejects the assertion.
    pub async fn fetch_token(&self) -> Result<AccessToken, AuthError> {
        let now = Utc::now();
        let assertion = self.sign_assertion(now)?;
        tracing::debug!(
            client_email = %self.key.client_email,
            token_url = %self.token_url,
            "requesting access token"
        );

        let resp = self
            .http
            .post(&self.token_url)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(token_request_body(&assertion))
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        parse_token_response(status.as_u16(), &body, now)
    }
}

fn token_request_body(assertion: &str) -> String {
    format!(
        "grant_type={}&assertion={}",
        urlencoding::encode(JWT_BEARER_GRANT),
        urlencoding::encode(assertion)
    )
}

fn parse_token_response(
    status: u16,
    body: &str,
    issued_at: DateTime<Utc>,
) -> Result<AccessToken, AuthError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<TokenErrorResponse>(body).map_or_else(
            |_| body.trim().to_string(),
            |e| match e.error_description {
                Some(description) => format!("{}: {description}", e.error),
                None => e.error,
            },
        );
        return Err(AuthError::TokenRejected { status, message });
    }

    let token: TokenResponse =
        serde_json::from_str(body).map_err(|e| AuthError::TokenRejected {
            status,
            message: format!("unparseable token response: {e}"),
        })?;
    let expires_at = TimeDelta::try_seconds(token.expires_in)
        .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
        .ok_or_else(|| AuthError::TokenRejected {
            status,
            message: format!("invalid expires_in: {}", token.expires_in),
        })?;
    let mut access = AccessToken::new(token.access_token, expires_at);
    if !token.token_type.is_empty() {
        access.token_type = token.token_type;
    }
    Ok(access)
}
