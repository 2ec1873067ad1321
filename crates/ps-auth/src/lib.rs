//! # ps-auth
//!
//! Service-account authentication for the Android Publisher API.
//!
//! Reads a Google service-account JSON key, signs an RS256 JWT assertion and
//! exchanges it for a short-lived OAuth2 access token (JWT-bearer grant).

pub mod error;
pub mod key;
pub mod token;

pub use error::AuthError;
pub use key::ServiceAccountKey;
pub use token::{ANDROID_PUBLISHER_SCOPE, AccessToken, TokenProvider};
