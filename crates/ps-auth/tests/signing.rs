//! Signs a real assertion with a throwaway RSA key and verifies it with the
//! matching public key.

use std::path::Path;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use ps_auth::token::AssertionClaims;
use ps_auth::{ANDROID_PUBLISHER_SCOPE, ServiceAccountKey, TokenProvider};

const PRIVATE_KEY: &str = include_str!("fixtures/test_key.pem");
const PUBLIC_KEY: &str = include_str!("fixtures/test_key.pub.pem");

fn write_key_file(dir: &Path) -> std::path::PathBuf {
    let json = serde_json::json!({
        "type": "service_account",
        "project_id": "pspublisher-test",
        "private_key_id": "test-kid",
        "private_key": PRIVATE_KEY,
        "client_email": "ci@pspublisher-test.iam.gserviceaccount.com",
        "token_uri": "https://oauth2.googleapis.com/token"
    });
    let path = dir.join("service-account.json");
    std::fs::write(&path, json.to_string()).expect("write key file");
    path
}

#[test]
fn signed_assertion_verifies_with_public_key() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let key = ServiceAccountKey::from_file(&write_key_file(tmp.path())).expect("key parses");
    let provider = TokenProvider::new(key, reqwest::Client::new(), None);

    let jwt = provider.sign_assertion(Utc::now()).expect("assertion signs");

    let header = jsonwebtoken::decode_header(&jwt).expect("header decodes");
    assert_eq!(header.alg, Algorithm::RS256);
    assert_eq!(header.kid.as_deref(), Some("test-kid"));

    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&["https://oauth2.googleapis.com/token"]);
    let decoded = jsonwebtoken::decode::<AssertionClaims>(
        &jwt,
        &DecodingKey::from_rsa_pem(PUBLIC_KEY.as_bytes()).expect("public key parses"),
        &validation,
    )
    .expect("signature verifies");

    assert_eq!(
        decoded.claims.iss,
        "ci@pspublisher-test.iam.gserviceaccount.com"
    );
    assert_eq!(decoded.claims.scope, ANDROID_PUBLISHER_SCOPE);
    assert_eq!(decoded.claims.exp - decoded.claims.iat, 3600);
}
