//! MCP connection tokens and links.
//!
//! A connection link lets an end user submit credentials for an MCP server
//! without an account. The token is an HS256 JWT signed with a key derived
//! from the shared credentials encryption key:
//!
//! ```text
//! signing_key = SHA-256("mcp-connection-jwt:" + credentials_encryption_key)
//! ```
//!
//! Tokens are valid for one hour from issue.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::validate_base_url;
use crate::error::{SploxError, SploxResult};

/// `iss` claim of every connection token.
pub const CONNECTION_ISSUER: &str = "splox-mcp-connection";

/// Token lifetime in seconds.
pub const CONNECTION_TOKEN_TTL_SECS: i64 = 60 * 60;

const SIGNING_KEY_PREFIX: &str = "mcp-connection-jwt:";

/// Claims carried by a connection token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionClaims {
    pub mcp_server_id: String,
    pub owner_user_id: String,
    pub end_user_id: String,
    pub iss: String,
    /// Issued at, unix seconds
    pub iat: i64,
    /// Expires at, unix seconds (`iat + 3600`)
    pub exp: i64,
}

impl ConnectionClaims {
    fn issue(
        mcp_server_id: &str,
        owner_user_id: &str,
        end_user_id: &str,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let iat = issued_at.timestamp();
        Self {
            mcp_server_id: mcp_server_id.to_string(),
            owner_user_id: owner_user_id.to_string(),
            end_user_id: end_user_id.to_string(),
            iss: CONNECTION_ISSUER.to_string(),
            iat,
            exp: iat + CONNECTION_TOKEN_TTL_SECS,
        }
    }

    /// True while `at` is before the expiry.
    pub fn is_valid_at(&self, at: DateTime<Utc>) -> bool {
        at.timestamp() < self.exp
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

fn signing_key(credentials_encryption_key: &str) -> SploxResult<Vec<u8>> {
    if credentials_encryption_key.is_empty() {
        return Err(SploxError::config("credentials encryption key is empty"));
    }
    let mut hasher = Sha256::new();
    hasher.update(SIGNING_KEY_PREFIX.as_bytes());
    hasher.update(credentials_encryption_key.as_bytes());
    Ok(hasher.finalize().to_vec())
}

/// Sign a connection token issued now.
pub fn generate_connection_token(
    mcp_server_id: &str,
    owner_user_id: &str,
    end_user_id: &str,
    credentials_encryption_key: &str,
) -> SploxResult<String> {
    generate_connection_token_at(
        mcp_server_id,
        owner_user_id,
        end_user_id,
        credentials_encryption_key,
        Utc::now(),
    )
}

/// Sign a connection token issued at `issued_at`. Same inputs, same token.
pub fn generate_connection_token_at(
    mcp_server_id: &str,
    owner_user_id: &str,
    end_user_id: &str,
    credentials_encryption_key: &str,
    issued_at: DateTime<Utc>,
) -> SploxResult<String> {
    let key = signing_key(credentials_encryption_key)?;
    let claims = ConnectionClaims::issue(mcp_server_id, owner_user_id, end_user_id, issued_at);
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(&key),
    )
    .map_err(|e| SploxError::config(format!("failed to sign connection token: {}", e)))
}

/// `{base_url}/tools/connect?token={token}` for a token issued now.
///
/// `base_url` is the application URL (e.g. `https://app.splox.io`), not the
/// API root.
pub fn generate_connection_link(
    base_url: &str,
    mcp_server_id: &str,
    owner_user_id: &str,
    end_user_id: &str,
    credentials_encryption_key: &str,
) -> SploxResult<String> {
    validate_base_url(base_url)?;
    let token = generate_connection_token(
        mcp_server_id,
        owner_user_id,
        end_user_id,
        credentials_encryption_key,
    )?;
    Ok(connection_link(base_url, &token))
}

pub(crate) fn connection_link(base_url: &str, token: &str) -> String {
    format!(
        "{}/tools/connect?token={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(token)
    )
}

/// Verify signature and issuer, returning the claims.
///
/// Expiry is not enforced here; check it with [`ConnectionClaims::is_valid_at`].
pub fn decode_connection_token(
    token: &str,
    credentials_encryption_key: &str,
) -> SploxResult<ConnectionClaims> {
    let key = signing_key(credentials_encryption_key)?;

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[CONNECTION_ISSUER]);
    validation.set_required_spec_claims(&["exp", "iss"]);
    validation.validate_exp = false;
    validation.leeway = 0;

    jsonwebtoken::decode::<ConnectionClaims>(token, &DecodingKey::from_secret(&key), &validation)
        .map(|data| data.claims)
        .map_err(|e| SploxError::Decode {
            message: format!("invalid connection token: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use chrono::{Duration, TimeZone};
    use serde_json::Value;

    const KEY: &str = "test-encryption-key";

    fn issued() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn token() -> String {
        generate_connection_token_at("mcp-1", "owner-1", "end-user-1", KEY, issued()).unwrap()
    }

    fn segment_json(token: &str, index: usize) -> Value {
        let part = token.split('.').nth(index).unwrap();
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(part).unwrap()).unwrap()
    }

    #[test]
    fn test_token_shape_and_claims() {
        let token = token();
        assert_eq!(token.split('.').count(), 3);
        assert!(!token.contains('='));

        let header = segment_json(&token, 0);
        assert_eq!(header["alg"], "HS256");
        assert_eq!(header["typ"], "JWT");

        let payload = segment_json(&token, 1);
        assert_eq!(payload["mcp_server_id"], "mcp-1");
        assert_eq!(payload["owner_user_id"], "owner-1");
        assert_eq!(payload["end_user_id"], "end-user-1");
        assert_eq!(payload["iss"], CONNECTION_ISSUER);
        assert_eq!(payload["iat"], issued().timestamp());
        assert_eq!(payload["exp"], issued().timestamp() + 3600);
    }

    #[test]
    fn test_token_is_deterministic() {
        assert_eq!(token(), token());
    }

    #[test]
    fn test_signature_uses_derived_key() {
        let token = token();
        let derived = Sha256::digest(format!("mcp-connection-jwt:{}", KEY)).to_vec();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        let data = jsonwebtoken::decode::<ConnectionClaims>(
            &token,
            &DecodingKey::from_secret(&derived),
            &validation,
        )
        .unwrap();
        assert_eq!(data.claims.end_user_id, "end-user-1");

        // The raw key is not the signing key.
        assert!(jsonwebtoken::decode::<ConnectionClaims>(
            &token,
            &DecodingKey::from_secret(KEY.as_bytes()),
            &validation,
        )
        .is_err());
    }

    #[test]
    fn test_any_input_change_changes_signature() {
        let signature = |t: String| t.rsplit('.').next().unwrap().to_string();
        let base = signature(token());
        let variants = [
            generate_connection_token_at("mcp-2", "owner-1", "end-user-1", KEY, issued()),
            generate_connection_token_at("mcp-1", "owner-2", "end-user-1", KEY, issued()),
            generate_connection_token_at("mcp-1", "owner-1", "end-user-2", KEY, issued()),
            generate_connection_token_at("mcp-1", "owner-1", "end-user-1", "other-key", issued()),
            generate_connection_token_at(
                "mcp-1",
                "owner-1",
                "end-user-1",
                KEY,
                issued() + Duration::seconds(1),
            ),
        ];
        for variant in variants {
            assert_ne!(signature(variant.unwrap()), base);
        }
    }

    #[test]
    fn test_expiry_window() {
        let claims = decode_connection_token(&token(), KEY).unwrap();
        assert!(claims.is_valid_at(issued()));
        assert!(claims.is_valid_at(issued() + Duration::seconds(3599)));
        assert!(!claims.is_valid_at(issued() + Duration::seconds(3600)));
        assert!(!claims.is_valid_at(issued() + Duration::seconds(3601)));
        assert_eq!(claims.expires_at(), Some(issued() + Duration::hours(1)));

        // A standard verifier enforcing `exp` with no leeway agrees on the lifetime.
        let key = signing_key(KEY).unwrap();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[CONNECTION_ISSUER]);
        validation.validate_exp = true;
        validation.leeway = 0;
        let verify = |age: i64| {
            let token = generate_connection_token_at(
                "mcp-1",
                "owner-1",
                "end-user-1",
                KEY,
                Utc::now() - Duration::seconds(age),
            )
            .unwrap();
            jsonwebtoken::decode::<ConnectionClaims>(
                &token,
                &DecodingKey::from_secret(&key),
                &validation,
            )
        };
        assert!(verify(0).is_ok());
        assert!(verify(3599).is_ok());
        let err = verify(3601).unwrap_err();
        assert!(matches!(
            err.kind(),
            jsonwebtoken::errors::ErrorKind::ExpiredSignature
        ));
    }

    #[test]
    fn test_decode_rejects_tampering() {
        let token = token();
        let parts: Vec<&str> = token.split('.').collect();

        let mut payload = segment_json(&token, 1);
        payload["end_user_id"] = Value::from("someone-else");
        let forged = format!(
            "{}.{}.{}",
            parts[0],
            URL_SAFE_NO_PAD.encode(payload.to_string()),
            parts[2]
        );
        assert!(matches!(
            decode_connection_token(&forged, KEY),
            Err(SploxError::Decode { .. })
        ));
        assert!(decode_connection_token(&token, "wrong-key").is_err());
    }

    #[test]
    fn test_decode_rejects_other_issuer() {
        let key = signing_key(KEY).unwrap();
        let mut claims = ConnectionClaims::issue("m", "o", "e", issued());
        claims.iss = "someone".to_string();
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&key),
        )
        .unwrap();
        assert!(decode_connection_token(&token, KEY).is_err());
    }

    #[test]
    fn test_empty_key_is_config_error() {
        assert!(matches!(
            generate_connection_token("m", "o", "e", ""),
            Err(SploxError::Config(_))
        ));
    }

    #[test]
    fn test_link() {
        let link = generate_connection_link("https://app.splox.io/", "m", "o", "e", KEY).unwrap();
        let token = link
            .strip_prefix("https://app.splox.io/tools/connect?token=")
            .unwrap();
        assert_eq!(decode_connection_token(token, KEY).unwrap().mcp_server_id, "m");
    }

    #[test]
    fn test_link_escapes_token() {
        assert_eq!(
            connection_link("http://localhost:3000", "a+b/c"),
            "http://localhost:3000/tools/connect?token=a%2Bb%2Fc"
        );
    }

    #[test]
    fn test_link_rejects_relative_base() {
        assert!(matches!(
            generate_connection_link("app.splox.io", "m", "o", "e", KEY),
            Err(SploxError::Config(_))
        ));
    }

    #[test]
    fn test_link_rejects_malformed_base() {
        for bad in ["https://host:99999", "http://[::1", "https://exa<mple>.com", "https://a@@b"] {
            assert!(
                matches!(
                    generate_connection_link(bad, "m", "o", "e", KEY),
                    Err(SploxError::Config(_))
                ),
                "accepted {bad:?}"
            );
        }
    }
}
