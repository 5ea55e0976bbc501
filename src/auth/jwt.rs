//! HS256 JSON Web Token signing and verification.
//!
//! Tokens are issued by the clinic's identity service with a shared secret.
//! Only the compact three-part form with `alg = "HS256"` is accepted.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Username of the authenticated caller.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Claims valid for `ttl_secs` from now.
    pub fn for_subject(sub: impl Into<String>, ttl_secs: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: sub.into(),
            iat: now,
            exp: now + ttl_secs,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Header {
    alg: String,
    #[serde(default)]
    typ: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("Invalid signature")]
    BadSignature,
    #[error("Token expired")]
    Expired,
    #[error("Signing failed: {0}")]
    Signing(String),
}

/// Verifies (and, for tooling and tests, issues) HS256 tokens.
#[derive(Clone)]
pub struct TokenVerifier {
    secret: Vec<u8>,
    leeway_secs: i64,
}

impl TokenVerifier {
    pub fn new(secret: impl Into<Vec<u8>>, leeway_secs: u64) -> Self {
        Self {
            secret: secret.into(),
            leeway_secs: i64::try_from(leeway_secs).unwrap_or(i64::MAX),
        }
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        HmacSha256::new_from_slice(&self.secret).map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Sign claims into a compact token.
    pub fn issue(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header {
            alg: ALGORITHM.to_string(),
            typ: Some("JWT".to_string()),
        };
        let header_json =
            serde_json::to_vec(&header).map_err(|e| TokenError::Signing(e.to_string()))?;
        let claims_json =
            serde_json::to_vec(claims).map_err(|e| TokenError::Signing(e.to_string()))?;

        let message = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header_json),
            URL_SAFE_NO_PAD.encode(claims_json)
        );

        let mut mac = self.mac()?;
        mac.update(message.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{message}.{signature}"))
    }

    /// Verify structure, algorithm, signature and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut parts = token.split('.');
        let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::Malformed);
        };

        let header: Header = decode_segment(header_b64)?;
        if header.alg != ALGORITHM {
            return Err(TokenError::UnsupportedAlgorithm(header.alg));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| TokenError::Malformed)?;

        let mut mac = self.mac()?;
        mac.update(header_b64.as_bytes());
        mac.update(b".");
        mac.update(claims_b64.as_bytes());
        let expected = mac.finalize().into_bytes();

        if !bool::from(expected.as_slice().ct_eq(&signature)) {
            return Err(TokenError::BadSignature);
        }

        let claims: Claims = decode_segment(claims_b64)?;
        let now = chrono::Utc::now().timestamp();
        if claims.exp.saturating_add(self.leeway_secs) < now {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

fn decode_segment<T: serde::de::DeserializeOwned>(segment: &str) -> Result<T, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier() -> TokenVerifier {
        TokenVerifier::new(b"test-secret".to_vec(), 0)
    }

    #[test]
    fn issued_token_verifies() {
        let v = verifier();
        let claims = Claims::for_subject("dr.house", 3600);
        let token = v.issue(&claims).unwrap();
        assert_eq!(token.split('.').count(), 3);
        assert_eq!(v.verify(&token).unwrap(), claims);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = verifier().issue(&Claims::for_subject("a", 60)).unwrap();
        let other = TokenVerifier::new(b"other".to_vec(), 0);
        assert_eq!(other.verify(&token), Err(TokenError::BadSignature));
    }

    #[test]
    fn tampered_claims_are_rejected() {
        let v = verifier();
        let token = v.issue(&Claims::for_subject("alice", 60)).unwrap();
        let forged_claims = URL_SAFE_NO_PAD.encode(
            serde_json::to_vec(&Claims::for_subject("mallory", 60)).unwrap(),
        );
        let parts: Vec<&str> = token.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], forged_claims, parts[2]);
        assert_eq!(v.verify(&forged), Err(TokenError::BadSignature));
    }

    #[test]
    fn expired_token_is_rejected() {
        let v = verifier();
        let token = v.issue(&Claims::for_subject("a", -120)).unwrap();
        assert_eq!(v.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn leeway_accepts_recently_expired_token() {
        let token = verifier().issue(&Claims::for_subject("a", -10)).unwrap();
        let lenient = TokenVerifier::new(b"test-secret".to_vec(), 60);
        assert!(lenient.verify(&token).is_ok());
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let v = verifier();
        for token in ["", "abc", "a.b", "a.b.c.d", "!!!.###.$$$"] {
            assert_eq!(v.verify(token), Err(TokenError::Malformed), "token: {token}");
        }
    }

    #[test]
    fn non_hs256_algorithm_is_rejected() {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let claims = URL_SAFE_NO_PAD
            .encode(serde_json::to_vec(&Claims::for_subject("a", 60)).unwrap());
        let token = format!("{header}.{claims}.");
        assert_eq!(
            verifier().verify(&token),
            Err(TokenError::UnsupportedAlgorithm("none".into()))
        );
    }
}
