//! Bearer token issue and verification
//!
//! Tokens are stateless HS256 JWTs binding a caller identifier to the
//! shared secret. Nothing is persisted; only secret rotation revokes
//! outstanding tokens. Every token carries an expiry.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Claims carried in an issued token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Caller identifier the token was minted for
    pub sub: String,
    /// Issued at (seconds since epoch)
    pub iat: u64,
    /// Expiration (seconds since epoch)
    pub exp: u64,
}

/// Issues and verifies caller tokens with a shared HMAC secret
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

impl TokenSigner {
    pub fn new(secret: &[u8], ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_secs,
        }
    }

    /// Mint a token for a caller identifier.
    pub fn issue(&self, identifier: &str) -> ServerResult<String> {
        if identifier.is_empty() {
            return Err(ServerError::BadRequest(
                "identifier missing or empty".into(),
            ));
        }

        let now = Utc::now().timestamp() as u64;
        let claims = Claims {
            sub: identifier.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| ServerError::Internal(format!("token signing failed: {e}")))
    }

    /// Verify a token and return the identifier it was minted for.
    ///
    /// Malformed, tampered and expired tokens all fail here.
    pub fn verify(&self, token: &str) -> ServerResult<String> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map_err(|e| ServerError::Unauthorized(format!("invalid token: {e}")))?;
        Ok(data.claims.sub)
    }
}

/// Verify the identifier/token pair handlers receive in request bodies.
///
/// The verified subject must equal the asserted identifier; a valid
/// token for a different caller is still a denial.
pub fn authenticate(
    signer: &TokenSigner,
    identifier: Option<&str>,
    token: Option<&str>,
) -> ServerResult<String> {
    let identifier = identifier
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ServerError::BadRequest("identifier missing or empty".into()))?;
    let token = token
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ServerError::BadRequest("token missing or empty".into()))?;

    let subject = signer.verify(token)?;
    if subject != identifier {
        return Err(ServerError::Unauthorized(
            "token subject does not match identifier".into(),
        ));
    }

    Ok(subject)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new(b"test-secret", 3600)
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let signer = signer();
        let token = signer.issue("u1").unwrap();
        assert_eq!(signer.verify(&token).unwrap(), "u1");
    }

    #[test]
    fn test_issue_rejects_empty_identifier() {
        let result = signer().issue("");
        assert!(matches!(result, Err(ServerError::BadRequest(_))));
    }

    #[test]
    fn test_wrong_secret_fails() {
        let token = signer().issue("u1").unwrap();
        let other = TokenSigner::new(b"other-secret", 3600);
        assert!(matches!(
            other.verify(&token),
            Err(ServerError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_tampered_token_fails() {
        let signer = signer();
        let mut token = signer.issue("u1").unwrap();
        token.pop();
        token.push('A');
        assert!(matches!(
            signer.verify(&token),
            Err(ServerError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_expired_token_fails() {
        let signer = signer();

        // Forge a token whose exp is well past the validation leeway
        let now = Utc::now().timestamp() as u64;
        let claims = Claims {
            sub: "u1".into(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(matches!(
            signer.verify(&token),
            Err(ServerError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_authenticate_binds_subject_to_identifier() {
        let signer = signer();
        let token = signer.issue("u1").unwrap();

        assert_eq!(
            authenticate(&signer, Some("u1"), Some(&token)).unwrap(),
            "u1"
        );
        assert!(matches!(
            authenticate(&signer, Some("u2"), Some(&token)),
            Err(ServerError::Unauthorized(_))
        ));
        assert!(matches!(
            authenticate(&signer, None, Some(&token)),
            Err(ServerError::BadRequest(_))
        ));
        assert!(matches!(
            authenticate(&signer, Some("u1"), None),
            Err(ServerError::BadRequest(_))
        ));
    }
}
