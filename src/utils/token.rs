use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const MAX_TOKEN_LEN: usize = 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sid: String,
    pub uid: String,
    pub iat: DateTime<Utc>,
}

/// Signs and verifies session tokens of the form `payload.signature`, both
/// parts base64url without padding.
#[derive(Clone)]
pub struct TokenSigner {
    key: Vec<u8>,
}

impl TokenSigner {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            key: secret.as_ref().to_vec(),
        }
    }

    pub fn random() -> Self {
        let mut key = [0u8; 32];
        rand::rng().fill(&mut key);
        Self { key: key.to_vec() }
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.key).expect("HMAC accepts keys of any length")
    }

    pub fn sign(&self, claims: &SessionClaims) -> String {
        let payload = serde_json::to_vec(claims).unwrap_or_default();
        let mut mac = self.mac();
        mac.update(&payload);
        let signature = mac.finalize().into_bytes();

        format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(payload),
            URL_SAFE_NO_PAD.encode(signature)
        )
    }

    /// Returns the claims when the signature checks out; `None` otherwise.
    pub fn verify(&self, token: &str) -> Option<SessionClaims> {
        if token.len() > MAX_TOKEN_LEN {
            return None;
        }

        let (payload_part, signature_part) = token.split_once('.')?;
        let payload = URL_SAFE_NO_PAD.decode(payload_part).ok()?;
        let signature = URL_SAFE_NO_PAD.decode(signature_part).ok()?;

        let mut mac = self.mac();
        mac.update(&payload);
        mac.verify_slice(&signature).ok()?;

        serde_json::from_slice(&payload).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims() -> SessionClaims {
        SessionClaims {
            sid: "session-1".to_string(),
            uid: "cred-1".to_string(),
            iat: Utc::now(),
        }
    }

    #[test]
    fn signed_token_verifies() {
        let signer = TokenSigner::new("test-secret");
        let token = signer.sign(&claims());
        assert_eq!(signer.verify(&token).map(|c| c.sid), Some("session-1".into()));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let signer = TokenSigner::new("test-secret");
        let token = signer.sign(&claims());
        let (_, signature) = token.split_once('.').unwrap();

        let mut forged = claims();
        forged.uid = "someone-else".to_string();
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged).unwrap());

        assert!(signer.verify(&format!("{forged_payload}.{signature}")).is_none());
    }

    #[test]
    fn other_key_is_rejected() {
        let token = TokenSigner::new("one").sign(&claims());
        assert!(TokenSigner::new("two").verify(&token).is_none());
        assert!(TokenSigner::random().verify(&token).is_none());
    }

    #[test]
    fn garbage_is_rejected() {
        let signer = TokenSigner::new("test-secret");
        assert!(signer.verify("").is_none());
        assert!(signer.verify("no-dot").is_none());
        assert!(signer.verify("!!!.???").is_none());
        assert!(signer.verify(&"a".repeat(MAX_TOKEN_LEN + 1)).is_none());
    }
}
