//! Bearer token claim decoding.
//!
//! The server signs a JWT whose payload segment carries the complete
//! identity claim. Decoding happens locally, with no verification and
//! no follow-up who-am-I call; signatures are the server's business.
//! Either decoding yields a complete identity or the token is rejected
//! outright. Partial claims are never accepted.

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use serde::Deserialize;

use crate::api::ApiError;

use super::session::{Identity, Role};

/// Claim set embedded in the token's payload segment. Every field is
/// required; a claim missing any of them fails the whole decode.
#[derive(Debug, Deserialize)]
struct TokenClaims {
    sub: String,
    username: String,
    email: String,
    is_alumni: bool,
}

/// Cheap syntactic check: three non-empty dot-separated base64url
/// segments. Used before persisting or restoring a token.
pub fn is_well_formed(token: &str) -> bool {
    let segments: Vec<&str> = token.split('.').collect();
    segments.len() == 3
        && segments.iter().all(|segment| {
            !segment.is_empty()
                && segment
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b'=')
        })
}

/// Decode the identity claim out of a bearer token.
///
/// The payload is the middle of three dot-separated segments, base64url
/// encoded. The alphabet substitutions are reversed, the bytes decoded
/// as UTF-8 JSON, and the claim parsed into an `Identity`.
pub fn decode_identity(token: &str) -> Result<Identity, ApiError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(ApiError::MalformedToken(
            "expected three dot-separated segments".to_string(),
        ));
    }

    let standard: String = segments[1]
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    let bytes = STANDARD_NO_PAD
        .decode(standard.trim_end_matches('='))
        .map_err(|e| ApiError::MalformedToken(format!("claim segment is not base64: {}", e)))?;

    let json = std::str::from_utf8(&bytes)
        .map_err(|e| ApiError::MalformedToken(format!("claim segment is not UTF-8: {}", e)))?;

    let claims: TokenClaims = serde_json::from_str(json)
        .map_err(|e| ApiError::MalformedToken(format!("claim segment is not a valid claim set: {}", e)))?;

    Ok(Identity {
        subject_id: claims.sub,
        username: claims.username,
        email: claims.email,
        role: if claims.is_alumni {
            Role::Alumni
        } else {
            Role::Administrator
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    fn token_with_payload(payload: &[u8]) -> String {
        format!(
            "{}.{}.{}",
            URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(payload),
            URL_SAFE_NO_PAD.encode(b"signature")
        )
    }

    fn alumni_token() -> String {
        token_with_payload(
            br#"{"sub":"17","username":"alice","email":"alice@example.edu","is_alumni":true}"#,
        )
    }

    #[test]
    fn valid_token_yields_complete_identity() {
        let identity = decode_identity(&alumni_token()).unwrap();
        assert_eq!(identity.subject_id, "17");
        assert_eq!(identity.username, "alice");
        assert_eq!(identity.email, "alice@example.edu");
        assert_eq!(identity.role, Role::Alumni);
    }

    #[test]
    fn administrator_claim_maps_to_administrator_role() {
        let token = token_with_payload(
            br#"{"sub":"3","username":"root","email":"root@example.edu","is_alumni":false}"#,
        );
        let identity = decode_identity(&token).unwrap();
        assert_eq!(identity.role, Role::Administrator);
    }

    #[test]
    fn wrong_segment_count_is_rejected() {
        let err = decode_identity("only.two").unwrap_err();
        assert!(matches!(err, ApiError::MalformedToken(_)));

        let err = decode_identity("a.b.c.d").unwrap_err();
        assert!(matches!(err, ApiError::MalformedToken(_)));
    }

    #[test]
    fn non_base64_payload_is_rejected() {
        let err = decode_identity("header.!!!.signature").unwrap_err();
        assert!(matches!(err, ApiError::MalformedToken(_)));
    }

    #[test]
    fn non_utf8_payload_is_rejected() {
        let token = token_with_payload(&[0xff, 0xfe, 0x00, 0x01]);
        let err = decode_identity(&token).unwrap_err();
        assert!(matches!(err, ApiError::MalformedToken(_)));
    }

    #[test]
    fn partial_claim_is_rejected() {
        // No email, no is_alumni. A half-decoded identity is worthless.
        let token = token_with_payload(br#"{"sub":"17","username":"alice"}"#);
        let err = decode_identity(&token).unwrap_err();
        assert!(matches!(err, ApiError::MalformedToken(_)));
    }

    #[test]
    fn garbage_json_is_rejected() {
        let token = token_with_payload(b"not json at all");
        let err = decode_identity(&token).unwrap_err();
        assert!(matches!(err, ApiError::MalformedToken(_)));
    }

    #[test]
    fn well_formedness_check() {
        assert!(is_well_formed(&alumni_token()));
        assert!(is_well_formed("aaa.bbb.ccc"));
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("aaa.bbb"));
        assert!(!is_well_formed("aaa..ccc"));
        assert!(!is_well_formed("aaa.b b.ccc"));
    }
}
