//! Session token formatting, parsing, and verifier construction.

use std::{fmt, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::{auth::models::SessionUuid, domain::accounts::records::UserUuid};

/// Session token identifier prefix.
pub const SESSION_TOKEN_PREFIX: &str = "st";

/// Number of secret bytes encoded in a token.
pub const SESSION_TOKEN_SECRET_BYTES: usize = 32;

const SESSION_TOKEN_SECRET_HEX_CHARS: usize = SESSION_TOKEN_SECRET_BYTES * 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTokenVersion {
    V1,
}

impl SessionTokenVersion {
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl TryFrom<i16> for SessionTokenVersion {
    type Error = SessionTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(SessionTokenError::UnsupportedVersion),
        }
    }
}

impl FromStr for SessionTokenVersion {
    type Err = SessionTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(SessionTokenError::UnsupportedVersion),
        }
    }
}

/// Random secret half of a session token. Wiped from memory on drop.
#[derive(Clone)]
pub struct SessionSecret {
    bytes: [u8; SESSION_TOKEN_SECRET_BYTES],
}

impl SessionSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; SESSION_TOKEN_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SESSION_TOKEN_SECRET_BYTES] {
        &self.bytes
    }
}

impl fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionSecret(**redacted**)")
    }
}

impl Drop for SessionSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Clone)]
pub struct ParsedSessionToken {
    pub session_uuid: SessionUuid,
    pub version: SessionTokenVersion,
    pub secret: SessionSecret,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionTokenError {
    #[error("session token format is invalid")]
    InvalidFormat,

    #[error("session token uses an unsupported version")]
    UnsupportedVersion,

    #[error("session token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub fn generate_session_secret() -> SessionSecret {
    let mut secret = [0_u8; SESSION_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    let generated = SessionSecret::from_bytes(secret);

    secret.zeroize();

    generated
}

/// Formats a token as `st_v1_<uuid hex>.<secret hex>`.
#[must_use]
pub fn format_session_token(
    session_uuid: SessionUuid,
    version: SessionTokenVersion,
    secret: &SessionSecret,
) -> String {
    format!(
        "{SESSION_TOKEN_PREFIX}_{}_{}.{}",
        version.segment(),
        session_uuid.into_uuid().simple(),
        encode_secret_hex(secret.as_bytes())
    )
}

/// Parses a bearer token.
///
/// # Errors
///
/// Returns an error when the prefix, version, identifier or secret segment
/// is malformed.
pub fn parse_session_token(token: &str) -> Result<ParsedSessionToken, SessionTokenError> {
    let (prefix_and_id, secret_hex) = token
        .split_once('.')
        .ok_or(SessionTokenError::InvalidFormat)?;

    let mut id_parts = prefix_and_id.splitn(3, '_');

    let prefix = id_parts.next().ok_or(SessionTokenError::InvalidFormat)?;
    let version_segment = id_parts.next().ok_or(SessionTokenError::InvalidFormat)?;
    let uuid_segment = id_parts.next().ok_or(SessionTokenError::InvalidFormat)?;

    if prefix != SESSION_TOKEN_PREFIX {
        return Err(SessionTokenError::InvalidFormat);
    }

    let version = SessionTokenVersion::from_str(version_segment)?;

    let session_uuid = Uuid::try_parse(uuid_segment).map_err(|_| SessionTokenError::InvalidFormat)?;

    let secret = decode_secret_hex(secret_hex).ok_or(SessionTokenError::InvalidSecretEncoding)?;

    Ok(ParsedSessionToken {
        session_uuid: SessionUuid::from_uuid(session_uuid),
        version,
        secret: SessionSecret::from_bytes(secret),
    })
}

/// SHA-256 verifier stored in place of the token.
///
/// Input: `{session_uuid_hex}:{version_i16_decimal}:{user_uuid_hex}:{secret_hex}`
#[must_use]
pub fn session_verifier(
    session_uuid: SessionUuid,
    version: SessionTokenVersion,
    user_uuid: UserUuid,
    secret: &SessionSecret,
) -> String {
    let mut input = format!(
        "{}:{}:{}:{}",
        session_uuid.into_uuid().simple(),
        version.as_i16(),
        user_uuid.into_uuid().simple(),
        encode_secret_hex(secret.as_bytes()),
    );

    let verifier = format!("{:x}", Sha256::digest(input.as_bytes()));

    input.zeroize();

    verifier
}

/// Compares two verifiers without short-circuiting on the first mismatch.
#[must_use]
pub fn verifiers_match(expected: &str, actual: &str) -> bool {
    expected.len() == actual.len()
        && expected
            .bytes()
            .zip(actual.bytes())
            .fold(0_u8, |diff, (a, b)| diff | (a ^ b))
            == 0
}

fn encode_secret_hex(secret: &[u8; SESSION_TOKEN_SECRET_BYTES]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    let mut encoded = String::with_capacity(SESSION_TOKEN_SECRET_HEX_CHARS);

    for byte in secret {
        encoded.push(char::from(HEX[usize::from(byte >> 4)]));
        encoded.push(char::from(HEX[usize::from(byte & 0x0f)]));
    }

    encoded
}

fn decode_secret_hex(secret_hex: &str) -> Option<[u8; SESSION_TOKEN_SECRET_BYTES]> {
    if secret_hex.len() != SESSION_TOKEN_SECRET_HEX_CHARS {
        return None;
    }

    let mut secret = [0_u8; SESSION_TOKEN_SECRET_BYTES];

    for (byte, pair) in secret.iter_mut().zip(secret_hex.as_bytes().chunks_exact(2)) {
        let hi = decode_hex_nibble(pair[0])?;
        let lo = decode_hex_nibble(pair[1])?;

        *byte = (hi << 4) | lo;
    }

    Some(secret)
}

fn decode_hex_nibble(value: u8) -> Option<u8> {
    match value {
        b'0'..=b'9' => Some(value - b'0'),
        b'a'..=b'f' => Some(value - b'a' + 10),
        b'A'..=b'F' => Some(value - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn nil_session() -> SessionUuid {
        SessionUuid::from_uuid(Uuid::nil())
    }

    #[test]
    fn formatted_token_parses_back() -> TestResult {
        let secret = SessionSecret::from_bytes([0xAB; SESSION_TOKEN_SECRET_BYTES]);
        let token = format_session_token(nil_session(), SessionTokenVersion::V1, &secret);

        assert!(token.starts_with("st_v1_00000000000000000000000000000000."));

        let parsed = parse_session_token(&token)?;

        assert_eq!(parsed.session_uuid, nil_session());
        assert_eq!(parsed.version, SessionTokenVersion::V1);
        assert_eq!(parsed.secret.as_bytes(), secret.as_bytes());

        Ok(())
    }

    #[test]
    fn parse_rejects_invalid_prefix() {
        let result = parse_session_token(&format!(
            "lt_v1_{}.{}",
            Uuid::nil().simple(),
            "ab".repeat(SESSION_TOKEN_SECRET_BYTES)
        ));

        assert_eq!(result.err(), Some(SessionTokenError::InvalidFormat));
    }

    #[test]
    fn parse_rejects_unknown_version() {
        let result = parse_session_token(&format!(
            "st_v9_{}.{}",
            Uuid::nil().simple(),
            "ab".repeat(SESSION_TOKEN_SECRET_BYTES)
        ));

        assert_eq!(result.err(), Some(SessionTokenError::UnsupportedVersion));
    }

    #[test]
    fn parse_rejects_bad_secret() {
        let short = format!("st_v1_{}.abcd", Uuid::nil().simple());
        let non_hex = format!(
            "st_v1_{}.{}",
            Uuid::nil().simple(),
            "zz".repeat(SESSION_TOKEN_SECRET_BYTES)
        );

        assert_eq!(
            parse_session_token(&short).err(),
            Some(SessionTokenError::InvalidSecretEncoding)
        );
        assert_eq!(
            parse_session_token(&non_hex).err(),
            Some(SessionTokenError::InvalidSecretEncoding)
        );
    }

    #[test]
    fn parse_rejects_missing_separator() {
        assert_eq!(
            parse_session_token("st_v1_nothing").err(),
            Some(SessionTokenError::InvalidFormat)
        );
    }

    #[test]
    fn verifier_binds_user_and_secret() {
        let user = UserUuid::new();
        let secret = SessionSecret::from_bytes([0xCD; SESSION_TOKEN_SECRET_BYTES]);
        let other_secret = SessionSecret::from_bytes([0xCE; SESSION_TOKEN_SECRET_BYTES]);

        let verifier = session_verifier(nil_session(), SessionTokenVersion::V1, user, &secret);

        assert_eq!(verifier.len(), 64);
        assert_eq!(
            verifier,
            session_verifier(nil_session(), SessionTokenVersion::V1, user, &secret)
        );
        assert_ne!(
            verifier,
            session_verifier(nil_session(), SessionTokenVersion::V1, UserUuid::new(), &secret)
        );
        assert_ne!(
            verifier,
            session_verifier(nil_session(), SessionTokenVersion::V1, user, &other_secret)
        );
    }

    #[test]
    fn verifiers_match_requires_equal_strings() {
        assert!(verifiers_match("abc", "abc"));
        assert!(!verifiers_match("abc", "abd"));
        assert!(!verifiers_match("abc", "abcd"));
    }

    #[test]
    fn generated_secrets_differ() {
        let a = generate_session_secret();
        let b = generate_session_secret();

        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn secret_debug_is_redacted() {
        let secret = SessionSecret::from_bytes([0x11; SESSION_TOKEN_SECRET_BYTES]);

        assert_eq!(format!("{secret:?}"), "SessionSecret(**redacted**)");
    }
}
