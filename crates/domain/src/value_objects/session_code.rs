//! Six-character join codes shown on the landing screen

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Number of characters in a join code
pub const SESSION_CODE_LEN: usize = 6;

/// Characters a generated code is drawn from
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A join code: exactly six upper-case ASCII alphanumerics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionCode(String);

impl SessionCode {
    /// Normalise raw keyboard input into at most six upper-case alphanumerics.
    ///
    /// Anything else (spaces, dashes, emoji) is dropped rather than rejected so
    /// a pasted `abc-123` still lands as `ABC123`.
    pub fn normalize_partial(raw: &str) -> String {
        raw.chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_uppercase())
            .take(SESSION_CODE_LEN)
            .collect()
    }

    /// Parse a complete code.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` unless the normalised input is exactly
    /// six characters long.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let normalized: String = raw
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_uppercase())
            .collect();
        if normalized.len() != SESSION_CODE_LEN {
            return Err(DomainError::validation(format!(
                "Session code must be {} letters or digits",
                SESSION_CODE_LEN
            )));
        }
        Ok(Self(normalized))
    }

    /// Build a code from an injected index picker.
    ///
    /// `pick(n)` must return a value in `0..n`; out-of-range values wrap.
    pub fn generate(mut pick: impl FnMut(usize) -> usize) -> Self {
        let code = (0..SESSION_CODE_LEN)
            .map(|_| ALPHABET[pick(ALPHABET.len()) % ALPHABET.len()] as char)
            .collect();
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for SessionCode {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<SessionCode> for String {
    fn from(code: SessionCode) -> String {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_uppercases() {
        let code = SessionCode::parse("abc123").unwrap();
        assert_eq!(code.as_str(), "ABC123");
    }

    #[test]
    fn parse_rejects_short_codes() {
        let err = SessionCode::parse("ABC12").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn parse_rejects_long_codes() {
        assert!(SessionCode::parse("ABC1234").is_err());
    }

    #[test]
    fn normalize_partial_strips_and_truncates() {
        assert_eq!(SessionCode::normalize_partial("ab-c 1"), "ABC1");
        assert_eq!(SessionCode::normalize_partial("abcdefgh"), "ABCDEF");
        assert_eq!(SessionCode::normalize_partial("!!"), "");
    }

    #[test]
    fn generate_uses_picker() {
        let mut next = 0;
        let code = SessionCode::generate(|n| {
            next += 1;
            (next - 1) % n
        });
        assert_eq!(code.as_str(), "ABCDEF");
    }

    #[test]
    fn generate_wraps_out_of_range_picks() {
        let code = SessionCode::generate(|n| n + 26);
        assert_eq!(code.as_str(), "000000");
        assert!(SessionCode::parse(code.as_str()).is_ok());
    }
}
