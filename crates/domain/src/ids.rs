use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// The backend hands out string identifiers (session ids are server-generated,
/// user ids are the player's chosen name), so ids wrap a trimmed, non-empty
/// `String` rather than a UUID.
macro_rules! define_string_id {
    ($name:ident, $label:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::invalid_id(concat!($label, " cannot be empty")));
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(SessionId, "session id");
define_string_id!(UserId, "user id");

impl SessionId {
    /// Resolve the session id from the catch-all `/battle/...` route.
    ///
    /// The first non-empty segment wins; anything after it is ignored.
    pub fn from_route_segments<S: AsRef<str>>(segments: &[S]) -> Option<Self> {
        segments
            .iter()
            .map(AsRef::as_ref)
            .find(|segment| !segment.trim().is_empty())
            .and_then(|segment| Self::new(segment).ok())
    }
}

impl From<crate::value_objects::SessionCode> for SessionId {
    fn from(code: crate::value_objects::SessionCode) -> Self {
        Self(code.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ids_rejected() {
        assert!(SessionId::new("   ").is_err());
        assert!(UserId::new("").is_err());
    }

    #[test]
    fn ids_are_trimmed() {
        let id = UserId::new("  alice ").unwrap();
        assert_eq!(id.as_str(), "alice");
    }

    #[test]
    fn route_segments_take_first_non_empty() {
        let segments = vec![String::new(), "ABC123".to_string(), "extra".to_string()];
        let id = SessionId::from_route_segments(&segments).unwrap();
        assert_eq!(id.as_str(), "ABC123");
    }

    #[test]
    fn route_without_segments_has_no_session() {
        let segments: Vec<String> = Vec::new();
        assert!(SessionId::from_route_segments(&segments).is_none());
        assert!(SessionId::from_route_segments(&["", " "]).is_none());
    }

    #[test]
    fn deserialize_rejects_empty() {
        let result: Result<SessionId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
        let ok: SessionId = serde_json::from_str("\"s-1\"").unwrap();
        assert_eq!(ok.as_str(), "s-1");
    }
}
