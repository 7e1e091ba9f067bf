use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoachError;

/// Identifier of the person a conversation memory belongs to.
///
/// Construction is the single hard contract of the engine: an empty identifier is a
/// programming error and is rejected here instead of silently sharing one memory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Result<Self, CoachError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(CoachError::InvalidUserId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = CoachError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        UserId::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_ids() {
        assert!(matches!(UserId::new(""), Err(CoachError::InvalidUserId)));
        assert!(matches!(UserId::new("   "), Err(CoachError::InvalidUserId)));
    }

    #[test]
    fn test_trims_whitespace() {
        let id = UserId::new("  user-1 ").unwrap();
        assert_eq!(id.as_str(), "user-1");
        assert_eq!(id.to_string(), "user-1");
    }

    #[test]
    fn test_deserialize_validates() {
        let id: UserId = serde_json::from_str("\"alice\"").unwrap();
        assert_eq!(id.as_str(), "alice");
        assert!(serde_json::from_str::<UserId>("\"\"").is_err());
    }
}
