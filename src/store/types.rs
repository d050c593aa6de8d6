//! Record types and store error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A stored candy record.
///
/// Records are immutable once inserted; every read hands out a clone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candy {
    /// Store-generated identifier.
    pub id: String,
    /// Client-supplied name.
    pub name: String,
    /// Client-supplied kind.
    pub kind: String,
}

/// Creation payload accepted by `POST /candies`.
///
/// Unknown fields are ignored, so a client-supplied `id` never reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewCandy {
    pub name: String,
    /// Older clients send this field as `type`.
    #[serde(alias = "type")]
    pub kind: String,
}

impl NewCandy {
    /// Build a payload from a name and kind.
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }
}

/// Errors returned by store lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record with the given id.
    #[error("candy not found: {0}")]
    NotFound(String),

    /// Random selection on an empty store.
    #[error("store is empty")]
    Empty,
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candy_wire_shape() {
        let candy = Candy {
            id: "1".into(),
            name: "gummy".into(),
            kind: "bear".into(),
        };
        let value = serde_json::to_value(&candy).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": "1", "name": "gummy", "kind": "bear"})
        );
    }

    #[test]
    fn test_new_candy_accepts_legacy_type_field() {
        let new: NewCandy = serde_json::from_str(r#"{"name":"gummy","type":"bear"}"#).unwrap();
        assert_eq!(new, NewCandy::new("gummy", "bear"));
    }

    #[test]
    fn test_new_candy_ignores_client_id() {
        let new: NewCandy =
            serde_json::from_str(r#"{"id":"mine","name":"gummy","kind":"bear"}"#).unwrap();
        assert_eq!(new, NewCandy::new("gummy", "bear"));
    }

    #[test]
    fn test_new_candy_requires_fields() {
        assert!(serde_json::from_str::<NewCandy>(r#"{"name":"gummy"}"#).is_err());
        assert!(serde_json::from_str::<NewCandy>("[]").is_err());
    }
}
