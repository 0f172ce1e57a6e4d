//! Subject ID Value Object
//!
//! トークンの `sub` クレームに載せる主体の識別子。
//! 発行時に一度だけ種類を決め、以降は単一の具体型として扱う。

use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token subject
///
/// Serialized untagged: a UUID-shaped string reads back as `Uuid`, anything
/// else as `Opaque`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(untagged)]
pub enum SubjectId {
    #[display("{_0}")]
    Uuid(Uuid),
    #[display("{_0}")]
    Opaque(String),
}

impl SubjectId {
    pub fn as_uuid(&self) -> Option<&Uuid> {
        match self {
            SubjectId::Uuid(uuid) => Some(uuid),
            SubjectId::Opaque(_) => None,
        }
    }
}

impl From<Uuid> for SubjectId {
    fn from(uuid: Uuid) -> Self {
        SubjectId::Uuid(uuid)
    }
}

impl<T> From<kernel::id::Id<T>> for SubjectId {
    fn from(id: kernel::id::Id<T>) -> Self {
        SubjectId::Uuid(id.into_uuid())
    }
}

impl From<String> for SubjectId {
    fn from(raw: String) -> Self {
        match Uuid::parse_str(&raw) {
            Ok(uuid) => SubjectId::Uuid(uuid),
            Err(_) => SubjectId::Opaque(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_roundtrip() {
        let uuid = Uuid::new_v4();
        let json = serde_json::to_string(&SubjectId::Uuid(uuid)).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
        assert_eq!(
            serde_json::from_str::<SubjectId>(&json).unwrap(),
            SubjectId::Uuid(uuid)
        );

        let opaque: SubjectId = serde_json::from_str("\"5f2b9c1e0a\"").unwrap();
        assert_eq!(opaque, SubjectId::Opaque("5f2b9c1e0a".to_string()));
    }

    #[test]
    fn test_from_string_prefers_uuid() {
        let uuid = Uuid::new_v4();
        assert_eq!(SubjectId::from(uuid.to_string()), SubjectId::Uuid(uuid));
        assert_eq!(
            SubjectId::from("legacy-42".to_string()).to_string(),
            "legacy-42"
        );
    }
}
