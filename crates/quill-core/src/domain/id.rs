use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for a post or content block.
///
/// `Draft` marks an entity created locally and not yet confirmed
/// persisted; `Stored` carries a store-assigned identity. Whether an
/// entity is persisted is a type-level question here, so a draft id can
/// never reach an update-by-id store call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", content = "id", rename_all = "lowercase")]
pub enum RecordId {
    Draft(Uuid),
    Stored(Uuid),
}

impl RecordId {
    /// A fresh placeholder id for a locally created entity.
    pub fn draft() -> Self {
        Self::Draft(Uuid::new_v4())
    }

    /// The store-assigned id, if this entity has one.
    pub fn stored(&self) -> Option<Uuid> {
        match self {
            Self::Stored(id) => Some(*id),
            Self::Draft(_) => None,
        }
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self, Self::Stored(_))
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft(id) => write!(f, "draft-{id}"),
            Self::Stored(id) => write!(f, "{id}"),
        }
    }
}
