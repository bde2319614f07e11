use serde::{Deserialize, Serialize};

use super::id::RecordId;

/// The kind of a content block. Immutable once the block is created;
/// there is no in-place kind change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    #[default]
    Text,
    Image,
    Video,
    Quote,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
            Self::Quote => "quote",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "text" => Some(Self::Text),
            "image" => Some(Self::Image),
            "video" => Some(Self::Video),
            "quote" => Some(Self::Quote),
            _ => None,
        }
    }
}

/// One ordered content unit within a post.
///
/// `content` is raw HTML for text/quote blocks and a URL for image/video
/// blocks. `order` is a zero-based rank and the only sequencing key;
/// gaps are allowed, and duplicate ranks sort with an unspecified
/// relative order between the ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub id: RecordId,
    pub kind: BlockKind,
    pub content: String,
    pub order: i32,
}

impl ContentBlock {
    /// Create a new local block appended at the given rank.
    pub fn new(kind: BlockKind, order: i32) -> Self {
        let content = match kind {
            BlockKind::Text => "<p>Start typing...</p>".to_string(),
            _ => String::new(),
        };

        Self {
            id: RecordId::draft(),
            kind,
            content,
            order,
        }
    }
}
