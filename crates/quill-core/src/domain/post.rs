use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::block::ContentBlock;
use super::id::RecordId;

/// Author string stamped on every document; presentation-only and not
/// independently editable through the store.
pub const DEFAULT_AUTHOR: &str = "Admin";

/// Publication status of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
    Scheduled,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Scheduled => "scheduled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(Self::Draft),
            "published" => Some(Self::Published),
            "scheduled" => Some(Self::Scheduled),
            _ => None,
        }
    }
}

/// A post plus its ordered sequence of content blocks.
///
/// `blocks` is kept sorted ascending by `order`; ids play no role in
/// sequencing. `published_at` is set the first time the status becomes
/// `published` and preserved afterwards; `updated_at` is stamped on
/// every successful save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDocument {
    pub id: RecordId,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub status: PostStatus,
    pub author: String,
    pub published_at: Option<NaiveDate>,
    pub updated_at: NaiveDate,
    pub blocks: Vec<ContentBlock>,
}

impl PostDocument {
    /// A fresh local draft, not yet known to the store.
    pub fn new_draft() -> Self {
        Self {
            id: RecordId::draft(),
            title: String::new(),
            slug: String::new(),
            excerpt: String::new(),
            status: PostStatus::Draft,
            author: DEFAULT_AUTHOR.to_string(),
            published_at: None,
            updated_at: Utc::now().date_naive(),
            blocks: Vec::new(),
        }
    }

    /// Re-sort blocks ascending by rank. Stable, so ties keep their
    /// current relative order (which is itself unspecified).
    pub fn sort_blocks(&mut self) {
        self.blocks.sort_by_key(|b| b.order);
    }
}
