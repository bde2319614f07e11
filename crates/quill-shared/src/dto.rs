//! Data Transfer Objects - request/response types for the admin API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A content block on the wire. A missing id marks a block the store
/// has not assigned an identity to yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockDto {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub kind: String,
    #[serde(default)]
    pub content: String,
    pub order: i32,
}

/// A post document on the wire, blocks included. A missing id marks a
/// document that has never been saved; sending one back creates a new
/// post instead of updating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDto {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub excerpt: String,
    pub status: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub published_at: Option<NaiveDate>,
    #[serde(default)]
    pub updated_at: Option<NaiveDate>,
    #[serde(default)]
    pub blocks: Vec<BlockDto>,
}
