use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::RepoError;

/// A post row as the store returns it, section rows included.
///
/// `status`, `published_at`, `updated_at` and the per-section `id` /
/// `position` are optional on purpose: the sync layer applies defensive
/// defaults rather than trusting every historic row to be well-formed.
#[derive(Debug, Clone)]
pub struct PostRow {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub status: Option<String>,
    pub published_at: Option<NaiveDate>,
    pub updated_at: Option<DateTime<Utc>>,
    pub sections: Vec<SectionRow>,
}

/// One section row belonging to a post.
#[derive(Debug, Clone)]
pub struct SectionRow {
    pub id: Option<Uuid>,
    pub kind: String,
    pub content: String,
    pub position: Option<i32>,
}

/// Metadata payload for a post insert or update.
#[derive(Debug, Clone)]
pub struct PostPayload {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub status: String,
    pub published_at: Option<NaiveDate>,
    pub updated_at: DateTime<Utc>,
}

/// One section row to insert for a post.
#[derive(Debug, Clone)]
pub struct NewSectionRow {
    pub post_id: Uuid,
    pub kind: String,
    pub content: String,
    pub position: i32,
}

/// Relational persistence port for posts and their section rows.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// All posts with their sections, most recently updated first, each
    /// post's sections ordered by position ascending.
    async fn list_posts(&self) -> Result<Vec<PostRow>, RepoError>;

    /// Insert a post row; the store assigns the id. Returns the written
    /// row.
    async fn insert_post(&self, payload: PostPayload) -> Result<PostRow, RepoError>;

    /// Update a post row by id, returning the written row.
    async fn update_post(&self, id: Uuid, payload: PostPayload) -> Result<PostRow, RepoError>;

    /// Delete a post row; its section rows go with it (cascade).
    /// Deleting an id that is already gone is a success.
    async fn delete_post(&self, id: Uuid) -> Result<(), RepoError>;

    /// Delete every section row belonging to a post. Idempotent.
    async fn delete_sections(&self, post_id: Uuid) -> Result<(), RepoError>;

    /// Insert section rows in one batch.
    async fn insert_sections(&self, rows: Vec<NewSectionRow>) -> Result<(), RepoError>;
}
