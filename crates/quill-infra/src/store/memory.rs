//! In-memory post store - used as fallback when no database is configured.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::error::RepoError;
use quill_core::ports::{NewSectionRow, PostPayload, PostRow, PostStore, SectionRow};

/// In-memory store over a RwLock'd vector.
///
/// Observably equivalent to the Postgres store for everything the sync
/// layer does, which also makes it the deterministic double for tests.
/// Note: data is lost on process restart.
#[derive(Default)]
pub struct InMemoryPostStore {
    rows: RwLock<Vec<PostRow>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn apply(row: &mut PostRow, payload: PostPayload) {
        row.title = payload.title;
        row.slug = payload.slug;
        row.excerpt = payload.excerpt;
        row.status = Some(payload.status);
        row.published_at = payload.published_at;
        row.updated_at = Some(payload.updated_at);
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn list_posts(&self) -> Result<Vec<PostRow>, RepoError> {
        let rows = self.rows.read().await;
        let mut listed = rows.clone();

        listed.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        for row in &mut listed {
            row.sections.sort_by_key(|s| s.position.unwrap_or(0));
        }

        Ok(listed)
    }

    async fn insert_post(&self, payload: PostPayload) -> Result<PostRow, RepoError> {
        let mut rows = self.rows.write().await;

        let mut row = PostRow {
            id: Uuid::new_v4(),
            title: String::new(),
            slug: String::new(),
            excerpt: String::new(),
            status: None,
            published_at: None,
            updated_at: Some(Utc::now()),
            sections: Vec::new(),
        };
        Self::apply(&mut row, payload);

        rows.push(row.clone());
        Ok(row)
    }

    async fn update_post(&self, id: Uuid, payload: PostPayload) -> Result<PostRow, RepoError> {
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(RepoError::NotFound)?;

        Self::apply(row, payload);
        Ok(row.clone())
    }

    async fn delete_post(&self, id: Uuid) -> Result<(), RepoError> {
        // Sections live inside the row, so the cascade is implicit.
        let mut rows = self.rows.write().await;
        rows.retain(|r| r.id != id);
        Ok(())
    }

    async fn delete_sections(&self, post_id: Uuid) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;
        if let Some(row) = rows.iter_mut().find(|r| r.id == post_id) {
            row.sections.clear();
        }
        Ok(())
    }

    async fn insert_sections(&self, new_rows: Vec<NewSectionRow>) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;

        for section in new_rows {
            let row = rows
                .iter_mut()
                .find(|r| r.id == section.post_id)
                .ok_or(RepoError::Constraint(format!(
                    "no post row for section (post_id {})",
                    section.post_id
                )))?;

            row.sections.push(SectionRow {
                id: Some(Uuid::new_v4()),
                kind: section.kind,
                content: section.content,
                position: Some(section.position),
            });
        }

        Ok(())
    }
}
