//! Save/delete/list orchestration between the editor and the store.
//!
//! Saving is a two-call protocol: the metadata row is written first,
//! then the post's section rows are fully replaced (delete-all, then
//! one batched insert). The two calls are not atomic; the window where
//! metadata committed but sections did not is reported as
//! [`SyncError::BlockReplace`] and a user-initiated retry converges,
//! because both calls are idempotent.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{
    BlockKind, ContentBlock, DEFAULT_AUTHOR, PostDocument, PostStatus, RecordId,
};
use crate::error::SyncError;
use crate::ports::{NewSectionRow, PostPayload, PostRow, PostStore, SectionRow};

/// Orchestrates persistence for post documents and keeps the local post
/// list as an optimistic cache.
///
/// The store is an injected collaborator so tests can run against a
/// double; there is no ambient global client handle.
pub struct SyncCoordinator {
    store: Arc<dyn PostStore>,
    posts: Vec<PostDocument>,
}

impl SyncCoordinator {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self {
            store,
            posts: Vec::new(),
        }
    }

    /// The cached post list, most recently updated first.
    pub fn posts(&self) -> &[PostDocument] {
        &self.posts
    }

    /// Fetch every post with its sections and replace the cache.
    pub async fn list(&mut self) -> Result<&[PostDocument], SyncError> {
        let rows = self
            .store
            .list_posts()
            .await
            .map_err(|e| SyncError::Fetch(e.to_string()))?;

        self.posts = rows.into_iter().map(document_from_row).collect();
        Ok(&self.posts)
    }

    /// Persist a document: metadata write, then full section
    /// replacement.
    ///
    /// A draft id, or a stored id the cache does not know, routes to
    /// insert; only a known stored id routes to update-by-id. The cache
    /// is only touched after both calls succeed: create prepends the
    /// persisted document and retires any placeholder entry, update
    /// replaces the matching entry in place.
    pub async fn save(&mut self, document: PostDocument) -> Result<PostDocument, SyncError> {
        let payload = metadata_payload(&document);
        let known = document
            .id
            .stored()
            .filter(|id| self.posts.iter().any(|p| p.id.stored() == Some(*id)));

        let row = match known {
            Some(id) => self.store.update_post(id, payload).await,
            None => self.store.insert_post(payload).await,
        }
        .map_err(|e| SyncError::MetadataWrite(e.to_string()))?;

        self.replace_sections(row.id, &document.blocks).await?;

        // The store is authoritative for id, normalized metadata and
        // updated_at; the submitted blocks are authoritative for the
        // section sequence.
        let mut saved = document_from_row(row);
        saved.status = document.status;
        saved.blocks = document.blocks;
        saved.sort_blocks();

        match known {
            Some(_) => {
                if let Some(slot) = self.posts.iter_mut().find(|p| p.id == saved.id) {
                    *slot = saved.clone();
                }
            }
            None => {
                self.posts.retain(|p| p.id.is_persisted());
                self.posts.insert(0, saved.clone());
            }
        }

        Ok(saved)
    }

    /// Remove the post from the cache, then issue the remote delete.
    /// If the remote delete fails the cache entry is restored at its
    /// prior index and the error is surfaced.
    pub async fn delete(&mut self, id: Uuid) -> Result<(), SyncError> {
        let removed = self
            .posts
            .iter()
            .position(|p| p.id.stored() == Some(id))
            .map(|index| (index, self.posts.remove(index)));

        if let Err(e) = self.store.delete_post(id).await {
            if let Some((index, post)) = removed {
                self.posts.insert(index, post);
            }
            return Err(SyncError::Delete(e.to_string()));
        }

        Ok(())
    }

    /// Delete-all then insert-all for one post's sections. Either step
    /// failing is a `BlockReplace` error; after a failed insert the post
    /// has zero sections remotely until a retry succeeds.
    async fn replace_sections(
        &self,
        post_id: Uuid,
        blocks: &[ContentBlock],
    ) -> Result<(), SyncError> {
        self.store
            .delete_sections(post_id)
            .await
            .map_err(|e| SyncError::BlockReplace(e.to_string()))?;

        if blocks.is_empty() {
            return Ok(());
        }

        let rows = blocks
            .iter()
            .map(|block| NewSectionRow {
                post_id,
                kind: block.kind.as_str().to_string(),
                content: block.content.clone(),
                position: block.order,
            })
            .collect();

        self.store
            .insert_sections(rows)
            .await
            .map_err(|e| SyncError::BlockReplace(e.to_string()))
    }
}

/// Build the metadata payload with the save-time normalization rules.
fn metadata_payload(document: &PostDocument) -> PostPayload {
    let title = if document.title.trim().is_empty() {
        "Untitled Post".to_string()
    } else {
        document.title.clone()
    };

    let slug = if document.slug.trim().is_empty() {
        slugify(&document.title)
    } else {
        document.slug.clone()
    };

    // Stamped the first time the post goes out as published, preserved
    // on every later save regardless of status.
    let published_at = match document.status {
        PostStatus::Published => document
            .published_at
            .or_else(|| Some(Utc::now().date_naive())),
        _ => document.published_at,
    };

    PostPayload {
        title,
        slug,
        excerpt: document.excerpt.clone(),
        status: document.status.as_str().to_string(),
        published_at,
        updated_at: Utc::now(),
    }
}

fn slugify(title: &str) -> String {
    let slug = title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug
    }
}

/// Map a wire row to the domain shape, defaulting whatever the store
/// left out: missing status reads as draft, a missing update stamp as
/// today, a missing section position as 0, and a section without an id
/// gets a fresh placeholder.
fn document_from_row(row: PostRow) -> PostDocument {
    let mut blocks: Vec<ContentBlock> = row.sections.into_iter().map(block_from_row).collect();
    blocks.sort_by_key(|b| b.order);

    PostDocument {
        id: RecordId::Stored(row.id),
        title: row.title,
        slug: row.slug,
        excerpt: row.excerpt,
        status: row
            .status
            .as_deref()
            .and_then(PostStatus::parse)
            .unwrap_or_default(),
        author: DEFAULT_AUTHOR.to_string(),
        published_at: row.published_at,
        updated_at: row
            .updated_at
            .map(|t| t.date_naive())
            .unwrap_or_else(|| Utc::now().date_naive()),
        blocks,
    }
}

fn block_from_row(row: SectionRow) -> ContentBlock {
    ContentBlock {
        id: row.id.map(RecordId::Stored).unwrap_or_else(RecordId::draft),
        kind: BlockKind::parse(&row.kind).unwrap_or_default(),
        content: row.content,
        order: row.position.unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use chrono::NaiveDate;

    use super::*;
    use crate::error::RepoError;

    /// In-memory store double with per-call fault injection.
    #[derive(Default)]
    struct MockStore {
        rows: Mutex<Vec<PostRow>>,
        fail_insert_post: AtomicBool,
        fail_update_post: AtomicBool,
        fail_delete_post: AtomicBool,
        fail_delete_sections: AtomicBool,
        fail_insert_sections: AtomicBool,
    }

    impl MockStore {
        fn failing(flag: &AtomicBool) -> Result<(), RepoError> {
            if flag.load(Ordering::SeqCst) {
                Err(RepoError::Query("injected failure".to_string()))
            } else {
                Ok(())
            }
        }

        fn section_count(&self, post_id: Uuid) -> usize {
            let rows = self.rows.lock().unwrap();
            rows.iter()
                .find(|r| r.id == post_id)
                .map(|r| r.sections.len())
                .unwrap_or(0)
        }

        fn seed(&self, row: PostRow) {
            self.rows.lock().unwrap().push(row);
        }
    }

    #[async_trait::async_trait]
    impl PostStore for MockStore {
        async fn list_posts(&self) -> Result<Vec<PostRow>, RepoError> {
            let mut rows = self.rows.lock().unwrap().clone();
            rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
            for row in &mut rows {
                row.sections.sort_by_key(|s| s.position.unwrap_or(0));
            }
            Ok(rows)
        }

        async fn insert_post(&self, payload: PostPayload) -> Result<PostRow, RepoError> {
            Self::failing(&self.fail_insert_post)?;
            let row = PostRow {
                id: Uuid::new_v4(),
                title: payload.title,
                slug: payload.slug,
                excerpt: payload.excerpt,
                status: Some(payload.status),
                published_at: payload.published_at,
                updated_at: Some(payload.updated_at),
                sections: Vec::new(),
            };
            self.rows.lock().unwrap().push(row.clone());
            Ok(row)
        }

        async fn update_post(&self, id: Uuid, payload: PostPayload) -> Result<PostRow, RepoError> {
            Self::failing(&self.fail_update_post)?;
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or(RepoError::NotFound)?;
            row.title = payload.title;
            row.slug = payload.slug;
            row.excerpt = payload.excerpt;
            row.status = Some(payload.status);
            row.published_at = payload.published_at;
            row.updated_at = Some(payload.updated_at);
            Ok(row.clone())
        }

        async fn delete_post(&self, id: Uuid) -> Result<(), RepoError> {
            Self::failing(&self.fail_delete_post)?;
            self.rows.lock().unwrap().retain(|r| r.id != id);
            Ok(())
        }

        async fn delete_sections(&self, post_id: Uuid) -> Result<(), RepoError> {
            Self::failing(&self.fail_delete_sections)?;
            let mut rows = self.rows.lock().unwrap();
            if let Some(row) = rows.iter_mut().find(|r| r.id == post_id) {
                row.sections.clear();
            }
            Ok(())
        }

        async fn insert_sections(&self, new_rows: Vec<NewSectionRow>) -> Result<(), RepoError> {
            Self::failing(&self.fail_insert_sections)?;
            let mut rows = self.rows.lock().unwrap();
            for section in new_rows {
                if let Some(row) = rows.iter_mut().find(|r| r.id == section.post_id) {
                    row.sections.push(SectionRow {
                        id: Some(Uuid::new_v4()),
                        kind: section.kind,
                        content: section.content,
                        position: Some(section.position),
                    });
                }
            }
            Ok(())
        }
    }

    fn coordinator() -> (Arc<MockStore>, SyncCoordinator) {
        let store = Arc::new(MockStore::default());
        let coordinator = SyncCoordinator::new(store.clone());
        (store, coordinator)
    }

    fn document_with_blocks() -> PostDocument {
        let mut document = PostDocument::new_draft();
        document.title = "Hello World".to_string();
        document.blocks = vec![
            ContentBlock {
                id: RecordId::draft(),
                kind: BlockKind::Text,
                content: "a".to_string(),
                order: 0,
            },
            ContentBlock {
                id: RecordId::draft(),
                kind: BlockKind::Image,
                content: "b".to_string(),
                order: 1,
            },
        ];
        document
    }

    #[tokio::test]
    async fn round_trip_preserves_block_content_and_order() {
        let (_, mut coordinator) = coordinator();

        coordinator.save(document_with_blocks()).await.unwrap();
        let posts = coordinator.list().await.unwrap();

        assert_eq!(posts.len(), 1);
        let blocks = &posts[0].blocks;
        assert_eq!(blocks.len(), 2);
        assert_eq!(
            (blocks[0].kind, blocks[0].content.as_str(), blocks[0].order),
            (BlockKind::Text, "a", 0)
        );
        assert_eq!(
            (blocks[1].kind, blocks[1].content.as_str(), blocks[1].order),
            (BlockKind::Image, "b", 1)
        );
    }

    #[tokio::test]
    async fn double_save_does_not_duplicate_sections() {
        let (store, mut coordinator) = coordinator();

        let saved = coordinator.save(document_with_blocks()).await.unwrap();
        let resaved = coordinator.save(saved).await.unwrap();

        assert_eq!(resaved.id, coordinator.posts()[0].id);
        assert_eq!(coordinator.posts().len(), 1);
        assert_eq!(store.section_count(resaved.id.stored().unwrap()), 2);
    }

    #[tokio::test]
    async fn create_retires_the_placeholder_entry() {
        let (_, mut coordinator) = coordinator();
        let document = document_with_blocks();
        let placeholder = document.id;
        assert!(!placeholder.is_persisted());

        let saved = coordinator.save(document).await.unwrap();

        assert!(saved.id.is_persisted());
        assert_eq!(coordinator.posts().len(), 1);
        assert!(coordinator.posts().iter().all(|p| p.id != placeholder));
    }

    #[tokio::test]
    async fn blank_title_and_slug_get_fallbacks() {
        let (_, mut coordinator) = coordinator();
        let mut document = PostDocument::new_draft();
        document.title = String::new();
        document.slug = String::new();

        let saved = coordinator.save(document).await.unwrap();

        assert_eq!(saved.title, "Untitled Post");
        assert_eq!(saved.slug, "untitled");
    }

    #[tokio::test]
    async fn slug_is_derived_from_title_when_blank() {
        let (_, mut coordinator) = coordinator();
        let mut document = PostDocument::new_draft();
        document.title = "My First   Post".to_string();

        let saved = coordinator.save(document).await.unwrap();

        assert_eq!(saved.slug, "my-first-post");
    }

    #[tokio::test]
    async fn publishing_stamps_published_at_once() {
        let (_, mut coordinator) = coordinator();
        let mut document = document_with_blocks();
        document.status = PostStatus::Published;
        assert!(document.published_at.is_none());

        let saved = coordinator.save(document).await.unwrap();
        let first = saved.published_at.expect("stamped on first publish");
        assert_eq!(first, Utc::now().date_naive());

        // Still published on a later save: the stamp is preserved.
        let mut resave = saved.clone();
        resave.published_at = Some(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        let resaved = coordinator.save(resave).await.unwrap();
        assert_eq!(
            resaved.published_at,
            Some(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())
        );
    }

    #[tokio::test]
    async fn draft_save_leaves_published_at_alone() {
        let (_, mut coordinator) = coordinator();
        let mut document = document_with_blocks();
        document.published_at = Some(NaiveDate::from_ymd_opt(2024, 5, 5).unwrap());

        let saved = coordinator.save(document).await.unwrap();

        assert_eq!(saved.status, PostStatus::Draft);
        assert_eq!(
            saved.published_at,
            Some(NaiveDate::from_ymd_opt(2024, 5, 5).unwrap())
        );
    }

    #[tokio::test]
    async fn metadata_failure_aborts_before_sections() {
        let (store, mut coordinator) = coordinator();
        store.fail_insert_post.store(true, Ordering::SeqCst);

        let err = coordinator.save(document_with_blocks()).await.unwrap_err();

        assert!(matches!(err, SyncError::MetadataWrite(_)));
        assert!(coordinator.posts().is_empty());
        assert!(store.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn section_delete_failure_reports_block_replace_and_keeps_cache() {
        let (store, mut coordinator) = coordinator();
        let saved = coordinator.save(document_with_blocks()).await.unwrap();
        let cached_before = coordinator.posts().to_vec();

        store.fail_delete_sections.store(true, Ordering::SeqCst);
        let mut edited = saved.clone();
        edited.blocks[0].content = "changed".to_string();

        let err = coordinator.save(edited).await.unwrap_err();

        assert!(matches!(err, SyncError::BlockReplace(_)));
        // The new blocks were never applied to the cache.
        assert_eq!(coordinator.posts(), cached_before.as_slice());
    }

    #[tokio::test]
    async fn section_insert_failure_leaves_post_without_sections_remotely() {
        let (store, mut coordinator) = coordinator();
        let saved = coordinator.save(document_with_blocks()).await.unwrap();

        store.fail_insert_sections.store(true, Ordering::SeqCst);
        let err = coordinator.save(saved.clone()).await.unwrap_err();

        assert!(matches!(err, SyncError::BlockReplace(_)));
        assert_eq!(store.section_count(saved.id.stored().unwrap()), 0);

        // A retry converges once the store recovers.
        store.fail_insert_sections.store(false, Ordering::SeqCst);
        coordinator.save(saved.clone()).await.unwrap();
        assert_eq!(store.section_count(saved.id.stored().unwrap()), 2);
    }

    #[tokio::test]
    async fn delete_removes_locally_and_remotely() {
        let (store, mut coordinator) = coordinator();
        let saved = coordinator.save(document_with_blocks()).await.unwrap();

        coordinator.delete(saved.id.stored().unwrap()).await.unwrap();

        assert!(coordinator.posts().is_empty());
        assert!(store.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_delete_rolls_the_cache_entry_back() {
        let (store, mut coordinator) = coordinator();
        let first = coordinator.save(document_with_blocks()).await.unwrap();
        let second = coordinator.save(document_with_blocks()).await.unwrap();
        assert_eq!(coordinator.posts()[0].id, second.id);

        store.fail_delete_post.store(true, Ordering::SeqCst);
        let err = coordinator
            .delete(second.id.stored().unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, SyncError::Delete(_)));
        // Restored at its prior index, not appended.
        assert_eq!(coordinator.posts().len(), 2);
        assert_eq!(coordinator.posts()[0].id, second.id);
        assert_eq!(coordinator.posts()[1].id, first.id);
    }

    #[tokio::test]
    async fn list_applies_defensive_defaults() {
        let (store, mut coordinator) = coordinator();
        store.seed(PostRow {
            id: Uuid::new_v4(),
            title: "Legacy".to_string(),
            slug: "legacy".to_string(),
            excerpt: String::new(),
            status: None,
            published_at: None,
            updated_at: None,
            sections: vec![SectionRow {
                id: None,
                kind: "marquee".to_string(),
                content: "x".to_string(),
                position: None,
            }],
        });

        let posts = coordinator.list().await.unwrap();

        let post = &posts[0];
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.updated_at, Utc::now().date_naive());
        let block = &post.blocks[0];
        assert_eq!(block.order, 0);
        assert_eq!(block.kind, BlockKind::Text);
        assert!(!block.id.is_persisted());
    }

    #[tokio::test]
    async fn list_orders_posts_most_recently_updated_first() {
        let (_, mut coordinator) = coordinator();
        let _first = coordinator.save(document_with_blocks()).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = coordinator.save(document_with_blocks()).await.unwrap();

        let posts = coordinator.list().await.unwrap();

        assert_eq!(posts[0].id, second.id);
    }
}
