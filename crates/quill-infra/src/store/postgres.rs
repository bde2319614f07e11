//! PostgreSQL post store.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use quill_core::error::RepoError;
use quill_core::ports::{NewSectionRow, PostPayload, PostRow, PostStore};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::section::{self, Entity as SectionEntity};

/// PostgreSQL implementation of the post store. Ids are assigned here
/// on insert; the caller never supplies one.
pub struct PostgresPostStore {
    db: DbConn,
}

impl PostgresPostStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    fn active_model(id: Uuid, payload: PostPayload) -> post::ActiveModel {
        post::ActiveModel {
            id: Set(id),
            title: Set(payload.title),
            slug: Set(payload.slug),
            excerpt: Set(payload.excerpt),
            status: Set(payload.status),
            published_at: Set(payload.published_at),
            updated_at: Set(payload.updated_at.into()),
        }
    }
}

#[async_trait]
impl PostStore for PostgresPostStore {
    async fn list_posts(&self) -> Result<Vec<PostRow>, RepoError> {
        let rows = PostEntity::find()
            .find_with_related(SectionEntity)
            .order_by_desc(post::Column::UpdatedAt)
            .order_by_asc(section::Column::Position)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(model, sections)| {
                let mut row: PostRow = model.into();
                row.sections = sections.into_iter().map(Into::into).collect();
                row
            })
            .collect())
    }

    async fn insert_post(&self, payload: PostPayload) -> Result<PostRow, RepoError> {
        tracing::debug!(title = %payload.title, "Inserting post row");

        let model = Self::active_model(Uuid::new_v4(), payload)
            .insert(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(model.into())
    }

    async fn update_post(&self, id: Uuid, payload: PostPayload) -> Result<PostRow, RepoError> {
        tracing::debug!(post_id = %id, "Updating post row");

        let model = Self::active_model(id, payload)
            .update(&self.db)
            .await
            .map_err(|e| match e {
                sea_orm::DbErr::RecordNotUpdated => RepoError::NotFound,
                other => RepoError::Query(other.to_string()),
            })?;

        let sections = model
            .find_related(SectionEntity)
            .order_by_asc(section::Column::Position)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let mut row: PostRow = model.into();
        row.sections = sections.into_iter().map(Into::into).collect();
        Ok(row)
    }

    async fn delete_post(&self, id: Uuid) -> Result<(), RepoError> {
        // Section rows cascade with the post row. An already-gone id is
        // a success: a retried delete must converge.
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        tracing::debug!(post_id = %id, rows = result.rows_affected, "Deleted post row");
        Ok(())
    }

    async fn delete_sections(&self, post_id: Uuid) -> Result<(), RepoError> {
        SectionEntity::delete_many()
            .filter(section::Column::PostId.eq(post_id))
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(())
    }

    async fn insert_sections(&self, rows: Vec<NewSectionRow>) -> Result<(), RepoError> {
        if rows.is_empty() {
            return Ok(());
        }

        let models = rows.into_iter().map(|row| section::ActiveModel {
            id: Set(Uuid::new_v4()),
            post_id: Set(row.post_id),
            kind: Set(row.kind),
            content: Set(row.content),
            position: Set(row.position),
        });

        SectionEntity::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(())
    }
}
