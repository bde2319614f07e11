//! Post document handlers.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use quill_core::domain::{BlockKind, ContentBlock, PostDocument, PostStatus, RecordId};
use quill_shared::dto::{BlockDto, PostDto};

use crate::middleware::auth::AdminSession;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/posts
pub async fn list(state: web::Data<AppState>, _session: AdminSession) -> AppResult<HttpResponse> {
    let mut posts = state.posts.write().await;
    let documents = posts.list().await?;

    let body: Vec<PostDto> = documents.iter().map(post_dto).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// PUT /api/posts
///
/// Saves a full document; a body without an id creates a new post. The
/// returned document carries the store-assigned id.
pub async fn save(
    state: web::Data<AppState>,
    _session: AdminSession,
    body: web::Json<PostDto>,
) -> AppResult<HttpResponse> {
    let document = document_from_dto(body.into_inner())?;

    let mut posts = state.posts.write().await;
    let saved = posts.save(document).await?;

    Ok(HttpResponse::Ok().json(post_dto(&saved)))
}

/// DELETE /api/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    _session: AdminSession,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let mut posts = state.posts.write().await;
    posts.delete(id).await?;

    Ok(HttpResponse::NoContent().finish())
}

fn document_from_dto(dto: PostDto) -> Result<PostDocument, AppError> {
    let status = PostStatus::parse(&dto.status)
        .ok_or_else(|| AppError::BadRequest(format!("unknown status '{}'", dto.status)))?;

    let blocks = dto
        .blocks
        .into_iter()
        .map(|block| {
            let kind = BlockKind::parse(&block.kind)
                .ok_or_else(|| AppError::BadRequest(format!("unknown block kind '{}'", block.kind)))?;

            Ok(ContentBlock {
                id: block.id.map(RecordId::Stored).unwrap_or_else(RecordId::draft),
                kind,
                content: block.content,
                order: block.order,
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    Ok(PostDocument {
        id: dto.id.map(RecordId::Stored).unwrap_or_else(RecordId::draft),
        title: dto.title,
        slug: dto.slug,
        excerpt: dto.excerpt,
        status,
        author: quill_core::domain::DEFAULT_AUTHOR.to_string(),
        published_at: dto.published_at,
        updated_at: dto.updated_at.unwrap_or_else(|| Utc::now().date_naive()),
        blocks,
    })
}

fn post_dto(document: &PostDocument) -> PostDto {
    PostDto {
        id: document.id.stored(),
        title: document.title.clone(),
        slug: document.slug.clone(),
        excerpt: document.excerpt.clone(),
        status: document.status.as_str().to_string(),
        author: document.author.clone(),
        published_at: document.published_at,
        updated_at: Some(document.updated_at),
        blocks: document
            .blocks
            .iter()
            .map(|block| BlockDto {
                id: block.id.stored(),
                kind: block.kind.as_str().to_string(),
                content: block.content.clone(),
                order: block.order,
            })
            .collect(),
    }
}
