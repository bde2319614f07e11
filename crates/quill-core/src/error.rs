//! Core error types.

use thiserror::Error;

/// Store-level errors, reported by `PostStore` implementations.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Sync protocol errors, reported by `SyncCoordinator`.
///
/// `BlockReplace` is the partial-failure window of the two-call save:
/// the metadata row may already be committed when it is raised, so the
/// caller must surface it as "post saved, content not saved".
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Unable to write post metadata: {0}")]
    MetadataWrite(String),

    #[error("Post saved, content not saved: {0}")]
    BlockReplace(String),

    #[error("Unable to load posts: {0}")]
    Fetch(String),

    #[error("Unable to delete post: {0}")]
    Delete(String),
}
