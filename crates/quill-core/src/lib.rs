//! # Quill Core
//!
//! The domain layer of the Quill content admin.
//! This crate contains the post document model, the editing operations,
//! the store port, and the sync protocol - with zero infrastructure
//! dependencies.

pub mod auth;
pub mod domain;
pub mod error;
pub mod ports;
pub mod sync;

pub use error::{RepoError, SyncError};
pub use sync::SyncCoordinator;
