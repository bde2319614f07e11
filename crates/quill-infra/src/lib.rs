//! # Quill Infrastructure
//!
//! Concrete implementations of the `PostStore` port defined in
//! `quill-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL store via SeaORM
//! - without it, only the in-memory store is available

pub mod store;

pub use store::InMemoryPostStore;

#[cfg(feature = "postgres")]
pub use store::PostgresPostStore;
