//! SeaORM entities for the post tables.

pub mod post;
pub mod section;
