//! Domain entities - the post document model and its editor.

mod block;
mod editor;
mod id;
mod post;

pub use block::{BlockKind, ContentBlock};
pub use editor::{DocumentEditor, MoveDirection};
pub use id::RecordId;
pub use post::{DEFAULT_AUTHOR, PostDocument, PostStatus};
