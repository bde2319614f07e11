//! In-memory editing operations over one post document.

use super::block::{BlockKind, ContentBlock};
use super::id::RecordId;
use super::post::PostDocument;

/// Direction for a neighbor-swap reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Maintains one document's block sequence under direct user edits,
/// before any persistence call.
///
/// Every operation tolerates an id that is no longer present (a no-op)
/// so that stale UI events cannot fail.
#[derive(Debug)]
pub struct DocumentEditor {
    document: PostDocument,
}

impl DocumentEditor {
    pub fn new(document: PostDocument) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &PostDocument {
        &self.document
    }

    /// Mutable access for metadata edits (title, slug, excerpt, status).
    pub fn document_mut(&mut self) -> &mut PostDocument {
        &mut self.document
    }

    pub fn into_document(self) -> PostDocument {
        self.document
    }

    /// Append a new block of the given kind at the end of the sequence,
    /// returning its placeholder id. Always succeeds.
    pub fn add_block(&mut self, kind: BlockKind) -> RecordId {
        let block = ContentBlock::new(kind, self.document.blocks.len() as i32);
        let id = block.id;
        self.document.blocks.push(block);
        id
    }

    /// Replace the content of the matching block. Rank and kind are
    /// untouched.
    pub fn update_block_content(&mut self, id: RecordId, content: impl Into<String>) {
        if let Some(block) = self.document.blocks.iter_mut().find(|b| b.id == id) {
            block.content = content.into();
        }
    }

    /// Remove the matching block. Remaining ranks are not renumbered;
    /// gaps are an accepted part of the model.
    pub fn delete_block(&mut self, id: RecordId) {
        self.document.blocks.retain(|b| b.id != id);
    }

    /// Swap the matching block with its immediate neighbor in the
    /// current order, then renumber the whole sequence to 0..N-1. A
    /// block already at the boundary stays put.
    pub fn move_block(&mut self, id: RecordId, direction: MoveDirection) {
        let Some(index) = self.document.blocks.iter().position(|b| b.id == id) else {
            return;
        };

        let target = match direction {
            MoveDirection::Up if index > 0 => index - 1,
            MoveDirection::Down if index + 1 < self.document.blocks.len() => index + 1,
            _ => return,
        };

        self.document.blocks.swap(index, target);

        for (rank, block) in self.document.blocks.iter_mut().enumerate() {
            block.order = rank as i32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with_blocks(kinds: &[BlockKind]) -> DocumentEditor {
        let mut editor = DocumentEditor::new(PostDocument::new_draft());
        for kind in kinds {
            editor.add_block(*kind);
        }
        editor
    }

    #[test]
    fn add_block_appends_with_next_rank() {
        let mut editor = editor_with_blocks(&[BlockKind::Text, BlockKind::Image]);
        let id = editor.add_block(BlockKind::Quote);

        let blocks = &editor.document().blocks;
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[2].id, id);
        assert_eq!(blocks[2].order, 2);
        assert_eq!(blocks[2].content, "");
        // Text blocks start with a non-empty scaffold.
        assert_eq!(blocks[0].content, "<p>Start typing...</p>");
    }

    #[test]
    fn block_count_tracks_adds_and_deletes() {
        let mut editor = editor_with_blocks(&[]);
        let a = editor.add_block(BlockKind::Text);
        let _b = editor.add_block(BlockKind::Image);
        let c = editor.add_block(BlockKind::Video);

        editor.delete_block(a);
        editor.delete_block(c);
        assert_eq!(editor.document().blocks.len(), 1);
    }

    #[test]
    fn delete_block_leaves_rank_gaps() {
        let mut editor = editor_with_blocks(&[BlockKind::Text, BlockKind::Image, BlockKind::Quote]);
        let middle = editor.document().blocks[1].id;

        editor.delete_block(middle);

        let orders: Vec<i32> = editor.document().blocks.iter().map(|b| b.order).collect();
        assert_eq!(orders, vec![0, 2]);
    }

    #[test]
    fn move_block_renumbers_the_whole_sequence() {
        let mut editor = editor_with_blocks(&[BlockKind::Text, BlockKind::Image, BlockKind::Quote]);
        // Open a gap first so the renumber has something to repair.
        let middle = editor.document().blocks[1].id;
        editor.delete_block(middle);
        let last = editor.document().blocks[1].id;

        editor.move_block(last, MoveDirection::Up);

        let blocks = &editor.document().blocks;
        assert_eq!(blocks[0].id, last);
        let orders: Vec<i32> = blocks.iter().map(|b| b.order).collect();
        assert_eq!(orders, vec![0, 1]);
    }

    #[test]
    fn move_block_at_boundaries_is_a_no_op() {
        let mut editor = editor_with_blocks(&[BlockKind::Text, BlockKind::Image]);
        let first = editor.document().blocks[0].id;
        let last = editor.document().blocks[1].id;
        let before = editor.document().blocks.clone();

        editor.move_block(first, MoveDirection::Up);
        editor.move_block(last, MoveDirection::Down);

        assert_eq!(editor.document().blocks, before);
    }

    #[test]
    fn operations_on_unknown_ids_are_no_ops() {
        let mut editor = editor_with_blocks(&[BlockKind::Text]);
        let before = editor.document().blocks.clone();
        let ghost = RecordId::draft();

        editor.update_block_content(ghost, "ignored");
        editor.delete_block(ghost);
        editor.move_block(ghost, MoveDirection::Down);

        assert_eq!(editor.document().blocks, before);
    }

    #[test]
    fn update_block_content_touches_only_content() {
        let mut editor = editor_with_blocks(&[BlockKind::Text, BlockKind::Image]);
        let image = editor.document().blocks[1].id;

        editor.update_block_content(image, "https://example.com/a.png");

        let block = &editor.document().blocks[1];
        assert_eq!(block.content, "https://example.com/a.png");
        assert_eq!(block.kind, BlockKind::Image);
        assert_eq!(block.order, 1);
    }
}
