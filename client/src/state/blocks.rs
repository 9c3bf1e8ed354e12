//! Block store for the active board.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the single source of truth the canvas renders from. Local
//! optimistic mutations, authoritative REST results, and remote channel
//! events all land here through the same primitives, so idempotence and
//! id-validation live in exactly one place.
//!
//! Every operation is synchronous and infallible from the caller's point of
//! view: invalid input is dropped, not raised, because a stale or malformed
//! remote echo must never crash the canvas.

#[cfg(test)]
#[path = "blocks_test.rs"]
mod blocks_test;

use std::collections::HashMap;

use crate::net::types::{Block, Position};

/// A verbatim capture of the store contents, held by an in-flight mutation
/// and restored on failure.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot(HashMap<String, Block>);

/// In-memory block set for one open board, keyed by block id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlockStore {
    blocks: HashMap<String, Block>,
}

impl BlockStore {
    /// Replace the whole store with an initial load.
    ///
    /// Records without a valid id are dropped; duplicates collapse to the
    /// last occurrence.
    pub fn replace_all<I>(&mut self, blocks: I)
    where
        I: IntoIterator<Item = Block>,
    {
        self.blocks = blocks
            .into_iter()
            .filter(Block::has_valid_id)
            .map(|b| (b.id.clone(), b))
            .collect();
    }

    /// Insert a block, or replace the existing record with the same id.
    ///
    /// Returns `false` (and leaves the store untouched) when the block has
    /// no valid id.
    pub fn upsert(&mut self, block: Block) -> bool {
        if !block.has_valid_id() {
            return false;
        }
        self.blocks.insert(block.id.clone(), block);
        true
    }

    /// Remove the block with the given id, if present.
    pub fn remove(&mut self, id: &str) -> bool {
        self.blocks.remove(id).is_some()
    }

    /// Update only the position of an existing block.
    pub fn patch_position(&mut self, id: &str, position: Position) -> bool {
        match self.blocks.get_mut(id) {
            Some(block) => {
                block.position = position;
                true
            }
            None => false,
        }
    }

    /// Update only the content of an existing block.
    pub fn patch_content(&mut self, id: &str, content: &str) -> bool {
        match self.blocks.get_mut(id) {
            Some(block) => {
                block.content = content.to_owned();
                true
            }
            None => false,
        }
    }

    /// Drop every block. Used when the board view closes.
    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Block> {
        self.blocks.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.blocks.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Blocks sorted by id so rendering order is stable across updates.
    #[must_use]
    pub fn ordered(&self) -> Vec<Block> {
        let mut out: Vec<Block> = self.blocks.values().cloned().collect();
        out.sort_by(|a, b| a.id.cmp(&b.id));
        out
    }

    /// Capture the current contents for a pending mutation.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot(self.blocks.clone())
    }

    /// Reinstate a previously captured snapshot verbatim.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.blocks = snapshot.0;
    }
}
