//! Blocks: the buildings of the complex.

use chrono::{DateTime, Utc};

use super::{BlockCode, BlockId};

/// A stored block.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: BlockId,
    pub code: BlockCode,
    pub name: String,
    pub total_floors: u32,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a block.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBlock {
    pub code: BlockCode,
    pub name: String,
    pub total_floors: u32,
    pub description: Option<String>,
}

/// Partial update of a block; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockPatch {
    pub code: Option<BlockCode>,
    pub name: Option<String>,
    pub total_floors: Option<u32>,
    pub description: Option<String>,
}
