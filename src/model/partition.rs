// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! The mutable partition every engine consumes and produces.

use crate::common::{Area, BlockId, CellId};
use crate::model::InputData;

/// One partition class: the cells it contains and their combined area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub area: Area,
    pub cells: Vec<CellId>,
}

/// A legal (or about-to-be-checked) assignment of every cell to exactly one
/// block. `block_of_cell` is kept coherent with `blocks` by every mutator in
/// this crate; nothing outside `model` is allowed to touch either field
/// without going through [`Partition::move_cell`].
#[derive(Debug, Clone)]
pub struct Partition {
    pub blocks: Vec<Block>,
    pub block_of_cell: Vec<BlockId>,
}

impl Partition {
    /// Builds a `Partition` from already-populated blocks, deriving
    /// `block_of_cell` from them.
    pub fn from_blocks(blocks: Vec<Block>, ncells: usize) -> Self {
        let mut block_of_cell = vec![0; ncells];
        for (block_id, block) in blocks.iter().enumerate() {
            for &cell_id in &block.cells {
                block_of_cell[cell_id] = block_id;
            }
        }
        Partition {
            blocks,
            block_of_cell,
        }
    }

    /// Number of blocks, `K`.
    pub fn nblocks(&self) -> usize {
        self.blocks.len()
    }

    /// Moves `cell_id` from its current block to `to_block`, keeping `blocks`
    /// and `block_of_cell` coherent. Does not check legality or touch any
    /// cost bookkeeping; callers that maintain incremental cost state (the
    /// SA and Sanchis engines) update it themselves around this call, in the
    /// order mandated by the commit-ordering invariant.
    pub fn move_cell(&mut self, inputs: &InputData, cell_id: CellId, to_block: BlockId) {
        let from_block = self.block_of_cell[cell_id];
        if from_block == to_block {
            return;
        }
        let area = inputs.cell_areas[cell_id];

        let from = &mut self.blocks[from_block];
        if let Some(pos) = from.cells.iter().position(|&c| c == cell_id) {
            from.cells.swap_remove(pos);
        }
        from.area -= area;

        let to = &mut self.blocks[to_block];
        to.cells.push(cell_id);
        to.area += area;

        self.block_of_cell[cell_id] = to_block;
    }
}
