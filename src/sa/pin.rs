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

//! The `pin[BlockId, NetId]` table: the number of cells of a given net
//! residing in a given block.
//!
//! The source keys this by a hashed `(BlockId, NetId)` composite unconditionally.
//! Here we pick a dense `Vec<u32>` when `K·M` is small enough to make that
//! cheap (below 2^24 entries), and fall back to a hash map keyed by a packed
//! 64-bit integer otherwise. The packed key sidesteps the composite-hash
//! ceremony the source used while still giving O(1) expected access.

use fxhash::FxHashMap;

use crate::common::{BlockId, NetId};

const DENSE_THRESHOLD: usize = 1 << 24;

fn pack(block: BlockId, net: NetId) -> u64 {
    ((block as u64) << 32) | (net as u64)
}

#[derive(Debug, Clone)]
pub enum PinTable {
    Dense { data: Vec<u32>, nnets: usize },
    Sparse(FxHashMap<u64, u32>),
}

impl PinTable {
    pub fn new(nblocks: usize, nnets: usize) -> Self {
        if nblocks.saturating_mul(nnets) < DENSE_THRESHOLD {
            PinTable::Dense {
                data: vec![0; nblocks * nnets],
                nnets,
            }
        } else {
            PinTable::Sparse(FxHashMap::default())
        }
    }

    #[inline]
    pub fn get(&self, block: BlockId, net: NetId) -> u32 {
        match self {
            PinTable::Dense { data, nnets } => data[block * nnets + net],
            PinTable::Sparse(map) => map.get(&pack(block, net)).copied().unwrap_or(0),
        }
    }

    #[inline]
    pub fn inc(&mut self, block: BlockId, net: NetId) {
        match self {
            PinTable::Dense { data, nnets } => data[block * *nnets + net] += 1,
            PinTable::Sparse(map) => *map.entry(pack(block, net)).or_insert(0) += 1,
        }
    }

    #[inline]
    pub fn dec(&mut self, block: BlockId, net: NetId) {
        match self {
            PinTable::Dense { data, nnets } => data[block * *nnets + net] -= 1,
            PinTable::Sparse(map) => {
                let key = pack(block, net);
                let v = map.get_mut(&key).expect("dec of an absent pin entry");
                *v -= 1;
            }
        }
    }
}
