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

//! The cut-cost objective: `Σ_n (span(n) − 1)²`. Every engine minimizes this;
//! this module only provides the from-scratch reference computation used to
//! seed incremental engines and to cross-check their bookkeeping in tests.

use fxhash::FxHashSet;

use crate::common::Cost;
use crate::model::{InputData, Partition};

/// Recomputes the cut cost of `partition` from scratch: `O(Σ_c |nets(c)|)`.
/// Used to initialize incremental engines and, in tests, to assert that an
/// engine's running `cost` field never drifts from ground truth.
pub fn cost_from_scratch(partition: &Partition, inputs: &InputData) -> Cost {
    let mut spans: Vec<FxHashSet<usize>> = vec![FxHashSet::default(); inputs.nnets()];

    for (block_id, block) in partition.blocks.iter().enumerate() {
        for &cell_id in &block.cells {
            for &net_id in &inputs.nets_of_cell[cell_id] {
                spans[net_id].insert(block_id);
            }
        }
    }

    spans
        .iter()
        .map(|span| {
            let s = span.len() as Cost;
            (s - 1) * (s - 1)
        })
        .sum()
}
