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

//! This module defines the most basic data types that are used throughout all
//! of the code of this crate (both at the model and engine levels).

// ----------------------------------------------------------------------------
// --- IDENTIFIERS --------------------------------------------------------------
// ----------------------------------------------------------------------------
/// Identifies a cell of the hypergraph. Cells are numbered `0..ncells`.
pub type CellId = usize;
/// Identifies a net (hyperedge) of the hypergraph. Nets are numbered `0..nnets`.
pub type NetId = usize;
/// Identifies a block of a partition. Blocks are numbered `0..nblocks`.
pub type BlockId = usize;

/// The unit an area, or an area cap, is expressed in.
pub type Area = u64;

/// The unit the cut-cost objective is expressed in. Signed because a move's
/// cost delta can be negative.
pub type Cost = i64;

// ----------------------------------------------------------------------------
// --- GAIN ---------------------------------------------------------------------
// ----------------------------------------------------------------------------
/// A two-level lexicographic gain vector, as used by the Sanchis cut engine:
/// `.0` is compared first, `.1` only breaks ties on `.0`.
pub type Gain = (i32, i32);

#[cfg(test)]
mod test_common {
    use super::*;

    #[test]
    fn gain_tuples_compare_lexicographically() {
        let a: Gain = (1, -5);
        let b: Gain = (1, 3);
        let c: Gain = (0, 100);
        assert!(a < b);
        assert!(c < a);
    }
}
