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

//! The small data structures the Sanchis cut engine is built from: the
//! `(net, block)` binding table (shared by `phi`, `lmd`, and `beta`, the
//! latter with an infinity sentinel), the two-level gain vector per
//! `(cell, block)`, and the bucketed table that maps gain vectors back to
//! candidate moves.

use crate::common::{BlockId, CellId, Gain, NetId};

/// Stands in for the source's `std::numeric_limits<int>::max()` sentinel:
/// `beta(net, block) == INFTY` means the net is locked in that block.
pub const INFTY: i32 = i32::MAX;

/// A `(net, block) -> int` table with infinity-sentinel semantics on
/// `inc`/`dec`: once a slot holds [`INFTY`], incrementing or decrementing it
/// is a no-op. Used for `phi`, `lmd`, and `beta` alike, exactly as the source
/// reuses one `BindData` class for all three.
#[derive(Debug, Clone)]
pub struct BindTable {
    data: Vec<i32>,
    nblocks: usize,
}

impl BindTable {
    pub fn new(nnets: usize, nblocks: usize) -> Self {
        BindTable {
            data: vec![0; nnets * nblocks],
            nblocks,
        }
    }

    #[inline]
    fn index(&self, net: NetId, block: BlockId) -> usize {
        net * self.nblocks + block
    }

    #[inline]
    pub fn get(&self, net: NetId, block: BlockId) -> i32 {
        self.data[self.index(net, block)]
    }

    #[inline]
    pub fn inc(&mut self, net: NetId, block: BlockId) {
        let idx = self.index(net, block);
        if self.data[idx] != INFTY {
            self.data[idx] += 1;
        }
    }

    #[inline]
    pub fn dec(&mut self, net: NetId, block: BlockId) {
        let idx = self.index(net, block);
        if self.data[idx] != INFTY {
            self.data[idx] -= 1;
        }
    }

    /// Sets the slot to `value`, returning the change in the caller's
    /// infinity-count: `+1` if the slot just became [`INFTY`], `-1` if it
    /// just left it, `0` otherwise.
    #[must_use]
    pub fn set(&mut self, net: NetId, block: BlockId, value: i32) -> i32 {
        let idx = self.index(net, block);
        let old = self.data[idx];
        self.data[idx] = value;
        match (old == INFTY, value == INFTY) {
            (false, true) => 1,
            (true, false) => -1,
            _ => 0,
        }
    }
}

/// Whether a net is still fully free to move, has exactly one block with
/// locked presence ("loose"), or has two-or-more ("locked" for the purposes
/// of gain computation: further moves touching it no longer change cost).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetStatus {
    Free,
    Loose,
    Locked,
}

impl NetStatus {
    pub fn from_infty_count(count: i32) -> Self {
        match count {
            0 => NetStatus::Free,
            1 => NetStatus::Loose,
            _ => NetStatus::Locked,
        }
    }
}

/// The two-level gain vector per `(cell, block)` move, indexed flat as
/// `cell * nblocks + block`.
#[derive(Debug, Clone)]
pub struct GainValues {
    data: Vec<Gain>,
    nblocks: usize,
}

impl GainValues {
    pub fn new(ncells: usize, nblocks: usize) -> Self {
        GainValues {
            data: vec![(0, 0); ncells * nblocks],
            nblocks,
        }
    }

    #[inline]
    fn index(&self, cell: CellId, block: BlockId) -> usize {
        cell * self.nblocks + block
    }

    #[inline]
    pub fn get(&self, cell: CellId, block: BlockId) -> Gain {
        self.data[self.index(cell, block)]
    }

    /// Bumps level `level` (1 or 2) of the gain at `(cell, block)` by `diff`
    /// and returns the new value.
    fn update(&mut self, cell: CellId, block: BlockId, level: i32, diff: i32) -> Gain {
        let idx = self.index(cell, block);
        match level {
            1 => self.data[idx].0 += diff,
            2 => self.data[idx].1 += diff,
            _ => {}
        }
        self.data[idx]
    }

    pub fn inc(&mut self, cell: CellId, block: BlockId, level: i32) -> Gain {
        self.update(cell, block, level, 1)
    }

    pub fn dec(&mut self, cell: CellId, block: BlockId, level: i32) -> Gain {
        self.update(cell, block, level, -1)
    }
}

/// Maps gain vectors to the list of `(cell, block)` moves that currently
/// have that exact gain, with O(1) access to a move in the maximum bucket.
///
/// Buckets are indexed `(g1 + p) * (2p + 1) + (g2 + p)`, which is monotone in
/// `(g1, g2)` lexicographic order, so "the maximum bucket" is just "the
/// highest-indexed non-empty bucket".
pub struct GainTable {
    buckets: Vec<Vec<(CellId, BlockId)>>,
    p: i32,
    max_index: Option<usize>,
}

impl GainTable {
    pub fn new(p: i32) -> Self {
        let width = (2 * p + 1) as usize;
        GainTable {
            buckets: vec![Vec::new(); width * width],
            p,
            max_index: None,
        }
    }

    #[inline]
    fn index(&self, gain: Gain) -> usize {
        let width = (2 * self.p + 1) as i64;
        let f = (gain.0 as i64 + self.p as i64) * width;
        let s = gain.1 as i64 + self.p as i64;
        (f + s) as usize
    }

    pub fn add(&mut self, gain: Gain, cell: CellId, block: BlockId) {
        let idx = self.index(gain);
        self.buckets[idx].push((cell, block));
        self.max_index = Some(self.max_index.map_or(idx, |m| m.max(idx)));
    }

    pub fn remove(&mut self, gain: Gain, cell: CellId, block: BlockId) {
        let idx = self.index(gain);
        if let Some(pos) = self.buckets[idx].iter().position(|&e| e == (cell, block)) {
            self.buckets[idx].swap_remove(pos);
        }
        if self.buckets[idx].is_empty() && self.max_index == Some(idx) {
            self.max_index = self.search_down_from(idx);
        }
    }

    fn search_down_from(&self, from: usize) -> Option<usize> {
        (0..=from).rev().find(|&i| !self.buckets[i].is_empty())
    }

    /// Iterates candidate `(cell, block)` moves in descending gain order,
    /// highest bucket first, within a bucket in insertion order.
    pub fn iter_descending(&self) -> impl Iterator<Item = (CellId, BlockId)> + '_ {
        let start = self.max_index;
        (0..=start.unwrap_or(0))
            .rev()
            .take_while(move |_| start.is_some())
            .flat_map(move |i| self.buckets[i].iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_table_infinity_sentinel_absorbs_inc_dec() {
        let mut table = BindTable::new(2, 2);
        assert_eq!(table.set(0, 0, INFTY), 1);
        table.inc(0, 0);
        table.dec(0, 0);
        assert_eq!(table.get(0, 0), INFTY);
        assert_eq!(table.set(0, 0, 3), -1);
        assert_eq!(table.get(0, 0), 3);
    }

    #[test]
    fn net_status_thresholds() {
        assert_eq!(NetStatus::from_infty_count(0), NetStatus::Free);
        assert_eq!(NetStatus::from_infty_count(1), NetStatus::Loose);
        assert_eq!(NetStatus::from_infty_count(2), NetStatus::Locked);
    }

    #[test]
    fn gain_values_track_both_levels_independently() {
        let mut gains = GainValues::new(2, 2);
        gains.inc(0, 1, 1);
        gains.inc(0, 1, 1);
        gains.dec(0, 1, 2);
        assert_eq!(gains.get(0, 1), (2, -1));
    }

    #[test]
    fn gain_table_tracks_the_max_bucket_as_entries_come_and_go() {
        let mut table = GainTable::new(3);
        table.add((2, 0), 0, 1);
        table.add((1, 0), 2, 3);
        let top: Vec<_> = table.iter_descending().collect();
        assert_eq!(top[0], (0, 1));

        table.remove((2, 0), 0, 1);
        let top: Vec<_> = table.iter_descending().collect();
        assert_eq!(top[0], (2, 3));
    }

    #[test]
    fn empty_table_iterates_to_nothing() {
        let table = GainTable::new(2);
        assert_eq!(table.iter_descending().count(), 0);
    }
}
