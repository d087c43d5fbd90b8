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

//! The `Cutter`: one lock-as-you-go Sanchis pass over a partition, producing
//! a (possibly truncated) sequence of moves to replay onto the caller's copy.

use crate::common::{Area, BlockId, CellId, Gain, NetId};
use crate::config::Config;
use crate::model::{InputData, Partition};
use crate::sanchis::gain::{BindTable, GainTable, GainValues, NetStatus, INFTY};

/// The deepest gain level the table tracks (`g1` at level 1, `g2` at level
/// 2); nets whose `betap` already exceeds this no longer move any gain.
const MAX_LEVEL: i32 = 2;

#[derive(Clone, Copy)]
enum Direction {
    Normal,
    Reverse,
}

/// Runs a single Sanchis pass against a private copy of a partition, locking
/// each cell it moves so no cell is touched twice in one pass.
pub struct Cutter<'a> {
    inputs: &'a InputData,
    partition: Partition,
    phi: BindTable,
    lmd: BindTable,
    beta: BindTable,
    infty_count: Vec<i32>,
    locked: Vec<bool>,
    gains: GainValues,
    gain_table: GainTable,
}

impl<'a> Cutter<'a> {
    pub fn new(inputs: &'a InputData, partition: &Partition) -> Self {
        let nnets = inputs.nnets();
        let ncells = inputs.ncells();
        let nblocks = partition.nblocks();
        let p = inputs.max_degree() as i32;

        let mut cutter = Cutter {
            inputs,
            partition: partition.clone(),
            phi: BindTable::new(nnets, nblocks),
            lmd: BindTable::new(nnets, nblocks),
            beta: BindTable::new(nnets, nblocks),
            infty_count: vec![0; nnets],
            locked: vec![false; ncells],
            gains: GainValues::new(ncells, nblocks),
            gain_table: GainTable::new(p),
        };
        cutter.init();
        cutter
    }

    fn init(&mut self) {
        for cell_id in 0..self.inputs.ncells() {
            let block_id = self.partition.block_of_cell[cell_id];
            for &net_id in &self.inputs.nets_of_cell[cell_id] {
                self.phi.inc(net_id, block_id);
                self.beta.inc(net_id, block_id);
            }
        }

        for net_id in 0..self.inputs.nnets() {
            for block_id in 0..self.partition.nblocks() {
                if self.betap(net_id, block_id) <= MAX_LEVEL && self.beta.get(net_id, block_id) > 0 {
                    for &cell_id in self.inputs.cells_of_net[net_id].clone().iter() {
                        self.update_gain(Direction::Normal, cell_id, block_id, net_id);
                    }
                }
            }
        }

        for cell_id in 0..self.inputs.ncells() {
            let own_block = self.partition.block_of_cell[cell_id];
            for block_id in 0..self.partition.nblocks() {
                if block_id == own_block {
                    continue;
                }
                let gain = self.gains.get(cell_id, block_id);
                self.gain_table.add(gain, cell_id, block_id);
            }
        }
    }

    fn net_status(&self, net: NetId) -> NetStatus {
        NetStatus::from_infty_count(self.infty_count[net])
    }

    fn betap(&self, net: NetId, block: BlockId) -> i32 {
        let net_size = self.inputs.cells_of_net[net].len() as i32;
        match self.net_status(net) {
            NetStatus::Free => net_size - self.phi.get(net, block),
            NetStatus::Locked => INFTY,
            NetStatus::Loose => net_size - self.phi.get(net, block) - self.lmd.get(net, block),
        }
    }

    fn update_gain(&mut self, direction: Direction, cell: CellId, to_block: BlockId, net: NetId) {
        if self.locked[cell] {
            return;
        }
        let from_block = self.partition.block_of_cell[cell];
        if from_block != to_block {
            let i = self.betap(net, to_block);
            match direction {
                Direction::Normal => self.increase_gain(cell, to_block, i),
                Direction::Reverse => self.decrease_gain(cell, to_block, i),
            }
        } else {
            let bp = self.betap(net, to_block);
            if bp < MAX_LEVEL {
                let i = bp + 1;
                for block_id in 0..self.partition.nblocks() {
                    if block_id == from_block {
                        continue;
                    }
                    match direction {
                        Direction::Normal => self.decrease_gain(cell, block_id, i),
                        Direction::Reverse => self.increase_gain(cell, block_id, i),
                    }
                }
            }
        }
    }

    fn increase_gain(&mut self, cell: CellId, to_block: BlockId, level: i32) {
        let old = self.gains.get(cell, to_block);
        self.gain_table.remove(old, cell, to_block);
        let new = self.gains.inc(cell, to_block, level);
        self.gain_table.add(new, cell, to_block);
    }

    fn decrease_gain(&mut self, cell: CellId, to_block: BlockId, level: i32) {
        let old = self.gains.get(cell, to_block);
        self.gain_table.remove(old, cell, to_block);
        let new = self.gains.dec(cell, to_block, level);
        self.gain_table.add(new, cell, to_block);
    }

    fn area_fits(&self, cell: CellId, to_block: BlockId) -> bool {
        let after: Area = self.partition.blocks[to_block].area + self.inputs.cell_areas[cell];
        after <= self.inputs.max_block_area
    }

    fn find_nextmove(&self) -> Option<(CellId, BlockId)> {
        self.gain_table
            .iter_descending()
            .find(|&(cell, to_block)| !self.locked[cell] && self.area_fits(cell, to_block))
    }

    /// Locks `cell` and propagates the binding-number and gain updates that
    /// follow from moving it to `to_block`, but does not touch
    /// `self.partition` itself; the caller applies the move to the block
    /// bookkeeping right after this returns, mirroring the source's
    /// ordering of `perform_move` followed by its own block-record update.
    fn perform_move(&mut self, cell_id: CellId, to_block_id: BlockId) {
        let from_block_id = self.partition.block_of_cell[cell_id];
        self.locked[cell_id] = true;

        // Removing `cell_id`'s remaining pending entries: each must be keyed
        // by its *own* block, not uniformly by `to_block_id`. The source
        // exhibits exactly that bug here, leaving stale `(cell_id, b)`
        // entries sitting in the wrong bucket for every `b != to_block_id`.
        for block_id in 0..self.partition.nblocks() {
            let gain = self.gains.get(cell_id, block_id);
            self.gain_table.remove(gain, cell_id, block_id);
        }

        let nets: Vec<NetId> = self.inputs.nets_of_cell[cell_id].clone();
        for net_id in nets {
            for block_id in 0..self.partition.nblocks() {
                if self.betap(net_id, block_id) <= MAX_LEVEL && self.beta.get(net_id, block_id) > 0 {
                    for &nei in self.inputs.cells_of_net[net_id].clone().iter() {
                        if nei == cell_id {
                            continue;
                        }
                        self.update_gain(Direction::Reverse, nei, block_id, net_id);
                    }
                }
            }

            self.phi.dec(net_id, from_block_id);
            self.lmd.inc(net_id, to_block_id);

            if self.lmd.get(net_id, from_block_id) == 0 {
                let new_val = self.phi.get(net_id, from_block_id);
                self.infty_count[net_id] += self.beta.set(net_id, from_block_id, new_val);
            } else {
                self.infty_count[net_id] += self.beta.set(net_id, from_block_id, INFTY);
            }

            if self.lmd.get(net_id, to_block_id) == 0 {
                let new_val = self.phi.get(net_id, to_block_id);
                self.infty_count[net_id] += self.beta.set(net_id, to_block_id, new_val);
            } else {
                self.infty_count[net_id] += self.beta.set(net_id, to_block_id, INFTY);
            }

            if self.betap(net_id, to_block_id) <= MAX_LEVEL && self.beta.get(net_id, to_block_id) > 0 {
                for &nei in self.inputs.cells_of_net[net_id].clone().iter() {
                    if nei == cell_id || self.locked[nei] {
                        continue;
                    }
                    self.update_gain(Direction::Normal, nei, to_block_id, net_id);
                }
            }
        }
    }

    /// Runs one Sanchis pass to completion, returning the prefix of moves
    /// that achieved the best cumulative first-level gain. Empty if no
    /// prefix (including the empty one) has positive cumulative gain: a
    /// pass that only ever found cost-increasing moves contributes nothing.
    pub fn perform_pass(&mut self, config: &Config) -> Vec<(CellId, BlockId)> {
        let min_moves = self.inputs.ncells() / 8;

        let mut move_history = Vec::new();
        let mut gain_history: Vec<i64> = Vec::new();
        let mut current_gain: i64 = 0;
        let mut count = 0usize;

        while let Some((cell_id, to_block_id)) = self.find_nextmove() {
            let gain: Gain = self.gains.get(cell_id, to_block_id);
            if gain.0 <= 0 && count >= min_moves {
                break;
            }

            let from_block_id = self.partition.block_of_cell[cell_id];
            if config.debug_moves {
                tracing::debug!(
                    count,
                    cell_id,
                    from_block_id,
                    to_block_id,
                    gain1 = gain.0,
                    gain2 = gain.1,
                    "sanchis move"
                );
            }
            count += 1;

            self.perform_move(cell_id, to_block_id);
            self.partition.move_cell(self.inputs, cell_id, to_block_id);

            current_gain += gain.0 as i64;
            gain_history.push(current_gain);
            move_history.push((cell_id, to_block_id));
        }

        match gain_history.iter().copied().enumerate().max_by_key(|&(_, g)| g) {
            Some((best_index, best_gain)) if best_gain > 0 => {
                move_history.truncate(best_index + 1);
            }
            // Every prefix, including the empty one, is cumulative gain <= 0:
            // this pass contributed nothing worth keeping.
            _ => move_history.clear(),
        }
        move_history
    }
}

/// Replays a move list produced by [`Cutter::perform_pass`] onto `partition`.
/// Each cell moves at most once per pass, so no recomputation of the source
/// block is needed: it is whatever `partition` currently holds.
pub fn replay(partition: &mut Partition, inputs: &InputData, moves: &[(CellId, BlockId)]) {
    for &(cell_id, to_block) in moves {
        partition.move_cell(inputs, cell_id, to_block);
    }
}
