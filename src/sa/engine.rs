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

//! The incremental simulated-annealing engine: single-cell-move Metropolis
//! search over a legal partition, with O(|nets(cell)|) move evaluation and
//! commit.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::common::{BlockId, CellId, Cost};
use crate::model::{InputData, Partition};
use crate::sa::pin::PinTable;
use crate::sa::schedule::{Cooling, RETUNE_INTERVAL_SECS};

/// Owns every piece of state the SA loop needs beyond the `Partition` itself:
/// the pin table, the per-net span, and the running cost. Built once from a
/// starting partition and discarded when the run ends; only the final
/// `Partition` and its cost escape.
pub struct SaEngine<'a> {
    inputs: &'a InputData,
    pin: PinTable,
    span: Vec<u32>,
    cost: Cost,
}

impl<'a> SaEngine<'a> {
    /// Builds the incremental state for `partition`, initializing `pin` and
    /// `span` by a single O(Σ|nets(c)|) pass and deriving `cost` from them.
    pub fn new(inputs: &'a InputData, partition: &Partition) -> Self {
        let nblocks = partition.nblocks();
        let mut pin = PinTable::new(nblocks, inputs.nnets());
        let mut touched: Vec<Vec<BlockId>> = vec![Vec::new(); inputs.nnets()];

        for (block_id, block) in partition.blocks.iter().enumerate() {
            for &cell_id in &block.cells {
                for &net_id in &inputs.nets_of_cell[cell_id] {
                    if pin.get(block_id, net_id) == 0 {
                        touched[net_id].push(block_id);
                    }
                    pin.inc(block_id, net_id);
                }
            }
        }

        let span: Vec<u32> = touched.iter().map(|blocks| blocks.len() as u32).collect();
        let cost = span
            .iter()
            .map(|&s| {
                let s = s as Cost;
                (s - 1) * (s - 1)
            })
            .sum();

        SaEngine { inputs, pin, span, cost }
    }

    /// The engine's running cost, kept in lock-step with `pin`/`span`.
    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn pin(&self, block: BlockId, net: crate::common::NetId) -> u32 {
        self.pin.get(block, net)
    }

    pub fn span(&self, net: crate::common::NetId) -> u32 {
        self.span[net]
    }

    /// Computes the cost delta of moving `cell_id` from `from_block` to
    /// `to_block`, without mutating any state. `O(|nets(cell_id)|)`.
    fn delta_cost(&self, cell_id: CellId, from_block: BlockId, to_block: BlockId) -> Cost {
        let mut delta = 0;
        for &net_id in &self.inputs.nets_of_cell[cell_id] {
            let mut span_delta: i64 = 0;
            if self.pin.get(from_block, net_id) == 1 {
                span_delta -= 1;
            }
            if self.pin.get(to_block, net_id) == 0 {
                span_delta += 1;
            }
            let old_span = self.span[net_id] as i64;
            let new_span = old_span + span_delta;
            delta += (new_span - 1) * (new_span - 1) - (old_span - 1) * (old_span - 1);
        }
        delta
    }

    /// Commits a previously-accepted move: updates `pin`, `span`, and `cost`,
    /// then the partition itself. Mutations happen in the order mandated by
    /// the commit-ordering invariant so that intermediate reads during commit
    /// still see pre-move values.
    fn commit(
        &mut self,
        partition: &mut Partition,
        cell_id: CellId,
        from_block: BlockId,
        to_block: BlockId,
        delta: Cost,
    ) {
        for &net_id in &self.inputs.nets_of_cell[cell_id] {
            let mut span_delta: i64 = 0;
            if self.pin.get(from_block, net_id) == 1 {
                span_delta -= 1;
            }
            self.pin.dec(from_block, net_id);

            if self.pin.get(to_block, net_id) == 0 {
                span_delta += 1;
            }
            self.pin.inc(to_block, net_id);

            if span_delta != 0 {
                self.span[net_id] = (self.span[net_id] as i64 + span_delta) as u32;
            }
        }

        partition.move_cell(self.inputs, cell_id, to_block);
        self.cost += delta;
    }

    /// Runs one pass: propose, (maybe) reject, (maybe) accept and commit.
    /// Returns `true` if a move was committed, so the caller can drive the
    /// cooling schedule's pass counter.
    fn one_pass<R: Rng + ?Sized>(
        &mut self,
        partition: &mut Partition,
        rng: &mut R,
        temp: f64,
    ) -> bool {
        let ncells = self.inputs.ncells();
        let nblocks = partition.nblocks();

        let cell_id = rng.gen_range(0..ncells);
        let from_block = partition.block_of_cell[cell_id];
        let to_block = rng.gen_range(0..nblocks);

        if to_block == from_block {
            return false;
        }
        let overflow = partition.blocks[to_block].area + self.inputs.cell_areas[cell_id]
            > self.inputs.max_block_area;
        if overflow {
            return false;
        }

        let delta = self.delta_cost(cell_id, from_block, to_block);
        let accept = delta < 0 || rng.gen_range(0.0..1.0) <= (-(delta as f64) / temp).exp();
        if !accept {
            return false;
        }

        self.commit(partition, cell_id, from_block, to_block, delta);
        true
    }

    /// Runs the engine to completion: single-cell moves accepted by the
    /// Metropolis criterion until `deadline` elapses, retuning the cooling
    /// factor every [`RETUNE_INTERVAL_SECS`]. Mutates `partition` in place
    /// and returns its final cost.
    pub fn run<R: Rng + ?Sized>(
        &mut self,
        partition: &mut Partition,
        rng: &mut R,
        deadline: Duration,
    ) -> Cost {
        let start = Instant::now();
        let mut cooling = Cooling::default();
        let mut last_retune = start;
        let mut passes_since_retune: u64 = 0;

        loop {
            let now = Instant::now();
            let elapsed = now.duration_since(start);
            if elapsed >= deadline {
                break;
            }

            if self.one_pass(partition, rng, cooling.temp()) {
                passes_since_retune += 1;
                cooling.step();
            }

            let since_retune = now.duration_since(last_retune).as_secs_f64();
            if since_retune >= RETUNE_INTERVAL_SECS {
                let remaining = deadline.saturating_sub(elapsed).as_secs_f64();
                cooling.retune(passes_since_retune, since_retune, remaining);
                tracing::info!(
                    temp = cooling.temp(),
                    passes = passes_since_retune,
                    remaining_secs = remaining,
                    cost = self.cost,
                    "cooling schedule retuned"
                );
                passes_since_retune = 0;
                last_retune = now;
            }
        }

        self.cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::cost_from_scratch;
    use crate::model::Block;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn initial_state_matches_cost_from_scratch() {
        let inputs = InputData::new(10, vec![1, 1, 1, 1], vec![vec![0, 1], vec![2, 3], vec![1, 2]]);
        let partition = Partition::from_blocks(
            vec![
                Block { area: 2, cells: vec![0, 1] },
                Block { area: 2, cells: vec![2, 3] },
            ],
            4,
        );
        let engine = SaEngine::new(&inputs, &partition);
        assert_eq!(engine.cost(), cost_from_scratch(&partition, &inputs));
    }

    #[test]
    fn commit_keeps_incremental_state_consistent_with_scratch_recompute() {
        let inputs = InputData::new(
            10,
            vec![1; 12],
            vec![
                vec![0, 1, 2],
                vec![3, 4, 5],
                vec![6, 7, 8],
                vec![9, 10, 11],
                vec![0, 4, 8],
                vec![1, 5, 9],
            ],
        );
        let blocks = vec![
            Block { area: 4, cells: vec![0, 1, 2, 3] },
            Block { area: 4, cells: vec![4, 5, 6, 7] },
            Block { area: 4, cells: vec![8, 9, 10, 11] },
        ];
        let mut partition = Partition::from_blocks(blocks, 12);
        let mut engine = SaEngine::new(&inputs, &partition);
        let mut rng = rng();

        for _ in 0..2000 {
            engine.one_pass(&mut partition, &mut rng, 5.0);
            assert_eq!(engine.cost(), cost_from_scratch(&partition, &inputs));
            for net_id in 0..inputs.nnets() {
                let span_from_pin: usize = (0..partition.nblocks())
                    .filter(|&b| engine.pin(b, net_id) > 0)
                    .count();
                assert_eq!(engine.span(net_id) as usize, span_from_pin);
                let total_pins: u32 = (0..partition.nblocks()).map(|b| engine.pin(b, net_id)).sum();
                assert_eq!(total_pins as usize, inputs.cells_of_net[net_id].len());
            }
        }
    }

    #[test]
    fn inverse_move_restores_prior_state_exactly() {
        let inputs = InputData::new(10, vec![1, 1, 1, 1], vec![vec![0, 1], vec![2, 3]]);
        let blocks = vec![
            Block { area: 2, cells: vec![0, 1] },
            Block { area: 2, cells: vec![2, 3] },
        ];
        let mut partition = Partition::from_blocks(blocks, 4);
        let mut engine = SaEngine::new(&inputs, &partition);

        let cost_before = engine.cost();
        let areas_before: Vec<_> = partition.blocks.iter().map(|b| b.area).collect();

        let delta = engine.delta_cost(0, 0, 1);
        engine.commit(&mut partition, 0, 0, 1, delta);
        let inverse_delta = engine.delta_cost(0, 1, 0);
        engine.commit(&mut partition, 0, 1, 0, inverse_delta);

        assert_eq!(engine.cost(), cost_before);
        let areas_after: Vec<_> = partition.blocks.iter().map(|b| b.area).collect();
        assert_eq!(areas_after, areas_before);
    }

    #[test]
    fn deadline_is_respected_within_tolerance() {
        let inputs = InputData::new(50, vec![1; 50], (0..25).map(|i| vec![2 * i, 2 * i + 1]).collect());
        let blocks = vec![Block { area: 50, cells: (0..50).collect() }];
        let mut partition = Partition::from_blocks(blocks, 50);
        let mut engine = SaEngine::new(&inputs, &partition);
        let mut rng = rng();

        let start = Instant::now();
        engine.run(&mut partition, &mut rng, Duration::from_millis(200));
        assert!(start.elapsed() < Duration::from_millis(400));
    }

    #[test]
    fn accepted_downhill_moves_strictly_decrease_cost() {
        let inputs = InputData::new(
            8,
            vec![1; 8],
            vec![vec![0, 1, 2, 3, 4, 5, 6, 7]],
        );
        let blocks = vec![
            Block { area: 4, cells: vec![0, 1, 2, 3] },
            Block { area: 4, cells: vec![4, 5, 6, 7] },
        ];
        let mut partition = Partition::from_blocks(blocks, 8);
        let mut engine = SaEngine::new(&inputs, &partition);
        let mut rng = rng();

        // At T effectively 0, only downhill moves are ever accepted.
        for _ in 0..500 {
            let before = engine.cost();
            if engine.one_pass(&mut partition, &mut rng, 1e-9) {
                assert!(engine.cost() <= before);
            }
        }
    }
}
