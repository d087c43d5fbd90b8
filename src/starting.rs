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

//! Finds a legal starting partition with as few blocks as possible, via
//! escalating-`k` randomized fill: grow each cell into the currently
//! emptiest block (ties broken uniformly at random), and retry with a larger
//! `k` whenever the area cap is violated.

use rand::Rng;

use crate::error::{Error, Result};
use crate::model::{Block, InputData, Partition};

/// Attempts a single `k`-way fill. Returns `None` as soon as any block would
/// overflow `A_max`; the caller retries with a larger `k`.
fn try_fill<R: Rng + ?Sized>(inputs: &InputData, k: usize, rng: &mut R) -> Option<Vec<Block>> {
    let mut blocks = vec![Block::default(); k];

    for cell_id in 0..inputs.ncells() {
        let min_area = blocks.iter().map(|b| b.area).min().unwrap();
        let candidates: Vec<usize> = blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| b.area == min_area)
            .map(|(i, _)| i)
            .collect();
        let chosen = candidates[rng.gen_range(0..candidates.len())];

        blocks[chosen].cells.push(cell_id);
        blocks[chosen].area += inputs.cell_areas[cell_id];

        if blocks[chosen].area > inputs.max_block_area {
            return None;
        }
    }

    Some(blocks)
}

/// Next `k` to try after a failed attempt: `min(max(⌈1.1·k⌉, k+1), N)`.
fn escalate(k: usize, ncells: usize) -> usize {
    let geometric = ((k as f64) * 1.1).ceil() as usize;
    geometric.max(k + 1).min(ncells)
}

/// Finds a legal partition using as few blocks as possible, starting from
/// `⌈total_area / A_max⌉` and escalating `k` until a fill succeeds or `k`
/// reaches `N` without one.
pub fn find_starting_partition<R: Rng + ?Sized>(
    inputs: &InputData,
    rng: &mut R,
) -> Result<Partition> {
    let ncells = inputs.ncells();
    if ncells == 0 {
        return Ok(Partition::from_blocks(Vec::new(), 0));
    }

    let mut k = inputs.min_blocks().max(1).min(ncells);

    loop {
        if let Some(blocks) = try_fill(inputs, k, rng) {
            return Ok(Partition::from_blocks(blocks, ncells));
        }
        tracing::info!(k, "failed to find starting partition");

        if k >= ncells {
            return Err(Error::Infeasible(format!(
                "no legal partition found up to k = {ncells}"
            )));
        }
        k = escalate(k, ncells);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn trivial_one_block_instance() {
        let inputs = InputData::new(10, vec![1, 1, 1], vec![vec![0, 1, 2]]);
        let partition = find_starting_partition(&inputs, &mut rng()).unwrap();
        assert_eq!(partition.nblocks(), 1);
        assert_eq!(partition.block_of_cell, vec![0, 0, 0]);
    }

    #[test]
    fn two_cell_two_net_instance_forces_two_blocks() {
        let inputs = InputData::new(1, vec![1, 1], vec![vec![0, 1]]);
        let partition = find_starting_partition(&inputs, &mut rng()).unwrap();
        assert_eq!(partition.nblocks(), 2);
        assert_ne!(partition.block_of_cell[0], partition.block_of_cell[1]);
    }

    #[test]
    fn escalates_past_min_blocks_when_first_attempt_overflows() {
        // total = 8, cap = 3 -> min_blocks = 3, but 4 equal cells of area 2
        // cannot be packed into 3 bins of capacity 3 -> escalates to k = 4.
        let inputs = InputData::new(3, vec![2, 2, 2, 2], vec![vec![0, 1, 2, 3]]);
        let partition = find_starting_partition(&inputs, &mut rng()).unwrap();
        assert_eq!(partition.nblocks(), 4);
        for block in &partition.blocks {
            assert!(block.area <= 3);
        }
    }

    #[test]
    fn every_block_respects_the_area_cap() {
        let areas = vec![3, 1, 4, 1, 5, 9, 2, 6];
        let inputs = InputData::new(6, areas, vec![(0..8).collect()]);
        let partition = find_starting_partition(&inputs, &mut rng()).unwrap();
        for block in &partition.blocks {
            assert!(block.area <= 6);
        }
        let mut seen: Vec<usize> = partition.blocks.iter().flat_map(|b| b.cells.clone()).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn escalation_rounds_up_and_clamps_to_ncells() {
        assert_eq!(escalate(3, 100), 4); // ceil(3.3) = 4, max(4, 4) = 4
        assert_eq!(escalate(10, 100), 11); // ceil(11.0) = 11
        assert_eq!(escalate(50, 52), 52); // ceil(55) = 55, clamped to N = 52
    }

    #[test]
    fn infeasible_instance_is_reported() {
        // a single cell whose own area exceeds the cap can never be placed.
        let inputs = InputData::new(1, vec![5], vec![vec![0]]);
        let err = find_starting_partition(&inputs, &mut rng()).unwrap_err();
        assert!(matches!(err, Error::Infeasible(_)));
    }
}
