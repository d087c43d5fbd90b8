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

//! The Sanchis multi-level gain-table cut engine. Off by default (the
//! incremental SA engine in [`crate::sa`] is the primary optimizer); enabled
//! as an alternative refinement pass, and gated to `K = 2` unless
//! `PA2_ALLOW_KWAY` is set, since its gain bookkeeping has only been
//! validated against a two-way cut.

mod engine;
mod gain;

pub use engine::Cutter;

use crate::config::Config;
use crate::cost::cost_from_scratch;
use crate::error::{Error, Result};
use crate::model::{InputData, Partition};

/// Consecutive non-improving passes tolerated before giving up (`N_bad`).
pub const DEFAULT_BAD_ROUNDS: usize = 10;

/// Runs Sanchis passes against `partition` until `config.pass_rounds`
/// consecutive passes produce no moves, keeping and finally restoring
/// whichever partition seen along the way has the lowest cut cost.
///
/// A bad round (a pass whose best cumulative gain is <= 0) never moves
/// `partition` off the best one found so far: `perform_pass` already empties
/// its move list in that case, but this guards against ever leaving
/// `partition` on a worse state than the best one this call has observed.
///
/// Refuses to run against more than two blocks unless `config.allow_kway` is
/// set: the gain-table bookkeeping in this module mirrors a two-way cut
/// formulation and has not been exercised against `K > 2`.
pub fn run(inputs: &InputData, partition: &mut Partition, config: &Config) -> Result<()> {
    if partition.nblocks() > 2 && !config.allow_kway {
        return Err(Error::Invariant(format!(
            "sanchis engine requested for K = {} blocks but PA2_ALLOW_KWAY is not set",
            partition.nblocks()
        )));
    }

    let mut best = partition.clone();
    let mut best_cost = cost_from_scratch(&best, inputs);

    let mut bad_rounds = 0usize;
    while bad_rounds < config.pass_rounds {
        let mut cutter = Cutter::new(inputs, partition);
        let moves = cutter.perform_pass(config);

        if moves.is_empty() {
            bad_rounds += 1;
            continue;
        }

        engine::replay(partition, inputs, &moves);
        bad_rounds = 0;
        tracing::debug!(moves = moves.len(), "sanchis pass applied");

        let cost = cost_from_scratch(partition, inputs);
        if cost < best_cost {
            best_cost = cost;
            best = partition.clone();
        }
    }

    *partition = best;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;

    #[test]
    fn refuses_kway_without_the_env_gate() {
        let inputs = InputData::new(10, vec![1, 1, 1], vec![vec![0, 1, 2]]);
        let mut partition = Partition::from_blocks(
            vec![
                Block { area: 1, cells: vec![0] },
                Block { area: 1, cells: vec![1] },
                Block { area: 1, cells: vec![2] },
            ],
            3,
        );
        let config = Config::default();
        assert!(run(&inputs, &mut partition, &config).is_err());
    }

    #[test]
    fn converges_within_pass_rounds_on_a_tiny_two_way_instance() {
        let inputs = InputData::new(10, vec![1, 1, 1, 1], vec![vec![0, 1], vec![2, 3]]);
        let mut partition = Partition::from_blocks(
            vec![
                Block { area: 2, cells: vec![0, 2] },
                Block { area: 2, cells: vec![1, 3] },
            ],
            4,
        );
        let mut config = Config::default();
        config.pass_rounds = 3;
        assert!(run(&inputs, &mut partition, &config).is_ok());

        let ncells_seen: usize = partition.blocks.iter().map(|b| b.cells.len()).sum();
        assert_eq!(ncells_seen, 4);
    }

    #[test]
    fn never_returns_a_partition_worse_than_the_one_it_started_from() {
        // Single net touching every cell, already uncut in one block, with
        // an empty second block: every available move only raises cost, so
        // every pass is a bad round and `run` must hand back the starting
        // partition unchanged rather than whatever a forced move left.
        let inputs = InputData::new(
            10,
            vec![1, 1, 1, 1, 1, 1, 1, 1],
            vec![vec![0, 1, 2, 3, 4, 5, 6, 7]],
        );
        let mut partition = Partition::from_blocks(
            vec![
                Block { area: 8, cells: vec![0, 1, 2, 3, 4, 5, 6, 7] },
                Block { area: 0, cells: vec![] },
            ],
            8,
        );
        let cost_before = cost_from_scratch(&partition, &inputs);
        let config = Config::default();
        assert!(run(&inputs, &mut partition, &config).is_ok());

        assert_eq!(cost_from_scratch(&partition, &inputs), cost_before);
        let ncells_seen: usize = partition.blocks.iter().map(|b| b.cells.len()).sum();
        assert_eq!(ncells_seen, 8);
    }
}
