//! Integration tests exercising the crate's public pipeline end to end:
//! parse an instance, build a starting partition, refine it, verify it, and
//! write it back out.

use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use hgpart::config::Config;
use hgpart::cost::cost_from_scratch;
use hgpart::error::Error;
use hgpart::io::{read_input, write_output};
use hgpart::model::{Block, Partition};
use hgpart::sa::SaEngine;
use hgpart::sanchis;
use hgpart::starting::find_starting_partition;
use hgpart::verify::verify;

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(1234)
}

#[test]
fn end_to_end_pipeline_on_a_small_instance() {
    // 6 cells, unit area, area cap 3 -> at least 2 blocks. Three nets, each
    // spanning a different pair of cells, so the instance is non-trivially
    // cuttable.
    let text = "3\n.cell 6\n0 1\n1 1\n2 1\n3 1\n4 1\n5 1\n.net 3\n2 0 3\n2 1 4\n2 2 5\n";
    let inputs = read_input(text.as_bytes()).unwrap();

    let mut rng = rng();
    let mut partition = find_starting_partition(&inputs, &mut rng).unwrap();
    for block in &partition.blocks {
        assert!(block.area <= inputs.max_block_area);
    }

    let mut engine = SaEngine::new(&inputs, &partition);
    let cost = engine.run(&mut partition, &mut rng, Duration::from_millis(100));
    assert_eq!(cost, cost_from_scratch(&partition, &inputs));

    verify(&partition, inputs.ncells()).unwrap();

    for block in &partition.blocks {
        assert!(block.area <= inputs.max_block_area);
    }

    let mut buf = Vec::new();
    write_output(&mut buf, cost, &partition).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let mut lines = text.lines();
    let written_cost: i64 = lines.next().unwrap().parse().unwrap();
    let written_k: usize = lines.next().unwrap().parse().unwrap();
    let block_of_cell: Vec<usize> = lines.map(|l| l.parse().unwrap()).collect();

    assert_eq!(written_cost, cost);
    assert_eq!(written_k, partition.nblocks());
    assert_eq!(block_of_cell, partition.block_of_cell);
}

#[test]
fn infeasible_instance_is_rejected_before_any_search_starts() {
    // A single cell whose own area already exceeds the cap can never be
    // placed, regardless of how many blocks are tried.
    let text = "2\n.cell 1\n0 5\n.net 0\n";
    let inputs = read_input(text.as_bytes()).unwrap();
    let err = find_starting_partition(&inputs, &mut rng()).unwrap_err();
    assert!(matches!(err, Error::Infeasible(_)));
}

#[test]
fn malformed_instance_is_rejected_with_a_format_error() {
    let text = "10\n.cell 2\n0 1\n1 1\n.nets 1\n2 0 1\n";
    let err = read_input(text.as_bytes()).unwrap_err();
    assert!(matches!(err, Error::Format(_)));
}

#[test]
fn sanchis_pass_never_increases_cut_cost() {
    // 8 cells, two nets of size 4 each, split evenly across two blocks so
    // both nets start out fully cut.
    let text = "10\n.cell 8\n0 1\n1 1\n2 1\n3 1\n4 1\n5 1\n6 1\n7 1\n\
                .net 2\n4 0 1 2 3\n4 4 5 6 7\n";
    let inputs = read_input(text.as_bytes()).unwrap();

    let mut partition = Partition::from_blocks(
        vec![
            Block { area: 4, cells: vec![0, 1, 4, 5] },
            Block { area: 4, cells: vec![2, 3, 6, 7] },
        ],
        8,
    );
    let cost_before = cost_from_scratch(&partition, &inputs);
    assert!(cost_before > 0, "both nets should start out cut");

    let config = Config::default();
    sanchis::run(&inputs, &mut partition, &config).unwrap();
    let cost_after = cost_from_scratch(&partition, &inputs);

    assert!(cost_after <= cost_before);
    for block in &partition.blocks {
        assert!(block.area <= inputs.max_block_area);
    }
}

#[test]
fn every_cell_is_assigned_exactly_once_after_a_full_run() {
    let text = "4\n.cell 10\n0 1\n1 1\n2 1\n3 1\n4 1\n5 1\n6 1\n7 1\n8 1\n9 1\n\
                .net 4\n3 0 1 2\n3 3 4 5\n2 6 7\n3 7 8 9\n";
    let inputs = read_input(text.as_bytes()).unwrap();

    let mut rng = rng();
    let mut partition = find_starting_partition(&inputs, &mut rng).unwrap();
    let mut engine = SaEngine::new(&inputs, &partition);
    engine.run(&mut partition, &mut rng, Duration::from_millis(50));

    verify(&partition, inputs.ncells()).unwrap();
}
