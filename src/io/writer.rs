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

//! Serializes a partition as:
//!
//! ```text
//! <cost>
//! <K>
//! <block_of_cell[0]>
//! <block_of_cell[1]>
//! ...
//! ```

use std::io::Write;

use crate::common::Cost;
use crate::error::Result;
use crate::model::Partition;

/// Writes `partition`'s cost, block count, and per-cell block assignment to
/// `sink`, one token per line.
pub fn write_output<W: Write>(mut sink: W, cost: Cost, partition: &Partition) -> Result<()> {
    writeln!(sink, "{cost}")?;
    writeln!(sink, "{}", partition.nblocks())?;
    for &block_id in &partition.block_of_cell {
        writeln!(sink, "{block_id}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::read_input;
    use crate::model::{Block, InputData};

    #[test]
    fn trivial_instance_round_trips() {
        let partition = Partition::from_blocks(
            vec![Block { area: 3, cells: vec![0, 1, 2] }],
            3,
        );
        let mut buf = Vec::new();
        write_output(&mut buf, 0, &partition).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "0\n1\n0\n0\n0\n");
    }

    #[test]
    fn writer_output_parses_back_to_equivalent_partition() {
        let blocks = vec![
            Block { area: 2, cells: vec![0] },
            Block { area: 2, cells: vec![1, 2] },
        ];
        let partition = Partition::from_blocks(blocks, 3);
        let mut buf = Vec::new();
        write_output(&mut buf, 7, &partition).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        let cost: i64 = lines.next().unwrap().parse().unwrap();
        let k: usize = lines.next().unwrap().parse().unwrap();
        let block_of_cell: Vec<usize> = lines.map(|l| l.parse().unwrap()).collect();

        assert_eq!(cost, 7);
        assert_eq!(k, 2);
        assert_eq!(block_of_cell, partition.block_of_cell);

        // the recovered assignment is a legal partition of the same inputs
        let inputs = InputData::new(10, vec![2, 1, 1], vec![vec![0, 1, 2]]);
        let mut rebuilt = vec![Vec::new(); k];
        for (cell, &block) in block_of_cell.iter().enumerate() {
            rebuilt[block].push(cell);
        }
        assert_eq!(rebuilt[0], vec![0]);
        assert_eq!(rebuilt[1], vec![1, 2]);
        let _ = inputs;
    }
}
