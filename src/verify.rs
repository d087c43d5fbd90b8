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

//! Checks that every cell appears in exactly one block. Run only when
//! `PA2_VERIFY_BLOCKS` is set, right before the result is written out.

use crate::error::{Error, Result};
use crate::model::Partition;

/// Verifies that `partition` assigns every `CellId` in `0..ncells` to exactly
/// one block. Reports the first duplicate cell it finds, or the count of
/// cells that are missing entirely.
pub fn verify(partition: &Partition, ncells: usize) -> Result<()> {
    let mut seen = vec![false; ncells];

    for block in &partition.blocks {
        for &cell_id in &block.cells {
            if cell_id >= ncells {
                return Err(Error::Invariant(format!(
                    "cell {cell_id} is out of range for N = {ncells}"
                )));
            }
            if seen[cell_id] {
                return Err(Error::Invariant(format!("cell {cell_id} appears more than once")));
            }
            seen[cell_id] = true;
        }
    }

    let missing = seen.iter().filter(|&&s| !s).count();
    if missing > 0 {
        return Err(Error::Invariant(format!("{missing} cell(s) missing from the partition")));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;

    #[test]
    fn accepts_a_valid_partition() {
        let partition = Partition::from_blocks(
            vec![
                Block { area: 1, cells: vec![0] },
                Block { area: 2, cells: vec![1, 2] },
            ],
            3,
        );
        assert!(verify(&partition, 3).is_ok());
    }

    #[test]
    fn reports_duplicate_cell() {
        let partition = Partition::from_blocks(
            vec![
                Block { area: 1, cells: vec![0] },
                Block { area: 1, cells: vec![0] },
            ],
            1,
        );
        let err = verify(&partition, 1).unwrap_err();
        assert!(matches!(err, Error::Invariant(_)));
    }

    #[test]
    fn reports_missing_cells() {
        let partition = Partition::from_blocks(vec![Block { area: 1, cells: vec![0] }], 3);
        let err = verify(&partition, 3).unwrap_err();
        let Error::Invariant(msg) = err else { panic!("expected Invariant") };
        assert!(msg.contains('2'));
    }
}
