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

//! The immutable hypergraph instance every engine in this crate operates on.

use crate::common::{Area, CellId, NetId};

/// A net (hyperedge): the set of cells it connects.
pub type Net = Vec<CellId>;

/// An immutable hypergraph instance: cell areas, nets, and the adjacency
/// indexes derived from them. Built once by the input parser and never
/// mutated afterwards; every engine borrows it for the lifetime of a run.
#[derive(Debug, Clone)]
pub struct InputData {
    /// Per-block area cap.
    pub max_block_area: Area,
    /// Cell areas, indexed by `CellId`.
    pub cell_areas: Vec<Area>,
    /// Nets, indexed by `NetId`; `cells_of_net[n]` is the set of cells net `n`
    /// connects.
    pub cells_of_net: Vec<Net>,
    /// The inverse adjacency: `nets_of_cell[c]` lists every net touching cell
    /// `c`. Materialized eagerly so every engine gets O(1) amortized
    /// adjacency instead of scanning `cells_of_net`.
    pub nets_of_cell: Vec<Vec<NetId>>,
    /// `Σ cell_areas`.
    pub total_area: Area,
}

impl InputData {
    /// Builds an `InputData`, materializing the `nets_of_cell` inverse index.
    ///
    /// # Panics
    /// Never panics; cell ids in `cells_of_net` that fall outside
    /// `0..cell_areas.len()` are simply ignored by the adjacency pass (the
    /// input parser is responsible for rejecting such instances up front).
    pub fn new(max_block_area: Area, cell_areas: Vec<Area>, cells_of_net: Vec<Net>) -> Self {
        let ncells = cell_areas.len();
        let mut nets_of_cell = vec![Vec::new(); ncells];
        for (net_id, net) in cells_of_net.iter().enumerate() {
            for &cell_id in net {
                if cell_id < ncells {
                    nets_of_cell[cell_id].push(net_id);
                }
            }
        }
        let total_area = cell_areas.iter().sum();

        InputData {
            max_block_area,
            cell_areas,
            cells_of_net,
            nets_of_cell,
            total_area,
        }
    }

    /// Number of cells, `N`.
    pub fn ncells(&self) -> usize {
        self.cell_areas.len()
    }

    /// Number of nets, `M`.
    pub fn nnets(&self) -> usize {
        self.cells_of_net.len()
    }

    /// `⌈total_area / max_block_area⌉`, the smallest number of blocks that
    /// could possibly satisfy the area cap.
    pub fn min_blocks(&self) -> usize {
        if self.max_block_area == 0 {
            return self.ncells();
        }
        ((self.total_area + self.max_block_area - 1) / self.max_block_area) as usize
    }

    /// `max_c |nets_of_cell[c]|`, the largest number of nets touching any one
    /// cell. Used to size the Sanchis gain table (`p`, its per-cell gain cap).
    pub fn max_degree(&self) -> usize {
        self.nets_of_cell.iter().map(Vec::len).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> InputData {
        // 3 cells, area 1 each, one net touching all three.
        InputData::new(10, vec![1, 1, 1], vec![vec![0, 1, 2]])
    }

    #[test]
    fn derives_inverse_adjacency() {
        let data = tiny();
        assert_eq!(data.nets_of_cell, vec![vec![0], vec![0], vec![0]]);
    }

    #[test]
    fn total_area_and_min_blocks() {
        let data = tiny();
        assert_eq!(data.total_area, 3);
        assert_eq!(data.min_blocks(), 1);
    }

    #[test]
    fn min_blocks_rounds_up() {
        // total_area = 8, cap = 3 -> ceil(8/3) = 3
        let data = InputData::new(3, vec![2, 2, 2, 2], vec![vec![0, 1, 2, 3]]);
        assert_eq!(data.min_blocks(), 3);
    }

    #[test]
    fn max_degree_is_largest_cell_degree() {
        // cell 0 touches two nets, others touch one.
        let data = InputData::new(10, vec![1, 1, 1], vec![vec![0, 1], vec![0, 2]]);
        assert_eq!(data.max_degree(), 2);
    }
}
