//! Territory partitioning via multi-source flood fill

use std::collections::VecDeque;

use rand::seq::index::sample;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::core::types::FactionId;
use crate::lattice::{bounded_neighbors, Grid};

/// Immutable assignment of every lattice cell to one of `count` factions
///
/// Built once at initialization; partitions the grid into non-empty,
/// mutually exclusive, exhaustive territories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactionMap {
    cells: Grid<FactionId>,
    count: usize,
}

impl FactionMap {
    /// Partition an n×n grid into `count` territories.
    ///
    /// Draws `count` distinct seed cells, then expands all seeds at once
    /// with a FIFO frontier over bounded 4-connected neighbors. Strict
    /// breadth order approximates a discrete Voronoi tessellation; ties
    /// go to whichever frontier entry pops first, not to an explicit
    /// distance metric.
    pub fn partition(n: usize, count: usize, rng: &mut ChaCha8Rng) -> Result<Self> {
        if count > n * n {
            return Err(SimError::FactionOverflow { count, n });
        }

        let mut cells = Grid::filled(n, FactionId(0));
        let mut visited = vec![false; n * n];
        let mut frontier: VecDeque<(usize, usize, FactionId)> = VecDeque::new();

        let seeds = sample(rng, n * n, count);
        for (id, cell) in seeds.into_iter().enumerate() {
            let (row, col) = (cell / n, cell % n);
            let faction = FactionId(id as u8);
            cells.set(row, col, faction);
            visited[cell] = true;
            frontier.push_back((row, col, faction));
        }

        while let Some((row, col, faction)) = frontier.pop_front() {
            for (r, c) in bounded_neighbors(n, row, col) {
                if !visited[r * n + c] {
                    visited[r * n + c] = true;
                    cells.set(r, c, faction);
                    frontier.push_back((r, c, faction));
                }
            }
        }

        Ok(Self { cells, count })
    }

    /// Number of factions
    pub fn count(&self) -> usize {
        self.count
    }

    /// The underlying per-cell assignment grid
    pub fn cells(&self) -> &Grid<FactionId> {
        &self.cells
    }

    #[inline]
    pub fn faction_at(&self, row: usize, col: usize) -> FactionId {
        *self.cells.get(row, col)
    }

    /// True if `faction` is one of this map's territories
    pub fn contains(&self, faction: FactionId) -> bool {
        faction.index() < self.count
    }

    /// All faction ids in order
    pub fn ids(&self) -> impl Iterator<Item = FactionId> {
        (0..self.count as u8).map(FactionId)
    }

    /// Number of cells assigned to `faction`
    pub fn member_count(&self, faction: FactionId) -> usize {
        self.cells.iter().filter(|f| **f == faction).count()
    }
}
