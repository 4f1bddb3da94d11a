//! Per-territory external field scalars and their per-cell expansion
//!
//! The scalar table and the cell map describe the same field at two
//! granularities. Both live in one structure and every mutation goes
//! through it, so the two views cannot drift apart.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::MIN_FIELD_MAGNITUDE;
use crate::core::error::{Result, SimError};
use crate::core::types::FactionId;
use crate::lattice::Grid;
use crate::sim::factions::FactionMap;

/// External bias field: one scalar per faction plus the expanded
/// per-cell map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMap {
    values: Vec<f64>,
    cells: Grid<f64>,
}

impl FieldMap {
    /// Sample one scalar per faction and expand to a per-cell map
    pub fn generate(factions: &FactionMap, range: (f64, f64), rng: &mut ChaCha8Rng) -> Self {
        let values = generate_values(factions.count(), range, rng);
        let cells = expand(factions, &values);
        Self { values, cells }
    }

    /// Per-faction scalar table
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Per-cell bias map
    pub fn cells(&self) -> &Grid<f64> {
        &self.cells
    }

    #[inline]
    pub fn bias_at(&self, row: usize, col: usize) -> f64 {
        *self.cells.get(row, col)
    }

    /// Set one faction's bias, updating its scalar entry and every one of
    /// its cells together
    pub fn set_faction_bias(
        &mut self,
        faction: FactionId,
        value: f64,
        factions: &FactionMap,
    ) -> Result<()> {
        if !factions.contains(faction) {
            return Err(SimError::UnknownFaction(faction.0));
        }

        self.values[faction.index()] = value;
        for (bias, f) in self.cells.iter_mut().zip(factions.cells().iter()) {
            if *f == faction {
                *bias = value;
            }
        }
        Ok(())
    }

    /// Subtract `amount` from every cell, then resynchronize each
    /// faction's scalar as the mean over its cells
    pub fn decay(&mut self, amount: f64, factions: &FactionMap) {
        self.cells.map_in_place(|bias| *bias -= amount);
        self.resync_values(factions);
    }

    /// Replace the cell map wholesale (snapshot application) and
    /// resynchronize the scalar table from it
    pub fn restore_cells(&mut self, cells: Grid<f64>, factions: &FactionMap) {
        self.cells = cells;
        self.resync_values(factions);
    }

    fn resync_values(&mut self, factions: &FactionMap) {
        let mut sums = vec![0.0; factions.count()];
        let mut counts = vec![0usize; factions.count()];

        for (bias, faction) in self.cells.iter().zip(factions.cells().iter()) {
            sums[faction.index()] += *bias;
            counts[faction.index()] += 1;
        }

        for (i, value) in self.values.iter_mut().enumerate() {
            if counts[i] > 0 {
                *value = sums[i] / counts[i] as f64;
            }
        }
    }
}

/// Draw `count` bias scalars uniformly from `range`, rounded to 2
/// decimals, rejecting magnitudes below 0.1
pub fn generate_values(count: usize, range: (f64, f64), rng: &mut ChaCha8Rng) -> Vec<f64> {
    let (low, high) = range;
    let mut values = Vec::with_capacity(count);

    while values.len() < count {
        let raw: f64 = rng.gen_range(low..high);
        let rounded = (raw * 100.0).round() / 100.0;
        if rounded.abs() >= MIN_FIELD_MAGNITUDE {
            values.push(rounded);
        }
    }

    values
}

fn expand(factions: &FactionMap, values: &[f64]) -> Grid<f64> {
    Grid::from_fn(factions.cells().n(), |row, col| {
        values[factions.faction_at(row, col).index()]
    })
}
