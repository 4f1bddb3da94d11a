//! Point-in-time captures of simulation state for timeline scrubbing

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::core::types::{Spin, Trial};
use crate::lattice::Grid;

/// Immutable deep copy of the state a trial left behind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub trial: Trial,
    pub lattice: Grid<Spin>,
    pub energy_history: Vec<f64>,
    pub bias_map: Grid<f64>,
}

/// Append-only store of snapshots, ordered by capture time
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    snapshots: Vec<Snapshot>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Deep-copy the given state into a new snapshot record
    pub fn capture(
        &mut self,
        trial: Trial,
        lattice: &Grid<Spin>,
        energy_history: &[f64],
        bias_map: &Grid<f64>,
    ) {
        self.snapshots.push(Snapshot {
            trial,
            lattice: lattice.clone(),
            energy_history: energy_history.to_vec(),
            bias_map: bias_map.clone(),
        });
    }

    /// Snapshot at `index`; the store is left untouched either way
    pub fn get(&self, index: usize) -> Result<&Snapshot> {
        self.snapshots.get(index).ok_or(SimError::SnapshotIndex {
            index,
            count: self.snapshots.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state(n: usize, trial: Trial) -> (Grid<Spin>, Vec<f64>, Grid<f64>) {
        let lattice = Grid::from_fn(n, |row, col| if (row + col) % 2 == 0 { 1 } else { -1 });
        let history = (0..=trial).map(|t| t as f64 * -0.5).collect();
        let bias = Grid::filled(n, 1.25);
        (lattice, history, bias)
    }

    #[test]
    fn test_capture_deep_copies() {
        let mut store = SnapshotStore::new();
        let (mut lattice, history, bias) = sample_state(4, 3);

        store.capture(3, &lattice, &history, &bias);
        lattice.set(0, 0, -*lattice.get(0, 0));

        // The stored copy kept the original value
        let snap = store.get(0).unwrap();
        assert_ne!(snap.lattice.get(0, 0), lattice.get(0, 0));
        assert_eq!(snap.trial, 3);
        assert_eq!(snap.energy_history.len(), 4);
    }

    #[test]
    fn test_snapshots_keep_capture_order() {
        let mut store = SnapshotStore::new();
        let (lattice, history, bias) = sample_state(4, 2);

        store.capture(10, &lattice, &history, &bias);
        store.capture(20, &lattice, &history, &bias);

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0).unwrap().trial, 10);
        assert_eq!(store.get(1).unwrap().trial, 20);
    }

    #[test]
    fn test_out_of_range_index_is_an_error() {
        let store = SnapshotStore::new();
        assert!(matches!(
            store.get(0),
            Err(SimError::SnapshotIndex { index: 0, count: 0 })
        ));
    }
}
