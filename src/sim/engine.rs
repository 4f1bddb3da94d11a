//! Metropolis trial engine and the public simulation facade
//!
//! One `Simulation` owns all of its state exclusively: lattice, faction
//! map, field map, constants, energy history, decay queue, snapshots, and
//! the single ChaCha8 stream every stochastic operation draws from. Trials
//! run strictly sequentially on the calling thread.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::{faction_count_for, SimConfig};
use crate::core::error::{Result, SimError};
use crate::core::types::{DecayEvent, FactionId, Spin, Trial};
use crate::lattice::Grid;
use crate::sim::energy;
use crate::sim::events::{self, EventPreset};
use crate::sim::factions::FactionMap;
use crate::sim::fields::FieldMap;
use crate::sim::metrics;
use crate::sim::snapshot::{Snapshot, SnapshotStore};

/// Trial interval between captures while snapshot recording is enabled
const SNAPSHOT_INTERVAL: Trial = 10;

/// Partial update for [`Simulation::adjust_constants`].
///
/// Unset fields leave the current value untouched; `bias` only applies
/// when `faction` is also set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantUpdate {
    pub faction: Option<FactionId>,
    pub j_intra: Option<f64>,
    pub j_inter: Option<f64>,
    pub temperature: Option<f64>,
    pub bias: Option<f64>,
}

/// Owned copy of everything an external reader needs.
///
/// Never aliases live engine state, so readers can hold it across
/// subsequent trials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub lattice: Grid<Spin>,
    pub faction_map: Grid<FactionId>,
    pub bias_map: Grid<f64>,
    pub energy_history: Vec<f64>,
    pub trial: Trial,
}

impl SimulationState {
    /// Energy history divided by the cell count, the scale displays use
    pub fn energies_per_site(&self) -> Vec<f64> {
        let sites = self.lattice.len() as f64;
        self.energy_history.iter().map(|e| e / sites).collect()
    }
}

/// A self-contained territorial Ising simulation instance
pub struct Simulation {
    n: usize,
    temperature: f64,
    j_intra: f64,
    j_inter: f64,
    lattice: Grid<Spin>,
    factions: FactionMap,
    field: FieldMap,
    trial: Trial,
    energies: Vec<f64>,
    decay_queue: VecDeque<DecayEvent>,
    snapshots: SnapshotStore,
    rng: ChaCha8Rng,
}

impl Simulation {
    /// Build a simulation from a validated config.
    ///
    /// Construction fixes the random draw order: lattice fill, faction
    /// seeding, field sampling. The same seed therefore always produces
    /// the same starting state.
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;

        let n = config.n;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        let lattice = Grid::from_fn(n, |_, _| if rng.gen::<bool>() { 1 } else { -1 });
        let faction_count = faction_count_for(n);
        let factions = FactionMap::partition(n, faction_count, &mut rng)?;
        let field = FieldMap::generate(&factions, config.field_range, &mut rng);

        let initial_energy = energy::total_energy(
            &lattice,
            factions.cells(),
            field.cells(),
            config.j_intra,
            config.j_inter,
        );

        tracing::info!(
            "simulation initialized: {}x{} lattice, {} factions, seed {}",
            n,
            n,
            faction_count,
            config.seed
        );

        Ok(Self {
            n,
            temperature: config.temperature,
            j_intra: config.j_intra,
            j_inter: config.j_inter,
            lattice,
            factions,
            field,
            trial: 0,
            energies: vec![initial_energy],
            decay_queue: VecDeque::new(),
            snapshots: SnapshotStore::new(),
            rng,
        })
    }

    /// Run `num_steps` Metropolis trials in order.
    ///
    /// Each trial draws a cell (row then column), evaluates the energy
    /// cost of flipping it, draws one acceptance uniform, and appends
    /// exactly one energy-history entry whether or not the flip landed.
    /// The acceptance uniform is drawn even for downhill moves so every
    /// trial consumes the same number of draws.
    pub fn step(&mut self, num_steps: usize, record_snapshots: bool) {
        for _ in 0..num_steps {
            let row = self.rng.gen_range(0..self.n);
            let col = self.rng.gen_range(0..self.n);

            let delta = self.flip_delta(row, col);
            let u: f64 = self.rng.gen();
            let accepted = delta <= 0.0 || u <= (-delta / self.temperature).exp();

            let last = self.energies[self.trial as usize];
            if accepted {
                let cell = self.lattice.get_mut(row, col);
                *cell = -*cell;
                self.energies.push(last + delta);
            } else {
                self.energies.push(last);
            }
            self.trial += 1;

            if record_snapshots && self.trial % SNAPSHOT_INTERVAL == 0 {
                self.save_snapshot();
            }

            if let Some(event) = self.decay_queue.pop_front() {
                match event {
                    DecayEvent::Field(amount) => self.field.decay(amount, &self.factions),
                }
            }
        }
    }

    /// Energy cost of flipping the cell at (row, col)
    fn flip_delta(&self, row: usize, col: usize) -> f64 {
        let flipped = energy::local_energy(
            row,
            col,
            -1,
            &self.lattice,
            self.factions.cells(),
            self.field.cells(),
            self.j_intra,
            self.j_inter,
        );
        let kept = energy::local_energy(
            row,
            col,
            1,
            &self.lattice,
            self.factions.cells(),
            self.field.cells(),
            self.j_intra,
            self.j_inter,
        );
        flipped - kept
    }

    /// Update any subset of the mutable constants.
    ///
    /// Everything is validated before anything is applied, so a rejected
    /// update leaves the simulation untouched.
    pub fn adjust_constants(&mut self, update: ConstantUpdate) -> Result<()> {
        if let Some(t) = update.temperature {
            if t <= 0.0 {
                return Err(SimError::Temperature(t));
            }
        }
        if let Some(faction) = update.faction {
            if !self.factions.contains(faction) {
                return Err(SimError::UnknownFaction(faction.0));
            }
        }

        if let Some(j) = update.j_intra {
            self.j_intra = j;
        }
        if let Some(j) = update.j_inter {
            self.j_inter = j;
        }
        if let Some(t) = update.temperature {
            self.temperature = t;
        }
        if let (Some(faction), Some(bias)) = (update.faction, update.bias) {
            self.field.set_faction_bias(faction, bias, &self.factions)?;
        }

        Ok(())
    }

    /// Apply an immediate perturbation of the given signed strength.
    ///
    /// Returns the number of flipped cells. The energy history is not
    /// rebased: it stays internally consistent (initial total plus
    /// accumulated deltas) but its baseline drifts from `total_energy`
    /// once an injection flips cells. Call [`Simulation::resync_energy`]
    /// to pin the last entry back to the absolute total.
    pub fn inject_event(&mut self, strength: f64) -> usize {
        let flipped = events::inject(&mut self.lattice, strength, &mut self.rng);
        tracing::debug!("injected event with strength {}: {} cells flipped", strength, flipped);
        flipped
    }

    /// Resolve a named preset against the simulation's own stream and
    /// inject it
    pub fn inject_preset(&mut self, preset: EventPreset) -> usize {
        let strength = preset.strength(&mut self.rng);
        self.inject_event(strength)
    }

    /// Install a pending perturbation queue; `step` drains one entry per
    /// trial
    pub fn install_decay_schedule(&mut self, schedule: VecDeque<DecayEvent>) {
        self.decay_queue = schedule;
    }

    /// Entries still waiting in the decay queue
    pub fn pending_decay_events(&self) -> usize {
        self.decay_queue.len()
    }

    /// Recompute the absolute total energy and rebase the last history
    /// entry on it
    pub fn resync_energy(&mut self) {
        let total = energy::total_energy(
            &self.lattice,
            self.factions.cells(),
            self.field.cells(),
            self.j_intra,
            self.j_inter,
        );
        let last = self.energies.len() - 1;
        self.energies[last] = total;
    }

    /// Owned copies of the observable state
    pub fn get_current_state(&self) -> SimulationState {
        SimulationState {
            lattice: self.lattice.clone(),
            faction_map: self.factions.cells().clone(),
            bias_map: self.field.cells().clone(),
            energy_history: self.energies.clone(),
            trial: self.trial,
        }
    }

    pub fn spin_percentages(&self) -> Vec<f64> {
        metrics::spin_percentages(&self.lattice, &self.factions)
    }

    pub fn magnetization(&self) -> f64 {
        metrics::magnetization(&self.lattice)
    }

    pub fn agreement_score(&self) -> f64 {
        metrics::agreement_score(&self.lattice)
    }

    /// Capture the current state into the snapshot store
    pub fn save_snapshot(&mut self) {
        self.snapshots.capture(
            self.trial,
            &self.lattice,
            &self.energies,
            self.field.cells(),
        );
    }

    /// Copy of the snapshot at `index`; live state is left untouched
    pub fn restore_snapshot(&self, index: usize) -> Result<Snapshot> {
        self.snapshots.get(index).cloned()
    }

    /// Replace lattice, energy history, bias map, and trial counter with
    /// a snapshot's contents in one operation.
    ///
    /// The per-faction scalar table is resynchronized from the restored
    /// bias map.
    pub fn apply_snapshot(&mut self, snapshot: &Snapshot) {
        self.lattice = snapshot.lattice.clone();
        self.energies = snapshot.energy_history.clone();
        self.trial = snapshot.trial;
        self.field
            .restore_cells(snapshot.bias_map.clone(), &self.factions);
    }

    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }

    /// Lattice side length
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn trial_count(&self) -> Trial {
        self.trial
    }

    pub fn faction_count(&self) -> usize {
        self.factions.count()
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn energy_history(&self) -> &[f64] {
        &self.energies
    }
}
