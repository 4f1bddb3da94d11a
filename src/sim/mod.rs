//! Territorial Ising simulation
//!
//! Spatially partitioned spin model: an N×N lattice evolves under
//! single-site Metropolis trials whose acceptance depends on
//! nearest-neighbor coupling, territory membership, and a per-territory
//! external field. Fully deterministic for a given seed and operation
//! order.

pub mod energy;
pub mod engine;
pub mod events;
pub mod factions;
pub mod fields;
pub mod metrics;
pub mod snapshot;

pub use engine::{ConstantUpdate, Simulation, SimulationState};
pub use events::{build_decay_schedule, EventPreset, DECAY_FLOOR, EVENT_BETA};
pub use factions::FactionMap;
pub use fields::FieldMap;
pub use snapshot::{Snapshot, SnapshotStore};
