//! Spin Factions - territorial Ising model simulation engine

pub mod core;
pub mod lattice;
pub mod sim;

pub use crate::core::config::SimConfig;
pub use crate::core::error::{Result, SimError};
pub use crate::core::types::{DecayEvent, FactionId, Spin, Trial};
pub use crate::sim::{ConstantUpdate, Simulation, SimulationState};
