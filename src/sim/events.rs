//! Exogenous perturbations: immediate shocks and decaying schedules

use std::collections::VecDeque;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::{DecayEvent, Spin};
use crate::lattice::Grid;

/// Scaling applied to |strength| when converting it to a per-cell flip
/// probability
pub const EVENT_BETA: f64 = 0.25;

/// Schedule entries below this magnitude are dropped
pub const DECAY_FLOOR: f64 = 0.01;

/// Push the lattice toward the sign of `strength`.
///
/// Every cell gets one uniform draw in row-major order; cells already
/// aligned with the target sign are never flipped. Returns the number of
/// flipped cells.
pub fn inject(lattice: &mut Grid<Spin>, strength: f64, rng: &mut ChaCha8Rng) -> usize {
    let desired: Spin = if strength > 0.0 {
        1
    } else if strength < 0.0 {
        -1
    } else {
        0
    };
    let prob = strength.abs() * EVENT_BETA;

    let mut flipped = 0;
    for spin in lattice.iter_mut() {
        let u: f64 = rng.gen();
        if *spin != desired && u < prob {
            *spin = -*spin;
            flipped += 1;
        }
    }
    flipped
}

/// Build a queue of field perturbations that fade geometrically.
///
/// Each entry carries `current * decay_rate` and shrinks `current` by
/// `1 - decay_rate`; building stops once |current| falls to the floor or
/// `num_steps` entries exist. The engine drains one entry per trial.
pub fn build_decay_schedule(
    initial_strength: f64,
    decay_rate: f64,
    num_steps: usize,
) -> VecDeque<DecayEvent> {
    let mut schedule = VecDeque::new();
    let mut current = initial_strength;

    for _ in 0..num_steps {
        if current.abs() <= DECAY_FLOOR {
            break;
        }
        schedule.push_back(DecayEvent::Field(current * decay_rate));
        current *= 1.0 - decay_rate;
    }

    schedule
}

/// Closed menu of named perturbations the outer layers trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum EventPreset {
    /// Gentle push toward +1
    WeakPositive,
    /// Gentle push toward -1
    WeakNegative,
    /// Firm push toward +1
    ModeratePositive,
    /// Firm push toward -1
    ModerateNegative,
    /// Hard push toward +1
    StrongPositive,
    /// Hard push toward -1
    StrongNegative,
    /// Gentle push whose direction is drawn from the stream
    Oscillating,
}

impl EventPreset {
    /// Resolve the preset to a concrete strength.
    ///
    /// Only `Oscillating` consumes a random draw.
    pub fn strength(&self, rng: &mut ChaCha8Rng) -> f64 {
        match self {
            EventPreset::WeakPositive => 0.3,
            EventPreset::WeakNegative => -0.3,
            EventPreset::ModeratePositive => 0.5,
            EventPreset::ModerateNegative => -0.5,
            EventPreset::StrongPositive => 1.0,
            EventPreset::StrongNegative => -1.0,
            EventPreset::Oscillating => {
                if rng.gen::<bool>() {
                    0.3
                } else {
                    -0.3
                }
            }
        }
    }
}
