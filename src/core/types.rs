//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Spin value of a single lattice cell.
///
/// Always exactly -1 or +1; every construction and mutation path preserves
/// this, so spin arithmetic never sees another value.
pub type Spin = i8;

/// Trial counter (simulation time unit)
pub type Trial = u64;

/// Dense territory index in `[0, faction_count)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FactionId(pub u8);

impl FactionId {
    pub fn new(id: u8) -> Self {
        Self(id)
    }

    /// Index into per-faction tables
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A pending exogenous perturbation, consumed at most one per trial.
///
/// The only kind the model currently knows is a global field decrement;
/// the enum keeps queue payloads typed rather than stringly keyed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DecayEvent {
    /// Subtract this magnitude from every cell of the bias map
    Field(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faction_id_equality() {
        let a = FactionId(1);
        let b = FactionId(1);
        let c = FactionId(2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_faction_id_index() {
        assert_eq!(FactionId(7).index(), 7);
    }

    #[test]
    fn test_faction_id_hash() {
        use std::collections::HashMap;
        let mut map: HashMap<FactionId, &str> = HashMap::new();
        map.insert(FactionId(1), "north");
        assert_eq!(map.get(&FactionId(1)), Some(&"north"));
    }
}
