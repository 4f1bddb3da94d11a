//! Simulation configuration with documented constants
//!
//! All constructor parameters are collected here with explanations of
//! their purpose and how they interact with each other.

use serde::Deserialize;

use crate::core::error::{Result, SimError};

/// Smallest bias magnitude the field sampler will accept.
///
/// Values closer to zero would be indistinguishable from an unbiased
/// territory, so sampling rejects them.
pub const MIN_FIELD_MAGNITUDE: f64 = 0.1;

/// Configuration for one simulation instance
///
/// The defaults are tuned for visible territory dynamics at moderate
/// noise. Changing them shifts how strongly territories hold together
/// and how noisy the dynamics are.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Lattice side length; the grid holds n*n spins
    pub n: usize,

    /// Temperature T (> 0) controlling acceptance noise
    ///
    /// Near zero almost all uphill flips are rejected ("frozen"); large
    /// values approach unbiased coin flips.
    pub temperature: f64,

    /// Coupling strength between cells of the same territory
    pub j_intra: f64,

    /// Coupling strength between cells of different territories
    ///
    /// Usually much weaker than `j_intra`, so domains form along
    /// territory borders rather than across them.
    pub j_inter: f64,

    /// Inclusive bounds the per-territory bias scalars are drawn from
    ///
    /// Must admit values with |v| >= 0.1 or sampling cannot terminate.
    pub field_range: (f64, f64),

    /// Seed for the single ChaCha8 stream every stochastic operation
    /// draws from
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            n: 25,
            temperature: 2.5,
            j_intra: 2.5,
            j_inter: 0.25,
            field_range: (-400.0, 400.0),
            seed: 12345,
        }
    }
}

impl SimConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        // A 1x1 lattice cannot hold the minimum of 3 factions
        if self.n < 2 {
            return Err(SimError::LatticeSize(self.n));
        }

        if self.temperature <= 0.0 {
            return Err(SimError::Temperature(self.temperature));
        }

        let (low, high) = self.field_range;
        // The sampler rejects |v| < MIN_FIELD_MAGNITUDE, so the range must
        // reach at least that far from zero on one side to terminate.
        if low >= high || (low > -MIN_FIELD_MAGNITUDE && high < MIN_FIELD_MAGNITUDE) {
            return Err(SimError::FieldRange { low, high });
        }

        Ok(())
    }
}

/// Number of territories for a lattice of side `n`: grows with the grid,
/// never fewer than 3, capped at 12.
pub fn faction_count_for(n: usize) -> usize {
    (n / 5 + 2).clamp(3, 12)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_tiny_lattice() {
        let config = SimConfig {
            n: 1,
            ..SimConfig::default()
        };
        assert!(matches!(config.validate(), Err(SimError::LatticeSize(1))));
    }

    #[test]
    fn test_rejects_non_positive_temperature() {
        let config = SimConfig {
            temperature: 0.0,
            ..SimConfig::default()
        };
        assert!(matches!(config.validate(), Err(SimError::Temperature(_))));

        let config = SimConfig {
            temperature: -1.5,
            ..SimConfig::default()
        };
        assert!(matches!(config.validate(), Err(SimError::Temperature(_))));
    }

    #[test]
    fn test_rejects_degenerate_field_range() {
        // Entirely inside the rejection band: sampling would never finish
        let config = SimConfig {
            field_range: (-0.05, 0.05),
            ..SimConfig::default()
        };
        assert!(matches!(config.validate(), Err(SimError::FieldRange { .. })));

        // Inverted bounds
        let config = SimConfig {
            field_range: (1.0, -1.0),
            ..SimConfig::default()
        };
        assert!(matches!(config.validate(), Err(SimError::FieldRange { .. })));

        // One side reaches past the band: fine
        let config = SimConfig {
            field_range: (-0.05, 0.3),
            ..SimConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_faction_count_bounds() {
        assert_eq!(faction_count_for(4), 3);
        assert_eq!(faction_count_for(25), 7);
        assert_eq!(faction_count_for(100), 12);
        for n in 2..200 {
            let k = faction_count_for(n);
            assert!((3..=12).contains(&k));
            assert!(k <= n * n);
        }
    }
}
