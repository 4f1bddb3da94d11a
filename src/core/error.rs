use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("cannot seed {count} factions on a {n}x{n} lattice")]
    FactionOverflow { count: usize, n: usize },

    #[error("lattice size must be at least 2, got {0}")]
    LatticeSize(usize),

    #[error("temperature must be strictly positive, got {0}")]
    Temperature(f64),

    #[error("field range [{low}, {high}] cannot produce bias values of magnitude >= 0.1")]
    FieldRange { low: f64, high: f64 },

    #[error("unknown faction id {0}")]
    UnknownFaction(u8),

    #[error("snapshot index {index} out of range ({count} snapshots stored)")]
    SnapshotIndex { index: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, SimError>;
