//! Read-only derived statistics over the live lattice

use crate::core::types::Spin;
use crate::lattice::{toroidal_neighbors, Grid};
use crate::sim::factions::FactionMap;

/// Net spin per faction as a percentage of its cell count, rounded to 2
/// decimals. An empty faction reports 0 (cannot occur through
/// `FactionMap::partition`, handled anyway).
pub fn spin_percentages(lattice: &Grid<Spin>, factions: &FactionMap) -> Vec<f64> {
    let mut net = vec![0i64; factions.count()];
    let mut members = vec![0i64; factions.count()];

    for (spin, faction) in lattice.iter().zip(factions.cells().iter()) {
        net[faction.index()] += i64::from(*spin);
        members[faction.index()] += 1;
    }

    net.iter()
        .zip(members.iter())
        .map(|(net, members)| {
            if *members == 0 {
                0.0
            } else {
                let percent = 100.0 * *net as f64 / *members as f64;
                (percent * 100.0).round() / 100.0
            }
        })
        .collect()
}

/// Mean spin over the whole lattice, in [-1, 1]
pub fn magnetization(lattice: &Grid<Spin>) -> f64 {
    let sum: i64 = lattice.iter().map(|s| i64::from(*s)).sum();
    sum as f64 / lattice.len() as f64
}

/// Fraction of (cell, toroidal neighbor) pairs that agree, in [0, 1].
///
/// Measures local spatial consensus; orthogonal to the sign of the
/// global magnetization.
pub fn agreement_score(lattice: &Grid<Spin>) -> f64 {
    let n = lattice.n();
    let mut aligned = 0usize;

    for row in 0..n {
        for col in 0..n {
            let spin = *lattice.get(row, col);
            for (r, c) in toroidal_neighbors(n, row, col) {
                if *lattice.get(r, c) == spin {
                    aligned += 1;
                }
            }
        }
    }

    aligned as f64 / (4 * n * n) as f64
}
