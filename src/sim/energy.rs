//! Energy evaluation for the territorial Ising model

use crate::core::types::{FactionId, Spin};
use crate::lattice::{toroidal_neighbors, Grid};

/// Energy contribution of one cell under a hypothetical spin.
///
/// `flip` of +1 evaluates the cell as it is, -1 evaluates it with its
/// spin reversed. Each of the 4 wrap-around neighbors contributes
/// `-J * spin * neighbor`, with `j_intra` when the neighbor shares the
/// cell's faction and `j_inter` otherwise, plus the `-bias * spin` term.
pub fn local_energy(
    row: usize,
    col: usize,
    flip: Spin,
    lattice: &Grid<Spin>,
    factions: &Grid<FactionId>,
    bias: &Grid<f64>,
    j_intra: f64,
    j_inter: f64,
) -> f64 {
    let n = lattice.n();
    let spin = f64::from(*lattice.get(row, col) * flip);
    let home = *factions.get(row, col);

    let mut energy = 0.0;
    for (r, c) in toroidal_neighbors(n, row, col) {
        let j = if *factions.get(r, c) == home {
            j_intra
        } else {
            j_inter
        };
        energy += -j * spin * f64::from(*lattice.get(r, c));
    }
    energy += -bias.get(row, col) * spin;
    energy
}

/// Total lattice energy: the O(N²) sum of every cell's local energy.
///
/// Used at initialization and for resynchronization after direct lattice
/// mutation; the per-trial path maintains energy incrementally instead.
pub fn total_energy(
    lattice: &Grid<Spin>,
    factions: &Grid<FactionId>,
    bias: &Grid<f64>,
    j_intra: f64,
    j_inter: f64,
) -> f64 {
    let n = lattice.n();
    let mut total = 0.0;
    for row in 0..n {
        for col in 0..n {
            total += local_energy(row, col, 1, lattice, factions, bias, j_intra, j_inter);
        }
    }
    total
}
