//! Backing boundary conditions
//!
//! The stack terminates either against a rigid wall (zero displacement at
//! the last bottom face) or radiates into a semi-infinite transmission fluid
//! (a single outgoing wave of amplitude T, no incoming wave).

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::core::interface::accumulate;
use crate::core::media::state;
use crate::core::types::ModelKind;

/// Terminating condition of the layer stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Backing {
    /// Rigid wall: zero normal (and tangential, for solids) displacement
    #[default]
    Rigid,
    /// Semi-infinite transmission fluid below the stack
    Transmission,
}

/// State of the outgoing transmitted wave at the stack's bottom interface
///
/// `[p, u_z]` per unit transmitted amplitude, plus the global column of T.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TransmittedWave {
    pub p: Complex64,
    pub uz: Complex64,
    pub col: usize,
}

impl Backing {
    /// Number of boundary rows contributed for a given last-layer model
    pub fn row_count(&self, last: ModelKind) -> usize {
        match self {
            Backing::Rigid => last.state_dim() / 2,
            Backing::Transmission => last.state_dim() / 2 + 1,
        }
    }
}

/// Write the rigid-wall rows: zero displacement components at the bottom face
pub(crate) fn write_rigid_rows(
    a: &mut Array2<Complex64>,
    row0: usize,
    last: ModelKind,
    bottom: &Array2<Complex64>,
    col0: usize,
) {
    match last {
        ModelKind::Fluid => {
            accumulate(a, row0, col0, bottom, state::FLUID_UZ, 1.0);
        }
        ModelKind::Elastic => {
            accumulate(a, row0, col0, bottom, state::ELASTIC_UX, 1.0);
            accumulate(a, row0 + 1, col0, bottom, state::ELASTIC_UZ, 1.0);
        }
        ModelKind::Poroelastic => {
            accumulate(a, row0, col0, bottom, state::PORO_USX, 1.0);
            accumulate(a, row0 + 1, col0, bottom, state::PORO_USZ, 1.0);
            accumulate(a, row0 + 2, col0, bottom, state::PORO_UTZ, 1.0);
        }
    }
}

/// Write the radiation rows coupling the bottom face to the transmitted wave
///
/// The conditions are the fluid-interface family of the last layer's model,
/// taken against a single outgoing wave (no wave comes back up from the
/// semi-infinite fluid). All rows are homogeneous.
pub(crate) fn write_transmission_rows(
    a: &mut Array2<Complex64>,
    row0: usize,
    last: ModelKind,
    bottom: &Array2<Complex64>,
    col0: usize,
    t: TransmittedWave,
) {
    match last {
        ModelKind::Fluid => {
            accumulate(a, row0, col0, bottom, state::FLUID_P, 1.0);
            a[[row0, t.col]] -= t.p;
            accumulate(a, row0 + 1, col0, bottom, state::FLUID_UZ, 1.0);
            a[[row0 + 1, t.col]] -= t.uz;
        }
        ModelKind::Elastic => {
            accumulate(a, row0, col0, bottom, state::ELASTIC_UZ, 1.0);
            a[[row0, t.col]] -= t.uz;
            // σ_zz + p_transmitted = 0
            accumulate(a, row0 + 1, col0, bottom, state::ELASTIC_SZZ, 1.0);
            a[[row0 + 1, t.col]] += t.p;
            accumulate(a, row0 + 2, col0, bottom, state::ELASTIC_SXZ, 1.0);
        }
        ModelKind::Poroelastic => {
            accumulate(a, row0, col0, bottom, state::PORO_UTZ, 1.0);
            a[[row0, t.col]] -= t.uz;
            accumulate(a, row0 + 1, col0, bottom, state::PORO_P, 1.0);
            a[[row0 + 1, t.col]] -= t.p;
            accumulate(a, row0 + 2, col0, bottom, state::PORO_SZZ, 1.0);
            accumulate(a, row0 + 3, col0, bottom, state::PORO_SXZ, 1.0);
        }
    }
}
