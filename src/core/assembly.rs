//! Global system assembly
//!
//! Stacks the per-layer state matrices, the interface coupling blocks and
//! the backing rows into one square dense system over
//! [R, layer amplitudes..., T?]. Only the top-interface rows carry a
//! right-hand side (the known incident wave); everything else is homogeneous
//! continuity. Thanks to the local phase referencing of the layer matrices
//! the assembled entries never grow with thickness or dissipation, which is
//! what keeps the solve well behaved where naive transfer-matrix cascading
//! overflows.

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::core::backing::{write_rigid_rows, write_transmission_rows, Backing, TransmittedWave};
use crate::core::error::Result;
use crate::core::interface::{accumulate, Coupling};
use crate::core::layer::Layer;
use crate::core::media::fluid::FluidProps;
use crate::core::media::{state, vertical_wavenumber};
use crate::core::types::ModelKind;

/// Assembled global system for one (ω, kₓ) point
#[derive(Debug, Clone)]
pub(crate) struct GlobalSystem {
    /// Square system matrix
    pub matrix: Array2<Complex64>,
    /// Right-hand side (incident-wave terms)
    pub rhs: Array1<Complex64>,
    /// Column of the transmitted amplitude, if any
    pub t_col: Option<usize>,
}

/// Pressure and normal displacement of a unit-amplitude plane wave in a
/// semi-infinite fluid, per propagation direction
///
/// Above the stack the incident wave is the down-going one and the reflected
/// wave the up-going one; below the stack the transmitted wave is down-going.
struct HalfSpaceWave {
    /// [p, u_z] of the down-going wave
    down: [Complex64; 2],
    /// [p, u_z] of the up-going wave
    up: [Complex64; 2],
}

fn half_space_wave(props: FluidProps, omega: f64, kx: Complex64) -> HalfSpaceWave {
    let k_sq = omega * omega * props.rho / props.k;
    let kz = vertical_wavenumber(k_sq, kx);
    let one = Complex64::new(1.0, 0.0);
    let uz = Complex64::i() * kz / (props.rho * omega * omega);
    HalfSpaceWave {
        down: [one, -uz],
        up: [one, uz],
    }
}

/// Assemble the global system for `layers` under `backing`
///
/// `couplings` must hold one resolved coupling per consecutive layer pair;
/// `transmitted` carries the transmission half-space properties iff the
/// backing transmits.
pub(crate) fn assemble(
    layers: &[Layer],
    couplings: &[Coupling],
    backing: Backing,
    omega: f64,
    kx: Complex64,
    incident: FluidProps,
    transmitted: Option<FluidProps>,
) -> Result<GlobalSystem> {
    debug_assert!(!layers.is_empty());
    debug_assert_eq!(couplings.len(), layers.len().saturating_sub(1));

    let models: Vec<ModelKind> = layers.iter().map(|l| l.medium().model()).collect();

    // Column layout: R, then one amplitude block per layer, then T
    let mut col0 = Vec::with_capacity(layers.len());
    let mut next = 1;
    for model in &models {
        col0.push(next);
        next += model.state_dim();
    }
    let t_col = match backing {
        Backing::Transmission => Some(next),
        Backing::Rigid => None,
    };
    let n = next + t_col.map_or(0, |_| 1);

    let faces = layers
        .iter()
        .map(|l| l.face_matrices(omega, kx))
        .collect::<Result<Vec<_>>>()?;

    let mut a: Array2<Complex64> = Array2::zeros((n, n));
    let mut rhs: Array1<Complex64> = Array1::zeros(n);
    let mut row = 0;

    // Top interface: incident half-space against the first layer. The
    // incident amplitude is known (unit), so these rows carry the RHS.
    let top = half_space_wave(incident, omega, kx);
    let first = &faces[0].top;
    match models[0] {
        ModelKind::Fluid => {
            for (c, half_c) in [(state::FLUID_P, 0), (state::FLUID_UZ, 1)] {
                a[[row, 0]] = top.up[half_c];
                accumulate(&mut a, row, col0[0], first, c, -1.0);
                rhs[row] = -top.down[half_c];
                row += 1;
            }
        }
        ModelKind::Elastic => {
            a[[row, 0]] = top.up[1];
            accumulate(&mut a, row, col0[0], first, state::ELASTIC_UZ, -1.0);
            rhs[row] = -top.down[1];
            row += 1;
            // σ_zz + p = 0
            a[[row, 0]] = top.up[0];
            accumulate(&mut a, row, col0[0], first, state::ELASTIC_SZZ, 1.0);
            rhs[row] = -top.down[0];
            row += 1;
            accumulate(&mut a, row, col0[0], first, state::ELASTIC_SXZ, 1.0);
            row += 1;
        }
        ModelKind::Poroelastic => {
            a[[row, 0]] = top.up[1];
            accumulate(&mut a, row, col0[0], first, state::PORO_UTZ, -1.0);
            rhs[row] = -top.down[1];
            row += 1;
            a[[row, 0]] = top.up[0];
            accumulate(&mut a, row, col0[0], first, state::PORO_P, -1.0);
            rhs[row] = -top.down[0];
            row += 1;
            accumulate(&mut a, row, col0[0], first, state::PORO_SZZ, 1.0);
            row += 1;
            accumulate(&mut a, row, col0[0], first, state::PORO_SXZ, 1.0);
            row += 1;
        }
    }

    // Inter-layer continuity
    for (i, coupling) in couplings.iter().enumerate() {
        coupling.write_rows(
            &mut a,
            row,
            &faces[i].bottom,
            col0[i],
            &faces[i + 1].top,
            col0[i + 1],
        );
        row += coupling.row_count();
    }

    // Backing
    let last_idx = layers.len() - 1;
    let last_model = models[last_idx];
    let last_bottom = &faces[last_idx].bottom;
    match (backing, t_col, transmitted) {
        (Backing::Rigid, _, _) => {
            write_rigid_rows(&mut a, row, last_model, last_bottom, col0[last_idx]);
        }
        (Backing::Transmission, Some(col), Some(props)) => {
            let below = half_space_wave(props, omega, kx);
            write_transmission_rows(
                &mut a,
                row,
                last_model,
                last_bottom,
                col0[last_idx],
                TransmittedWave {
                    p: below.down[0],
                    uz: below.down[1],
                    col,
                },
            );
        }
        (Backing::Transmission, _, _) => {
            debug_assert!(false, "transmission backing requires half-space properties");
        }
    }
    row += backing.row_count(last_model);
    debug_assert_eq!(row, n, "global system must be square");

    Ok(GlobalSystem { matrix: a, rhs, t_col })
}
