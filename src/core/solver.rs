//! Sweep orchestration
//!
//! For each requested (frequency, angle) pair the solver computes the shared
//! transverse wavenumber, assembles the global system of the stack and
//! extracts the reflection (and transmission) coefficients. Points are
//! independent pure computations over `&Layer`, so the sweep parallelizes
//! without locks.

use crate::core::assembly::assemble;
use crate::core::backing::Backing;
use crate::core::direct::lu_solve;
use crate::core::error::{Result, TmmError};
use crate::core::interface::{resolve, Coupling};
use crate::core::layer::Layer;
use crate::core::media::Fluid;
use crate::core::parallel::parallel_map;
use crate::core::types::{SweepPoint, SweepResult};

/// TMM solver over an ordered layer stack (top to bottom) and a backing
///
/// The incident and transmission half-spaces default to air; both can be
/// overridden with any fluid medium.
#[derive(Debug, Clone)]
pub struct Solver {
    /// Ordered layers, first entry facing the incident wave
    pub layers: Vec<Layer>,
    /// Terminating boundary condition
    pub backing: Backing,
    incident: Fluid,
    transmission: Fluid,
}

impl Solver {
    /// Create a solver for `layers` terminated by `backing`
    pub fn new(layers: Vec<Layer>, backing: Backing) -> Self {
        Self {
            layers,
            backing,
            incident: Fluid::air(),
            transmission: Fluid::air(),
        }
    }

    /// Override the incident half-space fluid
    pub fn with_incident_fluid(mut self, fluid: Fluid) -> Self {
        self.incident = fluid;
        self
    }

    /// Override the transmission half-space fluid
    pub fn with_transmission_fluid(mut self, fluid: Fluid) -> Self {
        self.transmission = fluid;
        self
    }

    /// Solve the sweep over all (frequency, angle) combinations
    ///
    /// `frequencies` in Hz (must be strictly positive), `angles` in degrees
    /// from normal incidence. Results are frequency-major. Fails fast on an
    /// empty stack, an out-of-domain frequency, an unsupported interface
    /// pairing or a singular system, naming the offender.
    pub fn solve(&self, frequencies: &[f64], angles: &[f64]) -> Result<SweepResult> {
        if self.layers.is_empty() {
            return Err(TmmError::EmptyStack);
        }
        for &f in frequencies {
            if f <= 0.0 || !f.is_finite() {
                return Err(TmmError::InvalidFrequency { frequency: f });
            }
        }

        let couplings = self
            .layers
            .windows(2)
            .map(|pair| resolve(pair[0].medium().model(), pair[1].medium().model()))
            .collect::<Result<Vec<_>>>()?;

        let grid: Vec<(f64, f64)> = frequencies
            .iter()
            .flat_map(|&f| angles.iter().map(move |&a| (f, a)))
            .collect();

        log::debug!(
            "solving {} layers over {} sweep points ({:?} backing)",
            self.layers.len(),
            grid.len(),
            self.backing
        );

        let points = parallel_map(&grid, |&(frequency, angle)| {
            self.solve_point(&couplings, frequency, angle)
        })
        .into_iter()
        .collect::<Result<Vec<_>>>()?;

        Ok(SweepResult { points })
    }

    /// Solve one sweep point
    fn solve_point(
        &self,
        couplings: &[Coupling],
        frequency: f64,
        angle: f64,
    ) -> Result<SweepPoint> {
        let omega = 2.0 * std::f64::consts::PI * frequency;

        let incident = self.incident.props(omega)?;
        // Snell invariant: the in-plane wavenumber of the incident trace is
        // shared by every layer
        let kx = incident.wavenumber(omega) * angle.to_radians().sin();

        let transmitted = match self.backing {
            Backing::Transmission => Some(self.transmission.props(omega)?),
            Backing::Rigid => None,
        };

        let sys = assemble(
            &self.layers,
            couplings,
            self.backing,
            omega,
            kx,
            incident,
            transmitted,
        )?;

        let x = lu_solve(&sys.matrix, &sys.rhs).map_err(|source| TmmError::SingularSystem {
            frequency,
            angle,
            source,
        })?;

        Ok(SweepPoint {
            frequency,
            angle,
            reflection: x[0],
            transmission: sys.t_col.map(|col| x[col]),
        })
    }
}
