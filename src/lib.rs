//! # acoustic-tmm: Transfer Matrix Method for multilayer acoustic treatments
//!
//! Computes the plane-wave acoustic response (reflection and transmission
//! coefficients) of a stack of laterally infinite layers excited by an
//! oblique incident wave, with fluid, elastic-solid and Biot poroelastic
//! media handled in one global linear system.
//!
//! ## Features
//!
//! - Fluid media: constant properties or Johnson-Champoux-Allard equivalent fluid
//! - Elastic solids with structural damping
//! - Poroelastic media (full Biot theory, Dazel {us, ut} parameterization)
//! - Rigid and transmission backings
//! - Stochastic layers for Monte-Carlo perturbation of one parameter
//! - Parallel execution with Rayon over (frequency, angle) sweep points
//!
//! ## Example
//!
//! ```rust
//! use acoustic_tmm::{Backing, Fluid, Layer, Medium, Solver};
//!
//! let air = Medium::Fluid(Fluid::air());
//! let layer = Layer::new(&air, 0.1, "air gap").unwrap();
//! let solver = Solver::new(vec![layer], Backing::Rigid);
//! let result = solver.solve(&[500.0, 1000.0], &[0.0]).unwrap();
//! assert_eq!(result.points.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::too_many_arguments)] // Scientific code often has many parameters

pub mod core;

// Re-exports
pub use crate::core::backing::Backing;
pub use crate::core::error::{Result, TmmError};
pub use crate::core::interface::{resolve, Coupling};
pub use crate::core::layer::{Layer, StochasticLayer};
pub use crate::core::media::{Elastic, Fluid, Medium, Poroelastic};
pub use crate::core::solver::Solver;
pub use crate::core::types::{ModelKind, ParamKind, ParamValue, SweepPoint, SweepResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
