//! Interface coupling between adjacent layers
//!
//! Which continuity conditions link two neighbouring layers depends only on
//! the ordered pair of their model tags. The pairing is asymmetric: which
//! side is above matters, because the continuity equations project between
//! state vectors of different dimensionality. Unimplemented pairings
//! (elastic↔poroelastic, poroelastic above a lighter model) raise instead of
//! falling through.

use ndarray::Array2;
use num_complex::Complex64;

use crate::core::error::{Result, TmmError};
use crate::core::media::state;
use crate::core::types::ModelKind;

/// Coupling procedure between the bottom face of one layer and the top face
/// of the next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coupling {
    /// Both sides share a state vector; continuity is componentwise
    Matched(ModelKind),
    /// Fluid above, elastic solid below
    FluidOverElastic,
    /// Elastic solid above, fluid below
    ElasticOverFluid,
    /// Fluid above, poroelastic below
    FluidOverPoroelastic,
}

/// Resolve the coupling for an ordered (above, below) model pair
///
/// Returns the matched (no-op) coupling when both models agree and
/// [`TmmError::UnsupportedInterface`] for pairings with no implemented
/// physics.
pub fn resolve(above: ModelKind, below: ModelKind) -> Result<Coupling> {
    use ModelKind::*;
    match (above, below) {
        (Fluid, Fluid) => Ok(Coupling::Matched(Fluid)),
        (Elastic, Elastic) => Ok(Coupling::Matched(Elastic)),
        (Poroelastic, Poroelastic) => Ok(Coupling::Matched(Poroelastic)),
        (Fluid, Elastic) => Ok(Coupling::FluidOverElastic),
        (Elastic, Fluid) => Ok(Coupling::ElasticOverFluid),
        (Fluid, Poroelastic) => Ok(Coupling::FluidOverPoroelastic),
        (Elastic, Poroelastic) | (Poroelastic, Fluid) | (Poroelastic, Elastic) => {
            Err(TmmError::UnsupportedInterface { above, below })
        }
    }
}

/// Add one state-component row of `m` into global row `row`, scaled by `sign`
pub(crate) fn accumulate(
    a: &mut Array2<Complex64>,
    row: usize,
    col0: usize,
    m: &Array2<Complex64>,
    component: usize,
    sign: f64,
) {
    for (i, v) in m.row(component).iter().enumerate() {
        a[[row, col0 + i]] += sign * *v;
    }
}

impl Coupling {
    /// Number of continuity rows this coupling contributes
    pub fn row_count(&self) -> usize {
        match self {
            Coupling::Matched(model) => model.state_dim(),
            Coupling::FluidOverElastic | Coupling::ElasticOverFluid => 3,
            Coupling::FluidOverPoroelastic => 4,
        }
    }

    /// Write the continuity rows linking the two layers into the global matrix
    ///
    /// `above` is the upper layer's bottom-face state matrix (columns starting
    /// at `above_col0`), `below` the lower layer's top-face matrix. All rows
    /// are homogeneous; the right-hand side stays zero.
    pub(crate) fn write_rows(
        &self,
        a: &mut Array2<Complex64>,
        row0: usize,
        above: &Array2<Complex64>,
        above_col0: usize,
        below: &Array2<Complex64>,
        below_col0: usize,
    ) {
        match self {
            Coupling::Matched(model) => {
                for c in 0..model.state_dim() {
                    accumulate(a, row0 + c, above_col0, above, c, 1.0);
                    accumulate(a, row0 + c, below_col0, below, c, -1.0);
                }
            }
            Coupling::FluidOverElastic => {
                // u_z continuity
                accumulate(a, row0, above_col0, above, state::FLUID_UZ, 1.0);
                accumulate(a, row0, below_col0, below, state::ELASTIC_UZ, -1.0);
                // normal stress balances the fluid pressure: σ_zz + p = 0
                accumulate(a, row0 + 1, below_col0, below, state::ELASTIC_SZZ, 1.0);
                accumulate(a, row0 + 1, above_col0, above, state::FLUID_P, 1.0);
                // free tangential stress at the fluid side
                accumulate(a, row0 + 2, below_col0, below, state::ELASTIC_SXZ, 1.0);
            }
            Coupling::ElasticOverFluid => {
                accumulate(a, row0, above_col0, above, state::ELASTIC_UZ, 1.0);
                accumulate(a, row0, below_col0, below, state::FLUID_UZ, -1.0);
                accumulate(a, row0 + 1, above_col0, above, state::ELASTIC_SZZ, 1.0);
                accumulate(a, row0 + 1, below_col0, below, state::FLUID_P, 1.0);
                accumulate(a, row0 + 2, above_col0, above, state::ELASTIC_SXZ, 1.0);
            }
            Coupling::FluidOverPoroelastic => {
                // fluid normal displacement meets the total displacement
                accumulate(a, row0, above_col0, above, state::FLUID_UZ, 1.0);
                accumulate(a, row0, below_col0, below, state::PORO_UTZ, -1.0);
                // pore pressure continuity (open pores)
                accumulate(a, row0 + 1, above_col0, above, state::FLUID_P, 1.0);
                accumulate(a, row0 + 1, below_col0, below, state::PORO_P, -1.0);
                // the in-vacuo frame stress vanishes against a fluid
                accumulate(a, row0 + 2, below_col0, below, state::PORO_SZZ, 1.0);
                accumulate(a, row0 + 3, below_col0, below, state::PORO_SXZ, 1.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matched_models_are_noop_couplings() {
        for model in [ModelKind::Fluid, ModelKind::Elastic, ModelKind::Poroelastic] {
            assert_eq!(resolve(model, model).unwrap(), Coupling::Matched(model));
        }
    }

    #[test]
    fn test_fluid_elastic_resolution_is_asymmetric() {
        let down = resolve(ModelKind::Fluid, ModelKind::Elastic).unwrap();
        let up = resolve(ModelKind::Elastic, ModelKind::Fluid).unwrap();
        assert_ne!(down, up);
        assert_eq!(down, Coupling::FluidOverElastic);
        assert_eq!(up, Coupling::ElasticOverFluid);
    }

    #[test]
    fn test_unsupported_pairings_raise() {
        for (above, below) in [
            (ModelKind::Elastic, ModelKind::Poroelastic),
            (ModelKind::Poroelastic, ModelKind::Elastic),
            (ModelKind::Poroelastic, ModelKind::Fluid),
        ] {
            let err = resolve(above, below).unwrap_err();
            assert!(matches!(
                err,
                TmmError::UnsupportedInterface { above: a, below: b } if a == above && b == below
            ));
        }
    }

    #[test]
    fn test_row_counts() {
        assert_eq!(Coupling::Matched(ModelKind::Fluid).row_count(), 2);
        assert_eq!(Coupling::Matched(ModelKind::Poroelastic).row_count(), 6);
        assert_eq!(Coupling::FluidOverElastic.row_count(), 3);
        assert_eq!(Coupling::FluidOverPoroelastic.row_count(), 4);
    }
}
