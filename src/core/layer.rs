//! Layers and stochastic layers
//!
//! A layer pairs an exclusive copy of a medium with a thickness; a stochastic
//! layer additionally redraws one quantity (the thickness or one medium
//! parameter) from a caller-supplied sample source before each solve, and can
//! restore the nominal value between Monte-Carlo draws.

use std::fmt;
use std::ops::Deref;

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, TmmError};
use crate::core::media::Medium;
use crate::core::types::{ParamKind, ParamValue};

/// One layer of the stack: an exclusive medium copy, a thickness and a name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    medium: Medium,
    thickness: f64,
    name: String,
}

/// State matrices of a layer at one (ω, kₓ)
///
/// Columns are the layer's wave amplitudes (down-going first, then
/// up-going); rows are the state-vector components evaluated at the top and
/// bottom faces. Down-going amplitudes are phase-referenced at the top face
/// and up-going at the bottom face, so every entry carries only decaying
/// exponentials regardless of thickness or dissipation.
#[derive(Debug, Clone)]
pub struct FaceMatrices {
    /// State at the top face, state_dim × state_dim
    pub top: Array2<Complex64>,
    /// State at the bottom face, state_dim × state_dim
    pub bottom: Array2<Complex64>,
}

impl Layer {
    /// Create a layer holding its own copy of `medium`
    ///
    /// Sharing one material definition across several layers never aliases
    /// state: each layer clones it. Thickness must be strictly positive.
    pub fn new(medium: &Medium, thickness: f64, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if thickness <= 0.0 || thickness.is_nan() {
            return Err(TmmError::InvalidThickness { layer: name, thickness });
        }
        Ok(Self {
            medium: medium.clone(),
            thickness,
            name,
        })
    }

    /// The layer's medium
    pub fn medium(&self) -> &Medium {
        &self.medium
    }

    /// Thickness (m)
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build the layer's state matrices at ω and transverse wavenumber kₓ
    pub fn face_matrices(&self, omega: f64, kx: Complex64) -> Result<FaceMatrices> {
        let basis = self.medium.wave_basis(omega, kx)?;
        let nw = basis.kz.len();
        let dim = basis.state_dim();

        let mut top = Array2::zeros((dim, 2 * nw));
        let mut bottom = Array2::zeros((dim, 2 * nw));
        for w in 0..nw {
            let phase = (-Complex64::i() * basis.kz[w] * self.thickness).exp();
            for c in 0..dim {
                top[[c, w]] = basis.down[[c, w]];
                top[[c, nw + w]] = basis.up[[c, w]] * phase;
                bottom[[c, w]] = basis.down[[c, w]] * phase;
                bottom[[c, nw + w]] = basis.up[[c, w]];
            }
        }
        Ok(FaceMatrices { top, bottom })
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}m of {} ({})",
            self.name,
            self.thickness,
            self.medium.name(),
            self.medium.model()
        )
    }
}

/// Which quantity a stochastic layer redraws, resolved once at construction
#[derive(Debug, Clone)]
enum DrawTarget {
    /// The layer thickness
    Thickness,
    /// A named medium parameter of the declared kind
    MediumParam { name: String, kind: ParamKind },
}

/// A layer whose thickness or one medium parameter is redrawn from a sample
/// source before each solve
///
/// The sample source is any zero-argument callable returning one
/// [`ParamValue`] per invocation; the distribution behind it is the caller's
/// business. The initial value of the randomized quantity is recorded so
/// [`StochasticLayer::reinit`] can restore the nominal configuration.
pub struct StochasticLayer {
    layer: Layer,
    target: DrawTarget,
    sampler: Box<dyn FnMut() -> ParamValue + Send>,
    initial: ParamValue,
}

impl StochasticLayer {
    /// Create a stochastic layer randomizing `param`
    ///
    /// `param` is either the literal `"thickness"` or a parameter name of the
    /// medium's schema; an unknown name is a construction error, never a
    /// silent no-op at draw time.
    pub fn new(
        medium: &Medium,
        thickness: f64,
        param: &str,
        sampler: impl FnMut() -> ParamValue + Send + 'static,
        name: impl Into<String>,
    ) -> Result<Self> {
        let layer = Layer::new(medium, thickness, name)?;

        let (target, initial) = if param == "thickness" {
            (DrawTarget::Thickness, ParamValue::Real(thickness))
        } else {
            let initial =
                layer
                    .medium
                    .param(param)
                    .ok_or_else(|| TmmError::UnknownParameter {
                        medium: layer.medium.name().to_string(),
                        model: layer.medium.model(),
                        param: param.to_string(),
                    })?;
            let kind = layer
                .medium
                .schema()
                .iter()
                .find(|s| s.name == param)
                .map(|s| s.kind)
                .unwrap_or(ParamKind::Real);
            (
                DrawTarget::MediumParam {
                    name: param.to_string(),
                    kind,
                },
                initial,
            )
        };

        Ok(Self {
            layer,
            target,
            sampler: Box::new(sampler),
            initial,
        })
    }

    /// The underlying layer, as consumed by the solver
    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    /// Consume the wrapper, keeping the layer in its current (possibly
    /// redrawn) state
    pub fn into_layer(self) -> Layer {
        self.layer
    }

    /// Name of the randomized quantity
    pub fn stochastic_param(&self) -> &str {
        match &self.target {
            DrawTarget::Thickness => "thickness",
            DrawTarget::MediumParam { name, .. } => name,
        }
    }

    /// Initial value of the randomized quantity, as recorded at construction
    pub fn initial_value(&self) -> ParamValue {
        self.initial
    }

    /// Sample the source once and apply the draw
    ///
    /// Thickness draws coerce the sample to a real number (no kind check) but
    /// still enforce thickness > 0. Medium-parameter draws require the exact
    /// declared kind; on mismatch the medium is left untouched and the error
    /// reports expected vs actual. A successful medium draw invalidates the
    /// medium's cached derived state.
    pub fn redraw(&mut self) -> Result<ParamValue> {
        let draw = (self.sampler)();
        match &self.target {
            DrawTarget::Thickness => {
                let thickness = draw.as_real();
                if thickness <= 0.0 || thickness.is_nan() {
                    return Err(TmmError::InvalidThickness {
                        layer: self.layer.name.clone(),
                        thickness,
                    });
                }
                self.layer.thickness = thickness;
                Ok(ParamValue::Real(thickness))
            }
            DrawTarget::MediumParam { name, kind } => {
                if draw.kind() != *kind {
                    return Err(TmmError::ParameterType {
                        medium: self.layer.medium.name().to_string(),
                        param: name.clone(),
                        expected: *kind,
                        actual: draw.kind(),
                    });
                }
                self.layer.medium.set_param(name, draw)?;
                Ok(draw)
            }
        }
    }

    /// Restore the randomized quantity to its value at construction
    pub fn reinit(&mut self) -> Result<()> {
        match &self.target {
            DrawTarget::Thickness => {
                self.layer.thickness = self.initial.as_real();
                Ok(())
            }
            DrawTarget::MediumParam { name, .. } => {
                self.layer.medium.set_param(name, self.initial)
            }
        }
    }
}

impl Deref for StochasticLayer {
    type Target = Layer;

    fn deref(&self) -> &Layer {
        &self.layer
    }
}

impl fmt::Debug for StochasticLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StochasticLayer")
            .field("layer", &self.layer)
            .field("target", &self.target)
            .field("initial", &self.initial)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for StochasticLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [stochastic: {}]", self.layer, self.stochastic_param())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::media::Fluid;

    fn air() -> Medium {
        Medium::Fluid(Fluid::air())
    }

    #[test]
    fn test_layer_rejects_nonpositive_thickness() {
        for thickness in [0.0, -0.01, f64::NAN] {
            let err = Layer::new(&air(), thickness, "bad").unwrap_err();
            assert!(matches!(err, TmmError::InvalidThickness { .. }));
        }
    }

    #[test]
    fn test_layer_owns_medium_copy() {
        let mut medium = air();
        let layer = Layer::new(&medium, 0.05, "gap").unwrap();
        medium.set_param("rho", ParamValue::Real(2.0)).unwrap();
        // The layer's copy is unaffected by mutation of the original
        assert_eq!(layer.medium().param("rho"), Some(ParamValue::Real(crate::core::constants::AIR_RHO)));
    }

    #[test]
    fn test_face_matrices_shape() {
        let layer = Layer::new(&air(), 0.1, "gap").unwrap();
        let m = layer
            .face_matrices(2.0 * std::f64::consts::PI * 1000.0, Complex64::new(0.0, 0.0))
            .unwrap();
        assert_eq!(m.top.dim(), (2, 2));
        assert_eq!(m.bottom.dim(), (2, 2));
    }

    #[test]
    fn test_face_matrix_entries_are_bounded() {
        // Thick, very dissipative layer: local phase referencing keeps every
        // entry's exponential factor at magnitude <= 1
        let foam = Medium::Fluid(Fluid::jca(
            "foam",
            crate::core::media::fluid::JcaParams {
                phi: 0.97,
                sigma: 57e3,
                alpha: 1.54,
                lambda: 24.6e-6,
                lambda_prime: 73.8e-6,
            },
        ));
        let layer = Layer::new(&foam, 2.0, "thick foam").unwrap();
        let m = layer
            .face_matrices(2.0 * std::f64::consts::PI * 5000.0, Complex64::new(30.0, 0.0))
            .unwrap();
        for v in m.top.iter().chain(m.bottom.iter()) {
            assert!(v.norm().is_finite());
        }
        // The up-going column at the top face is attenuated, not amplified
        assert!(m.top[[0, 1]].norm() <= 1.0);
        assert!(m.bottom[[0, 0]].norm() <= 1.0);
    }

    #[test]
    fn test_stochastic_unknown_param_fails_at_construction() {
        let err = StochasticLayer::new(&air(), 0.1, "porosity", || ParamValue::Real(0.9), "s")
            .unwrap_err();
        assert!(matches!(err, TmmError::UnknownParameter { .. }));
    }

    #[test]
    fn test_stochastic_thickness_roundtrip() {
        let mut layer =
            StochasticLayer::new(&air(), 0.1, "thickness", || ParamValue::Real(0.2), "s").unwrap();
        layer.redraw().unwrap();
        assert_eq!(layer.thickness(), 0.2);
        layer.reinit().unwrap();
        assert_eq!(layer.thickness(), 0.1);
    }

    #[test]
    fn test_stochastic_thickness_coerces_int() {
        let mut layer =
            StochasticLayer::new(&air(), 0.1, "thickness", || ParamValue::Int(2), "s").unwrap();
        layer.redraw().unwrap();
        assert_eq!(layer.thickness(), 2.0);
    }

    #[test]
    fn test_stochastic_rejects_nonpositive_thickness_draw() {
        let mut layer =
            StochasticLayer::new(&air(), 0.1, "thickness", || ParamValue::Real(-0.5), "s").unwrap();
        assert!(matches!(
            layer.redraw(),
            Err(TmmError::InvalidThickness { .. })
        ));
        assert_eq!(layer.thickness(), 0.1);
    }

    #[test]
    fn test_stochastic_medium_param_type_mismatch_leaves_medium_unchanged() {
        let mut layer =
            StochasticLayer::new(&air(), 0.1, "rho", || ParamValue::Int(3), "s").unwrap();
        let err = layer.redraw().unwrap_err();
        assert!(matches!(err, TmmError::ParameterType { .. }));
        assert_eq!(
            layer.medium().param("rho"),
            Some(ParamValue::Real(crate::core::constants::AIR_RHO))
        );
    }
}
