//! Medium models
//!
//! Each model turns a static parameter set and one angular frequency into
//! derived complex quantities (effective density, moduli, wavenumbers) and,
//! from those, a *wave basis*: the vertical wavenumbers of its wave types and
//! the state-vector columns of unit-amplitude down- and up-going waves.
//!
//! Derived quantities are computed by pure functions of (parameters, ω), so
//! sweep points can be evaluated in parallel without locking; the per-medium
//! cache only backs the sequential `evaluate` entry points and is invalidated
//! by any parameter mutation.

pub mod elastic;
pub mod fluid;
pub mod poroelastic;

pub use elastic::{Elastic, ElasticProps};
pub use fluid::{Fluid, FluidProps};
pub use poroelastic::{Poroelastic, PoroProps};

use std::collections::HashMap;

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, TmmError};
use crate::core::types::{ModelKind, ParamSpec, ParamValue};

/// State-vector component indices per model
///
/// Fluid: [p, u_z]. Elastic: [σ_zz, σ_xz, u_x, u_z].
/// Poroelastic (Dazel {uˢ, uᵗ} formulation): [σ̂_zz, σ̂_xz, uˢ_x, uˢ_z, p, uᵗ_z],
/// with σ̂ the in-vacuo frame stress (total stress σᵗ_zz = σ̂_zz − p).
pub(crate) mod state {
    pub const FLUID_P: usize = 0;
    pub const FLUID_UZ: usize = 1;

    pub const ELASTIC_SZZ: usize = 0;
    pub const ELASTIC_SXZ: usize = 1;
    pub const ELASTIC_UX: usize = 2;
    pub const ELASTIC_UZ: usize = 3;

    pub const PORO_SZZ: usize = 0;
    pub const PORO_SXZ: usize = 1;
    pub const PORO_USX: usize = 2;
    pub const PORO_USZ: usize = 3;
    pub const PORO_P: usize = 4;
    pub const PORO_UTZ: usize = 5;
}

/// A material of one of the three supported physical models
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Medium {
    /// Equivalent fluid (constant properties or JCA)
    Fluid(Fluid),
    /// Isotropic elastic solid
    Elastic(Elastic),
    /// Biot poroelastic medium
    Poroelastic(Poroelastic),
}

impl Medium {
    /// Display name of the material
    pub fn name(&self) -> &str {
        match self {
            Medium::Fluid(m) => m.name(),
            Medium::Elastic(m) => m.name(),
            Medium::Poroelastic(m) => m.name(),
        }
    }

    /// Model tag, the key of the interface policy table
    pub fn model(&self) -> ModelKind {
        match self {
            Medium::Fluid(_) => ModelKind::Fluid,
            Medium::Elastic(_) => ModelKind::Elastic,
            Medium::Poroelastic(_) => ModelKind::Poroelastic,
        }
    }

    /// Parameter schema of this medium
    pub fn schema(&self) -> &'static [ParamSpec] {
        match self {
            Medium::Fluid(m) => m.schema(),
            Medium::Elastic(_) => Elastic::SCHEMA,
            Medium::Poroelastic(_) => Poroelastic::SCHEMA,
        }
    }

    /// Current value of a parameter, `None` if the name is not in the schema
    pub fn param(&self, name: &str) -> Option<ParamValue> {
        match self {
            Medium::Fluid(m) => m.param(name),
            Medium::Elastic(m) => m.param(name),
            Medium::Poroelastic(m) => m.param(name),
        }
    }

    /// Assign a parameter, validating name and kind against the schema
    ///
    /// A successful assignment invalidates the cached derived state.
    pub fn set_param(&mut self, name: &str, value: ParamValue) -> Result<()> {
        match self {
            Medium::Fluid(m) => m.set_param(name, value),
            Medium::Elastic(m) => m.set_param(name, value),
            Medium::Poroelastic(m) => m.set_param(name, value),
        }
    }

    /// Wave basis at angular frequency ω and transverse wavenumber kₓ
    pub fn wave_basis(&self, omega: f64, kx: Complex64) -> Result<WaveBasis> {
        match self {
            Medium::Fluid(m) => m.wave_basis(omega, kx),
            Medium::Elastic(m) => m.wave_basis(omega, kx),
            Medium::Poroelastic(m) => m.wave_basis(omega, kx),
        }
    }
}

/// Plane-wave decomposition of a medium at one (ω, kₓ)
///
/// `down[:, w]` / `up[:, w]` hold the state vector produced by a
/// unit-amplitude down- / up-going wave of type `w` at its phase reference;
/// `kz[w]` is the matching vertical wavenumber (Im ≤ 0 branch).
#[derive(Debug, Clone)]
pub struct WaveBasis {
    /// Vertical wavenumbers, one per wave type
    pub kz: Vec<Complex64>,
    /// State columns of down-going waves, state_dim × wave_count
    pub down: Array2<Complex64>,
    /// State columns of up-going waves, state_dim × wave_count
    pub up: Array2<Complex64>,
}

impl WaveBasis {
    /// Dimension of the state vector (2 × wave count)
    pub fn state_dim(&self) -> usize {
        self.down.nrows()
    }
}

/// Vertical wavenumber k_z = sqrt(k² − kₓ²) on the Im(k_z) ≤ 0 branch
///
/// With the e^{+iωt} convention, down-going waves carry e^{−i k_z z}; the
/// branch choice makes both propagating and evanescent components bounded
/// with depth.
pub(crate) fn vertical_wavenumber(k_sq: Complex64, kx: Complex64) -> Complex64 {
    let kz = (k_sq - kx * kx).sqrt();
    if kz.im > 0.0 {
        -kz
    } else {
        kz
    }
}

/// Reject non-positive angular frequencies before any 1/ω term is formed
pub(crate) fn check_omega(omega: f64) -> Result<()> {
    if omega > 0.0 && omega.is_finite() {
        Ok(())
    } else {
        Err(TmmError::InvalidFrequency {
            frequency: omega / (2.0 * std::f64::consts::PI),
        })
    }
}

/// Kind-checked extraction of a real parameter value for `set_param`
///
/// `known` is whether the medium actually stores a parameter of this name;
/// assignment to accepted-but-ignored schema entries is rejected too.
pub(crate) fn checked_real(
    medium: &str,
    model: ModelKind,
    param: &str,
    known: bool,
    value: ParamValue,
) -> Result<f64> {
    if !known {
        return Err(TmmError::UnknownParameter {
            medium: medium.to_string(),
            model,
            param: param.to_string(),
        });
    }
    match value {
        ParamValue::Real(v) => Ok(v),
        other => Err(TmmError::ParameterType {
            medium: medium.to_string(),
            param: param.to_string(),
            expected: crate::core::types::ParamKind::Real,
            actual: other.kind(),
        }),
    }
}

/// Validate a raw parameter map against a schema and resolve defaults
///
/// Unknown names, missing required names and kind mismatches are all
/// construction-time errors. Entries with neither `required` nor a default
/// are accepted-and-ignored (see `ParamSpec::ignored`).
pub(crate) fn resolve_params(
    medium: &str,
    model: ModelKind,
    schema: &'static [ParamSpec],
    params: &HashMap<String, ParamValue>,
) -> Result<HashMap<&'static str, f64>> {
    for (name, value) in params {
        let spec = schema
            .iter()
            .find(|s| s.name == name.as_str())
            .ok_or_else(|| TmmError::UnknownParameter {
                medium: medium.to_string(),
                model,
                param: name.clone(),
            })?;
        if value.kind() != spec.kind {
            return Err(TmmError::ParameterType {
                medium: medium.to_string(),
                param: name.clone(),
                expected: spec.kind,
                actual: value.kind(),
            });
        }
    }

    let mut resolved = HashMap::new();
    for spec in schema {
        match params.get(spec.name) {
            Some(value) => {
                resolved.insert(spec.name, value.as_real());
            }
            None if spec.required => {
                return Err(TmmError::MissingParameter {
                    medium: medium.to_string(),
                    model,
                    param: spec.name.to_string(),
                });
            }
            None => {
                if let Some(default) = spec.default {
                    resolved.insert(spec.name, default);
                }
            }
        }
    }
    Ok(resolved)
}
