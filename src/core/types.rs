//! Core type definitions for the multilayer solver
//!
//! Model tags, medium parameter schemas and runtime values, and the sweep
//! result structures returned by the solver.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

// ============================================================================
// Medium models
// ============================================================================

/// Physical model of a medium, the key of the interface policy table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    /// Equivalent fluid (constant properties or JCA)
    Fluid,
    /// Isotropic elastic solid
    Elastic,
    /// Biot poroelastic medium
    Poroelastic,
}

impl ModelKind {
    /// Dimension of the state vector traced at this model's interfaces
    ///
    /// Fluid: [p, u_z]; elastic: [σ_zz, σ_xz, u_x, u_z];
    /// poroelastic: [σ̂_zz, σ̂_xz, uˢ_x, uˢ_z, p, uᵗ_z].
    pub fn state_dim(&self) -> usize {
        match self {
            ModelKind::Fluid => 2,
            ModelKind::Elastic => 4,
            ModelKind::Poroelastic => 6,
        }
    }

    /// Number of wave types supported by this model (half the state dimension)
    pub fn wave_count(&self) -> usize {
        self.state_dim() / 2
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelKind::Fluid => write!(f, "fluid"),
            ModelKind::Elastic => write!(f, "elastic"),
            ModelKind::Poroelastic => write!(f, "poroelastic"),
        }
    }
}

// ============================================================================
// Parameter schemas
// ============================================================================

/// Declared numeric type of a medium parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamKind {
    /// Real-valued parameter (f64)
    Real,
    /// Integer-valued parameter (i64)
    Int,
}

impl std::fmt::Display for ParamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamKind::Real => write!(f, "real"),
            ParamKind::Int => write!(f, "int"),
        }
    }
}

/// Runtime value of a medium parameter or of a stochastic draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    /// Real value
    Real(f64),
    /// Integer value
    Int(i64),
}

impl ParamValue {
    /// Runtime kind of this value
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Real(_) => ParamKind::Real,
            ParamValue::Int(_) => ParamKind::Int,
        }
    }

    /// Coerce to f64, accepting either kind
    pub fn as_real(&self) -> f64 {
        match self {
            ParamValue::Real(v) => *v,
            ParamValue::Int(v) => *v as f64,
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Real(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

/// One entry of a medium parameter schema
///
/// Each medium model exposes a static slice of these; construction and
/// stochastic draws are validated against it.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    /// Parameter name as used in material descriptions
    pub name: &'static str,
    /// Expected numeric kind
    pub kind: ParamKind,
    /// Whether the parameter must be present at construction
    pub required: bool,
    /// Default applied when an optional parameter is absent
    pub default: Option<f64>,
}

impl ParamSpec {
    /// Required real parameter
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Real,
            required: true,
            default: None,
        }
    }

    /// Optional real parameter with a default
    pub const fn optional(name: &'static str, default: f64) -> Self {
        Self {
            name,
            kind: ParamKind::Real,
            required: false,
            default: Some(default),
        }
    }

    /// Optional real parameter that is accepted but unused
    ///
    /// Lets a richer material description (e.g. a poroelastic one) be read by
    /// a model that only consumes a subset of it.
    pub const fn ignored(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Real,
            required: false,
            default: None,
        }
    }
}

// ============================================================================
// Sweep results
// ============================================================================

/// Solution at one (frequency, angle) sweep point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// Frequency (Hz)
    pub frequency: f64,
    /// Incidence angle (degrees from normal)
    pub angle: f64,
    /// Complex reflection coefficient in the incident fluid
    pub reflection: Complex64,
    /// Complex transmission coefficient, present for transmission backing only
    pub transmission: Option<Complex64>,
}

impl SweepPoint {
    /// Absorption coefficient 1 − |R|²
    pub fn absorption(&self) -> f64 {
        1.0 - self.reflection.norm_sqr()
    }
}

/// Result of a solver sweep, frequency-major over the (frequency, angle) grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    /// One entry per sweep point
    pub points: Vec<SweepPoint>,
}

impl SweepResult {
    /// Frequencies per sweep point (Hz)
    pub fn frequencies(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.frequency).collect()
    }

    /// Incidence angles per sweep point (degrees)
    pub fn angles(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.angle).collect()
    }

    /// Reflection coefficients per sweep point
    pub fn reflections(&self) -> Vec<Complex64> {
        self.points.iter().map(|p| p.reflection).collect()
    }

    /// Transmission coefficients per sweep point, `None` under a rigid backing
    pub fn transmissions(&self) -> Option<Vec<Complex64>> {
        self.points.iter().map(|p| p.transmission).collect()
    }
}
