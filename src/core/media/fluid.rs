//! Fluid media
//!
//! Either a constant-property fluid (e.g. air) or a rigid-frame equivalent
//! fluid following the Johnson-Champoux-Allard model, where the effective
//! density carries the viscous dissipation of the pore network and the
//! effective bulk modulus carries the thermal dissipation.

use std::collections::HashMap;

use ndarray::Array2;
use num_complex::Complex64;
use num_traits::One;
use serde::{Deserialize, Serialize};

use crate::core::constants::{AIR_GAMMA, AIR_K, AIR_MU, AIR_NU_PRIME, AIR_P0, AIR_RHO};
use crate::core::error::Result;
use crate::core::media::{check_omega, state, vertical_wavenumber, WaveBasis};
use crate::core::types::{ModelKind, ParamSpec, ParamValue};

/// Frequency-dependent derived quantities of a fluid medium
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FluidProps {
    /// Effective density (kg/m³, complex for dissipative media)
    pub rho: Complex64,
    /// Effective bulk modulus (Pa, complex)
    pub k: Complex64,
}

impl FluidProps {
    /// Wavenumber k = ω·sqrt(ρ/K)
    pub fn wavenumber(&self, omega: f64) -> Complex64 {
        omega * (self.rho / self.k).sqrt()
    }

    /// Characteristic impedance Z = sqrt(ρ·K)
    pub fn impedance(&self) -> Complex64 {
        (self.rho * self.k).sqrt()
    }
}

/// Parameters of the JCA equivalent-fluid model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JcaParams {
    /// Porosity
    pub phi: f64,
    /// Static air flow resistivity (N·s/m⁴)
    pub sigma: f64,
    /// High-frequency tortuosity
    pub alpha: f64,
    /// Viscous characteristic length (m)
    pub lambda: f64,
    /// Thermal characteristic length (m)
    pub lambda_prime: f64,
}

/// Constant or JCA parameterization of a fluid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FluidKind {
    /// Fixed real density and bulk modulus
    Constant {
        /// Density (kg/m³)
        rho: f64,
        /// Bulk modulus (Pa)
        k: f64,
    },
    /// Johnson-Champoux-Allard equivalent fluid
    Jca(JcaParams),
}

/// A fluid medium
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fluid {
    name: String,
    kind: FluidKind,
    #[serde(skip)]
    cache: Option<(f64, FluidProps)>,
}

/// Schema of a constant fluid
const CONSTANT_SCHEMA: &[ParamSpec] = &[ParamSpec::required("rho"), ParamSpec::required("K")];

/// Schema of a JCA equivalent fluid
///
/// The frame parameters are accepted and ignored so a full poroelastic
/// material description can be forced into the rigid-frame model.
const JCA_SCHEMA: &[ParamSpec] = &[
    ParamSpec::required("phi"),
    ParamSpec::required("sigma"),
    ParamSpec::required("alpha"),
    ParamSpec::required("lambda"),
    ParamSpec::required("lambda_prime"),
    ParamSpec::ignored("rho_1"),
    ParamSpec::ignored("E"),
    ParamSpec::ignored("nu"),
    ParamSpec::ignored("eta"),
];

impl Fluid {
    /// Ambient air at 20°C
    pub fn air() -> Self {
        Self::constant("Air", AIR_RHO, AIR_K)
    }

    /// Constant-property fluid
    pub fn constant(name: impl Into<String>, rho: f64, k: f64) -> Self {
        Self {
            name: name.into(),
            kind: FluidKind::Constant { rho, k },
            cache: None,
        }
    }

    /// JCA equivalent fluid
    pub fn jca(name: impl Into<String>, params: JcaParams) -> Self {
        Self {
            name: name.into(),
            kind: FluidKind::Jca(params),
            cache: None,
        }
    }

    /// Build from a validated parameter map
    ///
    /// The parameterization is selected by the keys present: a set with `phi`
    /// is read against the JCA schema, otherwise against the constant one.
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, ParamValue>,
    ) -> Result<Self> {
        let name = name.into();
        if params.contains_key("phi") {
            let p = super::resolve_params(&name, ModelKind::Fluid, JCA_SCHEMA, params)?;
            Ok(Self::jca(
                name,
                JcaParams {
                    phi: p["phi"],
                    sigma: p["sigma"],
                    alpha: p["alpha"],
                    lambda: p["lambda"],
                    lambda_prime: p["lambda_prime"],
                },
            ))
        } else {
            let p = super::resolve_params(&name, ModelKind::Fluid, CONSTANT_SCHEMA, params)?;
            Ok(Self::constant(name, p["rho"], p["K"]))
        }
    }

    /// Material name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameterization of this fluid
    pub fn fluid_kind(&self) -> &FluidKind {
        &self.kind
    }

    /// Parameter schema matching this fluid's parameterization
    pub fn schema(&self) -> &'static [ParamSpec] {
        match self.kind {
            FluidKind::Constant { .. } => CONSTANT_SCHEMA,
            FluidKind::Jca(_) => JCA_SCHEMA,
        }
    }

    /// Current value of a parameter
    pub fn param(&self, name: &str) -> Option<ParamValue> {
        let v = match (&self.kind, name) {
            (FluidKind::Constant { rho, .. }, "rho") => *rho,
            (FluidKind::Constant { k, .. }, "K") => *k,
            (FluidKind::Jca(p), "phi") => p.phi,
            (FluidKind::Jca(p), "sigma") => p.sigma,
            (FluidKind::Jca(p), "alpha") => p.alpha,
            (FluidKind::Jca(p), "lambda") => p.lambda,
            (FluidKind::Jca(p), "lambda_prime") => p.lambda_prime,
            _ => return None,
        };
        Some(ParamValue::Real(v))
    }

    /// Assign a parameter and invalidate the derived-state cache
    pub fn set_param(&mut self, name: &str, value: ParamValue) -> Result<()> {
        let v = super::checked_real(
            &self.name,
            ModelKind::Fluid,
            name,
            self.param(name).is_some(),
            value,
        )?;
        match (&mut self.kind, name) {
            (FluidKind::Constant { rho, .. }, "rho") => *rho = v,
            (FluidKind::Constant { k, .. }, "K") => *k = v,
            (FluidKind::Jca(p), "phi") => p.phi = v,
            (FluidKind::Jca(p), "sigma") => p.sigma = v,
            (FluidKind::Jca(p), "alpha") => p.alpha = v,
            (FluidKind::Jca(p), "lambda") => p.lambda = v,
            (FluidKind::Jca(p), "lambda_prime") => p.lambda_prime = v,
            _ => unreachable!("param existence checked above"),
        }
        self.cache = None;
        Ok(())
    }

    /// Derived quantities at ω, pure (no cache interaction)
    pub fn props(&self, omega: f64) -> Result<FluidProps> {
        check_omega(omega)?;
        Ok(match &self.kind {
            FluidKind::Constant { rho, k } => FluidProps {
                rho: Complex64::new(*rho, 0.0),
                k: Complex64::new(*k, 0.0),
            },
            FluidKind::Jca(p) => jca_effective(p, omega),
        })
    }

    /// Derived quantities at ω, reusing the cache when the frequency matches
    pub fn evaluate(&mut self, omega: f64) -> Result<FluidProps> {
        if let Some((cached_omega, props)) = self.cache {
            if cached_omega == omega {
                return Ok(props);
            }
        }
        let props = self.props(omega)?;
        self.cache = Some((omega, props));
        Ok(props)
    }

    /// Wave basis: a single wave type with state [p, u_z]
    pub fn wave_basis(&self, omega: f64, kx: Complex64) -> Result<WaveBasis> {
        let props = self.props(omega)?;
        let k = props.wavenumber(omega);
        let kz = vertical_wavenumber(k * k, kx);
        // u_z = (1/ρω²)·∂p/∂z → ∓ i·k_z/(ρω²) per direction
        let uz = Complex64::i() * kz / (props.rho * omega * omega);

        let mut down = Array2::zeros((2, 1));
        let mut up = Array2::zeros((2, 1));
        down[[state::FLUID_P, 0]] = Complex64::one();
        down[[state::FLUID_UZ, 0]] = -uz;
        up[[state::FLUID_P, 0]] = Complex64::one();
        up[[state::FLUID_UZ, 0]] = uz;

        Ok(WaveBasis {
            kz: vec![kz],
            down,
            up,
        })
    }
}

/// JCA effective density and bulk modulus
///
/// ω₀ = σφ/(ρ₀α∞), ω∞ = (σφΛ)²/(4μρ₀α∞²), ω′∞ = 16ν′/Λ′²:
///
/// - α̃ = α∞·(1 − i(ω₀/ω)·sqrt(1 + iω/ω∞)),   ρ̃ = ρ₀α̃/φ
/// - α̃′ = 1 − i(ω′∞/2ω)·sqrt(1 + iω/ω′∞),   K̃ = (γP₀/φ)/(γ − (γ−1)/α̃′)
pub(crate) fn jca_effective(p: &JcaParams, omega: f64) -> FluidProps {
    let omega_0 = p.sigma * p.phi / (AIR_RHO * p.alpha);
    let omega_inf = (p.sigma * p.phi * p.lambda).powi(2) / (4.0 * AIR_MU * AIR_RHO * p.alpha * p.alpha);
    let f_visc = Complex64::new(1.0, omega / omega_inf).sqrt();
    let alpha_t = p.alpha * (Complex64::one() - Complex64::i() * (omega_0 / omega) * f_visc);
    let rho_eq = AIR_RHO * alpha_t / p.phi;

    let omega_pinf = 16.0 * AIR_NU_PRIME / (p.lambda_prime * p.lambda_prime);
    let f_therm = Complex64::new(1.0, omega / omega_pinf).sqrt();
    let alpha_pt = Complex64::one() - Complex64::i() * (omega_pinf / (2.0 * omega)) * f_therm;
    let k_eq = (AIR_GAMMA * AIR_P0 / p.phi)
        / (AIR_GAMMA - (AIR_GAMMA - 1.0) / alpha_pt);

    FluidProps { rho: rho_eq, k: k_eq }
}
