//! Isotropic elastic solid
//!
//! Structural damping enters through a hysteretic loss factor on both Lamé
//! coefficients (modulus × (1 + iη)). Two wave types: longitudinal (P) and
//! vertically polarized shear (SV).

use std::collections::HashMap;

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::media::{check_omega, state, vertical_wavenumber, WaveBasis};
use crate::core::types::{ModelKind, ParamSpec, ParamValue};

/// Frequency-dependent derived quantities of an elastic solid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElasticProps {
    /// First Lamé coefficient λ (Pa, complex)
    pub lambda: Complex64,
    /// Shear modulus N (Pa, complex)
    pub n: Complex64,
    /// Longitudinal wavenumber δ_p = ω·sqrt(ρ/(λ+2N))
    pub delta_p: Complex64,
    /// Shear wavenumber δ_s = ω·sqrt(ρ/N)
    pub delta_s: Complex64,
}

impl ElasticProps {
    /// Longitudinal characteristic impedance ρω/δ_p
    pub fn longitudinal_impedance(&self, rho: f64, omega: f64) -> Complex64 {
        rho * omega / self.delta_p
    }
}

/// An elastic solid medium
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Elastic {
    name: String,
    e: f64,
    nu: f64,
    rho: f64,
    eta: f64,
    #[serde(skip)]
    cache: Option<(f64, ElasticProps)>,
}

impl Elastic {
    /// Parameter schema: Young's modulus, Poisson ratio, density, loss factor
    pub const SCHEMA: &'static [ParamSpec] = &[
        ParamSpec::required("E"),
        ParamSpec::required("nu"),
        ParamSpec::required("rho"),
        ParamSpec::optional("eta", 0.0),
    ];

    /// Elastic solid from engineering constants
    ///
    /// `e` Young's modulus (Pa), `nu` Poisson ratio, `rho` density (kg/m³),
    /// `eta` structural loss factor.
    pub fn new(name: impl Into<String>, e: f64, nu: f64, rho: f64, eta: f64) -> Self {
        Self {
            name: name.into(),
            e,
            nu,
            rho,
            eta,
            cache: None,
        }
    }

    /// Build from a validated parameter map
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, ParamValue>,
    ) -> Result<Self> {
        let name = name.into();
        let p = super::resolve_params(&name, ModelKind::Elastic, Self::SCHEMA, params)?;
        Ok(Self::new(name, p["E"], p["nu"], p["rho"], p["eta"]))
    }

    /// Material name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Density (kg/m³)
    pub fn density(&self) -> f64 {
        self.rho
    }

    /// Current value of a parameter
    pub fn param(&self, name: &str) -> Option<ParamValue> {
        let v = match name {
            "E" => self.e,
            "nu" => self.nu,
            "rho" => self.rho,
            "eta" => self.eta,
            _ => return None,
        };
        Some(ParamValue::Real(v))
    }

    /// Assign a parameter and invalidate the derived-state cache
    pub fn set_param(&mut self, name: &str, value: ParamValue) -> Result<()> {
        let v = super::checked_real(
            &self.name,
            ModelKind::Elastic,
            name,
            self.param(name).is_some(),
            value,
        )?;
        match name {
            "E" => self.e = v,
            "nu" => self.nu = v,
            "rho" => self.rho = v,
            "eta" => self.eta = v,
            _ => unreachable!("param existence checked above"),
        }
        self.cache = None;
        Ok(())
    }

    /// Derived quantities at ω, pure (no cache interaction)
    pub fn props(&self, omega: f64) -> Result<ElasticProps> {
        check_omega(omega)?;
        let damping = Complex64::new(1.0, self.eta);
        let n = self.e / (2.0 * (1.0 + self.nu)) * damping;
        let lambda = self.e * self.nu / ((1.0 + self.nu) * (1.0 - 2.0 * self.nu)) * damping;
        let delta_p = omega * (self.rho / (lambda + 2.0 * n)).sqrt();
        let delta_s = omega * (self.rho / n).sqrt();
        Ok(ElasticProps {
            lambda,
            n,
            delta_p,
            delta_s,
        })
    }

    /// Derived quantities at ω, reusing the cache when the frequency matches
    pub fn evaluate(&mut self, omega: f64) -> Result<ElasticProps> {
        if let Some((cached_omega, props)) = self.cache {
            if cached_omega == omega {
                return Ok(props);
            }
        }
        let props = self.props(omega)?;
        self.cache = Some((omega, props));
        Ok(props)
    }

    /// Wave basis: P and SV waves with state [σ_zz, σ_xz, u_x, u_z]
    ///
    /// Columns come from the displacement potentials u = ∇φ + ∇×(ψŷ) with
    /// φ, ψ ∝ e^{−i(kₓx ± k_z z)}.
    pub fn wave_basis(&self, omega: f64, kx: Complex64) -> Result<WaveBasis> {
        let props = self.props(omega)?;
        let j = Complex64::i();
        let lambda = props.lambda;
        let n = props.n;
        let dp2 = props.delta_p * props.delta_p;
        let ds2 = props.delta_s * props.delta_s;
        let kzp = vertical_wavenumber(dp2, kx);
        let kzs = vertical_wavenumber(ds2, kx);

        let mut down = Array2::zeros((4, 2));
        let mut up = Array2::zeros((4, 2));

        // P wave
        let szz_p = -(lambda * dp2 + 2.0 * n * kzp * kzp);
        down[[state::ELASTIC_SZZ, 0]] = szz_p;
        down[[state::ELASTIC_SXZ, 0]] = -2.0 * n * kx * kzp;
        down[[state::ELASTIC_UX, 0]] = -j * kx;
        down[[state::ELASTIC_UZ, 0]] = -j * kzp;
        up[[state::ELASTIC_SZZ, 0]] = szz_p;
        up[[state::ELASTIC_SXZ, 0]] = 2.0 * n * kx * kzp;
        up[[state::ELASTIC_UX, 0]] = -j * kx;
        up[[state::ELASTIC_UZ, 0]] = j * kzp;

        // SV wave
        let sxz_s = n * (kzs * kzs - kx * kx);
        down[[state::ELASTIC_SZZ, 1]] = -2.0 * n * kx * kzs;
        down[[state::ELASTIC_SXZ, 1]] = sxz_s;
        down[[state::ELASTIC_UX, 1]] = j * kzs;
        down[[state::ELASTIC_UZ, 1]] = -j * kx;
        up[[state::ELASTIC_SZZ, 1]] = 2.0 * n * kx * kzs;
        up[[state::ELASTIC_SXZ, 1]] = sxz_s;
        up[[state::ELASTIC_UX, 1]] = -j * kzs;
        up[[state::ELASTIC_UZ, 1]] = -j * kx;

        Ok(WaveBasis {
            kz: vec![kzp, kzs],
            down,
            up,
        })
    }
}
