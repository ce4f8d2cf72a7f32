//! Biot poroelastic medium
//!
//! Full Biot theory in the Dazel {uˢ, uᵗ} displacement parameterization: the
//! pore fluid follows the JCA equivalent-fluid model, the frame is an
//! isotropic elastic skeleton, and the coupled system supports two
//! compressional waves and one shear wave. The state vector traces the
//! in-vacuo frame stress σ̂ (total stress σᵗ_zz = σ̂_zz − p), the solid
//! displacement and the total displacement uᵗ = (1−φ)uˢ + φuᶠ.

use std::collections::HashMap;

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::core::constants::AIR_RHO;
use crate::core::error::Result;
use crate::core::media::fluid::{jca_effective, Fluid, JcaParams};
use crate::core::media::{check_omega, state, vertical_wavenumber, WaveBasis};
use crate::core::types::{ModelKind, ParamSpec, ParamValue};

/// Frequency-dependent derived quantities of a poroelastic medium
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoroProps {
    /// JCA effective density of the pore fluid phase (kg/m³)
    pub rho_eq: Complex64,
    /// JCA effective bulk modulus of the pore fluid phase (Pa)
    pub k_eq: Complex64,
    /// Frame shear modulus N (Pa, complex)
    pub n: Complex64,
    /// Frame first Lamé coefficient Â (Pa, complex)
    pub a_hat: Complex64,
    /// Inertial coupling coefficient γ̃
    pub gamma: Complex64,
    /// Effective solid density ρ̃
    pub rho_til: Complex64,
    /// Squared wavenumber of the equivalent-fluid wave δ_eq²
    pub delta_eq_sq: Complex64,
    /// Squared wavenumber ω²ρ̃/P̂
    pub delta_s1_sq: Complex64,
    /// Squared wavenumber ω²ρ̃_s/P̂
    pub delta_s2_sq: Complex64,
    /// Squared wavenumber of the first compressional Biot wave
    pub delta1_sq: Complex64,
    /// Squared wavenumber of the second compressional Biot wave
    pub delta2_sq: Complex64,
    /// Squared wavenumber of the shear Biot wave
    pub delta3_sq: Complex64,
    /// Total/solid displacement ratio of the first compressional wave
    pub mu1: Complex64,
    /// Total/solid displacement ratio of the second compressional wave
    pub mu2: Complex64,
    /// Total/solid displacement ratio of the shear wave (−γ̃)
    pub mu3: Complex64,
}

/// A poroelastic (Biot) medium
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poroelastic {
    name: String,
    phi: f64,
    sigma: f64,
    alpha: f64,
    lambda: f64,
    lambda_prime: f64,
    rho_1: f64,
    e: f64,
    nu: f64,
    eta: f64,
    #[serde(skip)]
    cache: Option<(f64, PoroProps)>,
}

impl Poroelastic {
    /// Parameter schema: pore network, frame density and frame elasticity
    pub const SCHEMA: &'static [ParamSpec] = &[
        ParamSpec::required("phi"),
        ParamSpec::required("sigma"),
        ParamSpec::required("alpha"),
        ParamSpec::required("lambda"),
        ParamSpec::required("lambda_prime"),
        ParamSpec::required("rho_1"),
        ParamSpec::required("E"),
        ParamSpec::required("nu"),
        ParamSpec::optional("eta", 0.0),
    ];

    /// Poroelastic medium from its nine physical parameters
    pub fn new(
        name: impl Into<String>,
        phi: f64,
        sigma: f64,
        alpha: f64,
        lambda: f64,
        lambda_prime: f64,
        rho_1: f64,
        e: f64,
        nu: f64,
        eta: f64,
    ) -> Self {
        Self {
            name: name.into(),
            phi,
            sigma,
            alpha,
            lambda,
            lambda_prime,
            rho_1,
            e,
            nu,
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
        let p = super::resolve_params(&name, ModelKind::Poroelastic, Self::SCHEMA, params)?;
        Ok(Self::new(
            name,
            p["phi"],
            p["sigma"],
            p["alpha"],
            p["lambda"],
            p["lambda_prime"],
            p["rho_1"],
            p["E"],
            p["nu"],
            p["eta"],
        ))
    }

    /// Material name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rigid-frame limit of this material: a JCA equivalent fluid with
    /// the same pore parameters (the "forced" equivalent-fluid mode)
    pub fn equivalent_fluid(&self) -> Fluid {
        Fluid::jca(self.name.clone(), self.jca_params())
    }

    fn jca_params(&self) -> JcaParams {
        JcaParams {
            phi: self.phi,
            sigma: self.sigma,
            alpha: self.alpha,
            lambda: self.lambda,
            lambda_prime: self.lambda_prime,
        }
    }

    /// Current value of a parameter
    pub fn param(&self, name: &str) -> Option<ParamValue> {
        let v = match name {
            "phi" => self.phi,
            "sigma" => self.sigma,
            "alpha" => self.alpha,
            "lambda" => self.lambda,
            "lambda_prime" => self.lambda_prime,
            "rho_1" => self.rho_1,
            "E" => self.e,
            "nu" => self.nu,
            "eta" => self.eta,
            _ => return None,
        };
        Some(ParamValue::Real(v))
    }

    /// Assign a parameter and invalidate the derived-state cache
    pub fn set_param(&mut self, name: &str, value: ParamValue) -> Result<()> {
        let v = super::checked_real(
            &self.name,
            ModelKind::Poroelastic,
            name,
            self.param(name).is_some(),
            value,
        )?;
        match name {
            "phi" => self.phi = v,
            "sigma" => self.sigma = v,
            "alpha" => self.alpha = v,
            "lambda" => self.lambda = v,
            "lambda_prime" => self.lambda_prime = v,
            "rho_1" => self.rho_1 = v,
            "E" => self.e = v,
            "nu" => self.nu = v,
            "eta" => self.eta = v,
            _ => unreachable!("param existence checked above"),
        }
        self.cache = None;
        Ok(())
    }

    /// Derived quantities at ω, pure (no cache interaction)
    pub fn props(&self, omega: f64) -> Result<PoroProps> {
        check_omega(omega)?;

        let fluid = jca_effective(&self.jca_params(), omega);
        let rho_eq = fluid.rho;
        let k_eq = fluid.k;

        // Frame elasticity (in-vacuo, hysteretic damping)
        let damping = Complex64::new(1.0, self.eta);
        let n = self.e / (2.0 * (1.0 + self.nu)) * damping;
        let a_hat = self.e * self.nu / ((1.0 + self.nu) * (1.0 - 2.0 * self.nu)) * damping;
        let p_hat = a_hat + 2.0 * n;

        // Biot inertial coupling
        let rho_22 = self.phi * self.phi * rho_eq;
        let rho_12 = self.phi * AIR_RHO - rho_22;
        let rho_11 = self.rho_1 - rho_12;
        let rho_til = rho_11 - rho_12 * rho_12 / rho_22;
        let gamma = self.phi * (rho_12 / rho_22 - (1.0 - self.phi) / self.phi);
        let rho_s = rho_til + gamma * gamma * rho_eq;

        // Characteristic wavenumbers of the {us, ut} system
        let om2 = omega * omega;
        let delta_eq_sq = om2 * rho_eq / k_eq;
        let delta_s1_sq = om2 * rho_til / p_hat;
        let delta_s2_sq = om2 * rho_s / p_hat;

        let sum = delta_s2_sq + delta_eq_sq;
        let psi = sum * sum - 4.0 * delta_eq_sq * delta_s1_sq;
        let sq = psi.sqrt();
        let delta1_sq = 0.5 * (sum + sq);
        let delta2_sq = 0.5 * (sum - sq);
        let delta3_sq = om2 * rho_til / n;

        let mu1 = gamma * delta_eq_sq / (delta1_sq - delta_eq_sq);
        let mu2 = gamma * delta_eq_sq / (delta2_sq - delta_eq_sq);
        let mu3 = -gamma;

        Ok(PoroProps {
            rho_eq,
            k_eq,
            n,
            a_hat,
            gamma,
            rho_til,
            delta_eq_sq,
            delta_s1_sq,
            delta_s2_sq,
            delta1_sq,
            delta2_sq,
            delta3_sq,
            mu1,
            mu2,
            mu3,
        })
    }

    /// Derived quantities at ω, reusing the cache when the frequency matches
    pub fn evaluate(&mut self, omega: f64) -> Result<PoroProps> {
        if let Some((cached_omega, props)) = self.cache {
            if cached_omega == omega {
                return Ok(props);
            }
        }
        let props = self.props(omega)?;
        self.cache = Some((omega, props));
        Ok(props)
    }

    /// Wave basis: two compressional waves and one shear wave with state
    /// [σ̂_zz, σ̂_xz, uˢ_x, uˢ_z, p, uᵗ_z]
    pub fn wave_basis(&self, omega: f64, kx: Complex64) -> Result<WaveBasis> {
        let props = self.props(omega)?;
        let j = Complex64::i();
        let n = props.n;
        let a_hat = props.a_hat;

        let mut down = Array2::zeros((6, 3));
        let mut up = Array2::zeros((6, 3));
        let mut kz = Vec::with_capacity(3);

        // Compressional waves: us = ∇φ, ut = μᵢ·us, p = K̃_eq·μᵢ·δᵢ²·φ
        for (w, (delta_sq, mu)) in [(props.delta1_sq, props.mu1), (props.delta2_sq, props.mu2)]
            .into_iter()
            .enumerate()
        {
            let kzw = vertical_wavenumber(delta_sq, kx);
            kz.push(kzw);

            let szz = -(a_hat * delta_sq + 2.0 * n * kzw * kzw);
            let p = props.k_eq * mu * delta_sq;

            down[[state::PORO_SZZ, w]] = szz;
            down[[state::PORO_SXZ, w]] = -2.0 * n * kx * kzw;
            down[[state::PORO_USX, w]] = -j * kx;
            down[[state::PORO_USZ, w]] = -j * kzw;
            down[[state::PORO_P, w]] = p;
            down[[state::PORO_UTZ, w]] = mu * (-j * kzw);

            up[[state::PORO_SZZ, w]] = szz;
            up[[state::PORO_SXZ, w]] = 2.0 * n * kx * kzw;
            up[[state::PORO_USX, w]] = -j * kx;
            up[[state::PORO_USZ, w]] = j * kzw;
            up[[state::PORO_P, w]] = p;
            up[[state::PORO_UTZ, w]] = mu * (j * kzw);
        }

        // Shear wave: us = ∇×(ψŷ), ut = −γ̃·us, no pressure
        let kz3 = vertical_wavenumber(props.delta3_sq, kx);
        kz.push(kz3);
        let sxz_s = n * (kz3 * kz3 - kx * kx);

        down[[state::PORO_SZZ, 2]] = -2.0 * n * kx * kz3;
        down[[state::PORO_SXZ, 2]] = sxz_s;
        down[[state::PORO_USX, 2]] = j * kz3;
        down[[state::PORO_USZ, 2]] = -j * kx;
        down[[state::PORO_UTZ, 2]] = props.mu3 * (-j * kx);

        up[[state::PORO_SZZ, 2]] = 2.0 * n * kx * kz3;
        up[[state::PORO_SXZ, 2]] = sxz_s;
        up[[state::PORO_USX, 2]] = -j * kz3;
        up[[state::PORO_USZ, 2]] = -j * kx;
        up[[state::PORO_UTZ, 2]] = props.mu3 * (-j * kx);

        Ok(WaveBasis { kz, down, up })
    }
}
