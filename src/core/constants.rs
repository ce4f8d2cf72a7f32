//! Reference air properties and numeric guards
//!
//! Ambient air at 20°C, used for the default incident and transmission
//! half-spaces and for the saturating fluid of poroelastic media.

/// Reference temperature (K)
pub const AIR_T: f64 = 293.15;

/// Atmospheric pressure (Pa)
pub const AIR_P0: f64 = 1.01325e5;

/// Ratio of specific heats
pub const AIR_GAMMA: f64 = 1.400;

/// Dynamic viscosity (kg·m⁻¹·s⁻¹)
pub const AIR_MU: f64 = 1.839e-5;

/// Prandtl number
pub const AIR_PRANDTL: f64 = 0.710;

/// Density (kg/m³)
pub const AIR_RHO: f64 = 1.213;

/// Adiabatic bulk modulus γ·P₀ (Pa)
pub const AIR_K: f64 = AIR_GAMMA * AIR_P0;

/// Kinematic viscosity ν = μ/ρ (m²/s)
pub const AIR_NU: f64 = AIR_MU / AIR_RHO;

/// Viscothermal diffusivity ν′ = ν/Pr (m²/s)
pub const AIR_NU_PRIME: f64 = AIR_NU / AIR_PRANDTL;

/// Small epsilon for numerical comparisons
pub const EPSY: f64 = 1.0e-14;

/// Adiabatic sound speed in air (m/s)
pub fn air_celerity() -> f64 {
    (AIR_K / AIR_RHO).sqrt()
}

/// Characteristic impedance of air ρ₀·c₀ (Pa·s/m)
pub fn air_impedance() -> f64 {
    AIR_RHO * air_celerity()
}
