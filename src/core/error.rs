//! Error types for stack configuration and solving
//!
//! Every failure is surfaced at the point of detection (construction, draw or
//! solve) with the offending medium/layer/model names attached; nothing is
//! retried and no silently wrong coefficient is ever returned.

use crate::core::direct::LuError;
use crate::core::types::{ModelKind, ParamKind};
use thiserror::Error;

/// Errors raised while building or solving a multilayer stack
#[derive(Debug, Error)]
pub enum TmmError {
    /// Layer thickness must be strictly positive
    #[error("layer '{layer}': thickness must be > 0 m, got {thickness}")]
    InvalidThickness {
        /// Layer display name
        layer: String,
        /// The rejected thickness (m)
        thickness: f64,
    },

    /// Parameter name absent from the medium's schema
    #[error("medium '{medium}' ({model}): unknown parameter '{param}'")]
    UnknownParameter {
        /// Medium name
        medium: String,
        /// Medium model tag
        model: ModelKind,
        /// The unknown parameter name
        param: String,
    },

    /// Required parameter missing at construction
    #[error("medium '{medium}' ({model}): missing required parameter '{param}'")]
    MissingParameter {
        /// Medium name
        medium: String,
        /// Medium model tag
        model: ModelKind,
        /// The missing parameter name
        param: String,
    },

    /// Runtime value kind does not match the declared parameter kind
    #[error("medium '{medium}': parameter '{param}' expects {expected}, got {actual}")]
    ParameterType {
        /// Medium name
        medium: String,
        /// Parameter name
        param: String,
        /// Kind declared by the schema
        expected: ParamKind,
        /// Kind of the offending value
        actual: ParamKind,
    },

    /// No coupling procedure exists for this ordered model pair
    #[error("no interface coupling implemented between {above} (above) and {below} (below)")]
    UnsupportedInterface {
        /// Model of the upper medium
        above: ModelKind,
        /// Model of the lower medium
        below: ModelKind,
    },

    /// Frequency outside the valid domain (ω > 0)
    #[error("frequency must be strictly positive, got {frequency} Hz")]
    InvalidFrequency {
        /// The rejected frequency (Hz)
        frequency: f64,
    },

    /// The solver was given no layers
    #[error("layer stack is empty")]
    EmptyStack,

    /// The global system could not be solved at this sweep point
    #[error("global system is singular at f = {frequency} Hz, angle = {angle}°: {source}")]
    SingularSystem {
        /// Frequency of the failing point (Hz)
        frequency: f64,
        /// Incidence angle of the failing point (degrees)
        angle: f64,
        /// Underlying factorization failure
        source: LuError,
    },
}

/// A specialized `Result` type for solver operations
pub type Result<T> = std::result::Result<T, TmmError>;

impl TmmError {
    /// Returns `true` for configuration errors (bad stack or schema usage)
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            TmmError::InvalidThickness { .. }
                | TmmError::UnknownParameter { .. }
                | TmmError::MissingParameter { .. }
                | TmmError::EmptyStack
        )
    }

    /// Returns `true` for the unimplemented-physics coupling error
    pub fn is_unsupported_interface(&self) -> bool {
        matches!(self, TmmError::UnsupportedInterface { .. })
    }

    /// Returns `true` for numerical failures during a solve
    pub fn is_numerical_error(&self) -> bool {
        matches!(
            self,
            TmmError::SingularSystem { .. } | TmmError::InvalidFrequency { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_offenders() {
        let err = TmmError::UnsupportedInterface {
            above: ModelKind::Elastic,
            below: ModelKind::Poroelastic,
        };
        let msg = err.to_string();
        assert!(msg.contains("elastic"));
        assert!(msg.contains("poroelastic"));
        assert!(err.is_unsupported_interface());
    }

    #[test]
    fn test_error_classification() {
        let err = TmmError::EmptyStack;
        assert!(err.is_configuration_error());
        assert!(!err.is_numerical_error());

        let err = TmmError::InvalidFrequency { frequency: 0.0 };
        assert!(err.is_numerical_error());
    }

    #[test]
    fn test_parameter_type_display() {
        let err = TmmError::ParameterType {
            medium: "foam".to_string(),
            param: "sigma".to_string(),
            expected: ParamKind::Real,
            actual: ParamKind::Int,
        };
        let msg = err.to_string();
        assert!(msg.contains("expects real"));
        assert!(msg.contains("got int"));
    }
}
