//! # Error Types
//!
//! The engine error union surfaced by suspendable computations.
//!
//! The top-level [`EngineError`] wraps one closed enum per domain. The arms
//! are part of the interface: callers pattern-match on them to decide how
//! to convert a failure into an API response, so variants are never folded
//! into strings at this layer.

use shared_types::{ContractId, PackageId};
use thiserror::Error;

/// Top-level engine error: one arm per failure domain.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Package loading or validation failed.
    #[error(transparent)]
    Package(#[from] PackageError),

    /// Command preprocessing failed before interpretation started.
    #[error(transparent)]
    Preprocessing(#[from] PreprocessingError),

    /// Interpretation failed while the computation was running.
    #[error(transparent)]
    Interpretation(#[from] InterpretationError),

    /// Transaction validation (replay) failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Failures in the package domain.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PackageError {
    /// The referenced package is not loaded on this participant.
    #[error("package {0} is not loaded")]
    NotFound(PackageId),

    /// The package failed self-consistency validation.
    #[error("package validation failed: {0}")]
    Validation(String),
}

/// Failures while translating commands, before interpretation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PreprocessingError {
    /// The command referenced a template unknown to the loaded packages.
    #[error("template {0} is unknown")]
    UnknownTemplate(String),

    /// The command payload could not be translated.
    #[error("command translation failed: {0}")]
    Translation(String),
}

/// Failures raised while a computation is being interpreted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InterpretationError {
    /// The host could not resolve a contract the computation fetched.
    #[error("contract {0} not found")]
    ContractNotFound(ContractId),

    /// Generic interpretation failure with a rendered message.
    #[error("{0}")]
    Generic(String),
}

/// Failures raised by transaction validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The recorded transaction does not match the replayed one.
    #[error("replay mismatch: {0}")]
    ReplayMismatch(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpretation_errors_render_their_payload() {
        let err = EngineError::Interpretation(InterpretationError::ContractNotFound(
            ContractId::new("#1:0"),
        ));
        assert_eq!(err.to_string(), "contract #1:0 not found");

        let err = EngineError::Interpretation(InterpretationError::Generic(
            "Couldn't find package deadbeef".to_string(),
        ));
        assert_eq!(err.to_string(), "Couldn't find package deadbeef");
    }

    #[test]
    fn test_domain_errors_lift_into_engine_error() {
        let err: EngineError = PackageError::NotFound(PackageId::new("p1")).into();
        assert!(matches!(err, EngineError::Package(_)));

        let err: EngineError = ValidationError::ReplayMismatch("node 3".to_string()).into();
        assert!(matches!(err, EngineError::Validation(_)));
    }
}
