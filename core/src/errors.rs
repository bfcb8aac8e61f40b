//! # POCKET ERROR TYPES
//!
//! **MANDATE**: Every failing pocket operation returns exactly one of these variants.
//! **GUARANTEE**: Errors are raised at the offending call; nothing is deferred or swallowed.

use crate::dependencies::TypeConstraint;
use crate::validation::error_codes;
use thiserror::Error;

/// **POCKET ERROR**
///
/// Structured failure for definition, assignment and retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PocketError {
    /// Name is empty, whitespace-only, or rejected by the validation context.
    #[error("INVALID NAME: '{name}' - {reason}")]
    InvalidName {
        /// Name as given.
        name: String,
        /// Which rule rejected it.
        reason: String,
    },

    /// Name already has a slot in this pocket.
    #[error("ALREADY DEFINED: dependency '{name}' is already defined")]
    AlreadyDefined {
        /// Duplicate name.
        name: String,
    },

    /// Name was never defined in this pocket.
    #[error("NOT FOUND: dependency '{name}' is not defined")]
    NotFound {
        /// Unknown name.
        name: String,
    },

    /// Value does not satisfy the slot's declared type.
    #[error("TYPE MISMATCH: dependency '{name}' must be of type {declared}, {given} given")]
    TypeMismatch {
        /// Slot being assigned.
        name: String,
        /// Constraint the slot was defined with.
        declared: TypeConstraint,
        /// Class name or kind tag of the rejected value.
        given: String,
    },

    /// Bulk definition document has an unsupported shape.
    #[error("INVALID DEFINITION: {message}")]
    InvalidDefinition {
        /// What was wrong with the document.
        message: String,
    },
}

impl PocketError {
    /// **STABLE ERROR CODE** - Machine-readable identifier for this variant
    pub fn code(&self) -> &'static str {
        match self {
            PocketError::InvalidName { .. } => error_codes::INVALID_NAME,
            PocketError::AlreadyDefined { .. } => error_codes::ALREADY_DEFINED,
            PocketError::NotFound { .. } => error_codes::NOT_FOUND,
            PocketError::TypeMismatch { .. } => error_codes::TYPE_MISMATCH,
            PocketError::InvalidDefinition { .. } => error_codes::INVALID_DEFINITION,
        }
    }

    /// Dependency name the error refers to, if any.
    pub fn dependency(&self) -> Option<&str> {
        match self {
            PocketError::InvalidName { name, .. }
            | PocketError::AlreadyDefined { name }
            | PocketError::NotFound { name }
            | PocketError::TypeMismatch { name, .. } => Some(name),
            PocketError::InvalidDefinition { .. } => None,
        }
    }

    pub(crate) fn not_found(name: &str) -> Self {
        PocketError::NotFound {
            name: name.to_string(),
        }
    }
}

/// **POCKET RESULT ALIAS**
pub type PocketResult<T> = Result<T, PocketError>;
