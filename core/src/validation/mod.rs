//! # POCKET VALIDATION MODULE
//!
//! **CORE VALIDATION SYSTEM WITH TRAIT-BASED ARCHITECTURE**
//!
//! Every check a pocket performs before mutating a slot lives here:
//!
//! 1. **NAME VALIDATION** - Non-blank dependency names, optionally length-limited or strict
//! 2. **TYPE VALIDATION** - Values against a slot's declared [`TypeConstraint`]
//!
//! ## USAGE
//!
//! ```rust
//! use pocket::validation::{NameValidator, Validator};
//!
//! let validator = NameValidator::new();
//! assert!(validator.validate("logger".to_string()).is_ok());
//! assert!(validator.validate("   ".to_string()).is_err());
//! ```
//!
//! [`TypeConstraint`]: crate::dependencies::TypeConstraint

use crate::errors::PocketError;
use serde::{Deserialize, Serialize};

pub mod validators;

pub use validators::{NameValidator, TypeValidator};

/// **CORE VALIDATOR TRAIT**
///
/// **MANDATE**: ALL pocket checks MUST implement this trait.
/// **GUARANTEE**: MUST NOT panic. ALL error conditions MUST return [`PocketError`].
pub trait Validator {
    /// **INPUT TYPE** - Data type accepted by this validator
    type Input;

    /// **OUTPUT TYPE** - Validated data type returned on success
    type Output;

    /// **VALIDATION EXECUTION**
    ///
    /// **RETURNS**:
    /// - `Ok(Self::Output)` - Successfully validated data
    /// - `Err(PocketError)` - Validation failure with structured error
    fn validate(&self, input: Self::Input) -> Result<Self::Output, PocketError>;
}

/// **RECOMMENDED MAXIMUM NAME LENGTH** (characters), applied by [`ValidationContext::bounded`]
pub const DEFAULT_MAX_NAME_LENGTH: usize = 256;

/// **VALIDATION CONTEXT**
///
/// **PURPOSE**: Per-pocket configuration for name validation.
/// **USAGE**: Pass to [`Pocket::with_context`](crate::dependencies::Pocket::with_context),
/// or load from JSON with [`ValidationContext::from_json`]. Missing fields take defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationContext {
    /// **MAXIMUM NAME LENGTH** - `None` (the default) disables the limit
    pub max_name_length: Option<usize>,

    /// **STRICT NAMES** - Reject names with leading or trailing whitespace
    pub strict_names: bool,
}

impl ValidationContext {
    /// **JSON LOADER**
    pub fn from_json(source: &str) -> serde_json::Result<Self> {
        serde_json::from_str(source)
    }

    /// Context that caps names at [`DEFAULT_MAX_NAME_LENGTH`] characters.
    pub fn bounded() -> Self {
        Self {
            max_name_length: Some(DEFAULT_MAX_NAME_LENGTH),
            strict_names: false,
        }
    }
}

/// **VALIDATION ERROR CODES**
///
/// **MANDATE**: Use these standardized error codes for consistent error reporting.
pub mod error_codes {
    /// Blank or rejected dependency name.
    pub const INVALID_NAME: &str = "RUST_CORE_POCKET_INVALID_NAME";
    /// Name defined twice.
    pub const ALREADY_DEFINED: &str = "RUST_CORE_POCKET_ALREADY_DEFINED";
    /// Name never defined.
    pub const NOT_FOUND: &str = "RUST_CORE_POCKET_NOT_FOUND";
    /// Value fails the declared type.
    pub const TYPE_MISMATCH: &str = "RUST_CORE_POCKET_TYPE_MISMATCH";
    /// Malformed bulk definition document.
    pub const INVALID_DEFINITION: &str = "RUST_CORE_POCKET_INVALID_DEFINITION";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_context_default() {
        let ctx = ValidationContext::default();
        assert_eq!(ctx.max_name_length, None);
        assert!(!ctx.strict_names);
        assert_eq!(ValidationContext::bounded().max_name_length, Some(256));
    }

    #[test]
    fn test_validation_context_from_json() {
        let ctx = ValidationContext::from_json(r#"{"strict_names": true}"#).unwrap();
        assert!(ctx.strict_names);
        assert_eq!(ctx.max_name_length, None);

        let ctx = ValidationContext::from_json(r#"{"max_name_length": 256}"#).unwrap();
        assert_eq!(ctx, ValidationContext::bounded());

        assert!(ValidationContext::from_json(r#"{"strict_names": "yes"}"#).is_err());
    }

    #[test]
    fn test_error_codes_exist() {
        assert!(!error_codes::INVALID_NAME.is_empty());
        assert!(!error_codes::ALREADY_DEFINED.is_empty());
        assert!(!error_codes::NOT_FOUND.is_empty());
        assert!(!error_codes::TYPE_MISMATCH.is_empty());
        assert!(!error_codes::INVALID_DEFINITION.is_empty());
    }
}
