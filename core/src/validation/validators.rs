//! # CONCRETE VALIDATOR IMPLEMENTATIONS
//!
//! **CRITICAL**: The two checks guarding every pocket mutation.

use super::{ValidationContext, Validator};
use crate::dependencies::TypeConstraint;
use crate::errors::PocketError;
use crate::types::Value;

// ================================================================================================
// NAME VALIDATOR - Dependency name rules
// ================================================================================================

/// **NAME VALIDATOR**
///
/// **PURPOSE**: Rejects empty or whitespace-only names, and optionally
/// over-long or untrimmed ones.
/// **GUARANTEE**: Accepted names are returned unchanged; matching stays case-sensitive.
#[derive(Debug, Clone)]
pub struct NameValidator {
    /// **MAXIMUM NAME LENGTH** - In characters, `None` for unlimited
    max_length: Option<usize>,

    /// **STRICT MODE** - Reject leading/trailing whitespace when enabled
    strict: bool,
}

impl NameValidator {
    /// **CONSTRUCTOR** - Default context limits
    pub fn new() -> Self {
        Self::from_context(&ValidationContext::default())
    }

    /// **CONSTRUCTOR FROM CONTEXT**
    pub fn from_context(ctx: &ValidationContext) -> Self {
        Self {
            max_length: ctx.max_name_length,
            strict: ctx.strict_names,
        }
    }

    fn reject(name: String, reason: impl Into<String>) -> PocketError {
        PocketError::InvalidName {
            name,
            reason: reason.into(),
        }
    }
}

impl Default for NameValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for NameValidator {
    type Input = String;
    type Output = String;

    fn validate(&self, input: Self::Input) -> Result<Self::Output, PocketError> {
        // **STEP 1**: Blank names never identify a slot
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(Self::reject(input, "dependency name cannot be empty"));
        }

        // **STEP 2**: Strict mode keeps names exactly as they will be looked up
        if self.strict && trimmed.len() != input.len() {
            return Err(Self::reject(
                input,
                "dependency name has leading or trailing whitespace",
            ));
        }

        // **STEP 3**: Length limit
        if let Some(max_len) = self.max_length {
            let len = input.chars().count();
            if len > max_len {
                return Err(Self::reject(
                    input,
                    format!("dependency name length {} exceeds maximum {}", len, max_len),
                ));
            }
        }

        Ok(input)
    }
}

// ================================================================================================
// TYPE VALIDATOR - Values against declared constraints
// ================================================================================================

/// **TYPE VALIDATOR**
///
/// **PURPOSE**: Applies [`TypeConstraint::satisfied_by`] for one named slot and
/// turns a rejection into a diagnosable [`PocketError::TypeMismatch`].
#[derive(Debug, Clone, Copy)]
pub struct TypeValidator<'a> {
    name: &'a str,
    constraint: &'a TypeConstraint,
}

impl<'a> TypeValidator<'a> {
    /// **CONSTRUCTOR**
    pub fn new(name: &'a str, constraint: &'a TypeConstraint) -> Self {
        Self { name, constraint }
    }
}

impl Validator for TypeValidator<'_> {
    type Input = Value;
    type Output = Value;

    fn validate(&self, input: Self::Input) -> Result<Self::Output, PocketError> {
        if self.constraint.satisfied_by(&input) {
            Ok(input)
        } else {
            Err(PocketError::TypeMismatch {
                name: self.name.to_string(),
                declared: self.constraint.clone(),
                given: input.type_name(),
            })
        }
    }
}
