//! Declared type constraints and slot records.

use crate::types::{Instance, Kind, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// **DECLARED TYPE CONSTRAINT**
///
/// **PURPOSE**: Restriction recorded for a slot at definition time.
/// **SERIALIZATION**: Round-trips through its string form (`""`, `"integer"`, `"Model"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TypeConstraint {
    /// Unconstrained; any value is accepted.
    #[default]
    Any,
    /// Value must have exactly this primitive kind.
    Primitive(Kind),
    /// Value must be an object of this class or one of its subtypes.
    Class(String),
}

impl TypeConstraint {
    /// **TAG PARSER**
    ///
    /// Empty (after trimming) means `Any`, a known primitive tag means
    /// `Primitive`, anything else is taken as a class name.
    pub fn parse(tag: &str) -> Self {
        let tag = tag.trim();
        if tag.is_empty() {
            TypeConstraint::Any
        } else if let Some(kind) = Kind::from_tag(tag) {
            TypeConstraint::Primitive(kind)
        } else {
            TypeConstraint::Class(tag.to_string())
        }
    }

    /// Class constraint taken from a prototype instance's runtime type.
    pub fn of<T: Instance + ?Sized>(prototype: &T) -> Self {
        TypeConstraint::Class(prototype.type_name().to_string())
    }

    /// **PROTOTYPE NORMALIZATION**
    ///
    /// Objects contribute their runtime type name, strings are parsed as
    /// tags, null means `Any`, other values constrain to their own kind.
    pub fn prototype(value: &Value) -> Self {
        match value {
            Value::Null => TypeConstraint::Any,
            Value::Object(instance) => TypeConstraint::of(&**instance),
            Value::Str(tag) => TypeConstraint::parse(tag),
            other => TypeConstraint::Primitive(other.kind()),
        }
    }

    /// True for the unconstrained marker.
    pub fn is_any(&self) -> bool {
        matches!(self, TypeConstraint::Any)
    }

    /// **SATISFACTION PREDICATE**
    ///
    /// The single rule deciding whether `value` may be stored under this
    /// constraint. Null always passes. Callables count as objects.
    pub fn satisfied_by(&self, value: &Value) -> bool {
        if value.is_null() {
            return true;
        }
        match self {
            TypeConstraint::Any => true,
            TypeConstraint::Primitive(Kind::Object) => {
                matches!(value, Value::Object(_) | Value::Callable(_))
            }
            TypeConstraint::Primitive(kind) => value.kind() == *kind,
            TypeConstraint::Class(class) => value
                .as_instance()
                .is_some_and(|instance| instance.is_a(class)),
        }
    }
}

impl fmt::Display for TypeConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeConstraint::Any => Ok(()),
            TypeConstraint::Primitive(kind) => f.write_str(kind.as_str()),
            TypeConstraint::Class(class) => f.write_str(class),
        }
    }
}

impl From<&str> for TypeConstraint {
    fn from(tag: &str) -> Self {
        TypeConstraint::parse(tag)
    }
}

impl From<String> for TypeConstraint {
    fn from(tag: String) -> Self {
        TypeConstraint::parse(&tag)
    }
}

impl From<Kind> for TypeConstraint {
    fn from(kind: Kind) -> Self {
        TypeConstraint::Primitive(kind)
    }
}

impl<T: Into<TypeConstraint>> From<Option<T>> for TypeConstraint {
    fn from(declared: Option<T>) -> Self {
        declared.map_or(TypeConstraint::Any, Into::into)
    }
}

impl From<TypeConstraint> for String {
    fn from(constraint: TypeConstraint) -> Self {
        constraint.to_string()
    }
}

/// **DEPENDENCY SLOT**
///
/// One named, independently typed storage cell. `value` is `None` until the
/// first assignment, which keeps "unset" apart from an explicit `Value::Null`.
#[derive(Debug, Clone)]
pub struct Slot {
    pub(crate) declared: TypeConstraint,
    pub(crate) value: Option<Value>,
}

impl Slot {
    pub(crate) fn new(declared: TypeConstraint) -> Self {
        Self {
            declared,
            value: None,
        }
    }

    /// Constraint recorded at definition time.
    pub fn declared(&self) -> &TypeConstraint {
        &self.declared
    }

    /// Current value; `None` if never assigned.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// True if a non-null value is currently assigned.
    pub fn is_filled(&self) -> bool {
        self.value.as_ref().is_some_and(|value| !value.is_null())
    }
}

/// **BULK DEFINITION ENTRY**
///
/// `Positional` is the terse "bare name, no constraint" shorthand.
#[derive(Debug, Clone, PartialEq)]
pub enum DefineEntry {
    /// Name with an explicit constraint.
    Typed {
        /// Dependency name.
        name: String,
        /// Constraint for the slot.
        declared: TypeConstraint,
    },
    /// Bare name; the slot accepts any type.
    Positional(String),
}

impl DefineEntry {
    pub(crate) fn into_parts(self) -> (String, TypeConstraint) {
        match self {
            DefineEntry::Typed { name, declared } => (name, declared),
            DefineEntry::Positional(name) => (name, TypeConstraint::Any),
        }
    }
}

impl From<&str> for DefineEntry {
    fn from(name: &str) -> Self {
        DefineEntry::Positional(name.to_string())
    }
}

impl From<String> for DefineEntry {
    fn from(name: String) -> Self {
        DefineEntry::Positional(name)
    }
}

impl<K, C> From<(K, C)> for DefineEntry
where
    K: Into<String>,
    C: Into<TypeConstraint>,
{
    fn from((name, declared): (K, C)) -> Self {
        DefineEntry::Typed {
            name: name.into(),
            declared: declared.into(),
        }
    }
}
