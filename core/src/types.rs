//! # POCKET VALUE TYPES
//!
//! **CRITICAL**: Every value stored in a pocket is a [`Value`].
//! **MANDATE**: Runtime kind inspection goes through [`Value::kind`] and
//! [`Instance::is_a`]; nothing else decides what a value "is".

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// **PRIMITIVE KIND ENUMERATION**
///
/// Closed set of runtime kinds a value can have. `Array` covers both
/// positional lists and string-keyed maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Null value.
    Null,
    /// `true` or `false`.
    Boolean,
    /// Signed 64-bit integer.
    Integer,
    /// 64-bit float.
    Float,
    /// UTF-8 string.
    String,
    /// List or string-keyed map.
    Array,
    /// Shared [`Instance`].
    Object,
    /// Shared closure.
    Callable,
}

impl Kind {
    /// Canonical tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Boolean => "boolean",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
            Kind::Callable => "callable",
        }
    }

    /// **TAG LOOKUP**
    ///
    /// Maps a declared type tag (canonical or alias) to a constrainable kind.
    /// `null` is not constrainable and yields `None`.
    pub fn from_tag(tag: &str) -> Option<Kind> {
        match tag {
            "boolean" | "bool" => Some(Kind::Boolean),
            "integer" | "int" => Some(Kind::Integer),
            "float" | "double" => Some(Kind::Float),
            "string" => Some(Kind::String),
            "array" | "list" => Some(Kind::Array),
            "object" => Some(Kind::Object),
            "callable" | "closure" => Some(Kind::Callable),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ================================================================================================
// INSTANCE - Object values with a named type and declared supertypes
// ================================================================================================

/// **OBJECT INSTANCE TRAIT**
///
/// **PURPOSE**: Gives object values a runtime type name and the names of the
/// classes or interfaces they satisfy.
/// **USAGE**: Implement by hand or with [`impl_instance!`](crate::impl_instance).
pub trait Instance: Any + Send + Sync + fmt::Debug {
    /// Runtime type name, compared against class constraints.
    fn type_name(&self) -> &str;

    /// Names of parent classes and implemented interfaces.
    ///
    /// Matching is not transitive: list every ancestor and interface the
    /// type should satisfy, not just the direct parent.
    fn supertypes(&self) -> &[&'static str] {
        &[]
    }

    /// Downcasting hook.
    fn as_any(&self) -> &dyn Any;

    /// True if this instance is `class` or one of its subtypes.
    fn is_a(&self, class: &str) -> bool {
        self.type_name() == class || self.supertypes().iter().any(|s| *s == class)
    }
}

/// **INSTANCE IMPLEMENTATION MACRO**
///
/// Supertypes are listed in full, direct parent first:
///
/// ```rust
/// use pocket::impl_instance;
/// use pocket::types::Instance;
///
/// #[derive(Debug)]
/// struct SmtpMailer;
/// impl_instance!(SmtpMailer: "Mailer", "Transport");
///
/// assert!(SmtpMailer.is_a("Mailer"));
/// assert!(SmtpMailer.is_a("Transport"));
/// ```
#[macro_export]
macro_rules! impl_instance {
    ($ty:ident $(: $($super:literal),+ $(,)?)?) => {
        impl $crate::types::Instance for $ty {
            fn type_name(&self) -> &str {
                stringify!($ty)
            }

            fn supertypes(&self) -> &[&'static str] {
                &[$($($super),+)?]
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }
    };
}

// ================================================================================================
// CALLABLE - Shared closure values
// ================================================================================================

type CallableFn = dyn Fn(&[Value]) -> Value + Send + Sync;

/// **CALLABLE VALUE**
///
/// Cheaply clonable handle to a closure over pocket values.
#[derive(Clone)]
pub struct Callable(Arc<CallableFn>);

impl Callable {
    /// **CONSTRUCTOR**
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invoke the closure.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }

    /// True if both handles point at the same closure.
    pub fn ptr_eq(&self, other: &Callable) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callable(..)")
    }
}

// ================================================================================================
// VALUE - Tagged union stored in every slot
// ================================================================================================

/// **POCKET VALUE**
///
/// **PURPOSE**: Explicit shape for anything a dependency slot can hold.
/// **GUARANTEE**: Cloning is cheap for objects and callables (shared handles).
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Explicit "no value". Distinct from a slot that was never assigned.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Float.
    Float(f64),
    /// String.
    Str(String),
    /// Positional array.
    List(Vec<Value>),
    /// String-keyed array.
    Map(BTreeMap<String, Value>),
    /// Shared object instance.
    Object(Arc<dyn Instance>),
    /// Shared closure.
    Callable(Callable),
}

impl Value {
    /// **OBJECT CONSTRUCTOR**
    pub fn object<T: Instance>(instance: T) -> Self {
        Value::Object(Arc::new(instance))
    }

    /// **CALLABLE CONSTRUCTOR**
    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Value::Callable(Callable::new(f))
    }

    /// Runtime kind of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Boolean,
            Value::Int(_) => Kind::Integer,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::String,
            Value::List(_) | Value::Map(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
            Value::Callable(_) => Kind::Callable,
        }
    }

    /// **DIAGNOSTIC TYPE NAME**
    ///
    /// Class name for objects, kind tag for everything else.
    pub fn type_name(&self) -> String {
        match self {
            Value::Object(instance) => instance.type_name().to_string(),
            other => other.kind().as_str().to_string(),
        }
    }

    /// True for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Boolean payload, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer payload, if any.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Float payload, if any.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// String payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// List items, if any.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Map entries, if any.
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Closure handle, if any.
    pub fn as_callable(&self) -> Option<&Callable> {
        match self {
            Value::Callable(c) => Some(c),
            _ => None,
        }
    }

    /// Shared handle to the wrapped object, if any.
    pub fn as_instance(&self) -> Option<&Arc<dyn Instance>> {
        match self {
            Value::Object(instance) => Some(instance),
            _ => None,
        }
    }

    /// **TYPED OBJECT ACCESS**
    ///
    /// Borrows the wrapped object as `T` when the runtime type matches.
    pub fn downcast_ref<T: Instance>(&self) -> Option<&T> {
        match self {
            Value::Object(instance) => instance.as_any().downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            // objects and callables compare by identity
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            (Value::Callable(a), Value::Callable(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

// **CONVERSIONS**

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

impl From<Callable> for Value {
    fn from(callable: Callable) -> Self {
        Value::Callable(callable)
    }
}

impl From<Arc<dyn Instance>> for Value {
    fn from(instance: Arc<dyn Instance>) -> Self {
        Value::Object(instance)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}
