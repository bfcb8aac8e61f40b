//! The slot registry itself.

use crate::dependencies::types::{DefineEntry, Slot, TypeConstraint};
use crate::errors::{PocketError, PocketResult};
use crate::types::{Instance, Value};
use crate::validation::{NameValidator, TypeValidator, ValidationContext, Validator};
use std::collections::{BTreeMap, HashMap};

/// **DEPENDENCY POCKET**
///
/// **PURPOSE**: Named, optionally typed dependency slots owned by one object and
/// filled after construction.
/// **LIFECYCLE**: Slots are only ever added; values may be overwritten freely.
///
/// A `Pocket` has no internal synchronization. Share it across threads only
/// behind an external lock such as `Mutex<Pocket>`.
///
/// ```rust
/// use pocket::dependencies::Pocket;
/// use pocket::types::Value;
///
/// # fn main() -> Result<(), pocket::errors::PocketError> {
/// let mut pocket = Pocket::new();
/// pocket.define("port", "integer")?.define("host", "")?;
/// pocket.set("port", 8080)?.set("host", "localhost")?;
/// assert_eq!(pocket.get("port")?, Value::Int(8080));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pocket {
    slots: HashMap<String, Slot>,
    context: ValidationContext,
}

impl Pocket {
    /// **CONSTRUCTOR**
    pub fn new() -> Self {
        Self::default()
    }

    /// **CONSTRUCTOR WITH CONTEXT**
    pub fn with_context(context: ValidationContext) -> Self {
        Self {
            slots: HashMap::new(),
            context,
        }
    }

    /// Validation settings applied to new names.
    pub fn context(&self) -> &ValidationContext {
        &self.context
    }

    /// Number of defined slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if nothing has been defined yet.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Defined names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    // ============================================================================================
    // INTROSPECTION
    // ============================================================================================

    /// True if `name` has been defined, whether or not it holds a value.
    pub fn has(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// True if `name` is defined and currently holds a non-null value.
    pub fn has_value(&self, name: &str) -> bool {
        self.slots.get(name).is_some_and(Slot::is_filled)
    }

    /// **DECLARED TYPE LOOKUP**
    ///
    /// For diagnostics; assignment already enforces the constraint. Primitive
    /// tags come back in canonical form, so a slot declared `"double"` reports
    /// `"float"` and one declared `"int"` reports `"integer"`.
    pub fn get_type(&self, name: &str) -> PocketResult<&TypeConstraint> {
        self.slot(name).map(Slot::declared)
    }

    /// Slot record for `name`.
    pub fn slot(&self, name: &str) -> PocketResult<&Slot> {
        self.slots
            .get(name)
            .ok_or_else(|| PocketError::not_found(name))
    }

    // ============================================================================================
    // DEFINITION
    // ============================================================================================

    /// **DEFINE DEPENDENCY**
    ///
    /// **PARAMETERS**:
    /// - `name` - Unique, case-sensitive, non-blank identifier
    /// - `declared` - Constraint or tag (`""`/`None` for any type, `"integer"`, `"Model"`, ...)
    ///
    /// **ERRORS**: `InvalidName`, `AlreadyDefined`
    pub fn define(
        &mut self,
        name: impl Into<String>,
        declared: impl Into<TypeConstraint>,
    ) -> PocketResult<&mut Self> {
        let name = NameValidator::from_context(&self.context).validate(name.into())?;

        if self.slots.contains_key(&name) {
            log::debug!("Pocket: rejected redefinition of '{}'", name);
            return Err(PocketError::AlreadyDefined { name });
        }

        let declared = declared.into();
        log::debug!("Pocket: defined '{}' as {:?}", name, declared);
        self.slots.insert(name, Slot::new(declared));
        Ok(self)
    }

    /// **DEFINE FROM PROTOTYPE**
    ///
    /// Constrains `name` to the runtime type of `prototype`.
    pub fn define_like<T: Instance + ?Sized>(
        &mut self,
        name: impl Into<String>,
        prototype: &T,
    ) -> PocketResult<&mut Self> {
        self.define(name, TypeConstraint::of(prototype))
    }

    /// **BULK DEFINE**
    ///
    /// Defines each entry in order. A bare name is the untyped shorthand.
    /// Stops at the first failure; earlier entries stay defined.
    ///
    /// ```rust
    /// # use pocket::dependencies::Pocket;
    /// # fn main() -> Result<(), pocket::errors::PocketError> {
    /// let mut pocket = Pocket::new();
    /// pocket.define_many([("port", "integer"), ("host", "string")])?;
    /// pocket.define_many(["logger", "cache"])?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn define_many<I, E>(&mut self, entries: I) -> PocketResult<&mut Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<DefineEntry>,
    {
        for entry in entries {
            let (name, declared) = entry.into().into_parts();
            self.define(name, declared)?;
        }
        Ok(self)
    }

    /// **BULK DEFINE FROM JSON**
    ///
    /// Accepts an object of `name -> type tag` (null or `""` for any type) or an
    /// array of bare names.
    pub fn define_json(&mut self, doc: &serde_json::Value) -> PocketResult<&mut Self> {
        match doc {
            serde_json::Value::Object(table) => {
                for (name, declared) in table {
                    let declared = match declared {
                        serde_json::Value::Null => TypeConstraint::Any,
                        serde_json::Value::String(tag) => TypeConstraint::parse(tag),
                        other => {
                            return Err(PocketError::InvalidDefinition {
                                message: format!(
                                    "type of '{}' must be a string or null, got {}",
                                    name, other
                                ),
                            })
                        }
                    };
                    self.define(name.as_str(), declared)?;
                }
                Ok(self)
            }
            serde_json::Value::Array(names) => {
                for name in names {
                    let name = name.as_str().ok_or_else(|| PocketError::InvalidDefinition {
                        message: format!("positional entry must be a name, got {}", name),
                    })?;
                    self.define(name, TypeConstraint::Any)?;
                }
                Ok(self)
            }
            other => Err(PocketError::InvalidDefinition {
                message: format!("expected an object or array of names, got {}", other),
            }),
        }
    }

    // ============================================================================================
    // ASSIGNMENT
    // ============================================================================================

    /// **SET DEPENDENCY**
    ///
    /// Overwrites the slot's value. Null skips type checking; a rejected value
    /// leaves the previous one in place.
    ///
    /// **ERRORS**: `NotFound`, `TypeMismatch`
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> PocketResult<&mut Self> {
        let slot = self
            .slots
            .get_mut(name)
            .ok_or_else(|| PocketError::not_found(name))?;

        let value = TypeValidator::new(name, &slot.declared)
            .validate(value.into())
            .map_err(|err| {
                log::warn!("Pocket: {}", err);
                err
            })?;

        log::debug!("Pocket: set '{}' to {}", name, value.type_name());
        slot.value = Some(value);
        Ok(self)
    }

    /// **BULK SET**
    ///
    /// Stops at the first failure; earlier assignments are kept.
    pub fn set_many<I, K, V>(&mut self, entries: I) -> PocketResult<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        for (name, value) in entries {
            self.set(name.as_ref(), value)?;
        }
        Ok(self)
    }

    /// **BULK SET FROM JSON OBJECT**
    pub fn set_json(&mut self, doc: &serde_json::Value) -> PocketResult<&mut Self> {
        let table = doc.as_object().ok_or_else(|| PocketError::InvalidDefinition {
            message: format!("expected an object of values, got {}", doc),
        })?;
        for (name, value) in table {
            self.set(name, value.clone())?;
        }
        Ok(self)
    }

    // ============================================================================================
    // RETRIEVAL
    // ============================================================================================

    /// **GET DEPENDENCY**
    ///
    /// `Value::Null` for a defined slot that was never assigned.
    pub fn get(&self, name: &str) -> PocketResult<Value> {
        let slot = self.slot(name)?;
        log::trace!("Pocket: get '{}'", name);
        Ok(slot.value.clone().unwrap_or_default())
    }

    /// **GET SEVERAL DEPENDENCIES**
    ///
    /// Fails on the first undefined name without returning a partial map.
    pub fn get_many<I, S>(&self, names: I) -> PocketResult<BTreeMap<String, Value>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| {
                let name = name.as_ref();
                self.get(name).map(|value| (name.to_string(), value))
            })
            .collect()
    }

    /// **SNAPSHOT OF ALL DEPENDENCIES**
    pub fn get_all(&self) -> BTreeMap<String, Value> {
        self.slots
            .iter()
            .map(|(name, slot)| (name.clone(), slot.value.clone().unwrap_or_default()))
            .collect()
    }

    /// **TYPED OBJECT ACCESS**
    ///
    /// `Ok(None)` when the slot is unset or null. A value of another type is a
    /// `TypeMismatch`.
    pub fn get_object<T: Instance>(&self, name: &str) -> PocketResult<Option<&T>> {
        match self.slot(name)?.value() {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value
                .downcast_ref::<T>()
                .map(Some)
                .ok_or_else(|| PocketError::TypeMismatch {
                    name: name.to_string(),
                    declared: TypeConstraint::Class(short_type_name::<T>().to_string()),
                    given: value.type_name(),
                }),
        }
    }
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
