//! Owner-side accessors over a [`Pocket`].

use crate::dependencies::Pocket;
use crate::errors::PocketResult;
use crate::types::{Instance, Value};

/// **DEPENDENCY HOLDER**
///
/// **PURPOSE**: Lets an owning type expose its pocket through explicit accessors
/// instead of constructor parameters.
///
/// Types layered on top of a holder add their own slots to the same pocket
/// after the inner type has defined its slots, so the inner constructor never
/// changes.
pub trait DependencyHolder {
    /// Pocket holding this owner's slots.
    fn pocket(&self) -> &Pocket;

    /// Mutable access for defining and filling slots.
    fn pocket_mut(&mut self) -> &mut Pocket;

    /// Current value of `name`; fails with `NotFound` if undefined.
    fn dependency(&self, name: &str) -> PocketResult<Value> {
        self.pocket().get(name)
    }

    /// Object stored under `name`, borrowed as `T`.
    fn dependency_as<T: Instance>(&self, name: &str) -> PocketResult<Option<&T>> {
        self.pocket().get_object::<T>(name)
    }

    /// True if `name` is defined, set or not.
    fn has_dependency(&self, name: &str) -> bool {
        self.pocket().has(name)
    }

    /// Assigns `name`; same rules as [`Pocket::set`].
    fn set_dependency<V: Into<Value>>(&mut self, name: &str, value: V) -> PocketResult<()> {
        self.pocket_mut().set(name, value).map(|_| ())
    }
}

impl DependencyHolder for Pocket {
    fn pocket(&self) -> &Pocket {
        self
    }

    fn pocket_mut(&mut self) -> &mut Pocket {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PocketError;

    #[derive(Debug)]
    struct Clock {
        offset: i64,
    }
    crate::impl_instance!(Clock);

    struct Scheduler {
        pocket: Pocket,
    }

    impl Scheduler {
        fn new() -> PocketResult<Self> {
            let mut pocket = Pocket::new();
            pocket.define("clock", "Clock")?.define("interval", "integer")?;
            Ok(Self { pocket })
        }
    }

    impl DependencyHolder for Scheduler {
        fn pocket(&self) -> &Pocket {
            &self.pocket
        }

        fn pocket_mut(&mut self) -> &mut Pocket {
            &mut self.pocket
        }
    }

    // Adds a slot without touching Scheduler::new.
    struct RetryingScheduler {
        inner: Scheduler,
    }

    impl RetryingScheduler {
        fn new() -> PocketResult<Self> {
            let mut inner = Scheduler::new()?;
            inner.pocket_mut().define("max_retries", "integer")?;
            Ok(Self { inner })
        }
    }

    impl DependencyHolder for RetryingScheduler {
        fn pocket(&self) -> &Pocket {
            self.inner.pocket()
        }

        fn pocket_mut(&mut self) -> &mut Pocket {
            self.inner.pocket_mut()
        }
    }

    #[test]
    fn test_holder_accessors() {
        let mut scheduler = Scheduler::new().unwrap();
        assert!(scheduler.has_dependency("clock"));
        assert!(scheduler.dependency_as::<Clock>("clock").unwrap().is_none());

        scheduler
            .set_dependency("clock", Value::object(Clock { offset: 7 }))
            .unwrap();
        let clock = scheduler.dependency_as::<Clock>("clock").unwrap().unwrap();
        assert_eq!(clock.offset, 7);
    }

    #[test]
    fn test_layered_holder_extends_slots() {
        let mut scheduler = RetryingScheduler::new().unwrap();
        scheduler.set_dependency("interval", 30).unwrap();
        scheduler.set_dependency("max_retries", 3).unwrap();
        assert_eq!(scheduler.dependency("max_retries").unwrap(), Value::Int(3));
        assert_eq!(scheduler.dependency("interval").unwrap(), Value::Int(30));
        assert_eq!(scheduler.pocket().len(), 3);
    }

    #[test]
    fn test_unknown_dependency_is_not_found() {
        let scheduler = Scheduler::new().unwrap();
        assert!(matches!(
            scheduler.dependency("missing"),
            Err(PocketError::NotFound { .. })
        ));
    }

    #[test]
    fn test_dependency_as_wrong_type() {
        let mut pocket = Pocket::new();
        pocket.define("clock", "").unwrap();
        pocket.set("clock", "not a clock").unwrap();
        match pocket.dependency_as::<Clock>("clock") {
            Err(PocketError::TypeMismatch { declared, given, .. }) => {
                assert_eq!(declared.to_string(), "Clock");
                assert_eq!(given, "string");
            }
            other => panic!("Expected TypeMismatch, got {:?}", other),
        }
    }
}
