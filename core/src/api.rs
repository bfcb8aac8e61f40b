//! **PUBLIC API SURFACE** - Everything an owning type needs in one import

pub use crate::dependencies::{DefineEntry, DependencyHolder, Pocket, Slot, TypeConstraint};
pub use crate::errors::{PocketError, PocketResult};
pub use crate::types::{Callable, Instance, Kind, Value};
pub use crate::validation::ValidationContext;
