//! # DEPENDENCY POCKETS
//!
//! Slot registry, declared type constraints and the owner-side accessor trait.

pub mod holder;
pub mod pocket;
pub mod types;


pub use holder::DependencyHolder;
pub use pocket::Pocket;
pub use types::{DefineEntry, Slot, TypeConstraint};
