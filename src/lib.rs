//! Feasibility checking of pallet loading plans.
//!
//! A plan places pallets of catalogued types in a container. [`checker::validate`]
//! accepts it or reports the first rule it breaks.

pub mod checker;
pub mod container;
pub mod dimensions;
pub mod geometry;
pub mod import;
pub mod lifo;
pub mod render;
pub mod stacking;
pub mod types;
pub mod violation;

pub use checker::{Report, validate};
pub use container::ContainerBounds;
pub use violation::{Violation, ViolationKind};
