//! Assignment problem model.
//!
//! A [`ScheduleModel`] is built once per solve session and read-only during
//! search. Entities and constraints are appended incrementally and never
//! removed; an entity's id is its insertion index.
//!
//! # Key Components
//!
//! - [`ScheduleModel`]: weight grid, per-entity attributes, constraint sets
//! - [`TagSet`]: sorted integer tag set used for attributes and constraints

mod random;
mod schedule;
mod tags;

pub use schedule::{EntityId, ScheduleModel, SlotId};
pub use tags::TagSet;
