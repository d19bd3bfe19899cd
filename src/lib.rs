//! Weight-maximizing assignment of entities to ordered slots.
//!
//! Given `N` entities ("people"), each carrying one weight per slot, and `M`
//! ordered slots, this crate finds the assignment of distinct entities to
//! slots with the largest total weight. Optionally, entities carry attribute
//! tags and the model carries constraint sets that must each be covered by a
//! distinct assigned entity.
//!
//! - **Model**: [`model::ScheduleModel`] accumulates the weight grid,
//!   attribute sets and constraint sets.
//! - **Branch-and-Bound**: [`bnb::BnbRunner`] runs a depth-bounded,
//!   best-first branch-and-bound over partial assignments, using a greedy
//!   per-slot fill as the upper bound.
//! - **Session**: [`Scheduler`] is the handle a binding layer drives:
//!   create, add entities and constraints, compute, destroy.
//!
//! # Example
//!
//! ```
//! use u_assign::Scheduler;
//!
//! let mut scheduler = Scheduler::create(2).unwrap();
//! scheduler.add_entity(&[5.0, 1.0]).unwrap();
//! scheduler.add_entity(&[1.0, 5.0]).unwrap();
//! scheduler.add_entity(&[3.0, 3.0]).unwrap();
//!
//! assert_eq!(scheduler.compute_solution().unwrap(), vec![0, 1]);
//! ```
//!
//! # Architecture
//!
//! The search is single-threaded and owns all of its state, so independent
//! solves never interfere. The `parallel` feature adds rayon-backed batch
//! solving; the `serde` feature derives serialization for model and result
//! types.

pub mod bnb;
mod error;
pub mod model;
mod session;

pub use error::AssignError;
pub use session::Scheduler;
