//! Weekly project-block allocation.
//!
//! Assigns recurring weekly work blocks for a set of projects to fixed
//! 30-minute time slots across available days, honoring immovable
//! calendar commitments, and reports how well each project's target
//! was satisfied. The decision problem is encoded as a mixed-integer
//! linear program and handed to an external solver; infeasibility is a
//! first-class result, not an error.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `TimeGrid`, `Project`,
//!   `FixedConstraint`, `Allocation`
//! - **`validation`**: Pre-encode input integrity checks
//! - **`ilp`**: Problem encoding, objective, solver adapter, and
//!   solution extraction over `good_lp`
//! - **`scheduler`**: Request orchestration (`WeekScheduler`),
//!   timetable materialization, completion statistics
//! - **`error`**: The `PlanError` taxonomy
//!
//! # Example
//!
//! ```no_run
//! use blockplan::models::{FixedConstraint, Project};
//! use blockplan::scheduler::{PlanRequest, WeekScheduler};
//!
//! let days = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]
//!     .map(String::from)
//!     .to_vec();
//! let request = PlanRequest::new(days, "08:00", "18:00")
//!     .with_project(Project::new("Gym", 1.0, 3))
//!     .with_project(Project::new("Write", 2.0, 3))
//!     .with_fixed_constraint(FixedConstraint::new(
//!         "Lunch break", "Monday", "13:00", "13:30",
//!     ));
//!
//! let plan = WeekScheduler::new().plan(&request)?;
//! if let Some(outcome) = &plan.outcome {
//!     println!("{}", outcome.timetable);
//! } else {
//!     println!("no feasible schedule: {:?}", plan.status);
//! }
//! # Ok::<(), blockplan::error::PlanError>(())
//! ```

pub mod error;
pub mod ilp;
pub mod models;
pub mod scheduler;
pub mod validation;
