//! Scheduling domain models.
//!
//! | Type | Meaning |
//! |------|---------|
//! | [`Job`] | Manufacturing order with duration, arrival and due date |
//! | [`JobStatus`] | pending → scheduled → in_progress → completed |
//! | [`Machine`] | Single-job processor with committed load |

mod job;
pub mod machine;

pub use job::{hours_between, hours_to_duration, Job, JobStatus};
pub use machine::{Machine, NOMINAL_CAPACITY_HOURS, NOMINAL_HORIZON_HOURS};
