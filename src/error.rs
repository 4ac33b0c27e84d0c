//! Error type shared by the inference engine and the scheduler.
//!
//! Only construction and configuration problems are errors. Scheduling
//! itself has no failure states: a job that cannot be placed simply stays
//! pending, and a rule that does not match simply does not fire.

use crate::models::JobStatus;
use crate::validation::ValidationError;

/// Errors reported by `fuzzy-schedule`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScheduleError {
    #[error("job '{job_id}': processing time must be positive, got {processing_time}")]
    InvalidProcessingTime { job_id: String, processing_time: f64 },

    #[error("job '{job_id}': due date cannot be before arrival time")]
    DueBeforeArrival { job_id: String },

    #[error("unknown scheduling mode: {0}")]
    UnknownMode(String),

    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("unknown job: {0}")]
    UnknownJob(String),

    #[error("job '{job_id}' cannot move from {from} to {to}")]
    InvalidTransition {
        job_id: String,
        from: JobStatus,
        to: JobStatus,
    },

    #[error("input rejected with {} validation error(s)", .0.len())]
    Validation(Vec<ValidationError>),

    #[error("fuzzy set '{name}': breakpoints must be ordered, got {points:?}")]
    InvalidMembership { name: String, points: Vec<f64> },

    #[error("variable '{name}': universe [{min}, {max}] is empty")]
    InvalidUniverse { name: String, min: f64, max: f64 },

    #[error("variable '{variable}' already declares fuzzy set '{set}'")]
    DuplicateFuzzySet { variable: String, set: String },

    #[error("variable '{0}' is declared twice")]
    DuplicateVariable(String),

    #[error("inference engine has no output variable")]
    MissingOutputVariable,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ScheduleError>;
