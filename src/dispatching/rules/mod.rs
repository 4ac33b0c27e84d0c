//! Built-in dispatching rules.
//!
//! - **Fuzzy**: [`FuzzyPriority`] scores urgency, duration and machine load
//!   through the inference engine.
//! - **Arrival**: [`Fcfs`].
//! - **Due-date**: [`Edd`].
//!
//! All orderings are used with a stable sort, so ties keep registration
//! order.
//!
//! # References
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use chrono::NaiveDateTime;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use super::{DispatchingRule, SchedulingContext};
use crate::fuzzy::knowledge::{MACHINE_LOAD, PROCESSING_TIME, URGENCY};
use crate::fuzzy::InferenceEngine;
use crate::models::{Job, Machine};

/// Fuzzy priority.
///
/// Feeds `urgency`, `processing_time` and the target machine's
/// `machine_load` into the inference engine and schedules the highest
/// score first. The target machine is the job's required machine, or the
/// first registered one; with no machine at all the configured fallback
/// priority is used.
#[derive(Debug, Clone)]
pub struct FuzzyPriority {
    engine: Arc<InferenceEngine>,
}

impl FuzzyPriority {
    pub fn new(engine: Arc<InferenceEngine>) -> Self {
        Self { engine }
    }

    /// Priority of `job` on `machine` at `now`, in the output universe.
    pub fn score(&self, job: &Job, machine: &Machine, now: NaiveDateTime) -> f64 {
        let inputs = HashMap::from([
            (URGENCY.to_string(), job.urgency(now)),
            (PROCESSING_TIME.to_string(), job.processing_time()),
            (MACHINE_LOAD.to_string(), machine.current_load()),
        ]);
        self.engine.infer(&inputs)
    }
}

impl DispatchingRule for FuzzyPriority {
    fn name(&self) -> &'static str {
        "FUZZY"
    }

    fn priority(&self, job: &Job, context: &SchedulingContext<'_>) -> f64 {
        match context.machine_for(job) {
            Some(machine) => self.score(job, machine, context.now),
            None => context.config.fallback_priority,
        }
    }

    fn compare(&self, a: &Job, b: &Job) -> Ordering {
        b.priority_score().total_cmp(&a.priority_score())
    }

    fn description(&self) -> &'static str {
        "Fuzzy Inference Priority"
    }
}

/// First Come First Served.
///
/// Earliest arrival first; every job reports the neutral priority.
#[derive(Debug, Clone, Copy)]
pub struct Fcfs;

impl DispatchingRule for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn priority(&self, _job: &Job, context: &SchedulingContext<'_>) -> f64 {
        context.config.neutral_priority
    }

    fn compare(&self, a: &Job, b: &Job) -> Ordering {
        a.arrival_time().cmp(&b.arrival_time())
    }

    fn description(&self) -> &'static str {
        "First Come First Served"
    }
}

/// Earliest Due Date.
///
/// Earliest due date first; reports `urgency × edd_priority_scale`.
///
/// # Reference
/// Jackson (1955), optimal for minimizing maximum lateness on single machine.
#[derive(Debug, Clone, Copy)]
pub struct Edd;

impl DispatchingRule for Edd {
    fn name(&self) -> &'static str {
        "EDD"
    }

    fn priority(&self, job: &Job, context: &SchedulingContext<'_>) -> f64 {
        job.urgency(context.now) * context.config.edd_priority_scale
    }

    fn compare(&self, a: &Job, b: &Job) -> Ordering {
        a.due_date().cmp(&b.due_date())
    }

    fn description(&self) -> &'static str {
        "Earliest Due Date"
    }
}
