//! Scheduling context for dispatching rule evaluation.

use chrono::NaiveDateTime;

use crate::config::SchedulerConfig;
use crate::models::{Job, Machine};

/// Scheduler state visible to dispatching rules during one pass.
#[derive(Debug, Clone, Copy)]
pub struct SchedulingContext<'a> {
    /// Scheduling clock.
    pub now: NaiveDateTime,
    /// Registered machines, in registration order.
    pub machines: &'a [Machine],
    pub config: &'a SchedulerConfig,
}

impl<'a> SchedulingContext<'a> {
    pub fn new(now: NaiveDateTime, machines: &'a [Machine], config: &'a SchedulerConfig) -> Self {
        Self {
            now,
            machines,
            config,
        }
    }

    /// Machine whose load feeds the job's priority: the required machine
    /// when registered, otherwise the first registered one.
    pub fn machine_for(&self, job: &Job) -> Option<&'a Machine> {
        self.machines
            .iter()
            .find(|m| m.id() == job.required_machine_id())
            .or_else(|| self.machines.first())
    }
}
