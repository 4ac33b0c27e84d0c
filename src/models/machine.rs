//! Machine model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::job::hours_to_duration;
use super::Job;

/// Working hours in the nominal planning horizon (one 40 h week).
pub const NOMINAL_HORIZON_HOURS: f64 = 40.0;

/// Hours of committed work that count as a fully loaded machine.
pub const NOMINAL_CAPACITY_HOURS: f64 = 100.0;

/// A machine that processes one job at a time.
///
/// Tracks the ids of the jobs currently placed on it and their cumulative
/// processing time. `capacity` is informational and never limits placement.
///
/// The job list and load are serialized for reporting but never read back:
/// a decoded machine is idle until jobs are placed on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) capacity: f64,
    #[serde(skip_deserializing)]
    pub(crate) job_ids: Vec<String>,
    /// Hours.
    #[serde(skip_deserializing)]
    pub(crate) total_processing_time: f64,
}

impl Machine {
    /// Creates an idle machine with capacity 1.0.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            capacity: 1.0,
            job_ids: Vec::new(),
            total_processing_time: 0.0,
        }
    }

    /// Sets the capacity factor.
    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Ids of the jobs placed on this machine, in placement order.
    pub fn job_ids(&self) -> &[String] {
        &self.job_ids
    }

    /// Committed processing time in hours.
    pub fn total_processing_time(&self) -> f64 {
        self.total_processing_time
    }

    /// Fraction of the nominal horizon that is committed, in `[0, 1]`.
    pub fn utilization(&self) -> f64 {
        (self.total_processing_time / NOMINAL_HORIZON_HOURS).clamp(0.0, 1.0)
    }

    /// Committed work as a percentage of nominal capacity, in `[0, 100]`.
    pub fn current_load(&self) -> f64 {
        (self.total_processing_time / NOMINAL_CAPACITY_HOURS * 100.0).clamp(0.0, 100.0)
    }

    /// Earliest start for a job of `processing_time` hours, not before
    /// `earliest_start`.
    ///
    /// `jobs` may be any superset of the machine's jobs; only those listed in
    /// [`job_ids`](Self::job_ids) and having a start time are considered.
    /// They are visited in start order while a cursor moves from
    /// `earliest_start` past each completion; the first gap in front of a job
    /// that fits the new one wins. Without such a gap the job queues after
    /// the last completion.
    ///
    /// Queueing has no bound, so the only `None` is a slot whose completion
    /// would fall outside the calendar.
    pub fn available_slot<'a>(
        &self,
        jobs: impl IntoIterator<Item = &'a Job>,
        processing_time: f64,
        earliest_start: NaiveDateTime,
    ) -> Option<NaiveDateTime> {
        let mut placed: Vec<&Job> = jobs
            .into_iter()
            .filter(|j| j.start_time.is_some() && self.job_ids.contains(&j.id))
            .collect();
        placed.sort_by_key(|j| j.start_time);

        let needed = hours_to_duration(processing_time);
        let mut cursor = earliest_start;
        for job in placed {
            if let (Some(start), Some(end)) = (job.start_time, cursor.checked_add_signed(needed)) {
                if start >= end {
                    return Some(cursor);
                }
            }
            if let Some(completion) = job.completion_time {
                cursor = cursor.max(completion);
            }
        }
        cursor.checked_add_signed(needed).map(|_| cursor)
    }

    /// Records a job placed on this machine.
    pub(crate) fn attach(&mut self, job: &Job) {
        self.job_ids.push(job.id.clone());
        self.total_processing_time += job.processing_time;
    }

    /// Removes a job; returns `false` if it was not on this machine.
    pub(crate) fn detach(&mut self, job: &Job) -> bool {
        match self.job_ids.iter().position(|id| *id == job.id) {
            Some(pos) => {
                self.job_ids.remove(pos);
                self.total_processing_time =
                    (self.total_processing_time - job.processing_time).max(0.0);
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.job_ids.clear();
        self.total_processing_time = 0.0;
    }
}

impl fmt::Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Machine({}: {}, Jobs={}, Load={:.1}%, Utilization={:.2})",
            self.id,
            self.name,
            self.job_ids.len(),
            self.current_load(),
            self.utilization()
        )
    }
}
