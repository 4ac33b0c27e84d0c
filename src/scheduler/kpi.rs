//! Schedule quality metrics (KPIs).
//!
//! Computes delivery performance from placed jobs and compares scheduling
//! modes on the same workload.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Avg Completion | Mean(completion - arrival) |
//! | Avg Waiting | Mean(start - arrival) |
//! | On-Time Rate | Percent with completion ≤ due date |
//! | Total / Max Tardiness | Sum / max of max(0, completion - due) |
//! | Makespan | Latest completion - earliest start |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use serde::Serialize;

use super::ScheduleSummary;
use crate::dispatching::SchedulingMode;
use crate::models::{hours_between, Job};

/// Schedule performance indicators.
///
/// All time values are in hours. Only jobs with both a start and a
/// completion time are measured; every field except `total_jobs` is zero
/// when there are none.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    /// Jobs passed in, placed or not.
    pub total_jobs: usize,
    /// Jobs with a start and completion time.
    pub scheduled_jobs: usize,
    /// Mean(completion - arrival).
    pub average_completion_hours: f64,
    /// Mean(start - arrival).
    pub average_waiting_hours: f64,
    /// Percentage of placed jobs completing by their due date (0..100).
    pub on_time_rate: f64,
    /// Sum of tardiness.
    pub total_tardiness_hours: f64,
    /// Largest single tardiness.
    pub max_tardiness_hours: f64,
    /// Latest completion - earliest start.
    pub makespan_hours: f64,
}

impl PerformanceMetrics {
    /// Computes metrics over `jobs`.
    pub fn calculate<'a>(jobs: impl IntoIterator<Item = &'a Job>) -> Self {
        let mut metrics = PerformanceMetrics::default();
        let mut total_completion = 0.0;
        let mut total_waiting = 0.0;
        let mut on_time_count: usize = 0;
        let mut span: Option<(chrono::NaiveDateTime, chrono::NaiveDateTime)> = None;

        for job in jobs {
            metrics.total_jobs += 1;
            let (Some(start), Some(completion)) = (job.start_time(), job.completion_time()) else {
                continue;
            };
            metrics.scheduled_jobs += 1;

            total_completion += hours_between(job.arrival_time(), completion);
            total_waiting += hours_between(job.arrival_time(), start);

            if completion <= job.due_date() {
                on_time_count += 1;
            } else {
                let tardiness = hours_between(job.due_date(), completion);
                metrics.total_tardiness_hours += tardiness;
                metrics.max_tardiness_hours = metrics.max_tardiness_hours.max(tardiness);
            }

            span = Some(match span {
                Some((first, last)) => (first.min(start), last.max(completion)),
                None => (start, completion),
            });
        }

        if metrics.scheduled_jobs > 0 {
            let n = metrics.scheduled_jobs as f64;
            metrics.average_completion_hours = total_completion / n;
            metrics.average_waiting_hours = total_waiting / n;
            metrics.on_time_rate = on_time_count as f64 / n * 100.0;
        }
        if let Some((first, last)) = span {
            metrics.makespan_hours = hours_between(first, last);
        }
        metrics
    }
}

/// One scheduling mode's outcome on a shared workload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeOutcome {
    pub mode: SchedulingMode,
    pub summary: ScheduleSummary,
    pub metrics: PerformanceMetrics,
}

/// Side-by-side results of every scheduling mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeComparison {
    /// One entry per mode, in [`SchedulingMode::ALL`] order.
    pub entries: Vec<ModeOutcome>,
}

impl ModeComparison {
    /// Outcome of a given mode.
    pub fn get(&self, mode: SchedulingMode) -> Option<&ModeOutcome> {
        self.entries.iter().find(|e| e.mode == mode)
    }

    /// Mode with the highest on-time rate; the earlier entry wins ties.
    pub fn best_by_on_time_rate(&self) -> Option<SchedulingMode> {
        self.entries
            .iter()
            .reduce(|best, e| {
                if e.metrics.on_time_rate > best.metrics.on_time_rate {
                    e
                } else {
                    best
                }
            })
            .map(|e| e.mode)
    }

    /// Mode with the shortest makespan; the earlier entry wins ties.
    pub fn best_by_makespan(&self) -> Option<SchedulingMode> {
        self.entries
            .iter()
            .reduce(|best, e| {
                if e.metrics.makespan_hours < best.metrics.makespan_hours {
                    e
                } else {
                    best
                }
            })
            .map(|e| e.mode)
    }
}
