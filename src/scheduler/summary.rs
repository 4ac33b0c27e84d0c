//! Schedule summary.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{hours_between, Job, JobStatus, Machine};

/// Snapshot of a scheduler's state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScheduleSummary {
    pub total_jobs: usize,
    /// Jobs holding a slot: scheduled, in progress or completed.
    pub scheduled_jobs: usize,
    pub pending_jobs: usize,
    pub total_machines: usize,
    /// Latest completion among placed jobs minus `now`, in hours (0 if none).
    pub makespan_hours: f64,
    /// Mean priority score over all jobs (0 if none).
    pub average_priority: f64,
    /// Machine id → utilization in `[0, 1]`.
    pub machine_utilization: BTreeMap<String, f64>,
}

impl ScheduleSummary {
    pub(crate) fn build(jobs: &[Job], machines: &[Machine], now: NaiveDateTime) -> Self {
        let scheduled_jobs = jobs.iter().filter(|j| j.status().is_committed()).count();
        let pending_jobs = jobs
            .iter()
            .filter(|j| j.status() == JobStatus::Pending)
            .count();

        let makespan_hours = jobs
            .iter()
            .filter(|j| j.status().is_committed())
            .filter_map(|j| j.completion_time())
            .max()
            .map(|latest| hours_between(now, latest))
            .unwrap_or(0.0);

        let average_priority = if jobs.is_empty() {
            0.0
        } else {
            jobs.iter().map(|j| j.priority_score()).sum::<f64>() / jobs.len() as f64
        };

        let machine_utilization = machines
            .iter()
            .map(|m| (m.id().to_string(), m.utilization()))
            .collect();

        Self {
            total_jobs: jobs.len(),
            scheduled_jobs,
            pending_jobs,
            total_machines: machines.len(),
            makespan_hours,
            average_priority,
            machine_utilization,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_empty_summary() {
        let s = ScheduleSummary::build(&[], &[], t0());
        assert_eq!(s, ScheduleSummary::default());
    }

    #[test]
    fn test_summary_counts() {
        let due = t0() + Duration::hours(48);
        let mut a = Job::new("A", "a", 4.0, due, t0(), "M1").unwrap();
        let mut b = Job::new("B", "b", 6.0, due, t0(), "M1").unwrap();
        let c = Job::new("C", "c", 2.0, due, t0(), "M1").unwrap();
        let mut m1 = Machine::new("M1", "CNC");
        let m2 = Machine::new("M2", "CNC");

        a.assign("M1", t0());
        a.priority_score = 60.0;
        m1.attach(&a);
        b.assign("M1", t0() + Duration::hours(4));
        b.status = JobStatus::Completed;
        b.priority_score = 30.0;
        m1.attach(&b);

        let s = ScheduleSummary::build(&[a, b, c], &[m1, m2], t0());
        assert_eq!(s.total_jobs, 3);
        assert_eq!(s.scheduled_jobs, 2);
        assert_eq!(s.pending_jobs, 1);
        assert_eq!(s.total_machines, 2);
        assert!((s.makespan_hours - 10.0).abs() < 1e-10);
        assert!((s.average_priority - 30.0).abs() < 1e-10);
        assert!((s.machine_utilization["M1"] - 0.25).abs() < 1e-10);
        assert_eq!(s.machine_utilization["M2"], 0.0);
    }
}
