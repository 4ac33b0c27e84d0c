//! Greedy scheduler, summary and KPI evaluation.
//!
//! # Algorithm
//!
//! `FuzzyScheduler` orders pending jobs with the selected dispatching rule
//! and places each one at the earliest slot on its machine. It is not
//! optimal, but gives a fast schedule and comparable baselines.
//!
//! # KPI
//!
//! `PerformanceMetrics` computes completion and waiting time, on-time rate,
//! tardiness and makespan. `ModeComparison` holds one run per mode.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"

mod fuzzy_scheduler;
mod kpi;
mod summary;

pub use fuzzy_scheduler::FuzzyScheduler;
pub use kpi::{ModeComparison, ModeOutcome, PerformanceMetrics};
pub use summary::ScheduleSummary;
