//! Fuzzy-priority manufacturing scheduler.
//!
//! Ranks jobs with a Mamdani fuzzy inference engine over urgency,
//! processing time and machine load, places them greedily on machines, and
//! compares the result against FCFS and EDD baselines.
//!
//! # Modules
//!
//! - **`fuzzy`**: Membership functions, linguistic variables, rules, the
//!   inference engine, and the scheduling knowledge base
//! - **`models`**: Domain types: `Job`, `JobStatus`, `Machine`
//! - **`dispatching`**: `SchedulingMode` and the FUZZY / FCFS / EDD rules
//! - **`scheduler`**: `FuzzyScheduler`, `ScheduleSummary`, `PerformanceMetrics`
//! - **`validation`**: Input integrity checks (duplicate IDs, machine refs, timing)
//! - **`workload`**: Reference and random sample workloads
//!
//! # Quick start
//!
//! ```
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use fuzzy_schedule::fuzzy::knowledge;
//! use fuzzy_schedule::{workload, FuzzyScheduler, SchedulingMode};
//!
//! # fn main() -> fuzzy_schedule::Result<()> {
//! let now = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap().and_hms_opt(8, 0, 0).unwrap();
//! let (jobs, machines) = workload::reference_workload(now)?;
//! let engine = Arc::new(knowledge::scheduling_engine()?);
//!
//! let mut scheduler = FuzzyScheduler::from_parts(engine, jobs, machines, now)?;
//! scheduler.schedule(SchedulingMode::FuzzyPriority);
//!
//! let summary = scheduler.summary();
//! assert_eq!(summary.scheduled_jobs, 8);
//! # Ok(())
//! # }
//! ```
//!
//! # Logging
//!
//! Scheduling passes emit `tracing` events (`info` per pass, `debug` per
//! job). Install a subscriber to see them.
//!
//! # References
//!
//! - Mamdani & Assilian (1975), "An experiment in linguistic synthesis with a fuzzy logic controller"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod config;
pub mod dispatching;
pub mod error;
pub mod fuzzy;
pub mod models;
pub mod scheduler;
pub mod validation;
pub mod workload;

pub use config::SchedulerConfig;
pub use dispatching::SchedulingMode;
pub use error::{Result, ScheduleError};
pub use scheduler::{FuzzyScheduler, ModeComparison, PerformanceMetrics, ScheduleSummary};
