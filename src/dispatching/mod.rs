//! Dispatching rules: how pending jobs are scored and ordered.
//!
//! Each [`SchedulingMode`] maps to one [`DispatchingRule`]. A rule computes
//! the priority score reported on each job and the ordering used to feed
//! jobs into slot search.
//!
//! | Mode | Order | Reported score |
//! |------|-------|----------------|
//! | `fuzzy_priority` | score, descending | fuzzy inference, 0..100 |
//! | `fcfs` | arrival time, ascending | neutral constant |
//! | `edd` | due date, ascending | urgency × scale |
//!
//! # Usage
//!
//! ```
//! use fuzzy_schedule::dispatching::SchedulingMode;
//!
//! let mode: SchedulingMode = "edd".parse().unwrap();
//! assert_eq!(mode, SchedulingMode::Edd);
//! assert!("spt".parse::<SchedulingMode>().is_err());
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Jackson (1955), EDD optimality for maximum lateness

mod context;
pub mod rules;

pub use context::SchedulingContext;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::str::FromStr;
use std::sync::Arc;

use crate::error::ScheduleError;
use crate::fuzzy::InferenceEngine;
use crate::models::Job;

/// A dispatching rule.
///
/// Scores are computed once per scheduling pass, before any job of the pass
/// is placed; ordering then compares the scored jobs.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "FCFS", "EDD").
    fn name(&self) -> &'static str;

    /// Priority score recorded on the job.
    fn priority(&self, job: &Job, context: &SchedulingContext<'_>) -> f64;

    /// Dispatch order: `Less` means `a` is placed before `b`.
    ///
    /// Jobs carry the score from [`priority`](Self::priority) when compared.
    fn compare(&self, a: &Job, b: &Job) -> Ordering;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Scheduling strategy selectable by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulingMode {
    #[default]
    FuzzyPriority,
    Fcfs,
    Edd,
}

impl SchedulingMode {
    /// All modes, fuzzy first.
    pub const ALL: [SchedulingMode; 3] = [
        SchedulingMode::FuzzyPriority,
        SchedulingMode::Fcfs,
        SchedulingMode::Edd,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SchedulingMode::FuzzyPriority => "fuzzy_priority",
            SchedulingMode::Fcfs => "fcfs",
            SchedulingMode::Edd => "edd",
        }
    }

    /// Builds the rule for this mode. Only the fuzzy rule uses `engine`.
    pub fn rule(self, engine: &Arc<InferenceEngine>) -> Box<dyn DispatchingRule> {
        match self {
            SchedulingMode::FuzzyPriority => {
                Box::new(rules::FuzzyPriority::new(Arc::clone(engine)))
            }
            SchedulingMode::Fcfs => Box::new(rules::Fcfs),
            SchedulingMode::Edd => Box::new(rules::Edd),
        }
    }
}

impl fmt::Display for SchedulingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchedulingMode {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fuzzy_priority" => Ok(SchedulingMode::FuzzyPriority),
            "fcfs" => Ok(SchedulingMode::Fcfs),
            "edd" => Ok(SchedulingMode::Edd),
            other => Err(ScheduleError::UnknownMode(other.to_string())),
        }
    }
}
