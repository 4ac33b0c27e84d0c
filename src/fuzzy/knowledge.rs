//! Scheduling knowledge base: the tuned variables and rule table used to
//! rank manufacturing jobs.
//!
//! | Variable | Universe | Sets |
//! |----------|----------|------|
//! | `processing_time` (h) | 0..100 | short, medium, long |
//! | `urgency` | 0..10 | low, medium, high |
//! | `machine_load` (%) | 0..100 | light, medium, heavy |
//! | `priority` (output) | 0..100 | very_low, low, medium, high, very_high |
//!
//! The urgency sets are tuned against the six-bucket urgency scale of
//! [`Job::urgency`](crate::models::Job::urgency); changing one means
//! re-tuning the other.

use super::{FuzzyRule, FuzzySet, InferenceEngine, LinguisticVariable};
use crate::error::Result;

/// Input: job processing time in hours.
pub const PROCESSING_TIME: &str = "processing_time";
/// Input: bucketed urgency, 1 (relaxed) to 10 (overdue).
pub const URGENCY: &str = "urgency";
/// Input: committed load of the target machine, percent.
pub const MACHINE_LOAD: &str = "machine_load";
/// Output: job priority score.
pub const PRIORITY: &str = "priority";

fn processing_time() -> Result<LinguisticVariable> {
    LinguisticVariable::new(PROCESSING_TIME, 0.0, 100.0)?
        .with_set(FuzzySet::triangular("short", 0.0, 0.0, 40.0)?)?
        .with_set(FuzzySet::triangular("medium", 20.0, 50.0, 80.0)?)?
        .with_set(FuzzySet::triangular("long", 60.0, 100.0, 100.0)?)
}

fn urgency() -> Result<LinguisticVariable> {
    LinguisticVariable::new(URGENCY, 0.0, 10.0)?
        .with_set(FuzzySet::triangular("low", 0.0, 0.0, 5.0)?)?
        .with_set(FuzzySet::triangular("medium", 2.0, 5.0, 8.0)?)?
        .with_set(FuzzySet::triangular("high", 5.0, 10.0, 10.0)?)
}

fn machine_load() -> Result<LinguisticVariable> {
    LinguisticVariable::new(MACHINE_LOAD, 0.0, 100.0)?
        .with_set(FuzzySet::triangular("light", 0.0, 0.0, 50.0)?)?
        .with_set(FuzzySet::triangular("medium", 25.0, 50.0, 75.0)?)?
        .with_set(FuzzySet::triangular("heavy", 50.0, 100.0, 100.0)?)
}

fn priority() -> Result<LinguisticVariable> {
    LinguisticVariable::new(PRIORITY, 0.0, 100.0)?
        .with_set(FuzzySet::triangular("very_low", 0.0, 0.0, 25.0)?)?
        .with_set(FuzzySet::triangular("low", 0.0, 25.0, 50.0)?)?
        .with_set(FuzzySet::triangular("medium", 25.0, 50.0, 75.0)?)?
        .with_set(FuzzySet::triangular("high", 50.0, 75.0, 100.0)?)?
        .with_set(FuzzySet::triangular("very_high", 75.0, 100.0, 100.0)?)
}

/// The 13-rule table.
pub fn scheduling_rules() -> Vec<FuzzyRule> {
    vec![
        // High urgency
        FuzzyRule::when(URGENCY, "high")
            .and(PROCESSING_TIME, "short")
            .and(MACHINE_LOAD, "light")
            .then(PRIORITY, "very_high"),
        FuzzyRule::when(URGENCY, "high")
            .and(PROCESSING_TIME, "short")
            .and(MACHINE_LOAD, "medium")
            .then(PRIORITY, "very_high"),
        FuzzyRule::when(URGENCY, "high")
            .and(PROCESSING_TIME, "medium")
            .and(MACHINE_LOAD, "light")
            .then(PRIORITY, "high"),
        FuzzyRule::when(URGENCY, "high")
            .and(PROCESSING_TIME, "long")
            .and(MACHINE_LOAD, "light")
            .then(PRIORITY, "high"),
        FuzzyRule::when(URGENCY, "high")
            .and(MACHINE_LOAD, "heavy")
            .then(PRIORITY, "medium"),
        // Medium urgency
        FuzzyRule::when(URGENCY, "medium")
            .and(PROCESSING_TIME, "short")
            .and(MACHINE_LOAD, "light")
            .then(PRIORITY, "high"),
        FuzzyRule::when(URGENCY, "medium")
            .and(PROCESSING_TIME, "medium")
            .and(MACHINE_LOAD, "light")
            .then(PRIORITY, "medium"),
        FuzzyRule::when(URGENCY, "medium")
            .and(PROCESSING_TIME, "long")
            .and(MACHINE_LOAD, "medium")
            .then(PRIORITY, "low"),
        FuzzyRule::when(URGENCY, "medium")
            .and(MACHINE_LOAD, "heavy")
            .then(PRIORITY, "low"),
        // Low urgency
        FuzzyRule::when(URGENCY, "low")
            .and(PROCESSING_TIME, "short")
            .and(MACHINE_LOAD, "light")
            .then(PRIORITY, "medium"),
        FuzzyRule::when(URGENCY, "low")
            .and(PROCESSING_TIME, "medium")
            .then(PRIORITY, "low"),
        FuzzyRule::when(URGENCY, "low")
            .and(PROCESSING_TIME, "long")
            .then(PRIORITY, "very_low"),
        FuzzyRule::when(URGENCY, "low")
            .and(MACHINE_LOAD, "heavy")
            .then(PRIORITY, "very_low"),
    ]
}

/// Builds the job-priority inference engine.
pub fn scheduling_engine() -> Result<InferenceEngine> {
    InferenceEngine::builder()
        .input(processing_time()?)?
        .input(urgency()?)?
        .input(machine_load()?)?
        .output(priority()?)?
        .rules(scheduling_rules())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn infer(pt: f64, urgency: f64, load: f64) -> f64 {
        let engine = scheduling_engine().unwrap();
        engine.infer(&HashMap::from([
            (PROCESSING_TIME.to_string(), pt),
            (URGENCY.to_string(), urgency),
            (MACHINE_LOAD.to_string(), load),
        ]))
    }

    #[test]
    fn test_engine_layout() {
        let engine = scheduling_engine().unwrap();
        assert!(engine.input(PROCESSING_TIME).is_some());
        assert!(engine.input(URGENCY).is_some());
        assert!(engine.input(MACHINE_LOAD).is_some());
        assert_eq!(engine.output().name(), PRIORITY);
        assert_eq!(engine.output().sets().len(), 5);
        assert_eq!(engine.rules().len(), 13);
    }

    #[test]
    fn test_urgent_short_light_is_high_priority() {
        // very_high fires at 0.6 → centroid ≈ 91.
        let p = infer(10.0, 9.0, 20.0);
        assert!(p > 70.0, "priority {p}");
    }

    #[test]
    fn test_relaxed_long_heavy_is_low_priority() {
        // very_low fires at 0.6 → centroid ≈ 9.
        let p = infer(80.0, 1.0, 80.0);
        assert!(p < 40.0, "priority {p}");
    }

    #[test]
    fn test_relaxed_medium_job_lands_low() {
        // low(0.33) and medium(0.25) fire together.
        let p = infer(30.0, 1.0, 0.0);
        assert!(p > 25.0 && p < 50.0, "priority {p}");
    }

    #[test]
    fn test_no_firing_rule_returns_midpoint() {
        // urgency 5 is exactly medium; pt 50 is exactly medium; load 50 only
        // medium. No rule covers (medium, medium, medium).
        assert_eq!(infer(50.0, 5.0, 50.0), 50.0);
    }

    #[test]
    fn test_output_bounds_over_grid() {
        let engine = scheduling_engine().unwrap();
        for pt in [0.5, 10.0, 35.0, 65.0, 100.0, 150.0] {
            for urgency in [1.0, 3.0, 5.0, 7.0, 9.0, 10.0] {
                for load in [0.0, 30.0, 60.0, 100.0] {
                    let p = engine.infer(&HashMap::from([
                        (PROCESSING_TIME.to_string(), pt),
                        (URGENCY.to_string(), urgency),
                        (MACHINE_LOAD.to_string(), load),
                    ]));
                    assert!((0.0..=100.0).contains(&p));
                }
            }
        }
    }
}
