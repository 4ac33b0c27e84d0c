//! Linguistic variables.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::FuzzySet;
use crate::error::{Result, ScheduleError};

/// A named scalar dimension partitioned into overlapping fuzzy sets.
///
/// Sets keep their declaration order; names are unique within the variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinguisticVariable {
    name: String,
    min: f64,
    max: f64,
    sets: Vec<FuzzySet>,
}

impl LinguisticVariable {
    /// Creates a variable over the universe `[min, max]`.
    pub fn new(name: impl Into<String>, min: f64, max: f64) -> Result<Self> {
        let name = name.into();
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(ScheduleError::InvalidUniverse { name, min, max });
        }
        Ok(Self {
            name,
            min,
            max,
            sets: Vec::new(),
        })
    }

    /// Adds a fuzzy set.
    pub fn with_set(mut self, set: FuzzySet) -> Result<Self> {
        self.add_set(set)?;
        Ok(self)
    }

    /// Adds a fuzzy set, rejecting a name already in use.
    pub fn add_set(&mut self, set: FuzzySet) -> Result<()> {
        if self.set(&set.name).is_some() {
            return Err(ScheduleError::DuplicateFuzzySet {
                variable: self.name.clone(),
                set: set.name,
            });
        }
        self.sets.push(set);
        Ok(())
    }

    /// Variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Universe bounds `(min, max)`.
    pub fn universe(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Midpoint of the universe.
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Declared sets, in declaration order.
    pub fn sets(&self) -> &[FuzzySet] {
        &self.sets
    }

    /// Looks up a set by name.
    pub fn set(&self, name: &str) -> Option<&FuzzySet> {
        self.sets.iter().find(|s| s.name == name)
    }

    /// Degree of `value` in one named set (`None` if the set is unknown).
    pub fn degree(&self, set: &str, value: f64) -> Option<f64> {
        self.set(set).map(|s| s.degree(value))
    }

    /// Degrees of `value` in every set, zeros included.
    pub fn fuzzify(&self, value: f64) -> HashMap<String, f64> {
        self.sets
            .iter()
            .map(|s| (s.name.clone(), s.degree(value)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urgency() -> LinguisticVariable {
        LinguisticVariable::new("urgency", 0.0, 10.0)
            .and_then(|v| v.with_set(FuzzySet::triangular("low", 0.0, 0.0, 5.0)?))
            .and_then(|v| v.with_set(FuzzySet::triangular("medium", 2.0, 5.0, 8.0)?))
            .and_then(|v| v.with_set(FuzzySet::triangular("high", 5.0, 10.0, 10.0)?))
            .unwrap()
    }

    #[test]
    fn test_fuzzify_low() {
        let result = urgency().fuzzify(2.0);
        assert!(result["low"] > 0.0);
        assert!(result["medium"] >= 0.0);
        assert_eq!(result["high"], 0.0);
    }

    #[test]
    fn test_fuzzify_high() {
        let result = urgency().fuzzify(8.0);
        assert_eq!(result["low"], 0.0);
        assert!(result["medium"] >= 0.0);
        assert!(result["high"] > 0.0);
    }

    #[test]
    fn test_fuzzify_reports_every_set() {
        let result = urgency().fuzzify(-3.0);
        assert_eq!(result.len(), 3);
        assert!(result.values().all(|&d| d == 0.0));
    }

    #[test]
    fn test_single_degree() {
        let v = urgency();
        assert!((v.degree("medium", 3.5).unwrap() - 0.5).abs() < 1e-10);
        assert!(v.degree("extreme", 3.5).is_none());
    }

    #[test]
    fn test_duplicate_set_rejected() {
        let err = urgency()
            .with_set(FuzzySet::triangular("low", 0.0, 1.0, 2.0).unwrap())
            .unwrap_err();
        assert!(matches!(err, ScheduleError::DuplicateFuzzySet { .. }));
    }

    #[test]
    fn test_invalid_universe() {
        assert!(LinguisticVariable::new("x", 5.0, 5.0).is_err());
        assert!(LinguisticVariable::new("x", 10.0, 0.0).is_err());
        assert!(LinguisticVariable::new("x", 0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_universe_and_order() {
        let v = urgency();
        assert_eq!(v.name(), "urgency");
        assert_eq!(v.universe(), (0.0, 10.0));
        assert_eq!(v.midpoint(), 5.0);
        let names: Vec<&str> = v.sets().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["low", "medium", "high"]);
    }
}
