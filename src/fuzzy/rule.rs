//! Fuzzy IF-THEN rules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fuzzified inputs: variable name → (set name → degree).
pub type FuzzifiedInputs = HashMap<String, HashMap<String, f64>>;

/// A (variable, set) reference, e.g. `urgency is high`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    pub variable: String,
    pub set: String,
}

impl Term {
    pub fn new(variable: impl Into<String>, set: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            set: set.into(),
        }
    }
}

/// `IF a1 AND a2 AND ... THEN consequent`.
///
/// Antecedents combine with `min` (Mamdani AND). A rule is stateless and
/// independent of every other rule in the base.
///
/// # Example
/// ```
/// use fuzzy_schedule::fuzzy::FuzzyRule;
///
/// let rule = FuzzyRule::when("urgency", "high")
///     .and("processing_time", "short")
///     .then("priority", "very_high");
/// assert_eq!(rule.antecedents().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyRule {
    antecedents: Vec<Term>,
    consequent: Term,
}

/// A rule under construction: antecedents collected, consequent pending.
#[derive(Debug, Clone, Default)]
pub struct RuleBuilder {
    antecedents: Vec<Term>,
}

impl RuleBuilder {
    /// Adds another conjunctive antecedent.
    pub fn and(mut self, variable: impl Into<String>, set: impl Into<String>) -> Self {
        let term = Term::new(variable, set);
        // A variable appears at most once; the last mention wins.
        self.antecedents.retain(|t| t.variable != term.variable);
        self.antecedents.push(term);
        self
    }

    /// Closes the rule with its consequent.
    pub fn then(self, variable: impl Into<String>, set: impl Into<String>) -> FuzzyRule {
        FuzzyRule {
            antecedents: self.antecedents,
            consequent: Term::new(variable, set),
        }
    }
}

impl FuzzyRule {
    /// Starts a rule with its first antecedent.
    pub fn when(variable: impl Into<String>, set: impl Into<String>) -> RuleBuilder {
        RuleBuilder::default().and(variable, set)
    }

    /// Creates a rule from explicit parts.
    pub fn new(antecedents: Vec<Term>, consequent: Term) -> Self {
        Self {
            antecedents,
            consequent,
        }
    }

    pub fn antecedents(&self) -> &[Term] {
        &self.antecedents
    }

    pub fn consequent(&self) -> &Term {
        &self.consequent
    }

    /// Firing strength in `[0, 1]`.
    ///
    /// Returns 0 when any antecedent variable or set is missing from
    /// `inputs`, when a degree is NaN, and for a rule without antecedents.
    pub fn strength(&self, inputs: &FuzzifiedInputs) -> f64 {
        if self.antecedents.is_empty() {
            return 0.0;
        }
        let mut strength: f64 = 1.0;
        for term in &self.antecedents {
            match inputs.get(&term.variable).and_then(|m| m.get(&term.set)) {
                Some(&degree) if !degree.is_nan() => strength = strength.min(degree),
                _ => return 0.0,
            }
        }
        strength
    }
}
