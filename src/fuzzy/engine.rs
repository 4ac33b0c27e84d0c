//! Mamdani inference engine.
//!
//! # Pipeline
//!
//! 1. **Fuzzification**: each crisp input naming a known input variable is
//!    mapped to its set degrees. Unknown names are ignored.
//! 2. **Rule evaluation**: firing strength per rule (`min` over antecedents).
//! 3. **Aggregation**: per output set, `max` strength over the rules that
//!    conclude it.
//! 4. **Defuzzification**: centroid of the clipped, max-combined output sets,
//!    sampled at `resolution` equally spaced points over the output universe
//!    (both ends included). With zero total membership the universe midpoint
//!    is returned.
//!
//! # Complexity
//! O(r·a + s·n) per inference, r=rules, a=antecedents/rule, s=output sets,
//! n=resolution.
//!
//! # Reference
//! Mamdani & Assilian (1975), "An Experiment in Linguistic Synthesis with a
//! Fuzzy Logic Controller"

use serde::Serialize;
use std::collections::HashMap;

use super::{FuzzifiedInputs, FuzzyRule, LinguisticVariable};
use crate::error::{Result, ScheduleError};

/// Default number of samples used by centroid defuzzification.
pub const DEFAULT_RESOLUTION: usize = 100;

/// Result of one inference with its intermediate aggregation.
#[derive(Debug, Clone, Serialize)]
pub struct Inference {
    /// Defuzzified crisp output.
    pub value: f64,
    /// Aggregated activation per output set (0 for sets no rule reached).
    pub activations: HashMap<String, f64>,
}

/// An immutable Mamdani fuzzy inference system.
///
/// Built once through [`InferenceEngineBuilder`] and then shared read-only
/// (it is `Send + Sync`; wrap in `Arc` to back several schedulers).
///
/// # Example
/// ```
/// use fuzzy_schedule::fuzzy::{FuzzyRule, FuzzySet, InferenceEngine, LinguisticVariable};
/// use std::collections::HashMap;
///
/// # fn main() -> fuzzy_schedule::Result<()> {
/// let temp = LinguisticVariable::new("temp", 0.0, 40.0)?
///     .with_set(FuzzySet::triangular("cold", 0.0, 0.0, 20.0)?)?
///     .with_set(FuzzySet::triangular("hot", 20.0, 40.0, 40.0)?)?;
/// let fan = LinguisticVariable::new("fan", 0.0, 100.0)?
///     .with_set(FuzzySet::triangular("slow", 0.0, 0.0, 50.0)?)?
///     .with_set(FuzzySet::triangular("fast", 50.0, 100.0, 100.0)?)?;
///
/// let engine = InferenceEngine::builder()
///     .input(temp)?
///     .output(fan)?
///     .rule(FuzzyRule::when("temp", "hot").then("fan", "fast"))
///     .build()?;
///
/// let speed = engine.infer(&HashMap::from([("temp".to_string(), 35.0)]));
/// assert!(speed > 50.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    inputs: HashMap<String, LinguisticVariable>,
    output: LinguisticVariable,
    rules: Vec<FuzzyRule>,
    resolution: usize,
}

/// Builder for [`InferenceEngine`].
#[derive(Debug, Clone)]
pub struct InferenceEngineBuilder {
    inputs: HashMap<String, LinguisticVariable>,
    output: Option<LinguisticVariable>,
    rules: Vec<FuzzyRule>,
    resolution: usize,
}

impl Default for InferenceEngineBuilder {
    fn default() -> Self {
        Self {
            inputs: HashMap::new(),
            output: None,
            rules: Vec::new(),
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

impl InferenceEngineBuilder {
    fn check_unique(&self, name: &str) -> Result<()> {
        let taken = self.inputs.contains_key(name)
            || self.output.as_ref().is_some_and(|o| o.name() == name);
        if taken {
            return Err(ScheduleError::DuplicateVariable(name.to_string()));
        }
        Ok(())
    }

    /// Adds an input variable.
    pub fn input(mut self, variable: LinguisticVariable) -> Result<Self> {
        self.check_unique(variable.name())?;
        self.inputs.insert(variable.name().to_string(), variable);
        Ok(self)
    }

    /// Sets the output variable. Only one output is allowed.
    pub fn output(mut self, variable: LinguisticVariable) -> Result<Self> {
        if let Some(existing) = &self.output {
            return Err(ScheduleError::DuplicateVariable(existing.name().to_string()));
        }
        self.check_unique(variable.name())?;
        self.output = Some(variable);
        Ok(self)
    }

    /// Appends a rule.
    pub fn rule(mut self, rule: FuzzyRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Appends several rules.
    pub fn rules(mut self, rules: impl IntoIterator<Item = FuzzyRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the defuzzification sample count (clamped to at least 2).
    pub fn resolution(mut self, samples: usize) -> Self {
        self.resolution = samples.max(2);
        self
    }

    /// Finishes the engine. Fails when no output variable was set.
    pub fn build(self) -> Result<InferenceEngine> {
        let output = self.output.ok_or(ScheduleError::MissingOutputVariable)?;
        Ok(InferenceEngine {
            inputs: self.inputs,
            output,
            rules: self.rules,
            resolution: self.resolution,
        })
    }
}

impl InferenceEngine {
    /// Starts a new builder.
    pub fn builder() -> InferenceEngineBuilder {
        InferenceEngineBuilder::default()
    }

    /// Input variable by name.
    pub fn input(&self, name: &str) -> Option<&LinguisticVariable> {
        self.inputs.get(name)
    }

    /// Input variable names (unordered).
    pub fn input_names(&self) -> impl Iterator<Item = &str> {
        self.inputs.keys().map(String::as_str)
    }

    /// The output variable.
    pub fn output(&self) -> &LinguisticVariable {
        &self.output
    }

    /// The rule base, in insertion order.
    pub fn rules(&self) -> &[FuzzyRule] {
        &self.rules
    }

    /// Defuzzification sample count.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Crisp output for the given crisp inputs.
    ///
    /// Always within the output universe (inclusive).
    pub fn infer(&self, crisp_inputs: &HashMap<String, f64>) -> f64 {
        self.infer_detailed(crisp_inputs).value
    }

    /// Like [`infer`](Self::infer) but also returns the per-set activations.
    pub fn infer_detailed(&self, crisp_inputs: &HashMap<String, f64>) -> Inference {
        let fuzzified = self.fuzzify(crisp_inputs);
        let activations = self.aggregate(&fuzzified);
        let value = self.defuzzify(&activations);
        Inference { value, activations }
    }

    /// Fuzzifies every crisp input that names a known input variable.
    pub fn fuzzify(&self, crisp_inputs: &HashMap<String, f64>) -> FuzzifiedInputs {
        crisp_inputs
            .iter()
            .filter_map(|(name, &value)| {
                self.inputs
                    .get(name)
                    .map(|var| (name.clone(), var.fuzzify(value)))
            })
            .collect()
    }

    /// Max-aggregates rule strengths per output set.
    ///
    /// A consequent counts only when it names the output variable and one of
    /// its sets; any other consequent is skipped.
    pub fn aggregate(&self, fuzzified: &FuzzifiedInputs) -> HashMap<String, f64> {
        let mut activations: HashMap<String, f64> = self
            .output
            .sets()
            .iter()
            .map(|s| (s.name.clone(), 0.0))
            .collect();

        for rule in &self.rules {
            let strength = rule.strength(fuzzified);
            if strength <= 0.0 {
                continue;
            }
            let consequent = rule.consequent();
            if consequent.variable != self.output.name() {
                continue;
            }
            if let Some(level) = activations.get_mut(&consequent.set) {
                *level = level.max(strength);
            }
        }

        activations
    }

    /// Centroid of the aggregated output shape.
    pub fn defuzzify(&self, activations: &HashMap<String, f64>) -> f64 {
        let (min, max) = self.output.universe();
        let step = (max - min) / (self.resolution - 1) as f64;

        let active: Vec<_> = self
            .output
            .sets()
            .iter()
            .filter_map(|s| match activations.get(&s.name) {
                Some(&level) if level > 0.0 => Some((s, level)),
                _ => None,
            })
            .collect();

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for i in 0..self.resolution {
            let x = min + step * i as f64;
            let mu = active
                .iter()
                .map(|(set, level)| set.degree(x).min(*level))
                .fold(0.0, f64::max);
            numerator += x * mu;
            denominator += mu;
        }

        if denominator == 0.0 {
            return self.output.midpoint();
        }
        (numerator / denominator).clamp(min, max)
    }
}
