//! Mamdani fuzzy inference.
//!
//! Provides membership functions, linguistic variables, conjunctive rules
//! and an inference engine with max aggregation and centroid
//! defuzzification, plus the scheduling knowledge base that turns job
//! urgency, duration and machine load into a priority score.
//!
//! # Usage
//!
//! ```
//! use fuzzy_schedule::fuzzy::knowledge;
//! use std::collections::HashMap;
//!
//! let engine = knowledge::scheduling_engine().unwrap();
//! let priority = engine.infer(&HashMap::from([
//!     (knowledge::PROCESSING_TIME.to_string(), 10.0),
//!     (knowledge::URGENCY.to_string(), 9.0),
//!     (knowledge::MACHINE_LOAD.to_string(), 20.0),
//! ]));
//! assert!(priority > 70.0);
//! ```
//!
//! # Operators
//!
//! | Step | Operator |
//! |------|----------|
//! | AND (antecedents) | min |
//! | Implication | min (clipping) |
//! | Aggregation | max |
//! | Defuzzification | discretized centroid |

mod engine;
pub mod knowledge;
mod membership;
mod rule;
mod variable;

pub use engine::{Inference, InferenceEngine, InferenceEngineBuilder, DEFAULT_RESOLUTION};
pub use membership::{FuzzySet, MembershipFunction};
pub use rule::{FuzzifiedInputs, FuzzyRule, RuleBuilder, Term};
pub use variable::LinguisticVariable;
