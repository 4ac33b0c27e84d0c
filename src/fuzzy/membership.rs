//! Membership functions and fuzzy sets.
//!
//! A membership function maps a crisp scalar to a degree in `[0, 1]`.
//! Two shapes are supported, both piecewise linear:
//!
//! ```text
//!   triangular(a, b, c)          trapezoidal(a, b, c, d)
//!
//!         1 ─    /\                  1 ─    ____
//!               /  \                       /    \
//!         0 ─__/    \__              0 ─__/      \__
//!             a  b  c                    a  b  c  d
//! ```
//!
//! Degenerate ramps (`a == b`, `b == c`, `c == d`) are legal and behave as
//! steps: the full-membership point or plateau takes precedence.
//!
//! # Reference
//! Zadeh (1965), "Fuzzy Sets"; Ross (2010), "Fuzzy Logic with Engineering
//! Applications", Ch. 4

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// Shape of a membership function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MembershipFunction {
    /// Rising on `(a, b)`, peak 1 at `b`, falling on `(b, c)`.
    Triangular { a: f64, b: f64, c: f64 },
    /// Rising on `(a, b)`, plateau 1 on `[b, c]`, falling on `(c, d)`.
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
}

impl MembershipFunction {
    /// Membership degree of `x`. Total over all reals; 0 outside the support
    /// and for NaN.
    pub fn degree(&self, x: f64) -> f64 {
        if x.is_nan() {
            return 0.0;
        }
        match *self {
            MembershipFunction::Triangular { a, b, c } => {
                if x == b {
                    1.0
                } else if x <= a || x >= c {
                    0.0
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (c - x) / (c - b)
                }
            }
            MembershipFunction::Trapezoidal { a, b, c, d } => {
                if x >= b && x <= c {
                    1.0
                } else if x <= a || x >= d {
                    0.0
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (d - x) / (d - c)
                }
            }
        }
    }

    /// Open interval outside of which the degree is 0.
    pub fn support(&self) -> (f64, f64) {
        match *self {
            MembershipFunction::Triangular { a, c, .. } => (a, c),
            MembershipFunction::Trapezoidal { a, d, .. } => (a, d),
        }
    }

    /// A representative point of full membership.
    pub fn peak(&self) -> f64 {
        match *self {
            MembershipFunction::Triangular { b, .. } => b,
            MembershipFunction::Trapezoidal { b, c, .. } => (b + c) / 2.0,
        }
    }

    fn breakpoints(&self) -> Vec<f64> {
        match *self {
            MembershipFunction::Triangular { a, b, c } => vec![a, b, c],
            MembershipFunction::Trapezoidal { a, b, c, d } => vec![a, b, c, d],
        }
    }
}

/// A named fuzzy set: one linguistic term of a variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzySet {
    /// Term name, unique within its variable (e.g., "short", "high").
    pub name: String,
    /// Membership function.
    pub function: MembershipFunction,
}

impl FuzzySet {
    /// Creates a fuzzy set, rejecting unordered or non-finite breakpoints.
    pub fn new(name: impl Into<String>, function: MembershipFunction) -> Result<Self> {
        let name = name.into();
        let points = function.breakpoints();
        let finite = points.iter().all(|p| p.is_finite());
        let ordered = points.windows(2).all(|w| w[0] <= w[1]);
        if !finite || !ordered {
            return Err(ScheduleError::InvalidMembership { name, points });
        }
        Ok(Self { name, function })
    }

    /// Triangular set `(a, b, c)`.
    pub fn triangular(name: impl Into<String>, a: f64, b: f64, c: f64) -> Result<Self> {
        Self::new(name, MembershipFunction::Triangular { a, b, c })
    }

    /// Trapezoidal set `(a, b, c, d)`.
    pub fn trapezoidal(name: impl Into<String>, a: f64, b: f64, c: f64, d: f64) -> Result<Self> {
        Self::new(name, MembershipFunction::Trapezoidal { a, b, c, d })
    }

    /// Membership degree of `x` in this set.
    #[inline]
    pub fn degree(&self, x: f64) -> f64 {
        self.function.degree(x)
    }
}
