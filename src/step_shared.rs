//! Shared traits and structures for the fixed-step integrators.

use crate::grid::Grid;
use crate::problem::{Partial, Problem};

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Trait implemented by every fixed-step integrator.
///
/// The trait is object safe so that the method catalog can hold
/// `&'static dyn Integrator` values.
pub trait Integrator {
    /// Name of the numerical scheme.
    fn name(&self) -> &'static str;

    /// Nominal order of accuracy.
    fn order(&self) -> u32;

    /// Partial derivatives of the right-hand side needed by the method.
    fn required_partials(&self) -> &'static [Partial] {
        &[]
    }

    /// Integrates the problem over the grid. The returned series has the same length as the grid.
    fn integrate(&self, grid: &Grid, problem: &Problem) -> Result<Approximation, IntegrationError>;
}

/// Enumeration of the errors that may arise during integration.
#[derive(Debug, Error)]
pub enum IntegrationError {
    #[error("Invalid point count {n}. At least one point is required.")]
    InvalidPointCount { n: usize },
    #[error("Invalid point count {n}. The grid spacing degenerates.")]
    DegenerateSpacing { n: usize },
    #[error("{method} requires the partial derivative {partial}, which the problem does not define.")]
    MissingDerivative {
        method: &'static str,
        partial: Partial,
    },
    #[error("{function} is not finite at x = {x}, y = {y} (grid index {index}).")]
    NumericDomain {
        function: &'static str,
        index: usize,
        x: f64,
        y: f64,
    },
    #[error("{method} failed: {source}")]
    MethodFailed {
        method: &'static str,
        #[source]
        source: Box<IntegrationError>,
    },
}

impl IntegrationError {
    /// Returns true for errors raised before any integrator runs because of a bad point count.
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            IntegrationError::InvalidPointCount { .. } | IntegrationError::DegenerateSpacing { .. } => true,
            IntegrationError::MethodFailed { source, .. } => source.is_invalid_argument(),
            _ => false,
        }
    }

    /// Returns true when a function evaluation produced a non-finite value.
    pub fn is_numeric_domain(&self) -> bool {
        match self {
            IntegrationError::NumericDomain { .. } => true,
            IntegrationError::MethodFailed { source, .. } => source.is_numeric_domain(),
            _ => false,
        }
    }

    /// Attaches the label of the method that produced the error.
    pub(crate) fn in_method(self, method: &'static str) -> Self {
        IntegrationError::MethodFailed {
            method,
            source: Box::new(self),
        }
    }
}

/// Contains some statistics of the integration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub num_eval: u32,
    pub accepted_steps: u32,
}

impl Stats {
    pub(crate) fn new() -> Stats {
        Stats {
            num_eval: 0,
            accepted_steps: 0,
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Number of function evaluations: {}", self.num_eval)?;
        write!(f, "Number of accepted steps: {}", self.accepted_steps)
    }
}

/// Approximate solution produced by one integrator, aligned with the grid.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Approximation {
    values: Vec<f64>,
    stats: Stats,
}

impl Approximation {
    pub(crate) fn new(values: Vec<f64>, stats: Stats) -> Self {
        Approximation { values, stats }
    }

    /// Getter for the approximated values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }
}

/// Counts evaluations and rejects non-finite results.
pub(crate) struct Evaluator {
    stats: Stats,
}

impl Evaluator {
    pub(crate) fn new() -> Self {
        Evaluator {
            stats: Stats::new(),
        }
    }

    /// Evaluates `func` at `(x, y)` for the step starting at grid index `index`.
    pub(crate) fn eval<F>(
        &mut self,
        function: &'static str,
        func: &F,
        index: usize,
        x: f64,
        y: f64,
    ) -> Result<f64, IntegrationError>
    where
        F: Fn(f64, f64) -> f64 + ?Sized,
    {
        self.stats.num_eval += 1;
        let value = func(x, y);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(IntegrationError::NumericDomain {
                function,
                index,
                x,
                y,
            })
        }
    }

    /// Records the step taken from grid index `index` and returns its value if finite.
    pub(crate) fn step_taken(
        &mut self,
        index: usize,
        x: f64,
        next_y: f64,
    ) -> Result<f64, IntegrationError> {
        if !next_y.is_finite() {
            return Err(IntegrationError::NumericDomain {
                function: "y",
                index,
                x,
                y: next_y,
            });
        }
        self.stats.accepted_steps += 1;
        Ok(next_y)
    }

    pub(crate) fn finish(self, values: Vec<f64>) -> Approximation {
        Approximation::new(values, self.stats)
    }
}

/// Rejects an empty set of sample points.
pub(crate) fn check_points(xs: &[f64]) -> Result<(), IntegrationError> {
    if xs.is_empty() {
        Err(IntegrationError::InvalidPointCount { n: 0 })
    } else {
        Ok(())
    }
}

/// Drops the lookahead value so that the series matches the grid length.
pub(crate) fn truncate_to_grid(mut ys: Vec<f64>, len: usize) -> Vec<f64> {
    ys.truncate(len);
    ys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluator_rejects_non_finite_values() {
        let mut evaluator = Evaluator::new();
        let f = |x: f64, y: f64| y / x;
        assert_eq!(evaluator.eval("f", &f, 0, 2.0, 1.0).unwrap(), 0.5);

        let err = evaluator.eval("f", &f, 3, 0.0, 1.0).unwrap_err();
        match err {
            IntegrationError::NumericDomain { function, index, x, y } => {
                assert_eq!(function, "f");
                assert_eq!(index, 3);
                assert_eq!(x, 0.0);
                assert_eq!(y, 1.0);
            }
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(evaluator.finish(vec![]).stats().num_eval, 2);
    }

    #[test]
    fn test_method_failed_classification() {
        let inner = IntegrationError::NumericDomain {
            function: "df_x",
            index: 4,
            x: 0.5,
            y: 1.0,
        };
        let err = inner.in_method("Taylor 3rd");
        assert!(err.is_numeric_domain());
        assert!(!err.is_invalid_argument());
        let message = err.to_string();
        assert!(message.starts_with("Taylor 3rd failed"));
        assert!(message.contains("grid index 4"));
    }

    #[test]
    fn test_stats_display() {
        let stats = Stats {
            num_eval: 8,
            accepted_steps: 4,
        };
        assert_eq!(
            stats.to_string(),
            "Number of function evaluations: 8\nNumber of accepted steps: 4"
        );
    }
}
