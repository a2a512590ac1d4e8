//! Runs every catalogued method over the same grid and problem and pairs the results with
//! the reference solution.

use crate::catalog::{MethodDescriptor, METHODS, REFERENCE_LABEL};
use crate::grid::Grid;
use crate::problem::Problem;
use crate::step_shared::{IntegrationError, Stats};

use log::{debug, info, warn};
use nalgebra::DVector;
use serde::Serialize;

/// What to do when a single method fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailurePolicy {
    /// The first failure aborts the whole run.
    Abort,
    /// Failures are recorded in the report and the remaining methods still run.
    Isolate,
}

impl Default for FailurePolicy {
    fn default() -> Self {
        FailurePolicy::Abort
    }
}

/// Deviation of a series from the reference solution.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ErrorSummary {
    pub max_abs: f64,
    pub rms: f64,
    pub final_abs: f64,
}

impl ErrorSummary {
    fn between(values: &[f64], reference: &[f64]) -> Self {
        let diff = DVector::from_column_slice(values) - DVector::from_column_slice(reference);
        let n = diff.len() as f64;
        ErrorSummary {
            max_abs: diff.amax(),
            rms: diff.norm() / n.sqrt(),
            final_abs: diff[diff.len() - 1].abs(),
        }
    }
}

/// Result of one method in a comparison run.
#[derive(Clone, Debug, Serialize)]
pub struct Curve {
    pub label: &'static str,
    pub style: &'static str,
    pub order: u32,
    pub values: Vec<f64>,
    pub stats: Stats,
    pub error: Option<ErrorSummary>,
}

/// Method that failed under [`FailurePolicy::Isolate`].
#[derive(Debug)]
pub struct MethodFailure {
    pub label: &'static str,
    pub error: IntegrationError,
}

/// Aligned series produced by one comparison run.
#[derive(Debug, Serialize)]
pub struct Report {
    grid: Grid,
    reference: Option<Vec<f64>>,
    curves: Vec<Curve>,
    #[serde(skip)]
    failures: Vec<MethodFailure>,
}

impl Report {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Reference solution sampled on the grid, if the problem defines one.
    pub fn reference(&self) -> Option<&[f64]> {
        self.reference.as_deref()
    }

    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    pub fn curve(&self, label: &str) -> Option<&Curve> {
        self.curves.iter().find(|c| c.label == label)
    }

    pub fn failures(&self) -> &[MethodFailure] {
        &self.failures
    }

    /// Iterates `(label, style, points, values)` for every method, in catalog order.
    pub fn series(&self) -> impl Iterator<Item = (&'static str, &'static str, &[f64], &[f64])> + '_ {
        let points = self.grid.points();
        self.curves
            .iter()
            .map(move |c| (c.label, c.style, points, c.values.as_slice()))
    }

    /// Renders the report with one row per grid point and one column per series.
    pub fn to_csv(&self) -> String {
        let mut header = vec!["x"];
        if self.reference.is_some() {
            header.push(REFERENCE_LABEL);
        }
        header.extend(self.curves.iter().map(|c| c.label));

        let mut out = header.join(",");
        out.push('\n');
        for (k, x) in self.grid.iter().enumerate() {
            let mut row = vec![x.to_string()];
            if let Some(reference) = &self.reference {
                row.push(reference[k].to_string());
            }
            row.extend(self.curves.iter().map(|c| c.values[k].to_string()));
            out.push_str(&row.join(","));
            out.push('\n');
        }
        out
    }
}

/// Comparison driver.
///
/// # Example
///
/// ```
/// use fixed_step_odes::{Comparison, Problem};
///
/// let problem = Problem::new(1.0, |_x, y| y).with_solution(|x| x.exp());
/// let methods = [*fixed_step_odes::find_method("Runge-Kutta 4th").unwrap()];
/// let report = Comparison::new(&problem).with_methods(&methods).run(5).unwrap();
/// assert_eq!(report.curves()[0].values.len(), 5);
/// ```
pub struct Comparison<'a> {
    problem: &'a Problem,
    methods: &'a [MethodDescriptor],
    policy: FailurePolicy,
}

impl<'a> Comparison<'a> {
    /// Creates a driver running the whole catalog with [`FailurePolicy::Abort`].
    pub fn new(problem: &'a Problem) -> Self {
        Comparison {
            problem,
            methods: &METHODS,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_methods(mut self, methods: &'a [MethodDescriptor]) -> Self {
        self.methods = methods;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds the grid for `n` points and runs every method on it.
    pub fn run(&self, n: usize) -> Result<Report, IntegrationError> {
        let grid = Grid::build(n)?;
        let reference = self.problem.reference(grid.points())?;
        info!(
            "Comparing {} methods over {} points with step size {}",
            self.methods.len(),
            grid.len(),
            grid.step_size()
        );

        let mut failures = Vec::new();
        let mut runnable = Vec::with_capacity(self.methods.len());
        for method in self.methods {
            match self.check_partials(method) {
                Ok(()) => runnable.push(method),
                Err(error) => self.record(method, error, &mut failures)?,
            }
        }

        let mut curves = Vec::with_capacity(runnable.len());
        for method in runnable {
            match method.integrator.integrate(&grid, self.problem) {
                Ok(approximation) => {
                    let stats = approximation.stats();
                    debug!(
                        "{}: {} steps, {} evaluations",
                        method.label, stats.accepted_steps, stats.num_eval
                    );
                    let values = approximation.into_values();
                    let error = reference
                        .as_ref()
                        .map(|r| ErrorSummary::between(&values, r));
                    curves.push(Curve {
                        label: method.label,
                        style: method.style,
                        order: method.integrator.order(),
                        values,
                        stats,
                        error,
                    });
                }
                Err(error) => self.record(method, error, &mut failures)?,
            }
        }

        Ok(Report {
            grid,
            reference,
            curves,
            failures,
        })
    }

    fn check_partials(&self, method: &MethodDescriptor) -> Result<(), IntegrationError> {
        for &partial in method.integrator.required_partials() {
            self.problem.require(partial, method.label)?;
        }
        Ok(())
    }

    // Under Abort the error is returned, tagged with the method label.
    fn record(
        &self,
        method: &MethodDescriptor,
        error: IntegrationError,
        failures: &mut Vec<MethodFailure>,
    ) -> Result<(), IntegrationError> {
        match self.policy {
            FailurePolicy::Abort => Err(error.in_method(method.label)),
            FailurePolicy::Isolate => {
                warn!("{} skipped: {}", method.label, error);
                failures.push(MethodFailure {
                    label: method.label,
                    error,
                });
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Partial;

    fn exponential() -> Problem {
        Problem::new(1.0, |_x, y| y).with_solution(|x| x.exp())
    }

    #[test]
    fn test_error_summary() {
        let summary = ErrorSummary::between(&[1.0, 2.0, 4.0], &[1.0, 3.0, 3.5]);
        assert_eq!(summary.max_abs, 1.0);
        assert!((summary.rms - (1.25f64 / 3.0).sqrt()).abs() < 1.0E-15);
        assert_eq!(summary.final_abs, 0.5);
    }

    #[test]
    fn test_abort_on_missing_partial() {
        let problem = exponential();
        let err = Comparison::new(&problem).run(5).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Taylor 3rd failed: Taylor 3rd requires the partial derivative df_x"));
        match err {
            IntegrationError::MethodFailed { method, source } => {
                assert_eq!(method, "Taylor 3rd");
                assert!(matches!(
                    *source,
                    IntegrationError::MissingDerivative {
                        partial: Partial::X,
                        ..
                    }
                ));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_isolate_missing_partials() {
        let problem = exponential();
        let report = Comparison::new(&problem)
            .with_failure_policy(FailurePolicy::Isolate)
            .run(5)
            .unwrap();
        assert_eq!(report.curves().len(), 6);
        let failed: Vec<_> = report.failures().iter().map(|f| f.label).collect();
        assert_eq!(failed, vec!["Taylor 3rd", "Taylor 4th"]);
        assert!(report.curve("Taylor 3rd").is_none());
        assert!(report.curve("Explicit Euler").is_some());
    }

    #[test]
    fn test_invalid_point_count_runs_nothing() {
        let problem = exponential();
        let err = Comparison::new(&problem)
            .with_failure_policy(FailurePolicy::Isolate)
            .run(0)
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_numeric_failure_reports_method_and_index() {
        let problem = Problem::new(1.0, |x, y| y / (x - 0.5));
        let methods = [METHODS[6]];
        let err = Comparison::new(&problem)
            .with_methods(&methods)
            .run(3)
            .unwrap_err();
        assert!(err.is_numeric_domain());
        let message = err.to_string();
        assert!(message.starts_with("Explicit Euler failed"));
        assert!(message.contains("grid index 1"));
    }

    #[test]
    fn test_csv_layout() {
        let problem = exponential();
        let methods = [METHODS[6]];
        let report = Comparison::new(&problem)
            .with_methods(&methods)
            .run(2)
            .unwrap();
        let csv = report.to_csv();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "x,Original,Explicit Euler");
        assert_eq!(lines[1], "0,1,1");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_series_tuples_are_aligned() {
        let problem = exponential();
        let methods = [METHODS[2], METHODS[6]];
        let report = Comparison::new(&problem)
            .with_methods(&methods)
            .run(7)
            .unwrap();
        let series: Vec<_> = report.series().collect();
        assert_eq!(series.len(), 2);
        for (_, _, points, values) in series {
            assert_eq!(points.len(), values.len());
        }
        assert_eq!(report.reference().unwrap().len(), 7);
    }
}
