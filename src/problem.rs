//! Definition of the scalar initial value problem y' = f(x, y), y(0) = y0.

use crate::step_shared::IntegrationError;

use serde::Serialize;
use std::fmt;

/// Right-hand side or one of its partial derivatives, evaluated at (x, y).
pub type ScalarField = Box<dyn Fn(f64, f64) -> f64 + Send + Sync>;

/// Closed-form solution evaluated at x.
pub type Solution = Box<dyn Fn(f64) -> f64 + Send + Sync>;

/// Partial derivatives of the right-hand side that a method may require.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Partial {
    X,
    Y,
    XX,
    YY,
    XY,
}

impl Partial {
    pub const ALL: [Partial; 5] = [Partial::X, Partial::Y, Partial::XX, Partial::YY, Partial::XY];

    /// Name under which the derivative is reported.
    pub fn name(self) -> &'static str {
        match self {
            Partial::X => "df_x",
            Partial::Y => "df_y",
            Partial::XX => "df_xx",
            Partial::YY => "df_yy",
            Partial::XY => "df_xy",
        }
    }

    fn slot(self) -> usize {
        match self {
            Partial::X => 0,
            Partial::Y => 1,
            Partial::XX => 2,
            Partial::YY => 3,
            Partial::XY => 4,
        }
    }
}

impl fmt::Display for Partial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Initial value problem shared read-only by all integrators.
///
/// # Example
///
/// ```
/// use fixed_step_odes::{Partial, Problem};
///
/// let problem = Problem::new(1.0, |_x, y| y)
///     .with_partial(Partial::X, |_x, _y| 0.0)
///     .with_partial(Partial::Y, |_x, _y| 1.0)
///     .with_solution(|x| x.exp());
/// assert_eq!(problem.y0(), 1.0);
/// assert!(problem.partial(Partial::XX).is_none());
/// ```
pub struct Problem {
    y0: f64,
    f: ScalarField,
    partials: [Option<ScalarField>; 5],
    solution: Option<Solution>,
}

impl Problem {
    /// Creates a problem from its initial value and right-hand side.
    pub fn new<F>(y0: f64, f: F) -> Self
    where
        F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
    {
        Problem {
            y0,
            f: Box::new(f),
            partials: [None, None, None, None, None],
            solution: None,
        }
    }

    /// Attaches a partial derivative of the right-hand side.
    pub fn with_partial<F>(mut self, partial: Partial, df: F) -> Self
    where
        F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
    {
        self.partials[partial.slot()] = Some(Box::new(df));
        self
    }

    /// Attaches the closed-form solution used as reference.
    pub fn with_solution<G>(mut self, g: G) -> Self
    where
        G: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        self.solution = Some(Box::new(g));
        self
    }

    pub fn y0(&self) -> f64 {
        self.y0
    }

    /// Getter for the right-hand side.
    pub fn rhs(&self) -> &ScalarField {
        &self.f
    }

    pub fn partial(&self, partial: Partial) -> Option<&ScalarField> {
        self.partials[partial.slot()].as_ref()
    }

    /// Returns the partial derivative or a `MissingDerivative` error naming `method`.
    pub fn require(
        &self,
        partial: Partial,
        method: &'static str,
    ) -> Result<&ScalarField, IntegrationError> {
        self.partial(partial)
            .ok_or(IntegrationError::MissingDerivative { method, partial })
    }

    pub fn has_solution(&self) -> bool {
        self.solution.is_some()
    }

    /// Samples the reference solution at the given points.
    ///
    /// Returns `Ok(None)` when the problem has no closed-form solution.
    pub fn reference(&self, xs: &[f64]) -> Result<Option<Vec<f64>>, IntegrationError> {
        let g = match &self.solution {
            Some(g) => g,
            None => return Ok(None),
        };
        xs.iter()
            .enumerate()
            .map(|(index, &x)| {
                let value = g(x);
                if value.is_finite() {
                    Ok(value)
                } else {
                    Err(IntegrationError::NumericDomain {
                        function: "reference",
                        index,
                        x,
                        y: value,
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

impl fmt::Debug for Problem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let partials: Vec<&str> = Partial::ALL
            .iter()
            .filter(|p| self.partial(**p).is_some())
            .map(|p| p.name())
            .collect();
        f.debug_struct("Problem")
            .field("y0", &self.y0)
            .field("partials", &partials)
            .field("solution", &self.solution.is_some())
            .finish()
    }
}
