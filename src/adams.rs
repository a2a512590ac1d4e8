//! Two-step Adams-Bashforth (extrapolation Adams) method.

use crate::grid::Grid;
use crate::problem::Problem;
use crate::step_shared::*;

/// Two-step Adams extrapolation method of order 2.
///
/// The second value is bootstrapped with one explicit Euler step. Every later value uses
/// the slopes at the two previous points.
pub fn extrapolation_adams<F>(
    xs: &[f64],
    h: f64,
    y0: f64,
    f: F,
) -> Result<Approximation, IntegrationError>
where
    F: Fn(f64, f64) -> f64,
{
    check_points(xs)?;
    let mut evaluator = Evaluator::new();
    let mut ys = Vec::with_capacity(xs.len() + 1);
    let mut previous_slope = evaluator.eval("f", &f, 0, xs[0], y0)?;
    ys.push(y0);
    ys.push(evaluator.step_taken(0, xs[0], y0 + h * previous_slope)?);

    for k in 1..xs.len() {
        let slope = evaluator.eval("f", &f, k, xs[k], ys[k])?;
        let next_y = ys[k] + (3.0 / 2.0 * slope - 1.0 / 2.0 * previous_slope) * h;
        ys.push(evaluator.step_taken(k, xs[k], next_y)?);
        previous_slope = slope;
    }
    Ok(evaluator.finish(truncate_to_grid(ys, xs.len())))
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AdamsBashforth2;

impl Integrator for AdamsBashforth2 {
    fn name(&self) -> &'static str {
        "Adams-Bashforth 2"
    }

    fn order(&self) -> u32 {
        2
    }

    fn integrate(&self, grid: &Grid, problem: &Problem) -> Result<Approximation, IntegrationError> {
        extrapolation_adams(grid.points(), grid.step_size(), problem.y0(), problem.rhs())
    }
}
