//! Midpoint (Cauchy) method of order 2.

use crate::grid::Grid;
use crate::problem::Problem;
use crate::step_shared::*;

/// Midpoint method: a half-step predictor followed by a full step with the midpoint slope.
pub fn cauchy<F>(xs: &[f64], h: f64, y0: f64, f: F) -> Result<Approximation, IntegrationError>
where
    F: Fn(f64, f64) -> f64,
{
    check_points(xs)?;
    let mut evaluator = Evaluator::new();
    let mut ys = Vec::with_capacity(xs.len());
    ys.push(y0);
    for k in 0..xs.len() - 1 {
        let (x, y) = (xs[k], ys[k]);
        let subsidiary_y = y + evaluator.eval("f", &f, k, x, y)? * h / 2.0;
        let next_y = y + evaluator.eval("f", &f, k, x + h / 2.0, subsidiary_y)? * h;
        ys.push(evaluator.step_taken(k, x, next_y)?);
    }
    Ok(evaluator.finish(ys))
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Cauchy;

impl Integrator for Cauchy {
    fn name(&self) -> &'static str {
        "Cauchy"
    }

    fn order(&self) -> u32 {
        2
    }

    fn integrate(&self, grid: &Grid, problem: &Problem) -> Result<Approximation, IntegrationError> {
        cauchy(grid.points(), grid.step_size(), problem.y0(), problem.rhs())
    }
}
