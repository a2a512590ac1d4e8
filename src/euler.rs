//! Euler-type methods: explicit Euler, the two-stage predictor-corrector labelled "Implicit
//! Euler", and Euler with recount.

use crate::grid::Grid;
use crate::problem::Problem;
use crate::step_shared::*;

/// Explicit (forward) Euler method of order 1.
///
/// One lookahead value is computed past the last point and dropped.
///
/// # Arguments
///
/// * `xs`  - Sample points
/// * `h`   - Step size
/// * `y0`  - Initial value
/// * `f`   - Right-hand side
///
pub fn explicit_euler<F>(xs: &[f64], h: f64, y0: f64, f: F) -> Result<Approximation, IntegrationError>
where
    F: Fn(f64, f64) -> f64,
{
    check_points(xs)?;
    let mut evaluator = Evaluator::new();
    let mut ys = Vec::with_capacity(xs.len() + 1);
    ys.push(y0);
    for (k, &x) in xs.iter().enumerate() {
        let y = ys[k];
        let next_y = y + evaluator.eval("f", &f, k, x, y)? * h;
        ys.push(evaluator.step_taken(k, x, next_y)?);
    }
    Ok(evaluator.finish(truncate_to_grid(ys, xs.len())))
}

/// Two-stage Euler predictor-corrector.
///
/// The corrector evaluates `f` at the next sample point with the predicted value. No
/// implicit equation is solved.
pub fn two_stage_euler<F>(xs: &[f64], h: f64, y0: f64, f: F) -> Result<Approximation, IntegrationError>
where
    F: Fn(f64, f64) -> f64,
{
    check_points(xs)?;
    let mut evaluator = Evaluator::new();
    let mut ys = Vec::with_capacity(xs.len());
    ys.push(y0);
    for k in 0..xs.len() - 1 {
        let y = ys[k];
        let subsidiary_y = y + evaluator.eval("f", &f, k, xs[k], y)? * h;
        let next_y = y + evaluator.eval("f", &f, k, xs[k + 1], subsidiary_y)? * h;
        ys.push(evaluator.step_taken(k, xs[k], next_y)?);
    }
    Ok(evaluator.finish(ys))
}

/// Euler with recount (Heun-type), order 2.
///
/// Both corrector evaluations are taken at `xs[k]`.
pub fn euler_with_recount<F>(xs: &[f64], h: f64, y0: f64, f: F) -> Result<Approximation, IntegrationError>
where
    F: Fn(f64, f64) -> f64,
{
    check_points(xs)?;
    let mut evaluator = Evaluator::new();
    let mut ys = Vec::with_capacity(xs.len());
    ys.push(y0);
    for k in 0..xs.len() - 1 {
        let (x, y) = (xs[k], ys[k]);
        let slope = evaluator.eval("f", &f, k, x, y)?;
        let subsidiary_y = y + slope * h;
        let next_y = y + (slope + evaluator.eval("f", &f, k, x, subsidiary_y)?) * h / 2.0;
        ys.push(evaluator.step_taken(k, x, next_y)?);
    }
    Ok(evaluator.finish(ys))
}

/// Explicit Euler method.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExplicitEuler;

impl Integrator for ExplicitEuler {
    fn name(&self) -> &'static str {
        "explicit Euler"
    }

    fn order(&self) -> u32 {
        1
    }

    fn integrate(&self, grid: &Grid, problem: &Problem) -> Result<Approximation, IntegrationError> {
        explicit_euler(grid.points(), grid.step_size(), problem.y0(), problem.rhs())
    }
}

/// Two-stage Euler predictor-corrector, see [`two_stage_euler`].
#[derive(Clone, Copy, Debug, Default)]
pub struct TwoStageEuler;

impl Integrator for TwoStageEuler {
    fn name(&self) -> &'static str {
        "two-stage Euler"
    }

    fn order(&self) -> u32 {
        1
    }

    fn integrate(&self, grid: &Grid, problem: &Problem) -> Result<Approximation, IntegrationError> {
        two_stage_euler(grid.points(), grid.step_size(), problem.y0(), problem.rhs())
    }
}

/// Euler with recount, see [`euler_with_recount`].
#[derive(Clone, Copy, Debug, Default)]
pub struct EulerRecount;

impl Integrator for EulerRecount {
    fn name(&self) -> &'static str {
        "Euler with recount"
    }

    fn order(&self) -> u32 {
        2
    }

    fn integrate(&self, grid: &Grid, problem: &Problem) -> Result<Approximation, IntegrationError> {
        euler_with_recount(grid.points(), grid.step_size(), problem.y0(), problem.rhs())
    }
}
