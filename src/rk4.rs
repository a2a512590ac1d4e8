//! Explicit Runge-Kutta method of order 4 with fixed step size.

use crate::grid::Grid;
use crate::problem::Problem;
use crate::step_shared::*;

/// Classical Runge-Kutta method of order 4.
///
/// # Arguments
///
/// * `xs`  - Sample points
/// * `h`   - Step size used in the method
/// * `y0`  - Initial value of the dependent variable
/// * `f`   - Right-hand side of the ODE
///
pub fn runge_kutta<F>(xs: &[f64], h: f64, y0: f64, f: F) -> Result<Approximation, IntegrationError>
where
    F: Fn(f64, f64) -> f64,
{
    check_points(xs)?;
    let mut evaluator = Evaluator::new();
    let mut ys = Vec::with_capacity(xs.len() + 1);
    ys.push(y0);
    for (k, &x) in xs.iter().enumerate() {
        let next_y = step(&mut evaluator, &f, k, x, ys[k], h)?;
        ys.push(evaluator.step_taken(k, x, next_y)?);
    }
    Ok(evaluator.finish(truncate_to_grid(ys, xs.len())))
}

/// Performs one step of the Runge-Kutta 4 method.
fn step<F>(
    evaluator: &mut Evaluator,
    f: &F,
    k: usize,
    x: f64,
    y: f64,
    h: f64,
) -> Result<f64, IntegrationError>
where
    F: Fn(f64, f64) -> f64,
{
    let half_step = h / 2.0;
    let k1 = h * evaluator.eval("f", f, k, x, y)?;
    let k2 = h * evaluator.eval("f", f, k, x + half_step, y + k1 / 2.0)?;
    let k3 = h * evaluator.eval("f", f, k, x + half_step, y + k2 / 2.0)?;
    let k4 = h * evaluator.eval("f", f, k, x + h, y + k3)?;

    Ok(y + (k1 + 2.0 * k2 + 2.0 * k3 + k4) / 6.0)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Rk4;

impl Integrator for Rk4 {
    fn name(&self) -> &'static str {
        "Runge-Kutta 4"
    }

    fn order(&self) -> u32 {
        4
    }

    fn integrate(&self, grid: &Grid, problem: &Problem) -> Result<Approximation, IntegrationError> {
        runge_kutta(grid.points(), grid.step_size(), problem.y0(), problem.rhs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(n: usize, h: f64) -> Vec<f64> {
        (0..n).map(|k| k as f64 * h).collect()
    }

    fn test1(x: f64, y: f64) -> f64 {
        (x - y) / 2.
    }

    fn test2(x: f64, y: f64) -> f64 {
        -2. * x - y
    }

    fn test3(x: f64, y: f64) -> f64 {
        (5. * x * x - y) / (x + y).exp()
    }

    #[test]
    fn test_integrate_test1() {
        let out = runge_kutta(&uniform(3, 0.1), 0.1, 1., test1).unwrap();
        assert_eq!(out.len(), 3);
        assert!((out.values()[1] - 0.95369).abs() < 1.0E-5);
        assert!((out.values()[2] - 0.91451).abs() < 1.0E-5);
    }

    #[test]
    fn test_integrate_test2() {
        let out = runge_kutta(&uniform(6, 0.1), 0.1, -1., test2).unwrap();
        assert!((out.values()[3] + 0.82246).abs() < 1.0E-5);
        assert!((out.values()[5] + 0.81959).abs() < 1.0E-5);
    }

    #[test]
    fn test_integrate_test3() {
        let out = runge_kutta(&uniform(11, 0.1), 0.1, 1., test3).unwrap();
        assert!((out.values()[5] - 0.913059839).abs() < 1.0E-9);
        assert!((out.values()[8] - 0.9838057659).abs() < 1.0E-9);
        assert!((out.values()[10] - 1.0715783953).abs() < 1.0E-9);
    }

    #[test]
    fn test_lookahead_step_is_dropped() {
        let out = runge_kutta(&uniform(4, 0.1), 0.1, 1., test1).unwrap();
        assert_eq!(out.len(), 4);
        assert_eq!(out.stats().accepted_steps, 4);
        assert_eq!(out.stats().num_eval, 16);
    }

    #[test]
    fn test_lab_values() {
        let grid = Grid::build(10).unwrap();
        let out = runge_kutta(grid.points(), grid.step_size(), 0.1, |x, y| {
            30. * y * (x - 0.2) * (x - 0.7)
        })
        .unwrap();
        assert_eq!(out.values()[1], 0.1320125469364999);
        assert_eq!(out.values()[9], 0.17191359878779672);
    }
}
