//! Taylor series methods built from the partial derivatives of the right-hand side.
//!
//! With all terms evaluated at `(x_k, y_k)` and `f' = df_x + df_y * f`, the steps are
//!
//! ```text
//! order 3:  y_{k+1} = y_k + h f + h^2 / 2 f'
//! order 4:  y_{k+1} = y_k + h f + h^2 / 2 f' + h^3 / 3 (df_xx + 2 f df_xy + df_yy f^2 + df_y f')
//! ```

use crate::grid::Grid;
use crate::problem::{Partial, Problem};
use crate::step_shared::*;

/// Taylor series method using the first total derivative of `f`.
pub fn taylor_3<F, Dx, Dy>(
    xs: &[f64],
    h: f64,
    y0: f64,
    f: F,
    df_x: Dx,
    df_y: Dy,
) -> Result<Approximation, IntegrationError>
where
    F: Fn(f64, f64) -> f64,
    Dx: Fn(f64, f64) -> f64,
    Dy: Fn(f64, f64) -> f64,
{
    check_points(xs)?;
    let mut evaluator = Evaluator::new();
    let mut ys = Vec::with_capacity(xs.len() + 1);
    ys.push(y0);
    for (k, &x) in xs.iter().enumerate() {
        let y = ys[k];
        let slope = evaluator.eval("f", &f, k, x, y)?;
        let fx = evaluator.eval(Partial::X.name(), &df_x, k, x, y)?;
        let fy = evaluator.eval(Partial::Y.name(), &df_y, k, x, y)?;
        let next_y = y + slope * h + (fx + fy * slope) * h.powf(2.0) / 2.0;
        ys.push(evaluator.step_taken(k, x, next_y)?);
    }
    Ok(evaluator.finish(truncate_to_grid(ys, xs.len())))
}

/// Taylor series method adding the second total derivative of `f`.
#[allow(clippy::too_many_arguments)]
pub fn taylor_4<F, Dx, Dy, Dxx, Dyy, Dxy>(
    xs: &[f64],
    h: f64,
    y0: f64,
    f: F,
    df_x: Dx,
    df_y: Dy,
    df_xx: Dxx,
    df_yy: Dyy,
    df_xy: Dxy,
) -> Result<Approximation, IntegrationError>
where
    F: Fn(f64, f64) -> f64,
    Dx: Fn(f64, f64) -> f64,
    Dy: Fn(f64, f64) -> f64,
    Dxx: Fn(f64, f64) -> f64,
    Dyy: Fn(f64, f64) -> f64,
    Dxy: Fn(f64, f64) -> f64,
{
    check_points(xs)?;
    let mut evaluator = Evaluator::new();
    let mut ys = Vec::with_capacity(xs.len() + 1);
    ys.push(y0);
    for (k, &x) in xs.iter().enumerate() {
        let y = ys[k];
        let slope = evaluator.eval("f", &f, k, x, y)?;
        let fx = evaluator.eval(Partial::X.name(), &df_x, k, x, y)?;
        let fy = evaluator.eval(Partial::Y.name(), &df_y, k, x, y)?;
        let fxx = evaluator.eval(Partial::XX.name(), &df_xx, k, x, y)?;
        let fyy = evaluator.eval(Partial::YY.name(), &df_yy, k, x, y)?;
        let fxy = evaluator.eval(Partial::XY.name(), &df_xy, k, x, y)?;

        let second_summand = slope * h;
        let third_summand = (fx + fy * slope) * h.powf(2.0) / 2.0;
        let fourth_summand = (fxx + 2.0 * slope * fxy + fyy * slope.powf(2.0) + fy * (fx + fy * slope))
            * h.powf(3.0)
            / 3.0;
        let next_y = y + second_summand + third_summand + fourth_summand;
        ys.push(evaluator.step_taken(k, x, next_y)?);
    }
    Ok(evaluator.finish(truncate_to_grid(ys, xs.len())))
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Taylor3;

impl Integrator for Taylor3 {
    fn name(&self) -> &'static str {
        "Taylor 3"
    }

    fn order(&self) -> u32 {
        3
    }

    fn required_partials(&self) -> &'static [Partial] {
        &[Partial::X, Partial::Y]
    }

    fn integrate(&self, grid: &Grid, problem: &Problem) -> Result<Approximation, IntegrationError> {
        let method = self.name();
        taylor_3(
            grid.points(),
            grid.step_size(),
            problem.y0(),
            problem.rhs(),
            problem.require(Partial::X, method)?,
            problem.require(Partial::Y, method)?,
        )
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Taylor4;

impl Integrator for Taylor4 {
    fn name(&self) -> &'static str {
        "Taylor 4"
    }

    fn order(&self) -> u32 {
        4
    }

    fn required_partials(&self) -> &'static [Partial] {
        &Partial::ALL
    }

    fn integrate(&self, grid: &Grid, problem: &Problem) -> Result<Approximation, IntegrationError> {
        let method = self.name();
        taylor_4(
            grid.points(),
            grid.step_size(),
            problem.y0(),
            problem.rhs(),
            problem.require(Partial::X, method)?,
            problem.require(Partial::Y, method)?,
            problem.require(Partial::XX, method)?,
            problem.require(Partial::YY, method)?,
            problem.require(Partial::XY, method)?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lab_problem() -> Problem {
        Problem::new(0.1, |x, y| 30. * y * (x - 0.2) * (x - 0.7))
            .with_partial(Partial::X, |x, y| y * (60. * x - 27.))
            .with_partial(Partial::Y, |x, _y| 30. * (x - 0.7) * (x - 0.2))
            .with_partial(Partial::XX, |_x, y| y * 60.)
            .with_partial(Partial::YY, |_x, _y| 0.)
            .with_partial(Partial::XY, |x, _y| 60. * x - 27.)
    }

    #[test]
    fn test_taylor_3_lab_values() {
        let grid = Grid::build(10).unwrap();
        let out = Taylor3.integrate(&grid, &lab_problem()).unwrap();
        assert_eq!(out.len(), 10);
        assert_eq!(out.values()[1], 0.13431404958677687);
        assert_eq!(out.values()[9], 0.15719035865257674);
        assert_eq!(out.stats().num_eval, 30);
    }

    #[test]
    fn test_taylor_4_lab_values() {
        let grid = Grid::build(10).unwrap();
        let out = Taylor4.integrate(&grid, &lab_problem()).unwrap();
        assert_eq!(out.len(), 10);
        assert_eq!(out.values()[1], 0.12915221637866267);
        assert_eq!(out.values()[9], 0.17893414099527066);
        assert_eq!(out.stats().num_eval, 60);
    }

    #[test]
    fn test_taylor_4_two_points() {
        // h = 1/3 where the cubic term is sensitive to how h^3 is rounded.
        let grid = Grid::build(2).unwrap();
        let out = Taylor4.integrate(&grid, &lab_problem()).unwrap();
        assert_eq!(out.values(), &[0.1, -0.06645925925925919]);
    }

    #[test]
    fn test_taylor_3_exact_for_quadratic_solution() {
        // y' = 2x + 1 has a quadratic solution, which a second-order expansion reproduces.
        let h = 0.1;
        let xs: Vec<f64> = (0..11).map(|k| k as f64 * h).collect();
        let out = taylor_3(&xs, h, 0.0, |x, _y| 2. * x + 1., |_x, _y| 2., |_x, _y| 0.).unwrap();
        for (x, y) in xs.iter().zip(out.values()) {
            assert!((y - (x * x + x)).abs() < 1.0E-12);
        }
    }

    #[test]
    fn test_missing_partial() {
        let grid = Grid::build(4).unwrap();
        let problem = Problem::new(1.0, |_x, y| y).with_partial(Partial::X, |_x, _y| 0.);
        let err = Taylor3.integrate(&grid, &problem).unwrap_err();
        assert!(matches!(
            err,
            IntegrationError::MissingDerivative {
                partial: Partial::Y,
                ..
            }
        ));
    }

    #[test]
    fn test_derivative_domain_error_names_the_derivative() {
        let xs = [0.0, 0.5, 1.0];
        let err = taylor_3(&xs, 0.5, 1.0, |_x, y| y, |x, _y| 1. / x, |_x, _y| 1.).unwrap_err();
        match err {
            IntegrationError::NumericDomain { function, index, .. } => {
                assert_eq!(function, "df_x");
                assert_eq!(index, 0);
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
