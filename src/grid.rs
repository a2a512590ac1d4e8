//! Evenly spaced sample points over [0, 1] and the fixed step size.

use crate::step_shared::IntegrationError;

use serde::Serialize;

/// Sample points shared by every integrator of a comparison run.
///
/// The step size is `1 / (n + 1)` and is deliberately not the spacing of the sample points,
/// which is `1 / (n - 1)`. Methods advance by `step_size` while their values are reported at
/// the sample points.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Grid {
    points: Vec<f64>,
    step_size: f64,
}

impl Grid {
    /// Builds a grid of `n` points over the closed interval [0, 1].
    ///
    /// # Arguments
    ///
    /// * `n`   - Number of sample points, at least 1
    ///
    pub fn build(n: usize) -> Result<Self, IntegrationError> {
        if n < 1 {
            return Err(IntegrationError::InvalidPointCount { n });
        }
        let count = n as f64;
        if count + 1.0 == count {
            return Err(IntegrationError::DegenerateSpacing { n });
        }

        Ok(Grid {
            points: linspace(0.0, 1.0, n),
            step_size: 1.0 / (count + 1.0),
        })
    }

    /// Getter for the sample points.
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Getter for the fixed step size.
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

// A single point sits on `start`. Otherwise the last point is pinned to `end`.
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![start];
    }
    let spacing = (end - start) / (n - 1) as f64;
    let mut points: Vec<f64> = (0..n).map(|k| k as f64 * spacing + start).collect();
    points[n - 1] = end;
    points
}
