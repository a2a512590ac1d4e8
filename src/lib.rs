//! # Fixed-step ODE methods
//! `fixed_step_odes` is a collection of fixed-step numerical methods for the scalar initial value
//! problem y' = f(x, y), y(0) = y0 on [0, 1], together with a driver comparing them against the
//! closed-form solution.

// Declare modules
pub mod adams;
pub mod catalog;
pub mod comparison;
pub mod euler;
pub mod grid;
pub mod midpoint;
pub mod problem;
pub mod rk4;
pub mod step_shared;
pub mod taylor;

pub use adams::{extrapolation_adams, AdamsBashforth2};
pub use catalog::{find_method, MethodDescriptor, METHODS, REFERENCE_LABEL, REFERENCE_STYLE};
pub use comparison::{Comparison, Curve, ErrorSummary, FailurePolicy, MethodFailure, Report};
pub use euler::{
    euler_with_recount, explicit_euler, two_stage_euler, EulerRecount, ExplicitEuler, TwoStageEuler,
};
pub use grid::Grid;
pub use midpoint::{cauchy, Cauchy};
pub use problem::{Partial, Problem, ScalarField, Solution};
pub use rk4::{runge_kutta, Rk4};
pub use step_shared::{Approximation, IntegrationError, Integrator, Stats};
pub use taylor::{taylor_3, taylor_4, Taylor3, Taylor4};
