//! Ordered registry of the methods taking part in a comparison.

use crate::adams::AdamsBashforth2;
use crate::euler::{EulerRecount, ExplicitEuler, TwoStageEuler};
use crate::midpoint::Cauchy;
use crate::rk4::Rk4;
use crate::step_shared::Integrator;
use crate::taylor::{Taylor3, Taylor4};

use std::fmt;

/// Label of the reference series.
pub const REFERENCE_LABEL: &str = "Original";
/// Rendering style of the reference series.
pub const REFERENCE_STYLE: &str = "b*-";

/// Pairs an integrator with its display label and an opaque rendering style tag.
#[derive(Clone, Copy)]
pub struct MethodDescriptor {
    pub label: &'static str,
    pub style: &'static str,
    pub integrator: &'static (dyn Integrator + Sync),
}

impl fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("label", &self.label)
            .field("style", &self.style)
            .field("integrator", &self.integrator.name())
            .finish()
    }
}

/// Every method, in plotting order.
///
/// "Implicit Euler" is the label of the explicit two-stage predictor-corrector
/// [`TwoStageEuler`].
pub static METHODS: [MethodDescriptor; 8] = [
    MethodDescriptor {
        label: "Taylor 3rd",
        style: "g^-",
        integrator: &Taylor3,
    },
    MethodDescriptor {
        label: "Taylor 4th",
        style: "gs-",
        integrator: &Taylor4,
    },
    MethodDescriptor {
        label: "Runge-Kutta 4th",
        style: "yd-",
        integrator: &Rk4,
    },
    MethodDescriptor {
        label: "Extra Adams (k=2)",
        style: "ko-",
        integrator: &AdamsBashforth2,
    },
    MethodDescriptor {
        label: "Cauchy",
        style: "b8-",
        integrator: &Cauchy,
    },
    MethodDescriptor {
        label: "Implicit Euler",
        style: "r--",
        integrator: &TwoStageEuler,
    },
    MethodDescriptor {
        label: "Explicit Euler",
        style: "r8-",
        integrator: &ExplicitEuler,
    },
    MethodDescriptor {
        label: "Euler with recount",
        style: "rs-",
        integrator: &EulerRecount,
    },
];

/// Looks up a method by its display label.
pub fn find_method(label: &str) -> Option<&'static MethodDescriptor> {
    METHODS.iter().find(|m| m.label == label)
}
