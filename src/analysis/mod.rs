//! Implements the analysis layer: numbering, constraint handling, integrators, algorithms, and drivers

mod algorithm;
mod analysis_model;
mod displacement_control;
mod eigen_analysis;
mod integrator;
mod load_control;
mod newmark;
mod numberer;
mod static_analysis;
mod transient_analysis;
pub use crate::analysis::algorithm::*;
pub use crate::analysis::analysis_model::*;
pub use crate::analysis::convergence_test::*;
pub use crate::analysis::displacement_control::*;
pub use crate::analysis::eigen_analysis::*;
pub use crate::analysis::integrator::*;
pub use crate::analysis::load_control::*;
pub use crate::analysis::newmark::*;
pub use crate::analysis::numberer::*;
pub use crate::analysis::static_analysis::*;
pub use crate::analysis::transient_analysis::*;
