//! Makes available common structures needed to run an analysis
//!
//! You may write `use sesim::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::analysis::{EigenAnalysis, StaticAnalysis, TransientAnalysis};
pub use crate::base::{Algorithm, Config, ConstraintHandler, Control, Dof, EigenSolverKind, LinearSystemKind, Numberer};
pub use crate::base::{ElementLoad, MassType, StaticIntegrator, TestKind, Transformation, TransientIntegrator};
pub use crate::base::{ParamBeam2d, ParamElement, ParamTruss, ParamUniaxial, ParamZeroLength, SampleParams};
pub use crate::domain::{Domain, DomainState, ElementalLoad, LoadPattern, NodalLoad, NodalResponse, Rayleigh};
pub use crate::domain::{Recorder, Recording, SpConstraint, TimeSeries};
pub use crate::io::{AnalysisInput, ModelInput, ModelOutput};
