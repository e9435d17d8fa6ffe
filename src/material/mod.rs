//! Implements uniaxial material models
//!
//! All models follow the trial/commit protocol:
//!
//! 1. `set_trial_strain` computes the trial stress and tangent from the last committed state
//! 2. `commit_state` makes the trial state permanent (converged step)
//! 3. `revert_to_last_commit` discards the trial state (failed or restarted iterations)
//! 4. `revert_to_start` brings the model back to its virgin state

mod elastic;
mod elastic_pp;
mod hardening;
mod steel01;
mod uniaxial;
pub use crate::material::elastic::*;
pub use crate::material::elastic_pp::*;
pub use crate::material::hardening::*;
pub use crate::material::steel01::*;
pub use crate::material::uniaxial::*;
