//! Implements the base structures for a structural analysis

mod assembly;
mod config;
mod control;
mod enums;
mod parameters;
mod samples;
pub use crate::base::assembly::*;
pub use crate::base::config::*;
pub use crate::base::control::*;
pub use crate::base::enums::*;
pub use crate::base::parameters::*;
pub use crate::base::samples::*;
