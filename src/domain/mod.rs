//! Implements the structural model (nodes, elements, constraints, loads, and recorders)

mod domain;
mod domain_state;
mod load_pattern;
mod node;
mod recorder;
mod sp_constraint;
mod time_series;
pub use crate::domain::domain::*;
pub use crate::domain::domain_state::*;
pub use crate::domain::load_pattern::*;
pub use crate::domain::node::*;
pub use crate::domain::recorder::*;
pub use crate::domain::sp_constraint::*;
pub use crate::domain::time_series::*;
