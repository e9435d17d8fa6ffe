//! Implements the JSON description of models and analyses and the output of results

mod model_input;
mod model_output;
pub use crate::io::model_input::*;
pub use crate::io::model_output::*;
