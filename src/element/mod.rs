//! Implements structural elements
//!
//! All elements implement [ElementTrait], which follows the same trial/commit protocol as the
//! uniaxial materials. The [GenericElement] wraps the actual implementation and holds the local
//! vectors and matrices needed during the assembly.

mod corot_truss;
mod elastic_beam_2d;
mod element_trait;
mod generic_element;
mod truss;
mod zero_length;
pub use crate::element::corot_truss::*;
pub use crate::element::elastic_beam_2d::*;
pub use crate::element::element_trait::*;
pub use crate::element::generic_element::*;
pub use crate::element::truss::*;
pub use crate::element::zero_length::*;
