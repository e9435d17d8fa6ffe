//! Implements the systems of equations (linear and eigenvalue problems) and their solvers

mod band_arpack;
mod band_matrix;
mod band_spd;
mod dof_graph;
mod eigen_soe;
mod full_gen;
mod full_gen_eigen;
mod linear_soe;
mod profile_spd;
mod sparse_gen;
mod sym_band_eigen;
pub use crate::soe::band_arpack::*;
pub use crate::soe::band_matrix::*;
pub use crate::soe::band_spd::*;
pub use crate::soe::dof_graph::*;
pub use crate::soe::eigen_soe::*;
pub use crate::soe::full_gen::*;
pub use crate::soe::full_gen_eigen::*;
pub use crate::soe::linear_soe::*;
pub use crate::soe::profile_spd::*;
pub use crate::soe::sparse_gen::*;
pub use crate::soe::sym_band_eigen::*;
