//! Structural finite element analysis
//!
//! This crate assembles and solves the systems of equations of structural models
//! (nodes, elements, materials, loads, and constraints) under static, transient
//! (dynamic), and eigenvalue (modal) analyses.
//!
//! The main components are:
//!
//! * [base] -- configuration, enums, parameters, and assembly helpers
//! * [material] -- uniaxial materials following the trial/commit state protocol
//! * [element] -- structural elements (trusses, beams, springs)
//! * [domain] -- nodes, elements, constraints, load patterns, and recorders
//! * [soe] -- linear and eigenvalue systems of equations with their solvers
//! * [analysis] -- numbering, constraint handling, integrators, algorithms, and drivers
//! * [io] -- JSON description of models and analyses

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod analysis;
pub mod base;
pub mod domain;
pub mod element;
pub mod io;
pub mod material;
pub mod prelude;
pub mod soe;
