use super::{Algorithm, ConstraintHandler, Control, EigenSolverKind, LinearSystemKind, Numberer};
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Holds the configuration of an analysis
///
/// The configuration selects the components assembled by the analysis drivers
/// (constraint handler, numberer, system of equations, eigen solver, and algorithm)
/// and holds the control of iterations.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Enforcement of single-point constraints
    pub handler: ConstraintHandler,

    /// DOF (equation) numbering scheme
    pub numberer: Numberer,

    /// Storage scheme and solver of the linear system
    pub system: LinearSystemKind,

    /// Storage scheme and solver of the eigenvalue problem
    pub eigen_solver: EigenSolverKind,

    /// Solution algorithm
    pub algorithm: Algorithm,

    /// Control of iterations
    pub control: Control,

    /// Shift σ used by the shift-invert eigen solver
    pub eigen_shift: f64,

    /// Relative tolerance of the Ritz values in the shift-invert eigen solver
    pub eigen_tol: f64,

    /// Maximum number of restarts of the shift-invert eigen solver
    pub eigen_max_restarts: usize,
}

impl Config {
    /// Allocates a new instance with default values
    pub fn new() -> Self {
        Config {
            handler: ConstraintHandler::Plain,
            numberer: Numberer::Plain,
            system: LinearSystemKind::BandSpd,
            eigen_solver: EigenSolverKind::BandArpack,
            algorithm: Algorithm::NewtonRaphson,
            control: Control::new(),
            eigen_shift: 0.0,
            eigen_tol: 1e-12,
            eigen_max_restarts: 100,
        }
    }

    /// Sets the constraint handler
    pub fn set_handler(&mut self, handler: ConstraintHandler) -> Result<&mut Self, StrError> {
        if let ConstraintHandler::Penalty { alpha } = handler {
            if alpha <= 0.0 {
                return Err("penalty factor must be > 0.0");
            }
        }
        self.handler = handler;
        Ok(self)
    }

    /// Sets the numberer
    pub fn set_numberer(&mut self, numberer: Numberer) -> Result<&mut Self, StrError> {
        self.numberer = numberer;
        Ok(self)
    }

    /// Sets the linear system of equations
    pub fn set_system(&mut self, system: LinearSystemKind) -> Result<&mut Self, StrError> {
        self.system = system;
        Ok(self)
    }

    /// Sets the eigen solver
    pub fn set_eigen_solver(&mut self, eigen_solver: EigenSolverKind) -> Result<&mut Self, StrError> {
        self.eigen_solver = eigen_solver;
        Ok(self)
    }

    /// Sets the solution algorithm
    pub fn set_algorithm(&mut self, algorithm: Algorithm) -> Result<&mut Self, StrError> {
        self.algorithm = algorithm;
        Ok(self)
    }

    /// Sets the control of iterations
    pub fn set_control(&mut self, control: Control) -> Result<&mut Self, StrError> {
        if control.validate().is_some() {
            return Err("cannot set control because control.validate() failed");
        }
        self.control = control;
        Ok(self)
    }

    /// Sets the shift σ of the shift-invert eigen solver
    pub fn set_eigen_shift(&mut self, value: f64) -> Result<&mut Self, StrError> {
        if !value.is_finite() {
            return Err("eigen shift must be finite");
        }
        self.eigen_shift = value;
        Ok(self)
    }

    /// Validates all data
    ///
    /// Returns a message with the inconsistent data, or returns None if everything is all right.
    pub fn validate(&self) -> Option<String> {
        if let ConstraintHandler::Penalty { alpha } = self.handler {
            if alpha <= 0.0 {
                return Some(format!("penalty alpha = {:?} is incorrect; it must be > 0.0", alpha));
            }
        }
        if self.eigen_tol <= 0.0 {
            return Some(format!(
                "eigen_tol = {:?} is incorrect; it must be > 0.0",
                self.eigen_tol
            ));
        }
        if self.eigen_max_restarts < 1 {
            return Some(format!(
                "eigen_max_restarts = {} is incorrect; it must be ≥ 1",
                self.eigen_max_restarts
            ));
        }
        self.control.validate()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration data\n")?;
        write!(f, "==================\n")?;
        write!(f, "handler = {:?}\n", self.handler)?;
        write!(f, "numberer = {:?}\n", self.numberer)?;
        write!(f, "system = {:?}\n", self.system)?;
        write!(f, "eigen_solver = {:?}\n", self.eigen_solver)?;
        write!(f, "algorithm = {:?}\n", self.algorithm)?;
        write!(f, "control = {:?}\n", self.control)?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
