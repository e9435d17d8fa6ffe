use super::TestKind;
use serde::{Deserialize, Serialize};

/// Defines the smallest allowed tolerance (Control)
pub const CONTROL_MIN_TOL: f64 = 1e-15;

/// Holds the options to control the iterations of each analysis step
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct Control {
    /// Convergence criterion
    pub test: TestKind,

    /// Tolerance for the convergence criterion
    pub tol: f64,

    /// Maximum number of iterations
    pub n_max_iterations: usize,

    /// Verbose mode during steps
    pub verbose_steps: bool,

    /// Verbose mode during iterations
    pub verbose_iterations: bool,
}

impl Control {
    /// Allocates a new instance with default values
    pub fn new() -> Self {
        Control {
            test: TestKind::NormUnbalance,
            tol: 1e-8,
            n_max_iterations: 20,
            verbose_steps: false,
            verbose_iterations: false,
        }
    }

    /// Validates all data
    ///
    /// Returns a message with the inconsistent data, or returns None if everything is all right.
    pub fn validate(&self) -> Option<String> {
        if self.tol < CONTROL_MIN_TOL {
            return Some(format!(
                "tol = {:?} is incorrect; it must be ≥ {:e}",
                self.tol, CONTROL_MIN_TOL
            ));
        }
        if self.n_max_iterations < 1 {
            return Some(format!(
                "n_max_iterations = {} is incorrect; it must be ≥ 1",
                self.n_max_iterations
            ));
        }
        None // all good
    }

    /// Prints the header of the table with step and iteration data
    #[inline]
    pub fn print_header(&self) {
        if self.verbose_steps || self.verbose_iterations {
            println!("Legend:");
            println!("✅ : converged");
            println!("👍 : converging");
            println!("🥵 : diverging");
            println!("😱 : found NaN or Inf\n");
            println!(
                "{:>8} {:>13} {:>13} {:>5} {:>9}   {:>8}  ",
                "step", "t or λ", "Δt or Δλ", "iter", "norm", "tol"
            );
        }
    }

    /// Prints step data
    #[inline]
    #[rustfmt::skip]
    pub fn print_step(&self, step: usize, t: f64, dt: f64) {
        if !self.verbose_steps {
            return;
        }
        println!(
            "{:>8} {:>13.6e} {:>13.6e} {:>5} {:>9}   {:>8}  ",
            step + 1, t, dt, ".", ".", "."
        );
    }

    /// Prints iteration data
    #[inline]
    pub fn print_iteration(&self, it: usize, norm: f64, norm_prev: f64) {
        if !self.verbose_iterations {
            return;
        }
        let l = if !norm.is_finite() {
            "😱" // found NaN or Inf
        } else if norm < self.tol {
            "✅" // converged
        } else if it == 0 {
            "  " // first iteration
        } else if norm > norm_prev {
            "🥵" // diverging
        } else {
            "👍" // converging
        };
        println!(
            "{:>8} {:>13} {:>13} {:>5} {:>9.2e}{} {:>8.2e}  ",
            ".",
            ".",
            ".",
            it + 1,
            norm,
            l,
            self.tol
        );
    }
}

impl Default for Control {
    fn default() -> Self {
        Control::new()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
