use super::{AnalysisModel, ConvergenceTest, IntegratorTrait};
use crate::base::{Algorithm, Control};
use crate::domain::Domain;
use crate::soe::LinearSoe;
use crate::StrError;

/// Solves the nonlinear equations of one step
///
/// The integrator must have prepared the step (`new_step`) before `solve_step` is called.
pub struct SolutionAlgorithm {
    /// Holds the kind of algorithm
    pub kind: Algorithm,

    /// Holds the convergence test
    pub test: ConvergenceTest,
}

impl SolutionAlgorithm {
    /// Allocates a new instance
    pub fn new(kind: Algorithm, control: &Control) -> Result<Self, StrError> {
        Ok(SolutionAlgorithm {
            kind,
            test: ConvergenceTest::new(control)?,
        })
    }

    /// Solves the current step and returns the number of iterations
    ///
    /// The `Linear` algorithm solves the linear system once and does not check convergence.
    pub fn solve_step<I>(
        &mut self,
        model: &AnalysisModel,
        domain: &mut Domain,
        integrator: &mut I,
        soe: &mut dyn LinearSoe,
    ) -> Result<usize, StrError>
    where
        I: IntegratorTrait + ?Sized,
    {
        if self.kind == Algorithm::Linear {
            integrator.form_tangent(model, domain, soe, false)?;
            integrator.form_unbalance(model, domain, soe)?;
            soe.solve()?;
            integrator.update(model, domain, soe)?;
            return Ok(1);
        }
        self.test.start();
        integrator.form_unbalance(model, domain, soe)?;
        for it in 0..self.test.n_max_iterations() {
            match self.kind {
                Algorithm::ModifiedNewton { initial } => {
                    if it == 0 {
                        integrator.form_tangent(model, domain, soe, initial)?;
                    }
                }
                _ => integrator.form_tangent(model, domain, soe, false)?,
            }
            soe.solve()?;
            integrator.update(model, domain, soe)?;
            integrator.form_unbalance(model, domain, soe)?;
            if self.test.check(it, soe)? {
                return Ok(it + 1);
            }
        }
        Err("the iterations did not converge")
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
