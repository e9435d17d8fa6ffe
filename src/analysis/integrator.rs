use super::AnalysisModel;
use crate::domain::Domain;
use crate::soe::LinearSoe;
use crate::StrError;

/// Defines the operations of an integrator
///
/// The integrator decides which matrix forms the tangent (stiffness or effective
/// dynamic stiffness), which vector forms the unbalance, and how the solution of
/// the linear system updates the trial responses of the domain.
pub trait IntegratorTrait {
    /// Assembles the tangent matrix; `initial` selects the initial stiffness instead of the current one
    fn form_tangent(
        &mut self,
        model: &AnalysisModel,
        domain: &mut Domain,
        soe: &mut dyn LinearSoe,
        initial: bool,
    ) -> Result<(), StrError>;

    /// Assembles the unbalanced force vector
    fn form_unbalance(
        &mut self,
        model: &AnalysisModel,
        domain: &mut Domain,
        soe: &mut dyn LinearSoe,
    ) -> Result<(), StrError>;

    /// Updates the trial responses using the solution x of the linear system
    fn update(&mut self, model: &AnalysisModel, domain: &mut Domain, soe: &mut dyn LinearSoe) -> Result<(), StrError>;

    /// Makes the trial state permanent
    fn commit(&mut self, model: &AnalysisModel, domain: &mut Domain) -> Result<(), StrError> {
        let _ = model;
        domain.commit();
        Ok(())
    }
}

/// Defines the operations of integrators for static analyses
pub trait StaticIntegratorTrait: IntegratorTrait {
    /// Prepares a new step (load factor increment and predictor)
    fn new_step(&mut self, model: &AnalysisModel, domain: &mut Domain, soe: &mut dyn LinearSoe) -> Result<(), StrError>;

    /// Returns the increment of the load factor in the current step
    fn dlambda(&self) -> f64;
}

/// Defines the operations of integrators for transient analyses
pub trait TransientIntegratorTrait: IntegratorTrait {
    /// Prepares a new step with time increment dt (predictor)
    fn new_step(&mut self, model: &AnalysisModel, domain: &mut Domain, dt: f64) -> Result<(), StrError>;
}
