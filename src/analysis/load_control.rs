use super::{AnalysisModel, IntegratorTrait, StaticIntegratorTrait};
use crate::domain::Domain;
use crate::soe::LinearSoe;
use crate::StrError;

/// Implements the load control integrator
///
/// The load factor λ (the pseudo-time of the domain) is incremented by `dlambda`
/// in each step and the displacements are the unknowns.
pub struct LoadControl {
    dlambda: f64,
}

impl LoadControl {
    /// Allocates a new instance
    pub fn new(dlambda: f64) -> Result<Self, StrError> {
        if dlambda == 0.0 || !dlambda.is_finite() {
            return Err("dlambda must be finite and non-zero");
        }
        Ok(LoadControl { dlambda })
    }
}

impl IntegratorTrait for LoadControl {
    fn form_tangent(
        &mut self,
        model: &AnalysisModel,
        domain: &mut Domain,
        soe: &mut dyn LinearSoe,
        initial: bool,
    ) -> Result<(), StrError> {
        if initial {
            model.assemble_matrix(domain, soe, 0.0, 1.0, 0.0)
        } else {
            model.assemble_matrix(domain, soe, 1.0, 0.0, 0.0)
        }
    }

    fn form_unbalance(
        &mut self,
        model: &AnalysisModel,
        domain: &mut Domain,
        soe: &mut dyn LinearSoe,
    ) -> Result<(), StrError> {
        model.assemble_unbalance(domain, soe)
    }

    fn update(&mut self, model: &AnalysisModel, domain: &mut Domain, soe: &mut dyn LinearSoe) -> Result<(), StrError> {
        model.scatter_increment(domain, soe.x(), 1.0);
        domain.update()
    }
}

impl StaticIntegratorTrait for LoadControl {
    fn new_step(&mut self, _model: &AnalysisModel, domain: &mut Domain, _soe: &mut dyn LinearSoe) -> Result<(), StrError> {
        domain.apply_loads(domain.time + self.dlambda)
    }

    fn dlambda(&self) -> f64 {
        self.dlambda
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
