use super::{AnalysisModel, IntegratorTrait, StaticIntegratorTrait};
use crate::base::Dof;
use crate::domain::Domain;
use crate::soe::LinearSoe;
use crate::StrError;
use russell_lab::Vector;

/// Implements the displacement control integrator
///
/// The displacement of one DOF is incremented by a prescribed value in each step
/// and the load factor λ becomes an unknown. With the reference load P̂ = ∂P/∂λ,
/// each correction of the iterations is
///
/// ```text
/// δu = δuᴿ + δλ δuᴾ    with    K δuᴿ = R,   K δuᴾ = P̂,   δλ = -δuᴿ[c] / δuᴾ[c]
/// ```
///
/// such that the controlled component c of the correction is zero. The load
/// patterns must vary linearly with λ.
pub struct DisplacementControl {
    node: usize,
    index: usize,
    equation: usize,
    increment: f64,
    dlambda: f64,
    ref_load: Vector,
    du_ref: Vector,
}

impl DisplacementControl {
    /// Allocates a new instance
    pub fn new(
        model: &AnalysisModel,
        domain: &Domain,
        node: usize,
        dof: Dof,
        increment: f64,
    ) -> Result<Self, StrError> {
        if increment == 0.0 || !increment.is_finite() {
            return Err("the displacement increment must be finite and non-zero");
        }
        let ndf = domain.nodes.get(node).ok_or("the node of DisplacementControl does not exist")?.ndf;
        let index = dof
            .index(domain.ndim, ndf)
            .ok_or("the DOF of DisplacementControl is not available at the node")?;
        let equation = model
            .equation(node, index)
            .ok_or("the DOF of DisplacementControl must not be constrained")?;
        Ok(DisplacementControl {
            node,
            index,
            equation,
            increment,
            dlambda: 0.0,
            ref_load: Vector::new(model.n_equation),
            du_ref: Vector::new(model.n_equation),
        })
    }

    /// Returns the current trial displacement of the controlled DOF
    pub fn controlled_displacement(&self, domain: &Domain) -> f64 {
        domain.nodes[self.node].trial_disp[self.index]
    }

    /// Solves K δuᴾ = P̂ with the current (factorized) tangent
    fn solve_reference(&mut self, soe: &mut dyn LinearSoe) -> Result<f64, StrError> {
        soe.set_b(&self.ref_load)?;
        soe.solve()?;
        for i in 0..self.du_ref.dim() {
            self.du_ref[i] = soe.x()[i];
        }
        let du_c = self.du_ref[self.equation];
        if f64::abs(du_c) < f64::EPSILON * f64::max(1.0, f64::abs(self.increment)) {
            return Err("the controlled DOF does not respond to the reference load");
        }
        Ok(du_c)
    }
}

impl IntegratorTrait for DisplacementControl {
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
        let du_r = soe.x().clone();
        let du_c = self.solve_reference(soe)?;
        let dl = -du_r[self.equation] / du_c;
        let x = soe.x_mut();
        for i in 0..x.dim() {
            x[i] = du_r[i] + dl * self.du_ref[i];
        }
        self.dlambda += dl;
        model.scatter_increment(domain, soe.x(), 1.0);
        domain.apply_loads(domain.trial_time + dl)?;
        domain.update()
    }
}

impl StaticIntegratorTrait for DisplacementControl {
    fn new_step(&mut self, model: &AnalysisModel, domain: &mut Domain, soe: &mut dyn LinearSoe) -> Result<(), StrError> {
        // reference load P̂ = P(λ + 1) - P(λ) at the committed state
        let lambda = domain.time;
        domain.apply_loads(lambda + 1.0)?;
        model.assemble_unbalance(domain, soe)?;
        for i in 0..self.ref_load.dim() {
            self.ref_load[i] = soe.b()[i];
        }
        domain.apply_loads(lambda)?;
        model.assemble_unbalance(domain, soe)?;
        for i in 0..self.ref_load.dim() {
            self.ref_load[i] -= soe.b()[i];
        }

        // predictor
        self.form_tangent(model, domain, soe, false)?;
        let du_c = self.solve_reference(soe)?;
        let dl = self.increment / du_c;
        self.dlambda = dl;
        model.scatter_increment(domain, &self.du_ref, dl);
        domain.apply_loads(lambda + dl)?;
        domain.update()
    }

    fn dlambda(&self) -> f64 {
        self.dlambda
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
