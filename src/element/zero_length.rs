use super::ElementTrait;
use crate::base::ParamZeroLength;
use crate::material::Uniaxial;
use crate::StrError;
use russell_lab::{Matrix, Vector};

/// Implements a zero-length spring connecting two (usually coincident) nodes along one DOF
///
/// The deformation is the relative displacement `δ = u₁[i] - u₀[i]`, where `i` is the position
/// of the chosen DOF within the node. The material relates force and deformation.
pub struct ZeroLength {
    nodes: Vec<usize>,
    ndf: usize,
    index: usize,
    material: Uniaxial,
}

impl ZeroLength {
    /// Allocates a new instance
    pub fn new(nodes: &[usize], ndim: usize, ndf: usize, param: &ParamZeroLength) -> Result<Self, StrError> {
        if nodes.len() != 2 {
            return Err("number of nodes for ZeroLength must be 2");
        }
        let index = match param.dof.index(ndim, ndf) {
            Some(i) => i,
            None => return Err("the DOF of ZeroLength is not available at the nodes"),
        };
        Ok(ZeroLength {
            nodes: nodes.to_vec(),
            ndf,
            index,
            material: Uniaxial::new(&param.material)?,
        })
    }

    /// Returns the trial force in the spring
    pub fn force(&self) -> f64 {
        self.material.actual.stress()
    }

    fn set_spring(&self, kk: &mut Matrix, k: f64) {
        let (i, j) = (self.index, self.ndf + self.index);
        kk.fill(0.0);
        kk.set(i, i, k);
        kk.set(i, j, -k);
        kk.set(j, i, -k);
        kk.set(j, j, k);
    }
}

impl ElementTrait for ZeroLength {
    fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    fn ndf(&self) -> usize {
        self.ndf
    }

    fn update(&mut self, uu: &Vector, vv: &Vector) -> Result<(), StrError> {
        let (i, j) = (self.index, self.ndf + self.index);
        self.material.actual.set_trial_strain(uu[j] - uu[i], vv[j] - vv[i])
    }

    fn tangent_stiff(&self, kk: &mut Matrix) {
        self.set_spring(kk, self.material.actual.tangent());
    }

    fn initial_stiff(&self, kk: &mut Matrix) {
        self.set_spring(kk, self.material.actual.initial_tangent());
    }

    fn mass(&self, mm: &mut Matrix) {
        mm.fill(0.0);
    }

    fn resisting_force(&self, rr: &mut Vector) {
        let f = self.force();
        rr.fill(0.0);
        rr[self.index] = -f;
        rr[self.ndf + self.index] = f;
    }

    fn commit_state(&mut self) {
        self.material.actual.commit_state();
    }

    fn revert_to_last_commit(&mut self) {
        self.material.actual.revert_to_last_commit();
    }

    fn revert_to_start(&mut self) {
        self.material.actual.revert_to_start();
    }

    fn basic_forces(&self) -> Vec<f64> {
        vec![self.force()]
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
