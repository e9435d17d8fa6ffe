use super::{element_axis, set_two_node_block, set_two_node_mass, ElementTrait};
use crate::base::{MassType, ParamTruss};
use crate::material::Uniaxial;
use crate::StrError;
use russell_lab::{Matrix, Vector};

/// Implements a corotational truss element for large displacements (small strains)
///
/// The strain is measured with the current (deformed) length `Lₙ`:
///
/// ```text
/// ε = (Lₙ - L₀) / L₀
/// ```
///
/// and the tangent stiffness includes the geometric (initial stress) contribution:
///
/// ```text
/// k = (Eₜ A / L₀) n nᵀ + (N / Lₙ) (I - n nᵀ)
/// ```
///
/// where `n` is the unit vector along the deformed axis and `N` the axial force.
///
/// # References
///
/// * Crisfield M.A. (1991) Non-linear Finite Element Analysis of Solids and Structures, Vol 1, Chapter 3
pub struct CorotTruss {
    nodes: Vec<usize>,
    ndim: usize,
    ndf: usize,
    coords: Vec<Vec<f64>>,
    length0: f64,
    cosines0: Vec<f64>,
    area: f64,
    density: f64,
    mass_type: MassType,
    material: Uniaxial,

    // current (trial) length and unit vector
    trial_length: f64,
    trial_n: Vec<f64>,

    // committed length and unit vector
    committed_length: f64,
    committed_n: Vec<f64>,
}

impl CorotTruss {
    /// Allocates a new instance
    pub fn new(
        nodes: &[usize],
        coords: &[Vec<f64>],
        ndim: usize,
        ndf: usize,
        param: &ParamTruss,
    ) -> Result<Self, StrError> {
        if nodes.len() != 2 {
            return Err("number of nodes for CorotTruss must be 2");
        }
        if ndim != 2 && ndim != 3 {
            return Err("ndim must be 2 or 3 for CorotTruss");
        }
        if ndf < ndim {
            return Err("ndf must be ≥ ndim for CorotTruss");
        }
        if param.area <= 0.0 {
            return Err("area must be > 0.0");
        }
        if param.density < 0.0 {
            return Err("density must be ≥ 0.0");
        }
        let (length0, cosines0) = element_axis(coords, ndim)?;
        Ok(CorotTruss {
            nodes: nodes.to_vec(),
            ndim,
            ndf,
            coords: coords.iter().map(|x| x[0..ndim].to_vec()).collect(),
            length0,
            cosines0: cosines0.clone(),
            area: param.area,
            density: param.density,
            mass_type: param.mass,
            material: Uniaxial::new(&param.material)?,
            trial_length: length0,
            trial_n: cosines0.clone(),
            committed_length: length0,
            committed_n: cosines0,
        })
    }

    /// Returns the trial (deformed) length
    pub fn current_length(&self) -> f64 {
        self.trial_length
    }

    /// Returns the trial axial force
    pub fn axial_force(&self) -> f64 {
        self.material.actual.stress() * self.area
    }
}

impl ElementTrait for CorotTruss {
    fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    fn ndf(&self) -> usize {
        self.ndf
    }

    fn update(&mut self, uu: &Vector, vv: &Vector) -> Result<(), StrError> {
        let ndf = self.ndf;
        let delta: Vec<f64> = (0..self.ndim)
            .map(|i| self.coords[1][i] + uu[ndf + i] - self.coords[0][i] - uu[i])
            .collect();
        let length = f64::sqrt(delta.iter().fold(0.0, |acc, d| acc + d * d));
        if length <= f64::EPSILON {
            return Err("the deformed length of CorotTruss is zero");
        }
        self.trial_length = length;
        for i in 0..self.ndim {
            self.trial_n[i] = delta[i] / length;
        }
        let mut rate = 0.0;
        for i in 0..self.ndim {
            rate += self.trial_n[i] * (vv[ndf + i] - vv[i]);
        }
        let strain = (length - self.length0) / self.length0;
        self.material.actual.set_trial_strain(strain, rate / self.length0)
    }

    fn tangent_stiff(&self, kk: &mut Matrix) {
        let km = self.material.actual.tangent() * self.area / self.length0;
        let kg = self.axial_force() / self.trial_length;
        let n = &self.trial_n;
        set_two_node_block(kk, self.ndim, self.ndf, |i, j| {
            let delta = if i == j { 1.0 } else { 0.0 };
            km * n[i] * n[j] + kg * (delta - n[i] * n[j])
        });
    }

    fn initial_stiff(&self, kk: &mut Matrix) {
        let k = self.material.actual.initial_tangent() * self.area / self.length0;
        let c = &self.cosines0;
        set_two_node_block(kk, self.ndim, self.ndf, |i, j| k * c[i] * c[j]);
    }

    fn mass(&self, mm: &mut Matrix) {
        set_two_node_mass(mm, self.ndim, self.ndf, self.density * self.length0, self.mass_type);
    }

    fn resisting_force(&self, rr: &mut Vector) {
        let force = self.axial_force();
        rr.fill(0.0);
        for i in 0..self.ndim {
            rr[i] = -force * self.trial_n[i];
            rr[self.ndf + i] = force * self.trial_n[i];
        }
    }

    fn commit_state(&mut self) {
        self.material.actual.commit_state();
        self.committed_length = self.trial_length;
        self.committed_n.copy_from_slice(&self.trial_n);
    }

    fn revert_to_last_commit(&mut self) {
        self.material.actual.revert_to_last_commit();
        self.trial_length = self.committed_length;
        self.trial_n.copy_from_slice(&self.committed_n);
    }

    fn revert_to_start(&mut self) {
        self.material.actual.revert_to_start();
        self.committed_length = self.length0;
        self.committed_n.copy_from_slice(&self.cosines0);
        self.revert_to_last_commit();
    }

    fn basic_forces(&self) -> Vec<f64> {
        vec![self.axial_force()]
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
