use super::ElementTrait;
use crate::base::{MassType, ParamTruss};
use crate::material::Uniaxial;
use crate::StrError;
use russell_lab::{Matrix, Vector};

/// Computes the length and the direction cosines of a two-node element
///
/// Returns `(length, cosines)` where `cosines.len() = ndim`.
pub(crate) fn element_axis(coords: &[Vec<f64>], ndim: usize) -> Result<(f64, Vec<f64>), StrError> {
    if coords.len() != 2 {
        return Err("the number of nodes must be 2");
    }
    if coords[0].len() < ndim || coords[1].len() < ndim {
        return Err("the number of coordinates must be equal to ndim");
    }
    let delta: Vec<f64> = (0..ndim).map(|i| coords[1][i] - coords[0][i]).collect();
    let length = f64::sqrt(delta.iter().fold(0.0, |acc, d| acc + d * d));
    if length <= f64::EPSILON {
        return Err("element length must be > 0.0");
    }
    let cosines = delta.iter().map(|d| d / length).collect();
    Ok((length, cosines))
}

/// Sets the two-node block pattern `[[k, -k], [-k, k]]` where `k[i][j] = f(i, j)` for `i, j < ndim`
///
/// All other entries (e.g., rotations) are set to zero.
pub(crate) fn set_two_node_block<F>(kk: &mut Matrix, ndim: usize, ndf: usize, f: F)
where
    F: Fn(usize, usize) -> f64,
{
    kk.fill(0.0);
    for i in 0..ndim {
        for j in 0..ndim {
            let v = f(i, j);
            kk.set(i, j, v);
            kk.set(i, ndf + j, -v);
            kk.set(ndf + i, j, -v);
            kk.set(ndf + i, ndf + j, v);
        }
    }
}

/// Sets the mass matrix of a two-node element with translational inertia only
pub(crate) fn set_two_node_mass(mm: &mut Matrix, ndim: usize, ndf: usize, total_mass: f64, mass_type: MassType) {
    mm.fill(0.0);
    let (diag, off) = match mass_type {
        MassType::Lumped => (total_mass / 2.0, 0.0),
        MassType::Consistent => (total_mass / 3.0, total_mass / 6.0),
    };
    for i in 0..ndim {
        mm.set(i, i, diag);
        mm.set(ndf + i, ndf + i, diag);
        mm.set(i, ndf + i, off);
        mm.set(ndf + i, i, off);
    }
}

/// Implements a small-displacement truss element (bar) in 1D, 2D, or 3D
///
/// The strain is computed from the projection of the relative displacement onto the (initial)
/// axis of the element:
///
/// ```text
/// ε = cᵀ (u₁ - u₀) / L
/// ```
///
/// # References
///
/// * Felippa C., Chapter 20: Implementation of One-Dimensional Elements (IFEM.Ch20.pdf)
pub struct Truss {
    nodes: Vec<usize>,
    ndim: usize,
    ndf: usize,
    length: f64,
    cosines: Vec<f64>,
    area: f64,
    density: f64,
    mass_type: MassType,
    material: Uniaxial,
}

impl Truss {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `nodes` -- the ids of the two nodes
    /// * `coords` -- the coordinates of the two nodes
    /// * `ndim` -- the space dimension (1, 2, or 3)
    /// * `ndf` -- the number of DOFs per node (≥ ndim; extra DOFs such as rotations receive no stiffness)
    pub fn new(
        nodes: &[usize],
        coords: &[Vec<f64>],
        ndim: usize,
        ndf: usize,
        param: &ParamTruss,
    ) -> Result<Self, StrError> {
        if nodes.len() != 2 {
            return Err("number of nodes for Truss must be 2");
        }
        if ndim < 1 || ndim > 3 {
            return Err("ndim must be 1, 2, or 3 for Truss");
        }
        if ndf < ndim {
            return Err("ndf must be ≥ ndim for Truss");
        }
        if param.area <= 0.0 {
            return Err("area must be > 0.0");
        }
        if param.density < 0.0 {
            return Err("density must be ≥ 0.0");
        }
        let (length, cosines) = element_axis(coords, ndim)?;
        Ok(Truss {
            nodes: nodes.to_vec(),
            ndim,
            ndf,
            length,
            cosines,
            area: param.area,
            density: param.density,
            mass_type: param.mass,
            material: Uniaxial::new(&param.material)?,
        })
    }

    /// Returns the (initial) length
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns the trial axial force
    pub fn axial_force(&self) -> f64 {
        self.material.actual.stress() * self.area
    }

    /// Returns the projection of the relative value (displacement or velocity) onto the axis
    fn axial_deformation(&self, uu: &Vector) -> f64 {
        let mut delta = 0.0;
        for i in 0..self.ndim {
            delta += self.cosines[i] * (uu[self.ndf + i] - uu[i]);
        }
        delta
    }
}

impl ElementTrait for Truss {
    fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    fn ndf(&self) -> usize {
        self.ndf
    }

    fn update(&mut self, uu: &Vector, vv: &Vector) -> Result<(), StrError> {
        let strain = self.axial_deformation(uu) / self.length;
        let strain_rate = self.axial_deformation(vv) / self.length;
        self.material.actual.set_trial_strain(strain, strain_rate)
    }

    fn tangent_stiff(&self, kk: &mut Matrix) {
        let k = self.material.actual.tangent() * self.area / self.length;
        let c = &self.cosines;
        set_two_node_block(kk, self.ndim, self.ndf, |i, j| k * c[i] * c[j]);
    }

    fn initial_stiff(&self, kk: &mut Matrix) {
        let k = self.material.actual.initial_tangent() * self.area / self.length;
        let c = &self.cosines;
        set_two_node_block(kk, self.ndim, self.ndf, |i, j| k * c[i] * c[j]);
    }

    fn mass(&self, mm: &mut Matrix) {
        set_two_node_mass(mm, self.ndim, self.ndf, self.density * self.length, self.mass_type);
    }

    fn resisting_force(&self, rr: &mut Vector) {
        let n = self.axial_force();
        rr.fill(0.0);
        for i in 0..self.ndim {
            rr[i] = -n * self.cosines[i];
            rr[self.ndf + i] = n * self.cosines[i];
        }
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
        vec![self.axial_force()]
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
