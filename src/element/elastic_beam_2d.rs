use super::{element_axis, ElementTrait};
use crate::base::{ElementLoad, MassType, ParamBeam2d, Transformation};
use crate::StrError;
use russell_lab::{Matrix, Vector};

/// Implements an elastic Euler-Bernoulli beam-column in 2D
///
/// Each node has three DOFs: `[Ux, Uy, Rz]`. The local system has the x axis along the element.
///
/// The resisting force is:
///
/// ```text
/// r = Tᵀ ((kₑ + k₉) T u - p)
/// ```
///
/// where `T` is the rotation matrix, `kₑ` the elastic stiffness, `k₉` the geometric stiffness
/// (P-Δ transformation only), and `p` the equivalent nodal loads due to span loads.
///
/// # References
///
/// * Przemieniecki J.S. (1968) Theory of Matrix Structural Analysis, McGraw-Hill
/// * McGuire W., Gallagher R.H., Ziemian R.D. (2000) Matrix Structural Analysis, 2nd Edition
pub struct ElasticBeam2d {
    nodes: Vec<usize>,
    length: f64,
    cos: f64,
    sin: f64,
    ea: f64,
    ei: f64,
    density: f64,
    mass_type: MassType,
    transf: Transformation,

    /// Elastic stiffness in local coordinates
    kk_local: Matrix,

    /// Equivalent nodal loads in local coordinates
    p_load: Vector,

    /// Trial displacements in local coordinates
    trial_ul: Vector,

    /// Committed displacements in local coordinates
    committed_ul: Vector,
}

impl ElasticBeam2d {
    /// Allocates a new instance
    ///
    /// The nodes must have `ndf = 3` in a 2D space.
    pub fn new(nodes: &[usize], coords: &[Vec<f64>], ndim: usize, ndf: usize, param: &ParamBeam2d) -> Result<Self, StrError> {
        if nodes.len() != 2 {
            return Err("number of nodes for ElasticBeam2d must be 2");
        }
        if ndim != 2 || ndf != 3 {
            return Err("ElasticBeam2d requires ndim = 2 and ndf = 3");
        }
        if param.area <= 0.0 || param.young <= 0.0 || param.inertia <= 0.0 {
            return Err("area, young, and inertia must be > 0.0");
        }
        if param.density < 0.0 {
            return Err("density must be ≥ 0.0");
        }
        let (length, cosines) = element_axis(coords, ndim)?;
        let ea = param.young * param.area;
        let ei = param.young * param.inertia;
        let l = length;
        let (a, b, c, d, e) = (ea / l, 12.0 * ei / (l * l * l), 6.0 * ei / (l * l), 4.0 * ei / l, 2.0 * ei / l);
        #[rustfmt::skip]
        let kk_local = Matrix::from(&[
            [  a, 0.0, 0.0,  -a, 0.0, 0.0],
            [0.0,   b,   c, 0.0,  -b,   c],
            [0.0,   c,   d, 0.0,  -c,   e],
            [ -a, 0.0, 0.0,   a, 0.0, 0.0],
            [0.0,  -b,  -c, 0.0,   b,  -c],
            [0.0,   c,   e, 0.0,  -c,   d],
        ]);
        Ok(ElasticBeam2d {
            nodes: nodes.to_vec(),
            length,
            cos: cosines[0],
            sin: cosines[1],
            ea,
            ei,
            density: param.density,
            mass_type: param.mass,
            transf: param.transf,
            kk_local,
            p_load: Vector::new(6),
            trial_ul: Vector::new(6),
            committed_ul: Vector::new(6),
        })
    }

    /// Returns the length
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns the flexural rigidity EI
    pub fn flexural_rigidity(&self) -> f64 {
        self.ei
    }

    /// Returns the trial axial force (positive in tension)
    pub fn axial_force(&self) -> f64 {
        self.ea / self.length * (self.trial_ul[3] - self.trial_ul[0])
    }

    /// Returns the entry (a, i) of the rotation matrix such that `u_local = T u_global`
    fn rot(&self, a: usize, i: usize) -> f64 {
        if a / 3 != i / 3 {
            return 0.0;
        }
        match (a % 3, i % 3) {
            (0, 0) => self.cos,
            (0, 1) => self.sin,
            (1, 0) => -self.sin,
            (1, 1) => self.cos,
            (2, 2) => 1.0,
            _ => 0.0,
        }
    }

    /// Computes the local stiffness including the geometric contribution (if any)
    fn local_tangent(&self) -> Matrix {
        let mut kk = self.kk_local.clone();
        if self.transf == Transformation::PDelta {
            let kg = self.axial_force() / self.length;
            kk.set(1, 1, kk.get(1, 1) + kg);
            kk.set(1, 4, kk.get(1, 4) - kg);
            kk.set(4, 1, kk.get(4, 1) - kg);
            kk.set(4, 4, kk.get(4, 4) + kg);
        }
        kk
    }

    /// Computes the local end forces q = k u - p
    fn local_forces(&self) -> Vector {
        let kk = self.local_tangent();
        let mut q = Vector::new(6);
        for a in 0..6 {
            q[a] = -self.p_load[a];
            for b in 0..6 {
                q[a] += kk.get(a, b) * self.trial_ul[b];
            }
        }
        q
    }

    /// Computes the global matrix kk = Tᵀ k_local T
    fn to_global(&self, kk: &mut Matrix, local: &Matrix) {
        for i in 0..6 {
            for j in 0..6 {
                let mut sum = 0.0;
                for a in 0..6 {
                    let tai = self.rot(a, i);
                    if tai == 0.0 {
                        continue;
                    }
                    for b in 0..6 {
                        sum += tai * local.get(a, b) * self.rot(b, j);
                    }
                }
                kk.set(i, j, sum);
            }
        }
    }
}

impl ElementTrait for ElasticBeam2d {
    fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    fn ndf(&self) -> usize {
        3
    }

    fn update(&mut self, uu: &Vector, _vv: &Vector) -> Result<(), StrError> {
        for a in 0..6 {
            self.trial_ul[a] = 0.0;
            for i in 0..6 {
                self.trial_ul[a] += self.rot(a, i) * uu[i];
            }
        }
        Ok(())
    }

    fn tangent_stiff(&self, kk: &mut Matrix) {
        let local = self.local_tangent();
        self.to_global(kk, &local);
    }

    fn initial_stiff(&self, kk: &mut Matrix) {
        self.to_global(kk, &self.kk_local);
    }

    fn mass(&self, mm: &mut Matrix) {
        let total = self.density * self.length;
        match self.mass_type {
            MassType::Lumped => {
                mm.fill(0.0);
                for i in [0, 1, 3, 4] {
                    mm.set(i, i, total / 2.0);
                }
            }
            MassType::Consistent => {
                let l = self.length;
                let m = total / 420.0;
                #[rustfmt::skip]
                let local = Matrix::from(&[
                    [140.0*m,           0.0,             0.0,  70.0*m,            0.0,             0.0],
                    [    0.0,       156.0*m,      22.0*l*m,     0.0,         54.0*m,      -13.0*l*m],
                    [    0.0,      22.0*l*m,    4.0*l*l*m,     0.0,       13.0*l*m,     -3.0*l*l*m],
                    [ 70.0*m,           0.0,             0.0, 140.0*m,            0.0,             0.0],
                    [    0.0,        54.0*m,      13.0*l*m,     0.0,        156.0*m,      -22.0*l*m],
                    [    0.0,     -13.0*l*m,   -3.0*l*l*m,     0.0,      -22.0*l*m,      4.0*l*l*m],
                ]);
                self.to_global(mm, &local);
            }
        }
    }

    fn resisting_force(&self, rr: &mut Vector) {
        let q = self.local_forces();
        for i in 0..6 {
            rr[i] = 0.0;
            for a in 0..6 {
                rr[i] += self.rot(a, i) * q[a];
            }
        }
    }

    fn commit_state(&mut self) {
        self.committed_ul.as_mut_data().copy_from_slice(self.trial_ul.as_data());
    }

    fn revert_to_last_commit(&mut self) {
        self.trial_ul.as_mut_data().copy_from_slice(self.committed_ul.as_data());
    }

    fn revert_to_start(&mut self) {
        self.committed_ul.fill(0.0);
        self.trial_ul.fill(0.0);
    }

    fn add_load(&mut self, load: &ElementLoad, fact: f64) -> Result<(), StrError> {
        let l = self.length;
        match *load {
            ElementLoad::BeamUniform { wy, wx } => {
                let (wy, wx) = (fact * wy, fact * wx);
                self.p_load[0] += wx * l / 2.0;
                self.p_load[1] += wy * l / 2.0;
                self.p_load[2] += wy * l * l / 12.0;
                self.p_load[3] += wx * l / 2.0;
                self.p_load[4] += wy * l / 2.0;
                self.p_load[5] -= wy * l * l / 12.0;
            }
            ElementLoad::BeamPoint { py, px, a_over_l } => {
                if a_over_l <= 0.0 || a_over_l >= 1.0 {
                    return Err("a_over_l must satisfy 0 < a_over_l < 1");
                }
                let (py, px) = (fact * py, fact * px);
                let a = a_over_l * l;
                let b = l - a;
                let l2 = l * l;
                let l3 = l2 * l;
                self.p_load[0] += px * (1.0 - a_over_l);
                self.p_load[1] += py * b * b * (3.0 * a + b) / l3;
                self.p_load[2] += py * a * b * b / l2;
                self.p_load[3] += px * a_over_l;
                self.p_load[4] += py * a * a * (a + 3.0 * b) / l3;
                self.p_load[5] -= py * a * a * b / l2;
            }
        }
        Ok(())
    }

    fn zero_load(&mut self) {
        self.p_load.fill(0.0);
    }

    /// Returns the basic forces `[N, M₁, M₂]`
    ///
    /// N is the axial force (tension positive) and M₁, M₂ are the end moments
    /// (counter-clockwise positive) taken from the local end forces
    /// `[N₀, V₀, M₀, N₁, V₁, M₁]`.
    fn basic_forces(&self) -> Vec<f64> {
        let q = self.local_forces();
        vec![q[3], q[2], q[5]]
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
