use super::{CorotTruss, ElasticBeam2d, ElementTrait, Truss, ZeroLength};
use crate::base::ParamElement;
use crate::StrError;
use russell_lab::{Matrix, Vector};

/// Defines a generic element, wrapping an "actual" implementation
///
/// The local vectors and matrices are allocated once and reused during the analysis.
pub struct GenericElement {
    /// Connects to the "actual" implementation of the element
    pub actual: Box<dyn ElementTrait>,

    /// Holds the local trial displacements (gathered from the nodes)
    pub uu: Vector,

    /// Holds the local trial velocities (gathered from the nodes)
    pub vv: Vector,

    /// Holds the local stiffness matrix (tangent or initial)
    pub kk: Matrix,

    /// Holds the local mass matrix
    pub mm: Matrix,

    /// Holds the local resisting force vector
    pub rr: Vector,
}

impl GenericElement {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `param` -- the element parameters
    /// * `nodes` -- the ids of the nodes of the element
    /// * `coords` -- the coordinates of the nodes of the element
    /// * `ndim` -- the space dimension
    /// * `ndf` -- the number of DOFs per node
    pub fn new(
        param: &ParamElement,
        nodes: &[usize],
        coords: &[Vec<f64>],
        ndim: usize,
        ndf: usize,
    ) -> Result<Self, StrError> {
        let actual: Box<dyn ElementTrait> = match param {
            ParamElement::Truss(p) => Box::new(Truss::new(nodes, coords, ndim, ndf, p)?),
            ParamElement::CorotTruss(p) => Box::new(CorotTruss::new(nodes, coords, ndim, ndf, p)?),
            ParamElement::ElasticBeam2d(p) => Box::new(ElasticBeam2d::new(nodes, coords, ndim, ndf, p)?),
            ParamElement::ZeroLength(p) => Box::new(ZeroLength::new(nodes, ndim, ndf, p)?),
        };
        let n = actual.n_dof();
        Ok(GenericElement {
            actual,
            uu: Vector::new(n),
            vv: Vector::new(n),
            kk: Matrix::new(n, n),
            mm: Matrix::new(n, n),
            rr: Vector::new(n),
        })
    }

    /// Updates the trial state using the displacements and velocities stored in `uu` and `vv`
    pub fn update(&mut self) -> Result<(), StrError> {
        self.actual.update(&self.uu, &self.vv)
    }

    /// Calculates the tangent (or initial) stiffness matrix into `kk`
    pub fn calc_stiffness(&mut self, initial: bool) {
        if initial {
            self.actual.initial_stiff(&mut self.kk);
        } else {
            self.actual.tangent_stiff(&mut self.kk);
        }
    }

    /// Calculates the mass matrix into `mm`
    pub fn calc_mass(&mut self) {
        self.actual.mass(&mut self.mm);
    }

    /// Calculates the resisting force vector into `rr`
    pub fn calc_resisting_force(&mut self) {
        self.actual.resisting_force(&mut self.rr);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::GenericElement;
    use crate::base::{ParamElement, SampleParams};
    use russell_lab::approx_eq;

    #[test]
    fn new_works() {
        let coords = vec![vec![0.0, 0.0], vec![1.0, 0.0]];
        let truss = ParamElement::Truss(SampleParams::param_truss());
        let corot = ParamElement::CorotTruss(SampleParams::param_truss());
        let beam = ParamElement::ElasticBeam2d(SampleParams::param_beam_2d());
        let spring = ParamElement::ZeroLength(SampleParams::param_zero_length());
        assert_eq!(GenericElement::new(&truss, &[0, 1], &coords, 2, 2).unwrap().kk.dims(), (4, 4));
        assert_eq!(GenericElement::new(&corot, &[0, 1], &coords, 2, 3).unwrap().rr.dim(), 6);
        assert_eq!(GenericElement::new(&beam, &[0, 1], &coords, 2, 3).unwrap().mm.dims(), (6, 6));
        assert_eq!(GenericElement::new(&spring, &[0, 1], &coords, 1, 1).unwrap().uu.dim(), 2);
        assert_eq!(
            GenericElement::new(&beam, &[0, 1], &coords, 2, 2).err(),
            Some("ElasticBeam2d requires ndim = 2 and ndf = 3")
        );
    }

    #[test]
    fn calc_functions_work() {
        let coords = vec![vec![0.0, 0.0], vec![30.0, 40.0]];
        let mut p = SampleParams::param_truss();
        p.area = 5.0;
        p.material = crate::base::ParamUniaxial::Elastic {
            young: 1_000.0,
            eta: 0.0,
        };
        let mut e = GenericElement::new(&ParamElement::Truss(p), &[0, 1], &coords, 2, 2).unwrap();
        e.uu[2] = 0.3;
        e.uu[3] = 0.4;
        e.update().unwrap();
        e.calc_stiffness(false);
        e.calc_resisting_force();
        e.calc_mass();
        assert_eq!(e.kk.get(1, 1), 64.0);
        approx_eq(e.rr[3], 40.0, 1e-12);
        assert_eq!(e.mm.get(0, 0), 50.0);
    }
}
