use super::{BandMatrix, DofGraph, LinearSoe};
use crate::StrError;
use russell_lab::{vec_copy, Matrix, Vector};

/// Implements a symmetric positive-definite system with band storage solved by Cholesky factorization
///
/// Only the upper triangle within the half-bandwidth is stored; the half-bandwidth
/// is computed from the connectivity of equations. The factorization is reused
/// until A is modified.
pub struct BandSpdLinSoe {
    aa: BandMatrix,
    factor: BandMatrix,
    factored: bool,
    bb: Vector,
    xx: Vector,
}

impl BandSpdLinSoe {
    /// Allocates a new (empty) instance
    pub fn new() -> Self {
        BandSpdLinSoe {
            aa: BandMatrix::new(0, 0),
            factor: BandMatrix::new(0, 0),
            factored: false,
            bb: Vector::new(0),
            xx: Vector::new(0),
        }
    }

    /// Returns the matrix A
    pub fn a(&self) -> &BandMatrix {
        &self.aa
    }
}

impl LinearSoe for BandSpdLinSoe {
    fn set_size(&mut self, graph: &DofGraph) -> Result<(), StrError> {
        let n = graph.n_equation;
        let kd = graph.half_bandwidth();
        self.aa = BandMatrix::new(n, kd);
        self.factor = BandMatrix::new(n, kd);
        self.factored = false;
        self.bb = Vector::new(n);
        self.xx = Vector::new(n);
        Ok(())
    }

    fn n_equation(&self) -> usize {
        self.aa.dim()
    }

    fn zero_a(&mut self) {
        self.aa.fill_zero();
        self.factored = false;
    }

    fn zero_b(&mut self) {
        self.bb.fill(0.0);
    }

    fn add_a(&mut self, kk: &Matrix, loc: &[Option<usize>], fact: f64) -> Result<(), StrError> {
        if kk.dims() != (loc.len(), loc.len()) {
            return Err("the dimensions of the local matrix must equal the length of loc");
        }
        self.factored = false;
        for (l, eq) in loc.iter().enumerate() {
            if let Some(i) = eq {
                for (ll, eq_eq) in loc.iter().enumerate() {
                    if let Some(j) = eq_eq {
                        if i <= j {
                            self.aa.add(*i, *j, fact * kk.get(l, ll))?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn add_diag(&mut self, eq: usize, value: f64) -> Result<(), StrError> {
        if eq >= self.aa.dim() {
            return Err("the equation number is out of range");
        }
        self.factored = false;
        self.aa.add(eq, eq, value)
    }

    fn b(&self) -> &Vector {
        &self.bb
    }

    fn b_mut(&mut self) -> &mut Vector {
        &mut self.bb
    }

    fn x(&self) -> &Vector {
        &self.xx
    }

    fn x_mut(&mut self) -> &mut Vector {
        &mut self.xx
    }

    fn solve(&mut self) -> Result<(), StrError> {
        if self.aa.dim() == 0 {
            return Ok(());
        }
        if !self.factored {
            self.factor = self.aa.clone();
            self.factor.cholesky()?;
            self.factored = true;
        }
        vec_copy(&mut self.xx, &self.bb)?;
        self.factor.cholesky_solve(&mut self.xx);
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::BandSpdLinSoe;
    use crate::soe::{DofGraph, LinearSoe};
    use russell_lab::{vec_approx_eq, Matrix, Vector};

    #[test]
    fn add_a_refuses_entries_outside_the_band() {
        let mut graph = DofGraph::new(3);
        graph.add_connectivity(&[Some(0), Some(1)]);
        graph.add_connectivity(&[Some(1), Some(2)]);
        let mut soe = BandSpdLinSoe::new();
        soe.set_size(&graph).unwrap();
        assert_eq!(soe.a().half_bandwidth(), 1);
        let kk = Matrix::from(&[[1.0, -1.0], [-1.0, 1.0]]);
        assert_eq!(
            soe.add_a(&kk, &[Some(0), Some(2)], 1.0).err(),
            Some("the entry is outside the band")
        );
    }

    #[test]
    fn solve_captures_non_positive_definite_matrix() {
        // free-free spring: singular stiffness
        let mut graph = DofGraph::new(2);
        graph.add_connectivity(&[Some(0), Some(1)]);
        let mut soe = BandSpdLinSoe::new();
        soe.set_size(&graph).unwrap();
        let kk = Matrix::from(&[[1.0, -1.0], [-1.0, 1.0]]);
        soe.add_a(&kk, &[Some(0), Some(1)], 1.0).unwrap();
        assert_eq!(soe.solve().err(), Some("matrix is not positive definite"));

        // ground node 0
        soe.add_diag(0, 1.0).unwrap();
        soe.set_b(&Vector::from(&[0.0, 1.0])).unwrap();
        soe.solve().unwrap();
        vec_approx_eq(soe.x(), &Vector::from(&[1.0, 2.0]), 1e-14);
    }
}
