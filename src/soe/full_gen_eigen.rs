use super::{check_n_modes, sort_eigenpairs, DofGraph, EigenSoe};
use crate::base::assemble_matrix;
use crate::StrError;
use russell_lab::{mat_cholesky, mat_eigen_sym, Matrix, Vector};

/// Implements a dense eigen solver for the generalized symmetric problem
///
/// With M = L Lᵀ (Cholesky), the problem is transformed into
///
/// ```text
/// (L⁻¹ A L⁻ᵀ) y = λ y    with    φ = L⁻ᵀ y
/// ```
pub struct FullGenEigenSoe {
    n_equation: usize,
    aa: Matrix,
    mm: Matrix,
    values: Vec<f64>,
    vectors: Vec<Vector>,
}

impl FullGenEigenSoe {
    /// Allocates a new (empty) instance
    pub fn new() -> Self {
        FullGenEigenSoe {
            n_equation: 0,
            aa: Matrix::new(0, 0),
            mm: Matrix::new(0, 0),
            values: Vec::new(),
            vectors: Vec::new(),
        }
    }
}

/// Computes the lower Cholesky factor L of a dense SPD matrix (M = L Lᵀ)
///
/// The strictly upper triangle of the result is zero.
fn cholesky_factor(mm: &Matrix) -> Result<Matrix, StrError> {
    let mut ll = mm.clone();
    mat_cholesky(&mut ll, false).map_err(|_| "mass matrix is not positive definite")?;
    let (n, _) = ll.dims();
    for i in 0..n {
        for j in (i + 1)..n {
            ll.set(i, j, 0.0);
        }
    }
    Ok(ll)
}

impl EigenSoe for FullGenEigenSoe {
    fn set_size(&mut self, graph: &DofGraph) -> Result<(), StrError> {
        let n = graph.n_equation;
        self.n_equation = n;
        self.aa = Matrix::new(n, n);
        self.mm = Matrix::new(n, n);
        self.values.clear();
        self.vectors.clear();
        Ok(())
    }

    fn n_equation(&self) -> usize {
        self.n_equation
    }

    fn zero_a(&mut self) {
        self.aa.fill(0.0);
    }

    fn zero_m(&mut self) {
        self.mm.fill(0.0);
    }

    fn add_a(&mut self, kk: &Matrix, loc: &[Option<usize>], fact: f64) -> Result<(), StrError> {
        if kk.dims() != (loc.len(), loc.len()) {
            return Err("the dimensions of the local matrix must equal the length of loc");
        }
        assemble_matrix(&mut self.aa, kk, loc, fact);
        Ok(())
    }

    fn add_m(&mut self, mm: &Matrix, loc: &[Option<usize>], fact: f64) -> Result<(), StrError> {
        if mm.dims() != (loc.len(), loc.len()) {
            return Err("the dimensions of the local matrix must equal the length of loc");
        }
        assemble_matrix(&mut self.mm, mm, loc, fact);
        Ok(())
    }

    fn add_a_diag(&mut self, eq: usize, value: f64) -> Result<(), StrError> {
        if eq >= self.n_equation {
            return Err("the equation number is out of range");
        }
        let v = self.aa.get(eq, eq);
        self.aa.set(eq, eq, v + value);
        Ok(())
    }

    fn add_m_diag(&mut self, eq: usize, value: f64) -> Result<(), StrError> {
        if eq >= self.n_equation {
            return Err("the equation number is out of range");
        }
        let v = self.mm.get(eq, eq);
        self.mm.set(eq, eq, v + value);
        Ok(())
    }

    fn solve(&mut self, n_modes: usize, generalized: bool) -> Result<(), StrError> {
        let n = self.n_equation;
        check_n_modes(n_modes, n)?;
        let ll = if generalized {
            cholesky_factor(&self.mm)?
        } else {
            Matrix::identity(n)
        };

        // X = L⁻¹ A (forward substitution on each column)
        let mut xx = Matrix::new(n, n);
        for c in 0..n {
            for i in 0..n {
                let mut s = self.aa.get(i, c);
                for k in 0..i {
                    s -= ll.get(i, k) * xx.get(k, c);
                }
                xx.set(i, c, s / ll.get(i, i));
            }
        }

        // C = X L⁻ᵀ = L⁻¹ Xᵀ (A is symmetric)
        let mut cc = Matrix::new(n, n);
        for c in 0..n {
            for i in 0..n {
                let mut s = xx.get(c, i);
                for k in 0..i {
                    s -= ll.get(i, k) * cc.get(k, c);
                }
                cc.set(i, c, s / ll.get(i, i));
            }
        }
        for i in 0..n {
            for j in (i + 1)..n {
                let c = 0.5 * (cc.get(i, j) + cc.get(j, i));
                cc.set(i, j, c);
                cc.set(j, i, c);
            }
        }

        let mut l = Vector::new(n);
        mat_eigen_sym(&mut l, &mut cc, true)?;

        // φ = L⁻ᵀ y (backward substitution)
        let mut vectors = Vec::with_capacity(n);
        for k in 0..n {
            let mut phi = Vector::new(n);
            for i in (0..n).rev() {
                let mut s = cc.get(i, k);
                for j in (i + 1)..n {
                    s -= ll.get(j, i) * phi[j];
                }
                phi[i] = s / ll.get(i, i);
            }
            vectors.push(phi);
        }
        let (values, vectors) = sort_eigenpairs(l.as_data().to_vec(), vectors, n_modes);
        self.values = values;
        self.vectors = vectors;
        Ok(())
    }

    fn eigenvalues(&self) -> &[f64] {
        &self.values
    }

    fn eigenvectors(&self) -> &[Vector] {
        &self.vectors
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
