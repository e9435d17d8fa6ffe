use super::{check_n_modes, sort_eigenpairs, BandMatrix, DofGraph, EigenSoe};
use crate::StrError;
use russell_lab::{mat_eigen_sym, Matrix, Vector};

/// Implements a symmetric band eigen solver for diagonal (lumped) mass matrices
///
/// The problem A φ = λ M φ is transformed into the standard problem
///
/// ```text
/// (M^-½ A M^-½) y = λ y    with    φ = M^-½ y
/// ```
///
/// which yields M-normalized eigenvectors when y is normalized.
///
/// Only A is stored in band format. The transformed matrix is expanded into a
/// dense n×n matrix and solved by `mat_eigen_sym` (all eigenpairs), thus this
/// solver needs O(n²) memory and O(n³) time. Use `BandArpackSoe` for large models.
pub struct SymBandEigenSoe {
    aa: BandMatrix,
    mm: Vec<f64>,
    values: Vec<f64>,
    vectors: Vec<Vector>,
}

impl SymBandEigenSoe {
    /// Allocates a new (empty) instance
    pub fn new() -> Self {
        SymBandEigenSoe {
            aa: BandMatrix::new(0, 0),
            mm: Vec::new(),
            values: Vec::new(),
            vectors: Vec::new(),
        }
    }
}

impl EigenSoe for SymBandEigenSoe {
    fn set_size(&mut self, graph: &DofGraph) -> Result<(), StrError> {
        let n = graph.n_equation;
        self.aa = BandMatrix::new(n, graph.half_bandwidth());
        self.mm = vec![0.0; n];
        self.values.clear();
        self.vectors.clear();
        Ok(())
    }

    fn n_equation(&self) -> usize {
        self.aa.dim()
    }

    fn zero_a(&mut self) {
        self.aa.fill_zero();
    }

    fn zero_m(&mut self) {
        self.mm.iter_mut().for_each(|x| *x = 0.0);
    }

    fn add_a(&mut self, kk: &Matrix, loc: &[Option<usize>], fact: f64) -> Result<(), StrError> {
        if kk.dims() != (loc.len(), loc.len()) {
            return Err("the dimensions of the local matrix must equal the length of loc");
        }
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

    fn add_m(&mut self, mm: &Matrix, loc: &[Option<usize>], fact: f64) -> Result<(), StrError> {
        if mm.dims() != (loc.len(), loc.len()) {
            return Err("the dimensions of the local matrix must equal the length of loc");
        }
        for (l, eq) in loc.iter().enumerate() {
            if let Some(i) = eq {
                for (ll, eq_eq) in loc.iter().enumerate() {
                    if eq_eq.is_some() && l != ll && mm.get(l, ll) != 0.0 {
                        return Err("SymBandEigenSoe requires a diagonal mass matrix");
                    }
                }
                self.mm[*i] += fact * mm.get(l, l);
            }
        }
        Ok(())
    }

    fn add_a_diag(&mut self, eq: usize, value: f64) -> Result<(), StrError> {
        if eq >= self.aa.dim() {
            return Err("the equation number is out of range");
        }
        self.aa.add(eq, eq, value)
    }

    fn add_m_diag(&mut self, eq: usize, value: f64) -> Result<(), StrError> {
        if eq >= self.mm.len() {
            return Err("the equation number is out of range");
        }
        self.mm[eq] += value;
        Ok(())
    }

    fn solve(&mut self, n_modes: usize, generalized: bool) -> Result<(), StrError> {
        let n = self.aa.dim();
        check_n_modes(n_modes, n)?;
        let unit = vec![1.0; n];
        let mass = if generalized { &self.mm } else { &unit };
        if mass.iter().any(|m| *m <= 0.0) {
            return Err("SymBandEigenSoe requires a positive diagonal mass matrix");
        }

        // C = M^-½ A M^-½
        let kd = self.aa.half_bandwidth();
        let mut cc = Matrix::new(n, n);
        for i in 0..n {
            let end = usize::min(n, i + kd + 1);
            for j in i..end {
                let c = self.aa.get(i, j) / f64::sqrt(mass[i] * mass[j]);
                cc.set(i, j, c);
                cc.set(j, i, c);
            }
        }

        // eigenvectors of C overwrite the matrix (columns)
        let mut l = Vector::new(n);
        mat_eigen_sym(&mut l, &mut cc, true)?;

        // φ = M^-½ y
        let mut vectors = Vec::with_capacity(n);
        for k in 0..n {
            let mut phi = Vector::new(n);
            for i in 0..n {
                phi[i] = cc.get(i, k) / f64::sqrt(mass[i]);
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
