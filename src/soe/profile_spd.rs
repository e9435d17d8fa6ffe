use super::{DofGraph, LinearSoe};
use crate::StrError;
use russell_lab::{Matrix, Vector};

/// Implements a symmetric positive-definite system with profile (skyline) storage
///
/// Each column j of the upper triangle is stored from its first connected row
/// `top[j] = j - height[j]` down to the diagonal. The matrix is factorized as
/// A = Uᵀ D U by the active-column method; the factors overwrite a copy of A.
pub struct ProfileSpdLinSoe {
    n_equation: usize,
    top: Vec<usize>,
    start: Vec<usize>,
    aa: Vec<f64>,
    factor: Vec<f64>,
    factored: bool,
    bb: Vector,
    xx: Vector,
}

impl ProfileSpdLinSoe {
    /// Allocates a new (empty) instance
    pub fn new() -> Self {
        ProfileSpdLinSoe {
            n_equation: 0,
            top: Vec::new(),
            start: Vec::new(),
            aa: Vec::new(),
            factor: Vec::new(),
            factored: false,
            bb: Vector::new(0),
            xx: Vector::new(0),
        }
    }

    /// Returns the number of stored values
    pub fn profile_size(&self) -> usize {
        self.aa.len()
    }

    /// Returns A[i][j] (zero outside the profile)
    pub fn get(&self, i: usize, j: usize) -> f64 {
        let (i, j) = if i <= j { (i, j) } else { (j, i) };
        if i < self.top[j] {
            0.0
        } else {
            self.aa[self.start[j] + i - self.top[j]]
        }
    }

    #[inline]
    fn idx(&self, i: usize, j: usize) -> usize {
        self.start[j] + i - self.top[j]
    }

    fn add_entry(&mut self, i: usize, j: usize, value: f64) -> Result<(), StrError> {
        if i < self.top[j] {
            return Err("the entry is outside the profile");
        }
        let k = self.idx(i, j);
        self.aa[k] += value;
        Ok(())
    }

    fn factorize(&mut self) -> Result<(), StrError> {
        self.factor.clone_from(&self.aa);
        for j in 0..self.n_equation {
            let top_j = self.top[j];
            // g(i,j) = a(i,j) - Σ u(k,i) g(k,j)
            for i in top_j..j {
                let k0 = usize::max(self.top[i], top_j);
                let mut s = self.factor[self.idx(i, j)];
                for k in k0..i {
                    s -= self.factor[self.idx(k, i)] * self.factor[self.idx(k, j)];
                }
                let ij = self.idx(i, j);
                self.factor[ij] = s;
            }
            // u(i,j) = g(i,j) / d(i) and d(j)
            let mut d = self.factor[self.idx(j, j)];
            for i in top_j..j {
                let ij = self.idx(i, j);
                let g = self.factor[ij];
                let u = g / self.factor[self.idx(i, i)];
                d -= u * g;
                self.factor[ij] = u;
            }
            if d <= 0.0 {
                return Err("matrix is not positive definite");
            }
            let jj = self.idx(j, j);
            self.factor[jj] = d;
        }
        Ok(())
    }

    fn substitute(&mut self) {
        let n = self.n_equation;
        for i in 0..n {
            self.xx[i] = self.bb[i];
        }
        // Uᵀ z = b
        for i in 0..n {
            let mut s = self.xx[i];
            for k in self.top[i]..i {
                s -= self.factor[self.idx(k, i)] * self.xx[k];
            }
            self.xx[i] = s;
        }
        // D y = z
        for i in 0..n {
            self.xx[i] /= self.factor[self.idx(i, i)];
        }
        // U x = y
        for j in (0..n).rev() {
            let xj = self.xx[j];
            for k in self.top[j]..j {
                self.xx[k] -= self.factor[self.idx(k, j)] * xj;
            }
        }
    }
}

impl LinearSoe for ProfileSpdLinSoe {
    fn set_size(&mut self, graph: &DofGraph) -> Result<(), StrError> {
        let n = graph.n_equation;
        let heights = graph.column_heights();
        self.n_equation = n;
        self.top = Vec::with_capacity(n);
        self.start = Vec::with_capacity(n);
        let mut size = 0;
        for (j, h) in heights.iter().enumerate() {
            self.top.push(j - h);
            self.start.push(size);
            size += h + 1;
        }
        self.aa = vec![0.0; size];
        self.factor = vec![0.0; size];
        self.factored = false;
        self.bb = Vector::new(n);
        self.xx = Vector::new(n);
        Ok(())
    }

    fn n_equation(&self) -> usize {
        self.n_equation
    }

    fn zero_a(&mut self) {
        self.aa.iter_mut().for_each(|x| *x = 0.0);
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
                            self.add_entry(*i, *j, fact * kk.get(l, ll))?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn add_diag(&mut self, eq: usize, value: f64) -> Result<(), StrError> {
        if eq >= self.n_equation {
            return Err("the equation number is out of range");
        }
        self.factored = false;
        self.add_entry(eq, eq, value)
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
        if !self.factored {
            self.factorize()?;
            self.factored = true;
        }
        self.substitute();
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::ProfileSpdLinSoe;
    use crate::soe::{DofGraph, LinearSoe};
    use russell_lab::{approx_eq, mat_vec_mul, vec_approx_eq, Matrix, Vector};

    #[test]
    fn profile_storage_works() {
        // arrow-shaped pattern: 0 connected to 3, others banded
        let mut graph = DofGraph::new(4);
        graph.add_connectivity(&[Some(0), Some(1)]);
        graph.add_connectivity(&[Some(1), Some(2)]);
        graph.add_connectivity(&[Some(0), Some(3)]);
        let mut soe = ProfileSpdLinSoe::new();
        soe.set_size(&graph).unwrap();
        // heights: [0, 1, 1, 3]
        assert_eq!(soe.profile_size(), 1 + 2 + 2 + 4);
        let kk = Matrix::from(&[[1.0, 2.0], [2.0, 5.0]]);
        assert_eq!(
            soe.add_a(&kk, &[Some(0), Some(2)], 1.0).err(),
            Some("the entry is outside the profile")
        );
        soe.add_a(&kk, &[Some(0), Some(3)], 1.0).unwrap();
        assert_eq!(soe.get(3, 0), 2.0);
        assert_eq!(soe.get(0, 2), 0.0);
    }

    #[test]
    fn solve_works() {
        #[rustfmt::skip]
        let aa = Matrix::from(&[
            [ 5.0, -1.0,  0.0,  1.0],
            [-1.0,  4.0, -1.0,  0.0],
            [ 0.0, -1.0,  4.0, -1.0],
            [ 1.0,  0.0, -1.0,  3.0],
        ]);
        let mut graph = DofGraph::new(4);
        let loc = [Some(0), Some(1), Some(2), Some(3)];
        graph.add_connectivity(&loc);
        let mut soe = ProfileSpdLinSoe::new();
        soe.set_size(&graph).unwrap();
        soe.add_a(&aa, &loc, 1.0).unwrap();
        let x_correct = Vector::from(&[1.0, -1.0, 2.0, 0.5]);
        let mut b = Vector::new(4);
        mat_vec_mul(&mut b, 1.0, &aa, &x_correct).unwrap();
        soe.set_b(&b).unwrap();
        soe.solve().unwrap();
        vec_approx_eq(soe.x(), &x_correct, 1e-14);
        approx_eq(soe.get(1, 2), -1.0, 1e-15);

        soe.zero_a();
        soe.add_a(&aa, &loc, -1.0).unwrap();
        assert_eq!(soe.solve().err(), Some("matrix is not positive definite"));
    }
}
