use crate::StrError;
use russell_lab::Vector;

/// Holds a symmetric band matrix with the upper triangle stored column by column
///
/// The storage follows the LAPACK `dpbtrf` layout with `kd` super-diagonals:
///
/// ```text
/// a(i,j) is stored at data[j·(kd+1) + kd + i - j]   for max(0, j-kd) ≤ i ≤ j
/// ```
///
/// After `cholesky`, the storage holds U such that A = Uᵀ U.
/// After `ldlt`, the storage holds the unit upper factor U (off-diagonal) and D (diagonal)
/// such that A = Uᵀ D U.
#[derive(Clone, Debug)]
pub struct BandMatrix {
    n: usize,
    kd: usize,
    data: Vec<f64>,
}

impl BandMatrix {
    /// Allocates a new (zero) matrix with dimension n and half-bandwidth kd
    pub fn new(n: usize, kd: usize) -> Self {
        BandMatrix {
            n,
            kd,
            data: vec![0.0; n * (kd + 1)],
        }
    }

    /// Returns the dimension
    pub fn dim(&self) -> usize {
        self.n
    }

    /// Returns the half-bandwidth (number of super-diagonals)
    pub fn half_bandwidth(&self) -> usize {
        self.kd
    }

    /// Sets all values to zero
    pub fn fill_zero(&mut self) {
        self.data.iter_mut().for_each(|x| *x = 0.0);
    }

    #[inline]
    fn idx(&self, i: usize, j: usize) -> usize {
        j * (self.kd + 1) + self.kd + i - j
    }

    /// Returns a(i,j) using the symmetry; entries outside the band are zero
    pub fn get(&self, i: usize, j: usize) -> f64 {
        let (i, j) = if i <= j { (i, j) } else { (j, i) };
        if j - i > self.kd {
            0.0
        } else {
            self.data[self.idx(i, j)]
        }
    }

    /// Adds value to a(i,j) with i ≤ j
    pub fn add(&mut self, i: usize, j: usize, value: f64) -> Result<(), StrError> {
        if i > j {
            return Err("only the upper triangle can be assembled in a band matrix");
        }
        if j - i > self.kd {
            return Err("the entry is outside the band");
        }
        let k = self.idx(i, j);
        self.data[k] += value;
        Ok(())
    }

    /// Performs A += alpha · B where B has the same dimension and half-bandwidth
    pub fn add_scaled(&mut self, alpha: f64, other: &BandMatrix) -> Result<(), StrError> {
        if other.n != self.n || other.kd != self.kd {
            return Err("band matrices must have the same dimension and half-bandwidth");
        }
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += alpha * b;
        }
        Ok(())
    }

    /// Computes y = A x
    pub fn mat_vec_mul(&self, y: &mut Vector, x: &Vector) {
        for i in 0..self.n {
            let start = if i > self.kd { i - self.kd } else { 0 };
            let end = usize::min(self.n, i + self.kd + 1);
            let mut sum = 0.0;
            for j in start..end {
                sum += self.get(i, j) * x[j];
            }
            y[i] = sum;
        }
    }

    /// Performs the Cholesky factorization A = Uᵀ U in place
    pub fn cholesky(&mut self) -> Result<(), StrError> {
        let (n, kd) = (self.n, self.kd);
        for j in 0..n {
            let k0 = if j > kd { j - kd } else { 0 };
            let mut s = self.data[self.idx(j, j)];
            for k in k0..j {
                let u = self.data[self.idx(k, j)];
                s -= u * u;
            }
            if s <= 0.0 {
                return Err("matrix is not positive definite");
            }
            let ujj = f64::sqrt(s);
            let jj = self.idx(j, j);
            self.data[jj] = ujj;
            for i in (j + 1)..usize::min(n, j + kd + 1) {
                let k0 = if i > kd { i - kd } else { 0 };
                let mut s = self.data[self.idx(j, i)];
                for k in k0..j {
                    s -= self.data[self.idx(k, j)] * self.data[self.idx(k, i)];
                }
                let ji = self.idx(j, i);
                self.data[ji] = s / ujj;
            }
        }
        Ok(())
    }

    /// Solves A x = b using the Cholesky factor; x holds b on input
    pub fn cholesky_solve(&self, x: &mut Vector) {
        let (n, kd) = (self.n, self.kd);
        // Uᵀ y = b
        for i in 0..n {
            let k0 = if i > kd { i - kd } else { 0 };
            let mut s = x[i];
            for k in k0..i {
                s -= self.data[self.idx(k, i)] * x[k];
            }
            x[i] = s / self.data[self.idx(i, i)];
        }
        // U x = y
        for i in (0..n).rev() {
            let mut s = x[i];
            for k in (i + 1)..usize::min(n, i + kd + 1) {
                s -= self.data[self.idx(i, k)] * x[k];
            }
            x[i] = s / self.data[self.idx(i, i)];
        }
    }

    /// Performs the factorization A = Uᵀ D U (without pivoting) in place
    ///
    /// The matrix may be indefinite but all pivots must be non-zero.
    pub fn ldlt(&mut self) -> Result<(), StrError> {
        let (n, kd) = (self.n, self.kd);
        let mut scale = 0.0;
        for j in 0..n {
            scale = f64::max(scale, f64::abs(self.data[self.idx(j, j)]));
        }
        let tiny = f64::EPSILON * f64::max(scale, f64::MIN_POSITIVE);
        for j in 0..n {
            let k0 = if j > kd { j - kd } else { 0 };
            let mut d = self.data[self.idx(j, j)];
            for k in k0..j {
                let u = self.data[self.idx(k, j)];
                d -= u * u * self.data[self.idx(k, k)];
            }
            if f64::abs(d) <= tiny {
                return Err("matrix is singular");
            }
            let jj = self.idx(j, j);
            self.data[jj] = d;
            for i in (j + 1)..usize::min(n, j + kd + 1) {
                let k0 = if i > kd { i - kd } else { 0 };
                let mut s = self.data[self.idx(j, i)];
                for k in k0..j {
                    s -= self.data[self.idx(k, j)] * self.data[self.idx(k, k)] * self.data[self.idx(k, i)];
                }
                let ji = self.idx(j, i);
                self.data[ji] = s / d;
            }
        }
        Ok(())
    }

    /// Solves A x = b using the LDLᵀ factors; x holds b on input
    pub fn ldlt_solve(&self, x: &mut Vector) {
        let (n, kd) = (self.n, self.kd);
        // Uᵀ z = b
        for i in 0..n {
            let k0 = if i > kd { i - kd } else { 0 };
            let mut s = x[i];
            for k in k0..i {
                s -= self.data[self.idx(k, i)] * x[k];
            }
            x[i] = s;
        }
        // D y = z
        for i in 0..n {
            x[i] /= self.data[self.idx(i, i)];
        }
        // U x = y
        for i in (0..n).rev() {
            let mut s = x[i];
            for k in (i + 1)..usize::min(n, i + kd + 1) {
                s -= self.data[self.idx(i, k)] * x[k];
            }
            x[i] = s;
        }
    }

    /// Returns the number of negative pivots after `ldlt` (Sturm sequence count)
    pub fn n_negative_pivots(&self) -> usize {
        (0..self.n).filter(|j| self.data[self.idx(*j, *j)] < 0.0).count()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
