use super::{check_n_modes, sort_eigenpairs, BandMatrix, DofGraph, EigenSoe};
use crate::StrError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use russell_lab::{mat_eigen_sym, vec_inner, Matrix, Vector};
use std::mem;

/// Implements a shift-invert Lanczos eigen solver with band storage of A and M
///
/// The Lanczos process is applied to the operator
///
/// ```text
/// OP = (A - σ M)⁻¹ M
/// ```
///
/// in the M-inner product, with full reorthogonalization. The Ritz values θ of OP
/// with the largest magnitude yield the eigenvalues closest to the shift: λ = σ + 1/θ.
/// When the Ritz pairs have not converged, the process is restarted from the sum
/// of the wanted Ritz vectors. M may be semi-definite (massless DOFs).
pub struct BandArpackSoe {
    shift: f64,
    tol: f64,
    max_restarts: usize,
    aa: BandMatrix,
    mm: BandMatrix,
    values: Vec<f64>,
    vectors: Vec<Vector>,
    rng: StdRng,
}

/// Seed of the generator of starting vectors (runs are reproducible)
const SEED: u64 = 20240901;

/// Holds the Lanczos basis and the tridiagonal matrix T
struct Lanczos {
    vv: Vec<Vector>,
    mvv: Vec<Vector>,
    alpha: Vec<f64>,
    beta: Vec<f64>,
    beta_last: f64,
}

impl BandArpackSoe {
    /// Allocates a new (empty) instance
    ///
    /// # Input
    ///
    /// * `shift` -- the shift σ; eigenvalues closest to σ are computed
    /// * `tol` -- relative tolerance of the Ritz values
    /// * `max_restarts` -- maximum number of restarts of the Lanczos process
    pub fn new(shift: f64, tol: f64, max_restarts: usize) -> Result<Self, StrError> {
        if !shift.is_finite() {
            return Err("eigen shift must be finite");
        }
        if tol <= 0.0 {
            return Err("eigen tolerance must be > 0.0");
        }
        Ok(BandArpackSoe {
            shift,
            tol,
            max_restarts,
            aa: BandMatrix::new(0, 0),
            mm: BandMatrix::new(0, 0),
            values: Vec::new(),
            vectors: Vec::new(),
            rng: StdRng::seed_from_u64(SEED),
        })
    }

    /// Returns a pseudo-random vector with components in [-0.5, 0.5)
    fn random_vector(&mut self, n: usize) -> Vector {
        let mut r = Vector::new(n);
        for i in 0..n {
            r[i] = self.rng.gen_range(-0.5..0.5);
        }
        r
    }

    /// Orthogonalizes w against the basis (twice) and returns the M-norm of the result
    fn orthogonalize(&self, w: &mut Vector, mw: &mut Vector, vv: &[Vector], mvv: &[Vector]) -> f64 {
        let n = w.dim();
        for _ in 0..2 {
            for (v, mv) in vv.iter().zip(mvv.iter()) {
                let c = vec_inner(w, mv);
                for i in 0..n {
                    w[i] -= c * v[i];
                }
            }
        }
        self.mm.mat_vec_mul(mw, w);
        f64::sqrt(f64::max(vec_inner(w, mw), 0.0))
    }

    /// Runs the Lanczos process with ncv vectors starting from a vector in the range of OP
    fn lanczos(&mut self, factor: &BandMatrix, start: &Vector, ncv: usize) -> Result<Lanczos, StrError> {
        let n = start.dim();
        let mut lz = Lanczos {
            vv: Vec::with_capacity(ncv),
            mvv: Vec::with_capacity(ncv),
            alpha: Vec::with_capacity(ncv),
            beta: Vec::with_capacity(ncv),
            beta_last: 0.0,
        };

        // v₁ = start / ‖start‖_M
        let mut w = start.clone();
        let mut mw = Vector::new(n);
        self.mm.mat_vec_mul(&mut mw, &w);
        let norm = f64::sqrt(f64::max(vec_inner(&w, &mw), 0.0));
        if norm <= f64::MIN_POSITIVE {
            return Err("cannot generate the starting vector of the Lanczos process");
        }
        let mut v = Vector::new(n);
        let mut mv = Vector::new(n);
        for i in 0..n {
            v[i] = w[i] / norm;
            mv[i] = mw[i] / norm;
        }

        let mut scale: f64 = 0.0;
        loop {
            // w = OP v = (A - σ M)⁻¹ M v
            for i in 0..n {
                w[i] = mv[i];
            }
            factor.ldlt_solve(&mut w);
            let alpha = vec_inner(&w, &mv);
            scale = f64::max(scale, f64::abs(alpha));
            lz.vv.push(v.clone());
            lz.mvv.push(mv.clone());
            lz.alpha.push(alpha);

            let mut beta = self.orthogonalize(&mut w, &mut mw, &lz.vv, &lz.mvv);
            if lz.vv.len() == ncv {
                lz.beta_last = beta;
                break;
            }

            // invariant subspace: continue with a new random direction (decoupled block of T)
            if beta <= 1e-10 * scale {
                let r = self.random_vector(n);
                self.mm.mat_vec_mul(&mut mw, &r);
                for i in 0..n {
                    w[i] = mw[i];
                }
                factor.ldlt_solve(&mut w);
                self.mm.mat_vec_mul(&mut mw, &w);
                let norm_before = f64::sqrt(f64::max(vec_inner(&w, &mw), 0.0));
                let norm_after = self.orthogonalize(&mut w, &mut mw, &lz.vv, &lz.mvv);
                if norm_after <= 1e-8 * norm_before {
                    lz.beta_last = 0.0;
                    break;
                }
                lz.beta.push(0.0);
                beta = norm_after;
            } else {
                lz.beta.push(beta);
            }
            for i in 0..n {
                v[i] = w[i] / beta;
                mv[i] = mw[i] / beta;
            }
        }
        Ok(lz)
    }

    /// Solves A φ = λ M φ with the stored M
    fn solve_generalized(&mut self, n_modes: usize) -> Result<(), StrError> {
        let n = self.aa.dim();
        let n_mass = (0..n).filter(|i| self.mm.get(*i, *i) > 0.0).count();
        if n_modes > n_mass {
            return Err("the number of modes exceeds the number of DOFs with mass");
        }

        // factorize A - σ M
        let mut factor = self.aa.clone();
        if self.shift != 0.0 {
            factor.add_scaled(-self.shift, &self.mm)?;
        }
        factor.ldlt()?;

        // start vector in the range of OP
        let ncv = usize::min(n, usize::max(2 * n_modes + 1, 20));
        self.rng = StdRng::seed_from_u64(SEED);
        let r = self.random_vector(n);
        let mut start = Vector::new(n);
        self.mm.mat_vec_mul(&mut start, &r);
        factor.ldlt_solve(&mut start);

        for restart in 0..(self.max_restarts + 1) {
            let lz = self.lanczos(&factor, &start, ncv)?;
            let m = lz.vv.len();
            if m < n_modes {
                return Err("the Lanczos basis is smaller than the number of modes");
            }

            // Ritz values of OP (eigenvectors of T overwrite T)
            let mut tt = Matrix::new(m, m);
            for j in 0..m {
                tt.set(j, j, lz.alpha[j]);
                if j + 1 < m {
                    tt.set(j, j + 1, lz.beta[j]);
                    tt.set(j + 1, j, lz.beta[j]);
                }
            }
            let mut theta = Vector::new(m);
            mat_eigen_sym(&mut theta, &mut tt, true)?;

            // wanted: largest |θ|
            let mut order: Vec<usize> = (0..m).collect();
            order.sort_by(|a, b| f64::abs(theta[*b]).total_cmp(&f64::abs(theta[*a])));
            order.truncate(n_modes);

            let converged = order.iter().all(|k| {
                let residual = f64::abs(lz.beta_last * tt.get(m - 1, *k));
                residual <= self.tol * f64::abs(theta[*k])
            });

            // Ritz vectors x = V s
            let mut ritz = Vec::with_capacity(n_modes);
            for k in &order {
                let mut x = Vector::new(n);
                for (j, v) in lz.vv.iter().enumerate() {
                    let s = tt.get(j, *k);
                    for i in 0..n {
                        x[i] += s * v[i];
                    }
                }
                ritz.push(x);
            }

            if converged {
                let mut values = Vec::with_capacity(n_modes);
                for k in &order {
                    if theta[*k] == 0.0 {
                        return Err("the shift-invert operator has a zero Ritz value");
                    }
                    values.push(self.shift + 1.0 / theta[*k]);
                }
                let (values, vectors) = sort_eigenpairs(values, ritz, n_modes);
                self.values = values;
                self.vectors = vectors;
                return Ok(());
            }
            if restart == self.max_restarts {
                break;
            }
            start.fill(0.0);
            for x in &ritz {
                for i in 0..n {
                    start[i] += x[i];
                }
            }
        }
        Err("the shift-invert Lanczos process did not converge")
    }
}

impl EigenSoe for BandArpackSoe {
    fn set_size(&mut self, graph: &DofGraph) -> Result<(), StrError> {
        let n = graph.n_equation;
        let kd = graph.half_bandwidth();
        self.aa = BandMatrix::new(n, kd);
        self.mm = BandMatrix::new(n, kd);
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
        self.mm.fill_zero();
    }

    fn add_a(&mut self, kk: &Matrix, loc: &[Option<usize>], fact: f64) -> Result<(), StrError> {
        add_to_band(&mut self.aa, kk, loc, fact)
    }

    fn add_m(&mut self, mm: &Matrix, loc: &[Option<usize>], fact: f64) -> Result<(), StrError> {
        add_to_band(&mut self.mm, mm, loc, fact)
    }

    fn add_a_diag(&mut self, eq: usize, value: f64) -> Result<(), StrError> {
        if eq >= self.aa.dim() {
            return Err("the equation number is out of range");
        }
        self.aa.add(eq, eq, value)
    }

    fn add_m_diag(&mut self, eq: usize, value: f64) -> Result<(), StrError> {
        if eq >= self.mm.dim() {
            return Err("the equation number is out of range");
        }
        self.mm.add(eq, eq, value)
    }

    fn solve(&mut self, n_modes: usize, generalized: bool) -> Result<(), StrError> {
        let n = self.aa.dim();
        check_n_modes(n_modes, n)?;
        if generalized {
            return self.solve_generalized(n_modes);
        }

        // the assembled M is kept aside and restored afterwards
        let mut identity = BandMatrix::new(n, self.mm.half_bandwidth());
        for i in 0..n {
            identity.add(i, i, 1.0)?;
        }
        let assembled = mem::replace(&mut self.mm, identity);
        let res = self.solve_generalized(n_modes);
        self.mm = assembled;
        res
    }

    fn eigenvalues(&self) -> &[f64] {
        &self.values
    }

    fn eigenvectors(&self) -> &[Vector] {
        &self.vectors
    }
}

/// Adds the upper triangle of fact · kk into a band matrix
fn add_to_band(band: &mut BandMatrix, kk: &Matrix, loc: &[Option<usize>], fact: f64) -> Result<(), StrError> {
    if kk.dims() != (loc.len(), loc.len()) {
        return Err("the dimensions of the local matrix must equal the length of loc");
    }
    for (l, eq) in loc.iter().enumerate() {
        if let Some(i) = eq {
            for (ll, eq_eq) in loc.iter().enumerate() {
                if let Some(j) = eq_eq {
                    if i <= j {
                        band.add(*i, *j, fact * kk.get(l, ll))?;
                    }
                }
            }
        }
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
