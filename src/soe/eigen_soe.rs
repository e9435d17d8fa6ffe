use super::{BandArpackSoe, DofGraph, FullGenEigenSoe, SymBandEigenSoe};
use crate::base::{Config, EigenSolverKind};
use crate::StrError;
use russell_lab::{Matrix, Vector};

/// Defines the generalized eigenvalue problem A φ = λ M φ
///
/// A is the (symmetric) stiffness and M the (symmetric, positive semi-definite) mass.
/// After `solve`, the eigenvalues are sorted in ascending order and the
/// eigenvectors are M-normalized (φᵀ M φ = 1) with their largest component positive.
pub trait EigenSoe {
    /// Allocates the storage according to the connectivity of equations
    fn set_size(&mut self, graph: &DofGraph) -> Result<(), StrError>;

    /// Returns the number of equations
    fn n_equation(&self) -> usize;

    /// Sets all values of A to zero
    fn zero_a(&mut self);

    /// Sets all values of M to zero
    fn zero_m(&mut self);

    /// Adds fact · kk into A
    fn add_a(&mut self, kk: &Matrix, loc: &[Option<usize>], fact: f64) -> Result<(), StrError>;

    /// Adds fact · mm into M
    fn add_m(&mut self, mm: &Matrix, loc: &[Option<usize>], fact: f64) -> Result<(), StrError>;

    /// Adds value to A[eq][eq]
    fn add_a_diag(&mut self, eq: usize, value: f64) -> Result<(), StrError>;

    /// Adds value to M[eq][eq]
    fn add_m_diag(&mut self, eq: usize, value: f64) -> Result<(), StrError>;

    /// Computes the n_modes lowest eigenpairs
    ///
    /// If `generalized` is false, M is replaced by the identity matrix (standard problem).
    fn solve(&mut self, n_modes: usize, generalized: bool) -> Result<(), StrError>;

    /// Returns all computed eigenvalues (ascending)
    fn eigenvalues(&self) -> &[f64];

    /// Returns all computed eigenvectors
    fn eigenvectors(&self) -> &[Vector];

    /// Returns the number of computed modes
    fn n_modes(&self) -> usize {
        self.eigenvalues().len()
    }

    /// Returns the i-th eigenvalue
    ///
    /// # Panics
    ///
    /// This function will panic if i is out of bounds
    fn eigenvalue(&self, i: usize) -> f64 {
        self.eigenvalues()[i]
    }

    /// Returns the i-th eigenvector
    ///
    /// # Panics
    ///
    /// This function will panic if i is out of bounds
    fn eigenvector(&self, i: usize) -> &Vector {
        &self.eigenvectors()[i]
    }
}

/// Holds the eigen solver selected by `EigenSolverKind`
pub struct EigenSystem {
    /// Holds the actual implementation
    pub actual: Box<dyn EigenSoe>,
}

impl EigenSystem {
    /// Allocates a new (empty) instance; call `actual.set_size` before assembling
    pub fn new(kind: EigenSolverKind, config: &Config) -> Result<Self, StrError> {
        let actual: Box<dyn EigenSoe> = match kind {
            EigenSolverKind::SymBand => Box::new(SymBandEigenSoe::new()),
            EigenSolverKind::BandArpack => Box::new(BandArpackSoe::new(
                config.eigen_shift,
                config.eigen_tol,
                config.eigen_max_restarts,
            )?),
            EigenSolverKind::FullGeneral => Box::new(FullGenEigenSoe::new()),
        };
        Ok(EigenSystem { actual })
    }
}

/// Checks the number of requested modes
pub(crate) fn check_n_modes(n_modes: usize, n_equation: usize) -> Result<(), StrError> {
    if n_modes < 1 || n_modes > n_equation {
        return Err("the number of modes must be ≥ 1 and ≤ the number of equations");
    }
    Ok(())
}

/// Flips the sign of the vector such that its largest (in magnitude) component is positive
///
/// Components with nearly the same magnitude are resolved by taking the first one.
pub(crate) fn normalize_sign(phi: &mut Vector) {
    let mut max_abs = 0.0;
    for i in 0..phi.dim() {
        max_abs = f64::max(max_abs, f64::abs(phi[i]));
    }
    let mut largest = 0.0;
    for i in 0..phi.dim() {
        if f64::abs(phi[i]) >= (1.0 - 1e-8) * max_abs {
            largest = phi[i];
            break;
        }
    }
    if largest < 0.0 {
        for i in 0..phi.dim() {
            phi[i] = -phi[i];
        }
    }
}

/// Sorts the eigenpairs in ascending order of eigenvalues and keeps the first n_modes
pub(crate) fn sort_eigenpairs(values: Vec<f64>, vectors: Vec<Vector>, n_modes: usize) -> (Vec<f64>, Vec<Vector>) {
    let mut pairs: Vec<_> = values.into_iter().zip(vectors.into_iter()).collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
    pairs.truncate(n_modes);
    let mut sorted_values = Vec::with_capacity(pairs.len());
    let mut sorted_vectors = Vec::with_capacity(pairs.len());
    for (value, mut vector) in pairs {
        normalize_sign(&mut vector);
        sorted_values.push(value);
        sorted_vectors.push(vector);
    }
    (sorted_values, sorted_vectors)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
