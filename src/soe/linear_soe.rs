use super::{BandSpdLinSoe, DofGraph, FullGenLinSoe, ProfileSpdLinSoe, SparseGenLinSoe};
use crate::base::{assemble_vector, LinearSystemKind};
use crate::StrError;
use russell_lab::{vec_norm, Matrix, Norm, Vector};

/// Defines the system of linear equations A x = b
///
/// The matrix A is assembled from local (element) matrices through `loc` arrays in which
/// `None` marks a local DOF without an equation. The solution is available from `x()` after `solve`.
pub trait LinearSoe {
    /// Allocates the storage according to the connectivity of equations
    ///
    /// All values are set to zero.
    fn set_size(&mut self, graph: &DofGraph) -> Result<(), StrError>;

    /// Returns the number of equations
    fn n_equation(&self) -> usize;

    /// Sets all values of A to zero
    fn zero_a(&mut self);

    /// Sets all values of b to zero
    fn zero_b(&mut self);

    /// Adds fact · kk into A
    fn add_a(&mut self, kk: &Matrix, loc: &[Option<usize>], fact: f64) -> Result<(), StrError>;

    /// Adds value to the diagonal entry A[eq][eq]
    fn add_diag(&mut self, eq: usize, value: f64) -> Result<(), StrError>;

    /// Returns the right-hand side b
    fn b(&self) -> &Vector;

    /// Returns an access to the right-hand side b
    fn b_mut(&mut self) -> &mut Vector;

    /// Returns the solution x
    fn x(&self) -> &Vector;

    /// Returns an access to the solution x
    fn x_mut(&mut self) -> &mut Vector;

    /// Solves the system and stores the result in x
    ///
    /// The factorization is reused if A has not changed since the last call.
    fn solve(&mut self) -> Result<(), StrError>;

    /// Adds fact · r into b
    fn add_b(&mut self, r: &Vector, loc: &[Option<usize>], fact: f64) {
        assemble_vector(self.b_mut(), r, loc, fact);
    }

    /// Adds value to b[eq]
    fn add_b_at(&mut self, eq: usize, value: f64) {
        self.b_mut()[eq] += value;
    }

    /// Sets b equal to the given vector
    fn set_b(&mut self, values: &Vector) -> Result<(), StrError> {
        let b = self.b_mut();
        if values.dim() != b.dim() {
            return Err("the dimension of the vector must equal the number of equations");
        }
        for i in 0..b.dim() {
            b[i] = values[i];
        }
        Ok(())
    }

    /// Returns the Euclidean norm of b
    fn b_norm(&self) -> f64 {
        vec_norm(self.b(), Norm::Euc)
    }
}

/// Holds the system of linear equations selected by `LinearSystemKind`
pub struct LinearSystem {
    /// Holds the actual implementation
    pub actual: Box<dyn LinearSoe>,
}

impl LinearSystem {
    /// Allocates a new (empty) instance; call `actual.set_size` before assembling
    pub fn new(kind: LinearSystemKind) -> Result<Self, StrError> {
        let actual: Box<dyn LinearSoe> = match kind {
            LinearSystemKind::FullGeneral => Box::new(FullGenLinSoe::new()),
            LinearSystemKind::BandSpd => Box::new(BandSpdLinSoe::new()),
            LinearSystemKind::ProfileSpd => Box::new(ProfileSpdLinSoe::new()),
            LinearSystemKind::SparseGeneral => Box::new(SparseGenLinSoe::new()?),
        };
        Ok(LinearSystem { actual })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
