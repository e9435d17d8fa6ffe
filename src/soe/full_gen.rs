use super::{DofGraph, LinearSoe};
use crate::base::assemble_matrix;
use crate::StrError;
use russell_lab::{solve_lin_sys, vec_copy, Matrix, Vector};

/// Implements a dense general system solved by LU decomposition with partial pivoting
pub struct FullGenLinSoe {
    n_equation: usize,
    aa: Matrix,
    bb: Vector,
    xx: Vector,

    // copy of A overwritten by the factorization
    work: Matrix,
}

impl FullGenLinSoe {
    /// Allocates a new (empty) instance
    pub fn new() -> Self {
        FullGenLinSoe {
            n_equation: 0,
            aa: Matrix::new(0, 0),
            bb: Vector::new(0),
            xx: Vector::new(0),
            work: Matrix::new(0, 0),
        }
    }

    /// Returns the matrix A
    pub fn a(&self) -> &Matrix {
        &self.aa
    }
}

impl LinearSoe for FullGenLinSoe {
    fn set_size(&mut self, graph: &DofGraph) -> Result<(), StrError> {
        let n = graph.n_equation;
        self.n_equation = n;
        self.aa = Matrix::new(n, n);
        self.bb = Vector::new(n);
        self.xx = Vector::new(n);
        self.work = Matrix::new(n, n);
        Ok(())
    }

    fn n_equation(&self) -> usize {
        self.n_equation
    }

    fn zero_a(&mut self) {
        self.aa.fill(0.0);
    }

    fn zero_b(&mut self) {
        self.bb.fill(0.0);
    }

    fn add_a(&mut self, kk: &Matrix, loc: &[Option<usize>], fact: f64) -> Result<(), StrError> {
        if kk.dims() != (loc.len(), loc.len()) {
            return Err("the dimensions of the local matrix must equal the length of loc");
        }
        assemble_matrix(&mut self.aa, kk, loc, fact);
        Ok(())
    }

    fn add_diag(&mut self, eq: usize, value: f64) -> Result<(), StrError> {
        if eq >= self.n_equation {
            return Err("the equation number is out of range");
        }
        let v = self.aa.get(eq, eq);
        self.aa.set(eq, eq, v + value);
        Ok(())
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
        if self.n_equation == 0 {
            return Ok(());
        }
        for i in 0..self.n_equation {
            for j in 0..self.n_equation {
                self.work.set(i, j, self.aa.get(i, j));
            }
        }
        vec_copy(&mut self.xx, &self.bb)?;
        solve_lin_sys(&mut self.xx, &mut self.work)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
