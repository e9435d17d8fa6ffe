use super::{DofGraph, LinearSoe};
use crate::StrError;
use russell_lab::{Matrix, Vector};
use russell_sparse::{CooMatrix, Genie, LinSolver, Sym};

/// Implements a general sparse system solved by UMFPACK (via russell_sparse)
///
/// The sparsity pattern (compressed rows) is computed from the connectivity of
/// equations. The values are copied into a COO matrix only when A has changed,
/// followed by a new factorization.
pub struct SparseGenLinSoe {
    n_equation: usize,
    row_pointers: Vec<usize>,
    col_indices: Vec<usize>,
    values: Vec<f64>,
    kk: Option<CooMatrix>,
    solver: LinSolver<'static>,
    factored: bool,
    bb: Vector,
    xx: Vector,
}

impl SparseGenLinSoe {
    /// Allocates a new (empty) instance
    pub fn new() -> Result<Self, StrError> {
        Ok(SparseGenLinSoe {
            n_equation: 0,
            row_pointers: vec![0],
            col_indices: Vec::new(),
            values: Vec::new(),
            kk: None,
            solver: LinSolver::new(Genie::Umfpack)?,
            factored: false,
            bb: Vector::new(0),
            xx: Vector::new(0),
        })
    }

    /// Returns the number of non-zero values in the sparsity pattern
    pub fn nnz(&self) -> usize {
        self.col_indices.len()
    }

    fn position(&self, i: usize, j: usize) -> Result<usize, StrError> {
        let start = self.row_pointers[i];
        let end = self.row_pointers[i + 1];
        match self.col_indices[start..end].binary_search(&j) {
            Ok(p) => Ok(start + p),
            Err(_) => Err("the entry is outside the sparsity pattern"),
        }
    }
}

impl LinearSoe for SparseGenLinSoe {
    fn set_size(&mut self, graph: &DofGraph) -> Result<(), StrError> {
        let n = graph.n_equation;
        self.n_equation = n;
        self.row_pointers = Vec::with_capacity(n + 1);
        self.col_indices = Vec::with_capacity(graph.nnz());
        self.row_pointers.push(0);
        for (i, neighbors) in graph.adjacency.iter().enumerate() {
            let mut diagonal_added = false;
            for j in neighbors {
                if !diagonal_added && *j > i {
                    self.col_indices.push(i);
                    diagonal_added = true;
                }
                self.col_indices.push(*j);
            }
            if !diagonal_added {
                self.col_indices.push(i);
            }
            self.row_pointers.push(self.col_indices.len());
        }
        self.values = vec![0.0; self.col_indices.len()];
        self.kk = if n > 0 {
            Some(CooMatrix::new(n, n, self.col_indices.len(), Sym::No)?)
        } else {
            None
        };
        self.solver = LinSolver::new(Genie::Umfpack)?;
        self.factored = false;
        self.bb = Vector::new(n);
        self.xx = Vector::new(n);
        Ok(())
    }

    fn n_equation(&self) -> usize {
        self.n_equation
    }

    fn zero_a(&mut self) {
        self.values.iter_mut().for_each(|x| *x = 0.0);
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
                        let p = self.position(*i, *j)?;
                        self.values[p] += fact * kk.get(l, ll);
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
        let p = self.position(eq, eq)?;
        self.values[p] += value;
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
        let kk = match self.kk.as_mut() {
            Some(kk) => kk,
            None => return Ok(()),
        };
        if !self.factored {
            kk.reset();
            for i in 0..self.n_equation {
                for p in self.row_pointers[i]..self.row_pointers[i + 1] {
                    kk.put(i, self.col_indices[p], self.values[p])?;
                }
            }
            self.solver.actual.factorize(kk, None)?;
            self.factored = true;
        }
        self.solver.actual.solve(&mut self.xx, &self.bb, false)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::SparseGenLinSoe;
    use crate::soe::{DofGraph, LinearSoe};
    use russell_lab::{vec_approx_eq, Matrix, Vector};

    #[test]
    fn set_size_computes_the_pattern() {
        let mut graph = DofGraph::new(3);
        graph.add_connectivity(&[Some(0), Some(2)]);
        let mut soe = SparseGenLinSoe::new().unwrap();
        soe.set_size(&graph).unwrap();
        assert_eq!(soe.nnz(), graph.nnz());
        assert_eq!(soe.row_pointers, &[0, 2, 3, 5]);
        assert_eq!(soe.col_indices, &[0, 2, 1, 0, 2]);
        let kk = Matrix::from(&[[1.0, 1.0], [1.0, 1.0]]);
        assert_eq!(
            soe.add_a(&kk, &[Some(0), Some(1)], 1.0).err(),
            Some("the entry is outside the sparsity pattern")
        );
    }

    #[test]
    fn solve_works_with_unsymmetric_matrix() {
        #[rustfmt::skip]
        let aa = Matrix::from(&[
            [2.0, 1.0, 0.0],
            [0.0, 3.0, 1.0],
            [1.0, 0.0, 4.0],
        ]);
        let loc = [Some(0), Some(1), Some(2)];
        let mut graph = DofGraph::new(3);
        graph.add_connectivity(&loc);
        let mut soe = SparseGenLinSoe::new().unwrap();
        soe.set_size(&graph).unwrap();
        soe.add_a(&aa, &loc, 1.0).unwrap();
        soe.set_b(&Vector::from(&[3.0, 4.0, 5.0])).unwrap();
        soe.solve().unwrap();
        vec_approx_eq(soe.x(), &Vector::from(&[1.0, 1.0, 1.0]), 1e-14);
    }

    #[test]
    fn solve_refactorizes_after_assembly_and_resize() {
        #[rustfmt::skip]
        let aa = Matrix::from(&[
            [2.0, 1.0, 0.0],
            [0.0, 3.0, 1.0],
            [1.0, 0.0, 4.0],
        ]);
        let loc = [Some(0), Some(1), Some(2)];
        let mut graph = DofGraph::new(3);
        graph.add_connectivity(&loc);
        let mut soe = SparseGenLinSoe::new().unwrap();
        soe.set_size(&graph).unwrap();
        soe.add_a(&aa, &loc, 1.0).unwrap();
        soe.set_b(&Vector::from(&[3.0, 4.0, 5.0])).unwrap();
        soe.solve().unwrap();

        // same pattern, doubled values
        soe.zero_a();
        soe.add_a(&aa, &loc, 2.0).unwrap();
        soe.solve().unwrap();
        vec_approx_eq(soe.x(), &Vector::from(&[0.5, 0.5, 0.5]), 1e-14);

        // new pattern
        let loc = [Some(0), Some(1)];
        let mut graph = DofGraph::new(2);
        graph.add_connectivity(&loc);
        soe.set_size(&graph).unwrap();
        soe.add_a(&Matrix::from(&[[4.0, 1.0], [2.0, 3.0]]), &loc, 1.0).unwrap();
        soe.set_b(&Vector::from(&[5.0, 5.0])).unwrap();
        soe.solve().unwrap();
        vec_approx_eq(soe.x(), &Vector::from(&[1.0, 1.0]), 1e-14);
    }
}
