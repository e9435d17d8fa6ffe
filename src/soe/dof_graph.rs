use std::collections::BTreeSet;

/// Holds the connectivity between equations (the sparsity pattern of the global matrices)
///
/// Two equations are connected if they belong to the same element (or are otherwise coupled).
#[derive(Clone, Debug)]
pub struct DofGraph {
    /// Total number of equations
    pub n_equation: usize,

    /// Holds the equations connected to each equation (excluding the equation itself)
    pub adjacency: Vec<BTreeSet<usize>>,
}

impl DofGraph {
    /// Allocates a new graph without connections
    pub fn new(n_equation: usize) -> Self {
        DofGraph {
            n_equation,
            adjacency: vec![BTreeSet::new(); n_equation],
        }
    }

    /// Connects all equations of a local (element) array; None entries are ignored
    pub fn add_connectivity(&mut self, loc: &[Option<usize>]) {
        for a in loc.iter().flatten() {
            for b in loc.iter().flatten() {
                if a != b {
                    self.adjacency[*a].insert(*b);
                }
            }
        }
    }

    /// Returns the half-bandwidth, i.e., max |i - j| over all connected (i, j)
    pub fn half_bandwidth(&self) -> usize {
        let mut kd = 0;
        for (i, neighbors) in self.adjacency.iter().enumerate() {
            if let Some(first) = neighbors.iter().next() {
                if *first < i {
                    kd = usize::max(kd, i - first);
                }
            }
        }
        kd
    }

    /// Returns the height of each column of the upper triangle (skyline)
    ///
    /// The height of column j is `j - i_min` where `i_min` is the smallest connected row index ≤ j.
    pub fn column_heights(&self) -> Vec<usize> {
        self.adjacency
            .iter()
            .enumerate()
            .map(|(j, neighbors)| match neighbors.iter().next() {
                Some(first) if *first < j => j - first,
                _ => 0,
            })
            .collect()
    }

    /// Returns the number of non-zero entries of the full (non-symmetric storage) matrix
    pub fn nnz(&self) -> usize {
        self.n_equation + self.adjacency.iter().fold(0, |acc, n| acc + n.len())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::DofGraph;

    #[test]
    fn graph_works() {
        // 0 -- 1 -- 2 -- 3  with equations: node 0 fixed, nodes 1, 2, 3 → 0, 1, 2
        let mut graph = DofGraph::new(3);
        graph.add_connectivity(&[None, Some(0)]);
        graph.add_connectivity(&[Some(0), Some(1)]);
        graph.add_connectivity(&[Some(1), Some(2)]);
        assert_eq!(graph.half_bandwidth(), 1);
        assert_eq!(graph.column_heights(), &[0, 1, 1]);
        assert_eq!(graph.nnz(), 7);

        // add a long-range connection
        graph.add_connectivity(&[Some(0), Some(2)]);
        assert_eq!(graph.half_bandwidth(), 2);
        assert_eq!(graph.column_heights(), &[0, 1, 2]);
        assert_eq!(graph.nnz(), 9);
    }
}
