use crate::base::ElementLoad;
use crate::StrError;
use russell_lab::{Matrix, Vector};

/// Defines the trait for structural elements
///
/// The local vectors and matrices are ordered by node and then by DOF within the node, i.e.,
/// `[node0: dof0, dof1, ..., node1: dof0, dof1, ...]`, with `ndf` DOFs per node.
///
/// The element state follows the trial/commit protocol:
///
/// 1. `update` receives the trial displacements (and velocities) and computes the trial state
/// 2. `tangent_stiff` and `resisting_force` return values consistent with the trial state
/// 3. `commit_state` makes the trial state permanent
/// 4. `revert_to_last_commit` discards the trial state
/// 5. `revert_to_start` brings the element back to its initial state
pub trait ElementTrait: Send + Sync {
    /// Returns the node ids
    fn nodes(&self) -> &[usize];

    /// Returns the number of DOFs per node
    fn ndf(&self) -> usize;

    /// Returns the total number of local DOFs
    fn n_dof(&self) -> usize {
        self.nodes().len() * self.ndf()
    }

    /// Computes the trial state given the local trial displacements and velocities
    fn update(&mut self, uu: &Vector, vv: &Vector) -> Result<(), StrError>;

    /// Calculates the tangent stiffness matrix (n_dof × n_dof)
    fn tangent_stiff(&self, kk: &mut Matrix);

    /// Calculates the initial stiffness matrix (n_dof × n_dof)
    fn initial_stiff(&self, kk: &mut Matrix);

    /// Calculates the mass matrix (n_dof × n_dof)
    fn mass(&self, mm: &mut Matrix);

    /// Calculates the resisting force vector minus the equivalent nodal loads of span loads
    fn resisting_force(&self, rr: &mut Vector);

    /// Makes the trial state permanent
    fn commit_state(&mut self);

    /// Sets the trial state equal to the last committed state
    fn revert_to_last_commit(&mut self);

    /// Brings the element to its initial state
    fn revert_to_start(&mut self);

    /// Adds a span load multiplied by `fact`
    fn add_load(&mut self, _load: &ElementLoad, _fact: f64) -> Result<(), StrError> {
        Err("this element does not accept span loads")
    }

    /// Removes all span loads
    fn zero_load(&mut self) {}

    /// Returns the element forces (e.g., axial force) corresponding to the trial state
    fn basic_forces(&self) -> Vec<f64>;
}
