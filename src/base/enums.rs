use serde::{Deserialize, Serialize};

/// Defines degrees-of-freedom (DOF) types
///
/// Note: The fixed numbering scheme assists in sorting the DOFs.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Dof {
    /// Displacement along the first dimension
    Ux = 0,

    /// Displacement along the second dimension
    Uy = 1,

    /// Displacement along the third dimension
    Uz = 2,

    /// Rotation around the first axis
    Rx = 3,

    /// Rotation around the second axis
    Ry = 4,

    /// Rotation around the third axis
    Rz = 5,
}

impl Dof {
    /// Returns the position of this DOF within a node with `ndf` degrees-of-freedom
    ///
    /// The supported layouts are:
    ///
    /// ```text
    /// ndim = 1, ndf = 1 → [Ux]
    /// ndim = 2, ndf = 2 → [Ux, Uy]
    /// ndim = 2, ndf = 3 → [Ux, Uy, Rz]
    /// ndim = 3, ndf = 3 → [Ux, Uy, Uz]
    /// ndim = 3, ndf = 6 → [Ux, Uy, Uz, Rx, Ry, Rz]
    /// ```
    ///
    /// Returns None if the DOF does not exist in the layout.
    pub fn index(&self, ndim: usize, ndf: usize) -> Option<usize> {
        match (ndim, ndf, self) {
            (1, 1, Dof::Ux) => Some(0),
            (2, 2, Dof::Ux) => Some(0),
            (2, 2, Dof::Uy) => Some(1),
            (2, 3, Dof::Ux) => Some(0),
            (2, 3, Dof::Uy) => Some(1),
            (2, 3, Dof::Rz) => Some(2),
            (3, 3, Dof::Ux) => Some(0),
            (3, 3, Dof::Uy) => Some(1),
            (3, 3, Dof::Uz) => Some(2),
            (3, 6, dof) => Some(*dof as usize),
            _ => None,
        }
    }

    /// Returns the DOF corresponding to the position `index` within a node
    pub fn from_index(ndim: usize, ndf: usize, index: usize) -> Option<Dof> {
        [Dof::Ux, Dof::Uy, Dof::Uz, Dof::Rx, Dof::Ry, Dof::Rz]
            .into_iter()
            .find(|dof| dof.index(ndim, ndf) == Some(index))
    }

    /// Indicates whether this DOF is a translation or not
    pub fn translational(&self) -> bool {
        match self {
            Dof::Ux | Dof::Uy | Dof::Uz => true,
            Dof::Rx | Dof::Ry | Dof::Rz => false,
        }
    }
}

/// Defines how the element mass is distributed to the nodes
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum MassType {
    /// Diagonal (lumped) mass matrix
    Lumped,

    /// Consistent mass matrix
    Consistent,
}

/// Defines the geometric transformation of frame elements
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum Transformation {
    /// Small displacements, no second-order effects
    Linear,

    /// Linear kinematics with the geometric stiffness due to the axial force (P-Δ effects)
    PDelta,
}

/// Defines how single-point constraints are enforced
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub enum ConstraintHandler {
    /// Constrained DOFs do not receive equation numbers (homogeneous constraints only)
    Plain,

    /// Constrained DOFs keep their equations and a penalty `alpha` enforces the prescribed value
    Penalty { alpha: f64 },
}

/// Defines the DOF (equation) numbering scheme
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum Numberer {
    /// Numbers the equations following the order of nodes
    Plain,

    /// Orders the nodes with the reverse Cuthill-McKee algorithm to reduce the bandwidth
    ReverseCuthillMckee,
}

/// Defines the storage scheme and solver of the linear system of equations
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum LinearSystemKind {
    /// Dense general matrix solved by LU decomposition
    FullGeneral,

    /// Symmetric positive-definite banded matrix solved by Cholesky decomposition
    BandSpd,

    /// Symmetric positive-definite skyline (profile) matrix solved by LDLᵀ decomposition
    ProfileSpd,

    /// Sparse general matrix solved by UMFPACK
    SparseGeneral,
}

/// Defines the storage scheme and solver of the eigenvalue problem
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum EigenSolverKind {
    /// Banded stiffness with diagonal (lumped) mass; all eigenpairs of the standard problem
    SymBand,

    /// Banded stiffness and mass; shift-invert Lanczos iterations for a few eigenpairs
    BandArpack,

    /// Dense stiffness and mass; generalized problem via Cholesky decomposition of the mass
    FullGeneral,
}

/// Defines the solution algorithm for each step
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum Algorithm {
    /// Single solution of the linear system per step (no iterations)
    Linear,

    /// Newton-Raphson iterations with the tangent updated at every iteration
    NewtonRaphson,

    /// Newton-Raphson iterations with the tangent formed at the first iteration of each step
    ///
    /// If `initial` is true, the initial stiffness is employed instead of the current tangent.
    ModifiedNewton { initial: bool },
}

/// Defines the convergence criterion of the iterations
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum TestKind {
    /// Euclidean norm of the unbalanced force vector
    NormUnbalance,

    /// Euclidean norm of the displacement increment
    NormDispIncr,

    /// Half of the absolute value of the inner product between increment and unbalance
    EnergyIncr,
}

/// Defines the integrator of static analyses
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub enum StaticIntegrator {
    /// Increments the load factor λ by a constant value
    LoadControl { dlambda: f64 },

    /// Increments one displacement component by a constant value (λ is an unknown)
    ///
    /// The load patterns must vary linearly with λ.
    DisplacementControl { node: usize, dof: Dof, increment: f64 },
}

/// Defines the integrator of transient analyses
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub enum TransientIntegrator {
    /// Newmark's method (e.g., γ = 1/2 and β = 1/4 for the average acceleration method)
    Newmark { gamma: f64, beta: f64 },

    /// Hilber-Hughes-Taylor α-method with 2/3 ≤ α ≤ 1 (α = 1 gives the average acceleration method)
    HilberHughesTaylor { alpha: f64 },
}

/// Defines loads applied along the span of frame elements (in local coordinates)
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub enum ElementLoad {
    /// Uniformly distributed load per unit length
    BeamUniform {
        /// Transverse component (along the local y axis)
        wy: f64,

        /// Axial component (along the local x axis)
        wx: f64,
    },

    /// Point load applied at a distance `a_over_l · L` from the first node
    BeamPoint {
        /// Transverse component (along the local y axis)
        py: f64,

        /// Axial component (along the local x axis)
        px: f64,

        /// Relative position along the element (0 < a_over_l < 1)
        a_over_l: f64,
    },
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{Dof, StaticIntegrator, TransientIntegrator};

    #[test]
    fn dof_index_works() {
        assert_eq!(Dof::Ux.index(1, 1), Some(0));
        assert_eq!(Dof::Uy.index(1, 1), None);
        assert_eq!(Dof::Uy.index(2, 2), Some(1));
        assert_eq!(Dof::Rz.index(2, 2), None);
        assert_eq!(Dof::Rz.index(2, 3), Some(2));
        assert_eq!(Dof::Uz.index(2, 3), None);
        assert_eq!(Dof::Uz.index(3, 3), Some(2));
        assert_eq!(Dof::Rx.index(3, 3), None);
        assert_eq!(Dof::Rx.index(3, 6), Some(3));
        assert_eq!(Dof::Rz.index(3, 6), Some(5));
        assert_eq!(Dof::Ux.index(4, 4), None);
    }

    #[test]
    fn dof_from_index_works() {
        assert_eq!(Dof::from_index(2, 3, 2), Some(Dof::Rz));
        assert_eq!(Dof::from_index(3, 3, 2), Some(Dof::Uz));
        assert_eq!(Dof::from_index(2, 2, 2), None);
        assert!(Dof::Uy.translational());
        assert!(!Dof::Ry.translational());
    }

    #[test]
    fn derive_works() {
        let dof = Dof::Uy;
        let clone = dof.clone();
        assert_eq!(format!("{:?}", clone), "Uy");
        let json = serde_json::to_string(&dof).unwrap();
        let read: Dof = serde_json::from_str(&json).unwrap();
        assert_eq!(read, Dof::Uy);
    }

    #[test]
    fn integrators_deserialize() {
        let scheme: StaticIntegrator = serde_json::from_str(r#"{"LoadControl":{"dlambda":0.1}}"#).unwrap();
        assert_eq!(scheme, StaticIntegrator::LoadControl { dlambda: 0.1 });
        let scheme: StaticIntegrator =
            serde_json::from_str(r#"{"DisplacementControl":{"node":2,"dof":"Uy","increment":-0.01}}"#).unwrap();
        assert_eq!(
            scheme,
            StaticIntegrator::DisplacementControl {
                node: 2,
                dof: Dof::Uy,
                increment: -0.01
            }
        );
        let scheme: TransientIntegrator = serde_json::from_str(r#"{"HilberHughesTaylor":{"alpha":0.9}}"#).unwrap();
        assert_eq!(scheme, TransientIntegrator::HilberHughesTaylor { alpha: 0.9 });
    }
}
