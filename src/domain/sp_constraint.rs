use crate::base::Dof;
use serde::{Deserialize, Serialize};

/// Holds a single-point constraint (prescribed displacement of one DOF of a node)
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct SpConstraint {
    /// Node id
    pub node: usize,

    /// Constrained DOF
    pub dof: Dof,

    /// Prescribed value
    #[serde(default)]
    pub value: f64,
}

impl SpConstraint {
    /// Allocates a homogeneous constraint (fixity)
    pub fn fixed(node: usize, dof: Dof) -> Self {
        SpConstraint { node, dof, value: 0.0 }
    }

    /// Indicates whether the prescribed value is zero
    pub fn is_homogeneous(&self) -> bool {
        self.value == 0.0
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
