use super::TimeSeries;
use crate::base::{Dof, ElementLoad};
use serde::{Deserialize, Serialize};

/// Holds a load applied to a node (one value per DOF of the node)
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NodalLoad {
    /// Node id
    pub node: usize,

    /// Load values (length = ndf of the node)
    pub values: Vec<f64>,
}

/// Holds a load applied along the span of an element
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ElementalLoad {
    /// Element id
    pub element: usize,

    /// Load
    pub load: ElementLoad,
}

/// Defines a load pattern, i.e., a set of loads scaled by a time series
#[derive(Clone, Debug, Deserialize, Serialize)]
pub enum LoadPattern {
    /// Nodal and elemental loads multiplied by the factor of the time series
    Plain {
        /// Time variation
        series: TimeSeries,

        /// Nodal loads
        #[serde(default)]
        nodal: Vec<NodalLoad>,

        /// Element loads
        #[serde(default)]
        elemental: Vec<ElementalLoad>,
    },

    /// Rigid base (support) excitation with ground acceleration given by the time series
    ///
    /// The effective load is `-M r a₉(t)` where `r` holds ones at the (translational) DOFs along `dof`.
    UniformExcitation {
        /// Ground acceleration history
        series: TimeSeries,

        /// Direction of the excitation
        dof: Dof,
    },
}

impl LoadPattern {
    /// Returns the time series
    pub fn series(&self) -> &TimeSeries {
        match self {
            LoadPattern::Plain { series, .. } => series,
            LoadPattern::UniformExcitation { series, .. } => series,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
