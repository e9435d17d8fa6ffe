use super::Node;
use crate::base::Dof;
use crate::element::GenericElement;
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::path::Path;

/// Defines the nodal response to be recorded
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum NodalResponse {
    Displacement,
    Velocity,
    Acceleration,
}

/// Defines what is recorded
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub enum Recording {
    /// Records a response of one node along the given DOFs
    Node {
        node: usize,
        dofs: Vec<Dof>,
        response: NodalResponse,
    },

    /// Records the basic forces of one element
    Element { element: usize },
}

/// Records the history of responses at every commit
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Recorder {
    /// What is recorded
    pub recording: Recording,

    /// Times (or load factors) of the records
    pub times: Vec<f64>,

    /// Recorded values (one row per record)
    pub values: Vec<Vec<f64>>,
}

impl Recorder {
    /// Allocates a new instance
    pub fn new(recording: Recording) -> Self {
        Recorder {
            recording,
            times: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Checks whether the recorded entities exist
    pub fn validate(&self, nodes: &[Node], n_element: usize, ndim: usize) -> Result<(), StrError> {
        match &self.recording {
            Recording::Node { node, dofs, .. } => {
                if *node >= nodes.len() {
                    return Err("the node of the recorder does not exist");
                }
                for dof in dofs {
                    if dof.index(ndim, nodes[*node].ndf).is_none() {
                        return Err("the DOF of the recorder is not available at the node");
                    }
                }
            }
            Recording::Element { element } => {
                if *element >= n_element {
                    return Err("the element of the recorder does not exist");
                }
            }
        }
        Ok(())
    }

    /// Records the current (committed) responses
    pub fn record(&mut self, time: f64, nodes: &[Node], elements: &[GenericElement], ndim: usize) {
        let row = match &self.recording {
            Recording::Node { node, dofs, response } => {
                let node = &nodes[*node];
                let values = match response {
                    NodalResponse::Displacement => &node.disp,
                    NodalResponse::Velocity => &node.vel,
                    NodalResponse::Acceleration => &node.accel,
                };
                dofs.iter()
                    .filter_map(|dof| dof.index(ndim, node.ndf))
                    .map(|i| values[i])
                    .collect()
            }
            Recording::Element { element } => elements[*element].actual.basic_forces(),
        };
        self.times.push(time);
        self.values.push(row);
    }

    /// Clears all records
    pub fn clear(&mut self) {
        self.times.clear();
        self.values.clear();
    }

    /// Writes a JSON file with the records
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }
        let mut file = File::create(&path).map_err(|_| "cannot create file")?;
        serde_json::to_writer(&mut file, &self).map_err(|_| "cannot write file")?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
