use crate::analysis::{EigenAnalysis, StaticAnalysis, TransientAnalysis};
use crate::base::{Config, Dof, ParamElement, StaticIntegrator, TransientIntegrator};
use crate::domain::{Domain, LoadPattern, Rayleigh, Recorder, Recording, SpConstraint};
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Holds the input data of a node
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NodeInput {
    /// Coordinates (length = ndim)
    pub coords: Vec<f64>,

    /// Number of DOFs
    pub ndf: usize,

    /// Lumped mass (length = ndf); empty means no mass
    #[serde(default)]
    pub mass: Vec<f64>,
}

/// Holds the input data of an element
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ElementInput {
    /// Element parameters
    pub param: ParamElement,

    /// Node ids
    pub nodes: Vec<usize>,
}

/// Holds the fixed DOFs of a node
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Fixity {
    /// Node id
    pub node: usize,

    /// Fixed DOFs
    pub dofs: Vec<Dof>,
}

/// Describes one analysis of the sequence
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub enum AnalysisInput {
    /// Static analysis with `n_steps` steps
    Static {
        integrator: StaticIntegrator,
        n_steps: usize,
    },

    /// Transient analysis with `n_steps` steps of size `dt`
    Transient {
        integrator: TransientIntegrator,
        n_steps: usize,
        dt: f64,
    },

    /// Eigenvalue analysis computing `n_modes` modes
    Eigen { n_modes: usize },
}

/// Holds the JSON description of a structural model and its analyses
///
/// The analyses are run in sequence on the same domain, thus, for instance,
/// an eigenvalue analysis may follow a static (gravity) analysis.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ModelInput {
    /// Space dimension
    pub ndim: usize,

    /// Nodes (the ids are the positions in this array)
    pub nodes: Vec<NodeInput>,

    /// Elements (the ids are the positions in this array)
    pub elements: Vec<ElementInput>,

    /// Fixed DOFs
    #[serde(default)]
    pub fixities: Vec<Fixity>,

    /// Single-point constraints with (possibly) non-zero values
    #[serde(default)]
    pub constraints: Vec<SpConstraint>,

    /// Load patterns
    #[serde(default)]
    pub patterns: Vec<LoadPattern>,

    /// Recorders
    #[serde(default)]
    pub recorders: Vec<Recording>,

    /// Rayleigh damping coefficients
    #[serde(default)]
    pub rayleigh: Rayleigh,

    /// Configuration of the analyses
    #[serde(default)]
    pub config: Config,

    /// Sequence of analyses
    #[serde(default)]
    pub analyses: Vec<AnalysisInput>,
}

impl ModelInput {
    /// Parses the JSON representation
    pub fn from_json(json: &str) -> Result<Self, StrError> {
        serde_json::from_str(json).map_err(|_| "cannot parse JSON string")
    }

    /// Reads a JSON file
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let input = File::open(path).map_err(|_| "cannot open file")?;
        let buffered = BufReader::new(input);
        let data = serde_json::from_reader(buffered).map_err(|_| "cannot parse JSON file")?;
        Ok(data)
    }

    /// Builds the domain
    pub fn build(&self) -> Result<Domain, StrError> {
        let mut domain = Domain::new(self.ndim)?;
        for node in &self.nodes {
            let id = domain.add_node(&node.coords, node.ndf)?;
            if !node.mass.is_empty() {
                domain.nodes[id].set_mass(&node.mass)?;
            }
        }
        for element in &self.elements {
            domain.add_element(&element.param, &element.nodes)?;
        }
        for fixity in &self.fixities {
            domain.fix(fixity.node, &fixity.dofs)?;
        }
        for sp in &self.constraints {
            domain.add_sp_constraint(*sp)?;
        }
        for pattern in &self.patterns {
            domain.add_pattern(pattern.clone())?;
        }
        for recording in &self.recorders {
            domain.add_recorder(Recorder::new(recording.clone()))?;
        }
        domain.rayleigh = self.rayleigh;
        Ok(domain)
    }

    /// Runs the sequence of analyses
    pub fn run(&self, domain: &mut Domain) -> Result<(), StrError> {
        for analysis in &self.analyses {
            match *analysis {
                AnalysisInput::Static { integrator, n_steps } => {
                    let mut driver = StaticAnalysis::new(domain, integrator, &self.config)?;
                    driver.analyze(domain, n_steps)?;
                }
                AnalysisInput::Transient {
                    integrator,
                    n_steps,
                    dt,
                } => {
                    let mut driver = TransientAnalysis::new(domain, integrator, &self.config)?;
                    driver.analyze(domain, n_steps, dt)?;
                }
                AnalysisInput::Eigen { n_modes } => {
                    let mut driver = EigenAnalysis::new(domain, &self.config)?;
                    driver.analyze(domain, n_modes)?;
                }
            }
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
