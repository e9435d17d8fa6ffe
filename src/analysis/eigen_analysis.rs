use super::AnalysisModel;
use crate::base::Config;
use crate::domain::Domain;
use crate::soe::EigenSystem;
use crate::StrError;

/// Implements the eigenvalue (modal) analysis driver
///
/// Solves K φ = ω² M φ with the current tangent stiffness and stores the
/// eigenvalues and the (M-normalized) mode shapes in the domain.
pub struct EigenAnalysis {
    /// Holds the mapping between DOFs and equations
    pub model: AnalysisModel,

    /// Holds the eigen solver
    pub system: EigenSystem,

    n_node: usize,
    n_element: usize,
}

impl EigenAnalysis {
    /// Allocates a new instance
    pub fn new(domain: &Domain, config: &Config) -> Result<Self, StrError> {
        if let Some(msg) = config.validate() {
            println!("ERROR: {}", msg);
            return Err("cannot allocate analysis because config.validate() failed");
        }
        let model = AnalysisModel::new(domain, config.handler, config.numberer)?;
        let mut system = EigenSystem::new(config.eigen_solver, config)?;
        system.actual.set_size(&model.graph)?;
        Ok(EigenAnalysis {
            model,
            system,
            n_node: domain.nodes.len(),
            n_element: domain.elements.len(),
        })
    }

    /// Computes the `n_modes` lowest eigenpairs
    pub fn analyze(&mut self, domain: &mut Domain, n_modes: usize) -> Result<(), StrError> {
        if domain.nodes.len() != self.n_node || domain.elements.len() != self.n_element {
            return Err("the domain has changed after the allocation of the analysis");
        }
        let soe = self.system.actual.as_mut();
        domain.update()?;
        self.model.assemble_eigen(domain, soe)?;
        soe.solve(n_modes, true)?;
        let shapes: Vec<_> = soe
            .eigenvectors()
            .iter()
            .map(|phi| self.model.to_node_vectors(domain, phi))
            .collect();
        domain.set_eigen(soe.eigenvalues(), &shapes)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
