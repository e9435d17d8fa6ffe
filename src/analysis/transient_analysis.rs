use super::{AnalysisModel, Newmark, SolutionAlgorithm, TransientIntegratorTrait};
use crate::base::{Config, Control, TransientIntegrator};
use crate::domain::Domain;
use crate::soe::LinearSystem;
use crate::StrError;

/// Implements the transient (direct integration) analysis driver
pub struct TransientAnalysis {
    /// Holds the mapping between DOFs and equations
    pub model: AnalysisModel,

    /// Holds the linear system of equations
    pub system: LinearSystem,

    /// Holds the integrator
    pub integrator: Box<dyn TransientIntegratorTrait>,

    /// Holds the solution algorithm (and the convergence test)
    pub algorithm: SolutionAlgorithm,

    /// Holds the number of iterations of each converged step
    pub iterations: Vec<usize>,

    control: Control,
    n_node: usize,
    n_element: usize,
}

impl TransientAnalysis {
    /// Allocates a new instance
    pub fn new(domain: &Domain, integrator: TransientIntegrator, config: &Config) -> Result<Self, StrError> {
        if let Some(msg) = config.validate() {
            println!("ERROR: {}", msg);
            return Err("cannot allocate analysis because config.validate() failed");
        }
        let model = AnalysisModel::new(domain, config.handler, config.numberer)?;
        let mut system = LinearSystem::new(config.system)?;
        system.actual.set_size(&model.graph)?;
        let integrator = Box::new(Newmark::new(integrator, model.n_equation)?);
        let algorithm = SolutionAlgorithm::new(config.algorithm, &config.control)?;
        Ok(TransientAnalysis {
            model,
            system,
            integrator,
            algorithm,
            iterations: Vec::new(),
            control: config.control,
            n_node: domain.nodes.len(),
            n_element: domain.elements.len(),
        })
    }

    /// Runs `n_steps` time steps of size `dt`
    pub fn analyze(&mut self, domain: &mut Domain, n_steps: usize, dt: f64) -> Result<(), StrError> {
        if domain.nodes.len() != self.n_node || domain.elements.len() != self.n_element {
            return Err("the domain has changed after the allocation of the analysis");
        }

        // reverts the domain before returning an error
        macro_rules! run {
            ($e:expr) => {
                match $e {
                    Ok(val) => val,
                    Err(err) => {
                        domain.revert_to_last_commit();
                        return Err(err);
                    }
                }
            };
        }

        let soe = self.system.actual.as_mut();
        self.control.print_header();
        for step in 0..n_steps {
            run!(self.integrator.new_step(&self.model, domain, dt));
            let n_iterations = run!(self
                .algorithm
                .solve_step(&self.model, domain, self.integrator.as_mut(), soe));
            run!(self.integrator.commit(&self.model, domain));
            self.iterations.push(n_iterations);
            self.control.print_step(step, domain.time, dt);
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
