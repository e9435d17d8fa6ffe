use super::{DomainState, LoadPattern, Node, Recorder, SpConstraint};
use crate::base::{Dof, ParamElement};
use crate::element::GenericElement;
use crate::StrError;
use rayon::prelude::*;
use russell_lab::Vector;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Holds the Rayleigh damping coefficients
///
/// ```text
/// C = αₘ M + βₖ Kₜ + βₖ₀ K₀
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Rayleigh {
    /// Mass-proportional coefficient
    pub alpha_m: f64,

    /// Coefficient multiplying the current tangent stiffness
    pub beta_k: f64,

    /// Coefficient multiplying the initial stiffness
    pub beta_k0: f64,
}

impl Rayleigh {
    /// Indicates whether there is any damping
    pub fn is_active(&self) -> bool {
        self.alpha_m != 0.0 || self.beta_k != 0.0 || self.beta_k0 != 0.0
    }
}

/// Holds the structural model: nodes, elements, constraints, loads, and recorders
///
/// The node and element ids are their positions in the corresponding arrays.
pub struct Domain {
    /// Space dimension
    pub ndim: usize,

    /// All nodes
    pub nodes: Vec<Node>,

    /// All elements
    pub elements: Vec<GenericElement>,

    /// Single-point constraints
    pub constraints: Vec<SpConstraint>,

    /// Load patterns
    pub patterns: Vec<LoadPattern>,

    /// Recorders (invoked at every commit)
    pub recorders: Vec<Recorder>,

    /// Rayleigh damping coefficients
    pub rayleigh: Rayleigh,

    /// Committed time (or load factor in static analyses)
    pub time: f64,

    /// Trial time (or load factor in static analyses)
    pub trial_time: f64,

    /// Eigenvalues ω² from the last eigenvalue analysis
    pub eigenvalues: Vec<f64>,

    /// Number of commits since the start
    pub n_commits: usize,
}

impl Domain {
    /// Allocates a new (empty) instance
    pub fn new(ndim: usize) -> Result<Self, StrError> {
        if ndim < 1 || ndim > 3 {
            return Err("ndim must be 1, 2, or 3");
        }
        Ok(Domain {
            ndim,
            nodes: Vec::new(),
            elements: Vec::new(),
            constraints: Vec::new(),
            patterns: Vec::new(),
            recorders: Vec::new(),
            rayleigh: Rayleigh::default(),
            time: 0.0,
            trial_time: 0.0,
            eigenvalues: Vec::new(),
            n_commits: 0,
        })
    }

    /// Adds a new node and returns its id
    pub fn add_node(&mut self, coords: &[f64], ndf: usize) -> Result<usize, StrError> {
        if coords.len() != self.ndim {
            return Err("the number of coordinates must be equal to ndim");
        }
        let id = self.nodes.len();
        self.nodes.push(Node::new(id, coords, ndf)?);
        Ok(id)
    }

    /// Adds a new element and returns its id
    ///
    /// All nodes of the element must have the same number of DOFs.
    pub fn add_element(&mut self, param: &ParamElement, nodes: &[usize]) -> Result<usize, StrError> {
        if nodes.is_empty() {
            return Err("the element must have at least one node");
        }
        let mut coords = Vec::with_capacity(nodes.len());
        for n in nodes {
            if *n >= self.nodes.len() {
                return Err("the node of the element does not exist");
            }
            coords.push(self.nodes[*n].coords.clone());
        }
        let ndf = self.nodes[nodes[0]].ndf;
        if nodes.iter().any(|n| self.nodes[*n].ndf != ndf) {
            return Err("all nodes of the element must have the same ndf");
        }
        let id = self.elements.len();
        self.elements
            .push(GenericElement::new(param, nodes, &coords, self.ndim, ndf)?);
        Ok(id)
    }

    /// Adds a single-point constraint
    pub fn add_sp_constraint(&mut self, sp: SpConstraint) -> Result<(), StrError> {
        if sp.node >= self.nodes.len() {
            return Err("the node of the constraint does not exist");
        }
        if sp.dof.index(self.ndim, self.nodes[sp.node].ndf).is_none() {
            return Err("the DOF of the constraint is not available at the node");
        }
        if self.constraints.iter().any(|c| c.node == sp.node && c.dof == sp.dof) {
            return Err("the DOF of the node is constrained already");
        }
        self.constraints.push(sp);
        Ok(())
    }

    /// Fixes (with zero prescribed value) some DOFs of a node
    pub fn fix(&mut self, node: usize, dofs: &[Dof]) -> Result<(), StrError> {
        for dof in dofs {
            self.add_sp_constraint(SpConstraint::fixed(node, *dof))?;
        }
        Ok(())
    }

    /// Adds a load pattern
    pub fn add_pattern(&mut self, pattern: LoadPattern) -> Result<(), StrError> {
        pattern.series().validate()?;
        match &pattern {
            LoadPattern::Plain { nodal, elemental, .. } => {
                for load in nodal {
                    if load.node >= self.nodes.len() {
                        return Err("the node of the load does not exist");
                    }
                    if load.values.len() != self.nodes[load.node].ndf {
                        return Err("the number of load values must be equal to ndf");
                    }
                }
                for load in elemental {
                    if load.element >= self.elements.len() {
                        return Err("the element of the load does not exist");
                    }
                }
            }
            LoadPattern::UniformExcitation { dof, .. } => {
                if !dof.translational() {
                    return Err("the direction of UniformExcitation must be a translation");
                }
            }
        }
        self.patterns.push(pattern);
        Ok(())
    }

    /// Adds a recorder and returns its index
    pub fn add_recorder(&mut self, recorder: Recorder) -> Result<usize, StrError> {
        recorder.validate(&self.nodes, self.elements.len(), self.ndim)?;
        self.recorders.push(recorder);
        Ok(self.recorders.len() - 1)
    }

    /// Sets the Rayleigh damping coefficients
    pub fn set_rayleigh(&mut self, alpha_m: f64, beta_k: f64, beta_k0: f64) -> &mut Self {
        self.rayleigh = Rayleigh {
            alpha_m,
            beta_k,
            beta_k0,
        };
        self
    }

    /// Sets the loads (in nodes and elements) corresponding to the (trial) time `t`
    ///
    /// The loads of all patterns are added after zeroing the previous loads.
    pub fn apply_loads(&mut self, t: f64) -> Result<(), StrError> {
        self.trial_time = t;
        self.nodes.iter_mut().for_each(|n| n.zero_load());
        self.elements.iter_mut().for_each(|e| e.actual.zero_load());
        let ndim = self.ndim;
        for pattern in &self.patterns {
            let factor = pattern.series().factor(t);
            match pattern {
                LoadPattern::Plain { nodal, elemental, .. } => {
                    for load in nodal {
                        self.nodes[load.node].add_load(&load.values, factor)?;
                    }
                    for load in elemental {
                        self.elements[load.element].actual.add_load(&load.load, factor)?;
                    }
                }
                LoadPattern::UniformExcitation { dof, .. } => {
                    if factor == 0.0 {
                        continue;
                    }
                    // nodal masses
                    for node in self.nodes.iter_mut() {
                        if let Some(i) = dof.index(ndim, node.ndf) {
                            node.load[i] -= factor * node.mass[i];
                        }
                    }
                    // element masses
                    for e in self.elements.iter_mut() {
                        let ndf = e.actual.ndf();
                        let i = match dof.index(ndim, ndf) {
                            Some(i) => i,
                            None => continue,
                        };
                        e.calc_mass();
                        let n = e.actual.n_dof();
                        for l in 0..n {
                            let mut mr = 0.0;
                            for m in (i..n).step_by(ndf) {
                                mr += e.mm.get(l, m);
                            }
                            if mr != 0.0 {
                                let node = e.actual.nodes()[l / ndf];
                                self.nodes[node].load[l % ndf] -= factor * mr;
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Copies the trial nodal responses into the elements and updates their trial state (in parallel)
    pub fn update(&mut self) -> Result<(), StrError> {
        let nodes = &self.nodes;
        self.elements
            .par_iter_mut()
            .map(|e| {
                let ndf = e.actual.ndf();
                for (k, n) in e.actual.nodes().iter().enumerate() {
                    for i in 0..ndf {
                        e.uu[k * ndf + i] = nodes[*n].trial_disp[i];
                        e.vv[k * ndf + i] = nodes[*n].trial_vel[i];
                    }
                }
                e.update()
            })
            .collect()
    }

    /// Computes the local tangent (or initial) stiffness matrices (in parallel)
    pub fn calc_stiffness_parallel(&mut self, initial: bool) {
        self.elements.par_iter_mut().for_each(|e| e.calc_stiffness(initial));
    }

    /// Computes the local mass matrices (in parallel)
    pub fn calc_mass_parallel(&mut self) {
        self.elements.par_iter_mut().for_each(|e| e.calc_mass());
    }

    /// Computes the local resisting force vectors (in parallel)
    pub fn calc_resisting_force_parallel(&mut self) {
        self.elements.par_iter_mut().for_each(|e| e.calc_resisting_force());
    }

    /// Makes the trial state permanent and invokes the recorders
    pub fn commit(&mut self) {
        self.nodes.iter_mut().for_each(|n| n.commit());
        self.elements.par_iter_mut().for_each(|e| e.actual.commit_state());
        self.time = self.trial_time;
        self.n_commits += 1;
        for recorder in self.recorders.iter_mut() {
            recorder.record(self.time, &self.nodes, &self.elements, self.ndim);
        }
    }

    /// Discards the trial state
    pub fn revert_to_last_commit(&mut self) {
        self.nodes.iter_mut().for_each(|n| n.revert_to_last_commit());
        self.elements
            .par_iter_mut()
            .for_each(|e| e.actual.revert_to_last_commit());
        self.trial_time = self.time;
    }

    /// Brings the model back to its initial (unloaded and undeformed) state
    pub fn revert_to_start(&mut self) {
        self.nodes.iter_mut().for_each(|n| {
            n.revert_to_start();
            n.zero_load();
        });
        self.elements.par_iter_mut().for_each(|e| {
            e.actual.revert_to_start();
            e.actual.zero_load();
        });
        self.recorders.iter_mut().for_each(|r| r.clear());
        self.time = 0.0;
        self.trial_time = 0.0;
        self.eigenvalues.clear();
        self.n_commits = 0;
    }

    /// Sets the eigenvalues and the mode shapes
    ///
    /// `vectors[k][n]` holds the mode shape `k` at node `n`.
    pub fn set_eigen(&mut self, values: &[f64], vectors: &[Vec<Vector>]) -> Result<(), StrError> {
        if vectors.len() != values.len() {
            return Err("the number of mode shapes must equal the number of eigenvalues");
        }
        for shape in vectors {
            if shape.len() != self.nodes.len() {
                return Err("each mode shape must have one vector per node");
            }
            for (v, node) in shape.iter().zip(self.nodes.iter()) {
                if v.dim() != node.ndf {
                    return Err("each nodal vector of a mode shape must have ndf components");
                }
            }
        }
        self.eigenvalues = values.to_vec();
        for (n, node) in self.nodes.iter_mut().enumerate() {
            node.eigenvectors = vectors.iter().map(|shape| shape[n].clone()).collect();
        }
        Ok(())
    }

    /// Returns the natural circular frequencies ω = √λ
    pub fn circular_frequencies(&self) -> Vec<f64> {
        self.eigenvalues.iter().map(|l| f64::sqrt(f64::max(*l, 0.0))).collect()
    }

    /// Returns the natural periods T = 2π/ω
    pub fn periods(&self) -> Vec<f64> {
        self.circular_frequencies()
            .iter()
            .map(|w| if *w > 0.0 { 2.0 * PI / w } else { f64::INFINITY })
            .collect()
    }

    /// Returns a snapshot of the committed state
    pub fn state(&self) -> DomainState {
        DomainState {
            time: self.time,
            disp: self.nodes.iter().map(|n| n.disp.clone()).collect(),
            vel: self.nodes.iter().map(|n| n.vel.clone()).collect(),
            accel: self.nodes.iter().map(|n| n.accel.clone()).collect(),
            eigenvalues: self.eigenvalues.clone(),
            basic_forces: self.elements.iter().map(|e| e.actual.basic_forces()).collect(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Domain;
    use crate::base::{Dof, ElementLoad, MassType, ParamElement, ParamTruss, SampleParams};
    use crate::domain::{ElementalLoad, LoadPattern, NodalLoad, Recorder, Recording, SpConstraint, TimeSeries};
    use russell_lab::{approx_eq, Vector};

    fn truss_domain() -> Domain {
        //  0 -------- 1 -------- 2
        let mut domain = Domain::new(1).unwrap();
        domain.add_node(&[0.0], 1).unwrap();
        domain.add_node(&[1.0], 1).unwrap();
        domain.add_node(&[2.0], 1).unwrap();
        let p = ParamElement::Truss(SampleParams::param_truss());
        domain.add_element(&p, &[0, 1]).unwrap();
        domain.add_element(&p, &[1, 2]).unwrap();
        domain
    }

    #[test]
    fn add_functions_capture_errors() {
        assert_eq!(Domain::new(0).err(), Some("ndim must be 1, 2, or 3"));
        let mut domain = truss_domain();
        assert_eq!(
            domain.add_node(&[0.0, 0.0], 1).err(),
            Some("the number of coordinates must be equal to ndim")
        );
        let p = ParamElement::Truss(SampleParams::param_truss());
        assert_eq!(
            domain.add_element(&p, &[0, 5]).err(),
            Some("the node of the element does not exist")
        );
        domain.add_node(&[3.0], 2).unwrap();
        assert_eq!(
            domain.add_element(&p, &[2, 3]).err(),
            Some("all nodes of the element must have the same ndf")
        );
        assert_eq!(
            domain.add_sp_constraint(SpConstraint::fixed(9, Dof::Ux)).err(),
            Some("the node of the constraint does not exist")
        );
        assert_eq!(
            domain.add_sp_constraint(SpConstraint::fixed(0, Dof::Uy)).err(),
            Some("the DOF of the constraint is not available at the node")
        );
        domain.fix(0, &[Dof::Ux]).unwrap();
        assert_eq!(
            domain.fix(0, &[Dof::Ux]).err(),
            Some("the DOF of the node is constrained already")
        );
        let series = TimeSeries::Linear { factor: 1.0 };
        let pattern = LoadPattern::Plain {
            series: series.clone(),
            nodal: vec![NodalLoad {
                node: 1,
                values: vec![1.0, 2.0],
            }],
            elemental: Vec::new(),
        };
        assert_eq!(
            domain.add_pattern(pattern).err(),
            Some("the number of load values must be equal to ndf")
        );
        let pattern = LoadPattern::UniformExcitation { series, dof: Dof::Rz };
        assert_eq!(
            domain.add_pattern(pattern).err(),
            Some("the direction of UniformExcitation must be a translation")
        );
    }

    #[test]
    fn apply_loads_works() {
        let mut domain = truss_domain();
        domain
            .add_pattern(LoadPattern::Plain {
                series: TimeSeries::Linear { factor: 2.0 },
                nodal: vec![NodalLoad {
                    node: 2,
                    values: vec![10.0],
                }],
                elemental: Vec::new(),
            })
            .unwrap();
        domain.apply_loads(0.5).unwrap();
        assert_eq!(domain.trial_time, 0.5);
        assert_eq!(domain.nodes[2].load[0], 10.0);
        domain.apply_loads(1.0).unwrap();
        assert_eq!(domain.nodes[2].load[0], 20.0);
    }

    #[test]
    fn element_loads_are_rejected_by_trusses() {
        let mut domain = truss_domain();
        domain
            .add_pattern(LoadPattern::Plain {
                series: TimeSeries::Constant { factor: 1.0 },
                nodal: Vec::new(),
                elemental: vec![ElementalLoad {
                    element: 0,
                    load: ElementLoad::BeamUniform { wy: 1.0, wx: 0.0 },
                }],
            })
            .unwrap();
        assert_eq!(
            domain.apply_loads(1.0).err(),
            Some("this element does not accept span loads")
        );
    }

    #[test]
    fn uniform_excitation_uses_element_and_nodal_masses() {
        let mut domain = truss_domain();
        domain.nodes[2].set_mass(&[3.0]).unwrap();
        domain
            .add_pattern(LoadPattern::UniformExcitation {
                series: TimeSeries::Constant { factor: 0.5 },
                dof: Dof::Ux,
            })
            .unwrap();
        domain.apply_loads(0.0).unwrap();
        // lumped element masses: ρ L / 2 = 1 per element end
        approx_eq(domain.nodes[0].load[0], -0.5 * 1.0, 1e-15);
        approx_eq(domain.nodes[1].load[0], -0.5 * 2.0, 1e-15);
        approx_eq(domain.nodes[2].load[0], -0.5 * (1.0 + 3.0), 1e-15);

        // the consistent mass yields the same rigid-body inertia
        let mut domain = truss_domain();
        let p = ParamTruss {
            mass: MassType::Consistent,
            ..SampleParams::param_truss()
        };
        domain.elements.clear();
        domain.add_element(&ParamElement::Truss(p), &[0, 1]).unwrap();
        domain.add_element(&ParamElement::Truss(p), &[1, 2]).unwrap();
        domain
            .add_pattern(LoadPattern::UniformExcitation {
                series: TimeSeries::Constant { factor: 1.0 },
                dof: Dof::Ux,
            })
            .unwrap();
        domain.apply_loads(0.0).unwrap();
        approx_eq(domain.nodes[0].load[0], -1.0, 1e-15);
        approx_eq(domain.nodes[1].load[0], -2.0, 1e-15);
    }

    #[test]
    fn update_commit_and_revert_work() {
        let mut domain = truss_domain();
        domain
            .add_recorder(Recorder::new(Recording::Element { element: 1 }))
            .unwrap();
        domain.nodes[2].set_trial_disp(0, 0.01);
        domain.update().unwrap();
        assert_eq!(domain.elements[1].actual.basic_forces(), &[2.0]);
        domain.trial_time = 1.0;
        domain.commit();
        assert_eq!(domain.time, 1.0);
        assert_eq!(domain.n_commits, 1);
        assert_eq!(domain.recorders[0].values, &[[2.0]]);

        domain.nodes[2].set_trial_disp(0, 0.02);
        domain.update().unwrap();
        assert_eq!(domain.elements[1].actual.basic_forces(), &[4.0]);
        domain.revert_to_last_commit();
        assert_eq!(domain.nodes[2].trial_disp[0], 0.01);
        assert_eq!(domain.elements[1].actual.basic_forces(), &[2.0]);

        let state = domain.state();
        assert_eq!(state.time, 1.0);
        assert_eq!(state.disp[2][0], 0.01);
        assert_eq!(state.basic_forces[1], &[2.0]);

        domain.revert_to_start();
        assert_eq!(domain.time, 0.0);
        assert_eq!(domain.nodes[2].disp[0], 0.0);
        assert_eq!(domain.elements[1].actual.basic_forces(), &[0.0]);
        assert_eq!(domain.recorders[0].values.len(), 0);
    }

    #[test]
    fn frequencies_and_periods_work() {
        let mut domain = truss_domain();
        domain.eigenvalues = vec![4.0, 16.0];
        assert_eq!(domain.circular_frequencies(), &[2.0, 4.0]);
        approx_eq(domain.periods()[1], std::f64::consts::PI / 2.0, 1e-15);
        domain.set_rayleigh(0.1, 0.2, 0.0);
        assert!(domain.rayleigh.is_active());
    }

    #[test]
    fn set_eigen_works() {
        let mut domain = truss_domain();
        let shape = vec![Vector::from(&[0.0]), Vector::from(&[0.5]), Vector::from(&[1.0])];
        assert_eq!(
            domain.set_eigen(&[4.0, 9.0], &[shape.clone()]).err(),
            Some("the number of mode shapes must equal the number of eigenvalues")
        );
        assert_eq!(
            domain.set_eigen(&[4.0], &[vec![Vector::new(1)]]).err(),
            Some("each mode shape must have one vector per node")
        );
        let short = vec![Vector::new(1), Vector::new(0), Vector::new(1)];
        assert_eq!(
            domain.set_eigen(&[4.0], &[short]).err(),
            Some("each nodal vector of a mode shape must have ndf components")
        );
        assert_eq!(domain.eigenvalues.len(), 0);
        domain.set_eigen(&[4.0], &[shape]).unwrap();
        assert_eq!(domain.eigenvalues, &[4.0]);
        assert_eq!(domain.nodes[1].eigenvectors.len(), 1);
        assert_eq!(domain.nodes[2].eigenvectors[0][0], 1.0);
    }
}
