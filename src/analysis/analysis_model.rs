use super::{node_adjacency, node_order};
use crate::base::{ConstraintHandler, Numberer};
use crate::domain::Domain;
use crate::soe::{DofGraph, EigenSoe, LinearSoe};
use crate::StrError;
use russell_lab::Vector;

/// Holds a constrained DOF enforced by the penalty method
#[derive(Clone, Copy, Debug)]
pub struct PenaltyDof {
    /// Equation number
    pub equation: usize,

    /// Node id
    pub node: usize,

    /// Position of the DOF within the node
    pub index: usize,

    /// Prescribed value
    pub value: f64,
}

/// Maps the DOFs of the domain to the equations of the system
///
/// The constraint handler decides which DOFs receive equations:
///
/// * `Plain` -- constrained DOFs have no equation (only homogeneous constraints are allowed)
/// * `Penalty` -- all DOFs have equations; `alpha` is added to the diagonal of the
///   constrained equations and `alpha · (value - u)` to the right-hand side
pub struct AnalysisModel {
    /// Total number of equations
    pub n_equation: usize,

    /// Holds the equation numbers of each node DOF (None for DOFs without equation)
    pub node_equations: Vec<Vec<Option<usize>>>,

    /// Holds the equation numbers of the local DOFs of each element
    pub element_locs: Vec<Vec<Option<usize>>>,

    /// Holds the connectivity of equations
    pub graph: DofGraph,

    /// Holds the penalty factor (zero with the Plain handler)
    pub alpha: f64,

    /// Holds the constrained DOFs enforced by the penalty method
    pub penalty: Vec<PenaltyDof>,
}

impl AnalysisModel {
    /// Allocates a new instance and numbers the equations
    pub fn new(domain: &Domain, handler: ConstraintHandler, numberer: Numberer) -> Result<Self, StrError> {
        // constrained DOFs
        let mut constrained = domain
            .nodes
            .iter()
            .map(|n| vec![None; n.ndf])
            .collect::<Vec<Vec<Option<f64>>>>();
        for sp in &domain.constraints {
            let node = domain.nodes.get(sp.node).ok_or("the node of the constraint does not exist")?;
            let index = sp
                .dof
                .index(domain.ndim, node.ndf)
                .ok_or("the DOF of the constraint is not available at the node")?;
            constrained[sp.node][index] = Some(sp.value);
        }
        let alpha = match handler {
            ConstraintHandler::Plain => {
                if domain.constraints.iter().any(|sp| !sp.is_homogeneous()) {
                    return Err("the Plain handler requires homogeneous constraints; use the Penalty handler");
                }
                0.0
            }
            ConstraintHandler::Penalty { alpha } => {
                if alpha <= 0.0 {
                    return Err("penalty factor must be > 0.0");
                }
                alpha
            }
        };

        // equation numbers
        let adjacency = node_adjacency(domain);
        let order = node_order(numberer, &adjacency);
        let mut node_equations = domain
            .nodes
            .iter()
            .map(|n| vec![None; n.ndf])
            .collect::<Vec<Vec<Option<usize>>>>();
        let mut penalty = Vec::new();
        let mut n_equation = 0;
        for node in order {
            for index in 0..domain.nodes[node].ndf {
                match (constrained[node][index], alpha > 0.0) {
                    (Some(_), false) => (),
                    (Some(value), true) => {
                        penalty.push(PenaltyDof {
                            equation: n_equation,
                            node,
                            index,
                            value,
                        });
                        node_equations[node][index] = Some(n_equation);
                        n_equation += 1;
                    }
                    (None, _) => {
                        node_equations[node][index] = Some(n_equation);
                        n_equation += 1;
                    }
                }
            }
        }

        // element locs and connectivity
        let mut graph = DofGraph::new(n_equation);
        let mut element_locs = Vec::with_capacity(domain.elements.len());
        for e in &domain.elements {
            let mut loc = Vec::with_capacity(e.actual.n_dof());
            for node in e.actual.nodes() {
                loc.extend_from_slice(&node_equations[*node]);
            }
            graph.add_connectivity(&loc);
            element_locs.push(loc);
        }
        Ok(AnalysisModel {
            n_equation,
            node_equations,
            element_locs,
            graph,
            alpha,
            penalty,
        })
    }

    /// Returns the equation number of a node DOF, if any
    pub fn equation(&self, node: usize, index: usize) -> Option<usize> {
        self.node_equations.get(node).and_then(|eqs| eqs.get(index).copied().flatten())
    }

    /// Assembles A = kt·Kₜ + k0·K₀ + m·M (elements and nodal masses) plus the penalty terms
    ///
    /// Zero coefficients skip the corresponding matrices.
    pub fn assemble_matrix(
        &self,
        domain: &mut Domain,
        soe: &mut dyn LinearSoe,
        kt: f64,
        k0: f64,
        m: f64,
    ) -> Result<(), StrError> {
        soe.zero_a();
        if kt != 0.0 {
            domain.calc_stiffness_parallel(false);
            for (e, loc) in domain.elements.iter().zip(self.element_locs.iter()) {
                soe.add_a(&e.kk, loc, kt)?;
            }
        }
        if k0 != 0.0 {
            domain.calc_stiffness_parallel(true);
            for (e, loc) in domain.elements.iter().zip(self.element_locs.iter()) {
                soe.add_a(&e.kk, loc, k0)?;
            }
        }
        if m != 0.0 {
            domain.calc_mass_parallel();
            for (e, loc) in domain.elements.iter().zip(self.element_locs.iter()) {
                soe.add_a(&e.mm, loc, m)?;
            }
            for (node, eqs) in domain.nodes.iter().zip(self.node_equations.iter()) {
                for (i, eq) in eqs.iter().enumerate() {
                    if let Some(eq) = eq {
                        if node.mass[i] != 0.0 {
                            soe.add_diag(*eq, m * node.mass[i])?;
                        }
                    }
                }
            }
        }
        for p in &self.penalty {
            soe.add_diag(p.equation, self.alpha)?;
        }
        Ok(())
    }

    /// Assembles the unbalanced force b = P - R(u) plus the penalty terms
    ///
    /// The element trial state must be up to date (see `Domain::update`).
    pub fn assemble_unbalance(&self, domain: &mut Domain, soe: &mut dyn LinearSoe) -> Result<(), StrError> {
        soe.zero_b();
        domain.calc_resisting_force_parallel();
        for (node, eqs) in domain.nodes.iter().zip(self.node_equations.iter()) {
            for (i, eq) in eqs.iter().enumerate() {
                if let Some(eq) = eq {
                    soe.add_b_at(*eq, node.load[i]);
                }
            }
        }
        for (e, loc) in domain.elements.iter().zip(self.element_locs.iter()) {
            soe.add_b(&e.rr, loc, -1.0);
        }
        for p in &self.penalty {
            let u = domain.nodes[p.node].trial_disp[p.index];
            soe.add_b_at(p.equation, self.alpha * (p.value - u));
        }
        Ok(())
    }

    /// Assembles the stiffness and mass matrices of the eigenvalue problem
    pub fn assemble_eigen(&self, domain: &mut Domain, soe: &mut dyn EigenSoe) -> Result<(), StrError> {
        soe.zero_a();
        soe.zero_m();
        domain.calc_stiffness_parallel(false);
        domain.calc_mass_parallel();
        for (e, loc) in domain.elements.iter().zip(self.element_locs.iter()) {
            soe.add_a(&e.kk, loc, 1.0)?;
            soe.add_m(&e.mm, loc, 1.0)?;
        }
        for (node, eqs) in domain.nodes.iter().zip(self.node_equations.iter()) {
            for (i, eq) in eqs.iter().enumerate() {
                if let Some(eq) = eq {
                    if node.mass[i] != 0.0 {
                        soe.add_m_diag(*eq, node.mass[i])?;
                    }
                }
            }
        }
        for p in &self.penalty {
            soe.add_a_diag(p.equation, self.alpha)?;
        }
        Ok(())
    }

    /// Adds fact · dx to the trial displacements of the nodes
    pub fn scatter_increment(&self, domain: &mut Domain, dx: &Vector, fact: f64) {
        for (node, eqs) in domain.nodes.iter_mut().zip(self.node_equations.iter()) {
            for (i, eq) in eqs.iter().enumerate() {
                if let Some(eq) = eq {
                    node.incr_trial_disp(i, fact * dx[*eq]);
                }
            }
        }
    }

    /// Gathers the committed displacements, velocities, and accelerations into equation vectors
    pub fn gather_committed(&self, domain: &Domain, uu: &mut Vector, vv: &mut Vector, aa: &mut Vector) {
        for (node, eqs) in domain.nodes.iter().zip(self.node_equations.iter()) {
            for (i, eq) in eqs.iter().enumerate() {
                if let Some(eq) = eq {
                    uu[*eq] = node.disp[i];
                    vv[*eq] = node.vel[i];
                    aa[*eq] = node.accel[i];
                }
            }
        }
    }

    /// Sets the trial displacements, velocities, and accelerations from equation vectors
    pub fn set_trial_response(&self, domain: &mut Domain, uu: &Vector, vv: &Vector, aa: &Vector) {
        for (node, eqs) in domain.nodes.iter_mut().zip(self.node_equations.iter()) {
            for (i, eq) in eqs.iter().enumerate() {
                if let Some(eq) = eq {
                    node.set_trial_disp(i, uu[*eq]);
                    node.trial_vel[i] = vv[*eq];
                    node.trial_accel[i] = aa[*eq];
                }
            }
        }
    }

    /// Splits an equation vector into node vectors (zero for DOFs without equation)
    pub fn to_node_vectors(&self, domain: &Domain, x: &Vector) -> Vec<Vector> {
        domain
            .nodes
            .iter()
            .zip(self.node_equations.iter())
            .map(|(node, eqs)| {
                let mut v = Vector::new(node.ndf);
                for (i, eq) in eqs.iter().enumerate() {
                    if let Some(eq) = eq {
                        v[i] = x[*eq];
                    }
                }
                v
            })
            .collect()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::AnalysisModel;
    use crate::base::{ConstraintHandler, Dof, LinearSystemKind, Numberer, ParamElement, SampleParams};
    use crate::domain::{Domain, SpConstraint};
    use crate::soe::{LinearSoe, LinearSystem};
    use russell_lab::{approx_eq, vec_approx_eq, Vector};

    // 0 ---- 1 ---- 2   (1D trusses, EA/L = 200)
    fn bar() -> Domain {
        let mut domain = Domain::new(1).unwrap();
        for x in [0.0, 1.0, 2.0] {
            domain.add_node(&[x], 1).unwrap();
        }
        let p = ParamElement::Truss(SampleParams::param_truss());
        domain.add_element(&p, &[0, 1]).unwrap();
        domain.add_element(&p, &[1, 2]).unwrap();
        domain
    }

    #[test]
    fn new_captures_errors() {
        let mut domain = bar();
        domain
            .add_sp_constraint(SpConstraint {
                node: 0,
                dof: Dof::Ux,
                value: 0.1,
            })
            .unwrap();
        assert_eq!(
            AnalysisModel::new(&domain, ConstraintHandler::Plain, Numberer::Plain).err(),
            Some("the Plain handler requires homogeneous constraints; use the Penalty handler")
        );
        assert_eq!(
            AnalysisModel::new(&domain, ConstraintHandler::Penalty { alpha: 0.0 }, Numberer::Plain).err(),
            Some("penalty factor must be > 0.0")
        );
    }

    #[test]
    fn plain_handler_numbers_free_dofs_only() {
        let mut domain = bar();
        domain.fix(0, &[Dof::Ux]).unwrap();
        let model = AnalysisModel::new(&domain, ConstraintHandler::Plain, Numberer::Plain).unwrap();
        assert_eq!(model.n_equation, 2);
        assert_eq!(model.node_equations, &[vec![None], vec![Some(0)], vec![Some(1)]]);
        assert_eq!(model.element_locs, &[vec![None, Some(0)], vec![Some(0), Some(1)]]);
        assert_eq!(model.equation(2, 0), Some(1));
        assert_eq!(model.equation(0, 0), None);
        assert_eq!(model.equation(5, 0), None);
        assert_eq!(model.graph.half_bandwidth(), 1);
    }

    #[test]
    fn rcm_numberer_works() {
        let domain = bar();
        let model = AnalysisModel::new(&domain, ConstraintHandler::Plain, Numberer::ReverseCuthillMckee).unwrap();
        assert_eq!(model.n_equation, 3);
        // node 0 has the smallest degree and is numbered last
        assert_eq!(model.equation(0, 0), Some(2));
        assert_eq!(model.equation(2, 0), Some(0));
    }

    #[test]
    fn assemble_and_scatter_work() {
        let mut domain = bar();
        domain
            .add_sp_constraint(SpConstraint {
                node: 0,
                dof: Dof::Ux,
                value: 0.01,
            })
            .unwrap();
        domain.nodes[2].add_load(&[4.0], 1.0).unwrap();
        let alpha = 1e12;
        let model = AnalysisModel::new(&domain, ConstraintHandler::Penalty { alpha }, Numberer::Plain).unwrap();
        assert_eq!(model.n_equation, 3);
        assert_eq!(model.penalty.len(), 1);

        let mut system = LinearSystem::new(LinearSystemKind::BandSpd).unwrap();
        let soe = system.actual.as_mut();
        soe.set_size(&model.graph).unwrap();
        domain.update().unwrap();
        model.assemble_matrix(&mut domain, soe, 1.0, 0.0, 0.0).unwrap();
        model.assemble_unbalance(&mut domain, soe).unwrap();
        approx_eq(soe.b()[0], alpha * 0.01, 1e-15);
        approx_eq(soe.b()[2], 4.0, 1e-15);
        soe.solve().unwrap();
        model.scatter_increment(&mut domain, soe.x(), 1.0);

        // u0 ≈ 0.01, u1 = u0 + 4/200, u2 = u1 + 4/200
        approx_eq(domain.nodes[0].trial_disp[0], 0.01, 1e-10);
        approx_eq(domain.nodes[1].trial_disp[0], 0.03, 1e-10);
        approx_eq(domain.nodes[2].trial_disp[0], 0.05, 1e-10);

        let mut uu = Vector::new(3);
        let mut vv = Vector::new(3);
        let mut aa = Vector::new(3);
        domain.commit();
        model.gather_committed(&domain, &mut uu, &mut vv, &mut aa);
        let nodal = model.to_node_vectors(&domain, &uu);
        approx_eq(nodal[2][0], 0.05, 1e-10);
        vv[1] = 2.0;
        model.set_trial_response(&mut domain, &uu, &vv, &aa);
        assert_eq!(domain.nodes[1].trial_vel[0], 2.0);
        vec_approx_eq(&domain.nodes[1].incr_disp, &Vector::new(1), 1e-15);
    }
}
