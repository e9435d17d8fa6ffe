use super::{AnalysisModel, IntegratorTrait, TransientIntegratorTrait};
use crate::base::TransientIntegrator;
use crate::domain::Domain;
use crate::element::GenericElement;
use crate::soe::LinearSoe;
use crate::StrError;
use russell_lab::{mat_vec_mul, Matrix, Vector};

/// Implements Newmark's method and the Hilber-Hughes-Taylor (HHT) α-method
///
/// The equations of motion are satisfied at the intermediate state
///
/// ```text
/// M aₙ₊₁ + C vₙ₊α + R(uₙ₊α) = P(tₙ₊α)
///
/// uₙ₊α = uₙ + α (uₙ₊₁ - uₙ)      vₙ₊α = vₙ + α (vₙ₊₁ - vₙ)      tₙ₊α = tₙ + α Δt
/// ```
///
/// with Newmark's approximations
///
/// ```text
/// uₙ₊₁ = uₙ + Δt vₙ + Δt² ((1/2 - β) aₙ + β aₙ₊₁)
/// vₙ₊₁ = vₙ + Δt ((1 - γ) aₙ + γ aₙ₊₁)
/// ```
///
/// Newmark's method corresponds to α = 1. The HHT method uses γ = 3/2 - α and
/// β = (2 - α)²/4. The damping matrix is given by the Rayleigh coefficients of the domain.
///
/// The committed accelerations are taken as the initial accelerations (zero for a model at rest).
pub struct Newmark {
    gamma: f64,
    beta: f64,
    alpha: f64,

    /// Current time increment
    dt: f64,

    /// Committed time tₙ
    t_n: f64,

    c2: f64, // γ/(β Δt)
    c3: f64, // 1/(β Δt²)

    // trial (n+1) and committed (n) responses in equation space
    uu: Vector,
    vv: Vector,
    aa: Vector,
    uu_n: Vector,
    vv_n: Vector,
    aa_n: Vector,

    // responses at n+α
    uu_alpha: Vector,
    vv_alpha: Vector,

    // local workspace
    work: Vec<Vector>,
}

impl Newmark {
    /// Allocates a new instance
    pub fn new(kind: TransientIntegrator, n_equation: usize) -> Result<Self, StrError> {
        let (gamma, beta, alpha) = match kind {
            TransientIntegrator::Newmark { gamma, beta } => {
                if gamma <= 0.0 || beta <= 0.0 {
                    return Err("Newmark requires gamma > 0.0 and beta > 0.0");
                }
                (gamma, beta, 1.0)
            }
            TransientIntegrator::HilberHughesTaylor { alpha } => {
                if alpha < 2.0 / 3.0 || alpha > 1.0 {
                    return Err("HHT requires 2/3 ≤ alpha ≤ 1");
                }
                (1.5 - alpha, (2.0 - alpha) * (2.0 - alpha) / 4.0, alpha)
            }
        };
        Ok(Newmark {
            gamma,
            beta,
            alpha,
            dt: 0.0,
            t_n: 0.0,
            c2: 0.0,
            c3: 0.0,
            uu: Vector::new(n_equation),
            vv: Vector::new(n_equation),
            aa: Vector::new(n_equation),
            uu_n: Vector::new(n_equation),
            vv_n: Vector::new(n_equation),
            aa_n: Vector::new(n_equation),
            uu_alpha: Vector::new(n_equation),
            vv_alpha: Vector::new(n_equation),
            work: Vec::new(),
        })
    }

    /// Returns the coefficients (γ, β, α)
    pub fn coefficients(&self) -> (f64, f64, f64) {
        (self.gamma, self.beta, self.alpha)
    }

    /// Computes the responses at n+α and sets the trial state of the nodes
    fn set_response(&mut self, model: &AnalysisModel, domain: &mut Domain) {
        for i in 0..self.uu.dim() {
            self.uu_alpha[i] = self.uu_n[i] + self.alpha * (self.uu[i] - self.uu_n[i]);
            self.vv_alpha[i] = self.vv_n[i] + self.alpha * (self.vv[i] - self.vv_n[i]);
        }
        model.set_trial_response(domain, &self.uu_alpha, &self.vv_alpha, &self.aa);
    }

    /// Subtracts fact · mat(e) · x(e) from b for all elements, with x given in equation space
    fn subtract_products<F>(
        &mut self,
        model: &AnalysisModel,
        domain: &Domain,
        soe: &mut dyn LinearSoe,
        x: &Vector,
        fact: f64,
        mat: F,
    ) -> Result<(), StrError>
    where
        F: Fn(&GenericElement) -> &Matrix,
    {
        if self.work.len() != domain.elements.len() {
            self.work = domain.elements.iter().map(|e| Vector::new(e.actual.n_dof())).collect();
        }
        for ((e, loc), y) in domain.elements.iter().zip(model.element_locs.iter()).zip(self.work.iter_mut()) {
            let mut xl = Vector::new(loc.len());
            for (l, eq) in loc.iter().enumerate() {
                if let Some(eq) = eq {
                    xl[l] = x[*eq];
                }
            }
            mat_vec_mul(y, 1.0, mat(e), &xl)?;
            soe.add_b(y, loc, -fact);
        }
        Ok(())
    }
}

impl IntegratorTrait for Newmark {
    fn form_tangent(
        &mut self,
        model: &AnalysisModel,
        domain: &mut Domain,
        soe: &mut dyn LinearSoe,
        initial: bool,
    ) -> Result<(), StrError> {
        let ray = domain.rayleigh;
        let a = self.alpha;
        let (kt, k0) = if initial {
            (a * self.c2 * ray.beta_k, a * (1.0 + self.c2 * ray.beta_k0))
        } else {
            (a * (1.0 + self.c2 * ray.beta_k), a * self.c2 * ray.beta_k0)
        };
        let m = self.c3 + a * self.c2 * ray.alpha_m;
        model.assemble_matrix(domain, soe, kt, k0, m)
    }

    fn form_unbalance(
        &mut self,
        model: &AnalysisModel,
        domain: &mut Domain,
        soe: &mut dyn LinearSoe,
    ) -> Result<(), StrError> {
        // P - R
        model.assemble_unbalance(domain, soe)?;

        // inertia and mass-proportional damping: M (a + αₘ v)
        let ray = domain.rayleigh;
        domain.calc_mass_parallel();
        let mut av = self.aa.clone();
        for i in 0..av.dim() {
            av[i] += ray.alpha_m * self.vv_alpha[i];
        }
        self.subtract_products(model, domain, soe, &av, 1.0, |e| &e.mm)?;
        for (node, eqs) in domain.nodes.iter().zip(model.node_equations.iter()) {
            for (i, eq) in eqs.iter().enumerate() {
                if let Some(eq) = eq {
                    if node.mass[i] != 0.0 {
                        soe.add_b_at(*eq, -node.mass[i] * av[*eq]);
                    }
                }
            }
        }

        // stiffness-proportional damping
        let vv_alpha = self.vv_alpha.clone();
        if ray.beta_k != 0.0 {
            domain.calc_stiffness_parallel(false);
            self.subtract_products(model, domain, soe, &vv_alpha, ray.beta_k, |e| &e.kk)?;
        }
        if ray.beta_k0 != 0.0 {
            domain.calc_stiffness_parallel(true);
            self.subtract_products(model, domain, soe, &vv_alpha, ray.beta_k0, |e| &e.kk)?;
        }
        Ok(())
    }

    fn update(&mut self, model: &AnalysisModel, domain: &mut Domain, soe: &mut dyn LinearSoe) -> Result<(), StrError> {
        let dx = soe.x();
        for i in 0..self.uu.dim() {
            self.uu[i] += dx[i];
            self.vv[i] += self.c2 * dx[i];
            self.aa[i] += self.c3 * dx[i];
        }
        self.set_response(model, domain);
        domain.update()
    }

    fn commit(&mut self, model: &AnalysisModel, domain: &mut Domain) -> Result<(), StrError> {
        model.set_trial_response(domain, &self.uu, &self.vv, &self.aa);
        domain.update()?;
        domain.trial_time = self.t_n + self.dt;
        domain.commit();
        Ok(())
    }
}

impl TransientIntegratorTrait for Newmark {
    fn new_step(&mut self, model: &AnalysisModel, domain: &mut Domain, dt: f64) -> Result<(), StrError> {
        if dt <= 0.0 || !dt.is_finite() {
            return Err("the time increment must be finite and > 0.0");
        }
        self.dt = dt;
        self.c2 = self.gamma / (self.beta * dt);
        self.c3 = 1.0 / (self.beta * dt * dt);
        self.t_n = domain.time;
        model.gather_committed(domain, &mut self.uu_n, &mut self.vv_n, &mut self.aa_n);

        // predictor with constant displacement
        let (g, b) = (self.gamma, self.beta);
        for i in 0..self.uu.dim() {
            self.uu[i] = self.uu_n[i];
            self.aa[i] = -self.vv_n[i] / (b * dt) - (0.5 / b - 1.0) * self.aa_n[i];
            self.vv[i] = self.vv_n[i] + dt * ((1.0 - g) * self.aa_n[i] + g * self.aa[i]);
        }
        self.set_response(model, domain);
        domain.apply_loads(self.t_n + self.alpha * dt)?;
        domain.update()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Newmark;
    use crate::analysis::{AnalysisModel, IntegratorTrait, TransientIntegratorTrait};
    use crate::base::{ConstraintHandler, Dof, LinearSystemKind, Numberer, ParamElement, SampleParams, TransientIntegrator};
    use crate::domain::{Domain, LoadPattern, NodalLoad, TimeSeries};
    use crate::soe::LinearSystem;
    use russell_lab::approx_eq;

    // 0 ---- 1  (EA/L = 200) with mass m = 2 at node 1 and constant load P = 10
    fn sdof() -> Domain {
        let mut domain = Domain::new(1).unwrap();
        domain.add_node(&[0.0], 1).unwrap();
        domain.add_node(&[1.0], 1).unwrap();
        domain.nodes[1].set_mass(&[2.0]).unwrap();
        let mut p = SampleParams::param_truss();
        p.density = 0.0;
        domain.add_element(&ParamElement::Truss(p), &[0, 1]).unwrap();
        domain.fix(0, &[Dof::Ux]).unwrap();
        domain
            .add_pattern(LoadPattern::Plain {
                series: TimeSeries::Constant { factor: 1.0 },
                nodal: vec![NodalLoad {
                    node: 1,
                    values: vec![10.0],
                }],
                elemental: Vec::new(),
            })
            .unwrap();
        domain
    }

    #[test]
    fn new_captures_errors() {
        assert_eq!(
            Newmark::new(TransientIntegrator::Newmark { gamma: 0.5, beta: 0.0 }, 1).err(),
            Some("Newmark requires gamma > 0.0 and beta > 0.0")
        );
        assert_eq!(
            Newmark::new(TransientIntegrator::HilberHughesTaylor { alpha: 0.5 }, 1).err(),
            Some("HHT requires 2/3 ≤ alpha ≤ 1")
        );
    }

    #[test]
    fn hht_coefficients_are_correct() {
        let hht = Newmark::new(TransientIntegrator::HilberHughesTaylor { alpha: 0.8 }, 1).unwrap();
        let (gamma, beta, alpha) = hht.coefficients();
        approx_eq(gamma, 0.7, 1e-15);
        approx_eq(beta, 0.36, 1e-15);
        assert_eq!(alpha, 0.8);
    }

    #[test]
    fn one_step_works() {
        let mut domain = sdof();
        let model = AnalysisModel::new(&domain, ConstraintHandler::Plain, Numberer::Plain).unwrap();
        let mut system = LinearSystem::new(LinearSystemKind::BandSpd).unwrap();
        let soe = system.actual.as_mut();
        soe.set_size(&model.graph).unwrap();
        let kind = TransientIntegrator::Newmark { gamma: 0.5, beta: 0.25 };
        let mut integrator = Newmark::new(kind, model.n_equation).unwrap();
        assert_eq!(
            integrator.new_step(&model, &mut domain, 0.0).err(),
            Some("the time increment must be finite and > 0.0")
        );

        // Δt = 0.1: c₂ = 20, c₃ = 400, K_eff = 200 + 400·2 = 1000
        integrator.new_step(&model, &mut domain, 0.1).unwrap();
        integrator.form_tangent(&model, &mut domain, soe, false).unwrap();
        integrator.form_unbalance(&model, &mut domain, soe).unwrap();
        approx_eq(soe.b()[0], 10.0, 1e-15);
        soe.solve().unwrap();
        integrator.update(&model, &mut domain, soe).unwrap();

        // equilibrium: 10 - 200·0.01 - 2·4 = 0
        integrator.form_unbalance(&model, &mut domain, soe).unwrap();
        approx_eq(soe.b()[0], 0.0, 1e-12);
        integrator.commit(&model, &mut domain).unwrap();
        approx_eq(domain.time, 0.1, 1e-15);
        approx_eq(domain.nodes[1].disp[0], 0.01, 1e-15);
        approx_eq(domain.nodes[1].vel[0], 0.2, 1e-14);
        approx_eq(domain.nodes[1].accel[0], 4.0, 1e-12);
    }

    #[test]
    fn mass_proportional_damping_enters_the_unbalance() {
        let mut domain = sdof();
        domain.set_rayleigh(0.5, 0.0, 0.0);
        domain.nodes[1].vel[0] = 1.0;
        let model = AnalysisModel::new(&domain, ConstraintHandler::Plain, Numberer::Plain).unwrap();
        let mut system = LinearSystem::new(LinearSystemKind::FullGeneral).unwrap();
        let soe = system.actual.as_mut();
        soe.set_size(&model.graph).unwrap();
        let kind = TransientIntegrator::Newmark { gamma: 0.5, beta: 0.25 };
        let mut integrator = Newmark::new(kind, model.n_equation).unwrap();
        integrator.new_step(&model, &mut domain, 0.1).unwrap();

        // predictor: v = vₙ + Δt γ a = 1 + 0.05·(-40) = -1, a = -vₙ/(β Δt) = -40
        approx_eq(domain.nodes[1].trial_vel[0], -1.0, 1e-14);
        approx_eq(domain.nodes[1].trial_accel[0], -40.0, 1e-13);
        integrator.form_unbalance(&model, &mut domain, soe).unwrap();
        // b = 10 - 2·(-40 + 0.5·(-1)) = 91
        approx_eq(soe.b()[0], 91.0, 1e-12);
    }

    #[test]
    fn hht_one_step_works() {
        let mut domain = sdof();
        let model = AnalysisModel::new(&domain, ConstraintHandler::Plain, Numberer::Plain).unwrap();
        let mut system = LinearSystem::new(LinearSystemKind::BandSpd).unwrap();
        let soe = system.actual.as_mut();
        soe.set_size(&model.graph).unwrap();
        let kind = TransientIntegrator::HilberHughesTaylor { alpha: 0.8 };
        let mut integrator = Newmark::new(kind, model.n_equation).unwrap();

        // γ = 0.7, β = 0.36, Δt = 0.1: K_eff = α k + m/(β Δt²) = 160 + 2/0.0036
        integrator.new_step(&model, &mut domain, 0.1).unwrap();
        integrator.form_tangent(&model, &mut domain, soe, false).unwrap();
        integrator.form_unbalance(&model, &mut domain, soe).unwrap();
        approx_eq(soe.b()[0], 10.0, 1e-15);
        soe.solve().unwrap();
        integrator.update(&model, &mut domain, soe).unwrap();
        let u = 0.036 / 2.576;

        // the elements see uₙ₊α
        approx_eq(domain.nodes[1].trial_disp[0], 0.8 * u, 1e-15);
        integrator.form_unbalance(&model, &mut domain, soe).unwrap();
        approx_eq(soe.b()[0], 0.0, 1e-12);

        integrator.commit(&model, &mut domain).unwrap();
        approx_eq(domain.time, 0.1, 1e-15);
        approx_eq(domain.nodes[1].disp[0], u, 1e-15);
        approx_eq(domain.nodes[1].vel[0], 0.7 / 2.576, 1e-13);
        approx_eq(domain.nodes[1].accel[0], 10.0 / 2.576, 1e-12);
    }

    // runs free vibrations about the static position u = P/k = 0.05 and returns the energy history
    fn free_vibration_energy(kind: TransientIntegrator, n_steps: usize) -> Vec<f64> {
        let mut domain = sdof();
        domain.nodes[1].accel[0] = 5.0; // (P - k u₀)/m with u₀ = 0
        let model = AnalysisModel::new(&domain, ConstraintHandler::Plain, Numberer::Plain).unwrap();
        let mut system = LinearSystem::new(LinearSystemKind::BandSpd).unwrap();
        let soe = system.actual.as_mut();
        soe.set_size(&model.graph).unwrap();
        let mut integrator = Newmark::new(kind, model.n_equation).unwrap();
        let energy = |d: &Domain| {
            let (u, v) = (d.nodes[1].disp[0] - 0.05, d.nodes[1].vel[0]);
            0.5 * 2.0 * v * v + 0.5 * 200.0 * u * u
        };
        let mut history = vec![energy(&domain)];
        for _ in 0..n_steps {
            integrator.new_step(&model, &mut domain, 0.1).unwrap();
            integrator.form_tangent(&model, &mut domain, soe, false).unwrap();
            integrator.form_unbalance(&model, &mut domain, soe).unwrap();
            soe.solve().unwrap();
            integrator.update(&model, &mut domain, soe).unwrap();
            integrator.commit(&model, &mut domain).unwrap();
            history.push(energy(&domain));
        }
        history
    }

    #[test]
    fn hht_dissipates_energy_in_free_vibration() {
        // ω Δt = 1
        let newmark = free_vibration_energy(TransientIntegrator::HilberHughesTaylor { alpha: 1.0 }, 200);
        approx_eq(newmark[0], 0.25, 1e-15);
        for e in &newmark {
            approx_eq(*e, 0.25, 1e-10);
        }
        let hht = free_vibration_energy(TransientIntegrator::HilberHughesTaylor { alpha: 0.9 }, 200);
        let last = hht[hht.len() - 1];
        assert!(last > 0.0);
        assert!(last < 0.9 * hht[0]);
    }
}
