use russell_lab::*;
use sesim::prelude::*;

// Cantilever beam with 10 elastic beam-column elements
//
// TEST GOAL
//
// This test verifies the static response to tip and span loads and the
// natural frequencies of a cantilever against the Euler-Bernoulli solutions
//
// MODEL
//
//  |
//  |0----1----2----3----4----5----6----7----8----9----10  → x
//  |
//
//  L = 10, E = 1000, I = 0.1, A = 1, ρA = 2

const N_ELEMENT: usize = 10;
const L: f64 = 10.0;
const EI: f64 = 100.0;
const RHO_A: f64 = 2.0;

fn cantilever(mass: MassType, span_load: Option<f64>, tip_load: f64) -> Result<Domain, StrError> {
    let mut domain = Domain::new(2)?;
    let h = L / (N_ELEMENT as f64);
    for i in 0..(N_ELEMENT + 1) {
        domain.add_node(&[(i as f64) * h, 0.0], 3)?;
    }
    let param = ParamElement::ElasticBeam2d(ParamBeam2d {
        area: 1.0,
        young: 1000.0,
        inertia: 0.1,
        density: RHO_A,
        mass,
        transf: Transformation::Linear,
    });
    for e in 0..N_ELEMENT {
        domain.add_element(&param, &[e, e + 1])?;
    }
    domain.fix(0, &[Dof::Ux, Dof::Uy, Dof::Rz])?;
    let elemental = match span_load {
        Some(wy) => (0..N_ELEMENT)
            .map(|element| ElementalLoad {
                element,
                load: ElementLoad::BeamUniform { wy, wx: 0.0 },
            })
            .collect(),
        None => Vec::new(),
    };
    domain.add_pattern(LoadPattern::Plain {
        series: TimeSeries::Linear { factor: 1.0 },
        nodal: vec![NodalLoad {
            node: N_ELEMENT,
            values: vec![0.0, tip_load, 0.0],
        }],
        elemental,
    })?;
    Ok(domain)
}

#[test]
fn test_beam_cantilever_tip_load() -> Result<(), StrError> {
    let p = -1.0;
    let mut domain = cantilever(MassType::Lumped, None, p)?;
    let config = Config::new();
    let integrator = StaticIntegrator::LoadControl { dlambda: 1.0 };
    let mut analysis = StaticAnalysis::new(&domain, integrator, &config)?;
    analysis.analyze(&mut domain, 1)?;

    // δ = P L³ / (3 E I) and θ = P L² / (2 E I)
    let tip = &domain.nodes[N_ELEMENT].disp;
    approx_eq(tip[0], 0.0, 1e-14);
    approx_eq(tip[1], p * L * L * L / (3.0 * EI), 1e-10);
    approx_eq(tip[2], p * L * L / (2.0 * EI), 1e-10);

    // δ(x) = P x² (3 L - x) / (6 E I)
    let x = 4.0;
    approx_eq(domain.nodes[4].disp[1], p * x * x * (3.0 * L - x) / (6.0 * EI), 1e-10);
    Ok(())
}

#[test]
fn test_beam_cantilever_uniform_load() -> Result<(), StrError> {
    let w = -0.5;
    let mut domain = cantilever(MassType::Lumped, Some(w), 0.0)?;
    let mut config = Config::new();
    config.system = LinearSystemKind::ProfileSpd;
    let integrator = StaticIntegrator::LoadControl { dlambda: 1.0 };
    let mut analysis = StaticAnalysis::new(&domain, integrator, &config)?;
    analysis.analyze(&mut domain, 1)?;

    // δ = w L⁴ / (8 E I) and θ = w L³ / (6 E I)
    let tip = &domain.nodes[N_ELEMENT].disp;
    approx_eq(tip[1], w * L * L * L * L / (8.0 * EI), 1e-10);
    approx_eq(tip[2], w * L * L * L / (6.0 * EI), 1e-10);
    Ok(())
}

#[test]
fn test_beam_cantilever_frequencies() -> Result<(), StrError> {
    // ωᵢ = (βᵢ L)² √(E I / (ρ A L⁴))
    let beta_l = [1.875104068711961, 4.694091132974175];
    let factor = f64::sqrt(EI / (RHO_A * L * L * L * L));
    let omega = [beta_l[0] * beta_l[0] * factor, beta_l[1] * beta_l[1] * factor];

    // consistent mass
    for solver in [EigenSolverKind::BandArpack, EigenSolverKind::FullGeneral] {
        let mut domain = cantilever(MassType::Consistent, None, 0.0)?;
        let mut config = Config::new();
        config.eigen_solver = solver;
        let mut analysis = EigenAnalysis::new(&domain, &config)?;
        analysis.analyze(&mut domain, 2)?;
        let w = domain.circular_frequencies();
        approx_eq(w[0], omega[0], 1e-4 * omega[0]);
        approx_eq(w[1], omega[1], 1e-3 * omega[1]);

        // the tip has the largest displacement of the first mode shape
        let phi_tip = domain.nodes[N_ELEMENT].eigenvectors[0][1];
        for node in 0..N_ELEMENT {
            assert!(f64::abs(domain.nodes[node].eigenvectors[0][1]) < f64::abs(phi_tip));
        }
    }

    // lumped mass (the rotations are massless)
    let mut domain = cantilever(MassType::Lumped, None, 0.0)?;
    let config = Config::new();
    let mut analysis = EigenAnalysis::new(&domain, &config)?;
    analysis.analyze(&mut domain, 1)?;
    let w = domain.circular_frequencies();
    approx_eq(w[0], omega[0], 1e-2 * omega[0]);
    Ok(())
}
