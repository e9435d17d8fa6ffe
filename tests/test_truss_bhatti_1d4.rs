use russell_lab::*;
use sesim::prelude::*;

// Bhatti's Example 1.4 on page 25
//
// Bhatti, M.A. (2005) Fundamental Finite Element Analysis and Applications, Wiley, 700p.
//
// TEST GOAL
//
// This test verifies a 2D truss with concentrated forces using all linear systems and numberers
//
// MODEL
//
//               (3)
//     2----------------------3
//     |'.  (4)           _.-'
//     |  '.          _.-'
//     |    '.    _.-'  (1)
// (2) |      '1-'
//     |      /
//     |     /
//     |    / (0)
//     |   /
//     |  /
//     | /    (#) indicates element id
//     0'
//
// BOUNDARY CONDITIONS
//
// Fully fixed @ nodes 0 and 3
// Concentrated load @ node 1 with Fy = -150,000
//
// PARAMETERS
//
// Elements 0 and 1: Area = 4,000; Young = 200,000
// Elements 2 and 3: Area = 3,000; Young = 200,000
// Element 4:        Area = 2,000; Young =  70,000

fn bhatti_1d4() -> Result<Domain, StrError> {
    let mut domain = Domain::new(2)?;
    domain.add_node(&[0.0, 0.0], 2)?;
    domain.add_node(&[1500.0, 3500.0], 2)?;
    domain.add_node(&[0.0, 5000.0], 2)?;
    domain.add_node(&[5000.0, 5000.0], 2)?;
    let truss = |area, young| {
        ParamElement::Truss(ParamTruss {
            area,
            density: 0.0,
            mass: MassType::Lumped,
            material: ParamUniaxial::Elastic { young, eta: 0.0 },
        })
    };
    domain.add_element(&truss(4_000.0, 200_000.0), &[0, 1])?;
    domain.add_element(&truss(4_000.0, 200_000.0), &[1, 3])?;
    domain.add_element(&truss(3_000.0, 200_000.0), &[0, 2])?;
    domain.add_element(&truss(3_000.0, 200_000.0), &[2, 3])?;
    domain.add_element(&truss(2_000.0, 70_000.0), &[1, 2])?;
    domain.fix(0, &[Dof::Ux, Dof::Uy])?;
    domain.fix(3, &[Dof::Ux, Dof::Uy])?;
    domain.add_pattern(LoadPattern::Plain {
        series: TimeSeries::Constant { factor: 1.0 },
        nodal: vec![NodalLoad {
            node: 1,
            values: vec![0.0, -150_000.0],
        }],
        elemental: Vec::new(),
    })?;
    Ok(domain)
}

#[test]
fn test_truss_bhatti_1d4() -> Result<(), StrError> {
    #[rustfmt::skip]
    let uu_correct = [
        [0.000000000000000e+00,  0.000000000000000e+00], // 0: Ux,Uy
        [5.389536380057675e-01, -9.530613006371175e-01], // 1: Ux,Uy
        [2.647036149579491e-01, -2.647036149579491e-01], // 2: Ux,Uy
        [0.000000000000000e+00,  0.000000000000000e+00], // 3: Ux,Uy
    ];
    for system in [
        LinearSystemKind::FullGeneral,
        LinearSystemKind::BandSpd,
        LinearSystemKind::ProfileSpd,
        LinearSystemKind::SparseGeneral,
    ] {
        for numberer in [Numberer::Plain, Numberer::ReverseCuthillMckee] {
            let mut domain = bhatti_1d4()?;
            let mut config = Config::new();
            config.system = system;
            config.numberer = numberer;
            config.algorithm = Algorithm::Linear;
            let integrator = StaticIntegrator::LoadControl { dlambda: 1.0 };
            let mut analysis = StaticAnalysis::new(&domain, integrator, &config)?;
            analysis.analyze(&mut domain, 1)?;
            for (node, correct) in uu_correct.iter().enumerate() {
                vec_approx_eq(&domain.nodes[node].disp, &Vector::from(correct), 1e-12);
            }
        }
    }
    Ok(())
}

#[test]
fn test_truss_bhatti_1d4_newton_raphson() -> Result<(), StrError> {
    // the linear problem converges in one iteration
    let mut domain = bhatti_1d4()?;
    let config = Config::new();
    let integrator = StaticIntegrator::LoadControl { dlambda: 1.0 };
    let mut analysis = StaticAnalysis::new(&domain, integrator, &config)?;
    analysis.analyze(&mut domain, 1)?;
    assert_eq!(analysis.iterations, &[1]);
    approx_eq(domain.nodes[1].disp[0], 5.389536380057675e-01, 1e-12);
    approx_eq(domain.nodes[1].disp[1], -9.530613006371175e-01, 1e-12);

    // axial force of the vertical bar 0-2: N = EA/L Δv
    let state = domain.state();
    assert_eq!(state.basic_forces.len(), 5);
    let n02 = 3_000.0 * 200_000.0 / 5000.0 * (-2.647036149579491e-01);
    approx_eq(state.basic_forces[2][0], n02, 1e-5);
    Ok(())
}
