use super::{Dof, MassType, ParamBeam2d, ParamTruss, ParamUniaxial, ParamZeroLength, Transformation};

/// Holds some sample material and element parameters
pub struct SampleParams;

impl SampleParams {
    /// Returns sample parameters for a linear elastic uniaxial model
    pub fn param_elastic() -> ParamUniaxial {
        ParamUniaxial::Elastic { young: 200.0, eta: 0.0 }
    }

    /// Returns sample parameters for an elastic perfectly-plastic uniaxial model
    pub fn param_elastic_pp() -> ParamUniaxial {
        ParamUniaxial::ElasticPerfectlyPlastic {
            young: 200.0,
            fy: 0.4,
            fy_neg: -0.3,
        }
    }

    /// Returns sample parameters for a uniaxial model with isotropic and kinematic hardening
    pub fn param_hardening() -> ParamUniaxial {
        ParamUniaxial::Hardening {
            young: 200.0,
            fy: 0.4,
            h_iso: 10.0,
            h_kin: 20.0,
        }
    }

    /// Returns sample parameters for the bilinear steel model
    pub fn param_steel01() -> ParamUniaxial {
        ParamUniaxial::Steel01 {
            young: 200.0,
            fy: 0.4,
            b: 0.05,
        }
    }

    /// Returns sample parameters for a truss element
    pub fn param_truss() -> ParamTruss {
        ParamTruss {
            area: 1.0,
            density: 2.0,
            mass: MassType::Lumped,
            material: SampleParams::param_elastic(),
        }
    }

    /// Returns sample parameters for an elastic beam-column in 2D
    pub fn param_beam_2d() -> ParamBeam2d {
        ParamBeam2d {
            area: 1.0,
            young: 1000.0,
            inertia: 0.1,
            density: 2.0,
            mass: MassType::Lumped,
            transf: Transformation::Linear,
        }
    }

    /// Returns sample parameters for a zero-length spring along x
    pub fn param_zero_length() -> ParamZeroLength {
        ParamZeroLength {
            dof: Dof::Ux,
            material: SampleParams::param_elastic(),
        }
    }
}
