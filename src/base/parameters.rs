use super::{Dof, MassType, Transformation};
use serde::{Deserialize, Serialize};

/// Holds parameters for uniaxial (stress-strain or force-deformation) models
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub enum ParamUniaxial {
    /// Linear elastic model with optional viscous damping
    ///
    /// ```text
    /// σ = E ε + η dε/dt
    /// ```
    Elastic {
        /// Young's modulus
        young: f64,

        /// Damping tangent
        eta: f64,
    },

    /// Elastic perfectly-plastic model with (possibly) different yield stresses in tension and compression
    ElasticPerfectlyPlastic {
        /// Young's modulus
        young: f64,

        /// Yield stress in tension (positive)
        fy: f64,

        /// Yield stress in compression (negative)
        fy_neg: f64,
    },

    /// Rate-independent plasticity with linear isotropic and kinematic hardening
    Hardening {
        /// Young's modulus
        young: f64,

        /// Initial yield stress
        fy: f64,

        /// Isotropic hardening modulus
        h_iso: f64,

        /// Kinematic hardening modulus
        h_kin: f64,
    },

    /// Bilinear steel model with kinematic hardening
    Steel01 {
        /// Initial elastic tangent
        young: f64,

        /// Yield strength
        fy: f64,

        /// Strain-hardening ratio (ratio between post-yield tangent and initial elastic tangent)
        b: f64,
    },
}

/// Holds parameters for truss elements
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct ParamTruss {
    /// Cross-sectional area
    pub area: f64,

    /// Mass per unit length
    pub density: f64,

    /// Mass matrix type
    pub mass: MassType,

    /// Material model
    pub material: ParamUniaxial,
}

/// Holds parameters for elastic 2D beam-column elements
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct ParamBeam2d {
    /// Cross-sectional area
    pub area: f64,

    /// Young's modulus
    pub young: f64,

    /// Second moment of area
    pub inertia: f64,

    /// Mass per unit length
    pub density: f64,

    /// Mass matrix type
    pub mass: MassType,

    /// Geometric transformation
    pub transf: Transformation,
}

/// Holds parameters for zero-length spring elements
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct ParamZeroLength {
    /// Direction of the spring
    pub dof: Dof,

    /// Force-deformation model
    pub material: ParamUniaxial,
}

/// Holds element parameters
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub enum ParamElement {
    /// Small-displacement truss element
    Truss(ParamTruss),

    /// Corotational (large displacement) truss element
    CorotTruss(ParamTruss),

    /// Elastic Euler-Bernoulli beam-column in 2D
    ElasticBeam2d(ParamBeam2d),

    /// Zero-length spring
    ZeroLength(ParamZeroLength),
}

impl ParamUniaxial {
    /// Returns the initial elastic tangent
    pub fn initial_tangent(&self) -> f64 {
        match self {
            ParamUniaxial::Elastic { young, .. } => *young,
            ParamUniaxial::ElasticPerfectlyPlastic { young, .. } => *young,
            ParamUniaxial::Hardening { young, .. } => *young,
            ParamUniaxial::Steel01 { young, .. } => *young,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
