use super::{ElasticPerfectlyPlastic, ElasticUniaxial, HardeningMaterial, Steel01};
use crate::base::ParamUniaxial;
use crate::StrError;

/// Specifies the essential functions for uniaxial models
pub trait UniaxialMaterial: Send + Sync {
    /// Computes the trial stress and tangent corresponding to the given (total) strain
    ///
    /// The computation always starts from the last committed state; hence,
    /// calling this function twice with the same arguments yields the same trial state.
    fn set_trial_strain(&mut self, strain: f64, strain_rate: f64) -> Result<(), StrError>;

    /// Returns the trial strain
    fn strain(&self) -> f64;

    /// Returns the trial stress
    fn stress(&self) -> f64;

    /// Returns the trial (consistent) tangent modulus
    fn tangent(&self) -> f64;

    /// Returns the initial tangent modulus
    fn initial_tangent(&self) -> f64;

    /// Makes the trial state permanent
    fn commit_state(&mut self);

    /// Sets the trial state equal to the last committed state
    fn revert_to_last_commit(&mut self);

    /// Sets both committed and trial states to the virgin (initial) state
    fn revert_to_start(&mut self);

    /// Returns a boxed copy of this model (including its state)
    fn copy(&self) -> Box<dyn UniaxialMaterial>;
}

/// Holds the actual uniaxial model implementation
pub struct Uniaxial {
    /// Holds the actual model implementation
    pub actual: Box<dyn UniaxialMaterial>,
}

impl Uniaxial {
    /// Allocates a new instance
    pub fn new(param: &ParamUniaxial) -> Result<Self, StrError> {
        let actual: Box<dyn UniaxialMaterial> = match *param {
            // Linear elastic model
            ParamUniaxial::Elastic { young, eta } => Box::new(ElasticUniaxial::new(young, eta)?),

            // Elastic perfectly-plastic model
            ParamUniaxial::ElasticPerfectlyPlastic { young, fy, fy_neg } => {
                Box::new(ElasticPerfectlyPlastic::new(young, fy, fy_neg)?)
            }

            // Isotropic and kinematic hardening model
            ParamUniaxial::Hardening { young, fy, h_iso, h_kin } => {
                Box::new(HardeningMaterial::new(young, fy, h_iso, h_kin)?)
            }

            // Bilinear steel
            ParamUniaxial::Steel01 { young, fy, b } => Box::new(Steel01::new(young, fy, b)?),
        };
        Ok(Uniaxial { actual })
    }
}

impl Clone for Uniaxial {
    fn clone(&self) -> Self {
        Uniaxial {
            actual: self.actual.copy(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Uniaxial;
    use crate::base::{ParamUniaxial, SampleParams};
    use russell_lab::approx_eq;

    fn all_samples() -> Vec<ParamUniaxial> {
        vec![
            SampleParams::param_elastic(),
            SampleParams::param_elastic_pp(),
            SampleParams::param_hardening(),
            SampleParams::param_steel01(),
        ]
    }

    #[test]
    fn new_captures_errors() {
        let p = ParamUniaxial::Elastic { young: 0.0, eta: 0.0 };
        assert_eq!(Uniaxial::new(&p).err(), Some("young modulus must be > 0.0"));
        let p = ParamUniaxial::Steel01 {
            young: 200.0,
            fy: 0.4,
            b: 1.0,
        };
        assert_eq!(Uniaxial::new(&p).err(), Some("hardening ratio b must satisfy 0 ≤ b < 1"));
    }

    #[test]
    fn trial_state_is_idempotent() {
        for param in &all_samples() {
            let mut model = Uniaxial::new(param).unwrap();
            model.actual.set_trial_strain(0.01, 0.0).unwrap();
            let (s1, t1) = (model.actual.stress(), model.actual.tangent());
            model.actual.set_trial_strain(0.01, 0.0).unwrap();
            assert_eq!(model.actual.stress(), s1);
            assert_eq!(model.actual.tangent(), t1);
        }
    }

    #[test]
    fn revert_to_last_commit_works() {
        for param in &all_samples() {
            let mut model = Uniaxial::new(param).unwrap();
            model.actual.set_trial_strain(0.005, 0.0).unwrap();
            model.actual.commit_state();
            let committed_stress = model.actual.stress();
            let committed_tangent = model.actual.tangent();

            // wander away and come back
            model.actual.set_trial_strain(-0.02, 0.0).unwrap();
            model.actual.revert_to_last_commit();
            assert_eq!(model.actual.strain(), 0.005);
            assert_eq!(model.actual.stress(), committed_stress);
            assert_eq!(model.actual.tangent(), committed_tangent);

            // a new trial from the committed state must not see the discarded trial
            model.actual.set_trial_strain(0.005, 0.0).unwrap();
            approx_eq(model.actual.stress(), committed_stress, 1e-14);
        }
    }

    #[test]
    fn revert_to_start_works() {
        for param in &all_samples() {
            let mut model = Uniaxial::new(param).unwrap();
            let virgin = Uniaxial::new(param).unwrap();
            model.actual.set_trial_strain(0.01, 0.0).unwrap();
            model.actual.commit_state();
            model.actual.set_trial_strain(-0.01, 0.0).unwrap();
            model.actual.commit_state();
            model.actual.revert_to_start();
            assert_eq!(model.actual.strain(), 0.0);
            assert_eq!(model.actual.stress(), 0.0);
            assert_eq!(model.actual.tangent(), virgin.actual.tangent());
            model.actual.set_trial_strain(0.001, 0.0).unwrap();
            assert_eq!(model.actual.stress(), 200.0 * 0.001);
        }
    }

    #[test]
    fn clone_copies_the_state() {
        for param in &all_samples() {
            let mut model = Uniaxial::new(param).unwrap();
            model.actual.set_trial_strain(0.003, 0.0).unwrap();
            model.actual.commit_state();
            let copy = model.clone();
            assert_eq!(copy.actual.strain(), model.actual.strain());
            assert_eq!(copy.actual.stress(), model.actual.stress());
            assert_eq!(copy.actual.initial_tangent(), 200.0);
        }
    }
}
