use super::UniaxialMaterial;
use crate::StrError;

/// Implements the bilinear steel model with kinematic hardening
///
/// The stress is bounded by two lines parallel to the hardening branch:
///
/// ```text
/// b E ε - fy (1 - b)  ≤  σ  ≤  b E ε + fy (1 - b)
/// ```
///
/// and it moves with the initial tangent `E` between these bounds.
#[derive(Clone, Debug)]
pub struct Steel01 {
    young: f64,
    fy: f64,
    b: f64,

    trial_strain: f64,
    trial_stress: f64,
    trial_tangent: f64,

    committed_strain: f64,
    committed_stress: f64,
    committed_tangent: f64,
}

impl Steel01 {
    /// Allocates a new instance
    pub fn new(young: f64, fy: f64, b: f64) -> Result<Self, StrError> {
        if young <= 0.0 {
            return Err("young modulus must be > 0.0");
        }
        if fy <= 0.0 {
            return Err("yield strength fy must be > 0.0");
        }
        if b < 0.0 || b >= 1.0 {
            return Err("hardening ratio b must satisfy 0 ≤ b < 1");
        }
        Ok(Steel01 {
            young,
            fy,
            b,
            trial_strain: 0.0,
            trial_stress: 0.0,
            trial_tangent: young,
            committed_strain: 0.0,
            committed_stress: 0.0,
            committed_tangent: young,
        })
    }
}

impl UniaxialMaterial for Steel01 {
    fn set_trial_strain(&mut self, strain: f64, _strain_rate: f64) -> Result<(), StrError> {
        // start from the committed state
        self.trial_strain = strain;
        self.trial_stress = self.committed_stress;
        self.trial_tangent = self.committed_tangent;
        let d_strain = strain - self.committed_strain;
        if f64::abs(d_strain) <= f64::EPSILON {
            return Ok(());
        }

        // elastic predictor bounded by the hardening lines
        let esh = self.b * self.young;
        let fy_one_minus_b = self.fy * (1.0 - self.b);
        let c1 = esh * strain;
        let c = self.committed_stress + self.young * d_strain;
        let mut stress = f64::min(c, c1 + fy_one_minus_b);
        stress = f64::max(stress, c1 - fy_one_minus_b);
        self.trial_tangent = if f64::abs(stress - c) <= f64::EPSILON * f64::max(1.0, f64::abs(c)) {
            self.young
        } else {
            esh
        };
        self.trial_stress = stress;
        Ok(())
    }

    fn strain(&self) -> f64 {
        self.trial_strain
    }

    fn stress(&self) -> f64 {
        self.trial_stress
    }

    fn tangent(&self) -> f64 {
        self.trial_tangent
    }

    fn initial_tangent(&self) -> f64 {
        self.young
    }

    fn commit_state(&mut self) {
        self.committed_strain = self.trial_strain;
        self.committed_stress = self.trial_stress;
        self.committed_tangent = self.trial_tangent;
    }

    fn revert_to_last_commit(&mut self) {
        self.trial_strain = self.committed_strain;
        self.trial_stress = self.committed_stress;
        self.trial_tangent = self.committed_tangent;
    }

    fn revert_to_start(&mut self) {
        self.committed_strain = 0.0;
        self.committed_stress = 0.0;
        self.committed_tangent = self.young;
        self.revert_to_last_commit();
    }

    fn copy(&self) -> Box<dyn UniaxialMaterial> {
        Box::new(self.clone())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Steel01;
    use crate::material::{HardeningMaterial, UniaxialMaterial};
    use russell_lab::approx_eq;

    #[test]
    fn new_captures_errors() {
        assert_eq!(Steel01::new(0.0, 1.0, 0.1).err(), Some("young modulus must be > 0.0"));
        assert_eq!(Steel01::new(1.0, 0.0, 0.1).err(), Some("yield strength fy must be > 0.0"));
        assert_eq!(
            Steel01::new(1.0, 1.0, -0.1).err(),
            Some("hardening ratio b must satisfy 0 ≤ b < 1")
        );
    }

    #[test]
    fn yielding_works() {
        let mut model = Steel01::new(200.0, 0.4, 0.05).unwrap();
        model.set_trial_strain(0.001, 0.0).unwrap();
        approx_eq(model.stress(), 0.2, 1e-15);
        assert_eq!(model.tangent(), 200.0);
        model.set_trial_strain(0.004, 0.0).unwrap();
        approx_eq(model.stress(), 0.4 + 10.0 * 0.002, 1e-15);
        assert_eq!(model.tangent(), 10.0);
    }

    #[test]
    fn matches_kinematic_hardening_model() {
        // bilinear kinematic hardening with post-yield tangent b E corresponds to H_kin = b E / (1 - b)
        let (young, fy, b) = (200.0, 0.4, 0.05);
        let mut steel = Steel01::new(young, fy, b).unwrap();
        let mut hard = HardeningMaterial::new(young, fy, 0.0, b * young / (1.0 - b)).unwrap();
        let history = [0.0013, 0.0037, 0.0061, 0.0043, 0.0007, -0.0031, -0.0069, -0.0023, 0.0017, 0.0083];
        for strain in history {
            // two sub-steps per increment, committing each one
            let prev = steel.strain();
            for k in 1..=2 {
                let eps = prev + (strain - prev) * (k as f64) / 2.0;
                steel.set_trial_strain(eps, 0.0).unwrap();
                hard.set_trial_strain(eps, 0.0).unwrap();
                approx_eq(steel.stress(), hard.stress(), 1e-12);
                approx_eq(steel.tangent(), hard.tangent(), 1e-10);
                steel.commit_state();
                hard.commit_state();
            }
        }
    }
}
