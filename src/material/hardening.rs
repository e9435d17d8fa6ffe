use super::UniaxialMaterial;
use crate::StrError;

/// Implements rate-independent plasticity with linear isotropic and kinematic hardening
///
/// The yield function is:
///
/// ```text
/// f = |σ - q| - (fy + H_iso α)
/// ```
///
/// where `q` is the back stress and `α` is the accumulated plastic strain.
/// The stress is updated by the closest-point (return mapping) algorithm.
///
/// # Reference
///
/// * Simo J.C. and Hughes T.J.R. (1998) Computational Inelasticity, Springer, Box 1.5
#[derive(Clone, Debug)]
pub struct HardeningMaterial {
    young: f64,
    fy: f64,
    h_iso: f64,
    h_kin: f64,

    trial_strain: f64,
    trial_stress: f64,
    trial_tangent: f64,
    trial_plastic_strain: f64,
    trial_back_stress: f64,
    trial_alpha: f64,

    committed_strain: f64,
    committed_stress: f64,
    committed_tangent: f64,
    committed_plastic_strain: f64,
    committed_back_stress: f64,
    committed_alpha: f64,
}

impl HardeningMaterial {
    /// Allocates a new instance
    pub fn new(young: f64, fy: f64, h_iso: f64, h_kin: f64) -> Result<Self, StrError> {
        if young <= 0.0 {
            return Err("young modulus must be > 0.0");
        }
        if fy <= 0.0 {
            return Err("yield stress fy must be > 0.0");
        }
        if young + h_iso + h_kin <= 0.0 {
            return Err("E + H_iso + H_kin must be > 0.0");
        }
        Ok(HardeningMaterial {
            young,
            fy,
            h_iso,
            h_kin,
            trial_strain: 0.0,
            trial_stress: 0.0,
            trial_tangent: young,
            trial_plastic_strain: 0.0,
            trial_back_stress: 0.0,
            trial_alpha: 0.0,
            committed_strain: 0.0,
            committed_stress: 0.0,
            committed_tangent: young,
            committed_plastic_strain: 0.0,
            committed_back_stress: 0.0,
            committed_alpha: 0.0,
        })
    }

    /// Returns the trial plastic strain
    pub fn plastic_strain(&self) -> f64 {
        self.trial_plastic_strain
    }

    /// Returns the trial back stress
    pub fn back_stress(&self) -> f64 {
        self.trial_back_stress
    }

    /// Returns the trial accumulated plastic strain
    pub fn alpha(&self) -> f64 {
        self.trial_alpha
    }
}

impl UniaxialMaterial for HardeningMaterial {
    fn set_trial_strain(&mut self, strain: f64, _strain_rate: f64) -> Result<(), StrError> {
        self.trial_strain = strain;

        // elastic predictor
        let sigma_trial = self.young * (strain - self.committed_plastic_strain);
        let xi_trial = sigma_trial - self.committed_back_stress;
        let f_trial = f64::abs(xi_trial) - (self.fy + self.h_iso * self.committed_alpha);
        if f_trial <= 0.0 {
            self.trial_stress = sigma_trial;
            self.trial_tangent = self.young;
            self.trial_plastic_strain = self.committed_plastic_strain;
            self.trial_back_stress = self.committed_back_stress;
            self.trial_alpha = self.committed_alpha;
            return Ok(());
        }

        // plastic corrector
        let den = self.young + self.h_iso + self.h_kin;
        let d_gamma = f_trial / den;
        let sign = if xi_trial < 0.0 { -1.0 } else { 1.0 };
        self.trial_stress = sigma_trial - d_gamma * self.young * sign;
        self.trial_plastic_strain = self.committed_plastic_strain + d_gamma * sign;
        self.trial_back_stress = self.committed_back_stress + d_gamma * self.h_kin * sign;
        self.trial_alpha = self.committed_alpha + d_gamma;
        self.trial_tangent = self.young * (self.h_iso + self.h_kin) / den;
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
        self.committed_plastic_strain = self.trial_plastic_strain;
        self.committed_back_stress = self.trial_back_stress;
        self.committed_alpha = self.trial_alpha;
    }

    fn revert_to_last_commit(&mut self) {
        self.trial_strain = self.committed_strain;
        self.trial_stress = self.committed_stress;
        self.trial_tangent = self.committed_tangent;
        self.trial_plastic_strain = self.committed_plastic_strain;
        self.trial_back_stress = self.committed_back_stress;
        self.trial_alpha = self.committed_alpha;
    }

    fn revert_to_start(&mut self) {
        self.committed_strain = 0.0;
        self.committed_stress = 0.0;
        self.committed_tangent = self.young;
        self.committed_plastic_strain = 0.0;
        self.committed_back_stress = 0.0;
        self.committed_alpha = 0.0;
        self.revert_to_last_commit();
    }

    fn copy(&self) -> Box<dyn UniaxialMaterial> {
        Box::new(self.clone())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::HardeningMaterial;
    use crate::material::UniaxialMaterial;
    use russell_lab::approx_eq;

    #[test]
    fn new_captures_errors() {
        assert_eq!(
            HardeningMaterial::new(0.0, 1.0, 0.0, 0.0).err(),
            Some("young modulus must be > 0.0")
        );
        assert_eq!(
            HardeningMaterial::new(1.0, 0.0, 0.0, 0.0).err(),
            Some("yield stress fy must be > 0.0")
        );
        assert_eq!(
            HardeningMaterial::new(1.0, 1.0, -2.0, 0.0).err(),
            Some("E + H_iso + H_kin must be > 0.0")
        );
    }

    #[test]
    fn monotonic_loading_follows_bilinear_curve() {
        let (young, fy, h_iso, h_kin) = (200.0, 0.4, 10.0, 20.0);
        let mut model = HardeningMaterial::new(young, fy, h_iso, h_kin).unwrap();
        let et = young * (h_iso + h_kin) / (young + h_iso + h_kin);
        model.set_trial_strain(0.004, 0.0).unwrap();
        approx_eq(model.stress(), fy + et * (0.004 - fy / young), 1e-14);
        approx_eq(model.tangent(), et, 1e-13);
        approx_eq(model.alpha(), 0.4 / 230.0, 1e-15);
        approx_eq(model.plastic_strain(), 0.4 / 230.0, 1e-15);
        approx_eq(model.back_stress(), 20.0 * 0.4 / 230.0, 1e-15);
    }

    #[test]
    fn reverse_loading_accounts_for_both_hardening_rules() {
        let (young, fy, h_iso, h_kin) = (200.0, 0.4, 10.0, 20.0);
        let mut model = HardeningMaterial::new(young, fy, h_iso, h_kin).unwrap();
        model.set_trial_strain(0.004, 0.0).unwrap();
        model.commit_state();
        let sigma_max = model.stress();
        let q = model.back_stress();
        let radius = fy + h_iso * model.alpha();

        // the elastic range after reversal is centered at the back stress
        let strain_rev = 0.004 - (sigma_max - (q - radius)) / young;
        model.set_trial_strain(strain_rev + 1e-9, 0.0).unwrap();
        assert_eq!(model.tangent(), young);
        model.set_trial_strain(strain_rev - 1e-4, 0.0).unwrap();
        assert!(model.tangent() < young);
        assert!(model.stress() < q - radius);
    }
}
