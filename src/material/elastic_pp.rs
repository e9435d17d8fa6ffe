use super::UniaxialMaterial;
use crate::StrError;

/// Implements an elastic perfectly-plastic uniaxial model
///
/// The yield stresses in tension (`fy > 0`) and compression (`fy_neg < 0`) may differ.
///
/// ```text
/// σ_trial = E (ε - εp)
/// σ = min(max(σ_trial, fy_neg), fy)
/// ```
#[derive(Clone, Debug)]
pub struct ElasticPerfectlyPlastic {
    /// Young's modulus
    young: f64,

    /// Yield stress in tension
    fy: f64,

    /// Yield stress in compression
    fy_neg: f64,

    /// Trial strain
    trial_strain: f64,

    /// Trial stress
    trial_stress: f64,

    /// Trial tangent
    trial_tangent: f64,

    /// Trial plastic strain
    trial_plastic_strain: f64,

    /// Committed strain
    committed_strain: f64,

    /// Committed stress
    committed_stress: f64,

    /// Committed tangent
    committed_tangent: f64,

    /// Committed plastic strain
    committed_plastic_strain: f64,
}

impl ElasticPerfectlyPlastic {
    /// Allocates a new instance
    pub fn new(young: f64, fy: f64, fy_neg: f64) -> Result<Self, StrError> {
        if young <= 0.0 {
            return Err("young modulus must be > 0.0");
        }
        if fy <= 0.0 {
            return Err("yield stress in tension fy must be > 0.0");
        }
        if fy_neg >= 0.0 {
            return Err("yield stress in compression fy_neg must be < 0.0");
        }
        Ok(ElasticPerfectlyPlastic {
            young,
            fy,
            fy_neg,
            trial_strain: 0.0,
            trial_stress: 0.0,
            trial_tangent: young,
            trial_plastic_strain: 0.0,
            committed_strain: 0.0,
            committed_stress: 0.0,
            committed_tangent: young,
            committed_plastic_strain: 0.0,
        })
    }

    /// Returns the trial plastic strain
    pub fn plastic_strain(&self) -> f64 {
        self.trial_plastic_strain
    }
}

impl UniaxialMaterial for ElasticPerfectlyPlastic {
    fn set_trial_strain(&mut self, strain: f64, _strain_rate: f64) -> Result<(), StrError> {
        self.trial_strain = strain;
        let sigma_trial = self.young * (strain - self.committed_plastic_strain);
        if sigma_trial > self.fy {
            self.trial_stress = self.fy;
            self.trial_tangent = 0.0;
            self.trial_plastic_strain = strain - self.fy / self.young;
        } else if sigma_trial < self.fy_neg {
            self.trial_stress = self.fy_neg;
            self.trial_tangent = 0.0;
            self.trial_plastic_strain = strain - self.fy_neg / self.young;
        } else {
            self.trial_stress = sigma_trial;
            self.trial_tangent = self.young;
            self.trial_plastic_strain = self.committed_plastic_strain;
        }
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
    }

    fn revert_to_last_commit(&mut self) {
        self.trial_strain = self.committed_strain;
        self.trial_stress = self.committed_stress;
        self.trial_tangent = self.committed_tangent;
        self.trial_plastic_strain = self.committed_plastic_strain;
    }

    fn revert_to_start(&mut self) {
        self.committed_strain = 0.0;
        self.committed_stress = 0.0;
        self.committed_tangent = self.young;
        self.committed_plastic_strain = 0.0;
        self.revert_to_last_commit();
    }

    fn copy(&self) -> Box<dyn UniaxialMaterial> {
        Box::new(self.clone())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
