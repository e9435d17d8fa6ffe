use super::UniaxialMaterial;
use crate::StrError;

/// Implements a linear elastic uniaxial model with optional viscous damping
///
/// ```text
/// σ = E ε + η dε/dt
/// ```
#[derive(Clone, Debug)]
pub struct ElasticUniaxial {
    /// Young's modulus
    young: f64,

    /// Damping tangent
    eta: f64,

    /// Trial strain
    trial_strain: f64,

    /// Trial strain rate
    trial_strain_rate: f64,

    /// Committed strain
    committed_strain: f64,

    /// Committed strain rate
    committed_strain_rate: f64,
}

impl ElasticUniaxial {
    /// Allocates a new instance
    pub fn new(young: f64, eta: f64) -> Result<Self, StrError> {
        if young <= 0.0 {
            return Err("young modulus must be > 0.0");
        }
        if eta < 0.0 {
            return Err("damping tangent eta must be ≥ 0.0");
        }
        Ok(ElasticUniaxial {
            young,
            eta,
            trial_strain: 0.0,
            trial_strain_rate: 0.0,
            committed_strain: 0.0,
            committed_strain_rate: 0.0,
        })
    }

    /// Returns the damping tangent dσ/d(dε/dt)
    pub fn damp_tangent(&self) -> f64 {
        self.eta
    }
}

impl UniaxialMaterial for ElasticUniaxial {
    fn set_trial_strain(&mut self, strain: f64, strain_rate: f64) -> Result<(), StrError> {
        self.trial_strain = strain;
        self.trial_strain_rate = strain_rate;
        Ok(())
    }

    fn strain(&self) -> f64 {
        self.trial_strain
    }

    fn stress(&self) -> f64 {
        self.young * self.trial_strain + self.eta * self.trial_strain_rate
    }

    fn tangent(&self) -> f64 {
        self.young
    }

    fn initial_tangent(&self) -> f64 {
        self.young
    }

    fn commit_state(&mut self) {
        self.committed_strain = self.trial_strain;
        self.committed_strain_rate = self.trial_strain_rate;
    }

    fn revert_to_last_commit(&mut self) {
        self.trial_strain = self.committed_strain;
        self.trial_strain_rate = self.committed_strain_rate;
    }

    fn revert_to_start(&mut self) {
        self.trial_strain = 0.0;
        self.trial_strain_rate = 0.0;
        self.committed_strain = 0.0;
        self.committed_strain_rate = 0.0;
    }

    fn copy(&self) -> Box<dyn UniaxialMaterial> {
        Box::new(self.clone())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::ElasticUniaxial;
    use crate::material::UniaxialMaterial;

    #[test]
    fn new_captures_errors() {
        assert_eq!(ElasticUniaxial::new(-1.0, 0.0).err(), Some("young modulus must be > 0.0"));
        assert_eq!(
            ElasticUniaxial::new(1.0, -1.0).err(),
            Some("damping tangent eta must be ≥ 0.0")
        );
    }

    #[test]
    fn stress_includes_viscous_term() {
        let mut model = ElasticUniaxial::new(100.0, 2.0).unwrap();
        assert_eq!(model.damp_tangent(), 2.0);
        model.set_trial_strain(0.5, 3.0).unwrap();
        assert_eq!(model.stress(), 50.0 + 6.0);
        assert_eq!(model.tangent(), 100.0);
        model.commit_state();
        model.set_trial_strain(-0.5, 0.0).unwrap();
        assert_eq!(model.stress(), -50.0);
        model.revert_to_last_commit();
        assert_eq!(model.stress(), 56.0);
    }
}
