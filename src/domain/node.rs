use crate::StrError;
use russell_lab::Vector;

/// Holds a node with its coordinates and (committed and trial) responses
///
/// The arrays have length equal to `ndf`, the number of DOFs of the node.
#[derive(Clone, Debug)]
pub struct Node {
    /// Identification number (equal to the position in the Domain)
    pub id: usize,

    /// Coordinates
    pub coords: Vec<f64>,

    /// Number of degrees-of-freedom
    pub ndf: usize,

    /// Committed displacements
    pub disp: Vector,

    /// Committed velocities
    pub vel: Vector,

    /// Committed accelerations
    pub accel: Vector,

    /// Trial displacements
    pub trial_disp: Vector,

    /// Trial velocities
    pub trial_vel: Vector,

    /// Trial accelerations
    pub trial_accel: Vector,

    /// Displacement increment since the last commit
    pub incr_disp: Vector,

    /// Lumped mass assigned directly to the node (one value per DOF)
    pub mass: Vector,

    /// External load currently applied to the node
    pub load: Vector,

    /// Mode shapes (filled after an eigenvalue analysis)
    pub eigenvectors: Vec<Vector>,
}

impl Node {
    /// Allocates a new instance
    pub fn new(id: usize, coords: &[f64], ndf: usize) -> Result<Self, StrError> {
        if ndf < 1 {
            return Err("ndf must be ≥ 1");
        }
        Ok(Node {
            id,
            coords: coords.to_vec(),
            ndf,
            disp: Vector::new(ndf),
            vel: Vector::new(ndf),
            accel: Vector::new(ndf),
            trial_disp: Vector::new(ndf),
            trial_vel: Vector::new(ndf),
            trial_accel: Vector::new(ndf),
            incr_disp: Vector::new(ndf),
            mass: Vector::new(ndf),
            load: Vector::new(ndf),
            eigenvectors: Vec::new(),
        })
    }

    /// Sets the lumped nodal mass (one value per DOF)
    pub fn set_mass(&mut self, values: &[f64]) -> Result<(), StrError> {
        if values.len() != self.ndf {
            return Err("the number of mass values must be equal to ndf");
        }
        for i in 0..self.ndf {
            self.mass[i] = values[i];
        }
        Ok(())
    }

    /// Adds `fact · values` to the applied load
    pub fn add_load(&mut self, values: &[f64], fact: f64) -> Result<(), StrError> {
        if values.len() != self.ndf {
            return Err("the number of load values must be equal to ndf");
        }
        for i in 0..self.ndf {
            self.load[i] += fact * values[i];
        }
        Ok(())
    }

    /// Removes the applied load
    pub fn zero_load(&mut self) {
        self.load.fill(0.0);
    }

    /// Increments the trial displacements (and the increment since the last commit)
    pub fn incr_trial_disp(&mut self, index: usize, delta: f64) {
        self.trial_disp[index] += delta;
        self.incr_disp[index] += delta;
    }

    /// Sets the trial displacement of one DOF, keeping the increment consistent
    pub fn set_trial_disp(&mut self, index: usize, value: f64) {
        self.trial_disp[index] = value;
        self.incr_disp[index] = value - self.disp[index];
    }

    /// Makes the trial responses permanent
    pub fn commit(&mut self) {
        for i in 0..self.ndf {
            self.disp[i] = self.trial_disp[i];
            self.vel[i] = self.trial_vel[i];
            self.accel[i] = self.trial_accel[i];
            self.incr_disp[i] = 0.0;
        }
    }

    /// Sets the trial responses equal to the committed ones
    pub fn revert_to_last_commit(&mut self) {
        for i in 0..self.ndf {
            self.trial_disp[i] = self.disp[i];
            self.trial_vel[i] = self.vel[i];
            self.trial_accel[i] = self.accel[i];
            self.incr_disp[i] = 0.0;
        }
    }

    /// Zeroes all responses
    pub fn revert_to_start(&mut self) {
        self.disp.fill(0.0);
        self.vel.fill(0.0);
        self.accel.fill(0.0);
        self.revert_to_last_commit();
        self.eigenvectors.clear();
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
