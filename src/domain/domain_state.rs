use crate::StrError;
use russell_lab::Vector;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Holds a snapshot of the committed state of a Domain
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DomainState {
    /// Time (or load factor)
    pub time: f64,

    /// Displacements of all nodes
    pub disp: Vec<Vector>,

    /// Velocities of all nodes
    pub vel: Vec<Vector>,

    /// Accelerations of all nodes
    pub accel: Vec<Vector>,

    /// Eigenvalues ω² (if any)
    pub eigenvalues: Vec<f64>,

    /// Basic forces of all elements
    pub basic_forces: Vec<Vec<f64>>,
}

impl DomainState {
    /// Reads a JSON file containing the state data
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let input = File::open(path).map_err(|_| "cannot open file")?;
        let buffered = BufReader::new(input);
        let state = serde_json::from_reader(buffered).map_err(|_| "cannot parse JSON file")?;
        Ok(state)
    }

    /// Writes a JSON file with the state data
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }
        let mut file = File::create(&path).map_err(|_| "cannot create file")?;
        serde_json::to_writer(&mut file, &self).map_err(|_| "cannot write file")?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::DomainState;
    use russell_lab::Vector;

    #[test]
    fn read_json_captures_errors() {
        assert_eq!(
            DomainState::read_json("/tmp/sesim/__not_found__.json").err(),
            Some("cannot open file")
        );
    }

    #[test]
    fn write_and_read_json_work() {
        let state = DomainState {
            time: 0.5,
            disp: vec![Vector::from(&[1.0, 2.0])],
            vel: vec![Vector::new(2)],
            accel: vec![Vector::new(2)],
            eigenvalues: vec![4.0],
            basic_forces: vec![vec![3.0]],
        };
        let path = "/tmp/sesim/test_domain_state.json";
        state.write_json(path).unwrap();
        let read = DomainState::read_json(path).unwrap();
        assert_eq!(read.time, 0.5);
        assert_eq!(read.disp[0].as_data(), &[1.0, 2.0]);
        assert_eq!(read.eigenvalues, &[4.0]);
        assert_eq!(read.basic_forces, &[[3.0]]);
    }
}
