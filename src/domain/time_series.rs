use crate::StrError;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Relative tolerance to match the time of the last sample of a Path series
const PATH_END_TOL: f64 = 1e-10;

/// Defines the time variation of load patterns
///
/// For static analyses, the "time" is the pseudo-time (the load factor λ).
#[derive(Clone, Debug, Deserialize, Serialize)]
pub enum TimeSeries {
    /// Constant factor
    Constant { factor: f64 },

    /// Factor proportional to time: `factor · t`
    Linear { factor: f64 },

    /// Piecewise-linear interpolation of `values` sampled every `dt`; zero after the last value
    Path { dt: f64, values: Vec<f64>, factor: f64 },

    /// Sine function `factor · sin(2π (t - t_start) / period + phase)` within `[t_start, t_finish]`
    Trig {
        t_start: f64,
        t_finish: f64,
        period: f64,
        phase: f64,
        factor: f64,
    },

    /// Constant `factor` within `[t_start, t_finish]`; zero otherwise
    Rectangular { t_start: f64, t_finish: f64, factor: f64 },
}

impl TimeSeries {
    /// Validates the parameters
    pub fn validate(&self) -> Result<(), StrError> {
        match self {
            TimeSeries::Path { dt, values, .. } => {
                if *dt <= 0.0 {
                    return Err("the time increment of a Path series must be > 0.0");
                }
                if values.is_empty() {
                    return Err("a Path series requires at least one value");
                }
            }
            TimeSeries::Trig {
                t_start,
                t_finish,
                period,
                ..
            } => {
                if *period <= 0.0 {
                    return Err("the period of a Trig series must be > 0.0");
                }
                if t_finish < t_start {
                    return Err("t_finish must be ≥ t_start");
                }
            }
            TimeSeries::Rectangular { t_start, t_finish, .. } => {
                if t_finish < t_start {
                    return Err("t_finish must be ≥ t_start");
                }
            }
            _ => (),
        }
        Ok(())
    }

    /// Returns the load factor at time `t`
    pub fn factor(&self, t: f64) -> f64 {
        match self {
            TimeSeries::Constant { factor } => *factor,
            TimeSeries::Linear { factor } => factor * t,
            TimeSeries::Path { dt, values, factor } => {
                if t < 0.0 {
                    return 0.0;
                }
                let r = t / dt;
                let i = f64::floor(r) as usize;
                let n = values.len();
                if i + 1 < n {
                    let s = r - (i as f64);
                    factor * (values[i] + s * (values[i + 1] - values[i]))
                } else if n > 0 && r - ((n - 1) as f64) <= PATH_END_TOL * f64::max(1.0, r) {
                    // accumulated time steps may overshoot the last sample by round-off
                    factor * values[n - 1]
                } else {
                    0.0
                }
            }
            TimeSeries::Trig {
                t_start,
                t_finish,
                period,
                phase,
                factor,
            } => {
                if t < *t_start || t > *t_finish {
                    0.0
                } else {
                    factor * f64::sin(2.0 * PI * (t - t_start) / period + phase)
                }
            }
            TimeSeries::Rectangular {
                t_start,
                t_finish,
                factor,
            } => {
                if t < *t_start || t > *t_finish {
                    0.0
                } else {
                    *factor
                }
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
