//! Detection of the time at which the start-up transient has died out.
//!
//! Scanning forward from the second output point, the reactor is taken to be at
//! steady state at the first index `i` where the relative change
//! `|x[i] - x[i-1]| / max(|x[i]|, 1e-8)` of both `Ca` and `T` is below the tolerance.
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_STEADY_TOL: f64 = 1e-3;
/// floor of the denominator of the relative change
const REL_FLOOR: f64 = 1e-8;

/// Outcome of the scan. Not reaching steady state is a normal result, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SteadyState {
    Reached { t: f64, index: usize },
    NotReached,
}

impl SteadyState {
    pub fn time(&self) -> Option<f64> {
        match self {
            SteadyState::Reached { t, .. } => Some(*t),
            SteadyState::NotReached => None,
        }
    }

    pub fn is_reached(&self) -> bool {
        matches!(self, SteadyState::Reached { .. })
    }
}

impl fmt::Display for SteadyState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SteadyState::Reached { t, .. } => write!(f, "{:.3} h", t),
            SteadyState::NotReached => write!(f, "not reached within the simulated range"),
        }
    }
}

fn relative_change(current: f64, previous: f64) -> f64 {
    (current - previous).abs() / current.abs().max(REL_FLOOR)
}

/// First time at which both `ca` and `temp` change by less than `epsilon` (relative)
/// between consecutive points. The three slices must have equal length.
pub fn detect_steady_state(t: &[f64], ca: &[f64], temp: &[f64], epsilon: f64) -> SteadyState {
    let n = t.len().min(ca.len()).min(temp.len());
    (1..n)
        .find(|&i| {
            relative_change(ca[i], ca[i - 1]) < epsilon
                && relative_change(temp[i], temp[i - 1]) < epsilon
        })
        .map_or(SteadyState::NotReached, |index| SteadyState::Reached {
            t: t[index],
            index,
        })
}
