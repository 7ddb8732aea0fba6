use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Methods of the `differential_equations` crate available to [`super::ode_api::IVPSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SolverType {
    /// Radau IIA order 5 (stiff problems)
    #[default]
    Radau5,
    GaussLegendre4,
    GaussLegendre6,
    /// Lobatto IIIC order 4 (stiff problems)
    LobattoIIIC4,
    /// Dormand-Prince 5(4) (non-stiff problems)
    Dopri5,
}

impl SolverType {
    pub fn is_implicit(&self) -> bool {
        !matches!(self, SolverType::Dopri5)
    }
}

impl fmt::Display for SolverType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SolverType::Radau5 => write!(f, "Radau5 (implicit, L-stable)"),
            SolverType::GaussLegendre4 => write!(f, "Gauss-Legendre 4 (implicit)"),
            SolverType::GaussLegendre6 => write!(f, "Gauss-Legendre 6 (implicit)"),
            SolverType::LobattoIIIC4 => write!(f, "Lobatto IIIC 4 (implicit, L-stable)"),
            SolverType::Dopri5 => write!(f, "Dopri5 Dormand-Prince (explicit)"),
        }
    }
}

/// Numerical parameters handed to the method builders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverParams {
    pub rtol: f64,
    pub atol: f64,
    /// upper bound for any step, h
    pub max_step: f64,
    /// budget of steps over the whole run
    pub max_steps: usize,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            rtol: 1e-6,
            atol: 1e-8,
            max_step: 0.05,
            max_steps: 100_000,
        }
    }
}

impl SolverParams {
    pub fn validate(&self) -> Result<(), OdeError> {
        if !(self.rtol.is_finite() && self.rtol > 0.0) {
            return Err(OdeError::InvalidParameter(
                "rtol must be finite and positive".to_string(),
            ));
        }
        if !(self.atol.is_finite() && self.atol > 0.0) {
            return Err(OdeError::InvalidParameter(
                "atol must be finite and positive".to_string(),
            ));
        }
        if !(self.max_step > 0.0) {
            return Err(OdeError::InvalidParameter(
                "max_step must be positive".to_string(),
            ));
        }
        if self.max_steps == 0 {
            return Err(OdeError::InvalidParameter(
                "step budget must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Integrator failures. Any of them ends the run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OdeError {
    #[error("invalid solver parameter: {0}")]
    InvalidParameter(String),
    #[error("invalid problem: {0}")]
    InvalidProblem(String),
    /// error reported by the integration method, as text
    #[error("{0}")]
    Method(String),
    #[error("non-finite state at t = {t:.6e}")]
    NonFiniteState { t: f64 },
}
