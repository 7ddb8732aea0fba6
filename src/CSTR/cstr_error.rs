use crate::ODEsolvers::solver_params::OdeError;
use thiserror::Error;

/// Errors of the reactor layer: simulation, sweeps, configuration and export.
#[derive(Debug, Error)]
pub enum CstrError {
    #[error("integration failed: {0}")]
    Solver(#[from] OdeError),
    #[error("invalid coolant profile: {0}")]
    InvalidProfile(String),
    #[error("invalid sweep: {0}")]
    InvalidSweep(String),
    #[error("invalid run settings: {0}")]
    InvalidSettings(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Excel export error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
