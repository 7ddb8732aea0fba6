//! # Start-up Simulation
//!
//! Entry points for single runs of the CSTR start-up problem:
//!
//! - [`simulate`]: fixed coolant flow `mc`
//! - [`simulate_with_profile`]: coolant flow following a [`CoolantProfile`]
//!
//! Both integrate from the water-filled tank `[0, 3.45, 0, 0, T0]` over the
//! [`TimeGrid`] of the [`RunSettings`] with the configured method (Radau5 by
//! default), then derive conversion, steady-state time and peak temperature from the
//! trajectory.
//!
//! ## Example
//! ```rust, ignore
//! let result = simulate(&OperatingParams::default(), &RunSettings::default())?;
//! println!("X = {:.4}, steady state: {}", result.conversion, result.steady_state);
//! ```
use super::coolant_profile::{CoolantFlow, CoolantProfile, ProfileKind};
use super::cstr_error::CstrError;
use super::cstr_model::{CstrModel, N_STATES, OperatingParams, ReactorState};
use super::steady_state::{DEFAULT_STEADY_TOL, SteadyState, detect_steady_state};
use crate::ODEsolvers::ode_api::{IVPSolver, SolverStats, linspace};
use crate::ODEsolvers::solver_params::{SolverParams, SolverType};
use log::{info, warn};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// dashboard limit line, °F
pub const DEFAULT_TEMPERATURE_LIMIT: f64 = 180.0;

/// Evenly spaced output times on `[0, t_final]`, both ends included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeGrid {
    /// h
    pub t_final: f64,
    pub n_points: usize,
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self {
            t_final: 4.0,
            n_points: 300,
        }
    }
}

impl TimeGrid {
    pub fn points(&self) -> Vec<f64> {
        linspace(0.0, self.t_final, self.n_points)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    pub grid: TimeGrid,
    pub solver: SolverType,
    pub solver_params: SolverParams,
    /// relative change tolerance of the steady-state detector
    pub steady_tol: f64,
    /// exceeding it is reported, not treated as an error
    pub temperature_limit: f64,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            grid: TimeGrid::default(),
            solver: SolverType::default(),
            solver_params: SolverParams::default(),
            steady_tol: DEFAULT_STEADY_TOL,
            temperature_limit: DEFAULT_TEMPERATURE_LIMIT,
        }
    }
}

impl RunSettings {
    pub fn check(&self) -> Result<(), CstrError> {
        if !(self.grid.t_final.is_finite() && self.grid.t_final > 0.0) {
            return Err(CstrError::InvalidSettings(format!(
                "t_final must be positive, got {}",
                self.grid.t_final
            )));
        }
        if self.grid.n_points < 2 {
            return Err(CstrError::InvalidSettings(format!(
                "at least 2 output points needed, got {}",
                self.grid.n_points
            )));
        }
        if !(self.steady_tol.is_finite() && self.steady_tol > 0.0) {
            return Err(CstrError::InvalidSettings(format!(
                "steady-state tolerance must be positive, got {}",
                self.steady_tol
            )));
        }
        self.solver_params.validate()?;
        Ok(())
    }
}

/// Output times and states of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub t: Vec<f64>,
    /// one row per output time: `Ca, Cb, Cc, Cm, T`
    pub y: DMatrix<f64>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn state(&self, i: usize) -> ReactorState {
        let row: Vec<f64> = self.y.row(i).iter().copied().collect();
        ReactorState::from_slice(&row)
    }

    pub fn series(&self, j: usize) -> Vec<f64> {
        self.y.column(j).iter().copied().collect()
    }

    pub fn ca(&self) -> Vec<f64> {
        self.series(0)
    }

    pub fn temperature(&self) -> Vec<f64> {
        self.series(4)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub params: OperatingParams,
    /// `None` for the fixed-coolant run
    pub profile: Option<ProfileKind>,
    pub trajectory: Trajectory,
    /// coolant flow at every output time
    pub mc: Vec<f64>,
    pub final_state: ReactorState,
    pub conversion: f64,
    pub steady_state: SteadyState,
    pub peak_temperature: f64,
    pub t_peak: f64,
    pub limit_exceeded: bool,
    pub solver: SolverType,
    pub stats: SolverStats,
}

/// Start-up run with the fixed coolant flow `params.mc`.
pub fn simulate(
    params: &OperatingParams,
    settings: &RunSettings,
) -> Result<SimulationResult, CstrError> {
    let model = CstrModel::new(params.clone());
    run(model, None, settings)
}

/// Start-up run with the coolant flow following `profile`; `params.mc` is not used.
pub fn simulate_with_profile(
    params: &OperatingParams,
    profile: &CoolantProfile,
    settings: &RunSettings,
) -> Result<SimulationResult, CstrError> {
    let model = CstrModel::with_coolant(params.clone(), CoolantFlow::Profile(profile.clone()));
    run(model, Some(profile.kind()), settings)
}

fn run(
    model: CstrModel,
    profile: Option<ProfileKind>,
    settings: &RunSettings,
) -> Result<SimulationResult, CstrError> {
    settings.check()?;
    let params = model.params().clone();
    info!(
        "CSTR start-up run: Fa0={}, Fb0={}, Fm0={}, T0={}, Ta1={}, UA={}, coolant {}",
        params.Fa0,
        params.Fb0,
        params.Fm0,
        params.T0,
        params.Ta1,
        params.UA,
        profile.map_or(format!("mc={}", params.mc), |kind| format!("profile {kind}"))
    );

    let t_eval = settings.grid.points();
    let y0 = ReactorState::startup(params.T0).to_vector();
    let mut solver = IVPSolver::new(settings.solver);
    solver.set_parameters(settings.solver_params.clone());
    let solution = solver.solve(&model, y0, &t_eval)?;

    let trajectory = Trajectory {
        y: DMatrix::from_fn(solution.y.len(), N_STATES, |i, j| solution.y[i][j]),
        t: solution.t,
    };
    let mc: Vec<f64> = trajectory
        .t
        .iter()
        .map(|&t| model.coolant().mc_at(t))
        .collect();
    let final_state = trajectory.state(trajectory.len() - 1);
    let conversion = params.conversion(final_state.Ca);

    let temperature = trajectory.temperature();
    let steady_state = detect_steady_state(
        &trajectory.t,
        &trajectory.ca(),
        &temperature,
        settings.steady_tol,
    );
    let (i_peak, peak_temperature) = temperature
        .iter()
        .copied()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |acc, (i, v)| if v > acc.1 { (i, v) } else { acc });
    let t_peak = trajectory.t[i_peak];
    let limit_exceeded = peak_temperature > settings.temperature_limit;
    if limit_exceeded {
        warn!(
            "temperature {:.2} °F at t = {:.3} h exceeds the limit of {} °F: risk of thermal runaway",
            peak_temperature, t_peak, settings.temperature_limit
        );
    }
    info!(
        "run finished: T_final = {:.3} °F, X = {:.4}, steady state: {}",
        final_state.T, conversion, steady_state
    );

    Ok(SimulationResult {
        params,
        profile,
        trajectory,
        mc,
        final_state,
        conversion,
        steady_state,
        peak_temperature,
        t_peak,
        limit_exceeded,
        solver: settings.solver,
        stats: solution.stats,
    })
}
