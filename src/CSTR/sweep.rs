//! # Parameter Sweep
//!
//! Varies one operating parameter over evenly spaced values (both ends included) and
//! repeats the start-up run for each, all other parameters held at their base values.
//!
//! | Parameter | Field | Units |
//! |-----------|-------|-------|
//! | `Fa0` | feed of propylene oxide | lbmol/h |
//! | `Fb0` | feed of water | lbmol/h |
//! | `Fm0` | feed of methanol | lbmol/h |
//! | `T0` | feed temperature | °F |
//! | `Ta1` | coolant inlet temperature | °F |
//! | `UA` | heat exchange coefficient × area | Btu/(h·°F) |
//! | `mc` | coolant flow | lbmol/h |
//!
//! A point whose run fails does not stop the sweep: its row carries NaN states and
//! conversion together with the error text. Every point gets its own copy of the
//! parameters, so points are independent and the table is reproducible.
use super::cstr_error::CstrError;
use super::cstr_model::{OperatingParams, ReactorState};
use super::cstr_simulation::{RunSettings, simulate};
use super::steady_state::SteadyState;
use crate::ODEsolvers::ode_api::linspace;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter, EnumString, Display,
)]
pub enum SweepParameter {
    #[default]
    Fa0,
    Fb0,
    Fm0,
    T0,
    Ta1,
    UA,
    #[serde(rename = "mc")]
    #[strum(to_string = "mc")]
    Mc,
}

impl SweepParameter {
    pub fn get(&self, params: &OperatingParams) -> f64 {
        match self {
            SweepParameter::Fa0 => params.Fa0,
            SweepParameter::Fb0 => params.Fb0,
            SweepParameter::Fm0 => params.Fm0,
            SweepParameter::T0 => params.T0,
            SweepParameter::Ta1 => params.Ta1,
            SweepParameter::UA => params.UA,
            SweepParameter::Mc => params.mc,
        }
    }

    /// Copy of `params` with this parameter set to `value`. `T0` is both the feed and
    /// the initial tank temperature of the run.
    pub fn apply(&self, params: &OperatingParams, value: f64) -> OperatingParams {
        let mut p = params.clone();
        let field = match self {
            SweepParameter::Fa0 => &mut p.Fa0,
            SweepParameter::Fb0 => &mut p.Fb0,
            SweepParameter::Fm0 => &mut p.Fm0,
            SweepParameter::T0 => &mut p.T0,
            SweepParameter::Ta1 => &mut p.Ta1,
            SweepParameter::UA => &mut p.UA,
            SweepParameter::Mc => &mut p.mc,
        };
        *field = value;
        p
    }

    pub fn units(&self) -> &'static str {
        match self {
            SweepParameter::Fa0 | SweepParameter::Fb0 | SweepParameter::Fm0 | SweepParameter::Mc => {
                "lbmol/h"
            }
            SweepParameter::T0 | SweepParameter::Ta1 => "°F",
            SweepParameter::UA => "Btu/(h·°F)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepSpec {
    pub parameter: SweepParameter,
    pub start: f64,
    pub end: f64,
    pub n_points: usize,
}

impl Default for SweepSpec {
    fn default() -> Self {
        Self {
            parameter: SweepParameter::Fa0,
            start: 50.0,
            end: 150.0,
            n_points: 5,
        }
    }
}

impl SweepSpec {
    /// Sweep of the parameter called `name` (`Fa0`, `Fb0`, `Fm0`, `T0`, `Ta1`, `UA`, `mc`).
    pub fn from_name(name: &str, start: f64, end: f64, n_points: usize) -> Result<Self, CstrError> {
        let parameter = SweepParameter::from_str(name.trim())
            .map_err(|_| CstrError::InvalidSweep(format!("unknown parameter '{}'", name)))?;
        let spec = Self {
            parameter,
            start,
            end,
            n_points,
        };
        spec.check()?;
        Ok(spec)
    }

    pub fn check(&self) -> Result<(), CstrError> {
        if self.n_points < 2 {
            return Err(CstrError::InvalidSweep(format!(
                "at least 2 points needed, got {}",
                self.n_points
            )));
        }
        if !(self.start.is_finite() && self.end.is_finite()) {
            return Err(CstrError::InvalidSweep(
                "sweep bounds must be finite".to_string(),
            ));
        }
        Ok(())
    }

    pub fn values(&self) -> Vec<f64> {
        linspace(self.start, self.end, self.n_points)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRow {
    /// value of the swept parameter
    pub value: f64,
    /// full parameter set of this point
    pub params: OperatingParams,
    pub final_state: ReactorState,
    pub conversion: f64,
    pub steady_state: SteadyState,
    /// set when the run of this point failed
    pub error: Option<String>,
}

impl SweepRow {
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    pub fn status(&self) -> String {
        match &self.error {
            Some(e) => format!("failed: {}", e),
            None => "ok".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepTable {
    pub parameter: SweepParameter,
    pub rows: Vec<SweepRow>,
}

impl SweepTable {
    pub fn values(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.value).collect()
    }

    pub fn n_failed(&self) -> usize {
        self.rows.iter().filter(|r| r.is_failed()).count()
    }
}

/// Runs the start-up simulation for every value of `spec`, in order.
pub fn run_sweep(
    base: &OperatingParams,
    spec: &SweepSpec,
    settings: &RunSettings,
) -> Result<SweepTable, CstrError> {
    spec.check()?;
    settings.check()?;
    let values = spec.values();
    info!(
        "sweep of {} from {} to {} over {} points",
        spec.parameter, spec.start, spec.end, spec.n_points
    );

    let mut rows = Vec::with_capacity(values.len());
    for (i, &value) in values.iter().enumerate() {
        let params = spec.parameter.apply(base, value);
        let row = match simulate(&params, settings) {
            Ok(result) => {
                info!(
                    "point {}/{}: {} = {} -> X = {:.4}, T_final = {:.3}",
                    i + 1,
                    values.len(),
                    spec.parameter,
                    value,
                    result.conversion,
                    result.final_state.T
                );
                SweepRow {
                    value,
                    params,
                    final_state: result.final_state,
                    conversion: result.conversion,
                    steady_state: result.steady_state,
                    error: None,
                }
            }
            Err(e) => {
                warn!(
                    "point {}/{}: {} = {} failed: {}",
                    i + 1,
                    values.len(),
                    spec.parameter,
                    value,
                    e
                );
                SweepRow {
                    value,
                    params,
                    final_state: ReactorState::nan(),
                    conversion: f64::NAN,
                    steady_state: SteadyState::NotReached,
                    error: Some(e.to_string()),
                }
            }
        };
        rows.push(row);
    }

    Ok(SweepTable {
        parameter: spec.parameter,
        rows,
    })
}
