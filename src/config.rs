//! # Run Configuration
//!
//! JSON description of what the binary should compute in batch mode. Every field has a
//! default, so a config file only needs the values that differ from the dashboard's
//! defaults.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "params": { "Fa0": 80.0, "T0": 75.0, "mc": 1000.0 },
//!   "settings": { "grid": { "t_final": 4.0, "n_points": 300 }, "solver": "Radau5" },
//!   "profile": { "kind": "Ramp", "params": { "mc0": 1000.0, "mc1": 2000.0 } },
//!   "sweep": { "parameter": "UA", "start": 8000.0, "end": 20000.0, "n_points": 7 },
//!   "output": { "trajectory_csv": "startup.csv", "sweep_xlsx": "barrido_UA.xlsx" },
//!   "log_level": "info"
//! }
//! ```
//! Without `profile` the single run uses the fixed coolant flow `params.mc`; without
//! `sweep` no sweep is run.
use crate::CSTR::coolant_profile::{CoolantProfile, ProfileKind, ProfileParams};
use crate::CSTR::cstr_error::CstrError;
use crate::CSTR::cstr_model::OperatingParams;
use crate::CSTR::cstr_simulation::RunSettings;
use crate::CSTR::sweep::SweepSpec;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub kind: ProfileKind,
    pub params: ProfileParams,
}

impl ProfileConfig {
    pub fn build(&self) -> Result<CoolantProfile, CstrError> {
        CoolantProfile::from_kind_and_params(self.kind, &self.params)
    }
}

/// Output files; `None` skips the export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub trajectory_csv: Option<String>,
    pub sweep_csv: Option<String>,
    pub sweep_json: Option<String>,
    pub sweep_xlsx: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub params: OperatingParams,
    pub settings: RunSettings,
    pub profile: Option<ProfileConfig>,
    pub sweep: Option<SweepSpec>,
    pub output: OutputConfig,
    pub log_level: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            params: OperatingParams::default(),
            settings: RunSettings::default(),
            profile: None,
            sweep: None,
            output: OutputConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl SimulationConfig {
    pub fn from_json(content: &str) -> Result<Self, CstrError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Reads a config file. A missing file is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CstrError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CstrError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Checks everything that can be checked without running the model.
    pub fn validate(&self) -> Result<(), CstrError> {
        self.settings.check()?;
        if let Some(profile) = &self.profile {
            profile.build()?;
        }
        if let Some(sweep) = &self.sweep {
            sweep.check()?;
        }
        Ok(())
    }

    /// Level of the terminal logger; unknown names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(self.log_level.trim()).unwrap_or(LevelFilter::Info)
    }
}
