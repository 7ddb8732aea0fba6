//! Batch mode: everything a [`SimulationConfig`] asks for, without prompts.
use crate::CSTR::cstr_error::CstrError;
use crate::CSTR::cstr_simulation::{SimulationResult, simulate, simulate_with_profile};
use crate::CSTR::sweep::{SweepTable, run_sweep};
use crate::Utils::export::{
    export_sweep_csv, export_sweep_json, export_sweep_xlsx, export_trajectory_csv,
};
use crate::config::SimulationConfig;
use log::info;

const TRAJECTORY_PRINT_EVERY: usize = 30;

#[derive(Debug)]
pub struct BatchReport {
    pub run: SimulationResult,
    pub sweep: Option<SweepTable>,
}

/// Single run (with the configured profile, if any), then the sweep if one is
/// configured. Results are printed and written to the configured outputs.
pub fn run_batch(config: &SimulationConfig, print: bool) -> Result<BatchReport, CstrError> {
    config.validate()?;
    let run = match &config.profile {
        Some(profile) => simulate_with_profile(&config.params, &profile.build()?, &config.settings)?,
        None => simulate(&config.params, &config.settings)?,
    };
    if print {
        config.params.pretty_print_params();
        run.pretty_print_result();
        run.pretty_print_trajectory(TRAJECTORY_PRINT_EVERY);
    }
    if let Some(path) = &config.output.trajectory_csv {
        export_trajectory_csv(&run, path)?;
    }

    let sweep = match &config.sweep {
        Some(spec) => {
            let table = run_sweep(&config.params, spec, &config.settings)?;
            if print {
                table.pretty_print_sweep();
            }
            if let Some(path) = &config.output.sweep_csv {
                export_sweep_csv(&table, path)?;
            }
            if let Some(path) = &config.output.sweep_json {
                export_sweep_json(&table, path)?;
            }
            if let Some(path) = &config.output.sweep_xlsx {
                export_sweep_xlsx(&table, path)?;
            }
            Some(table)
        }
        None => None,
    };
    info!("batch run finished");
    Ok(BatchReport { run, sweep })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CSTR::coolant_profile::ProfileKind;
    use crate::CSTR::sweep::SweepSpec;
    use crate::config::ProfileConfig;
    use std::fs;

    #[test]
    fn test_batch_with_profile_and_sweep() {
        let dir = tempfile::tempdir().unwrap();
        let traj_path = dir.path().join("startup.csv");
        let sweep_path = dir.path().join("sweep.csv");
        let json_path = dir.path().join("sweep.json");
        let xlsx_path = dir.path().join("sweep.xlsx");

        let mut config = SimulationConfig::default();
        config.settings.grid.n_points = 21;
        config.profile = Some(ProfileConfig {
            kind: ProfileKind::Ramp,
            ..ProfileConfig::default()
        });
        config.sweep = Some(SweepSpec {
            n_points: 2,
            ..SweepSpec::default()
        });
        config.output.trajectory_csv = Some(traj_path.to_string_lossy().into_owned());
        config.output.sweep_csv = Some(sweep_path.to_string_lossy().into_owned());
        config.output.sweep_json = Some(json_path.to_string_lossy().into_owned());
        config.output.sweep_xlsx = Some(xlsx_path.to_string_lossy().into_owned());

        let report = run_batch(&config, false).unwrap();
        assert_eq!(report.run.profile, Some(ProfileKind::Ramp));
        assert_eq!(report.sweep.as_ref().unwrap().rows.len(), 2);

        let traj = fs::read_to_string(&traj_path).unwrap();
        assert_eq!(traj.lines().count(), 22);
        let sweep = fs::read_to_string(&sweep_path).unwrap();
        assert_eq!(sweep.lines().count(), 3);
        assert!(json_path.exists());
        assert!(xlsx_path.exists());
    }

    #[test]
    fn test_batch_rejects_invalid_config() {
        let mut config = SimulationConfig::default();
        config.settings.grid.n_points = 0;
        assert!(run_batch(&config, false).is_err());
    }
}
