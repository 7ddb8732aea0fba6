#[cfg(test)]
mod tests {
    use crate::CSTR::coolant_profile::{CoolantProfile, ProfileKind, ProfileParams};
    use crate::CSTR::cstr_error::CstrError;
    use crate::CSTR::cstr_model::OperatingParams;
    use crate::CSTR::cstr_simulation::{RunSettings, simulate, simulate_with_profile};
    use crate::CSTR::steady_state::SteadyState;
    use crate::CSTR::sweep::{SweepParameter, SweepSpec, run_sweep};
    use crate::ODEsolvers::solver_params::SolverType;
    use approx::assert_relative_eq;
    use strum::IntoEnumIterator;

    /// coarser grid for tests that only compare runs with each other
    fn quick_settings() -> RunSettings {
        let mut settings = RunSettings::default();
        settings.grid.n_points = 41;
        settings
    }

    #[test]
    fn test_default_run() {
        let params = OperatingParams::default();
        let result = simulate(&params, &RunSettings::default()).unwrap();
        let traj = &result.trajectory;

        assert_eq!(traj.len(), 300);
        assert_eq!(traj.t[0], 0.0);
        assert_eq!(traj.t[299], 4.0);
        assert!(traj.y.iter().all(|v| v.is_finite()));
        assert_eq!(result.final_state, traj.state(299));

        assert!(result.conversion > 0.0 && result.conversion <= 1.0);
        assert_relative_eq!(
            result.conversion,
            (params.Fa0 - result.final_state.Ca * params.v0()) / params.Fa0
        );
        // the exothermic reaction heats the reactor above the feed temperature
        assert!(result.peak_temperature > params.T0);
        assert!(result.t_peak > 0.0 && result.t_peak <= 4.0);
        assert_eq!(
            result.limit_exceeded,
            result.peak_temperature > RunSettings::default().temperature_limit
        );
        // glycol is produced, methanol approaches its feed concentration
        assert!(result.final_state.Cc > 0.0);
        assert_relative_eq!(
            result.final_state.Cm,
            params.Fm0 / params.v0(),
            max_relative = 1e-3
        );
        if let SteadyState::Reached { t, index } = result.steady_state {
            assert_eq!(traj.t[index], t);
            assert!(index >= 1);
        }
    }

    #[test]
    fn test_runs_are_deterministic() {
        let params = OperatingParams::default();
        let a = simulate(&params, &quick_settings()).unwrap();
        let b = simulate(&params, &quick_settings()).unwrap();
        assert_eq!(a.trajectory, b.trajectory);
        assert_eq!(a.steady_state, b.steady_state);
        assert_eq!(a.conversion, b.conversion);
    }

    /// dashboard defaults on the 300-point grid, cross-checked against an explicit run at rtol 1e-11
    #[test]
    fn test_default_run_reference_values() {
        let result = simulate(&OperatingParams::default(), &RunSettings::default()).unwrap();
        assert_relative_eq!(result.final_state.T, 138.5305, epsilon = 2e-3);
        assert_relative_eq!(result.conversion, 0.790882, epsilon = 2e-5);
        match result.steady_state {
            SteadyState::Reached { t, index } => {
                assert_eq!(index, 136);
                assert_relative_eq!(t, 1.8194, epsilon = 1e-4);
            }
            SteadyState::NotReached => panic!("steady state expected"),
        }
    }

    #[test]
    fn test_solvers_agree() {
        let params = OperatingParams::default();
        let reference = simulate(&params, &quick_settings()).unwrap();
        assert_eq!(RunSettings::default().solver, SolverType::Radau5);
        for solver in [
            SolverType::GaussLegendre4,
            SolverType::GaussLegendre6,
            SolverType::LobattoIIIC4,
            SolverType::Dopri5,
        ] {
            let settings = RunSettings {
                solver,
                ..quick_settings()
            };
            let other = simulate(&params, &settings).unwrap();
            assert_relative_eq!(
                other.final_state.T,
                reference.final_state.T,
                max_relative = 5e-4
            );
            assert_relative_eq!(other.conversion, reference.conversion, max_relative = 5e-4);
        }
    }

    #[test]
    fn test_profile_run_reports_mc_series() {
        let params = OperatingParams::default();
        let profile =
            CoolantProfile::from_kind_and_params(ProfileKind::Step, &ProfileParams::default())
                .unwrap();
        let settings = quick_settings();
        let result = simulate_with_profile(&params, &profile, &settings).unwrap();

        assert_eq!(result.profile, Some(ProfileKind::Step));
        assert_eq!(result.mc.len(), result.trajectory.len());
        for (t, mc) in result.trajectory.t.iter().zip(&result.mc) {
            assert_eq!(*mc, profile.mc_at(*t));
        }
        // grid of 41 points on [0, 4]: t = 2.0 is index 20
        assert_relative_eq!(result.trajectory.t[20], 2.0, epsilon = 1e-12);
        assert_eq!(result.mc[20], 2000.0);
        assert_eq!(result.mc[0], 1000.0);

        // stronger cooling during the step keeps the reactor colder than the fixed run
        let fixed = simulate(&params, &settings).unwrap();
        assert!(result.trajectory.state(30).T < fixed.trajectory.state(30).T);
    }

    #[test]
    fn test_every_profile_integrates() {
        let params = OperatingParams::default();
        for kind in ProfileKind::iter() {
            let profile =
                CoolantProfile::from_kind_and_params(kind, &ProfileParams::default()).unwrap();
            let result = simulate_with_profile(&params, &profile, &quick_settings()).unwrap();
            assert!(result.trajectory.y.iter().all(|v| v.is_finite()), "{kind}");
        }
    }

    #[test]
    fn test_fa0_sweep() {
        let base = OperatingParams::default();
        let spec = SweepSpec::from_name("Fa0", 50.0, 150.0, 5).unwrap();
        let table = run_sweep(&base, &spec, &quick_settings()).unwrap();

        assert_eq!(table.parameter, SweepParameter::Fa0);
        assert_eq!(table.rows.len(), 5);
        assert_eq!(table.values(), vec![50.0, 75.0, 100.0, 125.0, 150.0]);
        for row in &table.rows {
            assert!(!row.is_failed());
            assert_eq!(row.params.Fa0, row.value);
            for other in SweepParameter::iter().filter(|p| *p != SweepParameter::Fa0) {
                assert_eq!(other.get(&row.params), other.get(&base));
            }
            // conversion uses the swept Fa0 and its own v0
            assert_relative_eq!(
                row.conversion,
                (row.value - row.final_state.Ca * row.params.v0()) / row.value
            );
        }
    }

    #[test]
    fn test_sweep_row_matches_single_run() {
        let base = OperatingParams::default();
        let spec = SweepSpec {
            parameter: SweepParameter::UA,
            start: 8000.0,
            end: 16000.0,
            n_points: 2,
        };
        let settings = quick_settings();
        let table = run_sweep(&base, &spec, &settings).unwrap();
        let single = simulate(&base, &settings).unwrap();
        let last = &table.rows[1];
        assert_eq!(last.value, 16000.0);
        assert_eq!(last.final_state, single.final_state);
        assert_eq!(last.conversion, single.conversion);
        assert_eq!(last.steady_state, single.steady_state);
        // weaker heat exchange gives a hotter reactor
        assert!(table.rows[0].final_state.T > last.final_state.T);
    }

    /// sweeping T0 moves the feed temperature and the initial tank temperature together
    #[test]
    fn test_t0_sweep_moves_initial_temperature() {
        let base = OperatingParams::default();
        let spec = SweepSpec::from_name("T0", 30.0, 75.0, 2).unwrap();
        let settings = quick_settings();
        let table = run_sweep(&base, &spec, &settings).unwrap();

        let cold = OperatingParams {
            T0: 30.0,
            ..base.clone()
        };
        let single = simulate(&cold, &settings).unwrap();
        assert_eq!(single.trajectory.state(0).T, 30.0);
        assert_eq!(table.rows[0].final_state, single.final_state);
        assert_relative_eq!(table.rows[0].final_state.T, 41.14, epsilon = 0.05);
        // the T0 = 75 point is the default run
        let default_run = simulate(&base, &settings).unwrap();
        assert_eq!(table.rows[1].final_state, default_run.final_state);
    }

    #[test]
    fn test_sweep_is_reproducible() {
        let base = OperatingParams::default();
        let spec = SweepSpec::from_name("mc", 500.0, 2000.0, 3).unwrap();
        let a = run_sweep(&base, &spec, &quick_settings()).unwrap();
        let b = run_sweep(&base, &spec, &quick_settings()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_failed_point_does_not_abort_sweep() {
        let base = OperatingParams::default();
        // Fa0 = 0 makes ThetaCp infinite and the energy balance NaN
        let spec = SweepSpec::from_name("Fa0", 0.0, 100.0, 3).unwrap();
        let table = run_sweep(&base, &spec, &quick_settings()).unwrap();

        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.n_failed(), 1);
        let failed = &table.rows[0];
        assert_eq!(failed.value, 0.0);
        assert!(failed.is_failed());
        assert!(failed.final_state.T.is_nan());
        assert!(failed.conversion.is_nan());
        assert!(failed.status().starts_with("failed"));
        assert!(table.rows[1..].iter().all(|r| !r.is_failed()));
    }

    #[test]
    fn test_invalid_sweep_is_an_error() {
        let spec = SweepSpec {
            n_points: 1,
            ..SweepSpec::default()
        };
        assert!(matches!(
            run_sweep(&OperatingParams::default(), &spec, &quick_settings()),
            Err(CstrError::InvalidSweep(_))
        ));
    }

    #[test]
    fn test_solver_failure_propagates_from_single_run() {
        let params = OperatingParams {
            Fa0: 0.0,
            ..OperatingParams::default()
        };
        assert!(matches!(
            simulate(&params, &quick_settings()),
            Err(CstrError::Solver(_))
        ));
    }
}
