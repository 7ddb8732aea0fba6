//! # IVP Solver API
//!
//! [`IVPSolver`] integrates a system implementing `differential_equations`' `ODE` trait
//! from the first to the last of a strictly increasing set of output times and returns
//! the states at exactly those times.
//!
//! ## Usage
//! ```rust, ignore
//! let mut solver = IVPSolver::new(SolverType::Radau5);
//! solver.set_parameters(SolverParams { rtol: 1e-8, ..SolverParams::default() });
//! let solution = solver.solve(&system, y0, &t_eval)?;
//! // solution.y[i] is the state at t_eval[i]
//! ```
//!
//! ## Failures
//! The run fails (no partial solution) when the right-hand side is not finite at the
//! initial point, when the method reports an error (step budget spent, step size
//! collapsed, singular Newton matrix), or when a sampled state is not finite.
use super::solver_params::{OdeError, SolverParams, SolverType};
use differential_equations::methods::{ExplicitRungeKutta, ImplicitRungeKutta};
use differential_equations::ode::{ODE, ODEProblem};
use log::debug;
use nalgebra::SVector;

/// The problem is integrated this fraction of the span past the last output time, so
/// that the last output time always lies inside an accepted step.
const END_MARGIN: f64 = 1e-9;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverStats {
    pub accepted_steps: usize,
    pub rejected_steps: usize,
    pub function_evals: usize,
    pub jacobian_evals: usize,
}

/// States at the requested output times.
#[derive(Debug, Clone, PartialEq)]
pub struct OdeSolution<const N: usize> {
    pub t: Vec<f64>,
    pub y: Vec<SVector<f64, N>>,
    pub stats: SolverStats,
}

#[derive(Debug, Clone)]
pub struct IVPSolver {
    solvertype: SolverType,
    params: SolverParams,
}

impl IVPSolver {
    pub fn new(solvertype: SolverType) -> Self {
        Self {
            solvertype,
            params: SolverParams::default(),
        }
    }

    pub fn set_parameters(&mut self, params: SolverParams) {
        self.params = params;
    }

    pub fn solvertype(&self) -> SolverType {
        self.solvertype
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    fn check_task<const N: usize>(
        &self,
        y0: &SVector<f64, N>,
        t_eval: &[f64],
    ) -> Result<(), OdeError> {
        self.params.validate()?;
        if !y0.iter().all(|v| v.is_finite()) {
            return Err(OdeError::InvalidProblem(
                "initial state is not finite".to_string(),
            ));
        }
        if t_eval.len() < 2 {
            return Err(OdeError::InvalidProblem(
                "at least two output times needed".to_string(),
            ));
        }
        if !t_eval.iter().all(|t| t.is_finite()) {
            return Err(OdeError::InvalidProblem(
                "output times must be finite".to_string(),
            ));
        }
        if t_eval.windows(2).any(|w| w[1] <= w[0]) {
            return Err(OdeError::InvalidProblem(
                "output times must be strictly increasing".to_string(),
            ));
        }
        Ok(())
    }

    /// Integrates `ode` from `t_eval[0]` with state `y0` and returns the states at every
    /// time of `t_eval`.
    pub fn solve<F, const N: usize>(
        &self,
        ode: &F,
        y0: SVector<f64, N>,
        t_eval: &[f64],
    ) -> Result<OdeSolution<N>, OdeError>
    where
        F: ODE<f64, SVector<f64, N>>,
    {
        self.check_task(&y0, t_eval)?;
        let t0 = t_eval[0];
        let t_last = t_eval[t_eval.len() - 1];

        let mut dydt0 = SVector::<f64, N>::zeros();
        ode.diff(t0, &y0, &mut dydt0);
        if !dydt0.iter().all(|v| v.is_finite()) {
            return Err(OdeError::NonFiniteState { t: t0 });
        }

        let tf = t_last + END_MARGIN * (t_last - t0);
        let problem = ODEProblem::new(ode, t0, tf, y0);
        let p = &self.params;
        let solution = match self.solvertype {
            SolverType::Radau5 => {
                let mut method = ImplicitRungeKutta::radau5()
                    .rtol(p.rtol)
                    .atol(p.atol)
                    .h_max(p.max_step)
                    .max_steps(p.max_steps);
                problem.t_eval(t_eval).solve(&mut method)
            }
            SolverType::GaussLegendre4 => {
                let mut method = ImplicitRungeKutta::gauss_legendre_4()
                    .rtol(p.rtol)
                    .atol(p.atol)
                    .h_max(p.max_step)
                    .max_steps(p.max_steps);
                problem.t_eval(t_eval).solve(&mut method)
            }
            SolverType::GaussLegendre6 => {
                let mut method = ImplicitRungeKutta::gauss_legendre_6()
                    .rtol(p.rtol)
                    .atol(p.atol)
                    .h_max(p.max_step)
                    .max_steps(p.max_steps);
                problem.t_eval(t_eval).solve(&mut method)
            }
            SolverType::LobattoIIIC4 => {
                let mut method = ImplicitRungeKutta::lobatto_iiic_4()
                    .rtol(p.rtol)
                    .atol(p.atol)
                    .h_max(p.max_step)
                    .max_steps(p.max_steps);
                problem.t_eval(t_eval).solve(&mut method)
            }
            SolverType::Dopri5 => {
                let mut method = ExplicitRungeKutta::dopri5()
                    .rtol(p.rtol)
                    .atol(p.atol)
                    .h_max(p.max_step)
                    .max_steps(p.max_steps);
                problem.t_eval(t_eval).solve(&mut method)
            }
        }
        .map_err(|e| OdeError::Method(e.to_string()))?;

        if solution.y.len() != t_eval.len() {
            return Err(OdeError::Method(format!(
                "{} of {} output times sampled",
                solution.y.len(),
                t_eval.len()
            )));
        }
        if let Some(i) = solution
            .y
            .iter()
            .position(|y| !y.iter().all(|v| v.is_finite()))
        {
            return Err(OdeError::NonFiniteState { t: t_eval[i] });
        }

        let stats = SolverStats {
            accepted_steps: solution.steps.accepted,
            rejected_steps: solution.steps.rejected,
            function_evals: solution.evals.function,
            jacobian_evals: solution.evals.jacobian,
        };
        debug!(
            "{}: {} accepted, {} rejected steps, {} function evaluations",
            self.solvertype, stats.accepted_steps, stats.rejected_steps, stats.function_evals
        );
        Ok(OdeSolution {
            t: t_eval.to_vec(),
            y: solution.y,
            stats,
        })
    }
}

/// `n` evenly spaced points from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut v: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            v[n - 1] = end;
            v
        }
    }
}
