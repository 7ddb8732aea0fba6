//! # Initial Value Problem Solvers
//!
//! Thin layer over the [`differential_equations`](https://docs.rs/differential-equations/)
//! crate: a system is any type implementing its `ODE<f64, SVector<f64, N>>` trait, the
//! method is picked by [`solver_params::SolverType`] and the states are sampled at a
//! fixed set of output times.
//!
//! ## Main Components
//!
//! - [`solver_params::SolverType`]: method selector
//! - [`solver_params::SolverParams`]: tolerances, step bound and step budget
//! - [`ode_api::IVPSolver`]: builds the `ODEProblem`, runs the method, samples the output grid
//!
//! ## Available Methods
//!
//! | Method | Kind | Notes |
//! |--------|------|-------|
//! | `Radau5` | Radau IIA, 3 stages, order 5, implicit | L-stable, stiff problems |
//! | `GaussLegendre4` | Gauss-Legendre, 2 stages, order 4, implicit | A-stable |
//! | `GaussLegendre6` | Gauss-Legendre, 3 stages, order 6, implicit | A-stable |
//! | `LobattoIIIC4` | Lobatto IIIC, 3 stages, order 4, implicit | L-stable |
//! | `Dopri5` | Dormand-Prince 5(4), explicit | non-stiff problems |
//!
//! All methods are adaptive. Use the implicit ones for stiff problems (Arrhenius
//! kinetics with high activation energies).
//!
//! ## Output grid
//!
//! States at the output times come from the method's dense output (`t_eval`). The
//! right-hand side is evaluated at every interior time the step controller chooses,
//! so time-dependent inputs must be defined for every real `t`.
pub mod ode_api;
pub mod solver_params;
