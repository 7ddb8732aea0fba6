//! # CSTR Start-up Module
//!
//! Dynamic start-up of a continuous stirred-tank reactor producing propylene glycol by
//! acid-catalysed hydrolysis of propylene oxide. The tank initially holds water at the
//! feed temperature; at `t = 0` the feed of propylene oxide, water and methanol starts
//! and the coolant removes the heat of reaction.
//!
//! ## Nomenclature
//!
//! | Symbol | Description | Units |
//! |--------|-------------|-------|
//! | `Ca, Cb, Cc, Cm` | concentrations of propylene oxide, water, glycol, methanol | lbmol/ft³ |
//! | `T` | reactor temperature | °F |
//! | `Fa0, Fb0, Fm0` | molar feeds | lbmol/h |
//! | `T0` | feed and initial temperature | °F |
//! | `Ta1` | coolant inlet temperature | °F |
//! | `UA` | heat exchange coefficient × area | Btu/(h·°F) |
//! | `mc` | coolant flow | lbmol/h |
//! | `V` | reactor volume (500 gal) | ft³ |
//! | `v0`, `tau` | volumetric feed, residence time `V/v0` | ft³/h, h |
//! | `X` | conversion of propylene oxide | - |
//!
//! ## Pipeline
//!
//! operating parameters → [`cstr_model::CstrModel`] → stiff integrator
//! ([`crate::ODEsolvers`]) → trajectory → [`steady_state`] detector + conversion →
//! [`cstr_simulation::SimulationResult`]. The [`sweep`] orchestrator repeats the
//! pipeline for each value of one parameter.
//!
//! ## Submodules
//!
//! - [`kinetics`]: rate constant, heat duty and physical constants
//! - [`coolant_profile`]: step, ramp and exponential coolant flow profiles
//! - [`cstr_model`]: operating parameters, state and right-hand side
//! - [`steady_state`]: steady-state time detection
//! - [`cstr_simulation`]: single runs with fixed or profiled coolant
//! - [`sweep`]: one-parameter sweeps with per-point failure isolation
//! - [`cstr_output`]: pretty-printed tables
pub mod coolant_profile;
pub mod cstr_error;
pub mod cstr_model;
pub mod cstr_output;
pub mod cstr_simulation;
mod cstr_tests;
pub mod kinetics;
pub mod steady_state;
pub mod sweep;
