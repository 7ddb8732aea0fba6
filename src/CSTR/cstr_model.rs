//! # CSTR Start-up Model
//!
//! Mass and energy balances of a stirred tank that starts filled with water and is
//! then fed with propylene oxide (A), water (B) and methanol (M). State vector:
//!
//! | index | variable | meaning |
//! |-------|----------|---------|
//! | 0 | `Ca` | propylene oxide, lbmol/ft³ |
//! | 1 | `Cb` | water, lbmol/ft³ |
//! | 2 | `Cc` | propylene glycol, lbmol/ft³ |
//! | 3 | `Cm` | methanol, lbmol/ft³ |
//! | 4 | `T` | reactor temperature, °F |
//!
//! ```text
//! dCi/dt = (Ci0 - Ci)/tau + ri          ra = rb = -k(T) Ca,  rc = -ra,  rm = 0
//! dT/dt  = (Q - Fa0 ThetaCp (T - T0) + dH ra V) / (NCp + eps)
//! ```
//! States are not clipped; negative concentrations propagate as computed.
use super::coolant_profile::CoolantFlow;
use super::kinetics::{
    DH_RXN, NCP_EPS, heat_duty, holdup_heat_capacity, reaction_rate, theta_cp, volumetric_flow,
};
use differential_equations::ode::ODE;
use nalgebra::SVector;
use serde::{Deserialize, Serialize};

/// tank volume, gallons
pub const TANK_VOLUME_GAL: f64 = 500.0;
pub const GAL_PER_FT3: f64 = 7.484;
/// molar density of water: the tank starts full of it
pub const CB_INITIAL: f64 = 3.45;
pub const N_STATES: usize = 5;

/// `[Ca, Cb, Cc, Cm, T]`
pub type StateVector = SVector<f64, N_STATES>;

/// Feed and heat-exchange parameters of one run.
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatingParams {
    /// feed of propylene oxide, lbmol/h
    pub Fa0: f64,
    /// feed of water, lbmol/h
    pub Fb0: f64,
    /// feed of methanol, lbmol/h
    pub Fm0: f64,
    /// feed and initial temperature, °F
    pub T0: f64,
    /// coolant inlet temperature, °F
    pub Ta1: f64,
    /// heat exchange coefficient times area, Btu/(h·°F)
    pub UA: f64,
    /// coolant flow, lbmol/h
    pub mc: f64,
    /// reactor volume, ft³
    pub V: f64,
}

impl Default for OperatingParams {
    fn default() -> Self {
        Self {
            Fa0: 80.0,
            Fb0: 1000.0,
            Fm0: 100.0,
            T0: 75.0,
            Ta1: 60.0,
            UA: 16000.0,
            mc: 1000.0,
            V: TANK_VOLUME_GAL / GAL_PER_FT3,
        }
    }
}

impl OperatingParams {
    /// Volumetric feed rate, ft³/h.
    pub fn v0(&self) -> f64 {
        volumetric_flow(self.Fa0, self.Fb0, self.Fm0)
    }

    /// Residence time, h.
    pub fn tau(&self) -> f64 {
        self.V / self.v0()
    }

    /// Conversion of A for an outlet concentration `ca`.
    pub fn conversion(&self, ca: f64) -> f64 {
        (self.Fa0 - ca * self.v0()) / self.Fa0
    }
}

/// Named view of the state vector.
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReactorState {
    pub Ca: f64,
    pub Cb: f64,
    pub Cc: f64,
    pub Cm: f64,
    pub T: f64,
}

impl ReactorState {
    /// Tank full of water at the feed temperature.
    #[allow(non_snake_case)]
    pub fn startup(T0: f64) -> Self {
        Self {
            Ca: 0.0,
            Cb: CB_INITIAL,
            Cc: 0.0,
            Cm: 0.0,
            T: T0,
        }
    }

    /// Filled with NaN; marks failed sweep points.
    pub fn nan() -> Self {
        Self {
            Ca: f64::NAN,
            Cb: f64::NAN,
            Cc: f64::NAN,
            Cm: f64::NAN,
            T: f64::NAN,
        }
    }

    pub fn to_vector(&self) -> StateVector {
        StateVector::new(self.Ca, self.Cb, self.Cc, self.Cm, self.T)
    }

    pub fn from_slice(y: &[f64]) -> Self {
        Self {
            Ca: y[0],
            Cb: y[1],
            Cc: y[2],
            Cm: y[3],
            T: y[4],
        }
    }
}

/// Right-hand side of the start-up problem. Owns its parameters, so nothing is shared
/// between runs.
#[derive(Debug, Clone)]
pub struct CstrModel {
    params: OperatingParams,
    coolant: CoolantFlow,
}

impl CstrModel {
    /// Model with the fixed coolant flow `params.mc`.
    pub fn new(params: OperatingParams) -> Self {
        let coolant = CoolantFlow::Constant(params.mc);
        Self { params, coolant }
    }

    /// Model with an explicit coolant flow; `params.mc` is then not used.
    pub fn with_coolant(params: OperatingParams, coolant: CoolantFlow) -> Self {
        Self { params, coolant }
    }

    pub fn params(&self) -> &OperatingParams {
        &self.params
    }

    pub fn coolant(&self) -> &CoolantFlow {
        &self.coolant
    }

    #[allow(non_snake_case)]
    pub fn derivatives(&self, t: f64, s: &ReactorState) -> ReactorState {
        let p = &self.params;
        let v0 = p.v0();
        let tau = p.V / v0;
        let (Ca0, Cb0, Cm0) = (p.Fa0 / v0, p.Fb0 / v0, p.Fm0 / v0);

        let ra = reaction_rate(s.T, s.Ca);
        let rb = ra;
        let rc = -ra;

        let Q = heat_duty(self.coolant.mc_at(t), p.Ta1, s.T, p.UA);
        let NCp = holdup_heat_capacity(s.Ca, s.Cb, s.Cc, s.Cm, p.V);
        let ThetaCp = theta_cp(p.Fa0, p.Fb0, p.Fm0);

        ReactorState {
            Ca: (Ca0 - s.Ca) / tau + ra,
            Cb: (Cb0 - s.Cb) / tau + rb,
            Cc: -s.Cc / tau + rc,
            Cm: (Cm0 - s.Cm) / tau,
            T: (Q - p.Fa0 * ThetaCp * (s.T - p.T0) + DH_RXN * ra * p.V) / (NCp + NCP_EPS),
        }
    }
}

impl ODE<f64, StateVector> for CstrModel {
    fn diff(&self, t: f64, y: &StateVector, dydt: &mut StateVector) {
        *dydt = self
            .derivatives(t, &ReactorState::from_slice(y.as_slice()))
            .to_vector();
    }
}
