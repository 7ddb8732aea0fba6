//! # Coolant Flow Profiles
//!
//! Time-dependent coolant mass flow `mc(t)` used by the variable-coolant run.
//!
//! | Profile | `t < t_step` | `t_step <= t <= t_end` | `t > t_end` |
//! |---------|--------------|------------------------|-------------|
//! | Step | `mc0` | `mc1` | `mc0` |
//! | Ramp | `mc0` | linear `mc0 -> mc1` | `mc1` |
//! | Exponential | `mc0` | `mc1 - (mc1 - mc0) exp(-(t - t_step)/tau_exp)` | same |
//!
//! The step returns to `mc0` after `t_end` while the ramp holds `mc1`. Exponential
//! ignores `t_end`.
//!
//! Profiles are plain functions of time: the integrator samples them at every step it
//! takes, not only at the output grid.
use super::cstr_error::CstrError;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Profile selector, as offered to the user.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter, EnumString, Display,
)]
pub enum ProfileKind {
    #[default]
    Step,
    Ramp,
    Exponential,
}

impl ProfileKind {
    pub fn description(&self) -> &'static str {
        match self {
            ProfileKind::Step => "mc1 on [t_step, t_end], mc0 elsewhere",
            ProfileKind::Ramp => "linear mc0 -> mc1 on [t_step, t_end], then mc1",
            ProfileKind::Exponential => "relaxes from mc0 to mc1 with time constant tau_exp",
        }
    }
}

/// Raw profile parameters. Not every profile uses all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileParams {
    pub mc0: f64,
    pub mc1: f64,
    pub t_step: f64,
    pub t_end: f64,
    pub tau_exp: f64,
}

impl Default for ProfileParams {
    fn default() -> Self {
        Self {
            mc0: 1000.0,
            mc1: 2000.0,
            t_step: 1.0,
            t_end: 3.0,
            tau_exp: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CoolantProfile {
    Step {
        mc0: f64,
        mc1: f64,
        t_step: f64,
        t_end: f64,
    },
    Ramp {
        mc0: f64,
        mc1: f64,
        t_step: f64,
        t_end: f64,
    },
    Exponential {
        mc0: f64,
        mc1: f64,
        t_step: f64,
        tau_exp: f64,
    },
}

impl CoolantProfile {
    pub fn from_kind_and_params(
        kind: ProfileKind,
        params: &ProfileParams,
    ) -> Result<Self, CstrError> {
        let ProfileParams {
            mc0,
            mc1,
            t_step,
            t_end,
            tau_exp,
        } = *params;
        if ![mc0, mc1, t_step].iter().all(|v| v.is_finite()) {
            return Err(CstrError::InvalidProfile(format!(
                "{kind}: mc0, mc1 and t_step must be finite"
            )));
        }
        match kind {
            ProfileKind::Step | ProfileKind::Ramp => {
                if !t_end.is_finite() || t_end < t_step {
                    return Err(CstrError::InvalidProfile(format!(
                        "{kind}: t_end ({t_end}) must be finite and not before t_step ({t_step})"
                    )));
                }
                if kind == ProfileKind::Step {
                    Ok(CoolantProfile::Step {
                        mc0,
                        mc1,
                        t_step,
                        t_end,
                    })
                } else {
                    Ok(CoolantProfile::Ramp {
                        mc0,
                        mc1,
                        t_step,
                        t_end,
                    })
                }
            }
            ProfileKind::Exponential => {
                if !(tau_exp.is_finite() && tau_exp > 0.0) {
                    return Err(CstrError::InvalidProfile(format!(
                        "Exponential: tau_exp ({tau_exp}) must be positive"
                    )));
                }
                Ok(CoolantProfile::Exponential {
                    mc0,
                    mc1,
                    t_step,
                    tau_exp,
                })
            }
        }
    }

    pub fn kind(&self) -> ProfileKind {
        match self {
            CoolantProfile::Step { .. } => ProfileKind::Step,
            CoolantProfile::Ramp { .. } => ProfileKind::Ramp,
            CoolantProfile::Exponential { .. } => ProfileKind::Exponential,
        }
    }

    /// Coolant flow at time `t`, defined for every real `t`.
    pub fn mc_at(&self, t: f64) -> f64 {
        match *self {
            CoolantProfile::Step {
                mc0,
                mc1,
                t_step,
                t_end,
            } => {
                if t < t_step || t > t_end {
                    mc0
                } else {
                    mc1
                }
            }
            CoolantProfile::Ramp {
                mc0,
                mc1,
                t_step,
                t_end,
            } => {
                if t < t_step {
                    mc0
                } else if t >= t_end {
                    // also covers the degenerate t_end == t_step ramp
                    mc1
                } else {
                    mc0 + (mc1 - mc0) * (t - t_step) / (t_end - t_step)
                }
            }
            CoolantProfile::Exponential {
                mc0,
                mc1,
                t_step,
                tau_exp,
            } => {
                if t < t_step {
                    mc0
                } else {
                    mc1 - (mc1 - mc0) * (-(t - t_step) / tau_exp).exp()
                }
            }
        }
    }
}

/// Coolant flow seen by the reactor model: fixed or following a profile.
#[derive(Debug, Clone, PartialEq)]
pub enum CoolantFlow {
    Constant(f64),
    Profile(CoolantProfile),
}

impl CoolantFlow {
    pub fn mc_at(&self, t: f64) -> f64 {
        match self {
            CoolantFlow::Constant(mc) => *mc,
            CoolantFlow::Profile(profile) => profile.mc_at(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn profile(kind: ProfileKind) -> CoolantProfile {
        CoolantProfile::from_kind_and_params(kind, &ProfileParams::default()).unwrap()
    }

    #[test]
    fn test_step_profile() {
        let step = profile(ProfileKind::Step);
        assert_eq!(step.mc_at(0.5), 1000.0);
        assert_eq!(step.mc_at(1.0), 2000.0);
        assert_eq!(step.mc_at(2.0), 2000.0);
        assert_eq!(step.mc_at(3.0), 2000.0);
        assert_eq!(step.mc_at(3.5), 1000.0);
    }

    #[test]
    fn test_ramp_profile() {
        let ramp = profile(ProfileKind::Ramp);
        assert_eq!(ramp.mc_at(0.0), 1000.0);
        assert_eq!(ramp.mc_at(1.0), 1000.0);
        assert_relative_eq!(ramp.mc_at(2.0), 1500.0);
        assert_eq!(ramp.mc_at(3.0), 2000.0);
    }

    #[test]
    fn test_ramp_holds_mc1_after_t_end_unlike_step() {
        let ramp = profile(ProfileKind::Ramp);
        let step = profile(ProfileKind::Step);
        assert_eq!(ramp.mc_at(3.5), 2000.0);
        assert_eq!(step.mc_at(3.5), 1000.0);
    }

    #[test]
    fn test_exponential_profile() {
        let exp = profile(ProfileKind::Exponential);
        assert_eq!(exp.mc_at(0.5), 1000.0);
        assert_relative_eq!(exp.mc_at(1.0), 1000.0);
        assert_relative_eq!(exp.mc_at(2.0), 2000.0 - 1000.0 * (-1.0f64).exp());
        // never returns to mc0, approaches mc1
        assert!(exp.mc_at(20.0) > 1999.99);
    }

    #[test]
    fn test_profiles_defined_between_grid_points() {
        for kind in ProfileKind::iter() {
            let p = profile(kind);
            for t in [-1.0, 0.0, 1.234567, 2.999999, 3.000001, 1e6] {
                assert!(p.mc_at(t).is_finite(), "{kind} at t = {t}");
            }
        }
    }

    #[test]
    fn test_degenerate_ramp_jumps_at_t_step() {
        let params = ProfileParams {
            t_step: 2.0,
            t_end: 2.0,
            ..ProfileParams::default()
        };
        let ramp = CoolantProfile::from_kind_and_params(ProfileKind::Ramp, &params).unwrap();
        assert_eq!(ramp.mc_at(1.999), 1000.0);
        assert_eq!(ramp.mc_at(2.0), 2000.0);
    }

    #[test]
    fn test_invalid_profiles_rejected() {
        let backwards = ProfileParams {
            t_step: 3.0,
            t_end: 1.0,
            ..ProfileParams::default()
        };
        assert!(CoolantProfile::from_kind_and_params(ProfileKind::Step, &backwards).is_err());
        assert!(CoolantProfile::from_kind_and_params(ProfileKind::Ramp, &backwards).is_err());
        // t_end is not used by the exponential profile
        assert!(CoolantProfile::from_kind_and_params(ProfileKind::Exponential, &backwards).is_ok());

        let zero_tau = ProfileParams {
            tau_exp: 0.0,
            ..ProfileParams::default()
        };
        assert!(matches!(
            CoolantProfile::from_kind_and_params(ProfileKind::Exponential, &zero_tau),
            Err(CstrError::InvalidProfile(_))
        ));
    }

    #[test]
    fn test_kind_from_name() {
        assert_eq!(ProfileKind::from_str("Ramp").unwrap(), ProfileKind::Ramp);
        assert!(ProfileKind::from_str("Sine").is_err());
        assert_eq!(profile(ProfileKind::Exponential).kind(), ProfileKind::Exponential);
    }

    #[test]
    fn test_constant_flow() {
        let flow = CoolantFlow::Constant(1234.0);
        assert_eq!(flow.mc_at(0.0), 1234.0);
        assert_eq!(flow.mc_at(3.7), 1234.0);
    }
}
