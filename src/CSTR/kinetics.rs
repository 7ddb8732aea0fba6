//! # Kinetics and Heat Exchange
//!
//! Acid-catalysed hydrolysis of propylene oxide (A) with water (B) to propylene glycol (C),
//! methanol (M) being an inert diluent:
//!
//! ```text
//! C3H6O + H2O -> C3H8O2,      -r_A = k(T) * C_A
//! k(T) = 16.96e12 * exp(-32400 / (R * (T + 460)))
//! ```
//!
//! Units follow the classic textbook start-up problem: temperatures in °F (converted to
//! °R inside the Arrhenius term), flows in lbmol/h, volume in ft³, heat in Btu.
//!
//! The coolant removes heat through an exchanger whose outlet temperature approaches
//! the reactor temperature exponentially:
//!
//! ```text
//! Ta2 = T - (T - Ta1) * exp(-UA / (Cp_c * m_c))
//! Q   = m_c * Cp_c * (Ta1 - Ta2)
//! ```

/// gas constant, Btu/(lbmol·°R)
pub const R_GAS: f64 = 1.987;
/// pre-exponential factor, 1/h
pub const ARRHENIUS_A: f64 = 16.96e12;
/// activation energy, Btu/lbmol
pub const ACTIVATION_E: f64 = 32400.0;
/// °F to °R
pub const T_OFFSET: f64 = 460.0;
/// heat of reaction, Btu/lbmol of A
pub const DH_RXN: f64 = -36000.0;

/// heat capacity of the coolant, Btu/(lbmol·°F)
pub const CP_COOLANT: f64 = 18.0;
pub const CP_A: f64 = 35.0;
pub const CP_B: f64 = 18.0;
pub const CP_C: f64 = 46.0;
pub const CP_M: f64 = 19.5;

/// molar densities of the pure feed components, lbmol/ft³
pub const RHO_A: f64 = 0.923;
pub const RHO_B: f64 = 3.45;
pub const RHO_M: f64 = 1.54;

/// keeps the energy balance finite when the holdup heat capacity vanishes
pub const NCP_EPS: f64 = 1e-8;

/// Arrhenius rate constant, 1/h. `temperature` in °F.
pub fn rate_constant(temperature: f64) -> f64 {
    ARRHENIUS_A * (-ACTIVATION_E / (R_GAS * (temperature + T_OFFSET))).exp()
}

/// Rate of formation of A (negative: A is consumed), lbmol/(ft³·h).
pub fn reaction_rate(temperature: f64, ca: f64) -> f64 {
    -rate_constant(temperature) * ca
}

/// Heat exchanged with the coolant, Btu/h (negative when the reactor is cooled).
pub fn heat_duty(mc: f64, ta1: f64, temperature: f64, ua: f64) -> f64 {
    let ta2 = temperature - (temperature - ta1) * (-ua / (CP_COOLANT * mc)).exp();
    mc * CP_COOLANT * (ta1 - ta2)
}

/// Total volumetric feed rate, ft³/h.
pub fn volumetric_flow(fa0: f64, fb0: f64, fm0: f64) -> f64 {
    fa0 / RHO_A + fb0 / RHO_B + fm0 / RHO_M
}

/// Heat capacity of the feed per mole of A, Btu/(lbmol A·°F).
pub fn theta_cp(fa0: f64, fb0: f64, fm0: f64) -> f64 {
    CP_A + fb0 / fa0 * CP_B + fm0 / fa0 * CP_M
}

/// Heat capacity of the reactor holdup, Btu/°F.
pub fn holdup_heat_capacity(ca: f64, cb: f64, cc: f64, cm: f64, volume: f64) -> f64 {
    ca * volume * CP_A + cb * volume * CP_B + cc * volume * CP_C + cm * volume * CP_M
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rate_constant() {
        let t: f64 = 75.0;
        let expected = 16.96e12 * (-32400.0 / (1.987 * 535.0f64)).exp();
        assert_relative_eq!(rate_constant(t), expected, max_relative = 1e-14);
        // strongly increasing with temperature
        assert!(rate_constant(150.0) > 10.0 * rate_constant(75.0));
    }

    #[test]
    fn test_reaction_rate_first_order_in_a() {
        let t = 100.0;
        assert_eq!(reaction_rate(t, 0.0), 0.0);
        assert_relative_eq!(reaction_rate(t, 2.0), 2.0 * reaction_rate(t, 1.0));
        assert!(reaction_rate(t, 1.0) < 0.0);
    }

    #[test]
    fn test_heat_duty_exponential_approach() {
        let (mc, ta1, t, ua): (f64, f64, f64, f64) = (1000.0, 60.0, 75.0, 16000.0);
        let ta2 = t - (t - ta1) * (-ua / (18.0 * mc)).exp();
        assert_relative_eq!(heat_duty(mc, ta1, t, ua), mc * 18.0 * (ta1 - ta2));
        // cooling when the reactor is hotter than the coolant
        assert!(heat_duty(mc, ta1, t, ua) < 0.0);
        // the coolant cannot remove more than m*Cp*(T - Ta1)
        assert!(heat_duty(mc, ta1, t, ua).abs() < mc * 18.0 * (t - ta1));
        // and it differs from the linear UA*(Ta1 - T) form
        assert!((heat_duty(mc, ta1, t, ua) - ua * (ta1 - t)).abs() > 1.0);
        // no heat exchange at equal temperatures
        assert_eq!(heat_duty(mc, 60.0, 60.0, ua), 0.0);
    }

    #[test]
    fn test_heat_duty_without_coolant_flow() {
        assert_eq!(heat_duty(0.0, 60.0, 120.0, 16000.0), 0.0);
    }

    #[test]
    fn test_volumetric_flow_and_theta_cp() {
        let v0 = volumetric_flow(80.0, 1000.0, 100.0);
        assert_relative_eq!(v0, 80.0 / 0.923 + 1000.0 / 3.45 + 100.0 / 1.54);
        assert!(v0 > 0.0);
        assert_relative_eq!(
            theta_cp(80.0, 1000.0, 100.0),
            35.0 + 1000.0 / 80.0 * 18.0 + 100.0 / 80.0 * 19.5
        );
        // pathological zero feed of A propagates as infinity, not a panic
        assert!(theta_cp(0.0, 1000.0, 100.0).is_infinite());
    }

    #[test]
    fn test_holdup_heat_capacity() {
        let v = 500.0 / 7.484;
        assert_relative_eq!(holdup_heat_capacity(0.0, 3.45, 0.0, 0.0, v), 3.45 * v * 18.0);
        assert_relative_eq!(
            holdup_heat_capacity(1.0, 1.0, 1.0, 1.0, 1.0),
            35.0 + 18.0 + 46.0 + 19.5
        );
    }
}
