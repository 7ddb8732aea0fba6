////////////////////////PRETTY PRINTING/////////////////////////////
use super::cstr_model::OperatingParams;
use super::cstr_simulation::SimulationResult;
use super::sweep::SweepTable;
use prettytable::{Table, row};

fn fmt_value(v: f64, precision: usize) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.*}", precision, v)
    }
}

impl OperatingParams {
    pub fn params_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["Parameter", "Value", "Units"]);
        table.add_row(row!["Feed of A (Fa0)", format!("{:.2}", self.Fa0), "lbmol/h"]);
        table.add_row(row!["Feed of B (Fb0)", format!("{:.2}", self.Fb0), "lbmol/h"]);
        table.add_row(row!["Feed of M (Fm0)", format!("{:.2}", self.Fm0), "lbmol/h"]);
        table.add_row(row!["Feed temperature (T0)", format!("{:.2}", self.T0), "°F"]);
        table.add_row(row![
            "Coolant inlet temperature (Ta1)",
            format!("{:.2}", self.Ta1),
            "°F"
        ]);
        table.add_row(row!["UA", format!("{:.1}", self.UA), "Btu/(h·°F)"]);
        table.add_row(row!["Coolant flow (mc)", format!("{:.1}", self.mc), "lbmol/h"]);
        table.add_row(row!["Volume (V)", format!("{:.3}", self.V), "ft³"]);
        table.add_row(row!["Volumetric flow (v0)", format!("{:.3}", self.v0()), "ft³/h"]);
        table.add_row(row!["Residence time (tau)", format!("{:.4}", self.tau()), "h"]);
        table
    }

    pub fn pretty_print_params(&self) {
        println!("\n=== OPERATING PARAMETERS ===");
        self.params_table().printstd();
    }
}

impl SimulationResult {
    pub fn summary_table(&self) -> Table {
        let s = &self.final_state;
        let mut table = Table::new();
        table.add_row(row!["Quantity", "Value", "Units"]);
        table.add_row(row!["Ca (final)", format!("{:.5}", s.Ca), "lbmol/ft³"]);
        table.add_row(row!["Cb (final)", format!("{:.5}", s.Cb), "lbmol/ft³"]);
        table.add_row(row!["Cc (final)", format!("{:.5}", s.Cc), "lbmol/ft³"]);
        table.add_row(row!["Cm (final)", format!("{:.5}", s.Cm), "lbmol/ft³"]);
        table.add_row(row!["T (final)", format!("{:.3}", s.T), "°F"]);
        table.add_row(row!["Conversion X", format!("{:.4}", self.conversion), "-"]);
        table.add_row(row!["Steady state", self.steady_state.to_string(), ""]);
        table.add_row(row![
            "Peak temperature",
            format!("{:.3} at t = {:.3} h", self.peak_temperature, self.t_peak),
            "°F"
        ]);
        if let Some(kind) = self.profile {
            table.add_row(row!["Coolant profile", kind.to_string(), ""]);
        }
        table.add_row(row![
            "Solver",
            format!(
                "{}: {} accepted, {} rejected steps",
                self.solver, self.stats.accepted_steps, self.stats.rejected_steps
            ),
            ""
        ]);
        table
    }

    /// Every `every`-th output point plus the last one.
    pub fn trajectory_table(&self, every: usize) -> Table {
        let every = every.max(1);
        let traj = &self.trajectory;
        let mut table = Table::new();
        table.add_row(row!["t, h", "Ca", "Cb", "Cc", "Cm", "T, °F", "mc"]);
        let last = traj.len().saturating_sub(1);
        for i in (0..traj.len()).filter(|i| i % every == 0 || *i == last) {
            let s = traj.state(i);
            table.add_row(row![
                format!("{:.3}", traj.t[i]),
                format!("{:.5}", s.Ca),
                format!("{:.5}", s.Cb),
                format!("{:.5}", s.Cc),
                format!("{:.5}", s.Cm),
                format!("{:.3}", s.T),
                format!("{:.1}", self.mc[i])
            ]);
        }
        table
    }

    pub fn pretty_print_result(&self) {
        println!("\n=== START-UP RESULT ===");
        self.summary_table().printstd();
        if self.limit_exceeded {
            println!(
                "WARNING: temperature exceeded the safety limit, peak {:.2} °F",
                self.peak_temperature
            );
        }
    }

    pub fn pretty_print_trajectory(&self, every: usize) {
        println!("\n=== TRAJECTORY ===");
        self.trajectory_table(every).printstd();
    }
}

impl SweepTable {
    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row![
            self.parameter.to_string(),
            "Ca_final",
            "Cb_final",
            "Cc_final",
            "Cm_final",
            "T_final",
            "X_final",
            "t_steady",
            "status"
        ]);
        for r in &self.rows {
            let s = &r.final_state;
            let t_steady = r
                .steady_state
                .time()
                .map_or("-".to_string(), |t| format!("{:.3}", t));
            table.add_row(row![
                format!("{}", r.value),
                fmt_value(s.Ca, 5),
                fmt_value(s.Cb, 5),
                fmt_value(s.Cc, 5),
                fmt_value(s.Cm, 5),
                fmt_value(s.T, 3),
                fmt_value(r.conversion, 4),
                t_steady,
                r.status()
            ]);
        }
        table
    }

    pub fn pretty_print_sweep(&self) {
        println!(
            "\n=== SWEEP OF {} ({}) ===",
            self.parameter,
            self.parameter.units()
        );
        self.table().printstd();
        if self.n_failed() > 0 {
            println!("{} of {} points failed", self.n_failed(), self.rows.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CSTR::cstr_model::ReactorState;
    use crate::CSTR::steady_state::SteadyState;
    use crate::CSTR::sweep::{SweepParameter, SweepRow};

    #[test]
    fn test_params_table_shape() {
        let table = OperatingParams::default().params_table();
        assert_eq!(table.len(), 11);
    }

    #[test]
    fn test_sweep_table_marks_failed_rows() {
        let params = OperatingParams::default();
        let sweep = SweepTable {
            parameter: SweepParameter::Fa0,
            rows: vec![
                SweepRow {
                    value: 80.0,
                    params: params.clone(),
                    final_state: ReactorState::startup(75.0),
                    conversion: 0.5,
                    steady_state: SteadyState::Reached { t: 2.0, index: 149 },
                    error: None,
                },
                SweepRow {
                    value: 0.0,
                    params,
                    final_state: ReactorState::nan(),
                    conversion: f64::NAN,
                    steady_state: SteadyState::NotReached,
                    error: Some("boom".to_string()),
                },
            ],
        };
        let table = sweep.table();
        assert_eq!(table.len(), 3);
        let rendered = table.to_string();
        assert!(rendered.contains("NaN"));
        assert!(rendered.contains("failed: boom"));
        assert!(rendered.contains("2.000"));
    }
}
