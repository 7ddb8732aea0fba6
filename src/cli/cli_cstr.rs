use super::cli_main::get_user_input;
use crate::CSTR::coolant_profile::{CoolantProfile, ProfileKind, ProfileParams};
use crate::CSTR::cstr_model::OperatingParams;
use crate::CSTR::cstr_simulation::{RunSettings, simulate, simulate_with_profile};
use crate::CSTR::sweep::{SweepParameter, SweepSpec, run_sweep};
use crate::ODEsolvers::solver_params::SolverType;
use crate::Utils::export::{export_sweep_csv, export_sweep_xlsx, export_trajectory_csv};
use std::io::{self, Write};
use std::str::FromStr;
use strum::IntoEnumIterator;

/// rows of the trajectory table printed after a run
const TRAJECTORY_PRINT_EVERY: usize = 30;

pub fn single_run_menu() {
    println!("\n=== Single start-up run ===");
    if let Err(e) = run_single() {
        println!("Error: {}", e);
    }
}

pub fn profile_run_menu() {
    println!("\n=== Start-up run with coolant flow profile ===");
    if let Err(e) = run_with_profile() {
        println!("Error: {}", e);
    }
}

pub fn sweep_menu() {
    println!("\n=== Parameter sweep ===");
    if let Err(e) = run_parameter_sweep() {
        println!("Error: {}", e);
    }
}

fn run_single() -> Result<(), String> {
    let params = input_operating_params(true)?;
    let settings = input_run_settings()?;
    params.pretty_print_params();
    println!("Solving...");
    let result = simulate(&params, &settings).map_err(|e| e.to_string())?;
    result.pretty_print_result();
    result.pretty_print_trajectory(TRAJECTORY_PRINT_EVERY);
    if let Some(path) = prompt_path("trajectory CSV file")? {
        export_trajectory_csv(&result, &path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn run_with_profile() -> Result<(), String> {
    let params = input_operating_params(false)?;
    let profile = input_profile()?;
    let settings = input_run_settings()?;
    params.pretty_print_params();
    println!("Solving...");
    let result = simulate_with_profile(&params, &profile, &settings).map_err(|e| e.to_string())?;
    result.pretty_print_result();
    result.pretty_print_trajectory(TRAJECTORY_PRINT_EVERY);
    if let Some(path) = prompt_path("trajectory CSV file")? {
        export_trajectory_csv(&result, &path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn run_parameter_sweep() -> Result<(), String> {
    let base = input_operating_params(true)?;
    let names: Vec<String> = SweepParameter::iter().map(|p| p.to_string()).collect();
    let name = prompt_text(&format!("Parameter to sweep ({})", names.join(", ")), "Fa0")?;
    let parameter = SweepParameter::from_str(&name)
        .map_err(|_| format!("unknown parameter '{}'", name))?;
    let current = parameter.get(&base);
    let start = prompt_f64("Start value", current * 0.5)?;
    let end = prompt_f64("End value", current * 1.5)?;
    let n_points = prompt_count("Number of points", 5)?;
    let spec = SweepSpec::from_name(&name, start, end, n_points).map_err(|e| e.to_string())?;
    let settings = input_run_settings()?;

    println!("Running {} simulations...", spec.n_points);
    let table = run_sweep(&base, &spec, &settings).map_err(|e| e.to_string())?;
    table.pretty_print_sweep();
    if let Some(path) = prompt_path("sweep CSV file")? {
        export_sweep_csv(&table, &path).map_err(|e| e.to_string())?;
    }
    if let Some(path) = prompt_path("sweep Excel workbook")? {
        export_sweep_xlsx(&table, &path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn input_operating_params(with_mc: bool) -> Result<OperatingParams, String> {
    let d = OperatingParams::default();
    println!("Operating parameters (empty input keeps the default):");
    let mut params = OperatingParams {
        Fa0: prompt_f64("Fa0, lbmol/h", d.Fa0)?,
        Fb0: prompt_f64("Fb0, lbmol/h", d.Fb0)?,
        Fm0: prompt_f64("Fm0, lbmol/h", d.Fm0)?,
        T0: prompt_f64("T0, °F", d.T0)?,
        Ta1: prompt_f64("Ta1, °F", d.Ta1)?,
        UA: prompt_f64("UA, Btu/(h·°F)", d.UA)?,
        ..d
    };
    if with_mc {
        params.mc = prompt_f64("mc, lbmol/h", params.mc)?;
    }
    Ok(params)
}

fn input_profile() -> Result<CoolantProfile, String> {
    println!("Coolant profiles:");
    for kind in ProfileKind::iter() {
        println!("  {:<12} {}", kind.to_string(), kind.description());
    }
    let name = prompt_text("Profile", "Step")?;
    let kind = ProfileKind::from_str(&name).map_err(|_| format!("unknown profile '{}'", name))?;
    let d = ProfileParams::default();
    let mut params = ProfileParams {
        mc0: prompt_f64("mc0, lbmol/h", d.mc0)?,
        mc1: prompt_f64("mc1, lbmol/h", d.mc1)?,
        t_step: prompt_f64("t_step, h", d.t_step)?,
        ..d
    };
    match kind {
        ProfileKind::Step | ProfileKind::Ramp => {
            params.t_end = prompt_f64("t_end, h", params.t_end)?;
        }
        ProfileKind::Exponential => {
            params.tau_exp = prompt_f64("tau_exp, h", params.tau_exp)?;
        }
    }
    CoolantProfile::from_kind_and_params(kind, &params).map_err(|e| e.to_string())
}

fn input_run_settings() -> Result<RunSettings, String> {
    let mut settings = RunSettings::default();
    println!("\nChoose solver type:");
    println!("1. Radau5 (recommended for stiff problems)");
    println!("2. Gauss-Legendre 4 (implicit)");
    println!("3. Gauss-Legendre 6 (implicit)");
    println!("4. Lobatto IIIC 4 (implicit)");
    println!("5. Dopri5 (non-stiff problems)");
    settings.solver = match prompt_text("Enter choice (1-5)", "1")?.as_str() {
        "1" => SolverType::Radau5,
        "2" => SolverType::GaussLegendre4,
        "3" => SolverType::GaussLegendre6,
        "4" => SolverType::LobattoIIIC4,
        "5" => SolverType::Dopri5,
        _ => return Err("Invalid solver choice".to_string()),
    };
    settings.grid.t_final = prompt_f64("Simulated time, h", settings.grid.t_final)?;
    settings.grid.n_points = prompt_count("Number of output points", settings.grid.n_points)?;
    Ok(settings)
}

fn prompt(label: &str, default: &str) -> Result<String, String> {
    print!("{} [{}]: ", label, default);
    io::stdout().flush().map_err(|e| e.to_string())?;
    get_user_input()
}

fn prompt_text(label: &str, default: &str) -> Result<String, String> {
    let input = prompt(label, default)?;
    let input = input.trim();
    Ok(if input.is_empty() { default } else { input }.to_string())
}

fn prompt_f64(label: &str, default: f64) -> Result<f64, String> {
    parse_or_default(&prompt(label, &default.to_string())?, default)
}

fn prompt_count(label: &str, default: usize) -> Result<usize, String> {
    parse_or_default(&prompt(label, &default.to_string())?, default)
}

/// Empty path skips the export.
fn prompt_path(what: &str) -> Result<Option<String>, String> {
    let input = prompt(&format!("Save {} to (empty to skip)", what), "")?;
    let input = input.trim();
    Ok((!input.is_empty()).then(|| input.to_string()))
}

/// `default` for blank input, otherwise the parsed value.
pub fn parse_or_default<T: FromStr>(input: &str, default: T) -> Result<T, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(default);
    }
    input
        .parse::<T>()
        .map_err(|_| format!("Invalid number: '{}'", input))
}
