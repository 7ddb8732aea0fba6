//! # Export of Results
//!
//! Row-oriented CSV files of trajectories and sweep tables, and JSON files of sweep
//! tables.
//!
//! Trajectory CSV:
//! ```csv
//! t,Ca,Cb,Cc,Cm,T,mc
//! 0,0,3.45,0,0,75,1000
//! 0.013377926421404682,0.0150...,3.43...,0.0000...,0.0029...,74.9...,1000
//! ```
//! Sweep CSV, one row per swept value, failed points with `NaN` values:
//! ```csv
//! Fa0,Ca_final,Cb_final,Cc_final,Cm_final,T_final,X_final,t_steady,status
//! 50,...,ok
//! ```
//! Numbers are written with full precision, `NaN` as `NaN`. `t_steady` is `NaN` when
//! steady state was not reached.
//!
//! The sweep table also goes to an Excel workbook with the same columns on the sheet
//! `Barrido`; there non-finite values are left as empty cells.
use crate::CSTR::cstr_error::CstrError;
use crate::CSTR::cstr_simulation::SimulationResult;
use crate::CSTR::sweep::SweepTable;
use log::info;
use rust_xlsxwriter::{Format, Workbook};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const TRAJECTORY_HEADER: [&str; 7] = ["t", "Ca", "Cb", "Cc", "Cm", "T", "mc"];
pub const SWEEP_COLUMNS: [&str; 8] = [
    "Ca_final", "Cb_final", "Cc_final", "Cm_final", "T_final", "X_final", "t_steady", "status",
];
pub const SWEEP_SHEET: &str = "Barrido";

/// Quotes a text field when it would break the row.
fn csv_field(text: &str) -> String {
    if text.contains([',', '"', '\n']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

fn join_numbers(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn write_trajectory_csv<W: Write>(
    result: &SimulationResult,
    writer: &mut W,
) -> Result<(), CstrError> {
    writeln!(writer, "{}", TRAJECTORY_HEADER.join(","))?;
    let traj = &result.trajectory;
    for i in 0..traj.len() {
        let s = traj.state(i);
        writeln!(
            writer,
            "{}",
            join_numbers(&[traj.t[i], s.Ca, s.Cb, s.Cc, s.Cm, s.T, result.mc[i]])
        )?;
    }
    Ok(())
}

pub fn write_sweep_csv<W: Write>(table: &SweepTable, writer: &mut W) -> Result<(), CstrError> {
    writeln!(writer, "{},{}", table.parameter, SWEEP_COLUMNS.join(","))?;
    for row in &table.rows {
        let s = &row.final_state;
        let t_steady = row.steady_state.time().unwrap_or(f64::NAN);
        writeln!(
            writer,
            "{},{}",
            join_numbers(&[
                row.value,
                s.Ca,
                s.Cb,
                s.Cc,
                s.Cm,
                s.T,
                row.conversion,
                t_steady
            ]),
            csv_field(&row.status())
        )?;
    }
    Ok(())
}

pub fn export_trajectory_csv<P: AsRef<Path>>(
    result: &SimulationResult,
    path: P,
) -> Result<(), CstrError> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    write_trajectory_csv(result, &mut writer)?;
    writer.flush()?;
    info!("trajectory written to {}", path.as_ref().display());
    Ok(())
}

pub fn export_sweep_csv<P: AsRef<Path>>(table: &SweepTable, path: P) -> Result<(), CstrError> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    write_sweep_csv(table, &mut writer)?;
    writer.flush()?;
    info!("sweep table written to {}", path.as_ref().display());
    Ok(())
}

/// Pretty JSON of the whole table. NaN values of failed points become `null`.
pub fn export_sweep_json<P: AsRef<Path>>(table: &SweepTable, path: P) -> Result<(), CstrError> {
    let writer = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer_pretty(writer, table)?;
    info!("sweep table written to {}", path.as_ref().display());
    Ok(())
}

/// Workbook with the sweep table on the sheet [`SWEEP_SHEET`], header in bold.
pub fn sweep_workbook(table: &SweepTable) -> Result<Workbook, CstrError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SWEEP_SHEET)?;
    sheet.write_string_with_format(0, 0, table.parameter.to_string(), &bold)?;
    for (j, name) in SWEEP_COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, j as u16 + 1, *name, &bold)?;
    }
    for (i, row) in table.rows.iter().enumerate() {
        let r = i as u32 + 1;
        let s = &row.final_state;
        let t_steady = row.steady_state.time().unwrap_or(f64::NAN);
        let numbers = [
            row.value,
            s.Ca,
            s.Cb,
            s.Cc,
            s.Cm,
            s.T,
            row.conversion,
            t_steady,
        ];
        for (j, v) in numbers.iter().enumerate() {
            if v.is_finite() {
                sheet.write_number(r, j as u16, *v)?;
            }
        }
        sheet.write_string(r, numbers.len() as u16, row.status())?;
    }
    Ok(workbook)
}

pub fn export_sweep_xlsx<P: AsRef<Path>>(table: &SweepTable, path: P) -> Result<(), CstrError> {
    let mut workbook = sweep_workbook(table)?;
    workbook.save(path.as_ref())?;
    info!("sweep table written to {}", path.as_ref().display());
    Ok(())
}
