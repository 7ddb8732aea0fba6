use super::cli_cstr::{profile_run_menu, single_run_menu, sweep_menu};
use std::io::{self, Write};

pub fn run_interactive_menu() {
    loop {
        if let Err(e) = show_main_menu(&mut io::stdout()) {
            eprintln!("Error: cannot write the menu: {}", e);
            break;
        }
        let choice = match get_user_input() {
            Ok(choice) => choice,
            Err(e) => {
                println!("Error: {}", e);
                break;
            }
        };

        match choice.trim() {
            "1" => single_run_menu(),
            "2" => profile_run_menu(),
            "3" => sweep_menu(),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
/* colors
Blue (\x1b[34m) - header
Yellow (\x1b[33m) - menu options
Cyan (\x1b[36m) - prompt
Reset (\x1b[0m) - back to normal after each colored section
*/
fn show_main_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "\x1b[34m\n CSTRsim: start-up of a stirred-tank reactor for propylene glycol \n\x1b[0m"
    )?;
    writeln!(out, "\x1b[33m1. Single run (fixed coolant flow)\x1b[0m")?;
    writeln!(out, "\x1b[33m2. Run with coolant flow profile\x1b[0m")?;
    writeln!(out, "\x1b[33m3. Parameter sweep\x1b[0m")?;
    writeln!(out, "\x1b[33m0. Exit\x1b[0m")?;
    write!(out, "\x1b[36mEnter your choice: \x1b[0m")?;
    out.flush()
}

/// One line from stdin. End of input is reported as an error so menus can stop.
pub fn get_user_input() -> Result<String, String> {
    let mut input = String::new();
    let n = io::stdin()
        .read_line(&mut input)
        .map_err(|e| format!("Failed to read input: {}", e))?;
    if n == 0 {
        return Err("end of input".to_string());
    }
    Ok(input)
}
