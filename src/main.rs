// src/main.rs

use std::env;
use std::error::Error;
use std::path::Path;

use tabstat::analyses::compare_groups::compare_groups;
use tabstat::analyses::compare_variables::compare_variables;
use tabstat::analyses::explore_variable::explore_variable;
use tabstat::analyses::explore_variable_pair::explore_variable_pair;
use tabstat::data_input::table_data::Table;
use tabstat::data_input::table_parser::parse_table_file;
use tabstat::report::Fragment;
use tabstat::types::AnalysisResult;

fn print_usage(program: &str) {
    eprintln!(
        "Usage: {} <input_file.csv> <level_spec> <analysis> [args...]",
        program
    );
    eprintln!("  <level_spec>: one measurement level per column, e.g. \"int int nom ord\"");
    eprintln!("                (levels: int, ord, nom, unk)");
    eprintln!("Analyses:");
    eprintln!("  explore <var> [central_value]     explore one variable");
    eprintln!("  pair <x> <y>                      explore a variable pair");
    eprintln!("  compare <v1> <v2> [...]           compare repeated measures variables");
    eprintln!("  groups <dep> <g1> [g2]            compare groups");
}

fn run_analysis(table: &Table, command: &str, args: &[String], chart_root: &str) -> AnalysisResult {
    match command {
        "explore" => {
            if args.is_empty() {
                return Err("'explore' needs a variable name".into());
            }
            let central_value = match args.get(1) {
                Some(raw) => raw
                    .parse::<f64>()
                    .map_err(|_| format!("Invalid central value '{}'", raw))?,
                None => 0.0,
            };
            explore_variable(table, &args[0], false, central_value, Some(chart_root))
        }
        "pair" => {
            if args.len() != 2 {
                return Err("'pair' needs exactly 2 variable names".into());
            }
            explore_variable_pair(table, &args[0], &args[1], Some(chart_root))
        }
        "compare" => {
            if args.len() < 2 {
                return Err("'compare' needs at least 2 variable names".into());
            }
            let names: Vec<&str> = args.iter().map(String::as_str).collect();
            compare_variables(table, &names, Some(chart_root))
        }
        "groups" => {
            if args.len() < 2 || args.len() > 3 {
                return Err("'groups' needs a dependent and 1 or 2 grouping variables".into());
            }
            let group_names: Vec<&str> = args[1..].iter().map(String::as_str).collect();
            compare_groups(table, &args[0], &group_names, Some(chart_root))
        }
        other => Err(format!("Unknown analysis '{}'", other).into()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // --- Argument Parsing ---
    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        print_usage(&args[0]);
        std::process::exit(1);
    }
    let input_file = &args[1];
    let level_spec = &args[2];
    let command = &args[3];
    let input_path = Path::new(input_file);
    let root_name = input_path.file_stem().unwrap_or_default().to_string_lossy();

    // --- Data Reading ---
    println!("\nReading data rows...");
    let table = parse_table_file(input_path, Some(level_spec))?;
    if table.row_count == 0 {
        println!("No valid data rows read, cannot run the analysis.");
        return Ok(());
    }

    // --- Analysis ---
    println!("\n--- Running {} analysis ---", command);
    let chart_root = format!("{}_{}", root_name, command);
    let fragments = run_analysis(&table, command, &args[4..], &chart_root)?;

    for fragment in &fragments {
        match fragment {
            Fragment::Text(html) | Fragment::Table(html) => println!("{}", html),
            Fragment::Chart(path) => println!("  Chart saved as '{}'.", path.display()),
        }
    }
    Ok(())
}

// src/main.rs
