//! Arbor CLI
//!
//! Create, edit, inspect and run stored operation-tree programs.

use std::path::Path;

use arborc::commands::{edit_file, new_program, parse_run_options, run_file, show_file};
use arborc::{init_tracing, CommandResult};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "new" => {
            let path = require_path(&args, "Usage: arbor new <file>");
            or_exit(new_program(path));
            println!("created {}", path.display());
        }
        "edit" => {
            let path = require_path(&args, "Usage: arbor edit <file>");
            or_exit(edit_file(path));
        }
        "run" => {
            let path = require_path(
                &args,
                "Usage: arbor run <file> [--max-depth=<n>] [--unwind-returns]",
            );
            let options = or_exit(parse_run_options(&args[3..]));
            or_exit(run_file(path, &options));
        }
        "show" => {
            let path = require_path(&args, "Usage: arbor show <file>");
            print!("{}", or_exit(show_file(path)));
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("Arbor {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

/// The file argument, or usage on stderr and exit 1.
fn require_path<'a>(args: &'a [String], usage: &str) -> &'a Path {
    match args.get(2) {
        Some(path) if !path.starts_with('-') => Path::new(path),
        _ => {
            eprintln!("error: missing file path");
            eprintln!("{usage}");
            std::process::exit(1);
        }
    }
}

fn or_exit<T>(result: CommandResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Arbor - programs stored as operation trees");
    println!();
    println!("Usage: arbor <command> [options]");
    println!();
    println!("Commands:");
    println!("  new <file>           Create an empty program file");
    println!("  edit <file>          Edit a program interactively");
    println!("  run <file>           Run a program");
    println!("  show <file>          Print a program as text");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Run options:");
    println!("  --max-depth=<n>      Fail once calls nest deeper than n");
    println!("  --unwind-returns     Let a nested return stop the enclosing function");
    println!();
    println!("Environment:");
    println!("  RUST_LOG             Log filter, e.g. RUST_LOG=arbor_eval=debug");
    println!();
    println!("Examples:");
    println!("  arbor new hello.db");
    println!("  arbor edit hello.db");
    println!("  arbor run hello.db --max-depth=1000");
}
