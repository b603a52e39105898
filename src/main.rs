// Rhodus: scanner, grammar checker and interactive shell

use std::io;
use std::process;

use rhodus::config::ShellConfig;
use rhodus::diagnostic;
use rhodus::logging;
use rhodus::parser::{check_source, load_source, ParseError, Scanner};
use rhodus::shell::Shell;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("rhodus");

    match args.get(1).map(|s| s.as_str()) {
        None => {
            let stdin = io::stdin();
            let mut shell = Shell::new(ShellConfig::from_env(), stdin.lock(), io::stdout());
            shell.run()?;
        }
        Some("-h") | Some("--help") => usage(program_name),
        Some("--tokens") => match args.get(2) {
            Some(file) => dump_tokens(file),
            None => {
                eprintln!("Error: --tokens needs a file");
                usage(program_name);
                process::exit(1);
            }
        },
        Some(file) => check(file),
    }

    Ok(())
}

fn usage(program_name: &str) {
    eprintln!("Usage:");
    eprintln!("  {}                  # start the interactive shell", program_name);
    eprintln!("  {} <file.rh>        # check a script", program_name);
    eprintln!("  {} --tokens <file>  # print the token stream", program_name);
}

fn read_source(file: &str) -> String {
    match load_source(file) {
        Ok(source) => source,
        Err(e) if e.is_not_found() => {
            eprintln!("Error: File '{}' not found", file);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn check(file: &str) {
    let source = read_source(file);
    match check_source(&source) {
        Ok(()) => println!("Success!"),
        Err(e) => {
            eprintln!("{}", diagnostic::render(file, &source, &e));
            process::exit(1);
        }
    }
}

fn dump_tokens(file: &str) {
    let source = read_source(file);
    match Scanner::tokenize(&source) {
        Ok(tokens) => {
            for token in tokens {
                println!("{}", token);
            }
        }
        Err(e) => {
            eprintln!("{}", diagnostic::render(file, &source, &ParseError::from(e)));
            process::exit(1);
        }
    }
}
