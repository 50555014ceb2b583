use clap::Parser as _;
use log::{debug, info};
use monke::{cli::Args, evaluator, repl, Environment, Lexer, Parser};
use std::path::Path;
use std::{fs, io, process};

fn run_file(file: &Path) -> io::Result<bool> {
    let source = fs::read_to_string(file)?;
    debug!("read {} bytes from {:?}", source.len(), file);

    let (program, errors) = Parser::new(Lexer::new(source)).parse_program();
    if !errors.is_empty() {
        for err in errors.iter() {
            eprintln!("\t{}", err);
        }
        return Ok(false);
    }

    if let Some(value) = evaluator::eval(&program, &Environment::new()) {
        println!("{}", value);
    }
    Ok(true)
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.file {
        Some(file) => {
            info!("FILE MODE");
            if !run_file(&file)? {
                process::exit(1);
            }
            Ok(())
        }
        None => {
            info!("REPL MODE");
            println!("Hello! This is the Monke programming language!");
            println!("Feel free to type in commands");
            let stdin = io::stdin();
            repl::start(stdin.lock(), io::stdout())
        }
    }
}
