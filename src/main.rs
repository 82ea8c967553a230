use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use imp_interpreter as imp;

use imp::ast_printer::AstPrinter;
use imp::environment::Environment;
use imp::error::ImpError;
use imp::interpreter::Interpreter;
use imp::parser::parse_source;
use imp::scanner::Scanner;
use imp::stmt::Program;

/// Exit status for malformed source or program files.
const EXIT_SYNTAX: i32 = 65;

/// Exit status for failures while the program runs.
const EXIT_RUNTIME: i32 = 70;

#[derive(ClapParser, Debug)]
#[command(version, about = "Imp language interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to imp.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize { filename: Option<PathBuf> },

    /// Parses a program and prints its AST
    Parse {
        filename: Option<PathBuf>,

        /// Print the AST as JSON instead of prefix form
        #[arg(long)]
        json: bool,
    },

    /// Runs a program and prints the value it returns, if any.
    /// Files ending in `.json` are read as a serialized AST.
    Run {
        filename: Option<PathBuf>,

        /// Abort after this many execution steps
        #[arg(long, value_name = "N")]
        max_steps: Option<u64>,

        /// Print the final variable bindings to stderr
        #[arg(long)]
        env: bool,
    },
}

/// Reads the contents of a file into a Vec<u8>
fn read_file(filename: &Path) -> Result<Vec<u8>> {
    info!("Reading file: {:?}", filename);
    let file = File::open(filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    let bytes = reader
        .read_to_end(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    Ok(buf)
}

/// Loads a program either from JSON or from surface syntax.
fn load_program(filename: &Path, buf: &[u8]) -> imp::Result<Program> {
    let is_json = filename
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        info!("Decoding program from JSON");
        Ok(serde_json::from_slice(buf)?)
    } else {
        parse_source(buf)
    }
}

/// Prints a front-end error and exits with the syntax status.
fn exit_syntax(e: ImpError) -> ! {
    debug!("Syntax debug: {}", e);
    eprintln!("{}", e);
    std::process::exit(EXIT_SYNTAX);
}

fn missing_filename(subcommand: &str) -> Result<()> {
    info!("No filepath provided for {}", subcommand);
    println!("No input filepath was provided. Exiting...");
    Ok(())
}

fn init_logger() -> Result<()> {
    let log_file = File::create("imp.log").context("Failed to create imp.log")?;

    Builder::new()
        .format(|buf, record| {
            // Strip 'imp_interpreter::' from module path
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("imp_interpreter::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // Default to Debug, override with RUST_LOG
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized, writing to imp.log");
    Ok(())
}

fn tokenize(filename: &Path) -> Result<()> {
    let buf = read_file(filename)?;
    let mut tokenized = true;

    for token in Scanner::new(&buf) {
        match token {
            Ok(token) => println!("{}", token),

            Err(e) => {
                tokenized = false;
                debug!("Tokenization debug: {}", e);
                eprintln!("{}", e);
            }
        }
    }

    if !tokenized {
        debug!("Tokenization failed, exiting with code {}", EXIT_SYNTAX);
        std::process::exit(EXIT_SYNTAX);
    }

    info!("Tokenization completed successfully");
    Ok(())
}

fn parse(filename: &Path, json: bool) -> Result<()> {
    let buf = read_file(filename)?;
    let program = load_program(filename, &buf).unwrap_or_else(|e| exit_syntax(e));

    if json {
        let text = serde_json::to_string_pretty(&program).context("Failed to encode AST")?;
        println!("{}", text);
    } else {
        println!("{}", AstPrinter::program(&program));
    }

    info!("Parse subcommand completed");
    Ok(())
}

fn run(filename: &Path, max_steps: Option<u64>, show_env: bool) -> Result<()> {
    let buf = read_file(filename)?;
    let program = load_program(filename, &buf).unwrap_or_else(|e| exit_syntax(e));

    info!("Loaded {} top-level statements", program.len());

    let mut interpreter = match max_steps {
        Some(limit) => Interpreter::with_step_limit(limit),
        None => Interpreter::new(),
    };

    match interpreter.execute_statements(&program, Environment::new()) {
        Ok(flow) => {
            if show_env {
                eprint!("{}", flow.env());
            }

            if let (_, Some(value)) = flow.into_parts() {
                println!("{}", value);
            }

            info!("Program executed in {} steps", interpreter.steps());
        }

        Err(e) => {
            let e = ImpError::from(e);
            debug!("Runtime debug: {}", e);
            eprintln!("{}", e);
            std::process::exit(EXIT_RUNTIME);
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    // Initialize logger only if --log flag is provided
    if args.log {
        init_logger()?;
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    match args.commands {
        Commands::Tokenize { filename } => match filename {
            Some(filename) => tokenize(&filename),
            None => missing_filename("Tokenize"),
        },

        Commands::Parse { filename, json } => match filename {
            Some(filename) => parse(&filename, json),
            None => missing_filename("Parse"),
        },

        Commands::Run {
            filename,
            max_steps,
            env,
        } => match filename {
            Some(filename) => run(&filename, max_steps, env),
            None => missing_filename("Run"),
        },
    }
}
