use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use tracing_subscriber::EnvFilter;
use yapl::{SyntaxErrors, YaplError, interpreter::lexer::tokenize, parse_source, run_file};

/// yapl runs scripts written in a small, type-annotated scripting language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path of the script to run.
    file: PathBuf,

    /// Print the token stream instead of running the script.
    #[arg(long, conflicts_with = "ast")]
    tokens: bool,

    /// Print the parsed declarations instead of running the script.
    #[arg(long)]
    ast: bool,

    /// Log interpreter internals to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(io::stderr)
                             .with_target(false)
                             .init();
}

fn dump_tokens(path: &Path) -> Result<(), YaplError> {
    let source = fs::read_to_string(path)?;
    let tokens = tokenize(&source).map_err(|err| {
                                      YaplError::Syntax(SyntaxErrors { file:   path.display()
                                                                                   .to_string(),
                                                                       errors: vec![err], })
                                  })?;
    let mut stdout = io::stdout().lock();
    for (token, line) in tokens {
        writeln!(stdout, "{line:>4} {token:?}")?;
    }
    Ok(())
}

fn dump_ast(path: &Path) -> Result<(), YaplError> {
    let source = fs::read_to_string(path)?;
    let unit = parse_source(&source, &path.display().to_string())?;
    let mut stdout = io::stdout().lock();
    for declaration in &unit.declarations {
        writeln!(stdout, "{declaration}")?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let result = if args.tokens {
        dump_tokens(&args.file)
    } else if args.ast {
        dump_ast(&args.file)
    } else {
        run_file(&args.file, io::stdout().lock())
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(YaplError::Io(e)) => {
            eprintln!("{}: {e}", args.file.display());
            ExitCode::FAILURE
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}
