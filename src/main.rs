use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser as ClapParser;
use tq_lang::cli::{self, CheckOptions, CheckResult, CliError};
use tq_lang::{EncodeOptions, Format};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(ClapParser)]
#[command(name = "tq")]
#[command(about = "tq - query TOML configuration files")]
#[command(
    long_about = "Query TOML configuration files with a sequence of filters.\n\n\
    Filters are applied left to right:\n  \
    .          identity\n  \
    ['key']    table lookup (also [\"key\"] and [key])\n  \
    [3]        array element\n  \
    [1:3]      sub-array, either bound optional\n  \
    []         every value of a table or array\n\n\
    Example:\n  \
    tq -q \"['servers'][]['ip']\" config.toml"
)]
#[command(version)]
struct Cli {
    /// The query to run against the input data
    #[arg(short, long, default_value = ".")]
    query: String,

    /// Input files (reads from stdin if none are given)
    files: Vec<PathBuf>,

    /// Document format of the input and output
    #[arg(short, long, value_enum, default_value_t = Format::Toml)]
    format: Format,

    /// Render tables inline
    #[arg(short, long)]
    inline_tables: bool,

    /// Put each array element on its own line
    #[arg(short, long)]
    multiline_arrays: bool,

    /// Indent nested tables
    #[arg(short = 't', long)]
    indent_tables: bool,

    /// Indentation used for each level
    #[arg(short = 's', long, default_value = "  ")]
    indent_symbol: String,

    /// Only validate the query syntax, don't execute
    #[arg(long)]
    check: bool,
}

fn main() {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let inputs = if cli.check {
        Vec::new()
    } else {
        read_inputs(&cli.files)?
    };

    let options = CheckOptions {
        query: cli.query,
        inputs,
        format: cli.format,
        encode: EncodeOptions {
            inline_tables: cli.inline_tables,
            multiline_arrays: cli.multiline_arrays,
            indent_symbol: cli.indent_symbol,
            indent_tables: cli.indent_tables,
        },
        syntax_only: cli.check,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Success(results) => {
            for result in results {
                println!("{}", result);
            }
        }
    }
    Ok(())
}

fn read_inputs(files: &[PathBuf]) -> Result<Vec<Vec<u8>>, CliError> {
    if !files.is_empty() {
        return files
            .iter()
            .map(|path| fs::read(path).map_err(CliError::Io))
            .collect();
    }

    if atty::is(atty::Stream::Stdin) {
        return Err(CliError::NoInput);
    }

    let mut buffer = Vec::new();
    io::stdin().read_to_end(&mut buffer)?;
    Ok(vec![buffer])
}
