use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use phpantom_reflect::{
    ClassIndex, Config, ConfigError, Conformance, MethodHandle, MethodReflector, PhpValue,
    ReflectionError,
};

/// Inspect the docblock return types of a PHP method and check values
/// against them.
#[derive(Parser, Debug)]
#[command(name = "phpantom-reflect", version, about)]
struct Cli {
    /// Config file to use instead of the default lookup.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// PHP file or directory to index.  Overrides `sources.paths` from the
    /// config file.  May be repeated.
    #[arg(long = "path", value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Print a JSON report instead of plain text.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the docblock documenting a method.
    Doc { class: String, method: String },
    /// Print the `@return` types of a method, one per line.
    Types { class: String, method: String },
    /// Check a JSON value against the return types of a method.
    ///
    /// `{"__class": "Name"}` denotes an instance of `Name`; other JSON
    /// objects are associative arrays.  Exits with 1 when the value does
    /// not conform.
    Check {
        class: String,
        method: String,
        value: String,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Reflection(#[from] ReflectionError),
    #[error("invalid JSON value: {0}")]
    Value(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct Report<'r> {
    #[serde(flatten)]
    handle: &'r MethodHandle,
    #[serde(skip_serializing_if = "Option::is_none")]
    doc_comment: Option<&'r str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    return_types: Option<&'r [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    check: Option<CheckReport>,
}

#[derive(Serialize)]
struct CheckReport {
    value_type: &'static str,
    conformance: Conformance,
    valid: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("phpantom-reflect: {err}");
            return ExitCode::from(2);
        }
    };

    init_logging(&config);

    match run(cli, config) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("phpantom-reflect: {err}");
            ExitCode::from(2)
        }
    }
}

/// Log to stderr.  `RUST_LOG` wins over the configured filter.
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli, config: Config) -> Result<ExitCode, CliError> {
    let paths = if cli.paths.is_empty() {
        config.sources.paths
    } else {
        cli.paths
    };
    let index = ClassIndex::load_paths(&paths);

    let (class, method) = match &cli.command {
        Command::Doc { class, method }
        | Command::Types { class, method }
        | Command::Check { class, method, .. } => (class, method),
    };
    let reflector = MethodReflector::new(&index, class, method)?;

    let mut report = Report {
        handle: reflector.handle(),
        doc_comment: None,
        return_types: None,
        check: None,
    };

    let mut code = ExitCode::SUCCESS;
    match &cli.command {
        Command::Doc { .. } => {
            report.doc_comment = reflector.doc_comment();
            if !cli.json
                && let Some(doc) = report.doc_comment
            {
                println!("{doc}");
            }
        }
        Command::Types { .. } => {
            report.return_types = Some(reflector.return_types());
            if !cli.json {
                for ty in reflector.return_types() {
                    println!("{ty}");
                }
            }
        }
        Command::Check { value, .. } => {
            let value: PhpValue = serde_json::from_str(value)?;
            let conformance = reflector.check(&value);
            let valid = conformance.is_valid();
            report.return_types = Some(reflector.return_types());
            report.check = Some(CheckReport {
                value_type: value.type_name(),
                conformance,
                valid,
            });
            if !cli.json {
                println!("{}", if valid { "valid" } else { "invalid" });
            }
            if !valid {
                code = ExitCode::from(1);
            }
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(code)
}
