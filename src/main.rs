//! restlint - check REST API specifications against REST conventions.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use restlint::rpc::Dispatcher;
use restlint::{Validator, ValidatorConfig, analyze_path, synthesize_spec};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Validate OpenAPI documents and URL paths against REST API conventions
#[derive(Parser, Debug)]
#[command(
    name = "restlint",
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory of declarative JSON rule files
    #[arg(long, global = true, env = "RESTLINT_RULES_DIR", value_name = "DIR")]
    rules_dir: Option<PathBuf>,

    /// Register built-in rules only, ignoring any rules directory
    #[arg(long, global = true)]
    no_rules_dir: bool,

    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, global = true, default_value = "compact")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate an API specification file or inline YAML/JSON text
    Validate {
        /// Path to the specification, or the specification text itself
        #[arg(value_name = "SPEC")]
        spec: String,

        /// Run only this rule (repeatable); all rules run by default
        #[arg(short, long = "rule", value_name = "NAME")]
        rules: Vec<String>,
    },

    /// Validate a single URL path such as /api/v0/widgets/{widgetId}
    CheckPath {
        #[arg(value_name = "URL_PATH")]
        url_path: String,

        /// Print the synthesized OpenAPI document instead of validating it
        #[arg(long)]
        emit_spec: bool,
    },

    /// List registered rules
    Rules {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve newline-delimited JSON-RPC requests on stdin/stdout
    Serve,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Compact,
    Json,
}

impl Cli {
    fn validator_config(&self) -> ValidatorConfig {
        if self.no_rules_dir {
            ValidatorConfig::builtin_only()
        } else if let Some(dir) = &self.rules_dir {
            ValidatorConfig::with_rules_dir(dir)
        } else {
            ValidatorConfig::default()
        }
    }

    fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let result = match cli.log_format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().with_ansi(false).try_init(),
    };
    result.map_err(|e| anyhow::anyhow!("{}", e))
}

fn run(cli: Cli) -> Result<ExitCode> {
    let validator = Validator::new(&cli.validator_config());
    tracing::info!(rules = validator.rule_names().len(), "validator ready");

    match cli.command {
        Commands::Validate { spec, rules } => {
            let report = validator
                .validate(&spec, &rules)
                .context("validation request failed")?;
            print_json(&report)?;
            Ok(exit_code(report.has_failures()))
        }
        Commands::CheckPath {
            url_path,
            emit_spec,
        } => {
            if emit_spec {
                let spec = synthesize_spec(&analyze_path(&url_path));
                print!("{}", restlint::serialize::to_yaml(&spec)?);
                return Ok(ExitCode::SUCCESS);
            }
            let report = validator.validate_url_path(&url_path);
            print_json(&report)?;
            Ok(exit_code(report.has_failures()))
        }
        Commands::Rules { json } => {
            if json {
                let rules: Vec<RuleListing<'_>> = validator
                    .rules()
                    .map(|r| RuleListing {
                        name: r.name(),
                        description: r.description(),
                    })
                    .collect();
                print_json(&rules)?;
            } else {
                for rule in validator.rules() {
                    println!("{}\t{}", rule.name(), rule.description());
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Serve => {
            serve(Dispatcher::new(validator))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[derive(Serialize)]
struct RuleListing<'a> {
    name: &'a str,
    description: &'a str,
}

/// One request per line in, one response per line out, until EOF.
fn serve(dispatcher: Dispatcher) -> Result<()> {
    tracing::info!("serving JSON-RPC on stdio");
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.context("reading request")?;
        if line.trim().is_empty() {
            continue;
        }
        let response = dispatcher.handle_json(&line);
        serde_json::to_writer(&mut stdout, &response).context("writing response")?;
        stdout.write_all(b"\n")?;
        stdout.flush()?;
    }
    tracing::info!("stdin closed; shutting down");
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    println!("{}", text);
    Ok(())
}

fn exit_code(has_failures: bool) -> ExitCode {
    if has_failures {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
