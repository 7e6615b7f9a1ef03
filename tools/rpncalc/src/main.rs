//! rpncalc - RPN calculator front end
//!
//! Owns a calculator session, feeds it verbs parsed from text and renders
//! the resulting engine state.

mod config;
mod logging;
mod render;
mod repl;
mod session;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::path::PathBuf;
use tracing::debug;

use crate::config::CalcConfig;
use crate::render::{render_state, render_verbs};
use crate::session::{Command, Outcome, Session};

#[derive(Parser)]
#[command(name = "rpncalc")]
#[command(about = "RPN calculator")]
#[command(long_about = "RPN calculator

Numbers are typed and pushed onto the stack; verbs act on the stack.

Commands:
  repl        Interactive calculator (default)
  eval        Evaluate tokens once and print the final state
  verbs       List verbs with their action sequences

Examples:
  rpncalc eval 3 2 -                 # 1
  rpncalc eval 8 4 / --format json   # {\"stack\":[2.0]}
  rpncalc eval \"'1E5\" chs push       # 0.00001

Use 'rpncalc <command> --help' for more information on a specific command.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Configuration file (toml, yaml or json)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive calculator
    Repl,

    /// Evaluate tokens and print the final state
    Eval {
        /// Tokens: numbers, verbs (+ - * / sin chs drop ...), 'text entries
        #[arg(required = true, allow_hyphen_values = true)]
        tokens: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List verbs with their action sequences
    Verbs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CalcConfig::load(cli.config.as_deref())?;

    // Configure colored output
    let color = config.color && !cli.no_color;
    if !color {
        colored::control::set_override(false);
    }

    logging::init_logging(cli.verbose, &config.log_level, color)?;
    debug!(?config, "starting rpncalc");

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => repl::run_repl(&config)?,
        Commands::Eval { tokens, format } => {
            let failed = eval_command(&tokens, format, &config)?;
            if failed {
                std::process::exit(1);
            }
        },
        Commands::Verbs => println!("{}", render_verbs()),
    }

    Ok(())
}

/// Evaluate tokens once; returns true when the final state carries an error
fn eval_command(tokens: &[String], format: OutputFormat, config: &CalcConfig) -> Result<bool> {
    let mut session = Session::new();

    for token in tokens {
        let outcomes = session.execute_line(token)?;
        for outcome in &outcomes {
            match outcome {
                Outcome::Show(Command::State) => println!("{}", session.state().to_json()?),
                Outcome::Show(Command::Verbs) => println!("{}", render_verbs()),
                _ => {},
            }
        }
        if outcomes.iter().any(|o| matches!(o, Outcome::Quit)) {
            break;
        }
    }

    let state = session.state();
    match format {
        OutputFormat::Text => println!(
            "{}",
            render_state(state, config.stack_rows, config.precision)
        ),
        OutputFormat::Json => println!("{}", state.to_json()?),
    }

    if let Some(kind) = state.error {
        eprintln!("{} {}", "Error:".red(), kind);
        return Ok(true);
    }
    Ok(false)
}
