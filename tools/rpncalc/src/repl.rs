//! Interactive REPL
//!
//! Line editor with Tab completion of command words. Each line goes through
//! the session token interpreter; the stack is rendered after every line.

use anyhow::{Context, Result};
use colored::*;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};
use tracing::{debug, warn};

use crate::config::CalcConfig;
use crate::render::{render_state, render_verbs};
use crate::session::{Command, Outcome, Session};
use rpn_engine::NAMED_VERBS;

const SESSION_WORDS: [&str; 5] = ["state", "help", "verbs", "quit", "exit"];

// ============================================================================
// Tab Completion Helper
// ============================================================================

/// REPL helper providing Tab completion for verb and command names
struct CalcHelper;

impl Helper for CalcHelper {}

impl Hinter for CalcHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for CalcHelper {}

impl Validator for CalcHelper {}

impl Completer for CalcHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        // complete the word under the cursor
        let start = line.rfind(char::is_whitespace).map_or(0, |i| i + 1);
        Ok((start, complete_word(&line[start..])))
    }
}

/// Complete verb and session command names
fn complete_word(prefix: &str) -> Vec<Pair> {
    if prefix.is_empty() {
        return Vec::new();
    }
    let prefix = prefix.to_lowercase();

    let mut words: Vec<&str> = NAMED_VERBS
        .iter()
        .flat_map(|verb| verb.aliases().iter().copied())
        .filter(|word| word.chars().all(|c| c.is_ascii_alphabetic()))
        .chain(SESSION_WORDS)
        .filter(|word| word.starts_with(&prefix))
        .collect();
    words.sort_unstable();
    words.dedup();

    words
        .into_iter()
        .map(|word| Pair {
            display: word.to_string(),
            replacement: word.to_string(),
        })
        .collect()
}

// ============================================================================
// REPL loop
// ============================================================================

pub fn run_repl(config: &CalcConfig) -> Result<()> {
    let rl_config = rustyline::Config::builder()
        .completion_type(rustyline::CompletionType::List)
        .build();
    let mut rl: Editor<CalcHelper, DefaultHistory> =
        Editor::with_config(rl_config).context("Failed to initialize readline")?;
    rl.set_helper(Some(CalcHelper));

    if let Some(path) = &config.history_file {
        if let Err(e) = rl.load_history(path) {
            debug!("No history loaded from {}: {}", path.display(), e);
        }
    }

    println!("{}", "RPN Calculator".bright_cyan().bold());
    println!(
        "Type '{}' for commands, {} for completion\n",
        "help".bright_yellow(),
        "Tab".bright_cyan()
    );

    let mut session = Session::new();

    loop {
        match rl.readline(&config.prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                // Add to history (ignore errors)
                let _ = rl.add_history_entry(line);

                let quit = match session.execute_line(line) {
                    Ok(outcomes) => show_outcomes(&session, &outcomes, config),
                    Err(e) => {
                        eprintln!("{} {}", "Error:".red(), e);
                        false
                    },
                };
                println!("{}", render_state(session.state(), config.stack_rows, config.precision));
                if quit {
                    break;
                }
            },
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C - ignore and continue
                println!("^C");
                continue;
            },
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                break;
            },
            Err(e) => {
                eprintln!("{} {}", "Readline error:".red(), e);
                break;
            },
        }
    }

    if let Some(path) = &config.history_file {
        if let Err(e) = rl.save_history(path) {
            warn!("Failed to save history to {}: {}", path.display(), e);
        }
    }

    println!("Bye!");
    Ok(())
}

/// Print session command output; returns true when the session should end
fn show_outcomes(session: &Session, outcomes: &[Outcome], config: &CalcConfig) -> bool {
    for outcome in outcomes {
        match outcome {
            Outcome::Show(Command::State) => match session.state().to_json() {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("{} {}", "Error:".red(), e),
            },
            Outcome::Show(Command::Help) => print_help(config),
            Outcome::Show(Command::Verbs) => println!("{}", render_verbs()),
            Outcome::Show(Command::Quit) | Outcome::Quit => return true,
            Outcome::Continue => {},
        }
    }
    false
}

/// Print help message
pub fn print_help(config: &CalcConfig) {
    println!("{}", "=== Input ===".bright_cyan());
    println!();
    println!("  {}        Type a number and push it", "12  -3.5  1e-3".bright_yellow());
    println!("  {}                   Type into the entry without pushing", "'text".bright_yellow());
    println!();
    println!("{}", "=== Verbs ===".bright_cyan());
    println!();
    println!("{}", render_verbs());
    println!();
    println!("{}", "=== Session ===".bright_cyan());
    println!();
    println!("  {}          Print the engine state as JSON", "state".bright_yellow());
    println!("  {}          List verbs with their action sequences", "verbs".bright_yellow());
    println!("  {}           Show this help message", "help".bright_yellow());
    println!("  {}           Exit the calculator", "quit".bright_yellow());
    println!();
    println!("{}", "=== Examples ===".bright_cyan());
    println!();
    println!("  {}3 2 -          -> 1", config.prompt);
    println!("  {}8 4 /          -> 2", config.prompt);
    println!("  {}'1E5 chs push  -> 1e-5", config.prompt);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(prefix: &str) -> Vec<String> {
        complete_word(prefix).into_iter().map(|p| p.replacement).collect()
    }

    #[test]
    fn test_complete_word() {
        assert_eq!(words("si"), vec!["sin"]);
        assert_eq!(words("d"), vec!["del", "div", "divide", "drop"]);
        assert_eq!(words("EN"), vec!["enter"]);
        assert!(words("").is_empty());
        assert!(words("zz").is_empty());
    }

    #[test]
    fn test_symbols_are_not_completed() {
        assert!(words("+").is_empty());
    }
}
