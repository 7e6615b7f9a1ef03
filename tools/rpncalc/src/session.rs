//! Calculator session - turns text tokens into engine verbs
//!
//! Token language (whitespace separated, processed left to right):
//! - `12`, `-3.5`, `1e-3`   number: typed and pushed
//! - `+ - * / sin chs ...`  verb by name or symbol
//! - `'text`                typed into the entry without pushing
//! - `state help verbs quit` session commands

use anyhow::{bail, Result};
use rpn_engine::{Calculator, EngineState, Verb};
use tracing::{debug, warn};

/// Parsed input token
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(String),
    Entry(String),
    Verb(Verb),
    Command(Command),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    State,
    Help,
    Verbs,
    Quit,
}

/// What the caller should do after a line
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Continue,
    /// Session command output to show
    Show(Command),
    Quit,
}

/// Classify one token
pub fn parse_token(token: &str) -> Result<Token> {
    if let Some(text) = token.strip_prefix('\'') {
        return Ok(Token::Entry(text.to_string()));
    }
    if is_number_literal(token) {
        return Ok(Token::Number(token.to_string()));
    }
    match token.to_lowercase().as_str() {
        "state" => return Ok(Token::Command(Command::State)),
        "help" | "?" => return Ok(Token::Command(Command::Help)),
        "verbs" => return Ok(Token::Command(Command::Verbs)),
        "quit" | "exit" | "q" => return Ok(Token::Command(Command::Quit)),
        _ => {},
    }
    match token.parse::<Verb>() {
        Ok(verb) => Ok(Token::Verb(verb)),
        Err(_) => bail!("Unknown token '{}'. Type 'help' for available commands", token),
    }
}

/// Starts with a digit or `.`, optionally after one sign character
fn is_number_literal(token: &str) -> bool {
    let unsigned = token
        .strip_prefix('-')
        .or_else(|| token.strip_prefix('+'))
        .unwrap_or(token);
    unsigned
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '.')
}

/// One calculator plus the token interpreter around it
#[derive(Debug, Default)]
pub struct Session {
    calc: Calculator,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EngineState {
        self.calc.state()
    }

    /// Execute every token of a line
    ///
    /// Stops at the first unknown token; tokens before it stay applied.
    /// Session commands are returned to the caller in order.
    pub fn execute_line(&mut self, line: &str) -> Result<Vec<Outcome>> {
        let mut outcomes = Vec::new();
        for raw in line.split_whitespace() {
            let token = parse_token(raw)?;
            let outcome = self.execute(token);
            let quit = outcome == Outcome::Quit;
            if outcome != Outcome::Continue {
                outcomes.push(outcome);
            }
            if quit {
                break;
            }
        }
        Ok(outcomes)
    }

    /// Execute a single parsed token
    pub fn execute(&mut self, token: Token) -> Outcome {
        debug!(?token, "execute");
        match token {
            Token::Number(text) => {
                self.push_number(&text);
                Outcome::Continue
            },
            Token::Entry(text) => {
                self.calc.insert_number(&text);
                Outcome::Continue
            },
            Token::Verb(verb) => {
                self.calc.run(&verb);
                if let Some(kind) = self.calc.state().error {
                    warn!(verb = %verb, error = %kind, "operation rejected");
                }
                Outcome::Continue
            },
            Token::Command(Command::Quit) => Outcome::Quit,
            Token::Command(command) => Outcome::Show(command),
        }
    }

    /// Commit any pending entry, then type and push `text`
    fn push_number(&mut self, text: &str) {
        if self.calc.state().is_editing() {
            self.calc.push();
            if self.calc.state().has_error() {
                return;
            }
        }
        self.calc.insert_number(text);
        self.calc.push();
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use rpn_engine::ErrorKind;

    #[test]
    fn test_parse_token() {
        assert_eq!(parse_token("12").unwrap(), Token::Number("12".into()));
        assert_eq!(parse_token("-3.5").unwrap(), Token::Number("-3.5".into()));
        assert_eq!(parse_token(".5e3").unwrap(), Token::Number(".5e3".into()));
        assert_eq!(parse_token("-").unwrap(), Token::Verb(Verb::Subtract));
        assert_eq!(parse_token("+").unwrap(), Token::Verb(Verb::Add));
        assert_eq!(parse_token("SIN").unwrap(), Token::Verb(Verb::Sin));
        assert_eq!(parse_token("'1E").unwrap(), Token::Entry("1E".into()));
        assert_eq!(parse_token("quit").unwrap(), Token::Command(Command::Quit));
        assert!(parse_token("sqrt").is_err());
    }

    #[test]
    fn test_line_arithmetic() {
        let mut session = Session::new();
        session.execute_line("3 2 -").unwrap();
        assert_eq!(session.state(), &EngineState::with_stack(vec![1.0]));

        session.execute_line("8 4 / +").unwrap();
        assert_eq!(session.state(), &EngineState::with_stack(vec![3.0]));
    }

    #[test]
    fn test_line_divide_by_zero() {
        let mut session = Session::new();
        session.execute_line("1 0 /").unwrap();
        assert_eq!(session.state().error, Some(ErrorKind::InfiniteResult));
        assert_eq!(session.state().stack, vec![0.0, 1.0]);

        session.execute_line("drop 4 /").unwrap();
        assert_eq!(session.state(), &EngineState::with_stack(vec![0.25]));
    }

    #[test]
    fn test_entry_editing() {
        let mut session = Session::new();
        session.execute_line("'1E5 chs").unwrap();
        assert_eq!(session.state().edit.as_deref(), Some("1E-5"));
        session.execute_line("push").unwrap();
        assert_eq!(session.state().stack, vec![1e-5]);
    }

    #[test]
    fn test_number_commits_pending_entry() {
        let mut session = Session::new();
        session.execute_line("'12 3 +").unwrap();
        assert_eq!(session.state(), &EngineState::with_stack(vec![15.0]));
    }

    #[test]
    fn test_unknown_token_stops_line() {
        let mut session = Session::new();
        let err = session.execute_line("5 bogus 6").unwrap_err();
        assert!(err.to_string().contains("bogus"));
        assert_eq!(session.state().stack, vec![5.0]);
    }

    #[test]
    fn test_commands_are_reported() {
        let mut session = Session::new();
        let outcomes = session.execute_line("1 state 2 quit 3").unwrap();
        assert_eq!(outcomes, vec![Outcome::Show(Command::State), Outcome::Quit]);
        assert_eq!(session.state().stack, vec![2.0, 1.0]);
    }
}
