//! Text rendering of engine state

use colored::*;
use rpn_engine::{EngineState, Verb, NAMED_VERBS};

/// Format a stack value
///
/// With a precision, fixed decimals. Otherwise the shortest round-trip
/// form, switching to exponent notation for very large or small magnitudes.
pub fn format_value(value: f64, precision: Option<usize>) -> String {
    if let Some(decimals) = precision {
        return format!("{:.*}", decimals, value);
    }
    let magnitude = value.abs();
    if value == 0.0 || (1e-6..1e15).contains(&magnitude) {
        format!("{}", value)
    } else {
        format!("{:e}", value)
    }
}

/// Render the stack (deepest shown level first), the entry line and any error
pub fn render_state(state: &EngineState, rows: usize, precision: Option<usize>) -> String {
    let mut lines = Vec::new();

    let depth = state.stack.len();
    if depth > rows {
        lines.push(format!("   ({} more)", depth - rows).dimmed().to_string());
    }
    let shown = depth.min(rows);
    for level in (1..=shown).rev() {
        let value = format_value(state.stack[level - 1], precision);
        lines.push(format!("{:>3}: {}", level.to_string().bright_cyan(), value));
    }
    if depth == 0 && state.edit.is_none() {
        lines.push("   (empty)".dimmed().to_string());
    }

    if let Some(edit) = &state.edit {
        lines.push(format!("{} {}_", ">".bright_yellow(), edit));
    }
    if let Some(kind) = state.error {
        lines.push(format!("{} {}", "Error:".red(), kind));
    }

    lines.join("\n")
}

/// One line per named verb with its action sequence
pub fn render_verbs() -> String {
    NAMED_VERBS
        .iter()
        .map(render_verb)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_verb(verb: &Verb) -> String {
    let actions = verb
        .actions()
        .iter()
        .map(|action| action.label())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "  {:<24} {:<50} [{}]",
        verb.aliases().join(" ").bright_yellow(),
        verb.description(),
        actions
    )
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use rpn_engine::ErrorKind;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(10.0, None), "10");
        assert_eq!(format_value(0.25, None), "0.25");
        assert_eq!(format_value(-123.0, None), "-123");
        assert_eq!(format_value(0.0, None), "0");
        assert_eq!(format_value(1e300, None), "1e300");
        assert_eq!(format_value(2.5e-9, None), "2.5e-9");
        assert_eq!(format_value(2.0 / 3.0, Some(3)), "0.667");
        assert_eq!(format_value(2.0, Some(2)), "2.00");
    }

    #[test]
    fn test_render_stack_levels() {
        plain();
        let state = EngineState::with_stack(vec![3.0, 2.0, 1.0]);
        let text = render_state(&state, 4, None);
        assert_eq!(text, "  3: 1\n  2: 2\n  1: 3");
    }

    #[test]
    fn test_render_truncates_deep_stack() {
        plain();
        let state = EngineState::with_stack(vec![5.0, 4.0, 3.0, 2.0, 1.0]);
        let text = render_state(&state, 2, None);
        assert_eq!(text, "   (3 more)\n  2: 4\n  1: 5");
    }

    #[test]
    fn test_render_entry_and_error() {
        plain();
        let state = EngineState {
            stack: vec![],
            edit: Some("1E-".to_string()),
            error: Some(ErrorKind::InvalidNumber),
        };
        let text = render_state(&state, 4, None);
        assert_eq!(text, "> 1E-_\nError: Invalid number");
    }

    #[test]
    fn test_render_empty() {
        plain();
        assert_eq!(render_state(&EngineState::new(), 4, None), "   (empty)");
    }

    #[test]
    fn test_render_verbs_lists_divide_guards() {
        plain();
        let text = render_verbs();
        assert!(text.contains("min_args(2), non_zero_register(0), divide"));
        assert!(text.contains("min_args(1), sin"));
    }
}
