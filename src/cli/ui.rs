//! Shared prompt and output helpers.
//!
//! Conventions follow the rest of the CLI: lowercase prompts with a colon
//! (`subject: `), single-word feedback where possible (`Saved.`), errors
//! on stderr.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    terminal::{Clear, ClearType},
    ExecutableCommand,
};
use inquire::{ui::RenderConfig, Confirm, InquireError, Text};

/// Print a status message to stdout.
pub fn status(msg: &str) {
    println!("{}", msg);
}

/// Print an error message to stderr.
pub fn error(msg: &str) {
    eprintln!("Error: {}", msg);
}

/// Clear the terminal screen and move the cursor to the top-left.
pub fn clear_screen() -> Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(Clear(ClearType::All))?;
    stdout.execute(cursor::MoveTo(0, 0))?;
    stdout.flush()?;
    Ok(())
}

/// Render config for inquire prompts without decorative prefixes.
pub fn minimal_render_config() -> RenderConfig<'static> {
    RenderConfig::default_colored()
        .with_prompt_prefix(inquire::ui::Styled::new(""))
        .with_answered_prompt_prefix(inquire::ui::Styled::new(""))
}

/// Result type for form inputs that can be cancelled.
pub enum FormResult<T> {
    Value(T),
    Cancelled,
}

/// Prompt for a required field; re-asks while the input is empty.
/// Returns Cancelled on Escape/Ctrl-C.
pub fn prompt_required(field: &str) -> Result<FormResult<String>> {
    loop {
        match prompt_optional(field)? {
            FormResult::Value(value) if value.is_empty() => continue,
            other => return Ok(other),
        }
    }
}

/// Prompt for an optional field; empty input returns an empty string.
pub fn prompt_optional(field: &str) -> Result<FormResult<String>> {
    let prompt = format!("{}: ", field);
    match Text::new(&prompt)
        .with_render_config(minimal_render_config())
        .prompt()
    {
        Ok(input) => Ok(FormResult::Value(input.trim().to_string())),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
            Ok(FormResult::Cancelled)
        }
        Err(e) => Err(e.into()),
    }
}

/// Prompt showing the current value; empty input keeps it, `-` clears it.
pub fn prompt_field(field: &str, current: Option<&str>) -> Result<FormResult<String>> {
    let has_value = current.is_some_and(|v| !v.is_empty());
    let prompt = match current {
        Some(value) if !value.is_empty() => {
            format!("{} [{}] (- clears): ", field, truncate(value, 30))
        }
        _ => format!("{}: ", field),
    };

    match Text::new(&prompt)
        .with_render_config(minimal_render_config())
        .prompt()
    {
        Ok(input) => {
            let input = input.trim();
            if input == "-" && has_value {
                Ok(FormResult::Value(String::new()))
            } else if input.is_empty() {
                Ok(FormResult::Value(current.unwrap_or("").to_string()))
            } else {
                Ok(FormResult::Value(input.to_string()))
            }
        }
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
            Ok(FormResult::Cancelled)
        }
        Err(e) => Err(e.into()),
    }
}

/// Yes/no confirmation, defaulting to no.
pub fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::new(prompt)
        .with_render_config(minimal_render_config())
        .with_default(false)
        .prompt()?)
}

/// Read a multi-line body from stdin, terminated by a lone `.` line.
/// Returns None when the body ends up empty.
pub fn multiline_input(prompt: &str) -> Result<Option<String>> {
    println!("{} (end with a single '.' line)", prompt);

    let stdin = io::stdin();
    let mut lines = Vec::new();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim() == "." {
            break;
        }
        lines.push(line);
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    if lines.is_empty() {
        Ok(None)
    } else {
        Ok(Some(lines.join("\n")))
    }
}

/// Shallow email shape check, run before submission.
pub fn is_valid_email(email: &str) -> bool {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return false;
    }
    let (local, domain) = (parts[0], parts[1]);
    !local.is_empty() && !domain.is_empty() && domain.contains('.')
}

/// Truncate to at most `max_chars` characters, ellipsis included.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("a@acme.com"));
        assert!(is_valid_email("sam.rivera@mail.example.org"));
        assert!(!is_valid_email("acme.com"));
        assert!(!is_valid_email("a@acme"));
        assert!(!is_valid_email("@acme.com"));
        assert!(!is_valid_email("a@"));
        assert!(!is_valid_email("a@b@c.com"));
    }

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate("hello world", 8), "hello w…");
    }

    #[test]
    fn test_truncate_unicode() {
        assert_eq!(truncate("日本語テスト", 4), "日本語…");
    }
}
