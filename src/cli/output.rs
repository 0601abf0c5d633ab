//! Colored output helpers for the CLI
//!
//! The interactive run writes only the prompt and the final email (or the
//! failure line) to stdout. Status lines used by `init` and `config` also go
//! to stdout; errors go to stderr.

use crate::types::{AppError, Email, Result};
use owo_colors::OwoColorize;
use std::io::{self, BufRead, Write};

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print `question` and read one line from `input`.
    ///
    /// End of input yields an empty string, which the crew rejects as an
    /// invalid question. A line that is not UTF-8 is [`AppError::InvalidInput`].
    pub fn ask<R: BufRead>(&self, question: &str, input: &mut R) -> Result<String> {
        if self.colored {
            println!("{}", question.bright_white().bold());
        } else {
            println!("{}", question);
        }
        io::stdout()
            .flush()
            .map_err(|e| AppError::Internal(format!("Failed to write the prompt: {}", e)))?;

        let mut line = Vec::new();
        input
            .read_until(b'\n', &mut line)
            .map_err(|e| AppError::InvalidInput(format!("could not read the question: {}", e)))?;
        String::from_utf8(line)
            .map_err(|_| AppError::InvalidInput("question is not valid UTF-8".to_string()))
    }

    /// Print the drafted email as plain text
    pub fn email(&self, email: &Email) {
        println!("{}", email);
    }

    /// Print the single user-facing line for a failed run
    pub fn run_failed(&self, message: &str) {
        let line = format!("An error occurred: {}", message);
        if self.colored {
            println!("{}", line.red());
        } else {
            println!("{}", line);
        }
    }

    /// Print a success message with a checkmark
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "•".blue(), message);
        } else {
            println!("  [INFO] {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            println!("  [WARN] {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Print a file creation message
    pub fn created(&self, file_type: &str, path: &str) {
        if self.colored {
            println!(
                "  {} {} {}",
                "✓".green().bold(),
                file_type.dimmed(),
                path.bright_white()
            );
        } else {
            println!("  [CREATED] {} {}", file_type, path);
        }
    }

    /// Print a file skipped message
    pub fn skipped(&self, path: &str, reason: &str) {
        if self.colored {
            println!(
                "  {} {} {}",
                "○".yellow(),
                path.dimmed(),
                format!("({})", reason).yellow()
            );
        } else {
            println!("  [SKIPPED] {} ({})", path, reason);
        }
    }

    /// Print a header for a section
    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    /// Print a key-value pair
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    /// Print a hint/tip message
    pub fn hint(&self, message: &str) {
        if self.colored {
            println!("\n  {}", message.dimmed().italic());
        } else {
            println!("\n  [TIP] {}", message);
        }
    }

    /// Print a command suggestion
    pub fn command(&self, cmd: &str) {
        if self.colored {
            println!("     {}", format!("$ {}", cmd).bright_cyan());
        } else {
            println!("     $ {}", cmd);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_output_default() {
        assert!(Output::default().colored);
        assert!(!Output::no_color().colored);
    }

    #[test]
    fn test_ask_reads_one_line() {
        let output = Output::no_color();
        let mut input = Cursor::new("Roof\nPlumbing\n");
        let line = output.ask("Which section?", &mut input).unwrap();
        assert_eq!(line, "Roof\n");
    }

    #[test]
    fn test_ask_at_end_of_input() {
        let output = Output::no_color();
        let mut input = Cursor::new("");
        assert_eq!(output.ask("Which section?", &mut input).unwrap(), "");
    }

    #[test]
    fn test_ask_rejects_invalid_utf8() {
        let output = Output::no_color();
        let mut input = Cursor::new(vec![0xff, 0xfe, b'\n']);
        let err = output.ask("Which section?", &mut input).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(err.to_string().contains("UTF-8"));
    }

    #[test]
    fn test_output_methods_no_panic() {
        let output = Output::no_color();

        output.success("test success");
        output.info("test info");
        output.warning("test warning");
        output.error("test error");
        output.created("config", "workorder.toml");
        output.skipped("path", "reason");
        output.header("Test Header");
        output.kv("key", "value");
        output.hint("hint message");
        output.command("some command");
        output.run_failed("boom");
    }
}
