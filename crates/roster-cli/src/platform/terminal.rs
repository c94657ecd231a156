use std::io::{self, BufRead, IsTerminal, Write};

use base64::prelude::*;
use roster_runtime::{Clipboard, Notifier};

// =============================================================================
// Clipboard
// =============================================================================

/// OSC 52 "set clipboard" escape for `text`.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", BASE64_STANDARD.encode(text))
}

/// Clipboard via the terminal's OSC 52 support.
///
/// When stdout is not a terminal the text is printed instead, so piped
/// sessions still see what was copied.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalClipboard;

impl TerminalClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl Clipboard for TerminalClipboard {
    fn copy(&self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        if stdout.is_terminal() {
            stdout.write_all(osc52_sequence(text).as_bytes())?;
        } else {
            writeln!(stdout, "{}", text)?;
        }
        stdout.flush()
    }
}

// =============================================================================
// Notifier
// =============================================================================

/// Interpret a y/n answer. Anything but an explicit yes declines.
pub fn parse_answer(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Toasts on stderr; confirmations read a line from stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier {
    assume_yes: bool,
}

impl TerminalNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every confirmation with yes without prompting.
    pub fn assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }
}

impl Notifier for TerminalNotifier {
    fn toast(&self, message: &str) {
        eprintln!("» {}", message);
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        eprint!("{} [y/N] ", message);
        let _ = io::stderr().flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => false,
            Ok(_) => parse_answer(&line),
            Err(e) => {
                tracing::warn!("Failed to read confirmation: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence() {
        assert_eq!(
            osc52_sequence("Sincere@april.biz"),
            "\x1b]52;c;U2luY2VyZUBhcHJpbC5iaXo=\x07"
        );
        assert_eq!(osc52_sequence(""), "\x1b]52;c;\x07");
    }

    #[test]
    fn test_parse_answer() {
        assert!(parse_answer("y\n"));
        assert!(parse_answer(" YES "));
        assert!(!parse_answer("n"));
        assert!(!parse_answer(""));
        assert!(!parse_answer("yep"));
    }

    #[test]
    fn test_assume_yes_skips_prompt() {
        let notifier = TerminalNotifier::new().assume_yes(true);
        assert!(notifier.confirm("Export 3 row(s) to CSV?"));
    }
}
