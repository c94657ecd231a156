//! Terminal and filesystem implementations of the host services.

mod files;
mod terminal;

pub use files::DirectoryFileSink;
pub use terminal::{osc52_sequence, parse_answer, TerminalClipboard, TerminalNotifier};
