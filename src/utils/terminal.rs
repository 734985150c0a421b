//! Terminal title helpers

use std::io::{IsTerminal, Write};

/// Sets the terminal title; does nothing when stdout is not a terminal
pub fn set_terminal_title(title: &str) {
    if std::io::stdout().is_terminal() {
        print!("\x1b]0;{title}\x07");
    }
}

/// Sets the terminal title and ensures it's flushed to the terminal
pub fn set_terminal_title_and_flush(title: &str) {
    set_terminal_title(title);
    // Flush stdout - ignore errors as this is non-critical
    let _ = std::io::stdout().flush();
}
