// storefront_cli/src/terminal.rs

use std::io::{self, BufRead, Write};
use storefront::{Navigator, Notice, Prompt, Route};

/// Confirmations on stdin, notices on stderr.
pub struct TerminalPrompt {
  assume_yes: bool,
}

impl TerminalPrompt {
  pub fn new(assume_yes: bool) -> Self {
    Self { assume_yes }
  }
}

impl Prompt for TerminalPrompt {
  fn confirm(&self, message: &str) -> bool {
    if self.assume_yes {
      return true;
    }
    eprint!("{} [y/N] ", message);
    let _ = io::stderr().flush();

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
      return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes" | "s" | "si" | "sí")
  }

  fn notify(&self, notice: Notice, message: &str) {
    let tag = match notice {
      Notice::Info => "info",
      Notice::Success => "ok",
      Notice::Error => "error",
    };
    eprintln!("[{}] {}", tag, message);
  }
}

/// A terminal has nowhere to go, so navigation is reported instead.
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
  fn navigate(&self, route: Route) {
    tracing::debug!(%route, "navigate");
    eprintln!("-> {}", route);
  }
}
