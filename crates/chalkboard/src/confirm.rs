// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Yes/no confirmation on the controlling terminal.

use std::io::{BufRead, IsTerminal, Write};

use chalkboard_core::Confirmer;
use tracing::debug;

/// Asks on stderr and reads one line from stdin.
///
/// Anything other than an explicit `y`/`yes` counts as no, including a
/// non-interactive stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, prompt: &str) -> bool {
        if !std::io::stdin().is_terminal() {
            debug!("stdin is not a terminal, treating confirmation as declined");
            return false;
        }

        eprint!("{prompt} [y/N] ");
        let _ = std::io::stderr().flush();

        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                debug!(error = %e, "failed to read confirmation");
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
