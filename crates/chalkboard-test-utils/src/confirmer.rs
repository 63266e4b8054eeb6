// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted confirmation collaborator.

use std::collections::VecDeque;
use std::sync::Mutex;

use chalkboard_core::Confirmer;

/// Answers confirmation prompts from a script and records each prompt.
///
/// Once the script runs out, every further prompt gets the fallback answer.
pub struct ScriptedConfirmer {
    answers: Mutex<VecDeque<bool>>,
    fallback: bool,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirmer {
    /// Always answers `answer`.
    pub fn always(answer: bool) -> Self {
        Self::with_answers(Vec::new(), answer)
    }

    /// Answers from `answers` in order, then `fallback`.
    pub fn with_answers(answers: Vec<bool>, fallback: bool) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            fallback,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts shown so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&self, prompt: &str) -> bool {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.answers
            .lock()
            .ok()
            .and_then(|mut a| a.pop_front())
            .unwrap_or(self.fallback)
    }
}
