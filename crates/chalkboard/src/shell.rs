// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `chalkboard chat` command implementation.
//!
//! An interactive REPL over one [`Orchestrator`]. The user turn and the
//! typing indicator are printed from the orchestrator's view channel while
//! the model call is still pending; the answer or the error notice follows
//! once it resolves.

use std::sync::Arc;

use chalkboard_agent::{Orchestrator, SubmitOutcome};
use chalkboard_config::model::ChalkboardConfig;
use chalkboard_core::{ChalkboardError, ModelAdapter};
use chalkboard_gemini::GeminiProvider;
use chalkboard_persona::Persona;
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::commands::{Session, load_persona};
use crate::confirm::TerminalConfirmer;
use crate::render;

const HELP: &[(&str, &str)] = &[
    ("/clear", "clear the conversation (asks first)"),
    ("/theme", "switch between light and dark mode"),
    ("/history", "show the whole conversation again"),
    ("/help", "show this list"),
    ("/quit", "leave the classroom (also /exit, Ctrl-D)"),
    ("//...", "send a message that starts with a slash"),
];

/// Slash commands recognised by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShellCommand {
    Clear,
    Theme,
    History,
    Help,
    Quit,
}

/// One line of input: a shell command or text for the teacher.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Command(ShellCommand),
    Message(&'a str),
}

/// Only the exact command words are commands; any other line is a message.
/// A leading `//` sends the rest of the line with a single `/`.
fn parse_input(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    if let Some(rest) = trimmed.strip_prefix('/')
        && rest.starts_with('/')
    {
        return Input::Message(rest);
    }
    let command = match trimmed {
        "/clear" => ShellCommand::Clear,
        "/theme" => ShellCommand::Theme,
        "/history" => ShellCommand::History,
        "/help" => ShellCommand::Help,
        "/quit" | "/exit" => ShellCommand::Quit,
        _ => return Input::Message(line),
    };
    Input::Command(command)
}

fn print_lines(lines: impl IntoIterator<Item = String>) {
    for line in lines {
        println!("{line}");
    }
}

/// Runs the interactive chat until the user quits.
pub async fn run_shell(config: &ChalkboardConfig) -> Result<(), ChalkboardError> {
    let persona = load_persona(config)?;
    let model: Arc<dyn ModelAdapter> = Arc::new(GeminiProvider::new(&config.gemini)?);
    let mut session = Session::open(
        config,
        persona.clone(),
        model,
        Arc::new(TerminalConfirmer),
    )
    .await?;

    let mut editor = DefaultEditor::new()
        .map_err(|e| ChalkboardError::Internal(format!("failed to initialize line editor: {e}")))?;

    let mode = session.orchestrator.display_mode();
    print_lines(render::render_header(&persona, mode));
    println!();
    print_lines(render::render(&session.orchestrator.view(), &persona));
    println!();
    println!("{}", persona.input_hint().dimmed());

    let prompt = format!("{} ", "you>".green().bold());

    loop {
        match editor.readline(&prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line.as_str());

                match parse_input(&line) {
                    Input::Command(ShellCommand::Quit) => break,
                    Input::Command(ShellCommand::Help) => {
                        for (name, about) in HELP {
                            println!("  {:<10} {about}", name.bold());
                        }
                    }
                    Input::Command(ShellCommand::Clear) => {
                        if session.orchestrator.clear().await {
                            println!("Conversation cleared.");
                            print_lines(render::render(&session.orchestrator.view(), &persona));
                        }
                    }
                    Input::Command(ShellCommand::Theme) => {
                        let mode = session.orchestrator.toggle_display_mode().await;
                        print_lines(render::render_header(&persona, mode));
                    }
                    Input::Command(ShellCommand::History) => {
                        print_lines(render::render(&session.orchestrator.view(), &persona));
                    }
                    Input::Message(text) => {
                        submit_turn(&mut session.orchestrator, &persona, text).await;
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    debug!("shell exiting");
    session.close().await;
    Ok(())
}

/// Submits one line and prints everything it adds to the view.
async fn submit_turn(orchestrator: &mut Orchestrator, persona: &Persona, text: &str) {
    let mut views = orchestrator.subscribe();
    let mut printed = orchestrator.conversation().len();

    let outcome = {
        let submit = orchestrator.submit(text);
        tokio::pin!(submit);
        let mut pending_shown = false;
        loop {
            tokio::select! {
                outcome = &mut submit => break outcome,
                changed = views.changed(), if !pending_shown => {
                    pending_shown = true;
                    if changed.is_err() {
                        continue;
                    }
                    let view = views.borrow_and_update().clone();
                    if view.awaiting_response {
                        for turn in view.conversation.turns().iter().skip(printed) {
                            print_lines(render::render_turn(turn, persona, view.display_mode));
                        }
                        printed = view.conversation.len();
                        println!("{}", render::render_typing(persona, view.display_mode));
                    }
                }
            }
        }
    };

    let view = orchestrator.view();
    for turn in view.conversation.turns().iter().skip(printed) {
        print_lines(render::render_turn(turn, persona, view.display_mode));
    }
    if let SubmitOutcome::Failed(notice) = outcome {
        println!("{}", render::render_error(&notice, persona, view.display_mode));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_message() {
        assert_eq!(parse_input("What is 2+2?"), Input::Message("What is 2+2?"));
        assert_eq!(parse_input("  hello /quit"), Input::Message("  hello /quit"));
    }

    #[test]
    fn slash_commands_are_recognised() {
        assert_eq!(parse_input("/clear"), Input::Command(ShellCommand::Clear));
        assert_eq!(parse_input(" /theme "), Input::Command(ShellCommand::Theme));
        assert_eq!(parse_input("/history"), Input::Command(ShellCommand::History));
        assert_eq!(parse_input("/help"), Input::Command(ShellCommand::Help));
        assert_eq!(parse_input("/quit"), Input::Command(ShellCommand::Quit));
        assert_eq!(parse_input("/exit"), Input::Command(ShellCommand::Quit));
    }

    #[test]
    fn unknown_slash_text_is_sent_as_message() {
        assert_eq!(parse_input("/usr/bin is what?"), Input::Message("/usr/bin is what?"));
        assert_eq!(parse_input("/clear the board"), Input::Message("/clear the board"));
        assert_eq!(parse_input("/dance"), Input::Message("/dance"));
    }

    #[test]
    fn double_slash_escapes_a_command_word() {
        assert_eq!(parse_input("//clear"), Input::Message("/clear"));
        assert_eq!(parse_input("  //help me "), Input::Message("/help me"));
    }
}
