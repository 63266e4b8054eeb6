// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal rendering of a chat view.
//!
//! Every function here is a pure mapping from state to lines. Colour comes
//! from a [`Palette`] chosen by display mode and persona accent; the
//! `colored` crate drops escapes when colour is disabled.

use chalkboard_agent::ChatView;
use chalkboard_core::{DisplayMode, Speaker, Turn};
use chalkboard_persona::{Accent, Persona};
use chrono::{DateTime, Local, Utc};
use colored::{Color, Colorize};

/// Foreground colours for one display mode and accent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: Color,
    pub user: Color,
    pub assistant: Color,
    pub muted: Color,
    pub error: Color,
}

/// Picks the palette for `mode` and the persona's `accent`.
pub fn palette(mode: DisplayMode, accent: Accent) -> Palette {
    match (mode, accent) {
        (DisplayMode::Light, Accent::Indigo) => Palette {
            accent: Color::Blue,
            user: Color::Blue,
            assistant: Color::Black,
            muted: Color::BrightBlack,
            error: Color::Red,
        },
        (DisplayMode::Light, Accent::Crimson) => Palette {
            accent: Color::Red,
            user: Color::Red,
            assistant: Color::Black,
            muted: Color::BrightBlack,
            error: Color::Magenta,
        },
        (DisplayMode::Dark, Accent::Indigo) => Palette {
            accent: Color::BrightBlue,
            user: Color::BrightCyan,
            assistant: Color::BrightWhite,
            muted: Color::White,
            error: Color::BrightRed,
        },
        (DisplayMode::Dark, Accent::Crimson) => Palette {
            accent: Color::BrightRed,
            user: Color::BrightYellow,
            assistant: Color::BrightWhite,
            muted: Color::White,
            error: Color::BrightMagenta,
        },
    }
}

/// Formats a turn timestamp as `h:mm AM/PM` in local time.
pub fn format_time(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%-I:%M %p").to_string()
}

/// The persona banner shown when the shell starts or the theme changes.
pub fn render_header(persona: &Persona, mode: DisplayMode) -> Vec<String> {
    let p = palette(mode, persona.accent);
    let other = mode.toggled();
    vec![
        format!(
            "{}  {}",
            persona.name().color(p.accent).bold(),
            persona.copy.status_line.color(p.muted)
        ),
        persona.copy.motto.color(p.muted).italic().to_string(),
        format!("({mode} mode, /theme for {other}, /help for commands)")
            .color(p.muted)
            .to_string(),
    ]
}

/// The panel shown in place of an empty conversation.
pub fn render_welcome(persona: &Persona, mode: DisplayMode) -> Vec<String> {
    let p = palette(mode, persona.accent);
    vec![
        persona.welcome_title().color(p.accent).bold().to_string(),
        persona.copy.welcome_body.clone(),
        format!("\"{}\"", persona.copy.welcome_quote)
            .color(p.muted)
            .italic()
            .to_string(),
    ]
}

/// One turn: a labelled, timestamped first line and indented continuations.
pub fn render_turn(turn: &Turn, persona: &Persona, mode: DisplayMode) -> Vec<String> {
    let p = palette(mode, persona.accent);
    let time = format_time(&turn.created_at);
    let (marker, label, color) = match turn.speaker {
        Speaker::User => (">", "You", p.user),
        Speaker::Assistant => ("<", persona.name(), p.assistant),
    };

    let mut lines = vec![format!(
        "{} {} {}",
        marker.color(color).bold(),
        label.color(color).bold(),
        time.color(p.muted)
    )];
    if turn.text.is_empty() {
        lines.push("  ".to_string());
    }
    for line in turn.text.lines() {
        lines.push(format!("  {}", line.color(color)));
    }
    lines
}

/// The indicator shown while a response is pending.
pub fn render_typing(persona: &Persona, mode: DisplayMode) -> String {
    let p = palette(mode, persona.accent);
    format!("{} is typing...", persona.name())
        .color(p.muted)
        .italic()
        .to_string()
}

/// The error notice shown below the turns.
pub fn render_error(message: &str, persona: &Persona, mode: DisplayMode) -> String {
    let p = palette(mode, persona.accent);
    format!("! {message}").color(p.error).to_string()
}

/// Renders a whole view: welcome panel or turns, then indicator and notice.
pub fn render(view: &ChatView, persona: &Persona) -> Vec<String> {
    let mode = view.display_mode;
    let mut lines = Vec::new();

    if view.conversation.is_empty() {
        lines.extend(render_welcome(persona, mode));
    } else {
        for (i, turn) in view.conversation.iter().enumerate() {
            if i > 0 {
                lines.push(String::new());
            }
            lines.extend(render_turn(turn, persona, mode));
        }
    }

    if view.awaiting_response {
        lines.push(render_typing(persona, mode));
    }
    if let Some(message) = &view.error {
        lines.push(render_error(message, persona, mode));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chalkboard_core::{Conversation, PersonaVariant};

    fn plain() {
        colored::control::set_override(false);
    }

    fn supportive() -> Persona {
        Persona::builtin(PersonaVariant::Supportive).unwrap()
    }

    #[test]
    fn empty_view_shows_welcome_panel() {
        plain();
        let persona = supportive();
        let lines = render(&ChatView::default(), &persona);
        assert_eq!(lines[0], "Welcome to Ms. Harper's Classroom!");
        assert_eq!(lines[1], persona.copy.welcome_body);
        assert_eq!(lines[2], format!("\"{}\"", persona.copy.welcome_quote));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn turns_render_in_order_with_labels_and_times() {
        plain();
        let persona = supportive();
        let mut conversation = Conversation::new();
        conversation.push_user("What is 2+2?");
        conversation.push_assistant("Great question!\nIt is 4.");
        let view = ChatView {
            conversation: conversation.clone(),
            ..ChatView::default()
        };

        let lines = render(&view, &persona);
        let user_time = format_time(&conversation.turns()[0].created_at);
        let assistant_time = format_time(&conversation.turns()[1].created_at);
        assert_eq!(
            lines,
            vec![
                format!("> You {user_time}"),
                "  What is 2+2?".to_string(),
                String::new(),
                format!("< Ms. Harper {assistant_time}"),
                "  Great question!".to_string(),
                "  It is 4.".to_string(),
            ]
        );
    }

    #[test]
    fn typing_indicator_only_while_awaiting() {
        plain();
        let persona = supportive();
        let mut view = ChatView::default();
        view.conversation.push_user("hi");

        assert!(!render(&view, &persona).iter().any(|l| l.contains("is typing")));
        view.awaiting_response = true;
        assert_eq!(
            render(&view, &persona).last().map(String::as_str),
            Some("Ms. Harper is typing...")
        );
    }

    #[test]
    fn error_notice_is_below_turns() {
        plain();
        let persona = supportive();
        let mut view = ChatView::default();
        view.conversation.push_user("test");
        view.error = Some(persona.copy.fallback_error.clone());

        let lines = render(&view, &persona);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], format!("! {}", persona.copy.fallback_error));
    }

    #[test]
    fn time_uses_twelve_hour_clock() {
        let at = DateTime::parse_from_rfc3339("2026-03-01T15:04:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let formatted = format_time(&at);
        assert!(formatted.ends_with(" AM") || formatted.ends_with(" PM"), "got {formatted}");
        assert!(formatted.contains(":04"), "got {formatted}");
    }

    #[test]
    fn header_mentions_persona_and_other_mode() {
        plain();
        let persona = Persona::builtin(PersonaVariant::Harsh).unwrap();
        let lines = render_header(&persona, DisplayMode::Dark);
        assert!(lines[0].starts_with("Mr. Grimsby"));
        assert!(lines[0].contains(&persona.copy.status_line));
        assert_eq!(lines[1], persona.copy.motto);
        assert!(lines[2].contains("/theme for light"));
    }

    #[test]
    fn palette_depends_on_mode_and_accent() {
        let light = palette(DisplayMode::Light, Accent::Indigo);
        let dark = palette(DisplayMode::Dark, Accent::Indigo);
        let crimson = palette(DisplayMode::Light, Accent::Crimson);
        assert_ne!(light, dark);
        assert_ne!(light.accent, crimson.accent);
    }
}
