// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt assembly from persona data.
//!
//! The builder is variant-agnostic: every persona-specific word comes from
//! the [`Persona`] it is handed.

use crate::Persona;
use crate::template::HUMOR_STYLE_TOKEN;

/// Builds the full prompt sent to the model for one student message.
///
/// The user text is appended verbatim as the final segment.
pub fn build_prompt(persona: &Persona, user_text: &str) -> String {
    let character = &persona.config;
    let personality = &character.personality;
    let classroom = &character.classroom;
    let behavior = &classroom.behavior;
    let template = &persona.template;

    let mut lines: Vec<String> = Vec::with_capacity(24 + template.directives.len());

    lines.push(format!(
        "You are {}, {} with the following traits: {}.",
        character.name,
        template.role_descriptor,
        personality.traits.join(", ")
    ));
    lines.push(format!(
        "Your communication style is {}.",
        personality.communication_style
    ));
    lines.push(format!("Your teaching style is {}.", personality.teaching_style));
    lines.push(format!(
        "You have {} emotional depth.",
        character.emotional_depth
    ));
    lines.push(String::new());

    lines.push(format!(
        "Your classroom has a {} reputation.",
        classroom.reputation
    ));
    lines.push(format!(
        "Things that concern you: {}.",
        classroom.concerns.join(", ")
    ));
    let phrases: Vec<String> = classroom
        .common_phrases
        .iter()
        .map(|p| format!("\"{p}\""))
        .collect();
    lines.push(format!("Your common phrases include: {}.", phrases.join(", ")));
    lines.push(String::new());

    lines.push("Your behavior includes:".to_string());
    lines.push(format!("- Apologies: {}", behavior.apologies));
    lines.push(format!("- Handling mistakes: {}", behavior.mistakes));
    lines.push(format!("- Jokes: {}", behavior.jokes));
    lines.push(format!("- Teaching focus: {}", behavior.teaching));
    lines.push(String::new());

    for trigger in &character.emotional_triggers {
        lines.push(format!("{}: {}.", trigger.label, trigger.items.join(", ")));
    }
    if !character.emotional_triggers.is_empty() {
        lines.push(String::new());
    }

    lines.push("IMPORTANT: When responding to the student (user):".to_string());
    for (i, directive) in template.directives.iter().enumerate() {
        let directive = directive.replace(HUMOR_STYLE_TOKEN, &personality.humor_style);
        lines.push(format!("{}. {}", i + 1, directive));
    }
    lines.push(String::new());

    lines.push(template.closing.clone());
    lines.push(String::new());

    lines.push(format!("{} {}", template.student_label, user_text));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chalkboard_core::PersonaVariant;

    fn supportive() -> Persona {
        Persona::builtin(PersonaVariant::Supportive).expect("builtin persona should load")
    }

    fn harsh() -> Persona {
        Persona::builtin(PersonaVariant::Harsh).expect("builtin persona should load")
    }

    #[test]
    fn prompt_opens_with_role_framing() {
        let prompt = build_prompt(&supportive(), "What is 2+2?");
        assert!(prompt.starts_with(
            "You are Ms. Harper, a supportive teacher AI with the following traits: patient, curious,"
        ));
    }

    #[test]
    fn prompt_ends_with_literal_user_text() {
        let prompt = build_prompt(&supportive(), "What is 2+2?");
        assert!(prompt.ends_with("Here's the student's message: What is 2+2?"));

        let prompt = build_prompt(&harsh(), "What is 2+2?");
        assert!(prompt.ends_with("Here is what the student had the nerve to ask: What is 2+2?"));
    }

    #[test]
    fn humor_style_token_is_substituted() {
        let persona = supportive();
        let prompt = build_prompt(&persona, "hi");
        assert!(!prompt.contains(HUMOR_STYLE_TOKEN));
        assert!(prompt.contains(&format!(
            "2. Use your signature humor style: {}",
            persona.config.personality.humor_style
        )));
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let prompt = build_prompt(&harsh(), "why?");
        let positions: Vec<usize> = [
            "You are Mr. Grimsby",
            "Your communication style is",
            "Your teaching style is",
            " emotional depth.",
            "Your classroom has a ",
            "Things that concern you:",
            "Your common phrases include:",
            "- Apologies:",
            "- Handling mistakes:",
            "- Jokes:",
            "- Teaching focus:",
            "You get irritated when:",
            "You refuse to apologize for:",
            "IMPORTANT: When responding to the student (user):",
            "1. Be blunt",
            "6. Never use slurs",
            "Keep responses short and sharp.",
            "Here is what the student had the nerve to ask: why?",
        ]
        .iter()
        .map(|needle| prompt.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
        .collect();

        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn classroom_lines_use_neutral_phrasing() {
        let persona = supportive();
        let classroom = &persona.config.classroom;
        let prompt = build_prompt(&persona, "hi");

        assert!(prompt.contains(&format!(
            "\nYou have {} emotional depth.\n",
            persona.config.emotional_depth
        )));
        assert!(prompt.contains(&format!(
            "\nYour classroom has a {} reputation.\n",
            classroom.reputation
        )));
        assert!(prompt.contains(&format!(
            "\nThings that concern you: {}.\n",
            classroom.concerns.join(", ")
        )));
        assert!(prompt.contains("\nYour behavior includes:\n"));
    }

    #[test]
    fn common_phrases_are_quoted() {
        let prompt = build_prompt(&supportive(), "hi");
        assert!(prompt.contains("\"Great question!\", \"Let's figure this out together.\""));
    }

    #[test]
    fn variants_differ_only_through_data() {
        let mut a = supportive();
        let b = harsh();
        a.config = b.config.clone();
        a.template = b.template.clone();
        assert_eq!(build_prompt(&a, "same"), build_prompt(&b, "same"));
    }

    #[test]
    fn prompt_is_deterministic() {
        let persona = harsh();
        assert_eq!(
            build_prompt(&persona, "Explain gravity"),
            build_prompt(&persona, "Explain gravity")
        );
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn any_text_is_the_final_segment(text in "[a-zA-Z0-9 ?.,!'-]{1,80}") {
                let persona = supportive();
                let prompt = build_prompt(&persona, &text);
                let last_line = prompt.lines().last().unwrap_or_default();
                let expected = format!("{} {}", persona.template.student_label, text);
                prop_assert!(prompt.ends_with(&text));
                prop_assert_eq!(last_line, expected.as_str());
            }
        }
    }
}
