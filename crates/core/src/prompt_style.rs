//! Prompt style constants and validation.
//!
//! A prompt style is a named instruction that frames the generated text
//! (narrative, timeline, ...). The built-ins below are seeded into the
//! `prompt_styles` table and cannot be deleted.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length for a prompt style name.
pub const MAX_STYLE_NAME_LENGTH: usize = 100;

/// Maximum length for a prompt style instruction.
pub const MAX_INSTRUCTION_LENGTH: usize = 10_000;

/// Instruction used when the requested style does not exist.
pub const DEFAULT_INSTRUCTION: &str = "Summarize...";

/// A style that ships with the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinStyle {
    pub name: &'static str,
    pub instruction: &'static str,
}

pub const BUILTIN_STYLES: &[BuiltinStyle] = &[
    BuiltinStyle {
        name: "narrative",
        instruction: "You are a master storyteller. Weave the following series of events into a single, coherent narrative. First, familiarize yourself with the cast of characters, organizations, and key locations provided. Then, use the event list to build the story.",
    },
    BuiltinStyle {
        name: "timeline",
        instruction: "You are a meticulous investigator. Based on the entities, locations, and events provided, create a detailed timeline. Start by listing the key players and locations. For each timeline entry, note the involved entities and highlight any connections.",
    },
    BuiltinStyle {
        name: "script",
        instruction: "You are a professional screenwriter. Write a script that covers the following events. The 'Dramatis Personae' and 'Locations' sections list your cast and settings. Create new scenes for distinct events.",
    },
    BuiltinStyle {
        name: "report",
        instruction: "You are a security analyst. Consolidate the following incident reports into a single executive summary. The 'Entities of Interest' and 'Relevant Locations' are your subjects and settings. Detail each event chronologically and conclude with a threat assessment.",
    },
];

/// Look up a built-in instruction by style name.
pub fn builtin_instruction(name: &str) -> Option<&'static str> {
    BUILTIN_STYLES
        .iter()
        .find(|s| s.name == name)
        .map(|s| s.instruction)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a style name: non-empty, bounded, and limited to lowercase
/// ASCII letters, digits, `_` and `-`.
pub fn validate_style_name(name: &str) -> Result<(), CoreError> {
    if name.is_empty() {
        return Err(CoreError::Validation(
            "Prompt style name must not be empty".to_string(),
        ));
    }
    let length = name.chars().count();
    if length > MAX_STYLE_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Prompt style name exceeds maximum length of {MAX_STYLE_NAME_LENGTH} characters (got {length})"
        )));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
    {
        return Err(CoreError::Validation(format!(
            "Prompt style name '{name}' may only contain a-z, 0-9, '_' and '-'"
        )));
    }
    Ok(())
}

pub fn validate_instruction(text: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation(
            "Instruction must not be empty".to_string(),
        ));
    }
    let length = text.chars().count();
    if length > MAX_INSTRUCTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Instruction exceeds maximum length of {MAX_INSTRUCTION_LENGTH} characters (got {length})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_are_valid() {
        for style in BUILTIN_STYLES {
            assert!(validate_style_name(style.name).is_ok(), "{}", style.name);
            assert!(validate_instruction(style.instruction).is_ok());
        }
    }

    #[test]
    fn builtin_lookup() {
        assert!(builtin_instruction("script")
            .unwrap()
            .starts_with("You are a professional screenwriter."));
        assert_eq!(builtin_instruction("limerick"), None);
    }

    #[test]
    fn empty_name_rejected() {
        let err = validate_style_name("").unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn uppercase_name_rejected() {
        let err = validate_style_name("Narrative").unwrap_err();
        assert!(err.to_string().contains("may only contain"));
    }

    #[test]
    fn too_long_name_rejected() {
        let long = "a".repeat(MAX_STYLE_NAME_LENGTH + 1);
        assert!(validate_style_name(&long).is_err());
        assert!(validate_style_name(&long[1..]).is_ok());
    }

    #[test]
    fn blank_instruction_rejected() {
        assert!(validate_instruction("  \n").is_err());
    }

    #[test]
    fn too_long_instruction_rejected() {
        let long = "x".repeat(MAX_INSTRUCTION_LENGTH + 1);
        let err = validate_instruction(&long).unwrap_err();
        assert!(err.to_string().contains("exceeds maximum length"));
    }

    #[test]
    fn instruction_length_counts_characters() {
        // 4000 characters, 12000 bytes.
        let text = "語".repeat(4000);
        assert!(validate_instruction(&text).is_ok());

        let over = "語".repeat(MAX_INSTRUCTION_LENGTH + 1);
        let err = validate_instruction(&over).unwrap_err();
        assert!(err.to_string().contains("(got 10001)"));
    }
}
