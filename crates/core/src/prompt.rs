//! Prompt assembly.
//!
//! Turns a scenario into plain text for a downstream text-generation
//! system: the style instruction, then the cast, the locations and the
//! numbered event list, separated by blank lines. Empty sections are
//! omitted.

use serde::Deserialize;

use crate::scenario::{Event, ScenarioContent};
use crate::types::MemberId;

pub const PERSONAE_HEADER: &str = "--- Dramatis Personae ---";
pub const LOCATIONS_HEADER: &str = "--- Key Locations ---";
pub const EVENTS_HEADER: &str = "--- Sequence of Events ---";

/// Placeholder for blank fields.
pub const NOT_AVAILABLE: &str = "N/A";

/// Which members to include. `None` means "all of them".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PromptSelection {
    #[serde(default)]
    pub entity_ids: Option<Vec<MemberId>>,
    #[serde(default)]
    pub location_ids: Option<Vec<MemberId>>,
    #[serde(default)]
    pub event_ids: Option<Vec<MemberId>>,
}

fn selected<'a, T>(
    items: &'a [T],
    filter: Option<&[MemberId]>,
    id_of: impl Fn(&T) -> &str,
) -> Vec<&'a T> {
    match filter {
        None => items.iter().collect(),
        Some(ids) => items
            .iter()
            .filter(|item| ids.iter().any(|id| id == id_of(item)))
            .collect(),
    }
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_AVAILABLE
    } else {
        value
    }
}

/// Build the prompt text for `content` framed by `instruction`.
pub fn assemble_prompt(
    instruction: &str,
    content: &ScenarioContent,
    selection: &PromptSelection,
) -> String {
    let entities = selected(&content.entities, selection.entity_ids.as_deref(), |e| {
        e.id.as_str()
    });
    let locations = selected(&content.locations, selection.location_ids.as_deref(), |l| {
        l.id.as_str()
    });
    let events = selected(&content.events, selection.event_ids.as_deref(), |e| {
        e.id.as_str()
    });

    let mut sections = vec![instruction.to_string()];

    if !entities.is_empty() {
        let mut lines = vec![PERSONAE_HEADER.to_string()];
        lines.extend(entities.iter().map(|e| {
            if e.kind.trim().is_empty() {
                format!("- {}", e.name)
            } else {
                format!("- {} ({})", e.name, e.kind)
            }
        }));
        sections.push(lines.join("\n"));
    }

    if !locations.is_empty() {
        let mut lines = vec![LOCATIONS_HEADER.to_string()];
        lines.extend(locations.iter().map(|l| format!("- {}", l.name)));
        sections.push(lines.join("\n"));
    }

    if !events.is_empty() {
        let mut lines = vec![EVENTS_HEADER.to_string()];
        lines.extend(
            events
                .iter()
                .enumerate()
                .map(|(i, event)| render_event(i + 1, event, content)),
        );
        sections.push(lines.join("\n"));
    }

    sections.join("\n\n")
}

/// Render one event block. References resolve against the whole scenario,
/// so an event still names people who were filtered out of the cast list.
fn render_event(number: usize, event: &Event, content: &ScenarioContent) -> String {
    let who: Vec<&str> = event
        .entity_ids
        .iter()
        .filter_map(|id| content.entity_by_id(id))
        .map(|e| e.name.as_str())
        .collect();
    let who = if who.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        who.join(", ")
    };

    let place = event
        .location_id
        .as_deref()
        .and_then(|id| content.location_by_id(id))
        .map_or(NOT_AVAILABLE, |l| l.name.as_str());

    format!(
        "Event #{number}:\n- Involved: {who}\n- What: {}\n- When: {}\n- Where: {place}\n- Why/Motivation: {}",
        or_na(&event.what),
        or_na(&event.when),
        or_na(&event.why),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::EventDraft;

    fn scenario() -> ScenarioContent {
        let mut c = ScenarioContent::default();
        let alice = c.add_entity("Alice", "Person").unwrap();
        let acme = c.add_entity("Acme", "Organization").unwrap();
        let harbor = c.add_location("Harbor").unwrap();
        c.add_event(EventDraft {
            what: "Signed the contract".into(),
            when: "Monday".into(),
            why: "Money".into(),
            location_id: Some(harbor),
            entity_ids: vec![alice, acme],
        })
        .unwrap();
        c.add_event(EventDraft {
            what: "Fled".into(),
            ..Default::default()
        })
        .unwrap();
        c
    }

    #[test]
    fn full_prompt_layout() {
        let prompt = assemble_prompt("Tell it.", &scenario(), &PromptSelection::default());
        let expected = "Tell it.\n\n\
            --- Dramatis Personae ---\n- Alice (Person)\n- Acme (Organization)\n\n\
            --- Key Locations ---\n- Harbor\n\n\
            --- Sequence of Events ---\n\
            Event #1:\n- Involved: Alice, Acme\n- What: Signed the contract\n- When: Monday\n- Where: Harbor\n- Why/Motivation: Money\n\
            Event #2:\n- Involved: N/A\n- What: Fled\n- When: N/A\n- Where: N/A\n- Why/Motivation: N/A";
        assert_eq!(prompt, expected);
    }

    #[test]
    fn empty_scenario_is_instruction_only() {
        let prompt = assemble_prompt(
            "Summarize...",
            &ScenarioContent::default(),
            &PromptSelection::default(),
        );
        assert_eq!(prompt, "Summarize...");
    }

    #[test]
    fn selection_filters_sections_and_renumbers() {
        let c = scenario();
        let selection = PromptSelection {
            entity_ids: Some(vec!["ent-2".into()]),
            location_ids: Some(vec![]),
            event_ids: Some(vec!["evt-1".into()]),
        };
        let prompt = assemble_prompt("X", &c, &selection);
        assert!(prompt.contains("- Acme (Organization)"));
        assert!(!prompt.contains("- Alice (Person)"));
        assert!(!prompt.contains(LOCATIONS_HEADER));
        // Involved names still come from the full scenario.
        assert!(prompt.contains("- Involved: Alice, Acme"));
        assert!(!prompt.contains("Event #2"));
    }

    #[test]
    fn selecting_only_second_event_numbers_it_one() {
        let selection = PromptSelection {
            event_ids: Some(vec!["evt-2".into()]),
            ..Default::default()
        };
        let prompt = assemble_prompt("X", &scenario(), &selection);
        assert!(prompt.contains("Event #1:\n- Involved: N/A\n- What: Fled"));
    }

    #[test]
    fn untyped_entity_has_no_parentheses() {
        let mut c = ScenarioContent::default();
        c.add_entity("Ghost", "").unwrap();
        let prompt = assemble_prompt("X", &c, &PromptSelection::default());
        assert_eq!(prompt, format!("X\n\n{PERSONAE_HEADER}\n- Ghost"));
    }
}
