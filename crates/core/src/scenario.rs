//! The scenario graph: entities, locations, and the events linking them.
//!
//! [`ScenarioContent`] is the canonical, id-keyed document stored in the
//! `scenarios.content` column. Editing operations keep event references
//! consistent: removing an entity strips it from every event, removing a
//! location clears it from every event that took place there.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::MemberId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Version number of the canonical (id-keyed) content format.
pub const CONTENT_VERSION: u32 = 2;

/// Id prefix for generated entity ids (`ent-1`, `ent-2`, ...).
pub const ENTITY_ID_PREFIX: &str = "ent";

/// Id prefix for generated location ids.
pub const LOCATION_ID_PREFIX: &str = "loc";

/// Id prefix for generated event ids.
pub const EVENT_ID_PREFIX: &str = "evt";

/// Maximum length for entity and location names in characters.
pub const MAX_MEMBER_NAME_LENGTH: usize = 200;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A person, organization, or anything else that takes part in events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: MemberId,
    pub name: String,
    /// Free-text type such as "Person" or "Organization".
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: MemberId,
    pub name: String,
}

/// One entry in the chronological event list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: MemberId,
    #[serde(default)]
    pub what: String,
    #[serde(default)]
    pub when: String,
    #[serde(default)]
    pub why: String,
    #[serde(default)]
    pub location_id: Option<MemberId>,
    #[serde(default)]
    pub entity_ids: Vec<MemberId>,
}

/// The editable fields of an event, used for both insert and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EventDraft {
    #[serde(default)]
    pub what: String,
    #[serde(default)]
    pub when: String,
    #[serde(default)]
    pub why: String,
    #[serde(default)]
    pub location_id: Option<MemberId>,
    #[serde(default)]
    pub entity_ids: Vec<MemberId>,
}

/// A complete scenario document in canonical shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioContent {
    #[serde(default = "content_version")]
    pub version: u32,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub events: Vec<Event>,
}

fn content_version() -> u32 {
    CONTENT_VERSION
}

impl Default for ScenarioContent {
    fn default() -> Self {
        Self {
            version: CONTENT_VERSION,
            entities: Vec::new(),
            locations: Vec::new(),
            events: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Id allocation
// ---------------------------------------------------------------------------

/// Hands out `{prefix}-{n}` ids that do not collide with any claimed id.
///
/// Always returns the smallest positive `n` whose id is still free.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    prefix: &'static str,
    taken: HashSet<MemberId>,
    next: u64,
}

impl IdAllocator {
    pub fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            taken: HashSet::new(),
            next: 1,
        }
    }

    /// Build an allocator that already knows about `existing` ids.
    pub fn with_existing<'a>(
        prefix: &'static str,
        existing: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut alloc = Self::new(prefix);
        for id in existing {
            alloc.claim(id);
        }
        alloc
    }

    /// Mark `id` as used. Returns `false` if it was already taken.
    pub fn claim(&mut self, id: &str) -> bool {
        self.taken.insert(id.to_string())
    }

    /// Allocate the next free id.
    pub fn allocate(&mut self) -> MemberId {
        loop {
            let candidate = format!("{}-{}", self.prefix, self.next);
            self.next += 1;
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

/// Trim a member name and check it is non-empty and within length limits.
pub fn validate_member_name(kind: &str, name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!(
            "{kind} name must not be empty"
        )));
    }
    if trimmed.chars().count() > MAX_MEMBER_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{kind} name exceeds maximum length of {MAX_MEMBER_NAME_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

fn check_unique_ids<'a>(
    kind: &str,
    ids: impl Iterator<Item = &'a MemberId>,
) -> Result<(), CoreError> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.is_empty() {
            return Err(CoreError::Validation(format!("{kind} id must not be empty")));
        }
        if !seen.insert(id.as_str()) {
            return Err(CoreError::Validation(format!("Duplicate {kind} id: {id}")));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

impl ScenarioContent {
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.locations.is_empty() && self.events.is_empty()
    }

    pub fn entity_by_id(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn location_by_id(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    pub fn event_by_id(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    // -- entities --

    /// Add an entity and return its freshly allocated id.
    pub fn add_entity(&mut self, name: &str, kind: &str) -> Result<MemberId, CoreError> {
        let name = validate_member_name("Entity", name)?;
        let id = IdAllocator::with_existing(
            ENTITY_ID_PREFIX,
            self.entities.iter().map(|e| e.id.as_str()),
        )
        .allocate();
        self.entities.push(Entity {
            id: id.clone(),
            name,
            kind: kind.trim().to_string(),
        });
        Ok(id)
    }

    pub fn rename_entity(&mut self, id: &str, name: &str) -> Result<(), CoreError> {
        let name = validate_member_name("Entity", name)?;
        self.entity_mut(id)?.name = name;
        Ok(())
    }

    pub fn set_entity_type(&mut self, id: &str, kind: &str) -> Result<(), CoreError> {
        self.entity_mut(id)?.kind = kind.trim().to_string();
        Ok(())
    }

    /// Remove an entity and strip it from every event that involved it.
    pub fn remove_entity(&mut self, id: &str) -> Result<Entity, CoreError> {
        let idx = self
            .entities
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| unknown("entity", id))?;
        let removed = self.entities.remove(idx);
        for event in &mut self.events {
            event.entity_ids.retain(|eid| eid != id);
        }
        Ok(removed)
    }

    fn entity_mut(&mut self, id: &str) -> Result<&mut Entity, CoreError> {
        self.entities
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| unknown("entity", id))
    }

    // -- locations --

    pub fn add_location(&mut self, name: &str) -> Result<MemberId, CoreError> {
        let name = validate_member_name("Location", name)?;
        let id = IdAllocator::with_existing(
            LOCATION_ID_PREFIX,
            self.locations.iter().map(|l| l.id.as_str()),
        )
        .allocate();
        self.locations.push(Location {
            id: id.clone(),
            name,
        });
        Ok(id)
    }

    pub fn rename_location(&mut self, id: &str, name: &str) -> Result<(), CoreError> {
        let name = validate_member_name("Location", name)?;
        self.locations
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| unknown("location", id))?
            .name = name;
        Ok(())
    }

    /// Remove a location and clear it from every event that referenced it.
    pub fn remove_location(&mut self, id: &str) -> Result<Location, CoreError> {
        let idx = self
            .locations
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| unknown("location", id))?;
        let removed = self.locations.remove(idx);
        for event in &mut self.events {
            if event.location_id.as_deref() == Some(id) {
                event.location_id = None;
            }
        }
        Ok(removed)
    }

    // -- events --

    /// Append an event. All references in the draft must resolve.
    pub fn add_event(&mut self, draft: EventDraft) -> Result<MemberId, CoreError> {
        let draft = self.check_draft(draft)?;
        let id = IdAllocator::with_existing(
            EVENT_ID_PREFIX,
            self.events.iter().map(|e| e.id.as_str()),
        )
        .allocate();
        self.events.push(Event {
            id: id.clone(),
            what: draft.what,
            when: draft.when,
            why: draft.why,
            location_id: draft.location_id,
            entity_ids: draft.entity_ids,
        });
        Ok(id)
    }

    pub fn update_event(&mut self, id: &str, draft: EventDraft) -> Result<(), CoreError> {
        let draft = self.check_draft(draft)?;
        let event = self
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| unknown("event", id))?;
        event.what = draft.what;
        event.when = draft.when;
        event.why = draft.why;
        event.location_id = draft.location_id;
        event.entity_ids = draft.entity_ids;
        Ok(())
    }

    pub fn remove_event(&mut self, id: &str) -> Result<Event, CoreError> {
        let idx = self
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| unknown("event", id))?;
        Ok(self.events.remove(idx))
    }

    /// Resolve references in a draft, collapsing duplicate entity ids and
    /// treating an empty location id as "no location".
    fn check_draft(&self, mut draft: EventDraft) -> Result<EventDraft, CoreError> {
        if let Some(loc) = draft.location_id.take() {
            if !loc.is_empty() {
                if self.location_by_id(&loc).is_none() {
                    return Err(unknown("location", &loc));
                }
                draft.location_id = Some(loc);
            }
        }

        let mut seen = HashSet::new();
        let mut entity_ids = Vec::with_capacity(draft.entity_ids.len());
        for eid in draft.entity_ids {
            if self.entity_by_id(&eid).is_none() {
                return Err(unknown("entity", &eid));
            }
            if seen.insert(eid.clone()) {
                entity_ids.push(eid);
            }
        }
        draft.entity_ids = entity_ids;
        Ok(draft)
    }

    // -- whole-document checks --

    /// Check structural invariants: unique non-empty ids per collection,
    /// non-empty names, and resolvable event references.
    pub fn validate(&self) -> Result<(), CoreError> {
        check_unique_ids("entity", self.entities.iter().map(|e| &e.id))?;
        check_unique_ids("location", self.locations.iter().map(|l| &l.id))?;
        check_unique_ids("event", self.events.iter().map(|e| &e.id))?;

        for entity in &self.entities {
            validate_member_name("Entity", &entity.name)?;
        }
        for location in &self.locations {
            validate_member_name("Location", &location.name)?;
        }

        for event in &self.events {
            if let Some(loc) = &event.location_id {
                if self.location_by_id(loc).is_none() {
                    return Err(CoreError::Validation(format!(
                        "Event {} references unknown location {loc}",
                        event.id
                    )));
                }
            }
            for eid in &event.entity_ids {
                if self.entity_by_id(eid).is_none() {
                    return Err(CoreError::Validation(format!(
                        "Event {} references unknown entity {eid}",
                        event.id
                    )));
                }
            }
        }
        Ok(())
    }
}

fn unknown(kind: &'static str, id: &str) -> CoreError {
    CoreError::UnknownMember {
        kind,
        id: id.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
