//! Import and reconciliation of scenario documents.
//!
//! Two shapes of scenario JSON exist in the wild:
//!
//! - **v1 (name-keyed)**: entities and locations carry only names; events
//!   reference people through `who: [name, ...]` and their place through
//!   `where: name`.
//! - **v2 (id-keyed)**: every member has an `id`; events reference
//!   `entity_ids` and `location_id`.
//!
//! [`normalize`] accepts either shape (or a mix of both inside one
//! document) and produces a canonical [`ScenarioContent`]. Anything that
//! cannot be reconciled is dropped and reported in
//! [`Normalized::warnings`] rather than failing the whole import.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::scenario::{
    Entity, Event, IdAllocator, Location, ScenarioContent, CONTENT_VERSION, ENTITY_ID_PREFIX,
    EVENT_ID_PREFIX, LOCATION_ID_PREFIX, MAX_MEMBER_NAME_LENGTH,
};
use crate::types::MemberId;

/// Error message for documents that are not scenario files at all.
pub const INVALID_FORMAT_MESSAGE: &str = "Invalid scenario file format.";

/// Version reported for name-keyed input.
pub const LEGACY_VERSION: u32 = 1;

/// Result of normalizing a scenario document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Normalized {
    pub content: ScenarioContent,
    /// The shape the input was written in (`1` or `2`).
    pub source_version: u32,
    /// Human-readable notes about members or references that were dropped
    /// or reassigned.
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Reconcile a scenario document in either historical shape into the
/// canonical id-keyed shape.
///
/// The document must be an object with `entities` and `events` keys;
/// `locations` is optional. A `null` collection is treated as empty.
pub fn normalize(doc: &Value) -> Result<Normalized, CoreError> {
    let obj = doc
        .as_object()
        .filter(|o| o.contains_key("entities") && o.contains_key("events"))
        .ok_or_else(invalid_format)?;

    let raw_entities = collection(obj, "entities")?;
    let raw_locations = collection(obj, "locations")?;
    let raw_events = collection(obj, "events")?;

    let mut warnings = Vec::new();

    let entities = reconcile_members(
        "entity",
        ENTITY_ID_PREFIX,
        &raw_entities,
        &mut warnings,
    )
    .into_iter()
    .map(|m| Entity {
        id: m.id,
        name: m.name,
        kind: text(m.raw, "type").trim().to_string(),
    })
    .collect::<Vec<_>>();

    let locations = reconcile_members(
        "location",
        LOCATION_ID_PREFIX,
        &raw_locations,
        &mut warnings,
    )
    .into_iter()
    .map(|m| Location {
        id: m.id,
        name: m.name,
    })
    .collect::<Vec<_>>();

    let entity_index = RefIndex::new(entities.iter().map(|e| (&e.id, &e.name)));
    let location_index = RefIndex::new(locations.iter().map(|l| (&l.id, &l.name)));

    let events = reconcile_events(&raw_events, &entity_index, &location_index, &mut warnings);

    let source_version = detect_version(obj, &raw_entities, &raw_locations, &raw_events);

    let content = ScenarioContent {
        version: CONTENT_VERSION,
        entities,
        locations,
        events,
    };
    content.validate()?;

    Ok(Normalized {
        content,
        source_version,
        warnings,
    })
}

fn invalid_format() -> CoreError {
    CoreError::Validation(INVALID_FORMAT_MESSAGE.to_string())
}

/// Fetch an array-valued field as a list of objects. Missing or `null`
/// yields an empty list; any other non-array value is a format error.
fn collection<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<Vec<&'a Value>, CoreError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.iter().collect()),
        Some(_) => Err(invalid_format()),
    }
}

/// Read a scalar field as text. Numbers and booleans are stringified;
/// missing, `null`, and compound values become an empty string.
fn text(raw: &Value, key: &str) -> String {
    match raw.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Provided id of a member, if it is a non-empty string.
fn provided_id(raw: &Value) -> Option<&str> {
    raw.get("id")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Named members (entities, locations)
// ---------------------------------------------------------------------------

struct Member<'a> {
    id: MemberId,
    name: String,
    raw: &'a Value,
}

/// Assign ids to named members.
///
/// Members that are dropped never claim an id. Provided ids of the kept
/// members are claimed up front so generated ids never steal an id that a
/// later member already carries. When an id repeats, the first holder
/// keeps it and the later member gets a fresh one.
fn reconcile_members<'a>(
    kind: &str,
    prefix: &'static str,
    raw: &[&'a Value],
    warnings: &mut Vec<String>,
) -> Vec<Member<'a>> {
    let mut kept: Vec<(usize, String, &'a Value)> = Vec::with_capacity(raw.len());
    for (idx, item) in raw.iter().copied().enumerate() {
        if !item.is_object() {
            warnings.push(format!("Dropped {kind} #{}: not an object", idx + 1));
            continue;
        }
        let name = text(item, "name").trim().to_string();
        if name.is_empty() {
            warnings.push(format!("Dropped {kind} #{}: missing name", idx + 1));
            continue;
        }
        if name.chars().count() > MAX_MEMBER_NAME_LENGTH {
            warnings.push(format!("Dropped {kind} #{}: name too long", idx + 1));
            continue;
        }
        kept.push((idx, name, item));
    }

    let mut first_holder: HashMap<&str, usize> = HashMap::new();
    for &(idx, _, item) in &kept {
        if let Some(id) = provided_id(item) {
            first_holder.entry(id).or_insert(idx);
        }
    }

    let mut alloc = IdAllocator::with_existing(prefix, first_holder.keys().copied());
    let mut members = Vec::with_capacity(kept.len());

    for (idx, name, item) in kept {
        let id = match provided_id(item) {
            Some(id) if first_holder.get(id) == Some(&idx) => id.to_string(),
            Some(id) => {
                let fresh = alloc.allocate();
                warnings.push(format!(
                    "Duplicate {kind} id '{id}' on '{name}' reassigned to '{fresh}'"
                ));
                fresh
            }
            None => alloc.allocate(),
        };

        members.push(Member {
            id,
            name,
            raw: item,
        });
    }
    members
}

/// Lookup table resolving a reference first by id, then by name.
struct RefIndex {
    ids: HashSet<MemberId>,
    names: HashMap<String, MemberId>,
}

impl RefIndex {
    fn new<'a>(members: impl Iterator<Item = (&'a MemberId, &'a String)>) -> Self {
        let mut ids = HashSet::new();
        let mut names = HashMap::new();
        for (id, name) in members {
            ids.insert(id.clone());
            names.entry(name.clone()).or_insert_with(|| id.clone());
        }
        Self { ids, names }
    }

    fn resolve(&self, reference: &str) -> Option<MemberId> {
        if self.ids.contains(reference) {
            return Some(reference.to_string());
        }
        self.names.get(reference).cloned()
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

fn reconcile_events(
    raw: &[&Value],
    entities: &RefIndex,
    locations: &RefIndex,
    warnings: &mut Vec<String>,
) -> Vec<Event> {
    let mut first_holder: HashMap<&str, usize> = HashMap::new();
    for (idx, item) in raw.iter().copied().enumerate() {
        if let Some(id) = provided_id(item) {
            first_holder.entry(id).or_insert(idx);
        }
    }
    let mut alloc = IdAllocator::with_existing(EVENT_ID_PREFIX, first_holder.keys().copied());

    let mut events = Vec::with_capacity(raw.len());
    for (idx, item) in raw.iter().copied().enumerate() {
        let label = idx + 1;
        if !item.is_object() {
            warnings.push(format!("Dropped event #{label}: not an object"));
            continue;
        }

        let id = match provided_id(item) {
            Some(id) if first_holder.get(id) == Some(&idx) => id.to_string(),
            Some(id) => {
                let fresh = alloc.allocate();
                warnings.push(format!(
                    "Duplicate event id '{id}' on event #{label} reassigned to '{fresh}'"
                ));
                fresh
            }
            None => alloc.allocate(),
        };

        let mut seen = HashSet::new();
        let mut entity_ids = Vec::new();
        for reference in people_refs(item) {
            match entities.resolve(&reference) {
                Some(eid) => {
                    if seen.insert(eid.clone()) {
                        entity_ids.push(eid);
                    }
                }
                None => warnings.push(format!(
                    "Event #{label}: dropped unknown entity reference '{reference}'"
                )),
            }
        }

        let location_id = match place_ref(item) {
            Some(reference) => {
                let resolved = locations.resolve(&reference);
                if resolved.is_none() {
                    warnings.push(format!(
                        "Event #{label}: dropped unknown location reference '{reference}'"
                    ));
                }
                resolved
            }
            None => None,
        };

        events.push(Event {
            id,
            what: text(item, "what"),
            when: text(item, "when"),
            why: text(item, "why"),
            location_id,
            entity_ids,
        });
    }
    events
}

/// All non-empty people references of an event: `entity_ids` first,
/// then legacy `who`.
fn people_refs(raw: &Value) -> Vec<String> {
    ["entity_ids", "who"]
        .iter()
        .filter_map(|key| raw.get(*key).and_then(Value::as_array))
        .flatten()
        .filter_map(|v| match v {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect()
}

/// The place reference of an event: `location_id` if set, else legacy
/// `where`. Empty strings mean "no location".
fn place_ref(raw: &Value) -> Option<String> {
    ["location_id", "where"]
        .iter()
        .map(|key| text(raw, key).trim().to_string())
        .find(|s| !s.is_empty())
}

/// Decide which shape a document was written in.
///
/// An explicit `version: 2` wins. Otherwise the document is v2 only if no
/// member lacks an id and no event uses `who`/`where`.
fn detect_version(
    obj: &Map<String, Value>,
    entities: &[&Value],
    locations: &[&Value],
    events: &[&Value],
) -> u32 {
    if obj.get("version").and_then(Value::as_u64) == Some(u64::from(CONTENT_VERSION)) {
        return CONTENT_VERSION;
    }
    let missing_ids = entities
        .iter()
        .chain(locations)
        .chain(events)
        .any(|m| provided_id(m).is_none());
    let legacy_refs = events
        .iter()
        .any(|e| e.get("who").is_some() || e.get("where").is_some());
    if missing_ids || legacy_refs {
        LEGACY_VERSION
    } else {
        CONTENT_VERSION
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
