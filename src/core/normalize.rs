//! Load-time normalization of the stored JSON into a typed [`Document`]
//!
//! The data file is plain JSON that may have been edited by hand or written
//! by an older release. Instead of rejecting it, every collection is read
//! leniently: a collection or tawaf slot of the wrong shape is reset to its
//! empty default, records that are not objects are dropped and missing text
//! fields become empty strings. Each such fix is reported as a [`Repair`].

use std::fmt;
use std::path::PathBuf;

use serde_json::{Map, Value};

use super::document::{
    CollectionId, Document, DuaRecord, MaqamRecord, TawafRecord, TawafRounds, TAWAF_ROUNDS,
};

/// One fix applied while normalizing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repair {
    /// Where the problem was found, e.g. `tawaf[3]`
    pub location: String,
    pub problem: String,
}

impl Repair {
    fn new(location: impl Into<String>, problem: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            problem: problem.into(),
        }
    }
}

impl fmt::Display for Repair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.problem)
    }
}

/// Result of normalizing a stored value
#[derive(Debug, Clone)]
pub struct Normalized {
    pub document: Document,
    pub repairs: Vec<Repair>,
}

/// Build a well-typed document from an untyped JSON value
pub fn normalize(value: Value) -> Normalized {
    let mut repairs = Vec::new();

    let mut root = match value {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            repairs.push(Repair::new(
                "document",
                format!("expected an object, found {}", kind(&other)),
            ));
            Map::new()
        }
    };

    let mut document = Document::default();
    for id in CollectionId::ALL {
        let Some(value) = take_collection(&mut root, id) else {
            continue;
        };
        match id {
            CollectionId::Tawaf => document.tawaf = tawaf_rounds(value, &mut repairs),
            CollectionId::Maqam => {
                document.maqam = records(id, value, &mut repairs, maqam_record);
            }
            CollectionId::Todo => document.todo = todo_items(value, &mut repairs),
            dua => {
                let list = records(dua, value, &mut repairs, dua_record);
                if let Some(target) = document.duas_mut(dua) {
                    *target = list;
                }
            }
        }
    }

    Normalized { document, repairs }
}

/// Remove a collection from the root, preferring the current key
fn take_collection(root: &mut Map<String, Value>, id: CollectionId) -> Option<Value> {
    let current = root.remove(id.key());
    let legacy = root.remove(id.legacy_key());
    current.or(legacy)
}

fn records<T>(
    id: CollectionId,
    value: Value,
    repairs: &mut Vec<Repair>,
    parse: fn(&Map<String, Value>, &str, &mut Vec<Repair>) -> T,
) -> Vec<T> {
    let Value::Array(items) = value else {
        repairs.push(Repair::new(
            id.key(),
            format!("expected a list, found {}; reset to empty", kind(&value)),
        ));
        return Vec::new();
    };

    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        let location = format!("{}[{}]", id.key(), i + 1);
        match item {
            Value::Object(map) => out.push(parse(&map, &location, repairs)),
            other => repairs.push(Repair::new(
                location,
                format!("expected a record, found {}; dropped", kind(&other)),
            )),
        }
    }
    out
}

fn dua_record(map: &Map<String, Value>, location: &str, repairs: &mut Vec<Repair>) -> DuaRecord {
    DuaRecord {
        arabic: text(map, &["arabic"], location, repairs),
        english: text(map, &["english"], location, repairs),
        audio_file: audio_file(map),
    }
}

fn maqam_record(
    map: &Map<String, Value>,
    location: &str,
    repairs: &mut Vec<Repair>,
) -> MaqamRecord {
    MaqamRecord {
        intentions: text(map, &["intentions"], location, repairs),
        audio_file: audio_file(map),
    }
}

fn tawaf_record(
    map: &Map<String, Value>,
    location: &str,
    repairs: &mut Vec<Repair>,
) -> TawafRecord {
    TawafRecord {
        arabic: text(map, &["arabic"], location, repairs),
        english: text(map, &["english"], location, repairs),
        audio_url: optional_text(map, &["audioUrl", "audio_url"]),
        audio_file: audio_file(map),
    }
}

fn tawaf_rounds(value: Value, repairs: &mut Vec<Repair>) -> TawafRounds {
    let Value::Array(items) = value else {
        repairs.push(Repair::new(
            "tawaf",
            format!("expected {TAWAF_ROUNDS} rounds, found {}; reset", kind(&value)),
        ));
        return TawafRounds::default();
    };

    if items.len() != TAWAF_ROUNDS {
        repairs.push(Repair::new(
            "tawaf",
            format!("expected {TAWAF_ROUNDS} rounds, found {}", items.len()),
        ));
    }

    let mut slots: [Option<TawafRecord>; TAWAF_ROUNDS] = Default::default();
    for (i, item) in items.into_iter().take(TAWAF_ROUNDS).enumerate() {
        slots[i] = tawaf_slot(item, &format!("tawaf[{}]", i + 1), repairs);
    }
    TawafRounds::from(slots)
}

fn tawaf_slot(value: Value, location: &str, repairs: &mut Vec<Repair>) -> Option<TawafRecord> {
    match value {
        Value::Null => None,
        Value::Object(map) if map.is_empty() => None,
        Value::Object(map) => Some(tawaf_record(&map, location, repairs)),
        // Older files kept a list of duas per round; the newest one wins.
        Value::Array(entries) => {
            let total = entries.len();
            let latest = entries.into_iter().rev().find_map(|entry| match entry {
                Value::Object(map) if !map.is_empty() => Some(map),
                _ => None,
            });
            if total > 1 {
                repairs.push(Repair::new(
                    location,
                    format!("round held {total} entries; kept the most recent"),
                ));
            }
            latest.map(|map| tawaf_record(&map, location, repairs))
        }
        other => {
            repairs.push(Repair::new(
                location,
                format!("expected a dua, found {}; cleared", kind(&other)),
            ));
            None
        }
    }
}

fn todo_items(value: Value, repairs: &mut Vec<Repair>) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => {
            repairs.push(Repair::new(
                "todo",
                format!("expected a list, found {}; reset to empty", kind(&other)),
            ));
            Vec::new()
        }
    }
}

/// Required text field; absent is fine, a non-string value is replaced
fn text(
    map: &Map<String, Value>,
    keys: &[&str],
    location: &str,
    repairs: &mut Vec<Repair>,
) -> String {
    match keys.iter().find_map(|key| map.get(*key)) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            repairs.push(Repair::new(
                location,
                format!("field `{}` is {}; cleared", keys[0], kind(other)),
            ));
            String::new()
        }
    }
}

fn optional_text(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| map.get(*key))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn audio_file(map: &Map<String, Value>) -> Option<PathBuf> {
    optional_text(map, &["audioFile", "audio_file"]).map(PathBuf::from)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
