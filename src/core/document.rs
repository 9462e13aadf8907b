//! The persisted document: every content collection of the app

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Number of circuits in a tawaf, one slot each
pub const TAWAF_ROUNDS: usize = 7;

/// Identifies one collection of the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CollectionId {
    Travel,
    Masjid,
    Tawaf,
    SafaMarwah,
    Zamzam,
    Maqam,
    Leaving,
    Todo,
}

impl CollectionId {
    /// All collections in document order
    pub const ALL: [CollectionId; 8] = [
        CollectionId::Travel,
        CollectionId::Masjid,
        CollectionId::Tawaf,
        CollectionId::SafaMarwah,
        CollectionId::Zamzam,
        CollectionId::Maqam,
        CollectionId::Leaving,
        CollectionId::Todo,
    ];

    /// Collections holding plain Arabic/English duas
    pub const DUAS: [CollectionId; 5] = [
        CollectionId::Travel,
        CollectionId::Masjid,
        CollectionId::SafaMarwah,
        CollectionId::Zamzam,
        CollectionId::Leaving,
    ];

    /// Key used in the persisted document
    pub fn key(self) -> &'static str {
        match self {
            Self::Travel => "travel",
            Self::Masjid => "masjid",
            Self::Tawaf => "tawaf",
            Self::SafaMarwah => "safaMarwah",
            Self::Zamzam => "zamzam",
            Self::Maqam => "maqam",
            Self::Leaving => "leaving",
            Self::Todo => "todo",
        }
    }

    /// Key written by the first release of the app
    pub fn legacy_key(self) -> &'static str {
        match self {
            Self::Travel => "travel_list",
            Self::Masjid => "masjid_duas",
            Self::Tawaf => "tawaf_duas",
            Self::SafaMarwah => "safa_marwah_duas",
            Self::Zamzam => "zamzam_duas",
            Self::Maqam => "maqam_duas",
            Self::Leaving => "leaving_duas",
            Self::Todo => "todo_list",
        }
    }

    /// Prefix of audio file names stored for this collection
    pub fn audio_prefix(self) -> &'static str {
        match self {
            Self::SafaMarwah => "safa_marwah",
            other => other.key(),
        }
    }

    pub fn is_dua(self) -> bool {
        Self::DUAS.contains(&self)
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A prayer in Arabic with its English translation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuaRecord {
    pub arabic: String,
    pub english: String,
    pub audio_file: Option<PathBuf>,
}

impl DuaRecord {
    pub fn new(arabic: impl Into<String>, english: impl Into<String>) -> Self {
        Self {
            arabic: arabic.into(),
            english: english.into(),
            audio_file: None,
        }
    }
}

/// Intentions noted for the two rak'ahs at Maqam-e-Ibrahim
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaqamRecord {
    pub intentions: String,
    pub audio_file: Option<PathBuf>,
}

impl MaqamRecord {
    pub fn new(intentions: impl Into<String>) -> Self {
        Self {
            intentions: intentions.into(),
            audio_file: None,
        }
    }
}

/// The dua recited during one tawaf round
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TawafRecord {
    pub arabic: String,
    pub english: String,
    /// Link to a recitation hosted elsewhere
    pub audio_url: Option<String>,
    pub audio_file: Option<PathBuf>,
}

impl TawafRecord {
    pub fn new(arabic: impl Into<String>, english: impl Into<String>) -> Self {
        Self {
            arabic: arabic.into(),
            english: english.into(),
            audio_url: None,
            audio_file: None,
        }
    }
}

/// Exactly seven slots, one per round, each empty or holding one dua
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TawafRounds([Option<TawafRecord>; TAWAF_ROUNDS]);

impl TawafRounds {
    /// Slot for a 1-based round, `None` when the round is out of range
    pub fn round(&self, round: u8) -> Option<&Option<TawafRecord>> {
        Self::index(round).map(|i| &self.0[i])
    }

    pub(crate) fn slot_mut(&mut self, round: u8) -> Option<&mut Option<TawafRecord>> {
        Self::index(round).map(move |i| &mut self.0[i])
    }

    /// Iterate `(round, slot)` pairs with 1-based rounds
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Option<TawafRecord>)> {
        self.0.iter().enumerate().map(|(i, slot)| (i as u8 + 1, slot))
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn filled(&self) -> usize {
        self.0.iter().filter(|slot| slot.is_some()).count()
    }

    fn index(round: u8) -> Option<usize> {
        let round = usize::from(round);
        (1..=TAWAF_ROUNDS).contains(&round).then(|| round - 1)
    }
}

impl From<[Option<TawafRecord>; TAWAF_ROUNDS]> for TawafRounds {
    fn from(slots: [Option<TawafRecord>; TAWAF_ROUNDS]) -> Self {
        Self(slots)
    }
}

/// Root of the persisted data
///
/// Loading always goes through [`super::normalize::normalize`], which turns
/// whatever is on disk into this shape, so only `Serialize` is derived.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub travel: Vec<DuaRecord>,
    pub masjid: Vec<DuaRecord>,
    pub tawaf: TawafRounds,
    pub safa_marwah: Vec<DuaRecord>,
    pub zamzam: Vec<DuaRecord>,
    pub maqam: Vec<MaqamRecord>,
    pub leaving: Vec<DuaRecord>,
    /// Carried through untouched; nothing edits it yet
    pub todo: Vec<serde_json::Value>,
}

impl Document {
    /// Dua list for one of the [`CollectionId::DUAS`] collections
    pub fn duas(&self, collection: CollectionId) -> Option<&Vec<DuaRecord>> {
        match collection {
            CollectionId::Travel => Some(&self.travel),
            CollectionId::Masjid => Some(&self.masjid),
            CollectionId::SafaMarwah => Some(&self.safa_marwah),
            CollectionId::Zamzam => Some(&self.zamzam),
            CollectionId::Leaving => Some(&self.leaving),
            _ => None,
        }
    }

    pub(crate) fn duas_mut(&mut self, collection: CollectionId) -> Option<&mut Vec<DuaRecord>> {
        match collection {
            CollectionId::Travel => Some(&mut self.travel),
            CollectionId::Masjid => Some(&mut self.masjid),
            CollectionId::SafaMarwah => Some(&mut self.safa_marwah),
            CollectionId::Zamzam => Some(&mut self.zamzam),
            CollectionId::Leaving => Some(&mut self.leaving),
            _ => None,
        }
    }

    /// Number of records held by a collection (filled slots for tawaf)
    pub fn len_of(&self, collection: CollectionId) -> usize {
        match collection {
            CollectionId::Tawaf => self.tawaf.filled(),
            CollectionId::Maqam => self.maqam.len(),
            CollectionId::Todo => self.todo.len(),
            dua => self.duas(dua).map_or(0, Vec::len),
        }
    }
}

/// A record submitted for one collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Dua(DuaRecord),
    Maqam(MaqamRecord),
    /// Written to the slot of the given 1-based round, replacing it
    Tawaf { round: u8, record: TawafRecord },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_document_has_seven_empty_rounds() {
        let doc = Document::default();
        assert_eq!(doc.tawaf.len(), TAWAF_ROUNDS);
        assert_eq!(doc.tawaf.filled(), 0);
        for id in CollectionId::ALL {
            assert_eq!(doc.len_of(id), 0);
        }
    }

    #[test]
    fn test_round_bounds() {
        let rounds = TawafRounds::default();
        assert!(rounds.round(0).is_none());
        assert!(rounds.round(1).is_some());
        assert!(rounds.round(7).is_some());
        assert!(rounds.round(8).is_none());
    }

    #[test]
    fn test_serializes_camel_case_keys() {
        let mut doc = Document::default();
        doc.safa_marwah.push(DuaRecord::new("a", "b"));
        let value = serde_json::to_value(&doc).unwrap();

        assert!(value.get("safaMarwah").is_some());
        assert_eq!(value["safaMarwah"][0]["audioFile"], serde_json::Value::Null);
        assert_eq!(value["tawaf"].as_array().unwrap().len(), TAWAF_ROUNDS);
    }

    #[test]
    fn test_only_dua_collections_expose_duas() {
        let doc = Document::default();
        for id in CollectionId::ALL {
            assert_eq!(doc.duas(id).is_some(), id.is_dua());
        }
    }
}
