//! File-backed content store
//!
//! The whole [`Document`] lives in memory and is written back to a single
//! JSON file after every successful mutation. Audio uploads are stored as
//! separate files in an `audio/` directory next to the document.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::document::{CollectionId, Document, DuaRecord, MaqamRecord, Record, TawafRecord, TawafRounds};
use super::error::{StoreError, StoreResult};
use super::normalize::normalize;

/// Directory, relative to the document, holding uploaded audio
pub const AUDIO_DIR: &str = "audio";

/// Content store bound to one document file
#[derive(Debug)]
pub struct ContentStore {
    /// Path of the JSON document
    path: PathBuf,
    /// In-memory copy of the document
    document: Document,
}

impl ContentStore {
    /// Open the store at `path`, loading whatever is persisted there
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let document = Self::load(&path)?;
        tracing::info!(
            "Opened content store at {} ({} tawaf rounds filled)",
            path.display(),
            document.tawaf.filled()
        );
        Ok(Self { path, document })
    }

    /// Read the document persisted at `path`
    ///
    /// A missing or empty file yields the default document. A file that is
    /// not JSON at all is an error; JSON of the wrong shape is repaired.
    pub fn load(path: &Path) -> StoreResult<Document> {
        if !path.exists() {
            return Ok(Document::default());
        }

        let bytes = fs::read(path).map_err(|e| StoreError::io(path, e))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Document::default());
        }

        let value: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;

        let normalized = normalize(value);
        for repair in &normalized.repairs {
            tracing::warn!("Repaired {}: {}", path.display(), repair);
        }
        Ok(normalized.document)
    }

    /// Write the full document, replacing the previous version
    pub fn save(&self) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(&self.document)?;
        write_atomic(&self.path, &bytes)?;
        tracing::info!("Saved content store to: {}", self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Records of a dua collection, `None` for other collections
    pub fn duas(&self, collection: CollectionId) -> Option<&[DuaRecord]> {
        self.document.duas(collection).map(Vec::as_slice)
    }

    pub fn maqam(&self) -> &[MaqamRecord] {
        &self.document.maqam
    }

    pub fn tawaf(&self) -> &TawafRounds {
        &self.document.tawaf
    }

    pub fn todo(&self) -> &[serde_json::Value] {
        &self.document.todo
    }

    /// Absolute location of an audio path stored in a record
    pub fn resolve_audio(&self, stored: &Path) -> PathBuf {
        if stored.is_absolute() {
            return stored.to_path_buf();
        }
        self.base_dir().join(stored)
    }

    /// Append a record to `collection` and persist
    ///
    /// Tawaf records are routed to [`Self::set_tawaf_slot`] and replace the
    /// round they name. When `audio` is given its bytes are stored first and
    /// the record points at the new file.
    pub fn append_record(
        &mut self,
        collection: CollectionId,
        record: Record,
        audio: Option<&[u8]>,
    ) -> StoreResult<()> {
        match (collection, record) {
            (CollectionId::Todo, _) => Err(StoreError::ReadOnly(collection)),
            (CollectionId::Tawaf, Record::Tawaf { round, record }) => {
                self.set_tawaf_slot(round, record, audio)
            }
            (CollectionId::Maqam, Record::Maqam(mut record)) => {
                if let Some(bytes) = audio {
                    record.audio_file = Some(self.store_audio(collection.audio_prefix(), bytes)?);
                }
                let stored = record.audio_file.clone().filter(|_| audio.is_some());
                self.document.maqam.push(record);
                self.commit(stored.as_deref(), |doc| {
                    doc.maqam.pop();
                })
            }
            (id, Record::Dua(mut record)) if id.is_dua() => {
                if let Some(bytes) = audio {
                    record.audio_file = Some(self.store_audio(id.audio_prefix(), bytes)?);
                }
                let stored = record.audio_file.clone().filter(|_| audio.is_some());
                if let Some(list) = self.document.duas_mut(id) {
                    list.push(record);
                }
                self.commit(stored.as_deref(), |doc| {
                    if let Some(list) = doc.duas_mut(id) {
                        list.pop();
                    }
                })
            }
            (id, _) => Err(StoreError::RecordMismatch(id)),
        }
    }

    /// Replace the dua of a tawaf round (1 to 7) and persist
    ///
    /// Once the new round is saved, the audio file of the dua it replaced is
    /// removed unless the new dua still points at it.
    pub fn set_tawaf_slot(
        &mut self,
        round: u8,
        mut record: TawafRecord,
        audio: Option<&[u8]>,
    ) -> StoreResult<()> {
        if self.document.tawaf.round(round).is_none() {
            return Err(StoreError::InvalidRound(round));
        }

        if let Some(bytes) = audio {
            let prefix = format!("tawaf_round_{round}");
            record.audio_file = Some(self.store_audio(&prefix, bytes)?);
        }
        let stored = record.audio_file.clone().filter(|_| audio.is_some());
        let current = record.audio_file.clone();

        let previous = self
            .document
            .tawaf
            .slot_mut(round)
            .and_then(|slot| slot.replace(record));
        let replaced = previous
            .as_ref()
            .and_then(|old| old.audio_file.clone())
            .filter(|old| Some(old) != current.as_ref());

        self.commit(stored.as_deref(), move |doc| {
            if let Some(slot) = doc.tawaf.slot_mut(round) {
                *slot = previous;
            }
        })?;

        if let Some(old) = replaced {
            self.remove_audio(&old);
        }
        Ok(())
    }

    /// Persist the in-memory document, undoing the last change on failure
    ///
    /// `stored_audio` is the file written for this change; it is deleted
    /// again when the document cannot be saved.
    fn commit(
        &mut self,
        stored_audio: Option<&Path>,
        rollback: impl FnOnce(&mut Document),
    ) -> StoreResult<()> {
        if let Err(e) = self.save() {
            tracing::error!("Failed to save content store: {}", e);
            rollback(&mut self.document);
            if let Some(audio) = stored_audio {
                self.remove_audio(audio);
            }
            return Err(e);
        }
        Ok(())
    }

    /// Delete an audio file no record refers to any more
    fn remove_audio(&self, stored: &Path) {
        let target = self.resolve_audio(stored);
        match fs::remove_file(&target) {
            Ok(()) => tracing::info!("Removed audio: {}", target.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove audio {}: {}", target.display(), e),
        }
    }

    /// Write uploaded audio under a fresh name, returning the stored path
    fn store_audio(&self, prefix: &str, bytes: &[u8]) -> StoreResult<PathBuf> {
        let relative = Path::new(AUDIO_DIR).join(format!("{}_{}.mp3", prefix, Uuid::new_v4().simple()));
        let target = self.base_dir().join(&relative);
        write_atomic(&target, bytes)?;
        tracing::info!("Stored audio: {}", target.display());
        Ok(relative)
    }

    fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Replace `path` with `bytes` via a temporary file and rename
fn write_atomic(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let result = fs::write(&tmp_path, bytes)
        .map_err(|e| StoreError::io(&tmp_path, e))
        .and_then(|()| fs::rename(&tmp_path, path).map_err(|e| StoreError::io(path, e)));
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::TAWAF_ROUNDS;

    fn store_in(dir: &tempfile::TempDir) -> ContentStore {
        ContentStore::open(dir.path().join("umrah_data.json")).unwrap()
    }

    #[test]
    fn test_missing_file_loads_default_document() {
        let dir = tempfile::tempdir().unwrap();
        let doc = ContentStore::load(&dir.path().join("absent.json")).unwrap();

        assert_eq!(doc, Document::default());
        assert_eq!(doc.tawaf.len(), TAWAF_ROUNDS);
        for id in CollectionId::ALL {
            assert_eq!(doc.len_of(id), 0);
        }
    }

    #[test]
    fn test_empty_file_loads_default_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("umrah_data.json");
        fs::write(&path, "\n").unwrap();
        assert_eq!(ContentStore::load(&path).unwrap(), Document::default());
    }

    #[test]
    fn test_invalid_json_fails_fast_and_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("umrah_data.json");
        fs::write(&path, "{ not json").unwrap();

        let err = ContentStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_masjid_dua_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store
            .append_record(
                CollectionId::Masjid,
                Record::Dua(DuaRecord::new("دعاء", "dua text")),
                None,
            )
            .unwrap();

        let reloaded = ContentStore::load(store.path()).unwrap();
        assert_eq!(reloaded.masjid, vec![DuaRecord::new("دعاء", "dua text")]);
    }

    #[test]
    fn test_append_preserves_order_for_every_list_collection() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        for id in CollectionId::DUAS {
            for n in 0..3 {
                let record = DuaRecord::new(format!("{id} {n}"), format!("english {n}"));
                store.append_record(id, Record::Dua(record), None).unwrap();
            }
        }
        for n in 0..3 {
            let record = MaqamRecord::new(format!("intention {n}"));
            store
                .append_record(CollectionId::Maqam, Record::Maqam(record), None)
                .unwrap();
        }

        let reloaded = ContentStore::load(store.path()).unwrap();
        for id in CollectionId::DUAS {
            let arabic: Vec<_> = reloaded.duas(id).unwrap().iter().map(|d| d.arabic.clone()).collect();
            assert_eq!(arabic, vec![format!("{id} 0"), format!("{id} 1"), format!("{id} 2")]);
        }
        let intentions: Vec<_> = reloaded.maqam.iter().map(|m| m.intentions.as_str()).collect();
        assert_eq!(intentions, ["intention 0", "intention 1", "intention 2"]);
        assert_eq!(&reloaded, store.document());
    }

    #[test]
    fn test_tawaf_round_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.set_tawaf_slot(3, TawafRecord::new("a", "b"), None).unwrap();
        store.set_tawaf_slot(3, TawafRecord::new("c", "d"), None).unwrap();

        let reloaded = ContentStore::load(store.path()).unwrap();
        assert_eq!(reloaded.tawaf.filled(), 1);
        assert_eq!(reloaded.tawaf.round(3), Some(&Some(TawafRecord::new("c", "d"))));
    }

    #[test]
    fn test_tawaf_write_leaves_other_rounds_alone() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        for round in [7u8, 1, 4] {
            store
                .set_tawaf_slot(round, TawafRecord::new(round.to_string(), ""), None)
                .unwrap();
        }
        let before = store.tawaf().clone();
        store
            .append_record(
                CollectionId::Tawaf,
                Record::Tawaf {
                    round: 4,
                    record: TawafRecord::new("four", "updated"),
                },
                None,
            )
            .unwrap();

        let after = ContentStore::load(store.path()).unwrap().tawaf;
        assert_eq!(after.len(), TAWAF_ROUNDS);
        for round in 1..=7u8 {
            if round == 4 {
                assert_eq!(after.round(4).unwrap().as_ref().unwrap().arabic, "four");
            } else {
                assert_eq!(after.round(round), before.round(round));
            }
        }
    }

    #[test]
    fn test_out_of_range_round_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        for round in [0u8, 8] {
            let err = store.set_tawaf_slot(round, TawafRecord::new("x", "y"), None).unwrap_err();
            assert!(matches!(err, StoreError::InvalidRound(r) if r == round));
        }
        assert!(!store.path().exists());
    }

    #[test]
    fn test_audio_is_written_under_fresh_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        for _ in 0..2 {
            store
                .append_record(
                    CollectionId::Zamzam,
                    Record::Dua(DuaRecord::new("a", "b")),
                    Some(b"ID3 fake mp3"),
                )
                .unwrap();
        }

        let zamzam = store.duas(CollectionId::Zamzam).unwrap();
        let first = zamzam[0].audio_file.clone().unwrap();
        let second = zamzam[1].audio_file.clone().unwrap();
        assert_ne!(first, second);
        assert!(first.starts_with(AUDIO_DIR));
        assert!(first.to_string_lossy().contains("zamzam_"));
        assert_eq!(fs::read(store.resolve_audio(&first)).unwrap(), b"ID3 fake mp3");
    }

    #[test]
    fn test_tawaf_audio_names_the_round() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store
            .set_tawaf_slot(2, TawafRecord::new("a", "b"), Some(b"bytes"))
            .unwrap();
        let stored = store.tawaf().round(2).unwrap().as_ref().unwrap();
        let name = stored.audio_file.as_ref().unwrap().to_string_lossy().to_string();
        assert!(name.contains("tawaf_round_2_"));
    }

    #[test]
    fn test_mismatched_records_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        let err = store
            .append_record(CollectionId::Maqam, Record::Dua(DuaRecord::new("a", "b")), None)
            .unwrap_err();
        assert!(matches!(err, StoreError::RecordMismatch(CollectionId::Maqam)));

        let err = store
            .append_record(CollectionId::Todo, Record::Maqam(MaqamRecord::new("x")), None)
            .unwrap_err();
        assert!(matches!(err, StoreError::ReadOnly(CollectionId::Todo)));
        assert_eq!(store.document(), &Document::default());
    }

    #[test]
    fn test_save_leaves_no_temporary_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save().unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["umrah_data.json".to_string()]);
    }

    #[test]
    fn test_failed_save_rolls_back_memory() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in the document's place makes the rename fail.
        let path = dir.path().join("umrah_data.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), "x").unwrap();
        let mut store = ContentStore {
            path,
            document: Document::default(),
        };

        let result = store.append_record(
            CollectionId::Leaving,
            Record::Dua(DuaRecord::new("a", "b")),
            Some(b"mp3"),
        );
        assert!(result.is_err());
        assert!(store.duas(CollectionId::Leaving).unwrap().is_empty());

        let mut names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["audio".to_string(), "umrah_data.json".to_string()]);
        assert_eq!(fs::read_dir(dir.path().join(AUDIO_DIR)).unwrap().count(), 0);
    }

    #[test]
    fn test_failed_tawaf_save_removes_new_audio_and_keeps_old() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store
            .set_tawaf_slot(4, TawafRecord::new("a", "b"), Some(b"first"))
            .unwrap();
        let old = store.tawaf().round(4).unwrap().as_ref().unwrap().audio_file.clone().unwrap();

        fs::remove_file(store.path()).unwrap();
        fs::create_dir(store.path()).unwrap();
        fs::write(store.path().join("occupied"), "x").unwrap();

        let result = store.set_tawaf_slot(4, TawafRecord::new("c", "d"), Some(b"second"));
        assert!(result.is_err());
        assert_eq!(store.tawaf().round(4).unwrap().as_ref().unwrap().arabic, "a");
        let remaining: Vec<_> = fs::read_dir(dir.path().join(AUDIO_DIR))
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(remaining, vec![store.resolve_audio(&old)]);
    }

    #[test]
    fn test_overwritten_round_removes_replaced_audio() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store
            .set_tawaf_slot(2, TawafRecord::new("a", "b"), Some(b"first"))
            .unwrap();
        let first = store.tawaf().round(2).unwrap().as_ref().unwrap().audio_file.clone().unwrap();
        store
            .set_tawaf_slot(2, TawafRecord::new("c", "d"), Some(b"second"))
            .unwrap();
        let second = store.tawaf().round(2).unwrap().as_ref().unwrap().audio_file.clone().unwrap();

        assert!(!store.resolve_audio(&first).exists());
        assert_eq!(fs::read(store.resolve_audio(&second)).unwrap(), b"second");

        // Text-only overwrite drops the recording along with the old dua.
        store.set_tawaf_slot(2, TawafRecord::new("e", "f"), None).unwrap();
        assert!(!store.resolve_audio(&second).exists());
        assert_eq!(fs::read_dir(dir.path().join(AUDIO_DIR)).unwrap().count(), 0);
    }

    #[test]
    fn test_self_heals_and_keeps_legacy_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("umrah_data.json");
        fs::write(
            &path,
            r#"{"travel_list": [{"arabic": "t", "english": "e", "audio_file": null}],
                "tawaf_duas": {"broken": true}}"#,
        )
        .unwrap();

        let mut store = ContentStore::open(&path).unwrap();
        assert_eq!(store.duas(CollectionId::Travel).unwrap().len(), 1);
        assert_eq!(store.tawaf().len(), TAWAF_ROUNDS);

        store.set_tawaf_slot(1, TawafRecord::new("x", "y"), None).unwrap();
        let raw: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert!(raw.get("travel").is_some());
        assert!(raw.get("travel_list").is_none());
        assert_eq!(raw["tawaf"].as_array().unwrap().len(), TAWAF_ROUNDS);
    }
}
