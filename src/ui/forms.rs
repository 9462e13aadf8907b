//! Form state for content submissions

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::document::{CollectionId, DuaRecord, MaqamRecord, TawafRecord};

/// An MP3 chosen from disk, read into memory until the form is saved
#[derive(Debug, Clone)]
pub struct PickedAudio {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl PickedAudio {
    /// Ask the user for an MP3 file; `Ok(None)` when the dialog is cancelled
    pub fn pick() -> Result<Option<Self>> {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("MP3 audio", &["mp3"])
            .pick_file()
        else {
            return Ok(None);
        };

        let bytes = std::fs::read(&path)
            .with_context(|| format!("Failed to read audio: {}", path.display()))?;
        tracing::info!("Picked audio {} ({} bytes)", path.display(), bytes.len());
        Ok(Some(Self { path, bytes }))
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Arabic/English dua form
#[derive(Debug, Clone, Default)]
pub struct DuaForm {
    pub arabic: String,
    pub english: String,
    pub audio: Option<PickedAudio>,
}

impl DuaForm {
    pub fn record(&self) -> DuaRecord {
        DuaRecord::new(self.arabic.trim(), self.english.trim())
    }
}

/// Maqam-e-Ibrahim intentions form
#[derive(Debug, Clone, Default)]
pub struct MaqamForm {
    pub intentions: String,
    pub audio: Option<PickedAudio>,
}

impl MaqamForm {
    pub fn record(&self) -> MaqamRecord {
        MaqamRecord::new(self.intentions.trim())
    }
}

/// Tawaf round form
#[derive(Debug, Clone)]
pub struct TawafForm {
    /// Selected round, 1 to 7
    pub round: u8,
    pub arabic: String,
    pub english: String,
    pub audio_url: String,
    pub audio: Option<PickedAudio>,
}

impl Default for TawafForm {
    fn default() -> Self {
        Self {
            round: 1,
            arabic: String::new(),
            english: String::new(),
            audio_url: String::new(),
            audio: None,
        }
    }
}

impl TawafForm {
    pub fn record(&self) -> TawafRecord {
        let url = self.audio_url.trim();
        TawafRecord {
            audio_url: (!url.is_empty()).then(|| url.to_string()),
            ..TawafRecord::new(self.arabic.trim(), self.english.trim())
        }
    }

    /// Clear the fields but stay on the selected round
    pub fn reset(&mut self) {
        *self = Self {
            round: self.round,
            ..Self::default()
        };
    }
}

/// Login form
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// All form state of the window
#[derive(Debug, Default)]
pub struct Forms {
    pub duas: HashMap<CollectionId, DuaForm>,
    pub maqam: MaqamForm,
    pub tawaf: TawafForm,
    pub login: LoginForm,
}

impl Forms {
    pub fn dua_mut(&mut self, collection: CollectionId) -> &mut DuaForm {
        self.duas.entry(collection).or_default()
    }
}
