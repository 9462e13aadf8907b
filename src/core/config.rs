//! Application configuration management

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::document::CollectionId;

/// File name of the content document inside the data directory
pub const DOCUMENT_FILE: &str = "umrah_data.json";

/// Sections reachable from the navigation menu, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    #[default]
    Travel,
    Masjid,
    Tawaf,
    Maqam,
    Zamzam,
    SafaMarwah,
    Leaving,
    Todo,
    Donate,
}

impl Section {
    pub const ALL: [Section; 9] = [
        Section::Travel,
        Section::Masjid,
        Section::Tawaf,
        Section::Maqam,
        Section::Zamzam,
        Section::SafaMarwah,
        Section::Leaving,
        Section::Todo,
        Section::Donate,
    ];

    /// Menu label
    pub fn title(self) -> &'static str {
        match self {
            Self::Travel => "Travel to Mecca",
            Self::Masjid => "Masjid Al Haram",
            Self::Tawaf => "Tawaf",
            Self::Maqam => "Pray 2 Rak’ahs at Maqam-e-Ibrahim",
            Self::Zamzam => "Du’a for Drinking ZamZam",
            Self::SafaMarwah => "Safa and Marwah",
            Self::Leaving => "Leaving Al Haram",
            Self::Todo => "ToDo: Trim or Shave Head",
            Self::Donate => "Donate",
        }
    }

    /// Collection edited on this page, if any
    pub fn collection(self) -> Option<CollectionId> {
        match self {
            Self::Travel => Some(CollectionId::Travel),
            Self::Masjid => Some(CollectionId::Masjid),
            Self::Tawaf => Some(CollectionId::Tawaf),
            Self::Maqam => Some(CollectionId::Maqam),
            Self::Zamzam => Some(CollectionId::Zamzam),
            Self::SafaMarwah => Some(CollectionId::SafaMarwah),
            Self::Leaving => Some(CollectionId::Leaving),
            Self::Todo => Some(CollectionId::Todo),
            Self::Donate => None,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the document and its audio; platform data dir if unset
    pub data_dir: Option<PathBuf>,
    /// Section shown when the app was last closed
    pub last_section: Section,
    /// UI settings
    pub ui: UiConfig,
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// TTF/OTF font with Arabic glyphs, added as a fallback to the default fonts
    pub arabic_font: Option<PathBuf>,
    /// Sidebar width
    pub sidebar_width: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            arabic_font: None,
            sidebar_width: 260.0,
        }
    }
}

impl AppConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "umrah-companion", "UmrahCompanion")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Directory the content document lives in
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            Self::project_dirs()
                .map(|dirs| dirs.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("."))
        })
    }

    /// Path of the content document
    pub fn document_path(&self) -> PathBuf {
        self.data_dir().join(DOCUMENT_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_path_uses_data_dir_override() {
        let config = AppConfig {
            data_dir: Some(PathBuf::from("/srv/umrah")),
            ..AppConfig::default()
        };
        assert_eq!(config.document_path(), PathBuf::from("/srv/umrah/umrah_data.json"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"last_section": "tawaf"}"#).unwrap();
        assert_eq!(config.last_section, Section::Tawaf);
        assert!(config.data_dir.is_none());
        assert_eq!(config.ui.sidebar_width, 260.0);
    }

    #[test]
    fn test_menu_order() {
        assert_eq!(Section::ALL.first(), Some(&Section::Travel));
        assert_eq!(Section::ALL.last(), Some(&Section::Donate));
        assert_eq!(Section::Maqam.title(), "Pray 2 Rak’ahs at Maqam-e-Ibrahim");
    }
}
