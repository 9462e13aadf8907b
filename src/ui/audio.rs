//! Audio control: names the recording and hands it to the system player

use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui;

/// Audio control for one record
pub struct AudioControl;

impl AudioControl {
    /// Show controls for a stored file and/or a link; nothing when neither is set
    ///
    /// `file` must already be resolved against the store directory.
    pub fn show(ui: &mut egui::Ui, file: Option<&Path>, url: Option<&str>) -> Result<()> {
        let mut result = Ok(());

        if let Some(path) = file {
            ui.horizontal(|ui| {
                let name = path
                    .file_name()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_default();
                ui.label(format!("\u{1F3B5} {name}"));

                if !path.exists() {
                    ui.weak("(file missing)");
                } else if ui.button("\u{25B6} Play").clicked() {
                    tracing::info!("Playing {}", path.display());
                    result = open::that(path)
                        .with_context(|| format!("Could not play {}", path.display()));
                }
            });
        }

        if let Some(url) = url {
            ui.horizontal(|ui| {
                ui.label("\u{1F517}");
                if ui.link(url).on_hover_text("Open audio link").clicked() {
                    result = open::that(url).with_context(|| format!("Could not open {url}"));
                }
            });
        }

        result
    }
}
