//! Pages for the Arabic/English dua collections

use eframe::egui;

use super::audio::AudioControl;
use super::forms::PickedAudio;
use super::notice::Notice;
use crate::app::UmrahApp;
use crate::core::document::CollectionId;

/// Static text of a dua page
pub struct DuaPageText {
    pub intro: &'static str,
    pub list_heading: &'static str,
    pub arabic_prompt: &'static str,
    pub save_label: &'static str,
    pub saved: &'static str,
}

impl DuaPageText {
    pub fn for_collection(collection: CollectionId) -> Self {
        match collection {
            CollectionId::Travel => Self {
                intro: "Store and organize your travel details.",
                list_heading: "Your Travel Details:",
                arabic_prompt: "Add travel dua (in Arabic):",
                save_label: "Save Travel Detail",
                saved: "Travel detail updated successfully!",
            },
            CollectionId::Masjid => Self {
                intro: "Store and organize your duas for Masjid Al Haram.",
                list_heading: "Your Masjid Al Haram Duas:",
                arabic_prompt: "Add dua for Masjid Al Haram (in Arabic):",
                save_label: "Save Masjid Dua",
                saved: "Masjid Dua updated successfully!",
            },
            CollectionId::Zamzam => Self {
                intro: "Store and organize your duas for drinking ZamZam water.",
                list_heading: "Your ZamZam Duas:",
                arabic_prompt: "Add dua for ZamZam (in Arabic):",
                save_label: "Save ZamZam Dua",
                saved: "ZamZam Dua updated successfully!",
            },
            CollectionId::SafaMarwah => Self {
                intro: "Store and organize your duas for Safa and Marwah.",
                list_heading: "Your Safa and Marwah Duas:",
                arabic_prompt: "Add dua for Safa and Marwah (in Arabic):",
                save_label: "Save Safa and Marwah Dua",
                saved: "Safa and Marwah Dua updated successfully!",
            },
            _ => Self {
                intro: "Store and organize your duas for leaving Al Haram.",
                list_heading: "Your Leaving Al Haram Duas:",
                arabic_prompt: "Add dua for Leaving Al Haram (in Arabic):",
                save_label: "Save Leaving Dua",
                saved: "Leaving Dua updated successfully!",
            },
        }
    }
}

/// Page listing one dua collection with its entry form
pub struct DuaPanel;

impl DuaPanel {
    pub fn show(ui: &mut egui::Ui, app: &mut UmrahApp, collection: CollectionId) {
        let text = DuaPageText::for_collection(collection);
        ui.label(text.intro);
        ui.add_space(8.0);
        ui.heading(text.list_heading);

        let Some(session) = app.session.as_ref() else {
            return;
        };
        let store = session.store();
        let mut failure = None;

        let records = store.duas(collection).unwrap_or_default();
        if records.is_empty() {
            ui.weak("Not added yet");
        }
        for (i, dua) in records.iter().enumerate() {
            ui.group(|ui| {
                ui.label(format!("{}. {}", i + 1, or_placeholder(&dua.arabic)));
                ui.label(format!("English: {}", or_placeholder(&dua.english)));
                let audio = dua.audio_file.as_deref().map(|p| store.resolve_audio(p));
                if let Err(e) = AudioControl::show(ui, audio.as_deref(), None) {
                    failure = Some(e);
                }
            });
        }

        let authenticated = session.is_authenticated();
        if let Some(e) = failure {
            tracing::error!("{:#}", e);
            app.notice = Some(Notice::error(format!("{:#}", e)));
        }
        if !authenticated {
            return;
        }

        ui.separator();
        let form = app.forms.dua_mut(collection);
        ui.label(text.arabic_prompt);
        ui.text_edit_singleline(&mut form.arabic);
        ui.label("Add English translation:");
        ui.add(egui::TextEdit::multiline(&mut form.english).desired_width(f32::INFINITY));

        let mut picked = None;
        ui.horizontal(|ui| {
            if ui.button("Upload Arabic audio (MP3)...").clicked() {
                picked = Some(PickedAudio::pick());
            }
            match &form.audio {
                Some(audio) => {
                    ui.label(audio.file_name());
                    if ui.small_button("\u{2715}").on_hover_text("Remove").clicked() {
                        form.audio = None;
                    }
                }
                None => {
                    ui.weak("No audio selected");
                }
            }
        });
        match picked {
            Some(Ok(Some(audio))) => form.audio = Some(audio),
            Some(Err(e)) => app.notice = Some(Notice::error(format!("{:#}", e))),
            _ => {}
        }

        if ui.button(text.save_label).clicked() {
            app.submit_dua(collection, text.saved);
        }
    }
}

/// Text to show for a possibly empty field
pub fn or_placeholder(text: &str) -> &str {
    if text.trim().is_empty() {
        "Not added yet"
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_for_blank_text() {
        assert_eq!(or_placeholder(""), "Not added yet");
        assert_eq!(or_placeholder("  "), "Not added yet");
        assert_eq!(or_placeholder("دعاء"), "دعاء");
    }

    #[test]
    fn test_every_dua_collection_has_its_own_labels() {
        let labels: std::collections::HashSet<_> = CollectionId::DUAS
            .iter()
            .map(|id| DuaPageText::for_collection(*id).save_label)
            .collect();
        assert_eq!(labels.len(), CollectionId::DUAS.len());
    }
}
