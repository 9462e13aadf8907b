//! Maqam-e-Ibrahim page: intentions and recitation audio

use eframe::egui;

use super::audio::AudioControl;
use super::collection::or_placeholder;
use super::forms::PickedAudio;
use super::notice::Notice;
use crate::app::UmrahApp;

pub struct MaqamPanel;

impl MaqamPanel {
    pub fn show(ui: &mut egui::Ui, app: &mut UmrahApp) {
        ui.label("Upload your audio file for the dua and record your intentions.");
        ui.add_space(8.0);
        ui.heading("Your Maqam-e-Ibrahim Prayers:");

        let Some(session) = app.session.as_ref() else {
            return;
        };
        let store = session.store();
        let mut failure = None;

        if store.maqam().is_empty() {
            ui.weak("Not added yet");
        }
        for (i, prayer) in store.maqam().iter().enumerate() {
            ui.group(|ui| {
                ui.label(format!("{}. {}", i + 1, or_placeholder(&prayer.intentions)));
                let audio = prayer.audio_file.as_deref().map(|p| store.resolve_audio(p));
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
        let form = &mut app.forms.maqam;
        ui.label("Add your experience or intentions:");
        ui.add(egui::TextEdit::multiline(&mut form.intentions).desired_width(f32::INFINITY));

        let mut picked = None;
        ui.horizontal(|ui| {
            if ui.button("Upload Arabic Dua Audio (MP3)...").clicked() {
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

        if ui.button("Save Maqam Prayer Note and Audio").clicked() {
            app.submit_maqam();
        }
    }
}
