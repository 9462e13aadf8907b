//! Tawaf page: one dua per round

use eframe::egui;

use super::audio::AudioControl;
use super::collection::or_placeholder;
use super::forms::PickedAudio;
use super::notice::Notice;
use crate::app::UmrahApp;
use crate::core::document::TAWAF_ROUNDS;

pub struct TawafPanel;

impl TawafPanel {
    pub fn show(ui: &mut egui::Ui, app: &mut UmrahApp) {
        ui.label("Add a specific Dua for each round of Tawaf.");
        ui.add_space(8.0);
        ui.heading("Duas for Tawaf Rounds:");

        let Some(session) = app.session.as_ref() else {
            return;
        };
        let store = session.store();
        let mut failure = None;

        for (round, slot) in store.tawaf().iter() {
            ui.group(|ui| {
                ui.strong(format!("Round {round}"));
                match slot {
                    Some(dua) => {
                        ui.label(format!("Arabic: {}", or_placeholder(&dua.arabic)));
                        ui.label(format!("English: {}", or_placeholder(&dua.english)));
                        let audio = dua.audio_file.as_deref().map(|p| store.resolve_audio(p));
                        if let Err(e) =
                            AudioControl::show(ui, audio.as_deref(), dua.audio_url.as_deref())
                        {
                            failure = Some(e);
                        }
                    }
                    None => {
                        ui.weak("Not added yet");
                    }
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
        let form = &mut app.forms.tawaf;
        egui::ComboBox::from_label("Select Round of Tawaf")
            .selected_text(format!("Round {}", form.round))
            .show_ui(ui, |ui| {
                for round in 1..=TAWAF_ROUNDS as u8 {
                    ui.selectable_value(&mut form.round, round, format!("Round {round}"));
                }
            });

        let round = form.round;
        ui.label(format!("Arabic text of the Dua for Round {round}:"));
        ui.text_edit_singleline(&mut form.arabic);
        ui.label(format!("English translation of the Dua for Round {round}:"));
        ui.add(egui::TextEdit::multiline(&mut form.english).desired_width(f32::INFINITY));
        ui.label(format!("Link to Arabic audio for Round {round} (optional):"));
        ui.text_edit_singleline(&mut form.audio_url);

        let mut picked = None;
        ui.horizontal(|ui| {
            if ui.button("Upload Arabic audio (MP3, optional)...").clicked() {
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

        if ui.button(format!("Save Dua for Round {round}")).clicked() {
            app.submit_tawaf();
        }
    }
}
