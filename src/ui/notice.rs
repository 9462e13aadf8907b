//! Success and error notifications shown above the page content

use eframe::egui::{self, Color32};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Result of the last user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    /// Show the notice; returns true when the user dismissed it
    pub fn show(&self, ui: &mut egui::Ui) -> bool {
        let (fill, stroke) = match self.kind {
            NoticeKind::Success => (Color32::from_rgb(30, 70, 45), Color32::from_rgb(152, 195, 121)),
            NoticeKind::Error => (Color32::from_rgb(80, 30, 35), Color32::from_rgb(224, 108, 117)),
        };

        let mut dismissed = false;
        egui::Frame::new()
            .fill(fill)
            .stroke(egui::Stroke::new(1.0, stroke))
            .corner_radius(4.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(Color32::WHITE, &self.text);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("\u{2715}").on_hover_text("Dismiss").clicked() {
                            dismissed = true;
                        }
                    });
                });
            });
        dismissed
    }
}
