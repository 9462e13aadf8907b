//! Static pages without editable content

use eframe::egui;

use crate::app::UmrahApp;

pub const DONATE_URL: &str = "https://www.paypal.com/donate";

pub struct TodoPanel;

impl TodoPanel {
    pub fn show(ui: &mut egui::Ui, app: &UmrahApp) {
        ui.label("Reminders for the final rite of Umrah.");
        ui.add_space(8.0);

        let items = app
            .session
            .as_ref()
            .map(|session| session.store().todo())
            .unwrap_or_default();
        if items.is_empty() {
            ui.weak("Nothing here yet.");
        }
        for item in items {
            match item.as_str() {
                Some(text) => ui.label(format!("\u{2022} {text}")),
                None => ui.monospace(item.to_string()),
            };
        }
    }
}

pub struct DonatePanel;

impl DonatePanel {
    pub fn show(ui: &mut egui::Ui) {
        ui.label("Support our work by donating to keep this app running.");
        ui.add_space(8.0);
        ui.hyperlink_to("Donate with PayPal", DONATE_URL);
    }
}
