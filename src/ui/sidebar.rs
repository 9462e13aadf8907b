//! Sidebar with login and navigation

use eframe::egui;

use crate::app::UmrahApp;
use crate::core::config::Section;

/// Sidebar with login panel and section menu
pub struct Sidebar;

impl Sidebar {
    /// Show the sidebar
    pub fn show(ui: &mut egui::Ui, app: &mut UmrahApp) {
        ui.vertical(|ui| {
            ui.heading("Umrah Menu");
            ui.separator();

            Self::show_account(ui, app);
            ui.separator();

            ui.label("Navigate");
            let mut selected = app.section;
            for section in Section::ALL {
                let count = match (section.collection(), app.session.as_ref()) {
                    (Some(id), Some(session)) => session.store().document().len_of(id),
                    _ => 0,
                };
                let label = if count > 0 {
                    format!("{} ({count})", section.title())
                } else {
                    section.title().to_string()
                };
                ui.radio_value(&mut selected, section, label);
            }
            if selected != app.section {
                app.set_section(selected);
            }

            ui.separator();
            let footer = ui.weak("Umrah Companion App");
            if let Some(session) = app.session.as_ref() {
                footer.on_hover_text(format!("Data: {}", session.store().path().display()));
            }
        });
    }

    fn show_account(ui: &mut egui::Ui, app: &mut UmrahApp) {
        let Some(session) = app.session.as_ref() else {
            return;
        };

        if let Some(username) = session.username() {
            ui.label(format!("Logged in as {username}"));
            if ui.button("Log out").clicked() {
                app.logout();
            }
            return;
        }

        ui.label("Please log in to upload or update content.");
        let form = &mut app.forms.login;
        ui.label("Username");
        ui.text_edit_singleline(&mut form.username);
        ui.label("Password");
        let password = ui.add(egui::TextEdit::singleline(&mut form.password).password(true));

        let submitted =
            password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Login").clicked() || submitted {
            app.login();
        }
    }
}
