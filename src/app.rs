//! Main application state and UI coordination

use std::path::Path;
use std::sync::Arc;

use eframe::egui;

use crate::core::auth::PlaceholderAuthenticator;
use crate::core::config::{AppConfig, Section};
use crate::core::document::{CollectionId, Record};
use crate::core::error::{StoreError, StoreResult};
use crate::core::session::Session;
use crate::core::store::ContentStore;
use crate::ui::{
    collection::DuaPanel,
    forms::Forms,
    maqam::MaqamPanel,
    notice::Notice,
    pages::{DonatePanel, TodoPanel},
    sidebar::Sidebar,
    tawaf::TawafPanel,
};

/// Main application state
pub struct UmrahApp {
    /// Open session, `None` when the data file could not be loaded
    pub session: Option<Session>,
    /// Why the data file could not be loaded
    pub startup_error: Option<String>,
    /// Application configuration
    pub config: AppConfig,
    /// Page shown in the central panel
    pub section: Section,
    /// Form state of every page
    pub forms: Forms,
    /// Outcome of the last action
    pub notice: Option<Notice>,
}

impl UmrahApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = AppConfig::load().unwrap_or_else(|e| {
            tracing::error!("Failed to load config, using defaults: {:#}", e);
            AppConfig::default()
        });

        if let Some(font) = &config.ui.arabic_font {
            Self::configure_fonts(&cc.egui_ctx, font);
        }

        let mut app = Self::with_config(config);
        app.section = app.config.last_section;
        app
    }

    /// Open the content store named by `config`
    fn with_config(config: AppConfig) -> Self {
        let (session, startup_error) = match ContentStore::open(config.document_path()) {
            Ok(store) => (Some(Session::new(store)), None),
            Err(e) => {
                tracing::error!("Failed to open content store: {}", e);
                (None, Some(e.to_string()))
            }
        };

        Self {
            session,
            startup_error,
            config,
            section: Section::default(),
            forms: Forms::default(),
            notice: None,
        }
    }

    /// Add a font with Arabic glyphs as fallback for all text
    fn configure_fonts(ctx: &egui::Context, path: &Path) {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!("Failed to load font {}: {}", path.display(), e);
                return;
            }
        };

        let mut fonts = egui::FontDefinitions::default();
        fonts
            .font_data
            .insert("arabic".to_owned(), Arc::new(egui::FontData::from_owned(bytes)));
        for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
            fonts
                .families
                .entry(family)
                .or_default()
                .push("arabic".to_owned());
        }
        ctx.set_fonts(fonts);
        tracing::info!("Loaded Arabic font: {}", path.display());
    }

    /// Switch page and remember it for the next start
    pub fn set_section(&mut self, section: Section) {
        self.section = section;
        self.notice = None;
        self.config.last_section = section;
        if let Err(e) = self.config.save() {
            tracing::error!("Failed to save config: {:#}", e);
        }
    }

    /// Check the login form against the placeholder credentials
    pub fn login(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let form = &mut self.forms.login;
        let result = session.login(&PlaceholderAuthenticator, form.username.trim(), &form.password);
        form.password.clear();

        self.notice = Some(match result {
            Ok(()) => Notice::success("Logged in successfully!"),
            Err(e) => Notice::error(e.to_string()),
        });
    }

    pub fn logout(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.logout();
        }
        self.notice = None;
    }

    /// Save the dua form of `collection`
    pub fn submit_dua(&mut self, collection: CollectionId, saved: &str) {
        let form = self.forms.dua_mut(collection);
        let record = Record::Dua(form.record());
        let audio = form.audio.as_ref().map(|a| a.bytes.clone());

        let result = self.with_session(|session| {
            session.append_record(collection, record, audio.as_deref())
        });
        if self.report(result, saved) {
            *self.forms.dua_mut(collection) = Default::default();
        }
    }

    pub fn submit_maqam(&mut self) {
        let form = &self.forms.maqam;
        let record = Record::Maqam(form.record());
        let audio = form.audio.as_ref().map(|a| a.bytes.clone());

        let result = self.with_session(|session| {
            session.append_record(CollectionId::Maqam, record, audio.as_deref())
        });
        if self.report(result, "Maqam Prayer Note and Audio updated successfully!") {
            self.forms.maqam = Default::default();
        }
    }

    pub fn submit_tawaf(&mut self) {
        let form = &self.forms.tawaf;
        let round = form.round;
        let record = form.record();
        let audio = form.audio.as_ref().map(|a| a.bytes.clone());

        let result = self.with_session(|session| {
            session.append_record(
                CollectionId::Tawaf,
                Record::Tawaf { round, record },
                audio.as_deref(),
            )
        });
        if self.report(result, &format!("Dua saved for Round {round}!")) {
            self.forms.tawaf.reset();
        }
    }

    fn with_session(&mut self, op: impl FnOnce(&mut Session) -> StoreResult<()>) -> StoreResult<()> {
        match self.session.as_mut() {
            Some(session) => op(session),
            None => Err(StoreError::NotOpen),
        }
    }

    /// Turn an operation result into a notice; true on success
    fn report(&mut self, result: StoreResult<()>, saved: &str) -> bool {
        match result {
            Ok(()) => {
                self.notice = Some(Notice::success(saved));
                true
            }
            Err(e) => {
                tracing::error!("Failed to save content: {}", e);
                self.notice = Some(Notice::error(e.to_string()));
                false
            }
        }
    }

    /// Render the page for the current section
    fn render_section(&mut self, ui: &mut egui::Ui) {
        ui.heading(self.section.title());
        ui.add_space(4.0);

        if let Some(notice) = &self.notice {
            if notice.show(ui) {
                self.notice = None;
            }
            ui.add_space(4.0);
        }

        match self.section {
            Section::Tawaf => TawafPanel::show(ui, self),
            Section::Maqam => MaqamPanel::show(ui, self),
            Section::Todo => TodoPanel::show(ui, self),
            Section::Donate => DonatePanel::show(ui),
            other => {
                if let Some(collection) = other.collection() {
                    DuaPanel::show(ui, self, collection);
                }
            }
        }
    }

    /// Render the screen shown when the data file is unusable
    fn render_startup_error(&self, ui: &mut egui::Ui, error: &str) {
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.heading("Could not open your Umrah data");
            ui.add_space(12.0);
            ui.colored_label(egui::Color32::from_rgb(224, 108, 117), error);
            ui.add_space(12.0);
            ui.label(format!(
                "The file {} was left untouched. Fix or move it, then restart the app.",
                self.config.document_path().display()
            ));
        });
    }
}

impl eframe::App for UmrahApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(error) = self.startup_error.clone() {
            egui::CentralPanel::default().show(ctx, |ui| {
                self.render_startup_error(ui, &error);
            });
            return;
        }

        egui::SidePanel::left("sidebar")
            .resizable(true)
            .default_width(self.config.ui.sidebar_width)
            .min_width(180.0)
            .show(ctx, |ui| {
                Sidebar::show(ui, self);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("section_scroll")
                .show(ui, |ui| {
                    self.render_section(ui);
                });
        });
    }
}
