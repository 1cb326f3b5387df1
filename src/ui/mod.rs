pub mod layout;
pub mod views;

use crate::app::{Activity, PlayerApp};
use eframe::{APP_KEY, App, Frame, set_value};
use egui::Context;
use layout::{bottom_panel, centered_panel, confirm_reset, top_panel};

impl PlayerApp {
    fn activity_title(&self) -> String {
        let title = match &self.activity {
            Activity::Escape(_) => Some("🔐 Escape room".to_string()),
            Activity::Quiz(_) => Some("📝 Quiz".to_string()),
            Activity::Flashcards(session) => {
                session.flashcard_content.as_ref().and_then(|c| c.title.clone())
            }
            Activity::None => None,
        };
        title.unwrap_or_else(|| "Escape Quiz".to_string())
    }
}

impl App for PlayerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        // BOTÓN SUPERIOR DE REINICIAR (solo con una actividad abierta)
        if !matches!(self.activity, Activity::None) {
            let title = self.activity_title();
            top_panel(self, ctx, &title);
        }

        // PANEL INFERIOR: mensajes y tema
        bottom_panel(self, ctx);

        // Dispatch por actividad a las vistas
        match self.activity {
            Activity::Escape(_) => views::escape::ui_escape(self, ctx),
            Activity::Quiz(_) => views::quiz::ui_quiz(self, ctx),
            Activity::Flashcards(_) => views::flashcards::ui_flashcards(self, ctx),
            Activity::None => {
                centered_panel(ctx, 120.0, 480.0, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Escape Quiz");
                        ui.add_space(8.0);
                        ui.label("No hay ninguna actividad abierta.");
                    });
                });
            }
        }

        if self.confirm_reset {
            confirm_reset(self, ctx);
        }

        self.report_completion();
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.sync_saved();
        set_value(storage, APP_KEY, self);
    }
}
