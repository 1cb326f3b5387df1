use crate::app::PlayerApp;
use crate::session::{FlashcardAction, FlashcardScreen};
use crate::ui::layout::{centered_panel, two_button_row, wide_button};
use egui::{Button, Context, Image, RichText};

pub fn ui_flashcards(app: &mut PlayerApp, ctx: &Context) {
    let Some(screen) = app.flashcards().map(|s| s.current_screen) else {
        return;
    };
    match screen {
        FlashcardScreen::Start => ui_start(app, ctx),
        FlashcardScreen::Study => ui_study(app, ctx),
        FlashcardScreen::Completed => ui_completed(app, ctx),
    }
}

fn deck_title(app: &PlayerApp) -> String {
    app.flashcards()
        .and_then(|s| s.flashcard_content.as_ref())
        .and_then(|c| c.title.clone())
        .unwrap_or_else(|| "Tarjetas".to_string())
}

fn ui_start(app: &mut PlayerApp, ctx: &Context) {
    let title = deck_title(app);
    let description = app
        .flashcards()
        .and_then(|s| s.flashcard_content.as_ref())
        .and_then(|c| c.description.clone());
    centered_panel(ctx, 200.0, 540.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading(title);
            if let Some(description) = description {
                ui.add_space(8.0);
                ui.label(description);
            }
            ui.add_space(16.0);
            if wide_button(ui, "▶ Empezar", 240.0, true) {
                app.flashcards_dispatch(FlashcardAction::StartStudying);
            }
        });
    });
}

fn ui_study(app: &mut PlayerApp, ctx: &Context) {
    let Some(session) = app.flashcards() else {
        return;
    };
    let Some(card) = session.current_card().cloned() else {
        return;
    };
    let flipped = session.is_flipped;
    let (current, total) = session.progress();

    centered_panel(ctx, 380.0, 560.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.label(format!("Tarjeta {current} de {total}"));
            ui.add_space(8.0);

            let (text, image) = if flipped {
                (&card.back, &card.back_image_url)
            } else {
                (&card.front, &card.front_image_url)
            };
            if let Some(url) = image {
                ui.add(Image::new(url.as_str()).max_width(400.0).max_height(200.0));
            }
            // La tarjeta entera es el botón para darle la vuelta
            let face = Button::new(RichText::new(text).size(24.0)).min_size(egui::vec2(420.0, 180.0));
            if ui.add(face).on_hover_text("Pulsa para girar").clicked() {
                app.flashcards_dispatch(FlashcardAction::FlipCard);
            }

            ui.add_space(12.0);
            let (prev, next) = two_button_row(ui, 360.0, "◀ Anterior", "Siguiente ▶");
            if prev {
                app.flashcards_dispatch(FlashcardAction::PrevCard);
            }
            if next {
                app.flashcards_dispatch(FlashcardAction::NextCard);
            }
        });
    });
}

fn ui_completed(app: &mut PlayerApp, ctx: &Context) {
    let total = app.flashcards().map(|s| s.card_count()).unwrap_or(0);
    centered_panel(ctx, 200.0, 480.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("🎉 ¡Mazo repasado!");
            ui.add_space(8.0);
            ui.label(format!("Has visto las {total} tarjetas."));
            ui.add_space(16.0);
            let (first, again) = two_button_row(ui, 360.0, "⏮ Primera tarjeta", "🔄 Repasar otra vez");
            if first {
                app.flashcards_dispatch(FlashcardAction::GoToCard(0));
            }
            if again {
                app.reset_activity();
            }
        });
    });
}
