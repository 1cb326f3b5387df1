use crate::app::PlayerApp;
use crate::session::EscapeAction;
use crate::ui::layout::{centered_panel, wide_button};
use egui::{Button, Color32, Context, RichText, TextEdit, Ui};

pub fn ui_final_lock(app: &mut PlayerApp, ctx: &Context) {
    let Some(session) = app.escape() else {
        return;
    };
    let word_puzzle = session.is_word_puzzle();
    let error = session.lock_error.clone();

    // El paso a la pantalla final espera unos instantes con el candado abierto
    if let Some(remaining) = app.tick_escape(ctx.input(|i| i.time)) {
        ctx.request_repaint_after(std::time::Duration::from_secs_f64(remaining));
    }

    centered_panel(ctx, 300.0, 620.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("🚪 La puerta final");
            ui.add_space(10.0);
            if word_puzzle {
                word_puzzle_ui(app, ui);
            } else {
                alphabetical_lock_ui(app, ui);
            }
            if let Some(error) = error {
                ui.add_space(8.0);
                ui.colored_label(Color32::LIGHT_RED, error);
            }
        });
    });
}

fn alphabetical_lock_ui(app: &mut PlayerApp, ui: &mut Ui) {
    let Some(session) = app.escape() else {
        return;
    };
    let letters = session.lock_letters();
    let clicked = session.lock_click_order.clone();
    let opened = session.lock_opened;

    if opened {
        ui.label(RichText::new("🔓 ¡El candado se abre!").size(24.0).strong());
        return;
    }
    ui.label("Pulsa tus letras en orden alfabético para abrir el candado.");
    ui.add_space(10.0);
    ui.horizontal_wrapped(|ui| {
        for (index, letter) in letters.iter().enumerate() {
            let used = clicked.contains(&index);
            let button = Button::new(RichText::new(letter).size(28.0)).min_size(egui::vec2(56.0, 56.0));
            if ui.add_enabled(!used, button).clicked() {
                app.escape_dispatch(EscapeAction::LockClick(index));
            }
        }
    });
    ui.add_space(8.0);
    if ui.button("↺ Empezar de nuevo").clicked() {
        app.escape_dispatch(EscapeAction::LockReset);
    }
}

fn word_puzzle_ui(app: &mut PlayerApp, ui: &mut Ui) {
    let Some(session) = app.escape() else {
        return;
    };
    let boxes = session.final_word_boxes();
    let clue = session.final_clue().map(str::to_string);
    let guess = session.final_word_guess();

    if let Some(clue) = clue {
        ui.label(RichText::new(format!("Pista: {clue}")).italics());
        ui.add_space(8.0);
    }
    ui.horizontal_wrapped(|ui| {
        for (index, word_box) in boxes.iter().enumerate() {
            if word_box.locked {
                let shown = word_box.value.map(String::from).unwrap_or_default();
                ui.add_enabled(
                    false,
                    Button::new(RichText::new(shown).size(26.0).strong()).min_size(egui::vec2(44.0, 48.0)),
                );
                continue;
            }
            let mut text = word_box.value.map(String::from).unwrap_or_default();
            let response = ui.add(
                TextEdit::singleline(&mut text)
                    .char_limit(1)
                    .desired_width(36.0)
                    .font(egui::TextStyle::Heading)
                    .horizontal_align(egui::Align::Center),
            );
            if response.changed() {
                app.escape_dispatch(EscapeAction::FillWordBox {
                    index,
                    letter: text.chars().next(),
                });
            }
        }
    });
    ui.add_space(12.0);
    if wide_button(ui, "🔑 Abrir", 200.0, guess.is_some()) {
        if let Some(guess) = guess {
            app.escape_dispatch(EscapeAction::SubmitFinalWord(guess));
        }
    }
}
