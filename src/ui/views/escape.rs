use super::final_lock::ui_final_lock;
use super::question::{choice_buttons, labeled_image, question_body, question_header};
use crate::app::PlayerApp;
use crate::model::AnswerKey;
use crate::session::{EscapeAction, EscapeScreen};
use crate::ui::layout::{centered_panel, two_button_row, wide_button};
use egui::{Color32, Context, RichText};

const MAX_WIDTH: f32 = 620.0;

pub fn ui_escape(app: &mut PlayerApp, ctx: &Context) {
    let Some(screen) = app.escape().map(|s| s.current_screen) else {
        return;
    };
    match screen {
        EscapeScreen::Start | EscapeScreen::Welcome => ui_welcome(app, ctx),
        EscapeScreen::Hub => ui_hub(app, ctx),
        EscapeScreen::Question => ui_question(app, ctx),
        EscapeScreen::Teaching => ui_teaching(app, ctx),
        EscapeScreen::Reflection => ui_reflection(app, ctx),
        EscapeScreen::LetterReveal => ui_letter_reveal(app, ctx),
        EscapeScreen::FinalLock => ui_final_lock(app, ctx),
        EscapeScreen::Escaped => ui_escaped(app, ctx),
    }
}

fn ui_welcome(app: &mut PlayerApp, ctx: &Context) {
    let welcome = app
        .escape()
        .and_then(|s| s.content())
        .and_then(|c| c.welcome_message.clone())
        .unwrap_or_else(|| "¿Preparado para escapar?".to_string());
    centered_panel(ctx, 200.0, 540.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("🔐 Escape room");
            ui.add_space(12.0);
            ui.label(welcome);
            ui.add_space(18.0);
            if wide_button(ui, "▶ Empezar", 240.0, true) {
                app.escape_dispatch(EscapeAction::SetScreen(EscapeScreen::Hub));
            }
        });
    });
}

fn ui_hub(app: &mut PlayerApp, ctx: &Context) {
    let Some(session) = app.escape() else {
        return;
    };
    let count = session.checkpoint_count();
    let rows: Vec<(u32, bool, bool)> = (1..=count)
        .map(|cp| {
            (
                cp,
                session.is_checkpoint_unlocked(cp),
                session.is_checkpoint_complete(cp),
            )
        })
        .collect();
    let letters = session.lock_letters();
    let all_done = session.all_checkpoints_complete();

    centered_panel(ctx, 120.0 + 48.0 * count as f32, MAX_WIDTH, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("🗺 Mapa");
            ui.add_space(10.0);
            for (cp, unlocked, complete) in rows {
                let label = match (unlocked, complete) {
                    (_, true) => format!("✔ Checkpoint {cp}"),
                    (true, false) => format!("▶ Checkpoint {cp}"),
                    (false, false) => format!("🔒 Checkpoint {cp}"),
                };
                if wide_button(ui, &label, 320.0, unlocked && !complete) {
                    app.escape_dispatch(EscapeAction::OpenCheckpoint(cp));
                }
                ui.add_space(4.0);
            }

            ui.add_space(12.0);
            if !letters.is_empty() {
                ui.label(format!("Letras conseguidas: {}", letters.join("  ")));
            }
            if all_done {
                ui.add_space(8.0);
                if wide_button(ui, "🚪 Ir a la puerta final", 320.0, true) {
                    app.escape_dispatch(EscapeAction::GoToFinalLock);
                }
            }
        });
    });
}

fn ui_question(app: &mut PlayerApp, ctx: &Context) {
    let Some(session) = app.escape() else {
        return;
    };
    let Some(question) = session.current_question().cloned() else {
        return;
    };
    let order = session.answer_order_for(question.id);

    centered_panel(ctx, 420.0, MAX_WIDTH, |ui| {
        ui.vertical_centered(|ui| {
            question_header(ui, &question);
            let width = ui.available_width().min(MAX_WIDTH - 40.0);
            if let Some(submission) = question_body(ui, &question, order, &mut app.input, width) {
                app.submit_escape_answer(submission);
            }
            if let Some(feedback) = app.input.feedback.clone() {
                ui.add_space(8.0);
                ui.colored_label(Color32::LIGHT_RED, feedback);
                labeled_image(ui, &question, width);
            }
            ui.add_space(16.0);
            if ui.button("🗺 Volver al mapa").clicked() {
                app.input.clear();
                app.escape_dispatch(EscapeAction::GoToHub);
            }
        });
    });
}

fn ui_teaching(app: &mut PlayerApp, ctx: &Context) {
    let teaching = app
        .escape()
        .and_then(|s| s.teaching())
        .filter(|t| !t.trim().is_empty())
        .unwrap_or("Esa no era la respuesta correcta. Repasemos un momento.")
        .to_string();
    centered_panel(ctx, 220.0, MAX_WIDTH, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("💡 Pensemos un poco");
            ui.add_space(12.0);
            ui.label(teaching);
            ui.add_space(18.0);
            let (back, next) = two_button_row(ui, 360.0, "🗺 Mapa", "Continuar ▶");
            if back {
                app.escape_dispatch(EscapeAction::GoToHub);
            }
            if next {
                app.escape_dispatch(EscapeAction::ContinueToReflection);
            }
        });
    });
}

fn ui_reflection(app: &mut PlayerApp, ctx: &Context) {
    let Some(session) = app.escape() else {
        return;
    };
    let reflection = session.current_wrong_answer.zip(session.current_question()).and_then(
        |(wrong, question)| {
            let (answers, _) = question.choices()?;
            let answer = answers.get(wrong);
            Some((answer.reflection_question.clone(), answer.reflection_answers.clone()))
        },
    );
    let Some((prompt, options)) = reflection else {
        return;
    };
    let wrong_message = session
        .reflection_wrong_message()
        .filter(|m| !m.trim().is_empty());
    let picked_wrong = session.reflection_wrong_answer.is_some();

    centered_panel(ctx, 320.0, MAX_WIDTH, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("🤔 Reflexiona");
            ui.add_space(8.0);
            ui.label(RichText::new(prompt).strong());
            ui.add_space(10.0);
            if let Some(picked) = choice_buttons(ui, &options, AnswerKey::ALL, 420.0) {
                app.submit_reflection(picked);
            }
            if picked_wrong {
                ui.add_space(8.0);
                let message = wrong_message.unwrap_or_else(|| "Casi. ¡Prueba otra vez!".to_string());
                ui.colored_label(Color32::LIGHT_RED, message);
            }
        });
    });
}

fn ui_letter_reveal(app: &mut PlayerApp, ctx: &Context) {
    let Some(earned) = app.escape().and_then(|s| s.last_letter()).cloned() else {
        return;
    };
    centered_panel(ctx, 260.0, 480.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading(format!("🎉 Checkpoint {} completado", earned.checkpoint));
            ui.add_space(12.0);
            ui.label(RichText::new(&earned.letter.letter).size(72.0).strong());
            ui.add_space(8.0);
            if !earned.letter.message.trim().is_empty() {
                ui.label(&earned.letter.message);
            }
            ui.add_space(16.0);
            if wide_button(ui, "🗺 Volver al mapa", 240.0, true) {
                app.escape_dispatch(EscapeAction::GoToHub);
            }
        });
    });
}

fn ui_escaped(app: &mut PlayerApp, ctx: &Context) {
    let word = app.escape().and_then(|s| s.final_word()).map(str::to_string);
    centered_panel(ctx, 220.0, 480.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("🏆 ¡Has escapado!");
            ui.add_space(12.0);
            if let Some(word) = word {
                ui.label(RichText::new(word).size(40.0).strong());
                ui.add_space(8.0);
            }
            ui.label("Has superado todos los checkpoints.");
            ui.add_space(16.0);
            if wide_button(ui, "🔄 Jugar otra vez", 240.0, true) {
                app.confirm_reset = true;
            }
        });
    });
}
