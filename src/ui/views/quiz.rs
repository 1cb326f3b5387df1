use super::question::{question_body, question_header};
use crate::app::PlayerApp;
use crate::session::{QuizAction, QuizScreen};
use crate::ui::layout::{centered_panel, wide_button};
use egui::{Color32, Context, ProgressBar, RichText};

const MAX_WIDTH: f32 = 650.0;

pub fn ui_quiz(app: &mut PlayerApp, ctx: &Context) {
    let Some(screen) = app.quiz().map(|s| s.current_screen) else {
        return;
    };
    match screen {
        QuizScreen::Start | QuizScreen::Welcome => ui_welcome(app, ctx),
        QuizScreen::Question => ui_question(app, ctx),
        QuizScreen::Feedback => ui_feedback(app, ctx),
        QuizScreen::Completed => ui_completed(app, ctx),
    }
}

fn ui_welcome(app: &mut PlayerApp, ctx: &Context) {
    let Some(session) = app.quiz() else {
        return;
    };
    let welcome = session
        .quiz_content
        .as_ref()
        .and_then(|c| c.welcome_message.clone())
        .unwrap_or_default();
    let count = session.question_count();

    centered_panel(ctx, 200.0, 540.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("📝 Quiz");
            ui.add_space(10.0);
            if !welcome.is_empty() {
                ui.label(welcome);
                ui.add_space(8.0);
            }
            ui.label(format!("{count} preguntas"));
            ui.add_space(16.0);
            if wide_button(ui, "▶ Empezar", 240.0, count > 0) {
                app.quiz_dispatch(QuizAction::StartQuiz);
            }
        });
    });
}

fn ui_question(app: &mut PlayerApp, ctx: &Context) {
    let Some(session) = app.quiz() else {
        return;
    };
    let Some(question) = session.current_question().cloned() else {
        return;
    };
    let order = session.answer_order_for_current();
    let position = session.current_question_index + 1;
    let total = session.question_count();

    centered_panel(ctx, 420.0, MAX_WIDTH, |ui| {
        ui.vertical_centered(|ui| {
            ui.add(
                ProgressBar::new(position as f32 / total.max(1) as f32)
                    .text(format!("Pregunta {position} de {total}")),
            );
            ui.add_space(10.0);
            question_header(ui, &question);
            let width = ui.available_width().min(MAX_WIDTH - 40.0);
            if let Some(submission) = question_body(ui, &question, order, &mut app.input, width) {
                app.submit_quiz_answer(submission);
            }
        });
    });
}

fn ui_feedback(app: &mut PlayerApp, ctx: &Context) {
    let Some(session) = app.quiz() else {
        return;
    };
    let correct = session.last_answer_correct.unwrap_or(false);
    let correct_answer = session.last_correct_answer.clone();
    let message = session
        .current_question()
        .map(|q| q.correct_message.clone())
        .filter(|m| !m.trim().is_empty());
    let last = session.is_last_question();

    centered_panel(ctx, 220.0, 540.0, |ui| {
        ui.vertical_centered(|ui| {
            if correct {
                ui.heading(RichText::new("✔ ¡Correcto!").color(Color32::LIGHT_GREEN));
                if let Some(message) = message {
                    ui.add_space(8.0);
                    ui.label(message);
                }
            } else {
                ui.heading(RichText::new("✘ Incorrecto").color(Color32::LIGHT_RED));
                if let Some(answer) = correct_answer {
                    ui.add_space(8.0);
                    ui.label(format!("La respuesta correcta era: {answer}"));
                }
            }
            ui.add_space(16.0);
            let next = if last { "Ver resultados ▶" } else { "Siguiente ▶" };
            if wide_button(ui, next, 240.0, true) {
                app.quiz_dispatch(QuizAction::NextQuestion);
            }
        });
    });
}

fn ui_completed(app: &mut PlayerApp, ctx: &Context) {
    let Some(score) = app.quiz().map(|s| s.score()) else {
        return;
    };
    centered_panel(ctx, 220.0, 480.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("🏁 Quiz terminado");
            ui.add_space(12.0);
            ui.label(RichText::new(format!("{}%", score.percentage)).size(48.0).strong());
            ui.label(format!("{} de {} respuestas correctas", score.correct, score.total));
            ui.add_space(16.0);
            if wide_button(ui, "🔄 Repetir", 240.0, true) {
                app.reset_activity();
            }
        });
    });
}
