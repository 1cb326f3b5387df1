//! Widgets de pregunta compartidos por el escape room y el quiz.

use crate::answer_order::AnswerOrder;
use crate::app::AnswerInput;
use crate::app::input::sentence_parts;
use crate::judge::Submission;
use crate::model::{AnswerKey, PerKey, Question, QuestionKind};
use crate::ui::layout::wide_button;
use egui::{Button, ComboBox, Image, RichText, Sense, Ui};

const DISPLAY_KEYS: [&str; 3] = ["A", "B", "C"];

pub fn question_header(ui: &mut Ui, question: &Question) {
    if !question.title.trim().is_empty() {
        ui.label(RichText::new(&question.title).weak());
    }
    ui.heading(&question.question);
    ui.add_space(10.0);
}

/// Opciones en el orden barajado. Las letras que se ven (A, B, C) son las de la
/// posición, no la clave real. Devuelve la clave pulsada.
pub fn choice_buttons(
    ui: &mut Ui,
    answers: &PerKey<String>,
    order: AnswerOrder,
    width: f32,
) -> Option<AnswerKey> {
    let mut picked = None;
    for (label, key) in DISPLAY_KEYS.iter().zip(order) {
        let text = format!("{label}. {}", answers.get(key));
        if ui
            .add_sized([width, 40.0], Button::new(text))
            .clicked()
        {
            picked = Some(key);
        }
        ui.add_space(4.0);
    }
    picked
}

/// Cuerpo de la pregunta según su tipo. Devuelve la respuesta cuando el alumno
/// la envía.
pub fn question_body(
    ui: &mut Ui,
    question: &Question,
    order: AnswerOrder,
    input: &mut AnswerInput,
    width: f32,
) -> Option<Submission> {
    input.prepare(question);

    match &question.kind {
        QuestionKind::MultipleChoice { answers, .. } => {
            if let Some(url) = &question.image_url {
                ui.add(Image::new(url.as_str()).max_width(width).max_height(240.0));
            }
            let texts = answers.clone().map(|a| a.text);
            choice_buttons(ui, &texts, order, width).map(Submission::Choice)
        }
        QuestionKind::Hotspot { .. } => hotspot_area(ui, question, width),
        QuestionKind::DragDrop { sentence, .. } => {
            let parts = sentence_parts(sentence);
            ui.horizontal_wrapped(|ui| {
                for (i, part) in parts.iter().enumerate() {
                    ui.label(*part);
                    let Some(slot) = input.slots.get_mut(i) else {
                        continue;
                    };
                    let shown = slot.clone().unwrap_or_else(|| "______".to_string());
                    ComboBox::from_id_salt(("hueco", question.id, i))
                        .selected_text(shown)
                        .show_ui(ui, |ui| {
                            ui.selectable_value(slot, None, "___");
                            for word in &input.word_bank {
                                ui.selectable_value(slot, Some(word.clone()), word.as_str());
                            }
                        });
                }
            });
            ui.add_space(10.0);
            let ready = input.slots.iter().all(Option::is_some);
            wide_button(ui, "Comprobar", width, ready).then(|| input.words())
        }
        QuestionKind::FillBlank { sentence, .. } => {
            let parts = sentence_parts(sentence);
            let mut submitted = false;
            ui.horizontal_wrapped(|ui| {
                for (i, part) in parts.iter().enumerate() {
                    ui.label(*part);
                    // Solo el primer hueco es editable
                    if i == 0 && parts.len() > 1 {
                        let response = ui.add(egui::TextEdit::singleline(&mut input.text).desired_width(140.0));
                        submitted |= response.lost_focus() && ui.input(|inp| inp.key_pressed(egui::Key::Enter));
                    }
                }
            });
            ui.add_space(10.0);
            let ready = !input.text.trim().is_empty();
            submitted |= wide_button(ui, "Comprobar", width, ready);
            (submitted && ready).then(|| input.text())
        }
    }
}

/// Imagen clicable. El clic se traduce a porcentaje del tamaño dibujado.
fn hotspot_area(ui: &mut Ui, question: &Question, width: f32) -> Option<Submission> {
    let size = egui::vec2(width, width * 0.6);
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());
    ui.painter()
        .rect_filled(rect, 4.0, ui.visuals().extreme_bg_color);
    match &question.image_url {
        Some(url) => Image::new(url.as_str()).paint_at(ui, rect),
        None => {
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "(sin imagen)",
                egui::TextStyle::Body.resolve(ui.style()),
                ui.visuals().weak_text_color(),
            );
        }
    }
    let response = response.on_hover_cursor(egui::CursorIcon::Crosshair);
    if !response.clicked() {
        return None;
    }
    let pos = response.interact_pointer_pos()?;
    let x = ((pos.x - rect.left()) / rect.width() * 100.0) as f64;
    let y = ((pos.y - rect.top()) / rect.height() * 100.0) as f64;
    Some(Submission::Click { x, y })
}

/// Imagen con etiquetas que se enseña tras fallar un hotspot, si existe.
pub fn labeled_image(ui: &mut Ui, question: &Question, width: f32) {
    if let QuestionKind::Hotspot {
        labeled_image_url: Some(url),
        ..
    } = &question.kind
    {
        ui.add(Image::new(url.as_str()).max_width(width));
    }
}
