use serde::{Deserialize, Serialize};
use std::fmt;

/// Clave de una opción (A/B/C). Todas las preguntas de opción múltiple tienen tres.
#[derive(
    Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd,
)]
pub enum AnswerKey {
    #[default]
    A,
    B,
    C,
}

impl AnswerKey {
    pub const ALL: [AnswerKey; 3] = [AnswerKey::A, AnswerKey::B, AnswerKey::C];

    pub fn as_char(self) -> char {
        match self {
            AnswerKey::A => 'A',
            AnswerKey::B => 'B',
            AnswerKey::C => 'C',
        }
    }

    /// Interpreta "a", " B ", "C." ... Solo mira el primer carácter no blanco.
    pub fn parse(value: &str) -> Option<AnswerKey> {
        match value.trim().chars().next()?.to_ascii_uppercase() {
            'A' => Some(AnswerKey::A),
            'B' => Some(AnswerKey::B),
            'C' => Some(AnswerKey::C),
            _ => None,
        }
    }

    /// Las otras dos claves, en orden.
    pub fn others(self) -> impl Iterator<Item = AnswerKey> {
        AnswerKey::ALL.into_iter().filter(move |k| *k != self)
    }
}

impl fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Un valor por clave A/B/C. En JSON se guarda como `{ "A": .., "B": .., "C": .. }`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct PerKey<T> {
    #[serde(rename = "A", default)]
    pub a: T,
    #[serde(rename = "B", default)]
    pub b: T,
    #[serde(rename = "C", default)]
    pub c: T,
}

impl<T> PerKey<T> {
    pub fn new(a: T, b: T, c: T) -> Self {
        Self { a, b, c }
    }

    pub fn get(&self, key: AnswerKey) -> &T {
        match key {
            AnswerKey::A => &self.a,
            AnswerKey::B => &self.b,
            AnswerKey::C => &self.c,
        }
    }

    pub fn get_mut(&mut self, key: AnswerKey) -> &mut T {
        match key {
            AnswerKey::A => &mut self.a,
            AnswerKey::B => &mut self.b,
            AnswerKey::C => &mut self.c,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> PerKey<U> {
        PerKey {
            a: f(self.a),
            b: f(self.b),
            c: f(self.c),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (AnswerKey, &T)> {
        AnswerKey::ALL.into_iter().map(move |k| (k, self.get(k)))
    }
}

impl<T: Clone> PerKey<T> {
    /// El mismo valor en las tres claves.
    pub fn repeat(value: T) -> Self {
        Self {
            a: value.clone(),
            b: value.clone(),
            c: value,
        }
    }
}

/// Opción de una pregunta de opción múltiple, con su bucle de refuerzo
/// (explicación + pregunta de reflexión) para cuando es la opción equivocada.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub teaching: String,
    #[serde(default)]
    pub reflection_question: String,
    #[serde(default)]
    pub reflection_answers: PerKey<String>,
    #[serde(default)]
    pub reflection_correct: AnswerKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection_wrong_messages: Option<PerKey<String>>,
    // Formato antiguo: un único mensaje para cualquier fallo en la reflexión
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection_wrong_message: Option<String>,
}

impl Answer {
    /// Mensajes por clave; si solo existe el mensaje único antiguo se repite en las tres.
    pub fn wrong_messages(&self) -> PerKey<String> {
        match &self.reflection_wrong_messages {
            Some(messages) => messages.clone(),
            None => PerKey::repeat(self.reflection_wrong_message.clone().unwrap_or_default()),
        }
    }

    pub fn wrong_message_for(&self, picked: AnswerKey) -> String {
        self.wrong_messages().get(picked).clone()
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RegionShape {
    Rectangle,
    Circle,
    Polygon,
}

/// Zona clicable sobre una imagen, en porcentajes (0-100).
/// - Rectangle: `[x, y, ancho, alto]`
/// - Circle: `[cx, cy, radio]`
/// - Polygon: `[x1, y1, x2, y2, ...]`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HotspotRegion {
    #[serde(rename = "type")]
    pub shape: RegionShape,
    pub coords: Vec<f64>,
}

impl HotspotRegion {
    /// Región que cubre la imagen entera. Es lo que produce el importador de texto,
    /// porque una región no se puede escribir en texto plano.
    pub fn full_image() -> Self {
        Self {
            shape: RegionShape::Rectangle,
            coords: vec![0.0, 0.0, 100.0, 100.0],
        }
    }

    pub fn is_placeholder(&self) -> bool {
        *self == Self::full_image()
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    Hotspot,
    DragDrop,
    FillBlank,
}

impl QuestionType {
    pub const ALL: [QuestionType; 4] = [
        QuestionType::MultipleChoice,
        QuestionType::Hotspot,
        QuestionType::DragDrop,
        QuestionType::FillBlank,
    ];

    /// Resuelve el campo `TYPE:` del formato de texto por subcadena.
    pub fn from_type_field(value: &str) -> QuestionType {
        let value = value.to_lowercase();
        if value.contains("hotspot") || value.contains("click") {
            QuestionType::Hotspot
        } else if value.contains("drag") || value.contains("drop") {
            QuestionType::DragDrop
        } else if value.contains("fill") || value.contains("blank") {
            QuestionType::FillBlank
        } else {
            QuestionType::MultipleChoice
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "Opción múltiple",
            QuestionType::Hotspot => "Hotspot",
            QuestionType::DragDrop => "Arrastrar y soltar",
            QuestionType::FillBlank => "Rellenar hueco",
        }
    }
}

/// Parte de la pregunta que depende del tipo. Se serializa con el campo `type`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(
    tag = "type",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum QuestionKind {
    MultipleChoice {
        answers: PerKey<Answer>,
        #[serde(default)]
        correct: AnswerKey,
    },
    Hotspot {
        hotspot_region: HotspotRegion,
        #[serde(default)]
        incorrect_message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        labeled_image_url: Option<String>,
    },
    DragDrop {
        #[serde(default)]
        sentence: String,
        #[serde(default)]
        correct_words: Vec<String>,
        #[serde(default)]
        distractor_words: Vec<String>,
        #[serde(default)]
        incorrect_message: String,
    },
    FillBlank {
        #[serde(default)]
        sentence: String,
        #[serde(default)]
        correct_answer: String,
        #[serde(default)]
        incorrect_message: String,
    },
}

impl QuestionKind {
    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionKind::MultipleChoice { .. } => QuestionType::MultipleChoice,
            QuestionKind::Hotspot { .. } => QuestionType::Hotspot,
            QuestionKind::DragDrop { .. } => QuestionType::DragDrop,
            QuestionKind::FillBlank { .. } => QuestionType::FillBlank,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", from = "StoredQuestion")]
pub struct Question {
    pub id: u32,
    pub checkpoint: u32,
    pub title: String,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub correct_message: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl Question {
    pub fn question_type(&self) -> QuestionType {
        self.kind.question_type()
    }

    /// Opciones y clave correcta si es de opción múltiple.
    pub fn choices(&self) -> Option<(&PerKey<Answer>, AnswerKey)> {
        match &self.kind {
            QuestionKind::MultipleChoice { answers, correct } => Some((answers, *correct)),
            _ => None,
        }
    }
}

// Forma en la que se lee una pregunta guardada: las preguntas antiguas no tienen `type`
// y se normalizan a opción múltiple aquí, en la frontera del modelo.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredQuestion {
    id: u32,
    #[serde(default = "first_checkpoint")]
    checkpoint: u32,
    #[serde(default)]
    title: String,
    #[serde(default)]
    question: String,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    correct_message: String,
    #[serde(flatten)]
    kind: StoredKind,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredKind {
    Tagged(QuestionKind),
    Legacy(LegacyChoice),
}

#[derive(Deserialize)]
struct LegacyChoice {
    answers: PerKey<Answer>,
    #[serde(default)]
    correct: AnswerKey,
}

fn first_checkpoint() -> u32 {
    1
}

impl From<StoredQuestion> for Question {
    fn from(stored: StoredQuestion) -> Self {
        let kind = match stored.kind {
            StoredKind::Tagged(kind) => kind,
            StoredKind::Legacy(legacy) => QuestionKind::MultipleChoice {
                answers: legacy.answers,
                correct: legacy.correct,
            },
        };
        Question {
            id: stored.id,
            checkpoint: stored.checkpoint,
            title: stored.title,
            question: stored.question,
            image_url: stored.image_url,
            correct_message: stored.correct_message,
            kind,
        }
    }
}

/// Letra que se gana al completar un checkpoint.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckpointLetter {
    #[serde(default)]
    pub letter: String,
    #[serde(default)]
    pub message: String,
}

/// Fondos por pantalla de un tema personalizado.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CustomThemeBackgrounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_entry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teaching: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection_wrong: Option<String>,
}

/// Contenido de un escape room.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameContent {
    pub questions: Vec<Question>,
    #[serde(default)]
    pub letters: Vec<CheckpointLetter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_theme_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_theme_backgrounds: Option<CustomThemeBackgrounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_word: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_clue: Option<String>,
}

impl GameContent {
    /// Número de checkpoints: el mayor entre el número de letras y el
    /// checkpoint más alto que usa alguna pregunta.
    pub fn checkpoint_count(&self) -> u32 {
        let highest = self.questions.iter().map(|q| q.checkpoint).max().unwrap_or(0);
        highest.max(self.letters.len() as u32)
    }

    pub fn question(&self, id: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Ids de las preguntas de un checkpoint, en orden de documento.
    pub fn question_ids_in_checkpoint(&self, checkpoint: u32) -> Vec<u32> {
        self.questions
            .iter()
            .filter(|q| q.checkpoint == checkpoint)
            .map(|q| q.id)
            .collect()
    }

    pub fn letter_for_checkpoint(&self, checkpoint: u32) -> Option<&CheckpointLetter> {
        let idx = checkpoint.checked_sub(1)? as usize;
        self.letters.get(idx)
    }

    pub fn final_word(&self) -> Option<&str> {
        self.final_word
            .as_deref()
            .map(str::trim)
            .filter(|w| !w.is_empty())
    }
}

/// Contenido de un quiz lineal. El checkpoint de cada pregunta no se usa.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuizContent {
    pub questions: Vec<Question>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_theme_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_theme_backgrounds: Option<CustomThemeBackgrounds>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: u32,
    #[serde(default)]
    pub front: String,
    #[serde(default)]
    pub back: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_image_url: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardContent {
    pub cards: Vec<Flashcard>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

/// Lo que se persiste por actividad.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "content", rename_all = "kebab-case")]
pub enum Document {
    EscapeRoom(GameContent),
    Quiz(QuizContent),
    Flashcards(FlashcardContent),
}

impl Document {
    /// Número de preguntas o tarjetas. Cero es un documento vacío.
    pub fn item_count(&self) -> usize {
        match self {
            Document::EscapeRoom(c) => c.questions.len(),
            Document::Quiz(c) => c.questions.len(),
            Document::Flashcards(c) => c.cards.len(),
        }
    }
}
