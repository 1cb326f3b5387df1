use super::lines::{
    clean_lines, get_line_value, get_optional_value, legacy_header, numbered_header,
    starts_with_ignore_case,
};
use super::{DEFAULT_QUESTIONS_PER_CHECKPOINT, document_fields, parse_question_block};
use crate::model::{CheckpointLetter, GameContent};

/// Gramática de cabeceras presente en el texto.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderGrammar {
    /// `CHECKPOINT n - DECISION m`
    Legacy,
    /// `CHECKPOINT n` con bloques `QUESTION m` dentro
    Checkpoints,
    /// Solo `QUESTION m`
    Questions,
    /// Ninguna cabecera reconocible
    Unmarked,
}

pub fn detect_grammar(lines: &[&str]) -> HeaderGrammar {
    let has_questions = lines.iter().any(|l| numbered_header(l, "QUESTION").is_some());
    let has_checkpoints = lines.iter().any(|l| numbered_header(l, "CHECKPOINT").is_some());
    let has_legacy = lines.iter().any(|l| legacy_header(l).is_some());

    if has_questions {
        if has_checkpoints || has_legacy {
            HeaderGrammar::Checkpoints
        } else {
            HeaderGrammar::Questions
        }
    } else if has_legacy {
        HeaderGrammar::Legacy
    } else {
        HeaderGrammar::Unmarked
    }
}

struct Block<'a> {
    checkpoint: Option<u32>,
    lines: Vec<&'a str>,
}

fn split_blocks<'a>(lines: &[&'a str], grammar: HeaderGrammar) -> Vec<Block<'a>> {
    let mut blocks: Vec<Block<'a>> = Vec::new();
    // Las líneas sueltas fuera de un bloque se ignoran
    let mut open = false;
    let mut current_checkpoint = 1;

    for &line in lines {
        match grammar {
            HeaderGrammar::Legacy => {
                if let Some((checkpoint, _decision)) = legacy_header(line) {
                    blocks.push(Block {
                        checkpoint: Some(checkpoint),
                        lines: vec![line],
                    });
                    open = true;
                    continue;
                }
            }
            HeaderGrammar::Checkpoints | HeaderGrammar::Questions => {
                let checkpoint_header = numbered_header(line, "CHECKPOINT")
                    .or_else(|| legacy_header(line).map(|(cp, _)| cp));
                if let Some(cp) = checkpoint_header {
                    current_checkpoint = cp;
                    open = false;
                    continue;
                }
                if numbered_header(line, "QUESTION").is_some() {
                    let checkpoint = match grammar {
                        HeaderGrammar::Checkpoints => Some(current_checkpoint),
                        _ => None,
                    };
                    blocks.push(Block {
                        checkpoint,
                        lines: vec![line],
                    });
                    open = true;
                    continue;
                }
            }
            HeaderGrammar::Unmarked => {}
        }

        if open {
            if let Some(block) = blocks.last_mut() {
                block.lines.push(line);
            }
        }
    }

    blocks
}

/// Índice `n` de una línea `LETTER_n:` (no de `LETTER_n_MESSAGE:`).
fn letter_index(line: &str) -> Option<u32> {
    if !starts_with_ignore_case(line, "LETTER_") {
        return None;
    }
    let rest = &line["LETTER_".len()..];
    let digits_end = rest.find(|c: char| !c.is_ascii_digit())?;
    if digits_end == 0 || !rest[digits_end..].starts_with(':') {
        return None;
    }
    rest[..digits_end].parse().ok()
}

/// Una letra por checkpoint, desde 1 hasta el mayor `LETTER_n:` presente.
/// Los huecos quedan como letra vacía para no desalinear los checkpoints.
pub fn parse_letters(lines: &[&str]) -> Vec<CheckpointLetter> {
    let count = lines.iter().filter_map(|l| letter_index(l)).max().unwrap_or(0);
    (1..=count)
        .map(|i| {
            let letter = get_line_value(lines, &format!("LETTER_{i}:"));
            CheckpointLetter {
                letter: letter.chars().next().map(String::from).unwrap_or_default(),
                message: get_line_value(lines, &format!("LETTER_{i}_MESSAGE:")),
            }
        })
        .collect()
}

/// Importa un escape room desde texto.
pub fn parse_game_file(content: &str) -> GameContent {
    parse_game_file_grouped(content, DEFAULT_QUESTIONS_PER_CHECKPOINT)
}

/// Igual que `parse_game_file`, pero las preguntas sin checkpoint explícito se
/// agrupan de `per_checkpoint` en `per_checkpoint`.
pub fn parse_game_file_grouped(content: &str, per_checkpoint: u32) -> GameContent {
    let per_checkpoint = per_checkpoint.max(1);
    let lines = clean_lines(content);
    let grammar = detect_grammar(&lines);
    let blocks = split_blocks(&lines, grammar);

    let questions = blocks
        .iter()
        .enumerate()
        .map(|(idx, block)| {
            let id = idx as u32 + 1;
            let checkpoint = block
                .checkpoint
                .unwrap_or_else(|| id.div_ceil(per_checkpoint));
            parse_question_block(&block.lines, id, checkpoint)
        })
        .collect::<Vec<_>>();

    let fields = document_fields(&lines);
    let letters = parse_letters(&lines);

    log::debug!(
        "escape room importado: gramática {:?}, {} preguntas, {} letras",
        grammar,
        questions.len(),
        letters.len()
    );

    GameContent {
        questions,
        letters,
        theme: fields.theme,
        welcome_message: fields.welcome_message,
        final_word: get_optional_value(&lines, "FINAL_WORD:"),
        final_clue: get_optional_value(&lines, "FINAL_CLUE:"),
        ..GameContent::default()
    }
}
