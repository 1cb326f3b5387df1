use crate::model::AnswerKey;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;

/// Orden en pantalla de las tres opciones de una pregunta.
pub type AnswerOrder = [AnswerKey; 3];

/// Orden por posición de la pregunta (1..=n) dentro del documento.
pub type AnswerOrders = BTreeMap<u32, AnswerOrder>;

pub fn shuffled_keys<R: Rng + ?Sized>(rng: &mut R) -> AnswerOrder {
    let mut keys = AnswerKey::ALL;
    keys.shuffle(rng);
    keys
}

/// Se calcula una sola vez al cargar la actividad: así una pregunta mantiene
/// la posición de sus opciones durante toda la partida.
pub fn generate_answer_orders(question_count: usize) -> AnswerOrders {
    generate_answer_orders_with(question_count, &mut rand::thread_rng())
}

pub fn generate_answer_orders_with<R: Rng + ?Sized>(
    question_count: usize,
    rng: &mut R,
) -> AnswerOrders {
    (1..=question_count as u32)
        .map(|position| (position, shuffled_keys(rng)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn one_permutation_per_question() {
        let orders = generate_answer_orders(7);
        assert_eq!(orders.len(), 7);
        assert_eq!(orders.keys().copied().collect::<Vec<_>>(), (1..=7).collect::<Vec<_>>());
        for order in orders.values() {
            let mut sorted = *order;
            sorted.sort();
            assert_eq!(sorted, AnswerKey::ALL);
        }
    }

    #[test]
    fn zero_questions_gives_no_orders() {
        assert!(generate_answer_orders(0).is_empty());
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let a = generate_answer_orders_with(5, &mut StdRng::seed_from_u64(42));
        let b = generate_answer_orders_with(5, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
