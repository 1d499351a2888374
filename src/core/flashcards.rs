use crate::domain::model::{Flashcard, Plan};

pub const MAX_FLASHCARDS: usize = 5;
const TOPIC_MAX_CHARS: usize = 60;

pub fn generate_flashcards(plan: &Plan, week: usize) -> Vec<Flashcard> {
    let Some(entry) = plan.week(week) else {
        return Vec::new();
    };

    entry
        .tasks
        .iter()
        .take(MAX_FLASHCARDS)
        .map(|task| {
            let topic: String = task
                .split(':')
                .next()
                .unwrap_or_default()
                .chars()
                .take(TOPIC_MAX_CHARS)
                .collect();
            Flashcard {
                question: format!("What is the key action for: {}?", topic),
                answer: format!("Do: {}", task),
            }
        })
        .collect()
}
