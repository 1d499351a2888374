pub mod export;
pub mod fallback;
pub mod flashcards;
pub mod openai;
pub mod pdf;
pub mod planner;
pub mod progress;
pub mod prompt;
pub mod recompress;
pub mod render;
pub mod session;

pub use crate::domain::model::{Flashcard, Plan, PlanOutcome, PlanRequest, PlanSource, PlannerSession, WeekPlan};
pub use crate::domain::ports::{ConfigProvider, PlanGenerator, Storage};
pub use crate::utils::error::Result;
