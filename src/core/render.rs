use crate::core::progress::{progress_bar, progress_tree};
use crate::domain::model::{Flashcard, PlanSource, PlannerSession, Progress};
use std::fmt::Write;

const BAR_WIDTH: usize = 30;

pub fn render_session(session: &PlannerSession) -> String {
    let mut out = String::new();
    let plan = &session.plan;

    let _ = writeln!(out, "🎯 Goal: {}", session.request.goal.trim());
    let _ = writeln!(
        out,
        "   {} weeks · mentor: {} · {}",
        session.request.weeks,
        session.request.mentor_style,
        match &session.source {
            PlanSource::Remote { model } => format!("generated by {}", model),
            PlanSource::Fallback { .. } => "template plan".to_string(),
        }
    );
    out.push('\n');

    out.push_str("Milestones\n");
    for milestone in &plan.milestones {
        let _ = writeln!(out, "  • {}", milestone);
    }
    out.push('\n');

    out.push_str("Weekly Plan\n");
    for (n, week) in plan.weeks.iter().enumerate() {
        let marker = if n + 1 == session.current_week { "  ← current" } else { "" };
        let _ = writeln!(out, "── {}{}", week.label, marker);

        for (i, task) in week.tasks.iter().enumerate() {
            let mark = if session.checked.contains(&week.task_key(task)) { "x" } else { " " };
            let _ = writeln!(out, "  [{}] {}. {}", mark, i + 1, task);
        }
        if !week.resources.is_empty() {
            out.push_str("  Resources:\n");
            for resource in &week.resources {
                let _ = writeln!(out, "    - {}", resource);
            }
        }
        if !week.reflection.is_empty() {
            let _ = writeln!(out, "  Reflection prompt: {}", week.reflection);
        }
        if !week.mentor_tip.is_empty() {
            let _ = writeln!(out, "  Mentor tip: {}", week.mentor_tip);
        }
        out.push('\n');
    }

    if !plan.mentor_notes.is_empty() {
        out.push_str("Mentor Notes\n");
        for line in plan.mentor_notes.lines() {
            let _ = writeln!(out, "  {}", line);
        }
        out.push('\n');
    }

    out.push_str(&render_progress(&session.progress()));
    out
}

pub fn render_progress(progress: &Progress) -> String {
    format!(
        "Progress {} {}% ({}/{} tasks)\nProgress Tree: {}\nXP: {}\n",
        progress_bar(progress.percent, BAR_WIDTH),
        progress.percent,
        progress.completed,
        progress.total,
        progress_tree(progress.percent),
        progress.xp
    )
}

pub fn render_flashcards(week: usize, cards: &[Flashcard]) -> String {
    let mut out = format!("Flashcards - Week {}\n", week);
    if cards.is_empty() {
        out.push_str("  (no tasks for this week)\n");
    }
    for (i, card) in cards.iter().enumerate() {
        let _ = writeln!(out, "Q{}. {}", i + 1, card.question);
        let _ = writeln!(out, "A{}. {}", i + 1, card.answer);
    }
    out
}
