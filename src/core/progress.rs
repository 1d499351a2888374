use crate::domain::model::{Plan, Progress};
use std::collections::BTreeSet;

pub const XP_PER_PERCENT: u32 = 10;

pub fn compute_progress(plan: &Plan, checked: &BTreeSet<String>) -> Progress {
    let mut total = 0;
    let mut completed = 0;
    for week in &plan.weeks {
        for task in &week.tasks {
            total += 1;
            if checked.contains(&week.task_key(task)) {
                completed += 1;
            }
        }
    }

    let percent = if total > 0 { (completed * 100 / total) as u32 } else { 0 };

    Progress {
        completed,
        total,
        percent,
        xp: percent * XP_PER_PERCENT,
    }
}

pub fn progress_tree(percent: u32) -> &'static str {
    match percent {
        p if p < 10 => "🌱",
        p if p < 40 => "🌱🌿",
        p if p < 70 => "🌱🌿🌳",
        _ => "🌱🌿🌳🌲",
    }
}

/// `[#####-----]` style bar, `width` cells wide.
pub fn progress_bar(percent: u32, width: usize) -> String {
    let filled = (percent.min(100) as usize * width) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
