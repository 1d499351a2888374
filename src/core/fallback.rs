use crate::domain::model::{Plan, PlanRequest, WeekPlan};
use rand::seq::IndexedRandom;
use rand::Rng;

const MILESTONE_TEMPLATES: [&str; 4] = ["Foundation", "Core Skills", "Practice & Projects", "Final Project"];

const MENTOR_TIPS: [&str; 3] = [
    "Consistency beats intensity. Try daily small steps.",
    "Break tasks into 25-minute Pomodoro sprints.",
    "Google errors, read docs, then refactor.",
];

const WEEKLY_RESOURCES: [&str; 2] = ["Official docs / Quick YouTube tutorial", "A short project or code-along"];

const WEEKLY_REFLECTION: &str = "What was the biggest challenge this week and one action to fix it?";

/// Template plan used whenever the model can't produce one. Only the mentor
/// tip depends on `rng`.
pub fn fallback_plan<R: Rng + ?Sized>(request: &PlanRequest, rng: &mut R) -> Plan {
    let weeks = request.weeks.max(1);
    let mentor = request.mentor_style.label();

    let mut milestones: Vec<String> = MILESTONE_TEMPLATES
        .iter()
        .take(weeks as usize)
        .enumerate()
        .map(|(i, name)| format!("{} - Week {}", name, i + 1))
        .collect();
    if weeks > 4 {
        milestones.push("Polish & Review".to_string());
    }

    let weeks_plan = (1..=weeks)
        .map(|w| WeekPlan {
            label: format!("Week {}", w),
            tasks: vec![
                format!("{} Task: Spend focused 60-90 minutes on a core topic (week {})", mentor, w),
                format!("Practice: 30 minutes of hands-on exercises (week {})", w),
            ],
            resources: WEEKLY_RESOURCES.iter().map(|r| r.to_string()).collect(),
            reflection: WEEKLY_REFLECTION.to_string(),
            mentor_tip: MENTOR_TIPS.choose(rng).copied().unwrap_or(MENTOR_TIPS[0]).to_string(),
        })
        .collect();

    Plan {
        milestones,
        weeks: weeks_plan,
        mentor_notes: format!(
            "As {}, I'll push you to be consistent. Goal: {} in {} weeks.",
            mentor,
            request.goal.trim(),
            weeks
        ),
    }
}
