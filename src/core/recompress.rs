use crate::domain::model::{Plan, WeekPlan};

const CATCH_UP_TASK: &str = "Catch-up session: review core concepts";
const DEFAULT_RESOURCE: &str = "Docs";
const RECOMPRESSED_REFLECTION: &str = "What will you prioritize next week?";
const RECOMPRESSED_TIP: &str = "Focus on the highest-impact tasks first.";

fn slice_of(items: &[String], start: usize, end: usize) -> Vec<String> {
    let start = start.min(items.len());
    let end = end.min(items.len());
    items[start..end].to_vec()
}

/// Spreads every task of `plan` over `remaining_weeks` weeks. Tasks past
/// `remaining * per_week` are dropped; milestones and mentor notes are kept.
pub fn recompress_plan(mut plan: Plan, remaining_weeks: u32) -> Plan {
    let all_tasks: Vec<String> = plan.weeks.iter().flat_map(|w| w.tasks.iter().cloned()).collect();
    let all_resources: Vec<String> = plan
        .weeks
        .iter()
        .flat_map(|w| w.resources.iter().cloned())
        .collect();

    let remaining = remaining_weeks.max(1) as usize;
    let per_week = (all_tasks.len() / remaining).max(1);

    plan.weeks = (0..remaining)
        .map(|i| {
            let (start, end) = (i * per_week, (i + 1) * per_week);

            let mut tasks = slice_of(&all_tasks, start, end);
            if tasks.is_empty() {
                tasks.push(CATCH_UP_TASK.to_string());
            }

            let resources = if all_resources.is_empty() {
                vec![DEFAULT_RESOURCE.to_string()]
            } else {
                slice_of(&all_resources, start, end)
            };

            WeekPlan {
                label: format!("Week {}", i + 1),
                tasks,
                resources,
                reflection: RECOMPRESSED_REFLECTION.to_string(),
                mentor_tip: RECOMPRESSED_TIP.to_string(),
            }
        })
        .collect();

    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(weeks: usize, tasks_per_week: usize, with_resources: bool) -> Plan {
        Plan {
            milestones: vec!["M".to_string()],
            weeks: (1..=weeks)
                .map(|w| WeekPlan {
                    label: format!("Week {}", w),
                    tasks: (1..=tasks_per_week).map(|t| format!("w{}t{}", w, t)).collect(),
                    resources: if with_resources {
                        vec![format!("r{}", w)]
                    } else {
                        Vec::new()
                    },
                    reflection: "old".to_string(),
                    mentor_tip: "old".to_string(),
                })
                .collect(),
            mentor_notes: "notes".to_string(),
        }
    }

    #[test]
    fn test_tasks_are_spread_evenly() {
        let result = recompress_plan(plan(4, 2, true), 2);

        assert_eq!(result.weeks.len(), 2);
        assert_eq!(result.weeks[0].tasks, vec!["w1t1", "w1t2", "w2t1", "w2t2"]);
        assert_eq!(result.weeks[1].tasks, vec!["w3t1", "w3t2", "w4t1", "w4t2"]);
        assert_eq!(result.weeks[0].resources, vec!["r1", "r2", "r3", "r4"]);
        assert!(result.weeks[1].resources.is_empty());
        assert_eq!(result.weeks[1].reflection, RECOMPRESSED_REFLECTION);
        assert_eq!(result.weeks[1].mentor_tip, RECOMPRESSED_TIP);
        assert_eq!(result.milestones, vec!["M"]);
        assert_eq!(result.mentor_notes, "notes");
    }

    #[test]
    fn test_more_weeks_than_tasks_adds_catch_up() {
        let result = recompress_plan(plan(1, 2, false), 4);

        assert_eq!(result.weeks.len(), 4);
        assert_eq!(result.weeks[0].tasks, vec!["w1t1"]);
        assert_eq!(result.weeks[1].tasks, vec!["w1t2"]);
        assert_eq!(result.weeks[2].tasks, vec![CATCH_UP_TASK]);
        assert_eq!(result.weeks[3].label, "Week 4");
        assert!(result.weeks.iter().all(|w| w.resources == vec![DEFAULT_RESOURCE]));
    }

    #[test]
    fn test_remainder_tasks_are_dropped() {
        let result = recompress_plan(plan(1, 5, false), 2);
        assert_eq!(result.weeks[0].tasks, vec!["w1t1", "w1t2"]);
        assert_eq!(result.weeks[1].tasks, vec!["w1t3", "w1t4"]);
    }

    #[test]
    fn test_zero_remaining_weeks_means_one() {
        let result = recompress_plan(plan(3, 1, false), 0);
        assert_eq!(result.weeks.len(), 1);
        assert_eq!(result.weeks[0].tasks, vec!["w1t1", "w2t1", "w3t1"]);
    }
}
