use crate::utils::error::{PlannerError, Result};
use crate::utils::validation::{self, Validate};
use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

pub const MAX_GOAL_CHARS: usize = 200;
pub const MIN_WEEKS: u32 = 1;
pub const MAX_WEEKS: u32 = 52;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum MentorStyle {
    Coach,
    ZenMonk,
    TechBro,
}

impl MentorStyle {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Coach => "Coach (tough-love)",
            Self::ZenMonk => "Zen Monk (calm)",
            Self::TechBro => "Tech Bro (hype)",
        }
    }
}

impl fmt::Display for MentorStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub goal: String,
    pub weeks: u32,
    pub mentor_style: MentorStyle,
}

impl Validate for PlanRequest {
    fn validate(&self) -> Result<()> {
        if self.goal.trim().is_empty() {
            return Err(PlannerError::ValidationError {
                message: "Please enter a goal to generate a plan.".to_string(),
            });
        }
        validation::validate_max_chars("goal", self.goal.trim(), MAX_GOAL_CHARS)?;
        validation::validate_range("weeks", self.weeks, MIN_WEEKS, MAX_WEEKS)?;
        Ok(())
    }
}

/// One week of the plan. Field names on the wire follow the JSON shape the
/// model is asked to produce.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeekPlan {
    #[serde(skip)]
    pub label: String,
    #[serde(rename = "Tasks", alias = "tasks", default)]
    pub tasks: Vec<String>,
    #[serde(rename = "Resources", alias = "resources", default)]
    pub resources: Vec<String>,
    #[serde(rename = "Reflection", alias = "reflection", default)]
    pub reflection: String,
    #[serde(rename = "Mentor_Tip", alias = "mentor_tip", default)]
    pub mentor_tip: String,
}

impl WeekPlan {
    pub fn task_key(&self, task: &str) -> String {
        format!("{}_{}", self.label, task)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub milestones: Vec<String>,
    #[serde(default, with = "ordered_weeks")]
    pub weeks: Vec<WeekPlan>,
    #[serde(default)]
    pub mentor_notes: String,
}

impl Plan {
    /// 1-based position in the plan, whatever the week's label reads.
    pub fn week_at(&self, number: usize) -> Option<&WeekPlan> {
        number.checked_sub(1).and_then(|i| self.weeks.get(i))
    }

    /// Looks a week up by its `"Week {n}"` key.
    pub fn week(&self, number: usize) -> Option<&WeekPlan> {
        let label = format!("Week {}", number);
        self.weeks.iter().find(|w| w.label == label)
    }

    pub fn task_count(&self) -> usize {
        self.weeks.iter().map(|w| w.tasks.len()).sum()
    }
}

/// `weeks` is a JSON object keyed by label. Key order is the plan order, so
/// it is read and written as a sequence rather than through a sorted map.
mod ordered_weeks {
    use super::*;

    pub fn serialize<S: Serializer>(weeks: &[WeekPlan], serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(weeks.len()))?;
        for week in weeks {
            map.serialize_entry(&week.label, week)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<WeekPlan>, D::Error> {
        struct WeeksVisitor;

        impl<'de> Visitor<'de> for WeeksVisitor {
            type Value = Vec<WeekPlan>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object of week label to week plan")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
                let mut weeks = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((label, mut week)) = access.next_entry::<String, WeekPlan>()? {
                    week.label = label;
                    weeks.push(week);
                }
                Ok(weeks)
            }
        }

        deserializer.deserialize_map(WeeksVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanSource {
    Remote { model: String },
    Fallback { reason: String },
}

impl PlanSource {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanOutcome {
    pub plan: Plan,
    pub source: PlanSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub percent: u32,
    pub xp: u32,
}

/// Everything that survives between CLI invocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerSession {
    pub request: PlanRequest,
    pub plan: Plan,
    pub source: PlanSource,
    #[serde(default)]
    pub checked: BTreeSet<String>,
    #[serde(default = "first_week")]
    pub current_week: usize,
    pub generated_at: DateTime<Utc>,
}

fn first_week() -> usize {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_order_survives_round_trip() {
        let json = r#"{
            "milestones": ["Foundation - Week 1"],
            "weeks": {
                "Week 2": {"Tasks": ["b"]},
                "Week 10": {"Tasks": ["j"]},
                "Week 1": {"Tasks": ["a"], "Resources": ["docs"], "Reflection": "r", "Mentor_Tip": "t"}
            },
            "mentor_notes": "keep going"
        }"#;

        let plan: Plan = serde_json::from_str(json).unwrap();
        let labels: Vec<&str> = plan.weeks.iter().map(|w| w.label.as_str()).collect();
        assert_eq!(labels, vec!["Week 2", "Week 10", "Week 1"]);
        assert_eq!(plan.weeks[2].mentor_tip, "t");
        assert!(plan.weeks[0].resources.is_empty());

        let value = serde_json::to_value(&plan).unwrap();
        let keys: Vec<&String> = value["weeks"].as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 3);
        assert_eq!(value["weeks"]["Week 1"]["Mentor_Tip"], "t");
        assert!(value["weeks"]["Week 1"].get("label").is_none());
    }

    #[test]
    fn test_lowercase_week_fields_are_accepted() {
        let json = r#"{"weeks": {"Week 1": {"tasks": ["x"], "mentor_tip": "y"}}}"#;
        let plan: Plan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.weeks[0].tasks, vec!["x"]);
        assert_eq!(plan.weeks[0].mentor_tip, "y");
        assert!(plan.milestones.is_empty());
        assert_eq!(plan.mentor_notes, "");
    }

    #[test]
    fn test_week_lookup_and_task_key() {
        let json = r#"{"weeks": {"Week 1": {"Tasks": ["a", "b"]}, "Week 2": {"Tasks": ["c"]}}}"#;
        let plan: Plan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.task_count(), 3);
        let week = plan.week(2).unwrap();
        assert_eq!(week.task_key("c"), "Week 2_c");
        assert!(plan.week(3).is_none());
    }

    #[test]
    fn test_week_at_ignores_labels() {
        let json = r#"{"weeks": {"Week 1: Basics": {"Tasks": ["a"]}, "Week 2: Build": {"Tasks": ["b"]}}}"#;
        let plan: Plan = serde_json::from_str(json).unwrap();
        assert!(plan.week(1).is_none());
        assert_eq!(plan.week_at(1).unwrap().label, "Week 1: Basics");
        assert_eq!(plan.week_at(2).unwrap().tasks, vec!["b"]);
        assert!(plan.week_at(0).is_none());
        assert!(plan.week_at(3).is_none());
    }

    #[test]
    fn test_plan_request_validation() {
        let mut request = PlanRequest {
            goal: "Learn Django and deploy a small app".to_string(),
            weeks: 4,
            mentor_style: MentorStyle::Coach,
        };
        assert!(request.validate().is_ok());

        request.goal = "   ".to_string();
        assert!(matches!(
            request.validate(),
            Err(PlannerError::ValidationError { .. })
        ));

        request.goal = "x".repeat(201);
        assert!(request.validate().is_err());

        request.goal = "Learn Rust".to_string();
        request.weeks = 0;
        assert!(request.validate().is_err());
        request.weeks = 53;
        assert!(request.validate().is_err());
        request.weeks = 52;
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_mentor_style_labels() {
        assert_eq!(MentorStyle::Coach.to_string(), "Coach (tough-love)");
        assert_eq!(MentorStyle::ZenMonk.label(), "Zen Monk (calm)");
        assert_eq!(
            serde_json::to_string(&MentorStyle::TechBro).unwrap(),
            "\"tech-bro\""
        );
    }
}
