use crate::domain::model::PlanRequest;

pub const SYSTEM_PROMPT: &str = "You are a helpful planning assistant that returns valid JSON.";

pub fn build_plan_prompt(request: &PlanRequest) -> String {
    format!(
        r#"
You are an expert study planner and mentor with the persona: {mentor}.
User goal: "{goal}". Timeframe: {weeks} weeks.
Output a JSON with keys:
- milestones: [..]
- weeks: {{ "Week 1": {{ "Tasks":[..], "Resources":[..], "Reflection": "...", "Mentor_Tip": "..." }}, ... }}
- mentor_notes: "..."
Return only valid JSON. Keep resources short (title or url if relevant).
"#,
        mentor = request.mentor_style,
        goal = request.goal.trim(),
        weeks = request.weeks,
    )
}

/// Slice from the first `{` to the last `}`. Models often wrap JSON in prose
/// or code fences. Returns the trimmed input when there is no such span.
pub fn extract_json_object(text: &str) -> &str {
    let text = text.trim();
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start <= end => &text[start..=end],
        _ => text,
    }
}
