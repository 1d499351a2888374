use crate::core::progress::compute_progress;
use crate::core::recompress::recompress_plan;
use crate::domain::model::{PlanOutcome, PlanRequest, PlannerSession, Progress};
use crate::domain::ports::Storage;
use crate::utils::error::{PlannerError, Result};
use chrono::Utc;
use std::collections::BTreeSet;

pub const SESSION_FILE: &str = "session.json";

impl PlannerSession {
    /// A freshly generated plan starts with nothing checked, at week 1.
    pub fn new(request: PlanRequest, outcome: PlanOutcome) -> Self {
        Self {
            request,
            plan: outcome.plan,
            source: outcome.source,
            checked: BTreeSet::new(),
            current_week: 1,
            generated_at: Utc::now(),
        }
    }

    pub fn progress(&self) -> Progress {
        compute_progress(&self.plan, &self.checked)
    }

    /// `week` and `task` are 1-based, as shown by `show`.
    pub fn set_task_done(&mut self, week: usize, task: usize, done: bool) -> Result<String> {
        let entry = self.plan.week_at(week).ok_or_else(|| PlannerError::ValidationError {
            message: format!("Week {} is not part of this plan", week),
        })?;
        let text = task
            .checked_sub(1)
            .and_then(|i| entry.tasks.get(i))
            .ok_or_else(|| PlannerError::ValidationError {
                message: format!("Week {} has no task {} ({} tasks)", week, task, entry.tasks.len()),
            })?;

        let key = entry.task_key(text);
        let text = text.clone();
        if done {
            self.checked.insert(key);
        } else {
            self.checked.remove(&key);
        }
        Ok(text)
    }

    pub fn set_current_week(&mut self, week: usize) -> Result<()> {
        if self.plan.week_at(week).is_none() {
            return Err(PlannerError::ValidationError {
                message: format!(
                    "Week {} is not part of this plan ({} weeks)",
                    week,
                    self.plan.weeks.len()
                ),
            });
        }
        self.current_week = week;
        Ok(())
    }

    /// Task keys change with the new layout, so progress restarts.
    pub fn recompress(&mut self, remaining_weeks: u32) {
        let plan = std::mem::take(&mut self.plan);
        self.plan = recompress_plan(plan, remaining_weeks);
        self.checked.clear();
        self.current_week = 1;
    }
}

/// Persists the session as pretty JSON through a [`Storage`].
pub struct SessionStore<S: Storage> {
    storage: S,
}

impl<S: Storage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub async fn load(&self) -> Result<PlannerSession> {
        if !self.storage.exists(SESSION_FILE).await {
            return Err(PlannerError::SessionError {
                message: "No plan yet. Generate one with `agentic-planner plan --goal ...`".to_string(),
            });
        }

        let data = self.storage.read_file(SESSION_FILE).await?;
        let session = serde_json::from_slice(&data)?;
        Ok(session)
    }

    pub async fn save(&self, session: &PlannerSession) -> Result<()> {
        let data = serde_json::to_vec_pretty(session)?;
        tracing::debug!("Writing session ({} bytes)", data.len());
        self.storage.write_file(SESSION_FILE, &data).await
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
