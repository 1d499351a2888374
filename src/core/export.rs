use crate::core::pdf::{create_pdf_bytes, plan_title};
use crate::domain::model::PlannerSession;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Json,
}

impl ExportFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Json => "application/json",
        }
    }
}

pub fn render_export(session: &PlannerSession, format: ExportFormat, now: DateTime<Utc>) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Pdf => create_pdf_bytes(&session.plan, &plan_title(&session.request.goal), now),
        ExportFormat::Json => Ok(serde_json::to_vec_pretty(&session.plan)?),
    }
}

/// Writes each `(format, path)` target through `storage`, returning the
/// paths written.
pub async fn export_session<S: Storage>(
    storage: &S,
    session: &PlannerSession,
    targets: &[(ExportFormat, String)],
) -> Result<Vec<String>> {
    let now = Utc::now();
    let mut written = Vec::with_capacity(targets.len());

    for (format, path) in targets {
        let data = render_export(session, *format, now)?;
        tracing::debug!("Writing {} ({} bytes, {})", path, data.len(), format.mime_type());
        storage.write_file(path, &data).await?;
        written.push(path.clone());
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cli::LocalStorage;
    use crate::core::fallback::fallback_plan;
    use crate::domain::model::{MentorStyle, Plan, PlanOutcome, PlanRequest, PlanSource};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn session() -> PlannerSession {
        let request = PlanRequest {
            goal: "Learn Django and deploy a small app".to_string(),
            weeks: 3,
            mentor_style: MentorStyle::TechBro,
        };
        let plan = fallback_plan(&request, &mut StdRng::seed_from_u64(9));
        PlannerSession::new(
            request,
            PlanOutcome {
                plan,
                source: PlanSource::Fallback {
                    reason: "offline".to_string(),
                },
            },
        )
    }

    #[test]
    fn test_json_export_is_the_plan_wire_format() {
        let session = session();
        let data = render_export(&session, ExportFormat::Json, Utc::now()).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&data).unwrap();
        assert!(value["weeks"]["Week 3"]["Tasks"].is_array());
        assert!(value.get("checked").is_none());

        let plan: Plan = serde_json::from_slice(&data).unwrap();
        assert_eq!(plan, session.plan);
    }

    #[tokio::test]
    async fn test_export_writes_both_files() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        let written = export_session(
            &storage,
            &session(),
            &[
                (ExportFormat::Pdf, "agentic_plan.pdf".to_string()),
                (ExportFormat::Json, "agentic_plan.json".to_string()),
            ],
        )
        .await
        .unwrap();

        assert_eq!(written, vec!["agentic_plan.pdf", "agentic_plan.json"]);
        let pdf = std::fs::read(temp_dir.path().join("agentic_plan.pdf")).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
        assert!(temp_dir.path().join("agentic_plan.json").exists());
    }
}
