use crate::core::fallback::fallback_plan;
use crate::core::openai::OpenAiPlanGenerator;
use crate::domain::model::{PlanOutcome, PlanRequest, PlanSource};
use crate::domain::ports::{ConfigProvider, PlanGenerator};
use crate::utils::error::{PlannerError, Result};
use crate::utils::validation::Validate;

/// Tries the remote generator once and falls back to the template plan on
/// any failure. Generation failures never surface as errors.
pub struct Planner {
    remote: Option<Box<dyn PlanGenerator>>,
    offline_reason: String,
}

impl Planner {
    pub fn new(remote: Box<dyn PlanGenerator>) -> Self {
        Self {
            remote: Some(remote),
            offline_reason: String::new(),
        }
    }

    pub fn offline(reason: impl Into<String>) -> Self {
        Self {
            remote: None,
            offline_reason: reason.into(),
        }
    }

    /// Remote generator when an API key is available, template plans otherwise.
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C, offline: bool) -> Self {
        if offline {
            return Self::offline("offline mode requested");
        }

        match config.api_key() {
            Some(api_key) => Self::from_built(OpenAiPlanGenerator::from_config(config, api_key)),
            None => Self::offline(PlannerError::MissingApiKey.to_string()),
        }
    }

    /// A generator that could not be built (e.g. HTTP client setup) means
    /// template plans, same as any later remote failure.
    fn from_built<G: PlanGenerator + 'static>(built: Result<G>) -> Self {
        match built {
            Ok(generator) => Self::new(Box::new(generator)),
            Err(e) => {
                tracing::warn!("⚠️ Could not set up the model client, using template plans ({})", e);
                Self::offline(e.to_string())
            }
        }
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Only request validation can fail here.
    pub async fn generate(&self, request: &PlanRequest) -> Result<PlanOutcome> {
        request.validate()?;

        let Some(remote) = &self.remote else {
            tracing::info!("📝 Using template plan ({})", self.offline_reason);
            return Ok(self.fallback(request, self.offline_reason.clone()));
        };

        tracing::info!("🤖 Generating plan with {}", remote.name());
        match remote.generate(request).await {
            Ok(plan) => {
                tracing::info!("✅ Model returned a plan with {} weeks", plan.weeks.len());
                Ok(PlanOutcome {
                    plan,
                    source: PlanSource::Remote {
                        model: remote.name().to_string(),
                    },
                })
            }
            Err(e) => {
                tracing::warn!(
                    "⚠️ Model call failed or returned invalid JSON. Using fallback plan. ({})",
                    e
                );
                Ok(self.fallback(request, e.to_string()))
            }
        }
    }

    fn fallback(&self, request: &PlanRequest, reason: String) -> PlanOutcome {
        PlanOutcome {
            plan: fallback_plan(request, &mut rand::rng()),
            source: PlanSource::Fallback { reason },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::{TomlConfig, API_KEY_ENV};
    use crate::domain::model::{MentorStyle, Plan, WeekPlan};
    use async_trait::async_trait;
    use httpmock::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct StubGenerator {
        result: fn() -> Result<Plan>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl PlanGenerator for StubGenerator {
        fn name(&self) -> &str {
            "stub-model"
        }

        async fn generate(&self, _request: &PlanRequest) -> Result<Plan> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.result)()
        }
    }

    fn request(weeks: u32) -> PlanRequest {
        PlanRequest {
            goal: "Ship a side project".to_string(),
            weeks,
            mentor_style: MentorStyle::TechBro,
        }
    }

    fn one_week_plan() -> Result<Plan> {
        Ok(Plan {
            milestones: vec!["Launch".to_string()],
            weeks: vec![WeekPlan {
                label: "Week 1".to_string(),
                tasks: vec!["Ship it".to_string()],
                ..Default::default()
            }],
            mentor_notes: "LFG".to_string(),
        })
    }

    fn broken_plan() -> Result<Plan> {
        Err(PlannerError::LlmResponseError {
            message: "truncated".to_string(),
        })
    }

    #[tokio::test]
    async fn test_remote_plan_is_used_when_available() {
        let calls = Arc::new(AtomicUsize::new(0));
        let planner = Planner::new(Box::new(StubGenerator {
            result: one_week_plan,
            calls: calls.clone(),
        }));

        let outcome = planner.generate(&request(3)).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(outcome.plan.milestones, vec!["Launch"]);
        assert_eq!(
            outcome.source,
            PlanSource::Remote {
                model: "stub-model".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back() {
        let calls = Arc::new(AtomicUsize::new(0));
        let planner = Planner::new(Box::new(StubGenerator {
            result: broken_plan,
            calls: calls.clone(),
        }));

        let outcome = planner.generate(&request(3)).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(outcome.plan.weeks.len(), 3);
        match outcome.source {
            PlanSource::Fallback { reason } => assert!(reason.contains("truncated")),
            other => panic!("unexpected source: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_request_is_rejected_before_any_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let planner = Planner::new(Box::new(StubGenerator {
            result: one_week_plan,
            calls: calls.clone(),
        }));

        let mut bad = request(3);
        bad.goal = "   ".to_string();
        assert!(planner.generate(&bad).await.is_err());
        assert!(planner.generate(&request(0)).await.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_offline_flag_skips_remote() {
        let config = TomlConfig::from_toml_str("[llm]\napi_key = \"sk-test\"\n").unwrap();
        let planner = Planner::from_config(&config, true);
        assert!(!planner.has_remote());

        let outcome = planner.generate(&request(2)).await.unwrap();
        assert!(outcome.source.is_fallback());
        assert_eq!(outcome.plan.weeks.len(), 2);
    }

    #[tokio::test]
    async fn test_api_key_from_environment() {
        // 同一個測試內設定再移除，避免與其他測試競爭環境變數
        let config = TomlConfig::from_toml_str("").unwrap();

        std::env::set_var(API_KEY_ENV, "sk-from-env");
        let planner = Planner::from_config(&config, false);
        assert!(planner.has_remote());

        std::env::remove_var(API_KEY_ENV);
        let planner = Planner::from_config(&config, false);
        assert!(!planner.has_remote());

        let outcome = planner.generate(&request(3)).await.unwrap();
        assert_eq!(outcome.plan.weeks.len(), 3);
        match outcome.source {
            PlanSource::Fallback { reason } => assert!(reason.contains("No API key")),
            other => panic!("unexpected source: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_client_setup_failure_goes_offline() {
        let built: Result<StubGenerator> = Err(PlannerError::ConfigError {
            message: "TLS backend unavailable".to_string(),
        });
        let planner = Planner::from_built(built);
        assert!(!planner.has_remote());

        let outcome = planner.generate(&request(2)).await.unwrap();
        match outcome.source {
            PlanSource::Fallback { reason } => assert!(reason.contains("TLS backend unavailable")),
            other => panic!("unexpected source: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_server_error_falls_back_to_template() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(500);
            })
            .await;

        let config = TomlConfig::from_toml_str(&format!(
            "[llm]\nbase_url = \"{}\"\napi_key = \"sk-test\"\n",
            server.base_url()
        ))
        .unwrap();
        let planner = Planner::from_config(&config, false);
        assert!(planner.has_remote());

        let outcome = planner.generate(&request(5)).await.unwrap();

        api_mock.assert_async().await;
        assert!(outcome.source.is_fallback());
        assert_eq!(outcome.plan.milestones.last().unwrap(), "Polish & Review");
    }
}
