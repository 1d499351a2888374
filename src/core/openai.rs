use crate::core::prompt::{build_plan_prompt, extract_json_object, SYSTEM_PROMPT};
use crate::domain::model::{Plan, PlanRequest};
use crate::domain::ports::{ConfigProvider, PlanGenerator};
use crate::utils::error::{PlannerError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Plan generator backed by an OpenAI-compatible Chat Completions endpoint.
pub struct OpenAiPlanGenerator {
    model: String,
    api_key: String,
    endpoint: String,
    temperature: f32,
    max_tokens: u32,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiPlanGenerator {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C, api_key: String) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            model: config.model().to_string(),
            api_key,
            endpoint: format!("{}/chat/completions", config.base_url().trim_end_matches('/')),
            temperature: config.temperature(),
            max_tokens: config.max_tokens(),
            client,
        })
    }

    fn build_request_body(&self, request: &PlanRequest) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": build_plan_prompt(request)},
            ],
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
        })
    }
}

/// Parses the assistant message content into a plan.
pub fn parse_plan_content(content: &str) -> Result<Plan> {
    let json_text = extract_json_object(content);
    let plan: Plan = serde_json::from_str(json_text).map_err(|e| PlannerError::LlmResponseError {
        message: format!("invalid plan JSON: {}", e),
    })?;

    if plan.weeks.is_empty() {
        return Err(PlannerError::LlmResponseError {
            message: "plan has no weeks".to_string(),
        });
    }

    Ok(plan)
}

#[async_trait]
impl PlanGenerator for OpenAiPlanGenerator {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: &PlanRequest) -> Result<Plan> {
        tracing::debug!("Requesting plan from {} (model {})", self.endpoint, self.model);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.build_request_body(request))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Model API response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlannerError::ApiStatusError {
                status: status.as_u16(),
                body: body.chars().take(500).collect(),
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| PlannerError::LlmResponseError {
                message: "response has no message content".to_string(),
            })?;

        let plan = parse_plan_content(&content)?;
        tracing::debug!("Model returned {} weeks", plan.weeks.len());
        Ok(plan)
    }
}
