//! AI client gateway
//!
//! The two operations the form needs from the model: a day-count
//! recommendation for a skill, and a full study plan. Each builds a prompt,
//! sends it with a response schema, and validates what comes back.
//!
//! The recommendation never fails (it degrades to [`DEFAULT_DAYS`]); plan
//! generation is all-or-nothing and reports a single user-facing error.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::llm::{LlmClient, LlmError, StructuredRequest};
use crate::plan::{
    DEFAULT_DAYS, DayPlan, Level, Plan, RECOMMENDED_DAYS_MAX, RECOMMENDED_DAYS_MIN, clamp_recommendation, days_schema,
    plan_schema,
};
use crate::prompts::{PlanContext, PromptLoader, RecommendContext};

/// Message shown to the user for any plan generation failure
pub const PLAN_FAILURE_MESSAGE: &str =
    "Failed to generate learning plan. The model may have returned an invalid format. Please try again.";

/// What went wrong while generating a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request failed or the API returned an error
    NetworkFailure,
    /// The response was empty or not valid JSON
    ParseFailure,
    /// The response was valid JSON of the wrong shape
    SchemaViolation,
    /// A prompt template failed to render
    PromptFailure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NetworkFailure => "network failure",
            Self::ParseFailure => "parse failure",
            Self::SchemaViolation => "schema violation",
            Self::PromptFailure => "prompt failure",
        };
        write!(f, "{}", name)
    }
}

/// Plan generation failure
///
/// Displays as the fixed user-facing message; `kind` and `detail` keep the
/// underlying cause for logs and callers that want to tell failures apart.
#[derive(Debug, Clone, Error)]
#[error("{}", PLAN_FAILURE_MESSAGE)]
pub struct GatewayError {
    pub kind: ErrorKind,
    pub detail: String,
}

impl GatewayError {
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// Classify a JSON decoding error: syntax and EOF are parse failures,
    /// well-formed JSON that does not fit the type is a schema violation
    fn from_json(err: serde_json::Error) -> Self {
        let kind = if err.is_data() {
            ErrorKind::SchemaViolation
        } else {
            ErrorKind::ParseFailure
        };
        Self::new(kind, err.to_string())
    }
}

impl From<LlmError> for GatewayError {
    fn from(err: LlmError) -> Self {
        Self::new(ErrorKind::NetworkFailure, err.to_string())
    }
}

/// Gateway between the form and the model
///
/// Built once and shared (`Arc<PlanGateway>`) with whoever needs it.
pub struct PlanGateway {
    client: Arc<dyn LlmClient>,
    prompts: PromptLoader,
}

impl PlanGateway {
    pub fn new(client: Arc<dyn LlmClient>, prompts: PromptLoader) -> Self {
        Self { client, prompts }
    }

    /// Gateway using the built-in prompt templates
    pub fn with_client(client: Arc<dyn LlmClient>) -> Self {
        Self::new(client, PromptLoader::embedded_only())
    }

    /// Recommend a day count for learning `skill`
    ///
    /// Always returns a value in `[3, 14]`. Blank skills return the default
    /// without calling the model, and every failure degrades to the default.
    pub async fn recommend_days(&self, skill: &str) -> u32 {
        debug!(%skill, "recommend_days: called");
        if skill.trim().is_empty() {
            debug!("recommend_days: blank skill, using default");
            return DEFAULT_DAYS;
        }

        match self.try_recommend_days(skill).await {
            Ok(days) => {
                info!(%skill, days, "recommend_days: recommended");
                days
            }
            Err(e) => {
                error!(%skill, kind = %e.kind, detail = %e.detail, "Error fetching recommended days");
                DEFAULT_DAYS
            }
        }
    }

    async fn try_recommend_days(&self, skill: &str) -> Result<u32, GatewayError> {
        let prompt = self
            .prompts
            .recommend_prompt(&RecommendContext::new(skill))
            .map_err(|e| GatewayError::new(ErrorKind::PromptFailure, e.to_string()))?;

        let request = StructuredRequest::new(prompt, days_schema());
        let response = self.client.generate(request).await?;
        debug!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "try_recommend_days: response received"
        );

        let text = response
            .text
            .ok_or_else(|| GatewayError::new(ErrorKind::ParseFailure, "empty response"))?;
        let value: Value = serde_json::from_str(text.trim()).map_err(GatewayError::from_json)?;

        // Clamp before rounding so a small non-zero answer lands on the minimum
        let days = days_field(&value)
            .map(|d| d.clamp(RECOMMENDED_DAYS_MIN as f64, RECOMMENDED_DAYS_MAX as f64).round() as i64);
        Ok(clamp_recommendation(days))
    }

    /// Generate a `days`-day plan for `skill` at `level`
    ///
    /// The result is sorted by day. The skill is not validated here; callers
    /// that must not send a blank skill check before calling.
    pub async fn generate_plan(&self, skill: &str, level: Level, days: u32) -> Result<Plan, GatewayError> {
        debug!(%skill, %level, days, "generate_plan: called");
        match self.try_generate_plan(skill, level, days).await {
            Ok(plan) => {
                info!(%skill, %level, days = plan.len(), "generate_plan: generated");
                Ok(plan)
            }
            Err(e) => {
                error!(%skill, kind = %e.kind, detail = %e.detail, "Error generating learning plan");
                Err(e)
            }
        }
    }

    async fn try_generate_plan(&self, skill: &str, level: Level, days: u32) -> Result<Plan, GatewayError> {
        let prompt = self
            .prompts
            .plan_prompt(&PlanContext::new(skill, level, days))
            .map_err(|e| GatewayError::new(ErrorKind::PromptFailure, e.to_string()))?;

        let response = self.client.generate(StructuredRequest::new(prompt, plan_schema())).await?;
        debug!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            finish_reason = ?response.finish_reason,
            "try_generate_plan: response received"
        );
        if response.is_truncated() {
            warn!("try_generate_plan: response hit the token limit");
        }

        let text = response
            .text
            .ok_or_else(|| GatewayError::new(ErrorKind::ParseFailure, "empty response"))?;
        let entries: Vec<DayPlan> = serde_json::from_str(text.trim()).map_err(GatewayError::from_json)?;

        let mut plan = Plan::new(entries);
        plan.sort_by_day();

        for issue in plan.issues(days) {
            warn!(%skill, %issue, "generate_plan: plan deviates from request");
        }

        Ok(plan)
    }
}

/// Pull `days` out of the recommendation object
///
/// Zero, null, an empty string and non-numbers count as missing. Any other
/// number is returned as given, and a non-empty numeric string (even "0")
/// counts as an answer.
fn days_field(value: &Value) -> Option<f64> {
    match value.get("days")? {
        Value::Number(n) => n.as_f64().filter(|d| *d != 0.0),
        Value::String(s) if !s.is_empty() => s.trim().parse::<f64>().ok().filter(|d| d.is_finite()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::MockLlmClient;
    use crate::llm::StructuredResponse;

    fn gateway(client: MockLlmClient) -> (PlanGateway, Arc<MockLlmClient>) {
        let client = Arc::new(client);
        (PlanGateway::with_client(client.clone()), client)
    }

    fn plan_json(days: &[u32]) -> String {
        let entries: Vec<Value> = days
            .iter()
            .map(|d| {
                serde_json::json!({
                    "day": d,
                    "goal": format!("Goal {}", d),
                    "concepts": ["first", "second"],
                    "task": format!("Task {}", d),
                })
            })
            .collect();
        Value::Array(entries).to_string()
    }

    #[tokio::test]
    async fn test_recommend_blank_skill_skips_model() {
        let (gw, client) = gateway(MockLlmClient::with_texts(&[]));

        assert_eq!(gw.recommend_days("").await, 5);
        assert_eq!(gw.recommend_days("   \t\n").await, 5);
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_recommend_in_range() {
        let (gw, client) = gateway(MockLlmClient::with_texts(&["{\"days\": 7}"]));
        assert_eq!(gw.recommend_days("Rust").await, 7);
        assert_eq!(client.call_count(), 1);
        assert!(client.prompts()[0].contains("\"Rust\""));
    }

    #[tokio::test]
    async fn test_recommend_clamps_high() {
        let (gw, _) = gateway(MockLlmClient::with_texts(&["{\"days\": 50}"]));
        assert_eq!(gw.recommend_days("Quantum field theory").await, 14);
    }

    #[tokio::test]
    async fn test_recommend_zero_falls_back_to_default() {
        let (gw, _) = gateway(MockLlmClient::with_texts(&["{\"days\": 0}"]));
        assert_eq!(gw.recommend_days("Juggling").await, 5);
    }

    #[tokio::test]
    async fn test_recommend_small_fraction_clamps_to_minimum() {
        let (gw, _) = gateway(MockLlmClient::with_texts(&["{\"days\": 0.4}"]));
        assert_eq!(gw.recommend_days("Whistling").await, 3);
    }

    #[tokio::test]
    async fn test_recommend_zero_string_clamps_to_minimum() {
        let (gw, _) = gateway(MockLlmClient::with_texts(&["{\"days\": \"0\"}"]));
        assert_eq!(gw.recommend_days("Whistling").await, 3);
    }

    #[tokio::test]
    async fn test_recommend_fraction_rounds() {
        let (gw, _) = gateway(MockLlmClient::with_texts(&["{\"days\": 6.6}"]));
        assert_eq!(gw.recommend_days("Chess").await, 7);
    }

    #[tokio::test]
    async fn test_recommend_clamps_low() {
        let (gw, _) = gateway(MockLlmClient::with_texts(&["{\"days\": 1}"]));
        assert_eq!(gw.recommend_days("Tying shoelaces").await, 3);
    }

    #[tokio::test]
    async fn test_recommend_missing_field() {
        let (gw, _) = gateway(MockLlmClient::with_texts(&["{}"]));
        assert_eq!(gw.recommend_days("Chess").await, 5);
    }

    #[tokio::test]
    async fn test_recommend_trims_whitespace() {
        let (gw, _) = gateway(MockLlmClient::with_texts(&["\n  {\"days\": 10}  \n"]));
        assert_eq!(gw.recommend_days("Chess").await, 10);
    }

    #[tokio::test]
    async fn test_recommend_malformed_json() {
        let (gw, _) = gateway(MockLlmClient::with_texts(&["{\"days\": "]));
        assert_eq!(gw.recommend_days("Chess").await, 5);
    }

    #[tokio::test]
    async fn test_recommend_network_failure() {
        let (gw, _) = gateway(MockLlmClient::failing(LlmError::ApiError {
            status: 503,
            message: "unavailable".to_string(),
        }));
        assert_eq!(gw.recommend_days("Chess").await, 5);
    }

    #[tokio::test]
    async fn test_recommend_empty_text() {
        let (gw, _) = gateway(MockLlmClient::new(vec![crate::llm::client::mock::Scripted {
            delay: std::time::Duration::ZERO,
            result: Ok(StructuredResponse::default()),
        }]));
        assert_eq!(gw.recommend_days("Chess").await, 5);
    }

    #[test]
    fn test_days_field_variants() {
        assert_eq!(days_field(&serde_json::json!({"days": 9})), Some(9.0));
        assert_eq!(days_field(&serde_json::json!({"days": 6.6})), Some(6.6));
        assert_eq!(days_field(&serde_json::json!({"days": "8"})), Some(8.0));
        assert_eq!(days_field(&serde_json::json!({"days": "0"})), Some(0.0));
        assert_eq!(days_field(&serde_json::json!({"days": 0})), None);
        assert_eq!(days_field(&serde_json::json!({"days": ""})), None);
        assert_eq!(days_field(&serde_json::json!({"days": null})), None);
        assert_eq!(days_field(&serde_json::json!({"days": "many"})), None);
        assert_eq!(days_field(&serde_json::json!([1, 2])), None);
        assert_eq!(days_field(&serde_json::json!(null)), None);
    }

    #[tokio::test]
    async fn test_generate_sorts_by_day() {
        let (gw, _) = gateway(MockLlmClient::with_texts(&[plan_json(&[2, 1, 3]).as_str()]));

        let plan = gw.generate_plan("Python", Level::Beginner, 3).await.unwrap();
        let order: Vec<u32> = plan.days().iter().map(|d| d.day).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_generate_prompt_carries_inputs() {
        let (gw, client) = gateway(MockLlmClient::with_texts(&[plan_json(&[1, 2, 3, 4]).as_str()]));

        gw.generate_plan("Woodworking", Level::Advanced, 4).await.unwrap();
        let prompt = &client.prompts()[0];
        assert!(prompt.contains("Skill: Woodworking"));
        assert!(prompt.contains("Current Level: Advanced"));
        assert!(prompt.contains("4-day"));
    }

    #[tokio::test]
    async fn test_generate_truncated_json_is_parse_failure() {
        let (gw, _) = gateway(MockLlmClient::with_texts(&["[{\"day\": 1, \"goal\": \"Basics\", \"conc"]));

        let err = gw.generate_plan("Python", Level::Beginner, 5).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ParseFailure);
        assert_eq!(err.to_string(), PLAN_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_generate_wrong_shape_is_schema_violation() {
        let (gw, _) = gateway(MockLlmClient::with_texts(&["[{\"day\": 1, \"goal\": \"Basics\"}]"]));

        let err = gw.generate_plan("Python", Level::Beginner, 1).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::SchemaViolation);
        assert_eq!(err.to_string(), PLAN_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_generate_object_instead_of_array_is_schema_violation() {
        let (gw, _) = gateway(MockLlmClient::with_texts(&["{\"days\": 5}"]));

        let err = gw.generate_plan("Python", Level::Beginner, 5).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::SchemaViolation);
    }

    #[tokio::test]
    async fn test_generate_network_failure() {
        let (gw, _) = gateway(MockLlmClient::failing(LlmError::MissingApiKey("API_KEY".to_string())));

        let err = gw.generate_plan("Python", Level::Beginner, 5).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NetworkFailure);
        assert!(err.detail.contains("API_KEY"));
        assert_eq!(err.to_string(), PLAN_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_generate_empty_skill_is_forwarded() {
        let (gw, client) = gateway(MockLlmClient::with_texts(&[plan_json(&[1]).as_str()]));

        let plan = gw.generate_plan("", Level::Beginner, 1).await.unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_generate_keeps_short_plan() {
        let (gw, _) = gateway(MockLlmClient::with_texts(&[plan_json(&[1, 2]).as_str()]));

        let plan = gw.generate_plan("Python", Level::Beginner, 5).await.unwrap();
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::SchemaViolation.to_string(), "schema violation");
        let err: GatewayError = LlmError::InvalidResponse("x".to_string()).into();
        assert_eq!(err.kind, ErrorKind::NetworkFailure);
    }
}
