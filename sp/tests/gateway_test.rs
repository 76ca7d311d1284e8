//! End-to-end tests for the gateway and form against a scripted model
//!
//! The fake client answers by looking at the response schema it is given, the
//! same way a structured-output model would.

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use skillplan::form::FormController;
use skillplan::gateway::{PLAN_FAILURE_MESSAGE, PlanGateway};
use skillplan::llm::{LlmClient, LlmError, StructuredRequest, StructuredResponse};
use skillplan::plan::Level;
use tokio::time::Instant;

struct FakeModel {
    days_reply: String,
    plan_reply: String,
    requests: Mutex<Vec<StructuredRequest>>,
}

impl FakeModel {
    fn new(days_reply: &str, plan_reply: &str) -> Arc<Self> {
        Arc::new(Self {
            days_reply: days_reply.to_string(),
            plan_reply: plan_reply.to_string(),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<StructuredRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for FakeModel {
    async fn generate(&self, request: StructuredRequest) -> Result<StructuredResponse, LlmError> {
        let schema = request.response_schema.to_json();
        self.requests.lock().unwrap().push(request);
        let reply = match schema["type"].as_str() {
            Some("OBJECT") => &self.days_reply,
            Some("ARRAY") => &self.plan_reply,
            other => return Err(LlmError::InvalidResponse(format!("unexpected schema {:?}", other))),
        };
        Ok(StructuredResponse::text(reply.as_str()))
    }
}

const PYTHON_PLAN: &str = r#"[
    {"day": 3, "goal": "Functions", "concepts": ["def", "arguments"], "task": "Write a temperature converter"},
    {"day": 1, "goal": "Setup and syntax", "concepts": ["interpreter", "print", "variables"], "task": "Print your name"},
    {"day": 5, "goal": "Files", "concepts": ["open", "with"], "task": "Count words in a file"},
    {"day": 2, "goal": "Control flow", "concepts": ["if", "for", "while"], "task": "FizzBuzz"},
    {"day": 4, "goal": "Collections", "concepts": ["lists", "dicts"], "task": "Build a phone book"}
]"#;

#[tokio::test]
async fn test_python_beginner_five_days() {
    let model = FakeModel::new(r#"{"days": 5}"#, PYTHON_PLAN);
    let gateway = PlanGateway::with_client(model.clone());

    let plan = gateway.generate_plan("Python", Level::Beginner, 5).await.unwrap();

    let days: Vec<u32> = plan.days().iter().map(|d| d.day).collect();
    assert_eq!(days, vec![1, 2, 3, 4, 5]);
    for day in plan.days() {
        assert!((2..=3).contains(&day.concepts.len()));
        assert!(!day.goal.is_empty());
        assert!(!day.task.is_empty());
    }

    let requests = model.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].prompt.contains("Python"));
    assert!(requests[0].prompt.contains("Beginner"));
}

#[tokio::test]
async fn test_recommendation_clamped_into_range() {
    for (reply, expected) in [
        (r#"{"days": 1}"#, 3),
        (r#"{"days": 40}"#, 14),
        (r#"{"days": 0}"#, 5),
        (r#"{}"#, 5),
        (r#"{"days": 8}"#, 8),
    ] {
        let gateway = PlanGateway::with_client(FakeModel::new(reply, "[]"));
        assert_eq!(gateway.recommend_days("Chess").await, expected, "reply {}", reply);
    }
}

#[tokio::test]
async fn test_blank_skill_skips_model() {
    let model = FakeModel::new(r#"{"days": 9}"#, "[]");
    let gateway = PlanGateway::with_client(model.clone());

    assert_eq!(gateway.recommend_days("   ").await, 5);
    assert!(model.requests().is_empty());
}

#[tokio::test]
async fn test_malformed_plan_is_all_or_nothing() {
    // Second entry is missing its task
    let reply = r#"[
        {"day": 1, "goal": "Basics", "concepts": ["a", "b"], "task": "Do it"},
        {"day": 2, "goal": "More", "concepts": ["c", "d"]}
    ]"#;
    let gateway = PlanGateway::with_client(FakeModel::new("{}", reply));

    let err = gateway.generate_plan("Go", Level::Intermediate, 2).await.unwrap_err();
    assert_eq!(err.to_string(), PLAN_FAILURE_MESSAGE);
}

#[tokio::test]
async fn test_form_flow_recommend_then_generate() {
    let model = FakeModel::new(r#"{"days": 7}"#, PYTHON_PLAN);
    let gateway = Arc::new(PlanGateway::with_client(model.clone()));
    let quiet = Duration::from_millis(700);
    let mut ctl = FormController::new(gateway, quiet);

    let t0 = Instant::now();
    ctl.set_skill("Python", t0);
    assert!(ctl.poll(t0 + quiet));

    let completion = tokio::time::timeout(Duration::from_secs(5), ctl.next_completion())
        .await
        .unwrap()
        .unwrap();
    ctl.handle_completion(completion);
    assert_eq!(ctl.state().days, 7);

    ctl.set_days(5);
    assert!(ctl.submit());
    let completion = tokio::time::timeout(Duration::from_secs(5), ctl.next_completion())
        .await
        .unwrap()
        .unwrap();
    ctl.handle_completion(completion);

    let state = ctl.state();
    assert!(!state.is_loading);
    assert!(state.error.is_none());
    assert_eq!(state.plan.as_ref().map(|p| p.len()), Some(5));
    assert_eq!(model.requests().len(), 2);
}
