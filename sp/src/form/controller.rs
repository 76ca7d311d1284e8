//! Form controller
//!
//! Binds the form state, the debounce trigger and the gateway. Gateway calls
//! run as spawned tasks and report back over a channel; only the controller's
//! owner mutates the state, one completion at a time.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::debug;

use super::debounce::Debouncer;
use super::state::FormState;
use crate::gateway::{GatewayError, PlanGateway};
use crate::plan::{Level, Plan};

/// Result of a spawned gateway call
#[derive(Debug)]
pub enum Completion {
    Recommendation { seq: u64, days: u32 },
    Plan(Result<Plan, GatewayError>),
}

/// Drives the form
pub struct FormController {
    state: FormState,
    debouncer: Debouncer,
    gateway: Arc<PlanGateway>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl FormController {
    pub fn new(gateway: Arc<PlanGateway>, debounce: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: FormState::new(),
            debouncer: Debouncer::new(debounce),
            gateway,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut FormState {
        &mut self.state
    }

    /// Replace the skill text
    pub fn set_skill(&mut self, skill: impl Into<String>, now: Instant) {
        self.state.skill = skill.into();
        self.skill_edited(now);
    }

    pub fn push_skill_char(&mut self, c: char, now: Instant) {
        self.state.skill.push(c);
        self.skill_edited(now);
    }

    pub fn pop_skill_char(&mut self, now: Instant) {
        if self.state.skill.pop().is_some() {
            self.skill_edited(now);
        }
    }

    fn skill_edited(&mut self, now: Instant) {
        self.debouncer.skill_changed(self.state.skill.clone(), now);
        self.state.is_recommending = self.debouncer.is_fetching();
    }

    pub fn set_level(&mut self, level: Level) {
        if !self.state.is_locked() {
            self.state.level = level;
        }
    }

    pub fn next_level(&mut self) {
        self.set_level(self.state.level.next());
    }

    pub fn prev_level(&mut self) {
        self.set_level(self.state.level.prev());
    }

    pub fn set_days(&mut self, days: u32) {
        if !self.state.is_locked() {
            self.state.set_days(days);
        }
    }

    pub fn increment_days(&mut self) {
        if !self.state.is_locked() {
            self.state.increment_days();
        }
    }

    pub fn decrement_days(&mut self) {
        if !self.state.is_locked() {
            self.state.decrement_days();
        }
    }

    /// When the controller next needs `poll`
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.next_deadline()
    }

    /// Fire the debounce timer if due, spawning the recommendation call
    ///
    /// Returns true if a call was started.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(ticket) = self.debouncer.poll(now) else {
            return false;
        };

        self.state.is_recommending = true;
        let gateway = self.gateway.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let days = gateway.recommend_days(&ticket.skill).await;
            let _ = tx.send(Completion::Recommendation { seq: ticket.seq, days });
        });
        true
    }

    /// Start a plan generation if the form allows it
    ///
    /// Returns true if a call was started.
    pub fn submit(&mut self) -> bool {
        let Some(request) = self.state.begin_submit() else {
            debug!("submit: refused");
            return false;
        };

        debug!(skill = %request.skill, level = %request.level, days = request.days, "submit: starting");
        let gateway = self.gateway.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = gateway
                .generate_plan(&request.skill, request.level, request.days)
                .await;
            let _ = tx.send(Completion::Plan(result));
        });
        true
    }

    /// Wait for the next gateway call to finish
    pub async fn next_completion(&mut self) -> Option<Completion> {
        self.rx.recv().await
    }

    /// Apply a finished gateway call to the form
    pub fn handle_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Recommendation { seq, days } => {
                if self.debouncer.complete(seq) {
                    self.state.apply_recommendation(days);
                }
                self.state.is_recommending = self.debouncer.is_fetching();
            }
            Completion::Plan(result) => self.state.finish_submit(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::PLAN_FAILURE_MESSAGE;
    use crate::llm::client::mock::{MockLlmClient, Scripted};
    use crate::llm::{LlmError, StructuredResponse};

    const QUIET: Duration = Duration::from_millis(700);

    fn controller(client: MockLlmClient) -> (FormController, Arc<MockLlmClient>) {
        let client = Arc::new(client);
        let gateway = Arc::new(PlanGateway::with_client(client.clone()));
        (FormController::new(gateway, QUIET), client)
    }

    fn reply(delay_ms: u64, text: &str) -> Scripted {
        Scripted {
            delay: Duration::from_millis(delay_ms),
            result: Ok(StructuredResponse::text(text)),
        }
    }

    async fn drain_one(ctl: &mut FormController) {
        let completion = tokio::time::timeout(Duration::from_secs(5), ctl.next_completion())
            .await
            .unwrap()
            .unwrap();
        ctl.handle_completion(completion);
    }

    #[tokio::test]
    async fn test_recommendation_updates_days() {
        let (mut ctl, client) = controller(MockLlmClient::with_texts(&["{\"days\": 10}"]));
        let t0 = Instant::now();

        ctl.set_skill("Rust", t0);
        assert!(!ctl.poll(t0));
        assert!(ctl.poll(t0 + QUIET));
        assert!(ctl.state().is_recommending);

        drain_one(&mut ctl).await;
        assert_eq!(ctl.state().days, 10);
        assert!(!ctl.state().is_recommending);
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_typing_burst_makes_one_call() {
        let (mut ctl, client) = controller(MockLlmClient::with_texts(&["{\"days\": 6}"]));
        let t0 = Instant::now();

        for (i, c) in "Go".chars().enumerate() {
            let at = t0 + Duration::from_millis(100 * i as u64);
            ctl.push_skill_char(c, at);
            assert!(!ctl.poll(at));
        }
        assert!(ctl.poll(t0 + Duration::from_millis(100) + QUIET));

        drain_one(&mut ctl).await;
        assert_eq!(ctl.state().days, 6);
        assert_eq!(client.prompts().len(), 1);
        assert!(client.prompts()[0].contains("\"Go\""));
    }

    #[tokio::test]
    async fn test_stale_recommendation_does_not_overwrite() {
        // First call is slow and resolves after the second
        let (mut ctl, _) = controller(MockLlmClient::new(vec![
            reply(200, "{\"days\": 12}"),
            reply(0, "{\"days\": 4}"),
        ]));
        let t0 = Instant::now();

        ctl.set_skill("Compilers", t0);
        assert!(ctl.poll(t0 + QUIET));

        ctl.set_skill("Knots", t0 + Duration::from_secs(1));
        assert!(ctl.poll(t0 + Duration::from_secs(1) + QUIET));

        drain_one(&mut ctl).await;
        assert_eq!(ctl.state().days, 4);

        drain_one(&mut ctl).await;
        assert_eq!(ctl.state().days, 4);
    }

    #[tokio::test]
    async fn test_blank_skill_never_calls_model() {
        let (mut ctl, client) = controller(MockLlmClient::with_texts(&[]));
        let t0 = Instant::now();

        ctl.set_skill("  ", t0);
        assert!(!ctl.poll(t0 + QUIET));
        assert_eq!(ctl.state().days, 5);
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_locked_form_ignores_days_and_level() {
        let (mut ctl, _) = controller(MockLlmClient::with_texts(&[]));
        ctl.increment_days();
        ctl.next_level();
        assert_eq!(ctl.state().days, 5);
        assert_eq!(ctl.state().level, Level::Beginner);

        ctl.set_skill("Rust", Instant::now());
        ctl.increment_days();
        ctl.next_level();
        assert_eq!(ctl.state().days, 6);
        assert_eq!(ctl.state().level, Level::Intermediate);
    }

    #[tokio::test]
    async fn test_submit_stores_plan() {
        let plan = r#"[
            {"day": 2, "goal": "Loops", "concepts": ["for", "while"], "task": "Count to ten"},
            {"day": 1, "goal": "Syntax", "concepts": ["print", "variables"], "task": "Hello world"}
        ]"#;
        let (mut ctl, _) = controller(MockLlmClient::with_texts(&[plan]));
        ctl.set_skill("Python", Instant::now());
        ctl.set_days(2);

        assert!(ctl.submit());
        assert!(ctl.state().is_loading);
        assert!(!ctl.submit());

        drain_one(&mut ctl).await;
        let state = ctl.state();
        assert!(!state.is_loading);
        let days: Vec<u32> = state.plan.as_ref().unwrap().days().iter().map(|d| d.day).collect();
        assert_eq!(days, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_submit_failure_shows_message() {
        let (mut ctl, _) = controller(MockLlmClient::failing(LlmError::InvalidResponse("boom".to_string())));
        ctl.set_skill("Python", Instant::now());

        assert!(ctl.submit());
        drain_one(&mut ctl).await;

        assert_eq!(ctl.state().error.as_deref(), Some(PLAN_FAILURE_MESSAGE));
        assert!(!ctl.state().is_loading);
    }

    #[tokio::test]
    async fn test_submit_refused_without_skill() {
        let (mut ctl, client) = controller(MockLlmClient::with_texts(&[]));
        assert!(!ctl.submit());
        assert_eq!(client.call_count(), 0);
    }
}
