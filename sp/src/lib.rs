//! skillplan - AI study plans for any skill
//!
//! Given a skill, a proficiency level and a number of days, skillplan asks an
//! LLM for a structured day-by-day study plan. While the skill is being typed
//! it also asks, debounced, how many days the skill needs.
//!
//! # Core Concepts
//!
//! - **Structured output**: Every model call carries a response schema
//! - **All or nothing**: A plan either parses completely or the call fails
//! - **Latest wins**: Only the newest day-count recommendation reaches the form
//!
//! # Modules
//!
//! - [`plan`] - Plan types, levels and response schemas
//! - [`llm`] - LLM client trait and Gemini implementation
//! - [`prompts`] - Prompt templates with embedded defaults
//! - [`gateway`] - recommend-days and generate-plan operations
//! - [`form`] - Form state and the debounced recommendation trigger
//! - [`render`] - Plan cards as text
//! - [`tui`] - Interactive terminal form
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod form;
pub mod gateway;
pub mod llm;
pub mod plan;
pub mod prompts;
pub mod render;
pub mod tui;

// Re-export commonly used types
pub use config::{Config, FormConfig, LlmConfig, PromptsConfig};
pub use form::{Completion, DebounceState, Debouncer, FormController, FormState};
pub use gateway::{ErrorKind, GatewayError, PLAN_FAILURE_MESSAGE, PlanGateway};
pub use llm::{GeminiClient, LlmClient, LlmError, StructuredRequest, StructuredResponse, create_client};
pub use plan::{DayPlan, Level, Plan};
pub use prompts::PromptLoader;
