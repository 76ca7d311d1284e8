//! Prompt Template System
//!
//! Renders the two prompts sent to the model.
//!
//! Template loading chain:
//! 1. `{prompts.dir}/{name}.pmt` (configured override)
//! 2. Embedded fallback in code
//!
//! Templates use Handlebars syntax for variable substitution.

pub mod embedded;
mod loader;

pub use loader::{PlanContext, PromptLoader, RecommendContext};
