//! Prompt Loader
//!
//! Loads prompt templates from an override directory or falls back to embedded defaults.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use super::embedded;
use crate::plan::{Level, RECOMMENDED_DAYS_MAX, RECOMMENDED_DAYS_MIN};

const RECOMMEND_TEMPLATE: &str = "recommend-days";
const PLAN_TEMPLATE: &str = "generate-plan";

/// Context for the day-count recommendation prompt
#[derive(Debug, Clone, Serialize)]
pub struct RecommendContext {
    pub skill: String,
    pub min_days: u32,
    pub max_days: u32,
}

impl RecommendContext {
    pub fn new(skill: impl Into<String>) -> Self {
        Self {
            skill: skill.into(),
            min_days: RECOMMENDED_DAYS_MIN,
            max_days: RECOMMENDED_DAYS_MAX,
        }
    }
}

/// Context for the plan generation prompt
#[derive(Debug, Clone, Serialize)]
pub struct PlanContext {
    pub skill: String,
    pub level: String,
    pub days: u32,
}

impl PlanContext {
    pub fn new(skill: impl Into<String>, level: Level, days: u32) -> Self {
        Self {
            skill: skill.into(),
            level: level.to_string(),
            days,
        }
    }
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// Override directory (from `prompts.dir` in config)
    override_dir: Option<PathBuf>,
}

impl Default for PromptLoader {
    fn default() -> Self {
        Self::embedded_only()
    }
}

impl PromptLoader {
    /// Create a loader that checks `dir` before the embedded prompts
    ///
    /// A directory that does not exist is ignored.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            hbs: Self::engine(),
            override_dir: if dir.exists() { Some(dir.to_path_buf()) } else { None },
        }
    }

    /// Create a loader that only uses embedded prompts
    pub fn embedded_only() -> Self {
        Self {
            hbs: Self::engine(),
            override_dir: None,
        }
    }

    /// Build from an optional override directory
    pub fn from_dir(dir: Option<PathBuf>) -> Self {
        match dir {
            Some(dir) => Self::new(dir),
            None => Self::embedded_only(),
        }
    }

    // Prompts are plain text: skill names like "C++ & Rust" must reach the model verbatim
    fn engine() -> Handlebars<'static> {
        let mut hbs = Handlebars::new();
        hbs.register_escape_fn(handlebars::no_escape);
        hbs
    }

    /// Load a template by name
    ///
    /// Checks in order:
    /// 1. Override: `{dir}/{name}.pmt`
    /// 2. Embedded fallback
    fn load_template(&self, name: &str) -> Result<String> {
        if let Some(ref dir) = self.override_dir {
            let path = dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!("Loading prompt from override: {:?}", path);
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read prompt {}: {}", path.display(), e));
            }
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!("Using embedded prompt: {}", name);
            return Ok(content.to_string());
        }

        Err(eyre!("Prompt template not found: {}", name))
    }

    fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        let template = self.load_template(template_name)?;
        self.hbs
            .render_template(&template, context)
            .map_err(|e| eyre!("Failed to render template {}: {}", template_name, e))
    }

    /// Render the day-count recommendation prompt
    pub fn recommend_prompt(&self, context: &RecommendContext) -> Result<String> {
        debug!(skill = %context.skill, "recommend_prompt: called");
        self.render(RECOMMEND_TEMPLATE, context)
    }

    /// Render the plan generation prompt
    pub fn plan_prompt(&self, context: &PlanContext) -> Result<String> {
        debug!(skill = %context.skill, level = %context.level, days = context.days, "plan_prompt: called");
        self.render(PLAN_TEMPLATE, context)
    }
}
