//! Study plan data model and the response schemas sent to the model
//!
//! The model is asked for two shapes: a `{ days }` object when recommending a
//! duration, and an array of [`DayPlan`] when generating the plan itself.

pub mod schema;
mod types;

pub use schema::{SchemaDescriptor, SchemaType, days_schema, plan_schema};
pub use types::{DayPlan, Level, Plan, clamp_recommendation};

/// Lowest day count the recommendation may produce
pub const RECOMMENDED_DAYS_MIN: u32 = 3;

/// Highest day count the recommendation may produce
pub const RECOMMENDED_DAYS_MAX: u32 = 14;

/// Day count used when no recommendation is available
pub const DEFAULT_DAYS: u32 = 5;
