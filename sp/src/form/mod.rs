//! Form state, debounced recommendations and the controller tying them to the gateway

mod controller;
pub mod debounce;
mod state;

pub use controller::{Completion, FormController};
pub use debounce::{DebounceState, Debouncer, RecommendTicket};
pub use state::{FORM_DAYS_MAX, FORM_DAYS_MIN, FormState, SubmitRequest};
