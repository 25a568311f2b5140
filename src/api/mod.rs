// ==========================================
// Substitute Planner - API Layer
// ==========================================
// Thin facade for the surrounding application (web or CLI): actor
// authorization, error conversion, no business rules of its own.
// ==========================================

pub mod error;
pub mod scheduling_api;

pub use error::{ApiError, ApiResult};
pub use scheduling_api::SchedulingApi;
