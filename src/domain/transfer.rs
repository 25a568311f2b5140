// ==========================================
// Substitute Planner - Transfer Request
// ==========================================
// A substitute's request to hand a covering duty to another teacher,
// pending admin approval. pending -> approved | rejected, both terminal;
// `decided_at` is set exactly once.
// ==========================================

use crate::domain::types::TransferStatus;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub id: i64,
    pub substitution_id: i64,
    /// The substitute who filed the request (the duty's current holder).
    pub requested_by_id: i64,
    /// The teacher the duty would pass to on approval.
    pub proposed_teacher_id: i64,
    pub reason: String,
    pub requested_at: NaiveDateTime,
    /// Set once, when an admin approves or rejects.
    pub decided_at: Option<NaiveDateTime>,
    pub status: TransferStatus,
    /// Recorded but inert: the reference workflow stores the "transfer all
    /// of today's duties" intent without acting on it.
    pub transfer_all: bool,
}
