// ==========================================
// Substitute Planner - Transfer Workflow
// ==========================================
// State machine per request: pending -> approved | rejected, both
// terminal. Approval hands the substitution to the proposed teacher;
// rejection leaves it untouched. A second decision attempt fails with
// AlreadyDecided and changes nothing.
// ==========================================

use crate::domain::transfer::TransferRequest;
use crate::domain::types::Actor;
use crate::engine::error::TransferError;
use crate::repository::{
    DecideCasOutcome, NewTransferRequest, SubstitutionRepository, TeacherRepository,
    TransferRepository,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};

/// Admin decision on a pending transfer request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferDecision {
    Approve,
    Reject,
}

pub struct TransferWorkflow {
    teacher_repo: Arc<TeacherRepository>,
    substitution_repo: Arc<SubstitutionRepository>,
    transfer_repo: Arc<TransferRepository>,
}

impl TransferWorkflow {
    pub fn new(
        teacher_repo: Arc<TeacherRepository>,
        substitution_repo: Arc<SubstitutionRepository>,
        transfer_repo: Arc<TransferRepository>,
    ) -> Self {
        Self {
            teacher_repo,
            substitution_repo,
            transfer_repo,
        }
    }

    /// File a transfer request against a substitution the actor holds.
    ///
    /// Only the teacher currently recorded as the substitute may file.
    /// `transfer_all` is stored as declared intent; no cascade is applied.
    #[instrument(skip_all, fields(substitution_id, proposed_teacher_id))]
    pub fn file_transfer(
        &self,
        actor: &Actor,
        substitution_id: i64,
        proposed_teacher_id: i64,
        reason: &str,
        transfer_all: bool,
    ) -> Result<TransferRequest, TransferError> {
        let substitution = self
            .substitution_repo
            .find_by_id(substitution_id)?
            .ok_or_else(|| TransferError::NotFound {
                entity: "substitution".to_string(),
                id: substitution_id.to_string(),
            })?;

        if !actor.is_teacher(substitution.substitute_teacher_id) {
            return Err(TransferError::NotOwner(
                "this substitution is not assigned to the requesting teacher".to_string(),
            ));
        }

        let reason = reason.trim();
        if reason.is_empty() {
            return Err(TransferError::InvalidInput("reason must not be empty".to_string()));
        }
        if proposed_teacher_id == substitution.substitute_teacher_id {
            return Err(TransferError::InvalidInput(
                "cannot transfer a duty to its current holder".to_string(),
            ));
        }
        if !self.teacher_repo.exists(proposed_teacher_id)? {
            return Err(TransferError::NotFound {
                entity: "teacher".to_string(),
                id: proposed_teacher_id.to_string(),
            });
        }

        let transfer_id = self.transfer_repo.create(&NewTransferRequest {
            substitution_id,
            requested_by_id: substitution.substitute_teacher_id,
            proposed_teacher_id,
            reason: reason.to_string(),
            transfer_all,
        })?;

        info!(transfer_id, substitution_id, proposed_teacher_id, "transfer request filed");

        self.transfer_repo
            .find_by_id(transfer_id)?
            .ok_or(TransferError::NotFound {
                entity: "transfer_request".to_string(),
                id: transfer_id.to_string(),
            })
    }

    /// Decide a pending request. Admin only.
    ///
    /// Runs as a compare-and-set on status: of two concurrent admins the
    /// loser observes AlreadyDecided. Approval reassigns the referenced
    /// substitution's substitute in the same transaction; everything else
    /// on the row stays as it was.
    #[instrument(skip_all, fields(transfer_id, decision = ?decision))]
    pub fn decide(
        &self,
        actor: &Actor,
        transfer_id: i64,
        decision: TransferDecision,
    ) -> Result<(), TransferError> {
        if !actor.is_admin() {
            return Err(TransferError::NotOwner(
                "only an admin may decide transfer requests".to_string(),
            ));
        }

        let now = Utc::now().naive_utc();
        let outcome = match decision {
            TransferDecision::Approve => {
                self.transfer_repo.approve_and_reassign_cas(transfer_id, now)?
            }
            TransferDecision::Reject => self.transfer_repo.reject_cas(transfer_id, now)?,
        };

        match outcome {
            DecideCasOutcome::Applied => {
                info!(transfer_id, "transfer request decided");
                Ok(())
            }
            DecideCasOutcome::AlreadyDecided => Err(TransferError::AlreadyDecided { transfer_id }),
            DecideCasOutcome::NotFound => Err(TransferError::NotFound {
                entity: "transfer_request".to_string(),
                id: transfer_id.to_string(),
            }),
        }
    }

    /// Pending requests for the admin work queue, oldest first.
    pub fn pending_requests(&self, actor: &Actor) -> Result<Vec<TransferRequest>, TransferError> {
        if !actor.is_admin() {
            return Err(TransferError::NotOwner(
                "only an admin may list pending transfer requests".to_string(),
            ));
        }
        Ok(self.transfer_repo.list_pending()?)
    }
}
