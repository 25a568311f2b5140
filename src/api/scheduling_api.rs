// ==========================================
// Substitute Planner - Scheduling API
// ==========================================
// Caller-facing facade over the engines and repositories. Every
// operation takes an explicit Actor; authorization is a pure function
// of (actor, resource) checked before anything is dispatched.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::substitution::Substitution;
use crate::domain::timetable::TimetableEntry;
use crate::domain::transfer::TransferRequest;
use crate::domain::types::{Actor, DayLabel, ReportedBy};
use crate::engine::{
    AssignmentEngine, DailyPlan, PlanOutcome, PlanViewer, TransferDecision, TransferWorkflow,
};
use crate::repository::{
    AbsenceRepository, NewAbsence, RepositoryError, SubstitutionRepository, TeacherRepository,
    TimetableRepository, TransferRepository,
};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

pub struct SchedulingApi {
    teacher_repo: Arc<TeacherRepository>,
    timetable_repo: Arc<TimetableRepository>,
    absence_repo: Arc<AbsenceRepository>,
    substitution_repo: Arc<SubstitutionRepository>,
    assignment_engine: AssignmentEngine,
    plan_viewer: PlanViewer,
    transfer_workflow: TransferWorkflow,
}

impl SchedulingApi {
    /// Wire the full stack onto one shared connection.
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        let teacher_repo = Arc::new(TeacherRepository::from_connection(conn.clone()));
        let timetable_repo = Arc::new(TimetableRepository::from_connection(conn.clone()));
        let absence_repo = Arc::new(AbsenceRepository::from_connection(conn.clone()));
        let substitution_repo = Arc::new(SubstitutionRepository::from_connection(conn.clone()));
        let transfer_repo = Arc::new(TransferRepository::from_connection(conn));

        let assignment_engine = AssignmentEngine::new(
            teacher_repo.clone(),
            timetable_repo.clone(),
            absence_repo.clone(),
            substitution_repo.clone(),
        );
        let plan_viewer = PlanViewer::new(substitution_repo.clone());
        let transfer_workflow = TransferWorkflow::new(
            teacher_repo.clone(),
            substitution_repo.clone(),
            transfer_repo,
        );

        Self {
            teacher_repo,
            timetable_repo,
            absence_repo,
            substitution_repo,
            assignment_engine,
            plan_viewer,
            transfer_workflow,
        }
    }

    pub fn teacher_repo(&self) -> &Arc<TeacherRepository> {
        &self.teacher_repo
    }

    pub fn timetable_repo(&self) -> &Arc<TimetableRepository> {
        &self.timetable_repo
    }

    // ==========================================
    // Absence declaration
    // ==========================================

    /// Declare one teacher absent and recompute that date's plan.
    ///
    /// A teacher may declare only their own absence; an admin may declare
    /// anyone's. The day label is derived from the date.
    pub fn declare_absence(
        &self,
        actor: &Actor,
        teacher_id: i64,
        date: NaiveDate,
    ) -> ApiResult<PlanOutcome> {
        if !actor.is_admin() && !actor.is_teacher(teacher_id) {
            return Err(ApiError::NotOwner(
                "teachers may only declare their own absence".to_string(),
            ));
        }
        if !self.teacher_repo.exists(teacher_id)? {
            return Err(ApiError::NotFound(format!("teacher with id={}", teacher_id)));
        }

        let day = DayLabel::from_date(date);
        let reported_by = if actor.is_admin() {
            ReportedBy::Admin
        } else {
            ReportedBy::SelfReported
        };

        let created = self.absence_repo.create(&NewAbsence {
            teacher_id,
            date,
            day,
            reported_by,
        });
        match created {
            Ok(_) => {}
            Err(RepositoryError::UniqueConstraintViolation(_)) => {
                return Err(ApiError::InvalidInput(
                    "teacher is already marked absent for this date".to_string(),
                ));
            }
            Err(other) => return Err(other.into()),
        }

        info!(teacher_id, %date, %day, "absence declared");
        Ok(self.assignment_engine.compute_plan(date, day)?)
    }

    /// Admin bulk form: replace the date's whole absence set, then
    /// recompute. Unknown teacher ids are skipped with a warning, matching
    /// the tolerant behavior of the admin absence form.
    pub fn set_absences_for_date(
        &self,
        actor: &Actor,
        date: NaiveDate,
        day: DayLabel,
        teacher_ids: &[i64],
    ) -> ApiResult<PlanOutcome> {
        if !actor.is_admin() {
            return Err(ApiError::NotOwner(
                "only an admin may redeclare a date's absence set".to_string(),
            ));
        }

        self.absence_repo.delete_all_for_date(date)?;
        for &teacher_id in teacher_ids {
            if !self.teacher_repo.exists(teacher_id)? {
                warn!(teacher_id, "skipping unknown teacher in absence set");
                continue;
            }
            self.absence_repo.create(&NewAbsence {
                teacher_id,
                date,
                day,
                reported_by: ReportedBy::Admin,
            })?;
        }

        Ok(self.assignment_engine.compute_plan(date, day)?)
    }

    /// Admin: withdraw an absence and recompute the date's plan.
    pub fn cancel_absence(
        &self,
        actor: &Actor,
        teacher_id: i64,
        date: NaiveDate,
    ) -> ApiResult<PlanOutcome> {
        if !actor.is_admin() {
            return Err(ApiError::NotOwner(
                "only an admin may cancel an absence".to_string(),
            ));
        }

        let absence = self
            .absence_repo
            .find_by_teacher_date(teacher_id, date)?
            .ok_or_else(|| {
                ApiError::NotFound(format!(
                    "absence for teacher id={} on {}",
                    teacher_id, date
                ))
            })?;

        self.absence_repo.delete_by_teacher_date(teacher_id, date)?;
        info!(teacher_id, %date, "absence cancelled");
        Ok(self.assignment_engine.compute_plan(date, absence.day)?)
    }

    // ==========================================
    // Plan views
    // ==========================================

    /// The stored plan for a date, grouped by period. Pure view, any actor.
    pub fn daily_plan(&self, date: NaiveDate) -> ApiResult<DailyPlan> {
        Ok(self.plan_viewer.generate_plan(date)?)
    }

    /// Duties a substitute holds on a date. Teacher self or admin.
    pub fn duties_for(
        &self,
        actor: &Actor,
        teacher_id: i64,
        date: NaiveDate,
    ) -> ApiResult<Vec<Substitution>> {
        if !actor.is_admin() && !actor.is_teacher(teacher_id) {
            return Err(ApiError::NotOwner(
                "teachers may only view their own duties".to_string(),
            ));
        }
        Ok(self.substitution_repo.list_for_substitute(teacher_id, date)?)
    }

    /// A teacher's full weekly grid, per cycle day. Teacher self or admin.
    pub fn teacher_schedule(
        &self,
        actor: &Actor,
        teacher_id: i64,
    ) -> ApiResult<BTreeMap<DayLabel, Vec<TimetableEntry>>> {
        if !actor.is_admin() && !actor.is_teacher(teacher_id) {
            return Err(ApiError::NotOwner(
                "teachers may only view their own schedule".to_string(),
            ));
        }
        if !self.teacher_repo.exists(teacher_id)? {
            return Err(ApiError::NotFound(format!("teacher with id={}", teacher_id)));
        }

        let mut schedule = BTreeMap::new();
        for day in DayLabel::ALL {
            schedule.insert(
                day,
                self.timetable_repo.entries_for_teacher_day(teacher_id, day)?,
            );
        }
        Ok(schedule)
    }

    // ==========================================
    // Transfer workflow
    // ==========================================

    pub fn file_transfer(
        &self,
        actor: &Actor,
        substitution_id: i64,
        proposed_teacher_id: i64,
        reason: &str,
        transfer_all: bool,
    ) -> ApiResult<TransferRequest> {
        Ok(self.transfer_workflow.file_transfer(
            actor,
            substitution_id,
            proposed_teacher_id,
            reason,
            transfer_all,
        )?)
    }

    pub fn decide_transfer(
        &self,
        actor: &Actor,
        transfer_id: i64,
        decision: TransferDecision,
    ) -> ApiResult<()> {
        Ok(self.transfer_workflow.decide(actor, transfer_id, decision)?)
    }

    pub fn pending_transfers(&self, actor: &Actor) -> ApiResult<Vec<TransferRequest>> {
        Ok(self.transfer_workflow.pending_requests(actor)?)
    }
}
