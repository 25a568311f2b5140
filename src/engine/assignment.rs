// ==========================================
// Substitute Planner - Assignment Engine
// ==========================================
// Computes the full substitution plan for one date: every scheduled
// class of every absent teacher becomes a duty, and each duty gets the
// first eligible candidate.
//
// Candidate order: teachers explicitly marked free for the slot first,
// then teachers with no timetable entry for the slot at all; within each
// group, teacher id ascending. The id order is the documented tie-break,
// independent of storage iteration order.
//
// The produced row set replaces any prior rows for the date in one
// transaction: recompute is idempotent but destructive, and manually
// created rows for that date do not survive it.
// ==========================================

use crate::domain::substitution::NewSubstitution;
use crate::domain::types::DayLabel;
use crate::engine::error::AssignmentError;
use crate::repository::{
    AbsenceRepository, SubstitutionRepository, TeacherRepository, TimetableRepository,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// A duty no candidate could be found for. Diagnostic only: nothing is
/// persisted and no error is raised for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UncoveredDuty {
    pub original_teacher_id: i64,
    pub period: u32,
    pub class_name: String,
    pub section: Option<String>,
}

/// Result of one recompute run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanOutcome {
    pub date: NaiveDate,
    pub day: DayLabel,
    pub assigned: Vec<NewSubstitution>,
    pub uncovered: Vec<UncoveredDuty>,
}

pub struct AssignmentEngine {
    teacher_repo: Arc<TeacherRepository>,
    timetable_repo: Arc<TimetableRepository>,
    absence_repo: Arc<AbsenceRepository>,
    substitution_repo: Arc<SubstitutionRepository>,
}

impl AssignmentEngine {
    pub fn new(
        teacher_repo: Arc<TeacherRepository>,
        timetable_repo: Arc<TimetableRepository>,
        absence_repo: Arc<AbsenceRepository>,
        substitution_repo: Arc<SubstitutionRepository>,
    ) -> Self {
        Self {
            teacher_repo,
            timetable_repo,
            absence_repo,
            substitution_repo,
        }
    }

    /// Recompute the substitution plan for `date`.
    ///
    /// Deletes the date's existing rows and rebuilds them from the current
    /// absence and timetable stores, atomically from the caller's point of
    /// view. A duty with an empty candidate pool is skipped silently and
    /// reported in the outcome's `uncovered` list.
    ///
    /// A substitute picked for one duty stays in the pool for other absent
    /// teachers' duties at the same period; the reference behavior of
    /// picking independently per duty is preserved deliberately.
    #[instrument(skip_all, fields(date = %date, day = %day))]
    pub fn compute_plan(
        &self,
        date: NaiveDate,
        day: DayLabel,
    ) -> Result<PlanOutcome, AssignmentError> {
        let absences = self.absence_repo.find_by_date(date)?;

        let mut assigned = Vec::new();
        let mut uncovered = Vec::new();

        for absence in &absences {
            let duties = self
                .timetable_repo
                .classes_for_teacher_day(absence.teacher_id, day)?;

            for duty in duties {
                match self.pick_candidate(day, duty.period, absence.teacher_id)? {
                    Some(substitute_id) => {
                        assigned.push(NewSubstitution {
                            original_teacher_id: absence.teacher_id,
                            substitute_teacher_id: substitute_id,
                            date,
                            day,
                            period: duty.period,
                            class_name: duty.class_name.clone(),
                            section: duty.section.clone(),
                        });
                    }
                    None => {
                        warn!(
                            original_teacher_id = absence.teacher_id,
                            period = duty.period,
                            class_name = %duty.class_name,
                            "no candidate available, duty left uncovered"
                        );
                        uncovered.push(UncoveredDuty {
                            original_teacher_id: absence.teacher_id,
                            period: duty.period,
                            class_name: duty.class_name.clone(),
                            section: duty.section.clone(),
                        });
                    }
                }
            }
        }

        // Delete + insert as one transaction; readers never observe a
        // half-rebuilt plan.
        self.substitution_repo.replace_for_date(date, &assigned)?;

        info!(
            absences = absences.len(),
            assigned = assigned.len(),
            uncovered = uncovered.len(),
            "substitution plan recomputed"
        );

        Ok(PlanOutcome {
            date,
            day,
            assigned,
            uncovered,
        })
    }

    /// First candidate for a duty slot, or None when nobody is available.
    ///
    /// Explicitly-free teachers rank before unscheduled ones; both groups
    /// are teacher id ascending; the absent teacher is never eligible.
    fn pick_candidate(
        &self,
        day: DayLabel,
        period: u32,
        absent_teacher_id: i64,
    ) -> Result<Option<i64>, AssignmentError> {
        let free = self.timetable_repo.free_teacher_ids(day, period)?;
        if let Some(&id) = free.iter().find(|&&id| id != absent_teacher_id) {
            return Ok(Some(id));
        }

        let scheduled: HashSet<i64> = self
            .timetable_repo
            .scheduled_teacher_ids(day, period)?
            .into_iter()
            .collect();

        let unscheduled = self
            .teacher_repo
            .list_all()?
            .into_iter()
            .map(|t| t.id)
            .find(|id| *id != absent_teacher_id && !scheduled.contains(id));

        Ok(unscheduled)
    }
}
