// ==========================================
// Substitute Planner - Plan Viewer
// ==========================================
// Read-only projection over the substitution store; never recomputes.
// ==========================================

use crate::domain::types::PERIODS_PER_DAY;
use crate::repository::error::RepositoryResult;
use crate::repository::{SubstitutionRepository, SubstitutionSummaryRow};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// The day's plan grouped by period. Every period 1..=PERIODS_PER_DAY is
/// present as a key, empty or not.
#[derive(Debug, Clone, Serialize)]
pub struct DailyPlan {
    pub date: NaiveDate,
    pub periods: BTreeMap<u32, Vec<SubstitutionSummaryRow>>,
}

impl DailyPlan {
    pub fn total_substitutions(&self) -> usize {
        self.periods.values().map(Vec::len).sum()
    }
}

pub struct PlanViewer {
    substitution_repo: Arc<SubstitutionRepository>,
}

impl PlanViewer {
    pub fn new(substitution_repo: Arc<SubstitutionRepository>) -> Self {
        Self { substitution_repo }
    }

    /// Project the stored substitutions for `date` into the per-period
    /// grid, with teacher names and pending transfer counts resolved.
    pub fn generate_plan(&self, date: NaiveDate) -> RepositoryResult<DailyPlan> {
        let mut periods: BTreeMap<u32, Vec<SubstitutionSummaryRow>> =
            (1..=PERIODS_PER_DAY).map(|p| (p, Vec::new())).collect();

        for row in self.substitution_repo.list_summaries_for_date(date)? {
            periods.entry(row.period).or_default().push(row);
        }

        Ok(DailyPlan { date, periods })
    }
}
