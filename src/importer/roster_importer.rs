// ==========================================
// Substitute Planner - Roster Importer
// ==========================================
// Bulk-loads weekly timetables from CSV. One row per schedule cell:
//
//   teacher_code,day,period,class_name,section,is_free
//   T-001,Day 1,3,Class 7,A,0
//
// Rows that fail validation are skipped and reported line by line; a
// malformed file as a whole is an error.
// ==========================================

use crate::domain::types::{DayLabel, PERIODS_PER_DAY};
use crate::importer::error::ImportResult;
use crate::repository::{NewTimetableEntry, TeacherRepository, TimetableRepository};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Raw CSV row shape.
#[derive(Debug, Deserialize)]
struct RosterRecord {
    teacher_code: String,
    day: String,
    period: u32,
    class_name: String,
    #[serde(default)]
    section: Option<String>,
    #[serde(default)]
    is_free: u8,
}

/// Per-file import summary.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub imported: usize,
    /// (1-based data line, reason) per skipped row.
    pub skipped: Vec<(usize, String)>,
}

pub struct RosterImporter {
    teacher_repo: Arc<TeacherRepository>,
    timetable_repo: Arc<TimetableRepository>,
}

impl RosterImporter {
    pub fn new(
        teacher_repo: Arc<TeacherRepository>,
        timetable_repo: Arc<TimetableRepository>,
    ) -> Self {
        Self {
            teacher_repo,
            timetable_repo,
        }
    }

    pub fn import_file(&self, path: &Path) -> ImportResult<ImportReport> {
        let file = std::fs::File::open(path)?;
        self.import_reader(file)
    }

    /// Import from any reader. Cells upsert, so re-importing a corrected
    /// file overwrites earlier rows instead of failing on duplicates.
    pub fn import_reader<R: Read>(&self, reader: R) -> ImportResult<ImportReport> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        // Teacher codes resolve once up front.
        let code_to_id: HashMap<String, i64> = self
            .teacher_repo
            .list_all()?
            .into_iter()
            .map(|t| (t.code, t.id))
            .collect();

        let mut report = ImportReport::default();

        for (index, record) in csv_reader.deserialize::<RosterRecord>().enumerate() {
            let line = index + 1;
            let record = match record {
                Ok(record) => record,
                Err(err) => {
                    report.skipped.push((line, format!("unparseable row: {}", err)));
                    continue;
                }
            };

            let Some(&teacher_id) = code_to_id.get(&record.teacher_code) else {
                report
                    .skipped
                    .push((line, format!("unknown teacher code '{}'", record.teacher_code)));
                continue;
            };
            let Some(day) = DayLabel::from_db_str(&record.day) else {
                report
                    .skipped
                    .push((line, format!("invalid day label '{}'", record.day)));
                continue;
            };
            if record.period < 1 || record.period > PERIODS_PER_DAY {
                report
                    .skipped
                    .push((line, format!("period {} out of range 1..={}", record.period, PERIODS_PER_DAY)));
                continue;
            }
            let is_free = record.is_free != 0;
            if !is_free && record.class_name.is_empty() {
                report
                    .skipped
                    .push((line, "class row without a class name".to_string()));
                continue;
            }

            self.timetable_repo.upsert(&NewTimetableEntry {
                teacher_id,
                day,
                period: record.period,
                class_name: if is_free && record.class_name.is_empty() {
                    "Free".to_string()
                } else {
                    record.class_name
                },
                section: record.section.filter(|s| !s.is_empty()),
                is_free,
            })?;
            report.imported += 1;
        }

        for (line, reason) in &report.skipped {
            warn!(line, reason = reason.as_str(), "roster row skipped");
        }
        info!(
            imported = report.imported,
            skipped = report.skipped.len(),
            "roster import finished"
        );
        Ok(report)
    }
}
