// ==========================================
// Integration test helpers
// ==========================================
// Builds a full stack (file-backed SQLite + SchedulingApi) per test and
// exposes seeding shortcuts.
// ==========================================

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use substitute_planner::repository::{NewTeacher, NewTimetableEntry};
use substitute_planner::{db, DayLabel, SchedulingApi};
use tempfile::NamedTempFile;

pub struct TestEnv {
    pub api: SchedulingApi,
    // Keeps the database file alive for the test's duration.
    _temp_file: NamedTempFile,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_file = NamedTempFile::new().expect("temp db file");
        let db_path = temp_file.path().to_string_lossy().into_owned();

        let conn = db::open_sqlite_connection(&db_path).expect("open test db");
        db::init_schema(&conn).expect("init schema");

        let api = SchedulingApi::from_connection(Arc::new(Mutex::new(conn)));
        Self {
            api,
            _temp_file: temp_file,
        }
    }

    pub fn add_teacher(&self, name: &str, code: &str) -> i64 {
        self.api
            .teacher_repo()
            .create(&NewTeacher {
                name: name.to_string(),
                code: code.to_string(),
                phone: "0000000000".to_string(),
                email: format!("{}@school.test", code),
            })
            .expect("create teacher")
    }

    pub fn set_class(&self, teacher_id: i64, day: DayLabel, period: u32, class: &str) {
        self.api
            .timetable_repo()
            .upsert(&NewTimetableEntry {
                teacher_id,
                day,
                period,
                class_name: class.to_string(),
                section: Some("A".to_string()),
                is_free: false,
            })
            .expect("upsert class cell");
    }

    pub fn set_free(&self, teacher_id: i64, day: DayLabel, period: u32) {
        self.api
            .timetable_repo()
            .upsert(&NewTimetableEntry {
                teacher_id,
                day,
                period,
                class_name: "Free".to_string(),
                section: None,
                is_free: true,
            })
            .expect("upsert free cell");
    }
}
