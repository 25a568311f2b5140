// ==========================================
// Substitute Planner - CLI Entry
// ==========================================
// Minimal shell around the core: open the configured database and print
// today's substitution plan. The real front end lives elsewhere.
// ==========================================

use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use chrono::Local;
use substitute_planner::config::{default_config_path, ConfigManager};
use substitute_planner::{db, logging, SchedulingApi};

fn main() -> ExitCode {
    logging::init();

    tracing::info!("{} v{}", substitute_planner::APP_NAME, substitute_planner::VERSION);

    let config = match ConfigManager::load_or_init(&default_config_path()) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("failed to load configuration: {err:#}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(db_path = %config.db_path, "using database");

    let conn = match db::open_sqlite_connection(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            tracing::error!("failed to open database: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = db::init_schema(&conn) {
        tracing::error!("failed to initialize schema: {err}");
        return ExitCode::FAILURE;
    }

    let api = SchedulingApi::from_connection(Arc::new(Mutex::new(conn)));

    let today = Local::now().date_naive();
    match api.daily_plan(today) {
        Ok(plan) => {
            println!("Substitution plan for {} ({})", today, config.school_name);
            for (period, entries) in &plan.periods {
                if entries.is_empty() {
                    println!("  Period {}: -", period);
                    continue;
                }
                for entry in entries {
                    println!(
                        "  Period {}: {} covers {} ({}{}) [{} pending transfer(s)]",
                        period,
                        entry.substitute_teacher_name,
                        entry.original_teacher_name,
                        entry.class_name,
                        entry
                            .section
                            .as_deref()
                            .map(|s| format!(" {}", s))
                            .unwrap_or_default(),
                        entry.pending_transfers,
                    );
                }
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("failed to read today's plan: {err}");
            ExitCode::FAILURE
        }
    }
}
