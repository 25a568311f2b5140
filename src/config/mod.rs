// ==========================================
// Substitute Planner - Configuration Layer
// ==========================================

pub mod config_manager;

pub use config_manager::{
    default_config_path, default_data_dir, default_db_path, AppConfig, ConfigManager,
};
