use serde::Serialize;

use crate::presentation::state::AppState;
use propcheck_infrastructure::logging;

#[derive(Debug, Clone, Serialize)]
pub struct AppInfo {
    pub version: String,
    pub data_dir: String,
    pub log_dir: Option<String>,
}

/// Get application version information
pub fn get_app_version() -> String {
    let version = env!("CARGO_PKG_VERSION");
    let profile = if cfg!(debug_assertions) {
        "Debug"
    } else {
        "Release"
    };
    format!("{} ({})", version, profile)
}

pub fn get_app_info(state: &AppState) -> AppInfo {
    AppInfo {
        version: get_app_version(),
        data_dir: state.runtime.data_dir.display().to_string(),
        log_dir: logging::get_log_dir().map(|dir| dir.display().to_string()),
    }
}
