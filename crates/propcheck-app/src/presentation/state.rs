use std::path::PathBuf;
use std::sync::Arc;

use crate::application::services::{ConfigService, HistoryService, ReportService, WorkspaceService};
use propcheck_infrastructure::persistence::Database;

pub struct Runtime {
    pub data_dir: PathBuf,
    /// Only set for the SQLite backend
    pub db: Option<Arc<Database>>,
}

pub struct Services {
    pub workspace: Arc<WorkspaceService>,
    pub history: Arc<HistoryService>,
    pub report: Arc<ReportService>,
    pub config: Arc<ConfigService>,
}

pub struct AppState {
    pub runtime: Runtime,
    pub services: Services,
}

impl AppState {
    pub async fn new(
        data_dir: PathBuf,
        config: Arc<ConfigService>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        crate::presentation::bootstrap::build_app_state(data_dir, config).await
    }
}
