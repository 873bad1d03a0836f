mod config_service;
mod history_service;
mod report_service;
mod workspace_service;


pub use config_service::{AppConfig, ConfigService, LogLevel, StorageBackend};
pub use history_service::HistoryService;
pub use report_service::ReportService;
pub use workspace_service::WorkspaceService;
