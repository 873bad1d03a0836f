use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::application::services::{
    ConfigService, HistoryService, ReportService, StorageBackend, WorkspaceService,
};
use crate::presentation::state::{AppState, Runtime, Services};
use propcheck_domain::session::{SessionStore, SlotStorage};
use propcheck_infrastructure::persistence::slots::{JsonFileSlotStorage, SqliteSlotStorage};
use propcheck_infrastructure::persistence::Database;

pub const SLOTS_DIR_NAME: &str = "slots";

pub fn database_file_name() -> &'static str {
    if cfg!(debug_assertions) {
        "propcheck-dev.db"
    } else {
        "propcheck.db"
    }
}

pub async fn build_app_state(
    data_dir: PathBuf,
    config: Arc<ConfigService>,
) -> Result<AppState, Box<dyn std::error::Error>> {
    let startup_started_at = Instant::now();

    std::fs::create_dir_all(&data_dir)
        .map_err(|e| format!("Failed to create data directory: {}", e))?;

    let started_at = Instant::now();
    let backend = config.storage_backend();
    let (storage, db): (Arc<dyn SlotStorage>, Option<Arc<Database>>) = match backend {
        StorageBackend::Sqlite => {
            let db_path = data_dir.join(database_file_name());
            info!(path = %db_path.display(), "Opening database");

            let db = Database::open(&db_path).await?;
            db.run_migrations().await?;

            let storage: Arc<dyn SlotStorage> =
                Arc::new(SqliteSlotStorage::new(Arc::new(db.pool().clone())));
            (storage, Some(Arc::new(db)))
        }
        StorageBackend::File => {
            let slots_dir = data_dir.join(SLOTS_DIR_NAME);
            info!(path = %slots_dir.display(), "Using file slot storage");
            let storage: Arc<dyn SlotStorage> = Arc::new(JsonFileSlotStorage::new(slots_dir));
            (storage, None)
        }
    };
    info!(
        backend = ?backend,
        elapsed_ms = started_at.elapsed().as_millis() as u64,
        "Storage ready"
    );

    let state = assemble(data_dir, storage, db, config);

    info!(
        elapsed_ms = startup_started_at.elapsed().as_millis() as u64,
        "App state initialized"
    );
    Ok(state)
}

/// Wire services over an already opened storage
pub fn assemble(
    data_dir: PathBuf,
    storage: Arc<dyn SlotStorage>,
    db: Option<Arc<Database>>,
    config: Arc<ConfigService>,
) -> AppState {
    let store = Arc::new(SessionStore::new(storage));

    AppState {
        runtime: Runtime { data_dir, db },
        services: Services {
            workspace: Arc::new(WorkspaceService::new(
                store.clone(),
                config.default_challenge(),
            )),
            history: Arc::new(HistoryService::new(store)),
            report: Arc::new(ReportService::new()),
            config,
        },
    }
}
