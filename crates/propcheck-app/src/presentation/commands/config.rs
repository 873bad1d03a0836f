use crate::application::services::{AppConfig, LogLevel, StorageBackend};
use crate::presentation::error::CommandError;
use crate::presentation::state::AppState;
use propcheck_domain::challenge::ChallengeConfig;

pub async fn get_config(state: &AppState) -> Result<AppConfig, CommandError> {
    Ok(state.services.config.snapshot()?)
}

pub async fn get_log_level(state: &AppState) -> Result<String, CommandError> {
    Ok(state.services.config.get_log_level().as_str().to_string())
}

/// Takes effect on the next run
pub async fn set_log_level(state: &AppState, level: String) -> Result<(), CommandError> {
    let log_level: LogLevel = level
        .parse()
        .map_err(|e: anyhow::Error| CommandError::validation(e.to_string()))?;

    state
        .services
        .config
        .set_log_level(log_level)
        .map_err(|e| CommandError::infrastructure(format!("Failed to save log level: {}", e)))
}

/// Takes effect on the next run; existing history is not migrated
pub async fn set_storage_backend(state: &AppState, backend: String) -> Result<(), CommandError> {
    let backend = match backend.trim().to_lowercase().as_str() {
        "sqlite" => StorageBackend::Sqlite,
        "file" => StorageBackend::File,
        _ => {
            return Err(CommandError::validation(
                "Invalid storage backend. Must be one of: sqlite, file",
            ));
        }
    };

    Ok(state.services.config.set_storage_backend(backend)?)
}

pub async fn set_default_challenge(
    state: &AppState,
    account_size: String,
    profit_target: String,
    consistency_rule: String,
) -> Result<ChallengeConfig, CommandError> {
    let challenge = ChallengeConfig::from_raw(&account_size, &profit_target, &consistency_rule)?;
    state.services.config.set_default_challenge(challenge)?;
    Ok(challenge)
}
