use std::path::PathBuf;

use crate::application::dtos::SessionSummaryDto;
use crate::presentation::error::CommandError;
use crate::presentation::state::AppState;
use propcheck_domain::session::Session;
use propcheck_domain::shared::SessionId;

pub async fn list_sessions(state: &AppState) -> Result<Vec<SessionSummaryDto>, CommandError> {
    Ok(state.services.history.list().await)
}

pub async fn get_session(state: &AppState, id: String) -> Result<Session, CommandError> {
    Ok(state
        .services
        .history
        .get(&SessionId::from_string(&id))
        .await?)
}

/// Returns whether a session was removed
pub async fn delete_session(state: &AppState, id: String) -> Result<bool, CommandError> {
    Ok(state
        .services
        .history
        .delete(&SessionId::from_string(&id))
        .await?)
}

pub async fn clear_history(state: &AppState) -> Result<(), CommandError> {
    Ok(state.services.history.clear().await?)
}

pub async fn export_history(state: &AppState, path: PathBuf) -> Result<usize, CommandError> {
    Ok(state.services.history.export_to_file(&path).await?)
}

pub async fn import_history(state: &AppState, path: PathBuf) -> Result<usize, CommandError> {
    Ok(state.services.history.import_from_file(&path).await?)
}
