use std::path::PathBuf;

use crate::presentation::error::CommandError;
use crate::presentation::state::AppState;
use propcheck_domain::shared::SessionId;

pub async fn render_session_report(state: &AppState, id: String) -> Result<String, CommandError> {
    let session = state
        .services
        .history
        .get(&SessionId::from_string(&id))
        .await?;
    Ok(state.services.report.render(&session))
}

/// Write the report; without `output` it lands in the working directory
pub async fn export_session_report(
    state: &AppState,
    id: String,
    output: Option<PathBuf>,
) -> Result<PathBuf, CommandError> {
    let session = state
        .services
        .history
        .get(&SessionId::from_string(&id))
        .await?;

    let cwd = std::env::current_dir()
        .map_err(|e| CommandError::infrastructure(format!("No working directory: {}", e)))?;

    Ok(state
        .services
        .report
        .write_report(&session, output.as_deref(), &cwd)
        .await?)
}
