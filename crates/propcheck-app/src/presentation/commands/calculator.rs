use crate::application::dtos::{CalculationOutcomeDto, WorkspaceDto};
use crate::presentation::error::CommandError;
use crate::presentation::state::AppState;
use propcheck_domain::shared::SessionId;

/// Raw calculator form input; absent fields use the configured defaults
#[derive(Debug, Clone, Default)]
pub struct CalculateRequest {
    pub account_size: Option<String>,
    pub profit_target: Option<String>,
    pub consistency_rule: Option<String>,
    /// One value per day; blank means not entered yet
    pub profits: Vec<String>,
}

/// Fill a fresh workspace from `request`, evaluate it and save the session
pub async fn calculate(
    state: &AppState,
    request: CalculateRequest,
) -> Result<CalculationOutcomeDto, CommandError> {
    let workspace = &state.services.workspace;
    workspace.reset().await;

    let defaults = workspace.config().await;
    workspace
        .set_config_raw(
            &request
                .account_size
                .unwrap_or_else(|| defaults.account_size.to_string()),
            &request
                .profit_target
                .unwrap_or_else(|| defaults.profit_target_percentage.to_string()),
            &request
                .consistency_rule
                .unwrap_or_else(|| defaults.consistency_rule_percentage.to_string()),
        )
        .await?;

    for (index, raw) in request.profits.iter().enumerate() {
        let id = match index {
            0 => workspace
                .entries()
                .await
                .first()
                .map(|entry| entry.id.clone())
                .ok_or_else(|| CommandError::infrastructure("Workspace has no entries"))?,
            _ => workspace.add_entry().await.id,
        };
        workspace.update_entry(&id, raw).await?;
    }

    Ok(workspace.calculate().await?)
}

pub async fn load_session(state: &AppState, id: String) -> Result<WorkspaceDto, CommandError> {
    Ok(state
        .services
        .workspace
        .load_session(&SessionId::from_string(&id))
        .await?)
}
