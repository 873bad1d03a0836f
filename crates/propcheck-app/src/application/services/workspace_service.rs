use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::application::dtos::{CalculationOutcomeDto, WarningDto, WorkspaceDto};
use propcheck_domain::challenge::ChallengeConfig;
use propcheck_domain::entry::{DailyEntry, EntryList};
use propcheck_domain::evaluation::{CalculationResult, ConsistencyEvaluator};
use propcheck_domain::insights::{ProfitShare, TradingInsights};
use propcheck_domain::session::SessionStore;
use propcheck_domain::shared::{DomainError, EntryId, SessionId};

/// Calculator form state
struct Workspace {
    config: ChallengeConfig,
    entries: EntryList,
    results: Option<CalculationResult>,
}

impl Workspace {
    fn fresh(config: ChallengeConfig) -> Self {
        Self {
            config,
            entries: EntryList::new(),
            results: None,
        }
    }

    fn to_dto(&self) -> WorkspaceDto {
        WorkspaceDto {
            config: self.config,
            entries: self.entries.entries().to_vec(),
            results: self.results.clone(),
        }
    }
}

/// Drives one calculator workspace and records each evaluation
pub struct WorkspaceService {
    workspace: Mutex<Workspace>,
    store: Arc<SessionStore>,
    defaults: ChallengeConfig,
}

impl WorkspaceService {
    pub fn new(store: Arc<SessionStore>, defaults: ChallengeConfig) -> Self {
        Self {
            workspace: Mutex::new(Workspace::fresh(defaults)),
            store,
            defaults,
        }
    }

    pub async fn snapshot(&self) -> WorkspaceDto {
        self.workspace.lock().await.to_dto()
    }

    pub async fn config(&self) -> ChallengeConfig {
        self.workspace.lock().await.config
    }

    /// Apply raw form text; the previous configuration stays on error
    pub async fn set_config_raw(
        &self,
        account_size: &str,
        profit_target_percentage: &str,
        consistency_rule_percentage: &str,
    ) -> Result<ChallengeConfig, DomainError> {
        let config = ChallengeConfig::from_raw(
            account_size,
            profit_target_percentage,
            consistency_rule_percentage,
        )?;
        self.workspace.lock().await.config = config;
        Ok(config)
    }

    pub async fn add_entry(&self) -> DailyEntry {
        self.workspace.lock().await.entries.append().clone()
    }

    pub async fn remove_entry(&self, id: &EntryId) -> bool {
        self.workspace.lock().await.entries.remove(id)
    }

    /// Set one day's profit from raw text; blank clears it
    pub async fn update_entry(&self, id: &EntryId, raw: &str) -> Result<(), DomainError> {
        self.workspace.lock().await.entries.update_raw(id, raw)
    }

    pub async fn entries(&self) -> Vec<DailyEntry> {
        self.workspace.lock().await.entries.entries().to_vec()
    }

    /// Evaluate the current entries and record the session
    ///
    /// An evaluation error leaves the workspace untouched. A failed save
    /// keeps the result and reports the problem as a warning.
    pub async fn calculate(&self) -> Result<CalculationOutcomeDto, DomainError> {
        let mut workspace = self.workspace.lock().await;

        let result = ConsistencyEvaluator::evaluate(&workspace.config, workspace.entries.entries())
            .inspect_err(|e| info!(error = %e, "Evaluation rejected"))?;
        workspace.results = Some(result.clone());

        let config = workspace.config;
        let entries = workspace.entries.entries().to_vec();
        drop(workspace);

        let (session_id, persistence_warning) =
            match self.store.save(&config, &entries, &result).await {
                Ok(session) => (Some(session.id().to_string()), None),
                Err(e) => {
                    warn!(error = %e, "Result computed but the session could not be saved");
                    (None, Some(WarningDto::from(&e)))
                }
            };

        let insights = (!result.passed_consistency_rule)
            .then(|| TradingInsights::analyze(&config, &entries, &result));

        Ok(CalculationOutcomeDto {
            return_percentage: result.return_on_account(config.account_size),
            distribution: ProfitShare::distribution(&entries, &result),
            insights,
            session_id,
            persistence_warning,
            result,
        })
    }

    /// Back to the default configuration with one empty day
    pub async fn reset(&self) {
        *self.workspace.lock().await = Workspace::fresh(self.defaults);
        info!("Workspace reset");
    }

    /// Replace the workspace with a stored session
    pub async fn load_session(&self, id: &SessionId) -> Result<WorkspaceDto, DomainError> {
        let session = self
            .store
            .find(id)
            .await
            .ok_or_else(|| DomainError::SessionNotFound(format!("Session {} not found", id)))?;

        let mut workspace = self.workspace.lock().await;
        *workspace = Workspace {
            config: *session.config(),
            entries: EntryList::from_entries(session.daily_entries().to_vec()),
            results: session.results().cloned(),
        };

        info!(session_id = %id, "Session loaded into workspace");
        Ok(workspace.to_dto())
    }
}
