#![allow(dead_code)]

use std::sync::Arc;

use propcheck_domain::challenge::ChallengeConfig;
use propcheck_domain::entry::{DailyEntry, EntryList};
use propcheck_domain::evaluation::{CalculationResult, ConsistencyEvaluator};
use propcheck_infrastructure::persistence::Database;
use sqlx::SqlitePool;

/// Migrated in-memory database
pub async fn setup_in_memory_db() -> Arc<SqlitePool> {
    let database = Database::in_memory().await.expect("open in-memory db");
    database.run_migrations().await.expect("run migrations");
    Arc::new(database.pool().clone())
}

/// Default challenge with the given daily profits evaluated
pub fn evaluated(profits: &[Option<f64>]) -> (ChallengeConfig, Vec<DailyEntry>, CalculationResult) {
    let config = ChallengeConfig::default();
    let mut list = EntryList::new();
    for _ in 1..profits.len() {
        list.append();
    }
    let ids: Vec<_> = list.entries().iter().map(|e| e.id.clone()).collect();
    for (id, profit) in ids.iter().zip(profits) {
        list.update(id, *profit).expect("update entry");
    }
    let result = ConsistencyEvaluator::evaluate(&config, list.entries()).expect("evaluate");
    (config, list.into_entries(), result)
}
