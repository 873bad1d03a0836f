mod storage;
mod store;

#[cfg(test)]
mod store_test;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::challenge::ChallengeConfig;
use crate::entry::DailyEntry;
use crate::evaluation::CalculationResult;
use crate::shared::SessionId;

pub use storage::SlotStorage;
pub use store::{SessionStore, MAX_SESSIONS, SESSIONS_SLOT};

/// A persisted evaluation: inputs, computed result and creation time
///
/// Sessions hold deep copies of their inputs and are never modified
/// after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    id: SessionId,
    #[serde(flatten)]
    config: ChallengeConfig,
    daily_entries: Vec<DailyEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    results: Option<CalculationResult>,
    #[serde(with = "iso_millis")]
    timestamp: DateTime<Utc>,
}

impl Session {
    /// Snapshot the given inputs under a fresh id and the current time
    pub fn new(
        config: ChallengeConfig,
        daily_entries: Vec<DailyEntry>,
        results: Option<CalculationResult>,
    ) -> Self {
        Self {
            id: SessionId::new(),
            config,
            daily_entries,
            results,
            // Persisted with millisecond precision
            timestamp: Utc::now().trunc_subsecs(3),
        }
    }

    /// Restore session from persistence
    pub fn restore(
        id: SessionId,
        config: ChallengeConfig,
        daily_entries: Vec<DailyEntry>,
        results: Option<CalculationResult>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            config,
            daily_entries,
            results,
            timestamp,
        }
    }

    // Getters
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn config(&self) -> &ChallengeConfig {
        &self.config
    }

    pub fn daily_entries(&self) -> &[DailyEntry] {
        &self.daily_entries
    }

    pub fn results(&self) -> Option<&CalculationResult> {
        self.results.as_ref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// ISO-8601 timestamps with millisecond precision and a `Z` suffix
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryList;
    use crate::evaluation::ConsistencyEvaluator;

    #[test]
    fn test_session_serializes_in_history_layout() {
        let mut entries = EntryList::new();
        let id = entries.entries()[0].id.clone();
        entries.update(&id, Some(1200.0)).unwrap();
        entries.append();

        let config = ChallengeConfig::default();
        let result = ConsistencyEvaluator::evaluate(&config, entries.entries()).unwrap();
        let session = Session::new(config, entries.entries().to_vec(), Some(result));

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["id"], session.id().as_str());
        assert_eq!(json["accountSize"], 100_000.0);
        assert_eq!(json["profitTargetPercentage"], 6.0);
        assert_eq!(json["consistencyRulePercentage"], 35.0);
        assert_eq!(json["dailyEntries"][0]["day"], 1);
        assert_eq!(json["dailyEntries"][0]["profit"], 1200.0);
        assert!(json["dailyEntries"][1]["profit"].is_null());
        assert_eq!(json["results"]["totalProfit"], 1200.0);

        let timestamp = json["timestamp"].as_str().unwrap();
        assert!(timestamp.ends_with('Z'));
        assert_eq!(timestamp.len(), "2024-01-01T00:00:00.000Z".len());
    }

    #[test]
    fn test_session_parses_browser_written_record() {
        let raw = r#"{
            "id": "1718000000000abc123xyz",
            "accountSize": 50000,
            "profitTargetPercentage": 8,
            "consistencyRulePercentage": 30,
            "dailyEntries": [
                {"id": "1", "day": 1, "profit": 1500},
                {"id": "1718000000001", "day": 2, "profit": null}
            ],
            "results": {
                "totalProfit": 1500,
                "biggestProfitDay": 1,
                "biggestProfitAmount": 1500,
                "biggestDayPercentage": 100,
                "passedConsistencyRule": false,
                "equityCurve": [{"day": 1, "equity": 51500}],
                "profitTarget": 4000,
                "passedProfitTarget": false
            },
            "timestamp": "2024-06-10T06:13:20.000Z"
        }"#;

        let session: Session = serde_json::from_str(raw).unwrap();

        assert_eq!(session.id().as_str(), "1718000000000abc123xyz");
        assert_eq!(session.config().account_size, 50_000.0);
        assert_eq!(session.daily_entries().len(), 2);
        assert_eq!(session.daily_entries()[1].profit, None);
        assert_eq!(session.results().unwrap().profit_target, 4000.0);
        assert_eq!(
            session.timestamp().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            "2024-06-10T06:13:20.000Z"
        );
    }

    #[test]
    fn test_session_without_results() {
        let raw = r#"{
            "id": "abc",
            "accountSize": 100000,
            "profitTargetPercentage": 6,
            "consistencyRulePercentage": 35,
            "dailyEntries": [{"id": "1", "day": 1, "profit": null}],
            "timestamp": "2024-06-10T06:13:20.000Z"
        }"#;

        let session: Session = serde_json::from_str(raw).unwrap();
        assert!(session.results().is_none());

        let json = serde_json::to_value(&session).unwrap();
        assert!(json.get("results").is_none());
    }
}
