//! In-process strategy store
//!
//! Records are kept as JSON text, so loading goes through the same
//! default-filling path as a record read from disk.

use async_trait::async_trait;
use croupier_core::StrategyRecord;
use croupier_ports::{StoreError, StoreResult, StrategyStore};
use dashmap::DashMap;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: DashMap<String, String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Store raw JSON under a name, as an external writer would
    pub fn insert_json(&self, name: &str, json: impl Into<String>) {
        self.records.insert(name.to_string(), json.into());
    }
}

#[async_trait]
impl StrategyStore for InMemoryStore {
    async fn load(&self, name: &str) -> StoreResult<Option<StrategyRecord>> {
        let Some(json) = self.records.get(name).map(|entry| entry.value().clone()) else {
            return Ok(None);
        };
        StrategyRecord::from_json(&json)
            .map(Some)
            .map_err(|e| StoreError::Serialization(e.to_string()))
    }

    async fn save(&self, name: &str, record: &StrategyRecord) -> StoreResult<()> {
        let json = record
            .to_json()
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        log::debug!("[Store] Saved '{}' ({} lanes)", name, record.lanes.len());
        self.records.insert(name.to_string(), json);
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<String>> {
        let mut names: Vec<String> = self.records.iter().map(|e| e.key().clone()).collect();
        names.sort();
        Ok(names)
    }

    async fn delete(&self, name: &str) -> StoreResult<()> {
        self.records
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use croupier_core::{LaneConfig, Placement, Wager};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_save_load_list_delete() {
        let store = InMemoryStore::new();
        let record = StrategyRecord {
            lanes: vec![LaneConfig::new(
                "red-lane",
                vec![Wager::new(Placement::red(), dec!(5))],
            )],
            ..Default::default()
        };

        store.save("martingale", &record).await.unwrap();
        store.save("flat", &StrategyRecord::default()).await.unwrap();

        assert_eq!(store.list().await.unwrap(), vec!["flat", "martingale"]);
        assert_eq!(store.load("martingale").await.unwrap(), Some(record));
        assert_eq!(store.load("missing").await.unwrap(), None);

        store.delete("flat").await.unwrap();
        assert_eq!(
            store.delete("flat").await,
            Err(StoreError::NotFound("flat".to_string()))
        );
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_sparse_record_gets_defaults() {
        let store = InMemoryStore::new();
        store.insert_json(
            "old",
            r#"{ "lanes": [ { "id": "l1", "progression": { "mode": "CHAIN" } } ] }"#,
        );

        let record = store.load("old").await.unwrap().unwrap();
        assert!(record.lanes[0].progression.chain.steps.is_empty());
        assert_eq!(record.settings.starting_bankroll, dec!(1000));
        assert!(record.history.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_record_is_a_serialization_error() {
        let store = InMemoryStore::new();
        store.insert_json("broken", "{ not json");
        assert!(matches!(
            store.load("broken").await,
            Err(StoreError::Serialization(_))
        ));
    }
}
