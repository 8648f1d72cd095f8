use async_trait::async_trait;
use croupier_core::StrategyRecord;

use crate::error::StoreResult;

/// Port for strategy persistence
///
/// The engine never touches a storage medium itself; a collaborator
/// implementing this trait loads and saves named records, and the engine
/// takes the loaded record back as direct input.
#[async_trait]
pub trait StrategyStore: Send + Sync {
    /// Load a named record, `None` if it does not exist
    async fn load(&self, name: &str) -> StoreResult<Option<StrategyRecord>>;

    /// Save (or overwrite) a named record
    async fn save(&self, name: &str, record: &StrategyRecord) -> StoreResult<()>;

    /// Names of all saved records, sorted
    async fn list(&self) -> StoreResult<Vec<String>>;

    /// Delete a named record
    async fn delete(&self, name: &str) -> StoreResult<()>;
}
