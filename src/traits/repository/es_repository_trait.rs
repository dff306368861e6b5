use crate::common::*;

use crate::model::kibana_dto::index_pattern::*;

#[async_trait]
pub trait EsRepository {
    async fn get_health_info(&self) -> Result<Value, anyhow::Error>;
    async fn exists_index(&self, index: &str) -> Result<bool, anyhow::Error>;
    async fn scan_index_patterns(
        &self,
        index: &str,
    ) -> Result<Vec<IndexPatternSource>, anyhow::Error>;
}
