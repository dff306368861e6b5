use crate::common::*;

use crate::enums::reachability::*;

#[async_trait]
pub trait RefreshService {
    fn cluster_name(&self) -> &str;
    async fn check_credentials(&self) -> Reachability;
    async fn get_index_patterns(&self) -> Result<HashMap<String, Option<String>>, anyhow::Error>;
    async fn refresh_index_patterns(&self, patterns: &HashMap<String, Option<String>>);
}
