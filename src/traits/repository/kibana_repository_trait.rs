use crate::common::*;

#[async_trait]
pub trait KibanaRepository {
    async fn check_conn(&self) -> Result<u16, anyhow::Error>;
    async fn refresh_index_pattern(
        &self,
        pattern: &str,
        time_field: Option<&str>,
    ) -> Result<(), anyhow::Error>;
}
