use crate::common::*;

use crate::model::cluster_dto::endpoint_config::*;
use crate::model::kibana_dto::index_pattern::*;

use crate::traits::repository::kibana_repository_trait::*;

use crate::utils_modules::logger_utils::*;

const KIBANA_APP_PATH: &str = "/app/kibana";
const REFRESH_PATH: &str = "/es_admin/.kibana/index-pattern/";
const XSRF_HEADER: &str = "kbn-xsrf";
const KIBANA_TIMEOUT: Duration = Duration::from_secs(10);

/* Everything except the wildcard gets percent-encoded; a pattern id like
`logs-*` must keep its `*` on the refresh path. */
const PATTERN_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct KibanaRepositoryImpl {
    pub cluster_name: String,
    pub base_url: String,
    pub username: String,
    pub password: String,
    client: Client,
}

impl KibanaRepositoryImpl {
    #[doc = "Kibana http client 생성자"]
    /// # Arguments
    /// * `cluster_name` - Cluster label for log events
    /// * `kibana_config` - Resolved dashboard endpoint of one cluster
    ///
    /// # Returns
    /// * Result<Self, anyhow::Error>
    pub fn new(cluster_name: &str, kibana_config: &EndpointConfig) -> Result<Self, anyhow::Error> {
        let client: Client = Client::builder()
            .timeout(KIBANA_TIMEOUT)
            .build()
            .map_err(|e| anyhow!("[KibanaRepositoryImpl::new] Failed to build http client: {:?}", e))?;

        Ok(Self {
            cluster_name: cluster_name.to_string(),
            base_url: kibana_config.base_url(),
            username: kibana_config.username().to_string(),
            password: kibana_config.password().to_string(),
            client,
        })
    }

    fn encode_pattern_id(pattern: &str) -> String {
        utf8_percent_encode(pattern, PATTERN_ENCODE_SET).to_string()
    }
}

#[async_trait]
impl KibanaRepository for KibanaRepositoryImpl {
    #[doc = "Liveness check: HEAD request against the application root path"]
    /// # Returns
    /// * Result<u16, anyhow::Error> - Response status code; transport errors
    ///   (refused connection, timeout, bad credentials on the proxy) become Err
    async fn check_conn(&self) -> Result<u16, anyhow::Error> {
        let url: String = format!("{}{}", self.base_url, KIBANA_APP_PATH);

        let response: reqwest::Response = self
            .client
            .head(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|e| anyhow!("[KibanaRepositoryImpl::check_conn] {:?}", e))?;

        Ok(response.status().as_u16())
    }

    #[doc = "Function that asks the dashboard to re-derive the field mappings of one pattern"]
    /// # Arguments
    /// * `pattern` - Pattern id; the wildcard character stays unencoded
    /// * `time_field` - Time series field, added to the body when present
    async fn refresh_index_pattern(
        &self,
        pattern: &str,
        time_field: Option<&str>,
    ) -> Result<(), anyhow::Error> {
        let url: String = format!(
            "{}{}{}/",
            self.base_url,
            REFRESH_PATH,
            Self::encode_pattern_id(pattern)
        );

        let payload: RefreshPayload = RefreshPayload::new(pattern, time_field);

        let response: reqwest::Response = self
            .client
            .post(&url)
            .basic_auth(&self.username, Some(&self.password))
            .header(XSRF_HEADER, "anything")
            .json(&payload)
            .send()
            .await
            .map_err(|e| anyhow!("[KibanaRepositoryImpl::refresh_index_pattern] {:?}", e))?;

        if response.status().is_success() {
            log_event(
                Level::Debug,
                "sent_refresh",
                json!({
                    "cluster": self.cluster_name,
                    "pattern": pattern,
                    "url": url,
                    "payload": payload,
                    "status": response.status().as_u16()
                }),
            );
            Ok(())
        } else {
            Err(anyhow!(
                "[KibanaRepositoryImpl::refresh_index_pattern] Failed to refresh '{}': Status Code: {}",
                pattern,
                response.status()
            ))
        }
    }
}
