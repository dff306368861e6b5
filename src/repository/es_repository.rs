use crate::common::*;

use crate::model::cluster_dto::endpoint_config::*;
use crate::model::kibana_dto::index_pattern::*;

use crate::traits::repository::es_repository_trait::*;

#[doc = "Internal index where the dashboard keeps its index-pattern documents"]
pub const KIBANA_META_INDEX: &str = ".kibana";

const INDEX_PATTERN_DOC_TYPE: &str = "index-pattern";
const SCROLL_KEEP_ALIVE: &str = "1m";
const SCROLL_PAGE_SIZE: i64 = 1000;

#[derive(Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct EsRepositoryImpl {
    pub cluster_name: String,
    pub es_client: Elasticsearch,
}

impl EsRepositoryImpl {
    #[doc = "Elasticsearch connection 생성자"]
    /// # Arguments
    /// * `es_config` - Resolved search endpoint of one cluster
    ///
    /// # Returns
    /// * Result<Self, anyhow::Error>
    pub fn new(es_config: &EndpointConfig) -> Result<Self, anyhow::Error> {
        let es_client: Elasticsearch = Self::create_es_client(es_config)
            .map_err(|e| anyhow!("[EsRepositoryImpl::new] {:?}", e))?;

        Ok(Self {
            cluster_name: es_config.url().to_string(),
            es_client,
        })
    }

    #[doc = "Function that creates the Elasticsearch client for one endpoint"]
    /// TLS is implied by the `https` protocol of the merged config. The
    /// transport intentionally carries no timeout; only the dashboard client
    /// does.
    fn create_es_client(es_config: &EndpointConfig) -> anyhow::Result<Elasticsearch> {
        let url: Url = Url::parse(&es_config.base_url()).map_err(|e| {
            anyhow!(
                "[EsRepositoryImpl::create_es_client] Invalid url '{}': {:?}",
                es_config.base_url(),
                e
            )
        })?;

        let conn_pool: SingleNodeConnectionPool = SingleNodeConnectionPool::new(url);

        let builder: TransportBuilder = TransportBuilder::new(conn_pool).auth(EsCredentials::Basic(
            es_config.username().to_string(),
            es_config.password().to_string(),
        ));

        let transport: EsTransport = builder
            .build()
            .map_err(|e| anyhow!("[EsRepositoryImpl::create_es_client] {:?}", e))?;

        Ok(Elasticsearch::new(transport))
    }

    #[doc = "Function that extracts the scroll id and the pattern documents of one page"]
    fn parse_scroll_page(body: &Value) -> (Option<String>, Vec<IndexPatternSource>) {
        let scroll_id: Option<String> = body["_scroll_id"].as_str().map(str::to_string);

        let mut sources: Vec<IndexPatternSource> = Vec::new();

        if let Some(hits) = body["hits"]["hits"].as_array() {
            for hit in hits {
                let id: &str = match hit["_id"].as_str() {
                    Some(id) => id,
                    None => continue,
                };

                /* An empty timeFieldName means no time series field at all. */
                let time_field: Option<String> = hit["_source"]["timeFieldName"]
                    .as_str()
                    .and_then(|field| (!field.is_empty()).then(|| field.to_string()));

                sources.push(IndexPatternSource::new(id.to_string(), time_field));
            }
        }

        (scroll_id, sources)
    }
}

#[async_trait]
impl EsRepository for EsRepositoryImpl {
    #[doc = "Elasticsearch 클러스터의 Health Check 해주는 함수."]
    async fn get_health_info(&self) -> Result<Value, anyhow::Error> {
        let response: EsResponse = self
            .es_client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await?;

        if response.status_code().is_success() {
            let resp: Value = response.json().await?;
            Ok(resp)
        } else {
            let error_message: String = format!(
                "[EsRepositoryImpl::get_health_info()] Failed to GET health: Status Code: {}",
                response.status_code()
            );
            Err(anyhow!(error_message))
        }
    }

    #[doc = "Function that checks whether an index exists on the cluster"]
    async fn exists_index(&self, index: &str) -> Result<bool, anyhow::Error> {
        let response: EsResponse = self
            .es_client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await?;

        Ok(response.status_code().is_success())
    }

    #[doc = "Function that scroll-scans every index-pattern document of the metadata index"]
    /// Only the `timeFieldName` attribute is retrieved per document. The
    /// scroll context is cleared once the last page was read.
    ///
    /// # Returns
    /// * Result<Vec<IndexPatternSource>, anyhow::Error>
    async fn scan_index_patterns(
        &self,
        index: &str,
    ) -> Result<Vec<IndexPatternSource>, anyhow::Error> {
        let response: EsResponse = self
            .es_client
            .search(SearchParts::Index(&[index]))
            .scroll(SCROLL_KEEP_ALIVE)
            .body(json!({
                "size": SCROLL_PAGE_SIZE,
                "_source": ["timeFieldName"],
                "query": { "term": { "type": INDEX_PATTERN_DOC_TYPE } }
            }))
            .send()
            .await?;

        if !response.status_code().is_success() {
            return Err(anyhow!(
                "[EsRepositoryImpl::scan_index_patterns] Failed to scan '{}': Status Code: {}",
                index,
                response.status_code()
            ));
        }

        let body: Value = response.json().await?;
        let (mut scroll_id, mut page) = Self::parse_scroll_page(&body);

        let mut patterns: Vec<IndexPatternSource> = Vec::new();

        while !page.is_empty() {
            patterns.extend(page);

            let sid: String = match &scroll_id {
                Some(sid) => sid.clone(),
                None => break,
            };

            let response: EsResponse = self
                .es_client
                .scroll(ScrollParts::None)
                .body(json!({
                    "scroll": SCROLL_KEEP_ALIVE,
                    "scroll_id": sid
                }))
                .send()
                .await?;

            if !response.status_code().is_success() {
                return Err(anyhow!(
                    "[EsRepositoryImpl::scan_index_patterns] Scroll failed on '{}': Status Code: {}",
                    index,
                    response.status_code()
                ));
            }

            let body: Value = response.json().await?;
            let (next_scroll_id, next_page) = Self::parse_scroll_page(&body);
            scroll_id = next_scroll_id.or(scroll_id);
            page = next_page;
        }

        if let Some(sid) = scroll_id {
            /* Best effort; an expired scroll context is harmless. */
            let _ = self
                .es_client
                .clear_scroll(ClearScrollParts::None)
                .body(json!({ "scroll_id": [sid] }))
                .send()
                .await;
        }

        Ok(patterns)
    }
}
