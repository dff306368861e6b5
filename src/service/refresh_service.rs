use crate::common::*;

use crate::enums::reachability::*;

use crate::model::cluster_dto::cluster_config::*;
use crate::model::kibana_dto::index_pattern::*;

use crate::repository::es_repository::KIBANA_META_INDEX;

use crate::traits::repository::{es_repository_trait::*, kibana_repository_trait::*};
use crate::traits::service::refresh_service_trait::*;

use crate::utils_modules::logger_utils::*;

#[derive(Debug, new)]
pub struct RefreshServiceImpl<E: EsRepository, K: KibanaRepository> {
    cluster: ClusterConfig,
    es_repository: Arc<E>,
    kibana_repository: Arc<K>,
}

#[async_trait]
impl<E, K> RefreshService for RefreshServiceImpl<E, K>
where
    E: EsRepository + Send + Sync,
    K: KibanaRepository + Send + Sync,
{
    fn cluster_name(&self) -> &str {
        self.cluster.name()
    }

    #[doc = "Function that verifies both endpoints are alive with the configured credentials"]
    /// Never fails the run; every failure becomes an unreachable value with
    /// its reason, and an unreachable cluster is skipped as a whole. There is
    /// no partial refresh.
    async fn check_credentials(&self) -> Reachability {
        if let Err(e) = self.es_repository.get_health_info().await {
            return Reachability::EsUnreachable(e.to_string());
        }

        match self.kibana_repository.check_conn().await {
            Ok(status) if (200..300).contains(&status) => Reachability::Reachable,
            Ok(status) => Reachability::KibanaBadStatus(status),
            Err(e) => Reachability::KibanaUnreachable(e.to_string()),
        }
    }

    #[doc = "Function that enumerates the refreshable index patterns of this cluster"]
    /// Dot-prefixed identifiers are internal records of the dashboard itself
    /// and are always skipped, as is anything on the exclusion list.
    ///
    /// # Returns
    /// * Result<HashMap<String, Option<String>>, anyhow::Error> - Pattern id
    ///   mapped to its optional time series field. Errors when the metadata
    ///   index is missing; that error is left to the top level handler.
    async fn get_index_patterns(&self) -> Result<HashMap<String, Option<String>>, anyhow::Error> {
        let exists: bool = self
            .es_repository
            .exists_index(KIBANA_META_INDEX)
            .await
            .map_err(|e| anyhow!("[RefreshServiceImpl::get_index_patterns] {:?}", e))?;

        if !exists {
            return Err(anyhow!(
                "[RefreshServiceImpl::get_index_patterns] '{}' index on {} is missing!",
                KIBANA_META_INDEX,
                self.cluster_name()
            ));
        }

        let sources: Vec<IndexPatternSource> = self
            .es_repository
            .scan_index_patterns(KIBANA_META_INDEX)
            .await?;

        let mut patterns: HashMap<String, Option<String>> = HashMap::new();

        for source in sources {
            if source.id().starts_with('.') || self.cluster.exclude().contains(source.id()) {
                continue;
            }

            patterns.insert(source.id().clone(), source.time_field_name().clone());
        }

        log_event(
            Level::Debug,
            "fetched_patterns",
            json!({ "cluster": self.cluster_name(), "patterns": patterns }),
        );

        Ok(patterns)
    }

    #[doc = "Function that refreshes every enumerated pattern, best effort per pattern"]
    /// A failed POST is logged and the loop continues; one broken pattern must
    /// not keep the remaining patterns stale.
    async fn refresh_index_patterns(&self, patterns: &HashMap<String, Option<String>>) {
        for (pattern, time_field) in patterns {
            if let Err(e) = self
                .kibana_repository
                .refresh_index_pattern(pattern, time_field.as_deref())
                .await
            {
                log_event(
                    Level::Error,
                    "failed_refresh",
                    json!({
                        "cluster": self.cluster_name(),
                        "pattern": pattern,
                        "reason": e.to_string()
                    }),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::cluster_dto::endpoint_config::*;

    use std::sync::Mutex;

    struct MockEsRepository {
        health_ok: bool,
        meta_index_exists: bool,
        docs: Vec<IndexPatternSource>,
    }

    #[async_trait]
    impl EsRepository for MockEsRepository {
        async fn get_health_info(&self) -> Result<Value, anyhow::Error> {
            if self.health_ok {
                Ok(json!({ "status": "green" }))
            } else {
                Err(anyhow!("connection refused"))
            }
        }

        async fn exists_index(&self, _index: &str) -> Result<bool, anyhow::Error> {
            Ok(self.meta_index_exists)
        }

        async fn scan_index_patterns(
            &self,
            _index: &str,
        ) -> Result<Vec<IndexPatternSource>, anyhow::Error> {
            Ok(self.docs.clone())
        }
    }

    struct MockKibanaRepository {
        conn_status: Result<u16, String>,
        fail_patterns: HashSet<String>,
        refreshed: Mutex<Vec<(String, Option<String>)>>,
    }

    impl MockKibanaRepository {
        fn reachable() -> Self {
            MockKibanaRepository {
                conn_status: Ok(200),
                fail_patterns: HashSet::new(),
                refreshed: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl KibanaRepository for MockKibanaRepository {
        async fn check_conn(&self) -> Result<u16, anyhow::Error> {
            match &self.conn_status {
                Ok(status) => Ok(*status),
                Err(reason) => Err(anyhow!("{}", reason.clone())),
            }
        }

        async fn refresh_index_pattern(
            &self,
            pattern: &str,
            time_field: Option<&str>,
        ) -> Result<(), anyhow::Error> {
            if self.fail_patterns.contains(pattern) {
                return Err(anyhow!("Status Code: 502"));
            }

            self.refreshed
                .lock()
                .expect("lock")
                .push((pattern.to_string(), time_field.map(str::to_string)));
            Ok(())
        }
    }

    fn cluster_config(exclude: &[&str]) -> ClusterConfig {
        let es = EndpointConfig::new(
            "https".to_string(),
            "es-a.internal".to_string(),
            9200,
            "admin".to_string(),
            "secret".to_string(),
        );
        let kibana = EndpointConfig::new(
            "https".to_string(),
            "es-a.internal".to_string(),
            5601,
            "admin".to_string(),
            "secret".to_string(),
        );
        let exclude: HashSet<String> = exclude.iter().map(|s| s.to_string()).collect();
        ClusterConfig::new(es, kibana, exclude)
    }

    fn service(
        cluster: ClusterConfig,
        es: MockEsRepository,
        kibana: MockKibanaRepository,
    ) -> RefreshServiceImpl<MockEsRepository, MockKibanaRepository> {
        RefreshServiceImpl::new(cluster, Arc::new(es), Arc::new(kibana))
    }

    #[tokio::test]
    async fn test_enumeration_skips_hidden_and_excluded_patterns() {
        let es = MockEsRepository {
            health_ok: true,
            meta_index_exists: true,
            docs: vec![
                IndexPatternSource::new("sample".to_string(), Some("@timestamp".to_string())),
                IndexPatternSource::new(".hidden".to_string(), None),
                IndexPatternSource::new("foo".to_string(), None),
            ],
        };

        let svc = service(cluster_config(&["foo"]), es, MockKibanaRepository::reachable());

        let patterns = svc.get_index_patterns().await.expect("enumerate");

        assert_eq!(patterns.len(), 1);
        assert_eq!(
            patterns.get("sample"),
            Some(&Some("@timestamp".to_string()))
        );
        assert!(!patterns.contains_key(".hidden"));
        assert!(!patterns.contains_key("foo"));
    }

    #[tokio::test]
    async fn test_missing_meta_index_is_an_error() {
        let es = MockEsRepository {
            health_ok: true,
            meta_index_exists: false,
            docs: Vec::new(),
        };

        let svc = service(cluster_config(&[]), es, MockKibanaRepository::reachable());

        let err = svc.get_index_patterns().await.expect_err("missing index");
        assert!(err.to_string().contains(".kibana"));
    }

    #[tokio::test]
    async fn test_check_credentials_reports_the_failing_side() {
        let es_down = MockEsRepository {
            health_ok: false,
            meta_index_exists: true,
            docs: Vec::new(),
        };
        let svc = service(cluster_config(&[]), es_down, MockKibanaRepository::reachable());
        assert!(matches!(
            svc.check_credentials().await,
            Reachability::EsUnreachable(_)
        ));

        let es_up = MockEsRepository {
            health_ok: true,
            meta_index_exists: true,
            docs: Vec::new(),
        };
        let kibana_down = MockKibanaRepository {
            conn_status: Err("timed out".to_string()),
            fail_patterns: HashSet::new(),
            refreshed: Mutex::new(Vec::new()),
        };
        let svc = service(cluster_config(&[]), es_up, kibana_down);
        assert!(matches!(
            svc.check_credentials().await,
            Reachability::KibanaUnreachable(_)
        ));
    }

    #[tokio::test]
    async fn test_check_credentials_flags_non_success_status() {
        let es = MockEsRepository {
            health_ok: true,
            meta_index_exists: true,
            docs: Vec::new(),
        };
        let kibana = MockKibanaRepository {
            conn_status: Ok(503),
            fail_patterns: HashSet::new(),
            refreshed: Mutex::new(Vec::new()),
        };

        let svc = service(cluster_config(&[]), es, kibana);

        assert_eq!(
            svc.check_credentials().await,
            Reachability::KibanaBadStatus(503)
        );
    }

    #[tokio::test]
    async fn test_refresh_posts_exactly_the_enumerated_patterns() {
        let es = MockEsRepository {
            health_ok: true,
            meta_index_exists: true,
            docs: vec![
                IndexPatternSource::new("sample".to_string(), Some("@timestamp".to_string())),
                IndexPatternSource::new(".hidden".to_string(), None),
            ],
        };

        let svc = service(cluster_config(&[]), es, MockKibanaRepository::reachable());

        let patterns = svc.get_index_patterns().await.expect("enumerate");
        svc.refresh_index_patterns(&patterns).await;

        let refreshed = svc.kibana_repository.refreshed.lock().expect("lock");
        assert_eq!(
            *refreshed,
            vec![("sample".to_string(), Some("@timestamp".to_string()))]
        );
    }

    #[tokio::test]
    async fn test_refresh_continues_past_a_failed_post() {
        let es = MockEsRepository {
            health_ok: true,
            meta_index_exists: true,
            docs: vec![
                IndexPatternSource::new("broken".to_string(), None),
                IndexPatternSource::new("healthy".to_string(), None),
            ],
        };
        let kibana = MockKibanaRepository {
            conn_status: Ok(200),
            fail_patterns: ["broken".to_string()].into_iter().collect(),
            refreshed: Mutex::new(Vec::new()),
        };

        let svc = service(cluster_config(&[]), es, kibana);

        let patterns = svc.get_index_patterns().await.expect("enumerate");
        svc.refresh_index_patterns(&patterns).await;

        let refreshed = svc.kibana_repository.refreshed.lock().expect("lock");
        assert_eq!(refreshed.len(), 1);
        assert_eq!(refreshed[0].0, "healthy");
    }
}
