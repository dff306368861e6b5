use crate::common::*;

use crate::enums::reachability::*;

use crate::model::monitoring::refresh_summary::*;

use crate::traits::service::refresh_service_trait::*;

use crate::utils_modules::logger_utils::*;

#[derive(Debug, new)]
pub struct RunController<S: RefreshService> {
    refresh_services: Vec<Arc<S>>,
}

impl<S> RunController<S>
where
    S: RefreshService + Send + Sync,
{
    #[doc = "Single forward pass over all configured clusters"]
    /// Clusters are processed strictly sequentially. The credential check
    /// partitions the clusters first; an unreachable cluster is logged and
    /// skipped as a whole. Enumeration errors (missing metadata index) abort
    /// the pass and propagate to the top level handler.
    pub async fn run(&self) -> Result<(), anyhow::Error> {
        /* 1. Only the reachable clusters get refreshed. */
        let mut good: Vec<&Arc<S>> = Vec::new();

        for service in &self.refresh_services {
            match service.check_credentials().await {
                Reachability::Reachable => {
                    log_event(
                        Level::Debug,
                        "good_credentials",
                        json!({ "cluster": service.cluster_name() }),
                    );
                    good.push(service);
                }
                state => {
                    log_event(
                        Level::Error,
                        "failed_credentials",
                        json!({
                            "cluster": service.cluster_name(),
                            "reason": state.reason()
                        }),
                    );
                }
            }
        }

        /* 2. Enumerate, refresh and report per cluster. */
        for service in good {
            let start: Instant = Instant::now();

            let patterns: HashMap<String, Option<String>> = service.get_index_patterns().await?;

            service.refresh_index_patterns(&patterns).await;

            let summary: RefreshSummary = RefreshSummary::from_patterns(
                service.cluster_name(),
                &patterns,
                start.elapsed().as_secs_f64(),
            );

            match serde_json::to_value(&summary) {
                Ok(fields) => log_event(Level::Info, "refreshed_patterns", fields),
                Err(e) => error!("[RunController::run] Failed to serialize summary: {:?}", e),
            }
        }

        log_event(Level::Debug, "finished", json!({}));

        Ok(())
    }
}
