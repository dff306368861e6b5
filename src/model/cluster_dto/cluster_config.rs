use crate::common::*;

use crate::model::cluster_dto::endpoint_config::*;
use crate::model::configs::config::*;

#[doc = "One resolved search/dashboard pair; immutable after the merge"]
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
#[getset(get = "pub")]
pub struct ClusterConfig {
    es: EndpointConfig,
    kibana: EndpointConfig,
    exclude: HashSet<String>,
}

impl ClusterConfig {
    #[doc = "Function that builds one cluster config by layering overrides onto the defaults"]
    /// The kibana url falls back to the search endpoint url when neither layer
    /// sets one. The exclusion list defaults to empty and is normalized to a
    /// set.
    pub fn from_layers(
        settings: &ClusterSettings,
        defaults: &DefaultSettings,
    ) -> Result<Self, anyhow::Error> {
        let es: EndpointConfig =
            EndpointConfig::from_layers("es", &settings.es, &defaults.es, None)?;

        let kibana: EndpointConfig = EndpointConfig::from_layers(
            "kibana",
            &settings.kibana,
            &defaults.kibana,
            Some(es.url()),
        )?;

        let exclude: HashSet<String> = settings.exclude.iter().cloned().collect();

        Ok(ClusterConfig::new(es, kibana, exclude))
    }

    #[doc = "Function that builds every cluster config of the loaded file"]
    pub fn build_cluster_configs(config: &RefreshConfig) -> Result<Vec<Self>, anyhow::Error> {
        config
            .clusters
            .iter()
            .map(|cluster| Self::from_layers(cluster, &config.defaults))
            .collect()
    }

    #[doc = "Cluster label used in log events: the search endpoint url"]
    pub fn name(&self) -> &str {
        self.es.url()
    }
}
