use crate::common::*;

/* Exit policy is read by main() after the run, possibly after config loading
itself failed, so it lives in a process-global set at most once. */
static EXIT_ZERO_ON_ERROR: OnceCell<bool> = OnceCell::new();

fn default_exit_zero_on_error() -> bool {
    true
}

#[doc = "Raw configuration file layout: global defaults plus per cluster overrides"]
#[derive(Serialize, Deserialize, Debug)]
pub struct RefreshConfig {
    pub defaults: DefaultSettings,
    pub clusters: Vec<ClusterSettings>,
    /* Exit 0 even on fatal errors; cron wrappers watch the event log, not
    the exit code. Set to false to get a failure exit code instead. */
    #[serde(default = "default_exit_zero_on_error")]
    pub exit_zero_on_error: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct DefaultSettings {
    #[serde(default)]
    pub es: EndpointSettings,
    #[serde(default)]
    pub kibana: EndpointSettings,
}

#[doc = "One sparse settings group: every field optional so a cluster may override any subset"]
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct EndpointSettings {
    pub protocol: Option<String>,
    pub url: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ClusterSettings {
    #[serde(default)]
    pub es: EndpointSettings,
    #[serde(default)]
    pub kibana: EndpointSettings,
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[doc = "Function that stores the exit policy of the loaded config"]
pub fn set_exit_policy(exit_zero_on_error: bool) {
    if EXIT_ZERO_ON_ERROR.set(exit_zero_on_error).is_err() {
        warn!("[set_exit_policy] Exit policy is already set");
    }
}

#[doc = "Exit policy: defaults to exit 0 when the config never loaded"]
pub fn exit_zero_on_error() -> bool {
    *EXIT_ZERO_ON_ERROR.get().unwrap_or(&true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_layered_yaml() {
        let raw = r#"
defaults:
  es:
    protocol: https
    port: 9200
    username: admin
    password: secret
  kibana:
    protocol: https
    port: 5601
    username: admin
    password: secret
clusters:
  - es:
      url: es-a.internal
    exclude: [foo, bar]
  - es:
      url: es-b.internal
    kibana:
      url: kibana-b.internal
"#;

        let config: RefreshConfig = serde_yaml::from_str(raw).expect("parse");

        assert_eq!(config.defaults.es.port, Some(9200));
        assert_eq!(config.clusters.len(), 2);
        assert_eq!(config.clusters[0].exclude, vec!["foo", "bar"]);
        assert!(config.clusters[0].kibana.url.is_none());
        assert_eq!(
            config.clusters[1].kibana.url.as_deref(),
            Some("kibana-b.internal")
        );
        assert!(config.exit_zero_on_error);
    }

    #[test]
    fn test_exit_flag_parsed_when_present() {
        let raw = r#"
defaults:
  es: {}
  kibana: {}
clusters: []
exit_zero_on_error: false
"#;

        let config: RefreshConfig = serde_yaml::from_str(raw).expect("parse");
        assert!(!config.exit_zero_on_error);
    }
}
