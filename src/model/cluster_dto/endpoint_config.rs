use crate::common::*;

use crate::model::configs::config::*;

#[doc = "Fully resolved endpoint: every field required after the layered merge"]
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
#[getset(get = "pub")]
pub struct EndpointConfig {
    protocol: String,
    url: String,
    port: u16,
    username: String,
    password: String,
}

impl EndpointConfig {
    #[doc = "Function that merges one settings group onto its defaults"]
    /// Per field the cluster override wins, otherwise the default value is
    /// copied in. Each cluster ends up owning its own data, so no cluster can
    /// observe another cluster's settings.
    ///
    /// # Arguments
    /// * `group` - Group name for error messages, e.g. `es`
    /// * `settings` - The cluster's sparse override group
    /// * `defaults` - The global default group
    /// * `fallback_url` - Url used when neither layer sets one
    ///
    /// # Returns
    /// * Result<Self, anyhow::Error> - Error names the first missing field
    pub fn from_layers(
        group: &str,
        settings: &EndpointSettings,
        defaults: &EndpointSettings,
        fallback_url: Option<&str>,
    ) -> Result<Self, anyhow::Error> {
        let protocol: String = Self::resolve(group, "protocol", &settings.protocol, &defaults.protocol)?;
        let port: u16 = match settings.port.or(defaults.port) {
            Some(port) => port,
            None => {
                return Err(anyhow!(
                    "[EndpointConfig::from_layers] '{}.port' is not set",
                    group
                ))
            }
        };
        let username: String = Self::resolve(group, "username", &settings.username, &defaults.username)?;
        let password: String = Self::resolve(group, "password", &settings.password, &defaults.password)?;

        let url: String = match settings
            .url
            .clone()
            .or_else(|| defaults.url.clone())
            .or_else(|| fallback_url.map(str::to_string))
        {
            Some(url) => url,
            None => {
                return Err(anyhow!(
                    "[EndpointConfig::from_layers] '{}.url' is not set",
                    group
                ))
            }
        };

        Ok(EndpointConfig::new(protocol, url, port, username, password))
    }

    fn resolve(
        group: &str,
        field: &str,
        setting: &Option<String>,
        default: &Option<String>,
    ) -> Result<String, anyhow::Error> {
        setting
            .clone()
            .or_else(|| default.clone())
            .ok_or_else(|| {
                anyhow!(
                    "[EndpointConfig::from_layers] '{}.{}' is not set",
                    group,
                    field
                )
            })
    }

    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.url, self.port)
    }

    pub fn is_https(&self) -> bool {
        self.protocol == "https"
    }
}
