//! Bridge configuration.
//!
//! All knobs default to the values the original gateway module shipped
//! with; `ALEXA_BRIDGE_*` environment variables override them so the host
//! can reconfigure without code.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Runtime configuration for the bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Gateway FQDN used to build the endpoint callback URI.
    #[serde(default = "default_fqdn")]
    pub gateway_fqdn: String,

    /// Gateway HTTPS port used to build the endpoint callback URI.
    #[serde(default = "default_port")]
    pub gateway_port: u16,

    /// Bounded wait for lock/unlock commands to reach a terminal state.
    #[serde(default = "default_lock_timeout", with = "duration_secs")]
    pub lock_timeout: Duration,

    /// Fixed base interval between discovery cycles.
    #[serde(default = "default_discovery_interval", with = "duration_secs")]
    pub discovery_interval: Duration,

    /// Upper bound of the uniform random jitter added before each cycle.
    #[serde(default = "default_discovery_jitter", with = "duration_secs")]
    pub discovery_jitter: Duration,
}

fn default_fqdn() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    8443
}

fn default_lock_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_discovery_interval() -> Duration {
    Duration::from_secs(300)
}

fn default_discovery_jitter() -> Duration {
    Duration::from_secs(30)
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            gateway_fqdn: default_fqdn(),
            gateway_port: default_port(),
            lock_timeout: default_lock_timeout(),
            discovery_interval: default_discovery_interval(),
            discovery_jitter: default_discovery_jitter(),
        }
    }
}

impl BridgeConfig {
    /// Build a configuration from `ALEXA_BRIDGE_*` environment variables,
    /// falling back to defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(fqdn) = env::var("ALEXA_BRIDGE_FQDN") {
            if !fqdn.is_empty() {
                config.gateway_fqdn = fqdn;
            }
        }
        if let Some(port) = env_parse("ALEXA_BRIDGE_PORT") {
            config.gateway_port = port;
        }
        if let Some(secs) = env_parse("ALEXA_BRIDGE_LOCK_TIMEOUT_SECS") {
            config.lock_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = env_parse("ALEXA_BRIDGE_DISCOVERY_INTERVAL_SECS") {
            config.discovery_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = env_parse("ALEXA_BRIDGE_DISCOVERY_JITTER_SECS") {
            config.discovery_jitter = Duration::from_secs(secs);
        }
        config
    }

    /// Callback URI embedded in every endpoint cookie:
    /// `https://e.<fqdn>:<port>`.
    pub fn callback_uri(&self) -> String {
        format!("https://e.{}:{}", self.gateway_fqdn, self.gateway_port)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

/// Serialize durations as whole seconds.
mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(d)?))
    }
}
