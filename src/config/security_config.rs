use std::net::IpAddr;

use serde::Deserialize;

use super::defaults;

#[derive(Debug, Deserialize, Clone)]
pub struct SecurityConfig {
    #[serde(default = "defaults::default_cors_allowed_origins")]
    pub cors_allowed_origins: Vec<String>,
    /// Serve `/metrics` to loopback and private-range peers only.
    #[serde(default = "defaults::default_metrics_allow_private_only")]
    pub metrics_allow_private_only: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            cors_allowed_origins: defaults::default_cors_allowed_origins(),
            metrics_allow_private_only: defaults::default_metrics_allow_private_only(),
        }
    }
}

impl SecurityConfig {
    /// An unknown peer is refused whenever the restriction is on.
    pub fn allows_metrics_from(&self, peer: Option<IpAddr>) -> bool {
        if !self.metrics_allow_private_only {
            return true;
        }
        match peer {
            Some(IpAddr::V4(v4)) => v4.is_private() || v4.is_loopback(),
            Some(IpAddr::V6(v6)) => v6.is_loopback() || v6.is_unique_local(),
            None => false,
        }
    }
}
