use serde::Deserialize;

use super::ConfigError;

/// Tuning for the nearest-neighbour endpoints.
///
/// With the pre-filter enabled a location further than `nearest_max_radius_km`
/// never appears in a nearest result, even when fewer than `nearest_limit`
/// candidates are in range.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SearchConfig {
    #[serde(default = "crate::config::defaults::default_nearest_limit")]
    pub nearest_limit: usize,
    #[serde(default = "crate::config::defaults::default_nearest_prefilter_enabled")]
    pub nearest_prefilter_enabled: bool,
    #[serde(default = "crate::config::defaults::default_nearest_max_radius_km")]
    pub nearest_max_radius_km: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            nearest_limit: crate::config::defaults::default_nearest_limit(),
            nearest_prefilter_enabled: crate::config::defaults::default_nearest_prefilter_enabled(),
            nearest_max_radius_km: crate::config::defaults::default_nearest_max_radius_km(),
        }
    }
}

impl SearchConfig {
    /// Radius cap handed to the nearest selector, `None` when the pre-filter is off.
    pub fn nearest_radius_cap(&self) -> Option<f64> {
        self.nearest_prefilter_enabled
            .then_some(self.nearest_max_radius_km)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nearest_limit == 0 {
            return Err(ConfigError::Search(
                "nearest_limit must be greater than zero".to_string(),
            ));
        }
        if !self.nearest_max_radius_km.is_finite() || self.nearest_max_radius_km < 0.0 {
            return Err(ConfigError::Search(
                "nearest_max_radius_km must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}
