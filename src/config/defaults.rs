pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub fn default_port() -> u16 {
    3000
}

pub fn default_environment() -> String {
    "development".to_string()
}

pub fn default_db_max_connections() -> u32 {
    10
}

pub fn default_db_min_connections() -> u32 {
    1
}

pub fn default_db_acquire_timeout_seconds() -> u64 {
    10
}

pub fn default_db_idle_timeout_seconds() -> u64 {
    600
}

pub fn default_db_max_lifetime_seconds() -> u64 {
    1800
}

pub fn default_db_test_before_acquire() -> bool {
    true
}

pub fn default_cors_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

pub fn default_metrics_allow_private_only() -> bool {
    true
}

pub fn default_logging_level() -> String {
    "info,sqlx=warn".to_string()
}

pub fn default_logging_json_format() -> bool {
    true
}

pub fn default_nearest_limit() -> usize {
    5
}

pub fn default_nearest_prefilter_enabled() -> bool {
    true
}

pub fn default_nearest_max_radius_km() -> f64 {
    5.0
}
