pub fn default_service_name() -> String {
    "Configuration Manager".to_string()
}

pub fn default_api_prefix() -> String {
    "/api".to_string()
}

pub fn default_user() -> String {
    "admin".to_string()
}

pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub fn default_port() -> u16 {
    8000
}

pub fn default_request_timeout_seconds() -> u64 {
    30
}

pub fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:5174".to_string()]
}

pub fn default_log_format() -> String {
    "pretty".to_string()
}

pub fn default_metrics_port() -> u16 {
    9090
}

pub fn default_metrics_enabled() -> bool {
    false
}
