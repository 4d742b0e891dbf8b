use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub google_api_key: String,
    pub census_api_key: Option<String>,
    pub log_level: String,
    pub min_population_density: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub rules_path: Option<PathBuf>,
    pub google_base_url: String,
    pub census_base_url: String,
    pub export_dir: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("google_api_key", &"[redacted]")
            .field(
                "census_api_key",
                &self.census_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("log_level", &self.log_level)
            .field("min_population_density", &self.min_population_density)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("rules_path", &self.rules_path)
            .field("google_base_url", &self.google_base_url)
            .field("census_base_url", &self.census_base_url)
            .field("export_dir", &self.export_dir)
            .finish()
    }
}
