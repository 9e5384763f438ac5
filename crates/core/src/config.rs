use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `LAUNCH_TRACK__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Title used for the generated suggestions document.
    #[serde(default = "default_document_title")]
    pub document_title: String,
    /// Offer cost applied when a snapshot does not carry one.
    #[serde(default = "default_offer_cost")]
    pub default_offer_cost: f64,
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Emit JSON-formatted log lines instead of the human-readable format.
    #[serde(default = "default_log_json")]
    pub json: bool,
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_document_title() -> String {
    "Launch Optimization Suggestions".to_string()
}
fn default_offer_cost() -> f64 {
    97.0
}
fn default_snapshot_path() -> String {
    "launch-snapshot.json".to_string()
}
fn default_log_json() -> bool {
    false
}
fn default_log_filter() -> String {
    "launch_console=info,launch_tracker=info,launch_insights=info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            json: default_log_json(),
            filter: default_log_filter(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            document_title: default_document_title(),
            default_offer_cost: default_offer_cost(),
            snapshot_path: default_snapshot_path(),
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("LAUNCH_TRACK")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
