use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub default_level: tracing::Level,
    pub json_format: bool,
    pub show_targets: bool,
    pub show_logs: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_level: tracing::Level::INFO,
            json_format: false,
            show_targets: true,
            show_logs: true,
        }
    }
}

impl LogConfig {
    /// Verbose, human-readable
    pub fn dev() -> Self {
        Self {
            default_level: tracing::Level::DEBUG,
            ..Default::default()
        }
    }

    /// One JSON object per line, for log shipping
    pub fn with_json(mut self) -> Self {
        self.json_format = true;
        self
    }

    pub fn without_logs(mut self) -> Self {
        self.show_logs = false;
        self
    }

    /// Filter used when `RUST_LOG` is not set
    pub fn default_filter(&self) -> String {
        format!(
            "treasure_hunt_cli={level},treasure_hunt_core={level}",
            level = self.default_level
        )
    }

    pub fn init(self) -> Result<(), String> {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_filter()));

        if !self.show_logs {
            return tracing_subscriber::registry()
                .with(env_filter)
                .try_init()
                .map_err(|e| format!("Failed to initialize tracing: {}", e));
        }

        // Logs go to stderr; stdout carries command output
        if self.json_format {
            let fmt_layer = fmt::layer()
                .json()
                .with_target(self.show_targets)
                .with_writer(std::io::stderr);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
                .map_err(|e| format!("Failed to initialize tracing: {}", e))
        } else {
            let fmt_layer = fmt::layer()
                .with_target(self.show_targets)
                .with_writer(std::io::stderr);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
                .map_err(|e| format!("Failed to initialize tracing: {}", e))
        }
    }
}
