use serde::Deserialize;

/// Upper bound on lines read from the log tail for connection classification.
pub const MAX_TAIL_LINES: usize = 100;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub logs: LogsConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub page: PageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 7860,
            host: "0.0.0.0".into(),
        }
    }
}

/// Both substrings must appear in a process's joined command line for it to count as the gateway.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub process_match: String,
    pub subcommand_match: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            process_match: "openclaw".into(),
            subcommand_match: "gateway".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogsConfig {
    /// Directory holding `<prefix>-<YYYY-MM-DD>.log`.
    pub dir: String,
    pub prefix: String,
    /// Lines read from the end of the log for connection classification (at most 100).
    pub tail_lines: usize,
    pub read_timeout_ms: u64,
    /// Presence of this marker means the messaging subsystem has logged anything at all.
    pub subsystem_marker: String,
    pub ready_markers: Vec<String>,
    pub restart_markers: Vec<String>,
    /// One occurrence per inbound message; also counts as a sign of a live connection.
    pub message_marker: String,
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            dir: "/tmp/openclaw".into(),
            prefix: "openclaw".into(),
            tail_lines: 100,
            read_timeout_ms: 5000,
            subsystem_marker: "[feishu]".into(),
            ready_markers: vec!["ws client ready".into()],
            restart_markers: vec!["auto-restart".into()],
            message_marker: "Received from".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Blocking window between the two CPU refreshes.
    pub cpu_sample_ms: u64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { cpu_sample_ms: 500 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub title: String,
    pub subtitle: String,
    /// Client-side auto-refresh interval.
    pub refresh_secs: u64,
    /// Environment variable holding the display-only model name.
    pub model_env: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "MoltBot AI".into(),
            subtitle: "Feishu assistant · status".into(),
            refresh_secs: 30,
            model_env: "MODEL_NAME".into(),
        }
    }
}

impl AppConfig {
    /// Loads `CONFIG_FILE` (or `config.toml`). Falls back to defaults only when
    /// `CONFIG_FILE` is unset and `config.toml` does not exist.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::load_from_path(&path),
            Err(_) => {
                let path = std::path::Path::new("config.toml");
                if path.exists() {
                    Self::load_from_path(path)
                } else {
                    let config = Self::default();
                    config.validate()?;
                    Ok(config)
                }
            }
        }
    }

    fn load_from_path(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading {}: {}", path.display(), e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(!self.server.host.is_empty(), "server.host must be non-empty");
        anyhow::ensure!(
            !self.gateway.process_match.is_empty(),
            "gateway.process_match must be non-empty"
        );
        anyhow::ensure!(
            !self.gateway.subcommand_match.is_empty(),
            "gateway.subcommand_match must be non-empty"
        );
        anyhow::ensure!(!self.logs.dir.is_empty(), "logs.dir must be non-empty");
        anyhow::ensure!(!self.logs.prefix.is_empty(), "logs.prefix must be non-empty");
        anyhow::ensure!(
            self.logs.tail_lines > 0 && self.logs.tail_lines <= MAX_TAIL_LINES,
            "logs.tail_lines must be between 1 and {}, got {}",
            MAX_TAIL_LINES,
            self.logs.tail_lines
        );
        anyhow::ensure!(
            self.logs.read_timeout_ms > 0,
            "logs.read_timeout_ms must be > 0, got {}",
            self.logs.read_timeout_ms
        );
        anyhow::ensure!(
            !self.logs.subsystem_marker.is_empty(),
            "logs.subsystem_marker must be non-empty"
        );
        anyhow::ensure!(
            !self.logs.message_marker.is_empty(),
            "logs.message_marker must be non-empty"
        );
        anyhow::ensure!(
            self.metrics.cpu_sample_ms > 0,
            "metrics.cpu_sample_ms must be > 0, got {}",
            self.metrics.cpu_sample_ms
        );
        anyhow::ensure!(
            !self.page.model_env.is_empty(),
            "page.model_env must be non-empty"
        );
        anyhow::ensure!(
            self.page.refresh_secs > 0,
            "page.refresh_secs must be > 0, got {}",
            self.page.refresh_secs
        );
        Ok(())
    }
}
