use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub fixtures: FixturesConfig,
    pub replay: ReplayConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixturesConfig {
    /// Directory with a fixtures.toml manifest; its fixtures are merged over the built-in ones.
    #[serde(default)]
    pub dir: Option<String>,
    #[serde(default = "default_true")]
    pub validate_on_startup: bool,
    /// Abort startup when any fixture has violations (otherwise they are only logged).
    #[serde(default)]
    pub fail_on_invalid: bool,
}

impl Default for FixturesConfig {
    fn default() -> Self {
        Self {
            dir: None,
            validate_on_startup: true,
            fail_on_invalid: false,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplayConfig {
    /// Fixture id cycled by the replay worker for /ws/live (also the pace of /ws/replay/{id}).
    pub fixture: String,
    pub interval_ms: u64,
    /// Max number of snapshots kept in the broadcast channel for /ws/live (slow clients may lag).
    pub broadcast_capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    /// How often to log app stats (ws_live clients, snapshots broadcast) at INFO level.
    pub stats_log_interval_secs: u64,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
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
        if let Some(dir) = &self.fixtures.dir {
            anyhow::ensure!(
                !dir.is_empty(),
                "fixtures.dir must be non-empty when set"
            );
        }
        anyhow::ensure!(
            !self.replay.fixture.is_empty(),
            "replay.fixture must be non-empty"
        );
        anyhow::ensure!(
            self.replay.interval_ms > 0,
            "replay.interval_ms must be > 0, got {}",
            self.replay.interval_ms
        );
        anyhow::ensure!(
            self.replay.broadcast_capacity > 0,
            "replay.broadcast_capacity must be > 0, got {}",
            self.replay.broadcast_capacity
        );
        anyhow::ensure!(
            self.monitoring.stats_log_interval_secs > 0,
            "monitoring.stats_log_interval_secs must be > 0, got {}",
            self.monitoring.stats_log_interval_secs
        );
        Ok(())
    }
}
