use crate::model::chart::{ChartError, ChartOptions};
use crate::model::modal::ReopenPolicy;
use crate::model::transition::Timing;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Length of every fade/slide transition
    pub transition_ms: u64,
    /// Delay between mounting an overlay and starting its entrance
    pub reveal_delay_ms: u64,
    /// How long notifications stay up by default
    pub notification_ms: u64,
    /// Event polling interval of the terminal loop
    pub tick_rate_ms: u64,
    /// Bar color as a name or `#rrggbb`
    pub chart_color: String,
    /// What reopening a registered modal with new content does
    pub reopen_policy: ReopenPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transition_ms: 300,
            reveal_delay_ms: 10,
            notification_ms: 3000,
            tick_rate_ms: 50,
            chart_color: "#667eea".to_string(),
            reopen_policy: ReopenPolicy::RevealExisting,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".overlay-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Load the user's config, or `None` if there is none or it does not parse
    pub fn load() -> Option<Config> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                return None;
            }
        };
        match serde_json::from_str(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config");
                None
            }
        }
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        // Create config directory if it doesn't exist
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    pub fn timing(&self) -> Timing {
        Timing {
            transition: Duration::from_millis(self.transition_ms),
            reveal_delay: Duration::from_millis(self.reveal_delay_ms),
        }
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }

    pub fn chart_options(&self) -> Result<ChartOptions, ChartError> {
        ChartOptions::from_names("bar", &self.chart_color)
    }
}
