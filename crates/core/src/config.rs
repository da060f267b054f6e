use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_u64(key: &str, default: u64) -> u64 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_bool(key: &str, default: bool) -> bool {
    env_opt(key)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub scheduler: SchedulerApiConfig,
    pub editor: EditorConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            scheduler: SchedulerApiConfig::from_env(),
            editor: EditorConfig::from_env(),
        }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!(
            "  scheduler: endpoint={}, timeout={}s",
            self.scheduler.endpoint,
            self.scheduler.timeout_secs
        );
        tracing::info!(
            "  editor:    timezone={}, strict_actions={}, registry={}",
            self.editor.fallback_timezone,
            self.editor.strict_actions,
            self.editor
                .registry_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(none)".to_string())
        );
    }
}

// ── Scheduler endpoint ────────────────────────────────────────

/// Where schedule definitions are persisted. The endpoint belongs to the
/// server-side scheduler; this process only submits to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerApiConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl SchedulerApiConfig {
    fn from_env() -> Self {
        Self {
            endpoint: env_or("FREIGHT_SCHEDULER_ENDPOINT", "http://localhost:3001/api/export-tasks"),
            timeout_secs: env_u64("FREIGHT_HTTP_TIMEOUT_SECS", 30),
        }
    }
}

// ── Editor defaults ───────────────────────────────────────────

/// Host-injected editing defaults. The engine never queries the host
/// timezone itself; whoever constructs the config decides the fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Timezone applied when a definition has none.
    pub fallback_timezone: String,
    /// Reject actions whose kind is absent from the registry instead of
    /// passing them through.
    pub strict_actions: bool,
    /// Path to the action-type registry YAML, when file-based.
    pub registry_path: Option<PathBuf>,
}

impl EditorConfig {
    fn from_env() -> Self {
        Self {
            fallback_timezone: env_or("FREIGHT_TIMEZONE", "UTC"),
            strict_actions: env_bool("FREIGHT_STRICT_ACTIONS", false),
            registry_path: env_opt("FREIGHT_REGISTRY").map(PathBuf::from),
        }
    }
}
