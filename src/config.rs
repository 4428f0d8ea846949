use crate::utils::get_config_dir;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVER_URL: &str = "http://192.168.1.1";

/// Complete application configuration including the router endpoint and UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the router admin API, without a trailing slash
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default)]
    pub theme_choice: crate::theme::ThemeChoice,
    /// Ask before deleting a rule or a zone
    #[serde(default = "default_true")]
    pub confirm_destructive: bool,
    /// Ask before committing a reordered rule list to the router
    #[serde(default = "default_true")]
    pub confirm_reorder: bool,
    /// Enable the local event journal (opt-in, disabled by default)
    #[serde(default)]
    pub enable_event_log: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            theme_choice: crate::theme::ThemeChoice::default(),
            confirm_destructive: true,
            confirm_reorder: true,
            enable_event_log: false, // Opt-in only for privacy/disk space
        }
    }
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_true() -> bool {
    true
}

/// Saves the complete app config to disk using an atomic write pattern.
/// 1. Writes to a temporary file.
/// 2. Sets restrictive permissions (0o600).
/// 3. Atomically renames to the target path.
///
/// # Security
///
/// On Unix systems, files are created with mode 0o600 (user read/write only).
/// On Windows, files inherit directory permissions. Users should ensure the
/// config directory has appropriate ACLs.
///
/// # Async
/// Uses `tokio::fs` for non-blocking I/O to avoid blocking the event loop.
pub async fn save_config(config: &AppConfig) -> std::io::Result<()> {
    if let Some(mut path) = get_config_dir() {
        let json = serde_json::to_string_pretty(config)?;

        let mut temp_path = path.clone();
        temp_path.push("config.json.tmp");

        path.push("config.json");

        // Create file with restrictive permissions from the start to prevent
        // race condition where file is briefly world-readable
        #[cfg(unix)]
        {
            use tokio::fs::OpenOptions;
            use tokio::io::AsyncWriteExt;

            let mut file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .mode(0o600) // Set permissions BEFORE any data is written
                .open(&temp_path)
                .await?;

            file.write_all(json.as_bytes()).await?;
            file.sync_all().await?; // Ensure data is flushed to physical media
        }

        #[cfg(not(unix))]
        {
            use tokio::io::AsyncWriteExt;

            let mut file = tokio::fs::File::create(&temp_path).await?;
            file.write_all(json.as_bytes()).await?;
            file.sync_all().await?;
        }

        // Atomic rename
        tokio::fs::rename(temp_path, path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::StorageFull {
                std::io::Error::new(
                    std::io::ErrorKind::StorageFull,
                    "Disk full: cannot save configuration. Free up space and try again.",
                )
            } else {
                e
            }
        })?;
    }
    Ok(())
}

/// Loads the app config from disk, or returns default if not found.
///
/// # Async
/// Uses `tokio::fs` for non-blocking I/O to avoid blocking the event loop.
pub async fn load_config() -> AppConfig {
    if let Some(mut path) = get_config_dir() {
        path.push("config.json");
        if let Ok(json) = tokio::fs::read_to_string(&path).await
            && let Ok(config) = serde_json::from_str::<AppConfig>(&json)
        {
            return config;
        }
    }
    AppConfig::default()
}

/// Synchronous wrapper for `load_config()` for use during startup initialization.
///
/// This blocks the current thread and should only be used in `State::new()` where
/// async initialization isn't possible. Everywhere else should use async `load_config()`.
pub fn load_config_blocking() -> AppConfig {
    // Use Handle::current() if available (we're in a Tokio context),
    // otherwise create a temporary runtime
    if let Ok(handle) = tokio::runtime::Handle::try_current() {
        handle.block_on(load_config())
    } else {
        // Fallback: create temporary runtime (shouldn't happen in practice)
        tokio::runtime::Runtime::new()
            .expect("Failed to create runtime")
            .block_on(load_config())
    }
}
