//! Process startup and shutdown helpers for the gateway binary.

use shift_roster_store::{RocksStore, StoreError};

use crate::config::GatewayConfig;

/// Open the store, retrying a bounded number of times.
///
/// Another process may still hold the database lock while it shuts down, so
/// a failed open is retried after `store_connect_backoff_ms`.
///
/// # Errors
///
/// Returns the last open error once `store_connect_attempts` are used up.
pub async fn open_store(config: &GatewayConfig) -> Result<RocksStore, StoreError> {
    let attempts = config.store_connect_attempts.max(1);
    let mut last_error = None;

    for attempt in 1..=attempts {
        if attempt > 1 {
            tracing::debug!(attempt, "Retrying store open");
            tokio::time::sleep(config.store_connect_backoff()).await;
        }

        match RocksStore::open(&config.data_dir) {
            Ok(store) => {
                tracing::info!(path = %config.data_dir.display(), attempt, "Store opened");
                return Ok(store);
            }
            Err(e) => {
                tracing::warn!(attempt, attempts, error = %e, "Failed to open store");
                last_error = Some(e);
            }
        }
    }

    Err(last_error
        .unwrap_or_else(|| StoreError::Database("store was never opened".to_string())))
}

/// Resolve when the process receives Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_for(data_dir: std::path::PathBuf, attempts: u32) -> GatewayConfig {
        GatewayConfig {
            data_dir,
            store_connect_attempts: attempts,
            store_connect_backoff_ms: 1,
            ..GatewayConfig::default()
        }
    }

    #[tokio::test]
    async fn opens_fresh_directory() {
        let dir = TempDir::new().unwrap();
        let config = config_for(dir.path().join("db"), 3);
        assert!(open_store(&config).await.is_ok());
    }

    #[tokio::test]
    async fn gives_up_after_attempts() {
        let dir = TempDir::new().unwrap();
        // A regular file where the database directory should be.
        let path = dir.path().join("not-a-dir");
        std::fs::write(&path, b"x").unwrap();

        let config = config_for(path, 2);
        assert!(matches!(
            open_store(&config).await,
            Err(StoreError::Database(_))
        ));
    }

    #[tokio::test]
    async fn locked_database_is_retried_then_reported() {
        let dir = TempDir::new().unwrap();
        let _held = RocksStore::open(dir.path()).unwrap();

        let config = config_for(dir.path().to_path_buf(), 2);
        assert!(open_store(&config).await.is_err());
    }
}
