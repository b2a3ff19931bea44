//! Route file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::event::{ModifyKind, RenameMode};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::{load_routes, ConfigError};
use crate::config::schema::AppConfig;
use crate::routing::router::RouteTable;

/// Outcome of reloading the route file after a change.
#[derive(Debug)]
pub enum RouteUpdate {
    /// The file compiled into a new table.
    Loaded(RouteTable),
    /// The file was rejected; the current table stays in effect.
    Rejected(ConfigError),
}

/// A watcher that monitors the route file for changes.
pub struct RouteWatcher {
    path: PathBuf,
    config: AppConfig,
    update_tx: mpsc::UnboundedSender<RouteUpdate>,
}

impl RouteWatcher {
    /// Create a new RouteWatcher.
    ///
    /// Returns the watcher and a receiver for route table updates.
    pub fn new(path: &Path, config: AppConfig) -> (Self, mpsc::UnboundedReceiver<RouteUpdate>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                config,
                update_tx,
            },
            update_rx,
        )
    }

    /// Reload the route file once and publish the outcome.
    pub fn reload(&self) {
        let update = reload(&self.path, &self.config);
        let _ = self.update_tx.send(update);
    }

    /// Start watching the file in a background thread.
    ///
    /// The parent directory is watched rather than the file, so saves that
    /// write a temporary file and rename it over the route file keep being
    /// seen. Dropping the returned watcher stops the notifications.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();
        let config = self.config.clone();
        let poll_interval = Duration::from_secs(self.config.watch.poll_interval_secs);

        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .ok_or_else(|| notify::Error::path_not_found().add_path(self.path.clone()))?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    let touches_file = event
                        .paths
                        .iter()
                        .any(|p| p.file_name() == Some(file_name.as_os_str()));
                    if touches_file && is_reload_trigger(&event.kind) {
                        tracing::info!(path = %path.display(), "Route file change detected, reloading...");
                        let _ = tx.send(reload(&path, &config));
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(poll_interval),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, dir = ?dir, "Route watcher started");
        Ok(watcher)
    }
}

/// Creation, content changes and renames onto the file reload it; a rename
/// away from it leaves nothing to read.
fn is_reload_trigger(kind: &EventKind) -> bool {
    match kind {
        EventKind::Create(_) => true,
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => false,
        EventKind::Modify(_) => true,
        _ => false,
    }
}

fn reload(path: &Path, config: &AppConfig) -> RouteUpdate {
    match load_routes(path, config) {
        Ok(table) => RouteUpdate::Loaded(table),
        Err(e) => {
            tracing::error!(
                "Failed to reload routes: {}. Keeping current route table.",
                e
            );
            RouteUpdate::Rejected(e)
        }
    }
}
