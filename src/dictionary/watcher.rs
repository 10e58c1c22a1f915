//! Dictionary Hot Reload
//!
//! Watches dictionary directories and merges created or modified `*.json`
//! files into the store.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::{mpsc, watch};
use tower_lsp::Client;
use tower_lsp::lsp_types::MessageType;

use super::store::DictionaryStore;

/// Events from the file watcher
#[derive(Debug)]
enum WatcherEvent {
    DictionaryFileChanged(PathBuf),
    WatcherError(notify::Error),
}

/// Running directory watcher; dropping it stops the watch
pub struct DictionaryWatcher {
    _watcher: RecommendedWatcher,
    watched: Vec<PathBuf>,
    reloads: watch::Receiver<u64>,
}

impl DictionaryWatcher {
    /// Start watching the existing directories among `dirs`
    ///
    /// Must be called inside a tokio runtime; reloads run on a spawned task.
    pub fn spawn(store: DictionaryStore, dirs: &[PathBuf], client: Option<Client>) -> Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        let (reload_tx, reload_rx) = watch::channel(0);

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) => {
                    if let EventKind::Create(_) | EventKind::Modify(_) = event.kind {
                        for path in event.paths {
                            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                                let _ = tx.send(WatcherEvent::DictionaryFileChanged(path));
                            }
                        }
                    }
                }
                Err(e) => {
                    let _ = tx.send(WatcherEvent::WatcherError(e));
                }
            },
            Config::default().with_poll_interval(Duration::from_secs(1)),
        )?;

        let mut watched = Vec::new();
        for dir in dirs {
            if dir.is_dir() {
                watcher.watch(dir, RecursiveMode::NonRecursive)?;
                log::debug!("Watching dictionary directory {}", dir.display());
                watched.push(dir.clone());
            }
        }

        tokio::spawn(process_events(rx, store, client, reload_tx));

        Ok(Self {
            _watcher: watcher,
            watched,
            reloads: reload_rx,
        })
    }

    /// Count of successful reloads, changed after each one
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.reloads.clone()
    }

    /// Directories actually being watched
    pub fn watched_dirs(&self) -> &[PathBuf] {
        &self.watched
    }
}

async fn process_events(
    mut rx: mpsc::UnboundedReceiver<WatcherEvent>,
    store: DictionaryStore,
    client: Option<Client>,
    reloads: watch::Sender<u64>,
) {
    while let Some(event) = rx.recv().await {
        match event {
            WatcherEvent::DictionaryFileChanged(path) => {
                if reload_file(&store, &path, client.as_ref()).await {
                    reloads.send_modify(|count| *count += 1);
                }
            }
            WatcherEvent::WatcherError(e) => {
                log::error!("Dictionary watcher error: {}", e);
                if let Some(client) = &client {
                    client
                        .log_message(
                            MessageType::ERROR,
                            format!("Dictionary watcher error: {}", e),
                        )
                        .await;
                }
            }
        }
    }
}

/// Merge one file into the store, returns whether it was merged
async fn reload_file(store: &DictionaryStore, path: &Path, client: Option<&Client>) -> bool {
    let result = store.import_file(path);
    let (level, message) = match &result {
        Ok(count) => (
            MessageType::INFO,
            format!("Dictionary reloaded: {} ({} entries)", path.display(), count),
        ),
        Err(e) => {
            log::warn!("{:#}", e);
            (MessageType::ERROR, format!("{:#}", e))
        }
    };

    if let Some(client) = client {
        client.log_message(level, message).await;
    }

    result.is_ok()
}
