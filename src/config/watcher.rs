//! Stanza file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::catalog::{CatalogError, ProxyCatalog};
use crate::stanza::model::Stanza;
use crate::stanza::parser::StanzaParser;

/// Re-read and parse the stanza file.
pub fn reload_stanzas(path: &Path, parser: StanzaParser) -> Result<Vec<Stanza>, CatalogError> {
    let catalog = ProxyCatalog::load_file(path, parser)?;
    Ok(catalog.stanzas().to_vec())
}

/// A watcher that monitors the stanza file for changes.
pub struct StanzaWatcher {
    path: PathBuf,
    parser: StanzaParser,
    update_tx: mpsc::UnboundedSender<Vec<Stanza>>,
}

impl StanzaWatcher {
    /// Create a new StanzaWatcher.
    ///
    /// Returns the watcher and a receiver for freshly parsed stanza lists.
    pub fn new(path: &Path, parser: StanzaParser) -> (Self, mpsc::UnboundedReceiver<Vec<Stanza>>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                parser,
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned handle must be kept alive for events to keep flowing.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();
        let parser = self.parser;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Stanza file change detected, reloading...");
                        match reload_stanzas(&path, parser) {
                            Ok(stanzas) => {
                                let _ = tx.send(stanzas);
                            }
                            Err(e) => {
                                tracing::error!(
                                    "Failed to reload stanzas: {}. Keeping current stanzas.",
                                    e
                                );
                            }
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Stanza watcher started");
        Ok(watcher)
    }
}
