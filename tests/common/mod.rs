//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_api;

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use pokeinfo::config::Config;
use pokeinfo::fetch::{EntityFetcher, FetchError};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;
use tokio::sync::oneshot;

/// Minimal entity used by lifecycle tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mon {
    pub name: String,
    pub hp: u32,
}

impl std::fmt::Display for Mon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (hp {})", self.name, self.hp)
    }
}

pub fn mon(name: &str, hp: u32) -> Mon {
    Mon {
        name: name.to_string(),
        hp,
    }
}

/// Config whose store lives in a fresh temp dir.
pub fn temp_config() -> (TempDir, Config) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = Config::default();
    config.storage.path = temp_dir.path().join("store.json");
    (temp_dir, config)
}

pub fn store_path(dir: &TempDir) -> PathBuf {
    dir.path().join("store.json")
}

// -- Fetchers -----------------------------------------------------------------

/// Fetcher answering from a fixed table; unknown names fail with "not found".
pub struct TableFetcher {
    entries: Vec<Mon>,
    calls: AtomicUsize,
}

impl TableFetcher {
    pub fn new(entries: Vec<Mon>) -> Self {
        Self {
            entries,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EntityFetcher for TableFetcher {
    type Entity = Mon;

    async fn fetch(&self, name: &str) -> Result<Mon, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entries
            .iter()
            .find(|m| m.name == name)
            .cloned()
            .ok_or_else(|| FetchError::msg("not found"))
    }
}

/// Fetcher whose calls complete only when the test releases them, so
/// overlapping requests can settle in a chosen order.
#[derive(Default)]
pub struct GatedFetcher {
    gates: Mutex<Vec<(String, oneshot::Sender<Result<Mon, FetchError>>)>>,
}

impl GatedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settle the pending call for `name`.
    pub fn release(&self, name: &str, result: Result<Mon, FetchError>) {
        let mut gates = self.gates.lock();
        let index = gates
            .iter()
            .position(|(n, _)| n == name)
            .unwrap_or_else(|| panic!("no pending fetch for {}", name));
        let (_, tx) = gates.remove(index);
        let _ = tx.send(result);
    }

    pub fn pending(&self) -> usize {
        self.gates.lock().len()
    }
}

#[async_trait]
impl EntityFetcher for GatedFetcher {
    type Entity = Mon;

    async fn fetch(&self, name: &str) -> Result<Mon, FetchError> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().push((name.to_string(), tx));
        rx.await
            .unwrap_or_else(|_| Err(FetchError::msg("gate dropped")))
    }
}

/// Poll `cond` until it holds or `timeout` passes.
pub async fn wait_until(timeout: Duration, cond: impl Fn() -> bool) -> bool {
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if cond() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    cond()
}
