//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use async_trait::async_trait;
use carelist::api::{PageRequest, PageResult, PageSource, TransportError};
use carelist::records::Identified;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::oneshot;

/// Minimal list item: identity plus a label to tell copies apart.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: u32,
    pub label: String,
}

impl Row {
    pub fn new(id: u32, label: &str) -> Self {
        Self {
            id,
            label: label.to_string(),
        }
    }
}

impl Identified for Row {
    type Id = u32;

    fn id(&self) -> &u32 {
        &self.id
    }
}

pub fn rows(ids: std::ops::Range<u32>, label: &str) -> Vec<Row> {
    ids.map(|id| Row::new(id, label)).collect()
}

type Responder = Box<dyn Fn(&PageRequest) -> PageResult<Row> + Send + Sync>;

struct Pending {
    request: PageRequest,
    release: oneshot::Sender<()>,
}

/// In-memory [`PageSource`] with scripted failures and optional gating.
///
/// When gated, every fetch parks until the test calls [`release`]; this
/// lets a test choose the order in which responses land.
///
/// [`release`]: FakeSource::release
pub struct FakeSource {
    responder: Responder,
    calls: Mutex<Vec<PageRequest>>,
    failures: Mutex<VecDeque<TransportError>>,
    gated: AtomicBool,
    pending: Mutex<Vec<Option<Pending>>>,
}

impl FakeSource {
    /// Serve slices of `data`, reporting `data.len()` as the total.
    pub fn from_rows(data: Vec<Row>) -> Arc<Self> {
        Self::with_responder(move |req| {
            let end = (req.offset + req.limit).min(data.len());
            let start = req.offset.min(end);
            PageResult::new(data[start..end].to_vec(), data.len())
        })
    }

    pub fn with_responder(
        responder: impl Fn(&PageRequest) -> PageResult<Row> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(VecDeque::new()),
            gated: AtomicBool::new(false),
            pending: Mutex::new(Vec::new()),
        })
    }

    /// Make the next fetch fail with `err`.
    pub fn fail_next(&self, err: TransportError) {
        self.failures.lock().push_back(err);
    }

    pub fn set_gated(&self, gated: bool) {
        self.gated.store(gated, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<PageRequest> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Number of fetches parked on the gate so far (released or not).
    pub fn parked(&self) -> usize {
        self.pending.lock().len()
    }

    /// Wait until at least `n` fetches have parked.
    pub async fn wait_for_parked(&self, n: usize) {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        while self.parked() < n {
            assert!(
                tokio::time::Instant::now() < deadline,
                "timed out waiting for {} parked fetches",
                n
            );
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    }

    /// Let the `index`-th parked fetch (0-based) complete.
    pub fn release(&self, index: usize) -> PageRequest {
        let pending = self.pending.lock()[index]
            .take()
            .expect("fetch already released");
        let _ = pending.release.send(());
        pending.request
    }
}

#[async_trait]
impl PageSource for FakeSource {
    type Item = Row;

    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult<Row>, TransportError> {
        self.calls.lock().push(request.clone());

        if self.gated.load(Ordering::SeqCst) {
            let (tx, rx) = oneshot::channel();
            self.pending.lock().push(Some(Pending {
                request: request.clone(),
                release: tx,
            }));
            let _ = rx.await;
        }

        if let Some(err) = self.failures.lock().pop_front() {
            return Err(err);
        }
        Ok((self.responder)(request))
    }
}

/// Write `content` to a config file in a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
