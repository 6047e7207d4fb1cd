use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use qube_result::{Error, Result};
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::client::{RetryOptions, StoreClient};

/// Builds one client connection for a storage URL.
pub type ClientFactory =
    dyn Fn(&str, &RetryOptions) -> Result<Arc<dyn StoreClient>> + Send + Sync;

/// Process-scoped connection cache keyed by storage URL.
///
/// Returned connections are shared by multiple threads and never closed by
/// callers; the pool owns their lifecycle and [`shutdown`](StorePool::shutdown)
/// tears them down when the process exits. A cached connection found closed
/// is recreated; if the replacement still comes up closed, acquisition keeps
/// retrying indefinitely with a fixed pause — callers wanting bounded retry
/// impose their own timeout.
pub struct StorePool {
    factory: Box<ClientFactory>,
    retry: RetryOptions,
    reconnect_pause: Duration,
    connections: Mutex<FxHashMap<String, Arc<dyn StoreClient>>>,
}

impl StorePool {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(&str, &RetryOptions) -> Result<Arc<dyn StoreClient>> + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
            retry: RetryOptions::default(),
            reconnect_pause: Duration::from_secs(10),
            connections: Mutex::new(FxHashMap::default()),
        }
    }

    pub fn with_retry_options(mut self, retry: RetryOptions) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_reconnect_pause(mut self, pause: Duration) -> Self {
        self.reconnect_pause = pause;
        self
    }

    /// Get the shared connection for `url`, creating or replacing it as
    /// needed.
    pub fn connection(&self, url: &str) -> Result<Arc<dyn StoreClient>> {
        loop {
            let cached = {
                let connections = self
                    .connections
                    .lock()
                    .expect("StorePool connections lock poisoned");
                connections.get(url).cloned()
            };
            if let Some(conn) = cached {
                if !conn.is_closed() {
                    return Ok(conn);
                }
                info!("connection to '{url}' is closed, creating a new one");
            }

            let fresh = (self.factory)(url, &self.retry)
                .map_err(|e| Error::Storage(format!("error when opening connection '{url}': {e}")))?;
            {
                let mut connections = self
                    .connections
                    .lock()
                    .expect("StorePool connections lock poisoned");
                connections.insert(url.to_string(), Arc::clone(&fresh));
            }
            if fresh.is_closed() {
                // wait a while and retry
                thread::sleep(self.reconnect_pause);
                continue;
            }
            return Ok(fresh);
        }
    }

    /// Drop every cached connection without closing it; the next acquisition
    /// reconnects.
    pub fn clear(&self) {
        let mut connections = self
            .connections
            .lock()
            .expect("StorePool connections lock poisoned");
        connections.clear();
    }

    /// Close and drop every cached connection. Called once at process
    /// shutdown by whoever owns the pool.
    pub fn shutdown(&self) {
        let mut connections = self
            .connections
            .lock()
            .expect("StorePool connections lock poisoned");
        for (url, conn) in connections.drain() {
            debug!("closing connection to '{url}'");
            conn.close();
        }
        info!("store pool shut down");
    }
}
