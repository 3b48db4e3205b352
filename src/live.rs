// Copyright (c) 2026 Monedero contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Publish-subscribe machinery behind the live queries.
//!
//! Every write publishes an invalidation for the table it touched. A live
//! query is a subscription tagged with the tables it reads; on a matching
//! invalidation the bus recomputes the query and re-emits the full result
//! set to the subscriber's channel. There are no deltas and no pagination:
//! result sets are small enough to redeliver whole.

use std::sync::Mutex;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::time::Duration;

use anyhow::Result;
use thiserror::Error;

/// Tables a subscription can depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Accounts,
    Categories,
    Expenses,
    Settings,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LiveError {
    /// The publishing side (the store) was dropped.
    #[error("live query disconnected from its store")]
    Disconnected,
    #[error("timed out waiting for a live emission")]
    Timeout,
}

struct Subscription {
    tables: Vec<Table>,
    // Recomputes and sends; false once the receiver is gone.
    emit: Box<dyn FnMut() -> bool + Send>,
}

/// Invalidation fan-out shared by all live queries of one store.
pub struct LiveBus {
    subs: Mutex<Vec<Subscription>>,
}

impl LiveBus {
    pub fn new() -> Self {
        LiveBus {
            subs: Mutex::new(Vec::new()),
        }
    }

    /// Registers a live query over `tables`. The recompute closure runs once
    /// immediately to seed the returned handle with the current result set,
    /// then again on every matching invalidation.
    pub fn subscribe<T, F>(&self, tables: &[Table], recompute: F) -> Result<Live<T>>
    where
        T: Send + 'static,
        F: Fn() -> Result<T> + Send + 'static,
    {
        let initial = recompute()?;
        let (tx, rx): (Sender<T>, Receiver<T>) = channel();
        let emit = Box::new(move || match recompute() {
            Ok(v) => tx.send(v).is_ok(),
            Err(e) => {
                // A failed recompute leaves the stream stale; the
                // subscription stays registered for the next invalidation.
                tracing::warn!(error = %e, "live query recompute failed");
                true
            }
        });
        let mut subs = self
            .subs
            .lock()
            .map_err(|_| anyhow::anyhow!("live bus mutex poisoned"))?;
        subs.push(Subscription {
            tables: tables.to_vec(),
            emit,
        });
        Ok(Live {
            rx,
            current: initial,
        })
    }

    /// Re-emits every subscription that reads `table`. Subscriptions whose
    /// receiver has been dropped are pruned here.
    pub fn publish(&self, table: Table) {
        let mut subs = match self.subs.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let before = subs.len();
        subs.retain_mut(|s| !s.tables.contains(&table) || (s.emit)());
        let pruned = before - subs.len();
        tracing::debug!(?table, live = subs.len(), pruned, "published invalidation");
    }
}

impl Default for LiveBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Subscriber side of a live query: the latest full result set, plus a
/// channel of re-emissions. Dropping the handle ends the subscription.
pub struct Live<T> {
    rx: Receiver<T>,
    current: T,
}

impl<T> Live<T> {
    /// Drains any pending emissions and returns the newest result set.
    pub fn latest(&mut self) -> &T {
        while let Ok(v) = self.rx.try_recv() {
            self.current = v;
        }
        &self.current
    }

    /// Blocks until the next emission.
    pub fn recv(&mut self) -> Result<&T, LiveError> {
        let v = self.rx.recv().map_err(|_| LiveError::Disconnected)?;
        self.current = v;
        Ok(&self.current)
    }

    /// Blocks until the next emission or the timeout elapses.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Result<&T, LiveError> {
        use std::sync::mpsc::RecvTimeoutError;
        match self.rx.recv_timeout(timeout) {
            Ok(v) => {
                self.current = v;
                Ok(&self.current)
            }
            Err(RecvTimeoutError::Timeout) => Err(LiveError::Timeout),
            Err(RecvTimeoutError::Disconnected) => Err(LiveError::Disconnected),
        }
    }

    /// Keeps receiving until `pred` holds for the current result set or the
    /// deadline passes. Useful for callers of fire-and-forget writes, which
    /// see effects only through the stream.
    pub fn wait_for<F>(&mut self, timeout: Duration, mut pred: F) -> Result<&T, LiveError>
    where
        F: FnMut(&T) -> bool,
    {
        let deadline = std::time::Instant::now() + timeout;
        while !pred(&self.current) {
            let now = std::time::Instant::now();
            if now >= deadline {
                return Err(LiveError::Timeout);
            }
            match self.recv_timeout(deadline - now) {
                Ok(_) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(&self.current)
    }
}
