// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Bounded-concurrency, rate-limited dispatch queue.
//!
//! Split into a [`DispatchService`] owning the admission state and a
//! cloneable [`DispatchHandle`] used by callers. The service admits tasks
//! in FIFO submission order, gated first by a rolling one-second start
//! window and then by a semaphore of in-flight permits. Completion order is
//! not guaranteed, and a started task is never cancelled.
//!
//! Nothing here persists: tasks queued or in flight when the process exits
//! are lost by design.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, Semaphore};
use tokio::time::Instant;
use tracing::{debug, error};

const RATE_WINDOW: Duration = Duration::from_millis(1000);

/// A queued unit of delivery work. Failures are absorbed inside the task;
/// the queue only ever observes completion.
pub type DispatchTask = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

enum DispatchCommand {
    Run(DispatchTask),
    Shutdown(oneshot::Sender<()>),
}

#[derive(Clone)]
pub struct DispatchHandle {
    tx: mpsc::UnboundedSender<DispatchCommand>,
}

impl DispatchHandle {
    /// Queue one task and return immediately. Never blocks and never fails
    /// the caller: enqueueing after the service has stopped silently drops
    /// the task.
    pub fn enqueue<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let _ = self.tx.send(DispatchCommand::Run(Box::pin(task)));
    }

    /// Wait until every task queued before this call has finished, then
    /// stop the service loop. Started tasks always run to completion.
    pub async fn shutdown(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(DispatchCommand::Shutdown(ack_tx)).is_ok() {
            let _ = ack_rx.await;
        }
    }
}

pub struct DispatchService {
    rx: mpsc::UnboundedReceiver<DispatchCommand>,
    permits: Arc<Semaphore>,
    concurrency: usize,
    window: RollingWindow,
}

impl DispatchService {
    pub fn new(concurrency: usize, max_starts_per_second: usize) -> (Self, DispatchHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let service = DispatchService {
            rx,
            permits: Arc::new(Semaphore::new(concurrency)),
            concurrency,
            window: RollingWindow::new(max_starts_per_second, RATE_WINDOW),
        };
        (service, DispatchHandle { tx })
    }

    /// Admission loop. Only this loop mutates the window and takes permits,
    /// so callers never contend on queue state.
    pub async fn run(mut self) {
        debug!("dispatch service started");

        while let Some(command) = self.rx.recv().await {
            match command {
                DispatchCommand::Run(task) => {
                    self.window.admit().await;
                    // acquire_owned fails only on a closed semaphore, which
                    // never happens here
                    match Arc::clone(&self.permits).acquire_owned().await {
                        Ok(permit) => {
                            tokio::spawn(async move {
                                task.await;
                                drop(permit);
                            });
                        }
                        Err(_) => error!("dispatch permits closed, task dropped"),
                    }
                }
                DispatchCommand::Shutdown(ack) => {
                    self.drain().await;
                    let _ = ack.send(());
                    debug!("dispatch service shut down");
                    break;
                }
            }
        }
    }

    /// Holding every permit proves all spawned tasks have finished. Queued
    /// commands ahead of the shutdown were already admitted by the FIFO
    /// loop.
    async fn drain(&self) {
        let all = u32::try_from(self.concurrency).unwrap_or(u32::MAX);
        let _permits = self.permits.acquire_many(all).await;
    }
}

/// Rolling-window rate limit: at most `capacity` admissions within any
/// `interval`. Excess admissions are delayed, never dropped.
struct RollingWindow {
    capacity: usize,
    interval: Duration,
    starts: VecDeque<Instant>,
}

impl RollingWindow {
    fn new(capacity: usize, interval: Duration) -> Self {
        RollingWindow {
            capacity,
            interval,
            starts: VecDeque::new(),
        }
    }

    /// Wait until another start fits in the window, then record it.
    async fn admit(&mut self) {
        loop {
            let now = Instant::now();
            while let Some(&oldest) = self.starts.front() {
                if now.duration_since(oldest) >= self.interval {
                    self.starts.pop_front();
                } else {
                    break;
                }
            }

            if self.starts.len() < self.capacity {
                self.starts.push_back(now);
                return;
            }

            match self.starts.front() {
                Some(&oldest) => tokio::time::sleep_until(oldest + self.interval).await,
                // capacity of zero: admission can never succeed
                None => std::future::pending::<()>().await,
            }
        }
    }
}
