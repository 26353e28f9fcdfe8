// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, error};

use crate::config::ShipperConfig;
use crate::console::ConsoleSink;
use crate::errors::ConfigError;
use crate::event::LogEvent;

/// Terminal outcome of one logical delivery. Deliberately not a `Result`:
/// the embedding application must never observe a transport failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered { attempts: u32 },
    Dropped { attempts: u32, reason: String },
}

#[derive(Debug, thiserror::Error)]
enum AttemptError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{0}: ingestion endpoint rejected event")]
    Rejected(StatusCode),
}

/// Ships single events to the ingestion endpoint as JSON POSTs, retrying
/// failed attempts with a fixed delay.
///
/// No per-attempt timeout is configured: an attempt that hangs indefinitely
/// occupies its concurrency slot until the connection dies. Known
/// limitation.
#[derive(Clone)]
pub struct Transport {
    client: Client,
    endpoint_url: String,
    max_retries: u32,
    retry_delay: Duration,
    console: Arc<dyn ConsoleSink>,
}

impl Transport {
    pub fn new(
        config: &ShipperConfig,
        console: Arc<dyn ConsoleSink>,
    ) -> Result<Self, ConfigError> {
        let client = Client::builder().build()?;
        Ok(Transport {
            client,
            endpoint_url: config.endpoint_url.clone(),
            max_retries: config.max_retries,
            retry_delay: config.retry_delay,
            console,
        })
    }

    /// Deliver one event: up to `max_retries + 1` attempts, constant delay
    /// between them. On exhaustion the event is dropped and exactly one
    /// warning is echoed locally.
    pub async fn send(&self, event: &LogEvent) -> DeliveryOutcome {
        let attempts = self.max_retries.saturating_add(1);
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            match self.post(event).await {
                Ok(()) => {
                    debug!("delivered log event on attempt {attempt}/{attempts}");
                    return DeliveryOutcome::Delivered { attempts: attempt };
                }
                Err(err) => {
                    debug!("delivery attempt {attempt}/{attempts} failed: {err}");
                    last_error = err.to_string();
                }
            }
            if attempt < attempts {
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        error!("dropping log event after {attempts} attempts: {last_error}");
        self.console
            .warn(&format!("failed to deliver log event: {last_error}"));
        DeliveryOutcome::Dropped {
            attempts,
            reason: last_error,
        }
    }

    async fn post(&self, event: &LogEvent) -> Result<(), AttemptError> {
        let response = self
            .client
            .post(&self.endpoint_url)
            .json(event)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(AttemptError::Rejected(status))
        }
    }
}
