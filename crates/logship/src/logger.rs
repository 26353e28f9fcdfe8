// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::config::ShipperConfig;
use crate::console::{ConsoleSink, StandardStreams};
use crate::dispatcher::{DispatchHandle, DispatchService};
use crate::environment::EnvironmentProbe;
use crate::errors::ConfigError;
use crate::event::{build_event, Fields, LogEvent};
use crate::transport::Transport;

/// How a caller hands an error to [`Logger::error`]: a structured report
/// carrying a stack, or a plain message.
#[derive(Debug, Clone)]
pub enum ErrorReport {
    Structured { message: String, stack: String },
    Plain(String),
}

impl ErrorReport {
    /// Resolve the report into the (message, fields) pair passed to `log`.
    /// A structured report's own stack always wins over a caller-supplied
    /// `fields["stack"]`.
    fn into_parts(self, fields: Option<Fields>) -> (String, Option<Fields>) {
        match self {
            ErrorReport::Structured { message, stack } => {
                let mut fields = fields.unwrap_or_default();
                fields.insert("stack".to_string(), Value::String(stack));
                (message, Some(fields))
            }
            ErrorReport::Plain(message) => (message, fields),
        }
    }
}

impl From<&str> for ErrorReport {
    fn from(message: &str) -> Self {
        ErrorReport::Plain(message.to_string())
    }
}

impl From<String> for ErrorReport {
    fn from(message: String) -> Self {
        ErrorReport::Plain(message)
    }
}

impl From<&anyhow::Error> for ErrorReport {
    fn from(err: &anyhow::Error) -> Self {
        ErrorReport::Structured {
            message: err.to_string(),
            stack: err.backtrace().to_string(),
        }
    }
}

impl From<anyhow::Error> for ErrorReport {
    fn from(err: anyhow::Error) -> Self {
        ErrorReport::from(&err)
    }
}

/// Public logging facade. Every call returns before any network I/O
/// begins; delivery happens on the dispatch queue, and delivery failures
/// never reach the caller.
pub struct Logger {
    config: Arc<ShipperConfig>,
    transport: Arc<Transport>,
    dispatcher: DispatchHandle,
    console: Arc<dyn ConsoleSink>,
    environment: Option<Arc<dyn EnvironmentProbe>>,
}

impl Logger {
    /// Build a logger with the default stdout/stderr echo and no
    /// environment probe, and start its dispatch service on the current
    /// tokio runtime. Fails only on an empty endpoint URL or an HTTP
    /// client that cannot be built.
    pub fn new(config: ShipperConfig) -> Result<Self, ConfigError> {
        Self::with_collaborators(config, Arc::new(StandardStreams), None)
    }

    /// Same as [`Logger::new`] with an injected console sink and optional
    /// environment probe.
    pub fn with_collaborators(
        config: ShipperConfig,
        console: Arc<dyn ConsoleSink>,
        environment: Option<Arc<dyn EnvironmentProbe>>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let transport = Arc::new(Transport::new(&config, Arc::clone(&console))?);
        let (service, dispatcher) =
            DispatchService::new(config.concurrency, config.max_messages_per_second);
        tokio::spawn(service.run());
        debug!("logger created for {}", config.endpoint_url);

        Ok(Logger {
            config: Arc::new(config),
            transport,
            dispatcher,
            console,
            environment,
        })
    }

    /// Build one event, queue its delivery, and echo it locally. Any level
    /// string is accepted and forwarded as-is.
    pub fn log(&self, level: &str, message: &str, fields: Option<Fields>) {
        let event = build_event(
            level,
            message,
            fields,
            &self.config,
            self.environment.as_deref(),
        );
        self.echo(&event);

        let transport = Arc::clone(&self.transport);
        self.dispatcher.enqueue(async move {
            transport.send(&event).await;
        });
    }

    pub fn debug(&self, message: &str, fields: Option<Fields>) {
        self.log("debug", message, fields);
    }

    pub fn info(&self, message: &str, fields: Option<Fields>) {
        self.log("info", message, fields);
    }

    pub fn warn(&self, message: &str, fields: Option<Fields>) {
        self.log("warn", message, fields);
    }

    /// Log at error level. Structured reports contribute their stack as a
    /// `stack` field, overwriting any caller-supplied one.
    pub fn error(&self, report: impl Into<ErrorReport>, fields: Option<Fields>) {
        let (message, fields) = report.into().into_parts(fields);
        self.log("error", &message, fields);
    }

    /// Wait for every already-queued delivery to finish, then stop the
    /// dispatch service. In-flight sends are never cancelled.
    pub async fn shutdown(&self) {
        self.dispatcher.shutdown().await;
    }

    fn echo(&self, event: &LogEvent) {
        if self.config.mute_console {
            return;
        }

        let line = match &event.fields {
            Some(fields) => format!(
                "{} - {}",
                event.message,
                serde_json::to_string(fields).unwrap_or_default()
            ),
            None => event.message.clone(),
        };

        match event.level.as_str() {
            "error" => self.console.error(&line),
            "warn" => self.console.warn(&line),
            _ => self.console.info(&line),
        }
    }
}
