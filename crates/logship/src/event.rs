// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::config::ShipperConfig;
use crate::environment::{EnvironmentProbe, LocationInfo, NavigatorInfo};

/// Structured data attached to a log call.
pub type Fields = serde_json::Map<String, Value>;

/// One enriched log record bound for the remote ingestion endpoint.
/// Immutable once built; owned solely by the delivery task that carries it
/// through the queue to the transport.
#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    /// Conventionally one of debug/info/warn/error, but any string is
    /// accepted and forwarded as-is
    pub level: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Fields>,
    #[serde(rename = "@timestamp")]
    pub timestamp: String,
    #[serde(rename = "@tags")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigator: Option<NavigatorInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationInfo>,
}

/// Build one event from a raw log call. Deterministic except for the
/// wall-clock timestamp and whatever the probe returns at call time.
pub fn build_event(
    level: &str,
    message: &str,
    fields: Option<Fields>,
    config: &ShipperConfig,
    probe: Option<&dyn EnvironmentProbe>,
) -> LogEvent {
    let (navigator, location) = match probe.and_then(EnvironmentProbe::snapshot) {
        Some(snapshot) => (snapshot.navigator, snapshot.location),
        None => (None, None),
    };

    LogEvent {
        level: level.to_string(),
        message: message.to_string(),
        fields,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        tags: config.tags.clone(),
        navigator,
        location,
    }
}
