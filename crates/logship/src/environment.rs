// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Optional runtime-environment metadata attached to outgoing events.
//!
//! Metadata collection is host-context-dependent, so it is modeled as an
//! injectable capability: a probe that may return no snapshot at all. A
//! missing probe or an empty snapshot is the normal case in non-interactive
//! contexts, never an error.

use serde::Serialize;

/// Read-only provider of caller-environment context, queried once per
/// built event.
pub trait EnvironmentProbe: Send + Sync {
    fn snapshot(&self) -> Option<EnvironmentSnapshot>;
}

/// Whatever the probe returned at build time. Contents are forwarded to the
/// ingestion endpoint unvalidated.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentSnapshot {
    pub navigator: Option<NavigatorInfo>,
    pub location: Option<LocationInfo>,
}

/// Navigator-equivalent context. Wire names follow the browser property
/// names, including the `onLine` capitalization.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigatorInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie_enabled: Option<bool>,
    /// Whether a geolocation capability is available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geolocation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    #[serde(rename = "onLine", skip_serializing_if = "Option::is_none")]
    pub online: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
}

/// Location-equivalent context.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LocationInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pathname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}
