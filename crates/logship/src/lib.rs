// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Client-side log shipping.
//!
//! Structured log calls at several severity levels are enriched with a
//! timestamp, configured tags, and optional runtime-environment metadata,
//! then delivered asynchronously as JSON documents to a remote ingestion
//! endpoint. Delivery runs on a bounded-concurrency, rate-limited,
//! retrying dispatch queue, so a logging call never blocks the caller and
//! never fails because of network conditions. Alongside delivery, each
//! call is mirrored to the local console unless muted.
//!
//! There is no persistence: events queued or in flight when the process
//! exits are lost.

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod config;
pub mod console;
pub mod dispatcher;
pub mod environment;
pub mod errors;
pub mod event;
pub mod logger;
pub mod transport;

pub use config::ShipperConfig;
pub use console::{ConsoleSink, StandardStreams};
pub use dispatcher::{DispatchHandle, DispatchService, DispatchTask};
pub use environment::{EnvironmentProbe, EnvironmentSnapshot, LocationInfo, NavigatorInfo};
pub use errors::ConfigError;
pub use event::{build_event, Fields, LogEvent};
pub use logger::{ErrorReport, Logger};
pub use transport::{DeliveryOutcome, Transport};
