// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Log-shipping and monitoring SDK.
//!
//! Captures application log events, screen lifecycle transitions, panics and
//! network-call outcomes, and ships them to a remote collector over HTTP.
//! Shipping is fire-and-forget: no call ever blocks the host on network I/O,
//! and no shipping failure is ever surfaced into host code.
//!
//! # Overview
//!
//! - [`LogShip`]: the entry point; owns config, monitors and transport
//! - [`Logger`]: the emission surface, one method per severity
//! - [`TransportClient`]: the typed HTTP client for the collector
//! - [`NetworkMonitor`]: derives records from observed HTTP traffic
//! - [`CrashMonitor`]: reports panics, then chains to the previous hook
//! - [`LifecycleMonitor`]: tracks live screens and their transitions
//!
//! # Example
//!
//! ```ignore
//! use logship::{LogShip, ShipConfig};
//!
//! let sdk = LogShip::new();
//! sdk.init(ShipConfig::new("http://collector:5000", "user-42")?)?;
//!
//! let logger = sdk.logger();
//! logger.info("Login", "user tapped login");
//!
//! // Route host HTTP calls through the monitor to observe them.
//! if let Some(monitor) = sdk.network_monitor() {
//!     let response = monitor
//!         .observe("GET", url, || client.get(url).send())
//!         .await?;
//! }
//! ```

mod backtrace;
pub mod coordinator;
pub mod crash;
pub mod error;
pub mod lifecycle;
pub mod logger;
pub mod network;
pub mod sdk;
pub mod transport;

pub use coordinator::MonitorCoordinator;
pub use crash::{categorize, CrashCategory, CrashMonitor};
pub use error::{Result, SdkError};
pub use lifecycle::LifecycleMonitor;
pub use logger::Logger;
pub use network::{classify_failure, FailureKind, NetworkMonitor};
pub use sdk::LogShip;
pub use transport::TransportClient;

// Re-export the core types so hosts depend on one crate.
pub use logship_core::{
	ConfigError, LogLevel, LogQuery, LogRecord, ShipConfig, ShipConfigBuilder,
};
