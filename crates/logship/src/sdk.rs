// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SDK entry point.
//!
//! [`LogShip`] is an explicit long-lived instance owned by the host's
//! startup path and passed by handle to whoever needs it, rather than a
//! hidden global. Cloning is cheap; all clones share the same state.

use std::sync::{Arc, RwLock};

use logship_core::ShipConfig;
use tokio::runtime::Handle;
use tracing::{debug, info};

use crate::coordinator::MonitorCoordinator;
use crate::error::{Result, SdkError};
use crate::lifecycle::LifecycleMonitor;
use crate::logger::{Emitter, Logger, LoggerCore};
use crate::network::NetworkMonitor;
use crate::transport::TransportClient;

/// The SDK entry point: holds the configuration, the monitors and the
/// transport, and arms the logger facade.
///
/// # Example
///
/// ```ignore
/// let sdk = LogShip::new();
/// sdk.init(ShipConfig::new("http://collector:5000", "user-42")?)?;
///
/// let logger = sdk.logger();
/// logger.info("Startup", "application ready");
///
/// sdk.cleanup();
/// ```
#[derive(Clone)]
pub struct LogShip {
	inner: Arc<SdkInner>,
}

struct SdkInner {
	core: Arc<LoggerCore>,
	coordinator: MonitorCoordinator,
	state: RwLock<Option<SdkState>>,
}

struct SdkState {
	config: ShipConfig,
	transport: TransportClient,
}

impl LogShip {
	/// Creates an uninitialized SDK. The logger is already usable and
	/// degrades to console-only logging until [`init`](Self::init).
	pub fn new() -> Self {
		Self {
			inner: Arc::new(SdkInner {
				core: Arc::new(LoggerCore::new()),
				coordinator: MonitorCoordinator::new(),
				state: RwLock::new(None),
			}),
		}
	}

	/// Initializes the SDK: starts the monitors (when enabled), builds the
	/// transport with the network monitor attached, and arms the logger.
	///
	/// A no-op when already initialized. Must run inside a tokio runtime;
	/// the captured handle carries every detached send.
	pub fn init(&self, config: ShipConfig) -> Result<()> {
		if self.is_initialized() {
			debug!("SDK already initialized");
			return Ok(());
		}

		let handle = Handle::try_current().map_err(|_| SdkError::NoRuntime)?;
		let logger = self.logger();

		if config.monitoring_enabled() {
			self.inner.coordinator.initialize(&logger);
		}

		let transport = TransportClient::new(&config, self.inner.coordinator.network_monitor())?;

		let package_name = config
			.package_name()
			.map(str::to_string)
			.or_else(default_package_name);

		self.inner.core.install(Emitter {
			user_id: config.user_id().to_string(),
			package_name,
			transport: transport.clone(),
			handle,
			debug_logs: config.debug_logs_enabled(),
		});

		if config.debug_logs_enabled() {
			debug!(base_url = %config.base_url(), user_id = %config.user_id(), monitoring = config.monitoring_enabled(), "SDK initialized");
		} else {
			info!(user_id = %config.user_id(), "SDK initialized");
		}

		if let Ok(mut state) = self.inner.state.write() {
			*state = Some(SdkState { config, transport });
		}
		Ok(())
	}

	/// Tears the SDK back down: restores the panic hook, disarms the logger
	/// and drops the transport. `cleanup` followed by `init` is equivalent
	/// to a fresh `init`.
	pub fn cleanup(&self) {
		self.inner.coordinator.cleanup();
		self.inner.core.clear();
		if let Ok(mut state) = self.inner.state.write() {
			*state = None;
		}
		debug!("SDK cleaned up");
	}

	pub fn is_initialized(&self) -> bool {
		self.inner
			.state
			.read()
			.map(|state| state.is_some())
			.unwrap_or(false)
	}

	/// The logger facade. Usable at any time; ships remotely only while
	/// initialized.
	pub fn logger(&self) -> Logger {
		Logger::from_core(Arc::clone(&self.inner.core))
	}

	/// The configured transport.
	///
	/// Errors with [`SdkError::NotInitialized`] before `init`: a setup bug,
	/// deliberately distinct from any network error.
	pub fn transport(&self) -> Result<TransportClient> {
		self.inner
			.state
			.read()
			.ok()
			.and_then(|state| {
				state
					.as_ref()
					.map(|state| state.transport.clone())
			})
			.ok_or(SdkError::NotInitialized)
	}

	/// The active configuration, when initialized.
	pub fn config(&self) -> Option<ShipConfig> {
		self.inner
			.state
			.read()
			.ok()
			.and_then(|state| state.as_ref().map(|state| state.config.clone()))
	}

	/// The lifecycle monitor the host feeds screen transitions into.
	/// Absent before `init` or with monitoring disabled.
	pub fn lifecycle_monitor(&self) -> Option<Arc<LifecycleMonitor>> {
		self.inner.coordinator.lifecycle_monitor()
	}

	/// The network monitor for wrapping the host's own HTTP calls.
	/// Absent before `init` or with monitoring disabled.
	pub fn network_monitor(&self) -> Option<Arc<NetworkMonitor>> {
		self.inner.coordinator.network_monitor()
	}
}

impl Default for LogShip {
	fn default() -> Self {
		Self::new()
	}
}

/// Falls back to the current executable's file stem as the application
/// identifier.
fn default_package_name() -> Option<String> {
	std::env::current_exe()
		.ok()?
		.file_stem()?
		.to_str()
		.map(str::to_string)
}
