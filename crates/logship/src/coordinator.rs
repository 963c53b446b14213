// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Lifecycle owner for the three cross-cutting monitors.

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::crash::CrashMonitor;
use crate::lifecycle::LifecycleMonitor;
use crate::logger::Logger;
use crate::network::NetworkMonitor;

/// Owns creation and teardown of the crash, lifecycle and network monitors.
///
/// State machine: uninitialized -> ready -> uninitialized. `initialize` is a
/// no-op when already ready; `cleanup` restores the panic hook and drops the
/// monitor references.
pub struct MonitorCoordinator {
	state: Mutex<MonitorState>,
}

#[derive(Default)]
struct MonitorState {
	initialized: bool,
	crash: Option<CrashMonitor>,
	lifecycle: Option<Arc<LifecycleMonitor>>,
	network: Option<Arc<NetworkMonitor>>,
}

impl MonitorCoordinator {
	pub(crate) fn new() -> Self {
		Self {
			state: Mutex::new(MonitorState::default()),
		}
	}

	/// Constructs the monitors and installs the panic hook.
	///
	/// Each monitor is brought up in its own scope so one failing could
	/// never block the others.
	pub(crate) fn initialize(&self, logger: &Logger) {
		let Ok(mut state) = self.state.lock() else {
			warn!("monitor state poisoned, skipping initialization");
			return;
		};
		if state.initialized {
			debug!("monitors already initialized");
			return;
		}

		state.crash = Some(CrashMonitor::install(logger.clone()));
		debug!("crash monitoring enabled");

		state.lifecycle = Some(Arc::new(LifecycleMonitor::new(logger.clone())));
		debug!("lifecycle monitoring enabled");

		state.network = Some(Arc::new(NetworkMonitor::new(logger.clone())));
		debug!("network monitoring enabled");

		state.initialized = true;
	}

	/// Restores the panic hook and drops the monitor references.
	pub(crate) fn cleanup(&self) {
		let Ok(mut state) = self.state.lock() else {
			warn!("monitor state poisoned, skipping cleanup");
			return;
		};

		if let Some(crash) = state.crash.take() {
			crash.cleanup();
		}
		state.lifecycle = None;
		state.network = None;
		state.initialized = false;
		debug!("monitors cleaned up");
	}

	pub fn is_initialized(&self) -> bool {
		self.state
			.lock()
			.map(|state| state.initialized)
			.unwrap_or(false)
	}

	/// The network monitor, for attaching to the transport or wrapping host
	/// calls. Absent until initialized.
	pub fn network_monitor(&self) -> Option<Arc<NetworkMonitor>> {
		self.state.lock().ok().and_then(|state| state.network.clone())
	}

	/// The lifecycle monitor the host feeds screen transitions into.
	/// Absent until initialized.
	pub fn lifecycle_monitor(&self) -> Option<Arc<LifecycleMonitor>> {
		self.state
			.lock()
			.ok()
			.and_then(|state| state.lifecycle.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::crash::HOOK_LOCK;
	use crate::logger::LoggerCore;

	fn unarmed_logger() -> Logger {
		Logger::from_core(Arc::new(LoggerCore::new()))
	}

	#[test]
	fn starts_uninitialized() {
		let coordinator = MonitorCoordinator::new();
		assert!(!coordinator.is_initialized());
		assert!(coordinator.network_monitor().is_none());
		assert!(coordinator.lifecycle_monitor().is_none());
	}

	#[test]
	fn initialize_exposes_the_monitors() {
		let _guard = HOOK_LOCK.lock().unwrap();
		let coordinator = MonitorCoordinator::new();
		coordinator.initialize(&unarmed_logger());

		assert!(coordinator.is_initialized());
		assert!(coordinator.network_monitor().is_some());
		assert!(coordinator.lifecycle_monitor().is_some());

		coordinator.cleanup();
	}

	#[test]
	fn initialize_is_idempotent() {
		let _guard = HOOK_LOCK.lock().unwrap();
		let coordinator = MonitorCoordinator::new();
		let logger = unarmed_logger();
		coordinator.initialize(&logger);
		let first = coordinator.network_monitor().unwrap();

		coordinator.initialize(&logger);
		let second = coordinator.network_monitor().unwrap();

		// The no-op re-init keeps the same instances.
		assert!(Arc::ptr_eq(&first, &second));

		coordinator.cleanup();
	}

	#[test]
	fn cleanup_returns_to_uninitialized() {
		let _guard = HOOK_LOCK.lock().unwrap();
		let coordinator = MonitorCoordinator::new();
		coordinator.initialize(&unarmed_logger());
		coordinator.cleanup();

		assert!(!coordinator.is_initialized());
		assert!(coordinator.network_monitor().is_none());
		assert!(coordinator.lifecycle_monitor().is_none());
	}

	#[test]
	fn cleanup_then_initialize_restarts_fresh() {
		let _guard = HOOK_LOCK.lock().unwrap();
		let coordinator = MonitorCoordinator::new();
		let logger = unarmed_logger();

		coordinator.initialize(&logger);
		coordinator.cleanup();
		coordinator.initialize(&logger);

		assert!(coordinator.is_initialized());
		assert!(coordinator.network_monitor().is_some());

		coordinator.cleanup();
	}
}
