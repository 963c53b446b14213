// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The logger facade: console first, then fire-and-forget shipping.
//!
//! Every call writes to the local console sink (tracing) synchronously, then
//! dispatches a [`LogRecord`] to the transport as a detached task. The call
//! never blocks on the network and never surfaces a shipping failure; before
//! `init()` arms the facade it degrades to console-only logging.

use std::sync::{Arc, RwLock};

use logship_core::{LogLevel, LogRecord};
use tokio::runtime::Handle;
use tracing::{debug, trace, warn};

use crate::error::SdkError;
use crate::transport::TransportClient;

/// Shipping state installed by a successful `init()`.
pub(crate) struct Emitter {
	pub(crate) user_id: String,
	pub(crate) package_name: Option<String>,
	pub(crate) transport: TransportClient,
	pub(crate) handle: Handle,
	pub(crate) debug_logs: bool,
}

/// Shared emission state behind every [`Logger`] handle.
///
/// Reads happen on every emission from arbitrary threads; writes only at
/// init/cleanup. A poisoned lock degrades to console-only rather than
/// panicking into host code.
pub(crate) struct LoggerCore {
	emitter: RwLock<Option<Arc<Emitter>>>,
}

impl LoggerCore {
	pub(crate) fn new() -> Self {
		Self {
			emitter: RwLock::new(None),
		}
	}

	pub(crate) fn install(&self, emitter: Emitter) {
		if let Ok(mut slot) = self.emitter.write() {
			*slot = Some(Arc::new(emitter));
		}
	}

	pub(crate) fn clear(&self) {
		if let Ok(mut slot) = self.emitter.write() {
			*slot = None;
		}
	}

	pub(crate) fn emitter(&self) -> Option<Arc<Emitter>> {
		self.emitter.read().ok().and_then(|slot| slot.clone())
	}
}

/// The single public emission surface of the SDK.
///
/// Cheap to clone; all clones share the armed state. Safe to call from any
/// thread at any time, including before `init()`.
///
/// # Example
///
/// ```ignore
/// let logger = sdk.logger();
/// logger.info("Login", "user tapped login");
/// logger.error_with("Login", "login failed", &err);
/// ```
#[derive(Clone)]
pub struct Logger {
	core: Arc<LoggerCore>,
}

impl Logger {
	pub(crate) fn from_core(core: Arc<LoggerCore>) -> Self {
		Self { core }
	}

	/// Logs at verbose severity.
	pub fn verbose(&self, tag: &str, message: &str) {
		self.emit(LogLevel::Verbose, tag, message);
	}

	/// Logs at debug severity.
	pub fn debug(&self, tag: &str, message: &str) {
		self.emit(LogLevel::Debug, tag, message);
	}

	/// Logs at info severity.
	pub fn info(&self, tag: &str, message: &str) {
		self.emit(LogLevel::Info, tag, message);
	}

	/// Logs at warning severity.
	pub fn warning(&self, tag: &str, message: &str) {
		self.emit(LogLevel::Warning, tag, message);
	}

	/// Logs at error severity.
	pub fn error(&self, tag: &str, message: &str) {
		self.emit(LogLevel::Error, tag, message);
	}

	/// Logs at error severity with the error's display form appended.
	pub fn error_with(&self, tag: &str, message: &str, error: &dyn std::error::Error) {
		self.emit(LogLevel::Error, tag, &format!("{message}: {error}"));
	}

	/// True once `init()` has armed remote shipping.
	pub fn is_ready(&self) -> bool {
		self.core.emitter().is_some()
	}

	fn emit(&self, level: LogLevel, tag: &str, message: &str) {
		console_log(level, tag, message);

		let Some(emitter) = self.core.emitter() else {
			return;
		};

		let record = LogRecord::now(
			emitter.user_id.clone(),
			level,
			Some(tag.to_string()),
			message,
			emitter.package_name.clone(),
		);
		let transport = emitter.transport.clone();
		let debug_logs = emitter.debug_logs;

		// Detached: the emitting thread never waits on the send, and the
		// outcome feeds local diagnostics only.
		emitter.handle.spawn(async move {
			match transport.send_log(&record).await {
				Ok(_) => {
					if debug_logs {
						debug!(level = %level, "log shipped");
					} else {
						trace!(level = %level, "log shipped");
					}
				}
				Err(SdkError::Collector { status, message }) => {
					warn!(status, message = %message, "collector rejected log");
				}
				Err(error) => {
					warn!(error = %error, "failed to ship log");
				}
			}
		});
	}

	/// Ships one record synchronously with a short deadline.
	///
	/// Used only from the panic hook, where the process is about to
	/// terminate and a detached task would never get to run.
	pub(crate) fn emit_blocking(&self, level: LogLevel, tag: &str, message: &str) {
		console_log(level, tag, message);

		let Some(emitter) = self.core.emitter() else {
			return;
		};

		let record = LogRecord::now(
			emitter.user_id.clone(),
			level,
			Some(tag.to_string()),
			message,
			emitter.package_name.clone(),
		);
		if let Err(error) = emitter.transport.send_log_blocking(&record) {
			warn!(error = %error, "failed to ship crash record");
		}
	}
}

/// Writes one line to the local console sink.
fn console_log(level: LogLevel, tag: &str, message: &str) {
	match level {
		LogLevel::Verbose => trace!(tag, "{message}"),
		LogLevel::Debug => debug!(tag, "{message}"),
		LogLevel::Info => tracing::info!(tag, "{message}"),
		LogLevel::Warning => warn!(tag, "{message}"),
		LogLevel::Error => tracing::error!(tag, "{message}"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn unarmed_logger() -> Logger {
		Logger::from_core(Arc::new(LoggerCore::new()))
	}

	#[test]
	fn unarmed_logger_degrades_to_console_only() {
		let logger = unarmed_logger();
		logger.verbose("Test", "v");
		logger.debug("Test", "d");
		logger.info("Test", "i");
		logger.warning("Test", "w");
		logger.error("Test", "e");
		assert!(!logger.is_ready());
	}

	#[test]
	fn error_with_appends_the_error_display() {
		// The formatting path runs even unarmed; this exercises it without
		// a transport.
		let logger = unarmed_logger();
		let error = std::io::Error::new(std::io::ErrorKind::TimedOut, "socket timed out");
		logger.error_with("Network", "request failed", &error);
	}

	#[test]
	fn concurrent_unarmed_calls_never_panic_or_block() {
		let logger = unarmed_logger();
		let threads: Vec<_> = (0..8)
			.map(|i| {
				let logger = logger.clone();
				std::thread::spawn(move || {
					for n in 0..100 {
						logger.info("Concurrency", &format!("thread {i} message {n}"));
					}
				})
			})
			.collect();

		for thread in threads {
			thread.join().unwrap();
		}
	}

	#[test]
	fn emit_blocking_unarmed_is_a_no_op() {
		unarmed_logger().emit_blocking(LogLevel::Error, "Crash", "report");
	}
}
